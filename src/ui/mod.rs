//! Front-end widget semantics
//!
//! Rendering lives in the page; the rules for how a control maps clicks to
//! values live here so every front end behaves the same.

pub mod circles;

pub use circles::{CIRCLES_COUNT, circle_click, circle_states};
