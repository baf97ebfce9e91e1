//! Worldstriders character sheet
//!
//! Core modules:
//! - `schema`: Character record shape, closed enumerations and defaults
//! - `normalize`: Untrusted value -> valid record, field by field
//! - `format`: YAML import/export and the JSON storage envelope
//! - `persistence`: Byte stores and best-effort load/save/clear
//! - `edit`: Pure edit operations on the record
//! - `sheet`: The editing session tying the above together
//! - `ui`: Widget semantics shared by every front end
//! - `i18n`: English/Russian labels

pub mod edit;
pub mod format;
pub mod i18n;
pub mod normalize;
pub mod persistence;
pub mod schema;
pub mod settings;
pub mod sheet;
pub mod ui;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use edit::{Edit, SkillLinePatch, apply};
pub use format::FormatError;
pub use normalize::{Deviation, deviations, normalize, normalize_at};
pub use persistence::{
    ByteStore, LoadError, MemoryStore, Persistence, SaveStatus, StoreError,
};
pub use schema::{Character, Lang, SCHEMA_VERSION, default_character};
pub use settings::Settings;
pub use sheet::Sheet;

/// Sheet configuration constants
pub mod consts {
    /// Attribute bounds
    pub const ATTRIBUTE_MIN: u8 = 1;
    pub const ATTRIBUTE_MAX: u8 = 5;
    /// Upper bound for skill ratings and perk levels (lower bound is 0)
    pub const RATING_MAX: u8 = 5;
    /// Upper bound for characteristic dots and boxes
    pub const TRACK_MAX: u8 = 50;
    /// Upper bound for charge
    pub const CHARGE_MAX: u16 = 200;

    /// Prefix for every storage key
    pub const STORAGE_PREFIX: &str = "worldstriders";
    /// Bare language preference, kept apart from the record
    pub const LANGUAGE_KEY: &str = "worldstriders-language";
}
