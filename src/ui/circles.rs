//! Five-circle rating control
//!
//! Clicking an empty circle fills up to and including it; clicking a filled
//! one empties everything from it onward, so clicking the last filled circle
//! lowers the rating by one.

/// Number of circles per control
pub const CIRCLES_COUNT: u8 = 5;

/// New rating after a click on circle `index` (0-based) at rating `current`
#[inline]
pub fn circle_click(current: u8, index: u8) -> u8 {
    let index = index.min(CIRCLES_COUNT - 1);
    if index < current { index } else { index + 1 }
}

/// Filled (true) / hollow (false) state of each circle for `value`
pub fn circle_states(value: u8) -> [bool; CIRCLES_COUNT as usize] {
    std::array::from_fn(|i| (i as u8) < value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_click_lower_circle_sets_to_index() {
        assert_eq!(circle_click(3, 1), 1);
        assert_eq!(circle_click(3, 0), 0);
    }

    #[test]
    fn test_click_last_filled_decrements() {
        assert_eq!(circle_click(3, 2), 2);
        assert_eq!(circle_click(1, 0), 0);
    }

    #[test]
    fn test_click_empty_circle_fills_through_it() {
        assert_eq!(circle_click(3, 3), 4);
        assert_eq!(circle_click(0, 4), 5);
        assert_eq!(circle_click(2, 2), 3);
    }

    #[test]
    fn test_out_of_range_index_is_capped() {
        assert_eq!(circle_click(0, 9), 5);
    }

    #[test]
    fn test_states() {
        assert_eq!(circle_states(0), [false; 5]);
        assert_eq!(circle_states(2), [true, true, false, false, false]);
        assert_eq!(circle_states(9), [true; 5]);
    }
}
