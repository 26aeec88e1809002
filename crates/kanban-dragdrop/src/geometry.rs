//! Insertion-point geometry.
//!
//! A dragged card lands immediately before the first card whose vertical
//! midpoint sits below the pointer. Cards above the pointer never qualify.

use web_sys::Element;

/// Vertical midpoint of a box.
pub fn midpoint(top: f64, height: f64) -> f64 {
    top + height / 2.0
}

/// Midpoint of an element's current bounding box (viewport coordinates).
pub fn element_midpoint(el: &Element) -> f64 {
    let rect = el.get_bounding_client_rect();
    midpoint(rect.top(), rect.height())
}

/// Index of the card the dragged card should be inserted before.
///
/// `midpoints` are the midpoints of the column's non-dragged cards in DOM
/// order. The winner is the card with the smallest-magnitude negative
/// offset `pointer_y - midpoint`; on a tie the earlier card is kept.
/// `None` means append at the end of the column.
pub fn insertion_point<I>(midpoints: I, pointer_y: f64) -> Option<usize>
where
    I: IntoIterator<Item = f64>,
{
    let mut closest: Option<(usize, f64)> = None;
    for (index, mid) in midpoints.into_iter().enumerate() {
        let offset = pointer_y - mid;
        if offset < 0.0 && closest.map_or(true, |(_, best)| offset > best) {
            closest = Some((index, offset));
        }
    }
    closest.map(|(index, _)| index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_nearest_card_below_pointer() {
        assert_eq!(insertion_point([100.0, 200.0, 300.0], 210.0), Some(2));
        assert_eq!(insertion_point([100.0, 200.0, 300.0], 150.0), Some(1));
        assert_eq!(insertion_point([100.0, 200.0, 300.0], 0.0), Some(0));
    }

    #[test]
    fn positive_offsets_never_qualify() {
        // Pointer below every midpoint: append.
        assert_eq!(insertion_point([100.0, 200.0, 300.0], 310.0), None);
        // Exactly on a midpoint is offset 0, which is not negative.
        assert_eq!(insertion_point([100.0], 100.0), None);
    }

    #[test]
    fn empty_column_appends() {
        assert_eq!(insertion_point(std::iter::empty(), 42.0), None);
    }

    #[test]
    fn ties_keep_dom_order() {
        assert_eq!(insertion_point([300.0, 300.0, 400.0], 250.0), Some(0));
    }

    #[test]
    fn unordered_midpoints_still_pick_smallest_magnitude() {
        // Cards laid out out of order (e.g. CSS reordering).
        assert_eq!(insertion_point([500.0, 260.0, 400.0], 250.0), Some(1));
    }

    #[test]
    fn nan_midpoints_are_skipped() {
        assert_eq!(insertion_point([f64::NAN, 300.0], 250.0), Some(1));
    }

    #[test]
    fn midpoint_is_half_height_below_top() {
        assert_eq!(midpoint(100.0, 40.0), 120.0);
    }
}
