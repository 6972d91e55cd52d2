//! Stack Layout Engine - Pure geometry for the overlapping card stack
//!
//! Stateless functions computing:
//! - Per-item resting offset (the cascading "peek" of each card's top edge)
//! - Total content extent (height-stable across mixed card/pass heights)
//! - Maximum scroll range for the viewport
//!
//! Everything here is a closed-form formula; no layout tree, no measurement
//! pass. The scroll controller and per-item reactors consume these values.

use crate::types::StackItem;

// =============================================================================
// LAYOUT CONSTANTS
// =============================================================================

/// Vertical offset between consecutive items' resting positions.
pub const CARD_PEEK: f32 = 58.0;

/// Extra scroll range past the last item so it can clear the bottom chrome.
pub const SCROLL_SLACK: f32 = 140.0;

// =============================================================================
// GEOMETRY
// =============================================================================

/// Resting offset of an item in the unscrolled stack.
///
/// Grows linearly with position, independent of item height, so each card's
/// top edge peeks above the one below it.
pub fn base_offset(index: usize, peek: f32) -> f32 {
    index as f32 * peek
}

/// Total content extent of the stack.
///
/// Uses the maximum item height rather than each item's own height, keeping
/// the extent stable when pass items are taller than cards (at the cost of
/// allocating slightly more scroll range than a height-aware variant).
///
/// An empty sequence yields `0.0`.
pub fn content_extent(items: &[StackItem], peek: f32) -> f32 {
    if items.is_empty() {
        return 0.0;
    }
    let max_height = items.iter().map(|i| i.height).fold(0.0f32, f32::max);
    max_height + (items.len() - 1) as f32 * peek
}

/// Maximum scroll position for the given content and viewport extents.
///
/// If the stack fits within the viewport plus slack, scrolling is disabled
/// (`0.0`) and pan gestures produce zero net movement. Never negative,
/// always finite for finite inputs (a zero viewport is fine).
pub fn max_scroll(content_extent: f32, viewport_extent: f32, slack: f32) -> f32 {
    (content_extent - viewport_extent + slack).max(0.0)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ImageHandle, ItemKind, StackItem};

    fn items_with_heights(heights: &[f32]) -> Vec<StackItem> {
        heights
            .iter()
            .enumerate()
            .map(|(i, &h)| {
                StackItem::new(format!("item-{i}"), ItemKind::Card, ImageHandle::new("img"), h)
            })
            .collect()
    }

    #[test]
    fn test_base_offset_linear_in_index() {
        assert_eq!(base_offset(0, CARD_PEEK), 0.0);
        assert_eq!(base_offset(1, CARD_PEEK), 58.0);
        assert_eq!(base_offset(4, CARD_PEEK), 232.0);
    }

    #[test]
    fn test_content_extent_uses_max_height() {
        // Mixed card/pass heights: extent tracks the tallest item only
        let items = items_with_heights(&[240.0, 140.0, 240.0]);
        assert_eq!(content_extent(&items, CARD_PEEK), 240.0 + 2.0 * 58.0);
    }

    #[test]
    fn test_content_extent_empty() {
        assert_eq!(content_extent(&[], CARD_PEEK), 0.0);
    }

    #[test]
    fn test_content_extent_single_item() {
        let items = items_with_heights(&[240.0]);
        assert_eq!(content_extent(&items, CARD_PEEK), 240.0);
    }

    #[test]
    fn test_max_scroll_disabled_when_stack_fits() {
        // 5 items, each 240 high, viewport 800:
        // extent = 240 + 4*58 = 472; 472 - 800 + 140 < 0 => no scrolling
        let items = items_with_heights(&[240.0; 5]);
        let extent = content_extent(&items, CARD_PEEK);
        assert_eq!(extent, 472.0);
        assert_eq!(max_scroll(extent, 800.0, SCROLL_SLACK), 0.0);
    }

    #[test]
    fn test_max_scroll_with_overflow() {
        // 10 items, max height 240, viewport 800:
        // extent = 240 + 9*58 = 762; max_scroll = 762 - 800 + 140 = 102
        let items = items_with_heights(&[240.0; 10]);
        let extent = content_extent(&items, CARD_PEEK);
        assert_eq!(extent, 762.0);
        assert_eq!(max_scroll(extent, 800.0, SCROLL_SLACK), 102.0);
    }

    #[test]
    fn test_max_scroll_never_negative() {
        assert_eq!(max_scroll(0.0, 10_000.0, SCROLL_SLACK), 0.0);
        assert_eq!(max_scroll(100.0, 100.0, 0.0), 0.0);
    }

    #[test]
    fn test_max_scroll_zero_viewport_is_finite() {
        let m = max_scroll(762.0, 0.0, SCROLL_SLACK);
        assert!(m.is_finite());
        assert_eq!(m, 902.0);
    }
}
