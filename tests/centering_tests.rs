//! Scroll-centering tests
//!
//! Tests for the jump-to-date controller: offset math, clamping, range
//! expansion, out-of-range aborts, and deferral behind user gestures.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use dayline::layout::{StripLayout, Viewport};
use dayline::viewer::DayTimeline;

const TZ: &str = "Africa/Johannesburg";

/// Strip anchored at 2025-08-01: 30 days before, 90 after, 80px cells,
/// 800px viewport. Epoch sits at index 30.
fn timeline() -> DayTimeline {
    DayTimeline::new_headless(TZ, "2025-08-01", "2025-08-01", 800.0, 80.0).unwrap()
}

// =============================================================================
// CENTERING MATH
// =============================================================================

#[test]
fn test_center_places_cell_at_midpoint() {
    let mut tl = timeline();
    // Epoch cell: index 30, left edge 2400px
    assert!(tl.center_on_date("2025-08-01", false));
    assert_eq!(tl.scroll_x(), 2400.0 - (800.0 - 80.0) / 2.0);
}

#[test]
fn test_center_on_first_index_clamps_to_zero() {
    let mut tl = timeline();
    // Index 0 is 30 days before the epoch
    assert!(tl.center_on_date("2025-07-02", false));
    assert_eq!(tl.scroll_x(), 0.0, "centering never goes negative");
}

#[test]
fn test_center_near_right_edge_clamps_to_max() {
    let mut tl = timeline();
    // Last index (120) cannot be centered without overshooting the strip
    assert!(tl.center_on_date("2025-10-30", false));
    let max_scroll = 121.0 * 80.0 - 800.0;
    assert_eq!(tl.scroll_x(), max_scroll);
}

#[test]
fn test_centered_scroll_for_via_viewport() {
    let strip = StripLayout::new(80.0, 100);
    let mut vp = Viewport::new();
    vp.width = 800.0;

    assert_eq!(vp.centered_scroll_for(&strip, 0), Some(0.0));
    assert_eq!(vp.centered_scroll_for(&strip, 50), Some(4000.0 - 360.0));
    assert_eq!(vp.centered_scroll_for(&strip, 100), None, "out of range");
}

// =============================================================================
// RANGE EXPANSION THROUGH CENTERING
// =============================================================================

#[test]
fn test_center_on_distant_date_expands_range() {
    let mut tl = timeline();
    // 400 days past the epoch
    assert!(tl.center_on_date("2026-09-05", false));
    assert!(
        tl.days_after() >= 405,
        "after span should grow to cover the target, got {}",
        tl.days_after()
    );
    assert!(tl.total_days() <= 730);
    // Index 430, left edge 34400px, centered and in range
    assert_eq!(tl.scroll_x(), 34400.0 - 360.0);
}

#[test]
fn test_center_beyond_cap_aborts_without_scrolling() {
    let mut tl = timeline();
    assert!(tl.center_on_date("2025-08-10", false));
    let scroll_before = tl.scroll_x();
    let days_after_before = tl.days_after();

    // 730 days past the epoch cannot fit under the cap
    assert!(!tl.center_on_date("2027-08-01", false));
    assert_eq!(tl.scroll_x(), scroll_before, "scroll state untouched");
    assert_eq!(tl.days_after(), days_after_before, "range untouched");
}

#[test]
fn test_center_before_range_start_aborts() {
    let mut tl = timeline();
    let scroll_before = tl.scroll_x();
    assert!(!tl.center_on_date("2025-06-01", false));
    assert_eq!(tl.scroll_x(), scroll_before);
}

#[test]
fn test_center_with_invalid_date_is_a_no_op() {
    let mut tl = timeline();
    let scroll_before = tl.scroll_x();
    assert!(!tl.center_on_date("garbage", false));
    assert!(!tl.center_on_date("2025-02-30", false));
    assert_eq!(tl.scroll_x(), scroll_before);
}

// =============================================================================
// GESTURE DEFERRAL
// =============================================================================

#[test]
fn test_center_during_gesture_is_deferred_until_settle() {
    let mut tl = timeline();
    tl.scroll_to(1000.0);

    assert!(tl.center_on_date("2025-08-20", false));
    assert!(tl.has_pending_center());
    assert_eq!(tl.scroll_x(), 1000.0, "no write while the gesture settles");

    tl.settle();
    assert!(!tl.has_pending_center());
    // Index 49, left edge 3920px
    assert_eq!(tl.scroll_x(), 3920.0 - 360.0);
}

#[test]
fn test_deferred_center_is_last_write_wins() {
    let mut tl = timeline();
    tl.scroll_to(1000.0);

    assert!(tl.center_on_date("2025-08-20", false));
    assert!(tl.center_on_date("2025-08-05", false));
    tl.settle();

    // Only the later request lands: index 34, left edge 2720px
    assert_eq!(tl.scroll_x(), 2720.0 - 360.0);
}

#[test]
fn test_centering_does_not_touch_selection() {
    let mut tl = timeline();
    assert!(tl.center_on_date("2025-08-20", false));
    assert_eq!(tl.selected_date(), "2025-08-01");
    assert_eq!(tl.focused_date(), "2025-08-01");
}
