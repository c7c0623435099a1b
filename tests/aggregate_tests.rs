//! Aggregation engine tests
//!
//! Per-day summary math, availability thresholds, tolerant defaults, and
//! the date-keyed slot index.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod common;

use common::{blackout_slot, restricted_slot, slot, timed_slot};
use dayline::aggregate::{aggregate, AvailabilityLevel, SlotIndex};
use dayline::calendar::DateIndexMapper;
use test_case::test_case;

// =============================================================================
// SUMMARY MATH
// =============================================================================

#[test]
fn test_capacity_booked_remaining_sums() {
    let slots = vec![
        slot("s1", "2025-08-15", 20.0, Some(15.0)),
        slot("s2", "2025-08-15", 10.0, Some(0.0)),
    ];
    let agg = aggregate("2025-08-15", &slots);

    assert_eq!(agg.total_slots, 2);
    assert_eq!(agg.capacity_total, 30.0);
    assert_eq!(agg.booked_total, 15.0);
    assert_eq!(agg.remaining, 15.0);
    assert_eq!(agg.utilization_pct, 50.0);
}

#[test]
fn test_missing_remaining_defaults_to_capacity() {
    let slots = vec![slot("s1", "2025-08-15", 25.0, None)];
    let agg = aggregate("2025-08-15", &slots);

    assert_eq!(agg.remaining, 25.0, "remaining should default to capacity");
    assert_eq!(agg.booked_total, 0.0);
    assert_eq!(agg.level, AvailabilityLevel::Green);
}

#[test]
fn test_only_exact_date_matches() {
    let slots = vec![
        slot("s1", "2025-08-15", 20.0, None),
        slot("s2", "2025-08-16", 10.0, None),
        slot("s3", "garbage", 10.0, None),
    ];
    let agg = aggregate("2025-08-15", &slots);

    assert_eq!(agg.total_slots, 1);
    assert_eq!(agg.capacity_total, 20.0);
}

#[test]
fn test_first_slot_time_is_earliest() {
    let slots = vec![
        timed_slot("s1", "2025-08-15", "10:00", "12:00", 10.0),
        timed_slot("s2", "2025-08-15", "07:30", "09:00", 10.0),
        timed_slot("s3", "2025-08-15", "14:00", "16:00", 10.0),
    ];
    let agg = aggregate("2025-08-15", &slots);
    assert_eq!(agg.first_slot_time.as_deref(), Some("07:30"));
}

#[test]
fn test_empty_day_aggregate() {
    let agg = aggregate("2025-08-15", &[]);
    assert_eq!(agg.total_slots, 0);
    assert_eq!(agg.level, AvailabilityLevel::Grey);
    assert_eq!(agg.first_slot_time, None);
    assert_eq!(agg.utilization_pct, 0.0);
}

// =============================================================================
// AVAILABILITY THRESHOLDS
// =============================================================================

#[test_case(60.0, AvailabilityLevel::Green ; "well above half")]
#[test_case(50.0, AvailabilityLevel::Green ; "exactly half is green")]
#[test_case(30.0, AvailabilityLevel::Amber ; "between thresholds")]
#[test_case(20.0, AvailabilityLevel::Amber ; "exactly a fifth is amber")]
#[test_case(10.0, AvailabilityLevel::Red ; "nearly booked out")]
#[test_case(0.0, AvailabilityLevel::Red ; "fully booked")]
fn test_availability_thresholds(remaining: f64, expected: AvailabilityLevel) {
    let slots = vec![slot("s1", "2025-08-15", 100.0, Some(remaining))];
    let agg = aggregate("2025-08-15", &slots);
    assert_eq!(agg.level, expected, "remaining={}", remaining);
}

#[test]
fn test_blackout_forces_grey_regardless_of_remaining() {
    let slots = vec![
        slot("s1", "2025-08-15", 100.0, Some(90.0)),
        blackout_slot("s2", "2025-08-15", 10.0),
    ];
    let agg = aggregate("2025-08-15", &slots);
    assert!(agg.has_blackouts);
    assert_eq!(agg.level, AvailabilityLevel::Grey);
}

#[test]
fn test_zero_capacity_slots_read_red_not_grey() {
    // Slots exist but none of them can take anything
    let slots = vec![
        slot("s1", "2025-08-15", 0.0, None),
        slot("s2", "2025-08-15", 0.0, None),
    ];
    let agg = aggregate("2025-08-15", &slots);
    assert_eq!(agg.total_slots, 2);
    assert_eq!(agg.level, AvailabilityLevel::Red);
}

#[test]
fn test_zero_capacity_with_blackout_is_grey() {
    let slots = vec![blackout_slot("s1", "2025-08-15", 0.0)];
    let agg = aggregate("2025-08-15", &slots);
    assert_eq!(agg.level, AvailabilityLevel::Grey);
}

// =============================================================================
// FLAGS
// =============================================================================

#[test]
fn test_restriction_and_note_flags() {
    let mut noted = slot("s1", "2025-08-15", 10.0, None);
    noted.notes = Some("forklift out of service".to_string());
    let slots = vec![
        noted,
        restricted_slot("s2", "2025-08-15", 10.0, &["grower-7"]),
    ];
    let agg = aggregate("2025-08-15", &slots);
    assert!(agg.has_notes);
    assert!(agg.has_restrictions);
    assert!(!agg.has_blackouts);
}

#[test]
fn test_empty_restriction_lists_do_not_flag() {
    let slots = vec![restricted_slot("s1", "2025-08-15", 10.0, &[])];
    let agg = aggregate("2025-08-15", &slots);
    assert!(!agg.has_restrictions, "empty allowlists are unrestricted");
}

#[test]
fn test_blank_notes_do_not_flag() {
    let mut s = slot("s1", "2025-08-15", 10.0, None);
    s.notes = Some("   ".to_string());
    let agg = aggregate("2025-08-15", &[s]);
    assert!(!agg.has_notes);
}

// =============================================================================
// SLOT INDEX
// =============================================================================

#[test]
fn test_index_matches_direct_aggregation() {
    let slots = vec![
        slot("s1", "2025-08-15", 20.0, Some(15.0)),
        slot("s2", "2025-08-15", 10.0, Some(0.0)),
        slot("s3", "2025-08-16", 40.0, None),
    ];
    let index = SlotIndex::build(&slots);
    let date = DateIndexMapper::parse_iso("2025-08-15").unwrap();

    assert_eq!(index.aggregate_for(date), aggregate("2025-08-15", &slots));
    assert_eq!(index.day_count(), 2);
    assert_eq!(index.slots_for(date).len(), 2);
}

#[test]
fn test_index_skips_unparseable_dates() {
    let slots = vec![
        slot("s1", "2025-08-15", 20.0, None),
        slot("s2", "not-a-date", 10.0, None),
        slot("s3", "", 10.0, None),
    ];
    let index = SlotIndex::build(&slots);
    assert_eq!(index.skipped(), 2);
    assert_eq!(index.day_count(), 1);
}

#[test]
fn test_index_unknown_day_is_empty() {
    let index = SlotIndex::build(&[slot("s1", "2025-08-15", 20.0, None)]);
    let other = DateIndexMapper::parse_iso("2025-08-20").unwrap();
    let agg = index.aggregate_for(other);
    assert_eq!(agg.total_slots, 0);
    assert_eq!(agg.level, AvailabilityLevel::Grey);
}

// =============================================================================
// JSON SURFACE
// =============================================================================

#[test]
fn test_parse_slots_tolerates_partial_records() {
    let json = r#"[
        {"id": "s1", "date": "2025-08-15", "start_time": "08:00", "end_time": "10:00",
         "capacity": 20, "remaining": 5, "blackout": false, "notes": "gate B",
         "resource_unit": "tons", "extra_field": 42},
        {"id": "s2", "date": "2025-08-15"}
    ]"#;
    let slots = dayline::parse_slots(json).unwrap();
    assert_eq!(slots.len(), 2);
    assert_eq!(slots[1].capacity, 0.0, "missing capacity reads as 0");
    assert_eq!(slots[1].remaining, None);
    assert!(!slots[1].blackout);

    let agg = aggregate("2025-08-15", &slots);
    assert_eq!(agg.capacity_total, 20.0);
    assert_eq!(agg.remaining, 5.0);
}
