//! Per-day availability summaries over slot records.
//!
//! A [`DayAggregate`] is a pure function of `(date, slot list)`: it carries
//! no identity, is never mutated in place, and is recomputed on demand.
//! [`SlotIndex`] buckets the slot list by date once per change so each
//! rendered day costs one map lookup instead of a full-list filter.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::calendar::DateIndexMapper;
use crate::types::DaySlot;

/// Remaining/capacity ratio at or above which a day reads green.
pub const GREEN_THRESHOLD: f64 = 0.5;

/// Remaining/capacity ratio at or above which a day reads amber.
pub const AMBER_THRESHOLD: f64 = 0.2;

/// Traffic-light availability of one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AvailabilityLevel {
    Green,
    Amber,
    Red,
    Grey,
}

impl AvailabilityLevel {
    /// Lowercase name, matching the wire spelling hosts expect.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Green => "green",
            Self::Amber => "amber",
            Self::Red => "red",
            Self::Grey => "grey",
        }
    }
}

/// Summary of one day's slots.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayAggregate {
    pub total_slots: usize,
    pub capacity_total: f64,
    pub booked_total: f64,
    pub remaining: f64,
    pub utilization_pct: f64,
    pub has_blackouts: bool,
    pub has_restrictions: bool,
    pub has_notes: bool,
    /// Wall-clock start of the earliest slot, or `None` for an empty day.
    pub first_slot_time: Option<String>,
    pub level: AvailabilityLevel,
}

impl DayAggregate {
    /// The summary of a day with no slots at all.
    pub fn empty() -> Self {
        Self {
            total_slots: 0,
            capacity_total: 0.0,
            booked_total: 0.0,
            remaining: 0.0,
            utilization_pct: 0.0,
            has_blackouts: false,
            has_restrictions: false,
            has_notes: false,
            first_slot_time: None,
            level: AvailabilityLevel::Grey,
        }
    }
}

/// Summarize the slots whose `date` field exactly equals the target ISO date.
pub fn aggregate(date: &str, slots: &[DaySlot]) -> DayAggregate {
    aggregate_slots(slots.iter().filter(|s| s.date == date))
}

fn aggregate_slots<'a>(slots: impl Iterator<Item = &'a DaySlot>) -> DayAggregate {
    let mut total_slots = 0usize;
    let mut capacity_total = 0.0f64;
    let mut remaining = 0.0f64;
    let mut booked_total = 0.0f64;
    let mut has_blackouts = false;
    let mut has_restrictions = false;
    let mut has_notes = false;
    let mut first_slot_time: Option<String> = None;

    for slot in slots {
        total_slots += 1;
        let slot_remaining = slot.remaining_or_capacity();
        capacity_total += slot.capacity;
        remaining += slot_remaining;
        booked_total += slot.capacity - slot_remaining;
        has_blackouts |= slot.blackout;
        has_restrictions |= slot
            .restrictions
            .as_ref()
            .is_some_and(|r| r.is_restrictive());
        has_notes |= slot.has_note();
        if !slot.start_time.is_empty() {
            // Zero-padded wall-clock strings order lexicographically
            match &first_slot_time {
                Some(current) if *current <= slot.start_time => {}
                _ => first_slot_time = Some(slot.start_time.clone()),
            }
        }
    }

    let ratio = if capacity_total > 0.0 {
        remaining / capacity_total
    } else {
        // All-zero-capacity days read as fully booked, not as empty
        0.0
    };
    let level = if has_blackouts || total_slots == 0 {
        AvailabilityLevel::Grey
    } else if ratio >= GREEN_THRESHOLD {
        AvailabilityLevel::Green
    } else if ratio >= AMBER_THRESHOLD {
        AvailabilityLevel::Amber
    } else {
        AvailabilityLevel::Red
    };
    let utilization_pct = if capacity_total > 0.0 {
        booked_total / capacity_total * 100.0
    } else {
        0.0
    };

    DayAggregate {
        total_slots,
        capacity_total,
        booked_total,
        remaining,
        utilization_pct,
        has_blackouts,
        has_restrictions,
        has_notes,
        first_slot_time,
        level,
    }
}

/// Date-keyed slot buckets, rebuilt once per slot-list change.
#[derive(Debug, Default)]
pub struct SlotIndex {
    by_date: HashMap<NaiveDate, Vec<DaySlot>>,
    skipped: usize,
}

impl SlotIndex {
    /// Bucket `slots` by parsed date. Records with unparseable dates are
    /// counted and skipped, never fatal.
    pub fn build(slots: &[DaySlot]) -> Self {
        let mut by_date: HashMap<NaiveDate, Vec<DaySlot>> = HashMap::new();
        let mut skipped = 0usize;
        for slot in slots {
            match DateIndexMapper::parse_iso(&slot.date) {
                Ok(date) => by_date.entry(date).or_default().push(slot.clone()),
                Err(_) => skipped += 1,
            }
        }
        Self { by_date, skipped }
    }

    /// Summary for one day; O(slots on that day).
    pub fn aggregate_for(&self, date: NaiveDate) -> DayAggregate {
        match self.by_date.get(&date) {
            Some(bucket) => aggregate_slots(bucket.iter()),
            None => DayAggregate::empty(),
        }
    }

    /// The raw bucket for a day (empty slice when none).
    pub fn slots_for(&self, date: NaiveDate) -> &[DaySlot] {
        self.by_date.get(&date).map_or(&[], Vec::as_slice)
    }

    /// Records dropped at build time for unparseable dates.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Number of distinct days with at least one slot.
    pub fn day_count(&self) -> usize {
        self.by_date.len()
    }
}
