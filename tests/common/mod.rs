//! Shared builders for slot-record tests.

#![allow(dead_code)]

use dayline::{DaySlot, SlotRestrictions};

/// A plain bookable slot with explicit capacity/remaining.
pub fn slot(id: &str, date: &str, capacity: f64, remaining: Option<f64>) -> DaySlot {
    DaySlot {
        id: id.to_string(),
        date: date.to_string(),
        start_time: String::new(),
        end_time: String::new(),
        capacity,
        remaining,
        blackout: false,
        restrictions: None,
        notes: None,
        resource_unit: None,
    }
}

/// A slot with wall-clock start/end times.
pub fn timed_slot(id: &str, date: &str, start: &str, end: &str, capacity: f64) -> DaySlot {
    let mut s = slot(id, date, capacity, None);
    s.start_time = start.to_string();
    s.end_time = end.to_string();
    s
}

/// A blacked-out slot.
pub fn blackout_slot(id: &str, date: &str, capacity: f64) -> DaySlot {
    let mut s = slot(id, date, capacity, None);
    s.blackout = true;
    s
}

/// A slot restricted to the given grower ids.
pub fn restricted_slot(id: &str, date: &str, capacity: f64, growers: &[&str]) -> DaySlot {
    let mut s = slot(id, date, capacity, None);
    s.restrictions = Some(SlotRestrictions {
        growers: growers.iter().map(|g| (*g).to_string()).collect(),
        cultivars: Vec::new(),
    });
    s
}
