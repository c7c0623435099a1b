//! Slot records handed in by the host's data layer.
//!
//! These are read-only inputs; the strip never mutates or persists them.

use serde::{Deserialize, Serialize};

/// Grower/cultivar allowlists attached to a slot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotRestrictions {
    /// Grower ids allowed to book the slot (empty = unrestricted).
    #[serde(default)]
    pub growers: Vec<String>,
    /// Cultivar ids allowed on the slot (empty = unrestricted).
    #[serde(default)]
    pub cultivars: Vec<String>,
}

impl SlotRestrictions {
    /// True when either allowlist is non-empty.
    pub fn is_restrictive(&self) -> bool {
        !self.growers.is_empty() || !self.cultivars.is_empty()
    }
}

/// One delivery slot, as supplied by the host's query layer.
///
/// Partial records are tolerated: a missing capacity reads as 0, a missing
/// remaining reads as the full capacity, and unknown fields are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DaySlot {
    pub id: String,
    /// ISO `YYYY-MM-DD` civil date in the tenant zone.
    pub date: String,
    /// Wall-clock start, zero-padded (`HH:MM` or `HH:MM:SS`).
    #[serde(default)]
    pub start_time: String,
    /// Wall-clock end, zero-padded.
    #[serde(default)]
    pub end_time: String,
    /// Capacity in resource units (the source system books tons).
    #[serde(default)]
    pub capacity: f64,
    /// Unbooked capacity; absent means nothing booked yet.
    #[serde(default)]
    pub remaining: Option<f64>,
    /// Blacked-out slots accept no deliveries regardless of capacity.
    #[serde(default)]
    pub blackout: bool,
    #[serde(default)]
    pub restrictions: Option<SlotRestrictions>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub resource_unit: Option<String>,
}

impl DaySlot {
    /// Remaining capacity with the missing-value default applied.
    pub fn remaining_or_capacity(&self) -> f64 {
        self.remaining.unwrap_or(self.capacity)
    }

    /// True when the slot carries a non-empty note.
    pub fn has_note(&self) -> bool {
        self.notes.as_deref().is_some_and(|n| !n.trim().is_empty())
    }
}
