//! dayline - virtualized day-strip navigator for the web
//!
//! An effectively unbounded, timezone-aware strip of calendar days for
//! delivery-slot dashboards, rendered in the browser via WebAssembly:
//! - Only the visible window of days is materialized (tens, not thousands)
//! - Civil-date day indexing that cannot drift across DST transitions
//! - Per-day availability summaries (capacity, booked, remaining, blackouts)
//! - Gesture scrolling, keyboard navigation, programmatic jump-to-date
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { DayTimeline } from 'dayline';
//! await init();
//! const strip = new DayTimeline(container, 'Africa/Johannesburg', '2025-08-15', 0);
//! strip.set_slots(slots);
//! strip.set_on_date_select((iso) => console.log('selected', iso));
//! strip.center_on_date('2025-09-01', true);
//! ```

// Core modules (native-testable, no DOM)
pub mod aggregate;
pub mod calendar;
pub mod error;
pub mod layout;
pub mod types;

// Browser viewer (DOM-backed on wasm32, headless elsewhere)
pub mod viewer;

use wasm_bindgen::prelude::*;

// Re-export the main viewer struct
pub use viewer::DayTimeline;

pub use aggregate::{aggregate, AvailabilityLevel, DayAggregate, SlotIndex};
pub use types::*;

/// Parse a JSON array of slot records.
///
/// Tolerant of partial records: missing capacities read as 0, missing
/// remaining as the full capacity, unknown fields are ignored.
///
/// # Errors
/// Returns an error when the string is not a JSON array of slot objects.
pub fn parse_slots(json: &str) -> error::Result<Vec<DaySlot>> {
    Ok(serde_json::from_str(json)?)
}

/// Get the library version
#[must_use]
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
