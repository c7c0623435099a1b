//! Civil-date arithmetic for the day strip.
//!
//! This module handles:
//! - Mapping calendar dates to signed day offsets from an epoch (and back)
//! - Normalizing instants to civil dates in the tenant timezone
//! - The bounded, forward-expanding index range the strip addresses

mod date_index;
mod range;

pub use date_index::{DateIndexMapper, FALLBACK_TZ};
pub use range::{TimelineRange, DEFAULT_DAYS_AFTER, DEFAULT_DAYS_BEFORE, MAX_TOTAL_DAYS};
