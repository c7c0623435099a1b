//! The bounded index range addressable by the strip.
//!
//! Position indices run `0..total_days()`, with the epoch sitting at
//! `days_before`. The range grows forward on demand (never backward, never
//! shrinking) and is capped so a request for an arbitrarily distant date
//! cannot balloon memory.

use chrono::NaiveDate;

use crate::calendar::DateIndexMapper;

/// Hard cap on the total number of addressable days.
pub const MAX_TOTAL_DAYS: i64 = 730;

/// Days kept before the epoch. Fixed for the lifetime of the range.
pub const DEFAULT_DAYS_BEFORE: i64 = 30;

/// Initial forward span from the epoch.
pub const DEFAULT_DAYS_AFTER: i64 = 90;

/// Minimum forward span after any expansion.
const MIN_DAYS_AFTER: i64 = 30;

/// Margin added past a requested date when expanding.
const EXPAND_MARGIN: i64 = 5;

/// The addressable day range: `days_before` days, the epoch, `days_after` days.
#[derive(Debug, Clone, Copy)]
pub struct TimelineRange {
    mapper: DateIndexMapper,
    days_before: i64,
    days_after: i64,
}

impl TimelineRange {
    /// Create a range around the mapper's epoch with the default spans.
    pub fn new(mapper: DateIndexMapper) -> Self {
        Self {
            mapper,
            days_before: DEFAULT_DAYS_BEFORE,
            days_after: DEFAULT_DAYS_AFTER,
        }
    }

    /// The mapper this range is built over.
    pub fn mapper(&self) -> &DateIndexMapper {
        &self.mapper
    }

    /// Days addressable before the epoch.
    pub fn days_before(&self) -> i64 {
        self.days_before
    }

    /// Days addressable after the epoch.
    pub fn days_after(&self) -> i64 {
        self.days_after
    }

    /// Total addressable days (before + epoch + after).
    pub fn total_days(&self) -> i64 {
        self.days_before + self.days_after + 1
    }

    /// Position index of a date, if it lies inside the range.
    pub fn index_of(&self, date: NaiveDate) -> Option<usize> {
        let offset = self.mapper.offset_from_epoch(date);
        if offset < -self.days_before || offset > self.days_after {
            return None;
        }
        usize::try_from(offset + self.days_before).ok()
    }

    /// Date at a position index, if the index lies inside the range.
    pub fn date_at(&self, index: usize) -> Option<NaiveDate> {
        let index = i64::try_from(index).ok()?;
        if index >= self.total_days() {
            return None;
        }
        self.mapper.date_at_offset(index - self.days_before)
    }

    /// True if `date` is currently addressable.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.index_of(date).is_some()
    }

    /// Grow the forward span so `date` becomes addressable.
    ///
    /// The backward span never changes, and the range never shrinks. When
    /// the grown total would exceed [`MAX_TOTAL_DAYS`] the range is left
    /// untouched and `false` is returned; the caller decides what to do with
    /// the unreachable date.
    pub fn expand_to_include(&mut self, date: NaiveDate) -> bool {
        let offset = self.mapper.offset_from_epoch(date);
        if offset < -self.days_before {
            return false;
        }
        if offset <= self.days_after {
            return true;
        }
        let needed_after = (offset + EXPAND_MARGIN).max(MIN_DAYS_AFTER);
        if self.days_before + needed_after + 1 > MAX_TOTAL_DAYS {
            return false;
        }
        self.days_after = needed_after;
        true
    }
}
