//! Bidirectional mapping between civil calendar dates and integer day offsets.
//!
//! All arithmetic is done on `NaiveDate` (whole civil days in the tenant
//! zone), never on millisecond subtraction across a UTC boundary, so a
//! daylight-saving transition can never shift an offset by one.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use chrono_tz::Tz;

use crate::error::{DaylineError, Result};

/// Tenant zone used when an IANA identifier cannot be resolved.
pub const FALLBACK_TZ: Tz = chrono_tz::Africa::Johannesburg;

/// Maps civil dates in a fixed tenant timezone to signed day offsets from an
/// epoch date, and back.
#[derive(Debug, Clone, Copy)]
pub struct DateIndexMapper {
    epoch: NaiveDate,
    tz: Tz,
}

impl DateIndexMapper {
    /// Create a mapper anchored at `epoch`, interpreting instants in `tz`.
    pub fn new(epoch: NaiveDate, tz: Tz) -> Self {
        Self { epoch, tz }
    }

    /// Resolve an IANA zone identifier (e.g. `"Africa/Johannesburg"`).
    pub fn resolve_tz(name: &str) -> Result<Tz> {
        name.parse::<Tz>()
            .map_err(|_| DaylineError::Timezone(name.to_string()))
    }

    /// The epoch date all offsets are measured from.
    pub fn epoch(&self) -> NaiveDate {
        self.epoch
    }

    /// The tenant timezone.
    pub fn tz(&self) -> Tz {
        self.tz
    }

    /// Signed whole-day offset of `date` from the epoch (negative before it).
    pub fn offset_from_epoch(&self, date: NaiveDate) -> i64 {
        date.signed_duration_since(self.epoch).num_days()
    }

    /// Inverse of [`offset_from_epoch`](Self::offset_from_epoch).
    ///
    /// Returns `None` only when the offset would leave `NaiveDate`'s
    /// representable range.
    pub fn date_at_offset(&self, offset: i64) -> Option<NaiveDate> {
        let delta = Duration::try_days(offset)?;
        self.epoch.checked_add_signed(delta)
    }

    /// Civil date of `instant` in the tenant zone.
    ///
    /// An instant shortly before tenant-midnight and one shortly after land
    /// on different dates here even when they share a UTC date.
    pub fn normalize_datetime(&self, instant: DateTime<Utc>) -> NaiveDate {
        instant.with_timezone(&self.tz).date_naive()
    }

    /// Today's civil date in the tenant zone.
    pub fn today(&self) -> NaiveDate {
        self.normalize_datetime(Utc::now())
    }

    /// Today's civil date in an arbitrary zone (epoch seeding).
    pub fn today_in(tz: Tz) -> NaiveDate {
        Utc::now().with_timezone(&tz).date_naive()
    }

    /// Parse a strict `YYYY-MM-DD` date string.
    pub fn parse_iso(s: &str) -> Result<NaiveDate> {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| DaylineError::Date(s.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn mapper() -> DateIndexMapper {
        let epoch = NaiveDate::from_ymd_opt(2025, 8, 1).unwrap();
        DateIndexMapper::new(epoch, FALLBACK_TZ)
    }

    #[test]
    fn test_offset_signs() {
        let m = mapper();
        let before = NaiveDate::from_ymd_opt(2025, 7, 30).unwrap();
        let after = NaiveDate::from_ymd_opt(2025, 8, 3).unwrap();
        assert_eq!(m.offset_from_epoch(m.epoch()), 0);
        assert_eq!(m.offset_from_epoch(before), -2);
        assert_eq!(m.offset_from_epoch(after), 2);
    }

    #[test]
    fn test_tenant_midnight_normalization() {
        let m = mapper();
        // Johannesburg is UTC+2: 22:30 UTC on the 14th is 00:30 on the 15th.
        let instant = Utc.with_ymd_and_hms(2025, 8, 14, 22, 30, 0).unwrap();
        let date = m.normalize_datetime(instant);
        assert_eq!(date, NaiveDate::from_ymd_opt(2025, 8, 15).unwrap());
    }

    #[test]
    fn test_unknown_tz_rejected() {
        assert!(DateIndexMapper::resolve_tz("Mars/Olympus_Mons").is_err());
        assert!(DateIndexMapper::resolve_tz("Africa/Johannesburg").is_ok());
    }
}
