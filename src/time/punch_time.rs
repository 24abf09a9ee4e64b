//! Wall-clock punch timestamps.
//!
//! Biometric devices record local wall-clock time with no timezone. Any
//! timezone conversion here would corrupt classification, so this module
//! parses punch timestamps by reading off their literal components and
//! never routes them through a `DateTime<Tz>`.

use chrono::{NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// A local wall-clock timestamp, distinct from any "instant in time" type
/// used elsewhere in the engine (e.g. `calculated_at` audit timestamps,
/// which really are instants). `WallClock` deliberately has no conversion
/// from `DateTime<Utc>` — the two are not interchangeable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(transparent)]
#[sqlx(transparent)]
pub struct WallClock(pub NaiveDateTime);

impl WallClock {
    /// The calendar date this timestamp's workday belongs to.
    ///
    /// Punches with local hour in `[0, 5)` belong to the *previous*
    /// calendar date's workday (spec invariant #2).
    pub fn workday_date(&self) -> chrono::NaiveDate {
        let date = self.0.date();
        if self.0.hour() < 5 {
            date.pred_opt().unwrap_or(date)
        } else {
            date
        }
    }

    /// The local hour component, `0..24`.
    pub fn hour(&self) -> u32 {
        self.0.hour()
    }
}

impl From<NaiveDateTime> for WallClock {
    fn from(value: NaiveDateTime) -> Self {
        WallClock(value)
    }
}

const FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
];

/// Parses a biometric punch timestamp.
///
/// Accepts `YYYY-MM-DDTHH:MM:SS[.fff]` (with an optional trailing `Z`
/// inherited from the source database, which is stripped — not
/// interpreted as UTC) and the equivalent space-separated form. The
/// returned [`WallClock`]'s components equal those in `raw`, with no
/// timezone conversion.
///
/// # Example
///
/// ```
/// use payroll_engine::time::parse_punch_timestamp;
///
/// let wc = parse_punch_timestamp("2025-11-03T09:05:00Z").unwrap();
/// assert_eq!(wc.hour(), 9);
/// ```
pub fn parse_punch_timestamp(raw: &str) -> EngineResult<WallClock> {
    let trimmed = raw.trim();
    let without_zone = trimmed.strip_suffix('Z').unwrap_or(trimmed);

    for format in FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(without_zone, format) {
            return Ok(WallClock(dt));
        }
    }

    Err(EngineError::InvalidMonth {
        month: raw.to_string(),
        message: "could not parse punch timestamp".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_parse_iso_with_trailing_z() {
        let wc = parse_punch_timestamp("2025-11-03T09:05:00Z").unwrap();
        assert_eq!(wc.0.date(), NaiveDate::from_ymd_opt(2025, 11, 3).unwrap());
        assert_eq!(wc.hour(), 9);
    }

    #[test]
    fn test_parse_iso_without_zone() {
        let wc = parse_punch_timestamp("2025-11-03T18:30:00").unwrap();
        assert_eq!(wc.hour(), 18);
    }

    #[test]
    fn test_parse_with_fractional_seconds() {
        let wc = parse_punch_timestamp("2025-11-03T09:05:00.123Z").unwrap();
        assert_eq!(wc.hour(), 9);
    }

    #[test]
    fn test_parse_space_separated() {
        let wc = parse_punch_timestamp("2025-11-03 09:05:00").unwrap();
        assert_eq!(wc.hour(), 9);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_punch_timestamp("not a timestamp").is_err());
    }

    #[test]
    fn test_workday_date_before_5am_is_previous_day() {
        let wc = parse_punch_timestamp("2025-11-03T02:30:00").unwrap();
        assert_eq!(wc.workday_date(), NaiveDate::from_ymd_opt(2025, 11, 2).unwrap());
    }

    #[test]
    fn test_workday_date_at_5am_is_same_day() {
        let wc = parse_punch_timestamp("2025-11-03T05:00:00").unwrap();
        assert_eq!(wc.workday_date(), NaiveDate::from_ymd_opt(2025, 11, 3).unwrap());
    }

    #[test]
    fn test_workday_date_normal_hours_is_same_day() {
        let wc = parse_punch_timestamp("2025-11-03T14:00:00").unwrap();
        assert_eq!(wc.workday_date(), NaiveDate::from_ymd_opt(2025, 11, 3).unwrap());
    }

    #[test]
    fn test_no_timezone_conversion_occurs() {
        // A punch at 23:59 stays 23:59 regardless of what "local" means —
        // there is no zone to convert from/to.
        let wc = parse_punch_timestamp("2025-11-03T23:59:00").unwrap();
        assert_eq!(wc.0.time().hour(), 23);
        assert_eq!(wc.0.time().minute(), 59);
    }
}
