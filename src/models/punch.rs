//! Raw biometric punch log entries.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::time::WallClock;

/// A single biometric device event: `devicelogs_MM_YYYY` (spec §6).
/// Append-only and immutable once synced from the device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Punch {
    /// The employee this punch belongs to.
    pub employee_code: String,
    /// The local wall-clock timestamp recorded by the device.
    pub log_timestamp: WallClock,
    /// Optional device-reported direction. Not trusted by the classifier,
    /// which derives first-entry/last-exit purely from ordering.
    pub direction: Option<PunchDirection>,
    /// The device that recorded this punch.
    pub device_id: Option<String>,
}

/// Device-reported punch direction, when present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "TEXT", rename_all = "UPPERCASE")]
pub enum PunchDirection {
    /// Check-in.
    In,
    /// Check-out.
    Out,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample_punch(hour: u32, minute: u32) -> Punch {
        Punch {
            employee_code: "E1001".to_string(),
            log_timestamp: WallClock(
                NaiveDate::from_ymd_opt(2025, 11, 3)
                    .unwrap()
                    .and_hms_opt(hour, minute, 0)
                    .unwrap(),
            ),
            direction: Some(PunchDirection::In),
            device_id: Some("DEV-12".to_string()),
        }
    }

    #[test]
    fn test_serialize_round_trip() {
        let punch = sample_punch(9, 5);
        let json = serde_json::to_string(&punch).unwrap();
        let deserialized: Punch = serde_json::from_str(&json).unwrap();
        assert_eq!(punch, deserialized);
    }

    #[test]
    fn test_direction_is_optional() {
        let mut punch = sample_punch(9, 5);
        punch.direction = None;
        let json = serde_json::to_string(&punch).unwrap();
        let deserialized: Punch = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.direction, None);
    }
}
