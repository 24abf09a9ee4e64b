//! Daily attendance classification and the monthly engine's output shape.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::time::WallClock;

/// The classification of a single calendar day, as it stands after all
/// five attendance-engine passes have run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DayStatus {
    /// No qualifying attendance; below half the shift's work hours.
    Absent,
    /// Attendance at or above 97% of the shift's work hours.
    FullDay,
    /// Attendance between half and 97% of the shift's work hours.
    HalfDay,
    /// Outside the employee's effective (joined, not yet exited) range;
    /// no logs were considered.
    NotActive,
    /// A Sunday, paid or unpaid per [`WeekoffType`].
    Weekoff,
    /// Covered by an approved paid leave.
    PaidLeave,
    /// Covered by an approved casual leave.
    CasualLeave,
}

/// Whether a Sunday weekoff is paid, per the rules in spec §4.5 Pass 5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeekoffType {
    /// Paid weekoff.
    Paid,
    /// Unpaid weekoff (5+ LOP days in the cycle, or no qualifying
    /// attendance in the containing week for a new joiner/exiting
    /// employee).
    Unpaid,
}

/// One calendar day's fully-resolved attendance record: the day
/// classifier's raw output plus every annotation later passes add.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyRecord {
    /// The calendar date this record describes.
    pub date: NaiveDate,
    /// The shift name resolved for this employee on this date.
    pub shift_name: String,
    /// The day's current status.
    pub status: DayStatus,
    /// The status this day had before regularization/leave application,
    /// when it differs from `status`.
    pub original_status: Option<DayStatus>,
    /// The first recorded punch of the workday, if any.
    pub first_entry: Option<WallClock>,
    /// The last recorded punch of the workday, if any.
    pub last_exit: Option<WallClock>,
    /// Hours worked, clamped to `[0, 24]`.
    pub worked_hours: Decimal,
    /// Whether the first entry was later than the shift's grace window.
    pub is_late: bool,
    /// Whether the first entry was more than 30 minutes late.
    pub is_late_by_30_minutes: bool,
    /// Minutes late, when known.
    pub minutes_late: Option<i64>,
    /// Whether the last exit was more than 30 minutes before shift end
    /// (or only a check-in was recorded).
    pub is_early_exit: bool,
    /// Number of punches considered for this day.
    pub log_count: u32,
    /// Whether a regularization was applied to this day.
    pub is_regularized: bool,
    /// The leave value applied to this day, if any (`0.5` or `1.0`).
    pub leave_value: Option<Decimal>,
    /// Weekoff paid/unpaid classification, set only when `status ==
    /// Weekoff`.
    pub weekoff_type: Option<WeekoffType>,
}

impl DailyRecord {
    /// Returns `true` if this day currently counts toward the "not
    /// active" (outside effective range) bucket.
    pub fn is_not_active(&self) -> bool {
        self.status == DayStatus::NotActive
    }
}

/// The full output of the monthly attendance engine (spec §4.5): the
/// per-day breakdown plus cycle-level counters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyAttendance {
    /// The employee this breakdown describes.
    pub employee_code: String,
    /// The payroll cycle label, `YYYY-MM`.
    pub month: String,
    /// One record per calendar date in the full cycle.
    pub daily_breakdown: Vec<DailyRecord>,
    /// Count of full-day statuses after all passes.
    pub full_days: u32,
    /// Count of half-day statuses after all passes.
    pub half_days: u32,
    /// Count of absent statuses after all passes.
    pub absent_days: u32,
    /// Count of days flagged late (full-day or half-day only).
    pub late_days: u32,
    /// Count of full days flagged late by 30+ minutes.
    pub late_by_30_minutes_days: u32,
    /// Count of early-exit days.
    pub early_exits: u32,
    /// Total worked hours across the cycle.
    pub total_worked_hours: Decimal,
    /// Total calendar days in the full cycle.
    pub total_days_in_effective_cycle: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record(status: DayStatus) -> DailyRecord {
        DailyRecord {
            date: NaiveDate::from_ymd_opt(2025, 11, 3).unwrap(),
            shift_name: "General".to_string(),
            status,
            original_status: None,
            first_entry: None,
            last_exit: None,
            worked_hours: Decimal::ZERO,
            is_late: false,
            is_late_by_30_minutes: false,
            minutes_late: None,
            is_early_exit: false,
            log_count: 0,
            is_regularized: false,
            leave_value: None,
            weekoff_type: None,
        }
    }

    #[test]
    fn test_is_not_active() {
        assert!(sample_record(DayStatus::NotActive).is_not_active());
        assert!(!sample_record(DayStatus::Absent).is_not_active());
    }

    #[test]
    fn test_daily_record_serialize_round_trip() {
        let mut record = sample_record(DayStatus::FullDay);
        record.weekoff_type = Some(WeekoffType::Paid);
        let json = serde_json::to_string(&record).unwrap();
        let deserialized: DailyRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record, deserialized);
    }

    #[test]
    fn test_monthly_attendance_serialize_round_trip() {
        let attendance = MonthlyAttendance {
            employee_code: "E1001".to_string(),
            month: "2025-11".to_string(),
            daily_breakdown: vec![sample_record(DayStatus::FullDay)],
            full_days: 1,
            half_days: 0,
            absent_days: 0,
            late_days: 0,
            late_by_30_minutes_days: 0,
            early_exits: 0,
            total_worked_hours: Decimal::new(9, 0),
            total_days_in_effective_cycle: 31,
        };
        let json = serde_json::to_string(&attendance).unwrap();
        let deserialized: MonthlyAttendance = serde_json::from_str(&json).unwrap();
        assert_eq!(attendance, deserialized);
    }
}
