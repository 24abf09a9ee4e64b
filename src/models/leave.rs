//! Leave entitlements, monthly leave usage, and the overtime toggle.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::error::{EngineError, EngineResult};

/// One dated leave credit. Values are restricted to `{0.5, 1.0}`; anything
/// else is rejected by [`LeaveDate::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveDate {
    /// The calendar date the leave applies to.
    pub date: NaiveDate,
    /// The leave value, half-day (`0.5`) or full-day (`1.0`).
    pub value: Decimal,
}

impl LeaveDate {
    /// Builds a [`LeaveDate`], validating `value ∈ {0.5, 1.0}`.
    pub fn new(date: NaiveDate, value: Decimal) -> EngineResult<Self> {
        let half = Decimal::new(5, 1);
        let one = Decimal::ONE;
        if value != half && value != one {
            return Err(EngineError::InvalidLeaveValue {
                employee_code: String::new(),
                date,
                value,
            });
        }
        Ok(LeaveDate { date, value })
    }

    /// Parses a legacy comma-separated date with no explicit value,
    /// defaulting to the given value (spec §6: PL defaults to 1.0, CL to
    /// 0.5 on read).
    pub fn from_legacy(date: NaiveDate, default_value: Decimal) -> Self {
        LeaveDate { date, value: default_value }
    }
}

/// Per-(employee, year) leave entitlement counters (the `employeeleaves`
/// table, spec §6).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct LeaveEntitlement {
    /// The employee this entitlement belongs to.
    pub employee_code: String,
    /// The calendar year the entitlement covers.
    pub year: i32,
    /// Total leaves allowed for the year.
    pub allowed_leaves: Decimal,
    /// Paid leaves used so far this year.
    pub used_paid_leaves: Decimal,
    /// Casual leaves used so far this year.
    pub used_casual_leaves: Decimal,
}

impl LeaveEntitlement {
    /// `usedTotal − allowedLeaves` when positive, else zero: the
    /// loss-of-pay day count fed into the salary calculator (spec §4.6
    /// step 4).
    pub fn lop_days(&self) -> Decimal {
        let used_total = self.used_paid_leaves + self.used_casual_leaves;
        (used_total - self.allowed_leaves).max(Decimal::ZERO)
    }
}

/// Upserted per (employee, month) set of approved leave dates (the
/// `monthlyleaveusage` table, spec §6). Stored as JSON for forward-compat
/// with the legacy comma-separated format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct MonthlyLeaveUsage {
    /// The employee this usage record belongs to.
    pub employee_code: String,
    /// The payroll cycle label, `YYYY-MM`.
    pub month: String,
    /// Approved paid-leave dates and their values.
    pub paid_leave_dates: sqlx::types::Json<Vec<LeaveDate>>,
    /// Approved casual-leave dates and their values.
    pub casual_leave_dates: sqlx::types::Json<Vec<LeaveDate>>,
    /// Audit: who last touched this row.
    pub updated_by: Option<String>,
    /// Audit: when this row was last touched.
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// Per-(employee, month) toggle controlling whether computed overtime is
/// actually paid. Defaults to `false` when the row is absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct OvertimeToggle {
    /// The employee this toggle applies to.
    pub employee_code: String,
    /// The payroll cycle label, `YYYY-MM`.
    pub month: String,
    /// Whether overtime hours are paid this month.
    pub is_overtime_enabled: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leave_date_accepts_half_and_full() {
        let date = NaiveDate::from_ymd_opt(2025, 11, 3).unwrap();
        assert!(LeaveDate::new(date, Decimal::new(5, 1)).is_ok());
        assert!(LeaveDate::new(date, Decimal::ONE).is_ok());
    }

    #[test]
    fn test_leave_date_rejects_other_values() {
        let date = NaiveDate::from_ymd_opt(2025, 11, 3).unwrap();
        assert!(LeaveDate::new(date, Decimal::new(25, 2)).is_err());
        assert!(LeaveDate::new(date, Decimal::ZERO).is_err());
        assert!(LeaveDate::new(date, Decimal::new(2, 0)).is_err());
    }

    #[test]
    fn test_lop_days_zero_when_under_allowance() {
        let entitlement = LeaveEntitlement {
            employee_code: "E1001".to_string(),
            year: 2025,
            allowed_leaves: Decimal::new(12, 0),
            used_paid_leaves: Decimal::new(5, 0),
            used_casual_leaves: Decimal::new(3, 0),
        };
        assert_eq!(entitlement.lop_days(), Decimal::ZERO);
    }

    #[test]
    fn test_lop_days_positive_when_over_allowance() {
        let entitlement = LeaveEntitlement {
            employee_code: "E1001".to_string(),
            year: 2025,
            allowed_leaves: Decimal::new(12, 0),
            used_paid_leaves: Decimal::new(10, 0),
            used_casual_leaves: Decimal::new(5, 0),
        };
        assert_eq!(entitlement.lop_days(), Decimal::new(3, 0));
    }

    #[test]
    fn test_from_legacy_applies_default_value() {
        let date = NaiveDate::from_ymd_opt(2025, 11, 3).unwrap();
        let leave = LeaveDate::from_legacy(date, Decimal::ONE);
        assert_eq!(leave.value, Decimal::ONE);
    }
}
