//! Salary snapshots and the in-memory calculation result.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::MonthlyAttendance;

/// Draft-vs-finalized lifecycle state of a [`MonthlySalary`] snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "INTEGER")]
#[repr(i32)]
pub enum SalaryStatus {
    /// Recomputed on every calculation; not yet locked.
    Draft = 0,
    /// Locked; only an explicit admin re-open (out of scope) can revert
    /// this to `Draft`.
    Finalized = 1,
}

/// The persisted monthly salary snapshot (the `monthlysalary` table, spec
/// §6). Upserted on each recalculation while `status == Draft`; once
/// `Finalized`, the row is immutable to recomputation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct MonthlySalary {
    /// The employee this snapshot belongs to.
    pub employee_code: String,
    /// The payroll cycle label, `YYYY-MM`.
    pub month: String,
    /// Gross salary before TDS/PT/adjustment deductions.
    pub gross_salary: Decimal,
    /// Final net salary paid out.
    pub net_salary: Decimal,
    /// The base salary used for this calculation.
    pub base_salary: Decimal,
    /// `baseSalary / fullCycleDays`.
    pub per_day_rate: Decimal,
    /// `fullDays + 0.5*halfDays + payableSundays + approvedLeaveCredit`.
    pub paid_days: Decimal,
    /// Count of absent days after all passes.
    pub absent_days: Decimal,
    /// Sum of approved paid + casual leave credit.
    pub leave_days: Decimal,
    /// `adjustmentDeductions`.
    pub total_deductions: Decimal,
    /// `otherAdditions`.
    pub total_additions: Decimal,
    /// Total worked hours across the cycle.
    pub total_worked_hours: Decimal,
    /// Whole overtime hours paid, after flooring.
    pub overtime_hours: Decimal,
    /// `overtimeHours * hourlyRate`.
    pub overtime_amount: Decimal,
    /// Tax deducted at source.
    pub tds_deduction: Decimal,
    /// Professional tax.
    pub professional_tax: Decimal,
    /// Sum of `INCENTIVE`-category additions.
    pub incentive_amount: Decimal,
    /// Whether an unreleased hold exists for this (employee, month).
    pub is_held: bool,
    /// The active hold's reason, if any.
    pub hold_reason: Option<String>,
    /// The full daily breakdown, leave arrays, regularization list and
    /// every numeric component above, serialized. The only input a
    /// read-only consumer (e.g. PDF generation) needs.
    pub breakdown_json: serde_json::Value,
    /// Draft or finalized.
    pub status: SalaryStatus,
    /// When this snapshot was (re)computed.
    pub calculated_at: DateTime<Utc>,
    /// Who/what triggered the computation (`"system"` for batch runs).
    pub calculated_by: String,
}

impl MonthlySalary {
    /// Returns `true` if this snapshot is locked against recomputation.
    pub fn is_finalized(&self) -> bool {
        self.status == SalaryStatus::Finalized
    }
}

/// The full breakdown persisted inside [`MonthlySalary::breakdown_json`],
/// kept as a typed value so callers don't have to hand-parse JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalaryCalculation {
    /// The employee this calculation belongs to.
    pub employee_code: String,
    /// The payroll cycle label, `YYYY-MM`.
    pub month: String,
    /// The attendance engine's full output for this cycle.
    pub attendance: MonthlyAttendance,
    /// Gross salary before TDS/PT/adjustment deductions.
    pub gross_salary: Decimal,
    /// Final net salary paid out.
    pub net_salary: Decimal,
    /// The base salary used for this calculation.
    pub base_salary: Decimal,
    /// `baseSalary / fullCycleDays`.
    pub per_day_rate: Decimal,
    /// Hourly rate used for overtime.
    pub hourly_rate: Decimal,
    /// Count of Sundays in the effective range with `weekoff_type ==
    /// Paid`.
    pub payable_sundays: Decimal,
    /// Sum of approved paid + casual leave credit.
    pub approved_leave_credit: Decimal,
    /// `used - allowed` leave days, or zero.
    pub lop_days: Decimal,
    /// `fullDays + 0.5*halfDays + payableSundays + approvedLeaveCredit`.
    pub payable_days: Decimal,
    /// `perDayRate*payableDays - perDayRate*lopDays`.
    pub attendance_pay: Decimal,
    /// Whole overtime hours paid, after flooring.
    pub overtime_hours: Decimal,
    /// `overtimeHours * hourlyRate`.
    pub overtime_amount: Decimal,
    /// Sum of `INCENTIVE`-category additions.
    pub incentive_amount: Decimal,
    /// Sum of non-incentive additions.
    pub other_additions: Decimal,
    /// Sum of deductions.
    pub adjustment_deductions: Decimal,
    /// Tax deducted at source.
    pub tds_deduction: Decimal,
    /// Professional tax.
    pub professional_tax: Decimal,
    /// Whether an unreleased hold exists for this (employee, month).
    pub is_held: bool,
    /// The active hold's reason, if any.
    pub hold_reason: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_finalized() {
        let mut salary = sample_salary();
        assert!(!salary.is_finalized());
        salary.status = SalaryStatus::Finalized;
        assert!(salary.is_finalized());
    }

    fn sample_salary() -> MonthlySalary {
        MonthlySalary {
            employee_code: "E1001".to_string(),
            month: "2025-11".to_string(),
            gross_salary: Decimal::new(3000000, 2),
            net_salary: Decimal::new(2850000, 2),
            base_salary: Decimal::new(3000000, 2),
            per_day_rate: Decimal::new(100000, 2),
            paid_days: Decimal::new(30, 0),
            absent_days: Decimal::ZERO,
            leave_days: Decimal::ZERO,
            total_deductions: Decimal::ZERO,
            total_additions: Decimal::ZERO,
            total_worked_hours: Decimal::new(240, 0),
            overtime_hours: Decimal::ZERO,
            overtime_amount: Decimal::ZERO,
            tds_deduction: Decimal::ZERO,
            professional_tax: Decimal::new(200, 0),
            incentive_amount: Decimal::ZERO,
            is_held: false,
            hold_reason: None,
            breakdown_json: serde_json::json!({}),
            status: SalaryStatus::Draft,
            calculated_at: Utc::now(),
            calculated_by: "system".to_string(),
        }
    }

    #[test]
    fn test_serialize_round_trip() {
        let salary = sample_salary();
        let json = serde_json::to_string(&salary).unwrap();
        let deserialized: MonthlySalary = serde_json::from_str(&json).unwrap();
        assert_eq!(salary, deserialized);
    }
}
