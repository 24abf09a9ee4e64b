//! The snapshot store (spec §4.7): turns a [`SalaryCalculation`] into a
//! persisted [`MonthlySalary`] row and exposes the five operations named
//! there on top of a [`SalaryRepository`].

use std::sync::Arc;

use chrono::Utc;

use crate::error::EngineResult;
use crate::models::{MonthlySalary, SalaryCalculation, SalaryStatus};
use crate::repository::SalaryRepository;

/// Wraps a [`SalaryRepository`] with the calculation-to-snapshot mapping
/// and the "upsert preserves FINALIZED" policy.
#[derive(Clone)]
pub struct SnapshotStore {
    repository: Arc<dyn SalaryRepository>,
}

impl SnapshotStore {
    /// Builds a store over the given repository.
    pub fn new(repository: Arc<dyn SalaryRepository>) -> Self {
        Self { repository }
    }

    /// Persists `calculation` as a DRAFT snapshot, computed/triggered by
    /// `calculated_by` (`"system"` for batch runs). If a FINALIZED row
    /// already exists for this (employee, month), the write is absorbed
    /// by the repository's upsert guard and the existing finalized row is
    /// left untouched.
    pub async fn upsert_salary(&self, calculation: &SalaryCalculation, calculated_by: &str) -> EngineResult<()> {
        let salary = to_monthly_salary(calculation, calculated_by);
        self.repository.upsert_salary(&salary).await
    }

    /// Returns the snapshot for (employee, month), if any.
    pub async fn get_salary(&self, employee_code: &str, month: &str) -> EngineResult<Option<MonthlySalary>> {
        self.repository.get_salary(employee_code, month).await
    }

    /// Returns the most recent snapshot for `employee_code`.
    pub async fn get_latest_salary(&self, employee_code: &str) -> EngineResult<Option<MonthlySalary>> {
        self.repository.get_latest_salary(employee_code).await
    }

    /// Locks a single (employee, month) snapshot against recomputation.
    pub async fn finalize_salary(&self, employee_code: &str, month: &str) -> EngineResult<MonthlySalary> {
        self.repository.finalize_salary(employee_code, month).await
    }

    /// Locks every DRAFT snapshot for `month`, returning the employee
    /// codes that were transitioned.
    pub async fn finalize_all_salaries_for_month(&self, month: &str) -> EngineResult<Vec<String>> {
        self.repository.finalize_all_salaries_for_month(month).await
    }
}

/// Maps a computed [`SalaryCalculation`] onto the persisted row shape,
/// serializing the full breakdown (daily records, leave/regularization
/// inputs already folded into `attendance`, and every numeric component)
/// into `breakdown_json` so a read-only consumer never needs to
/// recompute.
fn to_monthly_salary(calculation: &SalaryCalculation, calculated_by: &str) -> MonthlySalary {
    let half = rust_decimal::Decimal::new(5, 1);
    let half_days = rust_decimal::Decimal::from(calculation.attendance.half_days);
    let full_days = rust_decimal::Decimal::from(calculation.attendance.full_days);

    MonthlySalary {
        employee_code: calculation.employee_code.clone(),
        month: calculation.month.clone(),
        gross_salary: calculation.gross_salary,
        net_salary: calculation.net_salary,
        base_salary: calculation.base_salary,
        per_day_rate: calculation.per_day_rate,
        paid_days: full_days + half_days * half + calculation.payable_sundays + calculation.approved_leave_credit,
        absent_days: rust_decimal::Decimal::from(calculation.attendance.absent_days),
        leave_days: calculation.approved_leave_credit,
        total_deductions: calculation.adjustment_deductions,
        total_additions: calculation.other_additions,
        total_worked_hours: calculation.attendance.total_worked_hours,
        overtime_hours: calculation.overtime_hours,
        overtime_amount: calculation.overtime_amount,
        tds_deduction: calculation.tds_deduction,
        professional_tax: calculation.professional_tax,
        incentive_amount: calculation.incentive_amount,
        is_held: calculation.is_held,
        hold_reason: calculation.hold_reason.clone(),
        breakdown_json: serde_json::to_value(calculation).unwrap_or(serde_json::Value::Null),
        status: SalaryStatus::Draft,
        calculated_at: Utc::now(),
        calculated_by: calculated_by.to_string(),
    }
}
