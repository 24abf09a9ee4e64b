//! Employee model.
//!
//! This module defines the [`Employee`] struct representing a worker whose
//! attendance is tracked by the biometric system.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// An employee subject to payroll calculation.
///
/// Maps to the `employees`/`employeedetails` tables (spec §6). `exit_date`
/// is a one-way latch: once set, the employee becomes inactive and the
/// transition is never reversed by this engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Employee {
    /// Unique identifier for the employee (primary key).
    pub employee_code: String,
    /// The employee's display name.
    pub name: String,
    /// The date the employee joined.
    pub joining_date: NaiveDate,
    /// The date the employee left, if any. One-way latch.
    pub exit_date: Option<NaiveDate>,
    /// Department, used by the TDS "CLEAN" exclusion rule.
    pub department: String,
    /// Designation, used by the same exclusion rule.
    pub designation: String,
    /// The employee's base (monthly) salary, used to derive per-day and
    /// hourly rates. `None` if HR has not yet recorded one; the salary
    /// calculator falls back to a configured default and logs a warning.
    pub basic_salary: Option<Decimal>,
    /// The employee's default shift name, consulted by shift resolution
    /// when no date-ranged assignment applies.
    pub shift_name: Option<String>,
    /// Contact phone number (not consumed by the core calculation).
    pub phone_number: Option<String>,
    /// Bank account / IFSC info (not consumed by the core calculation;
    /// carried through for completeness of the persisted row, consumed by
    /// out-of-scope payment-disbursement collaborators).
    pub bank_info: Option<String>,
}

impl Employee {
    /// Returns `true` if the employee has an exit date on or before `date`.
    pub fn is_exited_by(&self, date: NaiveDate) -> bool {
        self.exit_date.is_some_and(|exit| exit <= date)
    }

    /// Returns `true` if the employee had already joined by `date`.
    pub fn has_joined_by(&self, date: NaiveDate) -> bool {
        self.joining_date <= date
    }

    /// Returns `true` if the employee's department or designation contains
    /// "CLEAN" (case-insensitive) — the TDS exclusion rule's test.
    pub fn is_cleaning_staff(&self) -> bool {
        let contains_clean = |s: &str| s.to_uppercase().contains("CLEAN");
        contains_clean(&self.department) || contains_clean(&self.designation)
    }
}
