//! Salary holds.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Who created a hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "TEXT", rename_all = "UPPERCASE")]
pub enum HoldType {
    /// Created by an administrator.
    Manual,
    /// Created by the batch driver's auto-hold check.
    Auto,
}

/// A hold preventing a monthly salary from being finalized (the
/// `salaryholds` table, spec §6). At most one unreleased hold may exist
/// per (employee_code, month) — enforced by a database-level uniqueness
/// predicate, not by this type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct SalaryHold {
    /// Row id.
    pub id: i64,
    /// The employee this hold applies to.
    pub employee_code: String,
    /// The payroll cycle label, `YYYY-MM`.
    pub month: String,
    /// Who/what created the hold.
    pub hold_type: HoldType,
    /// Free-text reason.
    pub reason: Option<String>,
    /// Whether the hold has been released.
    pub is_released: bool,
    /// When the hold was created.
    pub created_at: DateTime<Utc>,
    /// When the hold was released, if it has been.
    pub released_at: Option<DateTime<Utc>>,
}

impl SalaryHold {
    /// Returns `true` if this hold is currently blocking computation.
    pub fn is_active(&self) -> bool {
        !self.is_released
    }
}
