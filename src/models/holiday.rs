//! Holiday reference data.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A named holiday, soft-deleted via `is_active` rather than removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Holiday {
    /// The calendar date of the holiday. Unique while active.
    pub date: NaiveDate,
    /// Display name, e.g. "Republic Day".
    pub name: String,
    /// Soft-delete flag; inactive holidays are excluded from classification.
    pub is_active: bool,
}
