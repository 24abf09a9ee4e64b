//! Attendance regularizations.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// The status a regularization corrects a day to. Only these two are
/// reachable by regularization (an absent day can become half or full; a
/// half day can become full).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "TEXT", rename_all = "kebab-case")]
pub enum RegularizedStatus {
    /// Corrected to half-day.
    HalfDay,
    /// Corrected to full-day.
    FullDay,
}

/// An approved correction of a single day's attendance classification
/// (the `attendanceregularization` table, spec §6). Unique per
/// (employee_code, date); only rows with `status = "APPROVED"` affect
/// computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Regularization {
    /// The employee this regularization applies to.
    pub employee_code: String,
    /// The date being corrected.
    pub date: NaiveDate,
    /// The day's status before regularization, as recorded at approval
    /// time (for audit; the engine recomputes its own `original_status`
    /// during Pass 1 rather than trusting this field).
    pub original_status: String,
    /// The status to apply.
    pub regularized_status: RegularizedStatus,
    /// Free-text reason supplied by the approver.
    pub reason: Option<String>,
    /// Who approved the regularization.
    pub approved_by: Option<String>,
    /// Approval status; only `"APPROVED"` rows are honored.
    pub status: String,
}

impl Regularization {
    /// Returns `true` if this row is approved and therefore affects
    /// computation.
    pub fn is_approved(&self) -> bool {
        self.status == "APPROVED"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(status: &str) -> Regularization {
        Regularization {
            employee_code: "E1001".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 11, 10).unwrap(),
            original_status: "absent".to_string(),
            regularized_status: RegularizedStatus::FullDay,
            reason: Some("forgot to punch in".to_string()),
            approved_by: Some("manager1".to_string()),
            status: status.to_string(),
        }
    }

    #[test]
    fn test_is_approved() {
        assert!(sample("APPROVED").is_approved());
        assert!(!sample("PENDING").is_approved());
        assert!(!sample("REJECTED").is_approved());
    }

    #[test]
    fn test_serialize_round_trip() {
        let regularization = sample("APPROVED");
        let json = serde_json::to_string(&regularization).unwrap();
        let deserialized: Regularization = serde_json::from_str(&json).unwrap();
        assert_eq!(regularization, deserialized);
    }
}
