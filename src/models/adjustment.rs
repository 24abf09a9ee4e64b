//! Free-form salary adjustments.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Whether an adjustment adds to or subtracts from the salary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "TEXT", rename_all = "UPPERCASE")]
pub enum AdjustmentType {
    /// Subtracted from gross.
    Deduction,
    /// Added to gross (or routed to gross specially if `category ==
    /// "INCENTIVE"`).
    Addition,
}

/// A manual salary adjustment, upserted per (employee, month, type,
/// category) — the `salaryadjustments` table, spec §6.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct SalaryAdjustment {
    /// Row id.
    pub id: i64,
    /// The employee this adjustment applies to.
    pub employee_code: String,
    /// The payroll cycle label, `YYYY-MM`.
    pub month: String,
    /// Addition or deduction.
    pub adjustment_type: AdjustmentType,
    /// Free-string category. The reserved value `"INCENTIVE"` routes an
    /// addition into gross rather than net additions (spec §4.6 step 8).
    pub category: String,
    /// The adjustment amount. Always non-negative; sign is carried by
    /// `adjustment_type`.
    pub amount: Decimal,
    /// Free-text description.
    pub description: Option<String>,
}

impl SalaryAdjustment {
    /// Returns `true` if this is the reserved incentive category that
    /// routes into gross rather than net additions.
    pub fn is_incentive(&self) -> bool {
        self.adjustment_type == AdjustmentType::Addition
            && self.category.eq_ignore_ascii_case("INCENTIVE")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(adjustment_type: AdjustmentType, category: &str) -> SalaryAdjustment {
        SalaryAdjustment {
            id: 1,
            employee_code: "E1001".to_string(),
            month: "2025-11".to_string(),
            adjustment_type,
            category: category.to_string(),
            amount: Decimal::new(50000, 2),
            description: None,
        }
    }

    #[test]
    fn test_is_incentive_requires_addition_and_category() {
        assert!(sample(AdjustmentType::Addition, "INCENTIVE").is_incentive());
        assert!(sample(AdjustmentType::Addition, "incentive").is_incentive());
        assert!(!sample(AdjustmentType::Addition, "BONUS").is_incentive());
        assert!(!sample(AdjustmentType::Deduction, "INCENTIVE").is_incentive());
    }

    #[test]
    fn test_serialize_round_trip() {
        let adjustment = sample(AdjustmentType::Deduction, "LATE_PENALTY");
        let json = serde_json::to_string(&adjustment).unwrap();
        let deserialized: SalaryAdjustment = serde_json::from_str(&json).unwrap();
        assert_eq!(adjustment, deserialized);
    }
}
