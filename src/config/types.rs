//! Typed configuration values for the payroll engine.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::ShiftTiming;

/// Engine-wide statutory constants and defaults, loaded once at startup
/// and shared read-only across every calculation (spec §4.6, §4.8).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Gross salary must exceed this for Professional Tax to apply.
    #[serde(default = "default_pt_gross_threshold")]
    pub pt_gross_threshold: Decimal,
    /// Base salary must be at least this for Professional Tax to apply.
    #[serde(default = "default_pt_min_base_salary")]
    pub pt_min_base_salary: Decimal,
    /// The flat Professional Tax amount deducted when both thresholds hold.
    #[serde(default = "default_pt_amount")]
    pub pt_amount: Decimal,
    /// TDS applies only when base salary is below this.
    #[serde(default = "default_tds_base_salary_threshold")]
    pub tds_base_salary_threshold: Decimal,
    /// TDS applies only once cumulative salary since joining reaches this.
    #[serde(default = "default_tds_cumulative_threshold")]
    pub tds_cumulative_threshold: Decimal,
    /// The flat rate applied to gross salary when TDS applies.
    #[serde(default = "default_tds_rate")]
    pub tds_rate: Decimal,
    /// Base salary assumed for an employee with no `basic_salary` on file.
    #[serde(default = "default_fallback_base_salary")]
    pub fallback_base_salary: Decimal,
    /// Default chunk size for the batch driver's bounded-parallelism runs.
    #[serde(default = "default_chunk_size")]
    pub default_chunk_size: usize,
    /// Soft per-employee timeout, in seconds, for the batch driver.
    #[serde(default = "default_per_employee_timeout_secs")]
    pub per_employee_timeout_secs: u64,
    /// The system-default shift consulted when an employee has neither an
    /// assignment nor a default shift on file.
    #[serde(default = "default_shift_timing")]
    pub system_default_shift: ShiftTiming,
}

impl EngineConfig {
    /// Returns the hardcoded defaults from spec §4.2/§4.6, used when no
    /// configuration file is present and by every unit test in this crate.
    pub fn defaults() -> Self {
        Self {
            pt_gross_threshold: default_pt_gross_threshold(),
            pt_min_base_salary: default_pt_min_base_salary(),
            pt_amount: default_pt_amount(),
            tds_base_salary_threshold: default_tds_base_salary_threshold(),
            tds_cumulative_threshold: default_tds_cumulative_threshold(),
            tds_rate: default_tds_rate(),
            fallback_base_salary: default_fallback_base_salary(),
            default_chunk_size: default_chunk_size(),
            per_employee_timeout_secs: default_per_employee_timeout_secs(),
            system_default_shift: default_shift_timing(),
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::defaults()
    }
}

fn default_pt_gross_threshold() -> Decimal {
    Decimal::new(1200000, 2)
}

fn default_pt_min_base_salary() -> Decimal {
    Decimal::new(1500000, 2)
}

fn default_pt_amount() -> Decimal {
    Decimal::new(20000, 2)
}

fn default_tds_base_salary_threshold() -> Decimal {
    Decimal::new(1500000, 2)
}

fn default_tds_cumulative_threshold() -> Decimal {
    Decimal::new(5000000, 2)
}

fn default_tds_rate() -> Decimal {
    Decimal::new(10, 2)
}

fn default_fallback_base_salary() -> Decimal {
    Decimal::new(1500000, 2)
}

fn default_chunk_size() -> usize {
    10
}

fn default_per_employee_timeout_secs() -> u64 {
    30
}

fn default_shift_timing() -> ShiftTiming {
    crate::models::Shift::system_default()
}
