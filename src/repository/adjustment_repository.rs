//! Free-form salary adjustments and the overtime toggle — the two
//! per-(employee, month) administrative overrides (spec §6
//! `salary_adjustments` / `overtime_toggles`).

use async_trait::async_trait;
use sqlx::PgPool;

use crate::error::EngineResult;
use crate::models::{OvertimeToggle, SalaryAdjustment};

/// Reads administrative overrides that feed the salary calculator.
#[async_trait]
pub trait AdjustmentRepository: Send + Sync {
    /// Returns every adjustment row for (employee, month).
    async fn get_adjustments(&self, employee_code: &str, month: &str) -> EngineResult<Vec<SalaryAdjustment>>;

    /// Returns the overtime toggle for (employee, month), or `None` if no
    /// row exists (callers treat absence as `false`, spec §3).
    async fn get_overtime_toggle(&self, employee_code: &str, month: &str) -> EngineResult<Option<OvertimeToggle>>;
}

/// `AdjustmentRepository` backed by the `salary_adjustments` /
/// `overtime_toggles` tables.
pub struct PgAdjustmentRepository {
    pool: PgPool,
}

impl PgAdjustmentRepository {
    /// Builds a repository over the given pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AdjustmentRepository for PgAdjustmentRepository {
    async fn get_adjustments(&self, employee_code: &str, month: &str) -> EngineResult<Vec<SalaryAdjustment>> {
        let adjustments = sqlx::query_as!(
            SalaryAdjustment,
            r#"
            SELECT id, employee_code, month,
                   adjustment_type as "adjustment_type: _",
                   category, amount, description
            FROM salary_adjustments
            WHERE employee_code = $1 AND month = $2
            "#,
            employee_code,
            month,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(adjustments)
    }

    async fn get_overtime_toggle(&self, employee_code: &str, month: &str) -> EngineResult<Option<OvertimeToggle>> {
        let toggle = sqlx::query_as!(
            OvertimeToggle,
            r#"
            SELECT employee_code, month, is_overtime_enabled
            FROM overtime_toggles
            WHERE employee_code = $1 AND month = $2
            "#,
            employee_code,
            month,
        )
        .fetch_optional(&self.pool)
        .await?;

        Ok(toggle)
    }
}
