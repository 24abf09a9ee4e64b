//! Salary holds (spec §6 `salaryholds`). Exclusivity — at most one
//! unreleased hold per (employee, month) — is enforced at the database
//! level here, not by a read-then-write check in application code: a
//! partial unique index on `(employee_code, month) WHERE NOT is_released`
//! backs `create_hold`'s `ON CONFLICT ... DO NOTHING`, so two concurrent
//! inserts for the same key can never both succeed.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::error::{EngineError, EngineResult};
use crate::models::{HoldType, SalaryHold};

/// Reads and creates salary holds.
#[async_trait]
pub trait HoldRepository: Send + Sync {
    /// Returns the unreleased hold for (employee, month), if any.
    async fn get_active_hold(&self, employee_code: &str, month: &str) -> EngineResult<Option<SalaryHold>>;

    /// Creates a new hold. Returns `DuplicateActiveHold` if one is already
    /// unreleased for this (employee, month).
    async fn create_hold(
        &self,
        employee_code: &str,
        month: &str,
        hold_type: HoldType,
        reason: Option<String>,
    ) -> EngineResult<SalaryHold>;

    /// Releases the given hold.
    async fn release_hold(&self, id: i64) -> EngineResult<()>;
}

/// `HoldRepository` backed by the `salary_holds` table.
pub struct PgHoldRepository {
    pool: PgPool,
}

impl PgHoldRepository {
    /// Builds a repository over the given pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HoldRepository for PgHoldRepository {
    async fn get_active_hold(&self, employee_code: &str, month: &str) -> EngineResult<Option<SalaryHold>> {
        let hold = sqlx::query_as!(
            SalaryHold,
            r#"
            SELECT id, employee_code, month, hold_type as "hold_type: _", reason,
                   is_released, created_at, released_at
            FROM salary_holds
            WHERE employee_code = $1 AND month = $2 AND is_released = false
            "#,
            employee_code,
            month,
        )
        .fetch_optional(&self.pool)
        .await?;

        Ok(hold)
    }

    async fn create_hold(
        &self,
        employee_code: &str,
        month: &str,
        hold_type: HoldType,
        reason: Option<String>,
    ) -> EngineResult<SalaryHold> {
        let hold = sqlx::query_as!(
            SalaryHold,
            r#"
            INSERT INTO salary_holds (employee_code, month, hold_type, reason, is_released, created_at)
            VALUES ($1, $2, $3, $4, false, now())
            ON CONFLICT (employee_code, month) WHERE NOT is_released DO NOTHING
            RETURNING id, employee_code, month, hold_type as "hold_type: _", reason,
                      is_released, created_at, released_at
            "#,
            employee_code,
            month,
            hold_type as HoldType,
            reason,
        )
        .fetch_optional(&self.pool)
        .await?;

        hold.ok_or_else(|| EngineError::DuplicateActiveHold {
            employee_code: employee_code.to_string(),
            month: month.to_string(),
        })
    }

    async fn release_hold(&self, id: i64) -> EngineResult<()> {
        sqlx::query!(
            "UPDATE salary_holds SET is_released = true, released_at = now() WHERE id = $1",
            id,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
