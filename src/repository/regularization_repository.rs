//! Approved attendance regularizations (spec §6 `regularizations`).

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;

use crate::error::EngineResult;
use crate::models::Regularization;

/// Reads approved regularizations.
#[async_trait]
pub trait RegularizationRepository: Send + Sync {
    /// Returns every `APPROVED` regularization for `employee_code` whose
    /// date falls within `[cycle_start, cycle_end]`. Only approved rows
    /// affect computation (spec §3 key invariants).
    async fn get_approved_regularizations(
        &self,
        employee_code: &str,
        cycle_start: NaiveDate,
        cycle_end: NaiveDate,
    ) -> EngineResult<Vec<Regularization>>;
}

/// `RegularizationRepository` backed by the `regularizations` table.
pub struct PgRegularizationRepository {
    pool: PgPool,
}

impl PgRegularizationRepository {
    /// Builds a repository over the given pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RegularizationRepository for PgRegularizationRepository {
    async fn get_approved_regularizations(
        &self,
        employee_code: &str,
        cycle_start: NaiveDate,
        cycle_end: NaiveDate,
    ) -> EngineResult<Vec<Regularization>> {
        let rows = sqlx::query_as!(
            Regularization,
            r#"
            SELECT employee_code, date, original_status,
                   regularized_status as "regularized_status: _",
                   reason, approved_by, status
            FROM regularizations
            WHERE employee_code = $1
              AND date BETWEEN $2 AND $3
              AND status = 'APPROVED'
            ORDER BY date
            "#,
            employee_code,
            cycle_start,
            cycle_end,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
