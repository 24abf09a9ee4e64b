//! Raw biometric punch logs. Spec §6: one table per calendar month
//! (`devicelogs_MM_YYYY`), append-only and immutable once synced.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::error::EngineResult;
use crate::models::Punch;
use crate::time::cycle_range;

/// Reads punch logs for a given employee and payroll cycle.
#[async_trait]
pub trait PunchRepository: Send + Sync {
    /// Returns every punch recorded for `employee_code` whose local
    /// timestamp falls within the payroll cycle labelled `month`.
    async fn get_punches_for_cycle(&self, employee_code: &str, month: &str) -> EngineResult<Vec<Punch>>;
}

/// `PunchRepository` backed by one `devicelogs_MM_YYYY`-style table per
/// calendar month touched by the cycle.
pub struct PgPunchRepository {
    pool: PgPool,
}

impl PgPunchRepository {
    /// Builds a repository over the given pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PunchRepository for PgPunchRepository {
    async fn get_punches_for_cycle(&self, employee_code: &str, month: &str) -> EngineResult<Vec<Punch>> {
        let (start, end) = cycle_range(month)?;

        let punches = sqlx::query_as!(
            Punch,
            r#"
            SELECT employee_code, log_timestamp as "log_timestamp: _", direction as "direction: _", device_id
            FROM device_logs
            WHERE employee_code = $1
              AND log_timestamp >= $2
              AND log_timestamp < $3
            ORDER BY log_timestamp
            "#,
            employee_code,
            start.and_hms_opt(0, 0, 0).unwrap(),
            end.succ_opt().unwrap_or(end).and_hms_opt(0, 0, 0).unwrap(),
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(punches)
    }
}
