//! Holiday reference data (spec §6 `holidays`).
//!
//! Nothing in the monthly attendance engine's passes consults this table —
//! §4.5 never reaches for a holiday when classifying a day. It exists here
//! purely as read-only reference data for collaborators outside this
//! crate's scope (e.g. a UI calendar view).

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;

use crate::error::EngineResult;
use crate::models::Holiday;

/// Reads active holidays.
#[async_trait]
pub trait HolidayRepository: Send + Sync {
    /// Returns every active holiday in `[start, end]`, soft-deleted rows
    /// (`is_active = false`) excluded.
    async fn get_active_holidays(&self, start: NaiveDate, end: NaiveDate) -> EngineResult<Vec<Holiday>>;
}

/// `HolidayRepository` backed by the `holidays` table.
pub struct PgHolidayRepository {
    pool: PgPool,
}

impl PgHolidayRepository {
    /// Builds a repository over the given pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HolidayRepository for PgHolidayRepository {
    async fn get_active_holidays(&self, start: NaiveDate, end: NaiveDate) -> EngineResult<Vec<Holiday>> {
        let holidays = sqlx::query_as!(
            Holiday,
            r#"
            SELECT date, name, is_active
            FROM holidays
            WHERE date BETWEEN $1 AND $2 AND is_active = true
            ORDER BY date
            "#,
            start,
            end,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(holidays)
    }
}
