//! Leave entitlements and per-month approved leave usage (spec §6
//! `employeeleaves` / `monthlyleaveusage`).

use async_trait::async_trait;
use sqlx::PgPool;

use crate::error::EngineResult;
use crate::models::{LeaveEntitlement, MonthlyLeaveUsage};

/// Reads and upserts leave data.
#[async_trait]
pub trait LeaveRepository: Send + Sync {
    /// Returns the (employee, year) entitlement row, if one exists.
    async fn get_leave_entitlement(&self, employee_code: &str, year: i32) -> EngineResult<Option<LeaveEntitlement>>;

    /// Returns the approved leave dates recorded for (employee, month), if
    /// a usage row has been upserted.
    async fn get_monthly_leave_usage(&self, employee_code: &str, month: &str) -> EngineResult<Option<MonthlyLeaveUsage>>;

    /// Upserts the (employee, month) leave usage row idempotently.
    async fn upsert_monthly_leave_usage(&self, usage: &MonthlyLeaveUsage) -> EngineResult<()>;
}

/// `LeaveRepository` backed by the `employee_leaves` / `monthly_leave_usage` tables.
pub struct PgLeaveRepository {
    pool: PgPool,
}

impl PgLeaveRepository {
    /// Builds a repository over the given pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LeaveRepository for PgLeaveRepository {
    async fn get_leave_entitlement(&self, employee_code: &str, year: i32) -> EngineResult<Option<LeaveEntitlement>> {
        let entitlement = sqlx::query_as!(
            LeaveEntitlement,
            r#"
            SELECT employee_code, year, allowed_leaves, used_paid_leaves, used_casual_leaves
            FROM employee_leaves
            WHERE employee_code = $1 AND year = $2
            "#,
            employee_code,
            year,
        )
        .fetch_optional(&self.pool)
        .await?;

        Ok(entitlement)
    }

    async fn get_monthly_leave_usage(&self, employee_code: &str, month: &str) -> EngineResult<Option<MonthlyLeaveUsage>> {
        let usage = sqlx::query_as!(
            MonthlyLeaveUsage,
            r#"
            SELECT employee_code, month,
                   paid_leave_dates as "paid_leave_dates: _",
                   casual_leave_dates as "casual_leave_dates: _",
                   updated_by, updated_at
            FROM monthly_leave_usage
            WHERE employee_code = $1 AND month = $2
            "#,
            employee_code,
            month,
        )
        .fetch_optional(&self.pool)
        .await?;

        Ok(usage)
    }

    async fn upsert_monthly_leave_usage(&self, usage: &MonthlyLeaveUsage) -> EngineResult<()> {
        sqlx::query!(
            r#"
            INSERT INTO monthly_leave_usage
                (employee_code, month, paid_leave_dates, casual_leave_dates, updated_by, updated_at)
            VALUES ($1, $2, $3, $4, $5, now())
            ON CONFLICT (employee_code, month) DO UPDATE SET
                paid_leave_dates = EXCLUDED.paid_leave_dates,
                casual_leave_dates = EXCLUDED.casual_leave_dates,
                updated_by = EXCLUDED.updated_by,
                updated_at = EXCLUDED.updated_at
            "#,
            usage.employee_code,
            usage.month,
            usage.paid_leave_dates as _,
            usage.casual_leave_dates as _,
            usage.updated_by,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
