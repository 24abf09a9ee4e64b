//! Monthly salary snapshots (spec §6 `monthlysalary`, §4.7 "Snapshot
//! store"). Exactly one row per (employee, month); upserted while DRAFT,
//! immutable once FINALIZED.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::error::{EngineError, EngineResult};
use crate::models::{MonthlySalary, SalaryStatus};

/// The five operations spec §4.7 names.
#[async_trait]
pub trait SalaryRepository: Send + Sync {
    /// Inserts or updates the (employee, month) snapshot. A conflicting
    /// row already `FINALIZED` is left untouched — the write is silently
    /// absorbed by the database's `ON CONFLICT ... WHERE status = DRAFT`
    /// guard, not rejected as an error, since recomputation racing a
    /// finalize is expected under concurrent batch + admin use.
    async fn upsert_salary(&self, salary: &MonthlySalary) -> EngineResult<()>;

    /// Returns the snapshot for (employee, month), if one exists.
    async fn get_salary(&self, employee_code: &str, month: &str) -> EngineResult<Option<MonthlySalary>>;

    /// Returns the most recent snapshot for `employee_code` across all
    /// months.
    async fn get_latest_salary(&self, employee_code: &str) -> EngineResult<Option<MonthlySalary>>;

    /// Transitions a single (employee, month) snapshot DRAFT -> FINALIZED.
    /// Returns `SalaryNotFound` if no row exists and `AlreadyFinalized` if
    /// it already is.
    async fn finalize_salary(&self, employee_code: &str, month: &str) -> EngineResult<MonthlySalary>;

    /// Finalizes every DRAFT snapshot for `month`, returning the employee
    /// codes that were transitioned.
    async fn finalize_all_salaries_for_month(&self, month: &str) -> EngineResult<Vec<String>>;
}

/// `SalaryRepository` backed by the `monthly_salary` table.
pub struct PgSalaryRepository {
    pool: PgPool,
}

impl PgSalaryRepository {
    /// Builds a repository over the given pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SalaryRepository for PgSalaryRepository {
    async fn upsert_salary(&self, salary: &MonthlySalary) -> EngineResult<()> {
        sqlx::query!(
            r#"
            INSERT INTO monthly_salary (
                employee_code, month, gross_salary, net_salary, base_salary, per_day_rate,
                paid_days, absent_days, leave_days, total_deductions, total_additions,
                total_worked_hours, overtime_hours, overtime_amount, tds_deduction,
                professional_tax, incentive_amount, is_held, hold_reason, breakdown_json,
                status, calculated_at, calculated_by
            ) VALUES (
                $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17,
                $18, $19, $20, $21, $22, $23
            )
            ON CONFLICT (employee_code, month) DO UPDATE SET
                gross_salary = EXCLUDED.gross_salary,
                net_salary = EXCLUDED.net_salary,
                base_salary = EXCLUDED.base_salary,
                per_day_rate = EXCLUDED.per_day_rate,
                paid_days = EXCLUDED.paid_days,
                absent_days = EXCLUDED.absent_days,
                leave_days = EXCLUDED.leave_days,
                total_deductions = EXCLUDED.total_deductions,
                total_additions = EXCLUDED.total_additions,
                total_worked_hours = EXCLUDED.total_worked_hours,
                overtime_hours = EXCLUDED.overtime_hours,
                overtime_amount = EXCLUDED.overtime_amount,
                tds_deduction = EXCLUDED.tds_deduction,
                professional_tax = EXCLUDED.professional_tax,
                incentive_amount = EXCLUDED.incentive_amount,
                is_held = EXCLUDED.is_held,
                hold_reason = EXCLUDED.hold_reason,
                breakdown_json = EXCLUDED.breakdown_json,
                calculated_at = EXCLUDED.calculated_at,
                calculated_by = EXCLUDED.calculated_by
            WHERE monthly_salary.status = 0
            "#,
            salary.employee_code,
            salary.month,
            salary.gross_salary,
            salary.net_salary,
            salary.base_salary,
            salary.per_day_rate,
            salary.paid_days,
            salary.absent_days,
            salary.leave_days,
            salary.total_deductions,
            salary.total_additions,
            salary.total_worked_hours,
            salary.overtime_hours,
            salary.overtime_amount,
            salary.tds_deduction,
            salary.professional_tax,
            salary.incentive_amount,
            salary.is_held,
            salary.hold_reason,
            salary.breakdown_json,
            salary.status as SalaryStatus,
            salary.calculated_at,
            salary.calculated_by,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get_salary(&self, employee_code: &str, month: &str) -> EngineResult<Option<MonthlySalary>> {
        let salary = sqlx::query_as!(
            MonthlySalary,
            r#"
            SELECT employee_code, month, gross_salary, net_salary, base_salary, per_day_rate,
                   paid_days, absent_days, leave_days, total_deductions, total_additions,
                   total_worked_hours, overtime_hours, overtime_amount, tds_deduction,
                   professional_tax, incentive_amount, is_held, hold_reason, breakdown_json,
                   status as "status: _", calculated_at, calculated_by
            FROM monthly_salary
            WHERE employee_code = $1 AND month = $2
            "#,
            employee_code,
            month,
        )
        .fetch_optional(&self.pool)
        .await?;

        Ok(salary)
    }

    async fn get_latest_salary(&self, employee_code: &str) -> EngineResult<Option<MonthlySalary>> {
        let salary = sqlx::query_as!(
            MonthlySalary,
            r#"
            SELECT employee_code, month, gross_salary, net_salary, base_salary, per_day_rate,
                   paid_days, absent_days, leave_days, total_deductions, total_additions,
                   total_worked_hours, overtime_hours, overtime_amount, tds_deduction,
                   professional_tax, incentive_amount, is_held, hold_reason, breakdown_json,
                   status as "status: _", calculated_at, calculated_by
            FROM monthly_salary
            WHERE employee_code = $1
            ORDER BY month DESC
            LIMIT 1
            "#,
            employee_code,
        )
        .fetch_optional(&self.pool)
        .await?;

        Ok(salary)
    }

    async fn finalize_salary(&self, employee_code: &str, month: &str) -> EngineResult<MonthlySalary> {
        // The UPDATE's own `AND status = 0` is the guard against a
        // concurrent double-finalize, not the read below: two racing
        // callers can both pass a prior existence check, but only one
        // `UPDATE` can ever affect a row, since the second one finds
        // `status` already flipped to 1. The read-after-miss below only
        // decides which error to report, never whether to write.
        let salary = sqlx::query_as!(
            MonthlySalary,
            r#"
            UPDATE monthly_salary
            SET status = 1
            WHERE employee_code = $1 AND month = $2 AND status = 0
            RETURNING employee_code, month, gross_salary, net_salary, base_salary, per_day_rate,
                      paid_days, absent_days, leave_days, total_deductions, total_additions,
                      total_worked_hours, overtime_hours, overtime_amount, tds_deduction,
                      professional_tax, incentive_amount, is_held, hold_reason, breakdown_json,
                      status as "status: _", calculated_at, calculated_by
            "#,
            employee_code,
            month,
        )
        .fetch_optional(&self.pool)
        .await?;

        if let Some(salary) = salary {
            return Ok(salary);
        }

        match self.get_salary(employee_code, month).await? {
            Some(existing) if existing.is_finalized() => Err(EngineError::AlreadyFinalized {
                employee_code: employee_code.to_string(),
                month: month.to_string(),
            }),
            Some(_) => Err(EngineError::SalaryNotFound {
                employee_code: employee_code.to_string(),
                month: month.to_string(),
            }),
            None => Err(EngineError::SalaryNotFound {
                employee_code: employee_code.to_string(),
                month: month.to_string(),
            }),
        }
    }

    async fn finalize_all_salaries_for_month(&self, month: &str) -> EngineResult<Vec<String>> {
        let rows = sqlx::query!(
            r#"
            UPDATE monthly_salary
            SET status = 1
            WHERE month = $1 AND status = 0
            RETURNING employee_code
            "#,
            month,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.employee_code).collect())
    }
}

#[cfg(test)]
mod tests {
    // `PgSalaryRepository` needs a live Postgres instance, so its behavior
    // is exercised by `PayrollEngine` integration tests against an
    // in-memory fake implementing `SalaryRepository` instead of here.
}
