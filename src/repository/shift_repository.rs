//! Shift definitions and date-ranged shift assignments (spec §6, §4.2).

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::PgPool;

use crate::error::EngineResult;
use crate::models::{Shift, ShiftAssignment};

/// Reads shift reference data.
#[async_trait]
pub trait ShiftRepository: Send + Sync {
    /// Returns every configured shift, keyed by name, for shift
    /// resolution's lookup table.
    async fn get_all_shifts(&self) -> EngineResult<HashMap<String, Shift>>;

    /// Returns every date-ranged assignment for `employee_code`, in no
    /// particular order — shift resolution itself picks the
    /// highest-`id` covering row.
    async fn get_assignments_for_employee(&self, employee_code: &str) -> EngineResult<Vec<ShiftAssignment>>;
}

/// `ShiftRepository` backed by the `shifts` / `shift_assignments` tables.
pub struct PgShiftRepository {
    pool: PgPool,
}

impl PgShiftRepository {
    /// Builds a repository over the given pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ShiftRepository for PgShiftRepository {
    async fn get_all_shifts(&self) -> EngineResult<HashMap<String, Shift>> {
        let shifts = sqlx::query_as!(
            Shift,
            r#"
            SELECT name, start_hour, start_minute, end_hour, end_minute, work_hours,
                   late_threshold_minutes, is_split_shift,
                   slot1 as "slot1: _", slot2 as "slot2: _"
            FROM shifts
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(shifts.into_iter().map(|s| (s.name.clone(), s)).collect())
    }

    async fn get_assignments_for_employee(&self, employee_code: &str) -> EngineResult<Vec<ShiftAssignment>> {
        let assignments = sqlx::query_as!(
            ShiftAssignment,
            r#"
            SELECT id, employee_code, shift_name, from_date, to_date
            FROM shift_assignments
            WHERE employee_code = $1
            "#,
            employee_code,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(assignments)
    }
}
