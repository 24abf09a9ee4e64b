//! Employee master data (spec §6 `employees`/`employeedetails`).

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;

use crate::error::{EngineError, EngineResult};
use crate::models::Employee;

/// Reads employee records.
#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    /// Looks up a single employee, returning `EmployeeNotFound` if absent.
    async fn get_employee(&self, employee_code: &str) -> EngineResult<Employee>;

    /// Returns every employee whose tenure overlaps `[cycle_start,
    /// cycle_end]` — joined on or before `cycle_end` and not yet exited,
    /// or exited on or after `cycle_start`. This is the batch driver's
    /// input set (spec §4.8).
    async fn list_active_employees_for_cycle(
        &self,
        cycle_start: NaiveDate,
        cycle_end: NaiveDate,
    ) -> EngineResult<Vec<Employee>>;
}

/// `EmployeeRepository` backed by the `employees` table.
pub struct PgEmployeeRepository {
    pool: PgPool,
}

impl PgEmployeeRepository {
    /// Builds a repository over the given pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EmployeeRepository for PgEmployeeRepository {
    async fn get_employee(&self, employee_code: &str) -> EngineResult<Employee> {
        sqlx::query_as!(
            Employee,
            r#"
            SELECT employee_code, name, joining_date, exit_date, department, designation,
                   basic_salary, shift_name, phone_number, bank_info
            FROM employees
            WHERE employee_code = $1
            "#,
            employee_code,
        )
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| EngineError::EmployeeNotFound {
            employee_code: employee_code.to_string(),
        })
    }

    async fn list_active_employees_for_cycle(
        &self,
        cycle_start: NaiveDate,
        cycle_end: NaiveDate,
    ) -> EngineResult<Vec<Employee>> {
        let employees = sqlx::query_as!(
            Employee,
            r#"
            SELECT employee_code, name, joining_date, exit_date, department, designation,
                   basic_salary, shift_name, phone_number, bank_info
            FROM employees
            WHERE joining_date <= $2
              AND (exit_date IS NULL OR exit_date >= $1)
            ORDER BY employee_code
            "#,
            cycle_start,
            cycle_end,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(employees)
    }
}
