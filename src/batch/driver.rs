//! Chunked batch calculation. `PayrollEngine::batch_calculate` is the
//! entry point; everything else here is private machinery for one chunk
//! of employees.

use std::time::Duration;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::error::{EngineError, EngineResult};
use crate::models::{DayStatus, Employee, HoldType, SalaryCalculation};
use crate::time::{cycle_range, is_sunday};
use crate::PayrollEngine;

/// One employee's batch outcome that was not a successful calculation —
/// either a propagated error or a per-employee timeout, per spec §4.8
/// ("aggregates ... plus an errors list"). A skipped (held) employee does
/// not produce an entry here; it is simply absent from both lists.
#[derive(Debug, Clone)]
pub struct BatchError {
    /// The employee the failure belongs to.
    pub employee_code: String,
    /// A human-readable description of the failure.
    pub message: String,
}

/// The aggregated outcome of a batch run: every successful calculation,
/// every failure, and the summed net salary over successes.
#[derive(Debug, Clone, Default)]
pub struct BatchResult {
    /// Every employee whose calculation completed and was persisted.
    pub succeeded: Vec<SalaryCalculation>,
    /// Every employee whose calculation errored or timed out.
    pub errors: Vec<BatchError>,
    /// `net_salary` summed over `succeeded`.
    pub total_net_salary: Decimal,
}

/// What one employee's task in a chunk produced.
enum Outcome {
    Calculated(SalaryCalculation),
    Skipped,
    Failed(BatchError),
}

impl PayrollEngine {
    /// Runs the batch summary driver for every employee whose effective
    /// range overlaps `month`'s payroll cycle (spec §4.8): partitions
    /// employees into chunks of `config.default_chunk_size`, processes
    /// each chunk with bounded parallelism (one task per employee, the
    /// chunk itself the concurrency unit), yields briefly between chunks,
    /// and checks `cancellation` at each chunk and task boundary.
    pub async fn batch_calculate(&self, month: &str, cancellation: CancellationToken) -> EngineResult<BatchResult> {
        let (cycle_start, cycle_end) = cycle_range(month)?;
        let employees = self
            .employees
            .list_active_employees_for_cycle(cycle_start, cycle_end)
            .await?;

        let mut result = BatchResult::default();
        let timeout = Duration::from_secs(self.config.per_employee_timeout_secs);

        for chunk in employees.chunks(self.config.default_chunk_size.max(1)) {
            if cancellation.is_cancelled() {
                break;
            }

            let mut tasks = JoinSet::new();
            for employee in chunk.iter().cloned() {
                let engine = self.clone();
                let month = month.to_string();
                let cancellation = cancellation.clone();
                tasks.spawn(async move { engine.process_one(employee, month, cancellation, timeout).await });
            }

            while let Some(joined) = tasks.join_next().await {
                match joined {
                    Ok(Outcome::Calculated(calculation)) => {
                        result.total_net_salary += calculation.net_salary;
                        result.succeeded.push(calculation);
                    }
                    Ok(Outcome::Skipped) => {}
                    Ok(Outcome::Failed(error)) => result.errors.push(error),
                    Err(join_error) => result.errors.push(BatchError {
                        employee_code: "unknown".to_string(),
                        message: format!("batch task panicked: {join_error}"),
                    }),
                }
            }

            tokio::task::yield_now().await;
        }

        Ok(result)
    }

    /// One employee's slice of a batch chunk: hold-skip, auto-hold check,
    /// then the timed calculation.
    async fn process_one(
        &self,
        employee: Employee,
        month: String,
        cancellation: CancellationToken,
        timeout: Duration,
    ) -> Outcome {
        if cancellation.is_cancelled() {
            return Outcome::Skipped;
        }

        match self.holds.get_active_hold(&employee.employee_code, &month).await {
            Ok(Some(_)) => return Outcome::Skipped,
            Ok(None) => {}
            Err(error) => {
                return Outcome::Failed(BatchError {
                    employee_code: employee.employee_code.clone(),
                    message: error.to_string(),
                })
            }
        }

        if let Err(error) = self.run_auto_hold_check(&employee, &month).await {
            tracing::warn!(
                employee_code = %employee.employee_code,
                error = %error,
                "auto-hold check failed, continuing calculation"
            );
        }

        match tokio::time::timeout(timeout, self.compute_and_persist(&employee, &month, "system")).await {
            Ok(Ok(calculation)) => Outcome::Calculated(calculation),
            Ok(Err(error)) => Outcome::Failed(BatchError {
                employee_code: employee.employee_code.clone(),
                message: error.to_string(),
            }),
            Err(_elapsed) => Outcome::Failed(BatchError {
                employee_code: employee.employee_code.clone(),
                message: "calculation exceeded the per-employee timeout".to_string(),
            }),
        }
    }

    /// For each of calendar dates 1-5 of the month following `month`'s
    /// cycle, checks whether the date is a non-Sunday with no non-absent
    /// classification; if any such date is found, creates an `AUTO` hold
    /// for the next cycle unless one is already unreleased. Never fails
    /// the calculation — a failure here is logged by the caller.
    async fn run_auto_hold_check(&self, employee: &Employee, month: &str) -> EngineResult<()> {
        let (_, cycle_end) = cycle_range(month)?;
        let next_month = next_month_label(cycle_end);
        let check_dates = first_five_calendar_days(cycle_end);

        let next_attendance = self.compute_attendance(employee, &next_month).await?;

        let has_qualifying_absence = next_attendance.daily_breakdown.iter().any(|record| {
            check_dates.contains(&record.date) && !is_sunday(record.date) && record.status == DayStatus::Absent
        });

        if !has_qualifying_absence {
            return Ok(());
        }

        match self
            .holds
            .create_hold(
                &employee.employee_code,
                &next_month,
                HoldType::Auto,
                Some("no non-absent punches in the first 5 days of the next cycle".to_string()),
            )
            .await
        {
            Ok(_) => Ok(()),
            Err(EngineError::DuplicateActiveHold { .. }) => Ok(()),
            Err(other) => Err(other),
        }
    }
}

/// The `YYYY-MM` label of the calendar month following `cycle_end`'s
/// month — i.e. the cycle whose first five calendar days are the
/// auto-hold check's window.
fn next_month_label(cycle_end: NaiveDate) -> String {
    let (year, month) = if cycle_end.month() == 12 {
        (cycle_end.year() + 1, 1)
    } else {
        (cycle_end.year(), cycle_end.month() + 1)
    };
    format!("{year:04}-{month:02}")
}

/// Calendar dates 1 through 5 of the month following `cycle_end`'s month.
fn first_five_calendar_days(cycle_end: NaiveDate) -> Vec<NaiveDate> {
    let (year, month) = if cycle_end.month() == 12 {
        (cycle_end.year() + 1, 1)
    } else {
        (cycle_end.year(), cycle_end.month() + 1)
    };
    (1..=5)
        .map(|day| NaiveDate::from_ymd_opt(year, month, day).expect("day 1-5 always valid"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_month_label_wraps_year() {
        let cycle_end = NaiveDate::from_ymd_opt(2025, 12, 25).unwrap();
        assert_eq!(next_month_label(cycle_end), "2026-01");
    }

    #[test]
    fn test_next_month_label_ordinary() {
        let cycle_end = NaiveDate::from_ymd_opt(2025, 11, 25).unwrap();
        assert_eq!(next_month_label(cycle_end), "2025-12");
    }

    #[test]
    fn test_first_five_calendar_days() {
        let cycle_end = NaiveDate::from_ymd_opt(2025, 11, 25).unwrap();
        let days = first_five_calendar_days(cycle_end);
        assert_eq!(days.len(), 5);
        assert_eq!(days[0], NaiveDate::from_ymd_opt(2025, 12, 1).unwrap());
        assert_eq!(days[4], NaiveDate::from_ymd_opt(2025, 12, 5).unwrap());
    }
}
