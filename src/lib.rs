//! Payroll engine for biometric-attendance workforces.
//!
//! This crate turns raw biometric punch logs into monthly attendance
//! breakdowns and salary snapshots. [`PayrollEngine`] is the one public
//! surface: it owns the repository handles and the loaded [`EngineConfig`]
//! and exposes the operations a caller needs (`calculate_salary`,
//! `calculate_monthly_hours`, `batch_calculate`, `finalize_salary`,
//! `finalize_all_salaries`) — there is no HTTP/handler layer in this crate.

#![warn(missing_docs)]

pub mod attendance;
pub mod batch;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod salary;
pub mod shift;
pub mod time;

use std::sync::Arc;

use chrono::Datelike;
use config::EngineConfig;
use error::{EngineError, EngineResult};
use models::{Employee, MonthlyAttendance, MonthlySalary, SalaryCalculation};
use repository::{
    AdjustmentRepository, EmployeeRepository, HoldRepository, HolidayRepository, LeaveRepository,
    PunchRepository, RegularizationRepository, SalaryRepository, ShiftRepository,
};
use salary::{calculate_salary as derive_salary, SalaryCalculatorInputs, SnapshotStore};
use shift::resolve_shift;

/// The payroll engine's repository handles and statutory configuration,
/// assembled once by the caller and cheap to clone (every field is an
/// `Arc`).
///
/// This is the crate's one public entry point: every operation spec §6
/// names is an inherent method here.
#[derive(Clone)]
pub struct PayrollEngine {
    pub(crate) employees: Arc<dyn EmployeeRepository>,
    pub(crate) shifts: Arc<dyn ShiftRepository>,
    pub(crate) punches: Arc<dyn PunchRepository>,
    pub(crate) regularizations: Arc<dyn RegularizationRepository>,
    pub(crate) leaves: Arc<dyn LeaveRepository>,
    pub(crate) adjustments: Arc<dyn AdjustmentRepository>,
    pub(crate) holds: Arc<dyn HoldRepository>,
    pub(crate) holidays: Arc<dyn HolidayRepository>,
    pub(crate) salaries: SnapshotStore,
    pub(crate) config: Arc<EngineConfig>,
}

impl PayrollEngine {
    /// Assembles a `PayrollEngine` from its nine repositories and the
    /// loaded configuration.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        employees: Arc<dyn EmployeeRepository>,
        shifts: Arc<dyn ShiftRepository>,
        punches: Arc<dyn PunchRepository>,
        regularizations: Arc<dyn RegularizationRepository>,
        leaves: Arc<dyn LeaveRepository>,
        adjustments: Arc<dyn AdjustmentRepository>,
        holds: Arc<dyn HoldRepository>,
        holidays: Arc<dyn HolidayRepository>,
        salaries: Arc<dyn SalaryRepository>,
        config: EngineConfig,
    ) -> Self {
        Self {
            employees,
            shifts,
            punches,
            regularizations,
            leaves,
            adjustments,
            holds,
            holidays,
            salaries: SnapshotStore::new(salaries),
            config: Arc::new(config),
        }
    }

    /// The holiday repository, exposed for collaborators outside the
    /// engine's own passes (spec §6) — the engine's own calculation never
    /// reaches for it.
    pub fn holidays(&self) -> &Arc<dyn HolidayRepository> {
        &self.holidays
    }

    /// Runs the five-pass monthly attendance engine for (employee, month)
    /// and returns its output without computing or persisting a salary.
    pub async fn calculate_monthly_hours(
        &self,
        employee_code: &str,
        month: &str,
    ) -> EngineResult<MonthlyAttendance> {
        let employee = self.employees.get_employee(employee_code).await?;
        self.compute_attendance(&employee, month).await
    }

    /// Runs the full salary derivation for (employee, month): attendance,
    /// rates, adjustments, PT/TDS, and persists the resulting snapshot.
    /// Unlike the batch driver, this never skips a held employee — it
    /// always computes and returns the draft, with `is_held`/`hold_reason`
    /// set from the active hold, if any.
    pub async fn calculate_salary(&self, employee_code: &str, month: &str) -> EngineResult<SalaryCalculation> {
        let employee = self.employees.get_employee(employee_code).await?;
        self.compute_and_persist(&employee, month, "system").await
    }

    /// Locks a single (employee, month) snapshot against recomputation.
    pub async fn finalize_salary(&self, employee_code: &str, month: &str) -> EngineResult<MonthlySalary> {
        self.salaries.finalize_salary(employee_code, month).await
    }

    /// Locks every DRAFT snapshot for `month`, returning the employee
    /// codes that were transitioned.
    pub async fn finalize_all_salaries(&self, month: &str) -> EngineResult<Vec<String>> {
        self.salaries.finalize_all_salaries_for_month(month).await
    }

    /// Returns the snapshot for (employee, month). When `finalized_only`
    /// is set, a `Draft` row is reported as not-yet-finalized rather than
    /// returned — employee-facing reads must only ever see `Finalized`
    /// snapshots (spec §7, Not-found policy).
    pub async fn get_salary(
        &self,
        employee_code: &str,
        month: &str,
        finalized_only: bool,
    ) -> EngineResult<Option<MonthlySalary>> {
        let salary = self.salaries.get_salary(employee_code, month).await?;
        Self::filter_finalized(salary, employee_code, month, finalized_only)
    }

    /// Returns the most recent snapshot for `employee_code`, subject to
    /// the same `finalized_only` policy as [`PayrollEngine::get_salary`].
    pub async fn get_latest_salary(
        &self,
        employee_code: &str,
        finalized_only: bool,
    ) -> EngineResult<Option<MonthlySalary>> {
        let salary = self.salaries.get_latest_salary(employee_code).await?;
        let month = salary.as_ref().map(|s| s.month.clone()).unwrap_or_default();
        Self::filter_finalized(salary, employee_code, &month, finalized_only)
    }

    fn filter_finalized(
        salary: Option<MonthlySalary>,
        employee_code: &str,
        month: &str,
        finalized_only: bool,
    ) -> EngineResult<Option<MonthlySalary>> {
        match salary {
            Some(s) if finalized_only && !s.is_finalized() => Err(EngineError::SalaryNotFinalized {
                employee_code: employee_code.to_string(),
                month: month.to_string(),
            }),
            other => Ok(other),
        }
    }

    /// Runs Pass 0 through Pass 5 for a single employee, fetching every
    /// input this engine owns (shift assignments, punches, regularizations,
    /// approved leaves). `join_date`/`exit_date` overrides are always
    /// `None` here — this is the repository-backed path; a caller wanting
    /// to simulate an override date supplies it through the employee row
    /// itself, not through this method.
    pub(crate) async fn compute_attendance(
        &self,
        employee: &Employee,
        month: &str,
    ) -> EngineResult<MonthlyAttendance> {
        let (cycle_start, cycle_end) = time::cycle_range(month)?;

        let shifts_by_name = self.shifts.get_all_shifts().await?;
        let assignments = self.shifts.get_assignments_for_employee(&employee.employee_code).await?;
        let punches = self.punches.get_punches_for_cycle(&employee.employee_code, month).await?;
        let regularizations = self
            .regularizations
            .get_approved_regularizations(&employee.employee_code, cycle_start, cycle_end)
            .await?;
        let (paid_leaves, casual_leaves) = self.resolve_leaves(&employee.employee_code, month).await?;

        attendance::compute_monthly_attendance(attendance::AttendanceInputs {
            employee,
            month,
            punches,
            shifts_by_name: &shifts_by_name,
            assignments: &assignments,
            regularizations: &regularizations,
            paid_leaves,
            casual_leaves,
            join_date: None,
            exit_date: None,
        })
    }

    /// Fetches the (employee, month) `MonthlyLeaveUsage` row and splits it
    /// into paid/casual leave-date lists. A missing row is treated as
    /// "explicitly no leaves" — this engine has no request-level surface
    /// that could distinguish a caller-supplied `None` (meaning "look it
    /// up") from an empty list (meaning "none approved"), so the
    /// repository read IS that lookup; absence of a row collapses to the
    /// empty-list case spec §4.5 describes for callers that already
    /// resolved their leaves.
    async fn resolve_leaves(
        &self,
        employee_code: &str,
        month: &str,
    ) -> EngineResult<(Vec<models::LeaveDate>, Vec<models::LeaveDate>)> {
        let usage = self.leaves.get_monthly_leave_usage(employee_code, month).await?;
        Ok(match usage {
            Some(usage) => (usage.paid_leave_dates.0.clone(), usage.casual_leave_dates.0.clone()),
            None => (Vec::new(), Vec::new()),
        })
    }

    /// Runs attendance, then the salary calculator, then persists the
    /// resulting snapshot under `calculated_by`.
    pub(crate) async fn compute_and_persist(
        &self,
        employee: &Employee,
        month: &str,
        calculated_by: &str,
    ) -> EngineResult<SalaryCalculation> {
        let attendance = self.compute_attendance(employee, month).await?;

        let shifts_by_name = self.shifts.get_all_shifts().await?;
        let (_, cycle_end) = time::cycle_range(month)?;
        let assignments = self.shifts.get_assignments_for_employee(&employee.employee_code).await?;
        let shift_work_hours = resolve_shift(employee, &assignments, &shifts_by_name, cycle_end).work_hours;

        let adjustments = self.adjustments.get_adjustments(&employee.employee_code, month).await?;
        let overtime_enabled = self
            .adjustments
            .get_overtime_toggle(&employee.employee_code, month)
            .await?
            .map(|t| t.is_overtime_enabled)
            .unwrap_or(false);
        let leave_entitlement = self
            .leaves
            .get_leave_entitlement(&employee.employee_code, cycle_end.year())
            .await?;
        let hold = self.holds.get_active_hold(&employee.employee_code, month).await?;
        let cycles_since_joining = time::cycles_since(employee.joining_date, month)?;

        let calculation = derive_salary(SalaryCalculatorInputs {
            employee,
            month,
            attendance: &attendance,
            shifts_by_name: &shifts_by_name,
            shift_work_hours,
            overtime_enabled,
            adjustments: &adjustments,
            hold: hold.as_ref(),
            leave_entitlement: leave_entitlement.as_ref(),
            cycles_since_joining,
            config: &self.config,
        });

        self.salaries.upsert_salary(&calculation, calculated_by).await?;
        Ok(calculation)
    }
}
