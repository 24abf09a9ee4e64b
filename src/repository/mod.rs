//! Persistence traits for every table the engine reads or writes.
//!
//! The distilled calculation pipeline describes *operations* ("load
//! approved regularizations for this cycle", "upsert the snapshot
//! preserving FINALIZED") without saying how they reach a database. This
//! module is that plumbing: one `async_trait` per table, each with a
//! `sqlx::PgPool`-backed implementation, mirroring the repository-trait /
//! repository-impl split used for the calendar table in the retrieval
//! pack's banking example.

mod adjustment_repository;
mod employee_repository;
mod hold_repository;
mod holiday_repository;
mod leave_repository;
mod punch_repository;
mod regularization_repository;
mod salary_repository;
mod shift_repository;

pub use adjustment_repository::{AdjustmentRepository, PgAdjustmentRepository};
pub use employee_repository::{EmployeeRepository, PgEmployeeRepository};
pub use hold_repository::{HoldRepository, PgHoldRepository};
pub use holiday_repository::{HolidayRepository, PgHolidayRepository};
pub use leave_repository::{LeaveRepository, PgLeaveRepository};
pub use punch_repository::{PgPunchRepository, PunchRepository};
pub use regularization_repository::{PgRegularizationRepository, RegularizationRepository};
pub use salary_repository::{PgSalaryRepository, SalaryRepository};
pub use shift_repository::{PgShiftRepository, ShiftRepository};
