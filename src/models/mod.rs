//! Core data models for the payroll engine.
//!
//! This module contains every entity named in the persistence schema
//! (§6), plus the in-memory attendance/salary value types that are never
//! persisted directly but make up the snapshot's `breakdown_json`.

mod adjustment;
mod attendance;
mod employee;
mod hold;
mod holiday;
mod leave;
mod punch;
mod regularization;
mod salary;
mod shift;

pub use adjustment::{AdjustmentType, SalaryAdjustment};
pub use attendance::{DailyRecord, DayStatus, MonthlyAttendance, WeekoffType};
pub use employee::Employee;
pub use hold::{HoldType, SalaryHold};
pub use holiday::Holiday;
pub use leave::{LeaveDate, LeaveEntitlement, MonthlyLeaveUsage, OvertimeToggle};
pub use punch::Punch;
pub use regularization::{Regularization, RegularizedStatus};
pub use salary::{MonthlySalary, SalaryCalculation, SalaryStatus};
pub use shift::{Shift, ShiftAssignment, ShiftTiming, SplitShiftSlot};
