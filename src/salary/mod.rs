//! Salary derivation from a computed monthly attendance breakdown.

mod calculator;
mod store;

pub use calculator::{calculate_salary, SalaryCalculatorInputs};
pub use store::SnapshotStore;
