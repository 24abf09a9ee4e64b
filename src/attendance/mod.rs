//! Punch grouping, day classification, and the multi-pass monthly
//! attendance engine.

mod classifier;
mod engine;
mod grouping;

pub use classifier::{classify_day, ClassifiedDay};
pub use engine::{compute_monthly_attendance, AttendanceInputs};
pub use grouping::group_by_workday;
