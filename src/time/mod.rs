//! Time and payroll-cycle utilities.
//!
//! This module defines the payroll cycle as the half-open interval
//! *[26th of month M−1, 25th of month M]* labelled `YYYY-MM` (M), and a
//! dedicated wall-clock type distinct from any "instant in time" type used
//! elsewhere in the engine (e.g. `calculated_at` audit timestamps).

mod cycle;
mod punch_time;

pub use cycle::{cycle_label, cycle_range, cycles_since, day_of_week, days_in_cycle, is_sunday};
pub use punch_time::{parse_punch_timestamp, WallClock};
