//! The batch summary driver (spec §4.8): chunked, bounded-parallelism
//! monthly calculation across every employee whose tenure overlaps a
//! payroll cycle.

mod driver;

pub use driver::{BatchError, BatchResult};
