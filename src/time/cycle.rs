//! Payroll cycle bounds and calendar helpers.

use chrono::{Datelike, NaiveDate};

use crate::error::{EngineError, EngineResult};

/// Parses a `YYYY-MM` month label into its (year, month) components.
fn parse_month_label(month: &str) -> EngineResult<(i32, u32)> {
    let parts: Vec<&str> = month.split('-').collect();
    if parts.len() != 2 {
        return Err(EngineError::InvalidMonth {
            month: month.to_string(),
            message: "expected YYYY-MM".to_string(),
        });
    }
    let year = parts[0].parse::<i32>().map_err(|_| EngineError::InvalidMonth {
        month: month.to_string(),
        message: "year is not numeric".to_string(),
    })?;
    let month_num = parts[1].parse::<u32>().map_err(|_| EngineError::InvalidMonth {
        month: month.to_string(),
        message: "month is not numeric".to_string(),
    })?;
    if !(1..=12).contains(&month_num) {
        return Err(EngineError::InvalidMonth {
            month: month.to_string(),
            message: "month out of range 1-12".to_string(),
        });
    }
    Ok((year, month_num))
}

/// Returns the first day of the month preceding `(year, month)`.
fn previous_month(year: i32, month: u32) -> (i32, u32) {
    if month == 1 {
        (year - 1, 12)
    } else {
        (year, month - 1)
    }
}

/// Returns the first day of the month following `(year, month)`.
fn next_month(year: i32, month: u32) -> (i32, u32) {
    if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    }
}

/// Computes the inclusive `[start, end]` bounds of the payroll cycle labeled
/// `month` ("YYYY-MM"): the 26th of the previous calendar month through the
/// 25th of `month`.
///
/// # Example
///
/// ```
/// use payroll_engine::time::cycle_range;
/// use chrono::NaiveDate;
///
/// let (start, end) = cycle_range("2025-11").unwrap();
/// assert_eq!(start, NaiveDate::from_ymd_opt(2025, 10, 26).unwrap());
/// assert_eq!(end, NaiveDate::from_ymd_opt(2025, 11, 25).unwrap());
/// ```
pub fn cycle_range(month: &str) -> EngineResult<(NaiveDate, NaiveDate)> {
    let (year, month_num) = parse_month_label(month)?;
    let (prev_year, prev_month) = previous_month(year, month_num);
    let start = NaiveDate::from_ymd_opt(prev_year, prev_month, 26).ok_or_else(|| {
        EngineError::InvalidMonth {
            month: month.to_string(),
            message: "could not compute cycle start".to_string(),
        }
    })?;
    let end = NaiveDate::from_ymd_opt(year, month_num, 25).ok_or_else(|| {
        EngineError::InvalidMonth {
            month: month.to_string(),
            message: "could not compute cycle end".to_string(),
        }
    })?;
    Ok((start, end))
}

/// Returns the number of calendar days in the cycle labeled `month`.
///
/// # Example
///
/// ```
/// use payroll_engine::time::days_in_cycle;
///
/// assert_eq!(days_in_cycle("2025-11").unwrap(), 31);
/// ```
pub fn days_in_cycle(month: &str) -> EngineResult<i64> {
    let (start, end) = cycle_range(month)?;
    Ok((end - start).num_days() + 1)
}

/// Returns the `YYYY-MM` label of the payroll cycle that contains `date`.
///
/// Every calendar day belongs to exactly one cycle (spec invariant #1): a
/// day on or before the 25th belongs to that month's cycle; a day on or
/// after the 26th belongs to the following month's cycle.
///
/// # Example
///
/// ```
/// use payroll_engine::time::cycle_label;
/// use chrono::NaiveDate;
///
/// assert_eq!(cycle_label(NaiveDate::from_ymd_opt(2025, 10, 26).unwrap()), "2025-11");
/// assert_eq!(cycle_label(NaiveDate::from_ymd_opt(2025, 11, 25).unwrap()), "2025-11");
/// assert_eq!(cycle_label(NaiveDate::from_ymd_opt(2025, 11, 26).unwrap()), "2025-12");
/// ```
pub fn cycle_label(date: NaiveDate) -> String {
    let (year, month) = if date.day() >= 26 {
        next_month(date.year(), date.month())
    } else {
        (date.year(), date.month())
    };
    format!("{year:04}-{month:02}")
}

/// Counts whole payroll cycles from the cycle containing `since` through
/// the cycle labeled `upto`, inclusive of both endpoints.
///
/// This is the resolution to the spec's open question on cumulative-salary
/// TDS thresholds: cycles are counted by the number of distinct `YYYY-MM`
/// labels between `cycle_label(since)` and `upto`, never by calendar-month
/// subtraction on the 26th (the source of the off-by-one the spec warns
/// about).
pub fn cycles_since(since: NaiveDate, upto: &str) -> EngineResult<u32> {
    let since_label = cycle_label(since);
    let (since_year, since_month) = parse_month_label(&since_label)?;
    let (upto_year, upto_month) = parse_month_label(upto)?;
    let since_index = since_year * 12 + since_month as i32;
    let upto_index = upto_year * 12 + upto_month as i32;
    Ok((upto_index - since_index + 1).max(0) as u32)
}

/// Returns the day of week for `date`, with Sunday numbered `0` through
/// Saturday numbered `6`, matching the convention used to detect weekoffs.
///
/// # Example
///
/// ```
/// use payroll_engine::time::day_of_week;
/// use chrono::NaiveDate;
///
/// assert_eq!(day_of_week(NaiveDate::from_ymd_opt(2025, 11, 2).unwrap()), 0); // Sunday
/// assert_eq!(day_of_week(NaiveDate::from_ymd_opt(2025, 11, 3).unwrap()), 1); // Monday
/// ```
pub fn day_of_week(date: NaiveDate) -> u32 {
    date.weekday().num_days_from_sunday()
}

/// Returns `true` if `date` is a Sunday.
pub fn is_sunday(date: NaiveDate) -> bool {
    day_of_week(date) == 0
}
