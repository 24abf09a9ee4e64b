//! The five-pass monthly attendance engine (spec §4.5).
//!
//! Each pass is a free function over the previous pass's output, so the
//! engine's invariant is checkable after every pass rather than only at
//! the end. Passes run strictly in order: 1 depends on shift resolution
//! and punch grouping from Pass 0; 2 depends on 1's raw classification;
//! 3 must run before leaves are applied; 4 depends on 3's frozen
//! snapshot; 5 runs last because it needs every other day's post-leave
//! status to decide whether a Sunday is paid.

use std::cmp::{max, min};
use std::collections::{BTreeMap, HashMap};

use chrono::{Datelike, Duration, NaiveDate};
use rust_decimal::Decimal;

use crate::error::EngineResult;
use crate::models::{
    DailyRecord, DayStatus, Employee, LeaveDate, MonthlyAttendance, Punch, Regularization,
    RegularizedStatus, Shift, ShiftAssignment, WeekoffType,
};
use crate::shift::resolve_shift;
use crate::time::{cycle_range, day_of_week, is_sunday};

use super::{classify_day, group_by_workday};

/// Everything the engine needs for one (employee, month) computation.
///
/// `paid_leaves`/`casual_leaves` are the already-resolved leave lists for
/// the month; whether an absent caller-supplied `None` should trigger a
/// `MonthlyLeaveUsage` lookup versus an explicit empty list is a decision
/// for the caller (see `PayrollEngine`), not for this pure function.
#[derive(Debug, Clone)]
pub struct AttendanceInputs<'a> {
    /// The employee being calculated.
    pub employee: &'a Employee,
    /// The payroll cycle label, `YYYY-MM`.
    pub month: &'a str,
    /// Every punch for this employee that could fall in the cycle
    /// (including the 5am-rollover lookback/lookahead day).
    pub punches: Vec<Punch>,
    /// Reference shift data, by name.
    pub shifts_by_name: &'a HashMap<String, Shift>,
    /// Shift assignments for this employee overlapping the cycle.
    pub assignments: &'a [ShiftAssignment],
    /// Approved regularizations for this employee overlapping the cycle.
    pub regularizations: &'a [Regularization],
    /// Approved paid-leave dates for the month.
    pub paid_leaves: Vec<LeaveDate>,
    /// Approved casual-leave dates for the month.
    pub casual_leaves: Vec<LeaveDate>,
    /// Overrides `employee.joining_date` when present.
    pub join_date: Option<NaiveDate>,
    /// Overrides `employee.exit_date` when present.
    pub exit_date: Option<NaiveDate>,
}

/// Runs the full five-pass monthly attendance engine and returns the
/// resulting breakdown and counters.
pub fn compute_monthly_attendance(inputs: AttendanceInputs<'_>) -> EngineResult<MonthlyAttendance> {
    let (cycle_start, cycle_end) = cycle_range(inputs.month)?;
    let join_date = inputs.join_date.unwrap_or(inputs.employee.joining_date);
    let exit_date = inputs.exit_date.or(inputs.employee.exit_date);

    let effective_start = max(cycle_start, join_date);
    let effective_end = exit_date.map(|d| min(cycle_end, d)).unwrap_or(cycle_end);

    let grouped = group_by_workday(inputs.punches);

    let mut records = pass1_raw_classification(
        inputs.employee,
        cycle_start,
        cycle_end,
        effective_start,
        effective_end,
        &grouped,
        inputs.shifts_by_name,
        inputs.assignments,
    );

    let mut full_days = records.iter().filter(|r| r.status == DayStatus::FullDay).count() as i64;
    let mut half_days = records.iter().filter(|r| r.status == DayStatus::HalfDay).count() as i64;
    let mut absent_days = records.iter().filter(|r| r.status == DayStatus::Absent).count() as i64;
    let mut late_days = records
        .iter()
        .filter(|r| r.is_late && matches!(r.status, DayStatus::FullDay | DayStatus::HalfDay))
        .count() as i64;
    let mut late_by_30_minutes_days = records
        .iter()
        .filter(|r| r.is_late_by_30_minutes && r.status == DayStatus::FullDay)
        .count() as i64;
    let early_exits = records.iter().filter(|r| r.is_early_exit).count() as u32;
    let total_worked_hours: Decimal = records.iter().map(|r| r.worked_hours).sum();

    pass2_apply_regularizations(
        &mut records,
        inputs.regularizations,
        effective_start,
        effective_end,
        &mut full_days,
        &mut half_days,
        &mut absent_days,
        &mut late_days,
    );

    let original_lop_for_sunday_rule = pass3_snapshot_sunday_rule_inputs(
        &records,
        effective_start,
        effective_end,
        join_date,
        exit_date,
        cycle_start,
        cycle_end,
    );

    pass4_apply_leaves(
        &mut records,
        &inputs.paid_leaves,
        &inputs.casual_leaves,
        &mut absent_days,
        &mut half_days,
    );

    pass5_mark_sundays(
        &mut records,
        effective_start,
        effective_end,
        join_date,
        exit_date,
        cycle_start,
        cycle_end,
        original_lop_for_sunday_rule,
    );

    Ok(MonthlyAttendance {
        employee_code: inputs.employee.employee_code.clone(),
        month: inputs.month.to_string(),
        daily_breakdown: records,
        full_days: full_days.max(0) as u32,
        half_days: half_days.max(0) as u32,
        absent_days: absent_days.max(0) as u32,
        late_days: late_days.max(0) as u32,
        late_by_30_minutes_days: late_by_30_minutes_days.max(0) as u32,
        early_exits,
        total_worked_hours,
        total_days_in_effective_cycle: (cycle_end - cycle_start).num_days() as u32 + 1,
    })
}

#[allow(clippy::too_many_arguments)]
fn pass1_raw_classification(
    employee: &Employee,
    cycle_start: NaiveDate,
    cycle_end: NaiveDate,
    effective_start: NaiveDate,
    effective_end: NaiveDate,
    grouped: &BTreeMap<NaiveDate, Vec<Punch>>,
    shifts_by_name: &HashMap<String, Shift>,
    assignments: &[ShiftAssignment],
) -> Vec<DailyRecord> {
    let mut records = Vec::new();
    let mut date = cycle_start;
    while date <= cycle_end {
        let timing = resolve_shift(employee, assignments, shifts_by_name, date);
        let in_effective_range = date >= effective_start && date <= effective_end;
        let empty = Vec::new();
        let day_punches = grouped.get(&date).unwrap_or(&empty);

        let record = if in_effective_range {
            let classified = classify_day(day_punches, &timing, date);
            DailyRecord {
                date,
                shift_name: timing.shift_name.clone(),
                status: classified.status,
                original_status: None,
                first_entry: classified.first_entry,
                last_exit: classified.last_exit,
                worked_hours: classified.total_hours,
                is_late: classified.is_late,
                is_late_by_30_minutes: classified.is_late_by_30_minutes,
                minutes_late: classified.minutes_late,
                is_early_exit: classified.is_early_exit,
                log_count: classified.log_count,
                is_regularized: false,
                leave_value: None,
                weekoff_type: None,
            }
        } else {
            DailyRecord {
                date,
                shift_name: timing.shift_name.clone(),
                status: DayStatus::NotActive,
                original_status: None,
                first_entry: None,
                last_exit: None,
                worked_hours: Decimal::ZERO,
                is_late: false,
                is_late_by_30_minutes: false,
                minutes_late: None,
                is_early_exit: false,
                log_count: day_punches.len() as u32,
                is_regularized: false,
                leave_value: None,
                weekoff_type: None,
            }
        };
        records.push(record);
        date = date.succ_opt().expect("cycle end is a valid calendar date");
    }
    records
}

fn pass2_apply_regularizations(
    records: &mut [DailyRecord],
    regularizations: &[Regularization],
    effective_start: NaiveDate,
    effective_end: NaiveDate,
    full_days: &mut i64,
    half_days: &mut i64,
    absent_days: &mut i64,
    late_days: &mut i64,
) {
    for regularization in regularizations {
        if !regularization.is_approved() {
            continue;
        }
        if regularization.date < effective_start || regularization.date > effective_end {
            continue;
        }
        let Some(record) = records.iter_mut().find(|r| r.date == regularization.date) else {
            continue;
        };
        let original_status = record.status;
        if !matches!(original_status, DayStatus::Absent | DayStatus::HalfDay) {
            continue;
        }

        record.original_status = Some(original_status);
        record.is_regularized = true;

        match original_status {
            DayStatus::Absent => *absent_days -= 1,
            DayStatus::HalfDay => *half_days -= 1,
            _ => unreachable!(),
        }

        if record.is_late {
            *late_days -= 1;
        }

        record.status = match regularization.regularized_status {
            RegularizedStatus::HalfDay => DayStatus::HalfDay,
            RegularizedStatus::FullDay => DayStatus::FullDay,
        };

        match record.status {
            DayStatus::HalfDay => *half_days += 1,
            DayStatus::FullDay => *full_days += 1,
            _ => unreachable!(),
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn pass3_snapshot_sunday_rule_inputs(
    records: &[DailyRecord],
    effective_start: NaiveDate,
    effective_end: NaiveDate,
    join_date: NaiveDate,
    exit_date: Option<NaiveDate>,
    cycle_start: NaiveDate,
    cycle_end: NaiveDate,
) -> Decimal {
    let is_new_joiner_this_cycle = join_date >= cycle_start && join_date <= cycle_end;
    let is_exiting_this_cycle = exit_date.is_some_and(|d| d >= cycle_start && d <= cycle_end);

    let mut total = Decimal::ZERO;
    for record in records {
        if is_sunday(record.date) {
            continue;
        }
        if record.date < effective_start || record.date > effective_end {
            continue;
        }
        if record.status == DayStatus::NotActive {
            continue;
        }
        if is_new_joiner_this_cycle && record.date <= join_date {
            continue;
        }
        if is_exiting_this_cycle {
            if let Some(exit) = exit_date {
                if record.date >= exit {
                    continue;
                }
            }
        }

        total += match record.status {
            DayStatus::Absent => Decimal::ONE,
            DayStatus::HalfDay => Decimal::new(5, 1),
            _ => Decimal::ZERO,
        };
    }
    total
}

fn pass4_apply_leaves(
    records: &mut [DailyRecord],
    paid_leaves: &[LeaveDate],
    casual_leaves: &[LeaveDate],
    absent_days: &mut i64,
    half_days: &mut i64,
) {
    for leave in paid_leaves {
        apply_one_leave(records, leave, DayStatus::PaidLeave, false, absent_days, half_days);
    }
    for leave in casual_leaves {
        apply_one_leave(records, leave, DayStatus::CasualLeave, true, absent_days, half_days);
    }
}

fn apply_one_leave(
    records: &mut [DailyRecord],
    leave: &LeaveDate,
    new_status: DayStatus,
    is_casual: bool,
    absent_days: &mut i64,
    half_days: &mut i64,
) {
    let Some(record) = records.iter_mut().find(|r| r.date == leave.date) else {
        return;
    };
    if record.is_regularized {
        return;
    }
    if !matches!(record.status, DayStatus::Absent | DayStatus::HalfDay) {
        return;
    }

    let original_status = record.status;
    record.leave_value = Some(leave.value);
    record.status = new_status;

    let full_day_credit = leave.value == Decimal::ONE;
    match original_status {
        DayStatus::Absent if full_day_credit => *absent_days -= 1,
        DayStatus::HalfDay if full_day_credit && !is_casual => *half_days -= 1,
        _ => {}
    }
}

#[allow(clippy::too_many_arguments)]
fn pass5_mark_sundays(
    records: &mut [DailyRecord],
    effective_start: NaiveDate,
    effective_end: NaiveDate,
    join_date: NaiveDate,
    exit_date: Option<NaiveDate>,
    cycle_start: NaiveDate,
    cycle_end: NaiveDate,
    original_lop_for_sunday_rule: Decimal,
) {
    let is_new_joiner_this_cycle = join_date >= cycle_start && join_date <= cycle_end;
    let is_exiting_this_cycle = exit_date.is_some_and(|d| d >= cycle_start && d <= cycle_end);

    let status_snapshot: BTreeMap<NaiveDate, DayStatus> =
        records.iter().map(|r| (r.date, r.status)).collect();

    let sundays: Vec<NaiveDate> = records
        .iter()
        .map(|r| r.date)
        .filter(|d| is_sunday(*d) && *d >= effective_start && *d <= effective_end)
        .collect();

    let mut decisions: HashMap<NaiveDate, WeekoffType> = HashMap::new();
    for sunday in sundays {
        let weekoff_type = if original_lop_for_sunday_rule >= Decimal::new(5, 0) {
            WeekoffType::Unpaid
        } else if is_new_joiner_this_cycle || is_exiting_this_cycle {
            let week = week_days_containing(sunday);
            let qualifies = week.iter().any(|d| {
                *d >= effective_start
                    && *d <= effective_end
                    && status_snapshot
                        .get(d)
                        .is_some_and(|s| !matches!(s, DayStatus::Absent | DayStatus::NotActive))
            });
            if qualifies {
                WeekoffType::Paid
            } else {
                WeekoffType::Unpaid
            }
        } else {
            WeekoffType::Paid
        };
        decisions.insert(sunday, weekoff_type);
    }

    for record in records.iter_mut() {
        if let Some(weekoff_type) = decisions.get(&record.date) {
            record.status = DayStatus::Weekoff;
            record.weekoff_type = Some(*weekoff_type);
        }
    }
}

/// Returns the seven calendar dates (Monday through Sunday) of the week
/// containing `date`.
fn week_days_containing(date: NaiveDate) -> Vec<NaiveDate> {
    let offset_from_monday = date.weekday().num_days_from_monday() as i64;
    let monday = date - Duration::days(offset_from_monday);
    (0..7).map(|i| monday + Duration::days(i)).collect()
}

/// A no-op extension point preserved from the source system's "sandwich
/// rule": a Sunday bounded on both sides by unpaid absences would itself
/// be unpaid. Deliberately disabled — always returns `false` — per the
/// redesign decision to keep the simpler rule in §4.5 Pass 5 as the only
/// active weekoff rule. Kept as a named hook so a future policy change
/// doesn't need to rediscover where it plugs in.
pub fn sandwich_rule_unpaid(_before: DayStatus, _sunday: DayStatus, _after: DayStatus) -> bool {
    false
}
