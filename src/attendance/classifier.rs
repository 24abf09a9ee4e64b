use chrono::{NaiveDate, Timelike};
use rust_decimal::Decimal;

use crate::models::{DayStatus, Punch, ShiftTiming};
use crate::time::WallClock;

/// The result of classifying one calendar day's punches against a
/// resolved shift (spec §4.4).
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedDay {
    /// The first punch considered the day's check-in, if any.
    pub first_entry: Option<WallClock>,
    /// The last punch considered the day's check-out, if any.
    pub last_exit: Option<WallClock>,
    /// Total hours worked, clamped to `[0, 24]`.
    pub total_hours: Decimal,
    /// Whether the day is considered late.
    pub is_late: bool,
    /// Whether the day is considered late by 30+ minutes.
    pub is_late_by_30_minutes: bool,
    /// Minutes late, when known.
    pub minutes_late: Option<i64>,
    /// Whether the day is considered an early exit.
    pub is_early_exit: bool,
    /// `absent`, `full-day`, or `half-day` — the raw attendance
    /// threshold classification, before regularization or leave
    /// application.
    pub status: DayStatus,
    /// Number of punches considered for this day.
    pub log_count: u32,
}

fn clamp_hours(raw: Decimal) -> Decimal {
    if raw < Decimal::ZERO {
        tracing::warn!(hours = %raw, "negative worked hours, clamping to 0");
        Decimal::ZERO
    } else if raw > Decimal::from(24) {
        tracing::warn!(hours = %raw, "worked hours exceed 24, clamping");
        Decimal::from(24)
    } else {
        raw
    }
}

fn hours_between(start: WallClock, end: WallClock) -> Decimal {
    let seconds = (end.0 - start.0).num_seconds();
    clamp_hours(Decimal::from(seconds) / Decimal::from(3600))
}

fn status_for(total_hours: Decimal, work_hours: Decimal) -> DayStatus {
    let half = work_hours / Decimal::from(2);
    let full_threshold = work_hours * Decimal::new(97, 2);
    if total_hours < half {
        DayStatus::Absent
    } else if total_hours >= full_threshold {
        DayStatus::FullDay
    } else {
        DayStatus::HalfDay
    }
}

/// Classifies one calendar day's punches against `shift`, dispatching to
/// the normal-shift or split-shift rules as appropriate.
///
/// # Example
///
/// ```
/// use payroll_engine::attendance::classify_day;
/// use payroll_engine::models::{DayStatus, Shift};
/// use payroll_engine::time::parse_punch_timestamp;
/// use payroll_engine::models::Punch;
/// use chrono::NaiveDate;
///
/// let shift = Shift::system_default();
/// let date = NaiveDate::from_ymd_opt(2025, 11, 3).unwrap();
/// let punches = vec![
///     Punch { employee_code: "E1".into(), log_timestamp: parse_punch_timestamp("2025-11-03T10:00:00").unwrap(), direction: None, device_id: None },
///     Punch { employee_code: "E1".into(), log_timestamp: parse_punch_timestamp("2025-11-03T19:00:00").unwrap(), direction: None, device_id: None },
/// ];
/// let classified = classify_day(&punches, &shift, date);
/// assert_eq!(classified.status, DayStatus::FullDay);
/// ```
pub fn classify_day(day_punches: &[Punch], shift: &ShiftTiming, date: NaiveDate) -> ClassifiedDay {
    if shift.is_split_shift {
        if let (Some(slot1), Some(slot2)) = (shift.slot1, shift.slot2) {
            return classify_split_shift(day_punches, shift, slot1, slot2, date);
        }
        tracing::warn!(shift_name = %shift.shift_name, "split shift missing slot data, treating as normal shift");
    }
    classify_normal_shift(day_punches, shift, date)
}

fn classify_normal_shift(day_punches: &[Punch], shift: &ShiftTiming, date: NaiveDate) -> ClassifiedDay {
    let log_count = day_punches.len() as u32;
    if day_punches.is_empty() {
        return ClassifiedDay {
            first_entry: None,
            last_exit: None,
            total_hours: Decimal::ZERO,
            is_late: false,
            is_late_by_30_minutes: false,
            minutes_late: None,
            is_early_exit: false,
            status: DayStatus::Absent,
            log_count,
        };
    }

    let mut sorted: Vec<WallClock> = day_punches.iter().map(|p| p.log_timestamp).collect();
    sorted.sort();

    let (first_entry, last_exit) = if sorted.len() == 1 {
        let only = sorted[0];
        if only.hour() >= 14 {
            (None, Some(only))
        } else {
            (Some(only), None)
        }
    } else {
        (Some(sorted[0]), Some(*sorted.last().unwrap()))
    };

    let total_hours = match (first_entry, last_exit) {
        (Some(entry), Some(exit)) => hours_between(entry, exit),
        _ => Decimal::ZERO,
    };

    let shift_start = WallClock(shift.start_on(date));
    let shift_end = WallClock(shift.effective_end_on(date));
    let late_threshold = WallClock(shift.late_threshold_on(date));
    let thirty_min_threshold = WallClock(shift.start_on(date) + chrono::Duration::minutes(30));

    let (is_late, is_late_by_30_minutes, minutes_late) = match first_entry {
        Some(entry) => {
            let late = entry > late_threshold;
            let late_by_30 = entry > thirty_min_threshold;
            let minutes = if late {
                Some((entry.0 - shift_start.0).num_minutes())
            } else {
                None
            };
            (late, late_by_30, minutes)
        }
        None => (true, true, None),
    };

    let is_early_exit = match last_exit {
        Some(exit) => exit < WallClock(shift_end.0 - chrono::Duration::minutes(30)),
        None => true,
    };

    let status = status_for(total_hours, shift.work_hours);

    ClassifiedDay {
        first_entry,
        last_exit,
        total_hours,
        is_late,
        is_late_by_30_minutes,
        minutes_late,
        is_early_exit,
        status,
        log_count,
    }
}

fn classify_split_shift(
    day_punches: &[Punch],
    shift: &ShiftTiming,
    slot1: crate::models::SplitShiftSlot,
    slot2: crate::models::SplitShiftSlot,
    date: NaiveDate,
) -> ClassifiedDay {
    let log_count = day_punches.len() as u32;

    let mut sorted: Vec<WallClock> = day_punches.iter().map(|p| p.log_timestamp).collect();
    sorted.sort();

    let slot1_end = WallClock(slot1.end_on(date));
    let slot2_start = WallClock(slot2.start_on(date));
    let midpoint = WallClock(slot1_end.0 + (slot2_start.0 - slot1_end.0) / 2);

    let slot1_punches: Vec<WallClock> = sorted.iter().copied().filter(|p| *p < midpoint).collect();
    let slot2_punches: Vec<WallClock> = sorted.iter().copied().filter(|p| *p >= midpoint).collect();

    let slot1_result = classify_slot(&slot1_punches, slot1.start_on(date), slot1.end_on(date), slot1.duration());
    let slot2_result = classify_slot(&slot2_punches, slot2.start_on(date), slot2.end_on(date), slot2.duration());

    let total_hours = clamp_hours(slot1_result.hours + slot2_result.hours);
    let is_late = slot1_result.is_late || slot2_result.is_late;
    let is_late_by_30_minutes = if !slot1_punches.is_empty() {
        slot1_result.is_late
    } else if !slot2_punches.is_empty() {
        slot2_result.is_late
    } else {
        true
    };

    let first_entry = slot1_result.first_in.or(slot2_result.first_in);
    let last_exit = slot2_result.last_out.or(slot1_result.last_out);

    let minutes_late = if is_late {
        first_entry.map(|entry| {
            let anchor = if !slot1_punches.is_empty() {
                slot1.start_on(date)
            } else {
                slot2.start_on(date)
            };
            (entry.0 - anchor).num_minutes()
        })
    } else {
        None
    };

    let is_early_exit = last_exit.is_none()
        || last_exit.is_some_and(|exit| exit.0 < slot2.end_on(date) - chrono::Duration::minutes(30));

    let status = status_for(total_hours, shift.work_hours);

    ClassifiedDay {
        first_entry,
        last_exit,
        total_hours,
        is_late,
        is_late_by_30_minutes,
        minutes_late,
        is_early_exit,
        status,
        log_count,
    }
}

struct SlotResult {
    hours: Decimal,
    is_late: bool,
    first_in: Option<WallClock>,
    last_out: Option<WallClock>,
}

fn classify_slot(
    punches: &[WallClock],
    slot_start: chrono::NaiveDateTime,
    slot_end: chrono::NaiveDateTime,
    slot_duration: chrono::Duration,
) -> SlotResult {
    if punches.is_empty() {
        return SlotResult { hours: Decimal::ZERO, is_late: false, first_in: None, last_out: None };
    }

    let first_in = punches[0];
    let last_out = *punches.last().unwrap();

    let cap = slot_duration + chrono::Duration::hours(1);
    let raw_hours = hours_between(first_in, last_out);
    let cap_hours = Decimal::from(cap.num_seconds()) / Decimal::from(3600);
    let hours = raw_hours.min(cap_hours);

    let is_late = (first_in.0 - slot_start).num_minutes().abs() <= 60 && first_in.0 > slot_start;
    let _ = slot_end;

    SlotResult { hours, is_late, first_in: Some(first_in), last_out: Some(last_out) }
}
