//! Shift model and related types.
//!
//! This module defines [`Shift`] (named, reference-data shift definitions),
//! [`ShiftAssignment`] (date-ranged per-employee overrides), and
//! [`ShiftTiming`] (the resolved shape consumed by the day classifier,
//! independent of how it was looked up).

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One of the two disjoint time slots making up a split shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitShiftSlot {
    /// Slot start hour, 0-23.
    pub start_hour: u32,
    /// Slot start minute, 0-59.
    pub start_minute: u32,
    /// Slot end hour, 0-23.
    pub end_hour: u32,
    /// Slot end minute, 0-59.
    pub end_minute: u32,
}

impl SplitShiftSlot {
    /// Returns the slot's start time on the given calendar date.
    pub fn start_on(&self, date: NaiveDate) -> NaiveDateTime {
        date.and_hms_opt(self.start_hour, self.start_minute, 0)
            .expect("slot start hour/minute validated at config load")
    }

    /// Returns the slot's end time on the given calendar date.
    pub fn end_on(&self, date: NaiveDate) -> NaiveDateTime {
        date.and_hms_opt(self.end_hour, self.end_minute, 0)
            .expect("slot end hour/minute validated at config load")
    }

    /// The slot's nominal duration.
    pub fn duration(&self) -> chrono::Duration {
        let anchor = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
        self.end_on(anchor) - self.start_on(anchor)
    }
}

// `shifts.slot1`/`slot2` are stored as a single JSONB column each rather
// than four extra int columns. Delegate to `sqlx::types::Json` so `Shift`
// can still derive `FromRow` with a plain `Option<SplitShiftSlot>` field.
impl sqlx::Type<sqlx::Postgres> for SplitShiftSlot {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <sqlx::types::Json<SplitShiftSlot> as sqlx::Type<sqlx::Postgres>>::type_info()
    }
}

impl<'q> sqlx::Encode<'q, sqlx::Postgres> for SplitShiftSlot {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, Box<dyn std::error::Error + Send + Sync>> {
        sqlx::types::Json(self).encode_by_ref(buf)
    }
}

impl<'r> sqlx::Decode<'r, sqlx::Postgres> for SplitShiftSlot {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let sqlx::types::Json(slot) = sqlx::types::Json::<SplitShiftSlot>::decode(value)?;
        Ok(slot)
    }
}

/// Named reference-data shift definition (the `shifts` table, spec §6).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Shift {
    /// Unique shift name, e.g. "General", "Night".
    pub name: String,
    /// Start hour, 0-23.
    pub start_hour: u32,
    /// Start minute, 0-59.
    pub start_minute: u32,
    /// End hour, 0-23.
    pub end_hour: u32,
    /// End minute, 0-59.
    pub end_minute: u32,
    /// Expected work hours for a full day on this shift.
    pub work_hours: Decimal,
    /// Minutes of grace before a late first-entry is flagged.
    pub late_threshold_minutes: i64,
    /// Whether this shift is split into two disjoint slots.
    pub is_split_shift: bool,
    /// First slot, when `is_split_shift`.
    pub slot1: Option<SplitShiftSlot>,
    /// Second slot, when `is_split_shift`.
    pub slot2: Option<SplitShiftSlot>,
}

impl Shift {
    /// The system default shift used when neither a date-ranged assignment
    /// nor an employee default shift applies: 10:00-19:00, 9h, 12-minute
    /// grace, not split (spec §4.2).
    pub fn system_default() -> ShiftTiming {
        ShiftTiming {
            shift_name: "system_default".to_string(),
            start_hour: 10,
            start_minute: 0,
            end_hour: 19,
            end_minute: 0,
            work_hours: Decimal::new(9, 0),
            late_threshold_minutes: 12,
            is_split_shift: false,
            slot1: None,
            slot2: None,
        }
    }

    /// Converts this reference-data row into the resolved [`ShiftTiming`]
    /// shape consumed by the day classifier.
    pub fn to_timing(&self) -> ShiftTiming {
        ShiftTiming {
            shift_name: self.name.clone(),
            start_hour: self.start_hour,
            start_minute: self.start_minute,
            end_hour: self.end_hour,
            end_minute: self.end_minute,
            work_hours: self.work_hours,
            late_threshold_minutes: self.late_threshold_minutes,
            is_split_shift: self.is_split_shift,
            slot1: self.slot1,
            slot2: self.slot2,
        }
    }
}

/// A date-ranged override of an employee's shift (the
/// `employee_shift_assignments` table, spec §6). Overlapping assignments
/// for the same employee resolve by highest `id` (last-write-wins, per
/// DESIGN.md's Open Question decision).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct ShiftAssignment {
    /// Row id; used to break ties between overlapping assignments.
    pub id: i64,
    /// The employee this assignment applies to.
    pub employee_code: String,
    /// The shift name to apply during the date range.
    pub shift_name: String,
    /// Start of the date range, inclusive.
    pub from_date: NaiveDate,
    /// End of the date range, inclusive.
    pub to_date: NaiveDate,
}

impl ShiftAssignment {
    /// Returns `true` if `date` falls within `[from_date, to_date]`.
    pub fn covers(&self, date: NaiveDate) -> bool {
        date >= self.from_date && date <= self.to_date
    }
}

/// The resolved shift timing for a specific employee and date, independent
/// of whether it came from an assignment, an employee default, or the
/// system default. This is the shape the day classifier consumes, and
/// `resolve_shift` always produces one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftTiming {
    /// The name of the shift this timing was resolved from, for audit
    /// purposes (e.g. included in the daily breakdown).
    pub shift_name: String,
    /// Start hour, 0-23.
    pub start_hour: u32,
    /// Start minute, 0-59.
    pub start_minute: u32,
    /// End hour, 0-23.
    pub end_hour: u32,
    /// End minute, 0-59.
    pub end_minute: u32,
    /// Expected work hours for a full day on this shift.
    pub work_hours: Decimal,
    /// Minutes of grace before a late first-entry is flagged.
    pub late_threshold_minutes: i64,
    /// Whether this shift is split into two disjoint slots.
    pub is_split_shift: bool,
    /// First slot, when `is_split_shift`.
    pub slot1: Option<SplitShiftSlot>,
    /// Second slot, when `is_split_shift`.
    pub slot2: Option<SplitShiftSlot>,
}

impl ShiftTiming {
    /// Returns the shift's nominal start time on `date`.
    pub fn start_on(&self, date: NaiveDate) -> NaiveDateTime {
        date.and_hms_opt(self.start_hour, self.start_minute, 0)
            .expect("shift start hour/minute validated at config load")
    }

    /// Returns the shift's nominal end time on `date`.
    pub fn end_on(&self, date: NaiveDate) -> NaiveDateTime {
        date.and_hms_opt(self.end_hour, self.end_minute, 0)
            .expect("shift end hour/minute validated at config load")
    }

    /// Returns the latest first-entry time still considered on-time.
    pub fn late_threshold_on(&self, date: NaiveDate) -> NaiveDateTime {
        self.start_on(date) + chrono::Duration::minutes(self.late_threshold_minutes)
    }

    /// `true` if this shift's nominal end time is not after its start
    /// time, i.e. the shift runs past midnight (e.g. a 21:00-06:00 night
    /// shift).
    pub fn spans_midnight(&self) -> bool {
        (self.end_hour, self.end_minute) <= (self.start_hour, self.start_minute)
    }

    /// Returns the shift's nominal end time anchored to `date`, rolling
    /// onto the following calendar date when the shift spans midnight.
    pub fn effective_end_on(&self, date: NaiveDate) -> NaiveDateTime {
        if self.spans_midnight() {
            self.end_on(date.succ_opt().unwrap_or(date))
        } else {
            self.end_on(date)
        }
    }
}
