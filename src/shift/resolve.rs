use std::collections::HashMap;

use chrono::NaiveDate;

use crate::models::{Employee, Shift, ShiftAssignment, ShiftTiming};

/// Resolves the shift timing that applies to `employee` on `date`.
///
/// Consults, in order: (1) the shift assignment covering `date` with the
/// highest `id`, when more than one overlaps; (2) the employee's default
/// shift; (3) the system default. Never fails — a dangling `shift_name`
/// reference (pointing at a shift that no longer exists in `shifts`) is
/// logged and treated the same as "absent", falling through to the next
/// rule.
///
/// # Example
///
/// ```
/// use std::collections::HashMap;
/// use chrono::NaiveDate;
/// use payroll_engine::models::Employee;
/// use payroll_engine::shift::resolve_shift;
///
/// let employee = Employee {
///     employee_code: "E1001".to_string(),
///     name: "Asha Rao".to_string(),
///     joining_date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
///     exit_date: None,
///     department: "Ops".to_string(),
///     designation: "Associate".to_string(),
///     basic_salary: None,
///     shift_name: None,
///     phone_number: None,
///     bank_info: None,
/// };
/// let timing = resolve_shift(&employee, &[], &HashMap::new(), NaiveDate::from_ymd_opt(2025, 11, 3).unwrap());
/// assert_eq!(timing.shift_name, "system_default");
/// ```
pub fn resolve_shift(
    employee: &Employee,
    assignments: &[ShiftAssignment],
    shifts_by_name: &HashMap<String, Shift>,
    date: NaiveDate,
) -> ShiftTiming {
    if let Some(assignment) = assignments
        .iter()
        .filter(|a| a.employee_code == employee.employee_code && a.covers(date))
        .max_by_key(|a| a.id)
    {
        match shifts_by_name.get(&assignment.shift_name) {
            Some(shift) => return shift.to_timing(),
            None => {
                tracing::warn!(
                    employee_code = %employee.employee_code,
                    shift_name = %assignment.shift_name,
                    "shift assignment references unknown shift, falling through"
                );
            }
        }
    }

    if let Some(shift_name) = &employee.shift_name {
        match shifts_by_name.get(shift_name) {
            Some(shift) => return shift.to_timing(),
            None => {
                tracing::warn!(
                    employee_code = %employee.employee_code,
                    shift_name = %shift_name,
                    "employee default shift not found, falling back to system default"
                );
            }
        }
    }

    Shift::system_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn sample_employee(shift_name: Option<&str>) -> Employee {
        Employee {
            employee_code: "E1001".to_string(),
            name: "Asha Rao".to_string(),
            joining_date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
            exit_date: None,
            department: "Ops".to_string(),
            designation: "Associate".to_string(),
            basic_salary: None,
            shift_name: shift_name.map(String::from),
            phone_number: None,
            bank_info: None,
        }
    }

    fn general_shift() -> Shift {
        Shift {
            name: "General".to_string(),
            start_hour: 9,
            start_minute: 30,
            end_hour: 18,
            end_minute: 30,
            work_hours: Decimal::new(9, 0),
            late_threshold_minutes: 15,
            is_split_shift: false,
            slot1: None,
            slot2: None,
        }
    }

    fn night_shift() -> Shift {
        Shift {
            name: "Night".to_string(),
            start_hour: 21,
            start_minute: 0,
            end_hour: 6,
            end_minute: 0,
            work_hours: Decimal::new(8, 0),
            late_threshold_minutes: 10,
            is_split_shift: false,
            slot1: None,
            slot2: None,
        }
    }

    #[test]
    fn test_falls_back_to_system_default_with_no_assignment_or_default() {
        let employee = sample_employee(None);
        let timing = resolve_shift(&employee, &[], &HashMap::new(), NaiveDate::from_ymd_opt(2025, 11, 3).unwrap());
        assert_eq!(timing.shift_name, "system_default");
    }

    #[test]
    fn test_uses_employee_default_shift() {
        let employee = sample_employee(Some("General"));
        let mut shifts = HashMap::new();
        shifts.insert("General".to_string(), general_shift());
        let timing = resolve_shift(&employee, &[], &shifts, NaiveDate::from_ymd_opt(2025, 11, 3).unwrap());
        assert_eq!(timing.shift_name, "General");
    }

    #[test]
    fn test_assignment_overrides_default() {
        let employee = sample_employee(Some("General"));
        let mut shifts = HashMap::new();
        shifts.insert("General".to_string(), general_shift());
        shifts.insert("Night".to_string(), night_shift());
        let assignment = ShiftAssignment {
            id: 1,
            employee_code: "E1001".to_string(),
            shift_name: "Night".to_string(),
            from_date: NaiveDate::from_ymd_opt(2025, 11, 1).unwrap(),
            to_date: NaiveDate::from_ymd_opt(2025, 11, 10).unwrap(),
        };
        let timing = resolve_shift(&employee, &[assignment], &shifts, NaiveDate::from_ymd_opt(2025, 11, 3).unwrap());
        assert_eq!(timing.shift_name, "Night");
    }

    #[test]
    fn test_overlapping_assignments_resolve_by_highest_id() {
        let employee = sample_employee(None);
        let mut shifts = HashMap::new();
        shifts.insert("General".to_string(), general_shift());
        shifts.insert("Night".to_string(), night_shift());
        let older = ShiftAssignment {
            id: 1,
            employee_code: "E1001".to_string(),
            shift_name: "General".to_string(),
            from_date: NaiveDate::from_ymd_opt(2025, 11, 1).unwrap(),
            to_date: NaiveDate::from_ymd_opt(2025, 11, 10).unwrap(),
        };
        let newer = ShiftAssignment {
            id: 2,
            employee_code: "E1001".to_string(),
            shift_name: "Night".to_string(),
            from_date: NaiveDate::from_ymd_opt(2025, 11, 1).unwrap(),
            to_date: NaiveDate::from_ymd_opt(2025, 11, 10).unwrap(),
        };
        let timing = resolve_shift(
            &employee,
            &[older, newer],
            &shifts,
            NaiveDate::from_ymd_opt(2025, 11, 3).unwrap(),
        );
        assert_eq!(timing.shift_name, "Night");
    }

    #[test]
    fn test_assignment_outside_date_range_is_ignored() {
        let employee = sample_employee(Some("General"));
        let mut shifts = HashMap::new();
        shifts.insert("General".to_string(), general_shift());
        shifts.insert("Night".to_string(), night_shift());
        let assignment = ShiftAssignment {
            id: 1,
            employee_code: "E1001".to_string(),
            shift_name: "Night".to_string(),
            from_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            to_date: NaiveDate::from_ymd_opt(2025, 1, 31).unwrap(),
        };
        let timing = resolve_shift(&employee, &[assignment], &shifts, NaiveDate::from_ymd_opt(2025, 11, 3).unwrap());
        assert_eq!(timing.shift_name, "General");
    }

    #[test]
    fn test_dangling_assignment_reference_falls_through() {
        let employee = sample_employee(Some("General"));
        let mut shifts = HashMap::new();
        shifts.insert("General".to_string(), general_shift());
        let assignment = ShiftAssignment {
            id: 1,
            employee_code: "E1001".to_string(),
            shift_name: "Deleted".to_string(),
            from_date: NaiveDate::from_ymd_opt(2025, 11, 1).unwrap(),
            to_date: NaiveDate::from_ymd_opt(2025, 11, 10).unwrap(),
        };
        let timing = resolve_shift(&employee, &[assignment], &shifts, NaiveDate::from_ymd_opt(2025, 11, 3).unwrap());
        assert_eq!(timing.shift_name, "General");
    }
}
