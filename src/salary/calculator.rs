//! The salary calculator: turns a computed monthly attendance breakdown
//! into a full gross/net derivation (spec §4.6).

use std::collections::HashMap;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::config::EngineConfig;
use crate::models::{
    AdjustmentType, DayStatus, Employee, LeaveEntitlement, MonthlyAttendance, SalaryAdjustment,
    SalaryCalculation, SalaryHold, Shift, WeekoffType,
};
use crate::time::days_in_cycle;

/// Everything [`calculate_salary`] needs for one (employee, month)
/// derivation. `shift_work_hours` is the denominator used for the
/// hourly rate (spec §4.6 step 1) — the employee's primary shift's
/// nominal work hours, resolved by the caller since a cycle may span
/// more than one shift assignment.
#[derive(Debug, Clone)]
pub struct SalaryCalculatorInputs<'a> {
    /// The employee being calculated.
    pub employee: &'a Employee,
    /// The payroll cycle label, `YYYY-MM`.
    pub month: &'a str,
    /// The attendance engine's output for this cycle.
    pub attendance: &'a MonthlyAttendance,
    /// Reference shift data, by name, used to look up each day's nominal
    /// work hours for overtime excess.
    pub shifts_by_name: &'a HashMap<String, Shift>,
    /// The work-hours denominator for the hourly rate.
    pub shift_work_hours: Decimal,
    /// Whether computed overtime is actually paid this month.
    pub overtime_enabled: bool,
    /// Salary adjustment rows for (employee, month).
    pub adjustments: &'a [SalaryAdjustment],
    /// The active hold for this (employee, month), if any.
    pub hold: Option<&'a SalaryHold>,
    /// The employee's leave entitlement for the relevant year, if any.
    pub leave_entitlement: Option<&'a LeaveEntitlement>,
    /// Whole payroll cycles from the joining cycle through this one,
    /// inclusive (see `time::cycles_since`), used for the TDS cumulative
    /// threshold.
    pub cycles_since_joining: u32,
    /// Engine-wide statutory constants.
    pub config: &'a EngineConfig,
}

/// Computes the full salary derivation described in spec §4.6, steps
/// 1-12. Persistence (step 13) is the snapshot store's responsibility.
pub fn calculate_salary(inputs: SalaryCalculatorInputs<'_>) -> SalaryCalculation {
    let base_salary = inputs.employee.basic_salary.unwrap_or_else(|| {
        tracing::warn!(
            employee_code = %inputs.employee.employee_code,
            fallback = %inputs.config.fallback_base_salary,
            "employee has no basic_salary on record, using configured fallback"
        );
        inputs.config.fallback_base_salary
    });

    // Step 1: rates.
    let full_cycle_days = days_in_cycle(inputs.month).unwrap_or(30);
    let per_day_rate = base_salary / Decimal::from(full_cycle_days);
    let hourly_rate = if inputs.shift_work_hours.is_zero() {
        Decimal::ZERO
    } else {
        base_salary / (Decimal::from(full_cycle_days) * inputs.shift_work_hours)
    };

    // Step 2: payable Sundays.
    let payable_sundays = Decimal::from(
        inputs
            .attendance
            .daily_breakdown
            .iter()
            .filter(|r| r.status == DayStatus::Weekoff && r.weekoff_type == Some(WeekoffType::Paid))
            .count() as i64,
    );

    // Step 3: approved leave credit.
    let approved_leave_credit: Decimal = inputs
        .attendance
        .daily_breakdown
        .iter()
        .filter(|r| matches!(r.status, DayStatus::PaidLeave | DayStatus::CasualLeave))
        .filter_map(|r| r.leave_value)
        .sum();

    // Step 4: loss-of-pay days.
    let lop_days = inputs
        .leave_entitlement
        .map(|e| e.lop_days())
        .unwrap_or(Decimal::ZERO);

    // Step 5: payable days.
    let half_days = Decimal::from(inputs.attendance.half_days);
    let full_days = Decimal::from(inputs.attendance.full_days);
    let payable_days = full_days + half_days * Decimal::new(5, 1) + payable_sundays + approved_leave_credit;

    // Step 6: attendance pay.
    let attendance_pay = per_day_rate * payable_days - per_day_rate * lop_days;

    // Step 7: overtime.
    let overtime_excess: Decimal = inputs
        .attendance
        .daily_breakdown
        .iter()
        .filter(|r| !matches!(r.status, DayStatus::Absent | DayStatus::NotActive))
        .filter_map(|r| {
            let work_hours = inputs.shifts_by_name.get(&r.shift_name).map(|s| s.work_hours)?;
            let excess = r.worked_hours - work_hours;
            if excess > Decimal::ONE {
                Some(excess)
            } else {
                None
            }
        })
        .sum();
    let overtime_hours = overtime_excess.floor();
    let overtime_amount = if inputs.overtime_enabled {
        overtime_hours * hourly_rate
    } else {
        Decimal::ZERO
    };

    // Step 8: adjustments.
    let incentive_amount: Decimal = inputs
        .adjustments
        .iter()
        .filter(|a| a.is_incentive())
        .map(|a| a.amount)
        .sum();
    let other_additions: Decimal = inputs
        .adjustments
        .iter()
        .filter(|a| a.adjustment_type == AdjustmentType::Addition && !a.is_incentive())
        .map(|a| a.amount)
        .sum();
    let adjustment_deductions: Decimal = inputs
        .adjustments
        .iter()
        .filter(|a| a.adjustment_type == AdjustmentType::Deduction)
        .map(|a| a.amount)
        .sum();

    // Step 9: gross.
    let gross_salary = attendance_pay + overtime_amount + incentive_amount;

    // Step 10: professional tax.
    let professional_tax = if gross_salary > inputs.config.pt_gross_threshold
        && base_salary >= inputs.config.pt_min_base_salary
    {
        inputs.config.pt_amount
    } else {
        Decimal::ZERO
    };

    // Step 11: TDS.
    let cumulative_salary_since_joining = base_salary * Decimal::from(inputs.cycles_since_joining);
    let is_cleaning_staff = inputs.employee.is_cleaning_staff();
    let tds_deduction = if base_salary < inputs.config.tds_base_salary_threshold
        && cumulative_salary_since_joining >= inputs.config.tds_cumulative_threshold
        && !is_cleaning_staff
    {
        (inputs.config.tds_rate * gross_salary).round_dp(2)
    } else {
        Decimal::ZERO
    };

    // Step 12: net.
    let net_salary_raw = gross_salary - tds_deduction - professional_tax - adjustment_deductions + other_additions;
    let net_salary = net_salary_raw
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .map(Decimal::from)
        .unwrap_or(net_salary_raw);

    SalaryCalculation {
        employee_code: inputs.employee.employee_code.clone(),
        month: inputs.month.to_string(),
        attendance: inputs.attendance.clone(),
        gross_salary,
        net_salary,
        base_salary,
        per_day_rate,
        hourly_rate,
        payable_sundays,
        approved_leave_credit,
        lop_days,
        payable_days,
        attendance_pay,
        overtime_hours,
        overtime_amount,
        incentive_amount,
        other_additions,
        adjustment_deductions,
        tds_deduction,
        professional_tax,
        is_held: inputs.hold.is_some_and(|h| h.is_active()),
        hold_reason: inputs.hold.filter(|h| h.is_active()).and_then(|h| h.reason.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DailyRecord, HoldType};
    use chrono::NaiveDate;

    fn employee(basic_salary: Option<Decimal>) -> Employee {
        Employee {
            employee_code: "E1001".to_string(),
            name: "Asha Rao".to_string(),
            joining_date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
            exit_date: None,
            department: "Ops".to_string(),
            designation: "Associate".to_string(),
            basic_salary,
            shift_name: Some("General".to_string()),
            phone_number: None,
            bank_info: None,
        }
    }

    fn sample_record(date: NaiveDate, status: DayStatus, worked_hours: Decimal) -> DailyRecord {
        DailyRecord {
            date,
            shift_name: "General".to_string(),
            status,
            original_status: None,
            first_entry: None,
            last_exit: None,
            worked_hours,
            is_late: false,
            is_late_by_30_minutes: false,
            minutes_late: None,
            is_early_exit: false,
            log_count: 2,
            is_regularized: false,
            leave_value: None,
            weekoff_type: None,
        }
    }

    fn general_shift() -> HashMap<String, Shift> {
        let mut map = HashMap::new();
        map.insert(
            "General".to_string(),
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
            },
        );
        map
    }

    fn base_attendance() -> MonthlyAttendance {
        let mut breakdown = Vec::new();
        for day in 1..=30 {
            let date = NaiveDate::from_ymd_opt(2025, 11, 1).unwrap() + chrono::Duration::days(day - 1);
            breakdown.push(sample_record(date, DayStatus::FullDay, Decimal::new(9, 0)));
        }
        MonthlyAttendance {
            employee_code: "E1001".to_string(),
            month: "2025-11".to_string(),
            daily_breakdown: breakdown,
            full_days: 30,
            half_days: 0,
            absent_days: 0,
            late_days: 0,
            late_by_30_minutes_days: 0,
            early_exits: 0,
            total_worked_hours: Decimal::new(270, 0),
            total_days_in_effective_cycle: 30,
        }
    }

    #[test]
    fn test_full_month_attendance_produces_full_gross() {
        let employee = employee(Some(Decimal::new(3000000, 2)));
        let attendance = base_attendance();
        let shifts = general_shift();
        let config = EngineConfig::defaults();
        let inputs = SalaryCalculatorInputs {
            employee: &employee,
            month: "2025-11",
            attendance: &attendance,
            shifts_by_name: &shifts,
            shift_work_hours: Decimal::new(9, 0),
            overtime_enabled: false,
            adjustments: &[],
            hold: None,
            leave_entitlement: None,
            cycles_since_joining: 60,
            config: &config,
        };
        let result = calculate_salary(inputs);
        assert_eq!(result.gross_salary, Decimal::new(3000000, 2));
        assert!(!result.is_held);
    }

    #[test]
    fn test_missing_base_salary_uses_fallback() {
        let employee = employee(None);
        let attendance = base_attendance();
        let shifts = general_shift();
        let config = EngineConfig::defaults();
        let inputs = SalaryCalculatorInputs {
            employee: &employee,
            month: "2025-11",
            attendance: &attendance,
            shifts_by_name: &shifts,
            shift_work_hours: Decimal::new(9, 0),
            overtime_enabled: false,
            adjustments: &[],
            hold: None,
            leave_entitlement: None,
            cycles_since_joining: 1,
            config: &config,
        };
        let result = calculate_salary(inputs);
        assert_eq!(result.base_salary, config.fallback_base_salary);
    }

    #[test]
    fn test_professional_tax_applies_above_threshold() {
        let employee = employee(Some(Decimal::new(2000000, 2)));
        let attendance = base_attendance();
        let shifts = general_shift();
        let config = EngineConfig::defaults();
        let inputs = SalaryCalculatorInputs {
            employee: &employee,
            month: "2025-11",
            attendance: &attendance,
            shifts_by_name: &shifts,
            shift_work_hours: Decimal::new(9, 0),
            overtime_enabled: false,
            adjustments: &[],
            hold: None,
            leave_entitlement: None,
            cycles_since_joining: 1,
            config: &config,
        };
        let result = calculate_salary(inputs);
        assert_eq!(result.professional_tax, config.pt_amount);
    }

    #[test]
    fn test_tds_not_applied_for_cleaning_staff() {
        let mut employee = employee(Some(Decimal::new(1000000, 2)));
        employee.department = "Cleaning Services".to_string();
        let attendance = base_attendance();
        let shifts = general_shift();
        let config = EngineConfig::defaults();
        let inputs = SalaryCalculatorInputs {
            employee: &employee,
            month: "2025-11",
            attendance: &attendance,
            shifts_by_name: &shifts,
            shift_work_hours: Decimal::new(9, 0),
            overtime_enabled: false,
            adjustments: &[],
            hold: None,
            leave_entitlement: None,
            cycles_since_joining: 10,
            config: &config,
        };
        let result = calculate_salary(inputs);
        assert_eq!(result.tds_deduction, Decimal::ZERO);
    }

    #[test]
    fn test_tds_applied_when_all_three_conditions_hold() {
        let employee = employee(Some(Decimal::new(1000000, 2)));
        let attendance = base_attendance();
        let shifts = general_shift();
        let config = EngineConfig::defaults();
        let inputs = SalaryCalculatorInputs {
            employee: &employee,
            month: "2025-11",
            attendance: &attendance,
            shifts_by_name: &shifts,
            shift_work_hours: Decimal::new(9, 0),
            overtime_enabled: false,
            adjustments: &[],
            hold: None,
            leave_entitlement: None,
            cycles_since_joining: 10,
            config: &config,
        };
        let result = calculate_salary(inputs);
        assert_eq!(result.tds_deduction, (config.tds_rate * result.gross_salary).round_dp(2));
        assert!(result.tds_deduction > Decimal::ZERO);
    }

    #[test]
    fn test_overtime_excess_over_one_hour_is_floored() {
        let employee = employee(Some(Decimal::new(3000000, 2)));
        let mut attendance = base_attendance();
        attendance.daily_breakdown[0].worked_hours = Decimal::new(115, 1); // 11.5h, 2.5h excess
        let shifts = general_shift();
        let config = EngineConfig::defaults();
        let inputs = SalaryCalculatorInputs {
            employee: &employee,
            month: "2025-11",
            attendance: &attendance,
            shifts_by_name: &shifts,
            shift_work_hours: Decimal::new(9, 0),
            overtime_enabled: true,
            adjustments: &[],
            hold: None,
            leave_entitlement: None,
            cycles_since_joining: 1,
            config: &config,
        };
        let result = calculate_salary(inputs);
        assert_eq!(result.overtime_hours, Decimal::new(2, 0));
        assert!(result.overtime_amount > Decimal::ZERO);
    }

    #[test]
    fn test_overtime_not_paid_when_toggle_disabled() {
        let employee = employee(Some(Decimal::new(3000000, 2)));
        let mut attendance = base_attendance();
        attendance.daily_breakdown[0].worked_hours = Decimal::new(115, 1);
        let shifts = general_shift();
        let config = EngineConfig::defaults();
        let inputs = SalaryCalculatorInputs {
            employee: &employee,
            month: "2025-11",
            attendance: &attendance,
            shifts_by_name: &shifts,
            shift_work_hours: Decimal::new(9, 0),
            overtime_enabled: false,
            adjustments: &[],
            hold: None,
            leave_entitlement: None,
            cycles_since_joining: 1,
            config: &config,
        };
        let result = calculate_salary(inputs);
        assert_eq!(result.overtime_hours, Decimal::new(2, 0));
        assert_eq!(result.overtime_amount, Decimal::ZERO);
    }

    #[test]
    fn test_incentive_routes_to_gross() {
        let employee = employee(Some(Decimal::new(3000000, 2)));
        let attendance = base_attendance();
        let shifts = general_shift();
        let config = EngineConfig::defaults();
        let incentive = SalaryAdjustment {
            id: 1,
            employee_code: "E1001".to_string(),
            month: "2025-11".to_string(),
            adjustment_type: AdjustmentType::Addition,
            category: "INCENTIVE".to_string(),
            amount: Decimal::new(500000, 2),
            description: None,
        };
        let inputs = SalaryCalculatorInputs {
            employee: &employee,
            month: "2025-11",
            attendance: &attendance,
            shifts_by_name: &shifts,
            shift_work_hours: Decimal::new(9, 0),
            overtime_enabled: false,
            adjustments: std::slice::from_ref(&incentive),
            hold: None,
            leave_entitlement: None,
            cycles_since_joining: 1,
            config: &config,
        };
        let result = calculate_salary(inputs);
        assert_eq!(result.incentive_amount, Decimal::new(500000, 2));
        assert_eq!(result.gross_salary, Decimal::new(3500000, 2));
    }

    #[test]
    fn test_active_hold_is_reflected() {
        let employee = employee(Some(Decimal::new(3000000, 2)));
        let attendance = base_attendance();
        let shifts = general_shift();
        let config = EngineConfig::defaults();
        let hold = SalaryHold {
            id: 1,
            employee_code: "E1001".to_string(),
            month: "2025-11".to_string(),
            hold_type: HoldType::Manual,
            reason: Some("pending document review".to_string()),
            is_released: false,
            created_at: chrono::Utc::now(),
            released_at: None,
        };
        let inputs = SalaryCalculatorInputs {
            employee: &employee,
            month: "2025-11",
            attendance: &attendance,
            shifts_by_name: &shifts,
            shift_work_hours: Decimal::new(9, 0),
            overtime_enabled: false,
            adjustments: &[],
            hold: Some(&hold),
            leave_entitlement: None,
            cycles_since_joining: 1,
            config: &config,
        };
        let result = calculate_salary(inputs);
        assert!(result.is_held);
        assert_eq!(result.hold_reason.as_deref(), Some("pending document review"));
    }
}
