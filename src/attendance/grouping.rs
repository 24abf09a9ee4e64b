use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::models::Punch;

/// Sorts `punches` by wall-clock ascending and groups them by workday
/// (spec §4.3): a punch whose local hour is in `[0, 5)` belongs to the
/// *previous* calendar date's workday. Within-day ordering is preserved.
///
/// # Example
///
/// ```
/// use payroll_engine::attendance::group_by_workday;
/// use payroll_engine::models::Punch;
/// use payroll_engine::time::parse_punch_timestamp;
///
/// let punches = vec![
///     Punch { employee_code: "E1".into(), log_timestamp: parse_punch_timestamp("2025-11-03T09:00:00").unwrap(), direction: None, device_id: None },
///     Punch { employee_code: "E1".into(), log_timestamp: parse_punch_timestamp("2025-11-04T02:00:00").unwrap(), direction: None, device_id: None },
/// ];
/// let grouped = group_by_workday(punches);
/// assert_eq!(grouped.len(), 2);
/// ```
pub fn group_by_workday(mut punches: Vec<Punch>) -> BTreeMap<NaiveDate, Vec<Punch>> {
    punches.sort_by_key(|p| p.log_timestamp);

    let mut grouped: BTreeMap<NaiveDate, Vec<Punch>> = BTreeMap::new();
    for punch in punches {
        let workday = punch.log_timestamp.workday_date();
        grouped.entry(workday).or_default().push(punch);
    }
    grouped
}
