//! Planned hours from the staff schedule.
//!
//! Scheduled hours are shown next to worked hours in the payroll report and
//! decide whether an employee with no punches still appears there. They are
//! never used to compute pay.

use chrono::TimeDelta;
use rust_decimal::Decimal;

use crate::models::{ReportingPeriod, ScheduledShift, hours_from_duration};

/// Sums the planned hours of `shifts` whose date falls inside `period`.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::scheduled_hours;
/// use payroll_engine::models::{ReportingPeriod, ScheduledShift};
/// use chrono::{NaiveDate, NaiveTime};
/// use rust_decimal::Decimal;
///
/// let period = ReportingPeriod::month(2026, 1).unwrap();
/// let closing = ScheduledShift {
///     employee_id: "emp_001".to_string(),
///     date: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
///     start_time: NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
///     end_time: NaiveTime::from_hms_opt(2, 0, 0).unwrap(),
/// };
///
/// assert_eq!(scheduled_hours([&closing], &period), Decimal::from(8));
/// ```
pub fn scheduled_hours<'a, I>(shifts: I, period: &ReportingPeriod) -> Decimal
where
    I: IntoIterator<Item = &'a ScheduledShift>,
{
    let total = shifts
        .into_iter()
        .filter(|shift| period.contains_date(shift.date))
        .fold(TimeDelta::zero(), |acc, shift| acc + shift.duration());
    hours_from_duration(total)
}
