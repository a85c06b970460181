//! Planned shift model.
//!
//! Scheduled shifts are display-only: they feed the "scheduled hours" column
//! of the payroll report and never influence pay.

use chrono::{NaiveDate, NaiveTime, TimeDelta};
use serde::{Deserialize, Serialize};

/// One planned shift on the staff schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledShift {
    /// The employee the shift is planned for.
    pub employee_id: String,
    /// The date the shift starts on.
    pub date: NaiveDate,
    /// Planned start (restaurant wall clock).
    pub start_time: NaiveTime,
    /// Planned end; an end at or before the start rolls over midnight.
    pub end_time: NaiveTime,
}

impl ScheduledShift {
    /// Planned duration of the shift.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::models::ScheduledShift;
    /// use chrono::{NaiveDate, NaiveTime, TimeDelta};
    ///
    /// let closing = ScheduledShift {
    ///     employee_id: "emp_001".to_string(),
    ///     date: NaiveDate::from_ymd_opt(2026, 1, 16).unwrap(),
    ///     start_time: NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
    ///     end_time: NaiveTime::from_hms_opt(2, 0, 0).unwrap(),
    /// };
    /// assert_eq!(closing.duration(), TimeDelta::hours(8));
    /// ```
    pub fn duration(&self) -> TimeDelta {
        let span = self.end_time - self.start_time;
        if span < TimeDelta::zero() {
            span + TimeDelta::days(1)
        } else {
            span
        }
    }
}
