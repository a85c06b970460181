//! Time-clock entry model.
//!
//! A [`TimeClockEntry`] is one punch session of one employee: clock-in,
//! optional clock-out and an optional single break.

use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::DayBoundary;

const MILLIS_PER_HOUR: i64 = 3_600_000;

/// Decimal places kept when converting durations to hours.
///
/// A fixed scale keeps sums and differences of hour figures exact.
pub const HOURS_DECIMAL_PLACES: u32 = 10;

/// Converts a duration to decimal hours, rounded to [`HOURS_DECIMAL_PLACES`].
///
/// # Example
///
/// ```
/// use payroll_engine::models::hours_from_duration;
/// use chrono::TimeDelta;
/// use rust_decimal::Decimal;
///
/// assert_eq!(hours_from_duration(TimeDelta::minutes(90)), Decimal::new(15, 1));
/// ```
pub fn hours_from_duration(duration: TimeDelta) -> Decimal {
    (Decimal::from(duration.num_milliseconds()) / Decimal::from(MILLIS_PER_HOUR))
        .round_dp(HOURS_DECIMAL_PLACES)
}

/// Clamps a duration to zero when negative.
fn non_negative(duration: TimeDelta) -> TimeDelta {
    duration.max(TimeDelta::zero())
}

/// One clock-in/clock-out session recorded by the time clock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeClockEntry {
    /// Identifier of the punch row, when the source provides one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// The employee who punched.
    pub employee_id: String,
    /// When the shift started.
    pub clock_in_time: DateTime<Utc>,
    /// When the shift ended; `None` while the shift is still open.
    #[serde(default)]
    pub clock_out_time: Option<DateTime<Utc>>,
    /// Start of the break taken during the shift.
    #[serde(default)]
    pub break_start_time: Option<DateTime<Utc>>,
    /// End of the break taken during the shift.
    #[serde(default)]
    pub break_end_time: Option<DateTime<Utc>>,
}

impl TimeClockEntry {
    /// Returns true while the employee has not clocked out.
    pub fn is_open(&self) -> bool {
        self.clock_out_time.is_none()
    }

    /// Returns true when clock-out precedes clock-in.
    pub fn has_inverted_shift(&self) -> bool {
        self.clock_out_time.is_some_and(|out| out < self.clock_in_time)
    }

    /// Returns true when both break timestamps exist and the end precedes the start.
    pub fn has_inverted_break(&self) -> bool {
        match (self.break_start_time, self.break_end_time) {
            (Some(start), Some(end)) => end < start,
            _ => false,
        }
    }

    /// Length of the break, or zero when either timestamp is missing or inverted.
    pub fn break_duration(&self) -> TimeDelta {
        match (self.break_start_time, self.break_end_time) {
            (Some(start), Some(end)) => non_negative(end - start),
            _ => TimeDelta::zero(),
        }
    }

    /// Worked time for this entry: shift length minus break, never negative.
    ///
    /// Open shifts contribute nothing.
    ///
    /// # Examples
    ///
    /// ```
    /// use payroll_engine::models::TimeClockEntry;
    /// use chrono::{TimeDelta, TimeZone, Utc};
    ///
    /// let entry = TimeClockEntry {
    ///     id: None,
    ///     employee_id: "emp_001".to_string(),
    ///     clock_in_time: Utc.with_ymd_and_hms(2026, 1, 15, 9, 0, 0).unwrap(),
    ///     clock_out_time: Some(Utc.with_ymd_and_hms(2026, 1, 15, 18, 0, 0).unwrap()),
    ///     break_start_time: Some(Utc.with_ymd_and_hms(2026, 1, 15, 12, 0, 0).unwrap()),
    ///     break_end_time: Some(Utc.with_ymd_and_hms(2026, 1, 15, 12, 30, 0).unwrap()),
    /// };
    /// assert_eq!(entry.effective_duration(), TimeDelta::minutes(510));
    /// ```
    pub fn effective_duration(&self) -> TimeDelta {
        match self.clock_out_time {
            Some(out) => non_negative((out - self.clock_in_time) - self.break_duration()),
            None => TimeDelta::zero(),
        }
    }

    /// The calendar day this entry is attributed to.
    pub fn work_date(&self, boundary: DayBoundary) -> NaiveDate {
        boundary.date_of(self.clock_in_time)
    }
}
