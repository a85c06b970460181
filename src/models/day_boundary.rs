//! Calendar-day boundary used when bucketing clock-ins into days.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Where one working day ends and the next begins.
///
/// `Utc` matches the historical behaviour of the restaurant system, which keyed
/// days on the UTC date of the clock-in. `Offset` keys days on the restaurant's
/// local wall clock instead.
///
/// Serialised as `"utc"` or as a signed offset such as `"-03:00"`.
///
/// # Example
///
/// ```
/// use payroll_engine::models::DayBoundary;
/// use chrono::{TimeZone, Utc, NaiveDate};
///
/// let clock_in = Utc.with_ymd_and_hms(2026, 1, 15, 1, 30, 0).unwrap();
///
/// assert_eq!(
///     DayBoundary::Utc.date_of(clock_in),
///     NaiveDate::from_ymd_opt(2026, 1, 15).unwrap()
/// );
///
/// let sao_paulo: DayBoundary = "-03:00".parse().unwrap();
/// assert_eq!(
///     sao_paulo.date_of(clock_in),
///     NaiveDate::from_ymd_opt(2026, 1, 14).unwrap()
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum DayBoundary {
    /// Days start at UTC midnight.
    #[default]
    Utc,
    /// Days start at midnight of the given fixed offset.
    Offset(FixedOffset),
}

impl DayBoundary {
    /// Returns the calendar date a timestamp belongs to under this boundary.
    pub fn date_of(&self, timestamp: DateTime<Utc>) -> NaiveDate {
        match self {
            DayBoundary::Utc => timestamp.date_naive(),
            DayBoundary::Offset(offset) => timestamp.with_timezone(offset).date_naive(),
        }
    }
}

impl FromStr for DayBoundary {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("utc") || trimmed == "Z" {
            return Ok(DayBoundary::Utc);
        }

        let invalid = || EngineError::InvalidOffset {
            value: s.to_string(),
        };

        let (sign, rest) = match trimmed.chars().next() {
            Some('+') => (1, &trimmed[1..]),
            Some('-') => (-1, &trimmed[1..]),
            _ => return Err(invalid()),
        };
        let (hours, minutes) = rest.split_once(':').ok_or_else(invalid)?;
        let hours: i32 = hours.parse().map_err(|_| invalid())?;
        let minutes: i32 = minutes.parse().map_err(|_| invalid())?;
        if !(0..60).contains(&minutes) {
            return Err(invalid());
        }

        FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
            .map(DayBoundary::Offset)
            .ok_or_else(invalid)
    }
}

impl fmt::Display for DayBoundary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DayBoundary::Utc => write!(f, "utc"),
            DayBoundary::Offset(offset) => {
                let seconds = offset.local_minus_utc();
                let sign = if seconds < 0 { '-' } else { '+' };
                let seconds = seconds.abs();
                write!(f, "{}{:02}:{:02}", sign, seconds / 3600, (seconds % 3600) / 60)
            }
        }
    }
}

impl TryFrom<String> for DayBoundary {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DayBoundary> for String {
    fn from(boundary: DayBoundary) -> Self {
        boundary.to_string()
    }
}
