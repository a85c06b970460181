//! Reporting period model.
//!
//! This module contains the [`ReportingPeriod`] type that bounds a payroll run.

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// An inclusive date window a payroll run covers.
///
/// # Example
///
/// ```
/// use payroll_engine::models::ReportingPeriod;
/// use chrono::NaiveDate;
///
/// let february = ReportingPeriod::month(2026, 2).unwrap();
/// assert_eq!(february.end_date, NaiveDate::from_ymd_opt(2026, 2, 28).unwrap());
/// assert!(february.contains_date(NaiveDate::from_ymd_opt(2026, 2, 1).unwrap()));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportingPeriod {
    /// The first day of the period (inclusive).
    pub start_date: NaiveDate,
    /// The last day of the period (inclusive).
    pub end_date: NaiveDate,
}

impl ReportingPeriod {
    /// Creates a period, rejecting a start after the end.
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> EngineResult<Self> {
        if start_date > end_date {
            return Err(EngineError::InvalidPeriod {
                start: start_date,
                end: end_date,
            });
        }
        Ok(Self {
            start_date,
            end_date,
        })
    }

    /// The calendar month `month` of `year`, or `None` for an invalid month.
    pub fn month(year: i32, month: u32) -> Option<Self> {
        let start_date = NaiveDate::from_ymd_opt(year, month, 1)?;
        let end_date = start_date.checked_add_months(Months::new(1))?.pred_opt()?;
        Some(Self {
            start_date,
            end_date,
        })
    }

    /// Checks if a date falls within the period, inclusive of both ends.
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }
}
