//! Daily overtime detection functionality.
//!
//! This module splits the time worked on one calendar day into the portion
//! that stays regular (up to the daily threshold) and the portion that is
//! daily overtime.

use chrono::{NaiveDate, TimeDelta};

use crate::models::{AuditStep, hours_from_duration};

/// The result of detecting daily overtime for one calendar day.
///
/// Contains the split between regular and overtime time, along with the
/// audit step documenting the detection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyOvertimeDetection {
    /// Time within the threshold; this is what flows into the weekly pool.
    pub regular: TimeDelta,
    /// Time exceeding the threshold.
    pub overtime: TimeDelta,
    /// The audit step recording this detection.
    pub audit_step: AuditStep,
}

/// Detects whether time worked on a day exceeds the daily overtime threshold.
///
/// # Arguments
///
/// * `date` - The calendar day the time is attributed to
/// * `worked` - Total time worked on that day
/// * `threshold` - The daily overtime threshold (9 hours by default)
/// * `step_number` - The step number for audit trail sequencing
///
/// # Examples
///
/// ## Day at threshold (no overtime)
///
/// ```
/// use payroll_engine::calculation::detect_daily_overtime;
/// use chrono::{NaiveDate, TimeDelta};
///
/// let date = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
/// let result = detect_daily_overtime(date, TimeDelta::hours(9), TimeDelta::hours(9), 1);
///
/// assert_eq!(result.regular, TimeDelta::hours(9));
/// assert_eq!(result.overtime, TimeDelta::zero());
/// ```
///
/// ## Day exceeding threshold
///
/// ```
/// use payroll_engine::calculation::detect_daily_overtime;
/// use chrono::{NaiveDate, TimeDelta};
///
/// let date = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
/// let result = detect_daily_overtime(date, TimeDelta::hours(10), TimeDelta::hours(9), 1);
///
/// assert_eq!(result.regular, TimeDelta::hours(9));
/// assert_eq!(result.overtime, TimeDelta::hours(1));
/// ```
pub fn detect_daily_overtime(
    date: NaiveDate,
    worked: TimeDelta,
    threshold: TimeDelta,
    step_number: u32,
) -> DailyOvertimeDetection {
    let overtime = (worked - threshold).max(TimeDelta::zero());
    let regular = worked - overtime;

    let worked_hours = hours_from_duration(worked).normalize();
    let threshold_hours = hours_from_duration(threshold).normalize();
    let overtime_hours = hours_from_duration(overtime).normalize();
    let regular_hours = hours_from_duration(regular).normalize();

    let reasoning = if overtime > TimeDelta::zero() {
        format!(
            "{} hours worked on {} exceeds {} hour threshold by {} hours, triggering daily overtime",
            worked_hours, date, threshold_hours, overtime_hours
        )
    } else if worked == threshold {
        format!(
            "{} hours worked on {} equals {} hour threshold, no daily overtime triggered",
            worked_hours, date, threshold_hours
        )
    } else {
        format!(
            "{} hours worked on {} is under {} hour threshold, no daily overtime triggered",
            worked_hours, date, threshold_hours
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "daily_overtime_detection".to_string(),
        rule_name: "Daily Overtime Detection".to_string(),
        input: serde_json::json!({
            "date": date.to_string(),
            "worked_hours": worked_hours.to_string(),
            "threshold": threshold_hours.to_string()
        }),
        output: serde_json::json!({
            "regular_hours": regular_hours.to_string(),
            "overtime_hours": overtime_hours.to_string()
        }),
        reasoning,
    };

    DailyOvertimeDetection {
        regular,
        overtime,
        audit_step,
    }
}
