//! Weekly overtime detection over ISO-8601 weeks.
//!
//! Regular time left over after daily overtime is pooled per ISO week; any
//! pooled time beyond the weekly threshold becomes weekly overtime.

use std::fmt;

use chrono::{Datelike, NaiveDate, TimeDelta};

use crate::models::{AuditStep, hours_from_duration};

/// An ISO-8601 week, ordered chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IsoWeekKey {
    /// ISO week-numbering year (may differ from the calendar year near January 1).
    pub iso_year: i32,
    /// Week number, 1 to 53.
    pub iso_week: u32,
}

impl IsoWeekKey {
    /// The ISO week containing `date`.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::calculation::IsoWeekKey;
    /// use chrono::NaiveDate;
    ///
    /// // Friday 1 January 2027 belongs to the last week of 2026.
    /// let key = IsoWeekKey::of(NaiveDate::from_ymd_opt(2027, 1, 1).unwrap());
    /// assert_eq!(key.value(), 202653);
    /// ```
    pub fn of(date: NaiveDate) -> Self {
        let week = date.iso_week();
        Self {
            iso_year: week.year(),
            iso_week: week.week(),
        }
    }

    /// The numeric key `iso_year * 100 + iso_week`.
    pub fn value(&self) -> i32 {
        self.iso_year * 100 + self.iso_week as i32
    }
}

impl fmt::Display for IsoWeekKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-W{:02}", self.iso_year, self.iso_week)
    }
}

/// The result of detecting weekly overtime for one ISO week.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeeklyOvertimeDetection {
    /// Pooled time within the weekly threshold.
    pub regular: TimeDelta,
    /// Pooled time beyond the weekly threshold.
    pub overtime: TimeDelta,
    /// The audit step recording this detection.
    pub audit_step: AuditStep,
}

/// Detects weekly overtime on one week's pool of daily-regular time.
///
/// Only time that was not already daily overtime belongs in `pooled`, so no
/// hour is counted twice.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::{IsoWeekKey, detect_weekly_overtime};
/// use chrono::{NaiveDate, TimeDelta};
///
/// let week = IsoWeekKey::of(NaiveDate::from_ymd_opt(2026, 1, 12).unwrap());
/// let result = detect_weekly_overtime(week, TimeDelta::hours(45), TimeDelta::hours(44), 1);
///
/// assert_eq!(result.overtime, TimeDelta::hours(1));
/// ```
pub fn detect_weekly_overtime(
    week: IsoWeekKey,
    pooled: TimeDelta,
    threshold: TimeDelta,
    step_number: u32,
) -> WeeklyOvertimeDetection {
    let overtime = (pooled - threshold).max(TimeDelta::zero());
    let regular = pooled - overtime;

    let pooled_hours = hours_from_duration(pooled).normalize();
    let threshold_hours = hours_from_duration(threshold).normalize();
    let overtime_hours = hours_from_duration(overtime).normalize();

    let reasoning = if overtime > TimeDelta::zero() {
        format!(
            "{} regular hours in week {} exceed {} hour threshold by {} hours, triggering weekly overtime",
            pooled_hours, week, threshold_hours, overtime_hours
        )
    } else {
        format!(
            "{} regular hours in week {} within {} hour threshold, no weekly overtime triggered",
            pooled_hours, week, threshold_hours
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "weekly_overtime_detection".to_string(),
        rule_name: "Weekly Overtime Detection".to_string(),
        input: serde_json::json!({
            "week_key": week.value(),
            "pooled_regular_hours": pooled_hours.to_string(),
            "threshold": threshold_hours.to_string()
        }),
        output: serde_json::json!({
            "regular_hours": hours_from_duration(regular).normalize().to_string(),
            "overtime_hours": overtime_hours.to_string()
        }),
        reasoning,
    };

    WeeklyOvertimeDetection {
        regular,
        overtime,
        audit_step,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn week() -> IsoWeekKey {
        IsoWeekKey::of(date(2026, 1, 14))
    }

    // ==========================================================================
    // ISO week keys
    // ==========================================================================
    #[test]
    fn test_week_key_mid_year() {
        // Wednesday 14 January 2026 is in ISO week 3.
        assert_eq!(week().value(), 202603);
        assert_eq!(week().to_string(), "2026-W03");
    }

    #[test]
    fn test_week_key_early_january_belongs_to_previous_year() {
        // Sunday 1 January 2023 is the last day of 2022-W52.
        let key = IsoWeekKey::of(date(2023, 1, 1));
        assert_eq!(key.iso_year, 2022);
        assert_eq!(key.iso_week, 52);
    }

    #[test]
    fn test_week_key_late_december_belongs_to_next_year() {
        // Monday 29 December 2025 starts 2026-W01.
        let key = IsoWeekKey::of(date(2025, 12, 29));
        assert_eq!(key.value(), 202601);
    }

    #[test]
    fn test_week_53() {
        // 2026 has 53 ISO weeks; Thursday 31 December 2026 is in W53.
        assert_eq!(IsoWeekKey::of(date(2026, 12, 31)).value(), 202653);
    }

    #[test]
    fn test_monday_and_sunday_share_a_week() {
        assert_eq!(
            IsoWeekKey::of(date(2026, 1, 12)),
            IsoWeekKey::of(date(2026, 1, 18))
        );
        assert_ne!(
            IsoWeekKey::of(date(2026, 1, 18)),
            IsoWeekKey::of(date(2026, 1, 19))
        );
    }

    #[test]
    fn test_keys_order_chronologically() {
        assert!(IsoWeekKey::of(date(2025, 12, 22)) < IsoWeekKey::of(date(2025, 12, 29)));
    }

    // ==========================================================================
    // Detection
    // ==========================================================================
    #[test]
    fn test_45_hours_1_hour_weekly_overtime() {
        let result = detect_weekly_overtime(week(), TimeDelta::hours(45), TimeDelta::hours(44), 1);

        assert_eq!(result.regular, TimeDelta::hours(44));
        assert_eq!(result.overtime, TimeDelta::hours(1));
        assert_eq!(result.audit_step.rule_id, "weekly_overtime_detection");
        assert_eq!(result.audit_step.input["week_key"], 202603);
        assert!(result.audit_step.reasoning.contains("exceed"));
    }

    #[test]
    fn test_exactly_44_hours_no_overtime() {
        let result = detect_weekly_overtime(week(), TimeDelta::hours(44), TimeDelta::hours(44), 2);

        assert_eq!(result.overtime, TimeDelta::zero());
        assert_eq!(result.audit_step.step_number, 2);
        assert!(result.audit_step.reasoning.contains("no weekly overtime"));
    }

    #[test]
    fn test_empty_pool() {
        let result = detect_weekly_overtime(week(), TimeDelta::zero(), TimeDelta::hours(44), 1);

        assert_eq!(result.regular, TimeDelta::zero());
        assert_eq!(result.overtime, TimeDelta::zero());
    }
}
