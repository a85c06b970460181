//! The per-employee payroll calculator.
//!
//! [`calculate_payroll`] turns one employee's time-clock entries and pay
//! policy into regular hours, daily and weekly overtime, and pay. It performs
//! no I/O and never fails: bad punches contribute zero time and are reported
//! as warnings in the audit trace.

use std::collections::BTreeMap;

use chrono::{NaiveDate, TimeDelta};

use crate::models::{
    AuditTrace, DailyBreakdown, PayPolicy, PayrollResult, TimeClockEntry, WeeklyBreakdown,
    hours_from_duration,
};

use super::daily_overtime::detect_daily_overtime;
use super::pay::calculate_pay;
use super::rules::PayrollRules;
use super::weekly_overtime::{IsoWeekKey, detect_weekly_overtime};

/// Calculates pay for one employee over the entries supplied.
///
/// The caller is responsible for restricting `entries` to the reporting
/// window and to this employee. Entry order does not matter.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::{PayrollRules, calculate_payroll};
/// use payroll_engine::models::{PayPolicy, TimeClockEntry};
/// use chrono::{TimeZone, Utc};
/// use rust_decimal::Decimal;
///
/// let entry = TimeClockEntry {
///     id: None,
///     employee_id: "emp_001".to_string(),
///     clock_in_time: Utc.with_ymd_and_hms(2026, 1, 15, 9, 0, 0).unwrap(),
///     clock_out_time: Some(Utc.with_ymd_and_hms(2026, 1, 15, 19, 0, 0).unwrap()),
///     break_start_time: None,
///     break_end_time: None,
/// };
/// let policy = PayPolicy::hourly(Decimal::from(20));
///
/// let result = calculate_payroll("emp_001", &[entry], &policy, &PayrollRules::default());
/// assert_eq!(result.worked_hours, Decimal::from(10));
/// assert_eq!(result.overtime_hours, Decimal::from(1));
/// assert_eq!(result.total_pay, Decimal::from(210));
/// ```
pub fn calculate_payroll(
    employee_id: &str,
    entries: &[TimeClockEntry],
    policy: &PayPolicy,
    rules: &PayrollRules,
) -> PayrollResult {
    let mut trace = AuditTrace::default();

    // Per-entry durations, bucketed by work date.
    let mut daily_worked: BTreeMap<NaiveDate, TimeDelta> = BTreeMap::new();
    let mut total_worked = TimeDelta::zero();
    let mut open_entries = 0usize;
    let mut inverted_entries = 0usize;

    for entry in entries {
        let label = entry_label(entry);

        if entry.is_open() {
            open_entries += 1;
            trace.warn(
                "OPEN_SHIFT",
                format!(
                    "Entry {} clocked in at {} has no clock-out and contributes no time",
                    label, entry.clock_in_time
                ),
                "low",
            );
            continue;
        }
        if entry.has_inverted_shift() {
            inverted_entries += 1;
            trace.warn(
                "INVERTED_SHIFT",
                format!(
                    "Entry {} clocks out before it clocks in and contributes no time",
                    label
                ),
                "medium",
            );
            continue;
        }
        if entry.has_inverted_break() {
            trace.warn(
                "INVERTED_BREAK",
                format!("Entry {} has a break ending before it starts; break ignored", label),
                "low",
            );
        }

        let duration = entry.effective_duration();
        total_worked += duration;
        *daily_worked
            .entry(entry.work_date(rules.day_boundary))
            .or_insert_with(TimeDelta::zero) += duration;
    }

    trace.push_step(
        "entry_durations",
        "Entry Durations",
        serde_json::json!({
            "entry_count": entries.len(),
            "open_entries": open_entries,
            "inverted_entries": inverted_entries,
            "day_boundary": rules.day_boundary.to_string()
        }),
        serde_json::json!({
            "worked_hours": hours_from_duration(total_worked).normalize().to_string(),
            "days_worked": daily_worked.len()
        }),
        format!(
            "{} entries produced {} worked hours across {} days",
            entries.len(),
            hours_from_duration(total_worked).normalize(),
            daily_worked.len()
        ),
    );

    // Daily overtime, with residual regular time pooled per ISO week.
    let mut daily_overtime = TimeDelta::zero();
    let mut weekly_pool: BTreeMap<IsoWeekKey, TimeDelta> = BTreeMap::new();
    let mut days = Vec::with_capacity(daily_worked.len());

    for (&date, &worked) in &daily_worked {
        let detection =
            detect_daily_overtime(date, worked, rules.daily_threshold, trace.next_step_number());
        daily_overtime += detection.overtime;
        *weekly_pool
            .entry(IsoWeekKey::of(date))
            .or_insert_with(TimeDelta::zero) += detection.regular;

        days.push(DailyBreakdown {
            date,
            worked_hours: hours_from_duration(worked),
            regular_hours: hours_from_duration(detection.regular),
            overtime_hours: hours_from_duration(detection.overtime),
        });
        trace.steps.push(detection.audit_step);
    }

    // Weekly overtime on each pool.
    let mut weekly_overtime = TimeDelta::zero();
    let mut weeks = Vec::with_capacity(weekly_pool.len());

    for (&week, &pooled) in &weekly_pool {
        let detection =
            detect_weekly_overtime(week, pooled, rules.weekly_threshold, trace.next_step_number());
        weekly_overtime += detection.overtime;

        weeks.push(WeeklyBreakdown {
            week_key: week.value(),
            iso_year: week.iso_year,
            iso_week: week.iso_week,
            regular_hours: hours_from_duration(pooled),
            overtime_hours: hours_from_duration(detection.overtime),
        });
        trace.steps.push(detection.audit_step);
    }

    let worked_hours = hours_from_duration(total_worked);
    let daily_overtime_hours = hours_from_duration(daily_overtime);
    let weekly_overtime_hours = hours_from_duration(weekly_overtime);
    let overtime_hours = daily_overtime_hours + weekly_overtime_hours;
    let regular_hours = worked_hours - overtime_hours;

    if !policy.is_payable() {
        trace.warn(
            "MISSING_PAY_POLICY",
            format!(
                "Employee {} has no complete pay policy; pay is zero",
                employee_id
            ),
            "medium",
        );
    }

    let pay = calculate_pay(
        regular_hours,
        overtime_hours,
        policy,
        rules.default_overtime_multiplier,
        trace.next_step_number(),
    );
    if pay.overflowed {
        trace.warn(
            "PAY_OVERFLOW",
            format!(
                "Pay for employee {} exceeds the decimal range; pay is zero",
                employee_id
            ),
            "high",
        );
    }
    trace.steps.push(pay.audit_step);

    PayrollResult {
        employee_id: employee_id.to_string(),
        worked_hours,
        regular_hours,
        overtime_hours,
        daily_overtime_hours,
        weekly_overtime_hours,
        effective_hourly_rate: pay.effective_hourly_rate,
        overtime_multiplier: pay.overtime_multiplier,
        base_pay: pay.base_pay,
        overtime_pay: pay.overtime_pay,
        total_pay: pay.total_pay,
        days,
        weeks,
        audit_trace: trace,
    }
}

fn entry_label(entry: &TimeClockEntry) -> String {
    match &entry.id {
        Some(id) => format!("'{}'", id),
        None => format!("for {}", entry.employee_id),
    }
}
