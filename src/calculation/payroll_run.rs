//! Payroll runs over a reporting period.
//!
//! A run drives [`calculate_payroll`] across every employee of a restaurant,
//! attaches scheduled hours for display, drops employees with nothing to
//! report and sums the totals.

use std::collections::{HashMap, HashSet};
use std::time::Instant;

use chrono::Utc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::models::{
    Employee, EmployeePayrollLine, PayrollReport, ReportTotals, ReportingPeriod, ScheduledShift,
    TimeClockEntry,
};

use super::payroll::calculate_payroll;
use super::rules::PayrollRules;
use super::schedule::scheduled_hours;

/// Runs payroll for `employees` over `period`.
///
/// Entries are kept when the work date of their clock-in (under the rules'
/// day boundary) lies inside the period. Entries for employees not in
/// `employees` are skipped with a warning. Employees with neither worked nor
/// scheduled hours are left out of the report. Lines are ordered by employee
/// name, then id.
pub fn run_payroll(
    period: ReportingPeriod,
    employees: &[Employee],
    entries: &[TimeClockEntry],
    schedule: &[ScheduledShift],
    rules: &PayrollRules,
) -> PayrollReport {
    let start_time = Instant::now();
    let calculation_id = Uuid::new_v4();

    let mut entries_by_employee: HashMap<&str, Vec<TimeClockEntry>> = HashMap::new();
    for employee in employees {
        if entries_by_employee
            .insert(employee.id.as_str(), Vec::new())
            .is_some()
        {
            warn!(
                calculation_id = %calculation_id,
                employee_id = %employee.id,
                "Duplicate employee in payroll run, using first occurrence"
            );
        }
    }

    let mut outside_period = 0usize;
    for entry in entries {
        if !period.contains_date(entry.work_date(rules.day_boundary)) {
            outside_period += 1;
            continue;
        }
        match entries_by_employee.get_mut(entry.employee_id.as_str()) {
            Some(bucket) => bucket.push(entry.clone()),
            None => warn!(
                calculation_id = %calculation_id,
                employee_id = %entry.employee_id,
                "Time-clock entry for unknown employee ignored"
            ),
        }
    }
    if outside_period > 0 {
        debug!(
            calculation_id = %calculation_id,
            skipped = outside_period,
            "Entries outside reporting period skipped"
        );
    }

    let mut lines = Vec::with_capacity(employees.len());
    let mut seen = HashSet::new();

    for employee in employees {
        if !seen.insert(employee.id.as_str()) {
            continue;
        }
        let employee_entries = entries_by_employee
            .get(employee.id.as_str())
            .map(Vec::as_slice)
            .unwrap_or_default();
        let planned = scheduled_hours(
            schedule.iter().filter(|s| s.employee_id == employee.id),
            &period,
        );

        let payroll = calculate_payroll(
            &employee.id,
            employee_entries,
            &employee.pay_policy,
            rules,
        );

        if payroll.worked_hours.is_zero() && planned.is_zero() {
            debug!(
                calculation_id = %calculation_id,
                employee_id = %employee.id,
                "Employee has no worked or scheduled hours, omitted from report"
            );
            continue;
        }

        lines.push(EmployeePayrollLine {
            employee_name: employee.name.clone(),
            role: employee.role.clone(),
            scheduled_hours: planned,
            payroll,
        });
    }

    lines.sort_by(|a, b| {
        a.employee_name
            .cmp(&b.employee_name)
            .then_with(|| a.payroll.employee_id.cmp(&b.payroll.employee_id))
    });

    let mut totals = ReportTotals::default();
    for line in &lines {
        if !totals.add_line(line) {
            warn!(
                calculation_id = %calculation_id,
                employee_id = %line.payroll.employee_id,
                "Report totals overflowed, line left out of the sums"
            );
        }
    }

    let duration_us = start_time.elapsed().as_micros() as u64;

    info!(
        calculation_id = %calculation_id,
        period_start = %period.start_date,
        period_end = %period.end_date,
        employee_count = totals.employee_count,
        total_pay = %totals.total_pay,
        duration_us = duration_us,
        "Payroll run completed"
    );

    PayrollReport {
        calculation_id,
        timestamp: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        period,
        lines,
        totals,
        duration_us,
    }
}
