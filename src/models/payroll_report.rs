//! Payroll report and payslip models.
//!
//! These are the downstream views built on top of [`PayrollResult`]: the
//! period report listing every paid employee, and the per-employee payslip
//! with simulated deductions.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{PayrollResult, ReportingPeriod};

/// One employee's row in the payroll report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeePayrollLine {
    /// Display name of the employee.
    pub employee_name: String,
    /// Job role, when known.
    #[serde(default)]
    pub role: Option<String>,
    /// Planned hours from the schedule (display only).
    pub scheduled_hours: Decimal,
    /// The calculator's output.
    pub payroll: PayrollResult,
}

/// Sums across every line of a report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportTotals {
    /// Number of employees in the report.
    pub employee_count: usize,
    /// Sum of scheduled hours.
    pub scheduled_hours: Decimal,
    /// Sum of worked hours.
    pub worked_hours: Decimal,
    /// Sum of overtime hours.
    pub overtime_hours: Decimal,
    /// Sum of base pay.
    pub base_pay: Decimal,
    /// Sum of overtime pay.
    pub overtime_pay: Decimal,
    /// Sum of total pay.
    pub total_pay: Decimal,
    /// Set when a line's amounts could not be added without overflowing.
    #[serde(default)]
    pub overflowed: bool,
}

impl ReportTotals {
    /// Adds a line to the totals.
    ///
    /// The sums are updated together or not at all. Returns false when any
    /// of them would overflow, in which case only the employee count moves
    /// and `overflowed` is set.
    pub fn add_line(&mut self, line: &EmployeePayrollLine) -> bool {
        self.employee_count += 1;

        let payroll = &line.payroll;
        let sums = (|| {
            Some((
                self.scheduled_hours.checked_add(line.scheduled_hours)?,
                self.worked_hours.checked_add(payroll.worked_hours)?,
                self.overtime_hours.checked_add(payroll.overtime_hours)?,
                self.base_pay.checked_add(payroll.base_pay)?,
                self.overtime_pay.checked_add(payroll.overtime_pay)?,
                self.total_pay.checked_add(payroll.total_pay)?,
            ))
        })();

        match sums {
            Some((scheduled, worked, overtime, base, overtime_pay, total)) => {
                self.scheduled_hours = scheduled;
                self.worked_hours = worked;
                self.overtime_hours = overtime;
                self.base_pay = base;
                self.overtime_pay = overtime_pay;
                self.total_pay = total;
                true
            }
            None => {
                self.overflowed = true;
                false
            }
        }
    }
}

/// The output of a payroll run over a reporting period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollReport {
    /// Unique identifier for this run.
    pub calculation_id: Uuid,
    /// When the run was performed.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that performed the run.
    pub engine_version: String,
    /// The period covered.
    pub period: ReportingPeriod,
    /// Employees with worked or scheduled hours, ordered by name.
    pub lines: Vec<EmployeePayrollLine>,
    /// Aggregated totals.
    pub totals: ReportTotals,
    /// Run duration in microseconds.
    pub duration_us: u64,
}

/// A simulated payroll deduction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deduction {
    /// Short code (e.g. "inss", "vt").
    pub code: String,
    /// Human-readable description.
    pub description: String,
    /// Fraction of gross pay withheld.
    pub rate: Decimal,
    /// Amount withheld, rounded to cents.
    pub amount: Decimal,
}

/// A payslip breakdown for one employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payslip {
    /// The employee the payslip is for.
    pub employee_id: String,
    /// Regular hours paid.
    pub regular_hours: Decimal,
    /// Overtime hours paid.
    pub overtime_hours: Decimal,
    /// Base pay, rounded to cents.
    pub base_pay: Decimal,
    /// Overtime pay, rounded to cents.
    pub overtime_pay: Decimal,
    /// Gross pay, rounded to cents.
    pub gross_pay: Decimal,
    /// Deductions applied to gross pay.
    pub deductions: Vec<Deduction>,
    /// Sum of all deductions.
    pub total_deductions: Decimal,
    /// `gross_pay - total_deductions`.
    pub net_pay: Decimal,
}
