//! Core data models for the payroll engine.
//!
//! This module contains all the domain models used throughout the engine.

mod day_boundary;
mod employee;
mod pay_policy;
mod payroll_report;
mod payroll_result;
mod reporting_period;
mod scheduled_shift;
mod time_clock_entry;

pub use day_boundary::DayBoundary;
pub use employee::Employee;
pub use pay_policy::{DEFAULT_OVERTIME_MULTIPLIER, MONTHLY_HOURS_DIVISOR, PayPolicy, SalaryType};
pub use payroll_report::{Deduction, EmployeePayrollLine, PayrollReport, Payslip, ReportTotals};
pub use payroll_result::{
    AuditStep, AuditTrace, AuditWarning, DailyBreakdown, PayrollResult, WeeklyBreakdown,
};
pub use reporting_period::ReportingPeriod;
pub use scheduled_shift::ScheduledShift;
pub use time_clock_entry::{HOURS_DECIMAL_PLACES, TimeClockEntry, hours_from_duration};
