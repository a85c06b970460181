//! Calculation logic for the payroll engine.
//!
//! This module contains the per-employee calculator (entry durations, daily
//! overtime over 9 hours, weekly overtime over 44 pooled hours per ISO week,
//! and pay), along with the payroll run, scheduled hours and the payslip
//! built on top of it.

mod daily_overtime;
mod pay;
mod payroll;
mod payroll_run;
mod payslip;
mod rules;
mod schedule;
mod weekly_overtime;

pub use daily_overtime::{DailyOvertimeDetection, detect_daily_overtime};
pub use pay::{PayCalculation, calculate_pay};
pub use payroll::calculate_payroll;
pub use payroll_run::run_payroll;
pub use payslip::{DEFAULT_INSS_RATE, DEFAULT_VT_RATE, DeductionRates, build_payslip};
pub use rules::{
    DEFAULT_DAILY_OVERTIME_THRESHOLD_HOURS, DEFAULT_WEEKLY_OVERTIME_THRESHOLD_HOURS, PayrollRules,
};
pub use schedule::scheduled_hours;
pub use weekly_overtime::{IsoWeekKey, WeeklyOvertimeDetection, detect_weekly_overtime};
