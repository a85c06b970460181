//! Payroll result models.
//!
//! This module contains the [`PayrollResult`] type and its associated structures
//! that capture the output of the calculator for one employee: hour totals, pay,
//! per-day and per-week breakdowns, and the audit trace.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings flag punches that were coerced to a zero contribution; they never
/// stop the calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The complete audit trace for a calculation.
///
/// # Example
///
/// ```
/// use payroll_engine::models::AuditTrace;
///
/// let trace = AuditTrace::default();
/// assert!(trace.steps.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
}

impl AuditTrace {
    /// The number the next recorded step will carry.
    pub fn next_step_number(&self) -> u32 {
        self.steps.len() as u32 + 1
    }

    /// Appends a step, numbering it after the last recorded one.
    pub fn push_step(
        &mut self,
        rule_id: &str,
        rule_name: &str,
        input: serde_json::Value,
        output: serde_json::Value,
        reasoning: String,
    ) {
        let step_number = self.next_step_number();
        self.steps.push(AuditStep {
            step_number,
            rule_id: rule_id.to_string(),
            rule_name: rule_name.to_string(),
            input,
            output,
            reasoning,
        });
    }

    /// Appends a warning.
    pub fn warn(&mut self, code: &str, message: String, severity: &str) {
        self.warnings.push(AuditWarning {
            code: code.to_string(),
            message,
            severity: severity.to_string(),
        });
    }
}

/// Hours attributed to one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyBreakdown {
    /// The calendar day.
    pub date: NaiveDate,
    /// Total worked hours on the day.
    pub worked_hours: Decimal,
    /// Hours within the daily threshold, carried into the week pool.
    pub regular_hours: Decimal,
    /// Hours beyond the daily threshold.
    pub overtime_hours: Decimal,
}

/// Regular hours pooled into one ISO week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyBreakdown {
    /// `iso_year * 100 + iso_week`.
    pub week_key: i32,
    /// ISO week-numbering year.
    pub iso_year: i32,
    /// ISO week number (1-53).
    pub iso_week: u32,
    /// Daily-regular hours that fell in this week.
    pub regular_hours: Decimal,
    /// Hours of the pool beyond the weekly threshold.
    pub overtime_hours: Decimal,
}

/// The pay outcome for one employee over a reporting period.
///
/// Invariants: `regular_hours == worked_hours - overtime_hours`,
/// `overtime_hours == daily_overtime_hours + weekly_overtime_hours` and
/// `total_pay == base_pay + overtime_pay`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollResult {
    /// The employee the result is for.
    pub employee_id: String,
    /// All worked hours in the period.
    pub worked_hours: Decimal,
    /// Worked hours not counted as overtime.
    pub regular_hours: Decimal,
    /// Daily plus weekly overtime.
    pub overtime_hours: Decimal,
    /// Overtime from days over the daily threshold.
    pub daily_overtime_hours: Decimal,
    /// Overtime from weeks over the weekly threshold.
    pub weekly_overtime_hours: Decimal,
    /// Hourly rate used for pay; zero when the policy is incomplete.
    pub effective_hourly_rate: Decimal,
    /// Multiplier applied to overtime hours.
    pub overtime_multiplier: Decimal,
    /// Pay for regular hours.
    pub base_pay: Decimal,
    /// Pay for overtime hours.
    pub overtime_pay: Decimal,
    /// `base_pay + overtime_pay`.
    pub total_pay: Decimal,
    /// Per-day breakdown, ordered by date.
    pub days: Vec<DailyBreakdown>,
    /// Per-week breakdown, ordered by week key.
    pub weeks: Vec<WeeklyBreakdown>,
    /// Steps and warnings recorded while calculating.
    pub audit_trace: AuditTrace,
}
