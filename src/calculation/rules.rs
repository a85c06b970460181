//! Tunable parameters for the payroll calculator.

use chrono::TimeDelta;
use rust_decimal::Decimal;

use crate::models::{DEFAULT_OVERTIME_MULTIPLIER, DayBoundary};

/// Hours per day before daily overtime starts.
pub const DEFAULT_DAILY_OVERTIME_THRESHOLD_HOURS: i64 = 9;

/// Daily-regular hours per ISO week before weekly overtime starts.
pub const DEFAULT_WEEKLY_OVERTIME_THRESHOLD_HOURS: i64 = 44;

/// Thresholds, default multiplier and day boundary used by
/// [`calculate_payroll`](super::calculate_payroll).
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::PayrollRules;
/// use chrono::TimeDelta;
///
/// let rules = PayrollRules::default();
/// assert_eq!(rules.daily_threshold, TimeDelta::hours(9));
/// assert_eq!(rules.weekly_threshold, TimeDelta::hours(44));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PayrollRules {
    /// Worked time per day beyond which hours are daily overtime.
    pub daily_threshold: TimeDelta,
    /// Pooled regular time per ISO week beyond which hours are weekly overtime.
    pub weekly_threshold: TimeDelta,
    /// Multiplier applied when the pay policy does not set one.
    pub default_overtime_multiplier: Decimal,
    /// How clock-in timestamps map to calendar days.
    pub day_boundary: DayBoundary,
}

impl Default for PayrollRules {
    fn default() -> Self {
        Self {
            daily_threshold: TimeDelta::hours(DEFAULT_DAILY_OVERTIME_THRESHOLD_HOURS),
            weekly_threshold: TimeDelta::hours(DEFAULT_WEEKLY_OVERTIME_THRESHOLD_HOURS),
            default_overtime_multiplier: DEFAULT_OVERTIME_MULTIPLIER,
            day_boundary: DayBoundary::Utc,
        }
    }
}
