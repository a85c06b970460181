//! Pay calculation from regular and overtime hours.

use rust_decimal::Decimal;

use crate::models::{AuditStep, MONTHLY_HOURS_DIVISOR, PayPolicy, SalaryType};

/// The result of pricing an employee's hours.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayCalculation {
    /// Hourly rate applied; zero when the policy is incomplete.
    pub effective_hourly_rate: Decimal,
    /// Multiplier applied to overtime hours.
    pub overtime_multiplier: Decimal,
    /// `regular_hours * effective_hourly_rate`.
    pub base_pay: Decimal,
    /// `overtime_hours * effective_hourly_rate * overtime_multiplier`.
    pub overtime_pay: Decimal,
    /// `base_pay + overtime_pay`.
    pub total_pay: Decimal,
    /// True when pricing overflowed the decimal range and nothing was paid.
    pub overflowed: bool,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Prices regular and overtime hours under a pay policy.
///
/// Monthly salaries are converted to an hourly rate over a fixed 220-hour
/// month. A policy missing either its salary type or its rate pays nothing,
/// and so does one whose amounts overflow the decimal range. Amounts are not
/// rounded here.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_pay;
/// use payroll_engine::models::{DEFAULT_OVERTIME_MULTIPLIER, PayPolicy};
/// use rust_decimal::Decimal;
///
/// let policy = PayPolicy::hourly(Decimal::from(20));
/// let pay = calculate_pay(
///     Decimal::ZERO,
///     Decimal::from(2),
///     &policy,
///     DEFAULT_OVERTIME_MULTIPLIER,
///     1,
/// );
///
/// assert_eq!(pay.overtime_pay, Decimal::from(60));
/// ```
pub fn calculate_pay(
    regular_hours: Decimal,
    overtime_hours: Decimal,
    policy: &PayPolicy,
    default_multiplier: Decimal,
    step_number: u32,
) -> PayCalculation {
    let overtime_multiplier = policy.overtime_multiplier_or(default_multiplier);

    let effective_hourly_rate = policy.effective_hourly_rate().unwrap_or(Decimal::ZERO);
    let mut reasoning = match (policy.salary_type, policy.salary_rate) {
        (Some(SalaryType::Monthly), Some(salary)) => format!(
            "Monthly salary {} / {} hours = {} per hour",
            salary.normalize(),
            MONTHLY_HOURS_DIVISOR,
            effective_hourly_rate.normalize()
        ),
        (Some(SalaryType::Hourly), Some(rate)) => {
            format!("Hourly rate {} per hour", rate.normalize())
        }
        _ => "Pay policy is missing salary type or rate, no pay calculated".to_string(),
    };

    let priced = price_hours(
        regular_hours,
        overtime_hours,
        effective_hourly_rate,
        overtime_multiplier,
    );
    let overflowed = priced.is_none();
    let (base_pay, overtime_pay, total_pay) =
        priced.unwrap_or((Decimal::ZERO, Decimal::ZERO, Decimal::ZERO));
    if overflowed {
        reasoning.push_str("; pay exceeds the decimal range, no pay calculated");
    }

    let audit_step = AuditStep {
        step_number,
        rule_id: "pay_calculation".to_string(),
        rule_name: "Pay Calculation".to_string(),
        input: serde_json::json!({
            "salary_type": policy.salary_type.map(|t| t.to_string()),
            "salary_rate": policy.salary_rate.map(|r| r.normalize().to_string()),
            "regular_hours": regular_hours.normalize().to_string(),
            "overtime_hours": overtime_hours.normalize().to_string(),
            "overtime_multiplier": overtime_multiplier.normalize().to_string()
        }),
        output: serde_json::json!({
            "effective_hourly_rate": effective_hourly_rate.normalize().to_string(),
            "base_pay": base_pay.normalize().to_string(),
            "overtime_pay": overtime_pay.normalize().to_string(),
            "total_pay": total_pay.normalize().to_string(),
            "overflowed": overflowed
        }),
        reasoning,
    };

    PayCalculation {
        effective_hourly_rate,
        overtime_multiplier,
        base_pay,
        overtime_pay,
        total_pay,
        overflowed,
        audit_step,
    }
}

/// Returns `(base, overtime, total)`, or `None` on overflow.
fn price_hours(
    regular_hours: Decimal,
    overtime_hours: Decimal,
    rate: Decimal,
    multiplier: Decimal,
) -> Option<(Decimal, Decimal, Decimal)> {
    let base_pay = regular_hours.checked_mul(rate)?;
    let overtime_pay = overtime_hours.checked_mul(rate)?.checked_mul(multiplier)?;
    let total_pay = base_pay.checked_add(overtime_pay)?;
    Some((base_pay, overtime_pay, total_pay))
}
