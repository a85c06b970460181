//! Payslip breakdown with simulated deductions.
//!
//! Deductions are flat percentages of gross pay; this is a preview for the
//! employee, not a statutory tax computation.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::models::{Deduction, PayrollResult, Payslip};

/// Default INSS (social security) rate.
pub const DEFAULT_INSS_RATE: Decimal = Decimal::from_parts(9, 0, 0, false, 2);

/// Default VT (transport voucher) rate.
pub const DEFAULT_VT_RATE: Decimal = Decimal::from_parts(6, 0, 0, false, 2);

/// Deduction rates applied to gross pay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionRates {
    /// Fraction withheld for INSS.
    #[serde(default = "default_inss_rate")]
    pub inss_rate: Decimal,
    /// Fraction withheld for VT.
    #[serde(default = "default_vt_rate")]
    pub vt_rate: Decimal,
}

fn default_inss_rate() -> Decimal {
    DEFAULT_INSS_RATE
}

fn default_vt_rate() -> Decimal {
    DEFAULT_VT_RATE
}

impl Default for DeductionRates {
    fn default() -> Self {
        Self {
            inss_rate: DEFAULT_INSS_RATE,
            vt_rate: DEFAULT_VT_RATE,
        }
    }
}

fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Builds a payslip from a calculated result.
///
/// Money is rounded to cents, half away from zero. Gross pay is the rounded
/// sum of base and overtime pay, so it may differ by a cent from the sum of
/// the two rounded parts.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::{
///     DeductionRates, PayrollRules, build_payslip, calculate_payroll,
/// };
/// use payroll_engine::models::PayPolicy;
/// use rust_decimal::Decimal;
///
/// let policy = PayPolicy::hourly(Decimal::from(20));
/// let result = calculate_payroll("emp_001", &[], &policy, &PayrollRules::default());
/// let payslip = build_payslip(&result, &DeductionRates::default());
///
/// assert_eq!(payslip.net_pay, Decimal::ZERO);
/// ```
pub fn build_payslip(result: &PayrollResult, rates: &DeductionRates) -> Payslip {
    let gross_pay = round_money(result.total_pay);

    let deductions = vec![
        Deduction {
            code: "inss".to_string(),
            description: "INSS social security".to_string(),
            rate: rates.inss_rate,
            amount: round_money(gross_pay * rates.inss_rate),
        },
        Deduction {
            code: "vt".to_string(),
            description: "VT transport voucher".to_string(),
            rate: rates.vt_rate,
            amount: round_money(gross_pay * rates.vt_rate),
        },
    ];
    let total_deductions: Decimal = deductions.iter().map(|d| d.amount).sum();

    Payslip {
        employee_id: result.employee_id.clone(),
        regular_hours: result.regular_hours,
        overtime_hours: result.overtime_hours,
        base_pay: round_money(result.base_pay),
        overtime_pay: round_money(result.overtime_pay),
        gross_pay,
        deductions,
        total_deductions,
        net_pay: gross_pay - total_deductions,
    }
}
