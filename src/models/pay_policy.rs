//! Pay policy model.
//!
//! Holds how an employee is paid: monthly salary or hourly rate, plus the
//! overtime multiplier.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Overtime multiplier applied when the policy does not set one (150%).
pub const DEFAULT_OVERTIME_MULTIPLIER: Decimal = Decimal::from_parts(15, 0, 0, false, 1);

/// Standard hours in a month used to turn a monthly salary into an hourly rate.
pub const MONTHLY_HOURS_DIVISOR: Decimal = Decimal::from_parts(220, 0, 0, false, 0);

/// How an employee's salary rate is expressed.
///
/// Serialised with the literals stored by the restaurant back office.
///
/// # Example
///
/// ```
/// use payroll_engine::models::SalaryType;
///
/// assert_eq!("mensal".parse::<SalaryType>().unwrap(), SalaryType::Monthly);
/// assert_eq!(SalaryType::Hourly.to_string(), "horista");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SalaryType {
    /// `salary_rate` is a monthly amount.
    #[serde(rename = "mensal")]
    Monthly,
    /// `salary_rate` is paid per hour.
    #[serde(rename = "horista")]
    Hourly,
}

impl FromStr for SalaryType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mensal" => Ok(SalaryType::Monthly),
            "horista" => Ok(SalaryType::Hourly),
            other => Err(format!("unknown salary type: {}", other)),
        }
    }
}

impl fmt::Display for SalaryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SalaryType::Monthly => write!(f, "mensal"),
            SalaryType::Hourly => write!(f, "horista"),
        }
    }
}

/// An employee's pay policy.
///
/// Every field is optional because the source rows may be incomplete; a
/// policy without a type or rate yields zero pay.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayPolicy {
    /// Monthly or hourly.
    #[serde(default)]
    pub salary_type: Option<SalaryType>,
    /// Monthly salary or hourly rate, depending on `salary_type`.
    #[serde(default)]
    pub salary_rate: Option<Decimal>,
    /// Multiplier applied to the hourly rate for overtime hours.
    #[serde(
        default,
        rename = "overtime_rate_multiplier",
        alias = "overtime_multiplier"
    )]
    pub overtime_multiplier: Option<Decimal>,
}

impl PayPolicy {
    /// Creates a monthly policy.
    pub fn monthly(salary: Decimal) -> Self {
        Self {
            salary_type: Some(SalaryType::Monthly),
            salary_rate: Some(salary),
            overtime_multiplier: None,
        }
    }

    /// Creates an hourly policy.
    pub fn hourly(rate: Decimal) -> Self {
        Self {
            salary_type: Some(SalaryType::Hourly),
            salary_rate: Some(rate),
            overtime_multiplier: None,
        }
    }

    /// Sets the overtime multiplier.
    pub fn with_overtime_multiplier(mut self, multiplier: Decimal) -> Self {
        self.overtime_multiplier = Some(multiplier);
        self
    }

    /// Returns true when both salary type and rate are present.
    pub fn is_payable(&self) -> bool {
        self.salary_type.is_some() && self.salary_rate.is_some()
    }

    /// The overtime multiplier, falling back to `default` when unset.
    pub fn overtime_multiplier_or(&self, default: Decimal) -> Decimal {
        self.overtime_multiplier.unwrap_or(default)
    }

    /// The hourly rate this policy pays, or `None` when the policy is incomplete.
    ///
    /// Monthly salaries are divided by [`MONTHLY_HOURS_DIVISOR`].
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::models::PayPolicy;
    /// use rust_decimal::Decimal;
    ///
    /// let policy = PayPolicy::monthly(Decimal::from(2200));
    /// assert_eq!(policy.effective_hourly_rate(), Some(Decimal::from(10)));
    /// ```
    pub fn effective_hourly_rate(&self) -> Option<Decimal> {
        let rate = self.salary_rate?;
        match self.salary_type? {
            SalaryType::Monthly => Some(rate / MONTHLY_HOURS_DIVISOR),
            SalaryType::Hourly => Some(rate),
        }
    }
}
