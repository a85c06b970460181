//! Configuration types for the payroll engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from `payroll.yaml`.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Deserialize;

use crate::calculation::{DeductionRates, PayrollRules};
use crate::error::{EngineError, EngineResult};
use crate::models::{DEFAULT_OVERTIME_MULTIPLIER, DayBoundary};

/// Metadata identifying the configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct PayrollMetadata {
    /// Short code of the rule set (e.g. "clt_restaurant").
    pub code: String,
    /// Human-readable name of the rule set.
    pub name: String,
    /// Version or effective date of the rule set.
    pub version: String,
}

/// Overtime rule section as written in the YAML file.
#[derive(Debug, Clone, Deserialize)]
pub struct RulesSection {
    /// Hours per day before daily overtime starts.
    pub daily_overtime_threshold_hours: Decimal,
    /// Regular hours per ISO week before weekly overtime starts.
    pub weekly_overtime_threshold_hours: Decimal,
    /// Multiplier used when an employee's policy does not set one.
    #[serde(default = "default_multiplier")]
    pub default_overtime_multiplier: Decimal,
    /// Where one working day ends and the next begins.
    #[serde(default)]
    pub day_boundary: DayBoundary,
}

fn default_multiplier() -> Decimal {
    DEFAULT_OVERTIME_MULTIPLIER
}

impl RulesSection {
    /// Validates the section and converts it to calculator rules.
    pub fn to_rules(&self) -> EngineResult<PayrollRules> {
        let daily = threshold_millis(
            "daily_overtime_threshold_hours",
            self.daily_overtime_threshold_hours,
        )?;
        let weekly = threshold_millis(
            "weekly_overtime_threshold_hours",
            self.weekly_overtime_threshold_hours,
        )?;

        if self.default_overtime_multiplier < Decimal::ONE {
            return Err(EngineError::InvalidConfig {
                field: "default_overtime_multiplier".to_string(),
                message: "must be at least 1".to_string(),
            });
        }

        Ok(PayrollRules {
            daily_threshold: chrono::TimeDelta::milliseconds(daily),
            weekly_threshold: chrono::TimeDelta::milliseconds(weekly),
            default_overtime_multiplier: self.default_overtime_multiplier,
            day_boundary: self.day_boundary,
        })
    }
}

fn threshold_millis(field: &str, hours: Decimal) -> EngineResult<i64> {
    if hours <= Decimal::ZERO {
        return Err(EngineError::InvalidConfig {
            field: field.to_string(),
            message: "must be greater than zero".to_string(),
        });
    }
    (hours * Decimal::from(3_600_000))
        .trunc()
        .to_i64()
        .ok_or_else(|| EngineError::InvalidConfig {
            field: field.to_string(),
            message: "is too large".to_string(),
        })
}

/// The whole `payroll.yaml` document.
#[derive(Debug, Clone, Deserialize)]
pub struct PayrollConfig {
    /// Identifying metadata.
    pub metadata: PayrollMetadata,
    /// Overtime rules.
    pub rules: RulesSection,
    /// Simulated payslip deduction rates.
    #[serde(default)]
    pub deductions: DeductionRates,
}
