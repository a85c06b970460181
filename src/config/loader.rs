//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading payroll
//! configuration from a YAML file.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::calculation::{DeductionRates, PayrollRules};
use crate::error::{EngineError, EngineResult};

use super::types::{PayrollConfig, PayrollMetadata};

/// Name of the configuration file inside the configuration directory.
pub const CONFIG_FILE_NAME: &str = "payroll.yaml";

/// Loads and provides access to payroll configuration.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// └── payroll.yaml   # Metadata, overtime rules and deduction rates
/// ```
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// println!("Daily threshold: {}", loader.rules().daily_threshold);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    metadata: PayrollMetadata,
    rules: PayrollRules,
    deductions: DeductionRates,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if `payroll.yaml` is missing, is not valid YAML, or
    /// holds values the engine cannot use.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let file = path.as_ref().join(CONFIG_FILE_NAME);
        let config = Self::load_yaml::<PayrollConfig>(&file)?;
        let loader = Self::from_config(config)?;
        debug!(
            path = %file.display(),
            code = %loader.metadata.code,
            day_boundary = %loader.rules.day_boundary,
            "Loaded payroll configuration"
        );
        Ok(loader)
    }

    /// Builds a loader from an already-parsed document.
    pub fn from_config(config: PayrollConfig) -> EngineResult<Self> {
        let rules = config.rules.to_rules()?;
        for (field, rate) in [
            ("deductions.inss_rate", config.deductions.inss_rate),
            ("deductions.vt_rate", config.deductions.vt_rate),
        ] {
            if rate.is_sign_negative() || rate > rust_decimal::Decimal::ONE {
                return Err(EngineError::InvalidConfig {
                    field: field.to_string(),
                    message: "must be between 0 and 1".to_string(),
                });
            }
        }

        Ok(Self {
            metadata: config.metadata,
            rules,
            deductions: config.deductions,
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the configuration metadata.
    pub fn metadata(&self) -> &PayrollMetadata {
        &self.metadata
    }

    /// Returns the overtime rules for the calculator.
    pub fn rules(&self) -> &PayrollRules {
        &self.rules
    }

    /// Returns the payslip deduction rates.
    pub fn deductions(&self) -> &DeductionRates {
        &self.deductions
    }
}
