//! Configuration loading for the payroll engine.
//!
//! Overtime thresholds, the default overtime multiplier, the day boundary and
//! payslip deduction rates are read from a single YAML file.
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Loaded rules: {}", config.metadata().name);
//! ```

mod loader;
mod types;

pub use loader::{CONFIG_FILE_NAME, ConfigLoader};
pub use types::{PayrollConfig, PayrollMetadata, RulesSection};
