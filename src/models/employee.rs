//! Employee model.

use serde::{Deserialize, Serialize};

use super::PayPolicy;

/// A restaurant employee as seen by payroll.
///
/// The pay policy fields sit flat on the employee record, matching the shape
/// of the staff table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: String,
    /// Display name used in reports.
    pub name: String,
    /// Job role (e.g. "cozinheiro", "garçom").
    #[serde(default)]
    pub role: Option<String>,
    /// How the employee is paid.
    #[serde(flatten)]
    pub pay_policy: PayPolicy,
}
