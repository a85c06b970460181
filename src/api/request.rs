//! Request types for the payroll engine API.
//!
//! This module defines the JSON request structures for the `/calculate`,
//! `/payslip` and `/payroll` endpoints and their conversion to domain types.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{
    Employee, PayPolicy, ReportingPeriod, SalaryType, ScheduledShift, TimeClockEntry,
};

/// Largest accepted monthly salary or hourly rate.
pub const MAX_SALARY_RATE: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

/// Largest accepted overtime multiplier.
pub const MAX_OVERTIME_MULTIPLIER: Decimal = Decimal::from_parts(10, 0, 0, false, 0);

/// Request body for the `/calculate` and `/payslip` endpoints.
///
/// Contains one employee's pay policy and time-clock entries, already
/// restricted to the reporting window by the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationRequest {
    /// The employee the entries belong to.
    pub employee_id: String,
    /// The employee's pay policy.
    #[serde(default)]
    pub policy: PayPolicyRequest,
    /// The time-clock entries to calculate.
    #[serde(default)]
    pub entries: Vec<TimeClockEntryRequest>,
}

impl CalculationRequest {
    /// Converts the entries, attributing unlabelled ones to `employee_id`.
    ///
    /// Returns a message naming the first entry that belongs to another
    /// employee.
    pub fn time_clock_entries(&self) -> Result<Vec<TimeClockEntry>, String> {
        self.entries
            .iter()
            .enumerate()
            .map(|(index, entry)| match entry.employee_id.as_deref() {
                None => Ok(entry.to_entry(&self.employee_id)),
                Some(id) if id == self.employee_id => Ok(entry.to_entry(id)),
                Some(other) => Err(format!(
                    "entries[{}] belongs to employee '{}', not '{}'",
                    index, other, self.employee_id
                )),
            })
            .collect()
    }
}

/// Pay policy in a request, using the back-office field names.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PayPolicyRequest {
    /// `"mensal"` or `"horista"`.
    #[serde(default)]
    pub salary_type: Option<SalaryType>,
    /// Monthly salary or hourly rate.
    #[serde(default)]
    pub salary_rate: Option<Decimal>,
    /// Overtime multiplier; 1.5 when absent.
    #[serde(default)]
    pub overtime_rate_multiplier: Option<Decimal>,
}

impl PayPolicyRequest {
    /// Rejects negative or out-of-range rates and multipliers; `field`
    /// prefixes the message.
    pub fn validate(&self, field: &str) -> Result<(), String> {
        if self.salary_rate.is_some_and(|r| r < Decimal::ZERO) {
            return Err(format!("{}.salary_rate must not be negative", field));
        }
        if self.salary_rate.is_some_and(|r| r > MAX_SALARY_RATE) {
            return Err(format!(
                "{}.salary_rate must not exceed {}",
                field, MAX_SALARY_RATE
            ));
        }
        if self.overtime_rate_multiplier.is_some_and(|m| m < Decimal::ZERO) {
            return Err(format!(
                "{}.overtime_rate_multiplier must not be negative",
                field
            ));
        }
        if self
            .overtime_rate_multiplier
            .is_some_and(|m| m > MAX_OVERTIME_MULTIPLIER)
        {
            return Err(format!(
                "{}.overtime_rate_multiplier must not exceed {}",
                field, MAX_OVERTIME_MULTIPLIER
            ));
        }
        Ok(())
    }
}

impl From<PayPolicyRequest> for PayPolicy {
    fn from(req: PayPolicyRequest) -> Self {
        PayPolicy {
            salary_type: req.salary_type,
            salary_rate: req.salary_rate,
            overtime_multiplier: req.overtime_rate_multiplier,
        }
    }
}

/// One time-clock entry in a request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeClockEntryRequest {
    /// Identifier of the punch row.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// The employee who punched; optional on `/calculate`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<String>,
    /// Clock-in timestamp (RFC 3339).
    pub clock_in_time: DateTime<Utc>,
    /// Clock-out timestamp; absent while the shift is open.
    #[serde(default)]
    pub clock_out_time: Option<DateTime<Utc>>,
    /// Break start timestamp.
    #[serde(default)]
    pub break_start_time: Option<DateTime<Utc>>,
    /// Break end timestamp.
    #[serde(default)]
    pub break_end_time: Option<DateTime<Utc>>,
}

impl TimeClockEntryRequest {
    fn to_entry(&self, employee_id: &str) -> TimeClockEntry {
        TimeClockEntry {
            id: self.id.clone(),
            employee_id: employee_id.to_string(),
            clock_in_time: self.clock_in_time,
            clock_out_time: self.clock_out_time,
            break_start_time: self.break_start_time,
            break_end_time: self.break_end_time,
        }
    }
}

/// Request body for the `/payroll` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayrollRequest {
    /// The reporting period to run.
    pub period: PeriodRequest,
    /// Every employee of the restaurant.
    pub employees: Vec<EmployeeRequest>,
    /// Time-clock entries for any employee; filtered to the period by the engine.
    #[serde(default)]
    pub entries: Vec<TimeClockEntryRequest>,
    /// Planned shifts, used for display only.
    #[serde(default)]
    pub schedule: Vec<ScheduledShiftRequest>,
}

impl PayrollRequest {
    /// Converts the entries; each must name its employee.
    pub fn time_clock_entries(&self) -> Result<Vec<TimeClockEntry>, String> {
        self.entries
            .iter()
            .enumerate()
            .map(|(index, entry)| match entry.employee_id.as_deref() {
                Some(id) => Ok(entry.to_entry(id)),
                None => Err(format!("entries[{}] is missing employee_id", index)),
            })
            .collect()
    }
}

/// A reporting period, given either as a date range or as a calendar month.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PeriodRequest {
    /// An inclusive date range.
    Range {
        /// First day (inclusive).
        start_date: NaiveDate,
        /// Last day (inclusive).
        end_date: NaiveDate,
    },
    /// A whole calendar month.
    Month {
        /// Calendar year.
        year: i32,
        /// Month, 1 to 12.
        month: u32,
    },
}

impl TryFrom<PeriodRequest> for ReportingPeriod {
    type Error = EngineError;

    fn try_from(req: PeriodRequest) -> EngineResult<Self> {
        match req {
            PeriodRequest::Range {
                start_date,
                end_date,
            } => ReportingPeriod::new(start_date, end_date),
            PeriodRequest::Month { year, month } => ReportingPeriod::month(year, month)
                .ok_or(EngineError::InvalidMonth { year, month }),
        }
    }
}

/// Employee information in a payroll request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeRequest {
    /// Unique identifier for the employee.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Job role (e.g. "cook", "waiter").
    #[serde(default)]
    pub role: Option<String>,
    /// The employee's pay policy.
    #[serde(default)]
    pub policy: PayPolicyRequest,
}

impl From<EmployeeRequest> for Employee {
    fn from(req: EmployeeRequest) -> Self {
        Employee {
            id: req.id,
            name: req.name,
            role: req.role,
            pay_policy: req.policy.into(),
        }
    }
}

/// A planned shift in a payroll request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduledShiftRequest {
    /// The employee scheduled.
    pub employee_id: String,
    /// The day of the shift.
    pub date: NaiveDate,
    /// Planned start (wall clock).
    pub start_time: NaiveTime,
    /// Planned end (wall clock); before `start_time` when the shift crosses midnight.
    pub end_time: NaiveTime,
}

impl From<ScheduledShiftRequest> for ScheduledShift {
    fn from(req: ScheduledShiftRequest) -> Self {
        ScheduledShift {
            employee_id: req.employee_id,
            date: req.date,
            start_time: req.start_time,
            end_time: req.end_time,
        }
    }
}
