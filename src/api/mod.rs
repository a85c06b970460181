//! HTTP API module for the payroll engine.
//!
//! This module provides the REST endpoints for calculating one employee's
//! pay, building a payslip and running payroll over a reporting period.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    CalculationRequest, EmployeeRequest, MAX_OVERTIME_MULTIPLIER, MAX_SALARY_RATE,
    PayPolicyRequest, PayrollRequest, PeriodRequest, ScheduledShiftRequest,
    TimeClockEntryRequest,
};
pub use response::{ApiError, ApiErrorResponse, HealthResponse};
pub use state::AppState;
