//! HTTP request handlers for the payroll engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{build_payslip, calculate_payroll, run_payroll};
use crate::models::{
    Employee, PayPolicy, PayrollResult, ReportingPeriod, ScheduledShift,
};

use super::request::{CalculationRequest, PayrollRequest};
use super::response::{ApiError, ApiErrorResponse, HealthResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/calculate", post(calculate_handler))
        .route("/payslip", post(payslip_handler))
        .route("/payroll", post(payroll_handler))
        .with_state(state)
}

fn json_ok<T: Serialize>(body: T) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

/// Maps a body extraction failure to an API error.
fn rejection_error(rejection: JsonRejection, correlation_id: Uuid) -> ApiErrorResponse {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's detailed message
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    ApiErrorResponse::bad_request(error)
}

fn validation_failure(message: String, correlation_id: Uuid) -> ApiErrorResponse {
    warn!(
        correlation_id = %correlation_id,
        error = %message,
        "Request validation failed"
    );
    ApiErrorResponse::bad_request(ApiError::validation_error(message))
}

/// Validates a single-employee request and runs the calculator on it.
fn calculate_request(
    state: &AppState,
    request: CalculationRequest,
    correlation_id: Uuid,
) -> Result<PayrollResult, ApiErrorResponse> {
    if request.employee_id.trim().is_empty() {
        return Err(validation_failure(
            "employee_id must not be empty".to_string(),
            correlation_id,
        ));
    }
    request
        .policy
        .validate("policy")
        .map_err(|m| validation_failure(m, correlation_id))?;
    let entries = request
        .time_clock_entries()
        .map_err(|m| validation_failure(m, correlation_id))?;
    let policy: PayPolicy = request.policy.into();

    let start_time = Instant::now();
    let result = calculate_payroll(
        &request.employee_id,
        &entries,
        &policy,
        state.config().rules(),
    );
    info!(
        correlation_id = %correlation_id,
        employee_id = %result.employee_id,
        entries_count = entries.len(),
        worked_hours = %result.worked_hours,
        overtime_hours = %result.overtime_hours,
        warnings = result.audit_trace.warnings.len(),
        duration_us = start_time.elapsed().as_micros() as u64,
        "Calculation completed successfully"
    );
    Ok(result)
}

/// Handler for GET /health.
async fn health_handler() -> impl IntoResponse {
    json_ok(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Handler for POST /calculate endpoint.
///
/// Accepts one employee's entries and pay policy and returns the
/// [`PayrollResult`].
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing calculation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_error(rejection, correlation_id).into_response(),
    };

    match calculate_request(&state, request, correlation_id) {
        Ok(result) => json_ok(result),
        Err(error) => error.into_response(),
    }
}

/// Handler for POST /payslip endpoint.
///
/// Same input as `/calculate`; returns the payslip with simulated deductions.
async fn payslip_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing payslip request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_error(rejection, correlation_id).into_response(),
    };

    match calculate_request(&state, request, correlation_id) {
        Ok(result) => {
            let payslip = build_payslip(&result, state.config().deductions());
            info!(
                correlation_id = %correlation_id,
                employee_id = %payslip.employee_id,
                gross_pay = %payslip.gross_pay,
                net_pay = %payslip.net_pay,
                "Payslip built"
            );
            json_ok(payslip)
        }
        Err(error) => error.into_response(),
    }
}

/// Handler for POST /payroll endpoint.
///
/// Runs payroll for every employee over a reporting period.
async fn payroll_handler(
    State(state): State<AppState>,
    payload: Result<Json<PayrollRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing payroll request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_error(rejection, correlation_id).into_response(),
    };

    let entries = match request.time_clock_entries() {
        Ok(entries) => entries,
        Err(message) => return validation_failure(message, correlation_id).into_response(),
    };
    for (index, employee) in request.employees.iter().enumerate() {
        if let Err(message) = employee.policy.validate(&format!("employees[{}].policy", index)) {
            return validation_failure(message, correlation_id).into_response();
        }
    }

    let period = match ReportingPeriod::try_from(request.period) {
        Ok(period) => period,
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Invalid reporting period"
            );
            return ApiErrorResponse::from(err).into_response();
        }
    };

    let employees: Vec<Employee> = request.employees.into_iter().map(Into::into).collect();
    let schedule: Vec<ScheduledShift> = request.schedule.into_iter().map(Into::into).collect();

    let report = run_payroll(
        period,
        &employees,
        &entries,
        &schedule,
        state.config().rules(),
    );
    info!(
        correlation_id = %correlation_id,
        calculation_id = %report.calculation_id,
        employees_count = employees.len(),
        reported_count = report.lines.len(),
        total_pay = %report.totals.total_pay,
        duration_us = report.duration_us,
        "Payroll completed successfully"
    );

    json_ok(report)
}
