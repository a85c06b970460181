//! Integration tests for the payroll engine HTTP API.
//!
//! This test suite covers:
//! - Worked hours, breaks and open shifts
//! - Daily overtime (over 9h per day)
//! - Weekly overtime (over 44 regular hours per ISO week)
//! - Monthly and hourly pay
//! - Payslips
//! - Payroll runs over a period
//! - Error cases

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use std::str::FromStr;
use tower::ServiceExt;

use payroll_engine::api::{AppState, create_router};
use payroll_engine::config::ConfigLoader;

// =============================================================================
// Test Helpers
// =============================================================================

fn create_test_state() -> AppState {
    let config = ConfigLoader::load("./config/default").expect("Failed to load config");
    AppState::new(config)
}

fn create_router_for_test() -> Router {
    create_router(create_test_state())
}

/// Normalize decimal string by removing trailing zeros after decimal point
fn normalize_decimal(s: &str) -> String {
    Decimal::from_str(s).unwrap().normalize().to_string()
}

async fn post(router: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

async fn post_calculate(body: Value) -> (StatusCode, Value) {
    post(create_router_for_test(), "/calculate", body).await
}

fn hourly(rate: &str) -> Value {
    json!({"salary_type": "horista", "salary_rate": rate})
}

fn monthly(salary: &str) -> Value {
    json!({"salary_type": "mensal", "salary_rate": salary})
}

fn create_request(policy: Value, entries: Vec<Value>) -> Value {
    json!({
        "employee_id": "emp_001",
        "policy": policy,
        "entries": entries
    })
}

fn entry(clock_in: &str, clock_out: &str) -> Value {
    json!({
        "clock_in_time": clock_in,
        "clock_out_time": clock_out
    })
}

fn entry_with_break(clock_in: &str, clock_out: &str, break_start: &str, break_end: &str) -> Value {
    json!({
        "clock_in_time": clock_in,
        "clock_out_time": clock_out,
        "break_start_time": break_start,
        "break_end_time": break_end
    })
}

/// A `start`-`end` UTC entry on 2026-01-`day`, whole hours.
fn day_entry(day: u32, start: u32, end: u32) -> Value {
    entry(
        &format!("2026-01-{:02}T{:02}:00:00Z", day, start),
        &format!("2026-01-{:02}T{:02}:00:00Z", day, end),
    )
}

fn assert_decimal(result: &Value, field: &str, expected: &str) {
    let actual = result[field]
        .as_str()
        .unwrap_or_else(|| panic!("field {} missing in {}", field, result));
    assert_eq!(
        normalize_decimal(actual),
        normalize_decimal(expected),
        "Expected {} {}, got {}",
        field,
        expected,
        actual
    );
}

fn warning_codes(result: &Value) -> Vec<String> {
    result["audit_trace"]["warnings"]
        .as_array()
        .unwrap()
        .iter()
        .map(|w| w["code"].as_str().unwrap().to_string())
        .collect()
}

// =============================================================================
// SECTION 1: Worked hours
// =============================================================================

#[tokio::test]
async fn test_scenario_a_nine_hour_day_has_no_overtime() {
    let request = create_request(
        hourly("20"),
        vec![entry("2026-01-15T09:00:00Z", "2026-01-15T18:00:00Z")],
    );

    let (status, result) = post_calculate(request).await;

    assert_eq!(status, StatusCode::OK);
    assert_decimal(&result, "worked_hours", "9");
    assert_decimal(&result, "overtime_hours", "0");
    assert_decimal(&result, "regular_hours", "9");
    assert_decimal(&result, "base_pay", "180");
}

#[tokio::test]
async fn test_scenario_f_break_is_subtracted() {
    let request = create_request(
        hourly("20"),
        vec![entry_with_break(
            "2026-01-15T09:00:00Z",
            "2026-01-15T18:00:00Z",
            "2026-01-15T12:00:00Z",
            "2026-01-15T12:30:00Z",
        )],
    );

    let (status, result) = post_calculate(request).await;

    assert_eq!(status, StatusCode::OK);
    assert_decimal(&result, "worked_hours", "8.5");
    assert_decimal(&result, "overtime_hours", "0");
    assert_decimal(&result, "total_pay", "170");
}

#[tokio::test]
async fn test_open_shift_contributes_nothing() {
    let request = create_request(
        hourly("20"),
        vec![
            json!({"clock_in_time": "2026-01-15T09:00:00Z", "clock_out_time": null}),
            day_entry(16, 9, 17),
        ],
    );

    let (status, result) = post_calculate(request).await;

    assert_eq!(status, StatusCode::OK);
    assert_decimal(&result, "worked_hours", "8");
    assert_eq!(warning_codes(&result), vec!["OPEN_SHIFT"]);
}

#[tokio::test]
async fn test_backwards_punch_clamps_to_zero() {
    let request = create_request(
        hourly("20"),
        vec![entry("2026-01-15T18:00:00Z", "2026-01-15T09:00:00Z")],
    );

    let (status, result) = post_calculate(request).await;

    assert_eq!(status, StatusCode::OK);
    assert_decimal(&result, "worked_hours", "0");
    assert_decimal(&result, "total_pay", "0");
    assert_eq!(warning_codes(&result), vec!["INVERTED_SHIFT"]);
}

#[tokio::test]
async fn test_offset_timestamps_are_normalised_to_utc() {
    // 06:00-15:00 at UTC-03:00 is 09:00-18:00 UTC.
    let request = create_request(
        hourly("20"),
        vec![entry("2026-01-15T06:00:00-03:00", "2026-01-15T15:00:00-03:00")],
    );

    let (status, result) = post_calculate(request).await;

    assert_eq!(status, StatusCode::OK);
    assert_decimal(&result, "worked_hours", "9");
    assert_eq!(result["days"][0]["date"], "2026-01-15");
}

#[tokio::test]
async fn test_day_is_keyed_on_utc_date_of_clock_in() {
    // 22:00 at UTC-03:00 on the 15th is 01:00 UTC on the 16th.
    let request = create_request(
        hourly("20"),
        vec![entry("2026-01-15T22:00:00-03:00", "2026-01-16T04:00:00-03:00")],
    );

    let (_, result) = post_calculate(request).await;

    assert_eq!(result["days"][0]["date"], "2026-01-16");
}

// =============================================================================
// SECTION 2: Daily overtime
// =============================================================================

#[tokio::test]
async fn test_scenario_b_ten_hour_day() {
    let request = create_request(hourly("20"), vec![day_entry(15, 9, 19)]);

    let (status, result) = post_calculate(request).await;

    assert_eq!(status, StatusCode::OK);
    assert_decimal(&result, "worked_hours", "10");
    assert_decimal(&result, "daily_overtime_hours", "1");
    assert_decimal(&result, "weekly_overtime_hours", "0");
    assert_decimal(&result, "regular_hours", "9");
    assert_decimal(&result, "overtime_pay", "30");
    assert_decimal(&result, "total_pay", "210");
}

#[tokio::test]
async fn test_split_shifts_same_day_accumulate() {
    let request = create_request(
        hourly("20"),
        vec![day_entry(15, 7, 12), day_entry(15, 16, 22)],
    );

    let (_, result) = post_calculate(request).await;

    assert_decimal(&result, "worked_hours", "11");
    assert_decimal(&result, "daily_overtime_hours", "2");
}

#[tokio::test]
async fn test_overnight_shift_stays_on_clock_in_day() {
    let request = create_request(
        hourly("20"),
        vec![entry("2026-01-15T21:00:00Z", "2026-01-16T08:00:00Z")],
    );

    let (_, result) = post_calculate(request).await;

    assert_eq!(result["days"].as_array().unwrap().len(), 1);
    assert_decimal(&result, "daily_overtime_hours", "2");
}

#[tokio::test]
async fn test_daily_overtime_audit_steps_present() {
    let request = create_request(hourly("20"), vec![day_entry(15, 9, 19)]);

    let (_, result) = post_calculate(request).await;

    let steps = result["audit_trace"]["steps"].as_array().unwrap();
    let daily = steps
        .iter()
        .find(|s| s["rule_id"] == "daily_overtime_detection")
        .expect("daily overtime step");
    assert_decimal(&daily["input"], "threshold", "9");
    assert_decimal(&daily["output"], "overtime_hours", "1");
}

// =============================================================================
// SECTION 3: Weekly overtime
// =============================================================================

#[tokio::test]
async fn test_scenario_c_forty_five_hour_week() {
    let entries = (12..=16).map(|d| day_entry(d, 8, 17)).collect();
    let request = create_request(hourly("20"), entries);

    let (status, result) = post_calculate(request).await;

    assert_eq!(status, StatusCode::OK);
    assert_decimal(&result, "worked_hours", "45");
    assert_decimal(&result, "daily_overtime_hours", "0");
    assert_decimal(&result, "weekly_overtime_hours", "1");
    assert_decimal(&result, "regular_hours", "44");
    assert_eq!(result["weeks"][0]["week_key"], 202603);
}

#[tokio::test]
async fn test_daily_and_weekly_overtime_are_summed() {
    // Five 10h days: 5h daily overtime plus 1h weekly overtime on 45 pooled.
    let entries = (12..=16).map(|d| day_entry(d, 8, 18)).collect();
    let request = create_request(hourly("20"), entries);

    let (_, result) = post_calculate(request).await;

    assert_decimal(&result, "daily_overtime_hours", "5");
    assert_decimal(&result, "weekly_overtime_hours", "1");
    assert_decimal(&result, "overtime_hours", "6");
    assert_decimal(&result, "regular_hours", "44");
    // 44 x 20 + 6 x 30
    assert_decimal(&result, "total_pay", "1060");
}

#[tokio::test]
async fn test_week_spanning_new_year_uses_iso_year() {
    // Monday 29 December 2025 to Friday 2 January 2026 is 2026-W01.
    let entries = vec![
        entry("2025-12-29T08:00:00Z", "2025-12-29T17:00:00Z"),
        entry("2025-12-30T08:00:00Z", "2025-12-30T17:00:00Z"),
        entry("2025-12-31T08:00:00Z", "2025-12-31T17:00:00Z"),
        entry("2026-01-01T08:00:00Z", "2026-01-01T17:00:00Z"),
        entry("2026-01-02T08:00:00Z", "2026-01-02T17:00:00Z"),
    ];
    let request = create_request(hourly("20"), entries);

    let (_, result) = post_calculate(request).await;

    let weeks = result["weeks"].as_array().unwrap();
    assert_eq!(weeks.len(), 1);
    assert_eq!(weeks[0]["week_key"], 202601);
    assert_eq!(weeks[0]["iso_year"], 2026);
    assert_decimal(&result, "weekly_overtime_hours", "1");
}

#[tokio::test]
async fn test_weeks_split_at_monday() {
    // Tuesday 13 to Sunday 18 January (six 8h days) then Monday 19.
    let mut entries: Vec<Value> = (13..=18).map(|d| day_entry(d, 9, 17)).collect();
    entries.push(day_entry(19, 9, 17));
    let request = create_request(hourly("20"), entries);

    let (_, result) = post_calculate(request).await;

    assert_eq!(result["weeks"].as_array().unwrap().len(), 2);
    assert_decimal(&result, "weekly_overtime_hours", "4");
}

// =============================================================================
// SECTION 4: Pay
// =============================================================================

#[tokio::test]
async fn test_scenario_e_hourly_default_multiplier() {
    let request = create_request(hourly("20"), vec![day_entry(15, 8, 19)]);

    let (_, result) = post_calculate(request).await;

    assert_decimal(&result, "overtime_hours", "2");
    assert_decimal(&result, "overtime_multiplier", "1.5");
    assert_decimal(&result, "overtime_pay", "60");
}

#[tokio::test]
async fn test_custom_overtime_multiplier() {
    let policy = json!({
        "salary_type": "horista",
        "salary_rate": "20",
        "overtime_rate_multiplier": "2"
    });
    let request = create_request(policy, vec![day_entry(15, 8, 19)]);

    let (_, result) = post_calculate(request).await;

    assert_decimal(&result, "overtime_pay", "80");
}

#[tokio::test]
async fn test_monthly_salary_hourly_rate() {
    let request = create_request(monthly("2200"), vec![day_entry(15, 9, 19)]);

    let (_, result) = post_calculate(request).await;

    assert_decimal(&result, "effective_hourly_rate", "10");
    assert_decimal(&result, "base_pay", "90");
    assert_decimal(&result, "overtime_pay", "15");
    assert_decimal(&result, "total_pay", "105");
}

#[tokio::test]
async fn test_missing_salary_rate_pays_zero() {
    let request = create_request(
        json!({"salary_type": "mensal", "salary_rate": null}),
        vec![day_entry(15, 9, 19)],
    );

    let (status, result) = post_calculate(request).await;

    assert_eq!(status, StatusCode::OK);
    assert_decimal(&result, "worked_hours", "10");
    assert_decimal(&result, "total_pay", "0");
    assert!(warning_codes(&result).contains(&"MISSING_PAY_POLICY".to_string()));
}

// =============================================================================
// SECTION 5: Payslip
// =============================================================================

#[tokio::test]
async fn test_payslip_deductions() {
    let request = create_request(monthly("2200"), vec![day_entry(15, 9, 19)]);

    let (status, payslip) = post(create_router_for_test(), "/payslip", request).await;

    assert_eq!(status, StatusCode::OK);
    assert_decimal(&payslip, "gross_pay", "105");
    // 9% and 6% of 105
    assert_decimal(&payslip["deductions"][0], "amount", "9.45");
    assert_decimal(&payslip["deductions"][1], "amount", "6.30");
    assert_decimal(&payslip, "net_pay", "89.25");
}

// =============================================================================
// SECTION 6: Payroll run
// =============================================================================

fn payroll_request(period: Value, entries: Vec<Value>, schedule: Vec<Value>) -> Value {
    json!({
        "period": period,
        "employees": [
            {"id": "emp_001", "name": "Bruna", "role": "waiter", "policy": {"salary_type": "horista", "salary_rate": "20"}},
            {"id": "emp_002", "name": "Ana", "role": "cook", "policy": {"salary_type": "mensal", "salary_rate": "2200"}},
            {"id": "emp_003", "name": "Carlos", "role": "dishwasher", "policy": {}}
        ],
        "entries": entries,
        "schedule": schedule
    })
}

fn punch(employee_id: &str, clock_in: &str, clock_out: &str) -> Value {
    json!({
        "employee_id": employee_id,
        "clock_in_time": clock_in,
        "clock_out_time": clock_out
    })
}

#[tokio::test]
async fn test_payroll_month_report() {
    let request = payroll_request(
        json!({"year": 2026, "month": 1}),
        vec![
            punch("emp_001", "2026-01-15T09:00:00Z", "2026-01-15T19:00:00Z"),
            punch("emp_002", "2026-01-15T09:00:00Z", "2026-01-15T18:00:00Z"),
            punch("emp_001", "2026-02-01T09:00:00Z", "2026-02-01T19:00:00Z"),
        ],
        vec![],
    );

    let (status, report) = post(create_router_for_test(), "/payroll", request).await;

    assert_eq!(status, StatusCode::OK);
    let lines = report["lines"].as_array().unwrap();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["employee_name"], "Ana");
    assert_eq!(lines[1]["employee_name"], "Bruna");
    assert_decimal(&lines[1]["payroll"], "worked_hours", "10");
    // Ana 9 x 10 = 90; Bruna 9 x 20 + 1 x 30 = 210
    assert_decimal(&report["totals"], "total_pay", "300");
    assert_eq!(report["totals"]["employee_count"], 2);
}

#[tokio::test]
async fn test_payroll_keeps_scheduled_only_employee() {
    let request = payroll_request(
        json!({"start_date": "2026-01-01", "end_date": "2026-01-31"}),
        vec![],
        vec![json!({
            "employee_id": "emp_003",
            "date": "2026-01-20",
            "start_time": "18:00:00",
            "end_time": "02:00:00"
        })],
    );

    let (status, report) = post(create_router_for_test(), "/payroll", request).await;

    assert_eq!(status, StatusCode::OK);
    let lines = report["lines"].as_array().unwrap();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["employee_name"], "Carlos");
    assert_decimal(&lines[0], "scheduled_hours", "8");
    assert_decimal(&lines[0]["payroll"], "total_pay", "0");
}

#[tokio::test]
async fn test_payroll_ignores_unknown_employee() {
    let request = payroll_request(
        json!({"year": 2026, "month": 1}),
        vec![punch("emp_404", "2026-01-15T09:00:00Z", "2026-01-15T19:00:00Z")],
        vec![],
    );

    let (status, report) = post(create_router_for_test(), "/payroll", request).await;

    assert_eq!(status, StatusCode::OK);
    assert!(report["lines"].as_array().unwrap().is_empty());
}

// =============================================================================
// SECTION 7: Error cases
// =============================================================================

#[tokio::test]
async fn test_invalid_json_returns_malformed_json() {
    let response = create_router_for_test()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/calculate")
                .header("Content-Type", "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let error: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(error["code"], "MALFORMED_JSON");
}

#[tokio::test]
async fn test_missing_clock_in_returns_validation_error() {
    let request = create_request(
        hourly("20"),
        vec![json!({"clock_out_time": "2026-01-15T18:00:00Z"})],
    );

    let (status, error) = post_calculate(request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "VALIDATION_ERROR");
    assert!(error["message"].as_str().unwrap().contains("clock_in_time"));
}

#[tokio::test]
async fn test_negative_rate_returns_validation_error() {
    let request = create_request(hourly("-20"), vec![day_entry(15, 9, 18)]);

    let (status, error) = post_calculate(request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_rate_beyond_decimal_range_returns_validation_error() {
    let request = create_request(
        hourly("79228162514264337593543950335"),
        vec![day_entry(15, 9, 19)],
    );

    let (status, error) = post_calculate(request.clone()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "VALIDATION_ERROR");
    assert!(error["message"].as_str().unwrap().contains("salary_rate"));

    let (status, error) = post(create_router_for_test(), "/payslip", request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_payroll_rejects_out_of_range_multiplier() {
    let mut request = payroll_request(json!({"year": 2026, "month": 1}), vec![], vec![]);
    request["employees"][0]["policy"]["overtime_rate_multiplier"] = json!("1000");

    let (status, error) = post(create_router_for_test(), "/payroll", request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "VALIDATION_ERROR");
    assert!(
        error["message"]
            .as_str()
            .unwrap()
            .contains("employees[0].policy.overtime_rate_multiplier")
    );
}

#[tokio::test]
async fn test_invalid_month_returns_invalid_period() {
    let request = payroll_request(json!({"year": 2026, "month": 13}), vec![], vec![]);

    let (status, error) = post(create_router_for_test(), "/payroll", request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "INVALID_PERIOD");
}

#[tokio::test]
async fn test_payroll_entry_without_employee_returns_validation_error() {
    let request = payroll_request(
        json!({"year": 2026, "month": 1}),
        vec![json!({"clock_in_time": "2026-01-15T09:00:00Z"})],
        vec![],
    );

    let (status, error) = post(create_router_for_test(), "/payroll", request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "VALIDATION_ERROR");
}
