//! HTTP request handlers for the payroll API.
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

use crate::error::PayrollError;

use super::request::{PeriodsRequest, SummaryRequest};
use super::response::{ApiError, ApiErrorResponse, CurrentPeriodsResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/periods", post(periods_handler))
        .route("/periods/current", get(current_periods_handler))
        .route("/payroll/summary", post(payroll_summary_handler))
        .route("/mileage/summary", post(mileage_summary_handler))
        .with_state(state)
}

/// Handler for POST /periods.
///
/// Returns the pay periods covering the requested range.
async fn periods_handler(
    State(state): State<AppState>,
    payload: Result<Json<PeriodsRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing periods request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    match state
        .service()
        .periods(request.start_date, request.end_date)
    {
        Ok(periods) => {
            info!(
                correlation_id = %correlation_id,
                start_date = %request.start_date,
                end_date = %request.end_date,
                periods = periods.len(),
                "Periods generated"
            );
            json_response(&periods)
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for GET /periods/current.
///
/// Returns the period containing today and the one before it.
async fn current_periods_handler(State(state): State<AppState>) -> Response {
    let correlation_id = Uuid::new_v4();
    let today = state.today();
    let service = state.service();

    let body = CurrentPeriodsResponse {
        current: service.current_period(today),
        previous: service.previous_period(today),
    };

    info!(
        correlation_id = %correlation_id,
        today = %today,
        has_current = body.current.is_some(),
        "Located current period"
    );
    json_response(&body)
}

/// Handler for POST /payroll/summary.
async fn payroll_summary_handler(
    State(state): State<AppState>,
    payload: Result<Json<SummaryRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing payroll summary request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let start_time = Instant::now();
    let summary = request
        .period()
        .and_then(|period| state.service().payroll_summary(&period));

    match summary {
        Ok(summary) => {
            info!(
                correlation_id = %correlation_id,
                period_start = %summary.period_start,
                period_end = %summary.period_end,
                employees = summary.totals.total_employees,
                total_hours = %summary.totals.total_hours,
                duration_us = start_time.elapsed().as_micros(),
                "Payroll summary completed"
            );
            json_response(&summary)
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for POST /mileage/summary.
async fn mileage_summary_handler(
    State(state): State<AppState>,
    payload: Result<Json<SummaryRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing mileage summary request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let start_time = Instant::now();
    let summary = request
        .period()
        .and_then(|period| state.service().mileage_summary(&period));

    match summary {
        Ok(summary) => {
            info!(
                correlation_id = %correlation_id,
                period_start = %summary.period_start,
                period_end = %summary.period_end,
                total_miles = %summary.totals.total_miles,
                total_compensation = %summary.totals.total_compensation,
                duration_us = start_time.elapsed().as_micros(),
                "Mileage summary completed"
            );
            json_response(&summary)
        }
        Err(err) => error_response(correlation_id, err),
    }
}

fn json_response<T: Serialize>(body: &T) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn error_response(correlation_id: Uuid, err: PayrollError) -> Response {
    warn!(
        correlation_id = %correlation_id,
        error = %err,
        "Request failed"
    );
    let api_error: ApiErrorResponse = err.into();
    (
        api_error.status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(api_error.error),
    )
        .into_response()
}

fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
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
    (
        StatusCode::BAD_REQUEST,
        [(header::CONTENT_TYPE, "application/json")],
        Json(error),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        DateValue, Employee, JobReportDocument, MileageSummary, OrganizationSettings,
        OvertimeSettings, PayPeriodPolicy, PayrollSummary, Period, TimeEntryDocument,
    };
    use crate::service::PayrollService;
    use crate::store::MemoryStore;
    use axum::body::Body;
    use axum::http::Request;
    use chrono::{NaiveDate, TimeZone, Utc};
    use rust_decimal::Decimal;
    use std::str::FromStr;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn create_test_store() -> MemoryStore {
        let store = MemoryStore::new();
        store
            .set_employees(vec![Employee {
                id: "emp_001".to_string(),
                first_name: "Ada".to_string(),
                last_name: "Lovelace".to_string(),
                email: "ada@example.com".to_string(),
                role: "instructor".to_string(),
                is_active: true,
                amount_per_mile: Some(dec("0.65")),
            }])
            .unwrap();
        store
            .insert_time_entries(vec![TimeEntryDocument {
                id: "entry_001".to_string(),
                user_id: Some("emp_001".to_string()),
                date: None,
                clock_in_time: Some(DateValue::Instant(
                    Utc.with_ymd_and_hms(2025, 1, 6, 9, 0, 0).unwrap(),
                )),
                clock_out_time: Some(DateValue::Instant(
                    Utc.with_ymd_and_hms(2025, 1, 6, 19, 0, 0).unwrap(),
                )),
                status: "completed".to_string(),
                session_id: None,
                notes: None,
            }])
            .unwrap();
        store
            .insert_job_reports(vec![JobReportDocument {
                id: "report_001".to_string(),
                user_id: Some("emp_001".to_string()),
                date: Some(DateValue::Date(make_date("2025-01-06"))),
                total_mileage: Some(dec("25")),
                your_name: None,
            }])
            .unwrap();
        store
    }

    fn create_test_state(policy: PayPeriodPolicy) -> AppState {
        let settings = OrganizationSettings {
            pay_period_settings: policy,
            overtime_settings: OvertimeSettings::default(),
        };
        let service = PayrollService::new(settings, Arc::new(create_test_store()));
        AppState::new(service).with_fixed_today(make_date("2025-01-20"))
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn read_body(response: Response) -> axum::body::Bytes {
        axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
    }

    // ==========================================================================
    // POST /periods
    // ==========================================================================

    #[tokio::test]
    async fn test_periods_returns_semi_monthly_halves() {
        let router = create_router(create_test_state(PayPeriodPolicy::semi_monthly(1, 16)));

        let response = router
            .oneshot(post_json(
                "/periods",
                r#"{"startDate":"2025-01-01","endDate":"2025-01-31"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers().get("content-type").unwrap();
        assert_eq!(content_type, "application/json");

        let periods: Vec<Period> = serde_json::from_slice(&read_body(response).await).unwrap();
        assert_eq!(periods.len(), 2);
        assert_eq!(periods[0].end, make_date("2025-01-15"));
        assert_eq!(periods[1].start, make_date("2025-01-16"));
        assert_eq!(periods[1].label, "January 16th - 31st, 2025");
    }

    #[tokio::test]
    async fn test_periods_inverted_range_returns_400() {
        let router = create_router(create_test_state(PayPeriodPolicy::weekly(
            chrono::Weekday::Mon,
        )));

        let response = router
            .oneshot(post_json(
                "/periods",
                r#"{"startDate":"2025-02-01","endDate":"2025-01-01"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ApiError = serde_json::from_slice(&read_body(response).await).unwrap();
        assert_eq!(error.code, "INVALID_DATE_RANGE");
    }

    #[tokio::test]
    async fn test_periods_at_last_representable_date_returns_400() {
        let router = create_router(create_test_state(PayPeriodPolicy::monthly(1)));
        let last = chrono::NaiveDate::MAX;
        let body = format!(r#"{{"startDate":"{}","endDate":"{}"}}"#, last, last);

        let response = router.oneshot(post_json("/periods", &body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ApiError = serde_json::from_slice(&read_body(response).await).unwrap();
        assert_eq!(error.code, "INVALID_DATE_RANGE");
    }

    #[tokio::test]
    async fn test_malformed_json_returns_400() {
        let router = create_router(create_test_state(PayPeriodPolicy::monthly(1)));

        let response = router
            .oneshot(post_json("/periods", "{invalid json"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ApiError = serde_json::from_slice(&read_body(response).await).unwrap();
        assert_eq!(error.code, "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_missing_field_returns_validation_error() {
        let router = create_router(create_test_state(PayPeriodPolicy::monthly(1)));

        let response = router
            .oneshot(post_json("/periods", r#"{"startDate":"2025-01-01"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ApiError = serde_json::from_slice(&read_body(response).await).unwrap();
        assert_eq!(error.code, "VALIDATION_ERROR");
        assert!(error.message.contains("endDate"));
    }

    // ==========================================================================
    // GET /periods/current
    // ==========================================================================

    #[tokio::test]
    async fn test_current_periods() {
        let router = create_router(create_test_state(PayPeriodPolicy::semi_monthly(1, 16)));

        let response = router
            .oneshot(
                Request::builder()
                    .uri("/periods/current")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body: CurrentPeriodsResponse =
            serde_json::from_slice(&read_body(response).await).unwrap();
        let current = body.current.unwrap();
        let previous = body.previous.unwrap();
        assert_eq!(current.start, make_date("2025-01-16"));
        assert_eq!(previous.end, make_date("2025-01-15"));
    }

    #[tokio::test]
    async fn test_current_periods_inactive_policy() {
        let mut policy = PayPeriodPolicy::monthly(1);
        policy.is_active = false;
        let router = create_router(create_test_state(policy));

        let response = router
            .oneshot(
                Request::builder()
                    .uri("/periods/current")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body: CurrentPeriodsResponse =
            serde_json::from_slice(&read_body(response).await).unwrap();
        assert!(body.current.is_none());
        assert!(body.previous.is_none());
    }

    // ==========================================================================
    // Summaries
    // ==========================================================================

    #[tokio::test]
    async fn test_payroll_summary_reports_overtime() {
        let router = create_router(create_test_state(PayPeriodPolicy::semi_monthly(1, 16)));

        let response = router
            .oneshot(post_json(
                "/payroll/summary",
                r#"{"periodStart":"2025-01-01","periodEnd":"2025-01-15"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let summary: PayrollSummary = serde_json::from_slice(&read_body(response).await).unwrap();
        assert_eq!(summary.totals.total_hours, dec("10"));
        assert_eq!(summary.totals.total_overtime_hours, dec("2"));
        assert_eq!(summary.employees[0].hours.formatted, "10h 0m");
    }

    #[tokio::test]
    async fn test_payroll_summary_inverted_period_returns_400() {
        let router = create_router(create_test_state(PayPeriodPolicy::semi_monthly(1, 16)));

        let response = router
            .oneshot(post_json(
                "/payroll/summary",
                r#"{"periodStart":"2025-01-15","periodEnd":"2025-01-01"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_mileage_summary() {
        let router = create_router(create_test_state(PayPeriodPolicy::semi_monthly(1, 16)));

        let response = router
            .oneshot(post_json(
                "/mileage/summary",
                r#"{"periodStart":"2025-01-01","periodEnd":"2025-01-15"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let summary: MileageSummary = serde_json::from_slice(&read_body(response).await).unwrap();
        assert_eq!(summary.totals.total_compensation, dec("16.25"));
        assert_eq!(summary.totals.formatted_compensation, "$16.25");
        assert_eq!(summary.employees[0].formatted_miles, "25.0 mi");
    }
}
