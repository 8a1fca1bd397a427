//! HTTP request handlers for the timesheet engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    calculate_month, detect_labor_warnings, format_balance, into_day_records, normalize_punches,
    worked_minutes,
};

use super::request::{HolidayLookupRequest, IngestRequest, NormalizeRequest, TimesheetRequest};
use super::response::{
    ApiError, ApiErrorResponse, HolidayLookupResponse, HolidaysResponse, IngestResponse,
    NormalizeResponse, TimesheetResponse, WarningNotice,
};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/timesheet", post(timesheet_handler))
        .route("/ingest", post(ingest_handler))
        .route("/normalize", post(normalize_handler))
        .route("/holidays/:year", get(holidays_handler))
        .route("/holidays/:year/lookup", post(holiday_lookup_handler))
        .with_state(state)
}

/// Handler for POST /timesheet endpoint.
///
/// Accepts the card rows of one month and returns the computed timesheet.
async fn timesheet_handler(
    State(state): State<AppState>,
    payload: Result<Json<TimesheetRequest>, JsonRejection>,
) -> Response {
    // Generate correlation ID for request tracking
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing timesheet request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let config = state.config();
    let schedule = request.schedule.unwrap_or(*config.schedule());
    let calendar = state.calendar(&request.custom_holidays);

    let (period, records) = match request.into_records() {
        Ok(parts) => parts,
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Invalid timesheet request"
            );
            return error_response(err.into());
        }
    };

    let start_time = Instant::now();
    let report = calculate_month(period, &records, &schedule, &calendar, config.settings());
    let duration = start_time.elapsed();

    info!(
        correlation_id = %correlation_id,
        year = period.year,
        month = period.month,
        days = report.days.len(),
        falta_count = report.totals.falta_count,
        dsr_days_lost = report.totals.dsr_days_lost,
        balance = %report.totals.balance,
        duration_us = duration.as_micros(),
        "Timesheet calculated successfully"
    );

    json_response(
        StatusCode::OK,
        TimesheetResponse {
            calculation_id: correlation_id,
            timestamp: Utc::now(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            report,
        },
    )
}

/// Handler for POST /ingest endpoint.
///
/// Merges duplicate OCR rows and returns canonical day records.
async fn ingest_handler(payload: Result<Json<IngestRequest>, JsonRejection>) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing ingest request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let entries = request.entries.len();
    let days = into_day_records(request.entries);
    info!(
        correlation_id = %correlation_id,
        entries,
        days = days.len(),
        "OCR rows ingested"
    );

    json_response(StatusCode::OK, IngestResponse { days })
}

/// Handler for POST /normalize endpoint.
///
/// Normalizes the punches of a single day.
async fn normalize_handler(
    State(state): State<AppState>,
    payload: Result<Json<NormalizeRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let settings = state.config().settings();
    let outcome = normalize_punches(&request.punches, &settings.normalization);
    let worked = worked_minutes(&outcome.punches);
    let warnings = detect_labor_warnings(outcome.parsed_count(), &outcome.punches, &settings.warnings);

    json_response(
        StatusCode::OK,
        NormalizeResponse {
            sorted_values: outcome.sorted_values.iter().map(ToString::to_string).collect(),
            columns: outcome.punches.to_columns(),
            worked_minutes: worked,
            total_worked: format_balance(i64::from(worked)),
            warnings: warnings.into_iter().map(WarningNotice::from).collect(),
        },
    )
}

/// Handler for GET /holidays/:year endpoint.
///
/// Lists the holidays of a year: the system table merged with the
/// configured custom holidays.
async fn holidays_handler(State(state): State<AppState>, Path(year): Path<i32>) -> Response {
    let holidays = state.calendar(&[]).holidays_for_year(year);
    json_response(StatusCode::OK, HolidaysResponse { year, holidays })
}

/// Handler for POST /holidays/:year/lookup endpoint.
///
/// Resolves the holiday name of one date.
async fn holiday_lookup_handler(
    State(state): State<AppState>,
    Path(year): Path<i32>,
    payload: Result<Json<HolidayLookupRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    if let Err(err) = request.validate() {
        warn!(
            correlation_id = %correlation_id,
            error = %err,
            "Invalid holiday lookup"
        );
        return error_response(err.into());
    }

    let name = state
        .calendar(&request.custom_holidays)
        .holiday_name(request.day, request.month, year);
    json_response(StatusCode::OK, HolidayLookupResponse { name })
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (status, [(header::CONTENT_TYPE, "application/json")], Json(body)).into_response()
}

fn error_response(api_error: ApiErrorResponse) -> Response {
    json_response(api_error.status, api_error.error)
}

/// Maps a JSON extraction failure to a 400 response.
fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // Get the body text which contains the detailed error from serde
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
    json_response(StatusCode::BAD_REQUEST, error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;
    use crate::models::LaborWarning;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    fn create_test_state() -> AppState {
        let config = ConfigLoader::load("./config/default").expect("Failed to load config");
        AppState::new(config)
    }

    async fn send(request: Request<Body>) -> (StatusCode, Vec<u8>) {
        let router = create_router(create_test_state());
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, body.to_vec())
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    // March 2026 opens on a Sunday; Tuesday the 3rd has no punches
    const MARCH_WEEK: &str = r#"{
        "year": 2026,
        "month": 3,
        "days": [
            { "day": 1 },
            { "day": 2, "entry1": "08:00", "exit1": "12:00", "entry2": "13:00", "exit2": "17:00" },
            { "day": 3 },
            { "day": 4, "times": ["08:00", "12:00", "13:00", "17:00"] },
            { "day": 5, "times": ["08:00", "12:00", "13:00", "17:00"] },
            { "day": 6, "times": ["08:00", "12:00", "13:00", "17:00"] },
            { "day": 7, "times": ["08:00", "12:00"] }
        ]
    }"#;

    #[tokio::test]
    async fn test_api_001_valid_timesheet_returns_200() {
        let router = create_router(create_test_state());
        let response = router
            .oneshot(post_json("/timesheet", MARCH_WEEK))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        // Verify Content-Type header
        let content_type = response.headers().get("content-type").unwrap();
        assert_eq!(content_type, "application/json");

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let result: TimesheetResponse = serde_json::from_slice(&body).unwrap();

        assert_eq!(result.report.days.len(), 7);
        assert!(result.report.days[2].result.is_falta);
        assert_eq!(result.report.totals.falta_count, 1);
        assert_eq!(result.report.totals.dsr_days_lost, 1);
        assert_eq!(result.report.totals.balance, "-08:00");
        assert_eq!(result.engine_version, env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn test_api_002_malformed_json_returns_400() {
        let (status, body) = send(post_json("/timesheet", "{invalid json")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_api_003_missing_days_returns_400() {
        let (status, body) = send(post_json("/timesheet", r#"{ "year": 2026, "month": 3 }"#)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "VALIDATION_ERROR");
        assert!(
            error.message.contains("missing field"),
            "Expected error message to mention missing field, got: {}",
            error.message
        );
    }

    #[tokio::test]
    async fn test_api_004_invalid_month_returns_400() {
        let (status, body) = send(post_json(
            "/timesheet",
            r#"{ "year": 2026, "month": 13, "days": [] }"#,
        ))
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "INVALID_PERIOD");
    }

    #[tokio::test]
    async fn test_request_schedule_overrides_config() {
        let body = r#"{
            "year": 2026,
            "month": 3,
            "days": [{ "day": 2, "times": ["08:00", "12:00"] }],
            "schedule": { "monday": "04:00" }
        }"#;
        let (status, body) = send(post_json("/timesheet", body)).await;

        assert_eq!(status, StatusCode::OK);
        let result: TimesheetResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(result.report.days[0].target_minutes, 240);
        assert_eq!(result.report.days[0].balance, "00:00");
    }

    #[tokio::test]
    async fn test_normalize_endpoint() {
        let (status, body) = send(post_json(
            "/normalize",
            r#"{ "punches": ["10:15", "08:00", "12:00", "10:00", "[?]"] }"#,
        ))
        .await;

        assert_eq!(status, StatusCode::OK);
        let result: NormalizeResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(result.sorted_values, vec!["08:00", "10:00", "10:15", "12:00"]);
        assert_eq!(result.columns.entry1.as_deref(), Some("08:00"));
        assert_eq!(result.columns.exit1.as_deref(), Some("12:00"));
        assert_eq!(result.worked_minutes, 240);
        assert_eq!(result.total_worked, "04:00");
        assert!(result.warnings.is_empty());
    }

    #[tokio::test]
    async fn test_normalize_reports_warnings() {
        let (_, body) = send(post_json("/normalize", r#"{ "punches": ["08:00", "18:00", "18:30"] }"#)).await;

        let result: NormalizeResponse = serde_json::from_slice(&body).unwrap();
        let codes: Vec<LaborWarning> = result.warnings.iter().map(|w| w.code).collect();
        assert_eq!(codes, vec![LaborWarning::OddPunchCount, LaborWarning::NoAdequateLunch]);
        assert_eq!(result.warnings[1].message, LaborWarning::NoAdequateLunch.message());
    }

    #[tokio::test]
    async fn test_ingest_merges_duplicate_rows() {
        let body = r#"{
            "entries": [
                { "day": "05", "entry1": "08:00", "exit1": "[?]" },
                { "day": 5, "exit1": "12:00", "is_weekend": true },
                { "day": "??", "times": ["08:00"] }
            ]
        }"#;
        let (status, body) = send(post_json("/ingest", body)).await;

        assert_eq!(status, StatusCode::OK);
        let result: IngestResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(result.days.len(), 1);
        assert_eq!(result.days[0].day, 5);
        assert_eq!(result.days[0].raw_punches[..2], ["08:00", "12:00"]);
        assert!(result.days[0].is_explicit_weekend);
    }

    #[tokio::test]
    async fn test_holidays_for_year() {
        let request = Request::builder()
            .method("GET")
            .uri("/holidays/2026")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(request).await;

        assert_eq!(status, StatusCode::OK);
        let result: HolidaysResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(result.year, 2026);
        assert!(result.holidays.iter().any(|h| h.name == "Carnaval" && h.day == 17 && h.month == 2));
        assert!(
            result
                .holidays
                .iter()
                .any(|h| h.name == "São Sebastião" && !h.is_system_defined)
        );
    }

    #[tokio::test]
    async fn test_holiday_lookup() {
        let (status, body) = send(post_json(
            "/holidays/2026/lookup",
            r#"{ "day": 4, "month": 6 }"#,
        ))
        .await;
        assert_eq!(status, StatusCode::OK);
        let result: HolidayLookupResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(result.name.as_deref(), Some("Corpus Christi"));

        let (_, body) = send(post_json(
            "/holidays/2026/lookup",
            r#"{ "day": 4, "month": 6, "custom_holidays": [{ "day": 4, "month": 6, "name": "Festa local" }] }"#,
        ))
        .await;
        let result: HolidayLookupResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(result.name.as_deref(), Some("Festa local"));
    }

    #[tokio::test]
    async fn test_holiday_lookup_rejects_bad_month() {
        let (status, body) = send(post_json("/holidays/2026/lookup", r#"{ "day": 4, "month": 13 }"#)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "INVALID_REQUEST");
    }
}
