//! Response types for the timesheet engine API.
//!
//! This module defines the success payloads and the error response
//! structures and error handling for the HTTP API.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::EngineError;
use crate::models::{DayRecord, Holiday, LaborWarning, MonthReport, PunchColumns};

/// Response body of the `/timesheet` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimesheetResponse {
    /// Unique identifier of this calculation.
    pub calculation_id: Uuid,
    /// When the calculation ran.
    pub timestamp: DateTime<Utc>,
    /// Version of the engine that produced the report.
    pub engine_version: String,
    /// The computed month.
    pub report: MonthReport,
}

/// Response body of the `/ingest` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestResponse {
    /// One record per distinct readable day, ordered by day.
    pub days: Vec<DayRecord>,
}

/// Response body of the `/normalize` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizeResponse {
    /// Every readable stamp, sorted, before cleanup.
    pub sorted_values: Vec<String>,
    /// The canonical columns.
    pub columns: PunchColumns,
    /// Worked minutes of the canonical pairs.
    pub worked_minutes: u32,
    /// Worked time as `HH:MM`.
    pub total_worked: String,
    /// Review warnings with their display text.
    pub warnings: Vec<WarningNotice>,
}

/// A labor warning as shown to the clerk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WarningNotice {
    /// Stable warning code.
    pub code: LaborWarning,
    /// Human-readable description.
    pub message: String,
}

impl From<LaborWarning> for WarningNotice {
    fn from(warning: LaborWarning) -> Self {
        Self {
            code: warning,
            message: warning.message().to_string(),
        }
    }
}

/// Response body of the `/holidays/:year` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HolidaysResponse {
    /// The requested year.
    pub year: i32,
    /// Holidays of the year ordered by date.
    pub holidays: Vec<Holiday>,
}

/// Response body of the `/holidays/:year/lookup` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HolidayLookupResponse {
    /// Holiday name, or `null` when the date is not a holiday.
    pub name: Option<String>,
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        match error {
            EngineError::ConfigNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Configuration file not found: {}", path),
                ),
            },
            EngineError::ConfigParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            },
            EngineError::InvalidPeriod { year, month } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INVALID_PERIOD",
                    format!("Invalid reference period {}-{}", year, month),
                    "The month must be between 1 and 12",
                ),
            },
            EngineError::InvalidRequest { field, message } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INVALID_REQUEST",
                    format!("Invalid request field '{}': {}", field, message),
                    "The request data contains invalid information",
                ),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(json.contains("\"message\":\"Test message\""));
        assert!(!json.contains("details")); // Should be skipped when None
    }

    #[test]
    fn test_api_error_with_details_serialization() {
        let error = ApiError::with_details("TEST_ERROR", "Test message", "Some details");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"details\":\"Some details\""));
    }

    #[test]
    fn test_invalid_period_maps_to_bad_request() {
        let api_error: ApiErrorResponse = EngineError::InvalidPeriod {
            year: 2026,
            month: 0,
        }
        .into();
        assert_eq!(api_error.status, StatusCode::BAD_REQUEST);
        assert_eq!(api_error.error.code, "INVALID_PERIOD");
        assert!(api_error.error.message.contains("2026-0"));
    }

    #[test]
    fn test_config_errors_map_to_server_error() {
        let api_error: ApiErrorResponse = EngineError::ConfigNotFound {
            path: "engine.yaml".to_string(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api_error.error.code, "CONFIG_ERROR");
    }

    #[test]
    fn test_warning_notice_carries_code_and_message() {
        let notice = WarningNotice::from(LaborWarning::BreakOver2h30);
        let json = serde_json::to_string(&notice).unwrap();
        assert!(json.contains("\"code\":\"BREAK_OVER_2H30\""));
        assert_eq!(notice.message, LaborWarning::BreakOver2h30.message());
    }

    #[test]
    fn test_lookup_response_serializes_null_name() {
        let json = serde_json::to_string(&HolidayLookupResponse { name: None }).unwrap();
        assert_eq!(json, r#"{"name":null}"#);
    }
}
