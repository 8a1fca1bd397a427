//! HTTP API module for the timesheet engine.
//!
//! This module provides the REST API endpoints used by the review UI:
//! monthly timesheet calculation, OCR row ingestion, single-day
//! normalization and holiday lookups.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    DayRequest, HolidayLookupRequest, IngestRequest, NormalizeRequest, TimesheetRequest,
};
pub use response::{
    ApiError, ApiErrorResponse, HolidayLookupResponse, HolidaysResponse, IngestResponse,
    NormalizeResponse, TimesheetResponse, WarningNotice,
};
pub use state::AppState;
