//! Request types for the timesheet engine API.
//!
//! This module defines the JSON request structures for the API endpoints
//! and their conversion into domain types.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::calculation::{DayNumber, OcrDayEntry};
use crate::error::{EngineError, EngineResult};
use crate::models::{
    DayRecord, DsrOverride, Holiday, PunchColumns, ReferencePeriod, Schedule, SundayMode,
};

/// Request body for the `/timesheet` endpoint.
///
/// Contains the reference month, one row per card day as read by the OCR
/// service and edited by the clerk, and optional overrides of the
/// configured schedule and holidays.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimesheetRequest {
    /// Reference year.
    pub year: i32,
    /// Reference month (1–12).
    pub month: u32,
    /// Card rows.
    pub days: Vec<DayRequest>,
    /// Weekly schedule replacing the configured default.
    #[serde(default)]
    pub schedule: Option<Schedule>,
    /// Holidays added to the configured ones; they win on the same date.
    #[serde(default)]
    pub custom_holidays: Vec<Holiday>,
}

/// One card row in a timesheet request.
///
/// Punches come either as the six labeled fields or as a `times` list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayRequest {
    /// Day of the month.
    pub day: DayNumber,
    /// Free text found in the day column.
    #[serde(default)]
    pub day_label: Option<String>,
    /// The card marks this day as a weekend.
    #[serde(default)]
    pub is_weekend: bool,
    /// The six labeled punch fields.
    #[serde(flatten)]
    pub columns: PunchColumns,
    /// Free-form timestamps; replaces the labeled fields when present.
    #[serde(default)]
    pub times: Option<Vec<String>>,
    /// The clerk waived an absence on this day.
    #[serde(default)]
    pub is_aboned: bool,
    /// Premium-day control.
    #[serde(default)]
    pub sunday_mode: SundayMode,
    /// Paid-rest override.
    #[serde(default)]
    pub dsr_override: DsrOverride,
}

impl DayRequest {
    /// Creates a list-mode row with default edits.
    pub fn from_times(day: u8, times: &[&str]) -> Self {
        Self {
            day: DayNumber::Number(i64::from(day)),
            day_label: None,
            is_weekend: false,
            columns: PunchColumns::default(),
            times: Some(times.iter().map(|t| t.to_string()).collect()),
            is_aboned: false,
            sunday_mode: SundayMode::Auto,
            dsr_override: DsrOverride::Auto,
        }
    }

    /// Converts the row into a day record, or `None` when the day number
    /// cannot be read.
    pub fn into_day_record(self) -> Option<DayRecord> {
        let entry = OcrDayEntry {
            day: self.day,
            day_label: self.day_label,
            is_weekend: self.is_weekend,
            columns: self.columns,
            times: self.times,
        };

        let mut record = entry.into_day_record()?;
        record.is_aboned = self.is_aboned;
        record.sunday_mode = self.sunday_mode;
        record.dsr_override = self.dsr_override;
        Some(record)
    }
}

impl TimesheetRequest {
    /// Validates the request and returns the period and day records.
    ///
    /// Rows with an unreadable day number are skipped. Two rows for the
    /// same day are rejected, since their edits could disagree.
    pub fn into_records(self) -> EngineResult<(ReferencePeriod, Vec<DayRecord>)> {
        let period = ReferencePeriod::new(self.year, self.month);
        if !period.is_valid() {
            return Err(EngineError::InvalidPeriod {
                year: self.year,
                month: self.month,
            });
        }

        let records: Vec<DayRecord> = self
            .days
            .into_iter()
            .filter_map(DayRequest::into_day_record)
            .collect();

        let mut seen = BTreeSet::new();
        if let Some(duplicate) = records.iter().find(|r| !seen.insert(r.day)) {
            return Err(EngineError::InvalidRequest {
                field: "days".to_string(),
                message: format!("day {} appears more than once", duplicate.day),
            });
        }

        Ok((period, records))
    }
}

/// Request body for the `/ingest` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestRequest {
    /// Raw OCR rows, possibly from several images of the same card.
    pub entries: Vec<OcrDayEntry>,
}

/// Request body for the `/normalize` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizeRequest {
    /// Raw punch strings of one day.
    pub punches: Vec<String>,
}

/// Request body for the `/holidays/:year/lookup` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HolidayLookupRequest {
    /// Day of the month.
    pub day: u32,
    /// Month of the year.
    pub month: u32,
    /// Holidays checked before the configured and system ones.
    #[serde(default)]
    pub custom_holidays: Vec<Holiday>,
}

impl HolidayLookupRequest {
    /// Checks that the day and month are in range.
    pub fn validate(&self) -> EngineResult<()> {
        if !(1..=12).contains(&self.month) {
            return Err(EngineError::InvalidRequest {
                field: "month".to_string(),
                message: format!("{} is not between 1 and 12", self.month),
            });
        }
        if !(1..=31).contains(&self.day) {
            return Err(EngineError::InvalidRequest {
                field: "day".to_string(),
                message: format!("{} is not between 1 and 31", self.day),
            });
        }
        Ok(())
    }
}
