//! Calculation logic for the timesheet engine.
//!
//! This module contains the whole accounting pipeline, leaf first: punch
//! token parsing, time-series normalization, daily balance, the holiday
//! calendar, the weekly paid-rest (DSR) engine, labor warnings, OCR
//! ingestion and the monthly calculation that ties them together.
//!
//! Every function here is total: bad data is dropped or flagged, never
//! raised as an error.

mod daily_balance;
mod holiday_calendar;
mod ingestion;
mod labor_warnings;
mod normalizer;
mod time_token;
mod timesheet;
mod weekly_dsr;

pub use daily_balance::{DailyBalance, calculate_daily_balance, worked_minutes};
pub use holiday_calendar::{
    FIXED_HOLIDAYS, HolidayCalendar, easter_sunday, resolve_holiday_name, system_holidays_for_year,
};
pub use ingestion::{DayNumber, OcrDayEntry, into_day_records, merge_duplicate_days};
pub use labor_warnings::detect_labor_warnings;
pub use normalizer::{NormalizationOutcome, calculate_daily_minutes, normalize_punches};
pub use time_token::{format_balance, minutes_to_time, parse_time_token};
pub use timesheet::calculate_month;
pub use weekly_dsr::{
    CompensationOutcome, DayClassification, DayInput, DayOutcome, DsrOutcome, DsrRules,
    WeekGroup, run_weekly_dsr, week_of_year,
};
