//! Core data models for the timesheet engine.
//!
//! This module contains all the domain models used throughout the engine.

mod day_record;
mod day_result;
mod holiday;
mod punch;
mod schedule;
mod warning;

pub(crate) use day_record::fold_label;
pub use day_record::{DayRecord, DsrOverride, SundayMode};
pub use day_result::{DayReport, DayResult, MonthReport, MonthTotals, ReferencePeriod, WeekSummary};
pub use holiday::Holiday;
pub use punch::{Minute, NormalizedPunches, PunchColumns};
pub use schedule::{MINUTES_PER_DAY, Schedule, ScheduleEntries, ScheduleValue};
pub use warning::LaborWarning;
