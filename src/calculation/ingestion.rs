//! OCR ingestion.
//!
//! The vision service returns day rows in one of two shapes: six labeled
//! punch fields, or a free-form `times` list. Both reduce here to a
//! [`DayRecord`] with a canonical raw punch sequence, so the normalizer only
//! ever sees one shape.
//!
//! A card photographed in several parts yields the same day more than once;
//! [`merge_duplicate_days`] folds those rows together before conversion.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::models::{DayRecord, PunchColumns, fold_label};

use super::time_token::is_uncertain;

/// Label and token that mark an absence in list mode.
const ABSENCE_MARKER: &str = "FALTA";

/// A day number as the OCR service writes it: `5`, `"05"` or `"5 "`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DayNumber {
    /// A JSON number.
    Number(i64),
    /// Text; the first run of digits is used.
    Text(String),
}

impl DayNumber {
    /// Resolves the day of the month, or `None` when it is not in `1..=31`.
    ///
    /// # Example
    ///
    /// ```
    /// use timesheet_engine::calculation::DayNumber;
    ///
    /// assert_eq!(DayNumber::Text(" 05".into()).resolve(), Some(5));
    /// assert_eq!(DayNumber::Text("Dia 12".into()).resolve(), Some(12));
    /// assert_eq!(DayNumber::Number(32).resolve(), None);
    /// assert_eq!(DayNumber::Text("??".into()).resolve(), None);
    /// ```
    pub fn resolve(&self) -> Option<u8> {
        let value = match self {
            DayNumber::Number(n) => *n,
            DayNumber::Text(text) => {
                let digits: String = text
                    .chars()
                    .skip_while(|c| !c.is_ascii_digit())
                    .take_while(char::is_ascii_digit)
                    .collect();
                digits.parse().ok()?
            }
        };
        u8::try_from(value).ok().filter(|day| (1..=31).contains(day))
    }
}

/// One day row as produced by the OCR service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OcrDayEntry {
    /// Day of the month.
    pub day: DayNumber,
    /// Free text found in the day column.
    #[serde(default)]
    pub day_label: Option<String>,
    /// The card marks this day as a weekend.
    #[serde(default)]
    pub is_weekend: bool,
    /// The six labeled punch fields (column mode).
    #[serde(flatten)]
    pub columns: PunchColumns,
    /// Free-form timestamps (list mode). When present, the columns are
    /// ignored.
    #[serde(default)]
    pub times: Option<Vec<String>>,
}

impl OcrDayEntry {
    /// Creates a column-mode entry with no label.
    pub fn from_columns(day: u8, columns: PunchColumns) -> Self {
        Self {
            day: DayNumber::Number(i64::from(day)),
            day_label: None,
            is_weekend: false,
            columns,
            times: None,
        }
    }

    /// Creates a list-mode entry with no label.
    pub fn from_times(day: u8, times: Vec<String>) -> Self {
        Self {
            day: DayNumber::Number(i64::from(day)),
            day_label: None,
            is_weekend: false,
            columns: PunchColumns::default(),
            times: Some(times),
        }
    }

    /// Returns the canonical raw punches and the effective label.
    ///
    /// In list mode an absence marker, either as a token or as the label,
    /// empties the day and sets its label to `FALTA`.
    pub fn raw_punches(&self) -> (Vec<String>, Option<String>) {
        let Some(times) = &self.times else {
            return (self.columns.to_raw_punches(), self.day_label.clone());
        };

        let is_absence = |value: &str| fold_label(value) == ABSENCE_MARKER;
        if times.iter().any(|t| is_absence(t.as_str()))
            || self.day_label.as_deref().is_some_and(is_absence)
        {
            return (Vec::new(), Some(ABSENCE_MARKER.to_string()));
        }

        (times.clone(), self.day_label.clone())
    }

    /// Converts the entry into a day record, or `None` when the day number
    /// cannot be read.
    pub fn into_day_record(self) -> Option<DayRecord> {
        let Some(day) = self.day.resolve() else {
            warn!(day = ?self.day, "Skipping OCR row with unreadable day number");
            return None;
        };

        let (raw_punches, day_label) = self.raw_punches();
        let mut record = DayRecord::new(day, raw_punches);
        record.day_label = day_label.filter(|label| !label.trim().is_empty());
        record.is_explicit_weekend = self.is_weekend;
        Some(record)
    }
}

/// Merges rows that describe the same day, ordered by day.
///
/// Field by field, a certain value (non-empty, no uncertainty marker) wins
/// over an uncertain one, and an uncertain value wins over nothing. Weekend
/// flags are OR-ed. Rows with an unreadable day number are dropped.
///
/// # Example
///
/// ```
/// use timesheet_engine::calculation::{OcrDayEntry, merge_duplicate_days};
/// use timesheet_engine::models::PunchColumns;
///
/// let first = OcrDayEntry::from_columns(3, PunchColumns {
///     entry1: Some("08:00".into()),
///     exit1: Some("[?]".into()),
///     ..PunchColumns::default()
/// });
/// let second = OcrDayEntry::from_columns(3, PunchColumns {
///     exit1: Some("12:00".into()),
///     ..PunchColumns::default()
/// });
///
/// let merged = merge_duplicate_days(vec![first, second]);
/// assert_eq!(merged.len(), 1);
/// assert_eq!(merged[0].columns.entry1.as_deref(), Some("08:00"));
/// assert_eq!(merged[0].columns.exit1.as_deref(), Some("12:00"));
/// ```
pub fn merge_duplicate_days(entries: Vec<OcrDayEntry>) -> Vec<OcrDayEntry> {
    let mut by_day: BTreeMap<u8, OcrDayEntry> = BTreeMap::new();

    for entry in entries {
        let Some(day) = entry.day.resolve() else {
            warn!(day = ?entry.day, "Dropping OCR row with unreadable day number");
            continue;
        };

        match by_day.remove(&day) {
            Some(existing) => {
                debug!(day, "Merging duplicate OCR rows");
                by_day.insert(day, merge_entries(existing, entry));
            }
            None => {
                by_day.insert(day, entry);
            }
        }
    }

    by_day.into_values().collect()
}

/// Merges duplicate rows and converts them into day records.
pub fn into_day_records(entries: Vec<OcrDayEntry>) -> Vec<DayRecord> {
    merge_duplicate_days(entries)
        .into_iter()
        .filter_map(OcrDayEntry::into_day_record)
        .collect()
}

fn merge_entries(mut current: OcrDayEntry, other: OcrDayEntry) -> OcrDayEntry {
    let other_columns = other.columns.fields().map(|field| field.clone());
    for (field, candidate) in current.columns.fields_mut().into_iter().zip(other_columns) {
        *field = prefer_certain(field.take(), candidate);
    }

    let times = match (current.times.take(), other.times) {
        (Some(mine), Some(theirs)) if certain_count(&theirs) > certain_count(&mine) => Some(theirs),
        (Some(mine), _) => Some(mine),
        (None, theirs) => theirs,
    };

    // A list replaces the columns only when it reads better than they do
    let column_count = certain_column_count(&current.columns);
    current.times =
        times.filter(|times| column_count == 0 || certain_count(times) > column_count);
    current.day_label = prefer_certain(current.day_label, other.day_label);
    current.is_weekend |= other.is_weekend;
    current
}

fn is_certain(value: &str) -> bool {
    !value.trim().is_empty() && !is_uncertain(value)
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn prefer_certain(current: Option<String>, candidate: Option<String>) -> Option<String> {
    if current.as_deref().is_some_and(is_certain) {
        return current;
    }
    if candidate.as_deref().is_some_and(is_certain) {
        return candidate;
    }
    if current.as_deref().is_some_and(|v| !is_blank(v)) {
        return current;
    }
    candidate.filter(|v| !is_blank(v)).or(current)
}

fn certain_count(times: &[String]) -> usize {
    times.iter().filter(|t| is_certain(t)).count()
}

fn certain_column_count(columns: &PunchColumns) -> usize {
    columns
        .fields()
        .into_iter()
        .filter(|field| field.as_deref().is_some_and(is_certain))
        .count()
}
