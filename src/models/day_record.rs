//! Day record model and the user-controlled day states.
//!
//! A [`DayRecord`] is the editable row for one calendar day of one employee
//! month. The engine only reads it; user actions change it, and every change
//! triggers a full recomputation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// How a Sunday (or any day) is treated for premium overtime.
///
/// The UI exposes this as a single button that walks the states in order,
/// see [`SundayMode::cycle`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SundayMode {
    /// Premium status follows the calendar and the compensation rule.
    #[default]
    Auto,
    /// All worked minutes are premium (100%) overtime.
    ForceExtra,
    /// Never a premium day, whatever the calendar says.
    ForceOff,
}

impl SundayMode {
    /// Returns the next state: `auto → force_extra → force_off → auto`.
    ///
    /// # Example
    ///
    /// ```
    /// use timesheet_engine::models::SundayMode;
    ///
    /// let mode = SundayMode::Auto.cycle();
    /// assert_eq!(mode, SundayMode::ForceExtra);
    /// assert_eq!(mode.cycle().cycle(), SundayMode::Auto);
    /// ```
    pub fn cycle(self) -> Self {
        match self {
            SundayMode::Auto => SundayMode::ForceExtra,
            SundayMode::ForceExtra => SundayMode::ForceOff,
            SundayMode::ForceOff => SundayMode::Auto,
        }
    }
}

/// User override of the weekly paid-rest (DSR) decision for a day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DsrOverride {
    /// The engine decides.
    #[default]
    Auto,
    /// The day is a paid rest day and never a fault.
    Force,
    /// The day may not be used as compensatory rest for a worked Sunday.
    Disable,
}

impl DsrOverride {
    /// Returns the next state: `auto → force → disable → auto`.
    pub fn cycle(self) -> Self {
        match self {
            DsrOverride::Auto => DsrOverride::Force,
            DsrOverride::Force => DsrOverride::Disable,
            DsrOverride::Disable => DsrOverride::Auto,
        }
    }
}

/// One calendar day of an employee month, as read from the card and edited
/// by the clerk.
///
/// # Example
///
/// ```
/// use timesheet_engine::models::{DayRecord, DsrOverride};
///
/// let mut record = DayRecord::new(5, vec!["08:00".into(), "12:00".into()]);
/// record.dsr_override = DsrOverride::Force;
/// assert!(record.force_dsr());
/// assert!(!record.manually_disabled_dsr());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayRecord {
    /// Day of the month (1–31).
    pub day: u8,
    /// Free text the OCR found in the day column (e.g. "DOM", "FOLGA").
    #[serde(default)]
    pub day_label: Option<String>,
    /// Raw punch strings in card order.
    #[serde(default)]
    pub raw_punches: Vec<String>,
    /// The card marks this day as a weekend.
    #[serde(default)]
    pub is_explicit_weekend: bool,
    /// The clerk waived an absence on this day (abono).
    #[serde(default)]
    pub is_aboned: bool,
    /// Premium-day control.
    #[serde(default)]
    pub sunday_mode: SundayMode,
    /// Paid-rest override.
    #[serde(default)]
    pub dsr_override: DsrOverride,
}

impl DayRecord {
    /// Creates a record with default user state.
    pub fn new(day: u8, raw_punches: Vec<String>) -> Self {
        Self {
            day,
            day_label: None,
            raw_punches,
            is_explicit_weekend: false,
            is_aboned: false,
            sunday_mode: SundayMode::Auto,
            dsr_override: DsrOverride::Auto,
        }
    }

    /// Returns `true` when the clerk forced this day to be paid rest.
    pub fn force_dsr(&self) -> bool {
        self.dsr_override == DsrOverride::Force
    }

    /// Returns `true` when the clerk excluded this day from Sunday compensation.
    pub fn manually_disabled_dsr(&self) -> bool {
        self.dsr_override == DsrOverride::Disable
    }

    /// Resolves the record's calendar date in the given month.
    ///
    /// Returns `None` for impossible dates such as February 30th.
    pub fn date_in(&self, year: i32, month: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(year, month, u32::from(self.day))
    }

    /// Returns `true` when the label contains one of the given day-off markers.
    ///
    /// Matching ignores case and Portuguese accents, so `"Férias"` matches
    /// the marker `"FERIAS"`.
    pub fn label_marks_day_off(&self, markers: &[String]) -> bool {
        let Some(label) = self.day_label.as_deref() else {
            return false;
        };
        let label = fold_label(label);
        markers
            .iter()
            .map(|marker| fold_label(marker))
            .any(|marker| !marker.is_empty() && label.contains(&marker))
    }
}

/// Upper-cases a label and strips the accents OCR tends to misread.
pub(crate) fn fold_label(label: &str) -> String {
    label
        .trim()
        .to_uppercase()
        .chars()
        .map(|c| match c {
            'Á' | 'À' | 'Â' | 'Ã' => 'A',
            'É' | 'Ê' => 'E',
            'Í' => 'I',
            'Ó' | 'Ô' | 'Õ' => 'O',
            'Ú' | 'Ü' => 'U',
            'Ç' => 'C',
            other => other,
        })
        .collect()
}
