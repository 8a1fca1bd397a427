//! Configuration types for the timesheet engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files. Every section has a
//! default, so a partial `engine.yaml` only overrides what it names.

use serde::{Deserialize, Serialize};

use crate::models::{Holiday, Schedule};

/// Thresholds of the punch normalization pipeline, in minutes.
///
/// # Example
///
/// ```
/// use timesheet_engine::config::NormalizationSettings;
///
/// let settings = NormalizationSettings::default();
/// assert_eq!(settings.duplicate_threshold_minutes, 5);
/// assert_eq!(settings.break_merge_threshold_minutes, 20);
/// assert_eq!(settings.noise_threshold_minutes, 10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizationSettings {
    /// Adjacent stamps closer than this are one stamp read twice.
    pub duplicate_threshold_minutes: u16,
    /// Exit→Entry gaps shorter than this are coffee breaks and get merged.
    pub break_merge_threshold_minutes: u16,
    /// Work blocks shorter than this are spurious double stamps.
    pub noise_threshold_minutes: u16,
}

impl Default for NormalizationSettings {
    fn default() -> Self {
        Self {
            duplicate_threshold_minutes: 5,
            break_merge_threshold_minutes: 20,
            noise_threshold_minutes: 10,
        }
    }
}

/// Limits used by the labor warnings detector, in minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WarningSettings {
    /// Worked time above this is flagged as an excessive shift.
    pub max_shift_minutes: u32,
    /// A break above this is flagged as excessive.
    pub max_break_minutes: u32,
    /// Worked time above this requires a lunch break.
    pub lunch_required_after_minutes: u32,
    /// Minimum length of a lunch break.
    pub min_lunch_minutes: u32,
}

impl Default for WarningSettings {
    fn default() -> Self {
        Self {
            max_shift_minutes: 720,
            max_break_minutes: 150,
            lunch_required_after_minutes: 360,
            min_lunch_minutes: 60,
        }
    }
}

/// Day-label policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelSettings {
    /// Label markers that declare a scheduled day off (matched case- and
    /// accent-insensitively as substrings).
    pub day_off: Vec<String>,
}

impl Default for LabelSettings {
    fn default() -> Self {
        Self {
            day_off: ["FOLGA", "DSR", "FERIADO", "FERIAS", "ATESTADO", "COMPENSADO"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

/// All tunable engine settings, as read from `engine.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Normalization thresholds.
    pub normalization: NormalizationSettings,
    /// Warning limits.
    pub warnings: WarningSettings,
    /// Day-label policy.
    pub labels: LabelSettings,
}

/// Structure of `schedule.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleConfig {
    /// The default weekly schedule.
    pub schedule: Schedule,
}

/// Structure of `holidays.yaml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HolidaysConfig {
    /// User-defined holidays merged over the system calendar.
    #[serde(default)]
    pub holidays: Vec<Holiday>,
}

/// The complete engine configuration loaded from YAML files.
#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    settings: EngineSettings,
    schedule: Schedule,
    custom_holidays: Vec<Holiday>,
}

impl EngineConfig {
    /// Creates a new EngineConfig from its component parts.
    ///
    /// Custom holidays are always treated as user-defined, whatever the
    /// file says.
    pub fn new(settings: EngineSettings, schedule: Schedule, custom_holidays: Vec<Holiday>) -> Self {
        let custom_holidays = custom_holidays
            .into_iter()
            .map(|holiday| Holiday {
                is_system_defined: false,
                ..holiday
            })
            .collect();
        Self {
            settings,
            schedule,
            custom_holidays,
        }
    }

    /// Returns the engine settings.
    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Returns the default weekly schedule.
    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    /// Returns the configured custom holidays.
    pub fn custom_holidays(&self) -> &[Holiday] {
        &self.custom_holidays
    }
}
