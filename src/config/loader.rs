//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the engine
//! configuration from YAML files.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::calculation::HolidayCalendar;
use crate::error::{EngineError, EngineResult};
use crate::models::{Holiday, Schedule};

use super::types::{EngineConfig, EngineSettings, HolidaysConfig, ScheduleConfig};

/// Loads and provides access to engine configuration.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── engine.yaml     # Normalization thresholds, warning limits, labels
/// ├── schedule.yaml   # Default weekly schedule
/// └── holidays.yaml   # User-defined holidays
/// ```
///
/// # Example
///
/// ```no_run
/// use timesheet_engine::config::ConfigLoader;
/// use chrono::Weekday;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// println!("Monday target: {} minutes", loader.schedule().target_for(Weekday::Mon));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config: EngineConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if any
    /// required file is missing or contains invalid YAML.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use timesheet_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/default")?;
    /// # Ok::<(), timesheet_engine::error::EngineError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let settings = Self::load_yaml::<EngineSettings>(&path.join("engine.yaml"))?;
        let schedule = Self::load_yaml::<ScheduleConfig>(&path.join("schedule.yaml"))?;
        let holidays = Self::load_yaml::<HolidaysConfig>(&path.join("holidays.yaml"))?;

        debug!(
            path = %path.display(),
            custom_holidays = holidays.holidays.len(),
            "Loaded engine configuration"
        );

        Ok(Self {
            config: EngineConfig::new(settings, schedule.schedule, holidays.holidays),
        })
    }

    /// Wraps an already-built configuration.
    pub fn from_config(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the engine settings.
    pub fn settings(&self) -> &EngineSettings {
        self.config.settings()
    }

    /// Returns the default weekly schedule.
    pub fn schedule(&self) -> &Schedule {
        self.config.schedule()
    }

    /// Builds a holiday calendar from the configured custom holidays plus
    /// any extra entries supplied with a request.
    ///
    /// Extra entries come first, so they win over configured ones on the
    /// same date.
    pub fn holiday_calendar(&self, extra: &[Holiday]) -> HolidayCalendar {
        let holidays = extra
            .iter()
            .cloned()
            .map(|holiday| Holiday {
                is_system_defined: false,
                ..holiday
            })
            .chain(self.config.custom_holidays().iter().cloned())
            .collect();
        HolidayCalendar::new(holidays)
    }
}
