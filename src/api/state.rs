//! Application state for the timesheet engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::calculation::HolidayCalendar;
use crate::config::ConfigLoader;
use crate::models::Holiday;

/// Shared application state.
///
/// Holds the loaded configuration. It is read-only; every request runs the
/// engine on its own data.
#[derive(Clone)]
pub struct AppState {
    /// The loaded engine configuration.
    config: Arc<ConfigLoader>,
}

impl AppState {
    /// Creates a new application state with the given configuration loader.
    pub fn new(config: ConfigLoader) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Builds the holiday calendar for one request.
    pub fn calendar(&self, request_holidays: &[Holiday]) -> HolidayCalendar {
        self.config.holiday_calendar(request_holidays)
    }
}
