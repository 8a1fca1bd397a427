//! Error types for the timesheet engine.
//!
//! The accounting pipeline itself is total: bad punches, odd day numbers and
//! broken schedule values are recovered locally and never surface here. These
//! errors cover the outer layers only (configuration loading and request
//! validation).

use thiserror::Error;

/// The main error type for the timesheet engine.
///
/// # Example
///
/// ```
/// use timesheet_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/engine.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/engine.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// The reference year/month does not name a calendar month.
    #[error("Invalid reference period {year}-{month}: month must be between 1 and 12")]
    InvalidPeriod {
        /// The requested year.
        year: i32,
        /// The requested month.
        month: u32,
    },

    /// A request field was structurally invalid.
    #[error("Invalid request field '{field}': {message}")]
    InvalidRequest {
        /// The offending field.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/engine.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/engine.yaml"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/schedule.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/schedule.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_invalid_period_displays_year_and_month() {
        let error = EngineError::InvalidPeriod {
            year: 2026,
            month: 13,
        };
        assert_eq!(
            error.to_string(),
            "Invalid reference period 2026-13: month must be between 1 and 12"
        );
    }

    #[test]
    fn test_invalid_request_displays_field_and_message() {
        let error = EngineError::InvalidRequest {
            field: "days".to_string(),
            message: "too many rows".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid request field 'days': too many rows"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_invalid_period() -> EngineResult<()> {
            Err(EngineError::InvalidPeriod {
                year: 2026,
                month: 0,
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_invalid_period()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
