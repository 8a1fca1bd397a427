//! Advisory labor warnings attached to a day for human review.

use serde::{Deserialize, Serialize};

/// An anomaly found in a day's punches.
///
/// Warnings are advisory only and never change any computed total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LaborWarning {
    /// An odd number of stamps was read, so one entry or exit is missing.
    OddPunchCount,
    /// Worked time exceeds the maximum shift length.
    #[serde(rename = "SHIFT_OVER_12H")]
    ShiftOver12h,
    /// A break between two work blocks is too long.
    #[serde(rename = "BREAK_OVER_2H30")]
    BreakOver2h30,
    /// A long day without a lunch break of the required length.
    NoAdequateLunch,
}

impl LaborWarning {
    /// Returns the stable code exposed to the UI and export collaborators.
    ///
    /// # Example
    ///
    /// ```
    /// use timesheet_engine::models::LaborWarning;
    ///
    /// assert_eq!(LaborWarning::ShiftOver12h.code(), "SHIFT_OVER_12H");
    /// ```
    pub fn code(self) -> &'static str {
        match self {
            LaborWarning::OddPunchCount => "ODD_PUNCH_COUNT",
            LaborWarning::ShiftOver12h => "SHIFT_OVER_12H",
            LaborWarning::BreakOver2h30 => "BREAK_OVER_2H30",
            LaborWarning::NoAdequateLunch => "NO_ADEQUATE_LUNCH",
        }
    }

    /// Returns a short human-readable description.
    pub fn message(self) -> &'static str {
        match self {
            LaborWarning::OddPunchCount => "Odd number of punches; an entry or exit is missing",
            LaborWarning::ShiftOver12h => "Worked time exceeds 12 hours",
            LaborWarning::BreakOver2h30 => "Break between work blocks exceeds 2h30",
            LaborWarning::NoAdequateLunch => "More than 6 hours worked without a 1 hour lunch",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialized_form_matches_code() {
        for warning in [
            LaborWarning::OddPunchCount,
            LaborWarning::ShiftOver12h,
            LaborWarning::BreakOver2h30,
            LaborWarning::NoAdequateLunch,
        ] {
            let json = serde_json::to_string(&warning).unwrap();
            assert_eq!(json, format!("\"{}\"", warning.code()));
        }
    }
}
