//! Holiday model.
//!
//! Holidays come from two places: the system table generated per year (fixed
//! dates plus Easter-relative feasts) and user-defined entries kept by an
//! external store. Both share this type.

use serde::{Deserialize, Serialize};

/// A holiday on a given day and month.
///
/// When `year` is `None` the holiday recurs every year.
///
/// # Example
///
/// ```
/// use timesheet_engine::models::Holiday;
///
/// let anniversary = Holiday::custom(25, 1, None, "Aniversário da cidade");
/// assert!(anniversary.matches(25, 1, 2026));
/// assert!(anniversary.matches(25, 1, 2031));
///
/// let one_off = Holiday::custom(10, 6, Some(2026), "Ponto facultativo");
/// assert!(one_off.matches(10, 6, 2026));
/// assert!(!one_off.matches(10, 6, 2027));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holiday {
    /// Day of the month.
    pub day: u32,
    /// Month of the year (1–12).
    pub month: u32,
    /// The only year the holiday applies to, or `None` for every year.
    #[serde(default)]
    pub year: Option<i32>,
    /// Display name.
    pub name: String,
    /// `true` for entries generated by the built-in calendar.
    #[serde(default)]
    pub is_system_defined: bool,
}

impl Holiday {
    /// Creates a built-in holiday for a specific year.
    pub fn system(day: u32, month: u32, year: i32, name: impl Into<String>) -> Self {
        Self {
            day,
            month,
            year: Some(year),
            name: name.into(),
            is_system_defined: true,
        }
    }

    /// Creates a user-defined holiday.
    pub fn custom(day: u32, month: u32, year: Option<i32>, name: impl Into<String>) -> Self {
        Self {
            day,
            month,
            year,
            name: name.into(),
            is_system_defined: false,
        }
    }

    /// Returns `true` when the holiday falls on the given date.
    pub fn matches(&self, day: u32, month: u32, year: i32) -> bool {
        self.day == day && self.month == month && self.year.is_none_or(|y| y == year)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_holiday_is_flagged() {
        let holiday = Holiday::system(25, 12, 2026, "Natal");
        assert!(holiday.is_system_defined);
        assert_eq!(holiday.year, Some(2026));
    }

    #[test]
    fn test_match_requires_day_and_month() {
        let holiday = Holiday::custom(20, 1, None, "São Sebastião");
        assert!(!holiday.matches(21, 1, 2026));
        assert!(!holiday.matches(20, 2, 2026));
    }

    #[test]
    fn test_deserialize_without_year_recurs() {
        let json = r#"{ "day": 20, "month": 1, "name": "São Sebastião" }"#;
        let holiday: Holiday = serde_json::from_str(json).unwrap();
        assert_eq!(holiday.year, None);
        assert!(!holiday.is_system_defined);
        assert!(holiday.matches(20, 1, 1999));
    }
}
