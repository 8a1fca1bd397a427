//! Holiday calendar.
//!
//! The system table for a year is the national fixed-date list plus four
//! feasts that move with Easter. User-defined holidays are checked first
//! and win when both fall on the same date. Everything here is derived
//! from the integer year alone; nothing is cached.

use chrono::{Datelike, Days, NaiveDate};

use crate::models::Holiday;

/// National holidays with a fixed date: (day, month, name).
pub const FIXED_HOLIDAYS: [(u32, u32, &str); 9] = [
    (1, 1, "Confraternização Universal"),
    (21, 4, "Tiradentes"),
    (1, 5, "Dia do Trabalho"),
    (7, 9, "Independência do Brasil"),
    (12, 10, "Nossa Senhora Aparecida"),
    (2, 11, "Finados"),
    (15, 11, "Proclamação da República"),
    (20, 11, "Dia Nacional de Zumbi e da Consciência Negra"),
    (25, 12, "Natal"),
];

/// Feasts defined as a day offset from Easter Sunday.
const MOVABLE_FEASTS: [(i64, &str); 4] = [
    (-47, "Carnaval"),
    (-2, "Sexta-feira Santa"),
    (0, "Páscoa"),
    (60, "Corpus Christi"),
];

/// First year of the Gregorian calendar.
const FIRST_GREGORIAN_YEAR: i32 = 1583;

/// Computes Easter Sunday with the anonymous Gregorian algorithm.
///
/// Returns `None` for years before the Gregorian reform, where the
/// computation does not apply.
///
/// # Example
///
/// ```
/// use timesheet_engine::calculation::easter_sunday;
/// use chrono::NaiveDate;
///
/// assert_eq!(easter_sunday(2026), NaiveDate::from_ymd_opt(2026, 4, 5));
/// assert_eq!(easter_sunday(1500), None);
/// ```
pub fn easter_sunday(year: i32) -> Option<NaiveDate> {
    if year < FIRST_GREGORIAN_YEAR {
        return None;
    }

    let a = year % 19;
    let b = year / 100;
    let c = year % 100;
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;
    let month = (h + l - 7 * m + 114) / 31;
    let day = (h + l - 7 * m + 114) % 31 + 1;

    NaiveDate::from_ymd_opt(year, month as u32, day as u32)
}

/// Builds the system holiday table for a year, ordered by date.
///
/// Years outside the Gregorian range get the fixed-date list only.
///
/// # Example
///
/// ```
/// use timesheet_engine::calculation::system_holidays_for_year;
///
/// let holidays = system_holidays_for_year(2026);
/// assert_eq!(holidays.len(), 13);
/// assert!(holidays.iter().all(|h| h.is_system_defined));
/// assert!(holidays.iter().any(|h| h.name == "Corpus Christi" && h.day == 4 && h.month == 6));
/// ```
pub fn system_holidays_for_year(year: i32) -> Vec<Holiday> {
    let mut holidays: Vec<Holiday> = FIXED_HOLIDAYS
        .iter()
        .map(|(day, month, name)| Holiday::system(*day, *month, year, *name))
        .collect();

    if let Some(easter) = easter_sunday(year) {
        holidays.extend(MOVABLE_FEASTS.iter().filter_map(|(offset, name)| {
            let date = shift_days(easter, *offset)?;
            Some(Holiday::system(date.day(), date.month(), year, *name))
        }));
    }

    holidays.sort_by_key(|h| (h.month, h.day));
    holidays
}

/// Resolves the holiday name for a date.
///
/// Custom holidays are checked first, so they win ties against the
/// system table.
///
/// # Example
///
/// ```
/// use timesheet_engine::calculation::resolve_holiday_name;
/// use timesheet_engine::models::Holiday;
///
/// assert_eq!(resolve_holiday_name(25, 12, 2026, &[]).as_deref(), Some("Natal"));
/// assert_eq!(resolve_holiday_name(26, 12, 2026, &[]), None);
///
/// let custom = [Holiday::custom(25, 12, None, "Natal da empresa")];
/// assert_eq!(
///     resolve_holiday_name(25, 12, 2026, &custom).as_deref(),
///     Some("Natal da empresa")
/// );
/// ```
pub fn resolve_holiday_name(day: u32, month: u32, year: i32, custom: &[Holiday]) -> Option<String> {
    if let Some(holiday) = custom.iter().find(|h| h.matches(day, month, year)) {
        return Some(holiday.name.clone());
    }

    system_holidays_for_year(year)
        .into_iter()
        .find(|h| h.matches(day, month, year))
        .map(|h| h.name)
}

fn shift_days(date: NaiveDate, offset: i64) -> Option<NaiveDate> {
    let days = Days::new(offset.unsigned_abs());
    if offset < 0 {
        date.checked_sub_days(days)
    } else {
        date.checked_add_days(days)
    }
}

/// A holiday lookup bound to a set of user-defined holidays.
///
/// # Example
///
/// ```
/// use timesheet_engine::calculation::HolidayCalendar;
/// use timesheet_engine::models::Holiday;
///
/// let calendar = HolidayCalendar::new(vec![Holiday::custom(20, 1, None, "São Sebastião")]);
/// assert_eq!(calendar.holiday_name(20, 1, 2026).as_deref(), Some("São Sebastião"));
/// assert_eq!(calendar.holiday_name(21, 4, 2026).as_deref(), Some("Tiradentes"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HolidayCalendar {
    custom: Vec<Holiday>,
}

impl HolidayCalendar {
    /// Creates a calendar over the given user-defined holidays.
    pub fn new(custom: Vec<Holiday>) -> Self {
        Self { custom }
    }

    /// Returns the user-defined holidays.
    pub fn custom_holidays(&self) -> &[Holiday] {
        &self.custom
    }

    /// Resolves the holiday name for a date.
    pub fn holiday_name(&self, day: u32, month: u32, year: i32) -> Option<String> {
        resolve_holiday_name(day, month, year, &self.custom)
    }

    /// Resolves the holiday name for a calendar date.
    pub fn holiday_on(&self, date: NaiveDate) -> Option<String> {
        self.holiday_name(date.day(), date.month(), date.year())
    }

    /// Lists every holiday of a year: the system table plus the custom
    /// entries that apply to it, ordered by date.
    ///
    /// A custom entry replaces a system one on the same date.
    pub fn holidays_for_year(&self, year: i32) -> Vec<Holiday> {
        let custom: Vec<Holiday> = self
            .custom
            .iter()
            .filter(|h| h.year.is_none_or(|y| y == year))
            .cloned()
            .collect();

        let mut holidays: Vec<Holiday> = system_holidays_for_year(year)
            .into_iter()
            .filter(|system| !custom.iter().any(|c| c.day == system.day && c.month == system.month))
            .collect();
        holidays.extend(custom);
        holidays.sort_by_key(|h| (h.month, h.day));
        holidays
    }
}
