//! Advisory labor warnings.
//!
//! Warnings flag a day for human review. They are computed alongside the
//! accounting and never feed back into any total.

use crate::config::WarningSettings;
use crate::models::{LaborWarning, NormalizedPunches};

use super::daily_balance::worked_minutes;

/// Detects review warnings for one day.
///
/// `parsed_punch_count` is the number of stamps that parsed before any
/// merge; the remaining checks look at the normalized punches.
///
/// # Example
///
/// ```
/// use timesheet_engine::calculation::{detect_labor_warnings, normalize_punches};
/// use timesheet_engine::config::{NormalizationSettings, WarningSettings};
/// use timesheet_engine::models::LaborWarning;
///
/// let outcome = normalize_punches(&["08:00", "17:00"], &NormalizationSettings::default());
/// let warnings = detect_labor_warnings(
///     outcome.parsed_count(),
///     &outcome.punches,
///     &WarningSettings::default(),
/// );
/// assert_eq!(warnings, vec![LaborWarning::NoAdequateLunch]);
/// ```
pub fn detect_labor_warnings(
    parsed_punch_count: usize,
    punches: &NormalizedPunches,
    settings: &WarningSettings,
) -> Vec<LaborWarning> {
    let total = worked_minutes(punches);
    let mut warnings = Vec::new();

    if parsed_punch_count % 2 == 1 {
        warnings.push(LaborWarning::OddPunchCount);
    }

    if total > settings.max_shift_minutes {
        warnings.push(LaborWarning::ShiftOver12h);
    }

    let breaks: Vec<i32> = punches.breaks().collect();

    if breaks.iter().any(|&gap| gap > settings.max_break_minutes as i32) {
        warnings.push(LaborWarning::BreakOver2h30);
    }

    let has_lunch = breaks.iter().any(|&gap| gap >= settings.min_lunch_minutes as i32);
    if total > settings.lunch_required_after_minutes && !has_lunch {
        warnings.push(LaborWarning::NoAdequateLunch);
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::normalize_punches;
    use crate::config::NormalizationSettings;

    fn warnings_for(raw: &[&str]) -> Vec<LaborWarning> {
        let outcome = normalize_punches(raw, &NormalizationSettings::default());
        detect_labor_warnings(outcome.parsed_count(), &outcome.punches, &WarningSettings::default())
    }

    #[test]
    fn test_regular_day_has_no_warnings() {
        assert!(warnings_for(&["08:00", "12:00", "13:00", "17:00"]).is_empty());
    }

    // ==========================================================================
    // LW-001: odd count uses stamps parsed before merging
    // ==========================================================================
    #[test]
    fn test_lw_001_odd_parsed_count() {
        assert_eq!(warnings_for(&["08:00", "12:00", "13:00"]), vec![LaborWarning::OddPunchCount]);
    }

    #[test]
    fn test_duplicate_stamp_still_counts_as_odd() {
        // 08:02 collapses into 08:00 but was still read
        let warnings = warnings_for(&["08:00", "08:02", "12:00"]);
        assert!(warnings.contains(&LaborWarning::OddPunchCount));
    }

    #[test]
    fn test_unparseable_stamps_do_not_count() {
        assert!(warnings_for(&["08:00", "[?]", "12:00"]).is_empty());
    }

    // ==========================================================================
    // LW-002: long shift
    // ==========================================================================
    #[test]
    fn test_lw_002_shift_over_12_hours() {
        let warnings = warnings_for(&["06:00", "12:00", "13:00", "20:00"]);
        assert!(warnings.contains(&LaborWarning::ShiftOver12h));
    }

    #[test]
    fn test_exactly_12_hours_is_fine() {
        let warnings = warnings_for(&["06:00", "12:00", "13:00", "19:00"]);
        assert!(!warnings.contains(&LaborWarning::ShiftOver12h));
    }

    // ==========================================================================
    // LW-003: long break
    // ==========================================================================
    #[test]
    fn test_lw_003_break_over_2h30() {
        let warnings = warnings_for(&["08:00", "11:00", "14:00", "17:00"]);
        assert_eq!(warnings, vec![LaborWarning::BreakOver2h30]);
    }

    // ==========================================================================
    // LW-004: lunch
    // ==========================================================================
    #[test]
    fn test_lw_004_short_lunch_on_long_day() {
        let warnings = warnings_for(&["08:00", "12:00", "12:30", "17:00"]);
        assert_eq!(warnings, vec![LaborWarning::NoAdequateLunch]);
    }

    #[test]
    fn test_gap_before_trailing_entry_is_not_lunch() {
        // One unbroken 7h block, then a stamp without its exit
        let warnings = warnings_for(&["08:00", "15:00", "16:00"]);
        assert_eq!(
            warnings,
            vec![LaborWarning::OddPunchCount, LaborWarning::NoAdequateLunch]
        );
    }

    #[test]
    fn test_short_day_needs_no_lunch() {
        assert!(warnings_for(&["08:00", "14:00"]).is_empty());
    }

    #[test]
    fn test_custom_limits() {
        let outcome = normalize_punches(&["08:00", "17:00"], &NormalizationSettings::default());
        let settings = WarningSettings {
            max_shift_minutes: 480,
            lunch_required_after_minutes: 600,
            ..WarningSettings::default()
        };
        assert_eq!(
            detect_labor_warnings(outcome.parsed_count(), &outcome.punches, &settings),
            vec![LaborWarning::ShiftOver12h]
        );
    }
}
