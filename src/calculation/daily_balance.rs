//! Daily worked time and balance.
//!
//! This step is pure and per day. It knows nothing about weekly
//! compensation; the DSR engine consumes its output.

use serde::{Deserialize, Serialize};

use crate::models::NormalizedPunches;

/// Worked time and balance for one day.
///
/// # Example
///
/// ```
/// use timesheet_engine::calculation::{calculate_daily_balance, normalize_punches};
/// use timesheet_engine::config::NormalizationSettings;
///
/// let outcome = normalize_punches(
///     &["08:00", "12:00", "13:00", "16:30"],
///     &NormalizationSettings::default(),
/// );
/// let balance = calculate_daily_balance(&outcome.punches, 480, false);
/// assert_eq!(balance.worked_minutes, 450);
/// assert_eq!(balance.balance_minutes, -30);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyBalance {
    /// Sum of all complete work blocks.
    pub worked_minutes: u32,
    /// Expected minutes for the weekday.
    pub target_minutes: u32,
    /// Worked minus target, or the full worked time on a day off.
    pub balance_minutes: i32,
    /// The day is a designated day off (holiday, weekend or waived).
    pub is_day_off: bool,
}

/// Sums the duration of every (entry, exit) pair where exit is after entry.
///
/// A trailing unpaired entry contributes nothing.
pub fn worked_minutes(punches: &NormalizedPunches) -> u32 {
    punches
        .pairs()
        .filter(|(entry, exit)| exit > entry)
        .map(|(entry, exit)| u32::from(exit.value() - entry.value()))
        .sum()
}

/// Computes the worked time and raw balance of one day.
///
/// On a designated day off any work is pure surplus, so the balance is the
/// worked time itself rather than a comparison against the target.
pub fn calculate_daily_balance(
    punches: &NormalizedPunches,
    target_minutes: u32,
    is_day_off: bool,
) -> DailyBalance {
    let worked = worked_minutes(punches);
    let balance_minutes = if is_day_off {
        worked as i32
    } else {
        worked as i32 - target_minutes as i32
    };

    DailyBalance {
        worked_minutes: worked,
        target_minutes,
        balance_minutes,
        is_day_off,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::normalize_punches;
    use crate::config::NormalizationSettings;

    fn punches(raw: &[&str]) -> NormalizedPunches {
        normalize_punches(raw, &NormalizationSettings::default()).punches
    }

    // ==========================================================================
    // DA-001: regular day against target
    // ==========================================================================
    #[test]
    fn test_da_001_full_day_matches_target() {
        let balance = calculate_daily_balance(&punches(&["08:00", "12:00", "13:00", "17:00"]), 480, false);
        assert_eq!(balance.worked_minutes, 480);
        assert_eq!(balance.balance_minutes, 0);
    }

    #[test]
    fn test_surplus_on_regular_day() {
        let balance = calculate_daily_balance(&punches(&["07:00", "12:00", "13:00", "18:00"]), 480, false);
        assert_eq!(balance.worked_minutes, 600);
        assert_eq!(balance.balance_minutes, 120);
    }

    // ==========================================================================
    // DA-002: day off ignores target
    // ==========================================================================
    #[test]
    fn test_da_002_day_off_balance_is_worked_time() {
        let balance = calculate_daily_balance(&punches(&["08:00", "12:00"]), 480, true);
        assert_eq!(balance.worked_minutes, 240);
        assert_eq!(balance.balance_minutes, 240);
        assert!(balance.is_day_off);
    }

    #[test]
    fn test_no_punches_is_full_deficit() {
        let balance = calculate_daily_balance(&NormalizedPunches::default(), 480, false);
        assert_eq!(balance.worked_minutes, 0);
        assert_eq!(balance.balance_minutes, -480);
    }

    #[test]
    fn test_unpaired_entry_adds_nothing() {
        assert_eq!(worked_minutes(&punches(&["08:00", "12:00", "13:00"])), 240);
    }

    #[test]
    fn test_end_of_day_stamp_counts() {
        assert_eq!(worked_minutes(&punches(&["22:00", "24:00"])), 120);
    }
}
