//! Punch time-series normalization.
//!
//! Turns the raw stamps of one day into canonical Entry/Exit columns:
//!
//! 1. parse every stamp, silently dropping unreadable ones
//! 2. sort ascending (fixes inverted or out-of-order stamps)
//! 3. collapse near-duplicate reads of the same stamp, keeping the earlier
//! 4. merge short Exit→Entry gaps (coffee breaks) into one work block
//! 5. drop work blocks too short to be real (double stamps)
//! 6. keep at most three column pairs
//!
//! The pipeline is idempotent: normalizing its own output changes nothing.

use serde::{Deserialize, Serialize};

use crate::config::NormalizationSettings;
use crate::models::{Minute, NormalizedPunches};

use super::daily_balance::worked_minutes;
use super::time_token::parse_time_token;

/// The result of normalizing one day's punches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizationOutcome {
    /// Every readable stamp, sorted, before any cleanup. Kept for the
    /// correction-training collaborator, which diffs it against edits.
    pub sorted_values: Vec<Minute>,
    /// The canonical punches.
    pub punches: NormalizedPunches,
}

impl NormalizationOutcome {
    /// Number of stamps that parsed successfully.
    pub fn parsed_count(&self) -> usize {
        self.sorted_values.len()
    }
}

/// Normalizes the raw punch strings of one day.
///
/// Accepts any number of raw strings, so both the six-column card layout
/// and a free-form timestamp list go through the same pipeline.
///
/// # Example
///
/// ```
/// use timesheet_engine::calculation::normalize_punches;
/// use timesheet_engine::config::NormalizationSettings;
///
/// // A 15 minute coffee break is merged into one block
/// let outcome = normalize_punches(
///     &["08:00", "10:00", "10:15", "12:00"],
///     &NormalizationSettings::default(),
/// );
/// assert_eq!(outcome.punches.to_raw_punches(), vec!["08:00", "12:00"]);
/// assert_eq!(outcome.parsed_count(), 4);
/// ```
pub fn normalize_punches<S: AsRef<str>>(
    raw_punches: &[S],
    settings: &NormalizationSettings,
) -> NormalizationOutcome {
    let mut values: Vec<Minute> = raw_punches
        .iter()
        .filter_map(|raw| parse_time_token(raw.as_ref()))
        .collect();
    values.sort_unstable();
    let sorted_values = values.clone();

    let values = collapse_near_duplicates(values, settings.duplicate_threshold_minutes);
    let values = merge_short_breaks(values, settings.break_merge_threshold_minutes);
    let values = drop_noise_blocks(values, settings.noise_threshold_minutes);

    NormalizationOutcome {
        sorted_values,
        punches: NormalizedPunches::from_sorted(values),
    }
}

/// Normalizes raw punches and returns the worked minutes.
///
/// # Example
///
/// ```
/// use timesheet_engine::calculation::calculate_daily_minutes;
/// use timesheet_engine::config::NormalizationSettings;
///
/// let total = calculate_daily_minutes(
///     &["08:00", "10:00", "10:15", "12:00"],
///     &NormalizationSettings::default(),
/// );
/// assert_eq!(total, 240);
/// ```
pub fn calculate_daily_minutes<S: AsRef<str>>(
    raw_punches: &[S],
    settings: &NormalizationSettings,
) -> u32 {
    worked_minutes(&normalize_punches(raw_punches, settings).punches)
}

/// Drops every value closer than `threshold` to the last kept one.
fn collapse_near_duplicates(values: Vec<Minute>, threshold: u16) -> Vec<Minute> {
    let mut kept: Vec<Minute> = Vec::with_capacity(values.len());
    for value in values {
        match kept.last() {
            Some(last) if value.value() - last.value() < threshold => {}
            _ => kept.push(value),
        }
    }
    kept
}

/// Fuses work blocks separated by a positive gap shorter than `threshold`.
fn merge_short_breaks(mut values: Vec<Minute>, threshold: u16) -> Vec<Minute> {
    while let Some(exit_index) = find_short_break(&values, threshold) {
        values.drain(exit_index..exit_index + 2);
    }
    values
}

fn find_short_break(values: &[Minute], threshold: u16) -> Option<usize> {
    (1..values.len().saturating_sub(1))
        .step_by(2)
        .find(|&exit_index| {
            let gap = values[exit_index + 1].value() - values[exit_index].value();
            gap > 0 && gap < threshold
        })
}

/// Removes complete Entry/Exit blocks shorter than `threshold`.
fn drop_noise_blocks(mut values: Vec<Minute>, threshold: u16) -> Vec<Minute> {
    while let Some(entry_index) = find_noise_block(&values, threshold) {
        values.drain(entry_index..entry_index + 2);
    }
    values
}

fn find_noise_block(values: &[Minute], threshold: u16) -> Option<usize> {
    (0..values.len() / 2)
        .map(|pair| pair * 2)
        .find(|&entry_index| values[entry_index + 1].value() - values[entry_index].value() < threshold)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn normalize(raw: &[&str]) -> Vec<String> {
        normalize_punches(raw, &NormalizationSettings::default())
            .punches
            .to_raw_punches()
    }

    // ==========================================================================
    // NZ-001: inverted stamps are sorted
    // ==========================================================================
    #[test]
    fn test_nz_001_sorting_fixes_inverted_stamps() {
        let outcome = normalize_punches(&["10:00", "08:00"], &NormalizationSettings::default());
        let columns = outcome.punches.to_columns();
        assert_eq!(columns.entry1.as_deref(), Some("08:00"));
        assert_eq!(columns.exit1.as_deref(), Some("10:00"));
    }

    // ==========================================================================
    // NZ-002: coffee break merge
    // ==========================================================================
    #[test]
    fn test_nz_002_coffee_break_merge() {
        assert_eq!(normalize(&["08:00", "10:00", "10:15", "12:00"]), vec!["08:00", "12:00"]);
        assert_eq!(
            calculate_daily_minutes(
                &["08:00", "10:00", "10:15", "12:00"],
                &NormalizationSettings::default()
            ),
            240
        );
    }

    #[test]
    fn test_lunch_break_is_not_merged() {
        assert_eq!(
            normalize(&["08:00", "12:00", "13:00", "17:00"]),
            vec!["08:00", "12:00", "13:00", "17:00"]
        );
    }

    #[test]
    fn test_gap_at_threshold_is_not_merged() {
        assert_eq!(
            normalize(&["08:00", "10:00", "10:20", "12:00"]),
            vec!["08:00", "10:00", "10:20", "12:00"]
        );
    }

    // ==========================================================================
    // NZ-003: near-duplicate reads
    // ==========================================================================
    #[test]
    fn test_nz_003_near_duplicates_collapse_to_earlier() {
        assert_eq!(normalize(&["08:00", "08:02", "12:00"]), vec!["08:00", "12:00"]);
        assert_eq!(normalize(&["08:00", "08:03", "08:20", "12:00"]), vec!["08:00", "08:20", "12:00"]);
        // 08:06 survives the collapse but its 6 minute block is noise
        assert_eq!(normalize(&["08:00", "08:03", "08:06", "12:00"]), vec!["12:00"]);
    }

    // ==========================================================================
    // NZ-004: noise block removal
    // ==========================================================================
    #[test]
    fn test_nz_004_noise_block_is_dropped() {
        let raw = ["08:00", "12:00", "12:40", "12:47", "13:30", "17:30"];
        assert_eq!(normalize(&raw), vec!["08:00", "12:00", "13:30", "17:30"]);
        assert_eq!(
            calculate_daily_minutes(&raw, &NormalizationSettings::default()),
            480
        );
    }

    #[test]
    fn test_unparseable_stamps_are_dropped_silently() {
        let outcome = normalize_punches(
            &["08:00", "[?]", "", "12:00"],
            &NormalizationSettings::default(),
        );
        assert_eq!(outcome.parsed_count(), 2);
        assert_eq!(outcome.punches.to_raw_punches(), vec!["08:00", "12:00"]);
    }

    #[test]
    fn test_odd_count_keeps_trailing_entry() {
        let outcome = normalize_punches(&["08:00", "12:00", "13:00"], &NormalizationSettings::default());
        let columns = outcome.punches.to_columns();
        assert_eq!(columns.entry2.as_deref(), Some("13:00"));
        assert_eq!(columns.exit2, None);
    }

    #[test]
    fn test_more_than_three_pairs_are_truncated() {
        let raw = [
            "06:00", "07:00", "08:00", "09:00", "10:00", "11:00", "12:00", "13:00",
        ];
        assert_eq!(normalize(&raw).len(), NormalizedPunches::MAX_VALUES);
    }

    #[test]
    fn test_sorted_values_are_kept_before_cleanup() {
        let outcome = normalize_punches(
            &["10:15", "08:00", "12:00", "10:00"],
            &NormalizationSettings::default(),
        );
        let sorted: Vec<String> = outcome.sorted_values.iter().map(|m| m.to_string()).collect();
        assert_eq!(sorted, vec!["08:00", "10:00", "10:15", "12:00"]);
    }

    #[test]
    fn test_empty_day() {
        let outcome = normalize_punches::<&str>(&[], &NormalizationSettings::default());
        assert!(outcome.punches.is_empty());
    }

    // ==========================================================================
    // NZ-005: idempotence
    // ==========================================================================
    #[test]
    fn test_nz_005_idempotent_on_known_day() {
        let first = normalize(&["12:47", "08:00", "10:00", "10:15", "12:40", "13:30", "17:30", "08:02"]);
        let refs: Vec<&str> = first.iter().map(String::as_str).collect();
        assert_eq!(normalize(&refs), first);
    }

    proptest! {
        #[test]
        fn prop_normalization_is_idempotent(stamps in prop::collection::vec(0u16..1440, 0..10)) {
            let raw: Vec<String> = stamps
                .iter()
                .map(|m| format!("{:02}:{:02}", m / 60, m % 60))
                .collect();
            let settings = NormalizationSettings::default();

            let first = normalize_punches(&raw, &settings).punches;
            let second = normalize_punches(&first.to_raw_punches(), &settings).punches;
            prop_assert_eq!(first, second);
        }
    }
}
