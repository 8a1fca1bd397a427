//! Punch values and normalized punch columns.
//!
//! A punch-clock card carries up to three Entry/Exit column pairs per day.
//! [`Minute`] is a validated minute-of-day, [`NormalizedPunches`] is the
//! canonical, chronologically ordered result of normalizing a day's raw
//! stamps, and [`PunchColumns`] is the labeled six-field view used at the
//! OCR and export boundaries.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A minute of the day, from `00:00` (0) up to `24:59` (1499).
///
/// Hour 24 is accepted the way punch clocks print it past midnight, so
/// `24:00` is an end-of-day stamp and `24:30` sorts after `23:59`. A missing
/// punch is represented with `Option<Minute>`, never with zero.
///
/// # Example
///
/// ```
/// use timesheet_engine::models::Minute;
///
/// let minute = Minute::from_hm(8, 30).unwrap();
/// assert_eq!(minute.value(), 510);
/// assert_eq!(minute.to_string(), "08:30");
/// assert_eq!(Minute::from_hm(24, 30).unwrap().value(), 1470);
/// assert!(Minute::from_hm(25, 0).is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct Minute(u16);

impl Minute {
    /// The literal `24:00` end-of-day stamp.
    pub const END_OF_DAY: Minute = Minute(1440);

    /// The latest readable stamp, `24:59`.
    pub const MAX: Minute = Minute(1499);

    /// Creates a minute-of-day from a raw value, rejecting anything past `24:59`.
    pub fn new(value: u16) -> Option<Self> {
        (value <= Self::MAX.0).then_some(Self(value))
    }

    /// Creates a minute-of-day from hours and minutes.
    ///
    /// Hours must be in `[0, 24]` and minutes in `[0, 59]`.
    pub fn from_hm(hours: u16, minutes: u16) -> Option<Self> {
        if hours > 24 || minutes > 59 {
            return None;
        }
        Some(Self(hours * 60 + minutes))
    }

    /// Returns the raw minute-of-day value.
    pub fn value(self) -> u16 {
        self.0
    }

    /// Returns the number of minutes from `self` until `later`.
    ///
    /// Negative when `later` is actually earlier.
    pub fn minutes_until(self, later: Minute) -> i32 {
        i32::from(later.0) - i32::from(self.0)
    }
}

impl fmt::Display for Minute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}

impl TryFrom<u16> for Minute {
    type Error = String;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Minute::new(value).ok_or_else(|| format!("minute-of-day out of range: {value}"))
    }
}

impl From<Minute> for u16 {
    fn from(minute: Minute) -> Self {
        minute.0
    }
}

/// The canonical punches of one day after normalization.
///
/// Values are sorted ascending and read alternately as Entry, Exit, Entry,
/// Exit, ... At most six values (three column pairs) are kept. A trailing
/// Entry without an Exit is preserved so the gap stays visible for review.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedPunches {
    values: Vec<Minute>,
}

impl NormalizedPunches {
    /// Maximum number of punch values a card row can hold.
    pub const MAX_VALUES: usize = 6;

    /// Builds normalized punches from already-sorted values, keeping at
    /// most [`Self::MAX_VALUES`].
    pub(crate) fn from_sorted(mut values: Vec<Minute>) -> Self {
        values.truncate(Self::MAX_VALUES);
        Self { values }
    }

    /// Returns the ordered punch values.
    pub fn values(&self) -> &[Minute] {
        &self.values
    }

    /// Returns `true` when the day has no usable punch.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the complete (entry, exit) pairs, in order.
    pub fn pairs(&self) -> impl Iterator<Item = (Minute, Minute)> + '_ {
        self.values.chunks_exact(2).map(|pair| (pair[0], pair[1]))
    }

    /// Returns the gaps between the Exit of each complete pair and the Entry
    /// of the next complete pair.
    ///
    /// A trailing Entry without an Exit opens no break.
    pub fn breaks(&self) -> impl Iterator<Item = i32> + '_ {
        self.pairs()
            .zip(self.pairs().skip(1))
            .map(|((_, exit), (entry, _))| exit.minutes_until(entry))
    }

    /// Returns the labeled six-column view (`entry1` ... `exit3`).
    ///
    /// # Example
    ///
    /// ```
    /// use timesheet_engine::calculation::normalize_punches;
    /// use timesheet_engine::config::NormalizationSettings;
    ///
    /// let outcome = normalize_punches(&["10:00", "08:00"], &NormalizationSettings::default());
    /// let columns = outcome.punches.to_columns();
    /// assert_eq!(columns.entry1.as_deref(), Some("08:00"));
    /// assert_eq!(columns.exit1.as_deref(), Some("10:00"));
    /// assert_eq!(columns.entry2, None);
    /// ```
    pub fn to_columns(&self) -> PunchColumns {
        let column = |index: usize| self.values.get(index).map(Minute::to_string);
        PunchColumns {
            entry1: column(0),
            exit1: column(1),
            entry2: column(2),
            exit2: column(3),
            entry3: column(4),
            exit3: column(5),
        }
    }

    /// Renders the values back as `HH:MM` raw punches.
    pub fn to_raw_punches(&self) -> Vec<String> {
        self.values.iter().map(Minute::to_string).collect()
    }
}

/// The six labeled punch fields of a card row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PunchColumns {
    /// First entry.
    #[serde(default)]
    pub entry1: Option<String>,
    /// First exit.
    #[serde(default)]
    pub exit1: Option<String>,
    /// Second entry.
    #[serde(default)]
    pub entry2: Option<String>,
    /// Second exit.
    #[serde(default)]
    pub exit2: Option<String>,
    /// Third entry.
    #[serde(default)]
    pub entry3: Option<String>,
    /// Third exit.
    #[serde(default)]
    pub exit3: Option<String>,
}

impl PunchColumns {
    /// Returns the fields in column order.
    pub fn fields(&self) -> [&Option<String>; 6] {
        [
            &self.entry1,
            &self.exit1,
            &self.entry2,
            &self.exit2,
            &self.entry3,
            &self.exit3,
        ]
    }

    /// Returns mutable references to the fields in column order.
    pub fn fields_mut(&mut self) -> [&mut Option<String>; 6] {
        [
            &mut self.entry1,
            &mut self.exit1,
            &mut self.entry2,
            &mut self.exit2,
            &mut self.entry3,
            &mut self.exit3,
        ]
    }

    /// Flattens the columns into a canonical raw punch sequence.
    ///
    /// Empty columns become empty strings so the column positions survive.
    pub fn to_raw_punches(&self) -> Vec<String> {
        self.fields()
            .into_iter()
            .map(|field| field.clone().unwrap_or_default())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minutes(values: &[u16]) -> Vec<Minute> {
        values.iter().map(|v| Minute::new(*v).unwrap()).collect()
    }

    #[test]
    fn test_minute_display_is_zero_padded() {
        assert_eq!(Minute::new(0).unwrap().to_string(), "00:00");
        assert_eq!(Minute::new(545).unwrap().to_string(), "09:05");
        assert_eq!(Minute::END_OF_DAY.to_string(), "24:00");
    }

    #[test]
    fn test_minute_rejects_out_of_range() {
        assert!(Minute::new(1500).is_none());
        assert!(Minute::from_hm(25, 0).is_none());
        assert!(Minute::from_hm(8, 60).is_none());
    }

    #[test]
    fn test_hour_24_accepts_any_minute() {
        assert_eq!(Minute::from_hm(24, 0), Some(Minute::END_OF_DAY));
        assert_eq!(Minute::from_hm(24, 59), Some(Minute::MAX));
        assert_eq!(Minute::from_hm(24, 30).unwrap().to_string(), "24:30");
    }

    #[test]
    fn test_minute_deserialization_validates_range() {
        let ok: Minute = serde_json::from_str("480").unwrap();
        assert_eq!(ok.value(), 480);
        assert!(serde_json::from_str::<Minute>("2000").is_err());
    }

    #[test]
    fn test_minutes_until_can_be_negative() {
        let eight = Minute::from_hm(8, 0).unwrap();
        let ten = Minute::from_hm(10, 0).unwrap();
        assert_eq!(eight.minutes_until(ten), 120);
        assert_eq!(ten.minutes_until(eight), -120);
    }

    #[test]
    fn test_pairs_skip_unpaired_trailing_entry() {
        let punches = NormalizedPunches::from_sorted(minutes(&[480, 720, 780]));
        let pairs: Vec<_> = punches.pairs().collect();
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].0.value(), 480);
        assert_eq!(pairs[0].1.value(), 720);
    }

    #[test]
    fn test_breaks_ignore_trailing_entry() {
        let punches = NormalizedPunches::from_sorted(minutes(&[480, 720, 780, 1080, 1100]));
        let breaks: Vec<_> = punches.breaks().collect();
        assert_eq!(breaks, vec![60]);

        let single_block = NormalizedPunches::from_sorted(minutes(&[480, 900, 960]));
        assert_eq!(single_block.breaks().count(), 0);
    }

    #[test]
    fn test_from_sorted_truncates_to_three_pairs() {
        let punches =
            NormalizedPunches::from_sorted(minutes(&[60, 120, 180, 240, 300, 360, 420, 480]));
        assert_eq!(punches.values().len(), NormalizedPunches::MAX_VALUES);
        assert_eq!(punches.to_columns().exit3.as_deref(), Some("06:00"));
    }

    #[test]
    fn test_columns_to_raw_punches_keeps_positions() {
        let columns = PunchColumns {
            entry1: Some("08:00".to_string()),
            exit1: None,
            entry2: Some("13:00".to_string()),
            ..Default::default()
        };
        assert_eq!(
            columns.to_raw_punches(),
            vec!["08:00", "", "13:00", "", "", ""]
        );
        assert!(PunchColumns::default().to_raw_punches().iter().all(String::is_empty));
    }
}
