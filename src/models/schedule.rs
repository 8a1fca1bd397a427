//! Weekly schedule model.
//!
//! The schedule maps each weekday to the number of minutes the employee is
//! expected to work. It is written in configuration and requests as a map of
//! weekday names to `HH:MM` strings (or plain minute counts).

use chrono::Weekday;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::calculation::{minutes_to_time, parse_time_token};

/// Minutes in a full day; the upper bound for any daily target.
pub const MINUTES_PER_DAY: u16 = 1440;

/// Target worked minutes per weekday, indexed `0 = Sunday` .. `6 = Saturday`.
///
/// # Example
///
/// ```
/// use timesheet_engine::models::Schedule;
/// use chrono::Weekday;
///
/// let schedule = Schedule::new([0, 480, 480, 480, 480, 480, 240]);
/// assert_eq!(schedule.target_for(Weekday::Mon), 480);
/// assert_eq!(schedule.target_for(Weekday::Sun), 0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ScheduleEntries", into = "ScheduleEntries")]
pub struct Schedule {
    targets: [u16; 7],
}

impl Schedule {
    /// Creates a schedule, clamping each target to a full day.
    pub fn new(targets: [u16; 7]) -> Self {
        Self {
            targets: targets.map(|t| t.min(MINUTES_PER_DAY)),
        }
    }

    /// Returns the target minutes for a weekday.
    pub fn target_for(&self, weekday: Weekday) -> u16 {
        self.targets[weekday.num_days_from_sunday() as usize]
    }
}

impl Default for Schedule {
    /// A 44-hour week: 8 hours Monday to Friday, 4 hours on Saturday.
    fn default() -> Self {
        Self::new([0, 480, 480, 480, 480, 480, 240])
    }
}

/// A schedule value as written by a user: `"08:00"` or `480`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScheduleValue {
    /// A plain minute count.
    Minutes(u32),
    /// An `HH:MM` style duration.
    Text(String),
}

impl ScheduleValue {
    /// Resolves the value to minutes.
    ///
    /// Unparseable or out-of-range values yield zero (no target) and are
    /// logged; a broken schedule cell must not stop the month from computing.
    fn to_minutes(&self, weekday: &str) -> u16 {
        let minutes = match self {
            ScheduleValue::Minutes(m) => u16::try_from(*m).ok(),
            ScheduleValue::Text(text) => parse_time_token(text).map(|m| m.value()),
        };
        match minutes {
            Some(m) if m <= MINUTES_PER_DAY => m,
            _ => {
                warn!(weekday, value = ?self, "Unparseable schedule value, using zero target");
                0
            }
        }
    }
}

/// The wire/config form of a [`Schedule`]; missing weekdays mean no target.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntries {
    /// Sunday target.
    #[serde(default)]
    pub sunday: Option<ScheduleValue>,
    /// Monday target.
    #[serde(default)]
    pub monday: Option<ScheduleValue>,
    /// Tuesday target.
    #[serde(default)]
    pub tuesday: Option<ScheduleValue>,
    /// Wednesday target.
    #[serde(default)]
    pub wednesday: Option<ScheduleValue>,
    /// Thursday target.
    #[serde(default)]
    pub thursday: Option<ScheduleValue>,
    /// Friday target.
    #[serde(default)]
    pub friday: Option<ScheduleValue>,
    /// Saturday target.
    #[serde(default)]
    pub saturday: Option<ScheduleValue>,
}

impl From<ScheduleEntries> for Schedule {
    fn from(entries: ScheduleEntries) -> Self {
        let resolve = |value: &Option<ScheduleValue>, weekday: &str| {
            value.as_ref().map_or(0, |v| v.to_minutes(weekday))
        };
        Schedule::new([
            resolve(&entries.sunday, "sunday"),
            resolve(&entries.monday, "monday"),
            resolve(&entries.tuesday, "tuesday"),
            resolve(&entries.wednesday, "wednesday"),
            resolve(&entries.thursday, "thursday"),
            resolve(&entries.friday, "friday"),
            resolve(&entries.saturday, "saturday"),
        ])
    }
}

impl From<Schedule> for ScheduleEntries {
    fn from(schedule: Schedule) -> Self {
        let text = |index: usize| Some(ScheduleValue::Text(minutes_to_time(schedule.targets[index])));
        ScheduleEntries {
            sunday: text(0),
            monday: text(1),
            tuesday: text(2),
            wednesday: text(3),
            thursday: text(4),
            friday: text(5),
            saturday: text(6),
        }
    }
}
