//! Weekly paid-rest (DSR) engine.
//!
//! Decides, for every day of a month, whether it is an ordinary day, a fault,
//! a compensatory rest day or a premium day, and how many paid weekly rest
//! days each week loses.
//!
//! The engine runs as five passes. Each pass is a pure function that reads
//! the records of the previous ones and produces its own short-lived records:
//!
//! 1. [`DayClassification`]: date, weekday, holiday, target, worked time and
//!    the candidate-fault flag; days are bucketed into [`WeekGroup`]s
//! 2. [`CompensationOutcome`]: a worked Sunday converts one fault of its week
//!    into compensatory rest, or gets flagged when none exists
//! 3. final faults after user overrides
//! 4. [`DayResult`]: premium status, overtime and deficit
//! 5. [`WeekSummary`]: paid rest lost per week
//!
//! Nothing is updated in place and nothing is carried between runs; editing
//! any field means running the whole month again.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{
    DayRecord, DayResult, NormalizedPunches, ReferencePeriod, Schedule, SundayMode, WeekSummary,
};

use super::daily_balance::{DailyBalance, calculate_daily_balance};
use super::holiday_calendar::HolidayCalendar;

/// One day handed to the engine: the clerk-editable record plus its
/// normalized punches.
#[derive(Debug, Clone, Copy)]
pub struct DayInput<'a> {
    /// The day record.
    pub record: &'a DayRecord,
    /// Normalized punches of the record.
    pub punches: &'a NormalizedPunches,
}

/// The read-only configuration a run depends on.
#[derive(Debug, Clone, Copy)]
pub struct DsrRules<'a> {
    /// Target minutes per weekday.
    pub schedule: &'a Schedule,
    /// Holiday lookup.
    pub calendar: &'a HolidayCalendar,
    /// Label markers that declare a scheduled day off.
    pub day_off_labels: &'a [String],
}

/// Pass 1 output for one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayClassification {
    /// Day of the month.
    pub day: u8,
    /// Calendar date, or `None` when the day does not exist in the month.
    pub date: Option<NaiveDate>,
    /// Weekday index, `0 = Sunday` .. `6 = Saturday`.
    pub weekday_index: Option<u32>,
    /// Week-of-year bucket; days without a date are not grouped.
    pub week_number: Option<u32>,
    /// Holiday name, if any.
    pub holiday_name: Option<String>,
    /// Worked time, target and raw balance.
    pub balance: DailyBalance,
    /// Zero work against a non-zero target with no excusing condition.
    pub is_candidate_fault: bool,
}

impl DayClassification {
    /// Returns `true` when the day is a holiday.
    pub fn is_holiday(&self) -> bool {
        self.holiday_name.is_some()
    }

    /// Returns `true` when the day is a Sunday.
    pub fn is_sunday(&self) -> bool {
        self.weekday_index == Some(0)
    }
}

/// A week bucket and what it contains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekGroup {
    /// Week-of-year bucket.
    pub week_number: u32,
    /// Indexes of the member days in the run's input order.
    pub members: Vec<usize>,
    /// At least one member is a holiday.
    pub has_holiday: bool,
    /// A holiday of this week falls on its Sunday.
    pub holiday_falls_on_sunday: bool,
    /// A holiday of this week falls on a day other than Sunday.
    pub has_weekday_holiday: bool,
}

/// Pass 2 output for one day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompensationOutcome {
    /// The fault was converted into rest for the worked Sunday.
    pub is_compensatory_rest: bool,
    /// This Sunday was worked and no fault of its week could compensate it.
    pub is_sunday_worked_without_rest: bool,
}

/// The engine's output for one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayOutcome {
    /// Calendar classification.
    pub classification: DayClassification,
    /// Accounting result.
    pub result: DayResult,
}

/// The engine's output for a month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DsrOutcome {
    /// One outcome per input day, in input order.
    pub days: Vec<DayOutcome>,
    /// Week summaries ordered by week number.
    pub weeks: Vec<WeekSummary>,
}

/// Returns the week-of-year bucket of a date.
///
/// Buckets start on Sunday: the ordinal day is offset by the weekday of
/// January 1st and divided into 7-day buckets, counting from 1.
///
/// # Example
///
/// ```
/// use timesheet_engine::calculation::week_of_year;
/// use chrono::NaiveDate;
///
/// // 2026-01-01 is a Thursday; the first Sunday opens week 2
/// let jan = |d| NaiveDate::from_ymd_opt(2026, 1, d).unwrap();
/// assert_eq!(week_of_year(jan(1)), 1);
/// assert_eq!(week_of_year(jan(3)), 1);
/// assert_eq!(week_of_year(jan(4)), 2);
/// ```
pub fn week_of_year(date: NaiveDate) -> u32 {
    let ordinal0 = date.ordinal0();
    let weekday = date.weekday().num_days_from_sunday();
    let jan1_offset = (weekday + 7 - ordinal0 % 7) % 7;
    (ordinal0 + jan1_offset) / 7 + 1
}

/// Runs all five passes over one month.
///
/// Days should be given in day order; when a week has several possible
/// compensation days the earliest one is chosen.
///
/// # Example
///
/// ```
/// use timesheet_engine::calculation::{
///     DayInput, DsrRules, HolidayCalendar, normalize_punches, run_weekly_dsr,
/// };
/// use timesheet_engine::config::{LabelSettings, NormalizationSettings};
/// use timesheet_engine::models::{DayRecord, ReferencePeriod, Schedule};
///
/// // 2026-03-02 is a Monday with no punches: a fault
/// let record = DayRecord::new(2, vec![]);
/// let punches = normalize_punches(&record.raw_punches, &NormalizationSettings::default()).punches;
/// let inputs = [DayInput { record: &record, punches: &punches }];
///
/// let schedule = Schedule::default();
/// let calendar = HolidayCalendar::default();
/// let labels = LabelSettings::default().day_off;
/// let rules = DsrRules { schedule: &schedule, calendar: &calendar, day_off_labels: &labels };
///
/// let outcome = run_weekly_dsr(ReferencePeriod::new(2026, 3), &inputs, &rules);
/// assert!(outcome.days[0].result.is_falta);
/// assert_eq!(outcome.days[0].result.deficit_minutes, 480);
/// assert_eq!(outcome.weeks[0].dsr_days_lost, 1);
/// ```
pub fn run_weekly_dsr(
    period: ReferencePeriod,
    days: &[DayInput<'_>],
    rules: &DsrRules<'_>,
) -> DsrOutcome {
    let classified = classify_days(period, days, rules);
    let weeks = group_weeks(&classified);
    let compensation = compensate_sundays(&classified, days, &weeks);
    let faults = resolve_faults(&classified, days, &compensation);
    let results = classify_overtime(&classified, days, &compensation, &faults);
    let summaries = summarize_weeks(&weeks, &classified, &results);

    let days = classified
        .into_iter()
        .zip(results)
        .map(|(classification, result)| DayOutcome {
            classification,
            result,
        })
        .collect();

    DsrOutcome {
        days,
        weeks: summaries,
    }
}

// Pass 1

fn classify_days(
    period: ReferencePeriod,
    days: &[DayInput<'_>],
    rules: &DsrRules<'_>,
) -> Vec<DayClassification> {
    days.iter()
        .map(|input| classify_day(period, input, rules))
        .collect()
}

fn classify_day(
    period: ReferencePeriod,
    input: &DayInput<'_>,
    rules: &DsrRules<'_>,
) -> DayClassification {
    let record = input.record;
    let date = record.date_in(period.year, period.month);
    let weekday = date.map(|d| d.weekday());
    let holiday_name = date.and_then(|d| rules.calendar.holiday_on(d));
    let target_minutes = weekday.map_or(0, |w| u32::from(rules.schedule.target_for(w)));

    let is_holiday = holiday_name.is_some();
    let marked_day_off =
        record.is_explicit_weekend || record.label_marks_day_off(rules.day_off_labels);
    let is_day_off = is_holiday || marked_day_off || record.is_aboned || record.force_dsr();

    let balance = calculate_daily_balance(input.punches, target_minutes, is_day_off);
    let is_candidate_fault = target_minutes > 0
        && balance.worked_minutes == 0
        && !is_holiday
        && !record.is_aboned
        && !marked_day_off;

    DayClassification {
        day: record.day,
        date,
        weekday_index: weekday.map(|w| w.num_days_from_sunday()),
        week_number: date.map(week_of_year),
        holiday_name,
        balance,
        is_candidate_fault,
    }
}

fn group_weeks(classified: &[DayClassification]) -> Vec<WeekGroup> {
    let mut weeks: BTreeMap<u32, WeekGroup> = BTreeMap::new();

    for (index, day) in classified.iter().enumerate() {
        let Some(week_number) = day.week_number else {
            continue;
        };
        let group = weeks.entry(week_number).or_insert_with(|| WeekGroup {
            week_number,
            members: Vec::new(),
            has_holiday: false,
            holiday_falls_on_sunday: false,
            has_weekday_holiday: false,
        });
        group.members.push(index);
        if day.is_holiday() {
            group.has_holiday = true;
            if day.is_sunday() {
                group.holiday_falls_on_sunday = true;
            } else {
                group.has_weekday_holiday = true;
            }
        }
    }

    weeks.into_values().collect()
}

// Pass 2

fn compensate_sundays(
    classified: &[DayClassification],
    days: &[DayInput<'_>],
    weeks: &[WeekGroup],
) -> Vec<CompensationOutcome> {
    let mut outcomes = vec![CompensationOutcome::default(); classified.len()];

    for week in weeks {
        let Some(&sunday) = week
            .members
            .iter()
            .find(|&&i| classified[i].is_sunday() && classified[i].balance.worked_minutes > 0)
        else {
            continue;
        };

        let rest_day = week.members.iter().copied().find(|&i| {
            classified[i].is_candidate_fault
                && !classified[i].is_sunday()
                && !days[i].record.manually_disabled_dsr()
        });

        match rest_day {
            Some(index) => {
                outcomes[index].is_compensatory_rest = true;
                debug!(
                    week = week.week_number,
                    sunday = classified[sunday].day,
                    rest_day = classified[index].day,
                    "Converted fault into compensatory rest"
                );
            }
            None => {
                outcomes[sunday].is_sunday_worked_without_rest = true;
                debug!(
                    week = week.week_number,
                    sunday = classified[sunday].day,
                    "Sunday worked without rest day"
                );
            }
        }
    }

    outcomes
}

// Pass 3

fn resolve_faults(
    classified: &[DayClassification],
    days: &[DayInput<'_>],
    compensation: &[CompensationOutcome],
) -> Vec<bool> {
    classified
        .iter()
        .zip(days)
        .zip(compensation)
        .map(|((day, input), comp)| {
            day.is_candidate_fault && !comp.is_compensatory_rest && !input.record.force_dsr()
        })
        .collect()
}

// Pass 4

fn classify_overtime(
    classified: &[DayClassification],
    days: &[DayInput<'_>],
    compensation: &[CompensationOutcome],
    faults: &[bool],
) -> Vec<DayResult> {
    classified
        .iter()
        .zip(days)
        .zip(compensation)
        .zip(faults)
        .map(|(((day, input), comp), &is_falta)| day_result(day, input.record, comp, is_falta))
        .collect()
}

fn is_premium_day(day: &DayClassification, record: &DayRecord, comp: &CompensationOutcome) -> bool {
    match record.sunday_mode {
        SundayMode::ForceOff => false,
        SundayMode::ForceExtra => true,
        SundayMode::Auto => {
            day.is_holiday()
                || (day.is_sunday() && day.balance.target_minutes == 0)
                || comp.is_sunday_worked_without_rest
        }
    }
}

fn day_result(
    day: &DayClassification,
    record: &DayRecord,
    comp: &CompensationOutcome,
    is_falta: bool,
) -> DayResult {
    let worked = day.balance.worked_minutes;
    let target = day.balance.target_minutes;
    let is_premium_day = is_premium_day(day, record, comp);

    let (normal_overtime_minutes, special_overtime_minutes) = if is_premium_day {
        (0, worked)
    } else {
        (worked.saturating_sub(target), 0)
    };

    let deficit_minutes = if day.balance.is_day_off || comp.is_compensatory_rest {
        0
    } else {
        target.saturating_sub(worked)
    };

    let balance_minutes = if comp.is_compensatory_rest {
        worked as i32
    } else {
        day.balance.balance_minutes
    };

    DayResult {
        total_worked_minutes: worked,
        balance_minutes,
        is_falta,
        is_compensatory_rest: comp.is_compensatory_rest,
        is_sunday_worked_without_rest: comp.is_sunday_worked_without_rest,
        is_waived: record.is_aboned,
        is_premium_day,
        normal_overtime_minutes,
        special_overtime_minutes,
        deficit_minutes,
    }
}

// Pass 5

fn summarize_weeks(
    weeks: &[WeekGroup],
    classified: &[DayClassification],
    results: &[DayResult],
) -> Vec<WeekSummary> {
    weeks
        .iter()
        .map(|week| {
            let has_unresolved_fault = week.members.iter().any(|&i| results[i].is_falta);
            let dsr_days_lost = match (has_unresolved_fault, week.has_weekday_holiday) {
                (false, _) => 0,
                (true, false) => 1,
                (true, true) => 2,
            };
            if dsr_days_lost > 0 {
                debug!(week = week.week_number, dsr_days_lost, "Weekly paid rest lost");
            }

            WeekSummary {
                week_number: week.week_number,
                days: week.members.iter().map(|&i| classified[i].day).collect(),
                has_holiday: week.has_holiday,
                holiday_falls_on_sunday: week.holiday_falls_on_sunday,
                has_unresolved_fault,
                dsr_days_lost,
            }
        })
        .collect()
}
