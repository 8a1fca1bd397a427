//! Monthly timesheet calculation.
//!
//! [`calculate_month`] is the single entry point of the engine: it normalizes
//! every day, runs the weekly DSR passes, attaches labor warnings and sums
//! the month. It is total and deterministic; the same input always yields
//! the same report.

use rust_decimal::Decimal;
use tracing::debug;

use crate::config::EngineSettings;
use crate::models::{
    DayRecord, DayReport, MonthReport, MonthTotals, ReferencePeriod, Schedule, WeekSummary,
};

use super::holiday_calendar::HolidayCalendar;
use super::labor_warnings::detect_labor_warnings;
use super::normalizer::{NormalizationOutcome, normalize_punches};
use super::time_token::format_balance;
use super::weekly_dsr::{DayInput, DayOutcome, DsrRules, run_weekly_dsr};

/// Computes the timesheet of one employee month.
///
/// Records may come in any order; the report lists them by day.
///
/// # Example
///
/// ```
/// use timesheet_engine::calculation::{HolidayCalendar, calculate_month};
/// use timesheet_engine::config::EngineSettings;
/// use timesheet_engine::models::{DayRecord, ReferencePeriod, Schedule};
///
/// // Monday 2026-03-02, one hour of overtime
/// let records = vec![DayRecord::new(
///     2,
///     vec!["08:00".into(), "12:00".into(), "13:00".into(), "18:00".into()],
/// )];
///
/// let report = calculate_month(
///     ReferencePeriod::new(2026, 3),
///     &records,
///     &Schedule::default(),
///     &HolidayCalendar::default(),
///     &EngineSettings::default(),
/// );
///
/// assert_eq!(report.days[0].total_worked, "09:00");
/// assert_eq!(report.days[0].balance, "01:00");
/// assert_eq!(report.totals.normal_overtime_minutes, 60);
/// ```
pub fn calculate_month(
    period: ReferencePeriod,
    records: &[DayRecord],
    schedule: &Schedule,
    calendar: &HolidayCalendar,
    settings: &EngineSettings,
) -> MonthReport {
    let mut ordered: Vec<&DayRecord> = records.iter().collect();
    ordered.sort_by_key(|record| record.day);

    let normalized: Vec<NormalizationOutcome> = ordered
        .iter()
        .map(|record| normalize_punches(&record.raw_punches, &settings.normalization))
        .collect();

    let inputs: Vec<DayInput<'_>> = ordered
        .iter()
        .zip(&normalized)
        .map(|(&record, outcome)| DayInput {
            record,
            punches: &outcome.punches,
        })
        .collect();

    let rules = DsrRules {
        schedule,
        calendar,
        day_off_labels: &settings.labels.day_off,
    };
    let dsr = run_weekly_dsr(period, &inputs, &rules);

    let days: Vec<DayReport> = dsr
        .days
        .into_iter()
        .zip(&ordered)
        .zip(&normalized)
        .map(|((outcome, record), normalization)| {
            day_report(outcome, record, normalization, settings)
        })
        .collect();

    let totals = month_totals(&days, &dsr.weeks);

    debug!(
        year = period.year,
        month = period.month,
        days = days.len(),
        falta_count = totals.falta_count,
        dsr_days_lost = totals.dsr_days_lost,
        "Calculated month"
    );

    MonthReport {
        period,
        days,
        weeks: dsr.weeks,
        totals,
    }
}

fn day_report(
    outcome: DayOutcome,
    record: &DayRecord,
    normalization: &NormalizationOutcome,
    settings: &EngineSettings,
) -> DayReport {
    let DayOutcome {
        classification,
        result,
    } = outcome;

    let warnings = detect_labor_warnings(
        normalization.parsed_count(),
        &normalization.punches,
        &settings.warnings,
    );

    DayReport {
        day: classification.day,
        date: classification.date,
        weekday_index: classification.weekday_index,
        week_number: classification.week_number,
        holiday_name: classification.holiday_name,
        day_label: record.day_label.clone(),
        target_minutes: classification.balance.target_minutes,
        columns: normalization.punches.to_columns(),
        total_worked: format_balance(i64::from(result.total_worked_minutes)),
        balance: format_balance(i64::from(result.balance_minutes)),
        result,
        warnings,
    }
}

/// Sums the month over every day that is not waived.
fn month_totals(days: &[DayReport], weeks: &[WeekSummary]) -> MonthTotals {
    let mut totals = MonthTotals::default();

    for day in days {
        let result = &day.result;
        if result.is_waived {
            totals.waived_count += 1;
            continue;
        }
        totals.worked_minutes += result.total_worked_minutes;
        totals.balance_minutes += i64::from(result.balance_minutes);
        totals.normal_overtime_minutes += result.normal_overtime_minutes;
        totals.special_overtime_minutes += result.special_overtime_minutes;
        totals.deficit_minutes += result.deficit_minutes;
        totals.falta_count += u32::from(result.is_falta);
        totals.compensatory_rest_count += u32::from(result.is_compensatory_rest);
    }

    totals.dsr_days_lost = weeks.iter().map(|week| week.dsr_days_lost).sum();
    totals.worked_hours = minutes_to_hours(totals.worked_minutes);
    totals.normal_overtime_hours = minutes_to_hours(totals.normal_overtime_minutes);
    totals.special_overtime_hours = minutes_to_hours(totals.special_overtime_minutes);
    totals.deficit_hours = minutes_to_hours(totals.deficit_minutes);
    totals.balance = format_balance(totals.balance_minutes);
    totals
}

/// Converts minutes to hours, rounded to two decimal places.
fn minutes_to_hours(minutes: u32) -> Decimal {
    (Decimal::from(minutes) / Decimal::from(60)).round_dp(2)
}
