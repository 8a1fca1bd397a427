//! Result models produced by a timesheet pass.
//!
//! Everything here is derived: a [`MonthReport`] is rebuilt from scratch on
//! every recomputation and never patched in place.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{LaborWarning, PunchColumns};

/// The reference month of a timesheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReferencePeriod {
    /// Calendar year.
    pub year: i32,
    /// Month of the year (1–12).
    pub month: u32,
}

impl ReferencePeriod {
    /// Creates a reference period.
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    /// Returns `true` when `month` names a calendar month.
    pub fn is_valid(&self) -> bool {
        (1..=12).contains(&self.month)
    }
}

/// The accounting outcome for one day.
///
/// # Example
///
/// ```
/// use timesheet_engine::models::DayResult;
///
/// let result = DayResult {
///     total_worked_minutes: 540,
///     balance_minutes: 60,
///     normal_overtime_minutes: 60,
///     ..DayResult::default()
/// };
/// assert!(!result.is_falta);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayResult {
    /// Minutes worked according to the normalized punches.
    pub total_worked_minutes: u32,
    /// Worked minus target, or the full worked time on a day off.
    pub balance_minutes: i32,
    /// An unexcused absence on a scheduled workday.
    pub is_falta: bool,
    /// A fault converted into rest because the week's Sunday was worked.
    pub is_compensatory_rest: bool,
    /// The Sunday was worked and no rest day was found to compensate it.
    pub is_sunday_worked_without_rest: bool,
    /// An absence excused by the clerk; shown but excluded from totals.
    pub is_waived: bool,
    /// All worked minutes on this day are paid at the premium rate.
    pub is_premium_day: bool,
    /// Overtime at the normal rate.
    pub normal_overtime_minutes: u32,
    /// Overtime at the premium (100%) rate.
    pub special_overtime_minutes: u32,
    /// Minutes short of the day's target.
    pub deficit_minutes: u32,
}

/// One row of the computed timesheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayReport {
    /// Day of the month as read from the card.
    pub day: u8,
    /// Calendar date, when the day exists in the reference month.
    pub date: Option<NaiveDate>,
    /// Weekday index, `0 = Sunday` .. `6 = Saturday`.
    pub weekday_index: Option<u32>,
    /// Week-of-year bucket the day was grouped into.
    pub week_number: Option<u32>,
    /// Holiday name, if the date is a holiday.
    pub holiday_name: Option<String>,
    /// Label text from the card.
    pub day_label: Option<String>,
    /// Expected minutes for the weekday.
    pub target_minutes: u32,
    /// Normalized punches as `HH:MM` columns.
    pub columns: PunchColumns,
    /// Worked time as `HH:MM`.
    pub total_worked: String,
    /// Balance as `[-]HH:MM`.
    pub balance: String,
    /// The accounting outcome.
    pub result: DayResult,
    /// Review warnings.
    pub warnings: Vec<LaborWarning>,
}

/// Weekly paid-rest outcome for one week bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekSummary {
    /// Week-of-year bucket.
    pub week_number: u32,
    /// Days of the month in this week.
    pub days: Vec<u8>,
    /// The week contains at least one holiday.
    pub has_holiday: bool,
    /// A holiday of this week falls on its Sunday.
    pub holiday_falls_on_sunday: bool,
    /// The week contains a fault that was not compensated or overridden.
    pub has_unresolved_fault: bool,
    /// Paid rest days lost in this week (0, 1 or 2).
    pub dsr_days_lost: u32,
}

/// Aggregates over the month, excluding waived days.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthTotals {
    /// Total worked minutes.
    pub worked_minutes: u32,
    /// Sum of daily balances.
    pub balance_minutes: i64,
    /// Total normal overtime.
    pub normal_overtime_minutes: u32,
    /// Total premium overtime.
    pub special_overtime_minutes: u32,
    /// Total deficit.
    pub deficit_minutes: u32,
    /// Number of unresolved faults.
    pub falta_count: u32,
    /// Number of compensatory rest days granted.
    pub compensatory_rest_count: u32,
    /// Number of waived days (shown, not counted).
    pub waived_count: u32,
    /// Paid weekly rest days lost over the month.
    pub dsr_days_lost: u32,
    /// Worked time in hours.
    pub worked_hours: Decimal,
    /// Normal overtime in hours.
    pub normal_overtime_hours: Decimal,
    /// Premium overtime in hours.
    pub special_overtime_hours: Decimal,
    /// Deficit in hours.
    pub deficit_hours: Decimal,
    /// Balance as `[-]HH:MM`.
    pub balance: String,
}

/// The full computed timesheet for one employee month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthReport {
    /// Reference month.
    pub period: ReferencePeriod,
    /// One row per input day, in day order.
    pub days: Vec<DayReport>,
    /// Week-by-week paid rest outcome.
    pub weeks: Vec<WeekSummary>,
    /// Monthly aggregates.
    pub totals: MonthTotals,
}
