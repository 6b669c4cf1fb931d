//! Pay period boundary calculation.
//!
//! This module partitions a date range into the pay periods defined by a
//! [`PayPeriodPolicy`]. All arithmetic is on calendar dates
//! ([`chrono::NaiveDate`]); no time of day or timezone is involved, so a date
//! can never drift into a neighbouring period.
//!
//! Periods are a pure function of the schedule: the same date always lands in
//! the same period no matter which window it was generated for. The locator
//! relies on this when it regenerates a window around the previous period.

use chrono::{Datelike, Days, NaiveDate, TimeDelta, Weekday};
use tracing::{debug, error, warn};

use crate::error::{PayrollError, PayrollResult};
use crate::format::{ordinal_range_label, short_range_label};
use crate::models::{PayPeriodPolicy, PaySchedule, Period};

use super::validation::validate_period_boundaries;

/// Length of a weekly period in days.
pub const WEEKLY_PERIOD_DAYS: i64 = 7;

/// Length of a bi-weekly period in days.
pub const BI_WEEKLY_PERIOD_DAYS: i64 = 14;

/// Calculates the pay periods covering `[range_start, range_end]`.
///
/// Returns the periods in chronological order. The first period contains
/// `range_start`, the last contains `range_end`, and consecutive periods are
/// exactly adjacent.
///
/// An inactive policy yields a single period spanning the whole range.
///
/// # Errors
///
/// - [`PayrollError::InvalidDateRange`] if `range_start > range_end`
/// - [`PayrollError::InvalidPolicy`] if the policy configuration fails validation
/// - [`PayrollError::PeriodOutOfRange`] if a period touching the range falls
///   outside the representable calendar
/// - [`PayrollError::BoundaryViolation`] if the generated list does not
///   partition the range
///
/// # Examples
///
/// ## Bi-weekly periods step exactly 14 days from the anchor
///
/// ```
/// use studio_payroll::calculation::calculate_boundaries;
/// use studio_payroll::models::PayPeriodPolicy;
/// use chrono::NaiveDate;
///
/// let d = |m, d| NaiveDate::from_ymd_opt(2025, m, d).unwrap();
/// let policy = PayPeriodPolicy::bi_weekly(d(1, 1));
///
/// let periods = calculate_boundaries(d(1, 1), d(1, 20), &policy).unwrap();
/// assert_eq!(periods.len(), 2);
/// assert_eq!((periods[0].start, periods[0].end), (d(1, 1), d(1, 14)));
/// assert_eq!((periods[1].start, periods[1].end), (d(1, 15), d(1, 28)));
/// ```
///
/// ## Monthly periods clamp to short months
///
/// ```
/// use studio_payroll::calculation::calculate_boundaries;
/// use studio_payroll::models::PayPeriodPolicy;
/// use chrono::NaiveDate;
///
/// let d = |m, d| NaiveDate::from_ymd_opt(2025, m, d).unwrap();
/// let policy = PayPeriodPolicy::monthly(31);
///
/// let periods = calculate_boundaries(d(2, 10), d(2, 10), &policy).unwrap();
/// assert_eq!((periods[0].start, periods[0].end), (d(1, 31), d(2, 27)));
/// ```
pub fn calculate_boundaries(
    range_start: NaiveDate,
    range_end: NaiveDate,
    policy: &PayPeriodPolicy,
) -> PayrollResult<Vec<Period>> {
    if range_start > range_end {
        return Err(PayrollError::InvalidDateRange {
            start: range_start,
            end: range_end,
        });
    }

    if !policy.is_active {
        debug!(
            range_start = %range_start,
            range_end = %range_end,
            "Pay period policy inactive, using the whole range as one period"
        );
        return Ok(vec![single_period(range_start, range_end)]);
    }

    let schedule = policy.schedule()?;
    let periods = periods_for_schedule(&schedule, range_start, range_end)?;

    let issues = validate_period_boundaries(&periods, range_start, range_end);
    if let Some(issue) = issues.first() {
        error!(
            period_type = %policy.period_type,
            range_start = %range_start,
            range_end = %range_end,
            issue_count = issues.len(),
            first_issue = %issue,
            "Generated pay periods do not partition the range"
        );
        return Err(PayrollError::BoundaryViolation {
            message: issue.to_string(),
        });
    }

    debug!(
        period_type = %policy.period_type,
        range_start = %range_start,
        range_end = %range_end,
        period_count = periods.len(),
        "Calculated pay period boundaries"
    );
    Ok(periods)
}

/// Calculates pay periods, falling back to a single period on any error.
///
/// For callers that must always render something (a payroll page with broken
/// settings). The error is logged at `warn` level. An inverted range yields
/// no periods.
///
/// # Example
///
/// ```
/// use studio_payroll::calculation::calculate_boundaries_or_fallback;
/// use studio_payroll::models::PayPeriodPolicy;
/// use chrono::NaiveDate;
///
/// let d = |m, d| NaiveDate::from_ymd_opt(2025, m, d).unwrap();
/// let broken = PayPeriodPolicy::semi_monthly(15, 15);
///
/// let periods = calculate_boundaries_or_fallback(d(1, 1), d(1, 31), &broken);
/// assert_eq!(periods.len(), 1);
/// assert_eq!((periods[0].start, periods[0].end), (d(1, 1), d(1, 31)));
/// ```
pub fn calculate_boundaries_or_fallback(
    range_start: NaiveDate,
    range_end: NaiveDate,
    policy: &PayPeriodPolicy,
) -> Vec<Period> {
    match calculate_boundaries(range_start, range_end, policy) {
        Ok(periods) => periods,
        Err(PayrollError::InvalidDateRange { start, end }) => {
            warn!(range_start = %start, range_end = %end, "Inverted pay period range");
            Vec::new()
        }
        Err(err) => {
            warn!(
                period_type = %policy.period_type,
                error = %err,
                "Pay period calculation failed, falling back to a single period"
            );
            vec![single_period(range_start, range_end)]
        }
    }
}

/// Generates the periods of a validated schedule that overlap the range.
///
/// Returns [`PayrollError::PeriodOutOfRange`] when a period touching the range
/// would start or end outside the dates `chrono` can represent.
pub fn periods_for_schedule(
    schedule: &PaySchedule,
    range_start: NaiveDate,
    range_end: NaiveDate,
) -> PayrollResult<Vec<Period>> {
    let periods = match *schedule {
        PaySchedule::Weekly { week_start } => weekly_periods(week_start, range_start, range_end),
        PaySchedule::BiWeekly { anchor } => bi_weekly_periods(anchor, range_start, range_end),
        PaySchedule::SemiMonthly {
            first_day,
            second_day,
        } => semi_monthly_periods(first_day, second_day, range_start, range_end),
        PaySchedule::Monthly { day_of_month } => {
            monthly_periods(day_of_month, range_start, range_end)
        }
    };

    periods.ok_or_else(|| {
        warn!(
            range_start = %range_start,
            range_end = %range_end,
            "Pay periods for the range overflow the supported calendar"
        );
        PayrollError::PeriodOutOfRange {
            start: range_start,
            end: range_end,
        }
    })
}

fn single_period(start: NaiveDate, end: NaiveDate) -> Period {
    Period::new(start, end, short_range_label(start, end))
}

fn fixed_length_periods(
    mut period_start: NaiveDate,
    length_days: i64,
    range_end: NaiveDate,
) -> Option<Vec<Period>> {
    let length = Days::new(length_days.unsigned_abs());
    let last_offset = Days::new(length_days.unsigned_abs() - 1);
    let mut periods = Vec::new();
    while period_start <= range_end {
        let period_end = period_start.checked_add_days(last_offset)?;
        periods.push(Period::new(
            period_start,
            period_end,
            short_range_label(period_start, period_end),
        ));
        // Always advance by the full length, never from period_end.
        // A period ending on the last representable date covers the range.
        match period_start.checked_add_days(length) {
            Some(next_start) => period_start = next_start,
            None => break,
        }
    }
    Some(periods)
}

fn weekly_periods(
    week_start: Weekday,
    range_start: NaiveDate,
    range_end: NaiveDate,
) -> Option<Vec<Period>> {
    let offset = (range_start.weekday().num_days_from_sunday() + 7
        - week_start.num_days_from_sunday())
        % 7;
    let first_start = range_start.checked_sub_days(Days::new(u64::from(offset)))?;
    fixed_length_periods(first_start, WEEKLY_PERIOD_DAYS, range_end)
}

fn bi_weekly_periods(
    anchor: NaiveDate,
    range_start: NaiveDate,
    range_end: NaiveDate,
) -> Option<Vec<Period>> {
    let days_diff = range_start.signed_duration_since(anchor).num_days();
    let period_index = days_diff.div_euclid(BI_WEEKLY_PERIOD_DAYS);
    let mut first_start =
        anchor.checked_add_signed(TimeDelta::try_days(period_index * BI_WEEKLY_PERIOD_DAYS)?)?;
    if first_start > range_start {
        first_start = first_start.checked_sub_days(Days::new(BI_WEEKLY_PERIOD_DAYS as u64))?;
    }
    fixed_length_periods(first_start, BI_WEEKLY_PERIOD_DAYS, range_end)
}

fn semi_monthly_periods(
    first_day: u32,
    second_day: u32,
    range_start: NaiveDate,
    range_end: NaiveDate,
) -> Option<Vec<Period>> {
    let mut periods = Vec::new();
    for (year, month) in months_touching(range_start, range_end) {
        let (next_year, next_month) = next_month(year, month);
        let first = clamped_date(year, month, first_day)?;
        let second = clamped_date(year, month, second_day)?;
        let next_first = clamped_date(next_year, next_month, first_day)?;

        // Both days clamp to the same date in short months (30th/31st in
        // February); the first half is then empty and skipped.
        if second > first {
            push_overlapping(&mut periods, first, second.pred_opt()?, range_start, range_end);
        }
        push_overlapping(&mut periods, second, next_first.pred_opt()?, range_start, range_end);
    }
    Some(periods)
}

fn monthly_periods(
    day_of_month: u32,
    range_start: NaiveDate,
    range_end: NaiveDate,
) -> Option<Vec<Period>> {
    let mut periods = Vec::new();
    for (year, month) in months_touching(range_start, range_end) {
        let (next_year, next_month) = next_month(year, month);
        let start = clamped_date(year, month, day_of_month)?;
        let next_start = clamped_date(next_year, next_month, day_of_month)?;
        push_overlapping(&mut periods, start, next_start.pred_opt()?, range_start, range_end);
    }
    Some(periods)
}

fn push_overlapping(
    periods: &mut Vec<Period>,
    start: NaiveDate,
    end: NaiveDate,
    range_start: NaiveDate,
    range_end: NaiveDate,
) {
    let period = Period::new(start, end, ordinal_range_label(start, end));
    if period.overlaps(range_start, range_end) {
        periods.push(period);
    }
}

/// Months from the one before `range_start` through the month of `range_end`.
///
/// The preceding month is included because its last period can extend into
/// the month `range_start` falls in.
fn months_touching(range_start: NaiveDate, range_end: NaiveDate) -> Vec<(i32, u32)> {
    let mut months = Vec::new();
    let (mut year, mut month) = previous_month(range_start.year(), range_start.month());
    while (year, month) <= (range_end.year(), range_end.month()) {
        months.push((year, month));
        (year, month) = next_month(year, month);
    }
    months
}

fn next_month(year: i32, month: u32) -> (i32, u32) {
    if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    }
}

fn previous_month(year: i32, month: u32) -> (i32, u32) {
    if month == 1 {
        (year - 1, 12)
    } else {
        (year, month - 1)
    }
}

/// Number of days in the given month.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 31,
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

fn clamped_date(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day.min(days_in_month(year, month)))
}
