//! Overtime calculation.
//!
//! This module computes overtime for one employee over one pay period from
//! their completed hours per calendar day. Both the daily and the weekly
//! figure are always produced; the configured [`OvertimeMethod`] decides which
//! one is reported as the total.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::models::{OvertimeBreakdown, OvertimeHours, OvertimeMethod, OvertimeSettings};

const DAYS_PER_WEEK: Decimal = Decimal::from_parts(7, 0, 0, false, 0);

/// Hours in excess of `threshold`, or zero.
///
/// # Examples
///
/// ```
/// use studio_payroll::calculation::hours_over_threshold;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let threshold = Decimal::from(8);
/// assert_eq!(hours_over_threshold(Decimal::from_str("10.5").unwrap(), threshold), Decimal::from_str("2.5").unwrap());
/// assert_eq!(hours_over_threshold(Decimal::from(6), threshold), Decimal::ZERO);
/// ```
pub fn hours_over_threshold(hours: Decimal, threshold: Decimal) -> Decimal {
    if hours > threshold {
        hours - threshold
    } else {
        Decimal::ZERO
    }
}

/// Computes daily and weekly overtime for one employee in one period.
///
/// - Daily overtime is the sum over days of the hours above
///   `daily_threshold`.
/// - Under the weekly method, weekly overtime is the period total above
///   `weekly_threshold`. The whole pay period is one bucket, whatever its
///   length.
/// - Under the daily method, the weekly figure is informational: the period
///   total above `weekly_threshold` scaled by `period_days / 7`.
///
/// All figures are rounded to two decimal places.
///
/// # Example
///
/// ```
/// use studio_payroll::calculation::compute_overtime;
/// use studio_payroll::models::{OvertimeMethod, OvertimeSettings};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
/// use std::collections::BTreeMap;
///
/// let d = |day| NaiveDate::from_ymd_opt(2025, 1, day).unwrap();
/// let mut hours = BTreeMap::new();
/// hours.insert(d(6), Decimal::from(10));
/// hours.insert(d(7), Decimal::from(6));
///
/// let overtime = compute_overtime(&hours, &OvertimeSettings::default(), d(1), d(14));
/// assert_eq!(overtime.daily.hours, Decimal::from(2));
/// assert_eq!(overtime.total.hours, Decimal::from(2));
/// assert_eq!(overtime.calculation_method, OvertimeMethod::Daily);
/// ```
pub fn compute_overtime(
    daily_hours: &BTreeMap<NaiveDate, Decimal>,
    settings: &OvertimeSettings,
    period_start: NaiveDate,
    period_end: NaiveDate,
) -> OvertimeBreakdown {
    if daily_hours.is_empty() {
        return OvertimeBreakdown::none(settings.calculation_method);
    }

    let total_hours: Decimal = daily_hours.values().copied().sum();

    let daily: Decimal = daily_hours
        .values()
        .map(|hours| hours_over_threshold(*hours, settings.daily_threshold))
        .sum();

    let weekly = match settings.calculation_method {
        OvertimeMethod::Weekly => hours_over_threshold(total_hours, settings.weekly_threshold),
        OvertimeMethod::Daily => {
            let period_days = Decimal::from((period_end - period_start).num_days() + 1);
            let regular_budget = settings.weekly_threshold * period_days / DAYS_PER_WEEK;
            hours_over_threshold(total_hours, regular_budget)
        }
    };

    let total = match settings.calculation_method {
        OvertimeMethod::Daily => daily,
        OvertimeMethod::Weekly => weekly,
    };

    OvertimeBreakdown {
        daily: OvertimeHours {
            hours: daily.round_dp(2),
        },
        weekly: OvertimeHours {
            hours: weekly.round_dp(2),
        },
        total: OvertimeHours {
            hours: total.round_dp(2),
        },
        calculation_method: settings.calculation_method,
    }
}
