//! Presentation helpers embedded in summaries.
//!
//! Summaries carry pre-formatted strings so that every consumer renders hours,
//! money and period labels identically.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

/// Formats a number of hours as "8h 30m", rounded to the nearest minute.
///
/// Negative inputs format as "0h 0m".
///
/// # Examples
///
/// ```
/// use studio_payroll::format::format_duration;
/// use rust_decimal::Decimal;
///
/// assert_eq!(format_duration(Decimal::new(85, 1)), "8h 30m");
/// assert_eq!(format_duration(Decimal::new(25, 2)), "0h 15m");
/// assert_eq!(format_duration(Decimal::from(12)), "12h 0m");
/// ```
pub fn format_duration(hours: Decimal) -> String {
    let minutes = (hours * Decimal::from(60))
        .round()
        .to_i64()
        .unwrap_or(0)
        .max(0);
    format!("{}h {}m", minutes / 60, minutes % 60)
}

/// Formats an amount as dollars with two decimals, e.g. "$16.25".
pub fn format_currency(amount: Decimal) -> String {
    let mut rounded = amount.round_dp(2);
    rounded.rescale(2);
    format!("${}", rounded)
}

/// Formats a distance with one decimal, e.g. "25.0 mi".
///
/// # Examples
///
/// ```
/// use studio_payroll::format::format_miles;
/// use rust_decimal::Decimal;
///
/// assert_eq!(format_miles(Decimal::from(25)), "25.0 mi");
/// assert_eq!(format_miles(Decimal::new(1234, 2)), "12.3 mi");
/// ```
pub fn format_miles(miles: Decimal) -> String {
    let mut rounded = miles.round_dp(1);
    rounded.rescale(1);
    format!("{} mi", rounded)
}

/// Returns the English ordinal suffix for a day of month.
///
/// # Examples
///
/// ```
/// use studio_payroll::format::ordinal_suffix;
///
/// assert_eq!(ordinal_suffix(1), "st");
/// assert_eq!(ordinal_suffix(12), "th");
/// assert_eq!(ordinal_suffix(22), "nd");
/// assert_eq!(ordinal_suffix(23), "rd");
/// ```
pub fn ordinal_suffix(day: u32) -> &'static str {
    if (11..=13).contains(&(day % 100)) {
        return "th";
    }
    match day % 10 {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    }
}

fn ordinal(day: u32) -> String {
    format!("{}{}", day, ordinal_suffix(day))
}

/// Label used for weekly and bi-weekly periods: "Jan 1 - Jan 14, 2025".
pub fn short_range_label(start: NaiveDate, end: NaiveDate) -> String {
    if start.year() == end.year() {
        format!(
            "{} - {}, {}",
            start.format("%b %-d"),
            end.format("%b %-d"),
            end.year()
        )
    } else {
        format!("{} - {}", start.format("%b %-d, %Y"), end.format("%b %-d, %Y"))
    }
}

/// Label used for semi-monthly and monthly periods: "January 1st - 15th, 2025".
///
/// # Examples
///
/// ```
/// use studio_payroll::format::ordinal_range_label;
/// use chrono::NaiveDate;
///
/// let d = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap();
/// assert_eq!(ordinal_range_label(d(2025, 1, 1), d(2025, 1, 15)), "January 1st - 15th, 2025");
/// assert_eq!(
///     ordinal_range_label(d(2025, 1, 16), d(2025, 2, 15)),
///     "January 16th - February 15th, 2025"
/// );
/// ```
pub fn ordinal_range_label(start: NaiveDate, end: NaiveDate) -> String {
    let start_month = start.format("%B");
    let end_month = end.format("%B");
    if start.year() != end.year() {
        format!(
            "{} {}, {} - {} {}, {}",
            start_month,
            ordinal(start.day()),
            start.year(),
            end_month,
            ordinal(end.day()),
            end.year()
        )
    } else if start.month() != end.month() {
        format!(
            "{} {} - {} {}, {}",
            start_month,
            ordinal(start.day()),
            end_month,
            ordinal(end.day()),
            end.year()
        )
    } else {
        format!(
            "{} {} - {}, {}",
            start_month,
            ordinal(start.day()),
            ordinal(end.day()),
            end.year()
        )
    }
}
