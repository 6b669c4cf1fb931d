//! Pay period model.
//!
//! This module contains the [`Period`] type produced by the boundary
//! calculator. Periods are derived on demand and never persisted.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// An inclusive calendar-date interval with a display label.
///
/// # Example
///
/// ```
/// use studio_payroll::models::Period;
/// use chrono::NaiveDate;
///
/// let period = Period::new(
///     NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2025, 1, 14).unwrap(),
///     "Jan 1 - Jan 14, 2025",
/// );
///
/// assert!(period.contains_date(NaiveDate::from_ymd_opt(2025, 1, 14).unwrap()));
/// assert_eq!(period.days(), 14);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Period {
    /// The first day of the period (inclusive).
    pub start: NaiveDate,
    /// The last day of the period (inclusive).
    pub end: NaiveDate,
    /// Human-readable label, e.g. "January 1st - 15th, 2025".
    pub label: String,
}

impl Period {
    /// Creates a new period.
    pub fn new(start: NaiveDate, end: NaiveDate, label: impl Into<String>) -> Self {
        Self {
            start,
            end,
            label: label.into(),
        }
    }

    /// Checks if a given date falls within this period, inclusive of both ends.
    ///
    /// # Example
    ///
    /// ```
    /// use studio_payroll::models::Period;
    /// use chrono::NaiveDate;
    ///
    /// let period = Period::new(
    ///     NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
    ///     NaiveDate::from_ymd_opt(2025, 1, 7).unwrap(),
    ///     "",
    /// );
    /// assert!(period.contains_date(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()));
    /// assert!(!period.contains_date(NaiveDate::from_ymd_opt(2025, 1, 8).unwrap()));
    /// ```
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Returns true if this period shares at least one day with `[start, end]`.
    pub fn overlaps(&self, start: NaiveDate, end: NaiveDate) -> bool {
        self.start <= end && self.end >= start
    }

    /// Number of calendar days in the period.
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}
