//! Date fields as they arrive from the document store.
//!
//! Store documents encode dates in several shapes: a `YYYY-MM-DD` string, an
//! RFC 3339 instant, or a `{seconds, nanoseconds}` timestamp object.
//! [`DateValue`] captures all of them so a document can be parsed in one pass,
//! and resolves to a canonical calendar date or instant exactly once, when the
//! document is converted into a record.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// A date-like field from a store document.
///
/// # Example
///
/// ```
/// use studio_payroll::models::DateValue;
/// use chrono::NaiveDate;
///
/// let from_string: DateValue = serde_json::from_str("\"2025-03-04\"").unwrap();
/// let from_timestamp: DateValue =
///     serde_json::from_str(r#"{"seconds": 1741046400, "nanoseconds": 0}"#).unwrap();
///
/// let expected = NaiveDate::from_ymd_opt(2025, 3, 4).unwrap();
/// assert_eq!(from_string.to_date(), Some(expected));
/// assert_eq!(from_timestamp.to_date(), Some(expected));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DateValue {
    /// Seconds and nanoseconds since the Unix epoch.
    Timestamp {
        /// Whole seconds since the epoch.
        seconds: i64,
        /// Sub-second component.
        #[serde(default)]
        nanoseconds: u32,
    },
    /// An RFC 3339 instant.
    Instant(DateTime<Utc>),
    /// A calendar date.
    Date(NaiveDate),
    /// Anything else. Never resolves.
    Unparsed(String),
}

impl DateValue {
    /// Resolves to a calendar date. Instants use their UTC date.
    pub fn to_date(&self) -> Option<NaiveDate> {
        match self {
            DateValue::Date(date) => Some(*date),
            DateValue::Unparsed(text) => parse_loose_date(text),
            _ => self.to_instant().map(|instant| instant.date_naive()),
        }
    }

    /// Resolves to an instant. Calendar dates resolve to midnight UTC.
    pub fn to_instant(&self) -> Option<DateTime<Utc>> {
        match self {
            DateValue::Timestamp {
                seconds,
                nanoseconds,
            } => DateTime::from_timestamp(*seconds, *nanoseconds),
            DateValue::Instant(instant) => Some(*instant),
            DateValue::Date(date) => Some(date.and_time(NaiveTime::MIN).and_utc()),
            DateValue::Unparsed(_) => None,
        }
    }
}

impl From<NaiveDate> for DateValue {
    fn from(date: NaiveDate) -> Self {
        DateValue::Date(date)
    }
}

impl From<DateTime<Utc>> for DateValue {
    fn from(instant: DateTime<Utc>) -> Self {
        DateValue::Instant(instant)
    }
}

// Dates written by older clients carry a time suffix, e.g. "2025-03-04T00:00:00".
fn parse_loose_date(text: &str) -> Option<NaiveDate> {
    let prefix = text.trim().get(..10)?;
    NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok()
}
