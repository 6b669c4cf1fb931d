//! Time entry model.
//!
//! This module defines the canonical [`TimeEntry`] record used by the
//! aggregator and the [`TimeEntryDocument`] shape it is converted from.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::PayrollError;

use super::DateValue;

const SECONDS_PER_HOUR: i64 = 3600;

/// A clock-in/clock-out record for one employee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeEntry {
    /// Unique identifier of the entry.
    pub id: String,
    /// The employee who clocked in.
    pub user_id: String,
    /// The calendar day the entry is attributed to.
    pub date: NaiveDate,
    /// When the employee clocked in.
    pub clock_in_time: DateTime<Utc>,
    /// When the employee clocked out; `None` while the entry is in progress.
    #[serde(default)]
    pub clock_out_time: Option<DateTime<Utc>>,
    /// Free-form status from the store (e.g. "clocked_in", "completed").
    #[serde(default)]
    pub status: String,
    /// The class session this entry was recorded against.
    #[serde(default)]
    pub session_id: Option<String>,
    /// Free-form notes.
    #[serde(default)]
    pub notes: Option<String>,
}

impl TimeEntry {
    /// Returns true once the entry has a clock-out time.
    pub fn is_completed(&self) -> bool {
        self.clock_out_time.is_some()
    }

    /// Hours between clock-in and clock-out, or `None` while in progress.
    ///
    /// The result is negative when the clock-out precedes the clock-in;
    /// callers treat that as a malformed entry.
    ///
    /// # Examples
    ///
    /// ```
    /// use studio_payroll::models::TimeEntry;
    /// use chrono::{NaiveDate, TimeZone, Utc};
    /// use rust_decimal::Decimal;
    ///
    /// let entry = TimeEntry {
    ///     id: "e1".to_string(),
    ///     user_id: "u1".to_string(),
    ///     date: NaiveDate::from_ymd_opt(2025, 1, 6).unwrap(),
    ///     clock_in_time: Utc.with_ymd_and_hms(2025, 1, 6, 9, 0, 0).unwrap(),
    ///     clock_out_time: Some(Utc.with_ymd_and_hms(2025, 1, 6, 17, 30, 0).unwrap()),
    ///     status: "completed".to_string(),
    ///     session_id: None,
    ///     notes: None,
    /// };
    /// assert_eq!(entry.worked_hours(), Some(Decimal::new(85, 1)));
    /// ```
    pub fn worked_hours(&self) -> Option<Decimal> {
        let clock_out = self.clock_out_time?;
        let seconds = (clock_out - self.clock_in_time).num_seconds();
        Some(Decimal::from(seconds) / Decimal::from(SECONDS_PER_HOUR))
    }
}

/// A time entry document as read from the store, before normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeEntryDocument {
    /// Document identifier.
    pub id: String,
    /// Owning employee.
    #[serde(default)]
    pub user_id: Option<String>,
    /// Attributed day. Falls back to the clock-in date when absent.
    #[serde(default)]
    pub date: Option<DateValue>,
    /// Clock-in time.
    #[serde(default)]
    pub clock_in_time: Option<DateValue>,
    /// Clock-out time.
    #[serde(default)]
    pub clock_out_time: Option<DateValue>,
    /// Status label.
    #[serde(default)]
    pub status: String,
    /// Session identifier.
    #[serde(default)]
    pub session_id: Option<String>,
    /// Notes.
    #[serde(default)]
    pub notes: Option<String>,
}

impl TryFrom<TimeEntryDocument> for TimeEntry {
    type Error = PayrollError;

    fn try_from(doc: TimeEntryDocument) -> Result<Self, Self::Error> {
        let invalid = |message: &str| PayrollError::InvalidRecord {
            record_id: doc.id.clone(),
            message: message.to_string(),
        };

        let user_id = doc
            .user_id
            .clone()
            .filter(|id| !id.is_empty())
            .ok_or_else(|| invalid("userId is missing"))?;

        let clock_in_time = doc
            .clock_in_time
            .as_ref()
            .ok_or_else(|| invalid("clockInTime is missing"))?
            .to_instant()
            .ok_or_else(|| invalid("clockInTime is not a valid timestamp"))?;

        let clock_out_time = match &doc.clock_out_time {
            Some(value) => Some(
                value
                    .to_instant()
                    .ok_or_else(|| invalid("clockOutTime is not a valid timestamp"))?,
            ),
            None => None,
        };

        if clock_out_time.is_some_and(|out| out < clock_in_time) {
            return Err(invalid("clockOutTime is before clockInTime"));
        }

        let date = match &doc.date {
            Some(value) => value
                .to_date()
                .ok_or_else(|| invalid("date is not a valid calendar date"))?,
            None => clock_in_time.date_naive(),
        };

        Ok(TimeEntry {
            id: doc.id,
            user_id,
            date,
            clock_in_time,
            clock_out_time,
            status: doc.status,
            session_id: doc.session_id.filter(|id| !id.is_empty()),
            notes: doc.notes,
        })
    }
}
