//! Duplicate record suppression.
//!
//! Records fetched from an overlapping cache or a retried query can appear
//! more than once. Aggregation runs over the deduplicated set so that a record
//! never counts twice.

use std::collections::HashSet;

use tracing::warn;

use crate::models::{DailyJobReport, SessionAssignment, TimeEntry};

/// A record with a stable unique identifier.
pub trait RecordId {
    /// The identifier duplicates are detected by.
    fn record_id(&self) -> &str;
}

impl RecordId for TimeEntry {
    fn record_id(&self) -> &str {
        &self.id
    }
}

impl RecordId for DailyJobReport {
    fn record_id(&self) -> &str {
        &self.id
    }
}

impl RecordId for SessionAssignment {
    fn record_id(&self) -> &str {
        &self.id
    }
}

/// Returns the records with duplicate identifiers removed.
///
/// The first occurrence of each identifier wins and input order is kept.
///
/// # Example
///
/// ```
/// use studio_payroll::calculation::dedup_by_id;
/// use studio_payroll::models::SessionAssignment;
/// use chrono::NaiveDate;
///
/// let session = |id: &str| SessionAssignment {
///     id: id.to_string(),
///     date: NaiveDate::from_ymd_opt(2025, 1, 6).unwrap(),
///     assigned_employee_ids: vec![],
/// };
/// let sessions = vec![session("a"), session("b"), session("a")];
///
/// let unique = dedup_by_id(&sessions);
/// assert_eq!(unique.len(), 2);
/// ```
pub fn dedup_by_id<T: RecordId>(records: &[T]) -> Vec<&T> {
    let mut seen = HashSet::with_capacity(records.len());
    let mut unique = Vec::with_capacity(records.len());
    for record in records {
        if seen.insert(record.record_id()) {
            unique.push(record);
        }
    }

    let dropped = records.len() - unique.len();
    if dropped > 0 {
        warn!(
            dropped,
            kept = unique.len(),
            "Dropped records with duplicate identifiers"
        );
    }
    unique
}
