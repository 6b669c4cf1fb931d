//! Record store seams.
//!
//! The engine reads time entries, job reports, sessions and the roster from
//! external stores. Each source is a trait so that a database-backed store and
//! the in-memory [`MemoryStore`] are interchangeable.
//!
//! Stores hand out canonical records. Raw documents are normalized at this
//! boundary and malformed ones are skipped with a warning, so one bad record
//! never fails a whole query.

use std::sync::RwLock;

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::error::{PayrollError, PayrollResult};
use crate::models::{
    DailyJobReport, Employee, JobReportDocument, SessionAssignment, TimeEntry, TimeEntryDocument,
};

/// Source of time entries.
pub trait TimeEntryStore: Send + Sync {
    /// Returns the time entries dated within `[start, end]`.
    fn time_entries(&self, start: NaiveDate, end: NaiveDate) -> PayrollResult<Vec<TimeEntry>>;
}

/// Source of daily job reports.
pub trait JobReportStore: Send + Sync {
    /// Returns the job reports dated within `[start, end]`.
    fn job_reports(&self, start: NaiveDate, end: NaiveDate) -> PayrollResult<Vec<DailyJobReport>>;
}

/// Source of roster members.
pub trait RosterStore: Send + Sync {
    /// Returns every roster member, active or not.
    fn employees(&self) -> PayrollResult<Vec<Employee>>;
}

/// Source of session assignments.
pub trait SessionStore: Send + Sync {
    /// Returns the sessions scheduled within `[start, end]`.
    fn sessions(&self, start: NaiveDate, end: NaiveDate)
    -> PayrollResult<Vec<SessionAssignment>>;
}

/// Normalizes raw documents, skipping the ones that fail conversion.
///
/// # Example
///
/// ```
/// use studio_payroll::models::{TimeEntry, TimeEntryDocument};
/// use studio_payroll::store::normalize_documents;
///
/// let docs: Vec<TimeEntryDocument> = serde_json::from_str(r#"[
///     { "id": "t1", "userId": "u1", "clockInTime": "2025-01-06T09:00:00Z" },
///     { "id": "t2", "clockInTime": "2025-01-06T09:00:00Z" }
/// ]"#).unwrap();
///
/// let entries: Vec<TimeEntry> = normalize_documents(docs);
/// assert_eq!(entries.len(), 1);
/// ```
pub fn normalize_documents<D, R>(documents: Vec<D>) -> Vec<R>
where
    R: TryFrom<D, Error = PayrollError>,
{
    let total = documents.len();
    let records: Vec<R> = documents
        .into_iter()
        .filter_map(|document| match R::try_from(document) {
            Ok(record) => Some(record),
            Err(err) => {
                warn!(error = %err, "Skipping malformed store document");
                None
            }
        })
        .collect();

    if records.len() < total {
        debug!(
            total,
            kept = records.len(),
            "Normalized store documents with some skipped"
        );
    }
    records
}

/// In-memory store holding raw documents.
///
/// Documents are normalized on every read, the way a document database
/// adapter would.
#[derive(Debug, Default)]
pub struct MemoryStore {
    time_entries: RwLock<Vec<TimeEntryDocument>>,
    job_reports: RwLock<Vec<JobReportDocument>>,
    employees: RwLock<Vec<Employee>>,
    sessions: RwLock<Vec<SessionAssignment>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds time entry documents.
    pub fn insert_time_entries(
        &self,
        documents: impl IntoIterator<Item = TimeEntryDocument>,
    ) -> PayrollResult<()> {
        write_lock(&self.time_entries)?.extend(documents);
        Ok(())
    }

    /// Adds job report documents.
    pub fn insert_job_reports(
        &self,
        documents: impl IntoIterator<Item = JobReportDocument>,
    ) -> PayrollResult<()> {
        write_lock(&self.job_reports)?.extend(documents);
        Ok(())
    }

    /// Replaces the roster.
    pub fn set_employees(&self, employees: Vec<Employee>) -> PayrollResult<()> {
        *write_lock(&self.employees)? = employees;
        Ok(())
    }

    /// Adds session assignments.
    pub fn insert_sessions(
        &self,
        sessions: impl IntoIterator<Item = SessionAssignment>,
    ) -> PayrollResult<()> {
        write_lock(&self.sessions)?.extend(sessions);
        Ok(())
    }
}

impl TimeEntryStore for MemoryStore {
    fn time_entries(&self, start: NaiveDate, end: NaiveDate) -> PayrollResult<Vec<TimeEntry>> {
        let documents = read_lock(&self.time_entries)?.clone();
        let entries: Vec<TimeEntry> = normalize_documents(documents);
        Ok(entries
            .into_iter()
            .filter(|entry| entry.date >= start && entry.date <= end)
            .collect())
    }
}

impl JobReportStore for MemoryStore {
    fn job_reports(&self, start: NaiveDate, end: NaiveDate) -> PayrollResult<Vec<DailyJobReport>> {
        let documents = read_lock(&self.job_reports)?.clone();
        let reports: Vec<DailyJobReport> = normalize_documents(documents);
        Ok(reports
            .into_iter()
            .filter(|report| report.date >= start && report.date <= end)
            .collect())
    }
}

impl RosterStore for MemoryStore {
    fn employees(&self) -> PayrollResult<Vec<Employee>> {
        Ok(read_lock(&self.employees)?.clone())
    }
}

impl SessionStore for MemoryStore {
    fn sessions(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> PayrollResult<Vec<SessionAssignment>> {
        Ok(read_lock(&self.sessions)?
            .iter()
            .filter(|session| session.date >= start && session.date <= end)
            .cloned()
            .collect())
    }
}

fn read_lock<T>(lock: &RwLock<T>) -> PayrollResult<std::sync::RwLockReadGuard<'_, T>> {
    lock.read().map_err(|_| PayrollError::StoreError {
        message: "memory store lock poisoned".to_string(),
    })
}

fn write_lock<T>(lock: &RwLock<T>) -> PayrollResult<std::sync::RwLockWriteGuard<'_, T>> {
    lock.write().map_err(|_| PayrollError::StoreError {
        message: "memory store lock poisoned".to_string(),
    })
}
