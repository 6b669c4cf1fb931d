//! Payroll query service.
//!
//! [`PayrollService`] wires the pure calculation functions to the record
//! stores and an optional [`Cache`]. It is what the HTTP layer and other
//! in-process consumers call.
//!
//! Record sets are fetched and cached per calendar month window, so one cached
//! set serves every period inside those months. The aggregators filter to the
//! requested period and drop duplicate records.

use std::sync::Arc;

use chrono::{Datelike, Duration, Local, NaiveDate};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::cache::Cache;
use crate::calculation::{
    aggregate_mileage, aggregate_time_entries, calculate_boundaries, current_period,
    days_in_month, previous_period, recent_periods,
};
use crate::error::PayrollResult;
use crate::models::{MileageSummary, OrganizationSettings, PayrollSummary, Period};
use crate::store::{JobReportStore, RosterStore, SessionStore, TimeEntryStore};

/// How long cached record sets stay fresh by default.
pub const DEFAULT_CACHE_TTL_MINUTES: i64 = 5;

/// Answers period and summary queries for one organisation.
#[derive(Clone)]
pub struct PayrollService {
    settings: OrganizationSettings,
    time_entries: Arc<dyn TimeEntryStore>,
    job_reports: Arc<dyn JobReportStore>,
    roster: Arc<dyn RosterStore>,
    sessions: Option<Arc<dyn SessionStore>>,
    cache: Option<Arc<dyn Cache>>,
    cache_ttl: Duration,
}

impl PayrollService {
    /// Creates a service reading every record kind from one store.
    pub fn new<S>(settings: OrganizationSettings, store: Arc<S>) -> Self
    where
        S: TimeEntryStore + JobReportStore + RosterStore + SessionStore + 'static,
    {
        Self {
            settings,
            time_entries: store.clone(),
            job_reports: store.clone(),
            roster: store.clone(),
            sessions: Some(store),
            cache: None,
            cache_ttl: Duration::minutes(DEFAULT_CACHE_TTL_MINUTES),
        }
    }

    /// Creates a service from separate stores. Without a session store,
    /// attendance is reported as complete.
    pub fn from_parts(
        settings: OrganizationSettings,
        time_entries: Arc<dyn TimeEntryStore>,
        job_reports: Arc<dyn JobReportStore>,
        roster: Arc<dyn RosterStore>,
        sessions: Option<Arc<dyn SessionStore>>,
    ) -> Self {
        Self {
            settings,
            time_entries,
            job_reports,
            roster,
            sessions,
            cache: None,
            cache_ttl: Duration::minutes(DEFAULT_CACHE_TTL_MINUTES),
        }
    }

    /// Caches record sets in `cache` for `ttl`.
    pub fn with_cache(mut self, cache: Arc<dyn Cache>, ttl: Duration) -> Self {
        self.cache = Some(cache);
        self.cache_ttl = ttl;
        self
    }

    /// The organisation settings the service was built with.
    pub fn settings(&self) -> &OrganizationSettings {
        &self.settings
    }

    /// Today's date in the host's local timezone.
    pub fn today() -> NaiveDate {
        Local::now().date_naive()
    }

    /// The pay periods covering `[start, end]`.
    pub fn periods(&self, start: NaiveDate, end: NaiveDate) -> PayrollResult<Vec<Period>> {
        calculate_boundaries(start, end, &self.settings.pay_period_settings)
    }

    /// The period containing `today`.
    pub fn current_period(&self, today: NaiveDate) -> Option<Period> {
        current_period(&self.settings.pay_period_settings, today)
    }

    /// The period before the one containing `today`.
    pub fn previous_period(&self, today: NaiveDate) -> Option<Period> {
        previous_period(&self.settings.pay_period_settings, today)
    }

    /// The current period and up to `count - 1` before it, newest first.
    pub fn recent_periods(&self, today: NaiveDate, count: usize) -> Vec<Period> {
        recent_periods(&self.settings.pay_period_settings, today, count)
    }

    /// Aggregates the time entries of `period`.
    pub fn payroll_summary(&self, period: &Period) -> PayrollResult<PayrollSummary> {
        let (window_start, window_end) = month_window(period);

        let entries = self.cached(
            record_key("time_entries", window_start, window_end),
            || self.time_entries.time_entries(window_start, window_end),
        )?;
        let roster = self.cached("roster".to_string(), || self.roster.employees())?;
        let sessions = match &self.sessions {
            Some(store) => Some(self.cached(
                record_key("sessions", window_start, window_end),
                || store.sessions(window_start, window_end),
            )?),
            None => None,
        };

        debug!(
            period_start = %period.start,
            period_end = %period.end,
            fetched_entries = entries.len(),
            "Building payroll summary"
        );

        Ok(aggregate_time_entries(
            &entries,
            &roster,
            period.start,
            period.end,
            Some(&self.settings.overtime_settings),
            sessions.as_deref(),
        ))
    }

    /// Aggregates the job report mileage of `period`.
    pub fn mileage_summary(&self, period: &Period) -> PayrollResult<MileageSummary> {
        let (window_start, window_end) = month_window(period);

        let reports = self.cached(
            record_key("job_reports", window_start, window_end),
            || self.job_reports.job_reports(window_start, window_end),
        )?;
        let roster = self.cached("roster".to_string(), || self.roster.employees())?;

        debug!(
            period_start = %period.start,
            period_end = %period.end,
            fetched_reports = reports.len(),
            "Building mileage summary"
        );

        Ok(aggregate_mileage(&reports, &roster, period.start, period.end))
    }

    /// Drops the cached roster, e.g. after an employee's rate changes.
    pub fn invalidate_roster(&self) {
        if let Some(cache) = &self.cache {
            cache.invalidate("roster");
        }
    }

    fn cached<T, F>(&self, key: String, fetch: F) -> PayrollResult<Vec<T>>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> PayrollResult<Vec<T>>,
    {
        let Some(cache) = &self.cache else {
            return fetch();
        };

        if let Some(value) = cache.get(&key) {
            match serde_json::from_value(value) {
                Ok(records) => return Ok(records),
                Err(err) => {
                    warn!(cache_key = %key, error = %err, "Discarding unreadable cache entry");
                    cache.invalidate(&key);
                }
            }
        }

        let records = fetch()?;
        match serde_json::to_value(&records) {
            Ok(value) => cache.set(&key, value, self.cache_ttl),
            Err(err) => warn!(cache_key = %key, error = %err, "Unable to cache records"),
        }
        Ok(records)
    }
}

/// First day of the period's start month through the last day of its end month.
fn month_window(period: &Period) -> (NaiveDate, NaiveDate) {
    let start = period.start.with_day(1).unwrap_or(period.start);
    let last_day = days_in_month(period.end.year(), period.end.month());
    let end = period.end.with_day(last_day).unwrap_or(period.end);
    (start, end)
}

fn record_key(kind: &str, start: NaiveDate, end: NaiveDate) -> String {
    format!("{}:{}:{}", kind, start, end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryCache;
    use crate::models::{
        DateValue, Employee, JobReportDocument, OvertimeSettings, PayPeriodPolicy,
        TimeEntryDocument,
    };
    use crate::store::MemoryStore;
    use chrono::{TimeZone, Utc};
    use rust_decimal::Decimal;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, m, d).unwrap()
    }

    fn settings() -> OrganizationSettings {
        OrganizationSettings {
            pay_period_settings: PayPeriodPolicy::semi_monthly(1, 16),
            overtime_settings: OvertimeSettings::default(),
        }
    }

    fn employee(id: &str) -> Employee {
        Employee {
            id: id.to_string(),
            first_name: id.to_uppercase(),
            last_name: String::new(),
            email: String::new(),
            role: "instructor".to_string(),
            is_active: true,
            amount_per_mile: Some(Decimal::new(65, 2)),
        }
    }

    fn shift(id: &str, user_id: &str, day: u32, hours: u32) -> TimeEntryDocument {
        TimeEntryDocument {
            id: id.to_string(),
            user_id: Some(user_id.to_string()),
            date: None,
            clock_in_time: Some(DateValue::Instant(
                Utc.with_ymd_and_hms(2025, 1, day, 9, 0, 0).unwrap(),
            )),
            clock_out_time: Some(DateValue::Instant(
                Utc.with_ymd_and_hms(2025, 1, day, 9 + hours, 0, 0).unwrap(),
            )),
            status: "completed".to_string(),
            session_id: None,
            notes: None,
        }
    }

    fn report(id: &str, user_id: &str, day: u32, miles: i64) -> JobReportDocument {
        JobReportDocument {
            id: id.to_string(),
            user_id: Some(user_id.to_string()),
            date: Some(DateValue::Date(date(1, day))),
            total_mileage: Some(Decimal::from(miles)),
            your_name: None,
        }
    }

    fn store() -> Arc<MemoryStore> {
        let store = MemoryStore::new();
        store.set_employees(vec![employee("a"), employee("b")]).unwrap();
        store
            .insert_time_entries(vec![
                shift("t1", "a", 6, 8),
                shift("t2", "a", 7, 4),
                shift("t3", "b", 20, 6),
            ])
            .unwrap();
        store
            .insert_job_reports(vec![report("r1", "a", 6, 10), report("r2", "a", 7, 15)])
            .unwrap();
        Arc::new(store)
    }

    #[test]
    fn test_current_and_previous_periods() {
        let service = PayrollService::new(settings(), store());

        let current = service.current_period(date(1, 20)).unwrap();
        let previous = service.previous_period(date(1, 20)).unwrap();

        assert_eq!((current.start, current.end), (date(1, 16), date(1, 31)));
        assert_eq!((previous.start, previous.end), (date(1, 1), date(1, 15)));
        assert_eq!(service.recent_periods(date(1, 20), 3).len(), 3);
    }

    #[test]
    fn test_payroll_summary_limited_to_period() {
        let service = PayrollService::new(settings(), store());
        let period = service.periods(date(1, 1), date(1, 1)).unwrap().remove(0);

        let summary = service.payroll_summary(&period).unwrap();

        assert_eq!(summary.totals.total_hours, Decimal::from(12));
        assert_eq!(summary.totals.total_employees, 2);
        assert_eq!(summary.employees[0].employee.id, "a");
    }

    #[test]
    fn test_mileage_summary() {
        let service = PayrollService::new(settings(), store());
        let period = service.periods(date(1, 1), date(1, 1)).unwrap().remove(0);

        let summary = service.mileage_summary(&period).unwrap();

        assert_eq!(summary.totals.total_miles, Decimal::from(25));
        assert_eq!(summary.totals.total_compensation, Decimal::new(1625, 2));
    }

    #[test]
    fn test_cached_records_reused_across_periods() {
        let store = store();
        let cache = Arc::new(MemoryCache::new());
        let service = PayrollService::new(settings(), store.clone())
            .with_cache(cache.clone(), Duration::minutes(5));
        let periods = service.periods(date(1, 1), date(1, 31)).unwrap();

        service.payroll_summary(&periods[0]).unwrap();
        // Served from the cached January window, so this insert is not seen
        store
            .insert_time_entries(vec![shift("t4", "b", 21, 2)])
            .unwrap();
        let second_half = service.payroll_summary(&periods[1]).unwrap();

        assert_eq!(second_half.totals.total_hours, Decimal::from(6));
        assert!(cache.get("time_entries:2025-01-01:2025-01-31").is_some());
    }

    #[test]
    fn test_roster_invalidation() {
        let store = store();
        let cache = Arc::new(MemoryCache::new());
        let service = PayrollService::new(settings(), store.clone())
            .with_cache(cache.clone(), Duration::minutes(5));
        let period = service.periods(date(1, 1), date(1, 1)).unwrap().remove(0);

        service.payroll_summary(&period).unwrap();
        store
            .set_employees(vec![employee("a"), employee("b"), employee("c")])
            .unwrap();
        service.invalidate_roster();

        let summary = service.payroll_summary(&period).unwrap();
        assert_eq!(summary.totals.total_employees, 3);
    }

    #[test]
    fn test_month_window() {
        let period = Period::new(date(1, 16), date(2, 15), "");
        assert_eq!(month_window(&period), (date(1, 1), date(2, 28)));
    }
}
