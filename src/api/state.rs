//! Application state for the payroll API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::service::PayrollService;

/// Shared application state.
///
/// Holds the payroll service and, optionally, a fixed "today" that replaces
/// the host clock when locating the current period.
#[derive(Clone)]
pub struct AppState {
    service: Arc<PayrollService>,
    fixed_today: Option<NaiveDate>,
}

impl AppState {
    /// Creates a new application state around the given service.
    pub fn new(service: PayrollService) -> Self {
        Self {
            service: Arc::new(service),
            fixed_today: None,
        }
    }

    /// Pins "today" to `today` instead of reading the host clock.
    pub fn with_fixed_today(mut self, today: NaiveDate) -> Self {
        self.fixed_today = Some(today);
        self
    }

    /// Returns a reference to the payroll service.
    pub fn service(&self) -> &PayrollService {
        &self.service
    }

    /// Today's date.
    pub fn today(&self) -> NaiveDate {
        self.fixed_today.unwrap_or_else(PayrollService::today)
    }
}
