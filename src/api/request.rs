//! Request types for the payroll API.
//!
//! This module defines the JSON request bodies of the period and summary
//! endpoints.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{PayrollError, PayrollResult};
use crate::format::short_range_label;
use crate::models::Period;

/// Request body for `POST /periods`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodsRequest {
    /// First day of the range to cover (inclusive).
    pub start_date: NaiveDate,
    /// Last day of the range to cover (inclusive).
    pub end_date: NaiveDate,
}

/// Request body for `POST /payroll/summary` and `POST /mileage/summary`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryRequest {
    /// First day of the period (inclusive).
    pub period_start: NaiveDate,
    /// Last day of the period (inclusive).
    pub period_end: NaiveDate,
}

impl SummaryRequest {
    /// The requested period, rejecting an inverted range.
    pub fn period(&self) -> PayrollResult<Period> {
        if self.period_start > self.period_end {
            return Err(PayrollError::InvalidDateRange {
                start: self.period_start,
                end: self.period_end,
            });
        }
        Ok(Period::new(
            self.period_start,
            self.period_end,
            short_range_label(self.period_start, self.period_end),
        ))
    }
}
