//! Error types for the studio payroll engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every condition that can occur while generating pay periods or
//! aggregating payroll and mileage records.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the studio payroll engine.
///
/// Calculation entry points return this error type so that callers can
/// decide whether to surface a problem or fall back to a degraded result.
///
/// # Example
///
/// ```
/// use studio_payroll::error::PayrollError;
///
/// let error = PayrollError::InvalidPolicy {
///     period_type: "WEEKLY".to_string(),
///     message: "dayOfWeek must be between 0 and 6".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Invalid WEEKLY pay period policy: dayOfWeek must be between 0 and 6"
/// );
/// ```
#[derive(Debug, Error)]
pub enum PayrollError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// The pay period policy failed its type-specific validation.
    #[error("Invalid {period_type} pay period policy: {message}")]
    InvalidPolicy {
        /// The policy type whose configuration was rejected.
        period_type: String,
        /// A description of the violated constraint.
        message: String,
    },

    /// A date range had its start after its end.
    #[error("Invalid date range: {start} is after {end}")]
    InvalidDateRange {
        /// The requested range start.
        start: NaiveDate,
        /// The requested range end.
        end: NaiveDate,
    },

    /// Pay periods touching a range would fall outside the supported calendar.
    #[error("Pay periods for {start} to {end} fall outside the supported calendar")]
    PeriodOutOfRange {
        /// The requested range start.
        start: NaiveDate,
        /// The requested range end.
        end: NaiveDate,
    },

    /// Generated periods overlapped, left a gap, or failed to cover the range.
    #[error("Pay period boundary violation: {message}")]
    BoundaryViolation {
        /// A description of the first violation found.
        message: String,
    },

    /// A store record was malformed and could not be normalized.
    #[error("Invalid record '{record_id}': {message}")]
    InvalidRecord {
        /// The identifier of the offending record.
        record_id: String,
        /// A description of what made the record invalid.
        message: String,
    },

    /// A backing store failed to produce records.
    #[error("Store error: {message}")]
    StoreError {
        /// A description of the store failure.
        message: String,
    },
}

/// A type alias for Results that return PayrollError.
pub type PayrollResult<T> = Result<T, PayrollError>;
