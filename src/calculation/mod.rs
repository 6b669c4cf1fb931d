//! Calculation logic for the studio payroll engine.
//!
//! This module contains the pure functions of the engine: pay period boundary
//! generation and validation, locating the current and previous periods,
//! overtime, record deduplication, and the payroll and mileage aggregators.
//! None of them perform I/O or hold state between calls.

mod aggregate;
mod boundaries;
mod dedup;
mod locator;
mod mileage;
mod overtime;
mod validation;

#[cfg(test)]
mod proptest_periods;

pub use aggregate::aggregate_time_entries;
pub use boundaries::{
    BI_WEEKLY_PERIOD_DAYS, WEEKLY_PERIOD_DAYS, calculate_boundaries,
    calculate_boundaries_or_fallback, days_in_month, periods_for_schedule,
};
pub use dedup::{RecordId, dedup_by_id};
pub use locator::{
    CURRENT_WINDOW_DAYS, PREVIOUS_WINDOW_DAYS, current_period, previous_period,
    previous_period_before, recent_periods,
};
pub use mileage::aggregate_mileage;
pub use overtime::{compute_overtime, hours_over_threshold};
pub use validation::{BoundaryIssue, validate_period_boundaries};
