//! HTTP API module for the studio payroll engine.
//!
//! This module provides JSON endpoints for pay period lookup and payroll and
//! mileage summaries.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{PeriodsRequest, SummaryRequest};
pub use response::{ApiError, CurrentPeriodsResponse};
pub use state::AppState;
