//! Studio payroll engine
//!
//! This crate derives pay period boundaries from an organisation's pay period
//! policy and aggregates time entries and job report mileage into payroll and
//! mileage summaries, with daily and weekly overtime.

#![warn(missing_docs)]

pub mod api;
pub mod cache;
pub mod calculation;
pub mod config;
pub mod error;
pub mod format;
pub mod models;
pub mod service;
pub mod store;
