//! Aggregation result models.
//!
//! This module contains the [`PayrollSummary`] and [`MileageSummary`] types
//! returned by the record aggregator, together with their per-employee
//! building blocks. Summaries are built fresh for every query and embed
//! pre-formatted strings for presentation layers.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Employee, OvertimeMethod, TimeEntry};

/// The identifying fields of an employee as shown on a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeInfo {
    /// Employee identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Role within the studio.
    pub role: String,
}

impl EmployeeInfo {
    /// Placeholder for records whose user is missing from the roster.
    pub fn unknown(user_id: &str, display_name: Option<&str>) -> Self {
        Self {
            id: user_id.to_string(),
            name: display_name
                .filter(|name| !name.trim().is_empty())
                .map(|name| name.trim().to_string())
                .unwrap_or_else(|| format!("Unknown employee ({})", user_id)),
            email: String::new(),
            role: String::new(),
        }
    }
}

impl From<&Employee> for EmployeeInfo {
    fn from(employee: &Employee) -> Self {
        Self {
            id: employee.id.clone(),
            name: employee.full_name(),
            email: employee.email.clone(),
            role: employee.role.clone(),
        }
    }
}

/// A number of overtime hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvertimeHours {
    /// Overtime hours.
    pub hours: Decimal,
}

/// Overtime under both methods, with the configured one marked authoritative.
///
/// # Example
///
/// ```
/// use studio_payroll::models::{OvertimeBreakdown, OvertimeHours, OvertimeMethod};
/// use rust_decimal::Decimal;
///
/// let breakdown = OvertimeBreakdown {
///     daily: OvertimeHours { hours: Decimal::from(2) },
///     weekly: OvertimeHours { hours: Decimal::ZERO },
///     total: OvertimeHours { hours: Decimal::from(2) },
///     calculation_method: OvertimeMethod::Daily,
/// };
/// assert_eq!(breakdown.total.hours, breakdown.daily.hours);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OvertimeBreakdown {
    /// Sum of per-day excess over the daily threshold.
    pub daily: OvertimeHours,
    /// Excess over the weekly threshold for the period.
    pub weekly: OvertimeHours,
    /// The authoritative figure.
    pub total: OvertimeHours,
    /// The method `total` was taken from.
    pub calculation_method: OvertimeMethod,
}

impl OvertimeBreakdown {
    /// A breakdown with no overtime under either method.
    pub fn none(calculation_method: OvertimeMethod) -> Self {
        let zero = OvertimeHours {
            hours: Decimal::ZERO,
        };
        Self {
            daily: zero,
            weekly: zero,
            total: zero,
            calculation_method,
        }
    }
}

/// Worked hours for one employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HoursSummary {
    /// Total completed hours in the period.
    pub total: Decimal,
    /// `total` formatted as "8h 30m".
    pub formatted: String,
    /// Completed hours keyed by calendar day.
    pub by_day: BTreeMap<NaiveDate, Decimal>,
    /// Overtime split.
    pub overtime: OvertimeBreakdown,
}

/// Entry counts and the entries themselves for one employee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntrySummary {
    /// Number of entries in the period.
    pub total: usize,
    /// Entries with a clock-out time.
    pub completed: usize,
    /// Entries still in progress.
    pub active: usize,
    /// Distinct sessions touched.
    pub sessions: usize,
    /// The entries, oldest first.
    pub details: Vec<TimeEntry>,
}

/// Session attendance for one employee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attendance {
    /// Sessions the employee was assigned to.
    pub assigned: usize,
    /// Assigned sessions with at least one time entry.
    pub worked: usize,
    /// `worked / assigned * 100`, or 100 when nothing was assigned.
    pub percentage: Decimal,
}

/// Payroll summary for one employee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeSummary {
    /// Who the summary is for.
    pub employee: EmployeeInfo,
    /// Hours and overtime.
    pub hours: HoursSummary,
    /// Entry counts.
    pub entries: EntrySummary,
    /// Session attendance.
    pub attendance: Attendance,
}

/// Organisation-wide payroll totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayrollTotals {
    /// Sum of all employees' hours.
    pub total_hours: Decimal,
    /// `total_hours` formatted as "8h 30m".
    pub formatted_total_hours: String,
    /// Number of employees in the summary.
    pub total_employees: usize,
    /// Employees with more than zero hours.
    pub employees_with_hours: usize,
    /// Number of entries across all employees.
    pub total_entries: usize,
    /// Entries still in progress.
    pub active_entries: usize,
    /// Sum of authoritative overtime.
    pub total_overtime_hours: Decimal,
    /// `total_hours / total_employees`.
    pub avg_hours_per_employee: Decimal,
}

/// The payroll summary for a period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayrollSummary {
    /// First day of the aggregated period.
    pub period_start: NaiveDate,
    /// Last day of the aggregated period.
    pub period_end: NaiveDate,
    /// Per-employee summaries, most hours first.
    pub employees: Vec<EmployeeSummary>,
    /// Organisation totals.
    pub totals: PayrollTotals,
}

/// Mileage reimbursement for one employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeMileage {
    /// Who the summary is for.
    pub employee: EmployeeInfo,
    /// Miles across all counted reports.
    pub total_miles: Decimal,
    /// `total_miles` formatted as "25.0 mi".
    pub formatted_miles: String,
    /// Number of reports with mileage.
    pub total_jobs: usize,
    /// `total_miles * mileage_rate`, rounded to cents.
    pub total_compensation: Decimal,
    /// `total_compensation` formatted as "$16.25".
    pub formatted_compensation: String,
    /// `total_miles / total_jobs`, zero without jobs.
    pub average_miles_per_job: Decimal,
    /// Rate per mile from the roster.
    pub mileage_rate: Decimal,
}

/// Organisation-wide mileage totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MileageTotals {
    /// Miles across all employees.
    pub total_miles: Decimal,
    /// `total_miles` formatted as "25.0 mi".
    pub formatted_miles: String,
    /// Reports with mileage across all employees.
    pub total_jobs: usize,
    /// Compensation across all employees.
    pub total_compensation: Decimal,
    /// `total_compensation` formatted as "$16.25".
    pub formatted_compensation: String,
    /// Number of employees in the summary.
    pub total_employees: usize,
    /// Employees with more than zero miles.
    pub employees_with_mileage: usize,
    /// `total_miles / total_employees`.
    pub average_miles_per_employee: Decimal,
}

/// The mileage summary for a period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MileageSummary {
    /// First day of the aggregated period.
    pub period_start: NaiveDate,
    /// Last day of the aggregated period.
    pub period_end: NaiveDate,
    /// Per-employee summaries, most miles first.
    pub employees: Vec<EmployeeMileage>,
    /// Organisation totals.
    pub totals: MileageTotals,
}
