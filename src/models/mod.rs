//! Core data models for the studio payroll engine.
//!
//! This module contains the policy, period, record and summary types used
//! throughout the engine.

mod date_value;
mod employee;
mod job_report;
mod period;
mod policy;
mod session;
mod settings;
mod summary;
mod time_entry;

pub use date_value::DateValue;
pub use employee::Employee;
pub use job_report::{DailyJobReport, JobReportDocument};
pub use period::Period;
pub use policy::{
    PayPeriodPolicy, PayPeriodType, PaySchedule, PeriodConfig, weekday_from_sunday_index,
};
pub use session::SessionAssignment;
pub use settings::{
    DEFAULT_DAILY_THRESHOLD, DEFAULT_WEEKLY_THRESHOLD, OrganizationSettings, OvertimeMethod,
    OvertimeSettings,
};
pub use summary::{
    Attendance, EmployeeInfo, EmployeeMileage, EmployeeSummary, EntrySummary, HoursSummary,
    MileageSummary, MileageTotals, OvertimeBreakdown, OvertimeHours, PayrollSummary,
    PayrollTotals,
};
pub use time_entry::{TimeEntry, TimeEntryDocument};
