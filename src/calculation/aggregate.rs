//! Payroll aggregation over time entries.
//!
//! This module turns the raw time entries of a pay period into a
//! [`PayrollSummary`]: hours per employee and per day, overtime, entry counts,
//! session attendance and organisation totals.
//!
//! Every active roster member appears in the summary, including those with
//! no entries. Entries for users missing from the roster are still counted
//! under a placeholder identity.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::format::format_duration;
use crate::models::{
    Attendance, Employee, EmployeeInfo, EmployeeSummary, EntrySummary, HoursSummary,
    OvertimeSettings, PayrollSummary, PayrollTotals, SessionAssignment, TimeEntry,
};

use super::dedup::dedup_by_id;
use super::overtime::compute_overtime;

/// An employee taking part in a summary, with their roster record if known.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Participant<'a> {
    pub user_id: &'a str,
    pub employee: Option<&'a Employee>,
}

/// Active roster members first, then any other users that have records.
pub(crate) fn participants<'a>(
    roster: &'a [Employee],
    record_user_ids: impl IntoIterator<Item = &'a str>,
) -> Vec<Participant<'a>> {
    let by_id: HashMap<&str, &Employee> = roster.iter().map(|e| (e.id.as_str(), e)).collect();
    let mut seen = HashSet::new();
    let mut participants = Vec::new();

    for employee in roster.iter().filter(|e| e.is_active) {
        if seen.insert(employee.id.as_str()) {
            participants.push(Participant {
                user_id: &employee.id,
                employee: Some(employee),
            });
        }
    }

    for user_id in record_user_ids {
        if !seen.insert(user_id) {
            continue;
        }
        let employee = by_id.get(user_id).copied();
        if employee.is_none() {
            warn!(user_id, "Records reference a user missing from the roster");
        }
        participants.push(Participant { user_id, employee });
    }

    participants
}

/// Aggregates time entries into a payroll summary for `[period_start, period_end]`.
///
/// - Entries are deduplicated by id (first occurrence wins), then limited to
///   those whose date falls in the period.
/// - Only completed entries contribute hours. In-progress entries are counted
///   as active. Entries that clock out before they clock in are dropped.
/// - Overtime uses `overtime_settings`, or the defaults when `None`.
/// - Attendance is computed from the sessions in the period the employee is
///   assigned to. Without `sessions`, every employee has 100% attendance.
///
/// Employees are ordered by total hours, most first, then by name.
///
/// # Example
///
/// ```
/// use studio_payroll::calculation::aggregate_time_entries;
/// use studio_payroll::models::{Employee, TimeEntry};
/// use chrono::{NaiveDate, TimeZone, Utc};
/// use rust_decimal::Decimal;
///
/// let employee = Employee {
///     id: "u1".to_string(),
///     first_name: "Ada".to_string(),
///     last_name: "Lovelace".to_string(),
///     email: String::new(),
///     role: "instructor".to_string(),
///     is_active: true,
///     amount_per_mile: None,
/// };
/// let entry = TimeEntry {
///     id: "t1".to_string(),
///     user_id: "u1".to_string(),
///     date: NaiveDate::from_ymd_opt(2025, 1, 6).unwrap(),
///     clock_in_time: Utc.with_ymd_and_hms(2025, 1, 6, 9, 0, 0).unwrap(),
///     clock_out_time: Some(Utc.with_ymd_and_hms(2025, 1, 6, 17, 0, 0).unwrap()),
///     status: "completed".to_string(),
///     session_id: None,
///     notes: None,
/// };
///
/// let summary = aggregate_time_entries(
///     &[entry],
///     &[employee],
///     NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
///     None,
///     None,
/// );
/// assert_eq!(summary.employees[0].hours.total, Decimal::from(8));
/// assert_eq!(summary.totals.formatted_total_hours, "8h 0m");
/// ```
pub fn aggregate_time_entries(
    entries: &[TimeEntry],
    roster: &[Employee],
    period_start: NaiveDate,
    period_end: NaiveDate,
    overtime_settings: Option<&OvertimeSettings>,
    sessions: Option<&[SessionAssignment]>,
) -> PayrollSummary {
    let default_settings = OvertimeSettings::default();
    let settings = overtime_settings.unwrap_or(&default_settings);

    let in_period = |date: NaiveDate| date >= period_start && date <= period_end;

    let mut by_user: HashMap<&str, Vec<&TimeEntry>> = HashMap::new();
    let mut user_order = Vec::new();
    for entry in dedup_by_id(entries) {
        if !in_period(entry.date) {
            continue;
        }
        by_user
            .entry(entry.user_id.as_str())
            .or_insert_with(|| {
                user_order.push(entry.user_id.as_str());
                Vec::new()
            })
            .push(entry);
    }

    let period_sessions: Vec<&SessionAssignment> = sessions
        .map(|sessions| {
            dedup_by_id(sessions)
                .into_iter()
                .filter(|session| in_period(session.date))
                .collect()
        })
        .unwrap_or_default();

    let mut employees: Vec<(EmployeeSummary, Decimal)> = participants(roster, user_order)
        .into_iter()
        .map(|participant| {
            let user_entries = by_user.remove(participant.user_id).unwrap_or_default();
            summarize_employee(
                participant,
                user_entries,
                &period_sessions,
                settings,
                period_start,
                period_end,
            )
        })
        .collect();

    employees.sort_by(|(a, a_hours), (b, b_hours)| {
        b_hours
            .cmp(a_hours)
            .then_with(|| a.employee.name.cmp(&b.employee.name))
    });

    let total_hours: Decimal = employees.iter().map(|(_, hours)| *hours).sum();
    let employees: Vec<EmployeeSummary> = employees.into_iter().map(|(e, _)| e).collect();
    let totals = payroll_totals(&employees, total_hours);

    debug!(
        period_start = %period_start,
        period_end = %period_end,
        employees = totals.total_employees,
        entries = totals.total_entries,
        total_hours = %totals.total_hours,
        "Aggregated time entries"
    );

    PayrollSummary {
        period_start,
        period_end,
        employees,
        totals,
    }
}

/// Builds one employee's summary. Also returns the unrounded hour total used
/// for ordering and organisation totals.
fn summarize_employee(
    participant: Participant<'_>,
    mut entries: Vec<&TimeEntry>,
    period_sessions: &[&SessionAssignment],
    settings: &OvertimeSettings,
    period_start: NaiveDate,
    period_end: NaiveDate,
) -> (EmployeeSummary, Decimal) {
    entries.retain(|entry| {
        let negative = entry.worked_hours().is_some_and(|hours| hours < Decimal::ZERO);
        if negative {
            warn!(
                entry_id = %entry.id,
                user_id = %entry.user_id,
                "Skipping time entry that clocks out before it clocks in"
            );
        }
        !negative
    });
    entries.sort_by_key(|entry| entry.clock_in_time);

    let mut by_day: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();
    let mut completed = 0;
    for entry in &entries {
        let Some(hours) = entry.worked_hours() else {
            continue;
        };
        completed += 1;
        *by_day.entry(entry.date).or_insert(Decimal::ZERO) += hours;
    }

    let total: Decimal = by_day.values().copied().sum();
    let overtime = compute_overtime(&by_day, settings, period_start, period_end);

    let worked_sessions: BTreeSet<&str> = entries
        .iter()
        .filter_map(|entry| entry.session_id.as_deref())
        .collect();

    let employee = match participant.employee {
        Some(employee) => EmployeeInfo::from(employee),
        None => EmployeeInfo::unknown(participant.user_id, None),
    };

    let attendance = session_attendance(participant.user_id, period_sessions, &worked_sessions);

    let summary = EmployeeSummary {
        employee,
        hours: HoursSummary {
            total: total.round_dp(2),
            formatted: format_duration(total),
            by_day: by_day
                .into_iter()
                .map(|(date, hours)| (date, hours.round_dp(2)))
                .collect(),
            overtime,
        },
        entries: EntrySummary {
            total: entries.len(),
            completed,
            active: entries.len() - completed,
            sessions: worked_sessions.len(),
            details: entries.iter().map(|&entry| entry.clone()).collect(),
        },
        attendance,
    };
    (summary, total)
}

fn session_attendance(
    user_id: &str,
    period_sessions: &[&SessionAssignment],
    worked_sessions: &BTreeSet<&str>,
) -> Attendance {
    let assigned: Vec<&&SessionAssignment> = period_sessions
        .iter()
        .filter(|session| session.is_assigned(user_id))
        .collect();
    let worked = assigned
        .iter()
        .filter(|session| worked_sessions.contains(session.id.as_str()))
        .count();

    let percentage = if assigned.is_empty() {
        Decimal::ONE_HUNDRED
    } else {
        (Decimal::from(worked) * Decimal::ONE_HUNDRED / Decimal::from(assigned.len())).round_dp(1)
    };

    Attendance {
        assigned: assigned.len(),
        worked,
        percentage,
    }
}

fn payroll_totals(employees: &[EmployeeSummary], total_hours: Decimal) -> PayrollTotals {
    let total_employees = employees.len();
    let avg_hours_per_employee = if total_employees == 0 {
        Decimal::ZERO
    } else {
        (total_hours / Decimal::from(total_employees)).round_dp(2)
    };

    PayrollTotals {
        total_hours: total_hours.round_dp(2),
        formatted_total_hours: format_duration(total_hours),
        total_employees,
        employees_with_hours: employees
            .iter()
            .filter(|e| e.hours.total > Decimal::ZERO)
            .count(),
        total_entries: employees.iter().map(|e| e.entries.total).sum(),
        active_entries: employees.iter().map(|e| e.entries.active).sum(),
        total_overtime_hours: employees
            .iter()
            .map(|e| e.hours.overtime.total.hours)
            .sum(),
        avg_hours_per_employee,
    }
}
