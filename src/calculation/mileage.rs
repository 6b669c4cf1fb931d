//! Mileage reimbursement aggregation over daily job reports.

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::debug;

use crate::format::{format_currency, format_miles};
use crate::models::{
    DailyJobReport, Employee, EmployeeInfo, EmployeeMileage, MileageSummary, MileageTotals,
};

use super::aggregate::participants;
use super::dedup::dedup_by_id;

/// Aggregates job reports into a mileage summary for `[period_start, period_end]`.
///
/// Reports are deduplicated by id and limited to the period. Reports without
/// positive mileage are skipped. Compensation is `miles * amountPerMile`
/// from the roster, rounded to cents; users missing from the roster are
/// reimbursed at zero.
///
/// Employees are ordered by total miles, most first, then by name.
///
/// # Example
///
/// ```
/// use studio_payroll::calculation::aggregate_mileage;
/// use studio_payroll::models::{DailyJobReport, Employee};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let d = |day| NaiveDate::from_ymd_opt(2025, 1, day).unwrap();
/// let employee = Employee {
///     id: "u1".to_string(),
///     first_name: "Ada".to_string(),
///     last_name: "Lovelace".to_string(),
///     email: String::new(),
///     role: "instructor".to_string(),
///     is_active: true,
///     amount_per_mile: Some(Decimal::new(65, 2)),
/// };
/// let report = |id: &str, day, miles| DailyJobReport {
///     id: id.to_string(),
///     user_id: "u1".to_string(),
///     date: d(day),
///     total_mileage: Some(Decimal::from(miles)),
///     your_name: None,
/// };
///
/// let summary = aggregate_mileage(&[report("r1", 6, 10), report("r2", 7, 15)], &[employee], d(1), d(15));
/// assert_eq!(summary.employees[0].total_miles, Decimal::from(25));
/// assert_eq!(summary.employees[0].total_compensation, Decimal::new(1625, 2));
/// assert_eq!(summary.totals.formatted_compensation, "$16.25");
/// ```
pub fn aggregate_mileage(
    reports: &[DailyJobReport],
    roster: &[Employee],
    period_start: NaiveDate,
    period_end: NaiveDate,
) -> MileageSummary {
    let mut by_user: HashMap<&str, Vec<&DailyJobReport>> = HashMap::new();
    let mut user_order = Vec::new();
    for report in dedup_by_id(reports) {
        if report.date < period_start || report.date > period_end {
            continue;
        }
        if report.reimbursable_miles().is_none() {
            continue;
        }
        by_user
            .entry(report.user_id.as_str())
            .or_insert_with(|| {
                user_order.push(report.user_id.as_str());
                Vec::new()
            })
            .push(report);
    }

    let mut employees: Vec<EmployeeMileage> = participants(roster, user_order)
        .into_iter()
        .map(|participant| {
            let user_reports = by_user.remove(participant.user_id).unwrap_or_default();
            let (employee, rate) = match participant.employee {
                Some(employee) => (EmployeeInfo::from(employee), employee.mileage_rate()),
                None => {
                    let typed_name = user_reports
                        .iter()
                        .find_map(|report| report.your_name.as_deref());
                    (
                        EmployeeInfo::unknown(participant.user_id, typed_name),
                        Decimal::ZERO,
                    )
                }
            };
            employee_mileage(employee, rate, &user_reports)
        })
        .collect();

    employees.sort_by(|a, b| {
        b.total_miles
            .cmp(&a.total_miles)
            .then_with(|| a.employee.name.cmp(&b.employee.name))
    });

    let totals = mileage_totals(&employees);

    debug!(
        period_start = %period_start,
        period_end = %period_end,
        employees = totals.total_employees,
        jobs = totals.total_jobs,
        total_miles = %totals.total_miles,
        "Aggregated mileage"
    );

    MileageSummary {
        period_start,
        period_end,
        employees,
        totals,
    }
}

fn employee_mileage(
    employee: EmployeeInfo,
    mileage_rate: Decimal,
    reports: &[&DailyJobReport],
) -> EmployeeMileage {
    let total_miles: Decimal = reports
        .iter()
        .filter_map(|report| report.reimbursable_miles())
        .sum();
    let total_jobs = reports.len();
    let total_compensation = (total_miles * mileage_rate).round_dp(2);
    let average_miles_per_job = if total_jobs == 0 {
        Decimal::ZERO
    } else {
        (total_miles / Decimal::from(total_jobs)).round_dp(2)
    };

    EmployeeMileage {
        employee,
        total_miles,
        formatted_miles: format_miles(total_miles),
        total_jobs,
        total_compensation,
        formatted_compensation: format_currency(total_compensation),
        average_miles_per_job,
        mileage_rate,
    }
}

fn mileage_totals(employees: &[EmployeeMileage]) -> MileageTotals {
    let total_miles: Decimal = employees.iter().map(|e| e.total_miles).sum();
    let total_compensation: Decimal = employees.iter().map(|e| e.total_compensation).sum();
    let total_employees = employees.len();
    let average_miles_per_employee = if total_employees == 0 {
        Decimal::ZERO
    } else {
        (total_miles / Decimal::from(total_employees)).round_dp(2)
    };

    MileageTotals {
        total_miles,
        formatted_miles: format_miles(total_miles),
        total_jobs: employees.iter().map(|e| e.total_jobs).sum(),
        total_compensation,
        formatted_compensation: format_currency(total_compensation),
        total_employees,
        employees_with_mileage: employees
            .iter()
            .filter(|e| e.total_miles > Decimal::ZERO)
            .count(),
        average_miles_per_employee,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, day).unwrap()
    }

    fn employee(id: &str, name: &str, rate: Option<&str>) -> Employee {
        Employee {
            id: id.to_string(),
            first_name: name.to_string(),
            last_name: String::new(),
            email: String::new(),
            role: "instructor".to_string(),
            is_active: true,
            amount_per_mile: rate.map(dec),
        }
    }

    fn report(id: &str, user_id: &str, day: u32, miles: Option<&str>) -> DailyJobReport {
        DailyJobReport {
            id: id.to_string(),
            user_id: user_id.to_string(),
            date: date(day),
            total_mileage: miles.map(dec),
            your_name: None,
        }
    }

    fn aggregate(reports: &[DailyJobReport], roster: &[Employee]) -> MileageSummary {
        aggregate_mileage(reports, roster, date(1), date(15))
    }

    #[test]
    fn test_compensation_at_roster_rate() {
        let roster = vec![employee("a", "Ada", Some("0.65"))];
        let reports = vec![
            report("r1", "a", 6, Some("10")),
            report("r2", "a", 7, Some("15")),
        ];

        let summary = aggregate(&reports, &roster);
        let a = &summary.employees[0];

        assert_eq!(a.total_miles, dec("25"));
        assert_eq!(a.total_jobs, 2);
        assert_eq!(a.total_compensation, dec("16.25"));
        assert_eq!(a.formatted_compensation, "$16.25");
        assert_eq!(a.formatted_miles, "25.0 mi");
        assert_eq!(a.average_miles_per_job, dec("12.5"));
        assert_eq!(a.mileage_rate, dec("0.65"));
    }

    #[test]
    fn test_missing_and_zero_mileage_skipped() {
        let roster = vec![employee("a", "Ada", Some("0.5"))];
        let reports = vec![
            report("r1", "a", 6, None),
            report("r2", "a", 7, Some("0")),
            report("r3", "a", 8, Some("12")),
        ];

        let summary = aggregate(&reports, &roster);
        assert_eq!(summary.employees[0].total_jobs, 1);
        assert_eq!(summary.employees[0].total_miles, dec("12"));
    }

    #[test]
    fn test_missing_rate_means_zero_compensation() {
        let roster = vec![employee("a", "Ada", None)];
        let reports = vec![report("r1", "a", 6, Some("30"))];

        let summary = aggregate(&reports, &roster);
        assert_eq!(summary.employees[0].total_compensation, Decimal::ZERO);
        assert_eq!(summary.employees[0].formatted_compensation, "$0.00");
    }

    #[test]
    fn test_duplicate_reports_counted_once() {
        let roster = vec![employee("a", "Ada", Some("0.65"))];
        let reports = vec![
            report("r1", "a", 6, Some("10")),
            report("r1", "a", 6, Some("10")),
            report("r2", "a", 7, Some("15")),
        ];

        let summary = aggregate(&reports, &roster);
        assert_eq!(summary.employees[0].total_miles, dec("25"));
        assert_eq!(summary.totals.total_jobs, 2);
    }

    #[test]
    fn test_unknown_user_uses_typed_name() {
        let mut typed = report("r1", "ghost", 6, Some("8"));
        typed.your_name = Some("Casper".to_string());

        let summary = aggregate(&[typed], &[]);
        let ghost = &summary.employees[0];

        assert_eq!(ghost.employee.name, "Casper");
        assert_eq!(ghost.mileage_rate, Decimal::ZERO);
        assert_eq!(ghost.total_miles, dec("8"));
    }

    #[test]
    fn test_active_employee_without_reports_included() {
        let roster = vec![
            employee("a", "Ada", Some("0.65")),
            employee("b", "Bo", Some("0.65")),
        ];
        let reports = vec![report("r1", "a", 6, Some("10"))];

        let summary = aggregate(&reports, &roster);

        assert_eq!(summary.employees.len(), 2);
        assert_eq!(summary.employees[0].employee.id, "a");
        assert_eq!(summary.employees[1].total_miles, Decimal::ZERO);
        assert_eq!(summary.employees[1].average_miles_per_job, Decimal::ZERO);
        assert_eq!(summary.totals.employees_with_mileage, 1);
        assert_eq!(summary.totals.average_miles_per_employee, dec("5"));
    }

    #[test]
    fn test_sorted_by_miles_and_totals() {
        let roster = vec![
            employee("a", "Ada", Some("0.5")),
            employee("b", "Bo", Some("1")),
        ];
        let reports = vec![
            report("r1", "a", 6, Some("10")),
            report("r2", "b", 6, Some("40")),
            report("r3", "b", 20, Some("100")),
        ];

        let summary = aggregate(&reports, &roster);

        assert_eq!(summary.employees[0].employee.id, "b");
        assert_eq!(summary.totals.total_miles, dec("50"));
        assert_eq!(summary.totals.total_compensation, dec("45"));
        assert_eq!(summary.totals.formatted_compensation, "$45.00");
    }
}
