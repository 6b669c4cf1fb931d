//! Locating the current and previous pay periods.
//!
//! Periods are regenerated from the policy on every call. The caller supplies
//! "today" so the functions stay pure and testable; the service layer passes
//! the local calendar date.

use chrono::{Days, NaiveDate};
use tracing::{debug, warn};

use crate::models::{PayPeriodPolicy, Period};

use super::boundaries::calculate_boundaries;

/// Days either side of today searched for the current period.
pub const CURRENT_WINDOW_DAYS: u64 = 30;

/// Days before the previous period's end searched when regenerating it.
pub const PREVIOUS_WINDOW_DAYS: u64 = 60;

/// Returns the period containing `today`.
///
/// Returns `None` for an inactive or invalid policy, when the search window
/// around `today` leaves the representable calendar, or when no generated
/// period contains `today`.
///
/// # Example
///
/// ```
/// use studio_payroll::calculation::current_period;
/// use studio_payroll::models::PayPeriodPolicy;
/// use chrono::NaiveDate;
///
/// let d = |m, d| NaiveDate::from_ymd_opt(2025, m, d).unwrap();
/// let policy = PayPeriodPolicy::semi_monthly(1, 16);
///
/// let current = current_period(&policy, d(3, 20)).unwrap();
/// assert_eq!((current.start, current.end), (d(3, 16), d(3, 31)));
/// ```
pub fn current_period(policy: &PayPeriodPolicy, today: NaiveDate) -> Option<Period> {
    let window = Days::new(CURRENT_WINDOW_DAYS);
    let periods = active_periods(
        policy,
        today.checked_sub_days(window)?,
        today.checked_add_days(window)?,
    )?;

    let current = periods.into_iter().find(|period| period.contains_date(today));
    if current.is_none() {
        warn!(
            period_type = %policy.period_type,
            today = %today,
            "No pay period contains today"
        );
    }
    current
}

/// Returns the period immediately before the current one.
///
/// # Example
///
/// ```
/// use studio_payroll::calculation::previous_period;
/// use studio_payroll::models::PayPeriodPolicy;
/// use chrono::NaiveDate;
///
/// let d = |m, d| NaiveDate::from_ymd_opt(2025, m, d).unwrap();
/// let policy = PayPeriodPolicy::semi_monthly(1, 16);
///
/// let previous = previous_period(&policy, d(3, 20)).unwrap();
/// assert_eq!((previous.start, previous.end), (d(3, 1), d(3, 15)));
/// ```
pub fn previous_period(policy: &PayPeriodPolicy, today: NaiveDate) -> Option<Period> {
    let current = current_period(policy, today)?;
    previous_period_before(policy, &current)
}

/// Returns the period ending the day before `current` starts.
///
/// The boundaries are regenerated for a window ending on that day, since the
/// previous period may lie outside the window `current` was found in. If no
/// period ends exactly there, the last generated period is returned.
pub fn previous_period_before(policy: &PayPeriodPolicy, current: &Period) -> Option<Period> {
    let previous_end = current.start.pred_opt()?;
    let window_start = previous_end.checked_sub_days(Days::new(PREVIOUS_WINDOW_DAYS))?;
    let mut periods = active_periods(policy, window_start, previous_end)?;

    if let Some(index) = periods.iter().position(|period| period.end == previous_end) {
        return Some(periods.swap_remove(index));
    }

    warn!(
        period_type = %policy.period_type,
        previous_end = %previous_end,
        "No pay period ends the day before the current one, using the latest generated"
    );
    periods.pop()
}

/// Returns the current period followed by up to `count - 1` earlier periods.
///
/// The list is newest first and stops early if a previous period cannot be
/// located.
pub fn recent_periods(policy: &PayPeriodPolicy, today: NaiveDate, count: usize) -> Vec<Period> {
    let mut periods = Vec::with_capacity(count);
    let mut next = if count > 0 {
        current_period(policy, today)
    } else {
        None
    };

    while let Some(period) = next {
        next = if periods.len() + 1 < count {
            previous_period_before(policy, &period)
        } else {
            None
        };
        periods.push(period);
    }

    debug!(requested = count, located = periods.len(), "Located recent pay periods");
    periods
}

fn active_periods(
    policy: &PayPeriodPolicy,
    range_start: NaiveDate,
    range_end: NaiveDate,
) -> Option<Vec<Period>> {
    if !policy.is_active {
        debug!(period_type = %policy.period_type, "Pay period policy inactive");
        return None;
    }

    match calculate_boundaries(range_start, range_end, policy) {
        Ok(periods) => Some(periods),
        Err(err) => {
            warn!(
                period_type = %policy.period_type,
                error = %err,
                "Unable to locate pay period"
            );
            None
        }
    }
}
