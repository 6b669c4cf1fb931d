//! Property-based tests for pay period generation.
//!
//! These tests check that every valid policy partitions arbitrary date ranges
//! and that the locator's current and previous periods are adjacent.

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;

use super::boundaries::calculate_boundaries;
use super::locator::{current_period, previous_period};
use crate::models::{PayPeriodPolicy, weekday_from_sunday_index};

/// Strategy for dates between 2000 and roughly 2060.
fn date_strategy() -> impl Strategy<Value = NaiveDate> {
    (0i64..22_000).prop_map(|offset| {
        NaiveDate::from_ymd_opt(2000, 1, 1).unwrap() + Duration::days(offset)
    })
}

/// Strategy for a valid, active policy of any type.
fn policy_strategy() -> impl Strategy<Value = PayPeriodPolicy> {
    prop_oneof![
        (0i32..7).prop_map(|day| PayPeriodPolicy::weekly(weekday_from_sunday_index(day).unwrap())),
        date_strategy().prop_map(PayPeriodPolicy::bi_weekly),
        (1i32..=31, 1i32..=31)
            .prop_filter("days must differ", |(first, second)| first != second)
            .prop_map(|(first, second)| PayPeriodPolicy::semi_monthly(first, second)),
        (1i32..=31).prop_map(PayPeriodPolicy::monthly),
    ]
}

proptest! {
    /// Property: every date in the range falls in exactly one period.
    #[test]
    fn prop_periods_partition_range(
        policy in policy_strategy(),
        range_start in date_strategy(),
        length in 0i64..400,
    ) {
        let range_end = range_start + Duration::days(length);
        let periods = calculate_boundaries(range_start, range_end, &policy).unwrap();

        prop_assert!(!periods.is_empty());
        prop_assert!(periods[0].start <= range_start);
        prop_assert!(periods[periods.len() - 1].end >= range_end);

        for pair in periods.windows(2) {
            prop_assert_eq!(pair[0].end + Duration::days(1), pair[1].start);
        }

        let mut day = range_start;
        while day <= range_end {
            let containing = periods.iter().filter(|p| p.contains_date(day)).count();
            prop_assert_eq!(containing, 1, "date {} in {} periods", day, containing);
            day += Duration::days(1);
        }
    }

    /// Property: the same date lands in the same period regardless of window.
    #[test]
    fn prop_periods_independent_of_window(
        policy in policy_strategy(),
        day in date_strategy(),
        before in 0i64..90,
        after in 0i64..90,
    ) {
        let narrow = calculate_boundaries(day, day, &policy).unwrap();
        let wide = calculate_boundaries(
            day - Duration::days(before),
            day + Duration::days(after),
            &policy,
        )
        .unwrap();

        let in_narrow = narrow.iter().find(|p| p.contains_date(day)).unwrap();
        let in_wide = wide.iter().find(|p| p.contains_date(day)).unwrap();
        prop_assert_eq!(in_narrow, in_wide);
    }

    /// Property: the previous period ends the day before the current one starts.
    #[test]
    fn prop_previous_adjacent_to_current(
        policy in policy_strategy(),
        today in date_strategy(),
    ) {
        let current = current_period(&policy, today).unwrap();
        let previous = previous_period(&policy, today).unwrap();

        prop_assert!(current.contains_date(today));
        prop_assert_eq!(previous.end + Duration::days(1), current.start);
    }

    /// Property: bi-weekly periods are 14 days and aligned to the anchor.
    #[test]
    fn prop_bi_weekly_aligned_to_anchor(
        anchor in date_strategy(),
        range_start in date_strategy(),
        length in 0i64..120,
    ) {
        let policy = PayPeriodPolicy::bi_weekly(anchor);
        let range_end = range_start + Duration::days(length);
        let periods = calculate_boundaries(range_start, range_end, &policy).unwrap();

        for period in &periods {
            prop_assert_eq!(period.days(), 14);
            prop_assert_eq!((period.start - anchor).num_days().rem_euclid(14), 0);
        }
    }
}
