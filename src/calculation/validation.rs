//! Pay period boundary validation.
//!
//! Every generated period list must partition its requested range: each
//! calendar date in the range belongs to exactly one period. This module
//! reports every way a list can break that rule. The boundary calculator runs
//! it on each list it produces.

use chrono::NaiveDate;

use crate::models::Period;

/// A single violation of the partition rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoundaryIssue {
    /// No periods were produced for a non-empty range.
    Empty,
    /// A period ends before it starts.
    Inverted {
        /// The period start.
        start: NaiveDate,
        /// The period end.
        end: NaiveDate,
    },
    /// Two consecutive periods share at least one date.
    Overlap {
        /// End of the earlier period.
        first_end: NaiveDate,
        /// Start of the later period.
        second_start: NaiveDate,
    },
    /// Dates between two consecutive periods belong to neither.
    Gap {
        /// End of the earlier period.
        after: NaiveDate,
        /// Start of the later period.
        before: NaiveDate,
    },
    /// The first period starts after the range does.
    UncoveredStart {
        /// Requested range start.
        range_start: NaiveDate,
        /// Start of the first period.
        first_start: NaiveDate,
    },
    /// The last period ends before the range does.
    UncoveredEnd {
        /// Requested range end.
        range_end: NaiveDate,
        /// End of the last period.
        last_end: NaiveDate,
    },
}

impl std::fmt::Display for BoundaryIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BoundaryIssue::Empty => write!(f, "no periods generated"),
            BoundaryIssue::Inverted { start, end } => {
                write!(f, "period {} - {} ends before it starts", start, end)
            }
            BoundaryIssue::Overlap {
                first_end,
                second_start,
            } => write!(
                f,
                "period ending {} overlaps period starting {}",
                first_end, second_start
            ),
            BoundaryIssue::Gap { after, before } => write!(
                f,
                "dates between {} and {} belong to no period",
                after, before
            ),
            BoundaryIssue::UncoveredStart {
                range_start,
                first_start,
            } => write!(
                f,
                "range starts {} but first period starts {}",
                range_start, first_start
            ),
            BoundaryIssue::UncoveredEnd {
                range_end,
                last_end,
            } => write!(
                f,
                "range ends {} but last period ends {}",
                range_end, last_end
            ),
        }
    }
}

/// Checks that `periods`, in order, partition `[range_start, range_end]`.
///
/// Returns every issue found; an empty vector means the list is valid.
///
/// # Example
///
/// ```
/// use studio_payroll::calculation::{BoundaryIssue, validate_period_boundaries};
/// use studio_payroll::models::Period;
/// use chrono::NaiveDate;
///
/// let d = |m, d| NaiveDate::from_ymd_opt(2025, m, d).unwrap();
/// let leaky = vec![
///     Period::new(d(1, 1), d(1, 14), ""),
///     Period::new(d(1, 14), d(1, 27), ""),
/// ];
/// let issues = validate_period_boundaries(&leaky, d(1, 1), d(1, 27));
/// assert_eq!(
///     issues,
///     vec![BoundaryIssue::Overlap { first_end: d(1, 14), second_start: d(1, 14) }]
/// );
/// ```
pub fn validate_period_boundaries(
    periods: &[Period],
    range_start: NaiveDate,
    range_end: NaiveDate,
) -> Vec<BoundaryIssue> {
    let mut issues = Vec::new();

    let (Some(first), Some(last)) = (periods.first(), periods.last()) else {
        if range_start <= range_end {
            issues.push(BoundaryIssue::Empty);
        }
        return issues;
    };

    for period in periods {
        if period.end < period.start {
            issues.push(BoundaryIssue::Inverted {
                start: period.start,
                end: period.end,
            });
        }
    }

    for pair in periods.windows(2) {
        let (earlier, later) = (&pair[0], &pair[1]);
        if later.start <= earlier.end {
            issues.push(BoundaryIssue::Overlap {
                first_end: earlier.end,
                second_start: later.start,
            });
        } else if earlier.end.succ_opt() != Some(later.start) {
            issues.push(BoundaryIssue::Gap {
                after: earlier.end,
                before: later.start,
            });
        }
    }

    if first.start > range_start {
        issues.push(BoundaryIssue::UncoveredStart {
            range_start,
            first_start: first.start,
        });
    }
    if last.end < range_end {
        issues.push(BoundaryIssue::UncoveredEnd {
            range_end,
            last_end: last.end,
        });
    }

    issues
}
