//! Pay period policy models.
//!
//! A [`PayPeriodPolicy`] is stored by the organisation in a loose shape: a
//! policy type plus a bag of optional configuration fields. Before any period
//! is generated the policy is validated into a [`PaySchedule`], which carries
//! only the fields its type needs and only values that passed validation.

use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{PayrollError, PayrollResult};

/// The cadence at which an organisation pays its employees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PayPeriodType {
    /// Seven-day periods starting on a fixed weekday.
    Weekly,
    /// Fourteen-day periods aligned to an anchor date.
    BiWeekly,
    /// Two periods per calendar month.
    SemiMonthly,
    /// One period per calendar month starting on a fixed day.
    Monthly,
}

impl std::fmt::Display for PayPeriodType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PayPeriodType::Weekly => write!(f, "WEEKLY"),
            PayPeriodType::BiWeekly => write!(f, "BI_WEEKLY"),
            PayPeriodType::SemiMonthly => write!(f, "SEMI_MONTHLY"),
            PayPeriodType::Monthly => write!(f, "MONTHLY"),
        }
    }
}

/// Type-specific configuration as persisted in organisation settings.
///
/// Only the fields relevant to the policy type are expected to be present;
/// the rest are ignored. Numeric fields are signed so that out-of-range values
/// reach validation instead of failing deserialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodConfig {
    /// WEEKLY: the weekday periods start on, 0 = Sunday through 6 = Saturday.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day_of_week: Option<i32>,
    /// BI_WEEKLY: the anchor date of one period start.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    /// SEMI_MONTHLY: day of month the first period starts on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_date: Option<i32>,
    /// SEMI_MONTHLY: day of month the second period starts on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub second_date: Option<i32>,
    /// MONTHLY: day of month each period starts on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day_of_month: Option<i32>,
}

/// An organisation's pay period policy.
///
/// # Example
///
/// ```
/// use studio_payroll::models::{PayPeriodPolicy, PaySchedule};
/// use chrono::NaiveDate;
///
/// let json = r#"{
///     "isActive": true,
///     "type": "BI_WEEKLY",
///     "config": { "startDate": "2025-01-01" }
/// }"#;
/// let policy: PayPeriodPolicy = serde_json::from_str(json).unwrap();
/// assert_eq!(
///     policy.schedule().unwrap(),
///     PaySchedule::BiWeekly { anchor: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap() }
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayPeriodPolicy {
    /// Whether the policy is in force. Inactive policies produce no schedule.
    pub is_active: bool,
    /// The policy type.
    #[serde(rename = "type")]
    pub period_type: PayPeriodType,
    /// Type-specific configuration.
    #[serde(default)]
    pub config: PeriodConfig,
}

/// A validated pay schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaySchedule {
    /// Seven-day periods starting on `week_start`.
    Weekly {
        /// First weekday of every period.
        week_start: Weekday,
    },
    /// Fourteen-day periods, one of which starts on `anchor`.
    BiWeekly {
        /// Reference period start.
        anchor: NaiveDate,
    },
    /// Two periods per month. `first_day < second_day` always holds.
    SemiMonthly {
        /// Day of month the first period starts on.
        first_day: u32,
        /// Day of month the second period starts on.
        second_day: u32,
    },
    /// One period per month starting on `day_of_month`.
    Monthly {
        /// Day of month each period starts on.
        day_of_month: u32,
    },
}

impl PayPeriodPolicy {
    /// Creates an active weekly policy starting on the given weekday.
    pub fn weekly(week_start: Weekday) -> Self {
        Self::active(
            PayPeriodType::Weekly,
            PeriodConfig {
                day_of_week: Some(week_start.num_days_from_sunday() as i32),
                ..PeriodConfig::default()
            },
        )
    }

    /// Creates an active bi-weekly policy anchored at `anchor`.
    pub fn bi_weekly(anchor: NaiveDate) -> Self {
        Self::active(
            PayPeriodType::BiWeekly,
            PeriodConfig {
                start_date: Some(anchor),
                ..PeriodConfig::default()
            },
        )
    }

    /// Creates an active semi-monthly policy.
    pub fn semi_monthly(first_date: i32, second_date: i32) -> Self {
        Self::active(
            PayPeriodType::SemiMonthly,
            PeriodConfig {
                first_date: Some(first_date),
                second_date: Some(second_date),
                ..PeriodConfig::default()
            },
        )
    }

    /// Creates an active monthly policy.
    pub fn monthly(day_of_month: i32) -> Self {
        Self::active(
            PayPeriodType::Monthly,
            PeriodConfig {
                day_of_month: Some(day_of_month),
                ..PeriodConfig::default()
            },
        )
    }

    fn active(period_type: PayPeriodType, config: PeriodConfig) -> Self {
        Self {
            is_active: true,
            period_type,
            config,
        }
    }

    /// Validates the configuration against the constraints of the policy type.
    ///
    /// # Errors
    ///
    /// Returns [`PayrollError::InvalidPolicy`] when a required field is missing
    /// or out of range:
    /// - WEEKLY: `dayOfWeek` in 0..=6
    /// - BI_WEEKLY: `startDate` present
    /// - SEMI_MONTHLY: `firstDate` and `secondDate` in 1..=31 and different
    /// - MONTHLY: `dayOfMonth` in 1..=31
    ///
    /// # Example
    ///
    /// ```
    /// use studio_payroll::models::PayPeriodPolicy;
    ///
    /// assert!(PayPeriodPolicy::semi_monthly(1, 16).schedule().is_ok());
    /// assert!(PayPeriodPolicy::semi_monthly(15, 15).schedule().is_err());
    /// assert!(PayPeriodPolicy::monthly(32).schedule().is_err());
    /// ```
    pub fn schedule(&self) -> PayrollResult<PaySchedule> {
        let config = &self.config;
        match self.period_type {
            PayPeriodType::Weekly => {
                let day = self.require(config.day_of_week, "dayOfWeek")?;
                let week_start = weekday_from_sunday_index(day).ok_or_else(|| {
                    self.invalid(format!("dayOfWeek must be between 0 and 6, got {}", day))
                })?;
                Ok(PaySchedule::Weekly { week_start })
            }
            PayPeriodType::BiWeekly => {
                let anchor = self.require(config.start_date, "startDate")?;
                Ok(PaySchedule::BiWeekly { anchor })
            }
            PayPeriodType::SemiMonthly => {
                let first = self.day_of_month_field(config.first_date, "firstDate")?;
                let second = self.day_of_month_field(config.second_date, "secondDate")?;
                if first == second {
                    return Err(self.invalid(format!(
                        "firstDate and secondDate must differ, both are {}",
                        first
                    )));
                }
                Ok(PaySchedule::SemiMonthly {
                    first_day: first.min(second),
                    second_day: first.max(second),
                })
            }
            PayPeriodType::Monthly => {
                let day_of_month = self.day_of_month_field(config.day_of_month, "dayOfMonth")?;
                Ok(PaySchedule::Monthly { day_of_month })
            }
        }
    }

    fn require<T>(&self, value: Option<T>, field: &str) -> PayrollResult<T> {
        value.ok_or_else(|| self.invalid(format!("{} is required", field)))
    }

    fn day_of_month_field(&self, value: Option<i32>, field: &str) -> PayrollResult<u32> {
        let day = self.require(value, field)?;
        if (1..=31).contains(&day) {
            Ok(day as u32)
        } else {
            Err(self.invalid(format!("{} must be between 1 and 31, got {}", field, day)))
        }
    }

    fn invalid(&self, message: String) -> PayrollError {
        PayrollError::InvalidPolicy {
            period_type: self.period_type.to_string(),
            message,
        }
    }
}

/// Maps a Sunday-based weekday index (0 = Sunday) to a [`Weekday`].
pub fn weekday_from_sunday_index(index: i32) -> Option<Weekday> {
    match index {
        0 => Some(Weekday::Sun),
        1 => Some(Weekday::Mon),
        2 => Some(Weekday::Tue),
        3 => Some(Weekday::Wed),
        4 => Some(Weekday::Thu),
        5 => Some(Weekday::Fri),
        6 => Some(Weekday::Sat),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_deserialize_weekly_policy() {
        let json = r#"{
            "isActive": true,
            "type": "WEEKLY",
            "config": { "dayOfWeek": 1 }
        }"#;
        let policy: PayPeriodPolicy = serde_json::from_str(json).unwrap();
        assert_eq!(policy.period_type, PayPeriodType::Weekly);
        assert_eq!(
            policy.schedule().unwrap(),
            PaySchedule::Weekly {
                week_start: Weekday::Mon
            }
        );
    }

    #[test]
    fn test_deserialize_policy_without_config() {
        let json = r#"{ "isActive": false, "type": "MONTHLY" }"#;
        let policy: PayPeriodPolicy = serde_json::from_str(json).unwrap();
        assert!(!policy.is_active);
        assert_eq!(policy.config, PeriodConfig::default());
    }

    #[test]
    fn test_period_type_serialization() {
        assert_eq!(
            serde_json::to_string(&PayPeriodType::BiWeekly).unwrap(),
            "\"BI_WEEKLY\""
        );
        assert_eq!(
            serde_json::to_string(&PayPeriodType::SemiMonthly).unwrap(),
            "\"SEMI_MONTHLY\""
        );
        assert_eq!(PayPeriodType::Weekly.to_string(), "WEEKLY");
    }

    #[test]
    fn test_weekly_rejects_day_seven() {
        let mut policy = PayPeriodPolicy::weekly(Weekday::Sun);
        policy.config.day_of_week = Some(7);
        match policy.schedule() {
            Err(PayrollError::InvalidPolicy {
                period_type,
                message,
            }) => {
                assert_eq!(period_type, "WEEKLY");
                assert!(message.contains("dayOfWeek"));
            }
            other => panic!("Expected InvalidPolicy, got {:?}", other),
        }
    }

    #[test]
    fn test_weekly_requires_day_of_week() {
        let mut policy = PayPeriodPolicy::weekly(Weekday::Sun);
        policy.config.day_of_week = None;
        let err = policy.schedule().unwrap_err();
        assert!(err.to_string().contains("dayOfWeek is required"));
    }

    #[test]
    fn test_bi_weekly_requires_start_date() {
        let policy = PayPeriodPolicy {
            is_active: true,
            period_type: PayPeriodType::BiWeekly,
            config: PeriodConfig::default(),
        };
        assert!(policy.schedule().is_err());
    }

    #[test]
    fn test_semi_monthly_orders_days() {
        let policy = PayPeriodPolicy::semi_monthly(16, 1);
        assert_eq!(
            policy.schedule().unwrap(),
            PaySchedule::SemiMonthly {
                first_day: 1,
                second_day: 16
            }
        );
    }

    #[test]
    fn test_semi_monthly_rejects_equal_days() {
        assert!(PayPeriodPolicy::semi_monthly(10, 10).schedule().is_err());
    }

    #[test]
    fn test_semi_monthly_rejects_day_zero() {
        assert!(PayPeriodPolicy::semi_monthly(0, 15).schedule().is_err());
    }

    #[test]
    fn test_monthly_accepts_day_31() {
        assert_eq!(
            PayPeriodPolicy::monthly(31).schedule().unwrap(),
            PaySchedule::Monthly { day_of_month: 31 }
        );
    }

    #[test]
    fn test_constructors_round_trip_through_json() {
        let policy = PayPeriodPolicy::bi_weekly(date(2025, 1, 1));
        let json = serde_json::to_string(&policy).unwrap();
        assert!(json.contains("\"type\":\"BI_WEEKLY\""));
        assert!(json.contains("\"startDate\":\"2025-01-01\""));
        assert!(!json.contains("dayOfWeek"));
    }

    #[test]
    fn test_weekday_from_sunday_index() {
        assert_eq!(weekday_from_sunday_index(0), Some(Weekday::Sun));
        assert_eq!(weekday_from_sunday_index(6), Some(Weekday::Sat));
        assert_eq!(weekday_from_sunday_index(-1), None);
    }
}
