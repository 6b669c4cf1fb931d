//! Organisation-level payroll settings.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::PayPeriodPolicy;

/// Which overtime figure is authoritative for payroll.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OvertimeMethod {
    /// Hours over the daily threshold on each day.
    #[default]
    Daily,
    /// Hours over the weekly threshold across the whole pay period.
    Weekly,
}

/// Overtime thresholds and method.
///
/// # Example
///
/// ```
/// use studio_payroll::models::{OvertimeMethod, OvertimeSettings};
/// use rust_decimal::Decimal;
///
/// let settings: OvertimeSettings = serde_json::from_str(r#"{"calculationMethod": "weekly"}"#).unwrap();
/// assert_eq!(settings.calculation_method, OvertimeMethod::Weekly);
/// assert_eq!(settings.daily_threshold, Decimal::from(8));
/// assert_eq!(settings.weekly_threshold, Decimal::from(40));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OvertimeSettings {
    /// The authoritative method.
    #[serde(default)]
    pub calculation_method: OvertimeMethod,
    /// Hours per day before daily overtime starts.
    #[serde(default = "default_daily_threshold")]
    pub daily_threshold: Decimal,
    /// Hours per period before weekly overtime starts.
    #[serde(default = "default_weekly_threshold")]
    pub weekly_threshold: Decimal,
}

/// Default daily overtime threshold in hours.
pub const DEFAULT_DAILY_THRESHOLD: Decimal = Decimal::from_parts(8, 0, 0, false, 0);

/// Default weekly overtime threshold in hours.
pub const DEFAULT_WEEKLY_THRESHOLD: Decimal = Decimal::from_parts(40, 0, 0, false, 0);

fn default_daily_threshold() -> Decimal {
    DEFAULT_DAILY_THRESHOLD
}

fn default_weekly_threshold() -> Decimal {
    DEFAULT_WEEKLY_THRESHOLD
}

impl Default for OvertimeSettings {
    fn default() -> Self {
        Self {
            calculation_method: OvertimeMethod::Daily,
            daily_threshold: DEFAULT_DAILY_THRESHOLD,
            weekly_threshold: DEFAULT_WEEKLY_THRESHOLD,
        }
    }
}

/// The settings object carried by an organisation document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationSettings {
    /// The pay period policy.
    pub pay_period_settings: PayPeriodPolicy,
    /// Overtime rules; defaults apply when absent.
    #[serde(default)]
    pub overtime_settings: OvertimeSettings,
}
