//! Roster employee model.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A roster member as provided by the roster store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    /// Unique identifier, matched against `userId` on records.
    pub id: String,
    /// Given name.
    #[serde(default)]
    pub first_name: String,
    /// Family name.
    #[serde(default)]
    pub last_name: String,
    /// Contact email.
    #[serde(default)]
    pub email: String,
    /// Role within the studio (e.g. "instructor", "admin").
    #[serde(default)]
    pub role: String,
    /// Inactive members are omitted from reports unless they have records.
    #[serde(default = "default_active")]
    pub is_active: bool,
    /// Mileage reimbursement rate per mile.
    #[serde(default)]
    pub amount_per_mile: Option<Decimal>,
}

fn default_active() -> bool {
    true
}

impl Employee {
    /// Returns "First Last", falling back to the email and then the id.
    ///
    /// # Examples
    ///
    /// ```
    /// use studio_payroll::models::Employee;
    ///
    /// let employee = Employee {
    ///     id: "u1".to_string(),
    ///     first_name: "Ada".to_string(),
    ///     last_name: "Lovelace".to_string(),
    ///     email: "ada@example.com".to_string(),
    ///     role: "instructor".to_string(),
    ///     is_active: true,
    ///     amount_per_mile: None,
    /// };
    /// assert_eq!(employee.full_name(), "Ada Lovelace");
    /// ```
    pub fn full_name(&self) -> String {
        let name = format!("{} {}", self.first_name.trim(), self.last_name.trim());
        let name = name.trim();
        if !name.is_empty() {
            name.to_string()
        } else if !self.email.is_empty() {
            self.email.clone()
        } else {
            self.id.clone()
        }
    }

    /// The mileage rate, or zero when none is configured.
    pub fn mileage_rate(&self) -> Decimal {
        self.amount_per_mile.unwrap_or(Decimal::ZERO)
    }
}
