//! Daily job report model, the source of mileage records.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::PayrollError;

use super::DateValue;

/// An employee's end-of-day job report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyJobReport {
    /// Unique identifier of the report.
    pub id: String,
    /// The reporting employee.
    pub user_id: String,
    /// The day the report covers.
    pub date: NaiveDate,
    /// Miles driven for the job, if any were logged.
    #[serde(default)]
    pub total_mileage: Option<Decimal>,
    /// The name typed by the employee on the report.
    #[serde(default)]
    pub your_name: Option<String>,
}

impl DailyJobReport {
    /// Mileage that counts towards reimbursement: present and positive.
    pub fn reimbursable_miles(&self) -> Option<Decimal> {
        self.total_mileage.filter(|miles| *miles > Decimal::ZERO)
    }
}

/// A job report document as read from the store, before normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobReportDocument {
    /// Document identifier.
    pub id: String,
    /// Reporting employee.
    #[serde(default)]
    pub user_id: Option<String>,
    /// The day the report covers.
    #[serde(default)]
    pub date: Option<DateValue>,
    /// Miles driven.
    #[serde(default)]
    pub total_mileage: Option<Decimal>,
    /// Name typed on the report.
    #[serde(default)]
    pub your_name: Option<String>,
}

impl TryFrom<JobReportDocument> for DailyJobReport {
    type Error = PayrollError;

    fn try_from(doc: JobReportDocument) -> Result<Self, Self::Error> {
        let user_id = match doc.user_id.filter(|id| !id.is_empty()) {
            Some(id) => id,
            None => {
                return Err(PayrollError::InvalidRecord {
                    record_id: doc.id,
                    message: "userId is missing".to_string(),
                });
            }
        };

        let Some(date) = doc.date.as_ref().and_then(DateValue::to_date) else {
            return Err(PayrollError::InvalidRecord {
                record_id: doc.id,
                message: "date is missing or not a valid calendar date".to_string(),
            });
        };

        Ok(DailyJobReport {
            id: doc.id,
            user_id,
            date,
            total_mileage: doc.total_mileage,
            your_name: doc.your_name,
        })
    }
}
