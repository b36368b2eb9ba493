//! # Domain Records
//!
//! Row types for the five tables held in a session.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.1.0: Optional employee/certification columns (email, hire date, validity)
//! - 1.0.0: Initial release

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// An employee, owned by the external employee store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub employee_id: i64,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub hire_date: Option<String>,
    #[serde(default)]
    pub employment_status: Option<String>,
}

impl Employee {
    pub fn new(employee_id: i64, first_name: &str, last_name: &str) -> Self {
        Self {
            employee_id,
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            email: None,
            hire_date: None,
            employment_status: None,
        }
    }

    /// "First Last", trimmed when either half is blank
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// Certification reference data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Certification {
    pub certification_id: i64,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub validity_period_months: Option<i64>,
    #[serde(default)]
    pub is_required: bool,
}

impl Certification {
    pub fn new(certification_id: i64, name: &str, description: &str) -> Self {
        Self {
            certification_id,
            name: name.to_string(),
            description: description.to_string(),
            validity_period_months: None,
            is_required: false,
        }
    }
}

/// An employee holding a certification.
///
/// Dates stay as the text they were entered with; the expiry is only
/// interpreted when evaluating expirations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeldCertification {
    pub employee_id: i64,
    pub certification_id: i64,
    pub obtained_date: String,
    pub expiry_date: String,
}

impl HeldCertification {
    pub fn new(employee_id: i64, certification_id: i64, obtained: &str, expiry: &str) -> Self {
        Self {
            employee_id,
            certification_id,
            obtained_date: obtained.to_string(),
            expiry_date: expiry.to_string(),
        }
    }

    pub fn matches(&self, employee_id: i64, certification_id: i64) -> bool {
        self.employee_id == employee_id && self.certification_id == certification_id
    }
}

/// A certification an employee is required to obtain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NeededCertification {
    pub employee_id: i64,
    pub certification_id: i64,
}

/// Send state of a reminder, derived from `sent_date`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReminderStatus {
    Unsent,
    Sent,
}

impl std::fmt::Display for ReminderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReminderStatus::Unsent => write!(f, "unsent"),
            ReminderStatus::Sent => write!(f, "sent"),
        }
    }
}

/// A renewal reminder for a held certification.
///
/// Only `sent_date` ever changes, and only from `None` to `Some`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reminder {
    pub employee_id: i64,
    pub certification_id: i64,
    /// Day the reminder was generated
    pub reminder_date: NaiveDate,
    pub sent_date: Option<NaiveDate>,
}

impl Reminder {
    pub fn unsent(employee_id: i64, certification_id: i64, reminder_date: NaiveDate) -> Self {
        Self {
            employee_id,
            certification_id,
            reminder_date,
            sent_date: None,
        }
    }

    pub fn status(&self) -> ReminderStatus {
        if self.sent_date.is_some() {
            ReminderStatus::Sent
        } else {
            ReminderStatus::Unsent
        }
    }

    pub fn is_sent(&self) -> bool {
        self.sent_date.is_some()
    }
}
