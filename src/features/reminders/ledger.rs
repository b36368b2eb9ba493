//! # Reminder Ledger
//!
//! Ordered reminder records with an unsent/sent lifecycle. Reminders are
//! appended unsent, flipped to sent in one batch, and purged once sent.
//!
//! - **Version**: 1.2.0
//! - **Since**: 0.2.0
//!
//! ## Changelog
//! - 1.2.0: Left-joined report rows keep orphaned reminders
//! - 1.1.0: Batch mark_sent and purge_sent
//! - 1.0.0: Initial release

use chrono::NaiveDate;
use log::{debug, info};
use serde::Serialize;
use std::collections::HashMap;

use crate::core::models::{Certification, Employee, Reminder, ReminderStatus};
use crate::features::expiration::ExpiringCertification;

/// One reminder joined with employee and certification details.
///
/// Join misses leave the foreign fields as `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReminderReportRow {
    pub employee_id: i64,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub certification_id: i64,
    pub certification_name: Option<String>,
    pub reminder_date: NaiveDate,
    pub sent_date: Option<NaiveDate>,
    pub status: ReminderStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReminderLedger {
    reminders: Vec<Reminder>,
}

impl ReminderLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap reminders loaded from storage, keeping their order
    pub fn from_reminders(reminders: Vec<Reminder>) -> Self {
        Self { reminders }
    }

    /// Append one unsent reminder per expiring certification.
    ///
    /// Existing reminders for the same pair are not consulted, so repeated
    /// calls produce repeated reminders.
    pub fn record(&mut self, expiring: &[ExpiringCertification], reference: NaiveDate) -> usize {
        self.reminders.extend(expiring.iter().map(|entry| {
            Reminder::unsent(
                entry.held.employee_id,
                entry.held.certification_id,
                reference,
            )
        }));

        if !expiring.is_empty() {
            info!("Recorded {} reminder(s) dated {}", expiring.len(), reference);
        }
        expiring.len()
    }

    pub fn unsent(&self) -> Vec<&Reminder> {
        self.reminders.iter().filter(|r| !r.is_sent()).collect()
    }

    pub fn sent(&self) -> Vec<&Reminder> {
        self.reminders.iter().filter(|r| r.is_sent()).collect()
    }

    /// Stamp every unsent reminder with `reference` as its sent date
    pub fn mark_sent(&mut self, reference: NaiveDate) -> usize {
        let mut count = 0;
        for reminder in self.reminders.iter_mut().filter(|r| !r.is_sent()) {
            reminder.sent_date = Some(reference);
            count += 1;
        }

        if count > 0 {
            info!("Marked {count} reminder(s) sent on {reference}");
        } else {
            debug!("No unsent reminders to mark");
        }
        count
    }

    /// Drop every sent reminder. Unsent ones keep their order and values.
    pub fn purge_sent(&mut self) -> usize {
        let before = self.reminders.len();
        self.reminders.retain(|r| !r.is_sent());
        let removed = before - self.reminders.len();

        if removed > 0 {
            info!("Purged {removed} sent reminder(s)");
        }
        removed
    }

    /// Left-join reminders against employees and certifications
    pub fn report(
        &self,
        employees: &[Employee],
        certifications: &[Certification],
    ) -> Vec<ReminderReportRow> {
        let employees: HashMap<i64, &Employee> =
            employees.iter().map(|e| (e.employee_id, e)).collect();
        let certifications: HashMap<i64, &Certification> = certifications
            .iter()
            .map(|c| (c.certification_id, c))
            .collect();

        self.reminders
            .iter()
            .map(|reminder| {
                let employee = employees.get(&reminder.employee_id);
                let certification = certifications.get(&reminder.certification_id);
                ReminderReportRow {
                    employee_id: reminder.employee_id,
                    first_name: employee.map(|e| e.first_name.clone()),
                    last_name: employee.map(|e| e.last_name.clone()),
                    certification_id: reminder.certification_id,
                    certification_name: certification.map(|c| c.name.clone()),
                    reminder_date: reminder.reminder_date,
                    sent_date: reminder.sent_date,
                    status: reminder.status(),
                }
            })
            .collect()
    }

    pub fn all(&self) -> &[Reminder] {
        &self.reminders
    }

    pub fn len(&self) -> usize {
        self.reminders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reminders.is_empty()
    }
}
