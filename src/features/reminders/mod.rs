//! # Reminders Feature
//!
//! Reminder records for expiring certifications, with send-state tracking.
//!
//! - **Version**: 1.2.0
//! - **Since**: 0.2.0
//! - **Toggleable**: false

pub mod ledger;

pub use ledger::{ReminderLedger, ReminderReportRow};
