//! # Features
//!
//! Certification tracking features: expiration detection, reminder ledger,
//! held-certification assignments, reports and renewal requests.

pub mod assignments;
pub mod expiration;
pub mod reminders;
pub mod renewal;
pub mod reports;

pub use assignments::{CertificationAssignmentStore, EmployeeCertificationRow};
pub use expiration::{
    find_expiring, ExpiringCertification, ExpiryPolicy, ExpiryStatus, DEFAULT_WINDOW_DAYS,
};
pub use reminders::{ReminderLedger, ReminderReportRow};
pub use renewal::{RenewalNotice, RenewalNotifier, SimulatedNotifier};
pub use reports::{HeldReportRow, NeedReportRow};
