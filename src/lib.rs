// Core layer - shared types, dates and configuration
pub mod core;

// Features layer - expiry evaluation, reminders, assignments, reports, renewal
pub mod features;

// In-memory working set
pub mod session;

// Infrastructure - SQLite persistence and CSV files
pub mod csv_files;
pub mod database;

// Application layer - menu commands
pub mod commands;

pub use core::Config;
pub use csv_files::CsvDirectory;
pub use database::Database;
pub use session::{ExpirationOutcome, Session};

pub use features::{
    // Assignments
    CertificationAssignmentStore, EmployeeCertificationRow,
    // Expiration
    find_expiring, ExpiringCertification, ExpiryPolicy, ExpiryStatus,
    // Reminders
    ReminderLedger, ReminderReportRow,
    // Renewal
    RenewalNotice, RenewalNotifier, SimulatedNotifier,
};
