//! # Reports Feature
//!
//! Derived, read-only views over employees, certifications, held and needed
//! certifications and the reminder ledger.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.2.0
//! - **Toggleable**: false

pub mod joiner;

pub use joiner::{
    employee_certifications, employee_needs, outstanding_needs, reminder_log, HeldReportRow,
    NeedReportRow,
};
