//! # Core Module
//!
//! Core domain types, configuration, date handling and output formatting.
//!
//! - **Version**: 1.2.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.2.0: Add response module with terminal table rendering
//! - 1.1.0: Add dates module
//! - 1.0.0: Initial creation with config and models

pub mod config;
pub mod dates;
pub mod models;
pub mod response;

// Re-export commonly used items
pub use config::Config;
pub use dates::{format_date, parse_date, DATE_FORMATS};
pub use models::{
    Certification, Employee, HeldCertification, NeededCertification, Reminder, ReminderStatus,
};
pub use response::{blank_or, render_table, truncate_cell, CELL_LIMIT};
