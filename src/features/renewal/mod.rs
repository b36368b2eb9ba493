//! # Renewal Feature
//!
//! Renewal requests for certifications with unsent reminders.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.3.0
//! - **Toggleable**: false

pub mod notification;

pub use notification::{format_notice, RenewalNotice, RenewalNotifier, SimulatedNotifier};
