//! # Feature: Renewal Requests
//!
//! Builds renewal-request notices for unsent reminders and hands them to a
//! notifier. The shipped notifier only logs: there is no email transport.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.3.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.1.0: Notifier trait so a real transport can be plugged in
//! - 1.0.0: Initial release with simulated sending

use anyhow::Result;
use chrono::NaiveDate;
use log::info;
use serde::Serialize;

use crate::core::dates::format_date;

/// A renewal request for one reminder
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenewalNotice {
    pub employee_id: i64,
    pub employee_name: Option<String>,
    pub email: Option<String>,
    pub certification_id: i64,
    pub certification_name: Option<String>,
    pub reminder_date: NaiveDate,
}

/// Delivers renewal notices.
///
/// Delivery is all-or-nothing: an `Err` means the caller must treat the
/// whole batch as unsent.
pub trait RenewalNotifier {
    fn send(&self, notices: &[RenewalNotice]) -> Result<usize>;
}

/// Logs each notice instead of sending it
#[derive(Debug, Clone, Copy, Default)]
pub struct SimulatedNotifier;

impl RenewalNotifier for SimulatedNotifier {
    fn send(&self, notices: &[RenewalNotice]) -> Result<usize> {
        for notice in notices {
            info!(
                "(simulated) renewal request to {}: {}",
                notice.email.as_deref().unwrap_or("<no email>"),
                format_notice(notice).lines().next().unwrap_or_default()
            );
        }
        Ok(notices.len())
    }
}

/// Render the message body of a renewal request
pub fn format_notice(notice: &RenewalNotice) -> String {
    let who = notice
        .employee_name
        .clone()
        .unwrap_or_else(|| format!("Employee #{}", notice.employee_id));
    let what = notice
        .certification_name
        .clone()
        .unwrap_or_else(|| format!("certification #{}", notice.certification_id));

    format!(
        "{who}: please renew {what}\nReminder raised on {}.\n",
        format_date(notice.reminder_date)
    )
}
