//! Reminder command handlers
//!
//! Handles: expiring, send, reminder_log, purge, export
//!
//! - **Version**: 1.2.0
//! - **Since**: 0.3.0
//!
//! ## Changelog
//! - 1.2.0: Add export (JSON reminder report)
//! - 1.1.0: Add purge with confirmation
//! - 1.0.0: Initial release

use anyhow::{Context, Result};
use log::info;

use crate::commands::context::CommandContext;
use crate::commands::handler::MenuCommandHandler;
use crate::commands::prompt::Prompter;
use crate::core::dates::format_date;
use crate::core::response::{blank_or, render_table};
use crate::features::expiration::window_end;

/// Handler for the reminder lifecycle
pub struct ReminderHandler;

impl MenuCommandHandler for ReminderHandler {
    fn command_names(&self) -> &'static [&'static str] {
        &["expiring", "send", "reminder_log", "purge", "export"]
    }

    fn handle(
        &self,
        name: &str,
        ctx: &mut CommandContext,
        prompter: &mut dyn Prompter,
    ) -> Result<String> {
        if let Some(msg) = super::require_loaded(ctx) {
            return Ok(msg);
        }

        match name {
            "expiring" => Ok(self.handle_expiring(ctx)),
            "send" => self.handle_send(ctx),
            "reminder_log" => Ok(self.handle_log(ctx)),
            "purge" => self.handle_purge(ctx, prompter),
            "export" => self.handle_export(ctx),
            _ => Ok(String::new()),
        }
    }
}

impl ReminderHandler {
    /// Evaluate the window for the current scope and record reminders
    fn handle_expiring(&self, ctx: &mut CommandContext) -> String {
        let today = ctx.today();
        let window = ctx.config.reminder_window_days;
        let scope = ctx.session.current_employee_id;

        let outcome = ctx.session.evaluate_and_record_expiring(
            scope,
            today,
            window,
            ctx.config.expiry_policy,
        );

        let scope_label = match scope {
            Some(id) => format!(" for {}", super::employee_label(ctx, id)),
            None => String::new(),
        };

        if outcome.expiring.is_empty() {
            return format!("No certifications expiring in the next {window} days{scope_label}.\n");
        }

        let rows: Vec<Vec<String>> = outcome
            .expiring
            .iter()
            .map(|entry| {
                let employee = ctx.session.employee(entry.held.employee_id);
                let certification = ctx.session.certification(entry.held.certification_id);
                vec![
                    entry.held.employee_id.to_string(),
                    blank_or(employee.map(|e| e.full_name())),
                    blank_or(certification.map(|c| c.name.clone())),
                    format_date(entry.expiry),
                    entry.days_remaining.to_string(),
                    entry.status.to_string(),
                ]
            })
            .collect();

        format!(
            "Certifications expiring by {}{scope_label}:\n{}Recorded {} reminder(s).\n",
            format_date(window_end(today, window)),
            render_table(
                &["Employee ID", "Employee", "Certification", "Expires", "Days", "Status"],
                &rows,
            ),
            outcome.recorded
        )
    }

    fn handle_send(&self, ctx: &mut CommandContext) -> Result<String> {
        if ctx.session.ledger.unsent().is_empty() {
            return Ok("No unsent reminders.\n".to_string());
        }

        let today = ctx.today();
        let sent = ctx.session.send_unsent(today, ctx.notifier.as_ref())?;
        Ok(format!(
            "Sending renewal request emails (simulated)...\nRequests sent: {sent}. Save changes to keep the sent state.\n"
        ))
    }

    fn handle_log(&self, ctx: &CommandContext) -> String {
        let report = ctx.session.reminder_report();
        if report.is_empty() {
            return "No reminders on record.\n".to_string();
        }

        let rows: Vec<Vec<String>> = report
            .into_iter()
            .map(|r| {
                vec![
                    r.employee_id.to_string(),
                    blank_or(r.first_name),
                    blank_or(r.last_name),
                    r.certification_id.to_string(),
                    blank_or(r.certification_name),
                    format_date(r.reminder_date),
                    blank_or(r.sent_date.map(format_date)),
                    r.status.to_string(),
                ]
            })
            .collect();

        format!(
            "Reminder log:\n{}",
            render_table(
                &[
                    "Employee ID",
                    "First",
                    "Last",
                    "Cert ID",
                    "Certification",
                    "Reminded",
                    "Sent",
                    "Status",
                ],
                &rows,
            )
        )
    }

    fn handle_purge(&self, ctx: &mut CommandContext, prompter: &mut dyn Prompter) -> Result<String> {
        let sent = ctx.session.ledger.sent().len();
        if sent == 0 {
            return Ok("No sent reminders to purge.\n".to_string());
        }

        if !prompter.confirm(&format!(
            "Permanently remove {sent} sent reminder(s)? (y/N)"
        ))? {
            return Ok("Purge cancelled.\n".to_string());
        }

        let removed = ctx.session.purge_sent();
        Ok(format!("Purged {removed} sent reminder(s).\n"))
    }

    fn handle_export(&self, ctx: &CommandContext) -> Result<String> {
        let report = ctx.session.reminder_report();
        let json = serde_json::to_string_pretty(&report)?;
        let path = &ctx.config.report_export_path;

        std::fs::write(path, json)
            .with_context(|| format!("Failed to write reminder report to {path}"))?;
        info!("Exported {} reminder(s) to {path}", report.len());
        Ok(format!("Exported {} reminder(s) to {path}.\n", report.len()))
    }
}
