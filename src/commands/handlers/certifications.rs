//! Certification command handlers
//!
//! Handles: employee_certs, held, needs, record_cert, remove_cert
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.3.0
//!
//! ## Changelog
//! - 1.1.0: Add remove_cert and outstanding needs in employee_certs
//! - 1.0.0: Initial release

use anyhow::Result;
use log::debug;

use crate::commands::context::CommandContext;
use crate::commands::handler::MenuCommandHandler;
use crate::commands::prompt::{Prompter, MAX_ID, MIN_ID};
use crate::core::dates::parse_date;
use crate::core::response::{blank_or, render_table};

/// Handler for viewing and editing held certifications
pub struct CertificationHandler;

impl MenuCommandHandler for CertificationHandler {
    fn command_names(&self) -> &'static [&'static str] {
        &["employee_certs", "held", "needs", "record_cert", "remove_cert"]
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
            "employee_certs" => self.handle_employee_certs(ctx, prompter),
            "held" => Ok(self.handle_held(ctx)),
            "needs" => Ok(self.handle_needs(ctx)),
            "record_cert" => self.handle_record(ctx, prompter),
            "remove_cert" => self.handle_remove(ctx, prompter),
            _ => Ok(String::new()),
        }
    }
}

impl CertificationHandler {
    /// Certifications of the current employee, or of one asked for
    fn handle_employee_certs(
        &self,
        ctx: &mut CommandContext,
        prompter: &mut dyn Prompter,
    ) -> Result<String> {
        let employee_id = match ctx.session.current_employee_id {
            Some(id) => id,
            None => prompter.integer("Enter employee ID: ", MIN_ID, MAX_ID)?,
        };

        let Some(employee) = ctx.session.employee(employee_id) else {
            return Ok("No employee found with that ID.\n".to_string());
        };

        let mut out = format!(
            "Certifications for {} (ID {employee_id}):\n",
            employee.full_name()
        );

        let rows = ctx.session.certifications_for(employee_id);
        if rows.is_empty() {
            out.push_str("  - No certifications on record.\n");
        } else {
            for row in &rows {
                let name = row
                    .certification_name
                    .clone()
                    .unwrap_or_else(|| format!("Certification #{}", row.certification_id));
                out.push_str(&format!(
                    "  - {name} (obtained {}, expires {})\n",
                    row.obtained_date, row.expiry_date
                ));
            }
        }

        let outstanding = ctx.session.outstanding_needs(employee_id);
        if !outstanding.is_empty() {
            out.push_str("Still needed:\n");
            for need in &outstanding {
                let name = need
                    .certification_name
                    .clone()
                    .unwrap_or_else(|| format!("Certification #{}", need.certification_id));
                out.push_str(&format!("  - {name}\n"));
            }
        }

        Ok(out)
    }

    fn handle_held(&self, ctx: &CommandContext) -> String {
        let rows: Vec<Vec<String>> = ctx
            .session
            .employee_certifications()
            .into_iter()
            .map(|r| {
                vec![
                    r.employee_id.to_string(),
                    blank_or(r.employee_name),
                    r.certification_id.to_string(),
                    blank_or(r.certification_name),
                    r.obtained_date,
                    r.expiry_date,
                ]
            })
            .collect();

        format!(
            "All employee-certification records:\n{}",
            render_table(
                &["Employee ID", "Employee", "Cert ID", "Certification", "Obtained", "Expires"],
                &rows,
            )
        )
    }

    fn handle_needs(&self, ctx: &CommandContext) -> String {
        let rows: Vec<Vec<String>> = ctx
            .session
            .employee_needs()
            .into_iter()
            .map(|r| {
                vec![
                    r.employee_id.to_string(),
                    blank_or(r.employee_name),
                    r.certification_id.to_string(),
                    blank_or(r.certification_name),
                    blank_or(r.is_required.map(|req| if req { "yes" } else { "no" })),
                ]
            })
            .collect();

        format!(
            "Employee certification needs:\n{}",
            render_table(
                &["Employee ID", "Employee", "Cert ID", "Certification", "Required"],
                &rows,
            )
        )
    }

    fn handle_record(&self, ctx: &mut CommandContext, prompter: &mut dyn Prompter) -> Result<String> {
        let employee_id = prompter.integer("Enter employee ID: ", MIN_ID, MAX_ID)?;
        let certification_id = prompter.integer("Enter certification ID: ", MIN_ID, MAX_ID)?;
        let obtained = prompter.text("Enter obtained date (YYYY-MM-DD): ")?;
        let expiry = prompter.text("Enter expiry date (YYYY-MM-DD): ")?;

        let mut out = String::new();
        if ctx.session.employee(employee_id).is_none() {
            out.push_str(&format!("Note: no employee with ID {employee_id} on file.\n"));
        }
        if ctx.session.certification(certification_id).is_none() {
            out.push_str(&format!(
                "Note: no certification with ID {certification_id} on file.\n"
            ));
        }
        if parse_date(&expiry).is_none() {
            debug!("Recording unparseable expiry '{expiry}'");
            out.push_str("Note: expiry date not recognized; it will never trigger a reminder.\n");
        }

        ctx.session
            .add_assignment(employee_id, certification_id, &obtained, &expiry);
        out.push_str("Certification recorded for employee.\n");
        Ok(out)
    }

    fn handle_remove(&self, ctx: &mut CommandContext, prompter: &mut dyn Prompter) -> Result<String> {
        let employee_id = prompter.integer("Enter employee ID: ", MIN_ID, MAX_ID)?;
        let certification_id = prompter.integer("Enter certification ID: ", MIN_ID, MAX_ID)?;

        if !ctx.session.assignments.holds(employee_id, certification_id) {
            return Ok("No such certification record.\n".to_string());
        }
        if !prompter.confirm(&format!(
            "Remove certification {certification_id} from {}? (y/N)",
            super::employee_label(ctx, employee_id)
        ))? {
            return Ok("Removal cancelled.\n".to_string());
        }

        ctx.session.remove_assignment(employee_id, certification_id);
        Ok("Certification record removed.\n".to_string())
    }
}
