//! Employee selection handler
//!
//! Handles: select_employee
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.4.0

use anyhow::Result;

use crate::commands::context::CommandContext;
use crate::commands::handler::MenuCommandHandler;
use crate::commands::prompt::{Prompter, MAX_ID, MIN_ID};

/// Handler for choosing the employee that scoped commands act on
pub struct EmployeeHandler;

impl MenuCommandHandler for EmployeeHandler {
    fn command_names(&self) -> &'static [&'static str] {
        &["select_employee"]
    }

    fn handle(
        &self,
        _name: &str,
        ctx: &mut CommandContext,
        prompter: &mut dyn Prompter,
    ) -> Result<String> {
        if let Some(msg) = super::require_loaded(ctx) {
            return Ok(msg);
        }

        let choice = prompter.optional_integer(
            "Enter employee ID (blank for all employees): ",
            MIN_ID,
            MAX_ID,
        )?;

        let Some(id) = choice else {
            ctx.session.clear_selection();
            return Ok("Selection cleared; reminders will cover all employees.\n".to_string());
        };

        if !ctx.session.select_employee(id) {
            return Ok("No employee found with that ID.\n".to_string());
        }
        Ok(format!("Current employee: {}\n", super::employee_label(ctx, id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::handlers::test_support::{loaded_context, seeded_context, ymd};
    use crate::commands::prompt::ScriptedPrompter;

    #[test]
    fn test_select_known_employee() {
        let mut ctx = loaded_context(ymd(2024, 6, 1));
        let out = EmployeeHandler
            .handle("select_employee", &mut ctx, &mut ScriptedPrompter::new(&["7"]))
            .unwrap();

        assert_eq!(ctx.session.current_employee_id, Some(7));
        assert!(out.contains("Ada Lovelace (ID 7)"));
    }

    #[test]
    fn test_select_unknown_employee_keeps_selection() {
        let mut ctx = loaded_context(ymd(2024, 6, 1));
        ctx.session.select_employee(8);

        let out = EmployeeHandler
            .handle("select_employee", &mut ctx, &mut ScriptedPrompter::new(&["555"]))
            .unwrap();
        assert!(out.contains("No employee found"));
        assert_eq!(ctx.session.current_employee_id, Some(8));
    }

    #[test]
    fn test_blank_clears_selection() {
        let mut ctx = loaded_context(ymd(2024, 6, 1));
        ctx.session.select_employee(8);

        EmployeeHandler
            .handle("select_employee", &mut ctx, &mut ScriptedPrompter::new(&[""]))
            .unwrap();
        assert_eq!(ctx.session.current_employee_id, None);
    }

    #[test]
    fn test_requires_load() {
        let mut ctx = seeded_context(ymd(2024, 6, 1));
        let mut prompter = ScriptedPrompter::new(&["7"]);
        let out = EmployeeHandler
            .handle("select_employee", &mut ctx, &mut prompter)
            .unwrap();

        assert!(out.contains("Please load data first"));
        assert_eq!(prompter.remaining(), 1);
    }
}
