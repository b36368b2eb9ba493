//! Per-command handler implementations
//!
//! - **Version**: 1.2.0
//! - **Since**: 0.3.0
//!
//! ## Changelog
//! - 1.2.0: Add export to ReminderHandler
//! - 1.1.0: Add EmployeeHandler for the current-employee selection
//! - 1.0.0: Initial extraction from the menu loop

pub mod certifications;
pub mod data;
pub mod employees;
pub mod reminders;

use std::rc::Rc;

use super::context::CommandContext;
use super::handler::MenuCommandHandler;

/// Shown by data-dependent commands before "Read data" has run
pub const LOAD_FIRST: &str = "Please load data first (option 1).\n";

/// Create all registered command handlers
pub fn create_all_handlers() -> Vec<Rc<dyn MenuCommandHandler>> {
    vec![
        Rc::new(data::DataHandler),
        Rc::new(employees::EmployeeHandler),
        Rc::new(certifications::CertificationHandler),
        Rc::new(reminders::ReminderHandler),
    ]
}

/// `Some(message)` when the session has not been loaded yet
pub(crate) fn require_loaded(ctx: &CommandContext) -> Option<String> {
    if ctx.loaded {
        None
    } else {
        Some(LOAD_FIRST.to_string())
    }
}

/// Display name for an employee id, falling back to the id
pub(crate) fn employee_label(ctx: &CommandContext, employee_id: i64) -> String {
    ctx.session
        .employee(employee_id)
        .map(|e| format!("{} (ID {employee_id})", e.full_name()))
        .unwrap_or_else(|| format!("ID {employee_id}"))
}
