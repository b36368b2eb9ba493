//! # Command System
//!
//! Numbered-menu command handling for the interactive tracker.
//!
//! - **Version**: 2.3.0
//! - **Since**: 0.2.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 2.3.0: Add CSV import and export
//! - 2.2.0: Add export to the menu
//! - 2.1.0: Add modular handler infrastructure (handler trait, context, registry)
//! - 1.0.0: Initial menu loop

pub mod context;
pub mod handler;
pub mod handlers;
pub mod prompt;
pub mod registry;

use anyhow::Result;
use log::warn;

// Re-export handler infrastructure
pub use context::CommandContext;
pub use handler::MenuCommandHandler;
pub use prompt::Prompter;
pub use registry::CommandRegistry;

#[cfg(feature = "cli")]
pub use prompt::DialoguerPrompter;

/// Menu entries in display order: (command name, label)
///
/// "exit" is handled by the menu loop itself.
pub const MENU: &[(&str, &str)] = &[
    ("load", "Read data"),
    ("select_employee", "Select current employee"),
    ("employee_certs", "Show certifications for an employee"),
    ("held", "List all employee certifications"),
    ("needs", "List employee certification needs"),
    ("expiring", "Check expiring certifications"),
    ("send", "Send renewal requests"),
    ("record_cert", "Record a new certification for an employee"),
    ("remove_cert", "Remove a certification from an employee"),
    ("reminder_log", "Show reminder log"),
    ("purge", "Purge sent reminders"),
    ("export", "Export reminder report (JSON)"),
    ("import_csv", "Import data from CSV files"),
    ("export_csv", "Export data to CSV files"),
    ("save", "Save changes"),
    ("exit", "Exit"),
];

/// Build a registry holding every menu handler
pub fn build_registry() -> CommandRegistry {
    let mut registry = CommandRegistry::new();
    for handler in handlers::create_all_handlers() {
        registry.register(handler);
    }
    registry
}

/// Run one menu command and return its output
pub fn dispatch(
    registry: &CommandRegistry,
    name: &str,
    ctx: &mut CommandContext,
    prompter: &mut dyn Prompter,
) -> Result<String> {
    match registry.get(name) {
        Some(handler) => handler.handle(name, ctx, prompter),
        None => {
            warn!("No handler registered for '{name}'");
            Ok("Invalid choice, try again.\n".to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::handlers::test_support::{seeded_context, ymd};
    use crate::commands::prompt::ScriptedPrompter;

    #[test]
    fn test_every_menu_entry_is_registered() {
        let registry = build_registry();
        for (name, _) in MENU.iter().filter(|(name, _)| *name != "exit") {
            assert!(registry.contains(name), "missing handler for {name}");
        }
        assert!(!registry.contains("exit"));
        assert_eq!(registry.len(), MENU.len() - 1);
    }

    #[test]
    fn test_dispatch_unknown_command() {
        let registry = build_registry();
        let mut ctx = seeded_context(ymd(2024, 6, 1));
        let out = dispatch(&registry, "launch", &mut ctx, &mut ScriptedPrompter::new(&[])).unwrap();
        assert!(out.contains("Invalid choice"));
    }

    #[test]
    fn test_full_reminder_cycle() {
        let registry = build_registry();
        let mut ctx = seeded_context(ymd(2024, 6, 1));
        let mut prompter = ScriptedPrompter::new(&[]);

        dispatch(&registry, "load", &mut ctx, &mut prompter).unwrap();
        dispatch(&registry, "expiring", &mut ctx, &mut prompter).unwrap();
        dispatch(&registry, "send", &mut ctx, &mut prompter).unwrap();
        dispatch(&registry, "save", &mut ctx, &mut prompter).unwrap();

        let stored = ctx.database.load_session().unwrap();
        assert_eq!(stored.ledger.len(), 2);
        assert!(stored.ledger.unsent().is_empty());
        assert_eq!(stored.ledger.all()[0].sent_date, Some(ymd(2024, 6, 1)));
    }
}
