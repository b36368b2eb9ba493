//! Data command handlers
//!
//! Handles: load, save, import_csv, export_csv
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.3.0
//!
//! ## Changelog
//! - 1.1.0: Add import_csv and export_csv
//! - 1.0.0: Initial release

use anyhow::Result;
use log::info;

use crate::commands::context::CommandContext;
use crate::commands::handler::MenuCommandHandler;
use crate::commands::prompt::Prompter;

/// Handler for reading and saving the backing store
pub struct DataHandler;

impl MenuCommandHandler for DataHandler {
    fn command_names(&self) -> &'static [&'static str] {
        &["load", "save", "import_csv", "export_csv"]
    }

    fn handle(
        &self,
        name: &str,
        ctx: &mut CommandContext,
        prompter: &mut dyn Prompter,
    ) -> Result<String> {
        match name {
            "load" => self.handle_load(ctx, prompter),
            "save" => self.handle_save(ctx),
            "import_csv" => self.handle_import(ctx, prompter),
            "export_csv" => self.handle_export(ctx),
            _ => Ok(String::new()),
        }
    }
}

impl DataHandler {
    /// Read every table, asking first when unsaved changes would be lost
    fn handle_load(&self, ctx: &mut CommandContext, prompter: &mut dyn Prompter) -> Result<String> {
        if ctx.loaded
            && ctx.session.is_dirty()
            && !prompter.confirm("Discard unsaved changes and reload? (y/N)")?
        {
            return Ok("Reload cancelled.\n".to_string());
        }

        ctx.load()?;
        let session = &ctx.session;
        Ok(format!(
            "Data loaded successfully: {} employees, {} certifications, {} held, {} needed, {} reminders.\n",
            session.employees.len(),
            session.certifications.len(),
            session.assignments.len(),
            session.needs.len(),
            session.ledger.len()
        ))
    }

    fn handle_import(&self, ctx: &mut CommandContext, prompter: &mut dyn Prompter) -> Result<String> {
        if ctx.loaded
            && ctx.session.is_dirty()
            && !prompter.confirm("Discard unsaved changes and import CSV files? (y/N)")?
        {
            return Ok("Import cancelled.\n".to_string());
        }

        ctx.import_csv()?;
        Ok(format!(
            "Imported {} employees and {} held certifications from {}. Save to store them.\n",
            ctx.session.employees.len(),
            ctx.session.assignments.len(),
            ctx.config.csv_dir
        ))
    }

    fn handle_export(&self, ctx: &CommandContext) -> Result<String> {
        if let Some(msg) = super::require_loaded(ctx) {
            return Ok(msg);
        }
        ctx.export_csv()?;
        info!("Exported CSV files to {}", ctx.config.csv_dir);
        Ok(format!("CSV files written to {}.\n", ctx.config.csv_dir))
    }

    fn handle_save(&self, ctx: &mut CommandContext) -> Result<String> {
        if !ctx.loaded {
            // Saving an unloaded session would wipe the store
            return Ok(super::LOAD_FIRST.to_string());
        }
        ctx.save()?;
        info!("Saved changes to {}", ctx.database.path());
        Ok(format!("Changes saved to {}.\n", ctx.database.path()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::handlers::test_support::{loaded_context, seeded_context, ymd};
    use crate::commands::prompt::ScriptedPrompter;
    use crate::database::Database;

    #[test]
    fn test_data_handler_commands() {
        let names = DataHandler.command_names();
        assert!(names.contains(&"load"));
        assert!(names.contains(&"save"));
        assert!(names.contains(&"import_csv"));
        assert_eq!(names.len(), 4);
    }

    #[test]
    fn test_load_reports_counts() {
        let mut ctx = seeded_context(ymd(2024, 6, 1));
        let out = DataHandler
            .handle("load", &mut ctx, &mut ScriptedPrompter::new(&[]))
            .unwrap();

        assert!(ctx.loaded);
        assert!(out.contains("2 employees"));
        assert!(out.contains("3 held"));
        assert!(out.contains("0 reminders"));
    }

    #[test]
    fn test_save_before_load_is_refused() {
        let mut ctx = seeded_context(ymd(2024, 6, 1));
        let out = DataHandler
            .handle("save", &mut ctx, &mut ScriptedPrompter::new(&[]))
            .unwrap();
        assert!(out.contains("Please load data first"));

        // Stored data untouched
        ctx.load().unwrap();
        assert_eq!(ctx.session.employees.len(), 2);
    }

    #[test]
    fn test_save_persists_and_clears_dirty() {
        let mut ctx = loaded_context(ymd(2024, 6, 1));
        ctx.session.add_assignment(7, 4, "2024-01-01", "2026-01-01");

        DataHandler
            .handle("save", &mut ctx, &mut ScriptedPrompter::new(&[]))
            .unwrap();
        assert!(!ctx.session.is_dirty());
        assert_eq!(ctx.database.load_session().unwrap().assignments.len(), 4);
    }

    #[test]
    fn test_reload_with_unsaved_changes_declined() {
        let mut ctx = loaded_context(ymd(2024, 6, 1));
        ctx.session.add_assignment(7, 4, "2024-01-01", "2026-01-01");

        let out = DataHandler
            .handle("load", &mut ctx, &mut ScriptedPrompter::new(&["n"]))
            .unwrap();
        assert!(out.contains("cancelled"));
        assert_eq!(ctx.session.assignments.len(), 4);
    }

    #[test]
    fn test_reload_with_unsaved_changes_confirmed() {
        let mut ctx = loaded_context(ymd(2024, 6, 1));
        ctx.session.add_assignment(7, 4, "2024-01-01", "2026-01-01");

        DataHandler
            .handle("load", &mut ctx, &mut ScriptedPrompter::new(&["y"]))
            .unwrap();
        assert_eq!(ctx.session.assignments.len(), 3);
        assert!(!ctx.session.is_dirty());
    }

    fn csv_scratch(ctx: &mut CommandContext, name: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!("certrack-{name}-{}", std::process::id()));
        std::fs::remove_dir_all(&dir).ok();
        ctx.config.csv_dir = dir.to_string_lossy().to_string();
        dir
    }

    #[test]
    fn test_export_csv_requires_load() {
        let mut ctx = seeded_context(ymd(2024, 6, 1));
        let dir = csv_scratch(&mut ctx, "csv-unloaded");
        let out = DataHandler
            .handle("export_csv", &mut ctx, &mut ScriptedPrompter::new(&[]))
            .unwrap();
        assert!(out.contains("Please load data first"));
        assert!(!dir.exists());
    }

    #[test]
    fn test_export_then_import_csv_into_fresh_store() {
        let mut ctx = loaded_context(ymd(2024, 6, 1));
        let dir = csv_scratch(&mut ctx, "csv-transfer");
        DataHandler
            .handle("export_csv", &mut ctx, &mut ScriptedPrompter::new(&[]))
            .unwrap();

        let mut fresh = CommandContext::new(ctx.config.clone(), Database::new(":memory:").unwrap());
        let out = DataHandler
            .handle("import_csv", &mut fresh, &mut ScriptedPrompter::new(&[]))
            .unwrap();

        assert!(out.contains("Imported 2 employees and 3 held certifications"));
        assert!(fresh.loaded);
        assert!(fresh.session.is_dirty());
        assert_eq!(fresh.session.assignments.all(), ctx.session.assignments.all());

        DataHandler
            .handle("save", &mut fresh, &mut ScriptedPrompter::new(&[]))
            .unwrap();
        assert_eq!(fresh.database.load_session().unwrap().employees.len(), 2);
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_import_csv_over_unsaved_changes_declined() {
        let mut ctx = loaded_context(ymd(2024, 6, 1));
        let dir = csv_scratch(&mut ctx, "csv-declined");
        ctx.session.add_assignment(7, 4, "2024-01-01", "2026-01-01");

        let out = DataHandler
            .handle("import_csv", &mut ctx, &mut ScriptedPrompter::new(&["n"]))
            .unwrap();
        assert!(out.contains("Import cancelled"));
        assert_eq!(ctx.session.assignments.len(), 4);
        std::fs::remove_dir_all(&dir).ok();
    }
}
