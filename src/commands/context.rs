//! Shared context for menu command handlers
//!
//! - **Version**: 1.2.0
//! - **Since**: 0.3.0
//!
//! ## Changelog
//! - 1.2.0: CSV import and export
//! - 1.1.0: Fixed reference date for reproducible runs
//! - 1.0.0: Initial implementation with core shared state

use anyhow::Result;
use chrono::{Local, NaiveDate};
use log::debug;

use crate::core::Config;
use crate::csv_files::CsvDirectory;
use crate::database::Database;
use crate::features::renewal::{RenewalNotifier, SimulatedNotifier};
use crate::session::Session;

/// Shared context for all command handlers
///
/// Contains what most handlers need:
/// - Config for window length, policy and paths
/// - Database for load/save
/// - Session holding the in-memory tables
/// - RenewalNotifier for renewal requests
pub struct CommandContext {
    pub config: Config,
    pub database: Database,
    pub session: Session,
    pub notifier: Box<dyn RenewalNotifier>,
    /// Set once "Read data" has run
    pub loaded: bool,
    reference_date: Option<NaiveDate>,
}

impl CommandContext {
    /// Create a context with an empty session and the simulated notifier
    pub fn new(config: Config, database: Database) -> Self {
        Self {
            config,
            database,
            session: Session::default(),
            notifier: Box::new(SimulatedNotifier),
            loaded: false,
            reference_date: None,
        }
    }

    pub fn with_notifier(mut self, notifier: Box<dyn RenewalNotifier>) -> Self {
        self.notifier = notifier;
        self
    }

    /// Pin "today" to a fixed date instead of the local clock
    pub fn with_reference_date(mut self, date: NaiveDate) -> Self {
        self.reference_date = Some(date);
        self
    }

    /// The date used as "today" for evaluations and sent stamps
    pub fn today(&self) -> NaiveDate {
        self.reference_date
            .unwrap_or_else(|| Local::now().date_naive())
    }

    /// Replace the session with a fresh load from the database
    pub fn load(&mut self) -> Result<()> {
        let mut session = self.database.load_session()?;
        session.current_employee_id = self.session.current_employee_id;
        if let Some(id) = session.current_employee_id {
            if session.employee(id).is_none() {
                debug!("Selected employee {id} not in reloaded data; clearing selection");
                session.clear_selection();
            }
        }
        self.session = session;
        self.loaded = true;
        Ok(())
    }

    /// Replace the session with the contents of the CSV directory.
    ///
    /// The imported session counts as unsaved until written to the database.
    pub fn import_csv(&mut self) -> Result<()> {
        let mut session = CsvDirectory::new(&self.config.csv_dir).load_session()?;
        session.mark_changed();
        self.session = session;
        self.loaded = true;
        Ok(())
    }

    pub fn export_csv(&self) -> Result<()> {
        CsvDirectory::new(&self.config.csv_dir).save_session(&self.session)
    }

    /// Write the session back and clear the unsaved-changes flag
    pub fn save(&mut self) -> Result<()> {
        self.database.save_session(&self.session)?;
        self.session.mark_saved();
        Ok(())
    }
}
