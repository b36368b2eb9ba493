//! # SQLite Storage
//!
//! Loads the five session tables from a SQLite file and writes them back.
//! Loading is forgiving: missing tables come back empty and missing optional
//! columns are filled with defaults. Saving replaces every table inside one
//! transaction, so a failed save leaves the file as it was.
//!
//! - **Version**: 1.2.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.2.0: Backfill a missing reminders.sent_date column as unsent
//! - 1.1.0: Save inside a single transaction
//! - 1.0.0: Initial release

use anyhow::{Context, Result};
use log::{debug, info, warn};
use sqlite::{Connection, State, Statement};
use std::collections::HashSet;

use crate::core::dates::{format_date, parse_date};
use crate::core::models::{
    Certification, Employee, HeldCertification, NeededCertification, Reminder,
};
use crate::features::reminders::ReminderLedger;
use crate::session::Session;

/// Table definitions written on save
const SCHEMA: &str = "
    CREATE TABLE employees (
        employee_id INTEGER NOT NULL,
        first_name TEXT,
        last_name TEXT,
        email TEXT,
        hire_date TEXT,
        employment_status TEXT
    );
    CREATE TABLE certifications (
        certification_id INTEGER NOT NULL,
        name TEXT,
        description TEXT,
        validity_period_months INTEGER,
        is_required INTEGER
    );
    CREATE TABLE held_certifications (
        employee_id INTEGER NOT NULL,
        certification_id INTEGER NOT NULL,
        obtained_date TEXT,
        expiry_date TEXT
    );
    CREATE TABLE needed_certifications (
        employee_id INTEGER NOT NULL,
        certification_id INTEGER NOT NULL
    );
    CREATE TABLE reminders (
        employee_id INTEGER NOT NULL,
        certification_id INTEGER NOT NULL,
        reminder_date TEXT NOT NULL,
        sent_date TEXT
    );
";

const TABLES: &[&str] = &[
    "employees",
    "certifications",
    "held_certifications",
    "needed_certifications",
    "reminders",
];

pub struct Database {
    connection: Connection,
    path: String,
}

impl Database {
    /// Open (or create) the database file at `path`; `:memory:` works too
    pub fn new(path: &str) -> Result<Self> {
        let connection = sqlite::open(path)
            .with_context(|| format!("Failed to open database at {path}"))?;
        debug!("Opened database {path}");
        Ok(Self {
            connection,
            path: path.to_string(),
        })
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Column names of `table`, or `None` when the table does not exist
    fn table_columns(&self, table: &str) -> Result<Option<HashSet<String>>> {
        let mut statement = self
            .connection
            .prepare(format!("PRAGMA table_info({table})"))?;

        let mut columns = HashSet::new();
        while let State::Row = statement.next()? {
            columns.insert(statement.read::<String, _>("name")?);
        }

        Ok(if columns.is_empty() { None } else { Some(columns) })
    }

    /// Select `wanted` columns from `table`, substituting NULL for absent ones
    fn select_all(&self, table: &str, wanted: &[&str]) -> Result<Option<Statement<'_>>> {
        let Some(present) = self.table_columns(table)? else {
            warn!("Table {table} not found; starting with an empty table");
            return Ok(None);
        };

        let projection: Vec<String> = wanted
            .iter()
            .map(|column| {
                if present.contains(*column) {
                    column.to_string()
                } else {
                    debug!("Column {table}.{column} missing; using NULL");
                    format!("NULL AS {column}")
                }
            })
            .collect();

        let sql = format!("SELECT {} FROM {table} ORDER BY rowid", projection.join(", "));
        Ok(Some(self.connection.prepare(sql)?))
    }

    fn load_employees(&self) -> Result<Vec<Employee>> {
        let Some(mut statement) = self.select_all(
            "employees",
            &[
                "employee_id",
                "first_name",
                "last_name",
                "email",
                "hire_date",
                "employment_status",
            ],
        )?
        else {
            return Ok(Vec::new());
        };

        let mut rows = Vec::new();
        while let State::Row = statement.next()? {
            let Some(employee_id) = statement.read::<Option<i64>, _>("employee_id")? else {
                warn!("Skipping employee row without an id");
                continue;
            };
            rows.push(Employee {
                employee_id,
                first_name: read_text(&statement, "first_name")?.unwrap_or_default(),
                last_name: read_text(&statement, "last_name")?.unwrap_or_default(),
                email: read_text(&statement, "email")?,
                hire_date: read_text(&statement, "hire_date")?,
                employment_status: read_text(&statement, "employment_status")?,
            });
        }
        Ok(rows)
    }

    fn load_certifications(&self) -> Result<Vec<Certification>> {
        let Some(mut statement) = self.select_all(
            "certifications",
            &[
                "certification_id",
                "name",
                "description",
                "validity_period_months",
                "is_required",
            ],
        )?
        else {
            return Ok(Vec::new());
        };

        let mut rows = Vec::new();
        while let State::Row = statement.next()? {
            let Some(certification_id) = statement.read::<Option<i64>, _>("certification_id")?
            else {
                warn!("Skipping certification row without an id");
                continue;
            };
            rows.push(Certification {
                certification_id,
                name: read_text(&statement, "name")?.unwrap_or_default(),
                description: read_text(&statement, "description")?.unwrap_or_default(),
                validity_period_months: statement
                    .read::<Option<i64>, _>("validity_period_months")?,
                is_required: statement
                    .read::<Option<i64>, _>("is_required")?
                    .unwrap_or(0)
                    != 0,
            });
        }
        Ok(rows)
    }

    fn load_held(&self) -> Result<Vec<HeldCertification>> {
        let Some(mut statement) = self.select_all(
            "held_certifications",
            &["employee_id", "certification_id", "obtained_date", "expiry_date"],
        )?
        else {
            return Ok(Vec::new());
        };

        let mut rows = Vec::new();
        while let State::Row = statement.next()? {
            let Some((employee_id, certification_id)) = read_pair(&statement)? else {
                warn!("Skipping held certification row without ids");
                continue;
            };
            rows.push(HeldCertification {
                employee_id,
                certification_id,
                obtained_date: read_text(&statement, "obtained_date")?.unwrap_or_default(),
                expiry_date: read_text(&statement, "expiry_date")?.unwrap_or_default(),
            });
        }
        Ok(rows)
    }

    fn load_needs(&self) -> Result<Vec<NeededCertification>> {
        let Some(mut statement) =
            self.select_all("needed_certifications", &["employee_id", "certification_id"])?
        else {
            return Ok(Vec::new());
        };

        let mut rows = Vec::new();
        while let State::Row = statement.next()? {
            if let Some((employee_id, certification_id)) = read_pair(&statement)? {
                rows.push(NeededCertification {
                    employee_id,
                    certification_id,
                });
            }
        }
        Ok(rows)
    }

    fn load_reminders(&self) -> Result<Vec<Reminder>> {
        let Some(mut statement) = self.select_all(
            "reminders",
            &["employee_id", "certification_id", "reminder_date", "sent_date"],
        )?
        else {
            return Ok(Vec::new());
        };

        let mut rows = Vec::new();
        let mut row_number = 0;
        while let State::Row = statement.next()? {
            row_number += 1;
            let Some((employee_id, certification_id)) = read_pair(&statement)? else {
                warn!("Skipping reminder row {row_number} without ids");
                continue;
            };

            let raw_reminder = read_text(&statement, "reminder_date")?.unwrap_or_default();
            let reminder_date = parse_date(&raw_reminder).with_context(|| {
                format!("Invalid reminder_date '{raw_reminder}' in reminders row {row_number}")
            })?;

            let sent_date = match read_text(&statement, "sent_date")? {
                Some(raw) if !raw.trim().is_empty() => Some(parse_date(&raw).with_context(
                    || format!("Invalid sent_date '{raw}' in reminders row {row_number}"),
                )?),
                _ => None,
            };

            rows.push(Reminder {
                employee_id,
                certification_id,
                reminder_date,
                sent_date,
            });
        }
        Ok(rows)
    }

    /// Load every table into a fresh session
    pub fn load_session(&self) -> Result<Session> {
        let employees = self.load_employees().context("Failed to load employees")?;
        let certifications = self
            .load_certifications()
            .context("Failed to load certifications")?;
        let held = self
            .load_held()
            .context("Failed to load held certifications")?;
        let needs = self
            .load_needs()
            .context("Failed to load needed certifications")?;
        let reminders = self.load_reminders().context("Failed to load reminders")?;

        info!(
            "Loaded {} employees, {} certifications, {} held, {} needed, {} reminders from {}",
            employees.len(),
            certifications.len(),
            held.len(),
            needs.len(),
            reminders.len(),
            self.path
        );

        Ok(Session::new(
            employees,
            certifications,
            held,
            needs,
            ReminderLedger::from_reminders(reminders),
        ))
    }

    /// Replace all stored tables with the session's contents.
    ///
    /// Runs in one transaction; on failure, including a failed commit,
    /// the transaction is rolled back and nothing is written.
    pub fn save_session(&self, session: &Session) -> Result<()> {
        self.connection.execute("BEGIN IMMEDIATE")?;

        let outcome = self
            .write_tables(session)
            .and_then(|()| Ok(self.connection.execute("COMMIT")?));

        match outcome {
            Ok(()) => {
                info!("Saved session to {}", self.path);
                Ok(())
            }
            Err(e) => {
                if let Err(rollback) = self.connection.execute("ROLLBACK") {
                    warn!("Rollback after failed save also failed: {rollback}");
                }
                Err(e.context(format!("Failed to save session to {}", self.path)))
            }
        }
    }

    fn write_tables(&self, session: &Session) -> Result<()> {
        for table in TABLES {
            self.connection
                .execute(format!("DROP TABLE IF EXISTS {table}"))?;
        }
        self.connection.execute(SCHEMA)?;

        let mut statement = self.connection.prepare(
            "INSERT INTO employees (employee_id, first_name, last_name, email, hire_date, employment_status)
             VALUES (?, ?, ?, ?, ?, ?)",
        )?;
        for e in &session.employees {
            statement.reset()?;
            statement.bind((1, e.employee_id))?;
            statement.bind((2, e.first_name.as_str()))?;
            statement.bind((3, e.last_name.as_str()))?;
            statement.bind((4, e.email.as_deref()))?;
            statement.bind((5, e.hire_date.as_deref()))?;
            statement.bind((6, e.employment_status.as_deref()))?;
            run(&mut statement)?;
        }

        let mut statement = self.connection.prepare(
            "INSERT INTO certifications (certification_id, name, description, validity_period_months, is_required)
             VALUES (?, ?, ?, ?, ?)",
        )?;
        for c in &session.certifications {
            statement.reset()?;
            statement.bind((1, c.certification_id))?;
            statement.bind((2, c.name.as_str()))?;
            statement.bind((3, c.description.as_str()))?;
            statement.bind((4, c.validity_period_months))?;
            statement.bind((5, i64::from(c.is_required)))?;
            run(&mut statement)?;
        }

        let mut statement = self.connection.prepare(
            "INSERT INTO held_certifications (employee_id, certification_id, obtained_date, expiry_date)
             VALUES (?, ?, ?, ?)",
        )?;
        for h in session.assignments.all() {
            statement.reset()?;
            statement.bind((1, h.employee_id))?;
            statement.bind((2, h.certification_id))?;
            statement.bind((3, h.obtained_date.as_str()))?;
            statement.bind((4, h.expiry_date.as_str()))?;
            run(&mut statement)?;
        }

        let mut statement = self.connection.prepare(
            "INSERT INTO needed_certifications (employee_id, certification_id) VALUES (?, ?)",
        )?;
        for n in &session.needs {
            statement.reset()?;
            statement.bind((1, n.employee_id))?;
            statement.bind((2, n.certification_id))?;
            run(&mut statement)?;
        }

        let mut statement = self.connection.prepare(
            "INSERT INTO reminders (employee_id, certification_id, reminder_date, sent_date)
             VALUES (?, ?, ?, ?)",
        )?;
        for r in session.ledger.all() {
            statement.reset()?;
            statement.bind((1, r.employee_id))?;
            statement.bind((2, r.certification_id))?;
            statement.bind((3, format_date(r.reminder_date).as_str()))?;
            statement.bind((4, r.sent_date.map(format_date).as_deref()))?;
            run(&mut statement)?;
        }

        Ok(())
    }
}

/// Step an INSERT to completion
fn run(statement: &mut Statement<'_>) -> Result<()> {
    while statement.next()? != State::Done {}
    Ok(())
}

/// Read a text column, treating NULL and integers stored in text columns alike
fn read_text(statement: &Statement<'_>, column: &str) -> Result<Option<String>> {
    Ok(statement.read::<Option<String>, _>(column)?)
}

fn read_pair(statement: &Statement<'_>) -> Result<Option<(i64, i64)>> {
    let employee_id = statement.read::<Option<i64>, _>("employee_id")?;
    let certification_id = statement.read::<Option<i64>, _>("certification_id")?;
    Ok(employee_id.zip(certification_id))
}
