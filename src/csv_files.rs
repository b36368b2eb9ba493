//! # CSV Files
//!
//! Reads and writes the session as one CSV file per table in a directory:
//! `employees.csv`, `certifications.csv`, `has_certification.csv`,
//! `needs_certification.csv` and `reminders.csv`. A missing file is an empty
//! table. Boolean and numeric columns accept the spellings spreadsheet tools
//! produce (`True`, `1`, `12.0`).
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.3.0

use anyhow::{Context, Result};
use log::{debug, info, warn};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::core::dates::{format_date, parse_date};
use crate::core::models::{
    Certification, Employee, HeldCertification, NeededCertification, Reminder,
};
use crate::features::reminders::ReminderLedger;
use crate::session::Session;

pub const EMPLOYEES_FILE: &str = "employees.csv";
pub const CERTIFICATIONS_FILE: &str = "certifications.csv";
pub const HELD_FILE: &str = "has_certification.csv";
pub const NEEDS_FILE: &str = "needs_certification.csv";
pub const REMINDERS_FILE: &str = "reminders.csv";

#[derive(Debug, Serialize, Deserialize)]
struct CertificationRecord {
    certification_id: i64,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    validity_period_months: Option<String>,
    #[serde(default)]
    is_required: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct HeldRecord {
    employee_id: i64,
    certification_id: i64,
    #[serde(default)]
    obtained_date: Option<String>,
    #[serde(default)]
    expiry_date: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ReminderRecord {
    employee_id: i64,
    certification_id: i64,
    reminder_date: String,
    #[serde(default)]
    sent_date: Option<String>,
}

/// Directory holding one CSV file per table
#[derive(Debug, Clone)]
pub struct CsvDirectory {
    dir: PathBuf,
}

impl CsvDirectory {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Read every file into a fresh session
    pub fn load_session(&self) -> Result<Session> {
        let employees: Vec<Employee> = self.read_rows(EMPLOYEES_FILE)?;

        let certifications = self
            .read_rows::<CertificationRecord>(CERTIFICATIONS_FILE)?
            .into_iter()
            .map(|r| Certification {
                certification_id: r.certification_id,
                name: r.name.unwrap_or_default(),
                description: r.description.unwrap_or_default(),
                validity_period_months: r.validity_period_months.as_deref().and_then(parse_months),
                is_required: r.is_required.as_deref().map_or(false, parse_flag),
            })
            .collect();

        let held = self
            .read_rows::<HeldRecord>(HELD_FILE)?
            .into_iter()
            .map(|r| HeldCertification {
                employee_id: r.employee_id,
                certification_id: r.certification_id,
                obtained_date: r.obtained_date.unwrap_or_default(),
                expiry_date: r.expiry_date.unwrap_or_default(),
            })
            .collect::<Vec<_>>();

        let needs: Vec<NeededCertification> = self.read_rows(NEEDS_FILE)?;

        let reminders = self
            .read_rows::<ReminderRecord>(REMINDERS_FILE)?
            .into_iter()
            .enumerate()
            .map(|(i, r)| reminder_from_record(r, i + 1))
            .collect::<Result<Vec<_>>>()?;

        info!(
            "Imported {} employees, {} held and {} reminders from {}",
            employees.len(),
            held.len(),
            reminders.len(),
            self.dir.display()
        );

        Ok(Session::new(
            employees,
            certifications,
            held,
            needs,
            ReminderLedger::from_reminders(reminders),
        ))
    }

    /// Write every table, replacing existing files
    pub fn save_session(&self, session: &Session) -> Result<()> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create {}", self.dir.display()))?;

        self.write_rows(EMPLOYEES_FILE, session.employees.iter())?;
        self.write_rows(
            CERTIFICATIONS_FILE,
            session.certifications.iter().map(|c| CertificationRecord {
                certification_id: c.certification_id,
                name: Some(c.name.clone()),
                description: Some(c.description.clone()),
                validity_period_months: c.validity_period_months.map(|m| m.to_string()),
                is_required: Some(c.is_required.to_string()),
            }),
        )?;
        self.write_rows(
            HELD_FILE,
            session.assignments.all().iter().map(|h| HeldRecord {
                employee_id: h.employee_id,
                certification_id: h.certification_id,
                obtained_date: Some(h.obtained_date.clone()),
                expiry_date: Some(h.expiry_date.clone()),
            }),
        )?;
        self.write_rows(NEEDS_FILE, session.needs.iter())?;
        self.write_rows(
            REMINDERS_FILE,
            session.ledger.all().iter().map(|r| ReminderRecord {
                employee_id: r.employee_id,
                certification_id: r.certification_id,
                reminder_date: format_date(r.reminder_date),
                sent_date: r.sent_date.map(format_date),
            }),
        )?;

        info!("Exported session to {}", self.dir.display());
        Ok(())
    }

    fn read_rows<T: DeserializeOwned>(&self, file: &str) -> Result<Vec<T>> {
        let path = self.dir.join(file);
        if !path.exists() {
            warn!("{} not found; starting with an empty table", path.display());
            return Ok(Vec::new());
        }

        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(&path)
            .with_context(|| format!("Failed to open {}", path.display()))?;

        let rows = reader
            .deserialize()
            .collect::<std::result::Result<Vec<T>, _>>()
            .with_context(|| format!("Failed to read {}", path.display()))?;
        debug!("Read {} row(s) from {}", rows.len(), path.display());
        Ok(rows)
    }

    fn write_rows<T: Serialize>(&self, file: &str, rows: impl Iterator<Item = T>) -> Result<()> {
        let path = self.dir.join(file);
        let mut writer = csv::Writer::from_path(&path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        for row in rows {
            writer.serialize(row)?;
        }
        writer
            .flush()
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }
}

fn reminder_from_record(record: ReminderRecord, row_number: usize) -> Result<Reminder> {
    let reminder_date = parse_date(&record.reminder_date).with_context(|| {
        format!(
            "Invalid reminder_date '{}' in {REMINDERS_FILE} row {row_number}",
            record.reminder_date
        )
    })?;
    let sent_date = match record.sent_date {
        Some(raw) if !raw.is_empty() => Some(parse_date(&raw).with_context(|| {
            format!("Invalid sent_date '{raw}' in {REMINDERS_FILE} row {row_number}")
        })?),
        _ => None,
    };
    Ok(Reminder {
        employee_id: record.employee_id,
        certification_id: record.certification_id,
        reminder_date,
        sent_date,
    })
}

fn parse_flag(raw: &str) -> bool {
    matches!(raw.to_lowercase().as_str(), "true" | "1" | "yes" | "y")
}

fn parse_months(raw: &str) -> Option<i64> {
    raw.parse::<i64>()
        .ok()
        .or_else(|| raw.parse::<f64>().ok().filter(|m| m.is_finite()).map(|m| m as i64))
}
