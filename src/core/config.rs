//! # Configuration
//!
//! Runtime settings read from the environment (a `.env` file is loaded by the
//! binary through dotenvy before this runs).
//!
//! - **Version**: 1.2.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.2.0: Add CERTRACK_CSV_DIR, cap REMINDER_WINDOW_DAYS
//! - 1.1.0: Add EXPIRY_POLICY and REPORT_EXPORT_PATH
//! - 1.0.0: Initial release with database path, log level and window length

use anyhow::{Context, Result};

use crate::features::expiration::{ExpiryPolicy, DEFAULT_WINDOW_DAYS};

pub const DEFAULT_DATABASE_PATH: &str = "hrs_certifications.db";
pub const DEFAULT_LOG_LEVEL: &str = "warn";
pub const DEFAULT_REPORT_EXPORT_PATH: &str = "reminder_report.json";
pub const DEFAULT_CSV_DIR: &str = ".";

/// Longest accepted reminder window, about a century
pub const MAX_WINDOW_DAYS: i64 = 36_500;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub database_path: String,
    pub log_level: String,
    /// Days ahead of today that count as "expiring soon"
    pub reminder_window_days: i64,
    pub expiry_policy: ExpiryPolicy,
    pub report_export_path: String,
    /// Directory for CSV import and export
    pub csv_dir: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: DEFAULT_DATABASE_PATH.to_string(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            reminder_window_days: DEFAULT_WINDOW_DAYS,
            expiry_policy: ExpiryPolicy::default(),
            report_export_path: DEFAULT_REPORT_EXPORT_PATH.to_string(),
            csv_dir: DEFAULT_CSV_DIR.to_string(),
        }
    }
}

impl Config {
    /// Build configuration from process environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// Blank values fall back to defaults, same as unset ones.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let mut config = Config::default();

        if let Some(path) = get("CERTRACK_DATABASE_PATH") {
            config.database_path = path;
        }
        if let Some(level) = get("LOG_LEVEL") {
            config.log_level = level;
        }
        if let Some(days) = get("REMINDER_WINDOW_DAYS") {
            let days: i64 = days
                .parse()
                .with_context(|| format!("REMINDER_WINDOW_DAYS must be an integer, got '{days}'"))?;
            if !(0..=MAX_WINDOW_DAYS).contains(&days) {
                return Err(anyhow::anyhow!(
                    "REMINDER_WINDOW_DAYS must be between 0 and {MAX_WINDOW_DAYS}, got {days}"
                ));
            }
            config.reminder_window_days = days;
        }
        if let Some(policy) = get("EXPIRY_POLICY") {
            config.expiry_policy = policy.parse()?;
        }
        if let Some(path) = get("REPORT_EXPORT_PATH") {
            config.report_export_path = path;
        }
        if let Some(dir) = get("CERTRACK_CSV_DIR") {
            config.csv_dir = dir;
        }

        Ok(config)
    }
}
