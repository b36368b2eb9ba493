//! Held-certification table
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.1.0: remove() drops every duplicate of the pair
//! - 1.0.0: Initial release

use log::{debug, info};
use serde::Serialize;
use std::collections::HashMap;

use crate::core::models::{Certification, HeldCertification};

/// A held certification joined with its certification details
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmployeeCertificationRow {
    pub employee_id: i64,
    pub certification_id: i64,
    pub certification_name: Option<String>,
    pub description: Option<String>,
    pub obtained_date: String,
    pub expiry_date: String,
}

/// In-memory held-certification table.
///
/// Duplicate (employee, certification) pairs are accepted as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CertificationAssignmentStore {
    records: Vec<HeldCertification>,
}

impl CertificationAssignmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<HeldCertification>) -> Self {
        Self { records }
    }

    /// Append a held certification without any uniqueness check
    pub fn add(&mut self, employee_id: i64, certification_id: i64, obtained: &str, expiry: &str) {
        if self.records.iter().any(|r| r.matches(employee_id, certification_id)) {
            debug!(
                "Employee {employee_id} already holds certification {certification_id}; adding duplicate"
            );
        }
        self.records.push(HeldCertification::new(
            employee_id,
            certification_id,
            obtained.trim(),
            expiry.trim(),
        ));
        info!("Recorded certification {certification_id} for employee {employee_id}");
    }

    /// Remove every record of the pair. Returns whether anything was removed.
    pub fn remove(&mut self, employee_id: i64, certification_id: i64) -> bool {
        let before = self.records.len();
        self.records.retain(|r| !r.matches(employee_id, certification_id));
        let removed = before - self.records.len();

        if removed > 0 {
            info!(
                "Removed {removed} record(s) of certification {certification_id} for employee {employee_id}"
            );
        }
        removed > 0
    }

    /// Held certifications of one employee, left-joined with certification data
    pub fn certifications_for(
        &self,
        employee_id: i64,
        certifications: &[Certification],
    ) -> Vec<EmployeeCertificationRow> {
        let by_id: HashMap<i64, &Certification> = certifications
            .iter()
            .map(|c| (c.certification_id, c))
            .collect();

        self.records
            .iter()
            .filter(|r| r.employee_id == employee_id)
            .map(|r| {
                let cert = by_id.get(&r.certification_id);
                EmployeeCertificationRow {
                    employee_id: r.employee_id,
                    certification_id: r.certification_id,
                    certification_name: cert.map(|c| c.name.clone()),
                    description: cert.map(|c| c.description.clone()),
                    obtained_date: r.obtained_date.clone(),
                    expiry_date: r.expiry_date.clone(),
                }
            })
            .collect()
    }

    pub fn holds(&self, employee_id: i64, certification_id: i64) -> bool {
        self.records.iter().any(|r| r.matches(employee_id, certification_id))
    }

    pub fn all(&self) -> &[HeldCertification] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
