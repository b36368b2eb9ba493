//! Read-only joins across the session tables
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.2.0
//!
//! ## Changelog
//! - 1.1.0: Add outstanding_needs
//! - 1.0.0: Initial release

use serde::Serialize;
use std::collections::HashMap;

use crate::core::models::{Certification, Employee, HeldCertification, NeededCertification};
use crate::features::reminders::{ReminderLedger, ReminderReportRow};

/// A held certification with employee and certification details
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeldReportRow {
    pub employee_id: i64,
    pub employee_name: Option<String>,
    pub certification_id: i64,
    pub certification_name: Option<String>,
    pub obtained_date: String,
    pub expiry_date: String,
}

/// A needed certification with employee and certification details
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NeedReportRow {
    pub employee_id: i64,
    pub employee_name: Option<String>,
    pub certification_id: i64,
    pub certification_name: Option<String>,
    pub is_required: Option<bool>,
}

fn employee_index(employees: &[Employee]) -> HashMap<i64, &Employee> {
    employees.iter().map(|e| (e.employee_id, e)).collect()
}

fn certification_index(certifications: &[Certification]) -> HashMap<i64, &Certification> {
    certifications
        .iter()
        .map(|c| (c.certification_id, c))
        .collect()
}

/// Every held certification, joined; rows whose employee or certification
/// is unknown keep blank names
pub fn employee_certifications(
    held: &[HeldCertification],
    employees: &[Employee],
    certifications: &[Certification],
) -> Vec<HeldReportRow> {
    let employees = employee_index(employees);
    let certifications = certification_index(certifications);

    held.iter()
        .map(|h| HeldReportRow {
            employee_id: h.employee_id,
            employee_name: employees.get(&h.employee_id).map(|e| e.full_name()),
            certification_id: h.certification_id,
            certification_name: certifications.get(&h.certification_id).map(|c| c.name.clone()),
            obtained_date: h.obtained_date.clone(),
            expiry_date: h.expiry_date.clone(),
        })
        .collect()
}

/// Every needed certification, joined
pub fn employee_needs(
    needs: &[NeededCertification],
    employees: &[Employee],
    certifications: &[Certification],
) -> Vec<NeedReportRow> {
    let employees = employee_index(employees);
    let certifications = certification_index(certifications);

    needs
        .iter()
        .map(|n| {
            let cert = certifications.get(&n.certification_id);
            NeedReportRow {
                employee_id: n.employee_id,
                employee_name: employees.get(&n.employee_id).map(|e| e.full_name()),
                certification_id: n.certification_id,
                certification_name: cert.map(|c| c.name.clone()),
                is_required: cert.map(|c| c.is_required),
            }
        })
        .collect()
}

/// Needed certifications of one employee that no held record covers
pub fn outstanding_needs(
    employee_id: i64,
    needs: &[NeededCertification],
    held: &[HeldCertification],
    employees: &[Employee],
    certifications: &[Certification],
) -> Vec<NeedReportRow> {
    let pending: Vec<NeededCertification> = needs
        .iter()
        .filter(|n| n.employee_id == employee_id)
        .filter(|n| !held.iter().any(|h| h.matches(n.employee_id, n.certification_id)))
        .copied()
        .collect();

    employee_needs(&pending, employees, certifications)
}

/// Reminder log, delegated to the ledger's left join
pub fn reminder_log(
    ledger: &ReminderLedger,
    employees: &[Employee],
    certifications: &[Certification],
) -> Vec<ReminderReportRow> {
    ledger.report(employees, certifications)
}
