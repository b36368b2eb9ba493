//! # Session
//!
//! The in-memory working set: five tables loaded from storage plus the
//! currently selected employee. Every operation the menu offers goes through
//! here, and the session remembers whether anything changed since the last
//! load or save.
//!
//! - **Version**: 1.2.0
//! - **Since**: 0.2.0
//!
//! ## Changelog
//! - 1.2.0: Dirty tracking for the unsaved-changes warning
//! - 1.1.0: send_unsent goes through a RenewalNotifier
//! - 1.0.0: Initial release replacing the module-level tables

use anyhow::Result;
use chrono::NaiveDate;
use log::{debug, info};
use std::collections::HashMap;

use crate::core::models::{Certification, Employee, HeldCertification, NeededCertification};
use crate::features::assignments::{CertificationAssignmentStore, EmployeeCertificationRow};
use crate::features::expiration::{find_expiring, ExpiringCertification, ExpiryPolicy};
use crate::features::reminders::{ReminderLedger, ReminderReportRow};
use crate::features::renewal::{RenewalNotice, RenewalNotifier};
use crate::features::reports::{self, HeldReportRow, NeedReportRow};

/// Result of evaluating and recording expiring certifications
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpirationOutcome {
    pub expiring: Vec<ExpiringCertification>,
    /// Reminders appended to the ledger
    pub recorded: usize,
}

#[derive(Debug, Clone, Default)]
pub struct Session {
    pub employees: Vec<Employee>,
    pub certifications: Vec<Certification>,
    pub assignments: CertificationAssignmentStore,
    pub needs: Vec<NeededCertification>,
    pub ledger: ReminderLedger,
    /// Employee scope for per-employee operations
    pub current_employee_id: Option<i64>,
    dirty: bool,
}

impl Session {
    pub fn new(
        employees: Vec<Employee>,
        certifications: Vec<Certification>,
        held: Vec<HeldCertification>,
        needs: Vec<NeededCertification>,
        ledger: ReminderLedger,
    ) -> Self {
        Self {
            employees,
            certifications,
            assignments: CertificationAssignmentStore::from_records(held),
            needs,
            ledger,
            current_employee_id: None,
            dirty: false,
        }
    }

    /// Whether there are changes not yet saved
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_saved(&mut self) {
        self.dirty = false;
    }

    /// Flag the whole session as unsaved, e.g. after an import
    pub fn mark_changed(&mut self) {
        self.dirty = true;
    }

    pub fn employee(&self, employee_id: i64) -> Option<&Employee> {
        self.employees.iter().find(|e| e.employee_id == employee_id)
    }

    pub fn certification(&self, certification_id: i64) -> Option<&Certification> {
        self.certifications
            .iter()
            .find(|c| c.certification_id == certification_id)
    }

    /// Make `employee_id` the current scope. Unknown ids leave the
    /// selection untouched and return false.
    pub fn select_employee(&mut self, employee_id: i64) -> bool {
        if self.employee(employee_id).is_none() {
            debug!("Employee {employee_id} not found; selection unchanged");
            return false;
        }
        self.current_employee_id = Some(employee_id);
        true
    }

    pub fn clear_selection(&mut self) {
        self.current_employee_id = None;
    }

    /// Find certifications expiring in the window and record a reminder for each
    pub fn evaluate_and_record_expiring(
        &mut self,
        scope: Option<i64>,
        reference: NaiveDate,
        window_days: i64,
        policy: ExpiryPolicy,
    ) -> ExpirationOutcome {
        let expiring = find_expiring(self.assignments.all(), scope, reference, window_days, policy);
        let recorded = self.ledger.record(&expiring, reference);
        if recorded > 0 {
            self.dirty = true;
        }
        ExpirationOutcome { expiring, recorded }
    }

    /// Renewal notices for every unsent reminder, in ledger order
    pub fn pending_notices(&self) -> Vec<RenewalNotice> {
        let employees: HashMap<i64, &Employee> =
            self.employees.iter().map(|e| (e.employee_id, e)).collect();

        self.ledger
            .unsent()
            .into_iter()
            .map(|reminder| {
                let employee = employees.get(&reminder.employee_id);
                RenewalNotice {
                    employee_id: reminder.employee_id,
                    employee_name: employee.map(|e| e.full_name()),
                    email: employee.and_then(|e| e.email.clone()),
                    certification_id: reminder.certification_id,
                    certification_name: self
                        .certification(reminder.certification_id)
                        .map(|c| c.name.clone()),
                    reminder_date: reminder.reminder_date,
                }
            })
            .collect()
    }

    /// Send renewal requests for all unsent reminders, then mark them sent.
    ///
    /// Nothing is marked when the notifier fails. Persisting the new state
    /// is left to the caller.
    pub fn send_unsent(
        &mut self,
        reference: NaiveDate,
        notifier: &dyn RenewalNotifier,
    ) -> Result<usize> {
        let notices = self.pending_notices();
        if notices.is_empty() {
            return Ok(0);
        }

        let delivered = notifier.send(&notices)?;
        let marked = self.ledger.mark_sent(reference);
        self.dirty = true;
        info!("Sent {delivered} renewal request(s), marked {marked} reminder(s)");
        Ok(marked)
    }

    pub fn purge_sent(&mut self) -> usize {
        let removed = self.ledger.purge_sent();
        if removed > 0 {
            self.dirty = true;
        }
        removed
    }

    pub fn reminder_report(&self) -> Vec<ReminderReportRow> {
        reports::reminder_log(&self.ledger, &self.employees, &self.certifications)
    }

    pub fn add_assignment(
        &mut self,
        employee_id: i64,
        certification_id: i64,
        obtained: &str,
        expiry: &str,
    ) {
        self.assignments
            .add(employee_id, certification_id, obtained, expiry);
        self.dirty = true;
    }

    pub fn remove_assignment(&mut self, employee_id: i64, certification_id: i64) -> bool {
        let removed = self.assignments.remove(employee_id, certification_id);
        if removed {
            self.dirty = true;
        }
        removed
    }

    pub fn certifications_for(&self, employee_id: i64) -> Vec<EmployeeCertificationRow> {
        self.assignments
            .certifications_for(employee_id, &self.certifications)
    }

    pub fn employee_certifications(&self) -> Vec<HeldReportRow> {
        reports::employee_certifications(
            self.assignments.all(),
            &self.employees,
            &self.certifications,
        )
    }

    pub fn employee_needs(&self) -> Vec<NeedReportRow> {
        reports::employee_needs(&self.needs, &self.employees, &self.certifications)
    }

    pub fn outstanding_needs(&self, employee_id: i64) -> Vec<NeedReportRow> {
        reports::outstanding_needs(
            employee_id,
            &self.needs,
            self.assignments.all(),
            &self.employees,
            &self.certifications,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::ReminderStatus;
    use crate::features::expiration::ExpiryStatus;
    use std::cell::Cell;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn session() -> Session {
        let mut ada = Employee::new(7, "Ada", "Lovelace");
        ada.email = Some("ada@example.com".to_string());
        Session::new(
            vec![ada, Employee::new(8, "Alan", "Turing")],
            vec![
                Certification::new(3, "Forklift", "Warehouse forklift"),
                Certification::new(4, "CPR", "Cardiopulmonary resuscitation"),
            ],
            vec![
                HeldCertification::new(7, 3, "2023-06-15", "06/15/24"),
                HeldCertification::new(8, 4, "2022-01-01", "2024-06-20"),
                HeldCertification::new(8, 3, "2022-01-01", "not-a-date"),
            ],
            vec![NeededCertification { employee_id: 8, certification_id: 3 }],
            ReminderLedger::new(),
        )
    }

    struct CountingNotifier {
        calls: Cell<usize>,
    }

    impl RenewalNotifier for CountingNotifier {
        fn send(&self, notices: &[RenewalNotice]) -> Result<usize> {
            self.calls.set(self.calls.get() + 1);
            Ok(notices.len())
        }
    }

    struct FailingNotifier;

    impl RenewalNotifier for FailingNotifier {
        fn send(&self, _notices: &[RenewalNotice]) -> Result<usize> {
            Err(anyhow::anyhow!("mail relay unavailable"))
        }
    }

    #[test]
    fn test_new_session_is_clean() {
        let session = session();
        assert!(!session.is_dirty());
        assert_eq!(session.current_employee_id, None);
    }

    #[test]
    fn test_select_employee() {
        let mut session = session();
        assert!(session.select_employee(7));
        assert_eq!(session.current_employee_id, Some(7));

        assert!(!session.select_employee(1234));
        assert_eq!(session.current_employee_id, Some(7));

        session.clear_selection();
        assert_eq!(session.current_employee_id, None);
    }

    #[test]
    fn test_evaluate_and_record_all_employees() {
        let mut session = session();
        let outcome = session.evaluate_and_record_expiring(
            None,
            ymd(2024, 6, 1),
            30,
            ExpiryPolicy::default(),
        );

        assert_eq!(outcome.recorded, 2);
        assert_eq!(outcome.expiring.len(), 2);
        assert_eq!(session.ledger.unsent().len(), 2);
        assert!(session.is_dirty());
    }

    #[test]
    fn test_evaluate_and_record_scoped() {
        let mut session = session();
        let outcome = session.evaluate_and_record_expiring(
            Some(7),
            ymd(2024, 8, 1),
            30,
            ExpiryPolicy::OverdueInclusive,
        );

        assert_eq!(outcome.recorded, 1);
        assert_eq!(outcome.expiring[0].status, ExpiryStatus::Overdue);
        assert_eq!(session.ledger.all()[0].employee_id, 7);
    }

    #[test]
    fn test_evaluate_nothing_expiring_keeps_clean() {
        let mut session = session();
        let outcome = session.evaluate_and_record_expiring(
            None,
            ymd(2020, 1, 1),
            30,
            ExpiryPolicy::ForwardOnly,
        );
        assert_eq!(outcome.recorded, 0);
        assert!(!session.is_dirty());
    }

    #[test]
    fn test_send_unsent_marks_after_delivery() {
        let mut session = session();
        session.evaluate_and_record_expiring(None, ymd(2024, 6, 1), 30, ExpiryPolicy::default());

        let notifier = CountingNotifier { calls: Cell::new(0) };
        assert_eq!(session.send_unsent(ymd(2024, 6, 2), &notifier).unwrap(), 2);
        assert_eq!(notifier.calls.get(), 1);
        assert!(session.ledger.unsent().is_empty());

        // Nothing left to send: the notifier is not called again
        assert_eq!(session.send_unsent(ymd(2024, 6, 3), &notifier).unwrap(), 0);
        assert_eq!(notifier.calls.get(), 1);
    }

    #[test]
    fn test_send_unsent_failure_marks_nothing() {
        let mut session = session();
        session.evaluate_and_record_expiring(None, ymd(2024, 6, 1), 30, ExpiryPolicy::default());

        assert!(session.send_unsent(ymd(2024, 6, 2), &FailingNotifier).is_err());
        assert_eq!(session.ledger.unsent().len(), 2);
    }

    #[test]
    fn test_pending_notices_join_contact_details() {
        let mut session = session();
        session.evaluate_and_record_expiring(Some(7), ymd(2024, 6, 1), 30, ExpiryPolicy::default());

        let notices = session.pending_notices();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].employee_name.as_deref(), Some("Ada Lovelace"));
        assert_eq!(notices[0].email.as_deref(), Some("ada@example.com"));
        assert_eq!(notices[0].certification_name.as_deref(), Some("Forklift"));
    }

    #[test]
    fn test_purge_after_send() {
        let mut session = session();
        session.evaluate_and_record_expiring(None, ymd(2024, 6, 1), 30, ExpiryPolicy::default());
        session
            .send_unsent(ymd(2024, 6, 2), &CountingNotifier { calls: Cell::new(0) })
            .unwrap();
        session.evaluate_and_record_expiring(Some(8), ymd(2024, 6, 3), 30, ExpiryPolicy::default());

        assert_eq!(session.purge_sent(), 2);
        let report = session.reminder_report();
        assert_eq!(report.len(), 1);
        assert_eq!(report[0].status, ReminderStatus::Unsent);
    }

    #[test]
    fn test_orphaned_reminder_reports_blank() {
        let mut session = session();
        session.evaluate_and_record_expiring(Some(7), ymd(2024, 6, 1), 30, ExpiryPolicy::default());
        session.employees.retain(|e| e.employee_id != 7);
        assert!(session.remove_assignment(7, 3));

        let report = session.reminder_report();
        assert_eq!(report.len(), 1);
        assert_eq!(report[0].first_name, None);
        assert_eq!(report[0].certification_name.as_deref(), Some("Forklift"));
    }

    #[test]
    fn test_assignment_add_and_remove() {
        let mut session = session();
        session.add_assignment(7, 4, "2024-01-01", "2026-01-01");
        assert!(session.is_dirty());
        assert_eq!(session.certifications_for(7).len(), 2);

        session.mark_saved();
        assert!(!session.remove_assignment(7, 99));
        assert!(!session.is_dirty());
        assert_eq!(session.assignments.len(), 4);
    }

    #[test]
    fn test_outstanding_needs() {
        let mut session = session();
        assert!(session.outstanding_needs(8).is_empty());

        session.remove_assignment(8, 3);
        let pending = session.outstanding_needs(8);
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].certification_name.as_deref(), Some("Forklift"));
    }

    #[test]
    fn test_views_over_empty_session() {
        let mut session = Session::default();
        assert!(session.employee_certifications().is_empty());
        assert!(session.employee_needs().is_empty());
        assert!(session.reminder_report().is_empty());
        assert_eq!(session.purge_sent(), 0);
        let outcome =
            session.evaluate_and_record_expiring(None, ymd(2024, 6, 1), 30, ExpiryPolicy::default());
        assert_eq!(outcome.recorded, 0);
    }
}
