//! # Assignments Feature
//!
//! Records of which employees hold which certifications.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false

pub mod store;

pub use store::{CertificationAssignmentStore, EmployeeCertificationRow};
