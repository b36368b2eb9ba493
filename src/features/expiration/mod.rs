//! # Feature: Expiration Window
//!
//! Finds held certifications whose expiry falls inside a rolling window
//! relative to a reference date.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false

pub mod evaluator;

pub use evaluator::{
    find_expiring, window_end, ExpiringCertification, ExpiryPolicy, ExpiryStatus, DEFAULT_WINDOW_DAYS,
};
