//! Expiration window evaluation over held certifications
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.1.0: Report lapsed certifications as overdue by default
//! - 1.0.0: Initial release with forward-looking window

use anyhow::Result;
use chrono::{Days, NaiveDate};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::core::dates::parse_date;
use crate::core::models::HeldCertification;

/// Default look-ahead in days
pub const DEFAULT_WINDOW_DAYS: i64 = 30;

/// Last date covered by a window of `window_days` starting at `reference`.
///
/// Saturates at the calendar bounds instead of overflowing.
pub fn window_end(reference: NaiveDate, window_days: i64) -> NaiveDate {
    let days = Days::new(window_days.unsigned_abs());
    if window_days >= 0 {
        reference.checked_add_days(days).unwrap_or(NaiveDate::MAX)
    } else {
        reference.checked_sub_days(days).unwrap_or(NaiveDate::MIN)
    }
}

/// Which side of the reference date counts.
///
/// Both policies cap at `reference + window` inclusive. `ForwardOnly` also
/// requires `expiry >= reference`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpiryPolicy {
    /// Already lapsed certifications are reported as overdue
    #[default]
    OverdueInclusive,
    /// Only certifications expiring today or later are reported
    ForwardOnly,
}

impl std::fmt::Display for ExpiryPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExpiryPolicy::OverdueInclusive => write!(f, "overdue_inclusive"),
            ExpiryPolicy::ForwardOnly => write!(f, "forward_only"),
        }
    }
}

impl std::str::FromStr for ExpiryPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "overdue_inclusive" => Ok(ExpiryPolicy::OverdueInclusive),
            "forward_only" => Ok(ExpiryPolicy::ForwardOnly),
            _ => Err(anyhow::anyhow!("Invalid expiry policy: {}", s)),
        }
    }
}

/// Where an expiring certification sits relative to the reference date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpiryStatus {
    /// Expiry is before the reference date
    Overdue,
    /// Expiry is on or after the reference date, within the window
    ExpiringSoon,
}

impl std::fmt::Display for ExpiryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExpiryStatus::Overdue => write!(f, "overdue"),
            ExpiryStatus::ExpiringSoon => write!(f, "expiring soon"),
        }
    }
}

/// A held certification selected by [`find_expiring`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExpiringCertification {
    pub held: HeldCertification,
    pub expiry: NaiveDate,
    /// Negative when overdue
    pub days_remaining: i64,
    pub status: ExpiryStatus,
}

/// Select held certifications expiring within `window_days` of `reference`.
///
/// `scope` restricts the search to one employee. Records with an unparseable
/// or blank expiry are skipped. Input order is preserved.
pub fn find_expiring(
    held: &[HeldCertification],
    scope: Option<i64>,
    reference: NaiveDate,
    window_days: i64,
    policy: ExpiryPolicy,
) -> Vec<ExpiringCertification> {
    let threshold = window_end(reference, window_days);

    let expiring: Vec<ExpiringCertification> = held
        .iter()
        .filter(|record| scope.map_or(true, |id| record.employee_id == id))
        .filter_map(|record| {
            let expiry = match parse_date(&record.expiry_date) {
                Some(date) => date,
                None => {
                    debug!(
                        "Skipping unparseable expiry '{}' for employee {} certification {}",
                        record.expiry_date, record.employee_id, record.certification_id
                    );
                    return None;
                }
            };

            if expiry > threshold {
                return None;
            }
            if policy == ExpiryPolicy::ForwardOnly && expiry < reference {
                return None;
            }

            let status = if expiry < reference {
                ExpiryStatus::Overdue
            } else {
                ExpiryStatus::ExpiringSoon
            };

            Some(ExpiringCertification {
                held: record.clone(),
                expiry,
                days_remaining: (expiry - reference).num_days(),
                status,
            })
        })
        .collect();

    debug!(
        "Found {} expiring certification(s) up to {} (scope: {:?}, policy: {})",
        expiring.len(),
        threshold,
        scope,
        policy
    );

    expiring
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn held(emp: i64, cert: i64, expiry: &str) -> HeldCertification {
        HeldCertification::new(emp, cert, "2020-01-01", expiry)
    }

    #[test]
    fn test_scenario_us_short_within_window() {
        let records = vec![held(7, 3, "06/15/24")];
        let found = find_expiring(&records, None, ymd(2024, 6, 1), 30, ExpiryPolicy::default());

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].expiry, ymd(2024, 6, 15));
        assert_eq!(found[0].days_remaining, 14);
        assert_eq!(found[0].status, ExpiryStatus::ExpiringSoon);
    }

    #[test]
    fn test_scenario_lapsed_included_as_overdue_by_default() {
        let records = vec![held(7, 3, "06/15/24")];
        let found = find_expiring(&records, None, ymd(2024, 8, 1), 30, ExpiryPolicy::OverdueInclusive);

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].status, ExpiryStatus::Overdue);
        assert_eq!(found[0].days_remaining, -47);
    }

    #[test]
    fn test_scenario_lapsed_excluded_forward_only() {
        let records = vec![held(7, 3, "06/15/24")];
        let found = find_expiring(&records, None, ymd(2024, 8, 1), 30, ExpiryPolicy::ForwardOnly);
        assert!(found.is_empty());
    }

    #[test]
    fn test_unparseable_never_reported() {
        let records = vec![held(7, 3, "not-a-date"), held(7, 4, "")];
        for reference in [ymd(1990, 1, 1), ymd(2024, 6, 1), ymd(2099, 12, 31)] {
            for policy in [ExpiryPolicy::OverdueInclusive, ExpiryPolicy::ForwardOnly] {
                assert!(find_expiring(&records, None, reference, 36500, policy).is_empty());
            }
        }
    }

    #[test]
    fn test_window_boundaries_inclusive() {
        let reference = ymd(2024, 6, 1);
        let records = vec![
            held(1, 1, "2024-06-01"), // today
            held(1, 2, "2024-07-01"), // today + 30
            held(1, 3, "2024-07-02"), // today + 31
            held(1, 4, "2024-05-31"), // yesterday
        ];

        let forward = find_expiring(&records, None, reference, 30, ExpiryPolicy::ForwardOnly);
        let ids: Vec<i64> = forward.iter().map(|e| e.held.certification_id).collect();
        assert_eq!(ids, vec![1, 2]);

        let overdue = find_expiring(&records, None, reference, 30, ExpiryPolicy::OverdueInclusive);
        let ids: Vec<i64> = overdue.iter().map(|e| e.held.certification_id).collect();
        assert_eq!(ids, vec![1, 2, 4]);
        assert_eq!(overdue[0].status, ExpiryStatus::ExpiringSoon);
        assert_eq!(overdue[2].status, ExpiryStatus::Overdue);
    }

    #[test]
    fn test_scope_filters_employee() {
        let records = vec![held(7, 3, "2024-06-10"), held(8, 3, "2024-06-10")];
        let found = find_expiring(&records, Some(8), ymd(2024, 6, 1), 30, ExpiryPolicy::default());

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].held.employee_id, 8);

        let none = find_expiring(&records, Some(99), ymd(2024, 6, 1), 30, ExpiryPolicy::default());
        assert!(none.is_empty());
    }

    #[test]
    fn test_preserves_input_order() {
        let records = vec![
            held(1, 1, "2024-06-20"),
            held(1, 2, "2024-06-05"),
            held(1, 3, "06/10/2024"),
        ];
        let found = find_expiring(&records, None, ymd(2024, 6, 1), 30, ExpiryPolicy::default());
        let ids: Vec<i64> = found.iter().map(|e| e.held.certification_id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_no_record_outside_bound() {
        let reference = ymd(2024, 6, 1);
        let records: Vec<HeldCertification> = (0..120)
            .map(|offset| {
                let expiry = ymd(2024, 4, 1) + Duration::days(offset);
                held(1, offset, &expiry.format("%Y-%m-%d").to_string())
            })
            .collect();

        let found = find_expiring(&records, None, reference, 30, ExpiryPolicy::ForwardOnly);
        assert_eq!(found.len(), 31);
        for entry in &found {
            assert!(entry.expiry >= reference);
            assert!(entry.expiry <= reference + Duration::days(30));
        }
    }

    #[test]
    fn test_huge_window_saturates() {
        let records = vec![held(7, 3, "06/15/24"), held(7, 4, "2199-01-01")];
        let found = find_expiring(&records, None, ymd(2024, 6, 1), 100_000_000, ExpiryPolicy::default());
        assert_eq!(found.len(), 2);

        let found = find_expiring(&records, None, ymd(2024, 6, 1), i64::MAX, ExpiryPolicy::ForwardOnly);
        assert_eq!(found.len(), 2);
    }

    #[test]
    fn test_window_end() {
        assert_eq!(window_end(ymd(2024, 6, 1), 30), ymd(2024, 7, 1));
        assert_eq!(window_end(ymd(2024, 6, 1), 0), ymd(2024, 6, 1));
        assert_eq!(window_end(ymd(2024, 6, 1), -1), ymd(2024, 5, 31));
        assert_eq!(window_end(ymd(2024, 6, 1), i64::MAX), NaiveDate::MAX);
        assert_eq!(window_end(ymd(2024, 6, 1), i64::MIN), NaiveDate::MIN);
    }

    #[test]
    fn test_zero_window_only_today() {
        let records = vec![held(1, 1, "2024-06-01"), held(1, 2, "2024-06-02")];
        let found = find_expiring(&records, None, ymd(2024, 6, 1), 0, ExpiryPolicy::ForwardOnly);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].held.certification_id, 1);
    }

    #[test]
    fn test_policy_parse() {
        assert_eq!("forward_only".parse::<ExpiryPolicy>().unwrap(), ExpiryPolicy::ForwardOnly);
        assert_eq!(
            "OVERDUE_INCLUSIVE".parse::<ExpiryPolicy>().unwrap(),
            ExpiryPolicy::OverdueInclusive
        );
        assert!("later".parse::<ExpiryPolicy>().is_err());
    }
}
