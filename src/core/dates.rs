//! # Date Normalization
//!
//! Turns the loosely formatted expiry text found in certification records
//! into calendar dates. Unparseable text is not an error: it yields `None`
//! and the record is treated as having an unknown expiry.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.1.0: Try US-short before US-long so `MM/DD/YY` never lands in year 00YY
//! - 1.0.0: Initial release with ISO and US formats

use chrono::NaiveDate;

/// ISO calendar date, used for everything this crate writes
pub const ISO_FORMAT: &str = "%Y-%m-%d";

/// Accepted input formats, in priority order.
///
/// ISO comes first so an unambiguous ISO string is never read as a US date.
/// `%m/%d/%y` must precede `%m/%d/%Y`: chrono accepts a two-digit year for
/// `%Y` and would place "06/15/24" in the year 24.
pub const DATE_FORMATS: &[(&str, &str)] = &[
    ("iso", ISO_FORMAT),
    ("us-short", "%m/%d/%y"),
    ("us-long", "%m/%d/%Y"),
];

/// Parse a date written in one of [`DATE_FORMATS`].
///
/// Leading and trailing whitespace is ignored. Returns `None` for empty
/// input or text matching none of the formats.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    DATE_FORMATS
        .iter()
        .find_map(|(_, format)| NaiveDate::parse_from_str(trimmed, format).ok())
}

/// Parse an optional date column; absent and blank values are both `None`
pub fn parse_optional_date(raw: Option<&str>) -> Option<NaiveDate> {
    raw.and_then(parse_date)
}

/// Render a date in ISO form
pub fn format_date(date: NaiveDate) -> String {
    date.format(ISO_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_iso() {
        assert_eq!(parse_date("2024-06-15"), Some(ymd(2024, 6, 15)));
        assert_eq!(parse_date("1999-12-31"), Some(ymd(1999, 12, 31)));
    }

    #[test]
    fn test_parse_us_short() {
        assert_eq!(parse_date("06/15/24"), Some(ymd(2024, 6, 15)));
        assert_eq!(parse_date("01/02/99"), Some(ymd(1999, 1, 2)));
    }

    #[test]
    fn test_parse_us_long() {
        assert_eq!(parse_date("06/15/2024"), Some(ymd(2024, 6, 15)));
        assert_eq!(parse_date("12/01/1987"), Some(ymd(1987, 12, 1)));
    }

    #[test]
    fn test_parse_trims_whitespace() {
        assert_eq!(parse_date("  2024-06-15\t"), Some(ymd(2024, 6, 15)));
        assert_eq!(parse_date(" 06/15/24 "), Some(ymd(2024, 6, 15)));
    }

    #[test]
    fn test_parse_empty_is_none() {
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("   "), None);
        assert_eq!(parse_optional_date(None), None);
        assert_eq!(parse_optional_date(Some("")), None);
    }

    #[test]
    fn test_parse_garbage_is_none() {
        assert_eq!(parse_date("not-a-date"), None);
        assert_eq!(parse_date("2024/06/15"), None);
        assert_eq!(parse_date("15.06.2024"), None);
        assert_eq!(parse_date("June 15, 2024"), None);
    }

    #[test]
    fn test_parse_rejects_impossible_dates() {
        assert_eq!(parse_date("2024-02-30"), None);
        assert_eq!(parse_date("13/01/2024"), None);
        assert_eq!(parse_date("02/29/23"), None);
    }

    #[test]
    fn test_format_date_is_iso() {
        assert_eq!(format_date(ymd(2024, 6, 1)), "2024-06-01");
        assert_eq!(parse_date(&format_date(ymd(2031, 1, 9))), Some(ymd(2031, 1, 9)));
    }
}
