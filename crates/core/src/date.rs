//! Calendar date parsing for stored anniversary fields.

use chrono::{DateTime, NaiveDate};

use crate::Date;

/// Error raised when a stored date string cannot be understood.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The field was empty or whitespace
    #[error("empty date")]
    Empty,

    /// The field did not match any accepted date format
    #[error("invalid date: {0:?}")]
    Invalid(String),
}

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

/// Parse a calendar date.
///
/// Accepts `YYYY-MM-DD`, `YYYY/MM/DD` and RFC 3339 timestamps. Timestamps are
/// reduced to the date written in them, so `2025-10-01T23:30:00+08:00` is
/// 2025-10-01 regardless of the offset.
pub fn parse_date(input: &str) -> Result<Date, ParseError> {
    let s = input.trim();
    if s.is_empty() {
        return Err(ParseError::Empty);
    }

    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return Ok(date);
        }
    }

    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.date_naive())
        .map_err(|_| ParseError::Invalid(s.to_string()))
}

/// Format a date the way the store writes it (`YYYY-MM-DD`).
pub fn format_date(date: Date) -> String {
    date.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> Date {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_dash_and_slash_forms() {
        assert_eq!(parse_date("2025-10-01").unwrap(), ymd(2025, 10, 1));
        assert_eq!(parse_date("2025/10/01").unwrap(), ymd(2025, 10, 1));
        assert_eq!(parse_date("  2024-02-29 ").unwrap(), ymd(2024, 2, 29));
    }

    #[test]
    fn test_parse_timestamp_keeps_written_date() {
        assert_eq!(
            parse_date("2025-10-01T23:30:00+08:00").unwrap(),
            ymd(2025, 10, 1)
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse_date(""), Err(ParseError::Empty));
        assert_eq!(
            parse_date("next tuesday"),
            Err(ParseError::Invalid("next tuesday".to_string()))
        );
        assert!(parse_date("2025-02-30").is_err());
    }

    #[test]
    fn test_format_date_is_zero_padded() {
        assert_eq!(format_date(ymd(2025, 1, 5)), "2025-01-05");
    }
}
