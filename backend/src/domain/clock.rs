//! # Room Clock
//!
//! All presence decisions are made against a single fixed timezone,
//! America/Sao_Paulo, so that every connected session agrees on what
//! "today" means regardless of where the server runs.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Utc};
use once_cell::sync::Lazy;

/// Exact textual format of a check-in entry timestamp.
pub const ENTRY_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// America/Sao_Paulo offset. Brazil stopped observing DST in 2019, so a
/// fixed -03:00 offset is exact for all timestamps this system writes.
static SAO_PAULO: Lazy<FixedOffset> =
    Lazy::new(|| FixedOffset::west_opt(3 * 3600).expect("valid UTC-3 offset"));

/// Current wall-clock time in the room's timezone.
pub fn now() -> DateTime<FixedOffset> {
    Utc::now().with_timezone(&*SAO_PAULO)
}

/// The current calendar day in the room's timezone.
pub fn today() -> NaiveDate {
    now().date_naive()
}

/// Render the current wall-clock time as an entry timestamp string.
pub fn now_entry_timestamp() -> String {
    now().format(ENTRY_TIMESTAMP_FORMAT).to_string()
}

/// Parse an entry timestamp under the exact fixed format.
///
/// Returns `None` for anything that does not parse. Malformed
/// timestamps are excluded from presence, never surfaced as errors.
pub fn parse_entry_timestamp(raw: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw, ENTRY_TIMESTAMP_FORMAT).ok()
}

/// The calendar day an entry timestamp falls on, if it parses.
pub fn entry_day(raw: &str) -> Option<NaiveDate> {
    parse_entry_timestamp(raw).map(|ts| ts.date())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_parse_valid_entry_timestamp() {
        let ts = parse_entry_timestamp("2024-06-09 10:30:05").unwrap();
        assert_eq!(ts.date().year(), 2024);
        assert_eq!(ts.date().month(), 6);
        assert_eq!(ts.date().day(), 9);
        assert_eq!(ts.time().hour(), 10);
        assert_eq!(ts.time().second(), 5);
    }

    #[test]
    fn test_malformed_entry_timestamp_is_none() {
        assert!(parse_entry_timestamp("2024-13-99 99:99:99").is_none());
        assert!(parse_entry_timestamp("").is_none());
        assert!(parse_entry_timestamp("2024-06-09T10:30:05Z").is_none());
        assert!(parse_entry_timestamp("09/06/2024 10:30:05").is_none());
    }

    #[test]
    fn test_entry_day_extracts_date() {
        assert_eq!(
            entry_day("2024-06-09 23:59:59"),
            NaiveDate::from_ymd_opt(2024, 6, 9)
        );
        assert_eq!(entry_day("not a timestamp"), None);
    }

    #[test]
    fn test_now_entry_timestamp_round_trips() {
        let rendered = now_entry_timestamp();
        assert!(parse_entry_timestamp(&rendered).is_some());
    }
}
