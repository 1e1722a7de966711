//! Export timestamp parsing.
//!
//! Wrapped exports write local-looking timestamps without an offset
//! (`2026-01-01T00:00:00`); other producers write RFC 3339. Naive values are
//! read as UTC.

use chrono::{DateTime, NaiveDateTime, Utc};

/// Offset-free layout used by wrapped exports. Fractional seconds are optional.
pub const NAIVE_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Description of the RFC 3339 layout, used in error messages.
pub const RFC3339_EXPECTED: &str = "RFC 3339 (e.g. 2026-01-01T00:00:00Z)";

/// Parses an offset-free `YYYY-MM-DDTHH:MM:SS` timestamp as UTC.
pub fn parse_naive_date(s: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(s.trim(), NAIVE_DATE_FORMAT)
        .ok()
        .map(|naive| naive.and_utc())
}

/// Parses an RFC 3339 timestamp and normalizes it to UTC.
pub fn parse_rfc3339_date(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s.trim())
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Parses a wrapped-export date: the naive layout first, RFC 3339 second.
///
/// Returns `None` when neither layout matches.
pub fn parse_export_date(s: &str) -> Option<DateTime<Utc>> {
    parse_naive_date(s).or_else(|| parse_rfc3339_date(s))
}
