//! Timestamp normalization
//!
//! Listing pages expose post times in more than one shape: a precise
//! `created-timestamp` attribute (`2024-01-15T10:30:00.123000+0000`) and a
//! looser `datetime`/`title` pair on the relative-time element. Everything is
//! folded into ISO-8601 with an explicit offset.
//!
//! Resolution order:
//! 1. strict millisecond pattern, offset rewritten to `±HH:MM` or `Z`
//! 2. generic date parsing, re-emitted as UTC with millisecond precision
//! 3. the trimmed input, unchanged

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

static STRICT_TIMESTAMP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2})\.(\d{3})\d*(?:([+-]\d{2}):?(\d{2})|(Z))?$")
        .expect("strict timestamp pattern is valid")
});

static PAREN_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*\([^)]*\)\s*$").expect("paren suffix pattern is valid"));

const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M:%S%z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%z",
    "%a %b %d %Y %H:%M:%S GMT%z",
];

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%b %d, %Y %H:%M:%S",
    "%B %d, %Y %H:%M:%S",
    "%B %d, %Y %I:%M %p",
    "%B %d, %Y %I:%M:%S %p",
    // `toString()` of a UTC date with the offset dropped
    "%a %b %d %Y %H:%M:%S GMT",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%b %d, %Y",
    "%B %d, %Y",
    "%d %b %Y",
    // `toDateString()`, as in a relative-time tooltip
    "%a %b %d %Y",
    "%A, %B %d, %Y",
];

/// Normalize any timestamp string to ISO-8601 with an offset
///
/// Never fails: blank input yields `""`, and input that cannot be read as a
/// date is returned trimmed but otherwise untouched so callers still see it.
#[must_use]
pub fn normalize(input: &str) -> String {
    let raw = input.trim();
    if raw.is_empty() {
        return String::new();
    }

    if let Some(strict) = normalize_strict(raw) {
        return strict;
    }

    match parse_generic(raw) {
        Some(instant) => to_utc_iso(instant),
        None => raw.to_string(),
    }
}

/// Strict `YYYY-MM-DDTHH:MM:SS.mmm[offset]` form, keeping the source offset
fn normalize_strict(raw: &str) -> Option<String> {
    let caps = STRICT_TIMESTAMP.captures(raw)?;
    let base = &caps[1];
    let millis = &caps[2];
    let offset = match (caps.get(3), caps.get(4)) {
        (Some(hours), Some(minutes)) => format!("{}:{}", hours.as_str(), minutes.as_str()),
        _ => "Z".to_string(),
    };

    let rebuilt = format!("{base}.{millis}{offset}");

    // Shape matched but the calendar value may not exist (month 13, hour 25)
    DateTime::parse_from_rfc3339(&rebuilt).ok()?;
    Some(rebuilt)
}

fn parse_generic(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    // `Date.prototype.toString()` appends a zone name in parentheses
    let without_zone_name = PAREN_SUFFIX.replace(raw, "");
    let candidate = without_zone_name.as_ref();

    for format in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(candidate, format) {
            return Some(dt.with_timezone(&Utc));
        }
    }

    // Zone-less values are read as UTC
    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(candidate, format) {
            return Some(naive.and_utc());
        }
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(candidate, format) {
            return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
        }
    }

    None
}

fn to_utc_iso(instant: DateTime<Utc>) -> String {
    instant.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}
