//! Free-form timestamp normalization.
//!
//! Turns human date/time text ("yesterday", "2021-03-01 14:00",
//! "last Tuesday", "March 2021") into a `YYYY-MM-DD` calendar date. Time of
//! day is dropped: the commit search only filters by date.

mod absolute;
mod relative;

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use regex::Regex;
use std::sync::LazyLock;

use crate::error::PermalinkError;

/// Output format of [`normalize`].
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Trailing time of day, optionally introduced by "at" or an ISO `T`.
static TIME_SUFFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(.+?)(?:\s+at)?(?:\s+|t)(?:\d{1,2}:\d{2}(?::\d{2}(?:\.\d+)?)?(?:\s*[ap]m)?|\d{1,2}\s*[ap]m)(?:\s*z|\s*utc|\s*[+-]\d{2}:?\d{2})?$",
    )
    .unwrap()
});

static ORDINAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d{1,2})(?:st|nd|rd|th)\b").unwrap());

/// Normalize `raw` to `YYYY-MM-DD`, resolving relative expressions against
/// the current local time.
pub fn normalize(raw: &str) -> Result<String, PermalinkError> {
    normalize_at(raw, Local::now().naive_local())
}

/// Like [`normalize`] with an explicit reference time for relative expressions.
pub fn normalize_at(raw: &str, now: NaiveDateTime) -> Result<String, PermalinkError> {
    let date =
        parse_date(raw, now).ok_or_else(|| PermalinkError::InvalidTimestamp(raw.to_string()))?;
    let formatted = date.format(DATE_FORMAT).to_string();
    tracing::debug!("normalized timestamp {:?} to {}", raw, formatted);
    Ok(formatted)
}

/// Resolve `raw` to a calendar date, or `None` if no known form matches.
pub fn parse_date(raw: &str, now: NaiveDateTime) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    // Offset-carrying forms keep the date as written in their own offset.
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(trimmed) {
        return Some(dt.date_naive());
    }

    let lowered = trimmed
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let cleaned = ORDINAL_RE.replace_all(&lowered, "$1");

    if let Some(date) = parse_date_only(&cleaned, now) {
        return Some(date);
    }

    let caps = TIME_SUFFIX_RE.captures(&cleaned)?;
    parse_date_only(caps[1].trim_end_matches(','), now)
}

fn parse_date_only(s: &str, now: NaiveDateTime) -> Option<NaiveDate> {
    absolute::parse(s, now).or_else(|| relative::parse(s, now))
}
