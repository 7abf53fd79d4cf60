//! Absolute dates: numeric, month-name, partial (month + year, month + day)
//! and epoch forms.
//!
//! Input is already lowercased with single spaces and ordinal suffixes removed.

use chrono::{DateTime, Datelike, Months, NaiveDate, NaiveDateTime};
use regex::Regex;
use std::sync::LazyLock;

/// Full dates. Numeric slash dates are month-first; `%B` also accepts abbreviations.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%Y.%m.%d",
    "%m/%d/%Y",
    "%B %d, %Y",
    "%B %d %Y",
    "%d %B %Y",
    "%d %B, %Y",
    "%A, %B %d, %Y",
    "%A %B %d %Y",
    "%A, %d %B %Y",
];

static MONTH_YEAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([a-z]+),? (\d{4})$").unwrap());

static YEAR_MONTH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{4})[-/](\d{1,2})$").unwrap());

/// "march 1" / "1 march": the year comes from the reference date.
static MONTH_DAY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:([a-z]+) (\d{1,2})|(\d{1,2}) ([a-z]+))$").unwrap());

/// Full dates whose year is written with two digits: "3/1/21", "march 1, 21", "1 march 21".
static TWO_DIGIT_YEAR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{1,2}/\d{1,2}/|[a-z]+ \d{1,2},? |\d{1,2} [a-z]+,? )(\d{2})$").unwrap()
});

static EPOCH_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{9,11}$").unwrap());

pub(super) fn parse(s: &str, now: NaiveDateTime) -> Option<NaiveDate> {
    // Partial forms first: chrono lets "%B %d %Y" swallow "february 2021" as Feb 20, year 21.
    if let Some(caps) = MONTH_YEAR_RE.captures(s) {
        let month = month_from_name(&caps[1])?;
        let year: i32 = caps[2].parse().ok()?;
        return month_with_reference_day(year, month, now);
    }

    if let Some(caps) = YEAR_MONTH_RE.captures(s) {
        let year: i32 = caps[1].parse().ok()?;
        let month: u32 = caps[2].parse().ok()?;
        return month_with_reference_day(year, month, now);
    }

    if let Some(caps) = MONTH_DAY_RE.captures(s) {
        let (name, day) = match (caps.get(1), caps.get(2)) {
            (Some(name), Some(day)) => (name.as_str(), day.as_str()),
            _ => (&caps[4], &caps[3]),
        };
        if let Some(month) = month_from_name(name) {
            return NaiveDate::from_ymd_opt(now.year(), month, day.parse().ok()?);
        }
    }

    if EPOCH_RE.is_match(s) {
        let secs: i64 = s.parse().ok()?;
        return DateTime::from_timestamp(secs, 0).map(|dt| dt.date_naive());
    }

    let expanded;
    let s = match TWO_DIGIT_YEAR_RE.captures(s) {
        Some(caps) => {
            expanded = format!("{}{}", &caps[1], expand_year(caps[2].parse().ok()?));
            expanded.as_str()
        }
        None => s,
    };

    DATE_FORMATS.iter().find_map(|fmt| {
        NaiveDate::parse_from_str(s, fmt)
            .ok()
            .filter(|d| (1000..=9999).contains(&d.year()))
    })
}

/// Two-digit years follow the POSIX `%y` pivot: 00-68 are 20xx, 69-99 are 19xx.
fn expand_year(yy: i32) -> i32 {
    if yy < 69 {
        2000 + yy
    } else {
        1900 + yy
    }
}

fn month_from_name(name: &str) -> Option<u32> {
    NaiveDate::parse_from_str(&format!("1 {} 2000", name), "%d %B %Y")
        .ok()
        .map(|d| d.month())
}

/// A partial date borrows the day-of-month from `now`, clamped to the month length.
fn month_with_reference_day(year: i32, month: u32, now: NaiveDateTime) -> Option<NaiveDate> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let last = first.checked_add_months(Months::new(1))?.pred_opt()?;
    let day = now.day().min(last.day());
    NaiveDate::from_ymd_opt(year, month, day)
}
