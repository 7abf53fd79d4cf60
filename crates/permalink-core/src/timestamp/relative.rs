//! Relative expressions resolved against a reference time.
//!
//! Supports: now/today/yesterday/tomorrow, "N <unit>s ago", "in N <unit>s",
//! "last <weekday>", "last week|month|year" and bare weekday names.

use chrono::{Datelike, Months, NaiveDate, NaiveDateTime, TimeDelta, Weekday};
use regex::Regex;
use std::sync::LazyLock;

const UNITS: &str = r"(second|sec|minute|min|hour|hr|day|week|wk|month|mo|year|yr)s?";

static AGO_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"^(\d+|an?) {} ago$", UNITS)).unwrap());

static IN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"^in (\d+|an?) {}$", UNITS)).unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Unit {
    Second,
    Minute,
    Hour,
    Day,
    Week,
    Month,
    Year,
}

impl Unit {
    fn from_word(word: &str) -> Option<Self> {
        match word {
            "second" | "sec" => Some(Unit::Second),
            "minute" | "min" => Some(Unit::Minute),
            "hour" | "hr" => Some(Unit::Hour),
            "day" => Some(Unit::Day),
            "week" | "wk" => Some(Unit::Week),
            "month" | "mo" => Some(Unit::Month),
            "year" | "yr" => Some(Unit::Year),
            _ => None,
        }
    }
}

pub(super) fn parse(s: &str, now: NaiveDateTime) -> Option<NaiveDate> {
    let today = now.date();
    match s {
        "now" | "today" => return Some(today),
        "yesterday" => return today.pred_opt(),
        "tomorrow" => return today.succ_opt(),
        "last week" => return shift(now, 1, Unit::Week, false),
        "last month" => return shift(now, 1, Unit::Month, false),
        "last year" => return shift(now, 1, Unit::Year, false),
        _ => {}
    }

    if let Some(caps) = AGO_RE.captures(s) {
        let n = amount(&caps[1])?;
        return shift(now, n, Unit::from_word(&caps[2])?, false);
    }
    if let Some(caps) = IN_RE.captures(s) {
        let n = amount(&caps[1])?;
        return shift(now, n, Unit::from_word(&caps[2])?, true);
    }

    if let Some(name) = s.strip_prefix("last ") {
        let weekday: Weekday = name.parse().ok()?;
        return previous_weekday(today, weekday, true);
    }
    if let Ok(weekday) = s.parse::<Weekday>() {
        return previous_weekday(today, weekday, false);
    }

    None
}

fn amount(word: &str) -> Option<i64> {
    match word {
        "a" | "an" => Some(1),
        digits => digits.parse().ok(),
    }
}

/// Move `now` by `n` units, backwards unless `forward`. `None` on overflow.
fn shift(now: NaiveDateTime, n: i64, unit: Unit, forward: bool) -> Option<NaiveDate> {
    let delta = match unit {
        Unit::Second => TimeDelta::try_seconds(n),
        Unit::Minute => TimeDelta::try_minutes(n),
        Unit::Hour => TimeDelta::try_hours(n),
        Unit::Day => TimeDelta::try_days(n),
        Unit::Week => TimeDelta::try_weeks(n),
        Unit::Month | Unit::Year => {
            let months = if unit == Unit::Year {
                n.checked_mul(12)?
            } else {
                n
            };
            let months = Months::new(u32::try_from(months).ok()?);
            let today = now.date();
            return if forward {
                today.checked_add_months(months)
            } else {
                today.checked_sub_months(months)
            };
        }
    }?;
    let shifted = if forward {
        now.checked_add_signed(delta)
    } else {
        now.checked_sub_signed(delta)
    }?;
    Some(shifted.date())
}

/// Most recent `weekday` on or before `today`; strictly before when `strict`.
fn previous_weekday(today: NaiveDate, weekday: Weekday, strict: bool) -> Option<NaiveDate> {
    let current = today.weekday().num_days_from_monday() as i64;
    let target = weekday.num_days_from_monday() as i64;
    let mut back = (current - target).rem_euclid(7);
    if back == 0 && strict {
        back = 7;
    }
    today.checked_sub_signed(TimeDelta::try_days(back)?)
}
