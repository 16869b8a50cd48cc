// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Normalization of NLU day/time tokens into their stored forms.
//!
//! Days become capitalized names ("dilluns" -> "Dilluns"). Times become
//! zero-padded 24-hour `HH:MM`. Normalization never fails: input that no
//! strategy recognizes is returned unchanged, and the caller rejects it
//! with [`is_canonical_time`] before anything is persisted.

use super::words;
use chrono::{DateTime, NaiveDateTime, NaiveTime, Timelike};
use chrono_tz::Tz;
use lazy_static::lazy_static;
use regex::Regex;

/// A single time-parsing attempt. Returns the canonical `HH:MM` on success.
type TimeStrategy = fn(&str, Tz) -> Option<String>;

/// Time strategies in priority order; the first match wins.
const TIME_STRATEGIES: &[(&str, TimeStrategy)] = &[
    ("absolute_datetime", absolute_datetime),
    ("bare_hour", bare_hour),
    ("clock", clock),
    ("hour_word", hour_word),
];

/// Naive datetime layouts accepted when no UTC offset is present.
const NAIVE_DATETIME_FORMATS: &[&str] =
    &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"];

lazy_static! {
    /// Stored form: exactly `HH:MM`.
    static ref CANONICAL_TIME_RE: Regex =
        Regex::new(r"^([0-9]{2}):([0-9]{2})$").expect("Failed to compile CANONICAL_TIME_RE");
    /// Clock input: `H:MM`, `HH:MM` or `HH:MM:SS`.
    static ref CLOCK_RE: Regex = Regex::new(r"^([0-9]{1,2}):([0-9]{2})(?::([0-9]{2}))?$")
        .expect("Failed to compile CLOCK_RE");
}

/// Capitalize a day name: first character upper-cased, the rest lower-cased.
///
/// Names are not checked against the weekday table.
pub fn normalize_day(raw: &str) -> String {
    let mut chars = raw.trim().chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Normalize a time token to `HH:MM`, rendering absolute instants in `tz`.
pub fn normalize_time(raw: &str, tz: Tz) -> String {
    let trimmed = raw.trim();

    for (name, strategy) in TIME_STRATEGIES {
        if let Some(time) = strategy(trimmed, tz) {
            tracing::trace!(strategy = name, input = raw, output = %time, "Time normalized");
            return time;
        }
    }

    raw.to_string()
}

/// Combine a separately extracted hour and minute-offset phrase.
///
/// Returns `None` when the hour does not resolve to 0-23.
pub fn combine_hour_and_offset(hour: &str, offset: &str) -> Option<String> {
    let hour = resolve_hour(hour)?;
    let minute = words::minute_offset(offset);
    Some(format!("{hour:02}:{minute:02}"))
}

/// Resolve an hour given as a numeral or a number word.
pub fn resolve_hour(raw: &str) -> Option<u32> {
    let raw = raw.trim();
    raw.parse::<u32>()
        .ok()
        .filter(|h| *h <= 23)
        .or_else(|| words::hour_from_word(raw))
}

/// Check for a stored time: two-digit hour 00-23, a colon, two-digit minute 00-59.
pub fn is_canonical_time(time: &str) -> bool {
    let Some(caps) = CANONICAL_TIME_RE.captures(time) else {
        return false;
    };
    matches!(
        (caps[1].parse::<u32>(), caps[2].parse::<u32>()),
        (Ok(hour), Ok(minute)) if hour <= 23 && minute <= 59
    )
}

fn format_clock(time: NaiveTime) -> String {
    format!("{:02}:{:02}", time.hour(), time.minute())
}

fn absolute_datetime(raw: &str, tz: Tz) -> Option<String> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Some(format_clock(instant.with_timezone(&tz).time()));
    }

    NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|local| format_clock(local.time()))
}

fn bare_hour(raw: &str, _tz: Tz) -> Option<String> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse::<u32>()
        .ok()
        .filter(|h| *h <= 23)
        .map(|h| format!("{h:02}:00"))
}

fn clock(raw: &str, _tz: Tz) -> Option<String> {
    let caps = CLOCK_RE.captures(raw)?;
    let field = |i: usize| caps.get(i).map_or(Some(0), |m| m.as_str().parse::<u32>().ok());

    let time = NaiveTime::from_hms_opt(field(1)?, field(2)?, field(3)?)?;
    Some(format_clock(time))
}

fn hour_word(raw: &str, _tz: Tz) -> Option<String> {
    words::hour_from_word(raw).map(|h| format!("{h:02}:00"))
}
