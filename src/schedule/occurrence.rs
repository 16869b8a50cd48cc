// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Projection of weekly activities onto their next calendar occurrence.
//!
//! An activity is a recurrence rule ("every Dilluns at 10:00"), not a date.
//! The projector picks the single next instant at or after a reference
//! clock. The clock is always passed in; callers read it per request so a
//! projection is never reused across a day boundary.

use super::normalize::is_canonical_time;
use super::words::WEEKDAYS;
use crate::models::{Activity, CalendarEvent};
use crate::time_utils::format_local_rfc3339;
use chrono::{DateTime, Datelike, Days, NaiveDateTime, NaiveTime, TimeDelta, TimeZone};
use chrono_tz::Tz;

/// Every occurrence lasts one hour.
const OCCURRENCE_DURATION_MINUTES: i64 = 60;

/// A concrete instance of a weekly activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Occurrence {
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
}

/// Weekday index of a day name (Diumenge = 0 ... Dissabte = 6), ignoring case.
pub fn weekday_index(day: &str) -> Option<u32> {
    let day = day.trim().to_lowercase();
    WEEKDAYS
        .iter()
        .position(|name| name.to_lowercase() == day)
        .map(|i| i as u32)
}

/// Next occurrence of `day` at `time`, at or after `now`.
///
/// Returns `None` for an unknown day name, a time that is not `HH:MM`, or a
/// wall-clock time skipped by a DST change.
pub fn project_occurrence(day: &str, time: &str, now: DateTime<Tz>) -> Option<Occurrence> {
    let target = weekday_index(day)?;
    if !is_canonical_time(time) {
        return None;
    }
    let clock = NaiveTime::parse_from_str(time, "%H:%M").ok()?;

    let tz = now.timezone();
    let today = now.weekday().num_days_from_sunday();
    let days_ahead = (target + 7 - today) % 7;
    let mut date = now
        .date_naive()
        .checked_add_days(Days::new(u64::from(days_ahead)))?;

    // Decide on the wall clock first, so a skipped time earlier today does
    // not hide next week's occurrence.
    if date.and_time(clock) < now.naive_local() {
        date = date.checked_add_days(Days::new(7))?;
    }

    let mut start = local_instant(&tz, date.and_time(clock));
    // Repeated hour after a fall-back change: the earlier instant may be past.
    if start.is_some_and(|s| s < now) {
        date = date.checked_add_days(Days::new(7))?;
        start = local_instant(&tz, date.and_time(clock));
    }
    let start = start?;

    Some(Occurrence {
        start,
        end: start + TimeDelta::minutes(OCCURRENCE_DURATION_MINUTES),
    })
}

/// Ambiguous wall-clock times (DST fall-back) resolve to the earlier instant.
fn local_instant(tz: &Tz, local: NaiveDateTime) -> Option<DateTime<Tz>> {
    tz.from_local_datetime(&local).earliest()
}

/// Project a list of activities into calendar events, ordered by start.
///
/// Activities that cannot be projected are left out.
pub fn project_calendar<'a, I>(activities: I, now: DateTime<Tz>) -> Vec<CalendarEvent>
where
    I: IntoIterator<Item = &'a Activity>,
{
    let mut projected: Vec<(DateTime<Tz>, CalendarEvent)> = activities
        .into_iter()
        .filter_map(|activity| {
            let Some(id) = activity.id.clone() else {
                tracing::debug!(title = %activity.title, "Skipping activity without id");
                return None;
            };
            let Some(occurrence) = project_occurrence(&activity.day, &activity.time, now) else {
                tracing::debug!(
                    activity_id = %id,
                    day = %activity.day,
                    time = %activity.time,
                    "Activity has no projectable occurrence"
                );
                return None;
            };

            Some((
                occurrence.start,
                CalendarEvent {
                    id,
                    title: activity.title.clone(),
                    start: format_local_rfc3339(&occurrence.start),
                    end: format_local_rfc3339(&occurrence.end),
                },
            ))
        })
        .collect();

    projected.sort_by(|a, b| a.0.cmp(&b.0));
    projected.into_iter().map(|(_, event)| event).collect()
}
