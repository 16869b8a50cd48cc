// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Calendar events derived from activities. Never stored.

use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// One projected occurrence of an activity, as sent to the calendar view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct CalendarEvent {
    /// Id of the source activity
    pub id: String,
    pub title: String,
    /// Start (RFC3339, local offset)
    pub start: String,
    /// End (RFC3339, local offset), always one hour after start
    pub end: String,
}
