// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod activity;
pub mod calendar;

pub use activity::{Activity, ActivityDraft};
pub use calendar::CalendarEvent;
