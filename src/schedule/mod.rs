// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Schedule core: canonical day/time forms and weekly occurrence projection.
//!
//! Everything here is pure and synchronous.

pub mod extract;
pub mod normalize;
pub mod occurrence;
pub mod words;

pub use extract::{extract_activity, slot_text};
pub use normalize::{combine_hour_and_offset, is_canonical_time, normalize_day, normalize_time};
pub use occurrence::{project_calendar, project_occurrence, weekday_index, Occurrence};
