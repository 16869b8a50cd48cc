// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Weekly activity model for storage and API.

use crate::schedule::{is_canonical_time, weekday_index};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::{Validate, ValidationError};

/// Stored activity record in Firestore.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Activity {
    /// Firestore document ID (generated on insert, never written as a field)
    #[serde(alias = "_firestore_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Firebase uid of the creator. Legacy records have none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    /// Free-text label
    pub title: String,
    /// Capitalized weekday name ("Dilluns")
    pub day: String,
    /// 24-hour "HH:MM"
    pub time: String,
    /// Creation time (RFC3339)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl Activity {
    /// Whether `uid` may see or delete this activity.
    pub fn is_owned_by(&self, uid: &str) -> bool {
        self.owner.as_deref() == Some(uid)
    }
}

/// Normalized title/day/time, not yet persisted.
///
/// Produced by both the form and the voice path. Only a draft that passes
/// validation is turned into an [`Activity`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct ActivityDraft {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(custom(function = "validate_day"))]
    pub day: String,
    #[validate(custom(function = "validate_time"))]
    pub time: String,
}

fn validate_day(day: &str) -> Result<(), ValidationError> {
    if weekday_index(day).is_some() {
        Ok(())
    } else {
        Err(ValidationError::new("weekday"))
    }
}

fn validate_time(time: &str) -> Result<(), ValidationError> {
    if is_canonical_time(time) {
        Ok(())
    } else {
        Err(ValidationError::new("time_format"))
    }
}

impl ActivityDraft {
    /// Names of the fields that keep this draft from being stored.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.title.is_empty() {
            missing.push("title");
        }
        if weekday_index(&self.day).is_none() {
            missing.push("day");
        }
        if !is_canonical_time(&self.time) {
            missing.push("time");
        }
        missing
    }

    /// Build the record to store for `owner`.
    pub fn into_activity(self, owner: &str, created_at: String) -> Activity {
        Activity {
            id: None,
            owner: Some(owner.to_string()),
            title: self.title,
            day: self.day,
            time: self.time,
            created_at: Some(created_at),
        }
    }
}
