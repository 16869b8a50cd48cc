// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Turn NLU slot values into a normalized activity draft.

use super::normalize::{combine_hour_and_offset, normalize_day, normalize_time};
use crate::models::ActivityDraft;
use chrono_tz::Tz;
use serde_json::{Map, Value};

/// Slot names produced by the NLU agent.
pub mod slots {
    pub const TITLE: &str = "title";
    pub const DAY: &str = "day";
    /// Combined time slot (older agent schema).
    pub const TIME: &str = "time";
    /// Split hour slot (newer agent schema).
    pub const HOUR: &str = "hour";
    /// Free-text minutes after the hour ("i quart", "i mitja", ...).
    pub const MINUTE_OFFSET: &str = "minute-offset";
}

/// Text of a slot value, or `""` when absent or empty.
///
/// Accepts plain scalars, lists (single-element wrappers unwrap to their
/// element, longer lists are joined with spaces) and protobuf `Struct`
/// shaped values such as `{"stringValue": "..."}`.
pub fn slot_text(value: Option<&Value>) -> String {
    value.and_then(value_text).unwrap_or_default()
}

fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_string()).filter(|s| !s.is_empty()),
        Value::Number(n) => Some(number_text(n)),
        Value::Array(items) => list_text(items),
        Value::Object(fields) => {
            if let Some(inner) = fields.get("stringValue").or_else(|| fields.get("numberValue")) {
                return value_text(inner);
            }
            fields
                .get("listValue")
                .and_then(|list| list.get("values"))
                .and_then(Value::as_array)
                .and_then(|items| list_text(items))
        }
        Value::Null | Value::Bool(_) => None,
    }
}

fn list_text(items: &[Value]) -> Option<String> {
    let parts: Vec<String> = items.iter().filter_map(value_text).collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" "))
    }
}

/// Whole numbers print without a fractional part (`8.0` -> `"8"`).
fn number_text(n: &serde_json::Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.is_finite() && f.fract() == 0.0 => format!("{}", f as i64),
        _ => n.to_string(),
    }
}

/// Build a draft from NLU parameters.
///
/// A non-empty `time` slot wins; otherwise `hour` + `minute-offset` are
/// combined. Fields that cannot be resolved are left empty or unnormalized
/// so that validation rejects the draft.
pub fn extract_activity(params: &Map<String, Value>, tz: Tz) -> ActivityDraft {
    let title = slot_text(params.get(slots::TITLE));
    let day = normalize_day(&slot_text(params.get(slots::DAY)));

    let raw_time = slot_text(params.get(slots::TIME));
    let time = if !raw_time.is_empty() {
        normalize_time(&raw_time, tz)
    } else {
        let hour = slot_text(params.get(slots::HOUR));
        let offset = slot_text(params.get(slots::MINUTE_OFFSET));
        combine_hour_and_offset(&hour, &offset).unwrap_or_default()
    };

    ActivityDraft { title, day, time }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn params(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn slot_text_unwraps_scalars_and_lists() {
        assert_eq!(slot_text(Some(&json!("Gimnàs"))), "Gimnàs");
        assert_eq!(slot_text(Some(&json!(["dilluns"]))), "dilluns");
        assert_eq!(slot_text(Some(&json!(8))), "8");
        assert_eq!(slot_text(Some(&json!(8.0))), "8");
        assert_eq!(slot_text(Some(&json!(["classe", "de", "piano"]))), "classe de piano");
    }

    #[test]
    fn slot_text_empty_cases() {
        assert_eq!(slot_text(None), "");
        assert_eq!(slot_text(Some(&json!(null))), "");
        assert_eq!(slot_text(Some(&json!(""))), "");
        assert_eq!(slot_text(Some(&json!([]))), "");
        assert_eq!(slot_text(Some(&json!(["  "]))), "");
    }

    #[test]
    fn slot_text_struct_values() {
        assert_eq!(slot_text(Some(&json!({"stringValue": "Piscina"}))), "Piscina");
        assert_eq!(slot_text(Some(&json!({"numberValue": 10}))), "10");
        assert_eq!(
            slot_text(Some(&json!({"listValue": {"values": [{"stringValue": "dijous"}]}}))),
            "dijous"
        );
    }

    #[test]
    fn combined_time_slot() {
        let draft = extract_activity(
            &params(json!({"title": "Gimnàs", "day": "dilluns", "time": "10"})),
            Tz::UTC,
        );
        assert_eq!(draft.title, "Gimnàs");
        assert_eq!(draft.day, "Dilluns");
        assert_eq!(draft.time, "10:00");
    }

    #[test]
    fn split_time_slots() {
        let draft = extract_activity(
            &params(json!({
                "title": ["Anglès"],
                "day": ["dimecres"],
                "hour": ["vuit"],
                "minute-offset": "i quart"
            })),
            Tz::UTC,
        );
        assert_eq!(draft.day, "Dimecres");
        assert_eq!(draft.time, "08:15");
    }

    #[test]
    fn unresolved_split_hour_leaves_time_empty() {
        let draft = extract_activity(
            &params(json!({"title": "Anglès", "day": "dimecres", "hour": "matí"})),
            Tz::UTC,
        );
        assert_eq!(draft.time, "");
    }

    #[test]
    fn missing_slots_are_empty() {
        let draft = extract_activity(&Map::new(), Tz::UTC);
        assert_eq!(draft, ActivityDraft::default());
    }
}
