// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Voice command handling.
//!
//! Handles the workflow:
//! 1. Send the transcript to Dialogflow
//! 2. Check that the add-activity intent matched
//! 3. Normalize the extracted slots into a draft
//! 4. Store the draft for the signed-in user if it is complete

use crate::config::ADD_ACTIVITY_INTENT;
use crate::db::FirestoreDb;
use crate::error::Result;
use crate::models::{Activity, ActivityDraft};
use crate::schedule::extract_activity;
use crate::services::dialogflow::{DialogflowClient, QueryResult};
use crate::time_utils::format_utc_rfc3339;
use chrono_tz::Tz;

const NOT_UNDERSTOOD_TEXT: &str =
    "No he entès la teva petició. Podries ser més específic per afegir un horari?";
const INCOMPLETE_TEXT: &str = "Ho sento, no he pogut extreure tota la informació (títol, dia, hora) de la teva petició. Podries especificar-ho millor?";

/// What a Dialogflow result means for the schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntentOutcome {
    /// Add-activity intent with every field valid.
    Ready(ActivityDraft),
    /// Add-activity intent, but some field is missing or malformed.
    Incomplete(ActivityDraft),
    /// Some other intent, or none.
    Unrecognized,
}

/// Classify a query result and normalize its slots.
pub fn interpret(result: &QueryResult, tz: Tz) -> IntentOutcome {
    if result.intent_name() != Some(ADD_ACTIVITY_INTENT) {
        return IntentOutcome::Unrecognized;
    }

    let draft = extract_activity(&result.parameters, tz);
    if draft.missing_fields().is_empty() {
        IntentOutcome::Ready(draft)
    } else {
        IntentOutcome::Incomplete(draft)
    }
}

/// Confirmation spoken back after an activity is added.
pub fn confirmation_text(draft: &ActivityDraft) -> String {
    format!(
        "Activitat \"{}\" afegida per {} a les {}.",
        draft.title, draft.day, draft.time
    )
}

/// Text for an outcome, preferring the agent's own response when present.
pub fn fulfillment_text(result: &QueryResult, outcome: &IntentOutcome) -> String {
    if !result.fulfillment_text.is_empty() {
        return result.fulfillment_text.clone();
    }
    match outcome {
        IntentOutcome::Ready(draft) => confirmation_text(draft),
        IntentOutcome::Incomplete(_) => INCOMPLETE_TEXT.to_string(),
        IntentOutcome::Unrecognized => NOT_UNDERSTOOD_TEXT.to_string(),
    }
}

/// Result of a voice command.
#[derive(Debug, Clone)]
pub struct VoiceOutcome {
    pub fulfillment_text: String,
    /// The stored activity, when one was added
    pub item: Option<Activity>,
    /// Why nothing was stored
    pub error: Option<String>,
}

/// Runs voice commands for one user.
pub struct VoiceCommandProcessor<'a> {
    dialogflow: &'a DialogflowClient,
    db: &'a FirestoreDb,
    timezone: Tz,
}

impl<'a> VoiceCommandProcessor<'a> {
    pub fn new(dialogflow: &'a DialogflowClient, db: &'a FirestoreDb, timezone: Tz) -> Self {
        Self {
            dialogflow,
            db,
            timezone,
        }
    }

    /// Interpret `query` and store the resulting activity for `owner`.
    pub async fn process(&self, owner: &str, query: &str) -> Result<VoiceOutcome> {
        let result = self.dialogflow.detect_intent(query).await?;
        let outcome = interpret(&result, self.timezone);
        let text = fulfillment_text(&result, &outcome);

        match outcome {
            IntentOutcome::Ready(draft) => {
                let activity =
                    draft.into_activity(owner, format_utc_rfc3339(chrono::Utc::now()));
                let stored = self.db.create_activity(&activity).await?;

                tracing::info!(
                    owner,
                    title = %stored.title,
                    day = %stored.day,
                    time = %stored.time,
                    "Activity added by voice"
                );

                Ok(VoiceOutcome {
                    fulfillment_text: text,
                    item: Some(stored),
                    error: None,
                })
            }
            IntentOutcome::Incomplete(draft) => {
                tracing::warn!(
                    owner,
                    missing = ?draft.missing_fields(),
                    draft = ?draft,
                    "Incomplete parameters from Dialogflow"
                );
                Ok(VoiceOutcome {
                    fulfillment_text: text,
                    item: None,
                    error: Some("incomplete_parameters".to_string()),
                })
            }
            IntentOutcome::Unrecognized => {
                tracing::info!(
                    owner,
                    intent = result.intent_name().unwrap_or("<none>"),
                    "Intent not recognized"
                );
                Ok(VoiceOutcome {
                    fulfillment_text: text,
                    item: None,
                    error: Some("intent_not_recognized".to_string()),
                })
            }
        }
    }
}
