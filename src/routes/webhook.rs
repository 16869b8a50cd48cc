// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Webhook route for Dialogflow fulfillment.

use crate::services::voice::{confirmation_text, interpret, IntentOutcome};
use crate::services::QueryResult;
use crate::AppState;
use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::post,
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

const MISSING_FIELDS_TEXT: &str =
    "Ho sento, necessito el títol, el dia i l'hora per afegir l'activitat.";
const UNKNOWN_REQUEST_TEXT: &str = "No he entès la petició del webhook.";

/// Webhook routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/webhook/{uuid}", post(handle_fulfillment))
}

/// Fulfillment request sent by Dialogflow ES.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookRequest {
    #[serde(default)]
    pub response_id: String,
    #[serde(default)]
    pub session: String,
    #[serde(default)]
    pub query_result: QueryResult,
}

/// Fulfillment response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookResponse {
    pub fulfillment_text: String,
}

/// Reply text for a fulfillment call.
///
/// Nothing is stored here; `/api/voice` stores the same interpreted draft.
fn reply_for(result: &QueryResult, tz: chrono_tz::Tz) -> String {
    match interpret(result, tz) {
        IntentOutcome::Ready(draft) => confirmation_text(&draft),
        IntentOutcome::Incomplete(_) => MISSING_FIELDS_TEXT.to_string(),
        IntentOutcome::Unrecognized => UNKNOWN_REQUEST_TEXT.to_string(),
    }
}

/// Handle a fulfillment call (POST).
///
/// Replies with the normalized activity but stores nothing: the caller is
/// Dialogflow, not a signed-in user.
async fn handle_fulfillment(
    State(state): State<Arc<AppState>>,
    Path(uuid): Path<String>,
    Json(request): Json<WebhookRequest>,
) -> impl IntoResponse {
    // Validate Path UUID
    if uuid != state.config.webhook_path_uuid {
        tracing::warn!(
            received_uuid = %uuid,
            "Security Alert: Webhook path UUID mismatch"
        );
        return StatusCode::NOT_FOUND.into_response();
    }

    let result = &request.query_result;
    tracing::info!(
        response_id = %request.response_id,
        session = %request.session,
        intent = result.intent_name().unwrap_or("<none>"),
        "Fulfillment request received"
    );

    let fulfillment_text = reply_for(result, state.config.timezone);
    (StatusCode::OK, Json(WebhookResponse { fulfillment_text })).into_response()
}
