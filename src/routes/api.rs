// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! API routes for authenticated users.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{Activity, ActivityDraft, CalendarEvent};
use crate::schedule::{normalize_day, normalize_time, project_calendar, weekday_index};
use crate::services::VoiceCommandProcessor;
use crate::time_utils::format_utc_rfc3339;
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post},
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

/// API routes (require authentication via Firebase ID token).
/// The auth middleware is applied in routes/mod.rs for these routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/activities", get(list_activities).post(create_activity))
        .route("/api/activities/{id}", delete(delete_activity))
        .route("/api/calendar", get(get_calendar))
        .route("/api/voice", post(process_voice))
}

// ─── Activities ──────────────────────────────────────────────

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ActivitiesResponse {
    pub activities: Vec<Activity>,
}

/// Week position used for listing: Dilluns first, Diumenge last.
fn week_order(day: &str) -> u32 {
    weekday_index(day).map_or(7, |i| (i + 6) % 7)
}

fn sort_for_week(activities: &mut [Activity]) {
    activities.sort_by(|a, b| {
        week_order(&a.day)
            .cmp(&week_order(&b.day))
            .then_with(|| a.time.cmp(&b.time))
            .then_with(|| a.title.cmp(&b.title))
    });
}

/// List the caller's activities in week order.
async fn list_activities(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<ActivitiesResponse>> {
    let mut activities = state.db.list_activities_for_owner(&user.uid).await?;
    sort_for_week(&mut activities);

    tracing::debug!(owner = %user.uid, count = activities.len(), "Listed activities");

    Ok(Json(ActivitiesResponse { activities }))
}

/// Form submission. Every field is optional here so that a missing one
/// becomes a validation error instead of a deserialization rejection.
#[derive(Debug, Deserialize)]
pub struct CreateActivityRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub day: String,
    #[serde(default)]
    pub time: String,
}

impl CreateActivityRequest {
    fn normalize(self, tz: Tz) -> ActivityDraft {
        ActivityDraft {
            title: self.title.trim().to_string(),
            day: normalize_day(&self.day),
            time: normalize_time(&self.time, tz),
        }
    }
}

/// Normalize, validate and store a form-submitted activity.
async fn create_activity(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(request): Json<CreateActivityRequest>,
) -> Result<(StatusCode, Json<Activity>)> {
    let draft = request.normalize(state.config.timezone);

    if let Err(errors) = draft.validate() {
        tracing::debug!(owner = %user.uid, draft = ?draft, "Rejected activity");
        return Err(AppError::BadRequest(format!(
            "Invalid activity ({}): {}",
            draft.missing_fields().join(", "),
            errors
        )));
    }

    let activity = draft.into_activity(&user.uid, format_utc_rfc3339(Utc::now()));
    let stored = state.db.create_activity(&activity).await?;

    Ok((StatusCode::CREATED, Json(stored)))
}

/// Delete one of the caller's activities.
async fn delete_activity(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    state.db.delete_activity(&id, &user.uid).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ─── Calendar ────────────────────────────────────────────────

#[derive(Deserialize)]
struct CalendarQuery {
    /// Reference instant (RFC3339); defaults to the current time
    now: Option<String>,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct CalendarResponse {
    pub events: Vec<CalendarEvent>,
}

fn parse_reference_instant(now: Option<&str>, tz: Tz) -> Result<DateTime<Tz>> {
    match now {
        Some(raw) => DateTime::parse_from_rfc3339(raw)
            .map(|dt| dt.with_timezone(&tz))
            .map_err(|_| {
                AppError::BadRequest("Invalid 'now' parameter: must be RFC3339 datetime".to_string())
            }),
        None => Ok(Utc::now().with_timezone(&tz)),
    }
}

/// Next occurrence of each of the caller's activities.
async fn get_calendar(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Query(params): Query<CalendarQuery>,
) -> Result<Json<CalendarResponse>> {
    let now = parse_reference_instant(params.now.as_deref(), state.config.timezone)?;
    let activities = state.db.list_activities_for_owner(&user.uid).await?;
    let events = project_calendar(&activities, now);

    tracing::debug!(
        owner = %user.uid,
        activities = activities.len(),
        events = events.len(),
        "Projected calendar"
    );

    Ok(Json(CalendarResponse { events }))
}

// ─── Voice ───────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct VoiceRequest {
    #[serde(default)]
    pub query: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct VoiceResponse {
    pub fulfillment_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule_item: Option<Activity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Interpret a voice transcript and store the activity it describes.
async fn process_voice(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(request): Json<VoiceRequest>,
) -> Result<Json<VoiceResponse>> {
    let query = request.query.trim();
    if query.is_empty() {
        return Err(AppError::BadRequest("Query text is required".to_string()));
    }

    let processor =
        VoiceCommandProcessor::new(&state.dialogflow, &state.db, state.config.timezone);
    let outcome = processor.process(&user.uid, query).await?;

    Ok(Json(VoiceResponse {
        fulfillment_text: outcome.fulfillment_text,
        schedule_item: outcome.item,
        error: outcome.error,
    }))
}
