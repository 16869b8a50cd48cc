// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Ora API Server
//!
//! Stores weekly activities per user, adds them from Catalan voice commands
//! through Dialogflow, and projects them onto the calendar.

use ora::{
    config::Config,
    db::FirestoreDb,
    services::{DialogflowClient, FirebaseTokenVerifier},
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging for GCP
    init_logging()?;

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(
        port = config.port,
        timezone = %config.timezone,
        "Starting Ora API"
    );

    // Initialize Firestore database
    let db = FirestoreDb::new(&config.gcp_project_id).await?;

    let identity_verifier = Arc::new(FirebaseTokenVerifier::new(&config)?);
    tracing::info!(
        project = %config.firebase_project_id,
        "Firebase ID token verifier initialized"
    );

    let dialogflow = DialogflowClient::new(&config).await?;

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        db,
        identity_verifier,
        dialogflow,
    });

    // Build router
    let app = ora::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging (GCP-compliant).
fn init_logging() -> Result<(), Box<dyn std::error::Error>> {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("ora=debug".parse()?)
                .add_directive("info".parse()?),
        )
        .with(format)
        .init();
    Ok(())
}
