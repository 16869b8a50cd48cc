//! Application configuration loaded from environment variables.
//!
//! A `.env` file is honored for local development.

use chrono_tz::Tz;
use std::env;

/// Dialogflow intent that adds an activity.
pub const ADD_ACTIVITY_INTENT: &str = "AfegirHorari";

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Firebase project that issues user ID tokens
    pub firebase_project_id: String,
    /// GCP project holding the Firestore database
    pub gcp_project_id: String,
    /// GCP project of the Dialogflow agent
    pub dialogflow_project_id: String,
    /// Language code sent with every detectIntent call
    pub dialogflow_language: String,
    /// Secret path segment for the Dialogflow fulfillment webhook
    pub webhook_path_uuid: String,
    /// Frontend URL (CORS)
    pub frontend_url: String,
    /// Zone used to render absolute times and project occurrences
    pub timezone: Tz,
    /// Server port
    pub port: u16,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let firebase_project_id = env::var("FIREBASE_PROJECT_ID")
            .map(|v| v.trim().to_string())
            .map_err(|_| ConfigError::Missing("FIREBASE_PROJECT_ID"))?;

        let timezone = env::var("TIMEZONE")
            .unwrap_or_else(|_| "Europe/Madrid".to_string())
            .parse::<Tz>()
            .map_err(|e| ConfigError::Invalid("TIMEZONE", e.to_string()))?;

        Ok(Self {
            gcp_project_id: env::var("GCP_PROJECT_ID")
                .unwrap_or_else(|_| firebase_project_id.clone()),
            dialogflow_project_id: env::var("DIALOGFLOW_PROJECT_ID")
                .unwrap_or_else(|_| firebase_project_id.clone()),
            dialogflow_language: env::var("DIALOGFLOW_LANGUAGE")
                .unwrap_or_else(|_| "ca".to_string()),
            webhook_path_uuid: env::var("WEBHOOK_PATH_UUID")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("WEBHOOK_PATH_UUID"))?,
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            timezone,
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            firebase_project_id,
        })
    }

    /// Fixed configuration for tests.
    pub fn test_default() -> Self {
        Self {
            firebase_project_id: "ora-test".to_string(),
            gcp_project_id: "test-project".to_string(),
            dialogflow_project_id: "ora-agent-test".to_string(),
            dialogflow_language: "ca".to_string(),
            webhook_path_uuid: "test-webhook-uuid".to_string(),
            frontend_url: "http://localhost:3000".to_string(),
            timezone: chrono_tz::Europe::Madrid,
            port: 8080,
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {0}: {1}")]
    Invalid(&'static str, String),
}
