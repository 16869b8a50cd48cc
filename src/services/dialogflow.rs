// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Dialogflow ES client for turning voice transcripts into intents.
//!
//! Handles:
//! - detectIntent calls over the REST API
//! - Google access tokens from application default credentials
//! - Offline mode for tests (every call fails)

use crate::config::Config;
use crate::error::AppError;
use ring::rand::{SecureRandom, SystemRandom};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::time::Duration;
use tokio::sync::RwLock;

const DIALOGFLOW_BASE_URL: &str = "https://dialogflow.googleapis.com/v2";
const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(10);
/// Refresh the access token this long before it expires.
const TOKEN_EXPIRY_MARGIN_SECS: i64 = 60;

/// Access token ready to be sent, with its expiry.
struct CachedToken {
    header_value: String,
    expires_at: chrono::DateTime<chrono::Utc>,
}

/// Dialogflow API client.
pub struct DialogflowClient {
    http: reqwest::Client,
    base_url: String,
    project_id: String,
    language_code: String,
    token_generator: Option<gcloud_sdk::GoogleAuthTokenGenerator>,
    cached_token: RwLock<Option<CachedToken>>,
}

impl DialogflowClient {
    /// Create a client authenticated with application default credentials.
    pub async fn new(config: &Config) -> Result<Self, AppError> {
        let token_generator = gcloud_sdk::GoogleAuthTokenGenerator::new(
            gcloud_sdk::TokenSourceType::Default,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
        )
        .await
        .map_err(|e| {
            AppError::Internal(anyhow::anyhow!(
                "Failed to create Google token generator: {}",
                e
            ))
        })?;

        tracing::info!(
            project = %config.dialogflow_project_id,
            language = %config.dialogflow_language,
            "Dialogflow client initialized"
        );

        Self::build(config, Some(token_generator))
    }

    /// Create an offline client for testing. Every call returns an error.
    pub fn new_mock(config: &Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: DIALOGFLOW_BASE_URL.to_string(),
            project_id: config.dialogflow_project_id.clone(),
            language_code: config.dialogflow_language.clone(),
            token_generator: None,
            cached_token: RwLock::new(None),
        }
    }

    fn build(
        config: &Config,
        token_generator: Option<gcloud_sdk::GoogleAuthTokenGenerator>,
    ) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(DEFAULT_HTTP_TIMEOUT)
            .build()
            .map_err(|e| AppError::Internal(anyhow::anyhow!("HTTP client error: {}", e)))?;

        Ok(Self {
            http,
            base_url: DIALOGFLOW_BASE_URL.to_string(),
            project_id: config.dialogflow_project_id.clone(),
            language_code: config.dialogflow_language.clone(),
            token_generator,
            cached_token: RwLock::new(None),
        })
    }

    /// Send a transcript to the agent in a fresh session.
    pub async fn detect_intent(&self, query: &str) -> Result<QueryResult, AppError> {
        let session_id = new_session_id()?;
        let url = format!(
            "{}/projects/{}/agent/sessions/{}:detectIntent",
            self.base_url, self.project_id, session_id
        );

        let body = DetectIntentRequest {
            query_input: QueryInput {
                text: TextInput {
                    text: query.to_string(),
                    language_code: self.language_code.clone(),
                },
            },
        };

        tracing::info!(
            project = %self.project_id,
            session = %session_id,
            query,
            "Sending transcript to Dialogflow"
        );

        let authorization = self.authorization_header().await?;
        let response = self
            .http
            .post(&url)
            .header(reqwest::header::AUTHORIZATION, authorization)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Dialogflow(e.to_string()))?;

        let response: DetectIntentResponse = check_response_json(response).await?;

        tracing::debug!(
            intent = response.query_result.intent_name().unwrap_or("<none>"),
            confidence = response.query_result.intent_detection_confidence,
            parameters = %serde_json::Value::Object(response.query_result.parameters.clone()),
            "Dialogflow response received"
        );

        Ok(response.query_result)
    }

    /// `Authorization` header value, reusing the cached token while it is fresh.
    async fn authorization_header(&self) -> Result<String, AppError> {
        let generator = self.token_generator.as_ref().ok_or_else(|| {
            AppError::Dialogflow("Dialogflow client not connected (offline mode)".to_string())
        })?;

        let refresh_after =
            chrono::Utc::now() + chrono::Duration::seconds(TOKEN_EXPIRY_MARGIN_SECS);
        if let Some(cached) = self.cached_token.read().await.as_ref() {
            if cached.expires_at > refresh_after {
                return Ok(cached.header_value.clone());
            }
        }

        let token = generator.create_token().await.map_err(|e| {
            AppError::Dialogflow(format!("Failed to obtain Google access token: {}", e))
        })?;

        let header_value = token.header_value();
        *self.cached_token.write().await = Some(CachedToken {
            header_value: header_value.clone(),
            expires_at: token.expiry,
        });

        Ok(header_value)
    }
}

/// Random 128-bit session id, hex encoded.
fn new_session_id() -> Result<String, AppError> {
    let mut bytes = [0u8; 16];
    SystemRandom::new()
        .fill(&mut bytes)
        .map_err(|_| AppError::Internal(anyhow::anyhow!("System RNG failure")))?;
    Ok(hex::encode(bytes))
}

/// Check response status and parse JSON body.
async fn check_response_json<T: for<'de> Deserialize<'de>>(
    response: reqwest::Response,
) -> Result<T, AppError> {
    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if status.as_u16() == 429 {
            tracing::warn!("Dialogflow quota exceeded (429)");
        }

        return Err(AppError::Dialogflow(format!("HTTP {}: {}", status, body)));
    }

    response
        .json()
        .await
        .map_err(|e| AppError::Dialogflow(format!("JSON parse error: {}", e)))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DetectIntentRequest {
    query_input: QueryInput,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct QueryInput {
    text: TextInput,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TextInput {
    text: String,
    language_code: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DetectIntentResponse {
    query_result: QueryResult,
}

/// Result of intent detection, shared by detectIntent and the fulfillment webhook.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResult {
    #[serde(default)]
    pub query_text: String,
    /// Slot values extracted by the agent
    #[serde(default)]
    pub parameters: Map<String, Value>,
    /// Response text configured on the agent (may be empty)
    #[serde(default)]
    pub fulfillment_text: String,
    #[serde(default)]
    pub intent: Option<Intent>,
    #[serde(default)]
    pub intent_detection_confidence: f64,
}

impl QueryResult {
    /// Display name of the matched intent, if any.
    pub fn intent_name(&self) -> Option<&str> {
        self.intent.as_ref().map(|i| i.display_name.as_str())
    }
}

/// Matched intent.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Intent {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub display_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_ids_are_unique_hex() {
        let a = new_session_id().unwrap();
        let b = new_session_id().unwrap();
        assert_eq!(a.len(), 32);
        assert!(a.bytes().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(a, b);
    }

    #[test]
    fn request_uses_camel_case() {
        let body = DetectIntentRequest {
            query_input: QueryInput {
                text: TextInput {
                    text: "afegeix piano dilluns a les deu".to_string(),
                    language_code: "ca".to_string(),
                },
            },
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["queryInput"]["text"]["languageCode"], "ca");
    }

    #[test]
    fn parses_detect_intent_response() {
        let response: DetectIntentResponse = serde_json::from_value(serde_json::json!({
            "responseId": "abc",
            "queryResult": {
                "queryText": "afegeix piano dilluns a les deu",
                "parameters": {"title": "piano", "day": "dilluns", "time": "10"},
                "allRequiredParamsPresent": true,
                "fulfillmentText": "Fet!",
                "intent": {"name": "projects/x/agent/intents/1", "displayName": "AfegirHorari"},
                "intentDetectionConfidence": 0.92,
                "languageCode": "ca"
            }
        }))
        .unwrap();

        let result = response.query_result;
        assert_eq!(result.intent_name(), Some("AfegirHorari"));
        assert_eq!(result.parameters["day"], "dilluns");
        assert_eq!(result.fulfillment_text, "Fet!");
    }

    #[test]
    fn missing_intent_is_tolerated() {
        let result: QueryResult =
            serde_json::from_value(serde_json::json!({"queryText": "hola"})).unwrap();
        assert_eq!(result.intent_name(), None);
        assert!(result.parameters.is_empty());
    }

    #[tokio::test]
    async fn offline_client_fails() {
        let client = DialogflowClient::new_mock(&Config::test_default());
        let err = client.detect_intent("hola").await.unwrap_err();
        assert!(matches!(err, AppError::Dialogflow(_)));
    }
}
