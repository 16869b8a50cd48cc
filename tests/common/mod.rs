// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use jsonwebtoken::{encode, Algorithm, DecodingKey, EncodingKey, Header};
use ora::config::Config;
use ora::db::FirestoreDb;
use ora::routes::create_router;
use ora::services::{DialogflowClient, FirebaseTokenVerifier};
use ora::AppState;
use serde::Serialize;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

/// Key id the test verifier accepts.
#[allow(dead_code)]
pub const TEST_KID: &str = "ora-test-kid";

const TEST_PRIVATE_KEY_PEM: &str = include_str!("../fixtures/test_signing_key.pem");
const TEST_PUBLIC_KEY_PEM: &str = include_str!("../fixtures/test_signing_key.pub.pem");

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Create a test database connection.
#[allow(dead_code)]
pub async fn test_db() -> FirestoreDb {
    FirestoreDb::new("test-project")
        .await
        .expect("Failed to connect to Firestore emulator")
}

/// Create a mock database connection (offline).
#[allow(dead_code)]
pub fn test_db_offline() -> FirestoreDb {
    FirestoreDb::new_mock()
}

/// Verifier that trusts only the fixture key.
#[allow(dead_code)]
pub fn test_verifier(config: &Config) -> FirebaseTokenVerifier {
    let key = DecodingKey::from_rsa_pem(TEST_PUBLIC_KEY_PEM.as_bytes())
        .expect("fixture public key should parse");
    FirebaseTokenVerifier::new_with_static_key(config, TEST_KID, key)
        .expect("static verifier should build")
}

/// Create a test app with offline mock dependencies.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    let config = Config::test_default();
    let identity_verifier = Arc::new(test_verifier(&config));
    let dialogflow = DialogflowClient::new_mock(&config);

    let state = Arc::new(AppState {
        config,
        db: test_db_offline(),
        identity_verifier,
        dialogflow,
    });

    (create_router(state.clone()), state)
}

/// ID token claims as Firebase issues them.
#[derive(Debug, Clone, Serialize)]
pub struct TestClaims {
    pub iss: String,
    pub aud: String,
    pub sub: String,
    pub iat: u64,
    pub exp: u64,
    pub auth_time: u64,
    pub email: Option<String>,
}

#[allow(dead_code)]
pub fn now_unix_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs()
}

/// Valid claims for `uid` in the test project.
#[allow(dead_code)]
pub fn valid_claims(config: &Config, uid: &str) -> TestClaims {
    let now = now_unix_secs();
    TestClaims {
        iss: format!("https://securetoken.google.com/{}", config.firebase_project_id),
        aud: config.firebase_project_id.clone(),
        sub: uid.to_string(),
        iat: now,
        exp: now + 3600,
        auth_time: now,
        email: Some(format!("{uid}@example.com")),
    }
}

/// Sign claims with the fixture key under `kid`.
#[allow(dead_code)]
pub fn sign_claims(claims: &TestClaims, kid: &str) -> String {
    let mut header = Header::new(Algorithm::RS256);
    header.kid = Some(kid.to_string());
    let key = EncodingKey::from_rsa_pem(TEST_PRIVATE_KEY_PEM.as_bytes())
        .expect("fixture private key should parse");
    encode(&header, claims, &key).expect("signing should succeed")
}

/// A valid ID token for `uid`.
#[allow(dead_code)]
pub fn create_test_id_token(config: &Config, uid: &str) -> String {
    sign_claims(&valid_claims(config, uid), TEST_KID)
}
