// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firebase ID token verification against a static test key.

use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use ora::config::Config;
use ora::services::IdentityError;

mod common;

fn assert_rejected(result: Result<ora::services::VerifiedUser, IdentityError>) {
    assert!(
        matches!(result, Err(IdentityError::Rejected(_))),
        "expected rejection, got {:?}",
        result
    );
}

#[tokio::test]
async fn valid_token_yields_uid() {
    let config = Config::test_default();
    let verifier = common::test_verifier(&config);
    let token = common::create_test_id_token(&config, "uid-42");

    let user = verifier.verify_id_token(&token).await.unwrap();
    assert_eq!(user.uid, "uid-42");
    assert_eq!(user.email.as_deref(), Some("uid-42@example.com"));
}

#[tokio::test]
async fn wrong_audience_is_rejected() {
    let config = Config::test_default();
    let verifier = common::test_verifier(&config);
    let mut claims = common::valid_claims(&config, "uid-42");
    claims.aud = "some-other-project".to_string();

    assert_rejected(
        verifier
            .verify_id_token(&common::sign_claims(&claims, common::TEST_KID))
            .await,
    );
}

#[tokio::test]
async fn wrong_issuer_is_rejected() {
    let config = Config::test_default();
    let verifier = common::test_verifier(&config);
    let mut claims = common::valid_claims(&config, "uid-42");
    claims.iss = "https://accounts.google.com".to_string();

    assert_rejected(
        verifier
            .verify_id_token(&common::sign_claims(&claims, common::TEST_KID))
            .await,
    );
}

#[tokio::test]
async fn unknown_kid_is_rejected() {
    let config = Config::test_default();
    let verifier = common::test_verifier(&config);
    let claims = common::valid_claims(&config, "uid-42");

    assert_rejected(
        verifier
            .verify_id_token(&common::sign_claims(&claims, "rotated-away"))
            .await,
    );
}

#[tokio::test]
async fn empty_subject_is_rejected() {
    let config = Config::test_default();
    let verifier = common::test_verifier(&config);
    let claims = common::valid_claims(&config, " ");

    assert_rejected(
        verifier
            .verify_id_token(&common::sign_claims(&claims, common::TEST_KID))
            .await,
    );
}

#[tokio::test]
async fn future_auth_time_is_rejected() {
    let config = Config::test_default();
    let verifier = common::test_verifier(&config);
    let mut claims = common::valid_claims(&config, "uid-42");
    claims.auth_time += 3600;

    assert_rejected(
        verifier
            .verify_id_token(&common::sign_claims(&claims, common::TEST_KID))
            .await,
    );
}

#[tokio::test]
async fn hmac_signed_token_is_rejected() {
    let config = Config::test_default();
    let verifier = common::test_verifier(&config);
    let claims = common::valid_claims(&config, "uid-42");

    let mut header = Header::new(Algorithm::HS256);
    header.kid = Some(common::TEST_KID.to_string());
    let token = encode(&header, &claims, &EncodingKey::from_secret(b"guessable")).unwrap();

    assert_rejected(verifier.verify_id_token(&token).await);
}

#[tokio::test]
async fn empty_token_is_rejected() {
    let config = Config::test_default();
    let verifier = common::test_verifier(&config);
    assert_rejected(verifier.verify_id_token("").await);
}
