// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Dialogflow fulfillment webhook tests.

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::{json, Value};
use tower::ServiceExt;

mod common;

fn fulfillment_request(uuid: &str, payload: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(format!("/webhook/{}", uuid))
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap()
}

async fn response_json(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 4096)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn test_webhook_uuid_mismatch() {
    let (app, _) = common::create_test_app();

    let response = app
        .oneshot(fulfillment_request("wrong-uuid", &json!({})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_webhook_confirms_complete_activity() {
    let (app, state) = common::create_test_app();

    let payload = json!({
        "responseId": "resp-1",
        "session": "projects/ora-agent-test/agent/sessions/abc",
        "queryResult": {
            "queryText": "afegeix piano dilluns a les nou",
            "parameters": {
                "title": {"stringValue": "Piano"},
                "day": ["dilluns"],
                "time": "2025-06-02T09:00:00+02:00"
            },
            "intent": {"displayName": "AfegirHorari"}
        }
    });

    let response = app
        .oneshot(fulfillment_request(&state.config.webhook_path_uuid, &payload))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;
    assert_eq!(
        json["fulfillmentText"],
        "Activitat \"Piano\" afegida per Dilluns a les 09:00."
    );
}

#[tokio::test]
async fn test_webhook_asks_for_missing_fields() {
    let (app, state) = common::create_test_app();

    let payload = json!({
        "queryResult": {
            "parameters": {"title": "Piano", "day": "dilluns", "hour": ""},
            "intent": {"displayName": "AfegirHorari"}
        }
    });

    let response = app
        .oneshot(fulfillment_request(&state.config.webhook_path_uuid, &payload))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;
    assert_eq!(
        json["fulfillmentText"],
        "Ho sento, necessito el títol, el dia i l'hora per afegir l'activitat."
    );
}

#[tokio::test]
async fn test_webhook_other_intent() {
    let (app, state) = common::create_test_app();

    let payload = json!({
        "queryResult": {"intent": {"displayName": "Default Fallback Intent"}}
    });

    let response = app
        .oneshot(fulfillment_request(&state.config.webhook_path_uuid, &payload))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;
    assert_eq!(json["fulfillmentText"], "No he entès la petició del webhook.");
}
