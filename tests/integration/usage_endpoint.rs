//! Usage snapshot endpoint tests
//!
//! Covers authentication and snapshot reporting for GET /api/usage.

use axum::http::{header, StatusCode};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::common::{constants, generation_mocks, identity_mocks, spawn_app};

#[tokio::test]
async fn test_usage_requires_credential() {
    let app = spawn_app().await;

    let response = app.server.get("/api/usage").await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_usage_rejects_invalid_credential() {
    let app = spawn_app().await;
    identity_mocks::mock_verify_invalid(&app.identity).await;

    let response = app
        .server
        .get("/api/usage")
        .add_header(header::AUTHORIZATION, "Bearer bogus".parse().unwrap())
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "INVALID_TOKEN");
}

#[tokio::test]
async fn test_usage_reports_fresh_snapshot() {
    let app = spawn_app().await;
    identity_mocks::mock_verify_success(&app.identity).await;

    let response = app
        .server
        .get("/api/usage")
        .add_header(
            header::AUTHORIZATION,
            format!("Bearer {}", constants::TEST_TOKEN).parse().unwrap(),
        )
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body, json!({ "count": 0, "max": 5, "reset_in": 0 }));
}

#[tokio::test]
async fn test_shared_generation_identity_does_not_leak_into_user_usage() {
    let app = spawn_app().await;
    identity_mocks::mock_verify_success(&app.identity).await;
    generation_mocks::mock_completion_success(&app.generation, "ok").await;

    // Generation draws from the shared anonymous identity.
    app.server
        .post("/api/generate_content")
        .json(&json!({ "business": "bakery" }))
        .await
        .assert_status_ok();

    let response = app
        .server
        .get("/api/usage")
        .add_header(
            header::AUTHORIZATION,
            format!("Bearer {}", constants::TEST_TOKEN).parse().unwrap(),
        )
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["count"], 0);
}
