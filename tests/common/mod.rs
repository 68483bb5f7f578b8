//! Common test utilities for Postforge
//!
//! Shared fixtures, mock upstreams and helpers used by the integration
//! tests. Each test gets a fresh app (and therefore a fresh usage
//! tracker) plus wiremock servers standing in for the generation API and
//! the identity provider.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use axum_test::TestServer;
use serde_json::json;
use uuid::Uuid;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use postforge::{routes, AppState, Config};

/// Test configuration constants
pub mod constants {
    /// Bearer token accepted by the mock identity provider
    pub const TEST_TOKEN: &str = "test-bearer-token";
    /// Uid the mock identity provider resolves the token to
    pub const TEST_UID: &str = "user_123";
    /// Boundary used for hand-built multipart bodies
    pub const BOUNDARY: &str = "postforge-test-boundary";
}

/// A running test app plus its mock upstreams
pub struct TestApp {
    pub server: TestServer,
    pub generation: MockServer,
    pub identity: MockServer,
    pub upload_dir: PathBuf,
}

/// Spawn a test app with the default limit of 5 uses per window
pub async fn spawn_app() -> TestApp {
    spawn_app_with_limit(5).await
}

/// Spawn a test app with a custom usage limit
pub async fn spawn_app_with_limit(usage_limit: usize) -> TestApp {
    let generation = MockServer::start().await;
    let identity = MockServer::start().await;

    let upload_dir = std::env::temp_dir().join(format!("postforge-it-{}", Uuid::new_v4()));
    std::fs::create_dir_all(&upload_dir).expect("Failed to create upload dir");

    let config = Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        openrouter_api_url: generation.uri(),
        openrouter_api_key: "test-api-key".to_string(),
        model: "test-model".to_string(),
        identity_api_url: identity.uri(),
        pages_dir: "templates".to_string(),
        static_dir: "static".to_string(),
        upload_dir: upload_dir.to_string_lossy().to_string(),
        usage_limit,
        usage_window_seconds: 10800,
    };

    let state = Arc::new(AppState::new(config).expect("Failed to build app state"));
    let server =
        TestServer::new(routes::create_router(state)).expect("Failed to create test server");

    TestApp {
        server,
        generation,
        identity,
        upload_dir,
    }
}

/// Mock generation API responses
pub mod generation_mocks {
    use super::*;

    /// Completion succeeds with the given text
    pub async fn mock_completion_success(server: &MockServer, text: &str) {
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("Authorization", "Bearer test-api-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [
                    {
                        "message": {
                            "role": "assistant",
                            "content": text
                        }
                    }
                ]
            })))
            .mount(server)
            .await;
    }

    /// Upstream returns a server error
    pub async fn mock_completion_failure(server: &MockServer) {
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
            .mount(server)
            .await;
    }

    /// Upstream answers 200 but with no choices
    pub async fn mock_completion_empty(server: &MockServer) {
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
            .mount(server)
            .await;
    }
}

/// Mock identity provider responses
pub mod identity_mocks {
    use super::*;

    /// The test token verifies to the test uid
    pub async fn mock_verify_success(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/v1/verify"))
            .and(header(
                "Authorization",
                format!("Bearer {}", constants::TEST_TOKEN).as_str(),
            ))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "uid": constants::TEST_UID })),
            )
            .mount(server)
            .await;
    }

    /// Any token is rejected
    pub async fn mock_verify_invalid(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/v1/verify"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "error": "invalid token"
            })))
            .mount(server)
            .await;
    }
}

/// Build a multipart/form-data body by hand
///
/// Keeps the tests independent of any multipart client implementation;
/// the boundary is `constants::BOUNDARY`.
pub fn multipart_image_body(
    image: Option<(&str, &[u8])>,
    caption: Option<&str>,
    platform: Option<&str>,
) -> Vec<u8> {
    let boundary = constants::BOUNDARY;
    let mut body: Vec<u8> = Vec::new();

    if let Some((filename, bytes)) = image {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"image\"; filename=\"{}\"\r\n\
                 Content-Type: application/octet-stream\r\n\r\n",
                boundary, filename
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }

    for (name, value) in [("caption", caption), ("platform", platform)] {
        if let Some(value) = value {
            body.extend_from_slice(
                format!(
                    "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                    boundary, name, value
                )
                .as_bytes(),
            );
        }
    }

    body.extend_from_slice(format!("--{}--\r\n", boundary).as_bytes());
    body
}

/// Content-Type header value matching `multipart_image_body`
pub fn multipart_content_type() -> String {
    format!("multipart/form-data; boundary={}", constants::BOUNDARY)
}
