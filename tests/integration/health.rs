//! Health endpoint and page serving tests

use pretty_assertions::assert_eq;
use serde_json::Value;

use crate::common::spawn_app;

#[tokio::test]
async fn test_health_check() {
    let app = spawn_app().await;

    let response = app.server.get("/health").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert!(body["uptime_seconds"].as_u64().is_some());
    assert!(body["version"].as_str().is_some());
}

#[tokio::test]
async fn test_home_page_serves_html() {
    let app = spawn_app().await;

    let response = app.server.get("/").await;

    response.assert_status_ok();
    assert!(response.text().contains("<!DOCTYPE html>"));
}

#[tokio::test]
async fn test_static_fallback_serves_assets() {
    let app = spawn_app().await;

    let response = app.server.get("/css/styles.css").await;

    response.assert_status_ok();
}
