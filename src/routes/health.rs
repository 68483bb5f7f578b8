//! Health check endpoint
//!
//! Lightweight status endpoint for monitoring; the backend has no
//! dependencies worth probing at startup, so this only reports uptime.

use std::sync::Arc;

use axum::{extract::State, Json};
use chrono::Utc;
use serde::Serialize;

use crate::AppState;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: String,
    pub uptime_seconds: u64,
    pub timestamp: String,
}

/// Handle health check requests
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        timestamp: Utc::now().to_rfc3339(),
    })
}
