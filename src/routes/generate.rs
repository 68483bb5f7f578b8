//! Content generation endpoint
//!
//! Validates the request, checks the shared usage allowance, forwards a
//! prompt to the generation service and reports the updated usage.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::{
    error::{AppError, AppResult},
    usage::UsageSnapshot,
    AppState,
};

/// Identity used for callers of the generation endpoint.
///
/// The endpoint is open, so all callers draw from one shared allowance.
pub const SHARED_IDENTITY: &str = "guest_user";

/// Output length cap requested from the generation service
const MAX_OUTPUT_TOKENS: u32 = 500;

fn default_content_type() -> String {
    "Caption".to_string()
}

fn default_tone() -> String {
    "Friendly".to_string()
}

fn default_platform() -> String {
    "Instagram".to_string()
}

/// Request body for content generation
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateRequest {
    #[serde(default)]
    pub business: String,
    #[serde(default = "default_content_type")]
    pub content_type: String,
    #[serde(default = "default_tone")]
    pub tone: String,
    #[serde(default = "default_platform")]
    pub platform: String,
}

/// Response body for content generation
#[derive(Debug, Clone, Serialize)]
pub struct GenerateResponse {
    pub output: String,
    pub usage: UsageSnapshot,
}

/// Build the natural-language instruction for the generation service
fn build_prompt(request: &GenerateRequest) -> String {
    format!(
        "Create a {} for a {} business.\n\
         Tone: {}\n\
         Platform: {}.\n\
         Include hashtags if it's a caption.",
        request.content_type, request.business, request.tone, request.platform
    )
}

/// Handle content generation requests
///
/// The body is taken as an extractor result so a malformed JSON payload
/// surfaces through the standard error envelope instead of axum's
/// plain-text rejection.
pub async fn generate_content(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> AppResult<Json<GenerateResponse>> {
    let Json(request) = payload.map_err(AppError::InvalidJson)?;

    if request.business.trim().is_empty() {
        return Err(AppError::BadRequest(
            "Please provide a business niche.".to_string(),
        ));
    }

    let snapshot = state.usage_tracker.get_usage(SHARED_IDENTITY);
    if !state.usage_tracker.can_use(SHARED_IDENTITY) {
        warn!(
            count = snapshot.count,
            reset_in = snapshot.reset_in,
            "Generation request over the usage limit"
        );
        return Err(AppError::UsageLimitExceeded {
            limit: snapshot.max as i64,
            used: snapshot.count as i64,
            reset_in: snapshot.reset_in,
        });
    }

    let prompt = build_prompt(&request);
    let output = state
        .generation_client
        .complete(&prompt, MAX_OUTPUT_TOKENS)
        .await?;

    // One use per accepted generation, recorded only after the upstream call
    // succeeded.
    state.usage_tracker.record_use(SHARED_IDENTITY);
    let usage = state.usage_tracker.get_usage(SHARED_IDENTITY);

    info!(
        business = %request.business,
        platform = %request.platform,
        count = usage.count,
        "Generated content"
    );

    Ok(Json(GenerateResponse { output, usage }))
}
