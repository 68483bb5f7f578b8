//! Image analysis endpoint
//!
//! Accepts an uploaded image plus context, persists the file, asks the
//! generation service for a writeup and reports per-dimension scores.
//! The scores are decorative: they come from pattern-matching the model
//! text, with a fixed fallback when the text does not mention a
//! dimension.

use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    http::HeaderMap,
    Json,
};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use tracing::{info, warn};

use crate::{
    error::{AppError, AppResult},
    identity::extract_bearer_token,
    uploads::save_upload,
    usage::UsageSnapshot,
    AppState,
};

/// Output length cap requested from the generation service
const MAX_OUTPUT_TOKENS: u32 = 400;

/// Score reported for a dimension the model text never mentions
const FALLBACK_SCORE: u8 = 75;

static SCORE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(visual|emotional|engagement|branding)\b[^0-9]{0,20}?(\d{1,3})")
        .expect("score pattern is valid")
});

/// Per-dimension scores plus the raw model writeup
#[derive(Debug, Clone, Serialize)]
pub struct Scores {
    pub visual: u8,
    pub emotional: u8,
    pub engagement: u8,
    pub branding: u8,
    pub analysis: String,
}

/// Usage reported to the caller: a tracked snapshot for verified users,
/// a guest marker otherwise
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum UsageInfo {
    Tracked(UsageSnapshot),
    Guest { guest: bool },
}

/// Response body for image analysis
#[derive(Debug, Clone, Serialize)]
pub struct AnalyzeResponse {
    pub scores: Scores,
    pub usage: UsageInfo,
}

/// Fields collected from the multipart form
#[derive(Debug, Default)]
struct AnalyzeForm {
    image: Option<(String, Vec<u8>)>,
    caption: String,
    platform: Option<String>,
}

async fn read_form(mut multipart: Multipart) -> AppResult<AnalyzeForm> {
    let mut form = AnalyzeForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {}", e)))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "image" => {
                let filename = field.file_name().unwrap_or("upload").to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Failed to read image: {}", e)))?;
                form.image = Some((filename, data.to_vec()));
            }
            "caption" => {
                form.caption = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Failed to read caption: {}", e)))?;
            }
            "platform" => {
                form.platform = Some(field.text().await.map_err(|e| {
                    AppError::BadRequest(format!("Failed to read platform: {}", e))
                })?);
            }
            _ => {}
        }
    }

    Ok(form)
}

/// Pull a dimension score out of the model's text, clamped to 0..=100
fn extract_scores(text: &str) -> (u8, u8, u8, u8) {
    let mut visual = FALLBACK_SCORE;
    let mut emotional = FALLBACK_SCORE;
    let mut engagement = FALLBACK_SCORE;
    let mut branding = FALLBACK_SCORE;

    for caps in SCORE_RE.captures_iter(text) {
        let value: u32 = match caps[2].parse() {
            Ok(v) => v,
            Err(_) => continue,
        };
        let value = value.min(100) as u8;
        match caps[1].to_ascii_lowercase().as_str() {
            "visual" => visual = value,
            "emotional" => emotional = value,
            "engagement" => engagement = value,
            "branding" => branding = value,
            _ => {}
        }
    }

    (visual, emotional, engagement, branding)
}

/// Handle image analysis requests
///
/// A bearer credential is optional: verified callers are usage-limited
/// under their own identifier, anonymous callers are not limited at all.
pub async fn analyze_image(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    multipart: Multipart,
) -> AppResult<Json<AnalyzeResponse>> {
    let uid = match headers.get(axum::http::header::AUTHORIZATION) {
        Some(_) => {
            let token = extract_bearer_token(&headers).ok_or(AppError::InvalidToken)?;
            Some(state.identity_client.verify_token(token).await?.uid)
        }
        None => None,
    };

    if let Some(uid) = &uid {
        let snapshot = state.usage_tracker.get_usage(uid);
        if !state.usage_tracker.can_use(uid) {
            warn!(uid = %uid, reset_in = snapshot.reset_in, "Analysis request over the usage limit");
            return Err(AppError::UsageLimitExceeded {
                limit: snapshot.max as i64,
                used: snapshot.count as i64,
                reset_in: snapshot.reset_in,
            });
        }
    }

    let form = read_form(multipart).await?;

    let (filename, data) = form
        .image
        .ok_or_else(|| AppError::BadRequest("No image uploaded".to_string()))?;
    if data.is_empty() {
        return Err(AppError::BadRequest("No image uploaded".to_string()));
    }

    let stored_path = save_upload(&state.config.upload_dir, &filename, &data).await?;

    let platform = form.platform.unwrap_or_else(|| "General".to_string());
    let prompt = format!(
        "Analyze this image for {}.\nCaption: \"{}\"",
        platform, form.caption
    );

    let analysis = state
        .generation_client
        .complete(&prompt, MAX_OUTPUT_TOKENS)
        .await?;

    let (visual, emotional, engagement, branding) = extract_scores(&analysis);

    let usage = match &uid {
        Some(uid) => {
            state.usage_tracker.record_use(uid);
            UsageInfo::Tracked(state.usage_tracker.get_usage(uid))
        }
        None => UsageInfo::Guest { guest: true },
    };

    info!(
        uid = %uid.as_deref().unwrap_or("guest"),
        platform = %platform,
        stored = %stored_path.display(),
        "Analyzed image"
    );

    Ok(Json(AnalyzeResponse {
        scores: Scores {
            visual,
            emotional,
            engagement,
            branding,
            analysis,
        },
        usage,
    }))
}
