//! Usage reporting endpoint
//!
//! Returns the caller's current usage snapshot. Requires a verified
//! bearer credential.

use std::sync::Arc;

use axum::{extract::State, http::HeaderMap, Json};
use tracing::debug;

use crate::{
    error::{AppError, AppResult},
    identity::extract_bearer_token,
    usage::UsageSnapshot,
    AppState,
};

/// Handle usage snapshot requests
pub async fn usage(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> AppResult<Json<UsageSnapshot>> {
    let token = extract_bearer_token(&headers).ok_or(AppError::Unauthorized)?;
    let user = state.identity_client.verify_token(token).await?;

    let snapshot = state.usage_tracker.get_usage(&user.uid);
    debug!(uid = %user.uid, count = snapshot.count, "Reported usage");

    Ok(Json(snapshot))
}
