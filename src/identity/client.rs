//! Identity provider client
//!
//! Token verification is delegated entirely to the external provider:
//! we forward the bearer token and trust the uid it hands back.

use axum::http::{header, HeaderMap};
use reqwest::header::{HeaderValue, AUTHORIZATION};
use tracing::{debug, instrument, warn};

use crate::{
    config::Config,
    error::{AppError, AppResult},
    identity::models::VerifiedUser,
};

/// Extract the bearer token from a request's Authorization header
///
/// Returns `None` when the header is absent; a present but malformed
/// header is the caller's problem to reject.
pub fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
}

/// Client for the external identity provider
pub struct IdentityClient {
    client: reqwest::Client,
    base_url: String,
}

impl IdentityClient {
    /// Create a new identity client
    pub fn new(client: reqwest::Client, config: &Config) -> Self {
        Self {
            client,
            base_url: config.identity_api_url.clone(),
        }
    }

    /// Verify a bearer token, yielding the stable user identifier
    #[instrument(skip_all)]
    pub async fn verify_token(&self, token: &str) -> AppResult<VerifiedUser> {
        let url = format!("{}/v1/verify", self.base_url);

        let auth_value = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|_| AppError::InvalidToken)?;

        let response = self
            .client
            .get(&url)
            .header(AUTHORIZATION, auth_value)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Identity provider unreachable");
                AppError::InvalidToken
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = %status, "Token verification rejected");
            return Err(AppError::InvalidToken);
        }

        let user: VerifiedUser = response.json().await.map_err(|e| {
            warn!(error = %e, "Malformed identity provider response");
            AppError::InvalidToken
        })?;

        debug!(uid = %user.uid, "Token verified");
        Ok(user)
    }
}
