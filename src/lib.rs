//! Postforge - web backend for AI-assisted social content generation
//!
//! This library wires together the HTTP surface: page serving, a proxy
//! to the external generation API, bearer-token identity resolution and
//! a per-user in-memory usage limit.

pub mod config;
pub mod error;
pub mod generation;
pub mod identity;
pub mod routes;
pub mod uploads;
pub mod usage;

use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;

pub use crate::config::Config;
pub use crate::generation::GenerationClient;
pub use crate::identity::IdentityClient;
pub use crate::usage::UsageTracker;

/// Application state shared across all request handlers
pub struct AppState {
    pub config: Config,
    pub start_time: Instant,
    pub generation_client: GenerationClient,
    pub identity_client: IdentityClient,
    pub usage_tracker: Arc<UsageTracker>,
}

impl AppState {
    /// Create a new application state
    pub fn new(config: Config) -> Result<Self> {
        // One pooled HTTP client shared by both outbound integrations
        let http_client = reqwest::Client::builder().build()?;

        let generation_client = GenerationClient::new(http_client.clone(), &config);
        let identity_client = IdentityClient::new(http_client, &config);
        let usage_tracker = Arc::new(UsageTracker::new(
            config.usage_limit,
            config.usage_window_seconds,
        ));

        Ok(Self {
            config,
            start_time: Instant::now(),
            generation_client,
            identity_client,
            usage_tracker,
        })
    }
}
