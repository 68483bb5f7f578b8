//! Configuration management for Postforge
//!
//! Configuration is loaded from environment variables.

use anyhow::{Context, Result};
use std::env;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,

    /// OpenRouter API base URL
    pub openrouter_api_url: String,
    /// OpenRouter API key (required, the backend cannot run without it)
    pub openrouter_api_key: String,
    /// Model identifier sent with every completion request
    pub model: String,

    /// Identity provider base URL for bearer token verification
    pub identity_api_url: String,

    /// Directory holding the HTML pages served by the page routes
    pub pages_dir: String,
    /// Directory served by the static-file fallback
    pub static_dir: String,
    /// Directory where uploaded images are persisted
    pub upload_dir: String,

    /// Maximum accepted uses per identifier within one window
    pub usage_limit: usize,
    /// Length of the rolling usage window (in seconds)
    pub usage_window_seconds: u64,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            host: env::var("POSTFORGE_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("Invalid PORT")?,

            openrouter_api_url: env::var("OPENROUTER_API_URL")
                .unwrap_or_else(|_| "https://openrouter.ai/api/v1".to_string()),
            openrouter_api_key: env::var("OPENROUTER_API_KEY")
                .context("OPENROUTER_API_KEY must be set")?,
            model: env::var("POSTFORGE_MODEL")
                .unwrap_or_else(|_| "meta-llama/llama-3.3-70b-instruct:free".to_string()),

            identity_api_url: env::var("IDENTITY_API_URL")
                .unwrap_or_else(|_| "http://localhost:9100".to_string()),

            pages_dir: env::var("PAGES_DIR").unwrap_or_else(|_| "templates".to_string()),
            static_dir: env::var("STATIC_DIR").unwrap_or_else(|_| "static".to_string()),
            upload_dir: env::var("UPLOAD_DIR")
                .unwrap_or_else(|_| "static/uploads".to_string()),

            usage_limit: env::var("USAGE_LIMIT")
                .unwrap_or_else(|_| "5".to_string())
                .parse()
                .context("Invalid USAGE_LIMIT")?,
            usage_window_seconds: env::var("USAGE_WINDOW_SECONDS")
                .unwrap_or_else(|_| "10800".to_string())
                .parse()
                .context("Invalid USAGE_WINDOW_SECONDS")?,
        })
    }
}
