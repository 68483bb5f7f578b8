//! Generation service client
//!
//! HTTP client for the external chat-completion API. One prompt in,
//! generated text out; every failure mode surfaces as an upstream error.

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use tracing::{debug, error, instrument};

use crate::{
    config::Config,
    error::{AppError, AppResult},
    generation::models::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage},
};

/// Client for the external generation (chat-completion) API
pub struct GenerationClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl GenerationClient {
    /// Create a new generation client
    pub fn new(client: reqwest::Client, config: &Config) -> Self {
        Self {
            client,
            base_url: config.openrouter_api_url.clone(),
            api_key: config.openrouter_api_key.clone(),
            model: config.model.clone(),
        }
    }

    /// Send a prompt to the generation service and return the generated text
    #[instrument(skip(self, prompt), fields(max_tokens = max_tokens))]
    pub async fn complete(&self, prompt: &str, max_tokens: u32) -> AppResult<String> {
        let url = format!("{}/chat/completions", self.base_url);

        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage::user(prompt)],
            max_tokens,
        };

        debug!(url = %url, model = %self.model, "Sending completion request");

        let response = self
            .client
            .post(&url)
            .headers(self.auth_headers())
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        debug!(status = %status, "Generation service response status");

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            error!(status = %status, body = %text, "Generation request failed");
            return Err(AppError::Upstream(format!(
                "Generation service error {}: {}",
                status, text
            )));
        }

        let body = response.text().await?;

        let result: ChatCompletionResponse = match serde_json::from_str(&body) {
            Ok(r) => r,
            Err(e) => {
                error!(error = %e, body = %body, "Failed to parse generation response");
                return Err(AppError::Upstream(format!(
                    "Failed to parse generation response: {}",
                    e
                )));
            }
        };

        let output = result
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| {
                error!("Generation response contained no choices");
                AppError::Upstream("Generation response contained no choices".to_string())
            })?;

        debug!(output_len = output.len(), "Completion request succeeded");
        Ok(output)
    }

    fn auth_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Ok(value) = HeaderValue::from_str(&format!("Bearer {}", self.api_key)) {
            headers.insert(AUTHORIZATION, value);
        }
        headers
    }
}
