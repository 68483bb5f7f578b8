//! Error types for Postforge
//!
//! This module defines custom error types used throughout the application.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Application-level errors
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Authentication required")]
    Unauthorized,

    #[error("Invalid authentication token")]
    InvalidToken,

    #[error("Usage limit reached")]
    UsageLimitExceeded {
        limit: i64,
        used: i64,
        reset_in: i64,
    },

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("HTTP client error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Invalid JSON in request: {0}")]
    InvalidJson(#[from] JsonRejection),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

/// Error details
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<ErrorDetails>,
}

/// Additional error details for usage limiting
#[derive(Debug, Serialize)]
pub struct ErrorDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub used: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reset_in: Option<i64>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = match &self {
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                self.to_string(),
                None,
            ),
            AppError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                "INVALID_TOKEN",
                self.to_string(),
                None,
            ),
            AppError::UsageLimitExceeded {
                limit,
                used,
                reset_in,
            } => (
                StatusCode::FORBIDDEN,
                "USAGE_LIMIT_REACHED",
                self.to_string(),
                Some(ErrorDetails {
                    limit: Some(*limit),
                    used: Some(*used),
                    reset_in: Some(*reset_in),
                }),
            ),
            AppError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                "BAD_REQUEST",
                msg.clone(),
                None,
            ),
            AppError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                msg.clone(),
                None,
            ),
            AppError::Upstream(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "UPSTREAM_ERROR",
                msg.clone(),
                None,
            ),
            AppError::HttpError(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "UPSTREAM_ERROR",
                format!("Generation service request failed: {}", e),
                None,
            ),
            AppError::InvalidJson(rejection) => (
                StatusCode::BAD_REQUEST,
                "INVALID_JSON",
                rejection.body_text(),
                None,
            ),
            AppError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "Internal server error".to_string(),
                None,
            ),
        };

        let body = ErrorResponse {
            error: ErrorBody {
                code: code.to_string(),
                message,
                details,
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;
