//! HTTP routes for Postforge
//!
//! This module defines all HTTP endpoints exposed by the backend.

pub mod analyze;
pub mod generate;
pub mod health;
pub mod pages;
pub mod usage;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::AppState;

/// Create the main application router
pub fn create_router(state: Arc<AppState>) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/api/generate_content", post(generate::generate_content))
        .route("/api/analyze_image", post(analyze::analyze_image))
        .route("/api/usage", get(usage::usage));

    // Page routes return rendered HTML; anything else falls through to
    // the static-file directory.
    let page_routes = Router::new()
        .route("/", get(pages::home))
        .route("/welcome", get(pages::welcome))
        .route("/tools", get(pages::tools))
        .route("/analyzer", get(pages::analyzer))
        .route("/dashboard", get(pages::dashboard))
        .route("/about", get(pages::about))
        .route("/login", get(pages::login))
        .route("/register", get(pages::register))
        .route("/profile", get(pages::profile));

    Router::new()
        .route("/health", get(health::health_check))
        .merge(api_routes)
        .merge(page_routes)
        .fallback_service(ServeDir::new(&state.config.static_dir))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
