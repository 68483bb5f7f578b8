//! Page routes
//!
//! Serves pre-rendered HTML pages from the configured pages directory.
//! Rendering and templating live outside this backend; these handlers
//! only hand the files over.

use std::path::Path;
use std::sync::Arc;

use axum::{extract::State, response::Html};

use crate::{
    error::{AppError, AppResult},
    AppState,
};

async fn render(state: &AppState, page: &str) -> AppResult<Html<String>> {
    let path = Path::new(&state.config.pages_dir).join(page);
    let contents = tokio::fs::read_to_string(&path)
        .await
        .map_err(|_| AppError::NotFound(format!("Page not found: {}", page)))?;
    Ok(Html(contents))
}

pub async fn home(State(state): State<Arc<AppState>>) -> AppResult<Html<String>> {
    render(&state, "index.html").await
}

pub async fn welcome(State(state): State<Arc<AppState>>) -> AppResult<Html<String>> {
    render(&state, "welcome.html").await
}

pub async fn tools(State(state): State<Arc<AppState>>) -> AppResult<Html<String>> {
    render(&state, "index.html").await
}

pub async fn analyzer(State(state): State<Arc<AppState>>) -> AppResult<Html<String>> {
    render(&state, "analyzer.html").await
}

pub async fn dashboard(State(state): State<Arc<AppState>>) -> AppResult<Html<String>> {
    render(&state, "dashboard.html").await
}

pub async fn about(State(state): State<Arc<AppState>>) -> AppResult<Html<String>> {
    render(&state, "about.html").await
}

pub async fn login(State(state): State<Arc<AppState>>) -> AppResult<Html<String>> {
    render(&state, "login.html").await
}

pub async fn register(State(state): State<Arc<AppState>>) -> AppResult<Html<String>> {
    render(&state, "register.html").await
}

pub async fn profile(State(state): State<Arc<AppState>>) -> AppResult<Html<String>> {
    render(&state, "profile.html").await
}
