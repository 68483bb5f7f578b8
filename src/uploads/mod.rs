//! Upload handling
//!
//! Persists uploaded images under sanitized, collision-free names.

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::debug;
use uuid::Uuid;

use crate::error::AppResult;

/// Sanitize a client-supplied filename for storage on the local filesystem.
///
/// Path components are stripped and anything outside `[A-Za-z0-9._-]` is
/// replaced with an underscore. An empty or all-dots result falls back to
/// `upload`.
pub fn sanitize_filename(name: &str) -> String {
    let base = name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(name);

    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect();

    let trimmed = cleaned.trim_matches(['.', '_']).to_string();
    if trimmed.is_empty() {
        "upload".to_string()
    } else {
        trimmed
    }
}

/// Persist uploaded bytes under `upload_dir`, returning the stored path.
///
/// The stored name is prefixed with a UUID so concurrent uploads of the
/// same filename never clobber each other.
pub async fn save_upload(upload_dir: &str, filename: &str, data: &[u8]) -> AppResult<PathBuf> {
    let stored_name = format!("{}_{}", Uuid::new_v4(), sanitize_filename(filename));
    let path = Path::new(upload_dir).join(&stored_name);

    tokio::fs::write(&path, data)
        .await
        .with_context(|| format!("Failed to write upload to {}", path.display()))?;

    debug!(path = %path.display(), bytes = data.len(), "Stored uploaded file");
    Ok(path)
}
