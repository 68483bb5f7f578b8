//! Identity provider data models

use serde::{Deserialize, Serialize};

/// Verified caller identity returned by the identity provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifiedUser {
    /// Stable user identifier
    pub uid: String,
}
