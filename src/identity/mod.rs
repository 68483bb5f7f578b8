//! Identity provider integration module
//!
//! Verifies bearer credentials against the external identity provider.

pub mod client;
pub mod models;

pub use client::{extract_bearer_token, IdentityClient};
pub use models::VerifiedUser;
