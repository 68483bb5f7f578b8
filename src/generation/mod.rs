//! Generation service integration module
//!
//! Client for the external chat-completion API that turns prompts into text.

pub mod client;
pub mod models;

pub use client::GenerationClient;
pub use models::*;
