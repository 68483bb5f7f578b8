//! Usage tracking module
//!
//! In-memory per-identifier usage limiting with a rolling window.

pub mod tracker;

pub use tracker::{UsageSnapshot, UsageTracker};
