//! Records CLI
//!
//! Terminal client for the academic records API: typed HTTP calls,
//! table rendering, and the confirmation / pick-list prompts.

pub mod client;
pub mod prompt;
pub mod render;

pub use client::{ApiClient, DEFAULT_BASE_URL};
