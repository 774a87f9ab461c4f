//! Academic Records API
//!
//! HTTP layer over `records_core`:
//! - CRUD endpoints for students, careers and categories
//! - Static bearer-token authentication
//! - Environment-based configuration

pub mod api;
pub mod auth;
pub mod config;
pub mod error;

pub use api::*;
pub use config::Config;
pub use error::{ApiError, ErrorBody, MessageBody};
