//! Middleware Module
//!
//! Request middleware for the backend server.

/// Bearer token validation
pub mod auth;

pub use auth::{require_token, AuthUser};
