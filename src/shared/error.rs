//! Shared Error Types
//!
//! This module defines input errors raised before any request reaches the
//! auth core, such as malformed registration payloads.
//!
//! # Usage
//!
//! ```rust
//! use social_auth::shared::error::SharedError;
//!
//! let error = SharedError::validation("email", "Invalid email address");
//! ```
use thiserror::Error;

/// Shared error types
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SharedError {
    /// Data validation error
    #[error("Validation error in field '{field}': {message}")]
    ValidationError {
        /// The field that failed validation
        field: String,
        /// Human-readable error message
        message: String,
    },
}

impl SharedError {
    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Message safe to return to clients
    pub fn message(&self) -> String {
        match self {
            Self::ValidationError { message, .. } => message.clone(),
        }
    }
}
