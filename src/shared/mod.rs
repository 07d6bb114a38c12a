//! Shared Module
//!
//! This module contains types used on both sides of the auth core: identity
//! records, posts, configuration and input validation errors. None of them depend
//! on the HTTP layer.

/// Identity and credential types
pub mod identity;

/// Post types
pub mod post;

/// Shared error types
pub mod error;

/// Authentication configuration
pub mod config;

/// Re-export commonly used types for convenience
pub use identity::{CallerIdentity, CredentialRecord, Identity, NewCredential};
pub use error::SharedError;
pub use post::{NewPost, Post, PostChanges};
pub use config::{AuthConfig, AuthConfigBuilder, ConfigError};
