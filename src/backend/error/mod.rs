//! Backend Error Module
//!
//! This module defines the error types used by the auth core and the HTTP
//! handlers, and their conversion into HTTP responses.
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - AuthError, StoreError, BackendError
//! └── conversion.rs - IntoResponse implementations
//! ```
//!
//! Errors propagate with `?` up to the handler and are translated to a
//! response only at that boundary.

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

// Re-export commonly used types
pub use types::{AuthError, BackendError, StoreError};
