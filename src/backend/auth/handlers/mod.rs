//! Authentication Handlers Module
//!
//! This module contains all HTTP handlers for authentication endpoints.
//!
//! # Module Structure
//!
//! ```text
//! handlers/
//! ├── mod.rs      - Module exports and documentation
//! ├── types.rs    - Request and response types
//! ├── register.rs - User registration handler
//! ├── login.rs    - User authentication handler
//! ├── refresh.rs  - Access token refresh handler
//! └── me.rs       - Get current user handler
//! ```
//!
//! # Handlers
//!
//! - **`register`** - POST /api/v1/register - User registration
//! - **`login`** - POST /api/v1/login - User authentication
//! - **`refresh`** - POST /api/v1/refresh - New access token from a refresh token
//! - **`get_me`** - GET /api/v1/me - Get current user info

/// Request and response types
pub mod types;

/// Register handler
pub mod register;

/// Login handler
pub mod login;

/// Refresh handler
pub mod refresh;

/// Get current user handler
pub mod me;

// Re-export commonly used types
pub use types::{DataResponse, LoginRequest, LoginResponse, RefreshRequest, RefreshResponse, RegisterRequest};

// Re-export handlers
pub use login::login;
pub use me::get_me;
pub use refresh::refresh;
pub use register::register;
