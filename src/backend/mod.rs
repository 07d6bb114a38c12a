//! Backend Module
//!
//! This module contains all server-side code: the Axum HTTP server, the
//! authentication core and the routes it protects.
//!
//! # Architecture
//!
//! - **`server`** - Server initialization, application state, configuration
//! - **`routes`** - HTTP route configuration and router assembly
//! - **`auth`** - Credential verification, token issuing and validation, ownership checks
//! - **`posts`** - Routes gated by ownership or admin rights
//! - **`middleware`** - Bearer token middleware and caller extractor
//! - **`error`** - Backend-specific error types
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── main.rs         - Server binary
//! ├── server/         - Server initialization and state
//! ├── routes/         - Route configuration
//! ├── auth/           - Authentication
//! ├── posts/          - Post and admin handlers
//! ├── middleware/     - Request middleware
//! └── error/          - Error types
//! ```
//!
//! # Error Handling
//!
//! Every failure becomes a `BackendError` (or `AuthError`) and is rendered
//! as `{"error": <message>, "status": <code>}`. Internal failures are logged
//! with their detail and returned with a generic message.
//!
//! # Example
//!
//! ```rust,no_run
//! use social_auth::backend::server::create_app;
//! use social_auth::shared::AuthConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AuthConfig::from_env()?;
//! let app = create_app(config).await;
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:3001").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Backend error types
pub mod error;

/// Authentication and user management
pub mod auth;

/// Ownership-gated and admin routes
pub mod posts;

/// Middleware for request processing
pub mod middleware;

/// Re-export commonly used types
pub use error::{AuthError, BackendError};
pub use server::{build_app, create_app};
