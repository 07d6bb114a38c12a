//! Social Auth - Authentication core for a social-media API
//!
//! This library verifies user credentials, issues signed access and refresh
//! tokens, validates bearer tokens on incoming requests and decides whether
//! a caller may act on a resource it does not own.
//!
//! # Module Structure
//!
//! - **`shared`** - Types with no server dependency
//!   - Identity and credential records
//!   - Auth configuration
//!   - Validation errors
//!
//! - **`backend`** - Axum server and auth core
//!   - Token issuer and validator
//!   - Bearer middleware and ownership checks
//!   - User and post stores (PostgreSQL or in-memory)
//!
//! # Usage
//!
//! ```rust,no_run
//! use social_auth::backend::server::init::create_app;
//! use social_auth::shared::AuthConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AuthConfig::from_env()?;
//! let app = create_app(config).await;
//! # Ok(())
//! # }
//! ```

/// Shared types
pub mod shared;

/// Server-side code
pub mod backend;
