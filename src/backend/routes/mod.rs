//! Route Configuration Module
//!
//! This module configures all HTTP routes for the backend server.
//! Routes are organized by functionality into focused submodules.
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs          - Module exports and documentation
//! ├── router.rs       - Main router creation
//! └── api_routes.rs   - API endpoint groups and their token layers
//! ```
//!
//! # Route Types
//!
//! ## Public
//!
//! - `POST /api/v1/register` - User registration
//! - `POST /api/v1/login` - User login
//! - `POST /api/v1/refresh` - New access token from a refresh token
//!
//! ## Any authenticated user
//!
//! - `GET /api/v1/me` - Get current user
//! - `POST /api/v1/posts` - Create a post authored by the caller
//! - `PUT /api/v1/posts/{post_id}` - Update a post (owner or admin)
//! - `DELETE /api/v1/posts/{post_id}` - Delete a post (owner or admin)
//!
//! ## Admin only
//!
//! - `GET /api/v1/users/{user_id}` - Get any user's identity

/// Main router creation
pub mod router;

/// API endpoint handlers
pub mod api_routes;

// Re-export commonly used functions
pub use router::create_router;
