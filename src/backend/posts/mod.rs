//! Posts Module
//!
//! Routes that mutate per-user resources or read other users' records.
//! They show both token validation modes and the ownership check:
//!
//! - `POST /api/v1/posts` - any authenticated user, authored by the caller
//! - `PUT /api/v1/posts/{post_id}` - owner or admin
//! - `DELETE /api/v1/posts/{post_id}` - owner or admin
//! - `GET /api/v1/users/{user_id}` - admin only

/// Post and admin user handlers
pub mod handlers;

pub use handlers::{create_post, delete_post, get_user, update_post};
