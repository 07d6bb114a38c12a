/**
 * API Route Handlers
 *
 * This module defines the API endpoint groups. Each protected group gets
 * its own `require_token` layer, so the validation options are fixed where
 * the routes are declared.
 *
 * # Routes
 *
 * ## Authentication
 * - `POST /api/v1/register` - User registration
 * - `POST /api/v1/login` - User login
 * - `POST /api/v1/refresh` - Refresh access token
 * - `GET /api/v1/me` - Get current user info
 *
 * ## Resources
 * - `POST /api/v1/posts` - Create a post
 * - `PUT /api/v1/posts/{post_id}` - Update a post
 * - `DELETE /api/v1/posts/{post_id}` - Delete a post
 * - `GET /api/v1/users/{user_id}` - Get a user (admin only)
 */

use axum::{
    middleware::from_fn_with_state,
    routing::{get, post, put},
    Router,
};

use crate::backend::auth::validator::ValidationOptions;
use crate::backend::auth::{get_me, login, refresh, register};
use crate::backend::middleware::require_token;
use crate::backend::posts::{create_post, delete_post, get_user, update_post};
use crate::backend::server::state::AppState;

/// Configure API routes
///
/// # Authentication
///
/// - `/api/v1/me`, `/api/v1/posts` and `/api/v1/posts/{post_id}` - Require a valid access token
/// - `/api/v1/users/{user_id}` - Requires a valid admin access token
///
/// Other routes are public.
pub fn configure_api_routes(router: Router<AppState>, app_state: &AppState) -> Router<AppState> {
    let public: Router<AppState> = Router::new()
        .route("/api/v1/register", post(register))
        .route("/api/v1/login", post(login))
        .route("/api/v1/refresh", post(refresh));

    let authenticated: Router<AppState> = Router::new()
        .route("/api/v1/me", get(get_me))
        .route("/api/v1/posts", post(create_post))
        .route("/api/v1/posts/{post_id}", put(update_post).delete(delete_post))
        .route_layer(from_fn_with_state(
            (app_state.validator.clone(), ValidationOptions::any_user()),
            require_token,
        ));

    let admin: Router<AppState> = Router::new()
        .route("/api/v1/users/{user_id}", get(get_user))
        .route_layer(from_fn_with_state(
            (app_state.validator.clone(), ValidationOptions::admin_only()),
            require_token,
        ));

    router.merge(public).merge(authenticated).merge(admin)
}
