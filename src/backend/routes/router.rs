/**
 * Router Configuration
 *
 * This module provides the main router creation function that combines
 * all route configurations into a single Axum router.
 *
 * # Route Order
 *
 * 1. API routes (public, authenticated, admin)
 * 2. Request tracing
 * 3. Fallback handler (404)
 */

use axum::{http::StatusCode, Router};
use tower_http::trace::TraceLayer;

use crate::backend::error::conversion::status_response;
use crate::backend::routes::api_routes::configure_api_routes;
use crate::backend::server::state::AppState;

/// Create the Axum router with all routes configured
///
/// # Arguments
///
/// * `app_state` - Application state containing the auth service, token
///   validator and stores
///
/// # Returns
///
/// Configured Axum Router ready to serve requests
///
/// ## Fallback
///
/// Unknown routes get a JSON 404 in the same shape as other errors.
pub fn create_router(app_state: AppState) -> Router<()> {
    let router = configure_api_routes(Router::new(), &app_state);

    let router = router
        .fallback(|| async { status_response(StatusCode::NOT_FOUND, "Not found") })
        .layer(TraceLayer::new_for_http());

    router.with_state(app_state)
}
