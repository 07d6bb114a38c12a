/**
 * Server Initialization
 *
 * This module builds the application state and router.
 *
 * # Initialization Process
 *
 * 1. Load the optional database
 * 2. Choose Postgres or in-memory stores
 * 3. Build the state from the auth configuration
 * 4. Create and configure the router
 */

use axum::Router;
use std::sync::Arc;

use crate::backend::auth::resources::{InMemoryPostStore, PgPostStore, PostStore};
use crate::backend::auth::users::{InMemoryUserStore, PgUserStore, UserStore};
use crate::backend::routes::router::create_router;
use crate::backend::server::config::load_database;
use crate::backend::server::state::AppState;
use crate::shared::AuthConfig;

/// Create and configure the Axum application
///
/// Uses PostgreSQL when `DATABASE_URL` is set and reachable, in-memory
/// stores otherwise.
pub async fn create_app(config: AuthConfig) -> Router<()> {
    tracing::info!("Initializing social-auth backend server");

    let (users, posts): (Arc<dyn UserStore>, Arc<dyn PostStore>) = match load_database().await {
        Some(pool) => (
            Arc::new(PgUserStore::new(pool.clone())),
            Arc::new(PgPostStore::new(pool)),
        ),
        None => (
            Arc::new(InMemoryUserStore::new()),
            Arc::new(InMemoryPostStore::new()),
        ),
    };

    build_app(config, users, posts)
}

/// Build the router over explicit stores
pub fn build_app(config: AuthConfig, users: Arc<dyn UserStore>, posts: Arc<dyn PostStore>) -> Router<()> {
    tracing::debug!("Auth configuration: {:?}", config);
    let app_state = AppState::new(&config, users, posts);
    create_router(app_state)
}
