/**
 * Application State Management
 *
 * This module defines the application state structure and implements
 * the necessary `FromRef` traits for Axum state extraction.
 *
 * # Thread Safety
 *
 * Nothing in the state is mutated after startup. The token keys and
 * service are read-only, and the stores handle their own synchronization.
 */

use axum::extract::FromRef;
use std::sync::Arc;

use crate::backend::auth::resources::PostStore;
use crate::backend::auth::service::AuthService;
use crate::backend::auth::users::UserStore;
use crate::backend::auth::validator::TokenValidator;
use crate::shared::AuthConfig;

/// Application state shared by every handler
#[derive(Clone)]
pub struct AppState {
    /// Register, login and refresh operations
    pub auth: AuthService,

    /// Access token validator used by the token middleware
    pub validator: TokenValidator,

    /// Post persistence and ownership lookup
    pub posts: Arc<dyn PostStore>,
}

impl AppState {
    pub fn new(config: &AuthConfig, users: Arc<dyn UserStore>, posts: Arc<dyn PostStore>) -> Self {
        Self {
            auth: AuthService::new(config, users),
            validator: TokenValidator::new(config),
            posts,
        }
    }
}

impl FromRef<AppState> for AuthService {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.auth.clone()
    }
}

impl FromRef<AppState> for Arc<dyn PostStore> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.posts.clone()
    }
}
