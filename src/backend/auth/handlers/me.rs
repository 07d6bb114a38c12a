/**
 * Get Current User Handler
 *
 * GET /api/v1/me returns the identity of the authenticated caller. The
 * route sits behind the token middleware, which has already validated the
 * bearer token and attached the caller identity.
 */

use axum::{extract::State, response::Json};

use crate::backend::auth::handlers::types::DataResponse;
use crate::backend::auth::service::AuthService;
use crate::backend::error::BackendError;
use crate::backend::middleware::auth::AuthUser;
use crate::shared::Identity;

/// Get current user handler
///
/// # Errors
///
/// * `401 Unauthorized` - If the token middleware did not run
/// * `404 Not Found` - If the user no longer exists
pub async fn get_me(
    State(service): State<AuthService>,
    AuthUser(caller): AuthUser,
) -> Result<Json<DataResponse<Identity>>, BackendError> {
    let identity = service.current_identity(&caller).await?;
    Ok(Json(DataResponse::new(identity)))
}
