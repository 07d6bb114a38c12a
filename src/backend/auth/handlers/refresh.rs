/**
 * Refresh Handler
 *
 * POST /api/v1/refresh exchanges a refresh token for a new access token.
 * The refresh token itself is not renewed.
 */

use axum::{extract::State, response::Json};

use crate::backend::auth::handlers::types::{DataResponse, RefreshRequest, RefreshResponse};
use crate::backend::auth::service::AuthService;
use crate::backend::error::BackendError;

/// Refresh handler
///
/// # Errors
///
/// * `401 Unauthorized` - If the refresh token is invalid, expired, or its user is gone
pub async fn refresh(
    State(service): State<AuthService>,
    Json(request): Json<RefreshRequest>,
) -> Result<Json<DataResponse<RefreshResponse>>, BackendError> {
    let token = service.refresh(&request.refresh_token).await?;
    Ok(Json(DataResponse::new(RefreshResponse { token })))
}
