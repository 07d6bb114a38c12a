/**
 * Login Handler
 *
 * This module implements the user authentication handler for POST /api/v1/login.
 *
 * # Security
 *
 * - Passwords are verified using bcrypt
 * - Unknown email and wrong password return the same 401 body
 * - User password hashes are never returned in responses
 */

use axum::{extract::State, response::Json};

use crate::backend::auth::handlers::types::{DataResponse, LoginRequest, LoginResponse};
use crate::backend::auth::service::AuthService;
use crate::backend::error::BackendError;

/// Login handler
///
/// # Errors
///
/// * `401 Unauthorized` - If user is not found or password is incorrect
/// * `500 Internal Server Error` - If the user store, hashing or signing fails
///
/// # Example Response
///
/// ```json
/// {
///   "data": {
///     "subjectId": 1,
///     "email": "user@example.com",
///     "username": "user",
///     "isAdmin": false,
///     "token": "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...",
///     "refreshToken": "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9..."
///   }
/// }
/// ```
pub async fn login(
    State(service): State<AuthService>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<DataResponse<LoginResponse>>, BackendError> {
    let outcome = service.login(request.into()).await?;
    Ok(Json(DataResponse::new(outcome.into())))
}
