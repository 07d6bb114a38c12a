/**
 * Authentication Middleware
 *
 * This module provides middleware for protecting routes that require
 * authentication. It validates the bearer token from the Authorization
 * header and attaches the caller identity for handlers.
 *
 * The validation options are supplied where the layer is installed, so the
 * same function guards both any-user and admin-only routes:
 *
 * ```rust,ignore
 * router.route_layer(axum::middleware::from_fn_with_state(
 *     (validator.clone(), ValidationOptions::admin_only()),
 *     require_token,
 * ))
 * ```
 */

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};

use crate::backend::auth::validator::{TokenValidator, ValidationOptions};
use crate::backend::error::AuthError;
use crate::shared::CallerIdentity;

/// Token middleware
///
/// This middleware:
/// 1. Reads the Authorization header
/// 2. Validates it with the configured options
/// 3. Attaches the `CallerIdentity` to request extensions
///
/// Returns 401 for missing, malformed, invalid or expired tokens and 403
/// when admin is required but the caller is not admin.
pub async fn require_token(
    State((validator, options)): State<(TokenValidator, ValidationOptions)>,
    mut request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    // A header that is not valid UTF-8 counts as missing
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let caller = validator.validate(header, options)?;

    request.extensions_mut().insert(caller);

    Ok(next.run(request).await)
}

/// Axum extractor for the authenticated caller
///
/// Only valid on routes behind `require_token`.
#[derive(Clone, Copy, Debug)]
pub struct AuthUser(pub CallerIdentity);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let caller = parts
            .extensions
            .get::<CallerIdentity>()
            .copied()
            .ok_or_else(|| {
                tracing::warn!("CallerIdentity not found in request extensions");
                AuthError::Unauthenticated
            })?;

        Ok(AuthUser(caller))
    }
}
