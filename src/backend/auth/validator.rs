/**
 * Access Token Validation
 *
 * Checks an inbound `Authorization` header and resolves the caller identity.
 *
 * # Check Order
 *
 * 1. Header present and of the form `Bearer <token>` - else `Unauthenticated`
 * 2. Token segment non-empty and free of whitespace - else `Unauthenticated`
 * 3. Signature and structure verify under the access secret - else `InvalidToken`
 * 4. `now < exp` - else `TokenExpired`
 * 5. If admin is required, `isAdmin` is true - else `Forbidden`
 *
 * A token without `exp` fails step 3: the claim is required.
 */

use jsonwebtoken::{decode, DecodingKey};

use crate::backend::auth::sessions::{now_epoch_secs, signature_validation, AccessClaims};
use crate::backend::error::AuthError;
use crate::shared::{AuthConfig, CallerIdentity};

const BEARER_PREFIX: &str = "Bearer ";

/// Per-route validation settings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationOptions {
    /// Reject callers whose token does not carry `isAdmin: true`
    pub require_admin: bool,
}

impl ValidationOptions {
    /// Any authenticated user
    pub const fn any_user() -> Self {
        Self { require_admin: false }
    }

    /// Admin users only
    pub const fn admin_only() -> Self {
        Self { require_admin: true }
    }
}

/// Extract the raw token from an `Authorization` header value
///
/// The scheme is case-sensitive and must be followed by exactly one space.
/// Anything after it must be a single non-empty segment.
pub fn parse_bearer(header: Option<&str>) -> Result<&str, AuthError> {
    let header = header.ok_or_else(|| {
        tracing::warn!("Missing Authorization header");
        AuthError::Unauthenticated
    })?;

    let token = header.strip_prefix(BEARER_PREFIX).ok_or_else(|| {
        tracing::warn!("Invalid Authorization header format");
        AuthError::Unauthenticated
    })?;

    if token.is_empty() || token.chars().any(char::is_whitespace) {
        tracing::warn!("Malformed bearer token segment");
        return Err(AuthError::Unauthenticated);
    }

    Ok(token)
}

/// Validates access tokens
#[derive(Clone)]
pub struct TokenValidator {
    access_key: DecodingKey,
}

impl TokenValidator {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            access_key: DecodingKey::from_secret(config.access_secret()),
        }
    }

    /// Verify signature and structure, returning the claims
    ///
    /// Does not check expiry.
    pub fn decode(&self, token: &str) -> Result<AccessClaims, AuthError> {
        decode::<AccessClaims>(token, &self.access_key, &signature_validation())
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::warn!("Invalid token: {:?}", e.kind());
                AuthError::InvalidToken
            })
    }

    /// Validate an `Authorization` header value at the current time
    pub fn validate(
        &self,
        header: Option<&str>,
        options: ValidationOptions,
    ) -> Result<CallerIdentity, AuthError> {
        self.validate_at(header, options, now_epoch_secs())
    }

    /// Validate an `Authorization` header value against the given time
    pub fn validate_at(
        &self,
        header: Option<&str>,
        options: ValidationOptions,
        now: u64,
    ) -> Result<CallerIdentity, AuthError> {
        let token = parse_bearer(header)?;
        let claims = self.decode(token)?;

        if now >= claims.exp {
            tracing::warn!("Access token expired for subject {}", claims.subject_id);
            return Err(AuthError::TokenExpired);
        }

        if options.require_admin && !claims.is_admin {
            tracing::warn!("Admin required, subject {} is not admin", claims.subject_id);
            return Err(AuthError::Forbidden);
        }

        tracing::debug!("Token validated for subject {}", claims.subject_id);

        Ok(CallerIdentity {
            subject_id: claims.subject_id,
            is_admin: claims.is_admin,
        })
    }
}
