/**
 * Session Tokens
 *
 * This module mints signed access and refresh tokens and verifies refresh
 * tokens when a client asks for a new access token.
 *
 * # Token Kinds
 *
 * - **Access token** - carries the identity claims, signed with the access
 *   secret, lives `access_ttl_secs` (default 1 hour).
 * - **Refresh token** - carries only the subject id and `type: "refresh"`,
 *   signed with the refresh secret, lives `refresh_ttl_secs` (default 30 days).
 *
 * The two secrets are distinct, so neither token kind verifies under the
 * other's key. `exp` is always an absolute Unix timestamp in seconds.
 *
 * Tokens are immutable. There is no renewal in place and no revocation:
 * validity depends only on the signature and `exp`.
 */

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::backend::error::AuthError;
use crate::shared::{AuthConfig, Identity};

/// `type` claim carried by every refresh token
pub const REFRESH_TOKEN_TYPE: &str = "refresh";

/// Access token claims
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessClaims {
    /// User ID
    pub subject_id: i64,
    /// Email
    pub email: String,
    /// Username
    pub username: String,
    /// Admin flag; a token without it is treated as non-admin
    #[serde(default)]
    pub is_admin: bool,
    /// Expiration time (Unix timestamp)
    pub exp: u64,
    /// Issued at time (Unix timestamp)
    #[serde(default)]
    pub iat: u64,
}

/// Refresh token claims
///
/// Deliberately minimal: no role or profile data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshClaims {
    /// User ID
    pub subject: i64,
    /// Always `"refresh"`
    #[serde(rename = "type")]
    pub token_type: String,
    /// Expiration time (Unix timestamp)
    pub exp: u64,
    /// Issued at time (Unix timestamp)
    #[serde(default)]
    pub iat: u64,
}

/// Current Unix time in seconds
pub fn now_epoch_secs() -> u64 {
    u64::try_from(chrono::Utc::now().timestamp()).unwrap_or(0)
}

/// Absolute expiry `now + ttl`, failing instead of wrapping
fn expiry(now: u64, ttl_secs: u64) -> Result<u64, AuthError> {
    now.checked_add(ttl_secs).ok_or_else(|| {
        AuthError::internal("token expiry", format!("{} + {} overflows", now, ttl_secs))
    })
}

/// Signature-only validation
///
/// Expiry is checked explicitly after decoding so that an expired token is
/// reported as `TokenExpired` rather than as a verification failure.
pub(crate) fn signature_validation() -> Validation {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = false;
    validation.required_spec_claims.clear();
    validation.leeway = 0;
    validation
}

/// Mints access and refresh tokens
///
/// Built once from the configuration and shared read-only across requests.
#[derive(Clone)]
pub struct TokenIssuer {
    access_key: EncodingKey,
    refresh_key: EncodingKey,
    refresh_decoding_key: DecodingKey,
    access_ttl_secs: u64,
    refresh_ttl_secs: u64,
}

impl TokenIssuer {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            access_key: EncodingKey::from_secret(config.access_secret()),
            refresh_key: EncodingKey::from_secret(config.refresh_secret()),
            refresh_decoding_key: DecodingKey::from_secret(config.refresh_secret()),
            access_ttl_secs: config.access_ttl_secs,
            refresh_ttl_secs: config.refresh_ttl_secs,
        }
    }

    /// Issue an access token expiring `access_ttl_secs` from now
    pub fn issue_access_token(&self, identity: &Identity) -> Result<String, AuthError> {
        self.issue_access_token_at(identity, now_epoch_secs())
    }

    /// Issue an access token as if the current time were `now`
    pub fn issue_access_token_at(&self, identity: &Identity, now: u64) -> Result<String, AuthError> {
        let exp = expiry(now, self.access_ttl_secs)?;
        let claims = AccessClaims {
            subject_id: identity.subject_id,
            email: identity.email.clone(),
            username: identity.username.clone(),
            is_admin: identity.is_admin,
            exp,
            iat: now,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.access_key)
            .map_err(|e| AuthError::internal("access token signing", e))
    }

    /// Issue a refresh token expiring `refresh_ttl_secs` from now
    pub fn issue_refresh_token(&self, identity: &Identity) -> Result<String, AuthError> {
        self.issue_refresh_token_at(identity, now_epoch_secs())
    }

    /// Issue a refresh token as if the current time were `now`
    pub fn issue_refresh_token_at(&self, identity: &Identity, now: u64) -> Result<String, AuthError> {
        let exp = expiry(now, self.refresh_ttl_secs)?;
        let claims = RefreshClaims {
            subject: identity.subject_id,
            token_type: REFRESH_TOKEN_TYPE.to_string(),
            exp,
            iat: now,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.refresh_key)
            .map_err(|e| AuthError::internal("refresh token signing", e))
    }

    /// Verify a refresh token and return its claims
    pub fn verify_refresh_token(&self, token: &str) -> Result<RefreshClaims, AuthError> {
        self.verify_refresh_token_at(token, now_epoch_secs())
    }

    /// Verify a refresh token against the given current time
    ///
    /// # Errors
    ///
    /// * `InvalidToken` - bad signature, malformed token, or wrong `type`
    /// * `TokenExpired` - `now >= exp`
    pub fn verify_refresh_token_at(&self, token: &str, now: u64) -> Result<RefreshClaims, AuthError> {
        let claims = decode::<RefreshClaims>(token, &self.refresh_decoding_key, &signature_validation())
            .map_err(|e| {
                tracing::warn!("Refresh token verification failed: {:?}", e.kind());
                AuthError::InvalidToken
            })?
            .claims;

        if claims.token_type != REFRESH_TOKEN_TYPE {
            tracing::warn!("Refresh token has unexpected type: {}", claims.token_type);
            return Err(AuthError::InvalidToken);
        }

        if now >= claims.exp {
            tracing::warn!("Refresh token expired for subject {}", claims.subject);
            return Err(AuthError::TokenExpired);
        }

        Ok(claims)
    }
}
