/**
 * Backend Error Types
 *
 * This module defines the error kinds produced by the auth core and by the
 * handlers built on top of it.
 *
 * # Auth Errors
 *
 * `AuthError` is the closed set of outcomes a failed check can produce.
 * Every check either proceeds or yields exactly one of these:
 *
 * - `Unauthenticated` - no or malformed bearer header
 * - `InvalidToken` - signature or structural verification failed
 * - `TokenExpired` - `exp` is in the past
 * - `Forbidden` - admin required, caller is not admin
 * - `PermissionDenied` - caller is neither resource owner nor admin
 * - `InvalidCredentials` - login failed (never says which part was wrong)
 * - `Internal` - hashing or signing infrastructure error
 *
 * # Backend Errors
 *
 * `BackendError` wraps `AuthError` and adds what the surrounding API needs:
 * input validation, conflicts, missing records and store failures.
 */

use axum::http::StatusCode;
use std::fmt::Display;
use thiserror::Error;

use crate::shared::SharedError;

/// Generic text returned for every internal failure
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Authentication and authorization failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("missing or malformed bearer authorization header")]
    Unauthenticated,

    #[error("token verification failed")]
    InvalidToken,

    #[error("token expired")]
    TokenExpired,

    #[error("admin privileges required")]
    Forbidden,

    #[error("caller is neither the resource owner nor an admin")]
    PermissionDenied,

    #[error("invalid credentials")]
    InvalidCredentials,

    /// Infrastructure failure. `detail` is logged, never returned to clients.
    #[error("internal failure in {context}: {detail}")]
    Internal {
        /// Operation that failed (e.g. "password hashing")
        context: &'static str,
        /// Underlying error text
        detail: String,
    },
}

impl AuthError {
    /// Create an internal failure from any displayable error
    pub fn internal(context: &'static str, detail: impl Display) -> Self {
        Self::Internal {
            context,
            detail: detail.to_string(),
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthenticated
            | Self::InvalidToken
            | Self::TokenExpired
            | Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::Forbidden | Self::PermissionDenied => StatusCode::FORBIDDEN,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the client-facing message
    pub fn message(&self) -> &'static str {
        match self {
            Self::Unauthenticated => "Unauthorized",
            Self::InvalidToken => "Invalid token",
            Self::TokenExpired => "Access token expired",
            Self::Forbidden => "No permission",
            Self::PermissionDenied => "Permission denied",
            Self::InvalidCredentials => "Invalid email or password",
            Self::Internal { .. } => INTERNAL_ERROR_MESSAGE,
        }
    }
}

/// Persistence collaborator failures
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A unique constraint was hit (e.g. email already registered)
    #[error("duplicate record: {0}")]
    Duplicate(String),
}

/// Backend-specific error types
#[derive(Debug, Error)]
pub enum BackendError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Input validation error from the shared module
    #[error(transparent)]
    SharedError(#[from] SharedError),

    #[error("Conflict: {message}")]
    Conflict {
        /// Human-readable error message
        message: String,
    },

    #[error("Not found: {message}")]
    NotFound {
        /// Human-readable error message
        message: String,
    },

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl BackendError {
    /// Create a new conflict error
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    /// Create a new not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    ///
    /// # Status Code Mapping
    ///
    /// - `Auth` - Depends on the auth error kind
    /// - `SharedError` - 400 Bad Request
    /// - `Conflict` - 409 Conflict
    /// - `NotFound` - 404 Not Found
    /// - `Store` - 500 Internal Server Error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Auth(err) => err.status_code(),
            Self::SharedError(_) => StatusCode::BAD_REQUEST,
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the client-facing message
    pub fn message(&self) -> String {
        match self {
            Self::Auth(err) => err.message().to_string(),
            Self::SharedError(err) => err.message(),
            Self::Conflict { message } => message.clone(),
            Self::NotFound { message } => message.clone(),
            Self::Store(_) => INTERNAL_ERROR_MESSAGE.to_string(),
        }
    }

    /// Whether the error hides server-side detail that must be logged
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            Self::Auth(AuthError::Internal { .. }) | Self::Store(_)
        )
    }
}
