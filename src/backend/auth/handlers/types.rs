/**
 * Authentication Handler Types
 *
 * Request and response bodies for the authentication endpoints. Responses
 * wrap their payload in a `data` field.
 */

use serde::{Deserialize, Serialize};

use crate::backend::auth::service::{LoginCredentials, LoginOutcome, Registration};
use crate::shared::Identity;

/// Register request
#[derive(Deserialize, Serialize, Debug)]
pub struct RegisterRequest {
    /// User's email address
    pub email: String,
    /// Display name (letters and digits)
    pub username: String,
    /// User's password (will be hashed before storage)
    pub password: String,
}

impl From<RegisterRequest> for Registration {
    fn from(request: RegisterRequest) -> Self {
        Registration {
            email: request.email,
            username: request.username,
            password: request.password,
        }
    }
}

/// Login request
#[derive(Deserialize, Serialize, Debug)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl From<LoginRequest> for LoginCredentials {
    fn from(request: LoginRequest) -> Self {
        LoginCredentials {
            email: request.email,
            password: request.password,
        }
    }
}

/// Refresh request
#[derive(Deserialize, Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// `{"data": ...}` envelope
#[derive(Serialize, Deserialize, Debug)]
pub struct DataResponse<T> {
    pub data: T,
}

impl<T> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// Login payload: the identity plus both tokens
///
/// Never includes the password hash.
#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    #[serde(flatten)]
    pub identity: Identity,
    /// Access token (1-hour expiration by default)
    pub token: String,
    /// Refresh token (30-day expiration by default)
    pub refresh_token: String,
}

impl From<LoginOutcome> for LoginResponse {
    fn from(outcome: LoginOutcome) -> Self {
        LoginResponse {
            identity: outcome.identity,
            token: outcome.access_token,
            refresh_token: outcome.refresh_token,
        }
    }
}

/// Refresh payload
#[derive(Serialize, Deserialize, Debug)]
pub struct RefreshResponse {
    pub token: String,
}
