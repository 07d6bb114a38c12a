/**
 * Identity Types
 *
 * This module defines the user-facing identity and the stored credential
 * record. The password hash lives only on `CredentialRecord`; converting a
 * record into an `Identity` drops it.
 */

use serde::{Deserialize, Serialize};
use std::fmt;

/// Resolved user attributes, safe to return to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    /// Unique user ID
    pub subject_id: i64,
    /// User email address
    pub email: String,
    /// Display name
    pub username: String,
    /// Whether the user may access admin-only routes
    pub is_admin: bool,
}

/// Stored credentials for a user
///
/// Owned by the user store. The auth core reads it during login and writes
/// the hash during registration.
#[derive(Clone, PartialEq, Eq)]
pub struct CredentialRecord {
    pub subject_id: i64,
    pub email: String,
    pub password_hash: String,
    pub username: String,
    pub is_admin: bool,
}

impl CredentialRecord {
    /// Convert into the public identity, discarding the password hash
    pub fn into_identity(self) -> Identity {
        Identity {
            subject_id: self.subject_id,
            email: self.email,
            username: self.username,
            is_admin: self.is_admin,
        }
    }
}

impl fmt::Debug for CredentialRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialRecord")
            .field("subject_id", &self.subject_id)
            .field("email", &self.email)
            .field("password_hash", &"[redacted]")
            .field("username", &self.username)
            .field("is_admin", &self.is_admin)
            .finish()
    }
}

/// New user data handed to the user store at registration
#[derive(Clone)]
pub struct NewCredential {
    pub email: String,
    pub username: String,
    pub password_hash: String,
}

/// Caller identity attached to a request after token validation
///
/// Reconstructed from the access token on every request; never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallerIdentity {
    pub subject_id: i64,
    pub is_admin: bool,
}
