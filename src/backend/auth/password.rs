/**
 * Password Hashing
 *
 * Hashes and checks passwords with bcrypt. Each hash carries its own random
 * salt, so hashing the same password twice yields two different strings that
 * both verify.
 *
 * Both functions are CPU-bound by design. Async callers should run them on
 * the blocking pool (see `AuthService`).
 */

use crate::backend::error::AuthError;

/// Hash a raw password with the given bcrypt cost
///
/// # Errors
///
/// `AuthError::Internal` if bcrypt rejects the cost or fails to hash.
pub fn hash_password(raw_password: &str, cost: u32) -> Result<String, AuthError> {
    bcrypt::hash(raw_password, cost).map_err(|e| AuthError::internal("password hashing", e))
}

/// Check a raw password against a stored bcrypt hash
///
/// A wrong password is `Ok(false)`, not an error. Only a stored hash that
/// bcrypt cannot parse is reported as `AuthError::Internal`.
pub fn verify_password(raw_password: &str, hashed_password: &str) -> Result<bool, AuthError> {
    bcrypt::verify(raw_password, hashed_password)
        .map_err(|e| AuthError::internal("password verification", e))
}
