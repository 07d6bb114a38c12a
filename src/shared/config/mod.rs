//! Authentication configuration module
//!
//! Provides the process-wide, read-only settings used by the auth core:
//! signing secrets, token lifetimes and the password hashing cost.
//!
//! # Environment
//!
//! | Variable                  | Default    |
//! |---------------------------|------------|
//! | `ACCESS_TOKEN_SECRET`     | (required) |
//! | `REFRESH_TOKEN_SECRET`    | (required) |
//! | `ACCESS_TOKEN_TTL_SECS`   | `3600`     |
//! | `REFRESH_TOKEN_TTL_SECS`  | `2592000`  |
//! | `PASSWORD_HASH_COST`      | `10`       |
//!
//! The configuration is loaded once at startup and never mutated. The token
//! issuer, validator and auth service each copy what they need from it.

use std::fmt;
use thiserror::Error;

/// Default access token lifetime (1 hour)
pub const DEFAULT_ACCESS_TTL_SECS: u64 = 60 * 60;

/// Default refresh token lifetime (30 days)
pub const DEFAULT_REFRESH_TTL_SECS: u64 = 30 * 24 * 60 * 60;

/// Default bcrypt work factor
pub const DEFAULT_HASH_COST: u32 = 10;

/// Upper bound for either token lifetime (10 years)
pub const MAX_TTL_SECS: u64 = 10 * 365 * 24 * 60 * 60;

const MIN_HASH_COST: u32 = 4;
const MAX_HASH_COST: u32 = 31;

pub const ACCESS_TOKEN_SECRET: &str = "ACCESS_TOKEN_SECRET";
pub const REFRESH_TOKEN_SECRET: &str = "REFRESH_TOKEN_SECRET";
pub const ACCESS_TOKEN_TTL_SECS: &str = "ACCESS_TOKEN_TTL_SECS";
pub const REFRESH_TOKEN_TTL_SECS: &str = "REFRESH_TOKEN_TTL_SECS";
pub const PASSWORD_HASH_COST: &str = "PASSWORD_HASH_COST";

/// Authentication configuration
#[derive(Clone, PartialEq, Eq)]
pub struct AuthConfig {
    access_secret: String,
    refresh_secret: String,
    /// Access token lifetime in seconds
    pub access_ttl_secs: u64,
    /// Refresh token lifetime in seconds
    pub refresh_ttl_secs: u64,
    /// bcrypt cost factor
    pub hash_cost: u32,
}

impl AuthConfig {
    /// Create a new AuthConfigBuilder
    pub fn builder() -> AuthConfigBuilder {
        AuthConfigBuilder::default()
    }

    /// Load the configuration from process environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load the configuration through an arbitrary key lookup
    ///
    /// `from_env` delegates here; tests pass a map-backed closure instead of
    /// mutating the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = Self::builder();

        if let Some(secret) = lookup(ACCESS_TOKEN_SECRET) {
            builder = builder.access_secret(secret);
        }
        if let Some(secret) = lookup(REFRESH_TOKEN_SECRET) {
            builder = builder.refresh_secret(secret);
        }
        if let Some(raw) = lookup(ACCESS_TOKEN_TTL_SECS) {
            builder = builder.access_ttl_secs(parse_number(ACCESS_TOKEN_TTL_SECS, &raw)?);
        }
        if let Some(raw) = lookup(REFRESH_TOKEN_TTL_SECS) {
            builder = builder.refresh_ttl_secs(parse_number(REFRESH_TOKEN_TTL_SECS, &raw)?);
        }
        if let Some(raw) = lookup(PASSWORD_HASH_COST) {
            builder = builder.hash_cost(parse_number(PASSWORD_HASH_COST, &raw)?);
        }

        builder.build()
    }

    /// Secret used to sign and verify access tokens
    pub fn access_secret(&self) -> &[u8] {
        self.access_secret.as_bytes()
    }

    /// Secret used to sign and verify refresh tokens
    pub fn refresh_secret(&self) -> &[u8] {
        self.refresh_secret.as_bytes()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.access_secret.trim().is_empty() {
            return Err(ConfigError::MissingValue(ACCESS_TOKEN_SECRET));
        }
        if self.refresh_secret.trim().is_empty() {
            return Err(ConfigError::MissingValue(REFRESH_TOKEN_SECRET));
        }
        if self.access_secret == self.refresh_secret {
            return Err(ConfigError::SharedSecret);
        }
        validate_ttl(ACCESS_TOKEN_TTL_SECS, self.access_ttl_secs)?;
        validate_ttl(REFRESH_TOKEN_TTL_SECS, self.refresh_ttl_secs)?;
        if !(MIN_HASH_COST..=MAX_HASH_COST).contains(&self.hash_cost) {
            return Err(ConfigError::InvalidCost(self.hash_cost));
        }
        Ok(())
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("access_secret", &"[redacted]")
            .field("refresh_secret", &"[redacted]")
            .field("access_ttl_secs", &self.access_ttl_secs)
            .field("refresh_ttl_secs", &self.refresh_ttl_secs)
            .field("hash_cost", &self.hash_cost)
            .finish()
    }
}

/// Builder for AuthConfig
#[derive(Default)]
pub struct AuthConfigBuilder {
    access_secret: Option<String>,
    refresh_secret: Option<String>,
    access_ttl_secs: Option<u64>,
    refresh_ttl_secs: Option<u64>,
    hash_cost: Option<u32>,
}

impl AuthConfigBuilder {
    /// Set the access token secret
    pub fn access_secret(mut self, secret: impl Into<String>) -> Self {
        self.access_secret = Some(secret.into());
        self
    }

    /// Set the refresh token secret
    pub fn refresh_secret(mut self, secret: impl Into<String>) -> Self {
        self.refresh_secret = Some(secret.into());
        self
    }

    /// Set the access token lifetime
    pub fn access_ttl_secs(mut self, secs: u64) -> Self {
        self.access_ttl_secs = Some(secs);
        self
    }

    /// Set the refresh token lifetime
    pub fn refresh_ttl_secs(mut self, secs: u64) -> Self {
        self.refresh_ttl_secs = Some(secs);
        self
    }

    /// Set the bcrypt cost factor
    pub fn hash_cost(mut self, cost: u32) -> Self {
        self.hash_cost = Some(cost);
        self
    }

    /// Build and validate the configuration
    pub fn build(self) -> Result<AuthConfig, ConfigError> {
        let config = AuthConfig {
            access_secret: self
                .access_secret
                .ok_or(ConfigError::MissingValue(ACCESS_TOKEN_SECRET))?,
            refresh_secret: self
                .refresh_secret
                .ok_or(ConfigError::MissingValue(REFRESH_TOKEN_SECRET))?,
            access_ttl_secs: self.access_ttl_secs.unwrap_or(DEFAULT_ACCESS_TTL_SECS),
            refresh_ttl_secs: self.refresh_ttl_secs.unwrap_or(DEFAULT_REFRESH_TTL_SECS),
            hash_cost: self.hash_cost.unwrap_or(DEFAULT_HASH_COST),
        };
        config.validate()?;
        Ok(config)
    }
}

fn validate_ttl(key: &'static str, ttl: u64) -> Result<(), ConfigError> {
    if ttl == 0 || ttl > MAX_TTL_SECS {
        return Err(ConfigError::InvalidValue {
            key,
            value: ttl.to_string(),
        });
    }
    Ok(())
}

fn parse_number<T: std::str::FromStr>(key: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key,
        value: raw.to_string(),
    })
}

/// Configuration errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing value: {0}")]
    MissingValue(&'static str),
    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
    #[error("password hash cost must be between 4 and 31, got {0}")]
    InvalidCost(u32),
    #[error("access and refresh tokens must use different secrets")]
    SharedSecret,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_applied() {
        let config = AuthConfig::from_lookup(lookup_from(&[
            (ACCESS_TOKEN_SECRET, "access"),
            (REFRESH_TOKEN_SECRET, "refresh"),
        ]))
        .unwrap();

        assert_eq!(config.access_ttl_secs, 3600);
        assert_eq!(config.refresh_ttl_secs, 2_592_000);
        assert_eq!(config.hash_cost, 10);
        assert_eq!(config.access_secret(), b"access");
        assert_eq!(config.refresh_secret(), b"refresh");
    }

    #[test]
    fn test_overrides_parsed() {
        let config = AuthConfig::from_lookup(lookup_from(&[
            (ACCESS_TOKEN_SECRET, "access"),
            (REFRESH_TOKEN_SECRET, "refresh"),
            (ACCESS_TOKEN_TTL_SECS, "60"),
            (REFRESH_TOKEN_TTL_SECS, " 120 "),
            (PASSWORD_HASH_COST, "4"),
        ]))
        .unwrap();

        assert_eq!(config.access_ttl_secs, 60);
        assert_eq!(config.refresh_ttl_secs, 120);
        assert_eq!(config.hash_cost, 4);
    }

    #[test]
    fn test_missing_secret() {
        let result = AuthConfig::from_lookup(lookup_from(&[(REFRESH_TOKEN_SECRET, "refresh")]));
        assert_eq!(result.unwrap_err(), ConfigError::MissingValue(ACCESS_TOKEN_SECRET));

        let result = AuthConfig::from_lookup(lookup_from(&[
            (ACCESS_TOKEN_SECRET, "access"),
            (REFRESH_TOKEN_SECRET, "   "),
        ]));
        assert_eq!(result.unwrap_err(), ConfigError::MissingValue(REFRESH_TOKEN_SECRET));
    }

    #[test]
    fn test_shared_secret_rejected() {
        let result = AuthConfig::builder()
            .access_secret("same")
            .refresh_secret("same")
            .build();
        assert_eq!(result.unwrap_err(), ConfigError::SharedSecret);
    }

    #[test]
    fn test_invalid_values() {
        let result = AuthConfig::from_lookup(lookup_from(&[
            (ACCESS_TOKEN_SECRET, "access"),
            (REFRESH_TOKEN_SECRET, "refresh"),
            (ACCESS_TOKEN_TTL_SECS, "one hour"),
        ]));
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue { key: ACCESS_TOKEN_TTL_SECS, .. })
        ));

        let result = AuthConfig::builder()
            .access_secret("access")
            .refresh_secret("refresh")
            .refresh_ttl_secs(0)
            .build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue { key: REFRESH_TOKEN_TTL_SECS, .. })
        ));

        let result = AuthConfig::builder()
            .access_secret("access")
            .refresh_secret("refresh")
            .hash_cost(3)
            .build();
        assert_eq!(result.unwrap_err(), ConfigError::InvalidCost(3));
    }

    #[test]
    fn test_ttl_upper_bound() {
        let result = AuthConfig::from_lookup(lookup_from(&[
            (ACCESS_TOKEN_SECRET, "access"),
            (REFRESH_TOKEN_SECRET, "refresh"),
            (ACCESS_TOKEN_TTL_SECS, "18446744073709551615"),
        ]));
        assert_eq!(
            result.unwrap_err(),
            ConfigError::InvalidValue {
                key: ACCESS_TOKEN_TTL_SECS,
                value: u64::MAX.to_string(),
            }
        );

        let result = AuthConfig::builder()
            .access_secret("access")
            .refresh_secret("refresh")
            .refresh_ttl_secs(MAX_TTL_SECS + 1)
            .build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue { key: REFRESH_TOKEN_TTL_SECS, .. })
        ));

        let config = AuthConfig::builder()
            .access_secret("access")
            .refresh_secret("refresh")
            .access_ttl_secs(MAX_TTL_SECS)
            .refresh_ttl_secs(MAX_TTL_SECS)
            .build()
            .unwrap();
        assert_eq!(config.access_ttl_secs, MAX_TTL_SECS);
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = AuthConfig::builder()
            .access_secret("top-secret-access")
            .refresh_secret("top-secret-refresh")
            .build()
            .unwrap();
        let debug = format!("{:?}", config);
        assert!(!debug.contains("top-secret"));
        assert!(debug.contains("[redacted]"));
    }
}
