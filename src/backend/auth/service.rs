/**
 * Authentication Service
 *
 * Composes the password hashing, token issuing and user store into the
 * account operations exposed over HTTP.
 *
 * # Flows
 *
 * 1. **Register**: validate input → reject existing email → hash → persist
 * 2. **Login**: look up email → verify password → issue access + refresh tokens
 * 3. **Refresh**: verify refresh token → re-read identity → issue access token
 *
 * Login never tells the caller whether the email exists: unknown email and
 * wrong password both end in `InvalidCredentials`, and both pay for one
 * bcrypt verification. An unknown email is checked against a dummy hash of
 * the configured cost.
 *
 * The service holds only read-only configuration and a handle to the store,
 * so one value is cloned into every request.
 */

use std::sync::Arc;
use tokio::sync::OnceCell;

use crate::backend::auth::password::{hash_password, verify_password};
use crate::backend::auth::sessions::TokenIssuer;
use crate::backend::auth::users::UserStore;
use crate::backend::error::{AuthError, BackendError, StoreError};
use crate::shared::{AuthConfig, CallerIdentity, Identity, NewCredential, SharedError};

const USER_EXISTS_MESSAGE: &str = "User already exists";
const PASSWORD_SPECIAL_CHARS: &str = "!@#$%^&*";
const DUMMY_PASSWORD: &str = "dummy-password-for-unknown-accounts";

/// Registration input
#[derive(Clone)]
pub struct Registration {
    pub email: String,
    pub username: String,
    pub password: String,
}

/// Login input
#[derive(Clone)]
pub struct LoginCredentials {
    pub email: String,
    pub password: String,
}

/// Successful login result
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub identity: Identity,
    pub access_token: String,
    pub refresh_token: String,
}

/// Account operations over a user store
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserStore>,
    issuer: TokenIssuer,
    hash_cost: u32,
    dummy_hash: Arc<OnceCell<String>>,
}

impl AuthService {
    pub fn new(config: &AuthConfig, users: Arc<dyn UserStore>) -> Self {
        Self {
            users,
            issuer: TokenIssuer::new(config),
            hash_cost: config.hash_cost,
            dummy_hash: Arc::new(OnceCell::new()),
        }
    }

    /// Token issuer used by this service
    pub fn issuer(&self) -> &TokenIssuer {
        &self.issuer
    }

    /// Register a new user
    ///
    /// # Errors
    ///
    /// * `SharedError` - email, username or password fails validation
    /// * `Conflict` - the email is already registered
    /// * `Auth(Internal)` - hashing failed
    /// * `Store` - the user store failed
    pub async fn register(&self, registration: Registration) -> Result<Identity, BackendError> {
        validate_registration(&registration)?;

        if self.users.find_by_email(&registration.email).await?.is_some() {
            tracing::warn!("Email already registered: {}", registration.email);
            return Err(BackendError::conflict(USER_EXISTS_MESSAGE));
        }

        let cost = self.hash_cost;
        let password = registration.password;
        let password_hash = run_blocking("password hashing", move || hash_password(&password, cost)).await?;

        let identity = self
            .users
            .create(NewCredential {
                email: registration.email,
                username: registration.username,
                password_hash,
            })
            .await
            .map_err(|e| match e {
                StoreError::Duplicate(email) => {
                    tracing::warn!("Email registered concurrently: {}", email);
                    BackendError::conflict(USER_EXISTS_MESSAGE)
                }
                other => other.into(),
            })?;

        tracing::info!("User registered: {} ({})", identity.username, identity.subject_id);
        Ok(identity)
    }

    /// Verify credentials and issue a token pair
    pub async fn login(&self, credentials: LoginCredentials) -> Result<LoginOutcome, BackendError> {
        let Some(record) = self.users.find_by_email(&credentials.email).await? else {
            let dummy_hash = self.dummy_hash().await?.to_string();
            let password = credentials.password;
            run_blocking("password verification", move || {
                verify_password(&password, &dummy_hash)
            })
            .await?;

            tracing::warn!("Login failed: unknown email");
            return Err(AuthError::InvalidCredentials.into());
        };

        let password = credentials.password;
        let password_hash = record.password_hash.clone();
        let valid = run_blocking("password verification", move || {
            verify_password(&password, &password_hash)
        })
        .await?;

        if !valid {
            tracing::warn!("Login failed: wrong password for subject {}", record.subject_id);
            return Err(AuthError::InvalidCredentials.into());
        }

        let identity = record.into_identity();
        let access_token = self.issuer.issue_access_token(&identity)?;
        let refresh_token = self.issuer.issue_refresh_token(&identity)?;

        tracing::info!("User logged in: {} ({})", identity.username, identity.subject_id);

        Ok(LoginOutcome {
            identity,
            access_token,
            refresh_token,
        })
    }

    /// Exchange a refresh token for a new access token
    ///
    /// The identity is re-read from the store so the new token reflects the
    /// user's current profile and admin flag. A subject that no longer exists
    /// makes the refresh token invalid.
    pub async fn refresh(&self, refresh_token: &str) -> Result<String, BackendError> {
        let claims = self.issuer.verify_refresh_token(refresh_token)?;

        let identity = self.users.find_by_id(claims.subject).await?.ok_or_else(|| {
            tracing::warn!("Refresh token for unknown subject {}", claims.subject);
            AuthError::InvalidToken
        })?;

        let access_token = self.issuer.issue_access_token(&identity)?;
        tracing::debug!("Access token refreshed for subject {}", identity.subject_id);
        Ok(access_token)
    }

    /// Resolve the full identity for a validated caller
    pub async fn current_identity(&self, caller: &CallerIdentity) -> Result<Identity, BackendError> {
        self.find_identity(caller.subject_id).await
    }

    /// Look up any user's identity by id
    pub async fn find_identity(&self, subject_id: i64) -> Result<Identity, BackendError> {
        self.users
            .find_by_id(subject_id)
            .await?
            .ok_or_else(|| BackendError::not_found("User not found"))
    }
}

impl AuthService {
    /// Hash compared against when the email is unknown, computed on first use
    async fn dummy_hash(&self) -> Result<&str, AuthError> {
        let cost = self.hash_cost;
        let hash = self
            .dummy_hash
            .get_or_try_init(|| {
                run_blocking("dummy password hashing", move || {
                    hash_password(DUMMY_PASSWORD, cost)
                })
            })
            .await?;
        Ok(hash.as_str())
    }
}

/// Run CPU-bound password work on the blocking pool
async fn run_blocking<T, F>(context: &'static str, work: F) -> Result<T, AuthError>
where
    F: FnOnce() -> Result<T, AuthError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| AuthError::internal(context, e))?
}

fn validate_registration(registration: &Registration) -> Result<(), SharedError> {
    if !is_valid_email(&registration.email) {
        return Err(SharedError::validation("email", "Invalid email address"));
    }
    if !is_valid_username(&registration.username) {
        return Err(SharedError::validation(
            "username",
            "Username must contain only letters and numbers",
        ));
    }
    if !is_valid_password(&registration.password) {
        return Err(SharedError::validation(
            "password",
            "Password must contain at least 8 characters, one uppercase letter, one lowercase letter, one number and one special character",
        ));
    }
    Ok(())
}

/// `local@domain.tld` with a 2+ letter alphabetic TLD
fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    let local_ok = !local.is_empty()
        && local
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "._%+-".contains(c));

    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    let host_ok = !host.is_empty()
        && host
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-');
    let tld_ok = tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic());

    local_ok && host_ok && tld_ok
}

fn is_valid_username(username: &str) -> bool {
    !username.is_empty() && username.chars().all(|c| c.is_ascii_alphanumeric())
}

/// At least 8 of `[A-Za-z0-9!@#$%^&*]`, with one of each class
fn is_valid_password(password: &str) -> bool {
    let is_special = |c: char| PASSWORD_SPECIAL_CHARS.contains(c);

    password.len() >= 8
        && password
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || is_special(c))
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(is_special)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::auth::users::InMemoryUserStore;
    use crate::backend::auth::validator::{TokenValidator, ValidationOptions};
    use assert_matches::assert_matches;

    fn config() -> AuthConfig {
        AuthConfig::builder()
            .access_secret("access-secret-for-tests")
            .refresh_secret("refresh-secret-for-tests")
            .hash_cost(4)
            .build()
            .unwrap()
    }

    fn registration(email: &str, password: &str) -> Registration {
        Registration {
            email: email.to_string(),
            username: "jane".to_string(),
            password: password.to_string(),
        }
    }

    fn credentials(email: &str, password: &str) -> LoginCredentials {
        LoginCredentials {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    fn service() -> (AuthService, Arc<InMemoryUserStore>) {
        let store = Arc::new(InMemoryUserStore::new());
        (AuthService::new(&config(), store.clone()), store)
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let (service, store) = service();

        let identity = service
            .register(registration("jane@example.com", "Abc@12345"))
            .await
            .unwrap();
        let stored = store.find_by_email("jane@example.com").await.unwrap().unwrap();
        assert_ne!(stored.password_hash, "Abc@12345");

        let outcome = service
            .login(credentials("jane@example.com", "Abc@12345"))
            .await
            .unwrap();
        assert_eq!(outcome.identity, identity);

        let validator = TokenValidator::new(&config());
        let claims = validator.decode(&outcome.access_token).unwrap();
        assert_eq!(claims.subject_id, identity.subject_id);
        assert_eq!(claims.email, "jane@example.com");
    }

    #[tokio::test]
    async fn test_login_failures_are_indistinguishable() {
        let (service, _) = service();
        service
            .register(registration("jane@example.com", "Abc@12345"))
            .await
            .unwrap();

        let wrong_password = service
            .login(credentials("jane@example.com", "Wrong@12345"))
            .await
            .unwrap_err();
        let unknown_email = service
            .login(credentials("nobody@example.com", "Abc@12345"))
            .await
            .unwrap_err();

        assert_matches!(wrong_password, BackendError::Auth(AuthError::InvalidCredentials));
        assert_matches!(unknown_email, BackendError::Auth(AuthError::InvalidCredentials));
        assert_eq!(wrong_password.message(), unknown_email.message());
    }

    #[tokio::test]
    async fn test_unknown_email_runs_verification() {
        let (service, _) = service();
        assert!(service.dummy_hash.get().is_none());

        let result = service
            .login(credentials("nobody@example.com", "Abc@12345"))
            .await;
        assert_matches!(result, Err(BackendError::Auth(AuthError::InvalidCredentials)));

        // Same cost as real hashes, so both failure paths take comparable time
        let dummy = service.dummy_hash.get().unwrap().clone();
        assert!(dummy.starts_with("$2b$04$"));
        assert!(verify_password(DUMMY_PASSWORD, &dummy).unwrap());

        service
            .login(credentials("other@example.com", "Abc@12345"))
            .await
            .unwrap_err();
        assert_eq!(service.dummy_hash.get().unwrap(), &dummy);

        // Clones share the cached hash
        let clone = service.clone();
        assert_eq!(clone.dummy_hash.get().unwrap(), &dummy);
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let (service, _) = service();
        service
            .register(registration("jane@example.com", "Abc@12345"))
            .await
            .unwrap();

        let result = service.register(registration("jane@example.com", "Xyz@12345")).await;
        assert_matches!(result, Err(BackendError::Conflict { message }) if message == USER_EXISTS_MESSAGE);
    }

    #[tokio::test]
    async fn test_register_validation() {
        let (service, _) = service();

        let result = service.register(registration("not-an-email", "Abc@12345")).await;
        assert_matches!(
            result,
            Err(BackendError::SharedError(SharedError::ValidationError { field, .. })) if field == "email"
        );

        let result = service.register(registration("jane@example.com", "abc12345")).await;
        assert_matches!(
            result,
            Err(BackendError::SharedError(SharedError::ValidationError { field, .. })) if field == "password"
        );

        let mut bad_name = registration("jane@example.com", "Abc@12345");
        bad_name.username = "jane doe".to_string();
        let result = service.register(bad_name).await;
        assert_matches!(
            result,
            Err(BackendError::SharedError(SharedError::ValidationError { field, .. })) if field == "username"
        );
    }

    #[tokio::test]
    async fn test_refresh_issues_new_access_token() {
        let (service, store) = service();
        let identity = service
            .register(registration("jane@example.com", "Abc@12345"))
            .await
            .unwrap();
        let outcome = service
            .login(credentials("jane@example.com", "Abc@12345"))
            .await
            .unwrap();

        store.set_admin(identity.subject_id, true).await;

        let access_token = service.refresh(&outcome.refresh_token).await.unwrap();
        let validator = TokenValidator::new(&config());
        let caller = validator
            .validate(
                Some(format!("Bearer {}", access_token).as_str()),
                ValidationOptions::admin_only(),
            )
            .unwrap();
        assert_eq!(caller.subject_id, identity.subject_id);
        assert!(caller.is_admin);
    }

    #[tokio::test]
    async fn test_refresh_rejects_access_token() {
        let (service, _) = service();
        service
            .register(registration("jane@example.com", "Abc@12345"))
            .await
            .unwrap();
        let outcome = service
            .login(credentials("jane@example.com", "Abc@12345"))
            .await
            .unwrap();

        let result = service.refresh(&outcome.access_token).await;
        assert_matches!(result, Err(BackendError::Auth(AuthError::InvalidToken)));
    }

    #[tokio::test]
    async fn test_refresh_unknown_subject() {
        let (service, _) = service();
        let ghost = Identity {
            subject_id: 77,
            email: "ghost@example.com".to_string(),
            username: "ghost".to_string(),
            is_admin: false,
        };
        let token = service.issuer().issue_refresh_token(&ghost).unwrap();

        let result = service.refresh(&token).await;
        assert_matches!(result, Err(BackendError::Auth(AuthError::InvalidToken)));
    }

    #[tokio::test]
    async fn test_current_identity_not_found() {
        let (service, _) = service();
        let caller = CallerIdentity { subject_id: 12, is_admin: false };
        assert_matches!(
            service.current_identity(&caller).await,
            Err(BackendError::NotFound { .. })
        );
    }

    #[test]
    fn test_email_rules() {
        assert!(is_valid_email("jane.doe+tag@mail.example.com"));
        assert!(!is_valid_email("jane@example"));
        assert!(!is_valid_email("jane@example.c"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("jane example@example.com"));
    }

    #[test]
    fn test_password_rules() {
        assert!(is_valid_password("Abc@12345"));
        assert!(!is_valid_password("Ab@1234"));
        assert!(!is_valid_password("abc@12345"));
        assert!(!is_valid_password("ABC@12345"));
        assert!(!is_valid_password("Abcd12345"));
        assert!(!is_valid_password("Abc@1234 5"));
    }
}
