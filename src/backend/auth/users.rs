/**
 * User Store
 *
 * This module defines the user store collaborator and its implementations.
 * The auth core reads credential records through it during login and writes
 * new records through it at registration.
 *
 * - `PgUserStore` - PostgreSQL via sqlx
 * - `InMemoryUserStore` - process-local map, used by tests and local runs
 */

use async_trait::async_trait;
use sqlx::PgPool;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::backend::error::StoreError;
use crate::shared::{CredentialRecord, Identity, NewCredential};

/// Lookup and persistence of user credentials
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Find the credential record for an email
    async fn find_by_email(&self, email: &str) -> Result<Option<CredentialRecord>, StoreError>;

    /// Find the identity for a subject id
    async fn find_by_id(&self, subject_id: i64) -> Result<Option<Identity>, StoreError>;

    /// Persist a new user
    ///
    /// Returns `StoreError::Duplicate` if the email is already registered.
    async fn create(&self, credential: NewCredential) -> Result<Identity, StoreError>;
}

/// Database row for the `users` table
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    user_id: i64,
    email: String,
    password_hash: String,
    username: String,
    is_admin: bool,
}

impl From<UserRow> for CredentialRecord {
    fn from(row: UserRow) -> Self {
        CredentialRecord {
            subject_id: row.user_id,
            email: row.email,
            password_hash: row.password_hash,
            username: row.username,
            is_admin: row.is_admin,
        }
    }
}

/// PostgreSQL-backed user store
#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<CredentialRecord>, StoreError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT user_id, email, password_hash, username, is_admin
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(CredentialRecord::from))
    }

    async fn find_by_id(&self, subject_id: i64) -> Result<Option<Identity>, StoreError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT user_id, email, password_hash, username, is_admin
            FROM users
            WHERE user_id = $1
            "#,
        )
        .bind(subject_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|row| CredentialRecord::from(row).into_identity()))
    }

    async fn create(&self, credential: NewCredential) -> Result<Identity, StoreError> {
        let result = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (email, username, password_hash)
            VALUES ($1, $2, $3)
            RETURNING user_id, email, password_hash, username, is_admin
            "#,
        )
        .bind(&credential.email)
        .bind(&credential.username)
        .bind(&credential.password_hash)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(row) => Ok(CredentialRecord::from(row).into_identity()),
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                Err(StoreError::Duplicate(credential.email))
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory user store
#[derive(Default)]
pub struct InMemoryUserStore {
    users: RwLock<HashMap<i64, CredentialRecord>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Grant or revoke admin rights for an existing user
    pub async fn set_admin(&self, subject_id: i64, is_admin: bool) -> bool {
        match self.users.write().await.get_mut(&subject_id) {
            Some(record) => {
                record.is_admin = is_admin;
                true
            }
            None => false,
        }
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<CredentialRecord>, StoreError> {
        let users = self.users.read().await;
        Ok(users.values().find(|record| record.email == email).cloned())
    }

    async fn find_by_id(&self, subject_id: i64) -> Result<Option<Identity>, StoreError> {
        let users = self.users.read().await;
        Ok(users.get(&subject_id).cloned().map(CredentialRecord::into_identity))
    }

    async fn create(&self, credential: NewCredential) -> Result<Identity, StoreError> {
        let mut users = self.users.write().await;
        if users.values().any(|record| record.email == credential.email) {
            return Err(StoreError::Duplicate(credential.email));
        }

        let subject_id = users.keys().max().copied().unwrap_or(0) + 1;
        let record = CredentialRecord {
            subject_id,
            email: credential.email,
            password_hash: credential.password_hash,
            username: credential.username,
            is_admin: false,
        };
        users.insert(subject_id, record.clone());

        Ok(record.into_identity())
    }
}
