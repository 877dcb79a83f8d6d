use std::sync::Arc;

use async_trait::async_trait;
use sqlx::SqlitePool;

use super::{
    capabilities::{UserGetter, UserLister, UserLoginer, UserRegisterer},
    errors::AccountError,
    password::{HashError, PasswordHasher},
    repo_types::{User, UserRow},
};

/// Starting grant credited to `demo_balance` on registration.
pub const INITIAL_DEMO_BALANCE: i64 = 5000;

// Hashed once per store so logins for unknown emails still pay for one verification.
const DUMMY_PASSWORD: &str = "no-such-account";

const SELECT_USER: &str = r#"
    SELECT id, email, password_hash, username, balance, demo_balance,
           address, access_token, roles, avatar, game_started, switch_account
    FROM users
"#;

/// Custody of the `users` table. Password hashes never leave this type.
#[derive(Debug, Clone)]
pub struct AccountStore {
    db: SqlitePool,
    hasher: Arc<dyn PasswordHasher>,
    dummy_hash: Option<Arc<str>>,
}

impl AccountStore {
    pub fn new(db: SqlitePool, hasher: Arc<dyn PasswordHasher>) -> Self {
        let dummy_hash = hasher.hash(DUMMY_PASSWORD).ok().map(Arc::from);
        Self {
            db,
            hasher,
            dummy_hash,
        }
    }

    /// Hash the password and insert a fresh account.
    ///
    /// Uniqueness is left to the `UNIQUE` constraint on `email`; there is no
    /// lookup before the insert, so concurrent registrations of one email
    /// produce exactly one row.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        username: &str,
    ) -> Result<i64, AccountError> {
        let password_hash = self.hash(password).await?;

        let result = sqlx::query(
            r#"
            INSERT INTO users (email, password_hash, username, balance, demo_balance)
            VALUES (?, ?, ?, 0, ?)
            "#,
        )
        .bind(email)
        .bind(&password_hash)
        .bind(username)
        .bind(INITIAL_DEMO_BALANCE)
        .execute(&self.db)
        .await
        .map_err(|e| {
            if e.as_database_error().is_some_and(|db| db.is_unique_violation()) {
                AccountError::DuplicateAccount
            } else {
                AccountError::StorageFailure(e)
            }
        })?;

        Ok(result.last_insert_rowid())
    }

    /// Check credentials and return the account on success.
    ///
    /// An unknown email is verified against a dummy hash before `NotFound` is
    /// returned, so both failures take about the same time.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, AccountError> {
        let row = self.find_row(email).await?;

        let stored = match &row {
            Some(r) => r.password_hash.clone(),
            None => self.dummy_hash.as_deref().unwrap_or_default().to_owned(),
        };
        let verified = self.verify(stored, password).await?;

        let Some(row) = row else {
            return Err(AccountError::NotFound);
        };
        if !verified {
            return Err(AccountError::InvalidCredentials);
        }
        Ok(row.into())
    }

    pub async fn get_by_email(&self, email: &str) -> Result<User, AccountError> {
        self.find_row(email)
            .await?
            .map(User::from)
            .ok_or(AccountError::NotFound)
    }

    /// Every account, oldest first.
    pub async fn list_all(&self) -> Result<Vec<User>, AccountError> {
        let rows = sqlx::query_as::<_, UserRow>(&format!("{SELECT_USER} ORDER BY id"))
            .fetch_all(&self.db)
            .await?;
        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn find_row(&self, email: &str) -> Result<Option<UserRow>, AccountError> {
        let row = sqlx::query_as::<_, UserRow>(&format!("{SELECT_USER} WHERE email = ?"))
            .bind(email)
            .fetch_optional(&self.db)
            .await?;
        Ok(row)
    }

    // Argon2 is CPU-bound; keep it off the async workers.
    async fn verify(&self, stored: String, candidate: &str) -> Result<bool, HashError> {
        let hasher = Arc::clone(&self.hasher);
        let candidate = candidate.to_owned();
        tokio::task::spawn_blocking(move || hasher.verify(&stored, &candidate))
            .await
            .map_err(|e| HashError::Aborted(e.to_string()))
    }

    async fn hash(&self, password: &str) -> Result<String, HashError> {
        let hasher = Arc::clone(&self.hasher);
        let password = password.to_owned();
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| HashError::Aborted(e.to_string()))?
    }
}

#[async_trait]
impl UserRegisterer for AccountStore {
    async fn register_user(
        &self,
        email: &str,
        password: &str,
        username: &str,
    ) -> Result<i64, AccountError> {
        self.register(email, password, username).await
    }
}

#[async_trait]
impl UserLoginer for AccountStore {
    async fn login(&self, email: &str, password: &str) -> Result<User, AccountError> {
        AccountStore::login(self, email, password).await
    }
}

#[async_trait]
impl UserGetter for AccountStore {
    async fn user(&self, email: &str) -> Result<User, AccountError> {
        self.get_by_email(email).await
    }
}

#[async_trait]
impl UserLister for AccountStore {
    async fn users(&self) -> Result<Vec<User>, AccountError> {
        self.list_all().await
    }
}
