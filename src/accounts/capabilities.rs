//! Narrow views of the account store. Handlers depend on the one they use.

use async_trait::async_trait;

use super::{errors::AccountError, repo_types::User};

#[async_trait]
pub trait UserRegisterer: Send + Sync {
    /// Creates the account and returns its id.
    async fn register_user(
        &self,
        email: &str,
        password: &str,
        username: &str,
    ) -> Result<i64, AccountError>;
}

#[async_trait]
pub trait UserLoginer: Send + Sync {
    async fn login(&self, email: &str, password: &str) -> Result<User, AccountError>;
}

#[async_trait]
pub trait UserGetter: Send + Sync {
    async fn user(&self, email: &str) -> Result<User, AccountError>;
}

#[async_trait]
pub trait UserLister: Send + Sync {
    async fn users(&self) -> Result<Vec<User>, AccountError>;
}
