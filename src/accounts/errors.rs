use thiserror::Error;

use super::password::HashError;

/// Failure kinds of the account store. Callers match on the variant and
/// decide what, if anything, to tell the client.
#[derive(Debug, Error)]
pub enum AccountError {
    #[error("account already exists")]
    DuplicateAccount,
    #[error("account not found")]
    NotFound,
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("password hashing failed: {0}")]
    HashingFailure(#[from] HashError),
    #[error("storage failure: {0}")]
    StorageFailure(#[from] sqlx::Error),
}

impl AccountError {
    /// Login failures that must look the same to the client.
    pub fn is_bad_login(&self) -> bool {
        matches!(self, Self::NotFound | Self::InvalidCredentials)
    }
}
