use std::fmt::{self, Debug};

use argon2::{
    password_hash::{PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use rand::rngs::OsRng;
use thiserror::Error;

use crate::config::HasherConfig;

#[derive(Debug, Error)]
pub enum HashError {
    #[error("password exceeds {max} bytes")]
    PasswordTooLong { max: usize },
    #[error("argon2: {0}")]
    Argon2(String),
    #[error("hashing task aborted: {0}")]
    Aborted(String),
}

/// One-way password transform used by the account store.
pub trait PasswordHasher: Send + Sync + Debug {
    /// Salted hash in PHC string format.
    fn hash(&self, password: &str) -> Result<String, HashError>;

    /// True only if `candidate` is the password that produced `hash`.
    fn verify(&self, hash: &str, candidate: &str) -> bool;
}

/// Argon2id hasher with configurable cost.
#[derive(Clone)]
pub struct Argon2Hasher {
    argon2: Argon2<'static>,
    max_password_bytes: usize,
}

impl Argon2Hasher {
    pub fn new(config: &HasherConfig) -> Result<Self, HashError> {
        let params = Params::new(
            config.memory_kib,
            config.iterations,
            config.parallelism,
            None,
        )
        .map_err(|e| HashError::Argon2(e.to_string()))?;
        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
            max_password_bytes: config.max_password_bytes,
        })
    }
}

impl Debug for Argon2Hasher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Argon2Hasher")
            .field("max_password_bytes", &self.max_password_bytes)
            .finish_non_exhaustive()
    }
}

impl PasswordHasher for Argon2Hasher {
    fn hash(&self, password: &str) -> Result<String, HashError> {
        if password.len() > self.max_password_bytes {
            return Err(HashError::PasswordTooLong {
                max: self.max_password_bytes,
            });
        }
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| HashError::Argon2(e.to_string()))?
            .to_string();
        Ok(hash)
    }

    fn verify(&self, hash: &str, candidate: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(hash) else {
            return false;
        };
        // Cost params come from the PHC string, so hashes made under an older config still verify.
        self.argon2
            .verify_password(candidate.as_bytes(), &parsed)
            .is_ok()
    }
}

#[cfg(test)]
pub(crate) fn cheap_hasher() -> Argon2Hasher {
    Argon2Hasher::new(&HasherConfig {
        memory_kib: 256,
        iterations: 1,
        parallelism: 1,
        max_password_bytes: 64,
    })
    .expect("valid test params")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_roundtrip() {
        let hasher = cheap_hasher();
        let password = "Secur3P@ssw0rd!";
        let hash = hasher.hash(password).expect("hashing should succeed");
        assert!(hash.starts_with("$argon2id$"));
        assert!(hasher.verify(&hash, password));
    }

    #[test]
    fn verify_rejects_wrong_password() {
        let hasher = cheap_hasher();
        let hash = hasher
            .hash("correct-horse-battery-staple")
            .expect("hashing should succeed");
        assert!(!hasher.verify(&hash, "wrong-password"));
        assert!(!hasher.verify(&hash, ""));
    }

    #[test]
    fn same_password_hashes_differ_but_both_verify() {
        let hasher = cheap_hasher();
        let first = hasher.hash("secret").unwrap();
        let second = hasher.hash("secret").unwrap();

        assert_ne!(first, second);
        assert!(hasher.verify(&first, "secret"));
        assert!(hasher.verify(&second, "secret"));
    }

    #[test]
    fn malformed_hash_never_verifies() {
        let hasher = cheap_hasher();
        assert!(!hasher.verify("not-a-valid-hash", "anything"));
        assert!(!hasher.verify("", ""));
    }

    #[test]
    fn rejects_password_over_limit() {
        let hasher = cheap_hasher();
        let err = hasher.hash(&"x".repeat(65)).unwrap_err();
        assert!(matches!(err, HashError::PasswordTooLong { max: 64 }));

        assert!(hasher.hash(&"x".repeat(64)).is_ok());
    }

    #[test]
    fn hash_made_with_other_cost_still_verifies() {
        let stronger = Argon2Hasher::new(&HasherConfig {
            memory_kib: 512,
            iterations: 2,
            parallelism: 1,
            max_password_bytes: 64,
        })
        .unwrap();
        let hash = stronger.hash("secret").unwrap();
        assert!(cheap_hasher().verify(&hash, "secret"));
    }

    #[test]
    fn invalid_cost_params_are_rejected() {
        let err = Argon2Hasher::new(&HasherConfig {
            memory_kib: 1,
            iterations: 1,
            parallelism: 1,
            max_password_bytes: 64,
        })
        .unwrap_err();
        assert!(matches!(err, HashError::Argon2(_)));
    }
}
