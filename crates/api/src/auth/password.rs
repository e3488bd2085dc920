//! Password hashing behind the [`CredentialHasher`] capability.
//!
//! Handlers only see the trait object stored in the application state, so
//! the algorithm (and its cost) is chosen once at startup. The default
//! [`Argon2Hasher`] uses Argon2id with a random salt from [`OsRng`] and
//! stores hashes in PHC string format, which embeds the parameters and salt.

use std::sync::Arc;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};

use crate::error::{AppError, AppResult};

pub type PasswordError = argon2::password_hash::Error;

/// Irreversible, salted password hashing.
pub trait CredentialHasher: Send + Sync {
    /// Hash a plaintext password for storage.
    fn hash(&self, password: &str) -> Result<String, PasswordError>;

    /// Check a plaintext password against a stored hash.
    ///
    /// Returns `Ok(false)` on mismatch; `Err` only when the stored hash is unusable.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordError>;
}

/// Argon2id hasher with configurable cost parameters.
#[derive(Debug, Clone, Default)]
pub struct Argon2Hasher {
    params: Params,
}

impl Argon2Hasher {
    /// Hasher with the crate's recommended default parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Hasher with explicit cost parameters (e.g. cheap ones for tests).
    pub fn with_params(params: Params) -> Self {
        Self { params }
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }
}

impl CredentialHasher for Argon2Hasher {
    fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self.argon2().hash_password(password.as_bytes(), &salt)?;
        Ok(hash.to_string())
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordError> {
        let parsed_hash = PasswordHash::new(hash)?;
        match self.argon2().verify_password(password.as_bytes(), &parsed_hash) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(e),
        }
    }
}

/// Hash on the blocking pool; Argon2 is CPU-bound.
pub async fn hash_blocking(hasher: Arc<dyn CredentialHasher>, password: String) -> AppResult<String> {
    tokio::task::spawn_blocking(move || hasher.hash(&password))
        .await
        .map_err(|e| AppError::InternalError(format!("Password hashing task failed: {e}")))?
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))
}

/// Verify on the blocking pool; Argon2 is CPU-bound.
pub async fn verify_blocking(
    hasher: Arc<dyn CredentialHasher>,
    password: String,
    hash: String,
) -> AppResult<bool> {
    tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
        .await
        .map_err(|e| AppError::InternalError(format!("Password verification task failed: {e}")))?
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cheap_hasher() -> Argon2Hasher {
        Argon2Hasher::with_params(Params::new(8, 1, 1, None).expect("valid params"))
    }

    #[test]
    fn test_hash_and_verify() {
        let hasher = cheap_hasher();
        let password = "correct-horse-battery-staple";
        let hash = hasher.hash(password).expect("hashing should succeed");

        // The hash must be a valid PHC string starting with the argon2id identifier.
        assert!(
            hash.starts_with("$argon2id$"),
            "expected argon2id PHC prefix"
        );
        assert!(!hash.contains(password));

        let verified = hasher.verify(password, &hash).expect("verify should succeed");
        assert!(verified, "correct password should verify as true");
    }

    #[test]
    fn test_wrong_password_fails() {
        let hasher = cheap_hasher();
        let hash = hasher.hash("real-password").expect("hashing should succeed");
        let verified = hasher
            .verify("wrong-password", &hash)
            .expect("verify should succeed");
        assert!(!verified, "wrong password should verify as false");
    }

    #[test]
    fn test_same_password_gets_different_salts() {
        let hasher = cheap_hasher();
        let a = hasher.hash("salasana").unwrap();
        let b = hasher.hash("salasana").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_malformed_hash_is_an_error() {
        let hasher = cheap_hasher();
        assert!(hasher.verify("anything", "not-a-phc-string").is_err());
    }
}
