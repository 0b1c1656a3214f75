//! Password value object.
//!
//! Passwords are stored as salted Argon2id digests in PHC string format.
//! Plaintext never leaves the request DTO.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use thiserror::Error;

/// Password hashing failures.
#[derive(Error, Debug)]
pub enum PasswordError {
    #[error("password hash failed: {0}")]
    Hash(argon2::password_hash::Error),

    #[error("password hashing task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Hashed password.
#[derive(Clone, PartialEq, Eq)]
pub struct Password {
    hash: String,
}

impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Password")
            .field("hash", &"[REDACTED]")
            .finish()
    }
}

impl Password {
    /// Hash a plaintext password with a fresh random salt.
    pub fn hash(plain_text: &str) -> Result<Self, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(plain_text.as_bytes(), &salt)
            .map_err(PasswordError::Hash)?;

        Ok(Self {
            hash: hash.to_string(),
        })
    }

    /// Wrap a stored digest.
    pub fn from_hash(hash: impl Into<String>) -> Self {
        Self { hash: hash.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.hash
    }

    pub fn into_string(self) -> String {
        self.hash
    }

    /// Check a plaintext password against this digest.
    ///
    /// A stored value that is not a valid PHC string never matches.
    pub fn verify(&self, plain_text: &str) -> bool {
        match PasswordHash::new(&self.hash) {
            Ok(parsed) => Argon2::default()
                .verify_password(plain_text.as_bytes(), &parsed)
                .is_ok(),
            Err(e) => {
                tracing::error!("Stored password is not a valid hash: {}", e);
                false
            }
        }
    }

    /// [`Password::hash`] on the blocking pool, so request workers stay free.
    pub async fn hash_blocking(plain_text: String) -> Result<Self, PasswordError> {
        let span = tracing::Span::current();
        tokio::task::spawn_blocking(move || span.in_scope(|| Self::hash(&plain_text))).await?
    }

    /// [`Password::verify`] on the blocking pool.
    pub async fn verify_blocking(self, plain_text: String) -> Result<bool, PasswordError> {
        let span = tracing::Span::current();
        let matched =
            tokio::task::spawn_blocking(move || span.in_scope(|| self.verify(&plain_text))).await?;
        Ok(matched)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hash_and_verify() {
        let password = Password::hash("pw").unwrap();

        assert!(password.verify("pw"));
        assert!(!password.verify("wrong"));
        assert_ne!(password.as_str(), "pw");
    }

    #[test]
    fn test_same_password_different_salts() {
        let first = Password::hash("same-password").unwrap();
        let second = Password::hash("same-password").unwrap();

        assert_ne!(first.as_str(), second.as_str());
        assert!(first.verify("same-password"));
        assert!(second.verify("same-password"));
    }

    #[test]
    fn test_garbage_digest_never_verifies() {
        let stored = Password::from_hash("pw");
        assert!(!stored.verify("pw"));
    }

    #[tokio::test]
    async fn test_blocking_pool_hash_and_verify() {
        let password = Password::hash_blocking("pw".to_string()).await.unwrap();

        assert!(password.clone().verify_blocking("pw".to_string()).await.unwrap());
        assert!(!password.verify_blocking("wrong".to_string()).await.unwrap());
    }
}
