use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString},
    Argon2,
};

use crate::error::StoreError;

/// Argon2id hashing for the user registry.
#[derive(Debug, Clone, Default)]
pub struct PasswordHasher;

impl PasswordHasher {
    pub fn new() -> Self {
        Self
    }

    /// Hashes with a fresh random salt; output is a PHC string.
    pub fn hash_password(&self, password: &str) -> Result<String, StoreError> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| StoreError::Hash(e.to_string()))
    }

    /// `Ok(false)` on mismatch; malformed stored hashes are errors.
    pub fn verify_password(&self, password: &str, hash: &str) -> Result<bool, StoreError> {
        let parsed = PasswordHash::new(hash).map_err(|e| StoreError::Hash(e.to_string()))?;

        match Argon2::default().verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(StoreError::Hash(e.to_string())),
        }
    }

    /// `hash_password` on the blocking pool, keeping the executor free.
    pub async fn hash_off_thread(&self, password: String) -> Result<String, StoreError> {
        let hasher = self.clone();
        tokio::task::spawn_blocking(move || hasher.hash_password(&password))
            .await
            .map_err(|e| StoreError::Hash(e.to_string()))?
    }

    /// `verify_password` on the blocking pool.
    pub async fn verify_off_thread(&self, password: String, hash: String) -> Result<bool, StoreError> {
        let hasher = self.clone();
        tokio::task::spawn_blocking(move || hasher.verify_password(&password, &hash))
            .await
            .map_err(|e| StoreError::Hash(e.to_string()))?
    }
}
