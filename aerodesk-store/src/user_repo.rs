use aerodesk_core::identity::{AuthProvider, Credentials};
use aerodesk_core::{CoreError, CoreResult};
use aerodesk_shared::mask_email;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tokio::sync::Mutex;
use tracing::info;

use crate::error::StoreError;
use crate::files::{read_optional, write_atomic};
use crate::password::PasswordHasher;

/// `users.json`: email → Argon2 hash.
pub struct JsonUserStore {
    path: PathBuf,
    hasher: PasswordHasher,
    lock: Mutex<()>,
}

impl JsonUserStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            hasher: PasswordHasher::new(),
            lock: Mutex::new(()),
        }
    }

    async fn load(&self) -> Result<BTreeMap<String, String>, StoreError> {
        match read_optional(&self.path).await? {
            Some(contents) if !contents.trim().is_empty() => {
                serde_json::from_str(&contents).map_err(|source| StoreError::Decode {
                    path: self.path.clone(),
                    line: source.line(),
                    source,
                })
            }
            _ => Ok(BTreeMap::new()),
        }
    }
}

#[async_trait]
impl AuthProvider for JsonUserStore {
    async fn register(&self, credentials: &Credentials) -> CoreResult<()> {
        credentials.validate()?;
        let email = credentials.normalized_email();

        let _guard = self.lock.lock().await;
        let mut users = self.load().await?;

        if users.contains_key(&email) {
            return Err(CoreError::Conflict("Email already registered".to_string()));
        }

        let hash = self
            .hasher
            .hash_off_thread(credentials.password.expose().clone())
            .await?;
        users.insert(email.clone(), hash);

        let encoded = serde_json::to_vec_pretty(&users).map_err(StoreError::from)?;
        write_atomic(&self.path, &encoded).await?;

        info!("Registered user {}", mask_email(&email));
        Ok(())
    }

    async fn verify(&self, credentials: &Credentials) -> CoreResult<bool> {
        let users = self.load().await?;

        match users.get(&credentials.normalized_email()) {
            Some(hash) => Ok(self
                .hasher
                .verify_off_thread(credentials.password.expose().clone(), hash.clone())
                .await?),
            None => Ok(false),
        }
    }
}
