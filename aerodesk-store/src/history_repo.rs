use aerodesk_core::history::HistoryEntry;
use aerodesk_core::repository::HistoryRepository;
use aerodesk_core::CoreResult;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tokio::sync::Mutex;

use crate::error::StoreError;
use crate::files::{read_optional, write_atomic};

type HistoryFile = BTreeMap<String, Vec<HistoryEntry>>;

/// `history.json`: user email → entries in the order they happened.
pub struct JsonHistoryRepository {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonHistoryRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    async fn load(&self) -> Result<HistoryFile, StoreError> {
        match read_optional(&self.path).await? {
            Some(contents) if !contents.trim().is_empty() => {
                serde_json::from_str(&contents).map_err(|source| StoreError::Decode {
                    path: self.path.clone(),
                    line: source.line(),
                    source,
                })
            }
            _ => Ok(HistoryFile::new()),
        }
    }
}

#[async_trait]
impl HistoryRepository for JsonHistoryRepository {
    async fn record(&self, user_email: &str, entry: HistoryEntry) -> CoreResult<()> {
        let _guard = self.lock.lock().await;

        let mut history = self.load().await?;
        history.entry(user_email.to_string()).or_default().push(entry);

        let encoded = serde_json::to_vec_pretty(&history).map_err(StoreError::from)?;
        write_atomic(&self.path, &encoded).await?;
        Ok(())
    }

    async fn list(&self, user_email: &str) -> CoreResult<Vec<HistoryEntry>> {
        let mut history = self.load().await?;
        Ok(history.remove(user_email).unwrap_or_default())
    }
}
