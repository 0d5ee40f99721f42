use aerodesk_core::repository::BookingRepository;
use aerodesk_core::{Booking, CoreResult};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::{debug, error};

use crate::error::StoreError;
use crate::files::{ensure_parent, read_optional};

/// Booking log kept as JSON Lines: one complete booking per line, append-only.
pub struct JsonLinesBookingRepository {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonLinesBookingRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn append_line(&self, booking: &Booking) -> Result<(), StoreError> {
        let mut line = serde_json::to_vec(booking)?;
        line.push(b'\n');

        let _guard = self.write_lock.lock().await;
        ensure_parent(&self.path).await?;

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|e| StoreError::io(&self.path, e))?;

        // single write so a line is never split across appends
        file.write_all(&line)
            .await
            .map_err(|e| StoreError::io(&self.path, e))?;
        file.sync_data()
            .await
            .map_err(|e| StoreError::io(&self.path, e))?;
        Ok(())
    }

    async fn read_all(&self) -> Result<Vec<Booking>, StoreError> {
        let Some(contents) = read_optional(&self.path).await? else {
            debug!("No booking log at {}, treating as empty", self.path.display());
            return Ok(Vec::new());
        };

        contents
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(i, line)| {
                serde_json::from_str(line).map_err(|source| StoreError::Decode {
                    path: self.path.clone(),
                    line: i + 1,
                    source,
                })
            })
            .collect()
    }
}

#[async_trait]
impl BookingRepository for JsonLinesBookingRepository {
    async fn append(&self, booking: &Booking) -> CoreResult<()> {
        self.append_line(booking).await.map_err(|e| {
            error!("Failed to save booking {}: {}", booking.id, e);
            e.into()
        })
    }

    async fn all(&self) -> CoreResult<Vec<Booking>> {
        Ok(self.read_all().await?)
    }
}
