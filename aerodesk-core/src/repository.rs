use async_trait::async_trait;

use crate::booking::Booking;
use crate::history::HistoryEntry;
use crate::CoreResult;

/// Append-only booking log.
///
/// A store that has never been written reads as empty, never as an error.
#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn append(&self, booking: &Booking) -> CoreResult<()>;

    async fn all(&self) -> CoreResult<Vec<Booking>>;
}

/// Per-user search and booking history.
#[async_trait]
pub trait HistoryRepository: Send + Sync {
    async fn record(&self, user_email: &str, entry: HistoryEntry) -> CoreResult<()>;

    async fn list(&self, user_email: &str) -> CoreResult<Vec<HistoryEntry>>;
}
