use async_trait::async_trait;

use crate::booking::{Booking, Passenger};
use crate::search::{SearchRequest, SearchResults};
use crate::CoreResult;

/// Third-party flight search. Failures surface as `ProviderUnavailable`; callers do not retry.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    async fn search(&self, request: &SearchRequest) -> CoreResult<SearchResults>;
}

/// Sends a booking confirmation to one passenger.
#[async_trait]
pub trait NotificationProvider: Send + Sync {
    async fn send_confirmation(&self, booking: &Booking, passenger: &Passenger) -> CoreResult<()>;
}
