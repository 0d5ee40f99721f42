use aerodesk_core::identity::AuthProvider;
use aerodesk_core::provider::SearchProvider;
use aerodesk_core::repository::HistoryRepository;
use aerodesk_core::FlightOffer;
use aerodesk_order::{BookingService, SeatSelectionSession};
use aerodesk_shared::SeatsBookedEvent;
use aerodesk_store::app_config::Config;
use aerodesk_store::{
    FixtureSearchProvider, JsonHistoryRepository, JsonLinesBookingRepository, JsonUserStore,
    LogNotifier,
};
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{broadcast, Mutex};
use uuid::Uuid;

#[derive(Clone)]
pub struct AuthConfig {
    pub secret: String,
    pub expiration: u64,
}

/// A selection session together with the user and flight it was opened for.
pub struct SessionEntry {
    pub owner: String,
    pub flight: FlightOffer,
    pub session: SeatSelectionSession,
    pub expires_at: DateTime<Utc>,
}

impl SessionEntry {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

pub type SessionRegistry = Arc<Mutex<HashMap<Uuid, SessionEntry>>>;

/// Drops sessions past their expiry and returns how many went.
pub fn evict_expired(sessions: &mut HashMap<Uuid, SessionEntry>) -> usize {
    let now = Utc::now();
    let before = sessions.len();
    sessions.retain(|_, entry| !entry.is_expired(now));
    before - sessions.len()
}

#[derive(Clone)]
pub struct AppState {
    pub booking_service: Arc<BookingService>,
    pub auth_provider: Arc<dyn AuthProvider>,
    pub search_provider: Arc<dyn SearchProvider>,
    pub history: Arc<dyn HistoryRepository>,
    pub sessions: SessionRegistry,
    pub sse_tx: broadcast::Sender<SeatsBookedEvent>,
    pub auth: AuthConfig,
    pub session_ttl: Duration,
}

impl AppState {
    /// Wires the file-backed stores and providers named by the configuration.
    pub fn from_config(config: &Config) -> Self {
        let storage = &config.storage;
        let booking_service = BookingService::new(
            Arc::new(JsonLinesBookingRepository::new(storage.bookings_path())),
            Arc::new(LogNotifier::new(config.notification.sender.clone())),
        );
        let (sse_tx, _) = broadcast::channel(100);

        Self {
            booking_service: Arc::new(booking_service),
            auth_provider: Arc::new(JsonUserStore::new(storage.users_path())),
            search_provider: Arc::new(FixtureSearchProvider::new(config.provider.fixture_path.clone())),
            history: Arc::new(JsonHistoryRepository::new(storage.history_path())),
            sessions: Arc::new(Mutex::new(HashMap::new())),
            sse_tx,
            auth: AuthConfig {
                secret: config.auth.jwt_secret.clone(),
                expiration: config.auth.jwt_expiration_seconds,
            },
            session_ttl: Duration::seconds(config.sessions.ttl_seconds as i64),
        }
    }
}
