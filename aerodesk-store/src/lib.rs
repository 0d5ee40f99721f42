pub mod app_config;
pub mod booking_repo;
pub mod error;
mod files;
pub mod flight_repo;
pub mod history_repo;
pub mod notifier;
pub mod password;
pub mod user_repo;

pub use booking_repo::JsonLinesBookingRepository;
pub use error::StoreError;
pub use flight_repo::FixtureSearchProvider;
pub use history_repo::JsonHistoryRepository;
pub use notifier::LogNotifier;
pub use user_repo::JsonUserStore;
