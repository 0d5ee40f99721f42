pub mod booking;
pub mod history;
pub mod identity;
pub mod offer;
pub mod provider;
pub mod repository;
pub mod search;
pub mod seat;
pub mod validation;

pub use booking::{Booking, Passenger, PassengerInput};
pub use offer::{Dictionaries, FlightOffer, Itinerary, Segment};
pub use seat::SeatId;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    ValidationError(String),
    #[error("The following emails are invalid: {}", .0.join(", "))]
    InvalidEmails(Vec<String>),
    #[error("Incomplete selection: {remaining} seat(s) remaining")]
    IncompleteSelection { remaining: usize },
    #[error("Selection session is already {0}")]
    SessionClosed(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Provider unavailable: {0}")]
    ProviderUnavailable(String),
    #[error("Storage error: {0}")]
    StorageError(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
