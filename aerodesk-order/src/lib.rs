pub mod booking;
pub mod models;
pub mod notification;
pub mod service;
pub mod session;

pub use booking::build_booking;
pub use models::{NotificationOutcome, SessionState};
pub use notification::ConfirmationMessage;
pub use service::BookingService;
pub use session::SeatSelectionSession;
