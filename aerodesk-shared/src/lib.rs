pub mod models;
pub mod pii;

pub use models::events::SeatsBookedEvent;
pub use pii::{mask_email, Masked};
