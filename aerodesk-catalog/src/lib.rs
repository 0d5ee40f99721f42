pub mod inventory;
pub mod seat_map;
pub mod summary;

pub use inventory::resolve_occupied_seats;
pub use seat_map::{SeatMap, SeatState};
pub use summary::FlightSummary;
