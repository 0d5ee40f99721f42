use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

use crate::offer::FlightOffer;
use crate::seat::SeatId;

/// A committed booking as written to the booking log.
///
/// `seats[i]` is always `passengers[i].seat`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Booking {
    #[serde(default)]
    pub id: Uuid,
    pub flight: FlightOffer,
    pub seats: Vec<SeatId>,
    pub passengers: Vec<Passenger>,
    #[serde(default)]
    pub booked_by: Option<String>,
    #[serde(default)]
    pub created_at: DateTime<Utc>,
}

impl Booking {
    pub fn leg_numbers(&self) -> BTreeSet<String> {
        self.flight.leg_numbers()
    }

    /// Seats paired with passengers by position, as the invariant demands.
    pub fn is_consistent(&self) -> bool {
        self.seats.len() == self.passengers.len()
            && self
                .seats
                .iter()
                .zip(&self.passengers)
                .all(|(seat, passenger)| *seat == passenger.seat)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Passenger {
    pub name: String,
    pub email: String,
    pub seat: SeatId,
}

/// Details typed in for one seat, in seat order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PassengerInput {
    pub name: String,
    pub email: String,
}
