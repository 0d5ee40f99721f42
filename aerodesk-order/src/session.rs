use aerodesk_catalog::{resolve_occupied_seats, SeatMap};
use aerodesk_core::{Booking, CoreError, CoreResult, FlightOffer, SeatId};
use std::collections::{BTreeSet, HashSet};
use uuid::Uuid;

use crate::models::SessionState;

/// Pending seat choice for one flight, bounded by the party size.
///
/// `selected` never exceeds `passenger_count` and never holds an occupied seat.
#[derive(Debug, Clone)]
pub struct SeatSelectionSession {
    id: Uuid,
    flight_leg_numbers: BTreeSet<String>,
    passenger_count: usize,
    occupied: HashSet<SeatId>,
    selected: Vec<SeatId>,
    state: SessionState,
}

impl SeatSelectionSession {
    /// Opens a session, computing occupancy from the booking log once.
    pub fn open(flight: &FlightOffer, passenger_count: usize, bookings: &[Booking]) -> CoreResult<Self> {
        let occupied = resolve_occupied_seats(flight, bookings);
        Self::with_occupied(flight.leg_numbers(), passenger_count, occupied)
    }

    pub fn with_occupied(
        flight_leg_numbers: BTreeSet<String>,
        passenger_count: usize,
        occupied: HashSet<SeatId>,
    ) -> CoreResult<Self> {
        if passenger_count == 0 {
            return Err(CoreError::ValidationError(
                "At least one passenger is required".to_string(),
            ));
        }

        let available = SeatMap::new().available_count(&occupied);
        if passenger_count > available {
            return Err(CoreError::ValidationError(format!(
                "Only {} seat(s) left for {} passenger(s)",
                available, passenger_count
            )));
        }

        Ok(Self {
            id: Uuid::new_v4(),
            flight_leg_numbers,
            passenger_count,
            occupied,
            selected: Vec::new(),
            state: SessionState::Open,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn passenger_count(&self) -> usize {
        self.passenger_count
    }

    pub fn flight_leg_numbers(&self) -> &BTreeSet<String> {
        &self.flight_leg_numbers
    }

    pub fn occupied(&self) -> &HashSet<SeatId> {
        &self.occupied
    }

    /// Current selection in the order seats were picked.
    pub fn selected(&self) -> &[SeatId] {
        &self.selected
    }

    pub fn remaining(&self) -> usize {
        self.passenger_count - self.selected.len()
    }

    /// Flips one seat and returns how many seats are still to pick.
    ///
    /// Occupied seats and picks beyond the party size are ignored without error.
    pub fn toggle_seat(&mut self, seat: SeatId) -> CoreResult<usize> {
        self.ensure_open()?;

        if self.occupied.contains(&seat) {
            return Ok(self.remaining());
        }

        if let Some(pos) = self.selected.iter().position(|s| *s == seat) {
            self.selected.remove(pos);
        } else if self.selected.len() < self.passenger_count {
            self.selected.push(seat);
        }

        Ok(self.remaining())
    }

    /// Transition: Open → Confirmed, handing back the seats in selection order.
    pub fn confirm(&mut self) -> CoreResult<Vec<SeatId>> {
        self.ensure_open()?;

        if self.selected.len() != self.passenger_count {
            return Err(CoreError::IncompleteSelection {
                remaining: self.remaining(),
            });
        }

        self.state = SessionState::Confirmed;
        Ok(self.selected.clone())
    }

    /// Transition: Open → Discarded; the selection is dropped.
    pub fn discard(&mut self) -> CoreResult<()> {
        self.ensure_open()?;
        self.selected.clear();
        self.state = SessionState::Discarded;
        Ok(())
    }

    fn ensure_open(&self) -> CoreResult<()> {
        match self.state {
            SessionState::Open => Ok(()),
            other => Err(CoreError::SessionClosed(other.to_string())),
        }
    }
}
