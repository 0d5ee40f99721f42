use aerodesk_catalog::resolve_occupied_seats;
use aerodesk_core::provider::NotificationProvider;
use aerodesk_core::repository::BookingRepository;
use aerodesk_core::{Booking, CoreError, CoreResult, FlightOffer, PassengerInput, SeatId};
use aerodesk_shared::mask_email;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::booking::build_booking;
use crate::models::NotificationOutcome;
use crate::session::SeatSelectionSession;

/// Runs the booking flow against the booking log and the notifier.
pub struct BookingService {
    bookings: Arc<dyn BookingRepository>,
    notifier: Arc<dyn NotificationProvider>,
    commit_lock: Mutex<()>,
}

impl BookingService {
    pub fn new(bookings: Arc<dyn BookingRepository>, notifier: Arc<dyn NotificationProvider>) -> Self {
        Self {
            bookings,
            notifier,
            commit_lock: Mutex::new(()),
        }
    }

    /// Reads the whole log and opens a selection session with the seats it blocks.
    pub async fn open_session(
        &self,
        flight: &FlightOffer,
        passenger_count: usize,
    ) -> CoreResult<SeatSelectionSession> {
        let log = self.bookings.all().await?;
        let session = SeatSelectionSession::open(flight, passenger_count, &log)?;

        info!(
            "Opened seat session {} on {:?}: {} occupied, {} to pick",
            session.id(),
            session.flight_leg_numbers(),
            session.occupied().len(),
            passenger_count
        );
        Ok(session)
    }

    /// Validates passenger details and appends the booking.
    ///
    /// Seats booked by another session since this one opened are refused with `Conflict`.
    pub async fn commit(
        &self,
        flight: &FlightOffer,
        confirmed_seats: &[SeatId],
        passenger_inputs: &[PassengerInput],
        booked_by: Option<String>,
    ) -> CoreResult<Booking> {
        let mut booking = build_booking(flight, confirmed_seats, passenger_inputs)?;
        booking.booked_by = booked_by;

        let _guard = self.commit_lock.lock().await;

        let occupied = resolve_occupied_seats(flight, &self.bookings.all().await?);
        let taken: Vec<String> = booking
            .seats
            .iter()
            .filter(|seat| occupied.contains(*seat))
            .map(ToString::to_string)
            .collect();
        if !taken.is_empty() {
            warn!("Refusing booking, seats already taken: {}", taken.join(", "));
            return Err(CoreError::Conflict(format!(
                "Seat(s) {} are no longer available",
                taken.join(", ")
            )));
        }

        self.bookings.append(&booking).await?;

        info!(
            "Booking {} saved: {} passenger(s) on {:?}",
            booking.id,
            booking.passengers.len(),
            booking.leg_numbers()
        );
        Ok(booking)
    }

    /// Sends one confirmation per passenger. Failures are reported, never rolled back.
    pub async fn notify(&self, booking: &Booking) -> Vec<NotificationOutcome> {
        let mut outcomes = Vec::with_capacity(booking.passengers.len());

        for passenger in &booking.passengers {
            match self.notifier.send_confirmation(booking, passenger).await {
                Ok(()) => {
                    info!("Confirmation sent to {}", mask_email(&passenger.email));
                    outcomes.push(NotificationOutcome::delivered(&passenger.email));
                }
                Err(e) => {
                    warn!("Failed to send confirmation to {}: {}", mask_email(&passenger.email), e);
                    outcomes.push(NotificationOutcome::failed(&passenger.email, e));
                }
            }
        }

        outcomes
    }

    /// Bookings made by one user, oldest first.
    pub async fn bookings_for(&self, user_email: &str) -> CoreResult<Vec<Booking>> {
        let log = self.bookings.all().await?;
        Ok(log
            .into_iter()
            .filter(|b| b.booked_by.as_deref() == Some(user_email))
            .collect())
    }
}
