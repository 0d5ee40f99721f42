use aerodesk_core::validation::is_well_formed_email;
use aerodesk_core::{Booking, CoreError, CoreResult, FlightOffer, Passenger, PassengerInput, SeatId};
use chrono::Utc;
use std::collections::HashSet;
use uuid::Uuid;

/// Pairs confirmed seats with passenger details by position.
///
/// Every malformed email is reported at once; nothing is built unless all inputs pass.
pub fn build_booking(
    flight: &FlightOffer,
    confirmed_seats: &[SeatId],
    passenger_inputs: &[PassengerInput],
) -> CoreResult<Booking> {
    if confirmed_seats.is_empty() {
        return Err(CoreError::ValidationError("No seats confirmed".to_string()));
    }
    if confirmed_seats.len() != passenger_inputs.len() {
        return Err(CoreError::ValidationError(format!(
            "Expected details for {} passenger(s), got {}",
            confirmed_seats.len(),
            passenger_inputs.len()
        )));
    }
    let distinct: HashSet<&SeatId> = confirmed_seats.iter().collect();
    if distinct.len() != confirmed_seats.len() {
        return Err(CoreError::ValidationError("Seat assigned twice".to_string()));
    }

    let invalid_emails: Vec<String> = passenger_inputs
        .iter()
        .map(|input| input.email.trim())
        .filter(|email| !is_well_formed_email(email))
        .map(str::to_string)
        .collect();
    if !invalid_emails.is_empty() {
        return Err(CoreError::InvalidEmails(invalid_emails));
    }

    let unnamed: Vec<String> = passenger_inputs
        .iter()
        .enumerate()
        .filter(|(_, input)| input.name.trim().is_empty())
        .map(|(i, _)| (i + 1).to_string())
        .collect();
    if !unnamed.is_empty() {
        return Err(CoreError::ValidationError(format!(
            "Missing name for passenger(s) {}",
            unnamed.join(", ")
        )));
    }

    let passengers = confirmed_seats
        .iter()
        .zip(passenger_inputs)
        .map(|(seat, input)| Passenger {
            name: input.name.trim().to_string(),
            email: input.email.trim().to_string(),
            seat: *seat,
        })
        .collect();

    Ok(Booking {
        id: Uuid::new_v4(),
        flight: flight.clone(),
        seats: confirmed_seats.to_vec(),
        passengers,
        booked_by: None,
        created_at: Utc::now(),
    })
}
