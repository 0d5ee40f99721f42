use aerodesk_catalog::FlightSummary;
use aerodesk_core::{Booking, Passenger};
use serde::Serialize;

pub const CONFIRMATION_SUBJECT: &str = "Flight Booking Confirmation";

/// A rendered confirmation email for one passenger.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ConfirmationMessage {
    pub to: String,
    pub subject: String,
    pub body: String,
}

impl ConfirmationMessage {
    pub fn render(booking: &Booking, passenger: &Passenger) -> Self {
        let summary = FlightSummary::from_offer(&booking.flight);

        let body = [
            format!("Dear {},", passenger.name),
            String::new(),
            "Thank you for booking with us!".to_string(),
            String::new(),
            "Flight Details:".to_string(),
            format!("- Flight Number: {}", summary.flight_number),
            format!("- From: {}", summary.origin),
            format!("- To: {}", summary.destination),
            format!("- Seat: {}", passenger.seat),
            format!("- Total Price: {} {}", summary.total_price, summary.currency),
            format!("- Booking Reference: {}", booking_reference(booking)),
            String::new(),
            "Have a great trip!".to_string(),
            String::new(),
            "Best regards,".to_string(),
            "Flight Booking System".to_string(),
        ]
        .join("\n");

        Self {
            to: passenger.email.clone(),
            subject: CONFIRMATION_SUBJECT.to_string(),
            body,
        }
    }
}

/// Short upper-case reference derived from the booking id.
pub fn booking_reference(booking: &Booking) -> String {
    booking.id.simple().to_string()[..6].to_uppercase()
}
