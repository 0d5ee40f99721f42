use aerodesk_core::{FlightOffer, SeatId};
use serde::Serialize;

/// Headline details shown before passenger entry and repeated in confirmations.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FlightSummary {
    pub flight_number: String,
    pub origin: String,
    pub destination: String,
    pub total_price: String,
    pub currency: String,
}

impl FlightSummary {
    pub fn from_offer(offer: &FlightOffer) -> Self {
        let unknown = || "N/A".to_string();
        Self {
            flight_number: offer.headline_flight().unwrap_or_else(unknown),
            origin: offer.origin().map(str::to_string).unwrap_or_else(unknown),
            destination: offer.destination().map(str::to_string).unwrap_or_else(unknown),
            total_price: offer.price.grand_total.clone(),
            currency: offer.price.currency.clone(),
        }
    }

    pub fn lines(&self, seats: &[SeatId]) -> Vec<String> {
        let seats = seats.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ");
        vec![
            format!("- Flight Number: {}", self.flight_number),
            format!("- From: {}", self.origin),
            format!("- To: {}", self.destination),
            format!("- Total Price: {} {}", self.total_price, self.currency),
            format!("- Seats: {}", seats),
        ]
    }
}
