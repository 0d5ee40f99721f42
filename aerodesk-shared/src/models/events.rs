use uuid::Uuid;

/// Broadcast after a booking is written so open seat maps can grey out the seats.
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq)]
pub struct SeatsBookedEvent {
    pub booking_id: Uuid,
    pub leg_numbers: Vec<String>,
    pub seats: Vec<String>,
    pub booked_at: i64,
}

impl SeatsBookedEvent {
    /// True when the event touches any of the given legs.
    pub fn concerns_leg(&self, leg_number: &str) -> bool {
        self.leg_numbers.iter().any(|leg| leg == leg_number)
    }
}
