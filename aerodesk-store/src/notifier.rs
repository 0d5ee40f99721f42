use aerodesk_core::provider::NotificationProvider;
use aerodesk_core::{Booking, CoreResult, Passenger};
use aerodesk_order::ConfirmationMessage;
use aerodesk_shared::mask_email;
use async_trait::async_trait;
use tracing::info;

/// Delivers confirmations to the application log instead of a mail server.
pub struct LogNotifier {
    sender: String,
}

impl LogNotifier {
    pub fn new(sender: impl Into<String>) -> Self {
        Self { sender: sender.into() }
    }
}

#[async_trait]
impl NotificationProvider for LogNotifier {
    async fn send_confirmation(&self, booking: &Booking, passenger: &Passenger) -> CoreResult<()> {
        let message = ConfirmationMessage::render(booking, passenger);
        info!(
            from = %self.sender,
            to = %mask_email(&message.to),
            subject = %message.subject,
            "Confirmation for booking {}:\n{}",
            booking.id,
            message.body
        );
        Ok(())
    }
}
