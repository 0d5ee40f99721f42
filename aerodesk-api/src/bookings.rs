use aerodesk_core::history::{HistoryDetails, HistoryEntry, HistoryKind};
use aerodesk_core::{Booking, CoreError, PassengerInput};
use aerodesk_order::{NotificationOutcome, SessionState};
use aerodesk_shared::SeatsBookedEvent;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::sse::{Event, KeepAlive, Sse},
    routing::{get, post},
    Extension, Json, Router,
};
use futures_util::{Stream, StreamExt};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use tracing::{info, warn};
use uuid::Uuid;

use crate::{error::AppError, middleware::CustomerClaims, sessions::owned_entry, state::AppState};

#[derive(Debug, Deserialize)]
pub struct PassengerDetailsRequest {
    pub passengers: Vec<PassengerInput>,
}

#[derive(Debug, Serialize)]
pub struct BookingResponse {
    pub booking: Booking,
    pub notifications: Vec<NotificationOutcome>,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/sessions/{id}/booking", post(commit_booking))
        .route("/v1/bookings", get(list_bookings))
        .route("/v1/flights/{leg}/seats/stream", get(seat_stream))
}

/// POST /v1/sessions/{id}/booking
/// Assigns passengers to the confirmed seats and writes the booking
async fn commit_booking(
    State(state): State<AppState>,
    Extension(claims): Extension<CustomerClaims>,
    Path(id): Path<Uuid>,
    Json(req): Json<PassengerDetailsRequest>,
) -> Result<(StatusCode, Json<BookingResponse>), AppError> {
    // 1. Snapshot the confirmed selection
    let (flight, seats) = {
        let mut sessions = state.sessions.lock().await;
        let entry = owned_entry(&mut sessions, id, &claims)?;
        match entry.session.state() {
            SessionState::Confirmed => {}
            SessionState::Open => {
                return Err(AppError::ConflictError(
                    "Confirm the seat selection before booking".to_string(),
                ))
            }
            closed => return Err(CoreError::SessionClosed(closed.to_string()).into()),
        }
        (entry.flight.clone(), entry.session.selected().to_vec())
    };

    // 2. Validate and append
    let booking = state
        .booking_service
        .commit(&flight, &seats, &req.passengers, Some(claims.sub.clone()))
        .await?;
    state.sessions.lock().await.remove(&id);

    // 3. History, live seat maps, confirmations
    let entry = HistoryEntry::new(
        HistoryKind::Booking,
        HistoryDetails {
            origin: flight.origin().map(str::to_string),
            destination: flight.destination().map(str::to_string),
            passengers: Some(booking.passengers.len() as u32),
            price_max: None,
        },
    );
    if let Err(e) = state.history.record(&claims.sub, entry).await {
        warn!("Failed to record booking history: {}", e);
    }

    let event = SeatsBookedEvent {
        booking_id: booking.id,
        leg_numbers: booking.leg_numbers().into_iter().collect(),
        seats: booking.seats.iter().map(ToString::to_string).collect(),
        booked_at: booking.created_at.timestamp(),
    };
    // no subscribers is fine
    let _ = state.sse_tx.send(event);

    let notifications = state.booking_service.notify(&booking).await;
    info!("Booking {} committed from session {}", booking.id, id);

    Ok((StatusCode::CREATED, Json(BookingResponse { booking, notifications })))
}

/// GET /v1/bookings
async fn list_bookings(
    State(state): State<AppState>,
    Extension(claims): Extension<CustomerClaims>,
) -> Result<Json<Vec<Booking>>, AppError> {
    Ok(Json(state.booking_service.bookings_for(&claims.sub).await?))
}

/// GET /v1/flights/{leg}/seats/stream
/// Pushes seats as other users book them on the leg
async fn seat_stream(
    State(state): State<AppState>,
    Path(leg): Path<String>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = state.sse_tx.subscribe();
    let leg = leg.to_ascii_uppercase();

    let stream = tokio_stream::wrappers::BroadcastStream::new(rx).filter_map(move |result| {
        let leg = leg.clone();
        async move {
            match result {
                Ok(event) if event.concerns_leg(&leg) => {
                    let data = serde_json::to_string(&event).ok()?;
                    Some(Ok(Event::default().event("seats_booked").data(data)))
                }
                _ => None,
            }
        }
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}
