use aerodesk_catalog::seat_map::SeatRow;
use aerodesk_catalog::{FlightSummary, SeatMap};
use aerodesk_core::search::MAX_PASSENGERS;
use aerodesk_core::seat::SeatIdError;
use aerodesk_core::{CoreError, FlightOffer, SeatId};
use aerodesk_order::SessionState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tracing::{debug, info};
use uuid::Uuid;

use crate::{
    error::AppError,
    middleware::CustomerClaims,
    state::{evict_expired, AppState, SessionEntry},
};

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct OpenSessionRequest {
    pub flight: FlightOffer,
    pub passengers: usize,
}

#[derive(Debug, Serialize)]
pub struct SessionView {
    pub id: Uuid,
    pub state: SessionState,
    pub flight: FlightSummary,
    pub passenger_count: usize,
    pub selected: Vec<SeatId>,
    pub remaining: usize,
    pub available: usize,
    pub rows: Vec<SeatRow>,
    pub expires_at: DateTime<Utc>,
}

impl SessionView {
    pub fn from_entry(entry: &SessionEntry) -> Self {
        let session = &entry.session;
        let seat_map = SeatMap::new();
        Self {
            id: session.id(),
            state: session.state(),
            flight: FlightSummary::from_offer(&entry.flight),
            passenger_count: session.passenger_count(),
            selected: session.selected().to_vec(),
            remaining: session.remaining(),
            available: seat_map.available_count(session.occupied()),
            rows: seat_map.render(session.occupied(), session.selected()),
            expires_at: entry.expires_at,
        }
    }
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/sessions", post(open_session))
        .route("/v1/sessions/{id}", get(get_session).delete(discard_session))
        .route("/v1/sessions/{id}/seats/{seat}", post(toggle_seat))
        .route("/v1/sessions/{id}/confirm", post(confirm_session))
}

/// Looks up a live session and checks it belongs to the caller.
///
/// Expired sessions are evicted first, so they read as not found.
pub(crate) fn owned_entry<'a>(
    sessions: &'a mut HashMap<Uuid, SessionEntry>,
    id: Uuid,
    claims: &CustomerClaims,
) -> Result<&'a mut SessionEntry, AppError> {
    let evicted = evict_expired(sessions);
    if evicted > 0 {
        debug!("Evicted {} expired session(s)", evicted);
    }

    let entry = sessions
        .get_mut(&id)
        .ok_or_else(|| AppError::NotFoundError(format!("Session {} not found", id)))?;

    if entry.owner != claims.sub {
        return Err(AppError::AuthorizationError(
            "Session does not belong to you".to_string(),
        ));
    }
    Ok(entry)
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /v1/sessions
/// Reads the booking log and opens a seat map for the flight
async fn open_session(
    State(state): State<AppState>,
    Extension(claims): Extension<CustomerClaims>,
    Json(req): Json<OpenSessionRequest>,
) -> Result<(StatusCode, Json<SessionView>), AppError> {
    if req.passengers > MAX_PASSENGERS as usize {
        return Err(CoreError::ValidationError(format!(
            "Passengers must be between 1 and {}",
            MAX_PASSENGERS
        ))
        .into());
    }

    let session = state.booking_service.open_session(&req.flight, req.passengers).await?;
    let entry = SessionEntry {
        owner: claims.sub.clone(),
        flight: req.flight,
        session,
        expires_at: Utc::now() + state.session_ttl,
    };
    let view = SessionView::from_entry(&entry);

    let mut sessions = state.sessions.lock().await;
    evict_expired(&mut sessions);
    sessions.insert(view.id, entry);
    Ok((StatusCode::CREATED, Json(view)))
}

/// GET /v1/sessions/{id}
async fn get_session(
    State(state): State<AppState>,
    Extension(claims): Extension<CustomerClaims>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    let mut sessions = state.sessions.lock().await;
    let entry = owned_entry(&mut sessions, id, &claims)?;
    Ok(Json(SessionView::from_entry(entry)))
}

/// POST /v1/sessions/{id}/seats/{seat}
/// Selects a free seat, or releases it when already selected
async fn toggle_seat(
    State(state): State<AppState>,
    Extension(claims): Extension<CustomerClaims>,
    Path((id, seat)): Path<(Uuid, String)>,
) -> Result<Json<SessionView>, AppError> {
    let seat: SeatId = seat
        .parse()
        .map_err(|e: SeatIdError| AppError::ValidationError(e.to_string()))?;

    let mut sessions = state.sessions.lock().await;
    let entry = owned_entry(&mut sessions, id, &claims)?;
    entry.session.toggle_seat(seat)?;

    Ok(Json(SessionView::from_entry(entry)))
}

/// POST /v1/sessions/{id}/confirm
async fn confirm_session(
    State(state): State<AppState>,
    Extension(claims): Extension<CustomerClaims>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    let mut sessions = state.sessions.lock().await;
    let entry = owned_entry(&mut sessions, id, &claims)?;
    let seats = entry.session.confirm()?;

    info!("Session {} confirmed seats {:?}", id, seats);
    Ok(Json(SessionView::from_entry(entry)))
}

/// DELETE /v1/sessions/{id}
/// Drops the pending selection; nothing is written
async fn discard_session(
    State(state): State<AppState>,
    Extension(claims): Extension<CustomerClaims>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    let mut sessions = state.sessions.lock().await;
    let entry = owned_entry(&mut sessions, id, &claims)?;
    entry.session.discard()?;
    let view = SessionView::from_entry(entry);

    sessions.remove(&id);
    info!("Session {} discarded", id);
    Ok(Json(view))
}
