use aerodesk_core::history::{HistoryDetails, HistoryEntry, HistoryKind};
use aerodesk_core::search::{SearchRequest, SearchResults};
use axum::{
    extract::State,
    routing::{get, post},
    Extension, Json, Router,
};
use serde::Serialize;
use tracing::warn;

use crate::{error::AppError, middleware::CustomerClaims, state::AppState};

#[derive(Debug, Serialize)]
pub struct HistoryItem {
    #[serde(flatten)]
    pub entry: HistoryEntry,
    pub summary: String,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/flights/search", post(search_flights))
        .route("/v1/history", get(list_history))
}

/// POST /v1/flights/search
async fn search_flights(
    State(state): State<AppState>,
    Extension(claims): Extension<CustomerClaims>,
    Json(req): Json<SearchRequest>,
) -> Result<Json<SearchResults>, AppError> {
    let req = req.validated()?;
    let results = state.search_provider.search(&req).await?;

    if !results.offers.is_empty() {
        let entry = HistoryEntry::new(
            HistoryKind::Search,
            HistoryDetails {
                origin: Some(req.origin.clone()),
                destination: Some(req.destination.clone()),
                passengers: Some(req.passengers),
                price_max: req.filters.max_price,
            },
        );
        // a lost history line never fails the search
        if let Err(e) = state.history.record(&claims.sub, entry).await {
            warn!("Failed to record search history: {}", e);
        }
    }

    Ok(Json(results))
}

/// GET /v1/history
async fn list_history(
    State(state): State<AppState>,
    Extension(claims): Extension<CustomerClaims>,
) -> Result<Json<Vec<HistoryItem>>, AppError> {
    let items = state
        .history
        .list(&claims.sub)
        .await?
        .into_iter()
        .map(|entry| HistoryItem {
            summary: entry.describe(),
            entry,
        })
        .collect();

    Ok(Json(items))
}
