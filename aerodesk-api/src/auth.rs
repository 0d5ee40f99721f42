use aerodesk_core::identity::Credentials;
use aerodesk_shared::mask_email;
use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use serde::Serialize;
use tracing::info;

use crate::{error::AppError, middleware::auth::CustomerClaims, state::AppState};

#[derive(Debug, Serialize)]
struct RegisterResponse {
    email: String,
}

#[derive(Debug, Serialize)]
struct AuthResponse {
    token: String,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/auth/register", post(register))
        .route("/v1/auth/login", post(login))
}

async fn register(
    State(state): State<AppState>,
    Json(credentials): Json<Credentials>,
) -> Result<(StatusCode, Json<RegisterResponse>), AppError> {
    state.auth_provider.register(&credentials).await?;

    let email = credentials.normalized_email();
    info!("Registered {}", mask_email(&email));
    Ok((StatusCode::CREATED, Json(RegisterResponse { email })))
}

async fn login(
    State(state): State<AppState>,
    Json(credentials): Json<Credentials>,
) -> Result<Json<AuthResponse>, AppError> {
    if !state.auth_provider.verify(&credentials).await? {
        return Err(AppError::AuthenticationError("Invalid email or password".to_string()));
    }

    let claims = CustomerClaims::for_customer(&credentials.normalized_email(), &state.auth);
    let token = claims
        .encode(&state.auth)
        .map_err(|e| AppError::InternalServerError(format!("Token encoding failed: {}", e)))?;

    Ok(Json(AuthResponse { token }))
}
