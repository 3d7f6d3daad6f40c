use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::{
    error::Result,
    extract::Json,
    services::auth as auth_service,
    state::AppState,
    validation::auth::{LoginPayload, RegisterPayload, validate_login, validate_register},
};

/// The response payload for registration.
#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// The response payload for a successful login.
#[derive(Serialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Handles credential registration.
#[axum::debug_handler]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterPayload>,
) -> Result<impl IntoResponse> {
    tracing::info!("📝 Register attempt: {}", payload.email);
    validate_register(&payload)?;

    let credential = auth_service::register(&state.db, &payload.email, &payload.password).await?;
    tracing::info!("✅ Credential registered: {}", credential.id);

    let response = MessageResponse {
        message: "Registration successful".to_string(),
    };

    Ok((StatusCode::CREATED, Json(response)).into_response())
}

/// Handles login, returning a bearer token on success.
#[axum::debug_handler]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> Result<Response> {
    tracing::info!("🔐 Login attempt: {}", payload.email);
    validate_login(&payload)?;

    let credential =
        auth_service::authenticate(&state.db, &payload.email, &payload.password).await?;

    let token = state.tokens.issue(credential.id)?;
    tracing::info!("✅ Token issued for credential: {}", credential.id);

    Ok((StatusCode::OK, Json(TokenResponse { token })).into_response())
}
