use axum::{
    body::Body,
    extract::State,
    http::{Request, header},
    middleware::Next,
    response::Response,
};

use crate::{
    error::AppError,
    services::token::TokenError,
    state::AppState,
};

/// The verified subject of a bearer token, attached to protected requests.
#[derive(Clone, Copy, Debug)]
pub struct AuthSubject(pub i32);

/// Extracts the token from an `Authorization: Bearer <token>` header.
fn extract_bearer_token(request: &Request<Body>) -> Option<&str> {
    request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
}

/// A middleware that requires a valid bearer token.
///
/// A missing or unparseable header is reported as 401; a presented token
/// that fails verification (bad signature or expired) is reported as 403.
/// Invalid and expired tokens share one external status on purpose.
///
/// # Arguments
///
/// * `state` - The application state.
/// * `request` - The incoming request.
/// * `next` - The next middleware in the chain.
///
/// # Returns
///
/// A `Response` or an `AppError`.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    tracing::debug!("🔐 Checking authorization header...");

    let Some(token) = extract_bearer_token(&request) else {
        tracing::warn!("❌ No bearer token in Authorization header");
        return Err(AppError::Authentication("Missing bearer token".to_string()));
    };

    match state.tokens.verify(token) {
        Ok(subject_id) => {
            tracing::debug!("✅ Token verified for subject: {}", subject_id);
            request.extensions_mut().insert(AuthSubject(subject_id));
            Ok(next.run(request).await)
        }
        Err(TokenError::Expired) => {
            tracing::warn!("❌ Expired token presented");
            Err(AppError::Unauthorized)
        }
        Err(TokenError::Invalid) => {
            tracing::warn!("❌ Invalid token presented");
            Err(AppError::Unauthorized)
        }
    }
}
