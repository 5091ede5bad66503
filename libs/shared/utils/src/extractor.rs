use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};
use http::HeaderMap;
use tracing::debug;

use shared_models::auth::Session;
use shared_models::error::AppError;

use crate::jwt::validate_token;
use crate::session::SessionStore;
use crate::state::AppState;

pub fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, AppError> {
    let auth_header = headers
        .get("Authorization")
        .ok_or_else(|| AppError::Unauthenticated("Missing authorization header".to_string()))?;

    let auth_value = auth_header
        .to_str()
        .map_err(|_| AppError::Unauthenticated("Invalid authorization header format".to_string()))?;

    auth_value
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::Unauthenticated("Invalid authorization header format".to_string()))
}

/// Resolves the bearer token in `headers` to a live session.
pub async fn current_session(state: &AppState, headers: &HeaderMap) -> Result<Session, AppError> {
    let token = extract_bearer_token(headers)?;

    let claims = validate_token(token, &state.config.session_secret)
        .map_err(AppError::Unauthenticated)?;

    let session = SessionStore::new(&state.db)
        .find_active(claims.sid)
        .await?
        .ok_or_else(|| AppError::Unauthenticated("Session has ended".to_string()))?;

    if session.user_id != claims.sub || session.role != claims.role {
        debug!("Token claims do not match session {}", session.session_id);
        return Err(AppError::Unauthenticated("Session does not match token".to_string()));
    }

    Ok(session)
}

// Middleware for authentication
pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let session = current_session(&state, request.headers()).await?;

    // Add session to request extensions
    request.extensions_mut().insert(session);

    Ok(next.run(request).await)
}
