use std::sync::Arc;

use axum::{
    extract::{Extension, Json, State},
    http::StatusCode,
};
use serde_json::{json, Value};
use tracing::debug;

use shared_models::auth::{LoginRequest, Session, TokenResponse};
use shared_models::error::AppError;
use shared_models::hospital::User;
use shared_utils::json::JsonBody;
use shared_utils::state::AppState;

use crate::models::{RegisterPatientRequest, RegisterResponse};
use crate::services::IdentityService;

#[axum::debug_handler]
pub async fn login(
    State(state): State<Arc<AppState>>,
    JsonBody(request): JsonBody<LoginRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    debug!("Login attempt for {}", request.username);

    let service = IdentityService::new(&state);
    let response = service.login(&request.username, &request.password).await?;

    Ok(Json(response))
}

#[axum::debug_handler]
pub async fn register(
    State(state): State<Arc<AppState>>,
    JsonBody(request): JsonBody<RegisterPatientRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), AppError> {
    let service = IdentityService::new(&state);
    let user_id = service.register_patient(request).await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            user_id,
            message: "Registration successful! Please log in.".to_string(),
        }),
    ))
}

#[axum::debug_handler]
pub async fn logout(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Session>,
) -> Result<Json<Value>, AppError> {
    let service = IdentityService::new(&state);
    service.logout(&session).await?;

    Ok(Json(json!({ "logged_out": true })))
}

#[axum::debug_handler]
pub async fn me(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Session>,
) -> Result<Json<User>, AppError> {
    let service = IdentityService::new(&state);
    let user = service.profile(&session).await?;

    Ok(Json(user))
}
