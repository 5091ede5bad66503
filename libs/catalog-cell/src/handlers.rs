use std::sync::Arc;

use axum::{
    extract::{Extension, Json, State},
    http::StatusCode,
};

use shared_models::auth::Session;
use shared_models::error::AppError;
use shared_models::hospital::{Department, Treatment};
use shared_utils::json::JsonBody;
use shared_utils::state::AppState;

use crate::models::{CreateDepartmentRequest, CreateTreatmentRequest};
use crate::services::CatalogService;

#[axum::debug_handler]
pub async fn list_departments(
    State(state): State<Arc<AppState>>,
    Extension(_session): Extension<Session>,
) -> Result<Json<Vec<Department>>, AppError> {
    let departments = CatalogService::new(&state).list_departments().await?;
    Ok(Json(departments))
}

#[axum::debug_handler]
pub async fn create_department(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Session>,
    JsonBody(request): JsonBody<CreateDepartmentRequest>,
) -> Result<(StatusCode, Json<Department>), AppError> {
    let department = CatalogService::new(&state)
        .create_department(&session, request)
        .await?;
    Ok((StatusCode::CREATED, Json(department)))
}

#[axum::debug_handler]
pub async fn list_treatments(
    State(state): State<Arc<AppState>>,
    Extension(_session): Extension<Session>,
) -> Result<Json<Vec<Treatment>>, AppError> {
    let treatments = CatalogService::new(&state).list_treatments().await?;
    Ok(Json(treatments))
}

#[axum::debug_handler]
pub async fn create_treatment(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Session>,
    JsonBody(request): JsonBody<CreateTreatmentRequest>,
) -> Result<(StatusCode, Json<Treatment>), AppError> {
    let treatment = CatalogService::new(&state)
        .create_treatment(&session, request)
        .await?;
    Ok((StatusCode::CREATED, Json(treatment)))
}
