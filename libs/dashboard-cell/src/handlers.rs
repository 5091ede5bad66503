use std::sync::Arc;

use axum::extract::{Extension, Json, State};

use shared_models::auth::Session;
use shared_models::error::AppError;
use shared_utils::state::AppState;

use crate::models::Dashboard;
use crate::services::DashboardService;

#[axum::debug_handler]
pub async fn dashboard(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Session>,
) -> Result<Json<Dashboard>, AppError> {
    let dashboard = DashboardService::new(&state).dashboard_for(&session).await?;
    Ok(Json(dashboard))
}
