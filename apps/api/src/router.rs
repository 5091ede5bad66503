use std::sync::Arc;

use axum::{routing::get, Router};

use appointment_cell::router::appointment_routes;
use auth_cell::router::auth_routes;
use catalog_cell::router::catalog_routes;
use dashboard_cell::router::dashboard_routes;
use shared_utils::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(|| async { "Hospital appointment API is running!" }))
        .nest("/auth", auth_routes(state.clone()))
        .merge(catalog_routes(state.clone()))
        .merge(appointment_routes(state.clone()))
        .merge(dashboard_routes(state))
}
