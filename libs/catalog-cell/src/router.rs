use std::sync::Arc;

use axum::{middleware, routing::get, Router};

use shared_utils::extractor::auth_middleware;
use shared_utils::state::AppState;

use crate::handlers;

pub fn catalog_routes(state: Arc<AppState>) -> Router {
    // Listing needs any session; creation is checked for admin in the service.
    let protected_routes = Router::new()
        .route(
            "/departments",
            get(handlers::list_departments).post(handlers::create_department),
        )
        .route(
            "/treatments",
            get(handlers::list_treatments).post(handlers::create_treatment),
        )
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .merge(protected_routes)
        .with_state(state)
}
