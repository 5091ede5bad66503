use std::sync::Arc;

use axum::{
    extract::{Extension, Json, State},
    http::StatusCode,
};

use shared_models::auth::Session;
use shared_models::error::AppError;
use shared_models::hospital::Appointment;
use shared_utils::json::JsonBody;
use shared_utils::state::AppState;

use crate::models::BookAppointmentRequest;
use crate::services::AppointmentBookingService;

#[axum::debug_handler]
pub async fn book_appointment(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Session>,
    JsonBody(request): JsonBody<BookAppointmentRequest>,
) -> Result<(StatusCode, Json<Appointment>), AppError> {
    let appointment = AppointmentBookingService::new(&state)
        .book_appointment(&session, request)
        .await?;
    Ok((StatusCode::CREATED, Json(appointment)))
}
