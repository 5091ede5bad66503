use axum::extract::FromRequest;

use shared_models::error::AppError;

/// `axum::Json` with rejections rendered as `AppError::InvalidInput`, so a
/// missing field or wrong type gets the same `{error, category}` body as
/// every other validation failure.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct JsonBody<T>(pub T);
