use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Authentication required: {0}")]
    Unauthenticated(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Username already taken: {0}")]
    DuplicateUsername(String),

    #[error("Email already registered: {0}")]
    DuplicateEmail(String),

    #[error("Name already exists: {0}")]
    DuplicateName(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal Server Error: {0}")]
    Internal(String),
}

/// The user-facing family an error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Credential,
    Permission,
    Validation,
    NotFound,
    Conflict,
    Internal,
}

impl ErrorCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Credential => "credential",
            ErrorCategory::Permission => "permission",
            ErrorCategory::Validation => "validation",
            ErrorCategory::NotFound => "not_found",
            ErrorCategory::Conflict => "conflict",
            ErrorCategory::Internal => "internal",
        }
    }
}

impl AppError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            AppError::InvalidCredentials | AppError::Unauthenticated(_) => ErrorCategory::Credential,
            AppError::Forbidden(_) => ErrorCategory::Permission,
            AppError::InvalidInput(_) => ErrorCategory::Validation,
            AppError::NotFound(_) => ErrorCategory::NotFound,
            AppError::DuplicateUsername(_)
            | AppError::DuplicateEmail(_)
            | AppError::DuplicateName(_) => ErrorCategory::Conflict,
            AppError::Database(_) | AppError::Internal(_) => ErrorCategory::Internal,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AppError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::DuplicateUsername(_) => StatusCode::CONFLICT,
            AppError::DuplicateEmail(_) => StatusCode::CONFLICT,
            AppError::DuplicateName(_) => StatusCode::CONFLICT,
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::Database(err.to_string())
    }
}

/// A body that is not JSON, or does not match the request type, is a
/// validation failure like any other bad field.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidInput(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let category = self.category();

        // Storage details stay in the logs.
        let message = match &self {
            AppError::Database(_) | AppError::Internal(_) => {
                tracing::error!("Error: {}: {}", status, self);
                "Internal server error".to_string()
            }
            _ => {
                tracing::warn!("Error: {}: {}", status, self);
                self.to_string()
            }
        };

        let body = Json(json!({
            "error": message,
            "category": category.as_str(),
        }));

        (status, body).into_response()
    }
}
