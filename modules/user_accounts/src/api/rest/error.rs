use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::domain::error::DomainError;

/// API-level error: an HTTP status plus the `{"error": "..."}` body
/// every error response carries.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

/// Map a domain error to the API error shape. Backend failures are logged
/// and replaced with a fixed message; nothing internal leaks to the caller.
pub fn map_domain_error(e: &DomainError) -> ApiError {
    match e {
        DomainError::NotFound { .. } => ApiError::new(StatusCode::NOT_FOUND, "User not found"),
        DomainError::Validation { message } => ApiError::new(StatusCode::BAD_REQUEST, message),
        DomainError::Unauthorized => {
            ApiError::new(StatusCode::UNAUTHORIZED, "Invalid email or password")
        }
        DomainError::Database { message } => {
            tracing::error!("database failure: {message}");
            ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
        }
    }
}
