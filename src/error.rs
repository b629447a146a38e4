//! Error types and error handling for the application
//!
//! This module defines custom error types that can be converted to HTTP responses.
//! All errors implement `IntoResponse` to provide consistent error formatting.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error types
///
/// All errors that can occur in the application are represented by this enum.
/// Each variant implements automatic conversion to HTTP responses via `IntoResponse`.
#[derive(Error, Debug)]
pub enum AppError {
    /// Create/update input was rejected by validation
    #[error("Validation failed: {0}")]
    Validation(String),

    /// City with the given ID was not found
    #[error("City not found: {0}")]
    CityNotFound(String),

    /// State with the given ID was not found
    #[error("State not found: {0}")]
    StateNotFound(String),

    /// Error raised by the persistence layer
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal server error (catch-all for unexpected errors)
    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            AppError::CityNotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
            AppError::StateNotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
            AppError::Database(_) => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()),
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()),
        };

        let body = Json(json!({
            "error": error_message,
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}

/// Caller-facing typed error carrying an HTTP status, a message, and an
/// auxiliary JSON detail payload.
///
/// Unlike [`AppError`], which the services propagate untranslated, an
/// `ApiException` is constructed at the routing boundary when a handler
/// needs full control over the response shape. The error-demo route raises
/// one to exercise the error conversion path end to end.
#[derive(Debug)]
pub struct ApiException {
    /// HTTP status code returned to the caller
    pub status: StatusCode,
    /// Human-readable message
    pub message: String,
    /// Auxiliary detail payload (e.g. a type tag)
    pub details: serde_json::Value,
}

impl ApiException {
    /// Create a new exception with the given status, message, and details
    pub fn new(
        status: StatusCode,
        message: impl Into<String>,
        details: serde_json::Value,
    ) -> Self {
        Self {
            status,
            message: message.into(),
            details,
        }
    }
}

impl std::fmt::Display for ApiException {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.status)
    }
}

impl std::error::Error for ApiException {}

impl IntoResponse for ApiException {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": self.message,
            "status": self.status.as_u16(),
            "details": self.details,
        }));

        (self.status, body).into_response()
    }
}
