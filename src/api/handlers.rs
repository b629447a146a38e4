//! Default route handlers
//!
//! The root acknowledgment route, the health check, and the error-demo
//! route used to verify that application errors are converted into HTTP
//! responses correctly.

use crate::error::ApiException;
use axum::{http::StatusCode, response::Json};
use serde::Serialize;
use serde_json::json;
use tracing::{error, info};

/// Root acknowledgment response
#[derive(Serialize)]
pub struct WelcomeResponse {
    /// Human-readable message
    pub message: String,
    /// Status indicator
    pub status: String,
}

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    /// Health status
    pub status: String,
    /// Crate version
    pub version: String,
    /// Human-readable message
    pub message: String,
}

/// GET / - Static acknowledgment that the service is up
pub async fn root() -> Json<WelcomeResponse> {
    info!("Entering default route");
    Json(WelcomeResponse {
        message: "City Registry Back-End initialized with success.".to_string(),
        status: "ok".to_string(),
    })
}

/// GET /err - Unconditionally raise an [`ApiException`]
///
/// Exists to exercise the error conversion path end to end.
pub async fn error_demo() -> Result<Json<WelcomeResponse>, ApiException> {
    error!("Entering default error route");
    Err(ApiException::new(
        StatusCode::BAD_REQUEST,
        "The error created for test...",
        json!({ "type": "DEFAULT" }),
    ))
}

/// GET /api/health - Health check
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        message: "Backend is healthy".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_root_returns_static_acknowledgment() {
        let response = root().await;
        assert_eq!(
            response.message,
            "City Registry Back-End initialized with success."
        );
        assert_eq!(response.status, "ok");
    }

    #[tokio::test]
    async fn test_error_demo_raises_api_exception() {
        let result = error_demo().await;
        let exception = result.unwrap_err();
        assert_eq!(exception.status, StatusCode::BAD_REQUEST);
        assert_eq!(exception.message, "The error created for test...");
        assert_eq!(exception.details, json!({ "type": "DEFAULT" }));
    }
}
