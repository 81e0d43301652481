//! Transport-level error mapping.
//!
//! # Responsibilities
//! - Translate validation outcomes into 400 responses naming the field
//! - Translate malformed bodies into 400 responses with a field→message map
//! - Catch anything unexpected as a generic 500, detail logged server-side
//!
//! # Design Decisions
//! - Denials are not errors: they travel as a 429 with a normal response
//!   body, handled in the check handler, not here

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::limiter::epoch_millis;
use crate::observability::metrics;
use crate::service::ValidationError;

/// Errors a handler can surface to the client.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("malformed request body: {0}")]
    Body(#[from] JsonRejection),

    /// Catch-all for fallible paths that are not client mistakes. No current
    /// handler produces one, but the 500 contract (generic body, detail
    /// logged server-side only) is pinned here so future fallible paths
    /// inherit it.
    #[error("internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(err) => {
                tracing::warn!(field = err.field, message = err.message, "Validation failed");
                metrics::record_validation_failure(err.field);
                let body = json!({
                    "timestamp": epoch_millis(),
                    "status": StatusCode::BAD_REQUEST.as_u16(),
                    "error": "Validation Error",
                    "message": err.message,
                    "field": err.field,
                });
                (StatusCode::BAD_REQUEST, Json(body)).into_response()
            }
            ApiError::Body(rejection) => {
                tracing::warn!(detail = %rejection, "Request body rejected");
                metrics::record_validation_failure("body");
                let body = json!({
                    "timestamp": epoch_millis(),
                    "status": StatusCode::BAD_REQUEST.as_u16(),
                    "error": "Validation Failed",
                    "message": "Invalid request",
                    "errors": { "body": rejection.body_text() },
                });
                (StatusCode::BAD_REQUEST, Json(body)).into_response()
            }
            ApiError::Internal(detail) => {
                // Full detail stays server-side
                tracing::error!(detail = %detail, "Unexpected error");
                let body = json!({
                    "timestamp": epoch_millis(),
                    "status": StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
                    "error": "Internal Server Error",
                    "message": "An unexpected error occurred",
                });
                (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::ValidationError;

    #[tokio::test]
    async fn test_validation_error_maps_to_400_naming_the_field() {
        let err = ApiError::Validation(ValidationError {
            field: "identifier",
            message: "Invalid user ID format",
        });
        let response = err.into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = axum::body::to_bytes(response.into_body(), 4096)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "Validation Error");
        assert_eq!(body["field"], "identifier");
        assert_eq!(body["message"], "Invalid user ID format");
    }

    #[tokio::test]
    async fn test_internal_error_maps_to_generic_500() {
        let response = ApiError::Internal("connection pool exhausted".to_string()).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let bytes = axum::body::to_bytes(response.into_body(), 4096)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "Internal Server Error");
        assert_eq!(body["message"], "An unexpected error occurred");
        // The detail stays server-side
        assert!(!String::from_utf8_lossy(&bytes).contains("connection pool exhausted"));
    }
}
