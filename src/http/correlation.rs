//! Correlation-ID propagation.
//!
//! # Responsibilities
//! - Accept an inbound `X-Correlation-ID`, or mint a UUID v4 when absent
//! - Echo the id on every response so clients can stitch logs together

use axum::body::Body;
use axum::http::{HeaderValue, Request};
use axum::middleware::Next;
use axum::response::Response;
use uuid::Uuid;

/// Header carrying the correlation id.
pub const HEADER_CORRELATION_ID: &str = "X-Correlation-ID";

/// Middleware: ensure a correlation id exists and echo it on the response.
pub async fn propagate_correlation_id(mut request: Request<Body>, next: Next) -> Response {
    let correlation_id = request
        .headers()
        .get(HEADER_CORRELATION_ID)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    if let Ok(value) = HeaderValue::from_str(&correlation_id) {
        request
            .headers_mut()
            .insert(HEADER_CORRELATION_ID, value.clone());

        let mut response = next.run(request).await;
        response.headers_mut().insert(HEADER_CORRELATION_ID, value);
        response
    } else {
        // to_str succeeded, so this branch is effectively unreachable
        next.run(request).await
    }
}
