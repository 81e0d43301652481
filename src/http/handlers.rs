//! Route handlers for the rate-limit API.
//!
//! # Responsibilities
//! - Fill in the client IP from proxy headers when the caller omits it
//! - Map the check decision onto 200/429 plus quota response headers
//! - Expose configuration read/update and a liveness probe

use std::net::SocketAddr;

use axum::extract::rejection::JsonRejection;
use axum::extract::{ConnectInfo, State};
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::http::dto::{RateLimitCheckRequest, RateLimitConfigDto};
use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::limiter::epoch_millis;
use crate::security::client_ip::extract_real_client_ip;
use crate::service::rate_limiter::MSG_CONFIGURATION_UPDATED;

/// Request header carrying the proxy chain.
pub const HEADER_X_FORWARDED_FOR: &str = "X-Forwarded-For";

/// Request header carrying a single upstream-asserted client IP.
pub const HEADER_X_REAL_IP: &str = "X-Real-IP";

/// Quota response headers.
pub const HEADER_RATE_LIMIT_LIMIT: &str = "X-RateLimit-Limit";
pub const HEADER_RATE_LIMIT_REMAINING: &str = "X-RateLimit-Remaining";
pub const HEADER_RATE_LIMIT_RESET: &str = "X-RateLimit-Reset";
pub const HEADER_RETRY_AFTER: &str = "Retry-After";

/// `POST /rate_limit/check`
pub async fn check_rate_limit(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    payload: Result<Json<RateLimitCheckRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(mut request) = payload?;

    if request.client_ip.as_deref().map_or(true, str::is_empty) {
        request.client_ip = Some(resolve_client_ip(&headers, addr));
    }

    tracing::debug!(request = ?request, "Rate limit check requested");

    let check = state.service.check_rate_limit(&request)?;

    let status = if check.allowed {
        StatusCode::OK
    } else {
        StatusCode::TOO_MANY_REQUESTS
    };

    tracing::info!(
        identifier = %request.identifier,
        allowed = check.allowed,
        "Rate limit check completed"
    );

    let mut response = (status, Json(&check)).into_response();
    let response_headers = response.headers_mut();
    insert_numeric(response_headers, HEADER_RATE_LIMIT_LIMIT, check.rate_limit_limit);
    insert_numeric(
        response_headers,
        HEADER_RATE_LIMIT_REMAINING,
        check.rate_limit_remaining,
    );
    insert_numeric(response_headers, HEADER_RATE_LIMIT_RESET, check.rate_limit_reset);
    if let Some(retry_after) = check.retry_after {
        insert_numeric(response_headers, HEADER_RETRY_AFTER, retry_after);
    }

    Ok(response)
}

/// `GET /rate_limit/config`
pub async fn get_config(State(state): State<AppState>) -> Json<RateLimitConfigDto> {
    tracing::debug!("Rate limit configuration requested");
    Json(state.service.get_configuration())
}

/// `POST /rate_limit/config`
pub async fn update_config(
    State(state): State<AppState>,
    payload: Result<Json<RateLimitConfigDto>, JsonRejection>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let Json(dto) = payload?;
    state.service.update_configuration(&dto)?;
    Ok(Json(json!({ "message": MSG_CONFIGURATION_UPDATED })))
}

/// `GET /rate_limit/health`
pub async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "status": "UP",
        "service": "rate-limiter",
        "timestamp": epoch_millis().to_string(),
    }))
}

fn resolve_client_ip(headers: &HeaderMap, addr: SocketAddr) -> String {
    let forwarded_for = headers
        .get(HEADER_X_FORWARDED_FOR)
        .and_then(|value| value.to_str().ok());
    let real_ip = headers
        .get(HEADER_X_REAL_IP)
        .and_then(|value| value.to_str().ok());
    let remote_addr = addr.ip().to_string();

    extract_real_client_ip(forwarded_for, real_ip, Some(&remote_addr))
}

fn insert_numeric(headers: &mut HeaderMap, name: &'static str, value: u64) {
    if let Ok(value) = HeaderValue::from_str(&value.to_string()) {
        headers.insert(name, value);
    }
}
