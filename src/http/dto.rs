//! Wire types for the rate-limit API.
//!
//! # Design Decisions
//! - Request and config fields use camelCase on the wire; the quota echo
//!   fields use the snake_case names clients already depend on
//!   (`rate_limit_limit`, `rate_limit_remaining`, `rate_limit_reset`,
//!   `retry_after`)
//! - Optional fields are omitted from JSON when absent
//! - The API key never appears in logs: Debug renders it masked

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::limiter::RateLimitAlgorithm;

/// What kind of key a check is evaluated against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RateLimitType {
    UserId,
    ClientIp,
    ApiKey,
    Endpoint,
    Global,
}

impl RateLimitType {
    pub fn as_str(self) -> &'static str {
        match self {
            RateLimitType::UserId => "USER_ID",
            RateLimitType::ClientIp => "CLIENT_IP",
            RateLimitType::ApiKey => "API_KEY",
            RateLimitType::Endpoint => "ENDPOINT",
            RateLimitType::Global => "GLOBAL",
        }
    }
}

impl fmt::Display for RateLimitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body of `POST /rate_limit/check`.
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateLimitCheckRequest {
    /// The key the decision is evaluated against.
    #[serde(default)]
    pub identifier: String,

    /// Identifier classification; absence is a validation error.
    #[serde(rename = "type")]
    pub limit_type: Option<RateLimitType>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// Filled in from headers by the boundary when the caller omits it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_ip: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

impl RateLimitCheckRequest {
    pub fn new(identifier: impl Into<String>, limit_type: RateLimitType) -> Self {
        Self {
            identifier: identifier.into(),
            limit_type: Some(limit_type),
            endpoint: None,
            client_ip: None,
            api_key: None,
        }
    }
}

// Manual Debug so the API key cannot leak into logs.
impl fmt::Debug for RateLimitCheckRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RateLimitCheckRequest")
            .field("identifier", &self.identifier)
            .field("type", &self.limit_type)
            .field("endpoint", &self.endpoint)
            .field("client_ip", &self.client_ip)
            .field("api_key", &self.api_key.as_ref().map(|_| "[MASKED]"))
            .finish()
    }
}

/// Body of the check response, echoed with quota metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitCheckResponse {
    pub allowed: bool,
    pub message: String,

    /// Quota for the current window.
    pub rate_limit_limit: u64,

    /// Requests left in the current window.
    pub rate_limit_remaining: u64,

    /// Epoch millis at which the window resets.
    pub rate_limit_reset: u64,

    /// Seconds to wait before retrying; present only on denial.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retry_after: Option<u64>,
}

/// Wire projection of the rate-limit configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateLimitConfigDto {
    /// Required on update; absence is a validation error.
    pub algorithm: Option<RateLimitAlgorithm>,

    /// Signed so an out-of-range update can be received and rejected.
    #[serde(default)]
    pub requests_per_minute: i64,

    #[serde(default)]
    pub burst_size: i64,

    #[serde(default)]
    pub enabled: bool,
}
