//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the rate
//! limiter. All types derive Serde traits for deserialization from config
//! files, and every section defaults to a usable value.

use serde::{Deserialize, Serialize};

use crate::limiter::RateLimitAlgorithm;

/// Root configuration for the rate limiter service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RateLimiterConfig {
    /// Listener configuration (bind address, connection cap).
    pub listener: ListenerConfig,

    /// Default quota applied when no per-identifier limit exists.
    pub default_limits: DefaultLimits,

    /// Algorithm selection.
    pub algorithms: AlgorithmConfig,

    /// Security settings (trusted headers, identifier length caps).
    pub security: SecurityConfig,

    /// Logging verbosity toggles.
    pub logging: LoggingConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Maximum concurrent connections (backpressure).
    pub max_connections: usize,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            max_connections: 10_000,
        }
    }
}

/// Default quota for a rate-limit window.
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
#[serde(default)]
pub struct DefaultLimits {
    /// Requests allowed per minute (must be >= 1).
    pub requests_per_minute: u32,

    /// Burst allowance on top of the steady rate (must be >= 1).
    pub burst_size: u32,
}

impl Default for DefaultLimits {
    fn default() -> Self {
        Self {
            requests_per_minute: 100,
            burst_size: 10,
        }
    }
}

/// Algorithm selection.
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
#[serde(default)]
pub struct AlgorithmConfig {
    /// Algorithm used when a check does not name one.
    pub default_algorithm: RateLimitAlgorithm,
}

impl Default for AlgorithmConfig {
    fn default() -> Self {
        Self {
            default_algorithm: RateLimitAlgorithm::TokenBucket,
        }
    }
}

/// Security settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Header names consulted for client IP derivation, in order.
    pub trusted_headers: Vec<String>,

    /// Maximum accepted user id length (must be >= 1).
    pub max_user_id_length: usize,

    /// Maximum accepted API key length (must be >= 1).
    pub max_api_key_length: usize,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            trusted_headers: vec!["X-Forwarded-For".to_string(), "X-Real-IP".to_string()],
            max_user_id_length: 255,
            max_api_key_length: 128,
        }
    }
}

/// Logging verbosity toggles.
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log every allowed check at info level.
    pub log_all_requests: bool,

    /// Log denied checks at warn level.
    pub log_denied_requests: bool,

    /// Log accepted configuration updates at info level.
    pub log_configuration_changes: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_all_requests: false,
            log_denied_requests: true,
            log_configuration_changes: true,
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Whole-request timeout in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 10 }
    }
}

/// Observability settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Expose a Prometheus scrape endpoint.
    pub metrics_enabled: bool,

    /// Bind address for the metrics endpoint.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9100".to_string(),
        }
    }
}
