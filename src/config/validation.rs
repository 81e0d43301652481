//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (limits >= 1, addresses parse)
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: RateLimiterConfig → Result<(), Vec<ValidationError>>
//! - Runs before the config is accepted into the system

use std::fmt;
use std::net::SocketAddr;

use crate::config::schema::RateLimiterConfig;

/// A single semantic error found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field.
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a configuration, collecting every error found.
pub fn validate_config(config: &RateLimiterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.default_limits.requests_per_minute < 1 {
        errors.push(ValidationError::new(
            "default_limits.requests_per_minute",
            "must be at least 1",
        ));
    }
    if config.default_limits.burst_size < 1 {
        errors.push(ValidationError::new(
            "default_limits.burst_size",
            "must be at least 1",
        ));
    }

    if config.security.max_user_id_length < 1 {
        errors.push(ValidationError::new(
            "security.max_user_id_length",
            "must be at least 1",
        ));
    }
    if config.security.max_api_key_length < 1 {
        errors.push(ValidationError::new(
            "security.max_api_key_length",
            "must be at least 1",
        ));
    }
    if config
        .security
        .trusted_headers
        .iter()
        .any(|h| h.trim().is_empty())
    {
        errors.push(ValidationError::new(
            "security.trusted_headers",
            "header names must not be blank",
        ));
    }

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "listener.bind_address",
            format!("not a valid socket address: {}", config.listener.bind_address),
        ));
    }
    if config.listener.max_connections == 0 {
        errors.push(ValidationError::new(
            "listener.max_connections",
            "must be at least 1",
        ));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::new(
            "timeouts.request_secs",
            "must be at least 1",
        ));
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            format!(
                "not a valid socket address: {}",
                config.observability.metrics_address
            ),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
