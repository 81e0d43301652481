//! Check, configuration and validation operations.

use std::sync::Arc;

use thiserror::Error;

use crate::config::schema::RateLimiterConfig;
use crate::http::dto::{
    RateLimitCheckRequest, RateLimitCheckResponse, RateLimitConfigDto, RateLimitType,
};
use crate::limiter::{self, Limiter};
use crate::observability::metrics;
use crate::security::identifier;

/// Response message on an allowed check.
pub const MSG_REQUEST_ALLOWED: &str = "Request allowed";

/// Response message on a denied check.
pub const MSG_RATE_LIMIT_EXCEEDED: &str = "Rate limit exceeded";

/// Confirmation message after a configuration update.
pub const MSG_CONFIGURATION_UPDATED: &str = "Configuration updated successfully";

/// Wire-size cap for the optional client IP field (fits IPv6 + zone).
const MAX_CLIENT_IP_LENGTH: usize = 45;

/// A rejected input field: which wire field failed and why.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Wire name of the failing field.
    pub field: &'static str,
    pub message: &'static str,
}

impl ValidationError {
    fn new(field: &'static str, message: &'static str) -> Self {
        Self { field, message }
    }
}

/// Orchestrates validation, configuration lookup and the limit decision.
pub struct RateLimiterService {
    config: Arc<RateLimiterConfig>,
    limiter: Box<dyn Limiter>,
}

impl RateLimiterService {
    /// Build a service around an immutable configuration snapshot.
    ///
    /// The decision engine is chosen from the configured algorithm once,
    /// at construction.
    pub fn new(config: Arc<RateLimiterConfig>) -> Self {
        let limiter = limiter::for_algorithm(config.algorithms.default_algorithm);
        Self { config, limiter }
    }

    /// Validate a check request, returning its classified type.
    ///
    /// GLOBAL skips identifier-format validation; any non-blank identifier
    /// passes.
    pub fn validate(
        &self,
        request: &RateLimitCheckRequest,
    ) -> Result<RateLimitType, ValidationError> {
        if request.identifier.trim().is_empty() {
            return Err(ValidationError::new("identifier", "Identifier is required"));
        }
        if request.identifier.chars().count() > identifier::MAX_USER_ID_LENGTH {
            return Err(ValidationError::new(
                "identifier",
                "Identifier must not exceed 255 characters",
            ));
        }

        let limit_type = request
            .limit_type
            .ok_or_else(|| ValidationError::new("type", "Rate limit type is required"))?;

        if let Some(endpoint) = &request.endpoint {
            if endpoint.chars().count() > identifier::MAX_ENDPOINT_LENGTH {
                return Err(ValidationError::new(
                    "endpoint",
                    "Endpoint must not exceed 255 characters",
                ));
            }
        }
        if let Some(client_ip) = &request.client_ip {
            if client_ip.chars().count() > MAX_CLIENT_IP_LENGTH {
                return Err(ValidationError::new(
                    "clientIp",
                    "Client IP must not exceed 45 characters",
                ));
            }
        }
        if let Some(api_key) = &request.api_key {
            if api_key.chars().count() > identifier::MAX_API_KEY_LENGTH {
                return Err(ValidationError::new(
                    "apiKey",
                    "API key must not exceed 128 characters",
                ));
            }
        }

        match limit_type {
            RateLimitType::UserId => {
                if !identifier::is_valid_user_id(&request.identifier) {
                    return Err(ValidationError::new("identifier", "Invalid user ID format"));
                }
            }
            RateLimitType::ClientIp => {
                if !identifier::is_valid_ip_address(&request.identifier) {
                    return Err(ValidationError::new(
                        "identifier",
                        "Invalid IP address format",
                    ));
                }
            }
            RateLimitType::ApiKey => {
                if !identifier::is_valid_api_key(&request.identifier) {
                    return Err(ValidationError::new("identifier", "Invalid API key format"));
                }
            }
            RateLimitType::Endpoint => {
                if !identifier::is_valid_endpoint(&request.identifier) {
                    return Err(ValidationError::new(
                        "identifier",
                        "Invalid endpoint format",
                    ));
                }
            }
            RateLimitType::Global => {}
        }

        Ok(limit_type)
    }

    /// Decide whether a request is allowed.
    ///
    /// With the pass-through engine every valid request is allowed and the
    /// quota fields echo the configured requests-per-minute.
    pub fn check_rate_limit(
        &self,
        request: &RateLimitCheckRequest,
    ) -> Result<RateLimitCheckResponse, ValidationError> {
        tracing::debug!(
            identifier = %request.identifier,
            limit_type = ?request.limit_type,
            "Checking rate limit"
        );

        let limit_type = self.validate(request)?;

        let key = format!("{}:{}", limit_type, request.identifier);
        let decision = self
            .limiter
            .decide(&key, 1, &self.config.default_limits);

        let response = RateLimitCheckResponse {
            allowed: decision.allowed,
            message: if decision.allowed {
                MSG_REQUEST_ALLOWED.to_string()
            } else {
                MSG_RATE_LIMIT_EXCEEDED.to_string()
            },
            rate_limit_limit: decision.limit,
            rate_limit_remaining: decision.remaining,
            rate_limit_reset: decision.reset_ms,
            retry_after: decision.retry_after,
        };

        if response.allowed {
            metrics::record_check("allowed");
            if self.config.logging.log_all_requests {
                tracing::info!(
                    identifier = %request.identifier,
                    limit_type = %limit_type,
                    "Request allowed"
                );
            }
        } else {
            metrics::record_check("denied");
            if self.config.logging.log_denied_requests {
                tracing::warn!(
                    identifier = %request.identifier,
                    limit_type = %limit_type,
                    retry_after = ?response.retry_after,
                    "Rate limit exceeded"
                );
            }
        }

        Ok(response)
    }

    /// Project the current configuration snapshot onto the wire.
    pub fn get_configuration(&self) -> RateLimitConfigDto {
        tracing::debug!("Getting configuration");

        RateLimitConfigDto {
            algorithm: Some(self.config.algorithms.default_algorithm),
            requests_per_minute: i64::from(self.config.default_limits.requests_per_minute),
            burst_size: i64::from(self.config.default_limits.burst_size),
            enabled: true,
        }
    }

    /// Validate a configuration update.
    ///
    /// The live snapshot is never replaced: an accepted update is logged
    /// (when `log_configuration_changes` is set) and otherwise discarded.
    pub fn update_configuration(&self, dto: &RateLimitConfigDto) -> Result<(), ValidationError> {
        if dto.algorithm.is_none() {
            return Err(ValidationError::new("algorithm", "Algorithm is required"));
        }
        if dto.requests_per_minute <= 0 {
            return Err(ValidationError::new(
                "requestsPerMinute",
                "Requests per minute must be positive",
            ));
        }
        if dto.burst_size <= 0 {
            return Err(ValidationError::new(
                "burstSize",
                "Burst size must be positive",
            ));
        }

        if self.config.logging.log_configuration_changes {
            tracing::info!(
                algorithm = ?dto.algorithm,
                requests_per_minute = dto.requests_per_minute,
                burst_size = dto.burst_size,
                enabled = dto.enabled,
                "Configuration update accepted (not applied)"
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::limiter::{RateLimitAlgorithm, MILLIS_PER_MINUTE};

    fn service() -> RateLimiterService {
        RateLimiterService::new(Arc::new(RateLimiterConfig::default()))
    }

    #[test]
    fn test_check_is_a_pass_through() {
        let service = service();
        let request = RateLimitCheckRequest::new("alice", RateLimitType::UserId);

        let response = service.check_rate_limit(&request).unwrap();

        assert!(response.allowed);
        assert_eq!(response.message, MSG_REQUEST_ALLOWED);
        assert_eq!(response.rate_limit_limit, 100);
        // Regression guard: until a real engine lands, nothing is consumed
        assert_eq!(response.rate_limit_remaining, response.rate_limit_limit);
        assert!(response.retry_after.is_none());
        assert!(response.rate_limit_reset > MILLIS_PER_MINUTE);
    }

    #[test]
    fn test_blank_identifier_is_rejected() {
        let service = service();
        for identifier in ["", "   "] {
            let request = RateLimitCheckRequest::new(identifier, RateLimitType::Global);
            let err = service.check_rate_limit(&request).unwrap_err();
            assert_eq!(err.field, "identifier");
            assert_eq!(err.message, "Identifier is required");
        }
    }

    #[test]
    fn test_missing_type_is_rejected() {
        let service = service();
        let mut request = RateLimitCheckRequest::new("alice", RateLimitType::UserId);
        request.limit_type = None;

        let err = service.validate(&request).unwrap_err();
        assert_eq!(err.field, "type");
    }

    #[test]
    fn test_user_id_with_at_sign_is_rejected() {
        let service = service();
        let request = RateLimitCheckRequest::new("user@123", RateLimitType::UserId);

        let err = service.validate(&request).unwrap_err();
        assert_eq!(err.message, "Invalid user ID format");
    }

    #[test]
    fn test_global_accepts_any_non_blank_identifier() {
        let service = service();
        let request = RateLimitCheckRequest::new("anything goes @ here!", RateLimitType::Global);

        assert_eq!(service.validate(&request).unwrap(), RateLimitType::Global);
    }

    #[test]
    fn test_type_specific_format_checks() {
        let service = service();

        let request = RateLimitCheckRequest::new("1.2.3.4", RateLimitType::ClientIp);
        assert!(service.validate(&request).is_ok());

        let request = RateLimitCheckRequest::new("not-an-ip", RateLimitType::ClientIp);
        assert_eq!(
            service.validate(&request).unwrap_err().message,
            "Invalid IP address format"
        );

        let request = RateLimitCheckRequest::new("/api/v1", RateLimitType::Endpoint);
        assert!(service.validate(&request).is_ok());

        let request = RateLimitCheckRequest::new("api/v1", RateLimitType::Endpoint);
        assert_eq!(
            service.validate(&request).unwrap_err().message,
            "Invalid endpoint format"
        );
    }

    #[test]
    fn test_optional_field_size_caps() {
        let service = service();

        let mut request = RateLimitCheckRequest::new("alice", RateLimitType::UserId);
        request.client_ip = Some("x".repeat(46));
        assert_eq!(service.validate(&request).unwrap_err().field, "clientIp");

        let mut request = RateLimitCheckRequest::new("alice", RateLimitType::UserId);
        request.api_key = Some("k".repeat(129));
        assert_eq!(service.validate(&request).unwrap_err().field, "apiKey");

        let mut request = RateLimitCheckRequest::new("alice", RateLimitType::UserId);
        request.endpoint = Some("/".repeat(256));
        assert_eq!(service.validate(&request).unwrap_err().field, "endpoint");
    }

    #[test]
    fn test_get_configuration_projects_snapshot() {
        let mut config = RateLimiterConfig::default();
        config.default_limits.requests_per_minute = 250;
        config.algorithms.default_algorithm = RateLimitAlgorithm::SlidingWindow;
        let service = RateLimiterService::new(Arc::new(config));

        let dto = service.get_configuration();
        assert_eq!(dto.algorithm, Some(RateLimitAlgorithm::SlidingWindow));
        assert_eq!(dto.requests_per_minute, 250);
        assert_eq!(dto.burst_size, 10);
        assert!(dto.enabled);
    }

    #[test]
    fn test_update_configuration_validates_but_does_not_apply() {
        let service = service();

        let bad = RateLimitConfigDto {
            algorithm: Some(RateLimitAlgorithm::TokenBucket),
            requests_per_minute: -1,
            burst_size: 10,
            enabled: true,
        };
        let err = service.update_configuration(&bad).unwrap_err();
        assert_eq!(err.field, "requestsPerMinute");

        let good = RateLimitConfigDto {
            algorithm: Some(RateLimitAlgorithm::FixedWindow),
            requests_per_minute: 500,
            burst_size: 50,
            enabled: true,
        };
        service.update_configuration(&good).unwrap();

        // Both paths leave the snapshot untouched
        assert_eq!(service.get_configuration().requests_per_minute, 100);
    }

    #[test]
    fn test_update_requires_algorithm_and_positive_burst() {
        let service = service();

        let dto = RateLimitConfigDto {
            algorithm: None,
            requests_per_minute: 10,
            burst_size: 10,
            enabled: true,
        };
        assert_eq!(
            service.update_configuration(&dto).unwrap_err().field,
            "algorithm"
        );

        let dto = RateLimitConfigDto {
            algorithm: Some(RateLimitAlgorithm::TokenBucket),
            requests_per_minute: 10,
            burst_size: 0,
            enabled: true,
        };
        assert_eq!(
            service.update_configuration(&dto).unwrap_err().field,
            "burstSize"
        );
    }
}
