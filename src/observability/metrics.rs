//! Metrics collection and exposition.
//!
//! # Metrics
//! - `rate_limiter_checks_total` (counter): checks by outcome (allowed/denied)
//! - `rate_limiter_validation_failures_total` (counter): rejected inputs by field

use std::net::SocketAddr;

use metrics::counter;
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter on its own listener.
///
/// Failure to install is logged, not fatal: the service runs without
/// metrics rather than not at all.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// Count one check decision by outcome.
pub fn record_check(outcome: &'static str) {
    counter!("rate_limiter_checks_total", "outcome" => outcome).increment(1);
}

/// Count one rejected input by wire field.
pub fn record_validation_failure(field: &'static str) {
    counter!("rate_limiter_validation_failures_total", "field" => field).increment(1);
}
