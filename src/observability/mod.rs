//! Observability subsystem.
//!
//! # Design Decisions
//! - Structured logging via tracing; initialized once in main
//! - Metrics are cheap atomic counters, exposed on an optional Prometheus
//!   scrape endpoint

pub mod metrics;
