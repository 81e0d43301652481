//! Configuration subsystem.
//!
//! # Data Flow
//! ```text
//! TOML file (loader.rs)
//!     → serde deserialize into schema.rs structs
//!     → semantic validation (validation.rs)
//!     → immutable snapshot shared via Arc
//! ```
//!
//! # Design Decisions
//! - Every section has a Default impl so the service runs with no file at all
//! - Validation collects all range errors, not just the first
//! - The snapshot is read-only for the life of the process; configuration
//!   updates arriving over HTTP are validated and logged but never applied

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{
    AlgorithmConfig, DefaultLimits, ListenerConfig, LoggingConfig, ObservabilityConfig,
    RateLimiterConfig, SecurityConfig, TimeoutConfig,
};
