//! Rate-limit check service.
//!
//! # Data Flow
//! ```text
//! HTTP boundary
//!     → RateLimiterService::check_rate_limit(request)
//!         → validate(request)           (field-level, type-specific)
//!         → Limiter::decide(key, cost)  (pass-through engine)
//!     → RateLimitCheckResponse
//! ```
//!
//! # Design Decisions
//! - Validation outcomes are values, not exceptions: `Err(ValidationError)`
//!   names the failing wire field and the boundary maps it to a 400
//! - The configuration snapshot is injected at construction and never
//!   mutated; `update_configuration` validates and logs only

pub mod rate_limiter;

pub use rate_limiter::{RateLimiterService, ValidationError};
