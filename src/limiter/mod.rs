//! Rate-limit decision seam.
//!
//! # Responsibilities
//! - Define the algorithm selection enum carried in configuration
//! - Define the `Limiter` trait a real engine would implement
//! - Provide the shipped pass-through implementation
//!
//! # Design Decisions
//! - The check service depends only on the `Limiter` trait, so a token
//!   bucket, fixed window or sliding window engine can be substituted
//!   without touching the request/response contract
//! - `PassThrough` is selected for every algorithm variant: the refill and
//!   reset semantics of the real engines are not pinned down anywhere yet,
//!   so none are implemented
//! - A real engine keys its state by the check key and must guarantee
//!   at-most-one-winner per key per decision

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::config::schema::DefaultLimits;

/// Milliseconds in one rate-limit window.
pub const MILLIS_PER_MINUTE: u64 = 60_000;

/// Selectable rate-limiting algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RateLimitAlgorithm {
    /// Token bucket: allows bursts within limits.
    TokenBucket,
    /// Fixed window counter: resets the count at fixed intervals.
    FixedWindow,
    /// Sliding window log: keeps a log of request timestamps.
    SlidingWindow,
}

/// Outcome of a single rate-limit decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub allowed: bool,
    /// Quota for the current window.
    pub limit: u64,
    /// Requests left in the current window.
    pub remaining: u64,
    /// Epoch millis at which the window resets.
    pub reset_ms: u64,
    /// Seconds to wait before retrying; only set on denial.
    pub retry_after: Option<u64>,
}

/// A rate-limiting engine.
///
/// `key` identifies the bucket the decision is charged against and `cost`
/// is the number of units the request consumes (1 for a plain check).
pub trait Limiter: Send + Sync {
    fn decide(&self, key: &str, cost: u32, limits: &DefaultLimits) -> Decision;
}

/// The shipped decision engine: every request is allowed.
///
/// Echoes the configured quota untouched, with a reset one window from now.
/// No per-key state is tracked and no counter is decremented.
pub struct PassThrough;

impl Limiter for PassThrough {
    fn decide(&self, _key: &str, _cost: u32, limits: &DefaultLimits) -> Decision {
        let limit = u64::from(limits.requests_per_minute);
        Decision {
            allowed: true,
            limit,
            remaining: limit,
            reset_ms: epoch_millis() + MILLIS_PER_MINUTE,
            retry_after: None,
        }
    }
}

/// Engine for a configured algorithm.
///
/// Every variant currently maps to [`PassThrough`]; this is where the real
/// TokenBucket / FixedWindow / SlidingWindow engines get dispatched once
/// their window semantics are settled.
pub fn for_algorithm(algorithm: RateLimitAlgorithm) -> Box<dyn Limiter> {
    match algorithm {
        RateLimitAlgorithm::TokenBucket
        | RateLimitAlgorithm::FixedWindow
        | RateLimitAlgorithm::SlidingWindow => Box::new(PassThrough),
    }
}

/// Milliseconds since the Unix epoch.
pub fn epoch_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}
