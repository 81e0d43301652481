//! HTTP boundary.
//!
//! # Data Flow
//! ```text
//! POST /rate_limit/check   → handlers::check_rate_limit → service → 200/429
//! GET  /rate_limit/config  → handlers::get_config       → ConfigDto
//! POST /rate_limit/config  → handlers::update_config    → validate-and-log
//! GET  /rate_limit/health  → handlers::health           → liveness body
//! ```
//!
//! # Design Decisions
//! - Validation errors become 400 bodies naming the failing wire field
//! - Quota metadata is echoed both in the JSON body and as X-RateLimit-*
//!   response headers

pub mod correlation;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod server;

pub use server::HttpServer;
