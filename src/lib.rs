//! Rate limiter HTTP service library.

pub mod config;
pub mod http;
pub mod limiter;
pub mod observability;
pub mod security;
pub mod service;

pub use config::schema::RateLimiterConfig;
pub use http::HttpServer;
pub use service::RateLimiterService;
