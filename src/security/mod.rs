//! Security subsystem.
//!
//! # Responsibilities
//! - Classify inbound identifiers (user id, API key, endpoint path, IP)
//! - Resolve the real client IP behind proxy headers
//!
//! # Design Decisions
//! - Validators are pure predicates: any input, boolean out, never panic
//! - Client IP resolution prefers forwarded headers over the socket address
//!   and filters private ranges out of forwarded chains

pub mod client_ip;
pub mod identifier;
