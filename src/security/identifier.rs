//! Identifier format validation.
//!
//! # Responsibilities
//! - Validate user ids, API keys, endpoint paths and IP addresses
//! - Enforce per-kind length ceilings and character classes
//!
//! # Design Decisions
//! - Pure predicates: no allocation, no errors, a boolean for any input
//! - Character classes are fixed ASCII sets, so no regex engine is needed
//! - IP validation is syntactic only (no DNS lookups)

use std::net::IpAddr;

/// Maximum accepted user id length.
pub const MAX_USER_ID_LENGTH: usize = 255;

/// Maximum accepted API key length.
pub const MAX_API_KEY_LENGTH: usize = 128;

/// Maximum accepted endpoint path length.
pub const MAX_ENDPOINT_LENGTH: usize = 255;

/// Characters permitted in user ids and API keys.
fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-')
}

/// True if `user_id` is non-blank, at most 255 characters, and made of
/// alphanumerics, `.`, `_` or `-`.
pub fn is_valid_user_id(user_id: &str) -> bool {
    if user_id.trim().is_empty() || user_id.chars().count() > MAX_USER_ID_LENGTH {
        return false;
    }
    user_id.chars().all(is_identifier_char)
}

/// True if `api_key` is non-blank, at most 128 characters, and made of the
/// same character class as user ids.
pub fn is_valid_api_key(api_key: &str) -> bool {
    if api_key.trim().is_empty() || api_key.chars().count() > MAX_API_KEY_LENGTH {
        return false;
    }
    api_key.chars().all(is_identifier_char)
}

/// True if `endpoint` is non-blank, at most 255 characters, starts with `/`
/// and contains only alphanumerics, `.`, `_`, `/` or `-`.
pub fn is_valid_endpoint(endpoint: &str) -> bool {
    if endpoint.trim().is_empty() || endpoint.chars().count() > MAX_ENDPOINT_LENGTH {
        return false;
    }
    endpoint.starts_with('/') && endpoint.chars().all(|c| is_identifier_char(c) || c == '/')
}

/// True if `ip` parses as a syntactically valid IPv4 or IPv6 address.
pub fn is_valid_ip_address(ip: &str) -> bool {
    if ip.trim().is_empty() {
        return false;
    }
    ip.parse::<IpAddr>().is_ok()
}
