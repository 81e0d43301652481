//! Client IP resolution behind proxies.
//!
//! # Responsibilities
//! - Derive the real client IP from forwarded headers and the socket address
//! - Skip private/loopback hops in the forwarded chain
//!
//! # Design Decisions
//! - First match wins: X-Forwarded-For chain, then X-Real-IP, then the raw
//!   remote address, then the literal "unknown"
//! - The real-IP header is not filtered for private ranges; only the
//!   forwarded chain is. The asymmetry is deliberate and kept as-is.
//! - Private-range detection is a string-prefix test, not CIDR arithmetic.
//!   The sixteen 172.16.–172.31. prefixes cover 172.16.0.0/12 exactly, but a
//!   numeric comparison would be more honest; known imprecision.

use crate::security::identifier::is_valid_ip_address;

/// Returned when no candidate address is usable.
pub const UNKNOWN_CLIENT: &str = "unknown";

/// Prefixes treated as private/loopback, plus two literal forms.
const PRIVATE_PREFIXES: &[&str] = &[
    "10.", "192.168.", "172.16.", "172.17.", "172.18.", "172.19.", "172.20.", "172.21.", "172.22.",
    "172.23.", "172.24.", "172.25.", "172.26.", "172.27.", "172.28.", "172.29.", "172.30.",
    "172.31.",
];

/// Best guess for the real client IP, considering proxies.
///
/// Precedence: first syntactically valid, non-private entry of the
/// forwarded-for chain; then a valid real-IP header; then a valid remote
/// address; then `"unknown"`.
pub fn extract_real_client_ip(
    forwarded_for: Option<&str>,
    real_ip: Option<&str>,
    remote_addr: Option<&str>,
) -> String {
    if let Some(chain) = forwarded_for {
        for candidate in chain.split(',').map(str::trim) {
            if is_valid_ip_address(candidate) && !is_private_ip(candidate) {
                return candidate.to_string();
            }
        }
    }

    if let Some(ip) = real_ip {
        if is_valid_ip_address(ip) {
            return ip.to_string();
        }
    }

    if let Some(addr) = remote_addr {
        if is_valid_ip_address(addr) {
            return addr.to_string();
        }
    }

    UNKNOWN_CLIENT.to_string()
}

/// True if `ip` falls in a common private range (RFC 1918) or is loopback.
///
/// A string that is not a valid IP is never considered private.
pub fn is_private_ip(ip: &str) -> bool {
    if !is_valid_ip_address(ip) {
        return false;
    }

    PRIVATE_PREFIXES.iter().any(|prefix| ip.starts_with(prefix))
        || ip == "127.0.0.1"
        || ip == "localhost"
}
