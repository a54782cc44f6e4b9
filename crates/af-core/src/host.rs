//! Host helpers used by the normalizer and the reduction stage
//!
//! These functions work directly on string slices and never allocate.

use std::net::{IpAddr, SocketAddr};

// =============================================================================
// IP Literals
// =============================================================================

/// Check whether `s` is a bare IPv4 or IPv6 address.
#[inline]
pub fn is_ip_literal(s: &str) -> bool {
    s.parse::<IpAddr>().is_ok()
}

/// Check whether `s` is an IP address, optionally followed by a port
/// (`1.2.3.4:8080`, `[::1]:443`).
#[inline]
pub fn is_ip_with_port(s: &str) -> bool {
    is_ip_literal(s) || s.parse::<SocketAddr>().is_ok()
}

// =============================================================================
// Wildcard Suffix Walking
// =============================================================================

/// Iterator over the `.`-prefixed suffixes of a rule, leftmost label first.
///
/// Walking stops at the first `/`, so only the host part contributes.
/// `sub.example.com/ads` yields `.example.com/ads`, then `.com/ads`.
pub struct WildcardSuffixes<'a> {
    rest: &'a str,
}

impl<'a> Iterator for WildcardSuffixes<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let pos = self.rest.find(['.', '/'])?;
        if self.rest.as_bytes()[pos] != b'.' {
            self.rest = "";
            return None;
        }

        let suffix = &self.rest[pos..];
        self.rest = &self.rest[pos + 1..];
        Some(suffix)
    }
}

/// Walk the wildcard suffixes of `s`.
pub fn wildcard_suffixes(s: &str) -> WildcardSuffixes<'_> {
    WildcardSuffixes { rest: s }
}
