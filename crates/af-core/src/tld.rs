//! Domain heuristic for deciding whether a bare token is a host
//!
//! Filter lines rarely say which part is the host. A token counts as a
//! domain when it is an IP literal, or when its last `.`/`:` separated piece
//! is a port number or a known top-level domain.
//!
//! The TLD set is a hand-maintained approximation. Hosts under a TLD that is
//! missing from the set are read as path fragments; extend the set rather
//! than the parser when that matters.
//!
//! # Examples
//!
//! ```
//! use af_core::tld::{DomainHeuristic, TldSet};
//!
//! let tlds = TldSet::curated();
//! assert!(tlds.looks_like_domain("ads.example.com"));
//! assert!(tlds.looks_like_domain("localhost:8080"));
//! assert!(!tlds.looks_like_domain("banner"));
//! ```

use std::collections::HashSet;

use crate::host::is_ip_with_port;

// =============================================================================
// Heuristic Trait
// =============================================================================

/// Decides whether a token (no scheme, no leading anchor) is shaped like a
/// domain rather than a path fragment.
pub trait DomainHeuristic {
    fn looks_like_domain(&self, token: &str) -> bool;
}

impl<F> DomainHeuristic for F
where
    F: Fn(&str) -> bool,
{
    fn looks_like_domain(&self, token: &str) -> bool {
        self(token)
    }
}

// =============================================================================
// Curated TLDs
// =============================================================================

/// Top-level domains recognized out of the box.
pub const CURATED_TLDS: &[&str] = &[
    "ac", "ad", "ae", "af", "ag", "ai", "al", "am", "ao", "ar", "as", "at", "au", "av", "az",
    "asia",
    "ba", "bd", "be", "bf", "bg", "bh", "bi", "bj", "bn", "bo", "br", "bs", "bt", "bw", "by", "bz",
    "biz",
    "ca", "cc", "cd", "cf", "cg", "ch", "ci", "ck", "cl", "cm", "cn", "co", "cr", "cu", "cy", "cz",
    "cat", "city", "club", "com",
    "de", "dj", "dk", "dm", "do", "dz",
    "ec", "ee", "eg", "es", "et", "eu",
    "edu",
    "fi", "fj", "fm", "fr",
    "fit",
    "ga", "gd", "ge", "gg", "gh", "gi", "gl", "gm", "gp", "gr", "gt", "gy",
    "gov",
    "hk", "hn", "hr", "ht", "hu",
    "ie", "id", "il", "im", "in", "io", "iq", "ir", "is", "it",
    "info",
    "je", "jm", "jo", "jp",
    "ke", "kg", "kh", "ki", "kr", "kw", "kz",
    "la", "lb", "li", "lk", "ls", "lt", "lu", "lv", "ly",
    "ma", "md", "me", "mg", "mk", "ml", "mm", "mn", "ms", "mt", "mu", "mv", "mw", "mx", "my", "mz",
    "mil", "mobi",
    "na", "ne", "nf", "ng", "ni", "nl", "no", "np", "nr", "nu", "nz",
    "name", "net", "ninja",
    "om", "org",
    "pa", "pe", "pg", "ph", "pk", "pl", "pn", "pr", "ps", "pt", "pw", "py",
    "press", "pro",
    "qa",
    "ro", "rs", "ru", "rw",
    "red",
    "sa", "sb", "sc", "se", "sg", "sh", "si", "sk", "sl", "sm", "sn", "so", "sr", "st", "su", "sv",
    "tc", "td", "tg", "th", "tj", "tk", "tl", "tm", "tn", "to", "tr", "tt", "tv", "tw", "tz",
    "today",
    "ua", "ug", "uk", "us", "uy", "uz",
    "vc", "ve", "vg", "vi", "vn", "vu",
    "ws", "wang", "wiki", "work",
    "xxx", "xyz",
    "za", "zm", "zw",
];

/// Set of TLDs consulted by the heuristic.
#[derive(Debug, Clone, Default)]
pub struct TldSet {
    tlds: HashSet<String>,
}

impl TldSet {
    /// Create an empty set. Only IP literals and ports will be accepted.
    pub fn new() -> Self {
        Self::default()
    }

    /// The curated set.
    pub fn curated() -> Self {
        let mut set = Self::new();
        set.extend(CURATED_TLDS.iter().copied());
        set
    }

    /// Add a TLD. A leading dot is ignored.
    pub fn insert(&mut self, tld: &str) -> bool {
        let tld = tld.trim_start_matches('.');
        if tld.is_empty() {
            return false;
        }
        self.tlds.insert(tld.to_string())
    }

    pub fn extend<'a, I>(&mut self, tlds: I)
    where
        I: IntoIterator<Item = &'a str>,
    {
        for tld in tlds {
            self.insert(tld);
        }
    }

    #[inline]
    pub fn contains(&self, tld: &str) -> bool {
        self.tlds.contains(tld)
    }

    pub fn len(&self) -> usize {
        self.tlds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tlds.is_empty()
    }
}

impl DomainHeuristic for TldSet {
    fn looks_like_domain(&self, token: &str) -> bool {
        if is_ip_with_port(token) {
            return true;
        }

        let Some(pos) = token.rfind(['.', ':']) else {
            return false;
        };

        let suffix = &token[pos + 1..];
        if suffix.is_empty() {
            return false;
        }

        suffix.bytes().all(|b| b.is_ascii_digit()) || self.contains(suffix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_curated_domains() {
        let tlds = TldSet::curated();
        assert!(tlds.looks_like_domain("example.com"));
        assert!(tlds.looks_like_domain("*.example.co"));
        assert!(tlds.looks_like_domain("example.ninja"));
        assert!(tlds.looks_like_domain("bbc.co.uk"));
    }

    #[test]
    fn test_ports_and_ips() {
        let tlds = TldSet::curated();
        assert!(tlds.looks_like_domain("intranet:8080"));
        assert!(tlds.looks_like_domain("10.0.0.1"));
        assert!(tlds.looks_like_domain("[::1]:443"));
        assert!(tlds.looks_like_domain("fe80::abcd"));
    }

    #[test]
    fn test_path_fragments() {
        let tlds = TldSet::curated();
        assert!(!tlds.looks_like_domain("banner"));
        assert!(!tlds.looks_like_domain("ads.gif"));
        assert!(!tlds.looks_like_domain("example.com*"));
        assert!(!tlds.looks_like_domain("example."));
        assert!(!tlds.looks_like_domain(""));
    }

    #[test]
    fn test_case_sensitive() {
        let tlds = TldSet::curated();
        assert!(!tlds.looks_like_domain("EXAMPLE.COM"));
    }

    #[test]
    fn test_uncurated_tld_needs_insert() {
        let mut tlds = TldSet::curated();
        assert!(!tlds.looks_like_domain("example.dev"));
        assert!(tlds.insert(".dev"));
        assert!(tlds.looks_like_domain("example.dev"));
        assert!(!tlds.insert(""));
    }

    #[test]
    fn test_closure_heuristic() {
        let only_local = |token: &str| token.ends_with(".local");
        assert!(only_local.looks_like_domain("printer.local"));
        assert!(!only_local.looks_like_domain("example.com"));
    }
}
