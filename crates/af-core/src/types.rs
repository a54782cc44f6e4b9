//! Core type definitions for actionsfile
//!
//! These types are shared between the normalizer and the output stage.

// =============================================================================
// Rule Flags
// =============================================================================

bitflags::bitflags! {
    /// Flags recorded while classifying a filter line.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct RuleFlags: u8 {
        /// Exception rule (@@...)
        const EXCEPTION = 1 << 0;
        /// Pattern was anchored to https://
        const HTTPS = 1 << 1;
        /// Hostname anchor (||) - domain and all subdomains
        const INCLUDE_SUBDOMAINS = 1 << 2;
        /// Pattern starts with an explicit domain (||, |http://, https://, ...)
        const EXPLICIT_DOMAIN = 1 << 3;
    }
}

// =============================================================================
// Rule Actions
// =============================================================================

/// Which output set a normalized rule belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum RuleAction {
    /// Exception rule - goes to the allow set
    Allow = 0,
    /// Block rule - goes to the block set
    Block = 1,
}

impl RuleAction {
    #[inline]
    pub fn from_exception(is_exception: bool) -> Self {
        if is_exception {
            Self::Allow
        } else {
            Self::Block
        }
    }
}

/// A `domain + path` match string bound for one of the two output sets.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NormalizedRule {
    pub pattern: String,
    pub action: RuleAction,
}

impl NormalizedRule {
    pub fn new(pattern: String, action: RuleAction) -> Self {
        Self { pattern, action }
    }

    pub fn block(pattern: impl Into<String>) -> Self {
        Self::new(pattern.into(), RuleAction::Block)
    }

    pub fn allow(pattern: impl Into<String>) -> Self {
        Self::new(pattern.into(), RuleAction::Allow)
    }
}

// =============================================================================
// Normalization Mode
// =============================================================================

/// Variant of the normalization rules.
///
/// `Canonical` is the plain block list translation. `Strict` rejects patterns
/// the forwarding output cannot express and reduces the final sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    #[default]
    Canonical,
    Strict,
}

impl Mode {
    /// Drop whole-line `/.../` regex literals.
    #[inline]
    pub fn rejects_regex_literals(self) -> bool {
        self == Self::Strict
    }

    /// A bare token with no domain shape must contain `/` to count as a path.
    #[inline]
    pub fn requires_slash_in_bare_path(self) -> bool {
        self == Self::Strict
    }

    /// Strip a trailing `:port` before testing a `||` domain for an IP literal.
    #[inline]
    pub fn strips_port_before_ip_test(self) -> bool {
        self == Self::Canonical
    }

    /// Apply deduplication and subsumption elimination after parsing.
    #[inline]
    pub fn reduces(self) -> bool {
        self == Self::Strict
    }

    /// Treat a literal `*` domain like a missing one when `domain=` is present.
    #[inline]
    pub fn distributes_wildcard_domain(self) -> bool {
        self == Self::Canonical
    }
}
