//! actionsfile Core Library
//!
//! Shared building blocks for turning Adblock-Plus style filter lines into
//! actions file entries.
//!
//! # Modules
//!
//! - `types`: Rule flags, actions and the normalization mode
//! - `error`: The unsupported-pattern taxonomy
//! - `tld`: Domain heuristic backed by a curated TLD set
//! - `host`: Host helpers (IP literals, wildcard suffix walking)

pub mod error;
pub mod host;
pub mod tld;
pub mod types;

// Re-export commonly used types
pub use error::Unsupported;
pub use host::{is_ip_literal, is_ip_with_port, wildcard_suffixes};
pub use tld::{DomainHeuristic, TldSet};
pub use types::{Mode, NormalizedRule, RuleAction, RuleFlags};
