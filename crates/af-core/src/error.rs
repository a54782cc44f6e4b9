//! Reasons a filter line is not translated.
//!
//! None of these are hard failures. A line that hits one of them simply
//! contributes nothing to the output.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Unsupported {
    /// Element hiding rules (`##`, `#@#`)
    #[error("cosmetic filter")]
    Cosmetic,

    /// Nothing left after stripping markers
    #[error("empty pattern")]
    Empty,

    /// Leading `|` without `|`, `http://` or `https://` after it
    #[error("bare start anchor")]
    BareAnchor,

    /// `/.../` literal regex line
    #[error("regex literal")]
    RegexLiteral,

    /// Bare token that is neither a domain nor a path
    #[error("not a domain or path")]
    NotAPath,

    /// Anything in the option list other than a single `domain=` option
    #[error("unsupported option: {0}")]
    UnsupportedOption(String),

    /// Path matching over https cannot be expressed
    #[error("path rule over https")]
    HttpsPath,

    /// `domain=` combined with a domain that already carries its own scope
    #[error("domain option with explicit domain")]
    DomainOptionConflict,

    /// Parsed fine but produced neither domain nor path
    #[error("no output")]
    NoOutput,
}
