//! Rule normalization engine
//!
//! Turns one filter line into zero or more `domain + path` match strings.
//! Each stage either narrows the line or rejects it with an
//! [`Unsupported`] reason:
//!
//! 1. classify: strip `@@`, anchors and scheme
//! 2. split: separate domain, path and `domain=` tokens
//! 3. mark subdomains: `||host` becomes `.host` unless it is an IP
//! 4. normalize path: anchors and wildcards become regex fragments
//! 5. distribute: emit block or allow entries

use std::collections::HashSet;

use regex::{Captures, Regex};

use af_core::host::is_ip_literal;
use af_core::tld::{DomainHeuristic, TldSet};
use af_core::types::{Mode, NormalizedRule, RuleAction, RuleFlags};
use af_core::Unsupported;

use crate::error::Result;
use crate::parser::{classify, split_pattern, ParsedPattern};
use crate::RuleSets;

const SPECIAL_CHARACTERS: &str = r"[.+?]";
const TRAILING_PORT: &str = r":[0-9*]+$";

/// Configuration for a [`Normalizer`].
pub struct NormalizerConfig {
    pub mode: Mode,
    pub heuristic: Box<dyn DomainHeuristic + Send + Sync>,
}

impl NormalizerConfig {
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            heuristic: Box::new(TldSet::curated()),
        }
    }

    pub fn with_heuristic<H>(mut self, heuristic: H) -> Self
    where
        H: DomainHeuristic + Send + Sync + 'static,
    {
        self.heuristic = Box::new(heuristic);
        self
    }
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self::new(Mode::default())
    }
}

/// Per-line normalization engine.
///
/// Holds its own compiled expressions, so independent instances never share
/// state.
pub struct Normalizer {
    mode: Mode,
    heuristic: Box<dyn DomainHeuristic + Send + Sync>,
    special_chars: Regex,
    trailing_port: Regex,
}

impl Normalizer {
    pub fn new(config: NormalizerConfig) -> Result<Self> {
        Ok(Self {
            mode: config.mode,
            heuristic: config.heuristic,
            special_chars: Regex::new(SPECIAL_CHARACTERS)?,
            trailing_port: Regex::new(TRAILING_PORT)?,
        })
    }

    pub fn with_mode(mode: Mode) -> Result<Self> {
        Self::new(NormalizerConfig::new(mode))
    }

    #[inline]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Normalize a single filter line.
    pub fn normalize(&self, line: &str) -> std::result::Result<Vec<NormalizedRule>, Unsupported> {
        let classified = classify(line, self.mode)?;
        let mut parsed = split_pattern(classified, self.heuristic.as_ref(), self.mode)?;
        self.mark_subdomains(&mut parsed);
        let path = self.normalize_path(&parsed)?;
        distribute(&parsed, &path, self.mode)
    }

    /// Normalize a line and append the result to `sets`.
    ///
    /// Returns the number of entries added.
    pub fn apply(&self, line: &str, sets: &mut RuleSets) -> std::result::Result<usize, Unsupported> {
        let rules = self.normalize(line)?;
        let count = rules.len();
        for rule in rules {
            sets.push(rule);
        }
        Ok(count)
    }

    fn mark_subdomains(&self, parsed: &mut ParsedPattern) {
        if !parsed.flags.contains(RuleFlags::INCLUDE_SUBDOMAINS) {
            return;
        }

        let is_ip = if self.mode.strips_port_before_ip_test() {
            is_ip_literal(&self.trailing_port.replace(&parsed.domain, ""))
        } else {
            is_ip_literal(&parsed.domain)
        };

        if !is_ip {
            parsed.domain.insert(0, '.');
        }
    }

    fn normalize_path(&self, parsed: &ParsedPattern) -> std::result::Result<String, Unsupported> {
        let raw = parsed.path.as_str();
        if raw.is_empty() {
            return Ok(String::new());
        }

        let raw = raw.strip_prefix('^').unwrap_or(raw);
        let path = if let Some(head) = raw.strip_suffix('^').or_else(|| raw.strip_suffix('|')) {
            format!("{head}$")
        } else {
            raw.strip_suffix('*').unwrap_or(raw).to_string()
        };

        if path == "/" {
            return Ok(String::new());
        }

        if parsed.flags.contains(RuleFlags::HTTPS) {
            return Err(Unsupported::HttpsPath);
        }

        if path.is_empty() {
            return Ok(path);
        }

        let path = self
            .special_chars
            .replace_all(&path, |caps: &Captures| format!("\\{}", &caps[0]))
            .replace('^', r"\b")
            .replace('*', ".*");

        if parsed.domain.is_empty() {
            if let Some(rest) = path.strip_prefix('/') {
                return Ok(format!("/(.*/)?{rest}"));
            }
        }

        if path.starts_with('/') {
            Ok(path)
        } else if path.starts_with(".*") {
            Ok(format!("/{path}"))
        } else {
            Ok(format!("/.*{path}"))
        }
    }
}

fn distribute(
    parsed: &ParsedPattern,
    path: &str,
    mode: Mode,
) -> std::result::Result<Vec<NormalizedRule>, Unsupported> {
    let domain = parsed.domain.as_str();

    if !parsed.domain_options.is_empty() {
        let unscoped = domain.is_empty() || (mode.distributes_wildcard_domain() && domain == "*");
        if unscoped {
            return distribute_domain_options(parsed, path);
        }
        // A bare `*` host names nothing; the options are left unresolved.
        if !domain.bytes().all(|b| b == b'*') {
            return Err(Unsupported::DomainOptionConflict);
        }
    }

    let domain = domain.strip_prefix('*').unwrap_or(domain);
    let domain = domain.strip_suffix('*').unwrap_or(domain);
    if domain.is_empty() && path.is_empty() {
        return Err(Unsupported::NoOutput);
    }

    Ok(vec![NormalizedRule::new(
        format!("{domain}{path}"),
        RuleAction::from_exception(parsed.is_exception()),
    )])
}

fn distribute_domain_options(
    parsed: &ParsedPattern,
    path: &str,
) -> std::result::Result<Vec<NormalizedRule>, Unsupported> {
    let mut rules = Vec::with_capacity(parsed.domain_options.len());

    for token in &parsed.domain_options {
        let (excluded, host) = match token.strip_prefix('~') {
            Some(rest) => (true, rest),
            None => (false, token.as_str()),
        };
        if host.is_empty() {
            continue;
        }

        let pattern = if host.starts_with("www.") || is_ip_literal(host) {
            format!("{host}{path}")
        } else {
            format!(".{host}{path}")
        };
        let action = RuleAction::from_exception(parsed.is_exception() || excluded);
        rules.push(NormalizedRule::new(pattern, action));
    }

    // `domain=a.com|~a.com`: the exclusion wins.
    let allowed: HashSet<String> = rules
        .iter()
        .filter(|rule| rule.action == RuleAction::Allow)
        .map(|rule| rule.pattern.clone())
        .collect();
    if !allowed.is_empty() {
        rules.retain(|rule| rule.action == RuleAction::Allow || !allowed.contains(&rule.pattern));
    }

    if rules.is_empty() {
        return Err(Unsupported::NoOutput);
    }

    Ok(rules)
}
