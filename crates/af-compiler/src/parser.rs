use af_core::tld::DomainHeuristic;
use af_core::types::{Mode, RuleFlags};
use af_core::Unsupported;

/// A filter line with its leading markers stripped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classified<'a> {
    pub flags: RuleFlags,
    pub residual: &'a str,
}

/// Domain, path and `domain=` tokens of a single filter line.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedPattern {
    /// Empty when the line names no host; a leading `.` covers subdomains.
    pub domain: String,
    /// Raw path fragment, empty for "any path".
    pub path: String,
    /// Tokens of a `$domain=a|~b` option, `~` kept.
    pub domain_options: Vec<String>,
    pub flags: RuleFlags,
}

impl ParsedPattern {
    #[inline]
    pub fn is_exception(&self) -> bool {
        self.flags.contains(RuleFlags::EXCEPTION)
    }
}

/// Strip the exception marker, anchors and scheme from a filter line.
pub fn classify(line: &str, mode: Mode) -> Result<Classified<'_>, Unsupported> {
    if line.contains("##") || line.contains("#@#") {
        return Err(Unsupported::Cosmetic);
    }

    let mut flags = RuleFlags::empty();
    let mut rest = line;

    if let Some(stripped) = rest.strip_prefix("@@") {
        flags |= RuleFlags::EXCEPTION;
        rest = stripped;
    }

    if let Some(anchored) = rest.strip_prefix('|') {
        if let Some(stripped) = anchored.strip_prefix('|') {
            flags |= RuleFlags::INCLUDE_SUBDOMAINS;
            rest = stripped;
        } else if let Some(stripped) = anchored.strip_prefix("http://") {
            rest = stripped;
        } else if let Some(stripped) = anchored.strip_prefix("https://") {
            flags |= RuleFlags::HTTPS;
            rest = stripped;
        } else {
            return Err(Unsupported::BareAnchor);
        }
        flags |= RuleFlags::EXPLICIT_DOMAIN;
    } else if mode.rejects_regex_literals() && is_regex_literal(rest) {
        return Err(Unsupported::RegexLiteral);
    } else if let Some(stripped) = rest.strip_prefix("http://") {
        flags |= RuleFlags::EXPLICIT_DOMAIN;
        rest = stripped;
    } else if let Some(stripped) = rest.strip_prefix("https://") {
        flags |= RuleFlags::EXPLICIT_DOMAIN | RuleFlags::HTTPS;
        rest = stripped;
    }

    if rest.is_empty() {
        return Err(Unsupported::Empty);
    }

    Ok(Classified { flags, residual: rest })
}

/// Split a classified line into domain, path and `domain=` tokens.
pub fn split_pattern(
    classified: Classified<'_>,
    heuristic: &dyn DomainHeuristic,
    mode: Mode,
) -> Result<ParsedPattern, Unsupported> {
    let Classified { flags, residual } = classified;
    let explicit = flags.contains(RuleFlags::EXPLICIT_DOMAIN);

    let mut parsed = ParsedPattern {
        flags,
        ..ParsedPattern::default()
    };

    let Some(pos) = residual.find(['^', '/', '$']) else {
        if explicit || heuristic.looks_like_domain(residual) {
            parsed.domain = residual.to_string();
        } else if mode.requires_slash_in_bare_path() && !residual.contains('/') {
            return Err(Unsupported::NotAPath);
        } else {
            parsed.path = residual.to_string();
        }
        return Ok(parsed);
    };

    let mut rest = residual;
    let prefix = &residual[..pos];
    if explicit || heuristic.looks_like_domain(prefix) {
        parsed.domain = prefix.to_string();
        rest = &residual[pos..];
    }

    let (path, options_text) = split_rule_options(rest);
    parsed.path = path.to_string();
    if let Some(options_text) = options_text {
        parsed.domain_options = parse_domain_option(options_text)?;
    }

    Ok(parsed)
}

fn is_regex_literal(pattern: &str) -> bool {
    pattern.starts_with('/') && pattern.ends_with('/')
}

fn split_rule_options(pattern: &str) -> (&str, Option<&str>) {
    match pattern.find('$') {
        Some(pos) => (&pattern[..pos], Some(&pattern[pos + 1..])),
        None => (pattern, None),
    }
}

/// Only a lone `domain=` option is understood; an empty option list is
/// ignored.
fn parse_domain_option(text: &str) -> Result<Vec<String>, Unsupported> {
    if text.is_empty() {
        return Ok(Vec::new());
    }

    if text.contains(',') {
        return Err(Unsupported::UnsupportedOption(text.to_string()));
    }

    let value = text
        .strip_prefix("domain=")
        .ok_or_else(|| Unsupported::UnsupportedOption(text.to_string()))?;

    Ok(value
        .split('|')
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect())
}

#[cfg(test)]
mod tests {
    use af_core::tld::TldSet;

    use super::*;

    fn parse(line: &str, mode: Mode) -> Result<ParsedPattern, Unsupported> {
        let tlds = TldSet::curated();
        split_pattern(classify(line, mode)?, &tlds, mode)
    }

    #[test]
    fn classifies_markers() {
        let c = classify("@@||example.com^", Mode::Canonical).unwrap();
        assert_eq!(
            c.flags,
            RuleFlags::EXCEPTION | RuleFlags::INCLUDE_SUBDOMAINS | RuleFlags::EXPLICIT_DOMAIN
        );
        assert_eq!(c.residual, "example.com^");

        let c = classify("|https://example.com/ads", Mode::Canonical).unwrap();
        assert_eq!(c.flags, RuleFlags::HTTPS | RuleFlags::EXPLICIT_DOMAIN);
        assert_eq!(c.residual, "example.com/ads");

        let c = classify("http://example.com", Mode::Canonical).unwrap();
        assert_eq!(c.flags, RuleFlags::EXPLICIT_DOMAIN);
        assert_eq!(c.residual, "example.com");

        let c = classify("/banner/*.gif", Mode::Canonical).unwrap();
        assert!(c.flags.is_empty());
    }

    #[test]
    fn rejects_unsupported_prefixes() {
        assert_eq!(classify("example.com##.ad", Mode::Canonical), Err(Unsupported::Cosmetic));
        assert_eq!(classify("example.com#@#.ad", Mode::Canonical), Err(Unsupported::Cosmetic));
        assert_eq!(classify("|ftp.example.com", Mode::Canonical), Err(Unsupported::BareAnchor));
        assert_eq!(classify("|", Mode::Canonical), Err(Unsupported::BareAnchor));
        assert_eq!(classify("@@", Mode::Canonical), Err(Unsupported::Empty));
        assert_eq!(classify("||", Mode::Canonical), Err(Unsupported::Empty));
    }

    #[test]
    fn regex_literal_only_rejected_in_strict_mode() {
        assert_eq!(classify("/ads[0-9]+/", Mode::Strict), Err(Unsupported::RegexLiteral));
        assert_eq!(classify("@@/ads/", Mode::Strict), Err(Unsupported::RegexLiteral));
        assert!(classify("/ads[0-9]+/", Mode::Canonical).is_ok());
        assert!(classify("/ads/banner", Mode::Strict).is_ok());
    }

    #[test]
    fn splits_domain_and_path() {
        let p = parse("||example.com/ads^", Mode::Canonical).unwrap();
        assert_eq!(p.domain, "example.com");
        assert_eq!(p.path, "/ads^");
        assert!(p.domain_options.is_empty());

        let p = parse("example.com/ads", Mode::Canonical).unwrap();
        assert_eq!(p.domain, "example.com");
        assert_eq!(p.path, "/ads");
    }

    #[test]
    fn keeps_non_domain_prefix_in_path() {
        let p = parse("banner/ads.gif", Mode::Canonical).unwrap();
        assert_eq!(p.domain, "");
        assert_eq!(p.path, "banner/ads.gif");
    }

    #[test]
    fn bare_tokens() {
        let p = parse("example.com", Mode::Strict).unwrap();
        assert_eq!(p.domain, "example.com");
        assert_eq!(p.path, "");

        let p = parse("adbanner", Mode::Canonical).unwrap();
        assert_eq!(p.domain, "");
        assert_eq!(p.path, "adbanner");

        assert_eq!(parse("adbanner", Mode::Strict), Err(Unsupported::NotAPath));
    }

    #[test]
    fn parses_domain_option() {
        let p = parse("/ads/*$domain=foo.com|~bar.com", Mode::Canonical).unwrap();
        assert_eq!(p.path, "/ads/*");
        assert_eq!(p.domain_options, vec!["foo.com", "~bar.com"]);

        let p = parse("/ads/$", Mode::Canonical).unwrap();
        assert!(p.domain_options.is_empty());

        let p = parse("/ads/$domain=", Mode::Canonical).unwrap();
        assert!(p.domain_options.is_empty());
    }

    #[test]
    fn rejects_other_options() {
        assert_eq!(
            parse("||example.com^$third-party", Mode::Canonical),
            Err(Unsupported::UnsupportedOption("third-party".to_string()))
        );
        assert_eq!(
            parse("/ads$domain=foo.com,script", Mode::Canonical),
            Err(Unsupported::UnsupportedOption("domain=foo.com,script".to_string()))
        );
    }
}
