use std::collections::HashSet;

use af_core::host::wildcard_suffixes;

use crate::RuleSets;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReduceStats {
    pub before: usize,
    pub after: usize,
    pub deduped: usize,
    pub subsumed: usize,
}

/// Deduplicate and drop entries already covered by a wildcard-domain entry.
///
/// Survivors keep their relative order. Running it twice changes nothing.
pub fn reduce(rules: &mut Vec<String>) -> ReduceStats {
    let before = rules.len();
    let deduped = dedupe(rules);
    let subsumed = remove_subsumed(rules);

    ReduceStats {
        before,
        after: rules.len(),
        deduped,
        subsumed,
    }
}

/// Reduce the block and allow sets independently.
pub fn reduce_rule_sets(sets: &mut RuleSets) -> (ReduceStats, ReduceStats) {
    (reduce(&mut sets.rules), reduce(&mut sets.excepts))
}

/// Remove exact duplicates, keeping the first occurrence.
pub fn dedupe(rules: &mut Vec<String>) -> usize {
    let before = rules.len();
    let mut seen: HashSet<String> = HashSet::with_capacity(rules.len());
    rules.retain(|rule| seen.insert(rule.clone()));
    before - rules.len()
}

/// Remove entries implied by a `.domain` entry in the same set.
pub fn remove_subsumed(rules: &mut Vec<String>) -> usize {
    let wildcards: HashSet<String> = rules
        .iter()
        .filter(|rule| rule.starts_with('.'))
        .cloned()
        .collect();
    if wildcards.is_empty() {
        return 0;
    }

    let before = rules.len();
    rules.retain(|rule| !is_subsumed(rule, &wildcards));
    before - rules.len()
}

fn is_subsumed(rule: &str, wildcards: &HashSet<String>) -> bool {
    if rule.is_empty() {
        return false;
    }

    if !rule.starts_with('.') && wildcards.contains(&format!(".{rule}")) {
        return true;
    }

    let host = rule.strip_prefix('.').unwrap_or(rule);
    if wildcard_suffixes(host).any(|suffix| wildcards.contains(suffix)) {
        return true;
    }

    match rule.find('/') {
        Some(pos) if pos > 0 => wildcard_suffixes(&rule[..pos]).any(|suffix| wildcards.contains(suffix)),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn dedupe_keeps_first_occurrence_order() {
        let mut rules = strings(&["a", "b", "a", "c"]);
        assert_eq!(dedupe(&mut rules), 1);
        assert_eq!(rules, strings(&["a", "b", "c"]));
    }

    #[test]
    fn exact_host_dropped_by_its_wildcard() {
        let mut rules = strings(&["example.com", ".example.com"]);
        assert_eq!(remove_subsumed(&mut rules), 1);
        assert_eq!(rules, strings(&[".example.com"]));
    }

    #[test]
    fn subdomain_path_dropped_regardless_of_order() {
        let mut rules = strings(&[".example.com", "sub.example.com/path"]);
        remove_subsumed(&mut rules);
        assert_eq!(rules, strings(&[".example.com"]));

        let mut rules = strings(&["sub.example.com/path", ".example.com"]);
        remove_subsumed(&mut rules);
        assert_eq!(rules, strings(&[".example.com"]));
    }

    #[test]
    fn narrower_wildcards_dropped() {
        let mut rules = strings(&[".ads.example.com", ".example.com", ".ads.example.com/x", ".other.com"]);
        assert_eq!(remove_subsumed(&mut rules), 2);
        assert_eq!(rules, strings(&[".example.com", ".other.com"]));
    }

    #[test]
    fn unrelated_entries_survive() {
        let mut rules = strings(&[
            ".example.com",
            "example.org/path",
            "notexample.com",
            "/(.*/)?ads/.*\\.gif",
            ".example.co",
        ]);
        assert_eq!(remove_subsumed(&mut rules), 0);
        assert_eq!(rules.len(), 5);
    }

    #[test]
    fn path_segments_do_not_match_domains() {
        let mut rules = strings(&[".com", "/ads.com"]);
        assert_eq!(remove_subsumed(&mut rules), 0);

        let mut rules = strings(&[".gif", "example.org/a.gif"]);
        assert_eq!(remove_subsumed(&mut rules), 0);
    }

    #[test]
    fn reduce_is_idempotent() {
        let mut rules = strings(&[
            "a.example.com",
            ".example.com",
            "b.example.com/ads",
            "a.example.com",
            ".ads.net",
            "x.ads.net/y",
            "z.org",
            "z.org",
        ]);
        let first = reduce(&mut rules);
        assert_eq!(first.before, 8);
        assert_eq!(first.deduped, 2);
        assert_eq!(first.subsumed, 3);
        assert_eq!(rules, strings(&[".example.com", ".ads.net", "z.org"]));

        let once = rules.clone();
        let second = reduce(&mut rules);
        assert_eq!(rules, once);
        assert_eq!(second.deduped + second.subsumed, 0);
    }

    #[test]
    fn reduce_rule_sets_handles_both_sides() {
        let mut sets = RuleSets {
            rules: strings(&["a.com", ".a.com", "a.com"]),
            excepts: strings(&["b.com", "b.com"]),
        };
        let (rules, excepts) = reduce_rule_sets(&mut sets);
        assert_eq!(sets.rules, strings(&[".a.com"]));
        assert_eq!(sets.excepts, strings(&["b.com"]));
        assert_eq!(rules.after, 1);
        assert_eq!(excepts.deduped, 1);
    }
}
