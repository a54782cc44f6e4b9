//! actionsfile Filter List Compiler
//!
//! This crate translates Adblock-Plus style filter lists into block and
//! allow sets for actions files.

pub mod builder;
pub mod error;
pub mod normalizer;
pub mod optimizer;
pub mod parser;

use std::io::BufRead;

use serde::Serialize;

use af_core::types::{NormalizedRule, RuleAction};

pub use builder::{write_block_list, write_forward_list, write_json, ForwardTargets};
pub use error::{Error, Result};
pub use normalizer::{Normalizer, NormalizerConfig};
pub use optimizer::{reduce, reduce_rule_sets, ReduceStats};
pub use parser::{classify, split_pattern, Classified, ParsedPattern};

/// Accumulated block and allow entries, in order of first appearance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RuleSets {
    pub rules: Vec<String>,
    pub excepts: Vec<String>,
}

impl RuleSets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, rule: NormalizedRule) {
        match rule.action {
            RuleAction::Block => self.rules.push(rule.pattern),
            RuleAction::Allow => self.excepts.push(rule.pattern),
        }
    }

    pub fn len(&self) -> usize {
        self.rules.len() + self.excepts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty() && self.excepts.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompileStats {
    pub lines: usize,
    pub comments: usize,
    pub skipped: usize,
    pub rules: usize,
    pub excepts: usize,
    /// Present when the mode reduces the sets (block, allow).
    pub reduction: Option<(ReduceStats, ReduceStats)>,
}

#[derive(Debug, Clone, Default)]
pub struct Compilation {
    pub sets: RuleSets,
    pub stats: CompileStats,
}

/// Compile a filter list read line by line.
///
/// Lines that are not valid UTF-8 are decoded lossily rather than ending the
/// run.
pub fn compile_reader<R: BufRead>(mut reader: R, normalizer: &Normalizer) -> Result<Compilation> {
    let mut compilation = Compilation::default();
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        let bytes = buf.strip_suffix(b"\n").unwrap_or(&buf[..]);
        let bytes = bytes.strip_suffix(b"\r").unwrap_or(bytes);
        compilation.feed(normalizer, &String::from_utf8_lossy(bytes));
    }
    compilation.finish(normalizer);
    Ok(compilation)
}

/// Compile a filter list held in memory.
pub fn compile_str(text: &str, normalizer: &Normalizer) -> Compilation {
    let mut compilation = Compilation::default();
    for line in text.lines() {
        compilation.feed(normalizer, line);
    }
    compilation.finish(normalizer);
    compilation
}

impl Compilation {
    fn feed(&mut self, normalizer: &Normalizer, line: &str) {
        self.stats.lines += 1;
        if line.is_empty() {
            return;
        }
        if is_comment_line(line) {
            self.stats.comments += 1;
            return;
        }

        match normalizer.apply(line, &mut self.sets) {
            Ok(0) => self.skip(line, "no output"),
            Ok(_) => {}
            Err(reason) => self.skip(line, &reason.to_string()),
        }
    }

    fn skip(&mut self, line: &str, reason: &str) {
        self.stats.skipped += 1;
        log::warn!("skip: {line} ({reason})");
    }

    fn finish(&mut self, normalizer: &Normalizer) {
        if normalizer.mode().reduces() {
            self.stats.reduction = Some(reduce_rule_sets(&mut self.sets));
        }
        self.stats.rules = self.sets.rules.len();
        self.stats.excepts = self.sets.excepts.len();
    }
}

fn is_comment_line(line: &str) -> bool {
    line.starts_with('!') || line.starts_with('[')
}
