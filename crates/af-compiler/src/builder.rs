//! Actions file writers
//!
//! Two text layouts are produced: a plain block list with an unblock
//! section, and an alias-based layout that forwards blocked and allowed
//! hosts to configurable targets. A JSON dump of both sets is available for
//! tooling that does not read actions files.

use std::io::{self, Write};

use crate::error::Result;
use crate::RuleSets;

pub const BLOCK_START: &str = "{+block{}}";
pub const BLOCK_END: &str = "{-block}";
pub const ALIAS_SECTION: &str = "{{alias}}";
pub const BLACKLIST_ALIAS: &str = "blacklist";
pub const WHITELIST_ALIAS: &str = "whitelist";

pub const DEFAULT_BLOCK_FORWARD: &str = "127.0.0.1:8228";
pub const DEFAULT_ALLOW_FORWARD: &str = ".";

/// Forward targets written into the alias section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForwardTargets {
    pub block: String,
    pub allow: String,
}

impl Default for ForwardTargets {
    fn default() -> Self {
        Self {
            block: DEFAULT_BLOCK_FORWARD.to_string(),
            allow: DEFAULT_ALLOW_FORWARD.to_string(),
        }
    }
}

/// Write the block/unblock layout. Writes nothing when there is no block rule.
pub fn write_block_list<W: Write + ?Sized>(out: &mut W, sets: &RuleSets) -> io::Result<()> {
    if sets.rules.is_empty() {
        return Ok(());
    }

    writeln!(out, "{BLOCK_START}")?;
    write_lines(out, &sets.rules)?;
    writeln!(out)?;
    writeln!(out, "{BLOCK_END}")?;
    write_lines(out, &sets.excepts)
}

/// Write the alias/forward layout. Both sections are always present.
pub fn write_forward_list<W: Write + ?Sized>(out: &mut W, sets: &RuleSets, targets: &ForwardTargets) -> io::Result<()> {
    writeln!(out, "{ALIAS_SECTION}")?;
    writeln!(out, "{BLACKLIST_ALIAS} = +forward-override{{forward {}}}", targets.block)?;
    writeln!(out, "{WHITELIST_ALIAS} = +forward-override{{forward {}}}", targets.allow)?;

    writeln!(out)?;
    writeln!(out, "{{{BLACKLIST_ALIAS}}}")?;
    write_lines(out, &sets.rules)?;

    writeln!(out)?;
    writeln!(out, "{{{WHITELIST_ALIAS}}}")?;
    write_lines(out, &sets.excepts)
}

/// Write both sets as a JSON object.
pub fn write_json<W: Write + ?Sized>(out: &mut W, sets: &RuleSets) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, sets)?;
    writeln!(out)?;
    Ok(())
}

fn write_lines<W: Write + ?Sized>(out: &mut W, lines: &[String]) -> io::Result<()> {
    for line in lines {
        writeln!(out, "{line}")?;
    }
    Ok(())
}
