use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;
use std::time::Instant;

use af_compiler::{compile_reader, Compilation, Normalizer, NormalizerConfig};
use af_core::tld::TldSet;
use af_core::types::Mode;

pub fn build_normalizer(mode: Mode, extra_tlds: &[String]) -> Result<Normalizer, String> {
    let mut tlds = TldSet::curated();
    tlds.extend(extra_tlds.iter().map(String::as_str));

    let config = NormalizerConfig::new(mode).with_heuristic(tlds);
    Normalizer::new(config).map_err(|e| format!("Failed to build normalizer: {}", e))
}

/// Compile a filter list file, or stdin when no path is given.
pub fn compile_input(input: Option<&Path>, normalizer: &Normalizer) -> Result<Compilation, String> {
    let start = Instant::now();

    let compilation = match input {
        Some(path) => {
            let file = File::open(path)
                .map_err(|e| format!("Failed to open '{}': {}", path.display(), e))?;
            compile_reader(BufReader::new(file), normalizer)
                .map_err(|e| format!("Failed to read '{}': {}", path.display(), e))?
        }
        None => compile_reader(io::stdin().lock(), normalizer)
            .map_err(|e| format!("Failed to read stdin: {}", e))?,
    };

    let stats = &compilation.stats;
    log::info!(
        "Compiled {} lines: {} rules, {} exceptions, {} skipped, {} comments ({:.1}ms)",
        stats.lines,
        stats.rules,
        stats.excepts,
        stats.skipped,
        stats.comments,
        start.elapsed().as_secs_f64() * 1000.0,
    );
    if let Some((rules, excepts)) = stats.reduction {
        log::info!(
            "Reduced rules {} -> {} (dedupe {}, subsumed {}), exceptions {} -> {} (dedupe {}, subsumed {})",
            rules.before,
            rules.after,
            rules.deduped,
            rules.subsumed,
            excepts.before,
            excepts.after,
            excepts.deduped,
            excepts.subsumed,
        );
    }

    Ok(compilation)
}
