//! actionsfile CLI
//!
//! Converts Adblock Plus style filter lists into actions files.

mod compile;

use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use af_compiler::builder::{DEFAULT_ALLOW_FORWARD, DEFAULT_BLOCK_FORWARD};
use af_compiler::{write_block_list, write_forward_list, write_json, ForwardTargets, RuleSets};
use af_core::types::Mode;

use crate::compile::{build_normalizer, compile_input};

#[derive(Parser)]
#[command(name = "af-cli")]
#[command(about = "Convert filter lists into actions files")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Translate an ad blocking list into a block/unblock actions file
    Adblock {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Translate a proxy list into forward-override sections
    Gfwlist {
        #[command(flatten)]
        input: InputArgs,

        /// Forward target for blocked hosts
        #[arg(long, default_value = DEFAULT_BLOCK_FORWARD)]
        blacklist_forward: String,

        /// Forward target for allowed hosts
        #[arg(long, default_value = DEFAULT_ALLOW_FORWARD)]
        whitelist_forward: String,
    },
}

#[derive(Args)]
struct InputArgs {
    /// Filter list file (reads stdin when omitted)
    input: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Actions)]
    format: OutputFormat,

    /// Extra top-level domain to treat as a host suffix (repeatable)
    #[arg(long = "tld", value_name = "TLD")]
    extra_tlds: Vec<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Actions,
    Json,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Adblock { input } => cmd_adblock(&input),
        Commands::Gfwlist {
            input,
            blacklist_forward,
            whitelist_forward,
        } => cmd_gfwlist(
            &input,
            ForwardTargets {
                block: blacklist_forward,
                allow: whitelist_forward,
            },
        ),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn cmd_adblock(args: &InputArgs) -> Result<(), String> {
    let sets = compile_sets(args, Mode::Canonical)?;
    write_output(args.format, &sets, |out, sets| write_block_list(out, sets))
}

fn cmd_gfwlist(args: &InputArgs, targets: ForwardTargets) -> Result<(), String> {
    let sets = compile_sets(args, Mode::Strict)?;
    write_output(args.format, &sets, |out, sets| write_forward_list(out, sets, &targets))
}

fn compile_sets(args: &InputArgs, mode: Mode) -> Result<RuleSets, String> {
    let normalizer = build_normalizer(mode, &args.extra_tlds)?;
    let compilation = compile_input(args.input.as_deref(), &normalizer)?;
    Ok(compilation.sets)
}

fn write_output<F>(format: OutputFormat, sets: &RuleSets, write_actions: F) -> Result<(), String>
where
    F: FnOnce(&mut dyn Write, &RuleSets) -> io::Result<()>,
{
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    match format {
        OutputFormat::Actions => {
            write_actions(&mut out, sets).map_err(|e| format!("Failed to write output: {}", e))?
        }
        OutputFormat::Json => write_json(&mut out, sets).map_err(|e| format!("Failed to write output: {}", e))?,
    }

    out.flush().map_err(|e| format!("Failed to write output: {}", e))
}
