/// Command-line front end for spec files.
///
/// Spec files group `key = value` lines under `[section]` headers and can
/// carry multi-line `{ ... }` script blocks. This tool reads one and prints
/// what a program using the library would see: every entry, the decoded
/// values of one key, or the lines of one script.
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::debug;
use std::io;
use std::path::PathBuf;

use specfile::utils::{self, QueryOptions, ValueKind};

#[derive(Parser)]
#[command(name = "specfile")]
#[command(about = "Inspect sectioned spec files and their script blocks")]
struct Cli {
    /// Log parser activity (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print every parsed entry in key order
    Dump {
        file: PathBuf,
        /// Append a count of entries and sections
        #[arg(long)]
        summary: bool,
    },
    /// Print the decoded values of one key
    Get {
        file: PathBuf,
        key: String,
        /// Section that unscoped keys resolve against
        #[arg(short, long)]
        section: Option<String>,
        /// Type to decode each value as
        #[arg(short = 't', long = "type", value_enum, default_value_t = ValueKind::String)]
        kind: ValueKind,
        /// Print a note instead of failing when the key is missing
        #[arg(long)]
        lenient: bool,
    },
    /// Print the lines of a script block
    Script {
        file: PathBuf,
        key: String,
        /// Section that unscoped keys resolve against
        #[arg(short, long)]
        section: Option<String>,
        /// Show each line as its tokens
        #[arg(long)]
        tokens: bool,
        /// Print a note instead of failing when the key is missing
        #[arg(long)]
        lenient: bool,
    },
}

fn setup_logging(verbose: bool) -> Result<()> {
    let level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .try_init()
        .context("Failed to setup logging")?;
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose)?;

    let mut out = io::stdout().lock();

    match cli.command {
        Commands::Dump { file, summary } => {
            debug!("dump {}", file.display());
            utils::dump_file(&file, summary, &mut out)
        }
        Commands::Get {
            file,
            key,
            section,
            kind,
            lenient,
        } => utils::print_values(&file, &key, kind, &QueryOptions { section, lenient }, &mut out),
        Commands::Script {
            file,
            key,
            section,
            tokens,
            lenient,
        } => utils::print_script(&file, &key, tokens, &QueryOptions { section, lenient }, &mut out),
    }
}
