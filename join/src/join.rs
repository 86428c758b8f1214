extern crate log;

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use log::{info, LevelFilter};

use join::*;
use logger::setup_logger;

/// Concatenate files according to order in reference
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Output file
    out: PathBuf,

    /// File with headers determining the reference order
    reference: PathBuf,

    /// Directory or files to join, identified by filename
    #[arg(required = true, num_args = 1..)]
    filenames: Vec<String>,

    /// Identifier pattern tried first on each reference line (first group is the ID)
    #[arg(long, env = "JOIN_ID_PATTERN", default_value = DEFAULT_ID_PATTERN)]
    id_pattern: String,

    #[arg(long, env = "JOIN_LOG_LEVEL", default_value = "info")]
    log_level: LevelFilter,

    /// log4rs YAML config, overrides --log-level
    #[arg(long, env = "JOIN_LOG_CONFIG")]
    log_config: Option<PathBuf>,

    /// Do not draw the per-file progress line
    #[arg(long)]
    no_progress: bool,
}

fn main() {
    let args = Args::parse();

    if let Err(err) = setup_logger(args.log_level, args.log_config.as_deref()) {
        eprintln!("{}", err);
        std::process::exit(2);
    }

    // Fatal errors and the unmatched-ID warning always reach stderr, even
    // when the log level or log config would drop them
    if let Err(err) = run(&args) {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    let started = Local::now();

    let extractor = IdExtractor::new(&args.id_pattern)
        .with_context(|| format!("Bad --id-pattern '{}'", args.id_pattern))?;

    let summary = join(
        &args.out,
        &args.reference,
        &args.filenames,
        &extractor,
        io::stderr(),
        !args.no_progress,
    )
    .with_context(|| format!("Failed to write {}", args.out.display()))?;

    if let Some(warning) = summary.warning() {
        eprintln!("Warning: {}", warning);
    }

    let elapsed = Local::now() - started;
    info!(
        "Wrote {} files ({} bytes) to {} in {} ms",
        summary.files,
        summary.bytes,
        args.out.display(),
        elapsed.num_milliseconds()
    );
    Ok(())
}
