use std::io::{self, BufRead, Write};

use anyhow::{bail, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "smitten")]
#[command(about = "Parse, convert and normalize Smitten sequence identifiers")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert V0, V1 or V2 identifiers to V2
    Convert {
        /// Treat coordinates as zero-based, half-open
        #[arg(long)]
        zbho: bool,

        #[command(flatten)]
        batch: BatchArgs,
    },

    /// Split V2 identifiers into assembly, sequence and ranges
    Parse {
        #[command(flatten)]
        batch: BatchArgs,
    },

    /// Collapse chained V2 ranges into a single range
    Normalize {
        #[command(flatten)]
        batch: BatchArgs,
    },
}

#[derive(Args)]
struct BatchArgs {
    /// Identifiers to process (read one per line from stdin if omitted)
    ids: Vec<String>,

    /// Print one JSON object per identifier
    #[arg(long)]
    json: bool,

    /// Continue past identifiers that fail to process
    #[arg(short, long)]
    keep_going: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Convert,
    Parse,
    Normalize,
}

/// Settings for one run, built from the command line.
#[derive(Debug, Clone, Copy, Default)]
struct RunConfig {
    zero_based_half_open: bool,
    json: bool,
    keep_going: bool,
}

#[derive(Serialize)]
struct NormalizedRecord<'a> {
    id: &'a str,
    normalized: &'a str,
}

fn process_id(action: Action, id: &str, config: &RunConfig) -> Result<String> {
    match action {
        Action::Convert => {
            let resolution = smitten::resolve(id, config.zero_based_half_open)?;
            if let Some(conflict) = &resolution.conflict {
                log::debug!(
                    "{}: stopped at {} suffix '{}' after locking to {}",
                    id,
                    conflict.found,
                    conflict.suffix,
                    conflict.locked
                );
            }
            if config.json {
                return Ok(serde_json::to_string(&resolution)?);
            }
            let version = resolution
                .version
                .map_or_else(|| "Undefined".to_string(), |v| v.to_string());
            Ok(format!("{}\t{}", resolution.canonical, version))
        }
        Action::Parse => {
            let parsed = smitten::parse(id)?;
            if config.json {
                return Ok(serde_json::to_string(&parsed)?);
            }
            let ranges: Vec<String> = parsed.ranges.iter().map(|r| r.to_string()).collect();
            Ok(format!(
                "{}\t{}\t{}",
                parsed.assembly_id.as_deref().unwrap_or(""),
                parsed.sequence_id,
                ranges.join(",")
            ))
        }
        Action::Normalize => {
            let normalized = smitten::normalize(id)?;
            if config.json {
                return Ok(serde_json::to_string(&NormalizedRecord {
                    id,
                    normalized: &normalized,
                })?);
            }
            Ok(normalized)
        }
    }
}

/// Processes every identifier, writing one line per success. Returns the
/// number of identifiers that failed.
fn run<I, W>(action: Action, ids: I, config: &RunConfig, out: &mut W) -> Result<usize>
where
    I: IntoIterator<Item = io::Result<String>>,
    W: Write,
{
    let mut processed = 0;
    let mut failures = 0;

    for id in ids {
        let id = id?;
        let id = id.trim_end_matches(['\n', '\r']);
        if id.is_empty() {
            continue;
        }
        processed += 1;

        match process_id(action, id, config) {
            Ok(line) => writeln!(out, "{}", line)?,
            Err(err) if config.keep_going => {
                log::error!("{}", err);
                failures += 1;
            }
            Err(err) => return Err(err),
        }
    }

    log::info!("Processed {} identifiers ({} failed)", processed, failures);
    Ok(failures)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let (action, zbho, batch) = match cli.command {
        Commands::Convert { zbho, batch } => (Action::Convert, zbho, batch),
        Commands::Parse { batch } => (Action::Parse, false, batch),
        Commands::Normalize { batch } => (Action::Normalize, false, batch),
    };

    let config = RunConfig {
        zero_based_half_open: zbho,
        json: batch.json,
        keep_going: batch.keep_going,
    };

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    let failures = if batch.ids.is_empty() {
        log::debug!("Reading identifiers from stdin");
        run(action, io::stdin().lock().lines(), &config, &mut out)?
    } else {
        run(action, batch.ids.into_iter().map(Ok), &config, &mut out)?
    };
    out.flush()?;

    if failures > 0 {
        bail!("{} identifier(s) could not be processed", failures);
    }
    Ok(())
}
