//! # taplog
//!
//! Replays a recorded test event log as a TAP 13 stream.
//!
//! ## Usage
//!
//! ```bash
//! # Print the TAP stream for a run
//! taplog replay run.jsonl
//!
//! # Write it to a file with a custom subject name and emitter settings
//! taplog replay run.jsonl --subject ParserTests --config taplog.yml -o run.tap
//! ```

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use taplog_cli::{load_events, replay};
use taplog_core::EmitterConfig;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Converts recorded test events into TAP 13.
#[derive(Parser, Debug)]
#[command(name = "taplog")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay a JSONL event log through the TAP emitter
    Replay(ReplayArgs),
}

#[derive(Args, Debug)]
struct ReplayArgs {
    /// Path to the JSONL event log
    events: PathBuf,

    /// Write the TAP stream to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// YAML file with emitter settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Subject name for the header (defaults to the log file stem)
    #[arg(long)]
    subject: Option<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_env("TAPLOG_LOG").unwrap_or_else(|_| "warn".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Replay(args) => run_replay(args),
    }
}

fn run_replay(args: ReplayArgs) -> Result<()> {
    let config = match &args.config {
        Some(path) => EmitterConfig::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => EmitterConfig::default(),
    };

    let events = load_events(&args.events)
        .with_context(|| format!("Failed to read events from {}", args.events.display()))?;

    let subject = args
        .subject
        .clone()
        .unwrap_or_else(|| subject_from_path(&args.events));

    info!(events = events.len(), subject = %subject, "Replaying event log");

    let sink: Box<dyn Write> = match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(io::stdout().lock()),
    };

    let mut sink = replay(&events, &subject, sink, config).context("Replay failed")?;
    sink.flush().context("Failed to flush output")?;
    Ok(())
}

fn subject_from_path(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "events".to_string())
}
