//! DMS Replay - Main Entry Point

use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use dms::DmsModule;
use replay::settings::{load_config, Preset};
use replay::{init_logging, run_replay, OutputFormat};
use tracing::info;

/// Replay recorded face observations and print the driver state per frame
#[derive(Parser, Debug)]
#[command(name = "dms-replay")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON-lines recording (stdin when omitted)
    input: Option<PathBuf>,

    /// Threshold file (TOML, JSON or YAML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Threshold preset applied before the file
    #[arg(short, long, value_enum, default_value_t = Preset::Default)]
    preset: Preset,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Log as JSON
    #[arg(long)]
    log_json: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.log_json)?;

    info!("=== DMS Replay v{} ===", env!("CARGO_PKG_VERSION"));

    let config = load_config(cli.preset, cli.config.as_deref())?;
    let mut dms = DmsModule::new(config)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    let summary = match &cli.input {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("opening recording {}", path.display()))?;
            run_replay(&mut dms, BufReader::new(file), &mut out, cli.format)?
        }
        None => run_replay(&mut dms, io::stdin().lock(), &mut out, cli.format)?,
    };

    info!(
        frames = summary.frames,
        alert_frames = summary.alert_frames,
        "Done"
    );
    Ok(())
}
