//! `fete_preview` - headless fireworks run
//!
//! Drives one show on a virtual clock into an in-memory surface and logs what
//! happened, second by second.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use fete::fireworks::FireworksConfig;
use fete::preview::{self, PreviewOptions};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// fete_preview - headless fireworks run
#[derive(Parser, Debug)]
#[command(name = "fete_preview")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to a TOML show configuration (defaults when omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed for the show
    #[arg(short, long, default_value_t = 2024)]
    seed: u64,

    /// Surface width in pixels
    #[arg(long, default_value_t = 1280)]
    width: u32,

    /// Surface height in pixels
    #[arg(long, default_value_t = 720)]
    height: u32,

    /// Host frame rate
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u32).range(1..=240))]
    fps: u32,

    /// Virtual seconds to run before giving up (show duration plus one when omitted)
    #[arg(long)]
    seconds: Option<f32>,

    /// Write the surface as raw RGBA8 bytes after this frame
    #[arg(long, requires = "snapshot")]
    snapshot_frame: Option<u64>,

    /// Output path for --snapshot-frame
    #[arg(long)]
    snapshot: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_new(&cli.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let config = match &cli.config {
        Some(path) => FireworksConfig::from_file(path)
            .with_context(|| format!("failed to load show config {}", path.display()))?,
        None => FireworksConfig::default(),
    };
    let seconds = cli.seconds.unwrap_or(config.duration_secs + 1.0);
    let limit = Duration::try_from_secs_f32(seconds)
        .with_context(|| format!("--seconds must be a non-negative number, got {seconds}"))?;

    tracing::info!(
        "Preview: {}x{} at {} fps, seed {}, show {}s",
        cli.width,
        cli.height,
        cli.fps,
        cli.seed,
        config.duration_secs
    );

    let options = PreviewOptions {
        width: cli.width,
        height: cli.height,
        fps: cli.fps,
        seed: cli.seed,
        limit,
        snapshot: cli.snapshot_frame.zip(cli.snapshot),
    };
    preview::run(config, &options)?;
    Ok(())
}
