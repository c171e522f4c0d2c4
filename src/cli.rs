//! Command-line interface for StickRivals
//!
//! Headless-only: runs a configured match (or the default exhibition) and
//! prints the result.

use clap::Parser;
use std::path::PathBuf;

/// Stick-figure duel autobattler simulator
#[derive(Parser, Debug)]
#[command(name = "stickrivals")]
#[command(about = "Stick-figure duel autobattler simulator")]
#[command(version)]
pub struct Args {
    /// Run with the specified JSON match config file (default: exhibition match)
    #[arg(long, value_name = "CONFIG_FILE")]
    pub headless: Option<PathBuf>,

    /// Output path for the match log
    #[arg(long, value_name = "OUTPUT_PATH")]
    pub output: Option<PathBuf>,

    /// Maximum match duration in seconds (overrides the config)
    #[arg(long, value_name = "SECS")]
    pub max_duration: Option<f32>,

    /// Random seed for deterministic reproduction (overrides the config)
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Batch-simulate up to this many ticks with no real-time coupling
    /// instead of running the frame loop
    #[arg(long, value_name = "TICKS")]
    pub simulate: Option<u64>,
}

pub fn parse_args() -> Args {
    Args::parse()
}
