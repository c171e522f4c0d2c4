//! Headless match execution
//!
//! Runs duels without any graphical output, suitable for automated testing
//! and batch evaluation.

pub mod config;
pub mod runner;

pub use config::HeadlessMatchConfig;
pub use runner::{run_headless_match, run_simulation, FighterResult, MatchOutcome, MatchResult};
