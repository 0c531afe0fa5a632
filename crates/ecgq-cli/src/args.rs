//! Command-line arguments

use clap::{Parser, Subcommand};
use ecgq_simulation::ContactPattern;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "ecgq", about = "ECG signal quality assessment")]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Debug, Clone, PartialEq, Subcommand)]
pub enum Commands {
    /// Assess a `timestamp_ms,value` CSV recording
    Assess {
        input: PathBuf,
        /// Assessment configuration as JSON
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Assess a simulated recording
    Simulate {
        /// attached, loose, detached, clipping or motion
        #[arg(long, value_parser = parse_pattern, default_value = "attached")]
        pattern: ContactPattern,
        #[arg(long, default_value_t = 60)]
        seconds: u64,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn parse_pattern(name: &str) -> Result<ContactPattern, String> {
    ContactPattern::from_name(name).ok_or_else(|| format!("unknown contact pattern {}", name))
}
