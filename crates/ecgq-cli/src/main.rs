//! ecgq: ECG signal quality assessment from the command line

mod args;
mod input;
mod report;

use anyhow::{Context, Result};
use args::{Cli, Commands};
use clap::Parser;
use ecgq_core::EcgRecording;
use ecgq_processing::{assess_recording, AssessmentConfig};
use ecgq_simulation::{ContactPattern, EcgSimConfig, EcgSimulator};
use report::Report;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Initialize logging, stdout carries the report
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Commands::Assess { input, config } => {
            let config = load_config(config.as_deref())?;
            let file = File::open(&input).with_context(|| format!("opening {}", input.display()))?;
            let source = input.display().to_string();
            let recording = input::read_recording(BufReader::new(file), &source)
                .with_context(|| format!("reading {}", source))?;
            run_assessment(&recording, &config)
        }
        Commands::Simulate {
            pattern,
            seconds,
            seed,
            config,
        } => {
            let config = load_config(config.as_deref())?;
            let recording = simulate(pattern, seconds, seed)?;
            run_assessment(&recording, &config)
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<AssessmentConfig> {
    let Some(path) = path else {
        return Ok(AssessmentConfig::autosense_chest_band());
    };
    let json = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let config = AssessmentConfig::from_json(&json).with_context(|| format!("loading {}", path.display()))?;
    info!(name = %config.name, "loaded configuration");
    Ok(config)
}

fn simulate(pattern: ContactPattern, seconds: u64, seed: Option<u64>) -> Result<EcgRecording> {
    let mut simulator = EcgSimulator::new(EcgSimConfig {
        pattern,
        seed,
        ..Default::default()
    })?;
    info!(pattern = %pattern.description(), seconds, "simulating recording");
    Ok(simulator.generate(seconds * 1_000)?)
}

fn run_assessment(recording: &EcgRecording, config: &AssessmentConfig) -> Result<()> {
    let assessment = assess_recording(recording, config).context("assessing recording")?;
    let report = Report::new(
        &recording.metadata.source,
        recording.len(),
        recording.duration_ms(),
        &assessment,
    );
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
