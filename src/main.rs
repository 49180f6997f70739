//! Fortune Wheel - Unified CLI
//!
//! Interactive and headless randomized candidate selection.

#![warn(missing_docs)]

mod animator;
mod buffer;
mod cli;
mod config;
mod orchestrator;
mod pool;
mod selector;
mod settings;
mod ticker;
mod tui;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Tui { candidates, config } => run_tui(candidates, config).await,
        Command::Spin {
            candidates,
            config,
            count,
            forced,
            json,
        } => run_spin(candidates, config, count, forced, json).await,
    }
}

/// Run the interactive terminal wheel
async fn run_tui(candidates: Vec<String>, config: Option<PathBuf>) -> Result<()> {
    let (candidates, settings) = resolve_setup(candidates, config.as_deref())?;
    tui::run_tui(candidates, settings).await
}

/// Run headless spins and print each winner
#[instrument(skip_all, fields(count))]
async fn run_spin(
    candidates: Vec<String>,
    config: Option<PathBuf>,
    count: u32,
    forced: Option<String>,
    json: bool,
) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    info!("Starting headless spins");

    let (candidates, settings) = resolve_setup(candidates, config.as_deref())?;

    let mut pool = pool::CandidatePool::new();
    pool.add(candidates);
    let pool = Arc::new(Mutex::new(pool));

    // The receiver stays alive for the whole run; dropping it would sever
    // the animation channel mid-spin.
    let (event_tx, _event_rx) = tokio::sync::mpsc::unbounded_channel();
    let mut orchestrator = orchestrator::SpinOrchestrator::new(pool, settings, event_tx);
    orchestrator.set_forced_winner(forced);

    let mut winners = Vec::new();
    for _ in 0..count {
        if let Some(winner) = orchestrator.spin().await? {
            winners.push(winner);
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&winners)?);
    } else {
        for winner in &winners {
            println!("{}", winner.value());
        }
    }

    Ok(())
}

/// Resolves candidates and settings from positional args and an optional
/// config file.
#[instrument(skip_all)]
fn resolve_setup(
    candidates: Vec<String>,
    config_path: Option<&Path>,
) -> Result<(Vec<String>, settings::WheelSettings)> {
    match config_path {
        Some(path) => {
            info!(path = %path.display(), "Loading wheel config");
            let config = config::WheelConfig::from_file(path)?;
            let settings = config.settings();
            let candidates = if candidates.is_empty() {
                config.candidates().clone()
            } else {
                candidates
            };
            Ok((candidates, settings))
        }
        None => Ok((candidates, settings::WheelSettings::default())),
    }
}
