//! Command-line interface for fortune_wheel.

use clap::{Parser, Subcommand};

/// Fortune Wheel - randomized candidate selection on a spinning wheel
#[derive(Parser, Debug)]
#[command(name = "fortune_wheel")]
#[command(about = "Spin a wheel of fortune over a candidate list", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the interactive terminal wheel
    Tui {
        /// Candidate labels; falls back to the config file when omitted
        candidates: Vec<String>,

        /// Path to a TOML config file
        #[arg(short, long)]
        config: Option<std::path::PathBuf>,
    },

    /// Run headless spins and print the winners
    Spin {
        /// Candidate labels; falls back to the config file when omitted
        candidates: Vec<String>,

        /// Path to a TOML config file
        #[arg(short, long)]
        config: Option<std::path::PathBuf>,

        /// Number of spins to run
        #[arg(short = 'n', long, default_value = "1")]
        count: u32,

        /// Label that wins the first spin, if still in the pool
        #[arg(long)]
        forced: Option<String>,

        /// Print winners as a JSON array instead of plain lines
        #[arg(long)]
        json: bool,
    },
}
