//! Wheel configuration loaded from a TOML file.

use crate::settings::{self, WheelSettings};
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::time::Duration;
use tracing::{debug, info, instrument};

/// File-backed wheel configuration.
///
/// Every field is optional in the file; missing values fall back to the
/// production defaults in [`crate::settings`].
///
/// ```toml
/// candidates = ["Alice", "Bob", "Carol"]
/// spin_duration_ms = 6000
/// divisions = 12
/// min_turns = 4
/// max_turns = 7
/// ```
#[derive(Debug, Clone, Getters, Serialize, Deserialize)]
pub struct WheelConfig {
    /// Candidate labels to seed the pool with.
    #[serde(default)]
    candidates: Vec<String>,

    /// Total spin duration in milliseconds.
    #[serde(default = "default_spin_duration_ms")]
    spin_duration_ms: u64,

    /// Number of divisions drawn on the wheel.
    #[serde(default = "default_divisions")]
    divisions: u32,

    /// Minimum full rotations before settling.
    #[serde(default = "default_min_turns")]
    min_turns: u32,

    /// Maximum full rotations before settling.
    #[serde(default = "default_max_turns")]
    max_turns: u32,
}

#[instrument]
fn default_spin_duration_ms() -> u64 {
    settings::SPIN_DURATION.as_millis() as u64
}

#[instrument]
fn default_divisions() -> u32 {
    settings::DIVISIONS
}

#[instrument]
fn default_min_turns() -> u32 {
    settings::MIN_TURNS
}

#[instrument]
fn default_max_turns() -> u32 {
    settings::MAX_TURNS
}

impl WheelConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading wheel config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        if config.min_turns > config.max_turns {
            return Err(ConfigError::new(format!(
                "min_turns ({}) exceeds max_turns ({})",
                config.min_turns, config.max_turns
            )));
        }

        info!(
            candidates = config.candidates.len(),
            spin_duration_ms = config.spin_duration_ms,
            "Wheel config loaded"
        );
        Ok(config)
    }

    /// Builds runtime settings from this configuration.
    #[instrument(skip(self))]
    pub fn settings(&self) -> WheelSettings {
        WheelSettings::default()
            .with_spin_duration(Duration::from_millis(self.spin_duration_ms))
            .with_divisions(self.divisions)
            .with_min_turns(self.min_turns)
            .with_max_turns(self.max_turns)
    }
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self {
            candidates: Vec::new(),
            spin_duration_ms: default_spin_duration_ms(),
            divisions: default_divisions(),
            min_turns: default_min_turns(),
            max_turns: default_max_turns(),
        }
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where the error occurred.
    pub line: u32,
    /// Source file where the error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
