//! Fortune Wheel library - randomized selection behind a spinning wheel
//!
//! This library picks winners from a candidate list while animating a
//! wheel-of-fortune style selection: a fast-cycling label readout and an
//! eased rotation that settles on a division boundary.
//!
//! # Architecture
//!
//! - **Pool**: candidate labels with stable indices and elimination state
//! - **Selection**: a forced override or a uniform draw over the available set
//! - **Animation**: eased rotation frames plus a slowing label readout
//! - **Orchestration**: one spin lifecycle at a time, reported over an event channel
//!
//! # Example
//!
//! ```no_run
//! use fortune_wheel::{CandidatePool, SpinOrchestrator, WheelSettings};
//! use std::sync::{Arc, Mutex};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let mut pool = CandidatePool::new();
//! pool.add(["Alice", "Bob", "Carol"]);
//!
//! let (event_tx, _event_rx) = tokio::sync::mpsc::unbounded_channel();
//! let mut wheel = SpinOrchestrator::new(
//!     Arc::new(Mutex::new(pool)),
//!     WheelSettings::default(),
//!     event_tx,
//! );
//!
//! // Winners are eliminated from later spins until restore_all().
//! if let Some(winner) = wheel.spin().await? {
//!     println!("{} wins", winner.value());
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod animator;
mod buffer;
mod config;
mod orchestrator;
mod pool;
mod selector;
mod settings;
mod ticker;

// Crate-level exports - Candidate pool
pub use pool::{Candidate, CandidatePool};

// Crate-level exports - Display buffer
pub use buffer::DisplayBuffer;

// Crate-level exports - Winner selection
pub use selector::{ForcedWinner, Pick, WinnerSelector};

// Crate-level exports - Rotation animation
pub use animator::{RotationAnimator, angle_at, ease_out_cubic};

// Crate-level exports - Ticker handles
pub use ticker::TickerHandle;

// Crate-level exports - Orchestration
pub use orchestrator::{SpinOrchestrator, SpinState, WheelCommand, WheelEvent};

// Crate-level exports - Settings and configuration
pub use config::{ConfigError, WheelConfig};
pub use settings::WheelSettings;
