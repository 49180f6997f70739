//! Runtime tuning knobs for the wheel.

use derive_getters::Getters;
use derive_setters::Setters;
use tokio::time::Duration;
use tracing::instrument;

/// Default total spin duration.
pub const SPIN_DURATION: Duration = Duration::from_millis(6000);
/// Default delay between animation frames (~60 fps).
pub const FRAME_DELAY: Duration = Duration::from_millis(16);
/// Default initial readout cadence.
pub const CYCLE_START: Duration = Duration::from_millis(15);
/// Default readout cadence ceiling.
pub const CYCLE_CAP: Duration = Duration::from_millis(200);
/// Default cadence growth per applied readout tick.
pub const CYCLE_GROWTH: f64 = 1.1;
/// Default display buffer capacity.
pub const BUFFER_CAPACITY: usize = 128;
/// Default number of wheel divisions.
pub const DIVISIONS: u32 = 12;
/// Default minimum full over-rotations per spin.
pub const MIN_TURNS: u32 = 4;
/// Default maximum full over-rotations per spin.
pub const MAX_TURNS: u32 = 7;

/// Timing and geometry knobs for one wheel instance.
///
/// [`WheelSettings::default`] carries the production constants; tests build
/// shortened profiles with the `with_` setters:
///
/// ```
/// use fortune_wheel::WheelSettings;
/// use tokio::time::Duration;
///
/// let settings = WheelSettings::default()
///     .with_spin_duration(Duration::from_millis(80))
///     .with_frame_delay(Duration::from_millis(5));
/// assert_eq!(*settings.divisions(), 12);
/// ```
#[derive(Debug, Clone, PartialEq, Getters, Setters)]
#[setters(prefix = "with_")]
pub struct WheelSettings {
    /// Total wall-clock duration of one spin.
    spin_duration: Duration,
    /// Delay between animation frames.
    frame_delay: Duration,
    /// Initial interval between applied readout ticks.
    cycle_start: Duration,
    /// Ceiling the readout interval grows toward.
    cycle_cap: Duration,
    /// Multiplier applied to the readout interval per applied tick.
    cycle_growth: f64,
    /// Display buffer capacity.
    buffer_capacity: usize,
    /// Number of divisions drawn on the wheel.
    divisions: u32,
    /// Minimum full rotations before settling.
    min_turns: u32,
    /// Maximum full rotations before settling.
    max_turns: u32,
}

impl WheelSettings {
    /// Creates settings with the production defaults.
    #[instrument]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Default for WheelSettings {
    fn default() -> Self {
        Self {
            spin_duration: SPIN_DURATION,
            frame_delay: FRAME_DELAY,
            cycle_start: CYCLE_START,
            cycle_cap: CYCLE_CAP,
            cycle_growth: CYCLE_GROWTH,
            buffer_capacity: BUFFER_CAPACITY,
            divisions: DIVISIONS,
            min_turns: MIN_TURNS,
            max_turns: MAX_TURNS,
        }
    }
}
