//! Rotation animation — eased angle interpolation on a frame cadence.
//!
//! The animator owns two independent pieces of randomness: which division
//! boundary the wheel stops at, and how many full rotations it makes before
//! settling. Both are cosmetic. The winner is chosen separately by the
//! selector, and no attempt is made to align wheel slices with candidate
//! labels.

use crate::orchestrator::WheelEvent;
use crate::ticker::TickerHandle;
use rand::Rng;
use tokio::sync::mpsc::UnboundedSender;
use tokio::time::{Duration, Instant, sleep};
use tracing::{debug, instrument};

/// Ease-out cubic: `1 - (1 - t)^3`.
///
/// Fast start, slow finish; `t` is expected in `[0, 1]`.
pub fn ease_out_cubic(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(3)
}

/// Interpolates the angle for a given progress through the animation.
///
/// Progress outside `[0, 1]` is clamped, so `angle_at(start, end, 1.0)` is
/// exactly `end`.
pub fn angle_at(start: f64, end: f64, progress: f64) -> f64 {
    let eased = ease_out_cubic(progress.clamp(0.0, 1.0));
    start + (end - start) * eased
}

/// Drives the wheel angle from rest to a freshly computed target.
///
/// One animation runs per spin: [`RotationAnimator::run`] spawns a frame
/// sampler that emits [`WheelEvent::AngleUpdated`] until the duration
/// elapses, returned as a cancellable [`TickerHandle`]. A new spin cancels
/// the old handle before starting its own.
#[derive(Debug, Clone)]
pub struct RotationAnimator {
    frame_delay: Duration,
    min_turns: u32,
    max_turns: u32,
}

impl RotationAnimator {
    /// Creates an animator sampling every `frame_delay`, over-rotating by a
    /// whole number of turns drawn uniformly from `[min_turns, max_turns]`.
    pub fn new(frame_delay: Duration, min_turns: u32, max_turns: u32) -> Self {
        Self {
            frame_delay,
            min_turns,
            max_turns,
        }
    }

    /// Computes the angle the wheel should settle at, starting from `from`.
    ///
    /// Picks a uniformly random division in `[0, divisions)`, stops exactly
    /// on that division's boundary so the pointer lands inside it, and adds
    /// a random number of full rotations so the wheel visibly over-rotates
    /// before settling. Independent of which candidate wins.
    #[instrument(skip(self))]
    pub fn target_angle(&self, divisions: u32, from: f64) -> f64 {
        let mut rng = rand::rng();
        let division = rng.random_range(0..divisions.max(1));
        let segment = 360.0 / f64::from(divisions.max(1));
        let stop = f64::from(division) * segment;
        let turns = rng.random_range(self.min_turns..=self.max_turns);

        // Rotate forward to the stop boundary, then add the extra turns.
        let delta = (stop - from.rem_euclid(360.0)).rem_euclid(360.0);
        let target = from + delta + f64::from(turns) * 360.0;
        debug!(division, turns, target, "Target angle computed");
        target
    }

    /// Animates from `start` to `end` over `duration`, emitting one
    /// [`WheelEvent::AngleUpdated`] per frame on `events`.
    ///
    /// The final frame carries exactly `end`. The returned handle resolves
    /// once that frame has been emitted; cancelling it stops the sampler
    /// between frames with no further events.
    #[instrument(skip(self, events))]
    pub fn run(
        &self,
        start: f64,
        end: f64,
        duration: Duration,
        events: UnboundedSender<WheelEvent>,
    ) -> TickerHandle {
        let frame_delay = self.frame_delay;
        let task = tokio::spawn(async move {
            let begun = Instant::now();
            loop {
                let progress = if duration.is_zero() {
                    1.0
                } else {
                    begun.elapsed().as_secs_f64() / duration.as_secs_f64()
                };
                let angle = angle_at(start, end, progress);
                if events.send(WheelEvent::AngleUpdated(angle)).is_err() {
                    // Presentation side hung up; nothing left to animate for.
                    break;
                }
                if progress >= 1.0 {
                    break;
                }
                sleep(frame_delay).await;
            }
        });
        TickerHandle::new(task)
    }
}

