//! Spin orchestration between the pool, selector, and animator.

use crate::animator::RotationAnimator;
use crate::buffer::DisplayBuffer;
use crate::pool::CandidatePool;
use crate::selector::{ForcedWinner, Pick, WinnerSelector};
use crate::settings::WheelSettings;
use crate::ticker::TickerHandle;
use anyhow::Result;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;
use tokio::time::{Instant, sleep};
use tracing::{debug, info, instrument, warn};

/// Lifecycle state of the wheel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpinState {
    /// Ready to accept a spin.
    #[default]
    Idle,
    /// A spin is in flight; further spin requests are rejected.
    Spinning,
}

/// Messages sent from orchestrator to presentation layers.
#[derive(Debug, Clone)]
pub enum WheelEvent {
    /// Wheel rotation angle changed.
    AngleUpdated(f64),
    /// Readout label changed.
    DisplayLabelChanged(String),
    /// Spin finished.
    SpinCompleted {
        /// The winning candidate.
        winner: Pick,
    },
}

/// Commands accepted by the orchestrator's command loop.
#[derive(Debug, Clone)]
pub enum WheelCommand {
    /// Start a spin.
    Spin,
    /// Append candidates to the pool.
    AddCandidates(Vec<String>),
    /// Remove the candidate with the given stable index.
    RemoveCandidate(usize),
    /// Return every eliminated candidate to the draw.
    RestoreAll,
    /// Remove all candidates.
    Clear,
    /// Arm a forced winner, or disarm with `None`.
    SetForcedWinner(Option<String>),
}

/// An in-flight spin: the outcome is decided up front, the tickers
/// animate toward it.
#[derive(Debug)]
struct ActiveSpin {
    winner: Pick,
    target: f64,
    animation: TickerHandle,
    cycler: TickerHandle,
}

/// Outcome of one command-loop step.
enum Step {
    Completed,
    Command(Option<WheelCommand>),
}

/// Drives one spin lifecycle at a time over a shared candidate pool.
///
/// The orchestrator can be driven directly ([`spin`](Self::spin) runs one
/// full lifecycle) or as a command loop ([`run`](Self::run)) that stays
/// responsive to pool edits while a spin is in flight. Either way it emits
/// [`WheelEvent`]s on the channel supplied at construction.
#[derive(Debug)]
pub struct SpinOrchestrator {
    pool: Arc<Mutex<CandidatePool>>,
    forced: ForcedWinner,
    selector: WinnerSelector,
    animator: RotationAnimator,
    settings: WheelSettings,
    state: SpinState,
    angle: f64,
    last_winner: Option<Pick>,
    event_tx: mpsc::UnboundedSender<WheelEvent>,
    active: Option<ActiveSpin>,
}

impl SpinOrchestrator {
    /// Creates a new orchestrator over a shared pool.
    #[instrument(skip(pool, settings, event_tx))]
    pub fn new(
        pool: Arc<Mutex<CandidatePool>>,
        settings: WheelSettings,
        event_tx: mpsc::UnboundedSender<WheelEvent>,
    ) -> Self {
        info!("Creating spin orchestrator");
        let animator = RotationAnimator::new(
            *settings.frame_delay(),
            *settings.min_turns(),
            *settings.max_turns(),
        );
        Self {
            pool,
            forced: ForcedWinner::new(),
            selector: WinnerSelector::new(),
            animator,
            settings,
            state: SpinState::Idle,
            angle: 0.0,
            last_winner: None,
            event_tx,
            active: None,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SpinState {
        self.state
    }

    /// Current wheel angle in degrees, normalized after each spin.
    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// Winner of the most recently completed spin.
    pub fn last_winner(&self) -> Option<&Pick> {
        self.last_winner.as_ref()
    }

    /// Currently armed forced winner, if any.
    pub fn forced_winner(&self) -> Option<&str> {
        self.forced.peek()
    }

    /// Shared handle to the candidate pool.
    pub fn pool(&self) -> Arc<Mutex<CandidatePool>> {
        Arc::clone(&self.pool)
    }

    /// Appends candidates to the pool.
    #[instrument(skip(self, labels))]
    pub fn add_candidates<I, S>(&mut self, labels: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.pool.lock().unwrap().add(labels);
    }

    /// Removes the candidate with the given stable index.
    #[instrument(skip(self))]
    pub fn remove_candidate(&mut self, index: usize) {
        self.pool.lock().unwrap().remove(index);
    }

    /// Returns every eliminated candidate to the draw.
    #[instrument(skip(self))]
    pub fn restore_all(&mut self) {
        self.pool.lock().unwrap().restore_all();
    }

    /// Removes all candidates.
    #[instrument(skip(self))]
    pub fn clear_candidates(&mut self) {
        self.pool.lock().unwrap().clear();
    }

    /// Arms a forced winner, or disarms with `None`.
    #[instrument(skip(self, label))]
    pub fn set_forced_winner(&mut self, label: Option<String>) {
        match label {
            Some(label) => self.forced.set(label),
            None => self.forced.clear(),
        }
    }

    /// Runs one complete spin lifecycle.
    ///
    /// Returns the winner, or `None` when the spin was rejected (already
    /// spinning, or no available candidates).
    #[instrument(skip(self))]
    pub async fn spin(&mut self) -> Result<Option<Pick>> {
        if !self.begin_spin() {
            return Ok(None);
        }
        let Some(mut active) = self.active.take() else {
            return Ok(None);
        };
        active.animation.wait().await;
        self.finish_spin(active).await?;
        Ok(self.last_winner.clone())
    }

    /// Runs the command loop until the command channel closes.
    ///
    /// While a spin is in flight the loop keeps accepting commands; a
    /// `Spin` command arriving mid-spin is rejected by the state guard,
    /// never queued.
    #[instrument(skip(self, commands))]
    pub async fn run(&mut self, mut commands: mpsc::UnboundedReceiver<WheelCommand>) -> Result<()> {
        info!("Starting spin orchestration");
        loop {
            let step = match self.active.as_mut() {
                Some(spin) => {
                    tokio::select! {
                        _ = spin.animation.wait() => Step::Completed,
                        command = commands.recv() => Step::Command(command),
                    }
                }
                None => Step::Command(commands.recv().await),
            };
            match step {
                Step::Completed => {
                    if let Some(spin) = self.active.take() {
                        self.finish_spin(spin).await?;
                    }
                }
                Step::Command(Some(command)) => {
                    debug!(?command, "Applying command");
                    self.apply(command);
                }
                Step::Command(None) => {
                    if let Some(spin) = self.active.take() {
                        spin.animation.cancel();
                        spin.cycler.cancel();
                        self.state = SpinState::Idle;
                    }
                    info!("Command channel closed, stopping orchestrator");
                    return Ok(());
                }
            }
        }
    }

    fn apply(&mut self, command: WheelCommand) {
        match command {
            WheelCommand::Spin => {
                self.begin_spin();
            }
            WheelCommand::AddCandidates(labels) => self.add_candidates(labels),
            WheelCommand::RemoveCandidate(index) => self.remove_candidate(index),
            WheelCommand::RestoreAll => self.restore_all(),
            WheelCommand::Clear => self.clear_candidates(),
            WheelCommand::SetForcedWinner(label) => self.set_forced_winner(label),
        }
    }

    /// Locks in a spin: picks the winner, starts the readout cycler and
    /// the rotation animation. Returns false when the spin was rejected.
    #[instrument(skip(self))]
    fn begin_spin(&mut self) -> bool {
        if self.state == SpinState::Spinning {
            warn!("Spin requested while already spinning");
            return false;
        }
        if self.pool.lock().unwrap().available().is_empty() {
            warn!("Spin requested with no available candidates");
            return false;
        }

        self.last_winner = None;
        self.state = SpinState::Spinning;
        let cycler = self.start_cycler();

        // Selection sees the pool as of spin start, not the guard's snapshot.
        let available = self.pool.lock().unwrap().available();
        let Some(winner) = self.selector.select(&available, &mut self.forced) else {
            cycler.cancel();
            self.state = SpinState::Idle;
            warn!("Candidate pool emptied before selection, spin aborted");
            return false;
        };

        let target = self
            .animator
            .target_angle(*self.settings.divisions(), self.angle);
        let animation = self.animator.run(
            self.angle,
            target,
            *self.settings.spin_duration(),
            self.event_tx.clone(),
        );

        info!(
            winner = %winner.value(),
            index = winner.index(),
            target,
            "Spin locked in"
        );
        self.active = Some(ActiveSpin {
            winner,
            target,
            animation,
            cycler,
        });
        true
    }

    /// Applies the deferred completion: stops the readout, reveals the
    /// winner, eliminates it, and emits the result.
    ///
    /// Awaits the cancelled cycler so the winner reveal is always the last
    /// label change of the spin.
    #[instrument(skip(self, spin), fields(winner = %spin.winner.value()))]
    async fn finish_spin(&mut self, mut spin: ActiveSpin) -> Result<()> {
        spin.cycler.cancel();
        spin.cycler.wait().await;
        self.angle = spin.target.rem_euclid(360.0);
        self.event_tx
            .send(WheelEvent::DisplayLabelChanged(spin.winner.value().to_string()))?;
        self.pool.lock().unwrap().eliminate_at(spin.winner.index());
        info!(
            index = spin.winner.index(),
            angle = self.angle,
            "Spin completed"
        );
        self.event_tx.send(WheelEvent::SpinCompleted {
            winner: spin.winner.clone(),
        })?;
        self.last_winner = Some(spin.winner);
        self.state = SpinState::Idle;
        Ok(())
    }

    /// Spawns the readout cycler: a frame-cadence ticker that applies a
    /// label change once the current interval has elapsed, growing the
    /// interval toward a cap so the readout visibly slows down.
    fn start_cycler(&self) -> TickerHandle {
        let pool = Arc::clone(&self.pool);
        let events = self.event_tx.clone();
        let frame_delay = *self.settings.frame_delay();
        let cap = *self.settings.cycle_cap();
        let growth = *self.settings.cycle_growth();
        let capacity = *self.settings.buffer_capacity();
        let mut interval = *self.settings.cycle_start();

        let task = tokio::spawn(async move {
            let mut buffer = DisplayBuffer::new(capacity);
            let mut last_applied = Instant::now();
            loop {
                sleep(frame_delay).await;
                if last_applied.elapsed() < interval {
                    continue;
                }
                let available = pool.lock().unwrap().available();
                let Some(label) = buffer.next(&available) else {
                    debug!("Display buffer drained, readout cycler stopping");
                    break;
                };
                if events.send(WheelEvent::DisplayLabelChanged(label)).is_err() {
                    break;
                }
                interval = interval.mul_f64(growth).min(cap);
                last_applied = Instant::now();
            }
        });
        TickerHandle::new(task)
    }
}
