//! Application state and logic.

use crate::orchestrator::{WheelCommand, WheelEvent};
use crate::pool::CandidatePool;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::widgets::ListState;
use std::sync::{Arc, Mutex};
use tracing::{debug, info};

/// Main application state.
///
/// Holds everything the wheel screen renders from: the shared candidate
/// pool, the mirrored engine state driven by [`WheelEvent`]s, and the list
/// cursor. Key presses that mutate the pool are translated into
/// [`WheelCommand`]s for the orchestrator's command loop rather than
/// applied here.
pub struct App {
    pool: Arc<Mutex<CandidatePool>>,
    divisions: u32,
    angle: f64,
    readout: String,
    last_winner: Option<String>,
    forced: Option<String>,
    spinning: bool,
    list_state: ListState,
    status_message: String,
}

impl App {
    /// Creates a new application over the shared pool.
    pub fn new(pool: Arc<Mutex<CandidatePool>>, divisions: u32) -> Self {
        let mut list_state = ListState::default();
        if !pool.lock().unwrap().is_empty() {
            list_state.select(Some(0));
        }
        Self {
            pool,
            divisions,
            angle: 0.0,
            readout: String::new(),
            last_winner: None,
            forced: None,
            spinning: false,
            list_state,
            status_message: "Press Space to spin the wheel.".to_string(),
        }
    }

    /// Shared handle to the candidate pool.
    pub fn pool(&self) -> Arc<Mutex<CandidatePool>> {
        Arc::clone(&self.pool)
    }

    /// Number of divisions drawn on the wheel strip.
    pub fn divisions(&self) -> u32 {
        self.divisions
    }

    /// Current wheel angle in degrees.
    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// Current readout label.
    pub fn readout(&self) -> &str {
        &self.readout
    }

    /// Winner of the most recent spin.
    pub fn last_winner(&self) -> Option<&str> {
        self.last_winner.as_deref()
    }

    /// Label the forced-winner star sits on, if any.
    pub fn forced(&self) -> Option<&str> {
        self.forced.as_deref()
    }

    /// Whether a spin is currently in flight.
    pub fn spinning(&self) -> bool {
        self.spinning
    }

    /// Current status message.
    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    /// Current list cursor state.
    pub fn list_state(&self) -> ListState {
        self.list_state
    }

    /// Handles a wheel event from the orchestrator.
    pub fn handle_event(&mut self, event: WheelEvent) {
        debug!(?event, "Handling wheel event");

        match event {
            WheelEvent::AngleUpdated(angle) => {
                self.angle = angle;
                if !self.spinning {
                    self.spinning = true;
                    self.status_message = "Spinning...".to_string();
                }
            }
            WheelEvent::DisplayLabelChanged(label) => {
                self.readout = label;
            }
            WheelEvent::SpinCompleted { winner } => {
                self.spinning = false;
                // The star only clears when its candidate actually won.
                if self.forced.as_deref() == Some(winner.value()) {
                    self.forced = None;
                }
                self.status_message =
                    format!("{} wins! Press Space to spin again.", winner.value());
                self.last_winner = Some(winner.value().to_string());
            }
        }
    }

    /// Handles a key press, returning a command for the orchestrator when
    /// the key maps to one.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<WheelCommand> {
        match key.code {
            KeyCode::Char(' ') => self.request_spin(),
            KeyCode::Up => {
                self.select_previous();
                None
            }
            KeyCode::Down => {
                self.select_next();
                None
            }
            KeyCode::Char('f') | KeyCode::Char('F') => self.toggle_forced(),
            KeyCode::Char('d') | KeyCode::Char('D') => self.remove_selected(),
            KeyCode::Char('r') | KeyCode::Char('R') => {
                self.status_message = "Restored all eliminated candidates.".to_string();
                Some(WheelCommand::RestoreAll)
            }
            KeyCode::Char('c') | KeyCode::Char('C') => {
                self.status_message = "Cleared the candidate pool.".to_string();
                self.list_state.select(None);
                Some(WheelCommand::Clear)
            }
            _ => None,
        }
    }

    /// Requests a spin, mirroring the orchestrator's guard for feedback.
    fn request_spin(&mut self) -> Option<WheelCommand> {
        if self.pool.lock().unwrap().available().is_empty() {
            self.status_message = "No available candidates to spin for.".to_string();
            return None;
        }
        if !self.spinning {
            self.status_message = "Spinning...".to_string();
        }
        Some(WheelCommand::Spin)
    }

    /// Moves the list selection up by one.
    fn select_previous(&mut self) {
        let len = self.pool.lock().unwrap().len();
        if len == 0 {
            self.list_state.select(None);
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) if i > 0 && i < len => i - 1,
            _ => len - 1,
        };
        self.list_state.select(Some(i));
    }

    /// Moves the list selection down by one.
    fn select_next(&mut self) {
        let len = self.pool.lock().unwrap().len();
        if len == 0 {
            self.list_state.select(None);
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => (i + 1) % len,
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    /// Toggles the forced winner on the candidate under the cursor.
    fn toggle_forced(&mut self) -> Option<WheelCommand> {
        let label = self.selected_label()?;
        if self.forced.as_deref() == Some(label.as_str()) {
            info!(label = %label, "Forced winner cleared");
            self.forced = None;
            self.status_message = format!("Cleared forced winner {}.", label);
            Some(WheelCommand::SetForcedWinner(None))
        } else {
            info!(label = %label, "Forced winner armed");
            self.forced = Some(label.clone());
            self.status_message = format!("{} will win the next spin.", label);
            Some(WheelCommand::SetForcedWinner(Some(label)))
        }
    }

    /// Removes the candidate under the cursor from the pool.
    fn remove_selected(&mut self) -> Option<WheelCommand> {
        let pool = self.pool.lock().unwrap();
        let cursor = self.list_state.selected()?;
        let candidate = pool.candidates().get(cursor)?;
        let index = candidate.index();
        let label = candidate.label().to_string();
        let remaining = pool.len().saturating_sub(1);
        drop(pool);

        if remaining == 0 {
            self.list_state.select(None);
        } else if cursor >= remaining {
            self.list_state.select(Some(remaining - 1));
        }
        self.status_message = format!("Removed {}.", label);
        Some(WheelCommand::RemoveCandidate(index))
    }

    /// Label of the candidate under the cursor.
    fn selected_label(&self) -> Option<String> {
        let pool = self.pool.lock().unwrap();
        let cursor = self.list_state.selected()?;
        pool.candidates().get(cursor).map(|c| c.label().to_string())
    }
}
