//! Winner selection — forced override or uniform random draw.

use crate::pool::Candidate;
use derive_new::new;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// A resolved winner: the label text plus its stable insertion index.
///
/// When duplicate labels exist, the index identifies exactly which entry
/// won, so the right entry can be eliminated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, new, Serialize, Deserialize)]
pub struct Pick {
    value: String,
    index: usize,
}

impl Pick {
    /// Returns the winning label text.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Returns the winner's stable insertion index.
    pub fn index(&self) -> usize {
        self.index
    }
}

/// Single-use forced outcome with take-once semantics.
///
/// Setting a label arms the override for exactly one spin. It is consumed
/// the first time a spin finds the label available; a spin where the label
/// has no available occurrence ignores the override and leaves it pending,
/// so it can still fire later (for example after a restore).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ForcedWinner {
    label: Option<String>,
}

impl ForcedWinner {
    /// Creates an unarmed override.
    pub fn new() -> Self {
        Self::default()
    }

    /// Arms the override with `label`, replacing any previous value.
    #[instrument(skip(self, label))]
    pub fn set(&mut self, label: impl Into<String>) {
        let label = label.into();
        debug!(label = %label, "Forced winner armed");
        self.label = Some(label);
    }

    /// Disarms the override without consuming it.
    #[instrument(skip(self))]
    pub fn clear(&mut self) {
        debug!("Forced winner cleared");
        self.label = None;
    }

    /// Returns the pending label, if any, without consuming it.
    pub fn peek(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Consumes and returns the label iff some available entry carries it;
    /// otherwise leaves the override pending and returns `None`.
    pub fn take_if_available(&mut self, available: &[Candidate]) -> Option<String> {
        let armed = self.label.as_deref()?;
        if available.iter().any(|c| c.label() == armed) {
            self.label.take()
        } else {
            debug!(label = armed, "Forced winner not available; left pending");
            None
        }
    }
}

/// Picks each spin's outcome from the available set.
#[derive(Debug, Default)]
pub struct WinnerSelector;

impl WinnerSelector {
    /// Creates a selector.
    pub fn new() -> Self {
        Self
    }

    /// Selects the outcome for one spin.
    ///
    /// Returns `None` when `available` is empty. If `forced` is armed and
    /// its label has at least one available occurrence, that label wins and
    /// the override is consumed; with duplicate labels the *first* available
    /// occurrence is the winning entry. Otherwise the winner is a single
    /// uniform draw over `available`.
    #[instrument(skip(self, available, forced), fields(available = available.len()))]
    pub fn select(&mut self, available: &[Candidate], forced: &mut ForcedWinner) -> Option<Pick> {
        if available.is_empty() {
            debug!("Selection skipped: no available candidates");
            return None;
        }

        let entry = match forced.take_if_available(available) {
            Some(label) => {
                let entry = available.iter().find(|c| c.label() == label)?;
                info!(label = %label, index = entry.index(), "Forced winner consumed");
                entry
            }
            None => {
                let slot = rand::rng().random_range(0..available.len());
                &available[slot]
            }
        };

        Some(Pick::new(entry.label().to_string(), entry.index()))
    }
}
