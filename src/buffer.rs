//! Display buffer — the pre-randomized label queue behind the cycling readout.
//!
//! The buffer exists purely for the visual effect: it is refilled with
//! replacement from the available set and consumed front to back, and has no
//! influence on which candidate actually wins. Draws come from a
//! cryptographically strong generator seeded from OS entropy so the cycling
//! sequence cannot be predicted from early output.

use crate::pool::Candidate;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

/// Capacity-bounded queue of labels for the cycling readout.
///
/// Created at spin start, discarded at spin end, and regenerated mid-spin
/// whenever the cursor reaches the end.
#[derive(Debug)]
pub struct DisplayBuffer {
    labels: Vec<String>,
    cursor: usize,
    capacity: usize,
    rng: StdRng,
}

impl DisplayBuffer {
    /// Creates an empty buffer with the given capacity.
    pub fn new(capacity: usize) -> Self {
        Self {
            labels: Vec::new(),
            cursor: 0,
            capacity,
            rng: StdRng::from_os_rng(),
        }
    }

    /// Restocks the buffer with `min(capacity, |available|)` labels drawn
    /// with replacement from `available`, resetting the cursor.
    ///
    /// No-op when `available` is empty: the buffer keeps its exhausted
    /// contents and [`DisplayBuffer::next`] returns `None`.
    pub fn refill(&mut self, available: &[Candidate]) {
        if available.is_empty() {
            debug!("Refill skipped: no available candidates");
            return;
        }
        self.labels.clear();
        self.cursor = 0;
        let count = self.capacity.min(available.len());
        for _ in 0..count {
            let slot = self.rng.random_range(0..available.len());
            self.labels.push(available[slot].label().to_string());
        }
        debug!(buffered = self.labels.len(), "Display buffer refilled");
    }

    /// Returns the next buffered label, advancing the cursor.
    ///
    /// On exhaustion the buffer refills itself from the *current* available
    /// set, which may differ from the set it was last filled from. Returns
    /// `None` only when `available` is empty; callers are expected to stop
    /// cycling before the pool drains.
    pub fn next(&mut self, available: &[Candidate]) -> Option<String> {
        if self.cursor >= self.labels.len() {
            self.refill(available);
            if self.labels.is_empty() || self.cursor >= self.labels.len() {
                return None;
            }
        }
        let label = self.labels[self.cursor].clone();
        self.cursor += 1;
        Some(label)
    }

    /// Returns how many labels are currently buffered.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Returns whether the buffer holds no labels.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}
