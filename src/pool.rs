//! Candidate pool — the full label list plus elimination tracking.
//!
//! Indices are assigned at insertion and never reused, so a candidate keeps
//! its identity even when earlier entries are removed. Elimination marks an
//! entry ineligible for future draws without deleting its historical slot,
//! which is what allows "restore all eliminated" to work.

use derive_new::new;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, info, instrument};

/// One entry of the full candidate list.
///
/// The `index` is the stable insertion index: it never changes and is never
/// reassigned to another label, even after this entry is removed. Labels are
/// not required to be unique; two candidates may carry the same label while
/// remaining independently selectable and eliminable.
#[derive(Debug, Clone, PartialEq, Eq, new, Serialize, Deserialize)]
pub struct Candidate {
    index: usize,
    label: String,
}

impl Candidate {
    /// Returns the stable insertion index.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns the label text.
    pub fn label(&self) -> &str {
        &self.label
    }
}

/// The full candidate list with elimination tracking.
///
/// Invariants:
/// - the full list preserves insertion order, and indices are never reused;
/// - the eliminated set only ever references entries of the full list;
/// - [`CandidatePool::available`] is always exactly the full list minus the
///   eliminated entries, in insertion order.
///
/// All operations on empty or absent state are no-ops, never errors.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CandidatePool {
    entries: Vec<Candidate>,
    eliminated: HashSet<usize>,
    next_index: usize,
}

impl CandidatePool {
    /// Creates an empty pool.
    #[instrument]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends labels to the full list, each taking the next unused index.
    ///
    /// Empty strings are skipped; no other validation is applied.
    #[instrument(skip(self, labels))]
    pub fn add<I, S>(&mut self, labels: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let before = self.entries.len();
        for label in labels {
            let label = label.into();
            if label.is_empty() {
                continue;
            }
            self.entries.push(Candidate::new(self.next_index, label));
            self.next_index += 1;
        }
        info!(
            added = self.entries.len() - before,
            total = self.entries.len(),
            "Candidates added"
        );
    }

    /// Deletes the entry at the given stable index from the full list and,
    /// implicitly, from the eliminated set. No-op if the index is absent.
    #[instrument(skip(self))]
    pub fn remove(&mut self, index: usize) {
        let before = self.entries.len();
        self.entries.retain(|c| c.index != index);
        self.eliminated.remove(&index);
        if self.entries.len() == before {
            debug!(index, "Remove ignored: no entry with that index");
        } else {
            info!(index, remaining = self.entries.len(), "Candidate removed");
        }
    }

    /// Marks the first full-list occurrence of `label` eliminated.
    ///
    /// Idempotent: repeated calls target the same first occurrence. No-op
    /// for a label not present in the full list.
    #[instrument(skip(self))]
    pub fn eliminate(&mut self, label: &str) {
        match self.entries.iter().find(|c| c.label == label) {
            Some(entry) => self.eliminate_at(entry.index),
            None => debug!(label, "Eliminate ignored: label not in pool"),
        }
    }

    /// Marks the entry at the given stable index eliminated.
    ///
    /// Idempotent; no-op if no entry carries that index.
    #[instrument(skip(self))]
    pub fn eliminate_at(&mut self, index: usize) {
        if self.entries.iter().any(|c| c.index == index) {
            self.eliminated.insert(index);
            info!(index, eliminated = self.eliminated.len(), "Candidate eliminated");
        } else {
            debug!(index, "Eliminate ignored: no entry with that index");
        }
    }

    /// Clears the eliminated set, making every entry available again.
    #[instrument(skip(self))]
    pub fn restore_all(&mut self) {
        let restored = self.eliminated.len();
        self.eliminated.clear();
        info!(restored, "Eliminated candidates restored");
    }

    /// Empties the full list and the eliminated set and resets the index
    /// counter, as for a brand-new pool.
    #[instrument(skip(self))]
    pub fn clear(&mut self) {
        self.entries.clear();
        self.eliminated.clear();
        self.next_index = 0;
        info!("Candidate pool cleared");
    }

    /// Returns the available entries: the full list minus the eliminated
    /// set, preserving insertion order.
    ///
    /// Recomputed on every call so the result is never stale across
    /// mutations.
    pub fn available(&self) -> Vec<Candidate> {
        self.entries
            .iter()
            .filter(|c| !self.eliminated.contains(&c.index))
            .cloned()
            .collect()
    }

    /// Returns the full list, including eliminated entries.
    pub fn candidates(&self) -> &[Candidate] {
        &self.entries
    }

    /// Returns whether the entry at the given stable index is eliminated.
    pub fn is_eliminated(&self, index: usize) -> bool {
        self.eliminated.contains(&index)
    }

    /// Returns the number of entries in the full list.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the full list is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
