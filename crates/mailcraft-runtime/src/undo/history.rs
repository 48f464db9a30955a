#![forbid(unsafe_code)]

//! Bounded linear undo/redo history over value snapshots.
//!
//! [`History`] keeps a `present` snapshot plus bounded `past` and `future`
//! queues. It is generic over the snapshot type and only needs structural
//! equality (`PartialEq`) to collapse no-op pushes.
//!
//! # Invariants
//!
//! 1. `present` is always defined.
//! 2. `past.len() <= config.max_size` and `future.len() <= config.max_size`
//!    after every operation.
//! 3. A push that changes state clears `future`.
//! 4. A push deep-equal to `present` changes nothing.

use std::collections::VecDeque;
use std::fmt;
use std::mem;

use serde::{Deserialize, Serialize};

/// Configuration for the history manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Maximum number of entries kept in each of `past` and `future`.
    pub max_size: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self { max_size: 50 }
    }
}

impl HistoryConfig {
    #[must_use]
    pub fn new(max_size: usize) -> Self {
        Self { max_size }
    }

    /// No depth limit (for testing).
    #[must_use]
    pub fn unlimited() -> Self {
        Self {
            max_size: usize::MAX,
        }
    }
}

/// Plain-data view of a history: oldest past entry first, next redo first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryState<T> {
    pub past: Vec<T>,
    pub present: T,
    pub future: Vec<T>,
}

/// Linear undo/redo stack.
pub struct History<T> {
    /// Oldest at the front, most recent at the back.
    past: VecDeque<T>,
    present: T,
    /// Next redo at the front.
    future: VecDeque<T>,
    config: HistoryConfig,
}

impl<T> fmt::Debug for History<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("History")
            .field("undo_depth", &self.past.len())
            .field("redo_depth", &self.future.len())
            .field("config", &self.config)
            .finish()
    }
}

impl<T: Clone> Clone for History<T> {
    fn clone(&self) -> Self {
        Self {
            past: self.past.clone(),
            present: self.present.clone(),
            future: self.future.clone(),
            config: self.config,
        }
    }
}

impl<T> History<T> {
    /// Start a history at `initial` with no past or future.
    #[must_use]
    pub fn new(initial: T, config: HistoryConfig) -> Self {
        Self {
            past: VecDeque::new(),
            present: initial,
            future: VecDeque::new(),
            config,
        }
    }

    #[must_use]
    pub fn with_default_config(initial: T) -> Self {
        Self::new(initial, HistoryConfig::default())
    }

    /// Rebuild a history from plain data, trimming it to the configured size.
    #[must_use]
    pub fn from_state(state: HistoryState<T>, config: HistoryConfig) -> Self {
        let mut history = Self {
            past: state.past.into(),
            present: state.present,
            future: state.future.into(),
            config,
        };
        history.enforce_limit();
        history
    }

    // ====================================================================
    // Core Operations
    // ====================================================================

    /// Step back one snapshot. Returns the new present, or `None` when
    /// there is nothing to undo.
    pub fn undo(&mut self) -> Option<&T> {
        let previous = self.past.pop_back()?;
        let current = mem::replace(&mut self.present, previous);
        self.future.push_front(current);
        self.enforce_limit();
        tracing::trace!(
            target: "mailcraft.history",
            undo_depth = self.past.len(),
            redo_depth = self.future.len(),
            "undo"
        );
        Some(&self.present)
    }

    /// Step forward one snapshot. Returns the new present, or `None` when
    /// there is nothing to redo.
    pub fn redo(&mut self) -> Option<&T> {
        let next = self.future.pop_front()?;
        let current = mem::replace(&mut self.present, next);
        self.past.push_back(current);
        self.enforce_limit();
        tracing::trace!(
            target: "mailcraft.history",
            undo_depth = self.past.len(),
            redo_depth = self.future.len(),
            "redo"
        );
        Some(&self.present)
    }

    /// Replace the present and forget all past and future entries.
    pub fn reset(&mut self, state: T) {
        self.past.clear();
        self.future.clear();
        self.present = state;
        tracing::debug!(target: "mailcraft.history", "history reset");
    }

    // ====================================================================
    // Query
    // ====================================================================

    #[must_use]
    pub fn present(&self) -> &T {
        &self.present
    }

    /// Past snapshots, oldest first.
    #[must_use]
    pub fn past(&self) -> &VecDeque<T> {
        &self.past
    }

    /// Future snapshots, next redo first.
    #[must_use]
    pub fn future(&self) -> &VecDeque<T> {
        &self.future
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    #[must_use]
    pub fn undo_depth(&self) -> usize {
        self.past.len()
    }

    #[must_use]
    pub fn redo_depth(&self) -> usize {
        self.future.len()
    }

    #[must_use]
    pub fn config(&self) -> &HistoryConfig {
        &self.config
    }

    /// Consume the history into plain data.
    #[must_use]
    pub fn into_state(self) -> HistoryState<T> {
        HistoryState {
            past: self.past.into(),
            present: self.present,
            future: self.future.into(),
        }
    }

    // ====================================================================
    // Maintenance
    // ====================================================================

    /// Evict the oldest past entries and the farthest future entries.
    fn enforce_limit(&mut self) {
        while self.past.len() > self.config.max_size {
            self.past.pop_front();
        }
        self.future.truncate(self.config.max_size);
    }
}

impl<T: PartialEq> History<T> {
    /// Record `state` as the new present.
    ///
    /// Returns `false` and leaves the history untouched when `state` is
    /// deep-equal to the present.
    pub fn push(&mut self, state: T) -> bool {
        if state == self.present {
            tracing::trace!(target: "mailcraft.history", "push skipped: unchanged snapshot");
            return false;
        }
        let previous = mem::replace(&mut self.present, state);
        self.past.push_back(previous);
        self.future.clear();
        self.enforce_limit();
        tracing::trace!(
            target: "mailcraft.history",
            undo_depth = self.past.len(),
            "snapshot pushed"
        );
        true
    }
}

// ============================================================================
// Tests
// ============================================================================
