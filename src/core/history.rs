//! Undo/redo history of active states.
//!
//! Both stacks are kept most-recent-first. A forward move invalidates the
//! redo stack; stepping back and forth moves entries between the two.

use super::state::StateName;
use std::collections::VecDeque;

/// Pair of undo/redo stacks owned by a single machine.
///
/// # Example
///
/// ```rust
/// use fsm_engine::core::{History, StateName};
///
/// let mut history = History::new();
/// history.record(StateName::from("off"));
///
/// // Currently in "on"; step back.
/// let previous = history.undo(StateName::from("on"));
/// assert_eq!(previous.unwrap(), "off");
/// assert!(history.can_redo());
///
/// // A new forward move drops the redo entry.
/// history.record(StateName::from("off"));
/// assert!(!history.can_redo());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct History {
    undo: VecDeque<StateName>,
    redo: VecDeque<StateName>,
}

impl History {
    /// Create an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a forward move away from `previous`.
    ///
    /// Clears the redo stack and pushes `previous` onto the undo stack.
    pub fn record(&mut self, previous: StateName) {
        self.redo.clear();
        self.undo.push_front(previous);
    }

    /// Step back from `current`.
    ///
    /// Returns the state to return to, or `None` when there is nothing to
    /// undo. On success `current` is pushed onto the redo stack.
    pub fn undo(&mut self, current: StateName) -> Option<StateName> {
        let previous = self.undo.pop_front()?;
        self.redo.push_front(current);
        Some(previous)
    }

    /// Step forward again from `current`. Mirror of [`History::undo`].
    pub fn redo(&mut self, current: StateName) -> Option<StateName> {
        let next = self.redo.pop_front()?;
        self.undo.push_front(current);
        Some(next)
    }

    /// Drop both stacks.
    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }

    /// Whether the undo stack has an entry.
    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    /// Whether the redo stack has an entry.
    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    /// Number of undo entries.
    pub fn undo_len(&self) -> usize {
        self.undo.len()
    }

    /// Number of redo entries.
    pub fn redo_len(&self) -> usize {
        self.redo.len()
    }

    /// Undo entries, most recent first.
    pub fn undo_states(&self) -> impl Iterator<Item = &StateName> {
        self.undo.iter()
    }

    /// Redo entries, most recent first.
    pub fn redo_states(&self) -> impl Iterator<Item = &StateName> {
        self.redo.iter()
    }
}
