//! Core machine types.
//!
//! This module contains the data model of the state machine:
//! - State and event identifiers
//! - The static definition (transition tables, state table, configuration)
//! - Undo/redo history of active states
//!
//! Nothing here knows about the engine's cursor; the engine composes these
//! pieces in [`crate::engine`].

mod definition;
mod history;
mod state;

pub use definition::{Configuration, StateDefinition, StateTable, TransitionTable};
pub use history::History;
pub use state::{EventName, StateName};
