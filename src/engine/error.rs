//! Engine error types.

use crate::core::{EventName, StateName};
use thiserror::Error;

/// Errors reported by the engine and the configuration builders.
///
/// A failed operation never mutates the machine.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum FsmError {
    /// Configuration was finished without an initial state
    #[error("Initial state not specified. Call .initial(state) before .build()")]
    MissingInitialState,

    /// Initial state is not defined in the state table
    #[error("Initial state '{initial}' is not defined in the state table")]
    UnknownInitialState { initial: StateName },

    /// Requested state is not defined in the state table
    #[error("State '{state}' is not defined in the state table")]
    InvalidState { state: StateName },

    /// Current state has no rule for the event
    #[error("No transition for event '{event}' from state '{state}'")]
    InvalidEvent { event: EventName, state: StateName },
}

impl FsmError {
    /// Whether the error stems from a malformed configuration rather than
    /// misuse of a running machine.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Self::MissingInitialState | Self::UnknownInitialState { .. }
        )
    }
}
