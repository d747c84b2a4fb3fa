//! The state machine engine.
//!
//! [`Fsm`] owns a validated [`Configuration`](crate::core::Configuration),
//! the active state cursor and the undo/redo [`History`](crate::core::History).
//! Every operation is synchronous and completes immediately.

mod error;
mod machine;

pub use error::FsmError;
pub use machine::Fsm;
