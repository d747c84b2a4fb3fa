//! FSM Engine: a synchronous finite state machine runtime with undo/redo
//!
//! A machine is declared as a map of named states, each with its own
//! event-to-target transition table, plus an initial state. The engine
//! tracks the active state, validates every move against the table and
//! keeps an undo/redo history of the states it has left.
//!
//! # Core Concepts
//!
//! - **Configuration**: Initial state plus a [`StateTable`] of per-state
//!   [`TransitionTable`]s
//! - **Engine**: [`Fsm`] moves by event ([`Fsm::trigger`]) or directly
//!   ([`Fsm::change_state`])
//! - **History**: Forward moves can be undone and redone until the next
//!   forward move
//!
//! # Example
//!
//! ```rust
//! use fsm_engine::{fsm_config, Fsm, FsmError};
//!
//! let config = fsm_config! {
//!     initial: off,
//!     states: {
//!         off => { SWITCH => on },
//!         on => { SWITCH => off },
//!     }
//! };
//!
//! let mut fsm = Fsm::new(config)?;
//! fsm.trigger("SWITCH")?;
//! assert_eq!(fsm.state(), "on");
//!
//! assert!(matches!(fsm.trigger("UNPLUG"), Err(FsmError::InvalidEvent { .. })));
//!
//! assert!(fsm.undo());
//! assert!(!fsm.undo());
//! assert_eq!(fsm.state(), "off");
//! # Ok::<(), FsmError>(())
//! ```

pub mod builder;
pub mod core;
pub mod engine;

// Re-export commonly used types
pub use builder::ConfigurationBuilder;
pub use core::{
    Configuration, EventName, History, StateDefinition, StateName, StateTable, TransitionTable,
};
pub use engine::{Fsm, FsmError};
