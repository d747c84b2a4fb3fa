//! Builder for constructing machine configurations.

use crate::core::{Configuration, EventName, StateName, StateTable};
use crate::engine::{Fsm, FsmError};

/// Builder for [`Configuration`] values with a fluent API.
///
/// States are declared in the order they are first mentioned, either by
/// [`state`](Self::state) or as the source of a
/// [`transition`](Self::transition). Targets are not declared implicitly.
///
/// # Example
///
/// ```rust
/// use fsm_engine::builder::ConfigurationBuilder;
///
/// let fsm = ConfigurationBuilder::new()
///     .initial("idle")
///     .transition("idle", "START", "running")
///     .transition("running", "STOP", "idle")
///     .build_machine()
///     .unwrap();
///
/// assert_eq!(fsm.state(), "idle");
/// assert_eq!(fsm.states(None), ["idle", "running"]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct ConfigurationBuilder {
    initial: Option<StateName>,
    states: StateTable,
}

impl ConfigurationBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the initial state (required).
    pub fn initial(mut self, state: impl Into<StateName>) -> Self {
        self.initial = Some(state.into());
        self
    }

    /// Declare a state. Declaring a state twice keeps its existing rules.
    pub fn state(mut self, name: impl Into<StateName>) -> Self {
        self.states.entry(name.into());
        self
    }

    /// Add the rule `from --event--> to`, declaring `from` if needed.
    pub fn transition(
        mut self,
        from: impl Into<StateName>,
        event: impl Into<EventName>,
        to: impl Into<StateName>,
    ) -> Self {
        self.states.entry(from.into()).transitions.insert(event, to);
        self
    }

    /// Build and validate the configuration.
    /// Returns an error if the initial state is missing or undefined.
    pub fn build(self) -> Result<Configuration, FsmError> {
        let initial = self.initial.ok_or(FsmError::MissingInitialState)?;
        let config = Configuration::new(initial, self.states);
        config.validate()?;
        Ok(config)
    }

    /// Build the configuration and start a machine on it.
    pub fn build_machine(self) -> Result<Fsm, FsmError> {
        Fsm::new(self.build()?)
    }
}
