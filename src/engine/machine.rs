//! Finite state machine engine with undo/redo history.

use crate::core::{Configuration, EventName, History, StateName};
use crate::engine::error::FsmError;

/// Synchronous finite state machine over a fixed [`Configuration`].
///
/// The machine tracks one active state and the history of states it has
/// left. Forward moves ([`Fsm::change_state`], [`Fsm::trigger`]) record the
/// previous state for undo and invalidate redo.
///
/// The engine does no internal locking. Mutating operations take
/// `&mut self`; share a machine across threads behind a `Mutex` if needed.
///
/// # Example
///
/// ```rust
/// use fsm_engine::fsm_config;
/// use fsm_engine::engine::Fsm;
///
/// let config = fsm_config! {
///     initial: off,
///     states: {
///         off => { SWITCH => on },
///         on => { SWITCH => off },
///     }
/// };
///
/// let mut fsm = Fsm::new(config).unwrap();
/// assert_eq!(fsm.state(), "off");
///
/// fsm.trigger("SWITCH").unwrap();
/// assert_eq!(fsm.state(), "on");
///
/// assert!(fsm.undo());
/// assert_eq!(fsm.state(), "off");
/// assert!(fsm.redo());
/// assert_eq!(fsm.state(), "on");
/// ```
#[derive(Clone, Debug)]
pub struct Fsm {
    config: Configuration,
    active: StateName,
    history: History,
}

impl Fsm {
    /// Create a machine in the configured initial state.
    ///
    /// Fails with [`FsmError::UnknownInitialState`] if the initial state is
    /// not defined in the state table.
    pub fn new(config: Configuration) -> Result<Self, FsmError> {
        config.validate()?;

        tracing::debug!(
            initial = %config.initial,
            states = config.states.len(),
            "State machine created"
        );

        Ok(Self {
            active: config.initial.clone(),
            config,
            history: History::new(),
        })
    }

    /// Current active state (pure)
    pub fn state(&self) -> &StateName {
        &self.active
    }

    /// Initial state (pure)
    pub fn initial(&self) -> &StateName {
        &self.config.initial
    }

    /// Configuration the machine was built from (pure)
    pub fn config(&self) -> &Configuration {
        &self.config
    }

    /// Undo/redo history (pure)
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Move directly to `target`, ignoring transition rules.
    ///
    /// Records the previous state for undo and clears redo. Fails with
    /// [`FsmError::InvalidState`] if `target` is not a defined state.
    pub fn change_state(&mut self, target: impl AsRef<str>) -> Result<(), FsmError> {
        let target = target.as_ref();
        let Some(resolved) = self.config.states.resolve(target).cloned() else {
            tracing::debug!(state = %self.active, target, "Rejected change to unknown state");
            return Err(FsmError::InvalidState {
                state: StateName::from(target),
            });
        };

        let previous = self.advance(resolved);
        tracing::debug!(from = %previous, to = %self.active, "State changed");
        Ok(())
    }

    /// Follow the current state's rule for `event`.
    ///
    /// Fails with [`FsmError::InvalidEvent`] if the current state has no rule
    /// for `event`, or [`FsmError::InvalidState`] if the rule targets a state
    /// missing from the table. The machine is untouched on failure.
    pub fn trigger(&mut self, event: impl AsRef<str>) -> Result<(), FsmError> {
        let event = event.as_ref();
        let target = self
            .config
            .states
            .get(self.active.as_str())
            .and_then(|definition| definition.transitions.target(event))
            .ok_or_else(|| {
                tracing::debug!(state = %self.active, event, "Rejected event with no transition");
                FsmError::InvalidEvent {
                    event: EventName::from(event),
                    state: self.active.clone(),
                }
            })?;

        let Some(resolved) = self.config.states.resolve(target.as_str()).cloned() else {
            tracing::debug!(
                state = %self.active,
                event,
                target = %target,
                "Rejected event targeting unknown state"
            );
            return Err(FsmError::InvalidState {
                state: target.clone(),
            });
        };

        let previous = self.advance(resolved);
        tracing::debug!(event, from = %previous, to = %self.active, "Event triggered");
        Ok(())
    }

    /// Jump back to the initial state. History is left as is.
    pub fn reset(&mut self) {
        self.active = self.config.initial.clone();
        tracing::debug!(state = %self.active, "State machine reset");
    }

    /// State names, in declaration order.
    ///
    /// With `Some(event)`, only the states that have a rule for `event`.
    pub fn states(&self, event: Option<&str>) -> Vec<&StateName> {
        match event {
            Some(event) => self
                .config
                .states
                .iter()
                .filter(|(_, definition)| definition.transitions.contains_event(event))
                .map(|(name, _)| name)
                .collect(),
            None => self.config.states.names().collect(),
        }
    }

    /// Whether `event` has a rule in the current state (pure)
    pub fn can_trigger(&self, event: impl AsRef<str>) -> bool {
        self.config
            .states
            .get(self.active.as_str())
            .is_some_and(|definition| definition.transitions.contains_event(event.as_ref()))
    }

    /// Events with a rule in the current state, in declaration order.
    pub fn available_events(&self) -> Vec<&EventName> {
        self.config
            .states
            .get(self.active.as_str())
            .map(|definition| definition.transitions.events().collect())
            .unwrap_or_default()
    }

    /// Step back to the previously active state.
    ///
    /// Returns `false` without touching the machine when there is nothing
    /// to undo.
    pub fn undo(&mut self) -> bool {
        match self.history.undo(self.active.clone()) {
            Some(previous) => {
                let from = std::mem::replace(&mut self.active, previous);
                tracing::debug!(from = %from, to = %self.active, "Undo");
                true
            }
            None => false,
        }
    }

    /// Re-apply the most recently undone state.
    ///
    /// Returns `false` without touching the machine when there is nothing
    /// to redo.
    pub fn redo(&mut self) -> bool {
        match self.history.redo(self.active.clone()) {
            Some(next) => {
                let from = std::mem::replace(&mut self.active, next);
                tracing::debug!(from = %from, to = %self.active, "Redo");
                true
            }
            None => false,
        }
    }

    /// Whether there is a state to undo to (pure)
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Whether there is an undone state to redo (pure)
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Forget both undo and redo history. The active state is kept.
    pub fn clear_history(&mut self) {
        self.history.clear();
        tracing::debug!(state = %self.active, "History cleared");
    }

    fn advance(&mut self, target: StateName) -> StateName {
        let previous = std::mem::replace(&mut self.active, target);
        self.history.record(previous.clone());
        previous
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{StateDefinition, StateTable};

    fn switch() -> Fsm {
        let states = StateTable::new()
            .with_state("off", StateDefinition::new().on("SWITCH", "on"))
            .with_state("on", StateDefinition::new().on("SWITCH", "off"));
        Fsm::new(Configuration::new("off", states)).unwrap()
    }

    fn workflow() -> Fsm {
        let states = StateTable::new()
            .with_state("normal", StateDefinition::new().on("study", "busy"))
            .with_state(
                "busy",
                StateDefinition::new()
                    .on("get_tired", "sleeping")
                    .on("get_hungry", "hungry"),
            )
            .with_state("hungry", StateDefinition::new().on("eat", "normal"))
            .with_state(
                "sleeping",
                StateDefinition::new()
                    .on("get_hungry", "hungry")
                    .on("get_up", "normal"),
            );
        Fsm::new(Configuration::new("normal", states)).unwrap()
    }

    #[test]
    fn starts_in_initial_state() {
        let fsm = workflow();
        assert_eq!(fsm.state(), "normal");
        assert_eq!(fsm.initial(), "normal");
        assert!(!fsm.can_undo());
        assert!(!fsm.can_redo());
    }

    #[test]
    fn new_rejects_unknown_initial() {
        let states = StateTable::new().with_state("on", StateDefinition::new());
        let result = Fsm::new(Configuration::new("off", states));
        assert!(matches!(result, Err(FsmError::UnknownInitialState { .. })));
    }

    #[test]
    fn change_state_moves_and_records() {
        let mut fsm = workflow();
        fsm.change_state("hungry").unwrap();

        assert_eq!(fsm.state(), "hungry");
        let undo: Vec<_> = fsm.history().undo_states().collect();
        assert_eq!(undo, ["normal"]);
    }

    #[test]
    fn change_state_ignores_transition_rules() {
        let mut fsm = workflow();
        assert!(!fsm.can_trigger("eat"));
        fsm.change_state("sleeping").unwrap();
        assert_eq!(fsm.state(), "sleeping");
    }

    #[test]
    fn change_state_to_unknown_fails_without_mutation() {
        let mut fsm = switch();
        fsm.trigger("SWITCH").unwrap();
        fsm.undo();
        let before = fsm.history().clone();

        let result = fsm.change_state("paused");

        assert_eq!(
            result,
            Err(FsmError::InvalidState {
                state: StateName::from("paused")
            })
        );
        assert_eq!(fsm.state(), "off");
        assert_eq!(fsm.history(), &before);
    }

    #[test]
    fn trigger_follows_rule() {
        let mut fsm = workflow();
        fsm.trigger("study").unwrap();
        assert_eq!(fsm.state(), "busy");
        fsm.trigger("get_tired").unwrap();
        assert_eq!(fsm.state(), "sleeping");
        assert_eq!(fsm.history().undo_len(), 2);
    }

    #[test]
    fn trigger_unknown_event_fails_without_mutation() {
        let mut fsm = workflow();
        fsm.trigger("study").unwrap();

        let result = fsm.trigger("eat");

        assert_eq!(
            result,
            Err(FsmError::InvalidEvent {
                event: EventName::from("eat"),
                state: StateName::from("busy"),
            })
        );
        assert_eq!(fsm.state(), "busy");
        assert_eq!(fsm.history().undo_len(), 1);
    }

    #[test]
    fn trigger_to_undefined_target_fails_without_mutation() {
        let states = StateTable::new()
            .with_state("a", StateDefinition::new().on("GO", "nowhere").on("B", "b"))
            .with_state("b", StateDefinition::new().on("A", "a"));
        let mut fsm = Fsm::new(Configuration::new("a", states)).unwrap();
        fsm.trigger("B").unwrap();
        fsm.undo();

        let result = fsm.trigger("GO");

        assert!(matches!(result, Err(FsmError::InvalidState { state }) if state == "nowhere"));
        assert_eq!(fsm.state(), "a");
        assert!(fsm.can_redo());
    }

    #[test]
    fn trigger_clears_redo() {
        let mut fsm = workflow();
        fsm.trigger("study").unwrap();
        fsm.trigger("get_hungry").unwrap();
        assert!(fsm.undo());
        assert!(fsm.can_redo());

        fsm.trigger("get_tired").unwrap();

        assert!(!fsm.can_redo());
        assert!(!fsm.redo());
        assert_eq!(fsm.state(), "sleeping");
    }

    #[test]
    fn switch_scenario() {
        let mut fsm = switch();
        assert_eq!(fsm.state(), "off");

        fsm.trigger("SWITCH").unwrap();
        assert_eq!(fsm.state(), "on");

        assert!(fsm.undo());
        assert_eq!(fsm.state(), "off");

        assert!(fsm.redo());
        assert_eq!(fsm.state(), "on");

        assert!(fsm.undo());
        assert!(!fsm.undo());
        assert_eq!(fsm.state(), "off");
    }

    #[test]
    fn undo_and_redo_on_fresh_machine_return_false() {
        let mut fsm = switch();
        assert!(!fsm.undo());
        assert!(!fsm.redo());
        assert_eq!(fsm.state(), "off");
    }

    #[test]
    fn undo_walks_back_through_history() {
        let mut fsm = workflow();
        fsm.trigger("study").unwrap();
        fsm.trigger("get_hungry").unwrap();
        fsm.trigger("eat").unwrap();

        assert!(fsm.undo());
        assert_eq!(fsm.state(), "hungry");
        assert!(fsm.undo());
        assert_eq!(fsm.state(), "busy");
        assert!(fsm.undo());
        assert_eq!(fsm.state(), "normal");
        assert!(!fsm.undo());

        assert!(fsm.redo());
        assert!(fsm.redo());
        assert!(fsm.redo());
        assert_eq!(fsm.state(), "normal");
        assert!(!fsm.redo());
    }

    #[test]
    fn reset_returns_to_initial_and_keeps_history() {
        let mut fsm = workflow();
        fsm.trigger("study").unwrap();
        fsm.trigger("get_tired").unwrap();

        fsm.reset();

        assert_eq!(fsm.state(), "normal");
        assert_eq!(fsm.history().undo_len(), 2);
        assert!(fsm.undo());
        assert_eq!(fsm.state(), "busy");
    }

    #[test]
    fn states_without_event_lists_all() {
        let fsm = workflow();
        assert_eq!(fsm.states(None), ["normal", "busy", "hungry", "sleeping"]);
    }

    #[test]
    fn states_with_event_lists_accepting_states() {
        let fsm = workflow();
        assert_eq!(fsm.states(Some("get_hungry")), ["busy", "sleeping"]);
        assert_eq!(fsm.states(Some("study")), ["normal"]);
        assert!(fsm.states(Some("missing")).is_empty());
    }

    #[test]
    fn states_outlive_the_event_argument() {
        let fsm = workflow();
        let accepting = {
            let event = String::from("get_hungry");
            fsm.states(Some(&event))
        };
        assert_eq!(accepting, ["busy", "sleeping"]);
    }

    #[test]
    fn available_events_follow_current_state() {
        let mut fsm = workflow();
        assert_eq!(fsm.available_events(), ["study"]);
        fsm.trigger("study").unwrap();
        assert_eq!(fsm.available_events(), ["get_tired", "get_hungry"]);
        assert!(fsm.can_trigger("get_tired"));
        assert!(!fsm.can_trigger("study"));
    }

    #[test]
    fn clear_history_disables_undo_and_redo() {
        let mut fsm = workflow();
        fsm.trigger("study").unwrap();
        fsm.trigger("get_tired").unwrap();
        fsm.undo();

        fsm.clear_history();

        assert_eq!(fsm.state(), "busy");
        assert!(!fsm.undo());
        assert!(!fsm.redo());
    }

    #[test]
    fn accepts_state_names_as_arguments() {
        let mut fsm = switch();
        let target = StateName::from("on");
        fsm.change_state(&target).unwrap();
        assert_eq!(fsm.state(), &target);
    }
}
