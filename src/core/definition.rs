//! Static machine definition: per-state transition tables and the
//! configuration handed to the engine.
//!
//! Tables keep insertion order, so listing states or events yields them in
//! the order they were declared.

use super::state::{EventName, StateName};
use crate::engine::FsmError;
use indexmap::IndexMap;
use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Transition rules of a single state: event name to target state.
///
/// # Example
///
/// ```rust
/// use fsm_engine::core::TransitionTable;
///
/// let table = TransitionTable::new().on("SWITCH", "on");
/// assert_eq!(table.target("SWITCH").map(|s| s.as_str()), Some("on"));
/// assert!(table.target("RESET").is_none());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransitionTable {
    rules: IndexMap<EventName, StateName>,
}

impl TransitionTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a rule, returning the table.
    pub fn on(mut self, event: impl Into<EventName>, target: impl Into<StateName>) -> Self {
        self.insert(event, target);
        self
    }

    /// Add or replace a rule. Returns the previous target for `event`, if any.
    pub fn insert(
        &mut self,
        event: impl Into<EventName>,
        target: impl Into<StateName>,
    ) -> Option<StateName> {
        self.rules.insert(event.into(), target.into())
    }

    /// Target state for `event`, or `None` if the event has no rule here.
    pub fn target(&self, event: &str) -> Option<&StateName> {
        self.rules.get(event)
    }

    /// Whether `event` has a rule here.
    pub fn contains_event(&self, event: &str) -> bool {
        self.rules.contains_key(event)
    }

    /// Events with a rule, in declaration order.
    pub fn events(&self) -> impl Iterator<Item = &EventName> {
        self.rules.keys()
    }

    /// All `(event, target)` rules, in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&EventName, &StateName)> {
        self.rules.iter()
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the table has no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl<E, S> FromIterator<(E, S)> for TransitionTable
where
    E: Into<EventName>,
    S: Into<StateName>,
{
    fn from_iter<I: IntoIterator<Item = (E, S)>>(iter: I) -> Self {
        Self {
            rules: iter
                .into_iter()
                .map(|(event, target)| (event.into(), target.into()))
                .collect(),
        }
    }
}

/// Definition of one state.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateDefinition {
    /// Outgoing rules of this state
    #[serde(default)]
    pub transitions: TransitionTable,
}

impl StateDefinition {
    /// A state with no outgoing transitions.
    pub fn new() -> Self {
        Self::default()
    }

    /// A state with the given rules.
    pub fn with_transitions(transitions: TransitionTable) -> Self {
        Self { transitions }
    }

    /// Add a rule, returning the definition.
    pub fn on(mut self, event: impl Into<EventName>, target: impl Into<StateName>) -> Self {
        self.transitions.insert(event, target);
        self
    }
}

/// All states of a machine, keyed by name.
///
/// State names are unique. Deserializing a map that repeats a state name
/// fails instead of keeping one of the entries.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct StateTable {
    states: IndexMap<StateName, StateDefinition>,
}

impl StateTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a state, returning the table.
    pub fn with_state(mut self, name: impl Into<StateName>, definition: StateDefinition) -> Self {
        self.insert(name, definition);
        self
    }

    /// Add or replace a state. Returns the previous definition, if any.
    pub fn insert(
        &mut self,
        name: impl Into<StateName>,
        definition: StateDefinition,
    ) -> Option<StateDefinition> {
        self.states.insert(name.into(), definition)
    }

    /// Definition of the state `name`, if defined.
    pub fn get(&self, name: &str) -> Option<&StateDefinition> {
        self.states.get(name)
    }

    pub(crate) fn entry(&mut self, name: StateName) -> &mut StateDefinition {
        self.states.entry(name).or_default()
    }

    /// Stored key equal to `name`, if the state is defined.
    pub fn resolve(&self, name: &str) -> Option<&StateName> {
        self.states.get_key_value(name).map(|(key, _)| key)
    }

    /// Whether `name` is a defined state.
    pub fn contains_state(&self, name: &str) -> bool {
        self.states.contains_key(name)
    }

    /// State names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &StateName> {
        self.states.keys()
    }

    /// States whose transition table has a rule for `event`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use fsm_engine::core::{StateDefinition, StateTable};
    ///
    /// let table = StateTable::new()
    ///     .with_state("idle", StateDefinition::new().on("START", "busy"))
    ///     .with_state("busy", StateDefinition::new().on("STOP", "idle"));
    ///
    /// let names: Vec<_> = table.states_accepting("START").collect();
    /// assert_eq!(names, ["idle"]);
    /// ```
    pub fn states_accepting<'a>(&'a self, event: &'a str) -> impl Iterator<Item = &'a StateName> {
        self.states
            .iter()
            .filter(move |(_, definition)| definition.transitions.contains_event(event))
            .map(|(name, _)| name)
    }

    /// All `(name, definition)` pairs, in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&StateName, &StateDefinition)> {
        self.states.iter()
    }

    /// Number of defined states.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Whether no states are defined.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

impl<'de> Deserialize<'de> for StateTable {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct StateTableVisitor;

        impl<'de> Visitor<'de> for StateTableVisitor {
            type Value = StateTable;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of state names to state definitions")
            }

            fn visit_map<A>(self, mut map: A) -> Result<StateTable, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut states: IndexMap<StateName, StateDefinition> =
                    IndexMap::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((name, definition)) =
                    map.next_entry::<StateName, StateDefinition>()?
                {
                    if states.contains_key(&name) {
                        return Err(de::Error::custom(format_args!(
                            "duplicate state '{name}'"
                        )));
                    }
                    states.insert(name, definition);
                }
                Ok(StateTable { states })
            }
        }

        deserializer.deserialize_map(StateTableVisitor)
    }
}

impl<N> FromIterator<(N, StateDefinition)> for StateTable
where
    N: Into<StateName>,
{
    fn from_iter<I: IntoIterator<Item = (N, StateDefinition)>>(iter: I) -> Self {
        Self {
            states: iter
                .into_iter()
                .map(|(name, definition)| (name.into(), definition))
                .collect(),
        }
    }
}

/// Everything the engine needs: the initial state and the state table.
///
/// # Example
///
/// ```rust
/// use fsm_engine::core::{Configuration, StateDefinition, StateTable};
///
/// let states = StateTable::new()
///     .with_state("off", StateDefinition::new().on("SWITCH", "on"))
///     .with_state("on", StateDefinition::new().on("SWITCH", "off"));
///
/// let config = Configuration::new("off", states);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Configuration {
    /// State the machine starts in and returns to on reset
    pub initial: StateName,
    /// State table
    pub states: StateTable,
}

impl Configuration {
    /// Pair an initial state with a state table. Not validated.
    pub fn new(initial: impl Into<StateName>, states: StateTable) -> Self {
        Self {
            initial: initial.into(),
            states,
        }
    }

    /// Check that the initial state is defined in the state table.
    ///
    /// Rules targeting undefined states are not rejected here; triggering
    /// such a rule fails with [`FsmError::InvalidState`].
    pub fn validate(&self) -> Result<(), FsmError> {
        if !self.states.contains_state(self.initial.as_str()) {
            return Err(FsmError::UnknownInitialState {
                initial: self.initial.clone(),
            });
        }
        Ok(())
    }
}
