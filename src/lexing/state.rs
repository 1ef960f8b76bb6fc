//! Lexer states
//!
//! States live in a table addressed by [StateId]. The first two slots are reserved: the
//! any-state wildcard and the default (initial) state.

use serde::Serialize;

/// Name of the wildcard state. Classes scoped to it match in every non-strict state.
pub const ANY_STATE: &str = "*";
/// Name of the state every tokenization starts in.
pub const DEFAULT_STATE: &str = "default";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct StateId(pub(crate) usize);

impl StateId {
    pub const ANY: StateId = StateId(0);
    pub const DEFAULT: StateId = StateId(1);

    pub fn index(self) -> usize {
        self.0
    }
}

/// A named lexer state.
///
/// A strict state only admits classes registered for it; wildcard classes are ignored
/// while the lexer sits in a strict state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct State {
    name: String,
    strict: bool,
}

impl State {
    pub fn new(name: impl Into<String>, strict: bool) -> Self {
        Self {
            name: name.into(),
            strict,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }
}

#[derive(Debug, Clone)]
pub struct StateTable {
    states: Vec<State>,
}

impl StateTable {
    pub fn new() -> Self {
        Self {
            states: vec![
                State::new(ANY_STATE, false),
                State::new(DEFAULT_STATE, false),
            ],
        }
    }

    /// Register a state, or return the existing one with the same name.
    ///
    /// Re-registering keeps the strictness the state was first created with.
    pub fn add(&mut self, name: &str, strict: bool) -> StateId {
        if let Some(id) = self.find(name) {
            return id;
        }
        self.states.push(State::new(name, strict));
        StateId(self.states.len() - 1)
    }

    pub fn find(&self, name: &str) -> Option<StateId> {
        self.states
            .iter()
            .position(|s| s.name == name)
            .map(StateId)
    }

    pub fn get(&self, id: StateId) -> &State {
        &self.states[id.0]
    }

    pub fn name(&self, id: StateId) -> &str {
        self.states[id.0].name()
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (StateId, &State)> {
        self.states.iter().enumerate().map(|(i, s)| (StateId(i), s))
    }
}

impl Default for StateTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserved_states() {
        let table = StateTable::new();
        assert_eq!(table.find(ANY_STATE), Some(StateId::ANY));
        assert_eq!(table.find(DEFAULT_STATE), Some(StateId::DEFAULT));
        assert!(!table.get(StateId::DEFAULT).is_strict());
    }

    #[test]
    fn test_add_is_idempotent_by_name() {
        let mut table = StateTable::new();
        let first = table.add("paren", true);
        let second = table.add("paren", false);
        assert_eq!(first, second);
        assert!(table.get(first).is_strict());
        assert_eq!(table.len(), 3);
    }
}
