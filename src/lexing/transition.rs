//! State transitions
//!
//! A transition moves the lexer from one state to another right after a token of a given
//! class (or of any class in a group) has been emitted. Transitions are declared with names
//! and resolved against the lexer's registries when they are added.

use crate::lexing::state::StateId;
use crate::lexing::token_class::ClassId;

/// What fires a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Trigger {
    Class(String),
    Group(String),
}

/// A transition as declared by the user, with states and classes by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateTransition {
    trigger: Trigger,
    from: Option<String>,
    to: String,
}

impl StateTransition {
    /// Fire on `class` while in `from`, moving to `to`.
    pub fn new(class: impl Into<String>, from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            trigger: Trigger::Class(class.into()),
            from: Some(from.into()),
            to: to.into(),
        }
    }

    /// Fire on `class` while in the class's own state, moving to `to`.
    pub fn to(class: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            trigger: Trigger::Class(class.into()),
            from: None,
            to: to.into(),
        }
    }

    /// Fire on any class of `group` while in `from`, moving to `to`.
    pub fn group(group: impl Into<String>, from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            trigger: Trigger::Group(group.into()),
            from: Some(from.into()),
            to: to.into(),
        }
    }

    pub fn trigger(&self) -> &Trigger {
        &self.trigger
    }

    pub fn from_state(&self) -> Option<&str> {
        self.from.as_deref()
    }

    pub fn to_state(&self) -> &str {
        &self.to
    }
}

/// A transition resolved to ids. Group triggers carry the member classes directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Transition {
    pub(crate) classes: Vec<ClassId>,
    pub(crate) from: StateId,
    pub(crate) to: StateId,
    pub(crate) grouped: bool,
}

impl Transition {
    /// Whether emitting `class` in `current` fires this transition. A transition out of
    /// the any-state fires from every state.
    pub(crate) fn fires(&self, class: ClassId, current: StateId) -> bool {
        (self.from == current || self.from == StateId::ANY) && self.classes.contains(&class)
    }
}
