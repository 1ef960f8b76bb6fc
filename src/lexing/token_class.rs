//! Token classes and class groups

use crate::error::ConfigError;
use crate::lexing::state::{ANY_STATE, DEFAULT_STATE};
use regex::Regex;
use serde::Serialize;

/// Name of the built-in end-of-line class.
pub const EOL_CLASS: &str = "EOL";
/// Name of the built-in, never-matching end-of-file class.
pub const EOF_CLASS: &str = "EOF";

/// Index of a registered class. Registration order is match priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ClassId(pub(crate) usize);

impl ClassId {
    pub const EOL: ClassId = ClassId(0);
    pub const EOF: ClassId = ClassId(1);

    pub fn index(self) -> usize {
        self.0
    }
}

/// The lexer state a class is allowed to match in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    /// Any non-strict state.
    Any,
    /// The initial state.
    Default,
    /// A named state, registered on the lexer when the class is.
    Named(String),
}

impl Scope {
    /// Map a state name from a definition file: `*` is the wildcard, `default` the
    /// initial state, anything else a named state.
    pub fn from_name(name: &str) -> Self {
        match name {
            ANY_STATE => Scope::Any,
            DEFAULT_STATE => Scope::Default,
            other => Scope::Named(other.to_string()),
        }
    }
}

/// A named, anchored pattern.
#[derive(Debug, Clone)]
pub struct TokenClass {
    name: String,
    pattern: Option<Regex>,
    source: Option<String>,
    scope: Scope,
}

impl TokenClass {
    /// A class matching `pattern` at the current offset, in the default state.
    pub fn new(name: impl Into<String>, pattern: &str) -> Result<Self, ConfigError> {
        let name = name.into();
        let anchored = Regex::new(&format!("^(?:{})", pattern)).map_err(|e| {
            ConfigError::InvalidPattern {
                class: name.clone(),
                reason: e.to_string(),
            }
        })?;
        Ok(Self {
            name,
            pattern: Some(anchored),
            source: Some(pattern.to_string()),
            scope: Scope::Default,
        })
    }

    /// A class that matches in every non-strict state.
    pub fn stateless(name: impl Into<String>, pattern: &str) -> Result<Self, ConfigError> {
        Ok(Self::new(name, pattern)?.with_scope(Scope::Any))
    }

    /// A class with no pattern. It never matches input; `EOF` is one.
    pub fn never(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pattern: None,
            source: None,
            scope: Scope::Default,
        }
    }

    /// Scope the class to the named state (`*` and `default` are understood).
    pub fn in_state(self, state: &str) -> Self {
        self.with_scope(Scope::from_name(state))
    }

    pub fn with_scope(mut self, scope: Scope) -> Self {
        self.scope = scope;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    /// The pattern as written, without the anchor.
    pub fn pattern(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// The non-empty prefix of `input` this class matches, if any.
    ///
    /// Empty matches are rejected; a class that can match nothing would stall the scan.
    pub fn matches<'s>(&self, input: &'s str) -> Option<&'s str> {
        let m = self.pattern.as_ref()?.find(input)?;
        if m.start() != 0 || m.end() == 0 {
            return None;
        }
        Some(&input[..m.end()])
    }
}

/// A named set of classes, used to trigger one transition from several classes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenClassGroup {
    name: String,
    classes: Vec<String>,
}

impl TokenClassGroup {
    pub fn new<I, S>(name: impl Into<String>, classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            classes: classes.into_iter().map(Into::into).collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }
}
