//! The lexer and its output types

use crate::error::ConfigError;
use crate::lexing::state::{StateId, StateTable, ANY_STATE, DEFAULT_STATE};
use crate::lexing::token_class::{ClassId, Scope, TokenClass, TokenClassGroup, EOF_CLASS, EOL_CLASS};
use crate::lexing::transition::{StateTransition, Transition, Trigger};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::ops::Range;

/// Horizontal whitespace stripped after each token. Line breaks are left for `EOL`.
static WHITESPACE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[ \f\t\x0B\x{00A0}\x{1680}\x{180E}\x{2000}-\x{200A}\x{2028}\x{2029}\x{202F}\x{205F}\x{3000}\x{FEFF}]+",
    )
    .unwrap()
});

static EOL: Lazy<TokenClass> =
    Lazy::new(|| TokenClass::stateless(EOL_CLASS, r"[\r\n]+").unwrap());

/// One lexed token: its text, the class that matched it, and its byte span in the input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub value: String,
    pub class: ClassId,
    pub span: Range<usize>,
}

impl Token {
    pub fn new(value: impl Into<String>, class: ClassId, span: Range<usize>) -> Self {
        Self {
            value: value.into(),
            class,
            span,
        }
    }

    /// The end-of-input sentinel placed after the last real token.
    pub fn eof(at: usize) -> Self {
        Self::new("", ClassId::EOF, at..at)
    }

    pub fn is_eof(&self) -> bool {
        self.class == ClassId::EOF
    }
}

/// Result of [Lexer::tokenize].
///
/// On failure `tokens` holds everything lexed before the offending offset and `remainder`
/// the input from that offset on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tokenized {
    pub success: bool,
    pub tokens: Vec<Token>,
    pub remainder: String,
    /// The lexer state after the last token.
    pub state: StateId,
}

impl Tokenized {
    /// The start of the remainder, for error messages.
    pub fn excerpt(&self) -> String {
        let mut excerpt: String = self.remainder.chars().take(20).collect();
        if self.remainder.chars().count() > 20 {
            excerpt.push_str("...");
        }
        excerpt
    }
}

#[derive(Debug, Clone)]
struct ClassEntry {
    class: TokenClass,
    state: StateId,
}

#[derive(Debug, Clone)]
struct Group {
    name: String,
    classes: Vec<ClassId>,
}

/// Ordered, optionally stateful, regex-driven lexer.
///
/// The lexer owns its registries; tokenizing does not mutate it, so one lexer can serve any
/// number of inputs.
#[derive(Debug, Clone)]
pub struct Lexer {
    classes: Vec<ClassEntry>,
    groups: Vec<Group>,
    states: StateTable,
    transitions: Vec<Transition>,
    stateful: bool,
    skip_whitespace: bool,
}

impl Lexer {
    /// A non-stateful lexer that strips whitespace, with only `EOL` and `EOF` registered.
    pub fn new() -> Self {
        Self {
            classes: vec![
                ClassEntry {
                    class: EOL.clone(),
                    state: StateId::ANY,
                },
                ClassEntry {
                    class: TokenClass::never(EOF_CLASS),
                    state: StateId::DEFAULT,
                },
            ],
            groups: Vec::new(),
            states: StateTable::new(),
            transitions: Vec::new(),
            stateful: false,
            skip_whitespace: true,
        }
    }

    pub fn is_stateful(&self) -> bool {
        self.stateful
    }

    pub fn set_stateful(&mut self, stateful: bool) {
        self.stateful = stateful;
    }

    pub fn skips_whitespace(&self) -> bool {
        self.skip_whitespace
    }

    pub fn set_skip_whitespace(&mut self, skip: bool) {
        self.skip_whitespace = skip;
    }

    /// Register a named state. Requires stateful mode; idempotent by name.
    pub fn add_state(&mut self, name: &str, strict: bool) -> Result<StateId, ConfigError> {
        if !self.stateful {
            return Err(ConfigError::NotStateful);
        }
        Ok(self.states.add(name, strict))
    }

    pub fn add_states<'a, I>(&mut self, states: I) -> Result<(), ConfigError>
    where
        I: IntoIterator<Item = (&'a str, bool)>,
    {
        for (name, strict) in states {
            self.add_state(name, strict)?;
        }
        Ok(())
    }

    /// Register a class after all previously registered ones.
    ///
    /// A class scoped to a state that does not exist yet registers that state (non-strict).
    pub fn add_token_class(&mut self, class: TokenClass) -> Result<ClassId, ConfigError> {
        if self.find_class(class.name()).is_some() {
            return Err(ConfigError::DuplicateTokenClass(class.name().to_string()));
        }
        let state = match class.scope() {
            Scope::Any => StateId::ANY,
            Scope::Default => StateId::DEFAULT,
            Scope::Named(name) => self.add_state(name, false)?,
        };
        self.classes.push(ClassEntry { class, state });
        Ok(ClassId(self.classes.len() - 1))
    }

    pub fn add_token_classes<I>(&mut self, classes: I) -> Result<(), ConfigError>
    where
        I: IntoIterator<Item = TokenClass>,
    {
        for class in classes {
            self.add_token_class(class)?;
        }
        Ok(())
    }

    /// Register a group; every member must already be a registered class.
    pub fn add_token_class_group(&mut self, group: TokenClassGroup) -> Result<(), ConfigError> {
        let classes = group
            .classes()
            .iter()
            .map(|name| {
                self.find_class(name)
                    .ok_or_else(|| ConfigError::UnknownTokenClass(name.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        self.groups.push(Group {
            name: group.name().to_string(),
            classes,
        });
        Ok(())
    }

    /// Register a transition. Requires stateful mode.
    ///
    /// Group transitions are kept ahead of single-class transitions so they take priority
    /// when both would fire; within each kind, declaration order decides.
    pub fn add_state_transition(&mut self, transition: StateTransition) -> Result<(), ConfigError> {
        if !self.stateful {
            return Err(ConfigError::NotStateful);
        }
        let to = self.resolve_state(transition.to_state())?;
        let resolved = match transition.trigger() {
            Trigger::Class(name) => {
                let class = self
                    .find_class(name)
                    .ok_or_else(|| ConfigError::UnknownTokenClass(name.clone()))?;
                let from = match transition.from_state() {
                    Some(from) => self.resolve_state(from)?,
                    None => self.classes[class.0].state,
                };
                Transition {
                    classes: vec![class],
                    from,
                    to,
                    grouped: false,
                }
            }
            Trigger::Group(name) => {
                let group = self
                    .groups
                    .iter()
                    .find(|g| &g.name == name)
                    .ok_or_else(|| ConfigError::UnknownGroup(name.clone()))?;
                let from = match transition.from_state() {
                    Some(from) => self.resolve_state(from)?,
                    None => StateId::ANY,
                };
                Transition {
                    classes: group.classes.clone(),
                    from,
                    to,
                    grouped: true,
                }
            }
        };
        let at = if resolved.grouped {
            self.transitions.iter().filter(|t| t.grouped).count()
        } else {
            self.transitions.len()
        };
        self.transitions.insert(at, resolved);
        Ok(())
    }

    pub fn add_state_transitions<I>(&mut self, transitions: I) -> Result<(), ConfigError>
    where
        I: IntoIterator<Item = StateTransition>,
    {
        for transition in transitions {
            self.add_state_transition(transition)?;
        }
        Ok(())
    }

    fn resolve_state(&self, name: &str) -> Result<StateId, ConfigError> {
        match name {
            ANY_STATE => Ok(StateId::ANY),
            DEFAULT_STATE => Ok(StateId::DEFAULT),
            other => self
                .states
                .find(other)
                .ok_or_else(|| ConfigError::UnknownState(other.to_string())),
        }
    }

    pub fn find_class(&self, name: &str) -> Option<ClassId> {
        self.classes
            .iter()
            .position(|c| c.class.name() == name)
            .map(ClassId)
    }

    pub fn class(&self, id: ClassId) -> &TokenClass {
        &self.classes[id.0].class
    }

    pub fn class_name(&self, id: ClassId) -> &str {
        self.classes[id.0].class.name()
    }

    /// The state a class matches in.
    pub fn class_state(&self, id: ClassId) -> StateId {
        self.classes[id.0].state
    }

    /// All classes, in match priority order.
    pub fn classes(&self) -> impl Iterator<Item = (ClassId, &TokenClass)> {
        self.classes
            .iter()
            .enumerate()
            .map(|(i, entry)| (ClassId(i), &entry.class))
    }

    pub fn states(&self) -> &StateTable {
        &self.states
    }

    pub fn state_name(&self, id: StateId) -> &str {
        self.states.name(id)
    }

    /// Split `input` into tokens, starting in the default state.
    pub fn tokenize(&self, input: &str) -> Tokenized {
        let mut state = StateId::DEFAULT;
        let mut tokens = Vec::new();
        let mut offset = self.skip_whitespace_at(input, 0);

        while offset < input.len() {
            let rest = &input[offset..];
            let Some((class, matched)) = self.match_class(rest, state) else {
                log::debug!(
                    "no token class matches at byte {} in state {}",
                    offset,
                    self.state_name(state)
                );
                return Tokenized {
                    success: false,
                    tokens,
                    remainder: rest.to_string(),
                    state,
                };
            };

            let end = offset + matched.len();
            log::trace!("token {:?} : {}", matched, self.class_name(class));
            tokens.push(Token::new(matched, class, offset..end));
            offset = self.skip_whitespace_at(input, end);

            if self.stateful {
                if let Some(transition) = self.transitions.iter().find(|t| t.fires(class, state)) {
                    log::trace!(
                        "state {} -> {}",
                        self.state_name(state),
                        self.state_name(transition.to)
                    );
                    state = transition.to;
                }
            }
        }

        Tokenized {
            success: true,
            tokens,
            remainder: String::new(),
            state,
        }
    }

    fn match_class<'s>(&self, input: &'s str, state: StateId) -> Option<(ClassId, &'s str)> {
        let strict = self.states.get(state).is_strict();
        self.classes.iter().enumerate().find_map(|(i, entry)| {
            let eligible = entry.state == state || (!strict && entry.state == StateId::ANY);
            if !eligible {
                return None;
            }
            entry.class.matches(input).map(|m| (ClassId(i), m))
        })
    }

    fn skip_whitespace_at(&self, input: &str, offset: usize) -> usize {
        if !self.skip_whitespace {
            return offset;
        }
        offset + WHITESPACE.find(&input[offset..]).map_or(0, |m| m.end())
    }
}

impl Default for Lexer {
    fn default() -> Self {
        Self::new()
    }
}
