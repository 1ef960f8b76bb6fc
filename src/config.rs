//! Language definitions loaded from TOML.
//!
//! `defaults/language.default.toml` is embedded so that every definition starts from the
//! same defaults. A definition file layers the grammar and the lexer registrations on top
//! through [`Loader`]; [`LanguageDefinition::build`] then registers everything on a fresh
//! [`Lexer`] and builds the parser.

use crate::error::{BuildError, ConfigError};
use crate::language::Language;
use crate::lexing::{Lexer, StateTransition, TokenClass, TokenClassGroup, ANY_STATE};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, File, FileFormat, ValueKind};
use serde::{Deserialize, Serialize};
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/language.default.toml");

/// A grammar plus the lexer it is written against.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LanguageDefinition {
    pub grammar: String,
    pub lexer: LexerConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LexerConfig {
    pub stateful: bool,
    pub skip_whitespace: bool,
    #[serde(default)]
    pub states: Vec<StateConfig>,
    #[serde(default)]
    pub classes: Vec<ClassConfig>,
    #[serde(default)]
    pub groups: Vec<GroupConfig>,
    #[serde(default)]
    pub transitions: Vec<TransitionConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StateConfig {
    pub name: String,
    #[serde(default)]
    pub strict: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClassConfig {
    pub name: String,
    /// Omitted for a class that never matches input.
    #[serde(default)]
    pub pattern: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GroupConfig {
    pub name: String,
    pub classes: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TransitionConfig {
    #[serde(default)]
    pub class: Option<String>,
    #[serde(default)]
    pub group: Option<String>,
    #[serde(default)]
    pub from: Option<String>,
    pub to: String,
}

impl TransitionConfig {
    fn to_transition(&self) -> Result<StateTransition, ConfigError> {
        match (&self.class, &self.group, &self.from) {
            (Some(class), None, Some(from)) => Ok(StateTransition::new(class, from, &self.to)),
            (Some(class), None, None) => Ok(StateTransition::to(class, &self.to)),
            (None, Some(group), from) => Ok(StateTransition::group(
                group,
                from.as_deref().unwrap_or(ANY_STATE),
                &self.to,
            )),
            _ => Err(ConfigError::InvalidTransition(self.to.clone())),
        }
    }
}

impl LexerConfig {
    /// Register states, classes, groups and transitions, in that order.
    pub fn build(&self) -> Result<Lexer, ConfigError> {
        let mut lexer = Lexer::new();
        lexer.set_stateful(self.stateful);
        lexer.set_skip_whitespace(self.skip_whitespace);

        for state in &self.states {
            lexer.add_state(&state.name, state.strict)?;
        }
        for class in &self.classes {
            let mut token_class = match &class.pattern {
                Some(pattern) => TokenClass::new(&class.name, pattern)?,
                None => TokenClass::never(&class.name),
            };
            if let Some(state) = &class.state {
                token_class = token_class.in_state(state);
            }
            lexer.add_token_class(token_class)?;
        }
        for group in &self.groups {
            lexer.add_token_class_group(TokenClassGroup::new(&group.name, &group.classes))?;
        }
        for transition in &self.transitions {
            lexer.add_state_transition(transition.to_transition()?)?;
        }
        Ok(lexer)
    }
}

impl LanguageDefinition {
    pub fn build(&self) -> Result<Language, BuildError> {
        let lexer = self.lexer.build()?;
        Language::new(lexer, &self.grammar)
    }
}

/// Layers definition files over the embedded defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a definition file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional definition file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer definition text held in memory.
    pub fn with_str(mut self, toml: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(toml, FileFormat::Toml));
        self
    }

    /// Apply a single key/value override, e.g. `lexer.skip_whitespace`.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, config::ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    pub fn build(self) -> Result<LanguageDefinition, config::ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}
