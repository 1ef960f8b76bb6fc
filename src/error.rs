//! Error types
//!
//! Failures travel in two channels. Setup failures ([ConfigError], [ConflictError], wrapped
//! together as [BuildError]) come out of constructors and mean the language definition itself
//! is broken. Parse failures ([ParseError]) come out of `parse` calls and concern one input.

use crate::lexing::{Token, Tokenized};
use thiserror::Error;

/// Problems in the grammar text or in lexer registration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Grammar text that does not follow `<Name> ::= alt | alt`
    #[error("invalid BNF at line {line}: {reason}")]
    InvalidBnf { line: usize, reason: String },

    #[error("invalid rule name \"{0}\"")]
    InvalidRuleName(String),

    #[error("rule \"{0}\" is defined more than once")]
    DuplicateRule(String),

    #[error("rule \"{rule}\" has an empty alternative")]
    EmptyAlternative { rule: String },

    /// A `<Name>` reference with no matching rule or token class
    #[error("\"{0}\" is not a valid rule")]
    UnresolvedRule(String),

    #[error("grammar declares no rules")]
    NoRules,

    #[error("invalid pattern for token class \"{class}\": {reason}")]
    InvalidPattern { class: String, reason: String },

    #[error("token class \"{0}\" is already registered")]
    DuplicateTokenClass(String),

    #[error("\"{0}\" is not a valid state")]
    UnknownState(String),

    #[error("\"{0}\" is not a valid token class")]
    UnknownTokenClass(String),

    #[error("\"{0}\" is not a valid token class group")]
    UnknownGroup(String),

    /// A transition must be triggered by exactly one of a class or a group
    #[error("transition to \"{0}\" must name exactly one of a class or a group")]
    InvalidTransition(String),

    #[error("lexer is not in stateful mode")]
    NotStateful,
}

/// Table construction found two reductions competing for the same key.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConflictError {
    #[error("reduce-reduce conflict in state {state} on {lookahead}: `{existing}` vs `{incoming}`")]
    ReduceReduce {
        state: usize,
        lookahead: String,
        existing: String,
        incoming: String,
    },
}

/// Any failure while turning a lexer and grammar text into a ready parser.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("grammar conflict: {0}")]
    Conflict(#[from] ConflictError),
}

/// Failures of a single parse call.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// The lexer stopped before the end of the input.
    #[error("could not tokenize input near \"{}\"", .0.excerpt())]
    Tokenize(Tokenized),

    #[error("unexpected token \"{}\" at {line}:{column}", .token.value)]
    Syntax {
        token: Token,
        line: usize,
        column: usize,
    },

    #[error("unexpected end of file")]
    UnexpectedEof,

    /// The tables and the parse stack disagree; this is a bug, not bad input.
    #[error("internal parser error: {0}")]
    Internal(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexing::ClassId;

    #[test]
    fn test_syntax_error_message() {
        let err = ParseError::Syntax {
            token: Token::new("+", ClassId::EOF, 3..4),
            line: 2,
            column: 4,
        };
        assert_eq!(err.to_string(), "unexpected token \"+\" at 2:4");
    }

    #[test]
    fn test_build_error_wraps_config_error() {
        let err: BuildError = ConfigError::UnresolvedRule("Expr".to_string()).into();
        assert_eq!(
            err.to_string(),
            "configuration error: \"Expr\" is not a valid rule"
        );
    }
}
