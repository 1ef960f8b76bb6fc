//! # lrlang
//!
//! A configurable tokenizer and an LR-style parser generator with its runtime.
//!
//! A language is described by two pieces:
//!
//!     1. A [Lexer](lexing::Lexer): ordered token classes (anchored regular expressions),
//!        optionally scoped to lexer states with transitions between them.
//!     2. A grammar in a small BNF dialect, loaded by [GrammarLoader](grammar::GrammarLoader).
//!
//! From the grammar we build, once, an LR(0) automaton ([automaton]), re-derive the grammar
//! along the automaton's paths to get per-state FIRST/FOLLOW sets, and emit action/goto
//! tables ([tables]). The [ParseEngine](parsing::ParseEngine) drives those tables over a
//! token stream and hands back a parse tree, which is then reduced to an AST.
//!
//! Data flow:
//!
//!     grammar text + token classes -> Grammar -> Automaton -> ExtendedGrammar
//!         -> LookaheadSets -> ParseTable -> (tokens ->) ParseEngine -> Node
//!
//! [Language](language::Language) bundles one lexer with one parser, and
//! [config] loads both from a TOML language definition.

pub mod automaton;
pub mod config;
pub mod error;
pub mod formats;
pub mod grammar;
pub mod language;
pub mod lexing;
pub mod parsing;
pub mod tables;

pub use error::{BuildError, ConfigError, ConflictError, ParseError};
pub use language::Language;
pub use lexing::{Lexer, Token, TokenClass, Tokenized};
pub use parsing::{Node, Parser};
