//! Parsing
//!
//!     [Parser] owns a grammar and the tables built from it. Building happens once, in
//!     [Parser::new]; every parse after that only reads the tables, so a parser can be
//!     shared freely.
//!
//!     A parse produces a [Derivation]: the concrete parse tree plus the log of reductions
//!     performed. [Node::into_ast] turns the concrete tree into the AST handed to
//!     evaluators.
//!
//!     The engine picks an action for the next token in this order:
//!
//!         1. a literal terminal the upcoming tokens spell out (longest literal wins)
//!         2. the token's class, through its `Token-<class>` rule
//!         3. any action keyed on the empty literal `""`

mod engine;
mod node;
mod parser;

pub use engine::{Derivation, ParseEngine, Reduction};
pub use node::Node;
pub use parser::Parser;
