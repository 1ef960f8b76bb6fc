//! Grammar
//!
//!     Grammars are written in a small BNF dialect:
//!
//!         <Expr> ::= <Expr> "+" <Term> | <Term>
//!         <Term> ::= <Token-int>
//!                  | "(" <Expr> ")"
//!
//!     - A line containing `::=` starts a rule; any other non-blank line continues the
//!       previous rule, so alternatives can span lines.
//!     - `<Name>` references a rule. Names match `[A-Za-z][A-Za-z0-9-]*`.
//!     - `"text"` or `'text'` is a literal terminal. `""` is the empty (epsilon) terminal.
//!     - `|` separates alternatives. Whitespace between symbols is insignificant.
//!
//!     Every token class registered on the lexer becomes a rule named `Token-<class>`, so
//!     `<Token-int>` matches any token of class `int`. A synthetic start rule `#S` with the
//!     single alternative `<first declared rule>` is placed in front of all rules; reducing
//!     to it is the accept condition.
//!
//!     All rules live in one arena ([Grammar]) and refer to each other by [RuleId], so
//!     recursive grammars carry no ownership cycles.

pub mod bnf;
pub mod loader;
pub mod rule;

pub use loader::GrammarLoader;
pub use rule::{Grammar, Rule, RuleId, RuleKind, Symbol, TerminalId, START_RULE};
