//! Lexer
//!
//!     The lexer turns raw text into a flat stream of [Token]s using an ordered list of
//!     [TokenClass]es. Each class is an anchored regular expression plus the lexer state it
//!     belongs to.
//!
//! Matching
//!
//!     At every offset the classes are tried in registration order and the first eligible
//!     class that matches wins. This is first-match, not longest-match: register `float`
//!     before `int` if both start with digits. A class is eligible when it belongs to the
//!     current state, or when it belongs to the any-state (`*`) and the current state is not
//!     strict.
//!
//!     After each token the lexer strips horizontal whitespace (if enabled) and, in stateful
//!     mode, applies the first transition that fires for the emitted class. Transitions
//!     triggered by a class group are always checked before single-class transitions.
//!
//! Built-in classes
//!
//!     Two classes are registered by every lexer before any user class:
//!         - `EOL` matches `[\r\n]+` in any state. Line breaks are never stripped as
//!           whitespace, so grammars that span lines reference `<Token-EOL>`.
//!         - `EOF` has no pattern and never matches. The parser appends an `EOF` token to
//!           every stream as the end-of-input sentinel.
//!
//! Failure
//!
//!     [Lexer::tokenize] never fails outright. When no class matches it stops and returns a
//!     [Tokenized] with `success == false`, the tokens produced so far, and the unconsumed
//!     remainder, leaving the decision to the caller.

pub mod lexer;
pub mod state;
pub mod token_class;
pub mod transition;

pub use lexer::{Lexer, Token, Tokenized};
pub use state::{State, StateId, StateTable, ANY_STATE, DEFAULT_STATE};
pub use token_class::{ClassId, Scope, TokenClass, TokenClassGroup, EOF_CLASS, EOL_CLASS};
pub use transition::{StateTransition, Trigger};
