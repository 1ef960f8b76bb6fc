//! Parse tables
//!
//!     Table construction runs in three steps over the [Automaton]:
//!
//!     1. [ExtendedGrammar]: every alternative that starts in some state is re-expressed as a
//!        path of `(from, to, symbol)` items through the automaton. The same rule reached
//!        from different states becomes different extended items.
//!     2. [LookaheadSets]: FIRST and FOLLOW computed over extended items by fixed-point
//!        iteration, giving each state its own lookahead sets.
//!     3. [ParseTable]: shifts and gotos from the automaton's edges, accept on the complete
//!        start item, and reduces keyed on the FOLLOW sets.
//!
//!     Shift/reduce collisions are resolved in favour of the shift. Two different reduces on
//!     the same key are a [ConflictError].
//!
//!     Everything here is a pure function of the grammar; [ParserTables] bundles the results
//!     so a parser builds them once.

mod action;
mod extended;
mod sets;

pub use action::{Action, ParseTable, ResolvedConflict, TableRow};
pub use extended::{ExtendedGrammar, ExtendedItem, ExtendedItemId, ExtendedRule};
pub use sets::LookaheadSets;

use crate::automaton::Automaton;
use crate::error::ConflictError;
use crate::grammar::Grammar;

/// Every artifact derived from a grammar on the way to its parse table.
#[derive(Debug, Clone)]
pub struct ParserTables {
    pub automaton: Automaton,
    pub extended: ExtendedGrammar,
    pub lookahead: LookaheadSets,
    pub table: ParseTable,
}

impl ParserTables {
    pub fn build(grammar: &Grammar) -> Result<Self, ConflictError> {
        let automaton = Automaton::build(grammar);
        let extended = ExtendedGrammar::build(grammar, &automaton);
        let lookahead = LookaheadSets::compute(grammar, &extended);
        let table = ParseTable::build(grammar, &automaton, &extended, &lookahead)?;
        Ok(Self {
            automaton,
            extended,
            lookahead,
            table,
        })
    }
}
