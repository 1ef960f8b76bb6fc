//! LR(0) automaton
//!
//!     The automaton's states are closed item sets; its edges are transitions on grammar
//!     symbols. Construction starts from the kernel `{#S ::= . <first rule>}` and runs a
//!     worklist until no state has unprocessed successors.
//!
//!     Two states are the same state when their *kernels* are equal, compared before
//!     closure. Each state has at most one transition per symbol, and transitions iterate in
//!     symbol order (literals before rules), which keeps state numbering deterministic.
//!
//!     Epsilon (`""`) is an ordinary terminal here: an item `A ::= . ""` gets an edge on
//!     epsilon to a state holding `A ::= "" .`. The parse engine decides when to take it.

mod item;
mod set;

pub use item::Lr0Item;
pub use set::{Automaton, ItemSet, ItemSetId};
