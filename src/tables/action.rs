use crate::automaton::{Automaton, ItemSetId};
use crate::error::ConflictError;
use crate::grammar::{Grammar, RuleId, Symbol};
use crate::tables::extended::ExtendedGrammar;
use crate::tables::sets::LookaheadSets;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Shift(ItemSetId),
    Reduce { rule: RuleId, alt: usize },
    Accept,
}

impl Action {
    pub fn describe(&self, grammar: &Grammar) -> String {
        match self {
            Action::Shift(target) => format!("shift {}", target.index()),
            Action::Reduce { rule, alt } => {
                format!("reduce {}", grammar.describe_alternative(*rule, *alt))
            }
            Action::Accept => "accept".to_string(),
        }
    }
}

/// Actions keyed by lookahead symbol and gotos keyed by rule, for one state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableRow {
    pub actions: BTreeMap<Symbol, Action>,
    pub gotos: BTreeMap<RuleId, ItemSetId>,
}

/// A shift/reduce collision that was settled by keeping the shift.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConflict {
    pub state: ItemSetId,
    pub lookahead: Symbol,
    pub kept: Action,
    pub discarded: Action,
}

#[derive(Debug, Clone)]
pub struct ParseTable {
    rows: Vec<TableRow>,
    resolved: Vec<ResolvedConflict>,
}

impl ParseTable {
    pub fn build(
        grammar: &Grammar,
        automaton: &Automaton,
        extended: &ExtendedGrammar,
        lookahead: &LookaheadSets,
    ) -> Result<Self, ConflictError> {
        let eof = Symbol::Rule(grammar.eof());
        let mut rows = vec![TableRow::default(); automaton.len()];

        for set in automaton.sets() {
            let row = &mut rows[set.id().index()];
            for (symbol, target) in set.transitions() {
                match symbol {
                    Symbol::Rule(rule) if !grammar.is_terminal(*symbol) => {
                        row.gotos.insert(*rule, *target);
                    }
                    _ => {
                        row.actions.insert(*symbol, Action::Shift(*target));
                    }
                }
            }
            let accepts = set
                .items()
                .iter()
                .any(|item| item.rule == grammar.start() && item.is_complete(grammar));
            if accepts {
                row.actions.insert(eof, Action::Accept);
            }
        }

        // (rule, alt, final state) -> union of the LHS FOLLOW sets
        let mut reduces: BTreeMap<(RuleId, usize, ItemSetId), BTreeSet<Symbol>> = BTreeMap::new();
        for rule in extended.rules() {
            if rule.rule == grammar.start() {
                continue;
            }
            if let Some(state) = rule.final_state(extended) {
                reduces
                    .entry((rule.rule, rule.alt, state))
                    .or_default()
                    .extend(lookahead.follow(rule.lhs).iter().copied());
            }
        }

        let mut table = Self {
            rows,
            resolved: Vec::new(),
        };
        for ((rule, alt, state), symbols) in reduces {
            for symbol in symbols {
                table.install_reduce(grammar, state, symbol, Action::Reduce { rule, alt })?;
            }
        }

        log::debug!(
            "parse table: {} states, {} actions, {} gotos",
            table.rows.len(),
            table.rows.iter().map(|r| r.actions.len()).sum::<usize>(),
            table.rows.iter().map(|r| r.gotos.len()).sum::<usize>()
        );
        Ok(table)
    }

    fn install_reduce(
        &mut self,
        grammar: &Grammar,
        state: ItemSetId,
        symbol: Symbol,
        reduce: Action,
    ) -> Result<(), ConflictError> {
        let row = &mut self.rows[state.index()];
        match row.actions.get(&symbol).copied() {
            None => {
                row.actions.insert(symbol, reduce);
            }
            Some(existing) if existing == reduce => {}
            Some(Action::Accept) => {}
            Some(shift @ Action::Shift(_)) => {
                log::warn!(
                    "shift/reduce conflict in state {} on {}: keeping {}, dropping {}",
                    state.index(),
                    grammar.symbol_name(symbol),
                    shift.describe(grammar),
                    reduce.describe(grammar)
                );
                self.resolved.push(ResolvedConflict {
                    state,
                    lookahead: symbol,
                    kept: shift,
                    discarded: reduce,
                });
            }
            Some(existing @ Action::Reduce { .. }) => {
                return Err(ConflictError::ReduceReduce {
                    state: state.index(),
                    lookahead: grammar.symbol_name(symbol),
                    existing: existing.describe(grammar),
                    incoming: reduce.describe(grammar),
                });
            }
        }
        Ok(())
    }

    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    pub fn row(&self, state: ItemSetId) -> &TableRow {
        &self.rows[state.index()]
    }

    pub fn action(&self, state: ItemSetId, symbol: Symbol) -> Option<Action> {
        self.rows[state.index()].actions.get(&symbol).copied()
    }

    pub fn goto(&self, state: ItemSetId, rule: RuleId) -> Option<ItemSetId> {
        self.rows[state.index()].gotos.get(&rule).copied()
    }

    /// Shift/reduce collisions settled while building.
    pub fn resolved_conflicts(&self) -> &[ResolvedConflict] {
        &self.resolved
    }
}
