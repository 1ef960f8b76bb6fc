use crate::grammar::{Grammar, Symbol};
use crate::tables::extended::{ExtendedGrammar, ExtendedItemId};
use std::collections::BTreeSet;

/// FIRST and FOLLOW sets per extended item.
///
/// Both are computed by whole passes over the extended rules until a pass changes
/// nothing. Sets only ever grow and are bounded by the grammar's terminals, so the
/// iteration terminates.
#[derive(Debug, Clone)]
pub struct LookaheadSets {
    first: Vec<BTreeSet<Symbol>>,
    follow: Vec<BTreeSet<Symbol>>,
}

impl LookaheadSets {
    pub fn compute(grammar: &Grammar, extended: &ExtendedGrammar) -> Self {
        let first = first_sets(grammar, extended);
        let follow = follow_sets(grammar, extended, &first);
        Self { first, follow }
    }

    pub fn first(&self, id: ExtendedItemId) -> &BTreeSet<Symbol> {
        &self.first[id.index()]
    }

    /// Never contains epsilon.
    pub fn follow(&self, id: ExtendedItemId) -> &BTreeSet<Symbol> {
        &self.follow[id.index()]
    }
}

fn extend(set: &mut BTreeSet<Symbol>, with: impl IntoIterator<Item = Symbol>) -> bool {
    let before = set.len();
    set.extend(with);
    set.len() != before
}

fn first_sets(grammar: &Grammar, extended: &ExtendedGrammar) -> Vec<BTreeSet<Symbol>> {
    let mut first: Vec<BTreeSet<Symbol>> = extended
        .items()
        .iter()
        .map(|item| {
            if grammar.is_terminal(item.symbol) {
                BTreeSet::from([item.symbol])
            } else {
                BTreeSet::new()
            }
        })
        .collect();

    let mut passes = 0;
    loop {
        passes += 1;
        let mut changed = false;
        for rule in extended.rules() {
            let mut found = BTreeSet::new();
            let mut nullable = true;
            for id in &rule.rhs {
                let symbols = &first[id.index()];
                found.extend(symbols.iter().copied().filter(|s| *s != Symbol::EPSILON));
                if !symbols.contains(&Symbol::EPSILON) {
                    nullable = false;
                    break;
                }
            }
            if nullable {
                found.insert(Symbol::EPSILON);
            }
            changed |= extend(&mut first[rule.lhs.index()], found);
        }
        if !changed {
            break;
        }
    }
    log::debug!("FIRST sets settled after {} passes", passes);
    first
}

fn follow_sets(
    grammar: &Grammar,
    extended: &ExtendedGrammar,
    first: &[BTreeSet<Symbol>],
) -> Vec<BTreeSet<Symbol>> {
    let mut follow = vec![BTreeSet::new(); extended.items().len()];
    if let Some(start) = follow.first_mut() {
        start.insert(Symbol::Rule(grammar.eof()));
    }

    let mut passes = 0;
    loop {
        passes += 1;
        let mut changed = false;
        for rule in extended.rules() {
            for (position, id) in rule.rhs.iter().enumerate() {
                let mut found = BTreeSet::new();
                let mut rest_nullable = true;
                for next in &rule.rhs[position + 1..] {
                    let symbols = &first[next.index()];
                    found.extend(symbols.iter().copied().filter(|s| *s != Symbol::EPSILON));
                    if !symbols.contains(&Symbol::EPSILON) {
                        rest_nullable = false;
                        break;
                    }
                }
                if rest_nullable {
                    found.extend(follow[rule.lhs.index()].iter().copied());
                }
                changed |= extend(&mut follow[id.index()], found);
            }
        }
        if !changed {
            break;
        }
    }
    log::debug!("FOLLOW sets settled after {} passes", passes);
    follow
}
