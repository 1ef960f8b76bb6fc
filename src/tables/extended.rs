use crate::automaton::{Automaton, ItemSetId};
use crate::grammar::{Grammar, RuleId, Symbol};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExtendedItemId(pub(crate) usize);

impl ExtendedItemId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A symbol as seen from one automaton state: the edge it labels, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExtendedItem {
    pub from: ItemSetId,
    pub to: Option<ItemSetId>,
    pub symbol: Symbol,
}

/// One alternative of `rule`, started in `lhs.from`, walked through the automaton.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtendedRule {
    pub lhs: ExtendedItemId,
    pub rhs: Vec<ExtendedItemId>,
    pub rule: RuleId,
    pub alt: usize,
}

impl ExtendedRule {
    /// The state the path ends in, where the reduce for this alternative belongs.
    pub fn final_state(&self, grammar: &ExtendedGrammar) -> Option<ItemSetId> {
        self.rhs.last().and_then(|id| grammar.item(*id).to)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ExtendedGrammar {
    items: Vec<ExtendedItem>,
    index: HashMap<ExtendedItem, ExtendedItemId>,
    rules: Vec<ExtendedRule>,
}

impl ExtendedGrammar {
    pub fn build(grammar: &Grammar, automaton: &Automaton) -> Self {
        let mut extended = Self::default();
        for set in automaton.sets() {
            for item in set.items().iter().filter(|item| item.dot == 0) {
                let lhs = extended.intern(ExtendedItem {
                    from: set.id(),
                    to: set.transition(Symbol::Rule(item.rule)),
                    symbol: Symbol::Rule(item.rule),
                });

                let mut rhs = Vec::new();
                let mut current = Some(set.id());
                for symbol in grammar.rule(item.rule).alternative(item.alt) {
                    let Some(from) = current else { break };
                    let to = automaton.set(from).transition(*symbol);
                    rhs.push(extended.intern(ExtendedItem {
                        from,
                        to,
                        symbol: *symbol,
                    }));
                    current = to;
                }

                if current.is_none() {
                    log::trace!(
                        "dropping unresolved path for {} from state {}",
                        grammar.describe_alternative(item.rule, item.alt),
                        set.id().index()
                    );
                    continue;
                }
                extended.rules.push(ExtendedRule {
                    lhs,
                    rhs,
                    rule: item.rule,
                    alt: item.alt,
                });
            }
        }
        log::debug!(
            "extended grammar: {} items, {} rules",
            extended.items.len(),
            extended.rules.len()
        );
        extended
    }

    fn intern(&mut self, item: ExtendedItem) -> ExtendedItemId {
        if let Some(id) = self.index.get(&item) {
            return *id;
        }
        let id = ExtendedItemId(self.items.len());
        self.items.push(item);
        self.index.insert(item, id);
        id
    }

    pub fn items(&self) -> &[ExtendedItem] {
        &self.items
    }

    pub fn item(&self, id: ExtendedItemId) -> &ExtendedItem {
        &self.items[id.0]
    }

    pub fn item_ids(&self) -> impl Iterator<Item = ExtendedItemId> {
        (0..self.items.len()).map(ExtendedItemId)
    }

    pub fn find(&self, item: &ExtendedItem) -> Option<ExtendedItemId> {
        self.index.get(item).copied()
    }

    pub fn rules(&self) -> &[ExtendedRule] {
        &self.rules
    }
}
