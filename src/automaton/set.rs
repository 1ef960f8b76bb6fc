use crate::automaton::item::Lr0Item;
use crate::grammar::{Grammar, RuleId, Symbol};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap, HashSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ItemSetId(pub(crate) usize);

impl ItemSetId {
    pub const START: ItemSetId = ItemSetId(0);

    pub fn index(self) -> usize {
        self.0
    }
}

/// One automaton state.
#[derive(Debug, Clone)]
pub struct ItemSet {
    id: ItemSetId,
    kernel: Vec<Lr0Item>,
    items: Vec<Lr0Item>,
    transitions: BTreeMap<Symbol, ItemSetId>,
}

impl ItemSet {
    fn new(id: ItemSetId, kernel: Vec<Lr0Item>, grammar: &Grammar) -> Self {
        let items = closure(&kernel, grammar);
        Self {
            id,
            kernel,
            items,
            transitions: BTreeMap::new(),
        }
    }

    pub fn id(&self) -> ItemSetId {
        self.id
    }

    /// The seed items, sorted.
    pub fn kernel(&self) -> &[Lr0Item] {
        &self.kernel
    }

    /// Kernel followed by the items added by closure.
    pub fn items(&self) -> &[Lr0Item] {
        &self.items
    }

    pub fn transitions(&self) -> &BTreeMap<Symbol, ItemSetId> {
        &self.transitions
    }

    pub fn transition(&self, symbol: Symbol) -> Option<ItemSetId> {
        self.transitions.get(&symbol).copied()
    }
}

/// Add a dot-0 item for every alternative of every rule that appears after a dot, until
/// nothing new appears. Each rule is expanded once per set.
fn closure(kernel: &[Lr0Item], grammar: &Grammar) -> Vec<Lr0Item> {
    let mut items = kernel.to_vec();
    let mut expanded: HashSet<RuleId> = HashSet::new();
    let mut i = 0;
    while i < items.len() {
        if let Some(Symbol::Rule(rule)) = items[i].after_dot(grammar) {
            if expanded.insert(rule) {
                let alternatives = grammar.rule(rule).alternatives().len();
                for alt in 0..alternatives {
                    let item = Lr0Item::new(rule, alt, 0);
                    if !items.contains(&item) {
                        items.push(item);
                    }
                }
            }
        }
        i += 1;
    }
    items
}

/// The LR(0) automaton of a grammar.
#[derive(Debug, Clone)]
pub struct Automaton {
    sets: Vec<ItemSet>,
}

impl Automaton {
    pub fn build(grammar: &Grammar) -> Self {
        let start = vec![Lr0Item::new(grammar.start(), 0, 0)];
        let mut sets = vec![ItemSet::new(ItemSetId::START, start.clone(), grammar)];
        let mut by_kernel: HashMap<Vec<Lr0Item>, ItemSetId> = HashMap::new();
        by_kernel.insert(start, ItemSetId::START);

        let mut next = 0;
        while next < sets.len() {
            let mut successors: BTreeMap<Symbol, Vec<Lr0Item>> = BTreeMap::new();
            for item in sets[next].items() {
                if let Some(symbol) = item.after_dot(grammar) {
                    successors.entry(symbol).or_default().push(item.advance());
                }
            }

            for (symbol, mut kernel) in successors {
                kernel.sort();
                kernel.dedup();
                let target = match by_kernel.get(&kernel) {
                    Some(id) => *id,
                    None => {
                        let id = ItemSetId(sets.len());
                        sets.push(ItemSet::new(id, kernel.clone(), grammar));
                        by_kernel.insert(kernel, id);
                        id
                    }
                };
                sets[next].transitions.insert(symbol, target);
            }
            next += 1;
        }

        log::debug!("built LR(0) automaton with {} states", sets.len());
        Self { sets }
    }

    pub fn sets(&self) -> &[ItemSet] {
        &self.sets
    }

    pub fn set(&self, id: ItemSetId) -> &ItemSet {
        &self.sets[id.0]
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }
}
