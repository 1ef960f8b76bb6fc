use crate::grammar::{Grammar, RuleId, Symbol};
use std::fmt;

/// A rule alternative with a position marker.
///
/// Ordered by (rule, alternative, dot), which is the order kernels are sorted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Lr0Item {
    pub rule: RuleId,
    pub alt: usize,
    pub dot: usize,
}

impl Lr0Item {
    pub fn new(rule: RuleId, alt: usize, dot: usize) -> Self {
        Self { rule, alt, dot }
    }

    /// The symbol right after the dot, or `None` when the item is complete.
    pub fn after_dot(&self, grammar: &Grammar) -> Option<Symbol> {
        grammar
            .rule(self.rule)
            .alternative(self.alt)
            .get(self.dot)
            .copied()
    }

    pub fn is_complete(&self, grammar: &Grammar) -> bool {
        self.dot >= grammar.rule(self.rule).alternative(self.alt).len()
    }

    pub fn advance(&self) -> Self {
        Self {
            dot: self.dot + 1,
            ..*self
        }
    }

    pub fn display<'g>(&self, grammar: &'g Grammar) -> ItemDisplay<'g> {
        ItemDisplay {
            item: *self,
            grammar,
        }
    }
}

/// `E ::= <E> . "+" <T>`
pub struct ItemDisplay<'g> {
    item: Lr0Item,
    grammar: &'g Grammar,
}

impl fmt::Display for ItemDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = self.grammar.rule(self.item.rule);
        write!(f, "{} ::=", rule.name())?;
        for (i, symbol) in rule.alternative(self.item.alt).iter().enumerate() {
            if i == self.item.dot {
                write!(f, " .")?;
            }
            write!(f, " {}", self.grammar.symbol_name(*symbol))?;
        }
        if self.item.is_complete(self.grammar) {
            write!(f, " .")?;
        }
        Ok(())
    }
}
