//! Rule arena and grammar symbols

use crate::lexing::ClassId;
use serde::Serialize;
use std::collections::HashMap;

/// Name of the synthetic start rule.
pub const START_RULE: &str = "#S";

/// Prefix of the rules generated for lexer token classes.
pub const TOKEN_RULE_PREFIX: &str = "Token-";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct RuleId(pub(crate) usize);

impl RuleId {
    pub const START: RuleId = RuleId(0);

    pub fn index(self) -> usize {
        self.0
    }
}

/// Interned literal terminal. Literals are compared by value, so every `"+"` in a grammar
/// is the same terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TerminalId(pub(crate) usize);

impl TerminalId {
    /// The empty literal `""`, always interned first.
    pub const EPSILON: TerminalId = TerminalId(0);

    pub fn index(self) -> usize {
        self.0
    }
}

/// A grammar symbol. Terminals order before rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Symbol {
    Terminal(TerminalId),
    Rule(RuleId),
}

impl Symbol {
    pub const EPSILON: Symbol = Symbol::Terminal(TerminalId::EPSILON);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    /// The synthetic `#S` rule.
    Start,
    /// A rule written in the grammar text.
    Defined,
    /// `Token-<class>`: matches one token of the class; has no alternatives.
    TokenClass(ClassId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub(crate) name: String,
    pub(crate) kind: RuleKind,
    pub(crate) alternatives: Vec<Vec<Symbol>>,
}

impl Rule {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> RuleKind {
        self.kind
    }

    pub fn alternatives(&self) -> &[Vec<Symbol>] {
        &self.alternatives
    }

    pub fn alternative(&self, index: usize) -> &[Symbol] {
        &self.alternatives[index]
    }

    pub fn token_class(&self) -> Option<ClassId> {
        match self.kind {
            RuleKind::TokenClass(class) => Some(class),
            _ => None,
        }
    }
}

/// The resolved rule graph.
///
/// Immutable once loaded. Rule 0 is always `#S`; user rules follow in declaration order,
/// then one `Token-<class>` rule per lexer class in registration order.
#[derive(Debug, Clone)]
pub struct Grammar {
    pub(crate) rules: Vec<Rule>,
    pub(crate) terminals: Vec<String>,
    pub(crate) classes: Vec<String>,
    pub(crate) class_rules: Vec<RuleId>,
    pub(crate) by_name: HashMap<String, RuleId>,
}

impl Grammar {
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn rule(&self, id: RuleId) -> &Rule {
        &self.rules[id.0]
    }

    pub fn rule_ids(&self) -> impl Iterator<Item = RuleId> {
        (0..self.rules.len()).map(RuleId)
    }

    pub fn find_rule(&self, name: &str) -> Option<RuleId> {
        self.by_name.get(name).copied()
    }

    pub fn start(&self) -> RuleId {
        RuleId::START
    }

    /// The `Token-EOF` rule, keying the accept action.
    pub fn eof(&self) -> RuleId {
        self.class_rules[ClassId::EOF.index()]
    }

    /// The `Token-<class>` rule generated for a lexer class.
    pub fn class_rule(&self, class: ClassId) -> Option<RuleId> {
        self.class_rules.get(class.index()).copied()
    }

    /// The name of a lexer class, if it was registered before the grammar was loaded.
    pub fn class_name(&self, class: ClassId) -> Option<&str> {
        self.classes.get(class.index()).map(String::as_str)
    }

    pub fn terminal(&self, id: TerminalId) -> &str {
        &self.terminals[id.0]
    }

    pub fn terminals(&self) -> impl Iterator<Item = (TerminalId, &str)> {
        self.terminals
            .iter()
            .enumerate()
            .map(|(i, t)| (TerminalId(i), t.as_str()))
    }

    /// Literal terminals and token-class rules: symbols the parser consumes input on.
    pub fn is_terminal(&self, symbol: Symbol) -> bool {
        match symbol {
            Symbol::Terminal(_) => true,
            Symbol::Rule(id) => self.rule(id).token_class().is_some(),
        }
    }

    pub fn is_epsilon(&self, symbol: Symbol) -> bool {
        symbol == Symbol::EPSILON
    }

    /// `"text"` for literals, `<Name>` for rules.
    pub fn symbol_name(&self, symbol: Symbol) -> String {
        match symbol {
            Symbol::Terminal(id) => format!("{:?}", self.terminal(id)),
            Symbol::Rule(id) => format!("<{}>", self.rule(id).name()),
        }
    }

    /// `Name ::= sym sym ...`, for messages and table dumps.
    pub fn describe_alternative(&self, rule: RuleId, alt: usize) -> String {
        let symbols: Vec<String> = self
            .rule(rule)
            .alternative(alt)
            .iter()
            .map(|s| self.symbol_name(*s))
            .collect();
        format!("{} ::= {}", self.rule(rule).name(), symbols.join(" "))
    }
}
