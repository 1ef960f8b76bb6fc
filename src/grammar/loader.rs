//! Grammar loading
//!
//! Turns BNF text into a resolved [Grammar]. Loading fails fast: the first malformed
//! definition, bad name, or unresolved reference aborts with a [ConfigError], before any
//! table construction is attempted.

use crate::error::ConfigError;
use crate::grammar::bnf::{self, BnfToken};
use crate::grammar::rule::{
    Grammar, Rule, RuleId, RuleKind, Symbol, TerminalId, START_RULE, TOKEN_RULE_PREFIX,
};
use crate::lexing::Lexer;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

static RULE_NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9-]*$").unwrap());

/// A symbol before name resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Pending {
    Reference(String),
    Literal(String),
}

#[derive(Debug)]
struct Definition {
    name: String,
    alternatives: Vec<Vec<Pending>>,
}

/// Loads grammar text against the token classes of a lexer.
pub struct GrammarLoader<'a> {
    lexer: &'a Lexer,
}

impl<'a> GrammarLoader<'a> {
    pub fn new(lexer: &'a Lexer) -> Self {
        Self { lexer }
    }

    pub fn load(&self, bnf: &str) -> Result<Grammar, ConfigError> {
        let definitions = merge_lines(bnf)?
            .into_iter()
            .map(|(line, text)| parse_definition(line, &text))
            .collect::<Result<Vec<_>, _>>()?;
        if definitions.is_empty() {
            return Err(ConfigError::NoRules);
        }

        let mut builder = Builder::default();
        builder.intern("");
        builder.push_rule(START_RULE.to_string(), RuleKind::Start)?;
        for definition in &definitions {
            builder.push_rule(definition.name.clone(), RuleKind::Defined)?;
        }
        for (class, token_class) in self.lexer.classes() {
            let id = builder.push_rule(
                format!("{}{}", TOKEN_RULE_PREFIX, token_class.name()),
                RuleKind::TokenClass(class),
            )?;
            builder.classes.push(token_class.name().to_string());
            builder.class_rules.push(id);
        }

        builder.rules[RuleId::START.0].alternatives = vec![vec![Symbol::Rule(RuleId(1))]];
        for (offset, definition) in definitions.iter().enumerate() {
            let alternatives = definition
                .alternatives
                .iter()
                .map(|alt| alt.iter().map(|p| builder.resolve(p)).collect())
                .collect::<Result<Vec<Vec<Symbol>>, _>>()?;
            builder.rules[offset + 1].alternatives = alternatives;
        }

        log::debug!(
            "loaded grammar: {} rules ({} declared), {} literal terminals",
            builder.rules.len(),
            definitions.len(),
            builder.terminals.len() - 1
        );
        Ok(builder.finish())
    }
}

impl Grammar {
    /// Load grammar text against `lexer`'s token classes.
    pub fn from_text(bnf: &str, lexer: &Lexer) -> Result<Grammar, ConfigError> {
        GrammarLoader::new(lexer).load(bnf)
    }
}

#[derive(Default)]
struct Builder {
    rules: Vec<Rule>,
    terminals: Vec<String>,
    terminal_index: HashMap<String, TerminalId>,
    classes: Vec<String>,
    class_rules: Vec<RuleId>,
    by_name: HashMap<String, RuleId>,
}

impl Builder {
    fn push_rule(&mut self, name: String, kind: RuleKind) -> Result<RuleId, ConfigError> {
        if self.by_name.contains_key(&name) {
            return Err(ConfigError::DuplicateRule(name));
        }
        let id = RuleId(self.rules.len());
        self.by_name.insert(name.clone(), id);
        self.rules.push(Rule {
            name,
            kind,
            alternatives: Vec::new(),
        });
        Ok(id)
    }

    /// The first literal interned is always `""`.
    fn intern(&mut self, literal: &str) -> TerminalId {
        if let Some(id) = self.terminal_index.get(literal) {
            return *id;
        }
        let id = TerminalId(self.terminals.len());
        self.terminals.push(literal.to_string());
        self.terminal_index.insert(literal.to_string(), id);
        id
    }

    fn resolve(&mut self, pending: &Pending) -> Result<Symbol, ConfigError> {
        match pending {
            Pending::Literal(text) => Ok(Symbol::Terminal(self.intern(text))),
            Pending::Reference(name) => self
                .by_name
                .get(name)
                .filter(|id| id.0 != RuleId::START.0)
                .map(|id| Symbol::Rule(*id))
                .ok_or_else(|| ConfigError::UnresolvedRule(name.clone())),
        }
    }

    fn finish(self) -> Grammar {
        Grammar {
            rules: self.rules,
            terminals: self.terminals,
            classes: self.classes,
            class_rules: self.class_rules,
            by_name: self.by_name,
        }
    }
}

/// Join continuation lines onto the definition they belong to.
///
/// Returns each definition with the 1-based line it starts on.
fn merge_lines(bnf: &str) -> Result<Vec<(usize, String)>, ConfigError> {
    let mut definitions: Vec<(usize, String)> = Vec::new();
    for (index, raw) in bnf.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        if bnf::starts_definition(line) {
            definitions.push((index + 1, line.to_string()));
        } else if let Some((_, current)) = definitions.last_mut() {
            current.push(' ');
            current.push_str(line);
        } else {
            return Err(ConfigError::InvalidBnf {
                line: index + 1,
                reason: "expected a rule definition `<Name> ::= ...`".to_string(),
            });
        }
    }
    Ok(definitions)
}

fn parse_definition(line: usize, text: &str) -> Result<Definition, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidBnf { line, reason };

    let tokens = bnf::tokenize(text).map_err(|offset| {
        let near: String = text[offset..].chars().take(12).collect();
        invalid(format!("unexpected input near {:?}", near))
    })?;

    let mut tokens = tokens.into_iter();
    let name = match (tokens.next(), tokens.next()) {
        (Some(BnfToken::Reference(name)), Some(BnfToken::Define)) => name,
        _ => return Err(invalid("expected `<Name> ::=` at the start".to_string())),
    };
    check_name(&name)?;

    let mut alternatives = vec![Vec::new()];
    for token in tokens {
        match token {
            BnfToken::Pipe => alternatives.push(Vec::new()),
            BnfToken::Reference(reference) => {
                check_name(&reference)?;
                if let Some(current) = alternatives.last_mut() {
                    current.push(Pending::Reference(reference));
                }
            }
            BnfToken::Literal(literal) => {
                if let Some(current) = alternatives.last_mut() {
                    current.push(Pending::Literal(literal));
                }
            }
            BnfToken::Define => return Err(invalid("unexpected `::=`".to_string())),
        }
    }

    if alternatives.iter().any(Vec::is_empty) {
        return Err(ConfigError::EmptyAlternative { rule: name });
    }
    Ok(Definition { name, alternatives })
}

fn check_name(name: &str) -> Result<(), ConfigError> {
    if RULE_NAME.is_match(name) {
        Ok(())
    } else {
        Err(ConfigError::InvalidRuleName(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexing::TokenClass;

    fn lexer() -> Lexer {
        let mut lexer = Lexer::new();
        lexer
            .add_token_class(TokenClass::new("int", "[0-9]+").unwrap())
            .unwrap();
        lexer
    }

    fn load(bnf: &str) -> Result<Grammar, ConfigError> {
        GrammarLoader::new(&lexer()).load(bnf)
    }

    #[test]
    fn test_rule_layout() {
        let g = load("<S> ::= <E>\n<E> ::= <E> \"+\" <Token-int> | <Token-int>").unwrap();
        let names: Vec<&str> = g.rules().iter().map(Rule::name).collect();
        assert_eq!(
            names,
            vec!["#S", "S", "E", "Token-EOL", "Token-EOF", "Token-int"]
        );
        let start = g.rule(g.start());
        assert_eq!(start.alternatives().len(), 1);
        assert_eq!(start.alternative(0), &[Symbol::Rule(RuleId(1))]);
        assert_eq!(start.kind(), RuleKind::Start);
    }

    #[test]
    fn test_alternatives_and_interned_literals() {
        let g = load(r#"<E> ::= <E> "+" <Token-int> | "+" | 'x'"#).unwrap();
        let e = g.rule(g.find_rule("E").unwrap());
        assert_eq!(e.alternatives().len(), 3);
        assert_eq!(e.alternative(0)[1], e.alternative(1)[0]);
        let Symbol::Terminal(x) = e.alternative(2)[0] else {
            panic!("expected a literal");
        };
        assert_eq!(g.terminal(x), "x");
    }

    #[test]
    fn test_continuation_lines() {
        let bnf = "
            <List> ::= <List> \",\" <Item>
                     | <Item>
            <Item> ::= <Token-int>
        ";
        let g = load(bnf).unwrap();
        assert_eq!(g.rule(g.find_rule("List").unwrap()).alternatives().len(), 2);
    }

    #[test]
    fn test_define_symbol_inside_a_continuation_literal() {
        let g = load("<S> ::= \"a\"\n       | \"::=\"").unwrap();
        let s = g.rule(g.find_rule("S").unwrap());
        assert_eq!(s.alternatives().len(), 2);
        let Symbol::Terminal(define) = s.alternative(1)[0] else {
            panic!("expected a literal");
        };
        assert_eq!(g.terminal(define), "::=");
    }

    #[test]
    fn test_epsilon_literal_is_the_epsilon_terminal() {
        let g = load(r#"<A> ::= "a" <A> | """#).unwrap();
        let a = g.rule(g.find_rule("A").unwrap());
        assert_eq!(a.alternative(1), &[Symbol::EPSILON]);
    }

    #[test]
    fn test_missing_define_on_every_line() {
        let err = load("<S> <E>\n<E> \"x\"").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBnf { line: 1, .. }));
    }

    #[test]
    fn test_empty_grammar() {
        assert_eq!(load("\n  \n").unwrap_err(), ConfigError::NoRules);
    }

    #[test]
    fn test_unresolved_reference() {
        assert_eq!(
            load("<S> ::= <Missing>").unwrap_err(),
            ConfigError::UnresolvedRule("Missing".to_string())
        );
    }

    #[test]
    fn test_start_rule_cannot_be_referenced() {
        assert!(matches!(
            load("<S> ::= <#S>").unwrap_err(),
            ConfigError::InvalidRuleName(_)
        ));
    }

    #[test]
    fn test_invalid_rule_names() {
        assert_eq!(
            load("<1abc> ::= \"x\"").unwrap_err(),
            ConfigError::InvalidRuleName("1abc".to_string())
        );
        assert_eq!(
            load("<S> ::= <has space>").unwrap_err(),
            ConfigError::InvalidRuleName("has space".to_string())
        );
    }

    #[test]
    fn test_empty_alternative() {
        assert_eq!(
            load(r#"<S> ::= "a" |"#).unwrap_err(),
            ConfigError::EmptyAlternative {
                rule: "S".to_string()
            }
        );
        assert!(matches!(
            load("<S> ::=").unwrap_err(),
            ConfigError::EmptyAlternative { .. }
        ));
    }

    #[test]
    fn test_duplicate_rules() {
        assert_eq!(
            load("<S> ::= \"a\"\n<S> ::= \"b\"").unwrap_err(),
            ConfigError::DuplicateRule("S".to_string())
        );
        assert_eq!(
            load("<Token-int> ::= \"a\"").unwrap_err(),
            ConfigError::DuplicateRule("Token-int".to_string())
        );
    }

    #[test]
    fn test_garbage_reports_its_line() {
        let err = load("<S> ::= \"a\"\n\n<T> ::= ??").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBnf { line: 3, .. }));
    }
}
