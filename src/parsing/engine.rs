use crate::automaton::ItemSetId;
use crate::error::ParseError;
use crate::grammar::{Grammar, RuleId, Symbol, TerminalId};
use crate::lexing::{ClassId, Token};
use crate::parsing::node::Node;
use crate::tables::{Action, ParseTable};
use serde::Serialize;

/// One reduction performed during a parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Reduction {
    pub rule: RuleId,
    pub alt: usize,
}

/// The result of a successful parse: the concrete tree and the reductions that built it,
/// in the order they happened.
#[derive(Debug, Clone, PartialEq)]
pub struct Derivation {
    pub tree: Node,
    pub reductions: Vec<Reduction>,
}

/// Per-parse stacks. `states` always holds one more entry than `nodes`.
struct ParseState {
    states: Vec<ItemSetId>,
    nodes: Vec<Node>,
    tokens: Vec<Token>,
    position: usize,
    reductions: Vec<Reduction>,
}

impl ParseState {
    fn new(tokens: &[Token]) -> Self {
        let mut tokens = tokens.to_vec();
        if !tokens.last().is_some_and(Token::is_eof) {
            let end = tokens.last().map_or(0, |t| t.span.end);
            tokens.push(Token::eof(end));
        }
        Self {
            states: vec![ItemSetId::START],
            nodes: Vec::new(),
            tokens,
            position: 0,
            reductions: Vec::new(),
        }
    }

    fn top(&self) -> ItemSetId {
        self.states.last().copied().unwrap_or(ItemSetId::START)
    }

    fn rest(&self) -> &[Token] {
        &self.tokens[self.position..]
    }
}

/// An action chosen for the upcoming input, with the number of tokens a shift takes.
#[derive(Debug, Clone, Copy)]
struct Step {
    action: Action,
    width: usize,
}

/// Drives a parse table over a token stream.
pub struct ParseEngine<'p> {
    grammar: &'p Grammar,
    table: &'p ParseTable,
}

impl<'p> ParseEngine<'p> {
    pub fn new(grammar: &'p Grammar, table: &'p ParseTable) -> Self {
        Self { grammar, table }
    }

    /// Run the shift-reduce loop. An end-of-input token is appended unless `tokens`
    /// already ends with one.
    pub fn run(&self, tokens: &[Token]) -> Result<Derivation, ParseError> {
        let mut state = ParseState::new(tokens);
        loop {
            let current = state.top();
            let Some(step) = self.select(current, state.rest()) else {
                return Err(self.unexpected(&state));
            };
            log::trace!(
                "state {} at token {}: {}",
                current.index(),
                state.position,
                step.action.describe(self.grammar)
            );

            match step.action {
                Action::Shift(target) => {
                    let leaf = self.leaf(&state.rest()[..step.width]);
                    state.position += step.width;
                    state.states.push(target);
                    state.nodes.push(leaf);
                }
                Action::Reduce { rule, alt } => self.reduce(&mut state, rule, alt)?,
                Action::Accept => {
                    return match (state.nodes.pop(), state.nodes.is_empty()) {
                        (Some(tree), true) => Ok(Derivation {
                            tree,
                            reductions: state.reductions,
                        }),
                        _ => Err(self.internal(format!(
                            "accept with {} nodes on the stack",
                            state.nodes.len() + 1
                        ))),
                    };
                }
            }
        }
    }

    fn select(&self, state: ItemSetId, rest: &[Token]) -> Option<Step> {
        let token = rest.first()?;
        if let Some(step) = self.select_literal(state, rest) {
            return Some(step);
        }
        if let Some(rule) = self.grammar.class_rule(token.class) {
            if let Some(action) = self.table.action(state, Symbol::Rule(rule)) {
                let width = usize::from(!token.is_eof());
                return Some(Step { action, width });
            }
        }
        self.table
            .action(state, Symbol::EPSILON)
            .map(|action| Step { action, width: 0 })
    }

    /// The longest literal keyed in `state` that the upcoming tokens spell out exactly.
    fn select_literal(&self, state: ItemSetId, rest: &[Token]) -> Option<Step> {
        self.table
            .row(state)
            .actions
            .iter()
            .filter_map(|(symbol, action)| match symbol {
                Symbol::Terminal(id) if *id != TerminalId::EPSILON => {
                    let literal = self.grammar.terminal(*id);
                    spelled_width(literal, rest).map(|width| (literal.len(), width, *action))
                }
                _ => None,
            })
            .max_by_key(|(length, _, _)| *length)
            .map(|(_, width, action)| Step { action, width })
    }

    fn leaf(&self, tokens: &[Token]) -> Node {
        match tokens {
            [] => Node::epsilon(),
            [token] => Node::leaf(
                token.value.clone(),
                self.grammar.class_name(token.class).map(str::to_string),
            ),
            _ => Node::leaf(tokens.iter().map(|t| t.value.as_str()).collect::<String>(), None),
        }
    }

    fn reduce(&self, state: &mut ParseState, rule: RuleId, alt: usize) -> Result<(), ParseError> {
        let width = self.grammar.rule(rule).alternative(alt).len();
        if state.nodes.len() < width {
            return Err(self.internal(format!(
                "reduce {} with {} nodes on the stack",
                self.grammar.describe_alternative(rule, alt),
                state.nodes.len()
            )));
        }
        let children = state.nodes.split_off(state.nodes.len() - width);
        state.states.truncate(state.states.len() - width);

        let Some(target) = self.table.goto(state.top(), rule) else {
            return Err(self.internal(format!(
                "no goto on {} from state {}",
                self.grammar.rule(rule).name(),
                state.top().index()
            )));
        };
        state.states.push(target);
        state
            .nodes
            .push(Node::branch(self.grammar.rule(rule).name(), children));
        state.reductions.push(Reduction { rule, alt });
        Ok(())
    }

    fn unexpected(&self, state: &ParseState) -> ParseError {
        match state.rest().first() {
            Some(token) if !token.is_eof() => {
                let (line, column) = location(&state.tokens, state.position);
                ParseError::Syntax {
                    token: token.clone(),
                    line,
                    column,
                }
            }
            _ => ParseError::UnexpectedEof,
        }
    }

    fn internal(&self, message: String) -> ParseError {
        log::error!("parse engine invariant broken: {}", message);
        ParseError::Internal(message)
    }
}

/// How many tokens from the front of `tokens` concatenate to exactly `literal`.
fn spelled_width(literal: &str, tokens: &[Token]) -> Option<usize> {
    let mut spelled = String::new();
    for (count, token) in tokens.iter().enumerate() {
        if token.is_eof() {
            return None;
        }
        spelled.push_str(&token.value);
        if spelled.len() >= literal.len() {
            return (spelled == literal).then_some(count + 1);
        }
        if !literal.starts_with(spelled.as_str()) {
            return None;
        }
    }
    None
}

/// 1-based line and column of `tokens[position]`, counted from the `EOL` tokens before it.
fn location(tokens: &[Token], position: usize) -> (usize, usize) {
    let mut line = 1;
    let mut line_start = 0;
    for token in &tokens[..position] {
        if token.class == ClassId::EOL {
            line += line_breaks(&token.value);
            line_start = token.span.end;
        }
    }
    let start = tokens.get(position).map_or(line_start, |t| t.span.start);
    (line, start.saturating_sub(line_start) + 1)
}

fn line_breaks(text: &str) -> usize {
    text.replace("\r\n", "\n")
        .chars()
        .filter(|c| matches!(c, '\n' | '\r'))
        .count()
        .max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(value: &str, start: usize) -> Token {
        Token::new(value, ClassId(2), start..start + value.len())
    }

    #[test]
    fn test_spelled_width() {
        let tokens = vec![token("<", 0), token("=", 1), token("x", 2), Token::eof(3)];
        assert_eq!(spelled_width("<", &tokens), Some(1));
        assert_eq!(spelled_width("<=", &tokens), Some(2));
        assert_eq!(spelled_width("<>", &tokens), None);
        assert_eq!(spelled_width("<=x!", &tokens), None);
    }

    #[test]
    fn test_whole_token_must_match() {
        let tokens = vec![token("forward", 0), Token::eof(7)];
        assert_eq!(spelled_width("for", &tokens), None);
        assert_eq!(spelled_width("forward", &tokens), Some(1));
    }

    #[test]
    fn test_location_counts_eol_tokens() {
        let tokens = vec![
            token("a", 0),
            Token::new("\n", ClassId::EOL, 1..2),
            token("b", 2),
            Token::new("\r\n\n", ClassId::EOL, 3..6),
            token("c", 6),
            token("d", 8),
        ];
        assert_eq!(location(&tokens, 0), (1, 1));
        assert_eq!(location(&tokens, 2), (2, 1));
        assert_eq!(location(&tokens, 5), (4, 3));
    }
}
