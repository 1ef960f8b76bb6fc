use crate::error::{BuildError, ConflictError, ParseError};
use crate::grammar::{Grammar, GrammarLoader};
use crate::lexing::{Lexer, Token};
use crate::parsing::engine::{Derivation, ParseEngine};
use crate::parsing::node::Node;
use crate::tables::{ParseTable, ParserTables};

/// A grammar with its tables built.
#[derive(Debug, Clone)]
pub struct Parser {
    grammar: Grammar,
    tables: ParserTables,
}

impl Parser {
    /// Load `bnf` against `lexer`'s token classes and build the tables.
    pub fn new(lexer: &Lexer, bnf: &str) -> Result<Self, BuildError> {
        let grammar = GrammarLoader::new(lexer).load(bnf)?;
        Ok(Self::from_grammar(grammar)?)
    }

    pub fn from_grammar(grammar: Grammar) -> Result<Self, ConflictError> {
        let tables = ParserTables::build(&grammar)?;
        Ok(Self { grammar, tables })
    }

    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    pub fn tables(&self) -> &ParserTables {
        &self.tables
    }

    pub fn table(&self) -> &ParseTable {
        &self.tables.table
    }

    /// Parse a token stream, keeping the concrete tree and the reduction log.
    pub fn derive(&self, tokens: &[Token]) -> Result<Derivation, ParseError> {
        ParseEngine::new(&self.grammar, &self.tables.table).run(tokens)
    }

    /// The concrete parse tree, before AST reduction.
    pub fn parse_tree(&self, tokens: &[Token]) -> Result<Node, ParseError> {
        self.derive(tokens).map(|d| d.tree)
    }

    /// Parse a token stream into an AST.
    pub fn parse_tokens(&self, tokens: &[Token]) -> Result<Node, ParseError> {
        self.parse_tree(tokens).map(Node::into_ast)
    }
}
