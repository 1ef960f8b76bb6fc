//! A lexer and a parser bound together.

use crate::error::{BuildError, ParseError};
use crate::lexing::{Lexer, Tokenized};
use crate::parsing::{Derivation, Node, Parser};

/// A tokenizer configuration and a grammar over its classes.
///
/// ```rust,ignore
/// let mut lexer = Lexer::new();
/// lexer.add_token_class(TokenClass::new("int", "[0-9]+")?)?;
/// let language = Language::new(lexer, r#"<E> ::= <E> "+" <Token-int> | <Token-int>"#)?;
/// let ast = language.parse("1 + 2")?;
/// ```
#[derive(Debug, Clone)]
pub struct Language {
    lexer: Lexer,
    parser: Parser,
}

impl Language {
    pub fn new(lexer: Lexer, bnf: &str) -> Result<Self, BuildError> {
        let parser = Parser::new(&lexer, bnf)?;
        Ok(Self { lexer, parser })
    }

    pub fn lexer(&self) -> &Lexer {
        &self.lexer
    }

    pub fn parser(&self) -> &Parser {
        &self.parser
    }

    pub fn tokenize(&self, input: &str) -> Tokenized {
        self.lexer.tokenize(input)
    }

    /// Tokenize and parse `input`, keeping the concrete tree and the reduction log.
    pub fn derive(&self, input: &str) -> Result<Derivation, ParseError> {
        let tokenized = self.lexer.tokenize(input);
        if !tokenized.success {
            return Err(ParseError::Tokenize(tokenized));
        }
        self.parser.derive(&tokenized.tokens)
    }

    pub fn parse_tree(&self, input: &str) -> Result<Node, ParseError> {
        self.derive(input).map(|d| d.tree)
    }

    /// Tokenize and parse `input` into an AST.
    pub fn parse(&self, input: &str) -> Result<Node, ParseError> {
        self.parse_tree(input).map(Node::into_ast)
    }
}
