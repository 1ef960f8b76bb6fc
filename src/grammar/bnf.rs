//! Surface tokens of the BNF dialect, produced with logos.

use logos::Logos;

#[derive(Logos, Debug, Clone, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum BnfToken {
    #[token("::=")]
    Define,

    #[token("|")]
    Pipe,

    /// `<Name>`, without the angle brackets
    #[regex(r"<[^<>]*>", strip_delimiters)]
    Reference(String),

    /// `"text"` or `'text'`, without the quotes
    #[regex(r#""[^"]*""#, strip_delimiters)]
    #[regex(r"'[^']*'", strip_delimiters)]
    Literal(String),
}

fn strip_delimiters(lex: &mut logos::Lexer<BnfToken>) -> String {
    let slice = lex.slice();
    slice[1..slice.len() - 1].to_string()
}

/// Lex one rule definition. On failure returns the byte offset of the offending input.
pub fn tokenize(definition: &str) -> Result<Vec<BnfToken>, usize> {
    let mut lexer = BnfToken::lexer(definition);
    let mut tokens = Vec::new();
    while let Some(result) = lexer.next() {
        match result {
            Ok(token) => tokens.push(token),
            Err(()) => return Err(lexer.span().start),
        }
    }
    Ok(tokens)
}

/// Whether `line` opens a rule definition (`<Name> ::=`) rather than continuing one.
pub fn starts_definition(line: &str) -> bool {
    let mut lexer = BnfToken::lexer(line);
    matches!(
        (lexer.next(), lexer.next()),
        (Some(Ok(BnfToken::Reference(_))), Some(Ok(BnfToken::Define)))
    )
}
