//! Setup failures and parse errors

use lrlang::{BuildError, ConfigError, ConflictError, Language, Lexer, ParseError, TokenClass};
use rstest::rstest;

fn lexer() -> Lexer {
    let mut lexer = Lexer::new();
    lexer
        .add_token_classes([
            TokenClass::new("int", "[0-9]+").unwrap(),
            TokenClass::new("id", "[a-z]+").unwrap(),
            TokenClass::new("punct", r"[;=+]").unwrap(),
        ])
        .unwrap();
    lexer
}

fn config_error(bnf: &str) -> ConfigError {
    match Language::new(lexer(), bnf) {
        Err(BuildError::Config(err)) => err,
        other => panic!("expected a configuration error, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_missing_define_everywhere() {
    let err = config_error("<S> <E>\n<E> <Token-int>");
    assert!(matches!(err, ConfigError::InvalidBnf { line: 1, .. }));
}

#[rstest]
#[case("<S> ::= <Missing>", ConfigError::UnresolvedRule("Missing".to_string()))]
#[case("<S> ::= <Token-float>", ConfigError::UnresolvedRule("Token-float".to_string()))]
#[case("<9lives> ::= \"x\"", ConfigError::InvalidRuleName("9lives".to_string()))]
#[case("<S> ::= <under_score>", ConfigError::InvalidRuleName("under_score".to_string()))]
#[case("<S> ::= \"a\" | | \"b\"", ConfigError::EmptyAlternative { rule: "S".to_string() })]
#[case("<S> ::= \"a\"\n<S> ::= \"b\"", ConfigError::DuplicateRule("S".to_string()))]
#[case("", ConfigError::NoRules)]
fn test_configuration_errors(#[case] bnf: &str, #[case] expected: ConfigError) {
    assert_eq!(config_error(bnf), expected);
}

#[test]
fn test_unresolved_rule_message() {
    assert_eq!(
        config_error("<S> ::= <Missing>").to_string(),
        "\"Missing\" is not a valid rule"
    );
}

#[test]
fn test_reduce_reduce_conflict() {
    let result = Language::new(
        lexer(),
        r#"
        <S> ::= <A> | <B>
        <A> ::= <Token-id>
        <B> ::= <Token-id>
        "#,
    );
    let Err(BuildError::Conflict(ConflictError::ReduceReduce {
        lookahead,
        existing,
        incoming,
        ..
    })) = result
    else {
        panic!("expected a reduce-reduce conflict");
    };
    assert_eq!(lookahead, "<Token-EOF>");
    assert_eq!(existing, "reduce A ::= <Token-id>");
    assert_eq!(incoming, "reduce B ::= <Token-id>");
}

fn statements() -> Language {
    Language::new(
        lexer(),
        r#"
        <Program> ::= <Program> <Line> | <Line>
        <Line> ::= <Statement> <Token-EOL> | <Statement> ";"
        <Statement> ::= <Token-id> "=" <Value>
        <Value> ::= <Token-int> | <Value> "+" <Token-int>
        "#,
    )
    .unwrap()
}

#[test]
fn test_multiline_program_parses() {
    let tree = statements().parse_tree("a = 1\nb = 2 + 3;").unwrap();
    assert_eq!(
        tree.leaves(),
        vec!["a", "=", "1", "\n", "b", "=", "2", "+", "3", ";"]
    );
}

#[rstest]
#[case("a = = 1", "=", 1, 5)]
#[case("a = 1\nb 2\n", "2", 2, 3)]
#[case("a = 1\n\n\nb = 2;  c c", "c", 4, 11)]
fn test_syntax_error_location(
    #[case] input: &str,
    #[case] value: &str,
    #[case] line: usize,
    #[case] column: usize,
) {
    let err = statements().parse(input).unwrap_err();
    let ParseError::Syntax {
        token,
        line: at_line,
        column: at_column,
    } = err.clone()
    else {
        panic!("expected a syntax error, got {:?}", err);
    };
    assert_eq!(token.value, value);
    assert_eq!((at_line, at_column), (line, column));
}

#[test]
fn test_truncated_input() {
    assert_eq!(
        statements().parse("a = 1 +").unwrap_err(),
        ParseError::UnexpectedEof
    );
}
