//! Grammars with empty alternatives and literals spelled over several tokens

use lrlang::{Language, Lexer, Node, ParseError, TokenClass};

fn int(value: &str) -> Node {
    Node::leaf(value, Some("int".to_string()))
}

fn list() -> Language {
    let mut lexer = Lexer::new();
    lexer
        .add_token_classes([
            TokenClass::new("int", "[0-9]+").unwrap(),
            TokenClass::new("comma", ",").unwrap(),
        ])
        .unwrap();
    Language::new(
        lexer,
        r#"
        <S> ::= <S> "," <E> | <E> | ""
        <E> ::= <Token-int>
        "#,
    )
    .unwrap()
}

#[test]
fn test_empty_input_is_an_empty_node() {
    let language = list();
    assert_eq!(language.parse("").unwrap(), Node::branch("S", vec![]));
    assert_eq!(
        language.parse_tree("").unwrap(),
        Node::branch("S", vec![Node::epsilon()])
    );
}

#[test]
fn test_left_nested_list() {
    let ast = list().parse("1,2,3").unwrap();
    assert_eq!(
        ast,
        Node::branch(
            "S",
            vec![Node::branch("S", vec![int("1"), int("2")]), int("3")]
        )
    );
    assert_eq!(ast.leaves(), vec!["1", "2", "3"]);
}

#[test]
fn test_leading_separator_uses_the_empty_alternative() {
    let ast = list().parse(",1").unwrap();
    assert_eq!(
        ast,
        Node::branch("S", vec![Node::branch("S", vec![]), int("1")])
    );
}

#[test]
fn test_trailing_separator_is_an_error() {
    assert_eq!(list().parse("1,").unwrap_err(), ParseError::UnexpectedEof);
}

/// A list that may only start empty: every element is preceded by a separator.
fn separated() -> Language {
    let mut lexer = Lexer::new();
    lexer
        .add_token_classes([
            TokenClass::new("int", "[0-9]+").unwrap(),
            TokenClass::new("comma", ",").unwrap(),
        ])
        .unwrap();
    Language::new(
        lexer,
        r#"
        <S> ::= <S> "," <E> | ""
        <E> ::= <Token-int>
        "#,
    )
    .unwrap()
}

#[test]
fn test_separated_list_accepts_empty_input() {
    assert_eq!(separated().parse("").unwrap(), Node::branch("S", vec![]));
}

#[test]
fn test_separated_list_nests_to_the_left() {
    let ast = separated().parse(",1,2").unwrap();
    assert_eq!(
        ast,
        Node::branch(
            "S",
            vec![
                Node::branch("S", vec![Node::branch("S", vec![]), int("1")]),
                int("2"),
            ]
        )
    );
}

#[test]
fn test_separated_list_rejects_a_leading_element() {
    let err = separated().parse("1,2,3").unwrap_err();
    let ParseError::Syntax {
        token,
        line,
        column,
    } = err.clone()
    else {
        panic!("expected a syntax error, got {:?}", err);
    };
    assert_eq!(token.value, "1");
    assert_eq!((line, column), (1, 1));
}

/// Turtle-graphics language: every non-digit character is its own token, so keywords
/// like `for` are spelled over several tokens.
fn logo() -> Language {
    let mut lexer = Lexer::new();
    lexer
        .add_token_classes([
            TokenClass::new("float", r"[0-9]+\.[0-9]+").unwrap(),
            TokenClass::new("int", "[0-9]+").unwrap(),
            TokenClass::new("char", r"\S").unwrap(),
        ])
        .unwrap();
    Language::new(
        lexer,
        r#"
        <Program> ::= <Program> <Expression> | ""
        <Expression> ::= <Command> | <For>
        <Command> ::= <Command-name> <Math>
        <Command-name> ::= "f" | "b" | "l" | "r"
        <For> ::= "for" <Math> "[" <Program> "]"
        <Math> ::= <Math> <PM> <T> | <T>
        <T> ::= <T> <MD> <H> | <H>
        <H> ::= <H> "^" <F> | <F>
        <PM> ::= "+" | "-"
        <MD> ::= "*" | "/"
        <F> ::= "(" <Math> ")" | <Token-int> | <Token-float>
        "#,
    )
    .unwrap()
}

#[test]
fn test_logo_table_has_no_conflicts() {
    let language = logo();
    assert!(language
        .parser()
        .table()
        .resolved_conflicts()
        .is_empty());
}

#[test]
fn test_keyword_spelled_by_single_characters() {
    let tree = logo().parse_tree("for 4 [ f 10 ]").unwrap();
    let Node::Branch { children, .. } = &tree else {
        panic!("expected a branch");
    };
    let expression = &children[1];
    let for_node = &expression.children()[0];
    assert_eq!(for_node.rule(), Some("For"));
    // "f", "o", "r" became one synthetic leaf
    assert_eq!(for_node.children()[0], Node::leaf("for", None));
}

#[test]
fn test_logo_program_ast() {
    let ast = logo().parse("f 1 r 90").unwrap();
    let char = |v: &str| Node::leaf(v, Some("char".to_string()));
    assert_eq!(
        ast,
        Node::branch(
            "Program",
            vec![
                Node::branch(
                    "Program",
                    vec![
                        Node::branch("Program", vec![]),
                        Node::branch("Command", vec![char("f"), int("1")]),
                    ]
                ),
                Node::branch("Command", vec![char("r"), int("90")]),
            ]
        )
    );
}

#[test]
fn test_logo_nested_loop() {
    let ast = logo().parse("for 2 [ for 3 [ f 1.5 ] l 90 ]").unwrap();
    assert_eq!(ast.leaves(), vec!["2", "3", "f", "1.5", "l", "90"]);
}

#[test]
fn test_empty_program() {
    assert_eq!(logo().parse("").unwrap(), Node::branch("Program", vec![]));
}
