//! End-to-end parsing of arithmetic grammars

use lrlang::{Language, Lexer, Node, ParseError, TokenClass};
use rstest::rstest;

fn addition() -> Language {
    let mut lexer = Lexer::new();
    lexer
        .add_token_class(TokenClass::new("int", "[0-9]+").unwrap())
        .unwrap();
    lexer
        .add_token_class(TokenClass::new("plus", r"\+").unwrap())
        .unwrap();
    Language::new(
        lexer,
        r#"
        <S> ::= <E>
        <E> ::= <E> "+" <T> | <T>
        <T> ::= <Token-int>
        "#,
    )
    .unwrap()
}

/// Every branch left in the AST of `addition` is a sum.
fn sum(node: &Node) -> i64 {
    match node {
        Node::Leaf { value, .. } => value.parse().unwrap(),
        Node::Branch { children, .. } => children.iter().map(sum).sum(),
    }
}

#[test]
fn test_addition_folds_left() {
    let ast = addition().parse("1+2+3").unwrap();
    assert_eq!(sum(&ast), 6);

    let int = |v: &str| Node::leaf(v, Some("int".to_string()));
    assert_eq!(
        ast,
        Node::branch(
            "E",
            vec![Node::branch("E", vec![int("1"), int("2")]), int("3")]
        )
    );
}

#[test]
fn test_single_operand_collapses_to_leaf() {
    assert_eq!(
        addition().parse("42").unwrap(),
        Node::leaf("42", Some("int".to_string()))
    );
}

#[test]
fn test_reduction_order() {
    let language = addition();
    let derivation = language.derive("1+2").unwrap();
    let grammar = language.parser().grammar();
    let steps: Vec<String> = derivation
        .reductions
        .iter()
        .map(|r| grammar.describe_alternative(r.rule, r.alt))
        .collect();
    assert_eq!(
        steps,
        vec![
            "T ::= <Token-int>",
            "E ::= <T>",
            "T ::= <Token-int>",
            r#"E ::= <E> "+" <T>"#,
            "S ::= <E>",
        ]
    );
}

#[test]
fn test_long_sum_parses_to_a_deep_ast() {
    let terms = 100_000;
    let input = vec!["1"; terms].join("+");
    let ast = addition().parse(&input).unwrap();
    let total: i64 = ast.leaves().iter().map(|v| v.parse::<i64>().unwrap()).sum();
    assert_eq!(total, terms as i64);
    assert_eq!(ast.rule(), Some("E"));
}

#[rstest]
#[case("1+", ParseError::UnexpectedEof)]
#[case("", ParseError::UnexpectedEof)]
fn test_incomplete_input(#[case] input: &str, #[case] expected: ParseError) {
    assert_eq!(addition().parse(input).unwrap_err(), expected);
}

#[test]
fn test_misplaced_operator() {
    let err = addition().parse("1 + + 2").unwrap_err();
    let ParseError::Syntax {
        token,
        line,
        column,
    } = err
    else {
        panic!("expected a syntax error");
    };
    assert_eq!(token.value, "+");
    assert_eq!((line, column), (1, 5));
}

fn calculator() -> Language {
    let mut lexer = Lexer::new();
    lexer
        .add_token_class(TokenClass::new("num", r"[0-9]+(\.[0-9]+)?").unwrap())
        .unwrap();
    lexer
        .add_token_class(TokenClass::new("op", r"[-+*/()]").unwrap())
        .unwrap();
    Language::new(
        lexer,
        r#"
        <Expr>   ::= <Expr> "+" <Term> | <Expr> "-" <Term> | <Term>
        <Term>   ::= <Term> "*" <Factor> | <Term> "/" <Factor> | <Factor>
        <Factor> ::= <Token-num> | "(" <Expr> ")"
        "#,
    )
    .unwrap()
}

/// Evaluates the concrete tree, where operator leaves are still present.
fn eval(node: &Node) -> f64 {
    match node {
        Node::Leaf { value, .. } => value.parse().unwrap(),
        Node::Branch { children, .. } => match children.as_slice() {
            [single] => eval(single),
            [open, inner, _] if open.value() == Some("(") => eval(inner),
            [lhs, op, rhs] => match op.value() {
                Some("+") => eval(lhs) + eval(rhs),
                Some("-") => eval(lhs) - eval(rhs),
                Some("*") => eval(lhs) * eval(rhs),
                Some("/") => eval(lhs) / eval(rhs),
                other => panic!("unknown operator {:?}", other),
            },
            _ => panic!("unexpected node {:?}", node),
        },
    }
}

#[rstest]
#[case("1 + 2 * 3", 7.0)]
#[case("(1 + 2) * 3", 9.0)]
#[case("10 - 4 - 3", 3.0)]
#[case("8 / 2 / 2", 2.0)]
#[case("2 * (3 + 4) - 5", 9.0)]
#[case("1.5 * 4", 6.0)]
fn test_precedence_and_associativity(#[case] input: &str, #[case] expected: f64) {
    let tree = calculator().parse_tree(input).unwrap();
    assert_eq!(eval(&tree), expected);
}

#[test]
fn test_calculator_is_conflict_free() {
    let language = calculator();
    assert!(language
        .parser()
        .table()
        .resolved_conflicts()
        .is_empty());
}

#[test]
fn test_unbalanced_parenthesis() {
    assert_eq!(
        calculator().parse("(1 + 2").unwrap_err(),
        ParseError::UnexpectedEof
    );
    assert!(matches!(
        calculator().parse("1 + 2)"),
        Err(ParseError::Syntax { .. })
    ));
}
