//! Arithmetic evaluator over the AST.
//!
//!     cargo run --example calc -- "2 * (3 + 4) - 5"

use lrlang::{Language, Lexer, Node, TokenClass};

const GRAMMAR: &str = r#"
<Expr>   ::= <Expr> "+" <Term> | <Expr> "-" <Term> | <Term>
<Term>   ::= <Term> "*" <Factor> | <Term> "/" <Factor> | <Factor>
<Factor> ::= <Token-num> | "(" <Expr> ")"
"#;

fn language() -> Result<Language, Box<dyn std::error::Error>> {
    let mut lexer = Lexer::new();
    lexer.add_token_class(TokenClass::new("num", r"[0-9]+(\.[0-9]+)?")?)?;
    lexer.add_token_class(TokenClass::new("op", r"[-+*/()]")?)?;
    Ok(Language::new(lexer, GRAMMAR)?)
}

/// Walks the concrete tree, since operator leaves do not survive into the AST.
fn eval(node: &Node) -> f64 {
    match node {
        Node::Leaf { value, .. } => value.parse().unwrap_or(0.0),
        Node::Branch { children, .. } => match children.as_slice() {
            [single] => eval(single),
            [open, inner, _] if open.value() == Some("(") => eval(inner),
            [lhs, op, rhs] => {
                let (lhs, rhs) = (eval(lhs), eval(rhs));
                match op.value() {
                    Some("+") => lhs + rhs,
                    Some("-") => lhs - rhs,
                    Some("*") => lhs * rhs,
                    Some("/") => lhs / rhs,
                    _ => f64::NAN,
                }
            }
            _ => f64::NAN,
        },
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let language = language()?;
    let input = std::env::args().skip(1).collect::<Vec<_>>().join(" ");
    let tree = language.parse_tree(&input)?;
    println!("{}", eval(&tree));
    Ok(())
}
