//! Property-based tests for tokenizing and parsing
//!
//! Generated inputs are built from the pieces a grammar accepts, so every case is
//! expected to tokenize and parse; the properties check what the results preserve.

use lrlang::{Language, Lexer, TokenClass};
use proptest::prelude::*;

fn addition() -> Language {
    let mut lexer = Lexer::new();
    lexer
        .add_token_classes([
            TokenClass::new("int", "[0-9]+").unwrap(),
            TokenClass::new("plus", r"\+").unwrap(),
        ])
        .unwrap();
    Language::new(
        lexer,
        r#"
        <S> ::= <E>
        <E> ::= <E> "+" <Token-int> | <Token-int>
        "#,
    )
    .unwrap()
}

/// Horizontal whitespace the lexer strips between tokens
fn gap_strategy() -> impl Strategy<Value = String> {
    prop_oneof!["", " ", "  ", "\t", " \t "].prop_map(String::from)
}

/// A sum like `12 +3+ 7`, with the operands it was built from
fn sum_strategy() -> impl Strategy<Value = (String, Vec<u32>)> {
    prop::collection::vec((0u32..10_000, gap_strategy(), gap_strategy()), 1..12).prop_map(
        |terms| {
            let mut text = String::new();
            let mut operands = Vec::new();
            for (i, (n, before, after)) in terms.into_iter().enumerate() {
                if i > 0 {
                    text.push_str(&before);
                    text.push('+');
                    text.push_str(&after);
                }
                text.push_str(&n.to_string());
                operands.push(n);
            }
            (text, operands)
        },
    )
}

proptest! {
    #[test]
    fn prop_leaves_spell_the_input((input, _) in sum_strategy()) {
        let tree = addition().parse_tree(&input).unwrap();
        let stripped: String = input.chars().filter(|c| !c.is_whitespace()).collect();
        prop_assert_eq!(tree.leaves().concat(), stripped);
    }

    #[test]
    fn prop_tree_keeps_every_operand((input, operands) in sum_strategy()) {
        let tree = addition().parse_tree(&input).unwrap();
        let values: Vec<u32> = tree
            .leaves()
            .into_iter()
            .filter(|v| *v != "+")
            .map(|v| v.parse().unwrap())
            .collect();
        prop_assert_eq!(values, operands);
    }

    #[test]
    fn prop_left_recursion_nests_to_the_left((input, operands) in sum_strategy()) {
        let derivation = addition().derive(&input).unwrap();
        // one E per operand, then S
        prop_assert_eq!(derivation.reductions.len(), operands.len() + 1);
        let depth = std::iter::successors(Some(&derivation.tree), |node| node.children().first())
            .filter(|node| node.rule() == Some("E"))
            .count();
        prop_assert_eq!(depth, operands.len());
    }

    #[test]
    fn prop_token_spans_index_the_input((input, _) in sum_strategy()) {
        let result = addition().tokenize(&input);
        prop_assert!(result.success);
        prop_assert!(result.remainder.is_empty());
        for token in &result.tokens {
            prop_assert_eq!(&input[token.span.clone()], token.value.as_str());
        }
        for pair in result.tokens.windows(2) {
            prop_assert!(pair[0].span.end <= pair[1].span.start);
        }
    }

    #[test]
    fn prop_whitespace_only_input_has_no_tokens(input in "[ \t]{0,16}") {
        let result = addition().tokenize(&input);
        prop_assert!(result.success);
        prop_assert!(result.tokens.is_empty());
    }

    #[test]
    fn prop_never_class_matches_nothing(input in "\\PC{1,24}") {
        let class = TokenClass::never("nothing");
        prop_assert_eq!(class.matches(&input), None);
    }

    #[test]
    fn prop_lexer_without_patterns_rejects_text(input in "[a-z0-9+*]{1,16}") {
        let mut lexer = Lexer::new();
        lexer.add_token_class(TokenClass::never("nothing")).unwrap();
        let result = lexer.tokenize(&input);
        prop_assert!(!result.success);
        prop_assert!(result.tokens.is_empty());
        prop_assert_eq!(result.remainder, input);
    }
}

#[test]
fn test_empty_input_tokenizes_to_nothing() {
    let result = addition().tokenize("");
    assert!(result.success);
    assert!(result.tokens.is_empty());
    assert!(result.remainder.is_empty());
}
