//! Lexer tests over whole templates.

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use starscript::{lex_all, TokenKind};

fn kinds(source: &str) -> Vec<TokenKind> {
    lex_all(source).into_iter().map(|t| t.kind).collect()
}

#[test]
fn test_template_token_stream() {
    assert_eq!(
        kinds("Hi {user.name}!"),
        vec![
            TokenKind::String,
            TokenKind::LeftBrace,
            TokenKind::Identifier,
            TokenKind::Dot,
            TokenKind::Identifier,
            TokenKind::RightBrace,
            TokenKind::String,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_sections_in_text_and_expressions() {
    assert_eq!(
        kinds("#1 a {#2 b}"),
        vec![
            TokenKind::Section,
            TokenKind::String,
            TokenKind::LeftBrace,
            TokenKind::Section,
            TokenKind::Identifier,
            TokenKind::RightBrace,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_shift_and_comparison_operators() {
    assert_eq!(
        kinds("{a << 1 >= b >> 2}"),
        vec![
            TokenKind::LeftBrace,
            TokenKind::Identifier,
            TokenKind::DoubleLess,
            TokenKind::Number,
            TokenKind::GreaterEqual,
            TokenKind::Identifier,
            TokenKind::DoubleGreater,
            TokenKind::Number,
            TokenKind::RightBrace,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_escaped_text_is_unescaped_in_lexeme() {
    let tokens = lex_all("{{literal}} and ##3");
    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0].lexeme, "{literal}} and #3");
}

proptest! {
    #[test]
    fn plain_text_is_one_token(text in "[^{#]{1,40}") {
        let tokens = lex_all(&text);
        prop_assert_eq!(tokens.len(), 2);
        prop_assert_eq!(tokens[0].kind, TokenKind::String);
        prop_assert_eq!(&tokens[0].lexeme, &text);
    }
}
