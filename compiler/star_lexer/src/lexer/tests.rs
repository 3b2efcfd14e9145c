use super::*;
use crate::lex_all;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn kinds(source: &str) -> Vec<TokenKind> {
    lex_all(source).into_iter().map(|t| t.kind).collect()
}

fn lexemes(source: &str) -> Vec<String> {
    lex_all(source).into_iter().map(|t| t.lexeme).collect()
}

#[test]
fn test_empty_source() {
    assert_eq!(kinds(""), vec![TokenKind::Eof]);
}

#[test]
fn test_text_and_expression() {
    use TokenKind::{Eof, Identifier, LeftBrace, RightBrace, String};
    assert_eq!(
        kinds("Hello {name}!"),
        vec![String, LeftBrace, Identifier, RightBrace, String, Eof]
    );
    assert_eq!(lexemes("Hello {name}!"), vec!["Hello ", "{", "name", "}", "!", ""]);
}

#[test]
fn test_escapes_collapse() {
    let tokens = lex_all("a {{b}} ## c");
    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(tokens[0].lexeme, "a {b}} # c");
    assert_eq!(tokens[0].span, Span::new(0, 12));
}

#[test]
fn test_escaped_brace_before_expression() {
    use TokenKind::{Eof, Identifier, LeftBrace, RightBrace, String};
    assert_eq!(kinds("{{{x}"), vec![String, LeftBrace, Identifier, RightBrace, Eof]);
    assert_eq!(lexemes("{{{x}")[0], "{");
}

#[test]
fn test_section_markers_in_text() {
    use TokenKind::{Eof, Identifier, LeftBrace, RightBrace, Section, String};
    assert_eq!(
        kinds("#0{a}#12 tail"),
        vec![Section, LeftBrace, Identifier, RightBrace, Section, String, Eof]
    );
    let tokens = lex_all("#0{a}#12 tail");
    assert_eq!(tokens[0].lexeme, "0");
    assert_eq!(tokens[4].lexeme, "12");
}

#[test]
fn test_hash_without_digit_is_text() {
    assert_eq!(lexemes("#a #"), vec!["#a #", ""]);
}

#[test]
fn test_operators() {
    use TokenKind::*;
    assert_eq!(
        kinds("{+ - * / % ^ = == ! != > >= >> < <= << . , ? : ( )}"),
        vec![
            LeftBrace,
            Plus,
            Minus,
            Star,
            Slash,
            Percent,
            UpArrow,
            Equal,
            EqualEqual,
            Bang,
            BangEqual,
            Greater,
            GreaterEqual,
            DoubleGreater,
            Less,
            LessEqual,
            DoubleLess,
            Dot,
            Comma,
            QuestionMark,
            Colon,
            LeftParen,
            RightParen,
            RightBrace,
            Eof,
        ]
    );
}

#[test]
fn test_keywords_and_identifiers() {
    use TokenKind::*;
    assert_eq!(
        kinds("{null true false and or nullable _x1}"),
        vec![LeftBrace, Null, True, False, And, Or, Identifier, Identifier, RightBrace, Eof]
    );
}

#[test]
fn test_numbers() {
    assert_eq!(lexemes("{12 3.25 4.}")[1..4], ["12", "3.25", "4"]);
    assert_eq!(kinds("{4.}")[2], TokenKind::Dot);
}

#[test]
fn test_strings_with_escapes() {
    let tokens = lex_all(r#"{"a\"b" 'c\\d' 'it''s'}"#);
    assert_eq!(tokens[1].kind, TokenKind::String);
    assert_eq!(tokens[1].lexeme, "a\"b");
    assert_eq!(tokens[2].lexeme, "c\\d");
    assert_eq!(tokens[3].lexeme, "it");
    assert_eq!(tokens[4].lexeme, "s");
}

#[test]
fn test_braces_inside_strings_do_not_nest() {
    use TokenKind::{Eof, LeftBrace, RightBrace, String};
    assert_eq!(kinds("{'}'}x"), vec![LeftBrace, String, RightBrace, String, Eof]);
}

#[test]
fn test_unterminated_string() {
    let tokens = lex_all("{'abc");
    assert_eq!(tokens[1].kind, TokenKind::Error);
    assert_eq!(tokens[1].lexeme, "Unterminated string.");
    assert_eq!(tokens[2].kind, TokenKind::Eof);
}

#[test]
fn test_unexpected_character() {
    let tokens = lex_all("{a @ b}");
    assert_eq!(tokens[2].kind, TokenKind::Error);
    assert_eq!(tokens[2].lexeme, "Unexpected character.");
    assert_eq!(tokens[2].character, '@');
    assert_eq!(tokens[3].kind, TokenKind::Identifier);
}

#[test]
fn test_nested_braces_track_depth() {
    let mut lexer = Lexer::new("{ {a} } t");
    assert_eq!(lexer.next_token().kind, TokenKind::LeftBrace);
    assert_eq!(lexer.next_token().kind, TokenKind::LeftBrace);
    assert_eq!(lexer.next_token().kind, TokenKind::Identifier);
    assert_eq!(lexer.next_token().kind, TokenKind::RightBrace);
    assert!(lexer.in_expression());
    assert_eq!(lexer.next_token().kind, TokenKind::RightBrace);
    assert!(!lexer.in_expression());
    let text = lexer.next_token();
    assert_eq!((text.kind, text.lexeme.as_str()), (TokenKind::String, " t"));
}

#[test]
fn test_eof_is_sticky() {
    let mut lexer = Lexer::new("{a");
    lexer.next_token();
    lexer.next_token();
    assert_eq!(lexer.next_token().kind, TokenKind::Eof);
    assert_eq!(lexer.next_token().kind, TokenKind::Eof);
}

#[test]
fn test_empty_section_index_in_expression() {
    let tokens = lex_all("{# 1}");
    assert_eq!(tokens[1].kind, TokenKind::Section);
    assert_eq!(tokens[1].lexeme, "");
}

#[test]
fn test_line_tracking() {
    let tokens = lex_all("a\nb {\n  x}");
    let x = &tokens[2];
    assert_eq!(x.kind, TokenKind::Identifier);
    assert_eq!((x.line, x.column), (3, 3));
}

proptest! {
    #[test]
    fn plain_text_is_one_string_token(text in "[a-zA-Z0-9 .,:;!?()\\n-]{1,64}") {
        let tokens = lex_all(&text);
        prop_assert_eq!(tokens.len(), 2);
        prop_assert_eq!(tokens[0].kind, TokenKind::String);
        prop_assert_eq!(&tokens[0].lexeme, &text);
    }

    #[test]
    fn lexing_always_terminates_with_eof(source in "\\PC{0,64}") {
        let tokens = lex_all(&source);
        prop_assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::Eof));
        prop_assert!(tokens.iter().filter(|t| t.kind == TokenKind::Eof).count() == 1);
    }
}
