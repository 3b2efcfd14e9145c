//! Error collection across a whole template.

use pretty_assertions::assert_eq;
use starscript::{compile_source, parse, Error, ParseErrorKind};

use crate::common::parse_messages;

#[test]
fn test_two_malformed_blocks_give_two_errors() {
    let result = parse("A {1 +} B {(2} C {ok}");
    assert_eq!(result.errors.len(), 2);
    assert_eq!(result.errors[0].kind, ParseErrorKind::ExpectedExpression);
    assert_eq!(result.errors[1].kind, ParseErrorKind::UnclosedGroup);
}

#[test]
fn test_valid_blocks_survive_errors() {
    let result = parse("{a +} {b}");
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.source_of(*result.exprs.last().unwrap()), "{b}");
}

#[test]
fn test_every_message() {
    assert_eq!(parse_messages("{}"), vec!["Expected expression."]);
    assert_eq!(parse_messages("{(a}"), vec!["Expected ')' after expression."]);
    assert_eq!(parse_messages("{a b}"), vec!["Expected '}' after expression."]);
    assert_eq!(
        parse_messages("{a ? b}"),
        vec!["Expected ':' after first part of condition."]
    );
    assert_eq!(
        parse_messages("{f(a}"),
        vec!["Expected ')' after function arguments."]
    );
    assert_eq!(
        parse_messages("{a.}"),
        vec!["Expected field name after '.'."]
    );
    assert_eq!(
        parse_messages("#300{a}"),
        vec!["Section index cannot be larger than 255."]
    );
    assert_eq!(parse_messages("{$}"), vec!["Unexpected character."]);
    assert_eq!(parse_messages("{\"abc}"), vec!["Unterminated string."]);
}

#[test]
fn test_compile_source_reports_all_errors() {
    let Err(Error::Parse(errors)) = compile_source("{1 +} and {2 *}") else {
        panic!("expected parse errors");
    };
    assert_eq!(errors.len(), 2);

    let text = Error::Parse(errors).to_string();
    assert_eq!(text.lines().count(), 2);
    assert!(text.lines().all(|line| line.starts_with("[line 1, character ")));
}
