//! Parse errors.

use std::fmt;

use star_ir::{ExprId, Span, Token};

/// What went wrong, for programmatic matching.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum ParseErrorKind {
    /// No literal, identifier, group or block where one was required.
    ExpectedExpression,
    /// `(` of a group without its `)`.
    UnclosedGroup,
    /// `{` without its `}`.
    UnclosedBlock,
    /// `?` of a conditional without its `:`.
    ExpectedColon,
    /// Argument list without its `)`.
    UnclosedArguments,
    /// `.` not followed by a field name.
    ExpectedFieldName,
    /// `#` not followed by digits.
    ExpectedSectionIndex,
    /// `#N` with `N > 255`.
    SectionIndexTooLarge,
    /// More arguments than the call instruction can encode.
    TooManyArguments,
    /// Numeric literal that does not fit an `f64`.
    InvalidNumber,
    /// Error token from the lexer; carries its message.
    Lex(String),
}

impl ParseErrorKind {
    /// Stable code for searchability.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::ExpectedExpression => "E1001",
            Self::UnclosedGroup => "E1002",
            Self::UnclosedBlock => "E1003",
            Self::ExpectedColon => "E1004",
            Self::UnclosedArguments => "E1005",
            Self::ExpectedFieldName => "E1006",
            Self::ExpectedSectionIndex => "E1007",
            Self::SectionIndexTooLarge => "E1008",
            Self::TooManyArguments => "E1009",
            Self::InvalidNumber => "E1010",
            Self::Lex(_) => "E0001",
        }
    }
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExpectedExpression => write!(f, "Expected expression."),
            Self::UnclosedGroup => write!(f, "Expected ')' after expression."),
            Self::UnclosedBlock => write!(f, "Expected '}}' after expression."),
            Self::ExpectedColon => write!(f, "Expected ':' after first part of condition."),
            Self::UnclosedArguments => write!(f, "Expected ')' after function arguments."),
            Self::ExpectedFieldName => write!(f, "Expected field name after '.'."),
            Self::ExpectedSectionIndex => write!(f, "Expected section index."),
            Self::SectionIndexTooLarge => write!(f, "Section index cannot be larger than 255."),
            Self::TooManyArguments => write!(f, "Can't have more than 255 arguments."),
            Self::InvalidNumber => write!(f, "Invalid number literal."),
            Self::Lex(message) => f.write_str(message),
        }
    }
}

/// A syntax error, positioned at the token where it was detected.
#[derive(Clone, PartialEq, Debug)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    /// Human-readable message, equal to `kind.to_string()`.
    pub message: String,
    /// 1-based line of the offending token.
    pub line: u32,
    /// 1-based character position on that line.
    pub column: u32,
    /// The offending character, `'\0'` at end of input.
    pub character: char,
    /// Span of the offending token.
    pub span: Span,
    /// Best-effort partial node for tooling.
    pub expr: Option<ExprId>,
}

impl ParseError {
    /// Create an error at `token`.
    pub fn at(kind: ParseErrorKind, token: &Token, expr: Option<ExprId>) -> Self {
        ParseError {
            message: kind.to_string(),
            kind,
            line: token.line,
            column: token.column,
            character: token.character,
            span: token.span,
            expr,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[line {}, character {}] ", self.line, self.column)?;
        if self.character == '\0' {
            write!(f, "at end: {}", self.message)
        } else {
            write!(f, "at '{}': {}", self.character, self.message)
        }
    }
}

impl std::error::Error for ParseError {}
