//! Tokens produced by the lexer.
//!
//! Tokens are yielded one at a time and consumed immediately by the parser,
//! so no token list type exists.

use std::fmt;

use crate::Span;

/// Token kinds.
///
/// Text outside `{}` and quoted strings inside expressions share the
/// [`TokenKind::String`] kind; the parser does not need to tell them apart.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum TokenKind {
    // Single-character punctuation
    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,
    Dot,
    Comma,
    QuestionMark,
    Colon,
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    UpArrow,

    // One or two characters
    Bang,
    BangEqual,
    Equal,
    EqualEqual,
    Greater,
    GreaterEqual,
    DoubleGreater,
    Less,
    LessEqual,
    DoubleLess,

    // Literals
    String,
    Identifier,
    Number,

    // Keywords
    And,
    Or,
    Null,
    True,
    False,

    /// `#N` section marker; the lexeme holds the digits only.
    Section,

    /// Lexing failure; the lexeme holds the message.
    Error,
    Eof,
}

impl TokenKind {
    /// Human-readable name, used in trace output.
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::LeftParen => "(",
            Self::RightParen => ")",
            Self::LeftBrace => "{",
            Self::RightBrace => "}",
            Self::Dot => ".",
            Self::Comma => ",",
            Self::QuestionMark => "?",
            Self::Colon => ":",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Star => "*",
            Self::Slash => "/",
            Self::Percent => "%",
            Self::UpArrow => "^",
            Self::Bang => "!",
            Self::BangEqual => "!=",
            Self::Equal => "=",
            Self::EqualEqual => "==",
            Self::Greater => ">",
            Self::GreaterEqual => ">=",
            Self::DoubleGreater => ">>",
            Self::Less => "<",
            Self::LessEqual => "<=",
            Self::DoubleLess => "<<",
            Self::String => "string",
            Self::Identifier => "identifier",
            Self::Number => "number",
            Self::And => "and",
            Self::Or => "or",
            Self::Null => "null",
            Self::True => "true",
            Self::False => "false",
            Self::Section => "section",
            Self::Error => "error",
            Self::Eof => "end of input",
        }
    }

    /// Keyword lookup for an identifier lexeme.
    pub fn keyword(ident: &str) -> Option<TokenKind> {
        match ident {
            "null" => Some(Self::Null),
            "true" => Some(Self::True),
            "false" => Some(Self::False),
            "and" => Some(Self::And),
            "or" => Some(Self::Or),
            _ => None,
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A single token with its position.
///
/// `line` is 1-based. `column` is the 1-based character position of the
/// last character consumed on that line, and `character` is that character
/// (`'\0'` before anything was consumed).
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub span: Span,
    pub line: u32,
    pub column: u32,
    pub character: char,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, span: Span) -> Self {
        Token {
            kind,
            lexeme: lexeme.into(),
            span,
            line: 1,
            column: 0,
            character: '\0',
        }
    }

    /// Placeholder used before the first token is read.
    pub fn eof() -> Self {
        Token::new(TokenKind::Eof, "", Span::DUMMY)
    }

    #[inline]
    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}
