//! The dual-mode lexer.

use star_ir::{Span, Token, TokenKind};
use tracing::trace;

use crate::cursor::Cursor;

const UNEXPECTED_CHARACTER: &str = "Unexpected character.";
const UNTERMINATED_STRING: &str = "Unterminated string.";

/// Pull-based lexer over one template.
///
/// Call [`Lexer::next_token`] repeatedly; once the end of input is reached
/// every further call returns an `Eof` token. The [`Iterator`] impl yields
/// the same tokens and stops after the first `Eof`.
pub struct Lexer<'src> {
    cursor: Cursor<'src>,
    /// Number of currently open `{`. Zero means text mode.
    depth: u32,
    /// Scratch buffer for text and string lexemes that need unescaping.
    scratch: String,
    finished: bool,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        Lexer {
            cursor: Cursor::new(source),
            depth: 0,
            scratch: String::new(),
            finished: false,
        }
    }

    /// The source being lexed.
    pub fn source(&self) -> &'src str {
        self.cursor.source()
    }

    /// Whether the lexer is currently inside `{...}`.
    pub fn in_expression(&self) -> bool {
        self.depth > 0
    }

    /// Scan and return the next token.
    pub fn next_token(&mut self) -> Token {
        let token = if self.depth > 0 {
            self.expression_token()
        } else {
            self.text_token()
        };
        trace!(kind = ?token.kind, lexeme = %token.lexeme, line = token.line, "token");
        token
    }

    // ===== Text mode =====

    fn text_token(&mut self) -> Token {
        let start = self.cursor.pos();
        let Some(c) = self.cursor.current() else {
            return self.make(TokenKind::Eof, String::new(), start);
        };
        let next = self.cursor.peek_next();

        if starts_expression(c, next) {
            self.cursor.advance();
            self.depth += 1;
            return self.make_sliced(TokenKind::LeftBrace, start);
        }
        if starts_section(c, next) {
            self.cursor.advance();
            return self.section(start);
        }

        self.scratch.clear();
        while let Some(c) = self.cursor.current() {
            let next = self.cursor.peek_next();
            if starts_expression(c, next) || starts_section(c, next) {
                break;
            }
            self.cursor.advance();
            if (c == '{' || c == '#') && next == Some(c) {
                // `{{` / `##` collapse to one literal character.
                self.cursor.advance();
            }
            self.scratch.push(c);
        }
        let text = std::mem::take(&mut self.scratch);
        self.make(TokenKind::String, text, start)
    }

    // ===== Expression mode =====

    fn expression_token(&mut self) -> Token {
        self.cursor
            .eat_while(|c| matches!(c, ' ' | '\t' | '\r' | '\n'));

        let start = self.cursor.pos();
        let Some(c) = self.cursor.advance() else {
            return self.make(TokenKind::Eof, String::new(), start);
        };

        if c.is_ascii_digit() {
            return self.number(start);
        }
        if is_ident_start(c) {
            return self.identifier(start);
        }

        let kind = match c {
            '\'' | '"' => return self.string(c, start),
            '#' => return self.section(start),

            '=' => {
                if self.cursor.eat('=') {
                    TokenKind::EqualEqual
                } else {
                    TokenKind::Equal
                }
            }
            '!' => {
                if self.cursor.eat('=') {
                    TokenKind::BangEqual
                } else {
                    TokenKind::Bang
                }
            }
            '>' => {
                if self.cursor.eat('=') {
                    TokenKind::GreaterEqual
                } else if self.cursor.eat('>') {
                    TokenKind::DoubleGreater
                } else {
                    TokenKind::Greater
                }
            }
            '<' => {
                if self.cursor.eat('=') {
                    TokenKind::LessEqual
                } else if self.cursor.eat('<') {
                    TokenKind::DoubleLess
                } else {
                    TokenKind::Less
                }
            }

            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Star,
            '/' => TokenKind::Slash,
            '%' => TokenKind::Percent,
            '^' => TokenKind::UpArrow,

            '.' => TokenKind::Dot,
            ',' => TokenKind::Comma,
            '?' => TokenKind::QuestionMark,
            ':' => TokenKind::Colon,
            '(' => TokenKind::LeftParen,
            ')' => TokenKind::RightParen,
            '{' => {
                self.depth += 1;
                TokenKind::LeftBrace
            }
            '}' => {
                self.depth = self.depth.saturating_sub(1);
                TokenKind::RightBrace
            }

            _ => return self.error(UNEXPECTED_CHARACTER, start),
        };
        self.make_sliced(kind, start)
    }

    fn number(&mut self, start: usize) -> Token {
        self.cursor.eat_while(|c| c.is_ascii_digit());
        if self.cursor.current() == Some('.')
            && self.cursor.peek_next().is_some_and(|c| c.is_ascii_digit())
        {
            self.cursor.advance();
            self.cursor.eat_while(|c| c.is_ascii_digit());
        }
        self.make_sliced(TokenKind::Number, start)
    }

    fn identifier(&mut self, start: usize) -> Token {
        self.cursor.eat_while(is_ident_continue);
        let text = self.cursor.slice_from(start);
        let kind = TokenKind::keyword(text).unwrap_or(TokenKind::Identifier);
        self.make_sliced(kind, start)
    }

    /// Quoted string. A backslash takes the next character literally.
    fn string(&mut self, delimiter: char, start: usize) -> Token {
        self.scratch.clear();
        loop {
            match self.cursor.advance() {
                None => return self.error(UNTERMINATED_STRING, start),
                Some('\\') => match self.cursor.advance() {
                    Some(escaped) => self.scratch.push(escaped),
                    None => return self.error(UNTERMINATED_STRING, start),
                },
                Some(c) if c == delimiter => break,
                Some(c) => self.scratch.push(c),
            }
        }
        let text = std::mem::take(&mut self.scratch);
        self.make(TokenKind::String, text, start)
    }

    /// `#` has been consumed; the lexeme is the (possibly empty) digit run.
    fn section(&mut self, start: usize) -> Token {
        let digits_start = self.cursor.pos();
        self.cursor.eat_while(|c| c.is_ascii_digit());
        let digits = self.cursor.slice_from(digits_start).to_string();
        self.make(TokenKind::Section, digits, start)
    }

    // ===== Token construction =====

    fn make_sliced(&self, kind: TokenKind, start: usize) -> Token {
        let lexeme = self.cursor.slice_from(start).to_string();
        self.make(kind, lexeme, start)
    }

    fn make(&self, kind: TokenKind, lexeme: String, start: usize) -> Token {
        let character = if kind == TokenKind::Eof {
            '\0'
        } else {
            self.cursor.last()
        };
        Token {
            kind,
            lexeme,
            span: Span::from_range(start..self.cursor.pos()),
            line: self.cursor.line(),
            column: self.cursor.column(),
            character,
        }
    }

    fn error(&self, message: &str, start: usize) -> Token {
        self.make(TokenKind::Error, message.to_string(), start)
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.finished {
            return None;
        }
        let token = self.next_token();
        self.finished = token.is(TokenKind::Eof);
        Some(token)
    }
}

#[inline]
fn starts_expression(c: char, next: Option<char>) -> bool {
    c == '{' && next != Some('{')
}

#[inline]
fn starts_section(c: char, next: Option<char>) -> bool {
    c == '#' && next.is_some_and(|n| n.is_ascii_digit())
}

#[inline]
fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

#[inline]
fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests;
