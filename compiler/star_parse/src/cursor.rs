//! Token cursor over the lexer.
//!
//! Holds the current and previous token only; the lexer produces the next
//! one on demand.

use star_ir::{Token, TokenKind};
use star_lexer::Lexer;
use tracing::trace;

pub(crate) struct Cursor<'src> {
    lexer: Lexer<'src>,
    current: Token,
    previous: Token,
    /// Tokens consumed so far, used to detect a stalled recovery.
    consumed: usize,
}

impl<'src> Cursor<'src> {
    pub(crate) fn new(source: &'src str) -> Self {
        let mut lexer = Lexer::new(source);
        let current = lexer.next_token();
        Cursor {
            lexer,
            current,
            previous: Token::eof(),
            consumed: 0,
        }
    }

    #[inline]
    pub(crate) fn source(&self) -> &'src str {
        self.lexer.source()
    }

    #[inline]
    pub(crate) fn current(&self) -> &Token {
        &self.current
    }

    #[inline]
    pub(crate) fn current_kind(&self) -> TokenKind {
        self.current.kind
    }

    #[inline]
    pub(crate) fn previous(&self) -> &Token {
        &self.previous
    }

    #[inline]
    pub(crate) fn consumed(&self) -> usize {
        self.consumed
    }

    #[inline]
    pub(crate) fn is_at_end(&self) -> bool {
        self.current.is(TokenKind::Eof)
    }

    #[inline]
    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        !self.is_at_end() && self.current.is(kind)
    }

    /// Move to the next token and return the one just consumed.
    pub(crate) fn advance(&mut self) -> &Token {
        let next = self.lexer.next_token();
        self.previous = std::mem::replace(&mut self.current, next);
        self.consumed += 1;
        trace!(
            kind = %self.previous.kind.display_name(),
            span_start = self.previous.span.start,
            span_end = self.previous.span.end,
            "advance"
        );
        &self.previous
    }

    /// Consume the current token if it is `kind`.
    pub(crate) fn eat(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }
}
