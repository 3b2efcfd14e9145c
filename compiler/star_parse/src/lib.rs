//! Recursive descent parser for Starscript templates.
//!
//! Produces a flat AST in an [`ExprArena`]. One top-level statement is
//! parsed at a time; a syntax error is recorded and the parser skips to the
//! end of the enclosing `{...}` before continuing, so a single call reports
//! every malformed expression in the template.

mod cursor;
mod error;
mod grammar;
mod recovery;

pub use error::{ParseError, ParseErrorKind};

use star_ir::{Expr, ExprArena, ExprId, ExprKind, Span, VariableReplacer};
use tracing::debug;

use cursor::Cursor;

/// Result alias used throughout the grammar.
type PResult<T = ExprId> = Result<T, ParseError>;

/// Parser state.
pub struct Parser<'src> {
    cursor: Cursor<'src>,
    arena: ExprArena,
    /// Braces entered by the grammar and not yet closed.
    depth: u32,
}

impl<'src> Parser<'src> {
    /// Create a new parser, reading the first token.
    pub fn new(source: &'src str) -> Self {
        Parser {
            cursor: Cursor::new(source),
            arena: ExprArena::with_capacity(source.len()),
            depth: 0,
        }
    }

    /// Parse the whole template.
    pub fn parse_template(mut self) -> ParseResult {
        let mut exprs = Vec::new();
        let mut errors = Vec::new();

        while !self.cursor.is_at_end() {
            let before = self.cursor.consumed();
            match self.statement() {
                Ok(expr) => exprs.push(expr),
                Err(error) => {
                    debug!(
                        code = error.kind.code(),
                        line = error.line,
                        column = error.column,
                        message = %error.message,
                        "parse error"
                    );
                    errors.push(error);
                    self.synchronize();
                    if self.cursor.consumed() == before {
                        self.cursor.advance();
                    }
                }
            }
        }

        debug!(
            statements = exprs.len(),
            errors = errors.len(),
            nodes = self.arena.expr_count(),
            "parsed template"
        );

        ParseResult {
            exprs,
            arena: self.arena,
            errors,
            source: self.cursor.source().to_string(),
        }
    }

    // ===== Helpers shared by the grammar =====

    fn alloc(&mut self, kind: ExprKind, span: Span) -> ExprId {
        self.arena.alloc_expr(Expr::new(kind, span))
    }

    fn span_of(&self, id: ExprId) -> Span {
        self.arena.get_expr(id).span
    }

    /// Span from `start` to the end of the previous token.
    fn span_from(&self, start: Span) -> Span {
        start.merge(self.cursor.previous().span)
    }

    fn error(&self, kind: ParseErrorKind, expr: Option<ExprId>) -> ParseError {
        ParseError::at(kind, self.cursor.current(), expr)
    }

    fn consume(
        &mut self,
        kind: star_ir::TokenKind,
        error: ParseErrorKind,
        expr: Option<ExprId>,
    ) -> PResult<()> {
        if self.cursor.eat(kind) {
            Ok(())
        } else {
            Err(self.error(error, expr))
        }
    }
}

/// Parse result: top-level statements, their arena, and any errors.
#[derive(Clone, Debug)]
pub struct ParseResult {
    /// Top-level statements in source order.
    pub exprs: Vec<ExprId>,
    pub arena: ExprArena,
    pub errors: Vec<ParseError>,
    /// The parsed source, for diagnostic slicing.
    pub source: String,
}

impl ParseResult {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Source text covered by `id`.
    pub fn source_of(&self, id: ExprId) -> &str {
        let span = self.arena.get_expr(id).span;
        self.source.get(span.to_range()).unwrap_or("")
    }

    /// Rewrite variable references in place.
    ///
    /// Returns the number of references replaced.
    pub fn replace_variables(&mut self, replacer: &VariableReplacer) -> usize {
        replacer.apply(&mut self.arena, &mut self.exprs)
    }
}

/// Parse a template.
#[tracing::instrument(level = "debug", skip_all, fields(len = source.len()))]
pub fn parse(source: &str) -> ParseResult {
    Parser::new(source).parse_template()
}
