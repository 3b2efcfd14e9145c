//! Grammar productions, lowest precedence first.
//!
//! ```text
//! statement   := ('#' DIGIT*)? conditional
//! conditional := and ('?' statement ':' statement)?
//! and         := or ('and' or)*
//! or          := equality ('or' equality)*
//! equality    := comparison (('==' | '!=') comparison)*
//! comparison  := shift (('>' | '>=' | '<' | '<=') shift)*
//! shift       := term (('<<' | '>>') term)*
//! term        := factor (('+' | '-') factor)*
//! factor      := unary (('*' | '/' | '%' | '^') unary)*
//! unary       := ('!' | '-') unary | call
//! call        := primary ('(' args? ')' | '.' IDENT)*
//! primary     := null | true | false | NUMBER | STRING | IDENT
//!              | '(' statement ')' | '{' statement '}'
//! ```
//!
//! `or` binds tighter than `and`.

use std::sync::Arc;

use smallvec::SmallVec;
use star_ir::{BinaryOp, ExprId, ExprKind, LogicalOp, TokenKind, UnaryOp};
use star_stack::ensure_sufficient_stack;
use tracing::trace;

use crate::{PResult, ParseErrorKind, Parser};

/// Largest section index a `#N` marker may carry.
const MAX_SECTION_INDEX: u32 = 255;

/// Largest argument count the call instruction can encode.
const MAX_ARGUMENTS: usize = 255;

const EQUALITY_OPS: &[(TokenKind, BinaryOp)] = &[
    (TokenKind::EqualEqual, BinaryOp::Eq),
    (TokenKind::BangEqual, BinaryOp::NotEq),
];

const COMPARISON_OPS: &[(TokenKind, BinaryOp)] = &[
    (TokenKind::Greater, BinaryOp::Gt),
    (TokenKind::GreaterEqual, BinaryOp::GtEq),
    (TokenKind::Less, BinaryOp::Lt),
    (TokenKind::LessEqual, BinaryOp::LtEq),
];

const SHIFT_OPS: &[(TokenKind, BinaryOp)] = &[
    (TokenKind::DoubleLess, BinaryOp::Shl),
    (TokenKind::DoubleGreater, BinaryOp::Shr),
];

const TERM_OPS: &[(TokenKind, BinaryOp)] = &[
    (TokenKind::Plus, BinaryOp::Add),
    (TokenKind::Minus, BinaryOp::Sub),
];

const FACTOR_OPS: &[(TokenKind, BinaryOp)] = &[
    (TokenKind::Star, BinaryOp::Mul),
    (TokenKind::Slash, BinaryOp::Div),
    (TokenKind::Percent, BinaryOp::Mod),
    (TokenKind::UpArrow, BinaryOp::Pow),
];

impl Parser<'_> {
    pub(crate) fn statement(&mut self) -> PResult {
        ensure_sufficient_stack(|| self.statement_inner())
    }

    fn statement_inner(&mut self) -> PResult {
        if !self.cursor.eat(TokenKind::Section) {
            return self.expression();
        }

        let marker = self.cursor.previous();
        let start = marker.span;
        if marker.lexeme.is_empty() {
            return Err(self.error(ParseErrorKind::ExpectedSectionIndex, None));
        }
        // Digits only, so a failed parse means overflow.
        let index = marker.lexeme.parse::<u32>().unwrap_or(u32::MAX);

        let expr = self.expression()?;
        let span = self.span_from(start);
        let section = self.alloc(ExprKind::Section { index, expr }, span);

        if index > MAX_SECTION_INDEX {
            return Err(self.error(ParseErrorKind::SectionIndexTooLarge, Some(section)));
        }
        Ok(section)
    }

    fn expression(&mut self) -> PResult {
        self.conditional()
    }

    fn conditional(&mut self) -> PResult {
        let condition = self.and()?;
        if !self.cursor.eat(TokenKind::QuestionMark) {
            return Ok(condition);
        }

        let then_expr = self.statement()?;
        self.consume(
            TokenKind::Colon,
            ParseErrorKind::ExpectedColon,
            Some(condition),
        )?;
        let else_expr = self.statement()?;

        let span = self.span_from(self.span_of(condition));
        Ok(self.alloc(
            ExprKind::Conditional {
                condition,
                then_expr,
                else_expr,
            },
            span,
        ))
    }

    fn and(&mut self) -> PResult {
        self.logical(TokenKind::And, LogicalOp::And, Self::or)
    }

    fn or(&mut self) -> PResult {
        self.logical(TokenKind::Or, LogicalOp::Or, Self::equality)
    }

    fn equality(&mut self) -> PResult {
        self.binary(EQUALITY_OPS, Self::comparison)
    }

    fn comparison(&mut self) -> PResult {
        self.binary(COMPARISON_OPS, Self::shift)
    }

    fn shift(&mut self) -> PResult {
        self.binary(SHIFT_OPS, Self::term)
    }

    fn term(&mut self) -> PResult {
        self.binary(TERM_OPS, Self::factor)
    }

    fn factor(&mut self) -> PResult {
        self.binary(FACTOR_OPS, Self::unary)
    }

    /// Left-associative short-circuit level.
    fn logical(
        &mut self,
        token: TokenKind,
        op: LogicalOp,
        operand: fn(&mut Self) -> PResult,
    ) -> PResult {
        let mut left = operand(self)?;
        while self.cursor.eat(token) {
            let right = operand(self)?;
            let span = self.span_from(self.span_of(left));
            left = self.alloc(ExprKind::Logical { left, op, right }, span);
        }
        Ok(left)
    }

    /// Left-associative binary level.
    fn binary(
        &mut self,
        ops: &[(TokenKind, BinaryOp)],
        operand: fn(&mut Self) -> PResult,
    ) -> PResult {
        let mut left = operand(self)?;
        loop {
            let current = self.cursor.current_kind();
            let Some(&(_, op)) = ops.iter().find(|(kind, _)| *kind == current) else {
                break;
            };
            self.cursor.advance();
            let right = operand(self)?;
            let span = self.span_from(self.span_of(left));
            left = self.alloc(ExprKind::Binary { left, op, right }, span);
        }
        Ok(left)
    }

    fn unary(&mut self) -> PResult {
        let op = match self.cursor.current_kind() {
            TokenKind::Bang => UnaryOp::Not,
            TokenKind::Minus => UnaryOp::Neg,
            _ => return self.call(),
        };
        let start = self.cursor.advance().span;
        let operand = ensure_sufficient_stack(|| self.unary())?;
        let span = self.span_from(start);
        Ok(self.alloc(ExprKind::Unary { op, operand }, span))
    }

    fn call(&mut self) -> PResult {
        let mut expr = self.primary()?;
        loop {
            if self.cursor.eat(TokenKind::LeftParen) {
                expr = self.finish_call(expr)?;
            } else if self.cursor.eat(TokenKind::Dot) {
                expr = self.get(expr)?;
            } else {
                return Ok(expr);
            }
        }
    }

    fn get(&mut self, object: ExprId) -> PResult {
        let start = self.span_of(object);
        if !self.cursor.check(TokenKind::Identifier) {
            // Record the partial access so tooling still sees `object.`.
            let span = start.merge(self.cursor.current().span);
            let partial = self.alloc(
                ExprKind::Get {
                    object,
                    name: Arc::from(""),
                },
                span,
            );
            return Err(self.error(ParseErrorKind::ExpectedFieldName, Some(partial)));
        }

        let name = Arc::from(self.cursor.advance().lexeme.as_str());
        let span = self.span_from(start);
        Ok(self.alloc(ExprKind::Get { object, name }, span))
    }

    fn finish_call(&mut self, callee: ExprId) -> PResult {
        let mut args: SmallVec<[ExprId; 4]> = SmallVec::new();
        if !self.cursor.check(TokenKind::RightParen) {
            loop {
                if args.len() == MAX_ARGUMENTS {
                    return Err(self.error(ParseErrorKind::TooManyArguments, Some(callee)));
                }
                args.push(self.expression()?);
                if !self.cursor.eat(TokenKind::Comma) {
                    break;
                }
            }
        }

        let closed = self.cursor.eat(TokenKind::RightParen);
        let args = self.arena.alloc_expr_list(args);
        let span = self.span_from(self.span_of(callee));
        let call = self.alloc(ExprKind::Call { callee, args }, span);
        if closed {
            Ok(call)
        } else {
            Err(self.error(ParseErrorKind::UnclosedArguments, Some(call)))
        }
    }

    fn primary(&mut self) -> PResult {
        trace!(
            kind = self.cursor.current_kind().display_name(),
            span_start = self.cursor.current().span.start,
            "primary"
        );

        let kind = match self.cursor.current_kind() {
            TokenKind::Null => ExprKind::Null,
            TokenKind::True => ExprKind::Boolean(true),
            TokenKind::False => ExprKind::Boolean(false),
            TokenKind::String => ExprKind::String(Arc::from(self.cursor.current().lexeme.as_str())),
            TokenKind::Identifier => {
                ExprKind::Variable(Arc::from(self.cursor.current().lexeme.as_str()))
            }
            TokenKind::Number => match self.cursor.current().lexeme.parse::<f64>() {
                Ok(value) if value.is_finite() => ExprKind::Number(value),
                _ => return Err(self.error(ParseErrorKind::InvalidNumber, None)),
            },
            TokenKind::LeftParen => return self.group(),
            TokenKind::LeftBrace => return self.block(),
            TokenKind::Error => {
                let message = self.cursor.current().lexeme.clone();
                return Err(self.error(ParseErrorKind::Lex(message), None));
            }
            _ => return Err(self.error(ParseErrorKind::ExpectedExpression, None)),
        };

        let span = self.cursor.advance().span;
        Ok(self.alloc(kind, span))
    }

    fn group(&mut self) -> PResult {
        let start = self.cursor.advance().span;
        let inner = self.statement()?;
        let closed = self.cursor.eat(TokenKind::RightParen);
        let span = self.span_from(start);
        let group = self.alloc(ExprKind::Group(inner), span);
        if closed {
            Ok(group)
        } else {
            Err(self.error(ParseErrorKind::UnclosedGroup, Some(group)))
        }
    }

    /// `{ statement }`. Only a block opened in text is kept as a `Block`
    /// node; braces nested inside an expression just group.
    fn block(&mut self) -> PResult {
        let start = self.cursor.advance().span;
        let outermost = self.depth == 0;
        self.depth += 1;

        let inner = match self.statement() {
            Ok(inner) => inner,
            Err(mut error) => {
                if error.expr.is_none() {
                    let span = self.span_from(start);
                    error.expr = Some(self.alloc(ExprKind::Block(ExprId::INVALID), span));
                }
                return Err(error);
            }
        };

        let closed = self.cursor.eat(TokenKind::RightBrace);
        let expr = if outermost {
            let span = self.span_from(start);
            self.alloc(ExprKind::Block(inner), span)
        } else {
            inner
        };
        if !closed {
            return Err(self.error(ParseErrorKind::UnclosedBlock, Some(expr)));
        }
        self.depth -= 1;
        Ok(expr)
    }
}
