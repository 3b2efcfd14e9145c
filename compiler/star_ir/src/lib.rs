//! Starscript IR - shared data types for the template pipeline.
//!
//! This crate contains the data structures every stage agrees on:
//! - Spans for source locations
//! - Tokens produced by the lexer
//! - AST nodes (`Expr`, `ExprKind`) stored in a flat arena
//! - Operator enums shared by the parser and the compiler
//! - Variable replacement over an already-parsed tree
//!
//! # Design Philosophy
//!
//! - **Flatten Everything**: no `Box<Expr>`, children are `ExprId(u32)` indices
//! - **Parents on the side**: back-references live in a parent table owned by
//!   the arena, so the tree never holds cyclic pointers

/// Compile-time assertion that a type has a specific size.
///
/// Used to prevent accidental size regressions in frequently-allocated types.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

mod arena;
pub mod ast;
mod expr_id;
mod replace;
mod span;
mod token;

pub use arena::{Children, ExprArena};
pub use ast::{BinaryOp, Expr, ExprKind, ExprTag, LogicalOp, UnaryOp};
pub use expr_id::{ExprId, ExprRange};
pub use replace::{dotted_name, VariableReplacer};
pub use span::Span;
pub use token::{Token, TokenKind};

static_assert_size!(Span, 8);
static_assert_size!(ExprId, 4);
static_assert_size!(ExprRange, 8);
