//! AST node types.
//!
//! Nodes are stored in an [`ExprArena`](crate::ExprArena) and refer to their
//! children by [`ExprId`](crate::ExprId).

mod expr;
mod operators;

pub use expr::{Expr, ExprKind, ExprTag};
pub use operators::{BinaryOp, LogicalOp, UnaryOp};

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests;
