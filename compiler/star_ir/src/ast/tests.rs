use super::*;
use crate::{ExprId, ExprRange, Span};
use std::collections::HashSet;
use std::sync::Arc;

/// One sample per variant; the match below is exhaustive so a new variant
/// fails to compile until it is added here and to `ExprTag::ALL`.
fn sample(tag: ExprTag) -> ExprKind {
    let id = ExprId::new(0);
    match tag {
        ExprTag::Null => ExprKind::Null,
        ExprTag::String => ExprKind::String(Arc::from("s")),
        ExprTag::Number => ExprKind::Number(1.0),
        ExprTag::Boolean => ExprKind::Boolean(true),
        ExprTag::Block => ExprKind::Block(id),
        ExprTag::Group => ExprKind::Group(id),
        ExprTag::Binary => ExprKind::Binary {
            left: id,
            op: BinaryOp::Add,
            right: id,
        },
        ExprTag::Unary => ExprKind::Unary {
            op: UnaryOp::Neg,
            operand: id,
        },
        ExprTag::Variable => ExprKind::Variable(Arc::from("v")),
        ExprTag::Get => ExprKind::Get {
            object: id,
            name: Arc::from("f"),
        },
        ExprTag::Call => ExprKind::Call {
            callee: id,
            args: ExprRange::EMPTY,
        },
        ExprTag::Logical => ExprKind::Logical {
            left: id,
            op: LogicalOp::Or,
            right: id,
        },
        ExprTag::Conditional => ExprKind::Conditional {
            condition: id,
            then_expr: id,
            else_expr: id,
        },
        ExprTag::Section => ExprKind::Section { index: 0, expr: id },
    }
}

#[test]
fn test_every_tag_round_trips() {
    for tag in ExprTag::ALL {
        assert_eq!(sample(tag).tag(), tag);
    }
}

#[test]
fn test_tag_names_unique() {
    let names: HashSet<_> = ExprTag::ALL.iter().map(|t| t.name()).collect();
    assert_eq!(names.len(), ExprTag::ALL.len());
}

#[test]
fn test_binary_op_symbols() {
    assert_eq!(BinaryOp::Shl.as_symbol(), "<<");
    assert_eq!(BinaryOp::Pow.as_symbol(), "^");
    assert_eq!(LogicalOp::And.as_symbol(), "and");
    assert_eq!(UnaryOp::Not.as_symbol(), "!");
}

#[test]
fn test_expr_debug() {
    let expr = Expr::new(ExprKind::Number(42.0), Span::new(0, 2));
    assert_eq!(format!("{expr:?}"), "Number(42.0) @ 0..2");
}
