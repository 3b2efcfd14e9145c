//! Expression nodes.

use std::fmt;
use std::sync::Arc;

use super::operators::{BinaryOp, LogicalOp, UnaryOp};
use crate::{ExprId, ExprRange, Span};

/// Expression node.
#[derive(Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr { kind, span }
    }
}

impl fmt::Debug for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {:?}", self.kind, self.span)
    }
}

/// Expression variants.
///
/// Child references are fixed when the node is allocated. The only way to
/// change them afterwards is [`ExprArena::replace`](crate::ExprArena::replace).
#[derive(Clone, PartialEq, Debug)]
pub enum ExprKind {
    /// `null`
    Null,

    /// Literal text outside braces, or a quoted string inside an expression.
    String(Arc<str>),

    /// Numeric literal.
    Number(f64),

    /// `true` / `false`
    Boolean(bool),

    /// `{ expr }` appearing in text.
    ///
    /// Holds [`ExprId::INVALID`] when produced while recovering from an error
    /// inside the braces.
    Block(ExprId),

    /// `( expr )`
    Group(ExprId),

    /// `left op right`
    Binary {
        left: ExprId,
        op: BinaryOp,
        right: ExprId,
    },

    /// `op operand`
    Unary { op: UnaryOp, operand: ExprId },

    /// Bare identifier.
    Variable(Arc<str>),

    /// `object.name`
    ///
    /// `name` is empty when the parser hit `object.` with no identifier.
    Get { object: ExprId, name: Arc<str> },

    /// `callee(args...)`
    Call { callee: ExprId, args: ExprRange },

    /// `left and right` / `left or right`
    Logical {
        left: ExprId,
        op: LogicalOp,
        right: ExprId,
    },

    /// `condition ? then_expr : else_expr`
    Conditional {
        condition: ExprId,
        then_expr: ExprId,
        else_expr: ExprId,
    },

    /// `#index expr`
    ///
    /// The index is kept as written so an out-of-range marker can still be
    /// reported with its node.
    Section { index: u32, expr: ExprId },
}

impl ExprKind {
    /// The variant tag, without payload.
    pub const fn tag(&self) -> ExprTag {
        match self {
            Self::Null => ExprTag::Null,
            Self::String(_) => ExprTag::String,
            Self::Number(_) => ExprTag::Number,
            Self::Boolean(_) => ExprTag::Boolean,
            Self::Block(_) => ExprTag::Block,
            Self::Group(_) => ExprTag::Group,
            Self::Binary { .. } => ExprTag::Binary,
            Self::Unary { .. } => ExprTag::Unary,
            Self::Variable(_) => ExprTag::Variable,
            Self::Get { .. } => ExprTag::Get,
            Self::Call { .. } => ExprTag::Call,
            Self::Logical { .. } => ExprTag::Logical,
            Self::Conditional { .. } => ExprTag::Conditional,
            Self::Section { .. } => ExprTag::Section,
        }
    }
}

/// Payload-free mirror of [`ExprKind`].
///
/// Passes that switch on node kind use this to list every variant; adding a
/// variant to `ExprKind` without updating [`ExprTag::ALL`] fails the tests.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ExprTag {
    Null,
    String,
    Number,
    Boolean,
    Block,
    Group,
    Binary,
    Unary,
    Variable,
    Get,
    Call,
    Logical,
    Conditional,
    Section,
}

impl ExprTag {
    pub const ALL: [ExprTag; 14] = [
        ExprTag::Null,
        ExprTag::String,
        ExprTag::Number,
        ExprTag::Boolean,
        ExprTag::Block,
        ExprTag::Group,
        ExprTag::Binary,
        ExprTag::Unary,
        ExprTag::Variable,
        ExprTag::Get,
        ExprTag::Call,
        ExprTag::Logical,
        ExprTag::Conditional,
        ExprTag::Section,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Null => "Null",
            Self::String => "String",
            Self::Number => "Number",
            Self::Boolean => "Boolean",
            Self::Block => "Block",
            Self::Group => "Group",
            Self::Binary => "Binary",
            Self::Unary => "Unary",
            Self::Variable => "Variable",
            Self::Get => "Get",
            Self::Call => "Call",
            Self::Logical => "Logical",
            Self::Conditional => "Conditional",
            Self::Section => "Section",
        }
    }
}

impl fmt::Display for ExprTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
