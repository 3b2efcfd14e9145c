//! Arena allocation for the flat AST.
//!
//! - Contiguous storage for all expressions of one parse
//! - Call argument lists flattened into a side vector
//! - A parent table kept next to the nodes, so tooling can replace a node
//!   without the tree holding back-pointers

use std::fmt;

use smallvec::SmallVec;

use crate::{Expr, ExprId, ExprKind, ExprRange};

/// Child list of a single node. Only calls have more than three children.
pub type Children = SmallVec<[ExprId; 4]>;

/// Contiguous storage for all expressions of a template.
#[derive(Clone, Default)]
pub struct ExprArena {
    /// All expressions (indexed by `ExprId`).
    exprs: Vec<Expr>,

    /// Flattened call argument lists.
    expr_lists: Vec<ExprId>,

    /// Parent of each expression, `ExprId::INVALID` for roots.
    parents: Vec<ExprId>,
}

impl ExprArena {
    /// Create a new empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with estimated capacity based on source size.
    /// Heuristic: ~1 expression per 8 bytes of template source.
    pub fn with_capacity(source_len: usize) -> Self {
        let estimated = source_len / 8;
        ExprArena {
            exprs: Vec::with_capacity(estimated),
            expr_lists: Vec::with_capacity(estimated / 4),
            parents: Vec::with_capacity(estimated),
        }
    }

    /// Reset for reuse, keeping capacity.
    pub fn reset(&mut self) {
        self.exprs.clear();
        self.expr_lists.clear();
        self.parents.clear();
    }

    // ===== Expression allocation =====

    /// Allocate expression, return ID.
    ///
    /// Children must already be allocated; their parent entries are pointed
    /// at the new node.
    #[allow(clippy::cast_possible_truncation)]
    pub fn alloc_expr(&mut self, expr: Expr) -> ExprId {
        let id = ExprId::new(self.exprs.len() as u32);
        self.exprs.push(expr);
        self.parents.push(ExprId::INVALID);
        for child in self.children(id) {
            if let Some(slot) = self.parents.get_mut(child.index()) {
                *slot = id;
            }
        }
        id
    }

    /// Get expression by ID.
    ///
    /// # Panics
    /// Panics if `id` is out of bounds.
    #[inline]
    #[track_caller]
    pub fn get_expr(&self, id: ExprId) -> &Expr {
        &self.exprs[id.index()]
    }

    /// Get expression by ID, `None` for invalid or foreign IDs.
    #[inline]
    pub fn try_get_expr(&self, id: ExprId) -> Option<&Expr> {
        self.exprs.get(id.index())
    }

    /// Get number of expressions.
    #[inline]
    pub fn expr_count(&self) -> usize {
        self.exprs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.exprs.is_empty()
    }

    // ===== Expression list allocation =====

    /// Allocate expression list, return range.
    #[allow(clippy::cast_possible_truncation)]
    pub fn alloc_expr_list(&mut self, exprs: impl IntoIterator<Item = ExprId>) -> ExprRange {
        let start = self.expr_lists.len() as u32;
        self.expr_lists.extend(exprs);
        let len = (self.expr_lists.len() as u32 - start) as u16;
        ExprRange::new(start, len)
    }

    /// Get expression list by range.
    #[inline]
    pub fn get_expr_list(&self, range: ExprRange) -> &[ExprId] {
        let start = range.start as usize;
        let end = start + range.len();
        &self.expr_lists[start..end]
    }

    // ===== Tree navigation =====

    /// Children of `id` in evaluation order.
    ///
    /// Invalid placeholders (a block recorded while recovering from an error)
    /// are skipped.
    pub fn children(&self, id: ExprId) -> Children {
        let mut out = Children::new();
        match &self.get_expr(id).kind {
            ExprKind::Null
            | ExprKind::String(_)
            | ExprKind::Number(_)
            | ExprKind::Boolean(_)
            | ExprKind::Variable(_) => {}
            ExprKind::Block(child)
            | ExprKind::Group(child)
            | ExprKind::Unary { operand: child, .. }
            | ExprKind::Get { object: child, .. }
            | ExprKind::Section { expr: child, .. } => out.push(*child),
            ExprKind::Binary { left, right, .. } | ExprKind::Logical { left, right, .. } => {
                out.push(*left);
                out.push(*right);
            }
            ExprKind::Conditional {
                condition,
                then_expr,
                else_expr,
            } => out.extend([*condition, *then_expr, *else_expr]),
            ExprKind::Call { callee, args } => {
                out.push(*callee);
                out.extend_from_slice(self.get_expr_list(*args));
            }
        }
        out.retain(|child| child.is_valid());
        out
    }

    /// Parent of `id`, `None` for top-level expressions.
    #[inline]
    pub fn parent(&self, id: ExprId) -> Option<ExprId> {
        self.parents
            .get(id.index())
            .copied()
            .filter(|parent| parent.is_valid())
    }

    /// Replace `old` with `new` in the child list of `old`'s parent.
    ///
    /// Updates the parent table for both nodes. Returns `false` (and changes
    /// nothing) when `old` is a root or `new` is not in this arena; roots are
    /// owned by the caller's statement list.
    pub fn replace(&mut self, old: ExprId, new: ExprId) -> bool {
        let Some(parent) = self.parent(old) else {
            return false;
        };
        if new.index() >= self.exprs.len() {
            return false;
        }

        let swap = |slot: &mut ExprId| {
            if *slot == old {
                *slot = new;
                true
            } else {
                false
            }
        };

        let replaced = match &mut self.exprs[parent.index()].kind {
            ExprKind::Null
            | ExprKind::String(_)
            | ExprKind::Number(_)
            | ExprKind::Boolean(_)
            | ExprKind::Variable(_) => false,
            ExprKind::Block(child)
            | ExprKind::Group(child)
            | ExprKind::Unary { operand: child, .. }
            | ExprKind::Get { object: child, .. }
            | ExprKind::Section { expr: child, .. } => swap(child),
            ExprKind::Binary { left, right, .. } | ExprKind::Logical { left, right, .. } => {
                swap(left) || swap(right)
            }
            ExprKind::Conditional {
                condition,
                then_expr,
                else_expr,
            } => swap(condition) || swap(then_expr) || swap(else_expr),
            ExprKind::Call { callee, args } => {
                let range = *args;
                let start = range.start as usize;
                swap(callee)
                    || self.expr_lists[start..start + range.len()]
                        .iter_mut()
                        .any(swap)
            }
        };

        if replaced {
            self.parents[new.index()] = parent;
            self.parents[old.index()] = ExprId::INVALID;
        }
        replaced
    }
}

impl fmt::Debug for ExprArena {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ExprArena {{ {} exprs, {} lists }}",
            self.exprs.len(),
            self.expr_lists.len(),
        )
    }
}
