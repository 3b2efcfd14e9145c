//! Variable replacement over a parsed tree.
//!
//! Rewrites references such as `player.name` into other dotted references
//! (`user.profile.name`) in place, so a template written against one
//! namespace layout can run against another without re-parsing.

use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::{Expr, ExprArena, ExprId, ExprKind};

type Replacement = Box<dyn Fn() -> String + Send + Sync>;

/// Maps dotted variable names to replacement dotted names.
///
/// The replacement is produced by a closure at [`apply`](Self::apply) time.
#[derive(Default)]
pub struct VariableReplacer {
    replacers: FxHashMap<String, Replacement>,
}

impl VariableReplacer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a replacement for `name`.
    ///
    /// Returns `false` and keeps the existing entry if `name` is already
    /// registered.
    pub fn try_add(
        &mut self,
        name: impl Into<String>,
        replacement: impl Fn() -> String + Send + Sync + 'static,
    ) -> bool {
        let name = name.into();
        if self.replacers.contains_key(&name) {
            return false;
        }
        self.replacers.insert(name, Box::new(replacement));
        true
    }

    pub fn len(&self) -> usize {
        self.replacers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.replacers.is_empty()
    }

    /// Replace every matching `Variable`/`Get` chain reachable from `roots`.
    ///
    /// Roots that match are swapped in the slice; inner nodes go through
    /// [`ExprArena::replace`]. A replaced chain is not searched further.
    /// Returns the number of replacements made.
    pub fn apply(&self, arena: &mut ExprArena, roots: &mut [ExprId]) -> usize {
        let mut replaced = 0;
        for root in roots.iter_mut() {
            let mut pending = vec![*root];
            while let Some(id) = pending.pop() {
                if let Some(new) = self.replacement_for(arena, id) {
                    if id == *root {
                        *root = new;
                    } else {
                        arena.replace(id, new);
                    }
                    replaced += 1;
                    continue;
                }
                pending.extend(arena.children(id));
            }
        }
        replaced
    }

    fn replacement_for(&self, arena: &mut ExprArena, id: ExprId) -> Option<ExprId> {
        let name = dotted_name(arena, id)?;
        let replacer = self.replacers.get(&name)?;
        let target = replacer();
        let span = arena.get_expr(id).span;

        let mut parts = target.split('.').filter(|part| !part.is_empty());
        let first = parts.next()?;
        let mut expr = arena.alloc_expr(Expr::new(ExprKind::Variable(Arc::from(first)), span));
        for part in parts {
            expr = arena.alloc_expr(Expr::new(
                ExprKind::Get {
                    object: expr,
                    name: Arc::from(part),
                },
                span,
            ));
        }
        Some(expr)
    }
}

/// `a.b.c` for a `Get(Get(Variable(a), b), c)` chain, `None` for anything
/// else (including a chain with an empty field name).
pub fn dotted_name(arena: &ExprArena, id: ExprId) -> Option<String> {
    let mut parts = Vec::new();
    let mut current = id;
    loop {
        match &arena.try_get_expr(current)?.kind {
            ExprKind::Variable(name) => {
                parts.push(name.clone());
                break;
            }
            ExprKind::Get { object, name } if !name.is_empty() => {
                parts.push(name.clone());
                current = *object;
            }
            _ => return None,
        }
    }
    parts.reverse();
    Some(parts.join("."))
}

impl fmt::Debug for VariableReplacer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.replacers.keys().collect();
        names.sort();
        f.debug_struct("VariableReplacer")
            .field("names", &names)
            .finish()
    }
}
