//! Variable namespaces.
//!
//! A [`Namespace`] maps names to suppliers: zero-argument closures that
//! produce the current value on every read. Names may be dotted (`a.b.c`);
//! each segment but the last must resolve to a nested namespace held in a
//! [`Value::Map`].

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::engine::Engine;
use crate::errors::EvalResult;
use crate::function::{Constraint, FunctionContext};
use crate::value::Value;

/// Zero-argument value producer stored per entry.
pub type Supplier = Arc<dyn Fn() -> Value + Send + Sync>;

/// A namespace shared between a parent entry and whoever holds the map value.
pub type SharedNamespace = Arc<RwLock<Namespace>>;

/// Entry consulted when a map value is rendered as text.
pub const TO_STRING_KEY: &str = "_toString";

/// Host types that expose themselves as a namespace of fields.
pub trait ToNamespace {
    fn to_namespace(&self, namespace: &mut Namespace);
}

/// Ordered name-to-supplier map.
#[derive(Clone, Default)]
pub struct Namespace {
    entries: BTreeMap<String, Supplier>,
}

fn constant(value: Value) -> Supplier {
    Arc::new(move || value.clone())
}

impl Namespace {
    pub fn new() -> Self {
        Namespace::default()
    }

    /// Wrap in a lock for storage inside a [`Value::Map`].
    pub fn into_shared(self) -> SharedNamespace {
        Arc::new(RwLock::new(self))
    }

    /// Shallow copy: entries are shared, nested maps are shared.
    #[must_use]
    pub fn copy(&self) -> Namespace {
        self.clone()
    }

    // Writing

    /// Bind a constant value at a dotted name.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) {
        self.set_supplier_arc(name, constant(value.into()));
    }

    /// Bind a supplier at a dotted name; it runs on every read.
    pub fn set_supplier(&mut self, name: &str, supplier: impl Fn() -> Value + Send + Sync + 'static) {
        self.set_supplier_arc(name, Arc::new(supplier));
    }

    /// Dotted write. Intermediate segments that are missing or not maps are
    /// replaced with fresh maps.
    fn set_supplier_arc(&mut self, name: &str, supplier: Supplier) {
        let Some((head, rest)) = name.split_once('.') else {
            self.set_raw(name, supplier);
            return;
        };
        if let Some(Value::Map(map)) = self.get_raw(head) {
            map.write().set_supplier_arc(rest, supplier);
            return;
        }
        let mut child = Namespace::new();
        child.set_supplier_arc(rest, supplier);
        self.set_raw(head, constant(Value::Map(child.into_shared())));
    }

    /// Bind a supplier under `name` exactly as written, dots included.
    pub fn set_raw(&mut self, name: &str, supplier: Supplier) {
        self.entries.insert(name.to_owned(), supplier);
    }

    /// Bind a host function working directly on the engine.
    pub fn set_function(
        &mut self,
        name: &str,
        f: impl Fn(&mut dyn Engine, u8) -> EvalResult + Send + Sync + 'static,
    ) {
        self.set(name, Value::function(f));
    }

    /// Bind a host function that receives a [`FunctionContext`] after its
    /// argument count has been checked against `constraint`.
    pub fn set_contextual(
        &mut self,
        name: &str,
        constraint: Constraint,
        f: impl Fn(&mut FunctionContext<'_>) -> EvalResult + Send + Sync + 'static,
    ) {
        let label: Arc<str> = Arc::from(name.rsplit('.').next().unwrap_or(name));
        self.set_function(name, move |engine, argc| {
            let mut ctx = FunctionContext::new(&label, engine, argc);
            ctx.constrain(constraint)?;
            f(&mut ctx)
        });
    }

    /// Text used when this namespace is rendered.
    pub fn set_to_string(&mut self, f: impl Fn() -> String + Send + Sync + 'static) {
        self.set_raw(TO_STRING_KEY, Arc::new(move || Value::from(f())));
    }

    /// Create a nested namespace at `name`, fill it with `init`, and return
    /// the shared handle.
    pub fn new_sub_map(&mut self, name: &str, init: impl FnOnce(&mut Namespace)) -> SharedNamespace {
        let mut child = Namespace::new();
        init(&mut child);
        let shared = child.into_shared();
        self.set(name, Value::Map(Arc::clone(&shared)));
        shared
    }

    /// Expose a host object's fields under `name`.
    pub fn set_object(&mut self, name: &str, object: &impl ToNamespace) -> SharedNamespace {
        self.new_sub_map(name, |ns| object.to_namespace(ns))
    }

    // Reading

    /// The supplier bound to `name` exactly as written.
    pub fn supplier(&self, name: &str) -> Option<Supplier> {
        self.entries.get(name).cloned()
    }

    /// Evaluate the entry bound to `name` exactly as written.
    pub fn get_raw(&self, name: &str) -> Option<Value> {
        self.entries.get(name).map(|supplier| supplier())
    }

    /// Evaluate a dotted name. A missing or non-map intermediate segment
    /// resolves to `None`.
    ///
    /// Each nested lock is released before the supplier runs, so suppliers
    /// may read the namespace they live in.
    pub fn get(&self, name: &str) -> Option<Value> {
        let Some((head, mut rest)) = name.split_once('.') else {
            return self.get_raw(name);
        };
        let mut current = self.get_raw(head)?;
        loop {
            let Value::Map(map) = current else {
                return None;
            };
            let (segment, tail) = match rest.split_once('.') {
                Some((segment, tail)) => (segment, Some(tail)),
                None => (rest, None),
            };
            let supplier = map.read().supplier(segment)?;
            current = supplier();
            match tail {
                Some(tail) => rest = tail,
                None => return Some(current),
            }
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Remove a dotted name. Returns whether an entry was removed.
    pub fn remove(&mut self, name: &str) -> bool {
        match name.split_once('.') {
            None => self.remove_raw(name),
            Some((head, rest)) => match self.get_raw(head) {
                Some(Value::Map(map)) => map.write().remove(rest),
                _ => false,
            },
        }
    }

    pub fn remove_raw(&mut self, name: &str) -> bool {
        self.entries.remove(name).is_some()
    }

    /// Entry names in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl fmt::Debug for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.keys()).finish()
    }
}
