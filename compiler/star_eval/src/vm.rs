//! The machine and its host-facing API.

use star_compile::Script;
use star_value::{
    empty_script, stack_underflow, Engine, EvalResult, Namespace, StringSegment, ToNamespace,
    Value,
};

use crate::{VmBuilder, VmOptions};

/// Bytecode virtual machine.
///
/// Holds the globals namespace across runs. Locals shadow globals for one
/// run (or until replaced, with [`VmOptions::persistent_locals`]).
pub struct Vm {
    pub(crate) stack: Vec<Value>,
    globals: Namespace,
    locals: Option<Namespace>,
    options: VmOptions,
}

impl Default for Vm {
    fn default() -> Self {
        Vm::new()
    }
}

impl Vm {
    pub fn new() -> Self {
        Vm::from_parts(Namespace::new(), None, VmOptions::default())
    }

    pub fn builder() -> VmBuilder {
        VmBuilder::new()
    }

    pub(crate) fn from_parts(
        globals: Namespace,
        locals: Option<Namespace>,
        options: VmOptions,
    ) -> Self {
        Vm {
            stack: Vec::with_capacity(options.stack_capacity),
            globals,
            locals,
            options,
        }
    }

    pub fn options(&self) -> VmOptions {
        self.options
    }

    /// A fresh machine with a shallow copy of these globals and the same
    /// options. Nested maps stay shared.
    #[must_use]
    pub fn copy_globals_to_new(&self) -> Vm {
        Vm::from_parts(self.globals.copy(), None, self.options)
    }

    // Globals

    pub fn globals(&self) -> &Namespace {
        &self.globals
    }

    pub fn globals_mut(&mut self) -> &mut Namespace {
        &mut self.globals
    }

    /// Bind a global at a dotted name.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) {
        self.globals.set(name, value);
    }

    /// Bind a global supplier at a dotted name.
    pub fn set_supplier(&mut self, name: &str, supplier: impl Fn() -> Value + Send + Sync + 'static) {
        self.globals.set_supplier(name, supplier);
    }

    /// Remove a global at a dotted name.
    pub fn remove(&mut self, name: &str) -> bool {
        self.globals.remove(name)
    }

    /// Swap in a new globals namespace, returning the old one.
    pub fn replace_globals(&mut self, globals: Namespace) -> Namespace {
        std::mem::replace(&mut self.globals, globals)
    }

    // Locals

    pub fn locals(&self) -> Option<&Namespace> {
        self.locals.as_ref()
    }

    pub fn replace_locals(&mut self, locals: Namespace) -> Option<Namespace> {
        self.locals.replace(locals)
    }

    pub fn clear_locals(&mut self) {
        self.locals = None;
    }

    // Running

    /// Execute `script` to completion.
    ///
    /// Fails before dispatch if the script is disposed or empty. Locals are
    /// cleared afterwards unless `persistent_locals` is set, whether or not
    /// the run succeeded.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn run(&mut self, script: &Script) -> EvalResult<StringSegment> {
        let code = script.code()?;
        let constants = script.constants()?;
        if code.is_empty() {
            return Err(empty_script());
        }

        self.stack.clear();
        let result = self.execute(code, constants);
        self.stack.clear();
        if !self.options.persistent_locals {
            self.locals = None;
        }
        result
    }

    /// Execute with `locals` shadowing globals.
    pub fn run_with_locals(
        &mut self,
        script: &Script,
        locals: Namespace,
    ) -> EvalResult<StringSegment> {
        self.locals = Some(locals);
        self.run(script)
    }

    /// Execute with a host object's fields as locals.
    pub fn run_with_object(
        &mut self,
        script: &Script,
        object: &impl ToNamespace,
    ) -> EvalResult<StringSegment> {
        let mut locals = Namespace::new();
        object.to_namespace(&mut locals);
        self.run_with_locals(script, locals)
    }

    /// Resolve a plain variable name: locals first, then globals, else null.
    pub(crate) fn variable(&self, name: &str) -> Value {
        self.locals
            .as_ref()
            .and_then(|locals| locals.get_raw(name))
            .or_else(|| self.globals.get_raw(name))
            .unwrap_or_default()
    }
}

impl Engine for Vm {
    #[inline]
    fn pop(&mut self) -> EvalResult {
        self.stack.pop().ok_or_else(stack_underflow)
    }

    fn peek(&self, depth: usize) -> EvalResult {
        self.stack
            .len()
            .checked_sub(depth + 1)
            .and_then(|index| self.stack.get(index))
            .cloned()
            .ok_or_else(stack_underflow)
    }

    #[inline]
    fn push(&mut self, value: Value) {
        self.stack.push(value);
    }

    fn globals(&self) -> &Namespace {
        &self.globals
    }

    fn locals(&self) -> Option<&Namespace> {
        self.locals.as_ref()
    }
}
