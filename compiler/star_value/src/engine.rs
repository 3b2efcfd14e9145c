//! What a host function sees of the running machine.

use crate::errors::EvalResult;
use crate::namespace::Namespace;
use crate::value::Value;

/// Operand-stack and namespace access handed to host functions.
///
/// A function called with `argc` arguments finds them on top of the stack,
/// the last argument topmost, and must pop exactly `argc` values. The callee
/// itself sits just below the arguments and is removed by the machine once
/// the function returns.
pub trait Engine {
    /// Pop the top value. Fails with a stack-underflow error when empty.
    fn pop(&mut self) -> EvalResult;

    /// Read the value `depth` slots below the top without removing it.
    fn peek(&self, depth: usize) -> EvalResult;

    fn push(&mut self, value: Value);

    fn globals(&self) -> &Namespace;

    fn locals(&self) -> Option<&Namespace>;

    /// Resolve a (possibly dotted) name, locals first.
    fn lookup(&self, name: &str) -> Option<Value> {
        self.locals()
            .and_then(|locals| locals.get(name))
            .or_else(|| self.globals().get(name))
    }
}
