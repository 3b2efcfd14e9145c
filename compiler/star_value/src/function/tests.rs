use pretty_assertions::assert_eq;

use super::*;
use crate::errors::{stack_underflow, EvalErrorKind};
use crate::namespace::Namespace;

/// Bare operand stack standing in for the VM.
#[derive(Default)]
struct StackEngine {
    stack: Vec<Value>,
    globals: Namespace,
}

impl StackEngine {
    fn with_args(args: impl IntoIterator<Item = Value>) -> Self {
        StackEngine {
            stack: args.into_iter().collect(),
            globals: Namespace::new(),
        }
    }
}

impl Engine for StackEngine {
    fn pop(&mut self) -> EvalResult {
        self.stack.pop().ok_or_else(stack_underflow)
    }

    fn peek(&self, depth: usize) -> EvalResult {
        self.stack
            .len()
            .checked_sub(depth + 1)
            .and_then(|i| self.stack.get(i).cloned())
            .ok_or_else(stack_underflow)
    }

    fn push(&mut self, value: Value) {
        self.stack.push(value);
    }

    fn globals(&self) -> &Namespace {
        &self.globals
    }

    fn locals(&self) -> Option<&Namespace> {
        None
    }
}

#[test]
fn constraint_tests() {
    assert!(Constraint::None.test(0));
    assert!(Constraint::None.test(255));
    assert!(Constraint::Exactly(2).test(2));
    assert!(!Constraint::Exactly(2).test(1));
    assert!(Constraint::AtLeast(1).test(3));
    assert!(!Constraint::AtLeast(1).test(0));
    assert!(Constraint::AtMost(1).test(0));
    assert!(!Constraint::AtMost(1).test(2));
    assert!(Constraint::Within(1, 3).test(3));
    assert!(!Constraint::Within(1, 3).test(4));
}

#[test]
fn constraint_messages() {
    assert_eq!(Constraint::Exactly(1).to_string(), "1 argument");
    assert_eq!(Constraint::Exactly(2).to_string(), "2 arguments");
    assert_eq!(Constraint::AtLeast(1).to_string(), "at least 1 argument");
    assert_eq!(Constraint::AtMost(3).to_string(), "at most 3 arguments");
    assert_eq!(Constraint::Within(1, 2).to_string(), "1-2 arguments");
}

#[test]
fn constrain_reports_count() {
    let mut engine = StackEngine::with_args([Value::from(1)]);
    let ctx = FunctionContext::new("pow", &mut engine, 1);
    let err = ctx.constrain(Constraint::Exactly(2)).unwrap_err();
    assert_eq!(err.message, "pow() requires 2 arguments, got 1.");
    assert!(matches!(err.kind, EvalErrorKind::ArgumentCount { got: 1, .. }));
}

#[test]
fn typed_pops_run_last_to_first() {
    let mut engine = StackEngine::with_args([Value::from("abc"), Value::from(2)]);
    let mut ctx = FunctionContext::new("sub", &mut engine, 2);
    assert_eq!(ctx.next_number(2).unwrap(), 2.0);
    assert_eq!(&*ctx.next_string(1).unwrap(), "abc");
}

#[test]
fn typed_pop_mismatch() {
    let mut engine = StackEngine::with_args([Value::from("x")]);
    let mut ctx = FunctionContext::new("round", &mut engine, 1);
    let err = ctx.next_number(1).unwrap_err();
    assert_eq!(err.message, "Argument 1 of round() needs to be a number.");

    let mut engine = StackEngine::with_args([Value::from(1)]);
    let mut ctx = FunctionContext::new("not", &mut engine, 1);
    let err = ctx.next_boolean(1).unwrap_err();
    assert_eq!(
        err.message,
        "Argument 1 of not() needs to be a boolean (true/false)."
    );
}

#[test]
fn args_come_back_in_call_order() {
    let mut engine =
        StackEngine::with_args([Value::from(1), Value::from(2), Value::from(3)]);
    let mut ctx = FunctionContext::new("max", &mut engine, 3);
    assert_eq!(
        ctx.args().unwrap(),
        vec![Value::from(1), Value::from(2), Value::from(3)]
    );
    assert!(engine.stack.is_empty());
}

#[test]
fn pop_past_bottom_is_an_error() {
    let mut engine = StackEngine::default();
    let mut ctx = FunctionContext::new("f", &mut engine, 1);
    let err = ctx.pop_arg().unwrap_err();
    assert_eq!(err.kind, EvalErrorKind::StackUnderflow);
}

#[test]
fn contextual_function_checks_arity() {
    let mut ns = Namespace::new();
    ns.set_contextual("math.double", Constraint::Exactly(1), |ctx| {
        Ok(Value::from(ctx.next_number(1)? * 2.0))
    });
    let Some(Value::Function(double)) = ns.get("math.double") else {
        panic!("math.double is not a function");
    };

    let mut engine = StackEngine::with_args([Value::from(21)]);
    assert_eq!(double.call(&mut engine, 1).unwrap(), Value::from(42));

    let mut engine = StackEngine::default();
    let err = double.call(&mut engine, 0).unwrap_err();
    assert_eq!(err.message, "double() requires 1 argument, got 0.");
}

#[test]
fn lookup_reads_globals() {
    let mut engine = StackEngine::default();
    engine.globals.set("a.b", 3);
    assert_eq!(engine.lookup("a.b"), Some(Value::from(3)));
    assert_eq!(engine.lookup("a.c"), None);
}
