//! Runtime failures.

use pretty_assertions::assert_eq;
use starscript::{render, Error, EvalErrorKind, Value, Vm};

fn eval_error(vm: &mut Vm, source: &str) -> starscript::EvalError {
    match render(vm, source) {
        Err(Error::Eval(error)) => error,
        other => panic!("{source}: expected a runtime error, got {other:?}"),
    }
}

#[test]
fn test_string_minus_number() {
    let error = eval_error(&mut Vm::new(), r#"{"a" - 1}"#);
    assert_eq!(error.message, "Can only subtract 2 numbers.");
    assert_eq!(error.to_string(), "Can only subtract 2 numbers.");
}

#[test]
fn test_operator_messages() {
    let mut vm = Vm::new();
    for (source, message) in [
        ("{1 + true}", "Can only add 2 numbers, or 1 string and any other value."),
        ("{-'x'}", "Negation requires a number."),
        ("{'a' < 1}", "< operation requires 2 numbers."),
        ("{null * 2}", "Can only multiply 2 numbers."),
        ("{true >> 1}", ">> operation requires 2 numbers."),
    ] {
        assert_eq!(eval_error(&mut vm, source).message, message, "{source}");
    }
}

#[test]
fn test_call_errors() {
    let mut vm = Vm::new();
    vm.set("s", "text");
    assert_eq!(
        eval_error(&mut vm, "{nothing()}").kind,
        EvalErrorKind::UnknownFunction
    );
    assert_eq!(
        eval_error(&mut vm, "{s()}").message,
        "Tried to call String, can only call functions."
    );
}

#[test]
fn test_host_function_errors_propagate() {
    let mut vm = Vm::new();
    vm.globals_mut().set_function("fail", |_, _| {
        Err(starscript::EvalError::new("host says no"))
    });
    vm.globals_mut()
        .set_function("ok", |_, _| Ok(Value::from("fine")));
    let error = eval_error(&mut vm, "{ok()} {fail()}");
    assert_eq!(error.message, "host says no");
    assert_eq!(
        error.kind,
        EvalErrorKind::Custom {
            message: "host says no".to_string()
        }
    );
}
