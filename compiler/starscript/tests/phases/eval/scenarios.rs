//! Host-facing scenarios.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use pretty_assertions::assert_eq;
use starscript::{render, Constraint, Value, Vm};

use crate::common::{compile_ok, render_empty, render_on};

#[test]
fn test_user_profile_and_removal() {
    let mut vm = Vm::new();
    vm.set("user.name", "Greem");
    vm.globals_mut()
        .set_function("user.age", |_, _| Ok(Value::from(5)));

    let script = compile_ok("Name: {user.name}  Age: {user.age()}");
    assert_eq!(vm.run(&script).unwrap().to_string(), "Name: Greem  Age: 5");

    assert!(vm.remove("user.name"));
    assert_eq!(vm.run(&script).unwrap().to_string(), "Name:   Age: 5");
}

#[test]
fn test_missing_values_render_empty() {
    assert_eq!(render_empty("[{user.name}]"), "[]");

    let mut vm = Vm::new();
    vm.set("user.age", 3);
    assert_eq!(render_on(&mut vm, "[{user.name}]"), "[]");
}

#[test]
fn test_suppliers_recompute_each_run() {
    let ticks = Arc::new(AtomicU32::new(0));
    let mut vm = Vm::new();
    let source = Arc::clone(&ticks);
    vm.set_supplier("tick", move || Value::from(source.fetch_add(1, Ordering::SeqCst)));

    let script = compile_ok("tick {tick}");
    let outputs: Vec<_> = (0..3)
        .map(|_| vm.run(&script).unwrap().to_string())
        .collect();
    assert_eq!(outputs, vec!["tick 0", "tick 1", "tick 2"]);
}

#[test]
fn test_short_circuit_never_calls_skipped_side() {
    let calls = Arc::new(AtomicU32::new(0));
    let mut vm = Vm::new();
    let seen = Arc::clone(&calls);
    vm.globals_mut()
        .set_contextual("touch", Constraint::Exactly(0), move |_| {
            seen.fetch_add(1, Ordering::SeqCst);
            Ok(Value::from(true))
        });

    assert_eq!(render_on(&mut vm, "{false and touch()}"), "false");
    assert_eq!(render_on(&mut vm, "{true or touch()}"), "true");
    assert_eq!(render_on(&mut vm, "{null and touch()}"), "");
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    assert_eq!(render_on(&mut vm, "{null or touch()}"), "true");
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_render_helper() {
    let mut vm = Vm::new();
    vm.set("who", "world");
    assert_eq!(render(&mut vm, "Hello, {who}!").unwrap(), "Hello, world!");
}

#[test]
fn test_one_script_many_globals() {
    let script = compile_ok("{greeting}, {name}");
    let mut english = Vm::new();
    english.set("greeting", "Hello");
    english.set("name", "Ada");
    let mut french = english.copy_globals_to_new();
    french.set("greeting", "Bonjour");

    assert_eq!(english.run(&script).unwrap().to_string(), "Hello, Ada");
    assert_eq!(french.run(&script).unwrap().to_string(), "Bonjour, Ada");
}

#[test]
fn test_disposed_script_stops_running() {
    let script = compile_ok("{1}");
    let mut vm = Vm::new();
    assert_eq!(vm.run(&script).unwrap().to_string(), "1");
    script.dispose().unwrap();
    assert!(vm.run(&script).is_err());
    assert!(script.disassemble().is_err());
}

#[test]
fn test_extreme_numbers_stay_readable() {
    assert_eq!(render_empty("{1 / 0}"), "Infinity");
    assert_eq!(render_empty("{-1 / 0}"), "-Infinity");
}
