//! Fused append instructions against their unfused equivalents.
//!
//! Wrapping a block's child in parentheses hides it behind a `Group`, which
//! turns fusion off, so each pair below is the same template compiled both
//! ways.

use pretty_assertions::assert_eq;
use starscript::{Value, Vm};

use crate::common::{compile_ok, render_on};

fn vm() -> Vm {
    let mut vm = Vm::new();
    vm.set("name", "Ada");
    vm.set("user.name", "Greem");
    vm.set("user.tags.first", "admin");
    vm.globals_mut()
        .set_function("shout", |engine, argc| {
            let mut parts = Vec::new();
            for _ in 0..argc {
                parts.push(engine.pop()?.to_string());
            }
            parts.reverse();
            Ok(Value::from(parts.join(" ").to_uppercase()))
        });
    vm
}

#[test]
fn test_fused_and_unfused_render_identically() {
    let pairs = [
        ("{'text'}", "{('text')}"),
        ("{name}", "{(name)}"),
        ("{user.name}", "{(user.name)}"),
        ("{user.tags.first}", "{(user.tags.first)}"),
        ("{shout(name, 'x')}", "{(shout(name, 'x'))}"),
        ("{missing}", "{(missing)}"),
        ("{user.missing}", "{(user.missing)}"),
    ];
    let mut vm = vm();
    for (fused, plain) in pairs {
        assert_eq!(
            render_on(&mut vm, fused),
            render_on(&mut vm, plain),
            "{fused} vs {plain}"
        );
    }
}

#[test]
fn test_fused_forms_use_append_opcodes() {
    for (source, op) in [
        ("{'text'}", "ConstantAppend"),
        ("{name}", "VariableAppend"),
        ("{user.name}", "VariableGetAppend"),
        ("{user.tags.first}", "GetAppend"),
        ("{shout()}", "CallAppend"),
    ] {
        let listing = compile_ok(source).disassemble().unwrap();
        assert!(listing.contains(op), "{source}:\n{listing}");
        assert!(!listing.contains(" Append\n"), "{source}:\n{listing}");
    }
}

#[test]
fn test_unfused_forms_append_separately() {
    for source in ["{('text')}", "{(name)}", "{(user.name)}", "{(shout())}"] {
        let listing = compile_ok(source).disassemble().unwrap();
        assert!(listing.contains(" Append\n"), "{source}:\n{listing}");
    }
}
