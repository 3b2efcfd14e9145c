//! Variable replacement ahead of compilation.

use pretty_assertions::assert_eq;
use starscript::{compile, parse, VariableReplacer, Vm};

#[test]
fn test_replaced_names_resolve_to_new_targets() {
    let mut result = parse("{player.name} scored {player.score}");
    let mut replacer = VariableReplacer::new();
    replacer.try_add("player", || "game.current".to_string());
    assert_eq!(result.replace_variables(&replacer), 2);

    let script = compile(&result).unwrap();
    let mut vm = Vm::new();
    vm.set("game.current.name", "Ada");
    vm.set("game.current.score", 12);
    assert_eq!(vm.run(&script).unwrap().to_string(), "Ada scored 12");
}
