//! Script layout properties.

use pretty_assertions::assert_eq;
use starscript::{compile, parse};

use crate::common::compile_ok;

#[test]
fn test_two_compilations_are_byte_identical() {
    let result = parse("#0 Hello {user.name}! #1{count > 1 ? count + ' items' : 'one'}");
    let first = compile(&result).unwrap();
    let second = compile(&result).unwrap();
    assert_eq!(first.code().unwrap(), second.code().unwrap());
    assert_eq!(first.constants().unwrap(), second.constants().unwrap());
    assert_eq!(first.disassemble().unwrap(), second.disassemble().unwrap());
}

#[test]
fn test_repeated_literals_share_one_constant() {
    let script = compile_ok("{'x'}{'x'} {n + 2} {m + 2} x");
    let strings: Vec<_> = script
        .constants()
        .unwrap()
        .iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(strings, vec!["x", " ", "n", "2", "m", " x"]);
}

#[test]
fn test_every_script_ends_with_end() {
    for source in ["", "text", "{a}", "#3{a ? b : c}"] {
        let listing = compile_ok(source).disassemble().unwrap();
        assert!(listing.trim_end().ends_with("End"), "{source}:\n{listing}");
    }
}
