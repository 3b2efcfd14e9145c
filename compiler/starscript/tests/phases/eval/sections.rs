//! Section splitting.

use pretty_assertions::assert_eq;
use starscript::Vm;

use crate::common::{compile_ok, segments};

fn run(source: &str) -> Vec<(u8, String)> {
    let mut vm = Vm::new();
    vm.set("a", "X");
    vm.set("b", "Y");
    segments(&vm.run(&compile_ok(source)).unwrap())
}

#[test]
fn test_markers_split_segments() {
    assert_eq!(
        run("#0{a}#1{b}"),
        vec![(0, "X".to_string()), (1, "Y".to_string())]
    );
}

#[test]
fn test_no_markers_is_one_segment() {
    assert_eq!(run("just {a}"), vec![(0, "just X".to_string())]);
    assert_eq!(run(""), vec![(0, String::new())]);
}

#[test]
fn test_text_before_first_marker_is_section_zero() {
    assert_eq!(
        run("lead #5{b}"),
        vec![(0, "lead ".to_string()), (5, "Y".to_string())]
    );
}

#[test]
fn test_segments_keep_execution_order() {
    assert_eq!(
        run("#2{a}#0{b}#2 tail"),
        vec![
            (2, "X".to_string()),
            (0, "Y".to_string()),
            (2, " tail".to_string())
        ]
    );
}

#[test]
fn test_whole_output_is_concatenation() {
    let mut vm = Vm::new();
    vm.set("a", "X");
    let head = vm.run(&compile_ok("#0 one {a} #1 two")).unwrap();
    assert_eq!(head.to_string(), " one X  two");
    assert_eq!(head.content_of(1), Some(" two"));
}

#[test]
fn test_many_markers_render_and_drop() {
    let source = "#1a".repeat(30_000);
    let head = Vm::new().run(&compile_ok(&source)).unwrap();
    assert_eq!(head.segment_count(), 30_000);
    assert_eq!(head.to_string().len(), 30_000);
    drop(head);
}
