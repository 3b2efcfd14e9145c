//! Shared test utilities for phase tests.

use starscript::{compile_source, Script, StringSegment, Vm};

/// Compile `source`, panicking with the errors if it does not compile.
pub fn compile_ok(source: &str) -> Script {
    match compile_source(source) {
        Ok(script) => script,
        Err(error) => panic!("{source:?} failed to compile:\n{error}"),
    }
}

/// Render `source` once on `vm`.
pub fn render_on(vm: &mut Vm, source: &str) -> String {
    vm.run(&compile_ok(source))
        .unwrap_or_else(|error| panic!("{source:?} failed to run: {error}"))
        .to_string()
}

/// Render `source` with no variables bound.
pub fn render_empty(source: &str) -> String {
    render_on(&mut Vm::new(), source)
}

/// `(index, content)` for each segment in the chain.
pub fn segments(head: &StringSegment) -> Vec<(u8, String)> {
    head.iter()
        .map(|segment| (segment.index(), segment.content().to_string()))
        .collect()
}

/// Error messages from parsing `source`.
pub fn parse_messages(source: &str) -> Vec<String> {
    starscript::parse(source)
        .errors
        .into_iter()
        .map(|error| error.message)
        .collect()
}
