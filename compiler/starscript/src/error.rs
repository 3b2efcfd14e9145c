//! Unified error for the one-call helpers.

use star_compile::CompileError;
use star_parse::ParseError;
use star_value::EvalError;

/// Any failure between source text and rendered output.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Every syntax error found in the template, in source order.
    #[error("{}", join_lines(.0))]
    Parse(Vec<ParseError>),

    #[error(transparent)]
    Compile(#[from] CompileError),

    #[error(transparent)]
    Eval(#[from] EvalError),
}

fn join_lines(errors: &[ParseError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}
