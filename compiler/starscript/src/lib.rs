//! Starscript: an embeddable templating language.
//!
//! Template text mixes literal output with `{expr}` blocks:
//!
//! ```text
//! Hello {user.name}, you have {count > 1 ? count + ' items' : 'one item'}.
//! ```
//!
//! A template goes through four stages. Each lives in its own crate and is
//! re-exported here:
//!
//! | Stage | Crate | Entry point |
//! |---|---|---|
//! | Tokens | `star_lexer` | [`Lexer`] |
//! | AST | `star_parse` | [`parse`] |
//! | Bytecode | `star_compile` | [`compile`] |
//! | Output | `star_eval` | [`Vm::run`] |
//!
//! Compile once, run many times:
//!
//! ```ignore
//! let script = starscript::compile_source("Hi {name}!")?;
//! let mut vm = starscript::Vm::new();
//! vm.set("name", "Ada");
//! assert_eq!(vm.run(&script)?.to_string(), "Hi Ada!");
//! ```

mod error;
mod tracing_setup;

pub use error::Error;
pub use tracing_setup::init_tracing;

pub use star_compile::{compile, CompileError, Compiler, OpCode, Script, ScriptBuilder};
pub use star_eval::{evaluate_binary, Vm, VmBuilder, VmOptions};
pub use star_ir::{ExprArena, ExprId, ExprKind, Span, Token, TokenKind, VariableReplacer};
pub use star_lexer::{lex_all, Lexer};
pub use star_parse::{parse, ParseError, ParseErrorKind, ParseResult};
pub use star_value::{
    ArgType, Callable, Constraint, Engine, EvalError, EvalErrorKind, EvalResult, FunctionContext,
    HostObject, Namespace, SharedNamespace, StringSegment, ToNamespace, Value, ValueKind,
};

/// Parse and compile `source`, rejecting templates with syntax errors.
pub fn compile_source(source: &str) -> Result<Script, Error> {
    let result = parse(source);
    if result.has_errors() {
        tracing::debug!(errors = result.errors.len(), "template has syntax errors");
        return Err(Error::Parse(result.errors));
    }
    Ok(compile(&result)?)
}

/// Compile `source` and run it once on `vm`.
pub fn render(vm: &mut Vm, source: &str) -> Result<String, Error> {
    let script = compile_source(source)?;
    Ok(vm.run(&script)?.to_string())
}
