//! Bytecode compiler for Starscript.
//!
//! Walks a [`ParseResult`](star_parse::ParseResult) once and emits a flat
//! instruction stream plus a constant pool:
//!
//! ```text
//! parse("Hi {name}!")
//!   -> ConstantAppend 0 "Hi "
//!      VariableAppend 1 "name"
//!      ConstantAppend 2 "!"
//!      End
//! ```
//!
//! The output is an immutable [`Script`], shared freely between threads and
//! run by any number of machines.

mod builder;
mod compiler;
mod error;
mod opcode;
mod script;

pub use builder::ScriptBuilder;
pub use compiler::{compile, Compiler};
pub use error::CompileError;
pub use opcode::{OpCode, Operands};
pub use script::Script;
