//! Starscript virtual machine.
//!
//! Runs a compiled [`Script`](star_compile::Script) against a globals
//! namespace (and optional locals) and produces the rendered output as a
//! chain of [`StringSegment`](star_value::StringSegment)s.
//!
//! # Architecture
//!
//! - [`Vm`]: owns the operand stack and namespaces; one per thread
//! - [`VmBuilder`] / [`VmOptions`]: construction and runtime switches
//! - `exec`: the dispatch loop and output buffer
//! - [`evaluate_binary`]: operator semantics shared by `AddConstant` and
//!   the plain binary opcodes
//!
//! # Re-exports
//!
//! `Value`, `Namespace`, `EvalError` and `EvalResult` come from
//! `star_value`.

mod builder;
mod exec;
mod operators;
mod vm;

pub use builder::{VmBuilder, VmOptions};
pub use operators::{evaluate_binary, evaluate_negate};
pub use vm::Vm;

pub use star_value::{EvalError, EvalResult, Namespace, StringSegment, Value};
