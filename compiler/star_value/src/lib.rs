//! Runtime values for Starscript.
//!
//! - [`Value`]: the closed set of runtime values
//! - [`Namespace`]: name-to-value map whose entries are closures, with
//!   dotted-path access into nested namespaces
//! - [`StringSegment`]: the sectioned output of one run
//! - [`Engine`] and [`FunctionContext`]: what a host function sees when a
//!   template calls it
//! - [`EvalError`]: runtime failures
//!
//! Everything here is `Send + Sync` so compiled scripts (which hold
//! constant values) can be shared across threads.

mod engine;
mod errors;
mod function;
mod namespace;
mod segment;
mod value;

pub use engine::Engine;
pub use errors::{
    already_disposed, argument_count, argument_type, empty_script, invalid_add, invalid_constant,
    negate_requires_number, not_callable, numbers_required, script_disposed, stack_underflow,
    truncated_bytecode, unknown_function, unknown_instruction, EvalError, EvalErrorKind,
    EvalResult,
};
pub use function::{ArgType, Constraint, FunctionContext};
pub use namespace::{Namespace, SharedNamespace, Supplier, ToNamespace, TO_STRING_KEY};
pub use segment::{Segments, StringSegment};
pub use value::{Callable, HostObject, NativeFn, Value, ValueKind};
