//! Compiler phase tests.
//!
//! Tests for the `star_compile` crate:
//! - Append-fusion produces the same output as the plain encoding
//! - Output is deterministic and the constant pool deduplicates

mod fusion;
mod layout;
