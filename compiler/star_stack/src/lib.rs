//! Stack safety for the recursive parts of the pipeline.
//!
//! The parser descends once per precedence level and the compiler once per
//! node, so a template like `{((((((...))))))}` nests as deep as its author
//! wants. Both wrap their recursive entry points in
//! [`ensure_sufficient_stack`], which grows the stack on demand instead of
//! overflowing.
//!
//! On `wasm32` the guard is a plain call.

/// Grow when less than this much stack remains (100KB).
const RED_ZONE: usize = 100 * 1024;

/// Size of each new stack segment (1MB).
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Run `f`, first growing the stack if fewer than [`RED_ZONE`] bytes remain.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
