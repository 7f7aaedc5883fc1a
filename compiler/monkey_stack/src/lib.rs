//! Stack growth for deeply nested programs.
//!
//! The parser and the evaluator recurse once per nesting level of the
//! source, so `((((...))))` or a deeply recursive Monkey function can run
//! past the native stack. Wrapping each recursive step in
//! [`ensure_sufficient_stack`] moves the work onto a freshly allocated
//! segment whenever the current one is close to running out.
//!
//! On wasm32 the wrapper is a plain call.

/// Grow when less than this much stack remains (128KB).
const RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated stack segment (2MB).
const SEGMENT_SIZE: usize = 2 * 1024 * 1024;

/// Run `f`, first switching to a new stack segment if the current one is
/// nearly exhausted.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
