//! Stack guard for nested statement execution.
//!
//! `IF`, `WHILE`, `FOR` and condition handlers run their trailing statement
//! by re-entering the dispatcher, so a line such as
//! `IF (1 = 1) IF (1 = 1) WHILE ?go IF ...` recurses once per clause. Every
//! dispatch goes through [`ensure_sufficient_stack`], which grows the native
//! stack on demand instead of overflowing.
//!
//! - **Red zone**: 64KB left triggers growth
//! - **Segment**: 1MB per growth

const RED_ZONE: usize = 64 * 1024;

const STACK_PER_SEGMENT: usize = 1024 * 1024;

/// Run `f`, first growing the stack if fewer than `RED_ZONE` bytes remain.
///
/// On `wasm32` the closure is called directly.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_SEGMENT, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

#[cfg(test)]
mod tests;
