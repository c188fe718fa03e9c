//! Explicit call tracing for hub operations.
//!
//! Instead of intercepting calls implicitly, call sites wrap a hub operation in
//! [`timed`], which emits one `tracing` event with the operation name and its
//! elapsed time once the closure returns.

use std::time::Instant;

use tracing::debug;

/// Run `op` and log how long it took under the name `name`.
pub fn timed<T>(name: &'static str, op: impl FnOnce() -> T) -> T {
    let started = Instant::now();
    let result = op();
    debug!(
        operation = name,
        elapsed_us = started.elapsed().as_micros() as u64,
        "hub operation finished"
    );
    result
}
