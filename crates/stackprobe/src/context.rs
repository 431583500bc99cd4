//! Execution-context identifier
//!
//! Fibers share an OS thread but each has its own stack, so a stack limit
//! cached under one fiber is wrong under another. Compare the handle before
//! reusing a cached limit and re-probe when it changed.

use crate::arch;
use stackprobe_core::ExecutionContext;

/// Identity of the fiber currently running on this thread
///
/// Returns [`ExecutionContext::SENTINEL`] on targets without fibers.
#[inline]
pub fn current_execution_context() -> ExecutionContext {
    ExecutionContext::from_raw(arch::current_fiber())
}
