//! Targets without a fiber concept (and Miri)

use stackprobe_core::ExecutionContext;

/// Always the sentinel: one execution context per OS thread
#[inline(always)]
pub fn current_fiber() -> usize {
    ExecutionContext::SENTINEL.as_raw()
}
