//! Execution-context handle type

use core::fmt;

/// Identity of the fiber currently running on an OS thread
///
/// Opaque and pointer-sized. Two handles compare equal iff they were read
/// while the same fiber was active. A handle is only meaningful until the
/// next suspension point; re-query instead of caching it.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct ExecutionContext(usize);

impl ExecutionContext {
    /// Handle reported on targets with no fiber concept
    pub const SENTINEL: ExecutionContext = ExecutionContext(0);

    /// Wrap a raw fiber address
    #[inline]
    pub const fn from_raw(raw: usize) -> Self {
        ExecutionContext(raw)
    }

    /// Get the raw value
    #[inline]
    pub const fn as_raw(self) -> usize {
        self.0
    }

    /// Check if this is the sentinel
    #[inline]
    pub const fn is_sentinel(self) -> bool {
        self.0 == Self::SENTINEL.0
    }
}

impl<T> From<*mut T> for ExecutionContext {
    #[inline]
    fn from(ptr: *mut T) -> Self {
        ExecutionContext(ptr as usize)
    }
}

impl fmt::Debug for ExecutionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_sentinel() {
            write!(f, "ExecutionContext(SENTINEL)")
        } else {
            write!(f, "ExecutionContext({:#x})", self.0)
        }
    }
}
