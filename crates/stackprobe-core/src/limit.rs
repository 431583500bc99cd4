//! Safe stack limit arithmetic
//!
//! The OS keeps a guard page below the committed stack and, once that page is
//! touched, commits `overflow_guarantee` more bytes so the fault handler has
//! room to run. A proactive depth check has to leave both regions alone:
//!
//! ```text
//!   high addresses
//!   +---------------------+
//!   |   usable stack      |
//!   +---------------------+  <- safe limit
//!   |   guard page        |  GUARD_PAGE_SIZE
//!   +---------------------+
//!   |   overflow reserve  |  max(overflow_guarantee, minimum)
//!   +---------------------+  <- stack_low
//!   low addresses
//! ```

use crate::constants::{GUARD_PAGE_SIZE, MIN_GUARANTEE_32, MIN_GUARANTEE_64, PLATFORM_MIN_GUARANTEE};
use crate::traits::ThreadEnvironment;
use core::fmt;

/// Lowest address usable for the given raw thread-environment values.
///
/// Uses this build's pointer width to pick the minimum guarantee.
#[inline]
pub const fn safe_stack_limit(stack_low: usize, overflow_guarantee: usize) -> usize {
    safe_stack_limit_with(stack_low, overflow_guarantee, PLATFORM_MIN_GUARANTEE)
}

/// Same as [`safe_stack_limit`] with an explicit minimum guarantee.
///
/// Saturates at `usize::MAX` instead of wrapping, so a corrupt descriptor
/// yields "no usable stack" rather than a low bogus limit.
#[inline]
pub const fn safe_stack_limit_with(
    stack_low: usize,
    overflow_guarantee: usize,
    min_guarantee: usize,
) -> usize {
    let effective = if overflow_guarantee > min_guarantee {
        overflow_guarantee
    } else {
        min_guarantee
    };
    stack_low
        .saturating_add(effective)
        .saturating_add(GUARD_PAGE_SIZE)
}

/// Minimum overflow guarantee the OS enforces for a pointer width in bytes.
#[inline]
pub const fn min_guarantee_for(pointer_bytes: usize) -> usize {
    if pointer_bytes <= 4 {
        MIN_GUARANTEE_32
    } else {
        MIN_GUARANTEE_64
    }
}

/// Snapshot of the two raw thread-environment values
///
/// The live accessors never build one of these; it exists so callers and
/// tests can feed synthetic values through the same [`ThreadEnvironment`]
/// path the real accessor uses.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct StackDescriptor {
    /// Lowest address of the reserved stack region.
    pub stack_low: usize,

    /// Bytes kept accessible after a stack-overflow fault.
    pub overflow_guarantee: usize,
}

impl StackDescriptor {
    /// Create a descriptor from raw values
    #[inline]
    pub const fn new(stack_low: usize, overflow_guarantee: usize) -> Self {
        Self { stack_low, overflow_guarantee }
    }

    /// Copy of this descriptor with `stack_low` moved up by `delta` bytes
    #[inline]
    pub const fn shifted(self, delta: usize) -> Self {
        Self::new(self.stack_low.wrapping_add(delta), self.overflow_guarantee)
    }
}

impl ThreadEnvironment for StackDescriptor {
    #[inline]
    fn stack_low(&self) -> usize {
        self.stack_low
    }

    #[inline]
    fn overflow_guarantee(&self) -> usize {
        self.overflow_guarantee
    }
}

impl fmt::Debug for StackDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "StackDescriptor {{ stack_low: {:#x}, overflow_guarantee: {:#x} }}",
            self.stack_low, self.overflow_guarantee
        )
    }
}

/// Reserved stack range of a thread, `[low, high)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StackBounds {
    /// Lowest reserved address
    pub low: usize,

    /// One past the highest address (the initial stack pointer side)
    pub high: usize,
}

impl StackBounds {
    /// Total reserved size in bytes
    #[inline]
    pub const fn size(&self) -> usize {
        self.high.saturating_sub(self.low)
    }

    /// Check if an address falls inside the reserved range
    #[inline]
    pub const fn contains(&self, addr: usize) -> bool {
        addr >= self.low && addr < self.high
    }
}
