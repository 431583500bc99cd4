//! Thread environment seam
//!
//! The interface between the platform-agnostic limit formula and the
//! per-architecture accessors that read OS bookkeeping.

use crate::limit::{safe_stack_limit, StackDescriptor};

/// Source of the two raw values the stack limit is computed from
///
/// Implemented by the OS accessors in `stackprobe` (one per OS/architecture
/// pair) and by [`StackDescriptor`] for synthetic values.
pub trait ThreadEnvironment {
    /// Lowest address of the current thread's reserved stack region
    fn stack_low(&self) -> usize;

    /// Bytes the OS keeps accessible after a stack-overflow fault
    fn overflow_guarantee(&self) -> usize;

    /// Lowest address the thread may touch without entering the
    /// overflow reserve or the guard page
    #[inline]
    fn lowest_safe_stack_address(&self) -> usize {
        safe_stack_limit(self.stack_low(), self.overflow_guarantee())
    }

    /// Read both values into a plain descriptor
    #[inline]
    fn descriptor(&self) -> StackDescriptor {
        StackDescriptor::new(self.stack_low(), self.overflow_guarantee())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{GUARD_PAGE_SIZE, PLATFORM_MIN_GUARANTEE};
    use std::cell::Cell;

    /// Counts reads so we can check the provided method touches each value once
    struct CountingEnv {
        low: usize,
        guarantee: usize,
        reads: Cell<u32>,
    }

    impl ThreadEnvironment for CountingEnv {
        fn stack_low(&self) -> usize {
            self.reads.set(self.reads.get() + 1);
            self.low
        }

        fn overflow_guarantee(&self) -> usize {
            self.reads.set(self.reads.get() + 1);
            self.guarantee
        }
    }

    #[test]
    fn test_provided_limit() {
        let env = CountingEnv { low: 0x4000_0000, guarantee: 0, reads: Cell::new(0) };
        assert_eq!(
            env.lowest_safe_stack_address(),
            0x4000_0000 + PLATFORM_MIN_GUARANTEE + GUARD_PAGE_SIZE
        );
        assert_eq!(env.reads.get(), 2);
    }

    #[test]
    fn test_descriptor_snapshot() {
        let env = CountingEnv { low: 0x10_0000, guarantee: 0x8000, reads: Cell::new(0) };
        let d = env.descriptor();
        assert_eq!(d, StackDescriptor::new(0x10_0000, 0x8000));
        assert_eq!(d.lowest_safe_stack_address(), env.lowest_safe_stack_address());
    }
}
