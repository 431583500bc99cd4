//! Stack-limit calculator
//!
//! Only compiled where `arch` provides a `CurrentThreadEnvironment`.
//! Must not be called from inside stack-overflow handling.

use crate::arch::{stack_pointer, CurrentThreadEnvironment};
use stackprobe_core::ThreadEnvironment;

/// Lowest address the current thread may use on its stack
///
/// `stack_low + max(guarantee, minimum) + guard page`, read fresh from the
/// thread environment block on every call. The value belongs to the fiber
/// that was running when it was read; see
/// [`current_execution_context`](crate::current_execution_context).
#[inline]
pub fn lowest_safe_stack_address() -> usize {
    CurrentThreadEnvironment.lowest_safe_stack_address()
}

/// Bytes between the caller's stack pointer and the safe limit
///
/// Zero once the caller is already below the limit.
#[inline(always)]
pub fn remaining_stack() -> usize {
    (stack_pointer() as usize).saturating_sub(lowest_safe_stack_address())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::barrier::memory_clobber_barrier;
    use stackprobe_core::constants::{GUARD_PAGE_SIZE, PLATFORM_MIN_GUARANTEE};

    #[test]
    fn test_limit_below_stack_pointer() {
        let limit = lowest_safe_stack_address();
        let sp = stack_pointer() as usize;
        assert!(limit < sp, "limit {:#x} should be below sp {:#x}", limit, sp);
        assert!(remaining_stack() > 0);
    }

    #[test]
    fn test_limit_matches_formula() {
        let env = CurrentThreadEnvironment;
        let low = env.stack_low();
        let guarantee = env.overflow_guarantee();
        let expected = low + guarantee.max(PLATFORM_MIN_GUARANTEE) + GUARD_PAGE_SIZE;
        assert_eq!(lowest_safe_stack_address(), expected);
        assert_eq!(env.descriptor().lowest_safe_stack_address(), expected);
    }

    #[test]
    fn test_limit_stable_on_thread() {
        let first = lowest_safe_stack_address();
        for _ in 0..100 {
            memory_clobber_barrier();
            assert_eq!(lowest_safe_stack_address(), first);
        }
    }

    #[test]
    fn test_threads_have_own_limits() {
        let here = lowest_safe_stack_address();
        let there = std::thread::spawn(lowest_safe_stack_address).join().unwrap();
        assert_ne!(here, there);
    }

    /// Recursion that checks remaining stack before each level stops cleanly
    /// on a small thread stack instead of overflowing.
    #[test]
    fn test_guarded_recursion_stops_before_overflow() {
        const RED_ZONE: usize = 32 * 1024;

        #[inline(never)]
        fn descend(depth: usize) -> usize {
            let frame = [depth as u8; 1024];
            core::hint::black_box(&frame);
            memory_clobber_barrier();
            if remaining_stack() < RED_ZONE {
                return depth;
            }
            let reached = descend(depth + 1);
            core::hint::black_box(&frame);
            reached
        }

        let reached = std::thread::Builder::new()
            .stack_size(256 * 1024)
            .spawn(|| descend(0))
            .unwrap()
            .join()
            .unwrap();
        assert!(reached > 16, "only reached depth {}", reached);
    }
}
