//! Optimization barrier
//!
//! An empty asm block without `nomem` is assumed to read and write any
//! memory, and `#[inline(never)]` keeps the call site itself in place. The
//! optimizer therefore cannot drop a depth check as dead or move stack
//! pointer comparisons across the call.

/// Opaque no-op: no effect on program state, but the compiler must assume
/// one
#[inline(never)]
pub fn memory_clobber_barrier() {
    clobber();
}

#[cfg(all(
    not(miri),
    any(
        target_arch = "x86",
        target_arch = "x86_64",
        target_arch = "arm",
        target_arch = "aarch64",
        target_arch = "riscv32",
        target_arch = "riscv64",
        target_arch = "loongarch64",
    )
))]
#[inline(always)]
fn clobber() {
    // SAFETY: empty template, touches nothing.
    unsafe {
        core::arch::asm!("", options(nostack, preserves_flags));
    }
}

#[cfg(not(all(
    not(miri),
    any(
        target_arch = "x86",
        target_arch = "x86_64",
        target_arch = "arm",
        target_arch = "aarch64",
        target_arch = "riscv32",
        target_arch = "riscv64",
        target_arch = "loongarch64",
    )
)))]
#[inline(always)]
fn clobber() {
    core::sync::atomic::compiler_fence(core::sync::atomic::Ordering::SeqCst);
    core::hint::black_box(());
}

#[cfg(test)]
mod tests {
    use super::*;
    #[cfg(not(miri))]
    use crate::arch::stack_pointer;

    fn checksum(data: &[u64]) -> u64 {
        data.iter()
            .fold(0xcbf2_9ce4_8422_2325u64, |h, &x| (h ^ x).wrapping_mul(0x1000_0000_01b3))
    }

    #[test]
    fn test_no_effect_on_results() {
        let data: Vec<u64> = (0..512).map(|i| i * 7 + 3).collect();
        let expected = checksum(&data);

        for n in 0..16 {
            for _ in 0..n {
                memory_clobber_barrier();
            }
            let got = checksum(&data);
            memory_clobber_barrier();
            assert_eq!(got, expected);
        }
    }

    #[test]
    fn test_locals_survive() {
        let mut acc = 0usize;
        for i in 0..100 {
            acc += i;
            memory_clobber_barrier();
        }
        assert_eq!(acc, 4950);
    }

    /// Recursion with the barrier on both sides of the call keeps one real
    /// frame per level, so the recorded stack pointers strictly descend.
    #[cfg(not(miri))]
    #[inline(never)]
    fn recurse(depth: usize, out: &mut Vec<usize>) {
        memory_clobber_barrier();
        out.push(stack_pointer() as usize);
        if depth > 0 {
            recurse(depth - 1, out);
        }
        memory_clobber_barrier();
    }

    #[test]
    #[cfg(not(miri))]
    fn test_frames_not_folded() {
        let mut sps = Vec::with_capacity(64);
        recurse(63, &mut sps);
        assert_eq!(sps.len(), 64);
        for pair in sps.windows(2) {
            assert!(pair[1] < pair[0], "{:#x} !< {:#x}", pair[1], pair[0]);
        }
    }
}
