//! x86_64 Windows thread environment block accessor
//!
//! GS holds the address of the current thread's TEB. The stack fields read
//! here are the ones `GetCurrentThreadStackLimits` and
//! `SetThreadStackGuarantee` use internally. They are not a documented
//! interface: if Microsoft moves them, the limit is silently wrong. The
//! tests in `os_limit::windows` compare these reads against the public APIs
//! and are the only check we have, so run them on every Windows version you
//! ship on.
//!
//! TEB layout used (x64):
//!
//! | offset | field                  | width |
//! |--------|------------------------|-------|
//! | 0x0020 | NtTib.FiberData        | 8     |
//! | 0x1478 | DeallocationStack      | 8     |
//! | 0x1748 | GuaranteedStackBytes   | 4     |

use core::arch::asm;
use stackprobe_core::ThreadEnvironment;

/// `NT_TIB.FiberData`, what `GetCurrentFiber` returns
pub const TEB_FIBER_DATA: usize = 0x20;

/// `TEB.DeallocationStack`, base of the reserved stack allocation
pub const TEB_DEALLOCATION_STACK: usize = 0x1478;

/// `TEB.GuaranteedStackBytes`
pub const TEB_GUARANTEED_STACK_BYTES: usize = 0x1748;

#[inline(always)]
unsafe fn read_teb_qword(offset: usize) -> usize {
    let value: usize;
    asm!(
        "mov {value}, qword ptr gs:[{offset}]",
        value = lateout(reg) value,
        offset = in(reg) offset,
        options(nostack, readonly, preserves_flags),
    );
    value
}

#[inline(always)]
unsafe fn read_teb_dword(offset: usize) -> u32 {
    let value: u32;
    asm!(
        "mov {value:e}, dword ptr gs:[{offset}]",
        value = lateout(reg) value,
        offset = in(reg) offset,
        options(nostack, readonly, preserves_flags),
    );
    value
}

/// Address of the fiber running on this thread
#[inline(always)]
pub fn current_fiber() -> usize {
    // SAFETY: GS always maps the calling thread's TEB in user mode.
    unsafe { read_teb_qword(TEB_FIBER_DATA) }
}

/// The calling thread's TEB, read through GS
///
/// Zero-sized: every call reads the live values, so a fiber switch between
/// two calls is reflected immediately.
#[derive(Debug, Clone, Copy, Default)]
pub struct CurrentThreadEnvironment;

impl ThreadEnvironment for CurrentThreadEnvironment {
    #[inline(always)]
    fn stack_low(&self) -> usize {
        // SAFETY: see `current_fiber`.
        unsafe { read_teb_qword(TEB_DEALLOCATION_STACK) }
    }

    #[inline(always)]
    fn overflow_guarantee(&self) -> usize {
        // SAFETY: see `current_fiber`.
        unsafe { read_teb_dword(TEB_GUARANTEED_STACK_BYTES) as usize }
    }
}
