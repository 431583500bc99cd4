//! x86 Windows thread environment block accessor
//!
//! Same fields as the x64 accessor, read through FS at the 32-bit TEB
//! offsets. Same caveat: undocumented layout, verified only by the
//! cross-checks in `os_limit::windows`.

use core::arch::asm;
use stackprobe_core::ThreadEnvironment;

/// `NT_TIB.FiberData`
pub const TEB_FIBER_DATA: usize = 0x10;

/// `TEB.DeallocationStack`
pub const TEB_DEALLOCATION_STACK: usize = 0xE0C;

/// `TEB.GuaranteedStackBytes`
pub const TEB_GUARANTEED_STACK_BYTES: usize = 0xF78;

#[inline(always)]
unsafe fn read_teb_dword(offset: usize) -> usize {
    let value: usize;
    asm!(
        "mov {value}, dword ptr fs:[{offset}]",
        value = lateout(reg) value,
        offset = in(reg) offset,
        options(nostack, readonly, preserves_flags),
    );
    value
}

/// Address of the fiber running on this thread
#[inline(always)]
pub fn current_fiber() -> usize {
    // SAFETY: FS always maps the calling thread's TEB in user mode.
    unsafe { read_teb_dword(TEB_FIBER_DATA) }
}

/// The calling thread's TEB, read through FS
#[derive(Debug, Clone, Copy, Default)]
pub struct CurrentThreadEnvironment;

impl ThreadEnvironment for CurrentThreadEnvironment {
    #[inline(always)]
    fn stack_low(&self) -> usize {
        // SAFETY: see current_fiber.
        unsafe { read_teb_dword(TEB_DEALLOCATION_STACK) }
    }

    #[inline(always)]
    fn overflow_guarantee(&self) -> usize {
        // SAFETY: see current_fiber.
        unsafe { read_teb_dword(TEB_GUARANTEED_STACK_BYTES) }
    }
}
