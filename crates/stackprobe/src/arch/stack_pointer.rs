//! Current stack pointer
//!
//! Inlined into the caller so the value reflects the caller's frame.

/// Read the stack pointer register
#[inline(always)]
pub fn stack_pointer() -> *mut u8 {
    read_sp()
}

cfg_if::cfg_if! {
    if #[cfg(miri)] {
        #[inline(always)]
        fn read_sp() -> *mut u8 {
            approximate_sp()
        }
    } else if #[cfg(target_arch = "x86_64")] {
        #[inline(always)]
        fn read_sp() -> *mut u8 {
            let sp;
            unsafe {
                core::arch::asm!(
                    "mov {sp}, rsp",
                    sp = lateout(reg) sp,
                    options(nomem, nostack, preserves_flags),
                );
            }
            sp
        }
    } else if #[cfg(target_arch = "x86")] {
        #[inline(always)]
        fn read_sp() -> *mut u8 {
            let sp;
            unsafe {
                core::arch::asm!(
                    "mov {sp}, esp",
                    sp = lateout(reg) sp,
                    options(nomem, nostack, preserves_flags),
                );
            }
            sp
        }
    } else if #[cfg(any(target_arch = "aarch64", target_arch = "arm"))] {
        #[inline(always)]
        fn read_sp() -> *mut u8 {
            let sp;
            unsafe {
                core::arch::asm!(
                    "mov {sp}, sp",
                    sp = lateout(reg) sp,
                    options(nomem, nostack, preserves_flags),
                );
            }
            sp
        }
    } else if #[cfg(any(target_arch = "riscv32", target_arch = "riscv64"))] {
        #[inline(always)]
        fn read_sp() -> *mut u8 {
            let sp;
            unsafe {
                core::arch::asm!(
                    "mv {sp}, sp",
                    sp = lateout(reg) sp,
                    options(nomem, nostack, preserves_flags),
                );
            }
            sp
        }
    } else if #[cfg(target_arch = "loongarch64")] {
        #[inline(always)]
        fn read_sp() -> *mut u8 {
            let sp;
            unsafe {
                core::arch::asm!(
                    "move {sp}, $sp",
                    sp = lateout(reg) sp,
                    options(nomem, nostack, preserves_flags),
                );
            }
            sp
        }
    } else {
        #[inline(always)]
        fn read_sp() -> *mut u8 {
            approximate_sp()
        }
    }
}

/// Address of a local in the current frame
#[allow(dead_code)]
#[inline(always)]
fn approximate_sp() -> *mut u8 {
    let mut marker = 0u8;
    core::hint::black_box(&mut marker as *mut u8)
}
