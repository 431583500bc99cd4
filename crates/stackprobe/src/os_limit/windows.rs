//! Windows stack queries
//!
//! Public-API counterparts of the TEB reads in `arch`. The tests at the
//! bottom compare both paths; a mismatch means the TEB offsets are wrong for
//! the running Windows version.

use crate::arch::stack_pointer;
use core::ffi::c_void;
use core::mem::{size_of, MaybeUninit};
use stackprobe_core::{kdebug, safe_stack_limit, ProbeError, ProbeResult, StackBounds};
use windows_sys::Win32::Foundation::{GetLastError, ERROR_INVALID_PARAMETER};
use windows_sys::Win32::System::Memory::{VirtualQuery, MEMORY_BASIC_INFORMATION};
use windows_sys::Win32::System::Threading::{GetCurrentThreadStackLimits, SetThreadStackGuarantee};

fn last_os_error(what: &str) -> ProbeError {
    let code = unsafe { GetLastError() } as i32;
    kdebug!("{} failed: error {}", what, code);
    ProbeError::Os(code)
}

/// Reserved stack range of the calling thread (or fiber)
pub fn os_stack_bounds() -> StackBounds {
    let mut low = 0usize;
    let mut high = 0usize;
    unsafe { GetCurrentThreadStackLimits(&mut low, &mut high) };
    StackBounds { low, high }
}

/// Current overflow guarantee in bytes, as configured (0 if never set)
pub fn thread_stack_guarantee() -> ProbeResult<usize> {
    // Passing 0 reads the value without changing it.
    let mut bytes: u32 = 0;
    if unsafe { SetThreadStackGuarantee(&mut bytes) } == 0 {
        return Err(last_os_error("SetThreadStackGuarantee"));
    }
    Ok(bytes as usize)
}

/// Set the overflow guarantee for the calling thread, returning the
/// previous value
///
/// Windows never lowers the guarantee; smaller values are ignored.
pub fn set_thread_stack_guarantee(bytes: usize) -> ProbeResult<usize> {
    let mut value = u32::try_from(bytes).map_err(|_| ProbeError::Os(ERROR_INVALID_PARAMETER as i32))?;
    if unsafe { SetThreadStackGuarantee(&mut value) } == 0 {
        return Err(last_os_error("SetThreadStackGuarantee"));
    }
    Ok(value as usize)
}

/// Lowest safe stack address computed through public APIs
///
/// `AllocationBase` of the region holding the stack pointer, plus the
/// effective guarantee, plus one guard page.
///
/// The guard page is added exactly once, inside `safe_stack_limit`, so the
/// result is equal to `lowest_safe_stack_address()` rather than one page
/// above it.
pub fn os_stack_limit() -> ProbeResult<usize> {
    let mut mi = MaybeUninit::<MEMORY_BASIC_INFORMATION>::uninit();
    let written = unsafe {
        VirtualQuery(
            stack_pointer() as *const c_void,
            mi.as_mut_ptr(),
            size_of::<MEMORY_BASIC_INFORMATION>(),
        )
    };
    if written == 0 {
        return Err(last_os_error("VirtualQuery"));
    }
    // SAFETY: VirtualQuery filled the structure.
    let base = unsafe { mi.assume_init() }.AllocationBase as usize;
    Ok(safe_stack_limit(base, thread_stack_guarantee()?))
}

#[cfg(all(test, any(target_arch = "x86_64", target_arch = "x86")))]
mod tests {
    use super::*;
    use crate::arch::CurrentThreadEnvironment;
    use crate::limit::lowest_safe_stack_address;
    use stackprobe_core::constants::{GUARD_PAGE_SIZE, PLATFORM_MIN_GUARANTEE};
    use stackprobe_core::ThreadEnvironment;

    #[test]
    fn test_stack_low_offset() {
        let bounds = os_stack_bounds();
        assert_eq!(CurrentThreadEnvironment.stack_low(), bounds.low);
        assert!(bounds.contains(stack_pointer() as usize));
    }

    #[test]
    fn test_guarantee_offset() {
        assert_eq!(
            CurrentThreadEnvironment.overflow_guarantee(),
            thread_stack_guarantee().unwrap()
        );
    }

    #[test]
    fn test_public_and_teb_limits_agree() {
        assert_eq!(os_stack_limit().unwrap(), lowest_safe_stack_address());
    }

    #[test]
    fn test_raised_guarantee_moves_limit() {
        const GUARANTEE: usize = 0x10000;

        std::thread::spawn(|| {
            let before = lowest_safe_stack_address();
            let low = os_stack_bounds().low;
            assert!(before >= low + PLATFORM_MIN_GUARANTEE + GUARD_PAGE_SIZE);

            set_thread_stack_guarantee(GUARANTEE).unwrap();
            assert_eq!(thread_stack_guarantee().unwrap(), GUARANTEE);
            assert_eq!(CurrentThreadEnvironment.overflow_guarantee(), GUARANTEE);
            assert_eq!(lowest_safe_stack_address(), low + GUARANTEE + GUARD_PAGE_SIZE);
            assert_eq!(os_stack_limit().unwrap(), lowest_safe_stack_address());
        })
        .join()
        .unwrap();
    }

    #[test]
    fn test_oversized_guarantee_rejected() {
        if usize::BITS > 32 {
            let err = set_thread_stack_guarantee(usize::MAX).unwrap_err();
            assert_eq!(err, ProbeError::Os(ERROR_INVALID_PARAMETER as i32));
        }
    }
}
