//! macOS stack query

use nix::sys::pthread::pthread_self;
use stackprobe_core::ProbeResult;

/// Lowest address of the calling thread's stack
///
/// Darwin reports the stack top and size; the bottom is their difference.
pub fn os_stack_limit() -> ProbeResult<usize> {
    let thread = pthread_self();
    let (top, size) = unsafe {
        (
            libc::pthread_get_stackaddr_np(thread) as usize,
            libc::pthread_get_stacksize_np(thread),
        )
    };
    Ok(top.saturating_sub(size))
}
