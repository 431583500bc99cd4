//! OpenBSD stack query

use nix::errno::Errno;
use nix::sys::pthread::pthread_self;
use stackprobe_core::{kdebug, ProbeError, ProbeResult};
use std::mem::MaybeUninit;

/// Lowest address of the calling thread's stack segment
pub fn os_stack_limit() -> ProbeResult<usize> {
    let mut stackinfo = MaybeUninit::<libc::stack_t>::uninit();
    let ret = unsafe { libc::pthread_stackseg_np(pthread_self(), stackinfo.as_mut_ptr()) };
    if ret != 0 {
        kdebug!("pthread_stackseg_np failed: {}", Errno::from_raw(ret).desc());
        return Err(ProbeError::StackQuery(ret));
    }
    // SAFETY: initialized by the successful call above.
    let stackinfo = unsafe { stackinfo.assume_init() };
    Ok((stackinfo.ss_sp as usize).saturating_sub(stackinfo.ss_size))
}
