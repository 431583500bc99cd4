//! pthread stack query (Linux, Solaris, NetBSD, FreeBSD, DragonFly, illumos)

#[cfg(any(target_os = "freebsd", target_os = "dragonfly", target_os = "illumos"))]
use libc::pthread_attr_get_np as get_attr;
#[cfg(any(target_os = "linux", target_os = "solaris", target_os = "netbsd"))]
use libc::pthread_getattr_np as get_attr;

use nix::errno::Errno;
use nix::sys::pthread::pthread_self;
use stackprobe_core::{kdebug, kwarn, ProbeError, ProbeResult};
use std::mem::MaybeUninit;
use std::ptr;

/// Lowest address of the calling thread's stack mapping
pub fn os_stack_limit() -> ProbeResult<usize> {
    let mut attr = PthreadAttr::new()?;

    let ret = unsafe { get_attr(pthread_self(), attr.as_mut_ptr()) };
    check(ret, "get thread attributes", ProbeError::AttrQuery)?;

    let mut stackaddr = ptr::null_mut();
    let mut stacksize = 0;
    let ret = unsafe { libc::pthread_attr_getstack(attr.as_mut_ptr(), &mut stackaddr, &mut stacksize) };
    check(ret, "pthread_attr_getstack", ProbeError::StackQuery)?;

    Ok(stackaddr as usize)
}

fn check(ret: libc::c_int, what: &str, err: fn(i32) -> ProbeError) -> ProbeResult<()> {
    if ret != 0 {
        kdebug!("{} failed: {}", what, Errno::from_raw(ret).desc());
        return Err(err(ret));
    }
    Ok(())
}

/// Initialized `pthread_attr_t`, destroyed on drop
struct PthreadAttr(MaybeUninit<libc::pthread_attr_t>);

impl PthreadAttr {
    fn new() -> ProbeResult<Self> {
        let mut attr = MaybeUninit::<libc::pthread_attr_t>::uninit();
        let ret = unsafe { libc::pthread_attr_init(attr.as_mut_ptr()) };
        check(ret, "pthread_attr_init", ProbeError::AttrInit)?;
        Ok(PthreadAttr(attr))
    }

    fn as_mut_ptr(&mut self) -> *mut libc::pthread_attr_t {
        self.0.as_mut_ptr()
    }
}

impl Drop for PthreadAttr {
    fn drop(&mut self) {
        let ret = unsafe { libc::pthread_attr_destroy(self.0.as_mut_ptr()) };
        if ret != 0 {
            kwarn!("pthread_attr_destroy failed: {}", Errno::from_raw(ret).desc());
        }
    }
}
