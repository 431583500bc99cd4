//! Stack limits through the OS's public APIs
//!
//! Slower than the thread-environment reads and fallible, but available on
//! most targets. On Windows these are also the reference the TEB offsets
//! are checked against.

cfg_if::cfg_if! {
    if #[cfg(miri)] {
        mod fallback;
        pub use fallback::os_stack_limit;
    } else if #[cfg(windows)] {
        mod windows;
        pub use windows::{os_stack_bounds, os_stack_limit, set_thread_stack_guarantee, thread_stack_guarantee};
    } else if #[cfg(any(
        target_os = "linux",
        target_os = "solaris",
        target_os = "netbsd",
        target_os = "freebsd",
        target_os = "dragonfly",
        target_os = "illumos"
    ))] {
        mod unix;
        pub use unix::os_stack_limit;
    } else if #[cfg(target_os = "openbsd")] {
        mod openbsd;
        pub use openbsd::os_stack_limit;
    } else if #[cfg(target_os = "macos")] {
        mod macos;
        pub use macos::os_stack_limit;
    } else {
        mod fallback;
        pub use fallback::os_stack_limit;
    }
}
