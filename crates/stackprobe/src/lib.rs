//! # stackprobe
//!
//! Platform leaf for stack-depth checking.
//!
//! This crate provides:
//! - `lowest_safe_stack_address()` - lowest stack address the current thread may
//!   touch without eating into the OS overflow reserve (Windows x86/x86_64 only)
//! - `current_execution_context()` - identity of the running fiber, to detect
//!   when a cached limit went stale
//! - `memory_clobber_barrier()` - empty call the optimizer cannot see through
//! - `stack_pointer()`, `remaining_stack()` and the OS public-API stack queries
//!
//! `lowest_safe_stack_address()` is deliberately absent on targets without a
//! thread-environment accessor: callers fail to build instead of getting a
//! wrong answer at run time.

pub mod arch;
pub mod context;
pub mod barrier;
pub mod os_limit;

// Re-exports
pub use stackprobe_core::{
    ExecutionContext, ProbeError, ProbeResult, StackBounds, StackDescriptor, ThreadEnvironment,
};
pub use stackprobe_core::constants;
pub use stackprobe_core::klog;

pub use arch::stack_pointer;
pub use barrier::memory_clobber_barrier;
pub use context::current_execution_context;
pub use os_limit::os_stack_limit;

#[cfg(all(windows, not(miri)))]
pub use os_limit::{os_stack_bounds, set_thread_stack_guarantee, thread_stack_guarantee};

// Thread-environment accessor (architecture selected at build time)
cfg_if::cfg_if! {
    if #[cfg(all(
        windows,
        any(target_arch = "x86_64", target_arch = "x86"),
        not(miri)
    ))] {
        mod limit;
        pub use limit::{lowest_safe_stack_address, remaining_stack};
        pub use arch::CurrentThreadEnvironment;
    }
}
