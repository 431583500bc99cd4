//! # stackprobe-core
//!
//! Core types and arithmetic for the stackprobe platform probe.
//!
//! This crate is platform-agnostic and contains no OS-specific code.
//! The thread-environment accessors live in `stackprobe`.
//!
//! ## Modules
//!
//! - `limit` - Safe stack limit formula and the stack descriptor
//! - `context` - Execution-context (fiber) handle type
//! - `error` - Error types for the fallible OS queries
//! - `traits` - Thread environment seam
//! - `klog` - Kernel-style leveled logging macros
//! - `env` - Environment variable utilities

pub mod limit;
pub mod context;
pub mod error;
pub mod traits;
pub mod klog;
pub mod env;

// Re-exports for convenience
pub use limit::{safe_stack_limit, safe_stack_limit_with, min_guarantee_for, StackBounds, StackDescriptor};
pub use context::ExecutionContext;
pub use error::{ProbeError, ProbeResult};
pub use traits::ThreadEnvironment;
pub use env::{env_get, env_get_bool, env_get_opt};

/// Constants for the OS stack-overflow bookkeeping
pub mod constants {
    /// Size of the guard page the OS places below the committed stack.
    pub const GUARD_PAGE_SIZE: usize = 0x1000;

    /// Minimum overflow guarantee the OS enforces with 4-byte pointers.
    pub const MIN_GUARANTEE_32: usize = 0x1000;

    /// Minimum overflow guarantee the OS enforces with 8-byte pointers.
    pub const MIN_GUARANTEE_64: usize = 0x2000;

    cfg_if::cfg_if! {
        if #[cfg(target_pointer_width = "32")] {
            /// Minimum overflow guarantee for this build's pointer width.
            pub const PLATFORM_MIN_GUARANTEE: usize = MIN_GUARANTEE_32;
        } else {
            /// Minimum overflow guarantee for this build's pointer width.
            pub const PLATFORM_MIN_GUARANTEE: usize = MIN_GUARANTEE_64;
        }
    }
}
