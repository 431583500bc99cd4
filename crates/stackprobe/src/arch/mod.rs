//! Architecture-specific thread-environment access
//!
//! Each OS/architecture pair that exposes its stack bookkeeping at fixed
//! offsets gets its own module. Everything else falls back to a target with
//! no fiber concept.

mod stack_pointer;
pub use stack_pointer::stack_pointer;

cfg_if::cfg_if! {
    if #[cfg(miri)] {
        mod fallback;
        pub use fallback::current_fiber;
    } else if #[cfg(all(windows, target_arch = "x86_64"))] {
        pub mod x86_64_windows;
        pub use x86_64_windows::{current_fiber, CurrentThreadEnvironment};
    } else if #[cfg(all(windows, target_arch = "x86"))] {
        pub mod x86_windows;
        pub use x86_windows::{current_fiber, CurrentThreadEnvironment};
    } else {
        mod fallback;
        pub use fallback::current_fiber;
    }
}
