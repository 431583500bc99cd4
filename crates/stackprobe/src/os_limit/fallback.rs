//! Targets with no stack query

use stackprobe_core::{kwarn, ProbeError, ProbeResult};
use std::sync::atomic::{AtomicBool, Ordering};

static WARNED: AtomicBool = AtomicBool::new(false);

/// Always `Unsupported`
pub fn os_stack_limit() -> ProbeResult<usize> {
    if !WARNED.swap(true, Ordering::Relaxed) {
        kwarn!("no OS stack-limit query on this target");
    }
    Err(ProbeError::Unsupported)
}
