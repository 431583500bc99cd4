//! Error types for the fallible OS stack queries
//!
//! The core probes never fail; only the public-API queries in
//! `stackprobe::os_limit` return these.

use core::fmt;

/// Result type for OS stack queries
pub type ProbeResult<T> = Result<T, ProbeError>;

/// Errors that can occur while asking the OS about the current stack
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeError {
    /// `pthread_attr_init` failed
    AttrInit(i32),

    /// Fetching the thread's attributes failed
    AttrQuery(i32),

    /// Reading the stack address/size failed
    StackQuery(i32),

    /// A Windows API call failed (`GetLastError` value)
    Os(i32),

    /// This target has no OS stack query
    Unsupported,
}

impl ProbeError {
    /// Raw OS error code, if any
    pub fn code(&self) -> Option<i32> {
        match *self {
            ProbeError::AttrInit(c)
            | ProbeError::AttrQuery(c)
            | ProbeError::StackQuery(c)
            | ProbeError::Os(c) => Some(c),
            ProbeError::Unsupported => None,
        }
    }
}

impl fmt::Display for ProbeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeError::AttrInit(code) => write!(f, "pthread_attr_init failed: {}", code),
            ProbeError::AttrQuery(code) => write!(f, "thread attribute query failed: {}", code),
            ProbeError::StackQuery(code) => write!(f, "stack query failed: {}", code),
            ProbeError::Os(code) => write!(f, "os error: {}", code),
            ProbeError::Unsupported => write!(f, "stack query not supported on this platform"),
        }
    }
}

impl std::error::Error for ProbeError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let e = ProbeError::AttrQuery(22);
        assert_eq!(format!("{}", e), "thread attribute query failed: 22");

        let e = ProbeError::Unsupported;
        assert_eq!(format!("{}", e), "stack query not supported on this platform");
    }

    #[test]
    fn test_error_code() {
        assert_eq!(ProbeError::Os(5).code(), Some(5));
        assert_eq!(ProbeError::StackQuery(3).code(), Some(3));
        assert_eq!(ProbeError::Unsupported.code(), None);
    }

    #[test]
    fn test_boxed_error() {
        let boxed: Box<dyn std::error::Error> = Box::new(ProbeError::AttrInit(12));
        assert_eq!(boxed.to_string(), "pthread_attr_init failed: 12");
    }
}
