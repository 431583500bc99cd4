//! Kernel-style leveled logging for stackprobe
//!
//! One line per call on stderr, written under the stderr lock.
//!
//! # Environment Variables
//!
//! - `STACKPROBE_LOG_LEVEL=<level>` - off, error, warn, info, debug, trace (or 0-5). Default: warn
//! - `STACKPROBE_FLUSH_EPRINT=1` - Flush stderr after each line
//!
//! # Usage
//!
//! ```ignore
//! use stackprobe_core::{kdebug, kwarn};
//!
//! kdebug!("pthread_getattr_np failed: {}", err);
//! kwarn!("no OS stack query on this target");
//! ```
//!
//! The probe operations themselves never log.

use crate::env::{env_get, env_get_bool};
use std::io::Write;
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};

/// Log levels
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Off = 0,
    Error = 1,
    Warn = 2,
    Info = 3,
    Debug = 4,
    Trace = 5,
}

impl LogLevel {
    pub fn from_u8(v: u8) -> Self {
        match v {
            0 => LogLevel::Off,
            1 => LogLevel::Error,
            2 => LogLevel::Warn,
            3 => LogLevel::Info,
            4 => LogLevel::Debug,
            _ => LogLevel::Trace,
        }
    }

    pub fn prefix(&self) -> &'static str {
        match self {
            LogLevel::Off => "",
            LogLevel::Error => "[stackprobe ERROR]",
            LogLevel::Warn => "[stackprobe WARN]",
            LogLevel::Info => "[stackprobe INFO]",
            LogLevel::Debug => "[stackprobe DEBUG]",
            LogLevel::Trace => "[stackprobe TRACE]",
        }
    }
}

impl FromStr for LogLevel {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "off" | "0" => Ok(LogLevel::Off),
            "error" | "1" => Ok(LogLevel::Error),
            "warn" | "2" => Ok(LogLevel::Warn),
            "info" | "3" => Ok(LogLevel::Info),
            "debug" | "4" => Ok(LogLevel::Debug),
            "trace" | "5" => Ok(LogLevel::Trace),
            _ => Err(()),
        }
    }
}

const DEFAULT_LEVEL: LogLevel = LogLevel::Warn;

static FLUSH_ENABLED: AtomicBool = AtomicBool::new(false);
static LOG_LEVEL: AtomicU8 = AtomicU8::new(DEFAULT_LEVEL as u8);
static INITIALIZED: AtomicBool = AtomicBool::new(false);

// Set once the value came from set_log_level / set_flush_enabled; the
// environment is then ignored for that setting only.
static LEVEL_OVERRIDDEN: AtomicBool = AtomicBool::new(false);
static FLUSH_OVERRIDDEN: AtomicBool = AtomicBool::new(false);

/// Initialize logging from environment variables
///
/// Called automatically on first log. A setting already given through
/// [`set_log_level`] or [`set_flush_enabled`] keeps its programmatic value;
/// the other one is still read from the environment.
pub fn init() {
    if INITIALIZED.swap(true, Ordering::SeqCst) {
        return;
    }

    if !LEVEL_OVERRIDDEN.load(Ordering::SeqCst) {
        let level: LogLevel = env_get("STACKPROBE_LOG_LEVEL", DEFAULT_LEVEL);
        LOG_LEVEL.store(level as u8, Ordering::Relaxed);
    }
    if !FLUSH_OVERRIDDEN.load(Ordering::SeqCst) {
        let flush = env_get_bool("STACKPROBE_FLUSH_EPRINT", false);
        FLUSH_ENABLED.store(flush, Ordering::Relaxed);
    }
}

/// Check if flush is enabled
#[inline]
pub fn flush_enabled() -> bool {
    if !INITIALIZED.load(Ordering::Relaxed) {
        init();
    }
    FLUSH_ENABLED.load(Ordering::Relaxed)
}

/// Get current log level
#[inline]
pub fn log_level() -> LogLevel {
    if !INITIALIZED.load(Ordering::Relaxed) {
        init();
    }
    LogLevel::from_u8(LOG_LEVEL.load(Ordering::Relaxed))
}

/// Set log level programmatically (wins over `STACKPROBE_LOG_LEVEL`)
pub fn set_log_level(level: LogLevel) {
    LEVEL_OVERRIDDEN.store(true, Ordering::SeqCst);
    LOG_LEVEL.store(level as u8, Ordering::Relaxed);
}

/// Set flush mode programmatically (wins over `STACKPROBE_FLUSH_EPRINT`)
pub fn set_flush_enabled(enabled: bool) {
    FLUSH_OVERRIDDEN.store(true, Ordering::SeqCst);
    FLUSH_ENABLED.store(enabled, Ordering::Relaxed);
}

/// Check if a log level is enabled
#[inline]
pub fn level_enabled(level: LogLevel) -> bool {
    level != LogLevel::Off && level as u8 <= log_level() as u8
}

#[doc(hidden)]
pub fn _klog_impl(level: LogLevel, args: std::fmt::Arguments<'_>) {
    if !level_enabled(level) {
        return;
    }
    let stderr = std::io::stderr();
    let mut handle = stderr.lock();
    let _ = write!(handle, "{} ", level.prefix());
    let _ = handle.write_fmt(args);
    let _ = handle.write_all(b"\n");
    if flush_enabled() {
        let _ = handle.flush();
    }
}

// ============================================================================
// Public Macros
// ============================================================================

/// Error level log
#[macro_export]
macro_rules! kerror {
    ($($arg:tt)*) => {{
        $crate::klog::_klog_impl(
            $crate::klog::LogLevel::Error,
            format_args!($($arg)*)
        );
    }};
}

/// Warning level log
#[macro_export]
macro_rules! kwarn {
    ($($arg:tt)*) => {{
        $crate::klog::_klog_impl(
            $crate::klog::LogLevel::Warn,
            format_args!($($arg)*)
        );
    }};
}

/// Info level log
#[macro_export]
macro_rules! kinfo {
    ($($arg:tt)*) => {{
        $crate::klog::_klog_impl(
            $crate::klog::LogLevel::Info,
            format_args!($($arg)*)
        );
    }};
}

/// Debug level log
#[macro_export]
macro_rules! kdebug {
    ($($arg:tt)*) => {{
        $crate::klog::_klog_impl(
            $crate::klog::LogLevel::Debug,
            format_args!($($arg)*)
        );
    }};
}

/// Trace level log (most verbose)
#[macro_export]
macro_rules! ktrace {
    ($($arg:tt)*) => {{
        $crate::klog::_klog_impl(
            $crate::klog::LogLevel::Trace,
            format_args!($($arg)*)
        );
    }};
}
