//! Environment variable utilities
//!
//! Used to read the logging configuration (`STACKPROBE_LOG_LEVEL`,
//! `STACKPROBE_FLUSH_EPRINT`). The probes themselves read no environment.
//!
//! ```ignore
//! use stackprobe_core::env::{env_get, env_get_bool};
//!
//! let level: LogLevel = env_get("STACKPROBE_LOG_LEVEL", LogLevel::Warn);
//! let flush: bool = env_get_bool("STACKPROBE_FLUSH_EPRINT", false);
//! ```

use std::str::FromStr;

/// Get environment variable parsed as type T, or return default
///
/// Unset variables and values that fail to parse both yield `default`.
#[inline]
pub fn env_get<T>(key: &str, default: T) -> T
where
    T: FromStr,
{
    env_get_opt(key).unwrap_or(default)
}

/// Get environment variable as boolean
///
/// Accepts: "1", "true", "yes", "on" (case-insensitive) as true.
/// Any other value is false; unset returns the default.
#[inline]
pub fn env_get_bool(key: &str, default: bool) -> bool {
    match std::env::var(key) {
        Ok(val) => matches!(val.to_lowercase().as_str(), "1" | "true" | "yes" | "on"),
        Err(_) => default,
    }
}

/// Get environment variable as optional value
///
/// Returns `Some(T)` if the variable is set and parses successfully.
#[inline]
pub fn env_get_opt<T>(key: &str) -> Option<T>
where
    T: FromStr,
{
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_get_default() {
        let val: usize = env_get("__STACKPROBE_TEST_UNSET__", 42);
        assert_eq!(val, 42);
    }

    #[test]
    fn test_env_get_opt_none() {
        let val: Option<usize> = env_get_opt("__STACKPROBE_TEST_UNSET__");
        assert!(val.is_none());
    }

    #[test]
    fn test_env_get_with_set_var() {
        std::env::set_var("__STACKPROBE_TEST_NUM__", " 4096 ");
        let val: usize = env_get("__STACKPROBE_TEST_NUM__", 0);
        assert_eq!(val, 4096);
        std::env::remove_var("__STACKPROBE_TEST_NUM__");
    }

    #[test]
    fn test_env_get_invalid_parse() {
        std::env::set_var("__STACKPROBE_TEST_INVALID__", "page");
        let val: usize = env_get("__STACKPROBE_TEST_INVALID__", 99);
        assert_eq!(val, 99);
        std::env::remove_var("__STACKPROBE_TEST_INVALID__");
    }

    #[test]
    fn test_env_get_bool_variants() {
        let key = "__STACKPROBE_TEST_BOOL__";
        assert!(env_get_bool(key, true));

        for yes in ["1", "true", "TRUE", "yes", "on"] {
            std::env::set_var(key, yes);
            assert!(env_get_bool(key, false), "{} should be true", yes);
        }
        for no in ["0", "false", "off", "garbage"] {
            std::env::set_var(key, no);
            assert!(!env_get_bool(key, true), "{} should be false", no);
        }
        std::env::remove_var(key);
    }
}
