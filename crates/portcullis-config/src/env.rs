//! Lenient environment variable readers.
//!
//! These three helpers are the crate's only environment touch points and
//! encode the leniency policy as named functions: an unset or empty
//! variable yields the default, and a value that fails to parse as an
//! integer or duration also yields the default, silently. Callers that need
//! a hard failure on bad input (the failure policy) read the raw string via
//! [`env_or`] and parse it themselves.

use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Read a string setting, falling back to `default` when the variable is
/// unset or empty. The value is used verbatim: no trimming, no case
/// normalization.
pub(crate) fn env_or(key: &str, default: &str) -> String {
    match env::var(key) {
        Ok(value) if !value.is_empty() => value,
        _ => default.to_string(),
    }
}

/// Read a setting and parse it with `FromStr`, falling back to `default`
/// when the variable is unset, empty, or fails to parse.
pub(crate) fn env_parse_or<T: FromStr>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(value) if !value.is_empty() => value.parse().unwrap_or(default),
        _ => default,
    }
}

/// Read a duration setting in humantime grammar (`15s`, `5m`, `250ms`),
/// falling back to `default` when the variable is unset, empty, or fails
/// to parse.
pub(crate) fn env_duration_or(key: &str, default: Duration) -> Duration {
    match env::var(key) {
        Ok(value) if !value.is_empty() => humantime::parse_duration(&value).unwrap_or(default),
        _ => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use once_cell::sync::Lazy;
    use std::sync::Mutex;

    // Process environment is global; serialize tests that mutate it.
    static ENV_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

    #[test]
    fn test_env_or() {
        let _guard = ENV_LOCK.lock().unwrap();

        env::remove_var("PORTCULLIS_TEST_STR");
        assert_eq!(env_or("PORTCULLIS_TEST_STR", "fallback"), "fallback");

        env::set_var("PORTCULLIS_TEST_STR", "");
        assert_eq!(env_or("PORTCULLIS_TEST_STR", "fallback"), "fallback");

        env::set_var("PORTCULLIS_TEST_STR", "  spaced  ");
        assert_eq!(env_or("PORTCULLIS_TEST_STR", "fallback"), "  spaced  ");

        env::remove_var("PORTCULLIS_TEST_STR");
    }

    #[test]
    fn test_env_parse_or() {
        let _guard = ENV_LOCK.lock().unwrap();

        env::remove_var("PORTCULLIS_TEST_INT");
        assert_eq!(env_parse_or("PORTCULLIS_TEST_INT", 42u32), 42);

        env::set_var("PORTCULLIS_TEST_INT", "7");
        assert_eq!(env_parse_or("PORTCULLIS_TEST_INT", 42u32), 7);

        env::set_var("PORTCULLIS_TEST_INT", "not-a-number");
        assert_eq!(env_parse_or("PORTCULLIS_TEST_INT", 42u32), 42);

        // Out of range for the target type falls back too.
        env::set_var("PORTCULLIS_TEST_INT", "70000");
        assert_eq!(env_parse_or("PORTCULLIS_TEST_INT", 8080u16), 8080);

        env::remove_var("PORTCULLIS_TEST_INT");
    }

    #[test]
    fn test_env_duration_or() {
        let _guard = ENV_LOCK.lock().unwrap();
        let default = Duration::from_secs(10);

        env::remove_var("PORTCULLIS_TEST_DUR");
        assert_eq!(env_duration_or("PORTCULLIS_TEST_DUR", default), default);

        env::set_var("PORTCULLIS_TEST_DUR", "15s");
        assert_eq!(
            env_duration_or("PORTCULLIS_TEST_DUR", default),
            Duration::from_secs(15)
        );

        env::set_var("PORTCULLIS_TEST_DUR", "5m");
        assert_eq!(
            env_duration_or("PORTCULLIS_TEST_DUR", default),
            Duration::from_secs(300)
        );

        env::set_var("PORTCULLIS_TEST_DUR", "250ms");
        assert_eq!(
            env_duration_or("PORTCULLIS_TEST_DUR", default),
            Duration::from_millis(250)
        );

        env::set_var("PORTCULLIS_TEST_DUR", "fast");
        assert_eq!(env_duration_or("PORTCULLIS_TEST_DUR", default), default);

        env::remove_var("PORTCULLIS_TEST_DUR");
    }
}
