//! Configuration error types.

use thiserror::Error;

/// Errors that can occur during configuration loading.
///
/// Malformed integers and durations never surface here: they fall back to
/// the documented defaults. The only hard failure is an invalid value for a
/// field with a closed value set, which today means the gateway failure
/// policy.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Invalid configuration value.
    #[error("invalid configuration value for {field}: {reason}")]
    InvalidValue {
        /// The field with the invalid value.
        field: String,
        /// Explanation of why the value is invalid.
        reason: String,
    },
}

impl ConfigError {
    /// Create a new invalid value error.
    pub fn invalid_value(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            reason: reason.into(),
        }
    }
}
