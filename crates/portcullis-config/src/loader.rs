//! Configuration loader.
//!
//! Thin chaining front-end over [`PortcullisConfig::from_env`] that adds an
//! optional `.env` layer for local development.

use crate::env::env_or;
use crate::{ConfigError, GatewaySettings, PortcullisConfig};

/// Loads the configuration snapshot from the process environment.
///
/// # Example
///
/// ```no_run
/// use portcullis_config::ConfigLoader;
///
/// # fn main() -> Result<(), portcullis_config::ConfigError> {
/// let config = ConfigLoader::new()
///     .with_dotenv()
///     .load()?;
///
/// println!("listening on {}", config.server_addr());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct ConfigLoader {
    _private: (),
}

impl ConfigLoader {
    /// Create a new configuration loader.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a `.env` file into the process environment, if one exists.
    ///
    /// A missing file is not an error; variables already present in the
    /// environment take precedence over the file, which is `dotenvy`'s
    /// default behavior.
    #[must_use]
    pub fn with_dotenv(self) -> Self {
        let _ = dotenvy::dotenv();
        self
    }

    /// Resolve and validate the configuration snapshot.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` when `GATEWAY_FAILURE_POLICY`
    /// holds an unknown literal. All other malformed values fall back to
    /// their defaults.
    pub fn load(self) -> Result<PortcullisConfig, ConfigError> {
        PortcullisConfig::from_env()
    }

    /// Resolve the configuration snapshot without the hard validation step.
    ///
    /// Every field uses the same lenient reads as [`ConfigLoader::load`],
    /// including the failure policy: an unknown `GATEWAY_FAILURE_POLICY`
    /// literal degrades to the default (`fail-closed`) instead of erroring.
    /// Use this for tooling that inspects a best-effort snapshot; the
    /// gateway process itself must go through `load` so that a bad policy
    /// stops startup.
    #[must_use]
    pub fn load_unvalidated(self) -> PortcullisConfig {
        let defaults = GatewaySettings::default();
        let failure_policy = env_or("GATEWAY_FAILURE_POLICY", defaults.failure_policy.as_str())
            .parse()
            .unwrap_or(defaults.failure_policy);
        PortcullisConfig::resolve_with_policy(failure_policy)
    }
}
