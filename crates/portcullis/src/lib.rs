//! # Portcullis
//!
//! **Policy-enforcing network gateway core**
//!
//! This facade crate ties together the two process-wide contracts every
//! other gateway component builds on:
//!
//! - **Configuration** – one immutable, validated [`PortcullisConfig`]
//!   snapshot resolved from the environment at startup
//! - **Logging** – leveled, field-annotated structured records with
//!   request-scoped derived loggers
//!
//! ## Quick Start
//!
//! ```no_run
//! use portcullis::prelude::*;
//!
//! fn main() -> Result<(), ConfigError> {
//!     let config = ConfigLoader::new().with_dotenv().load()?;
//!     let logger = Logger::new(&LoggingConfig::from_env());
//!
//!     logger.info_with(
//!         "gateway configured",
//!         &[("addr", serde_json::json!(config.server_addr()))],
//!     );
//!     Ok(())
//! }
//! ```
//!
//! The HTTP server, the Redis-backed policy cache, the Postgres store, and
//! the upstream dispatcher all receive `&PortcullisConfig` and a `Logger`
//! by injection; neither subsystem depends on the other.

#![doc(html_root_url = "https://docs.rs/portcullis/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export configuration types
pub use portcullis_config as config;

// Re-export logging types
pub use portcullis_telemetry as telemetry;

/// Prelude module for convenient imports.
///
/// # Example
///
/// ```rust,ignore
/// use portcullis::prelude::*;
/// ```
pub mod prelude {
    pub use portcullis_config::{
        ConfigError, ConfigLoader, FailurePolicy, PortcullisConfig,
    };
    pub use portcullis_telemetry::{Level, LogFormat, Logger, LoggingConfig};
}
