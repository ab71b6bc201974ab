//! Typed configuration snapshot for the Portcullis gateway.
//!
//! This crate turns the flat set of `PORTCULLIS`-era environment variables
//! into one strongly-typed, validated [`PortcullisConfig`] value that the
//! rest of the gateway process consumes by reference:
//!
//! - [`ServerConfig`] - HTTP server settings (bind address, timeouts)
//! - [`RedisConfig`] - policy-cache connection settings
//! - [`PostgresConfig`] - persistence connection and pool settings
//! - [`GatewaySettings`] - failure policy, upstream timeout, cache TTL
//!
//! Resolution happens exactly once, at process start, before any concurrent
//! work: the snapshot is immutable afterwards. Malformed integers and
//! durations fall back to documented defaults instead of failing; the only
//! hard error is an unknown [`FailurePolicy`] literal, which must stop the
//! process because that setting governs safety-critical behavior.
//!
//! # Example
//!
//! ```no_run
//! use portcullis_config::ConfigLoader;
//!
//! # fn main() -> Result<(), portcullis_config::ConfigError> {
//! let config = ConfigLoader::new()
//!     .with_dotenv()
//!     .load()?;
//!
//! let addr = config.server_addr();
//! let dsn = config.postgres_dsn();
//! # Ok(())
//! # }
//! ```
//!
//! # Environment Variables
//!
//! | Variable | Default |
//! |----------|---------|
//! | `SERVER_HOST` | `0.0.0.0` |
//! | `SERVER_PORT` | `8080` |
//! | `SERVER_READ_TIMEOUT` | `10s` |
//! | `SERVER_WRITE_TIMEOUT` | `10s` |
//! | `SERVER_IDLE_TIMEOUT` | `120s` |
//! | `REDIS_ADDR` | `localhost:6379` |
//! | `REDIS_PASSWORD` | (empty) |
//! | `REDIS_DB` | `0` |
//! | `REDIS_MAX_RETRIES` | `3` |
//! | `REDIS_POOL_SIZE` | `10` |
//! | `REDIS_DIAL_TIMEOUT` | `5s` |
//! | `REDIS_READ_TIMEOUT` | `3s` |
//! | `REDIS_WRITE_TIMEOUT` | `3s` |
//! | `POSTGRES_HOST` | `localhost` |
//! | `POSTGRES_PORT` | `5432` |
//! | `POSTGRES_USER` | `gateway` |
//! | `POSTGRES_PASSWORD` | `gateway_password` |
//! | `POSTGRES_DB` | `gateway_db` |
//! | `POSTGRES_SSLMODE` | `disable` |
//! | `POSTGRES_MAX_OPEN_CONNS` | `25` |
//! | `POSTGRES_MAX_IDLE_CONNS` | `5` |
//! | `POSTGRES_CONN_MAX_LIFETIME` | `5m` |
//! | `GATEWAY_FAILURE_POLICY` | `fail-closed` |
//! | `GATEWAY_UPSTREAM_TIMEOUT` | `30s` |
//! | `GATEWAY_POLICY_CACHE_TTL` | `5m` |
//!
//! Durations use the humantime grammar (`15s`, `5m`, `250ms`).

#![warn(missing_docs)]

mod config;
mod env;
mod error;
mod loader;
mod schema;

pub use config::{PortcullisConfig, PortcullisConfigBuilder};
pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use schema::{FailurePolicy, GatewaySettings, PostgresConfig, RedisConfig, ServerConfig};
