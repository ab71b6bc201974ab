//! Configuration schema types.
//!
//! This module defines the structure of all configuration sections and their
//! documented defaults. Every `Default` impl here is the authoritative
//! source for the value used when an environment variable is unset, empty,
//! or fails to parse.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::ConfigError;

/// HTTP server configuration section.
///
/// Controls the bind address and the connection timeouts handed to the
/// HTTP server at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Bind host (e.g., "0.0.0.0").
    pub host: String,

    /// Bind port. Bounds are not enforced beyond the type.
    pub port: u16,

    /// Read timeout for inbound requests.
    pub read_timeout: Duration,

    /// Write timeout for outbound responses.
    pub write_timeout: Duration,

    /// Keep-alive idle timeout.
    pub idle_timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
            read_timeout: default_server_read_timeout(),
            write_timeout: default_server_write_timeout(),
            idle_timeout: default_server_idle_timeout(),
        }
    }
}

fn default_server_host() -> String {
    "0.0.0.0".to_string()
}

fn default_server_port() -> u16 {
    8080
}

fn default_server_read_timeout() -> Duration {
    Duration::from_secs(10)
}

fn default_server_write_timeout() -> Duration {
    Duration::from_secs(10)
}

fn default_server_idle_timeout() -> Duration {
    Duration::from_secs(120)
}

/// Redis connection configuration section.
///
/// These values are handed verbatim to the policy-cache client; this crate
/// performs no connection attempt and no reachability check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedisConfig {
    /// Connection address (e.g., "localhost:6379").
    pub addr: String,

    /// Password, empty when the server requires none.
    pub password: String,

    /// Logical database index.
    pub db: u32,

    /// Retry budget for failed commands.
    pub max_retries: u32,

    /// Connection pool size.
    pub pool_size: u32,

    /// Timeout for establishing a connection.
    pub dial_timeout: Duration,

    /// Timeout for reads.
    pub read_timeout: Duration,

    /// Timeout for writes.
    pub write_timeout: Duration,
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self {
            addr: default_redis_addr(),
            password: String::new(),
            db: 0,
            max_retries: default_redis_max_retries(),
            pool_size: default_redis_pool_size(),
            dial_timeout: default_redis_dial_timeout(),
            read_timeout: default_redis_read_timeout(),
            write_timeout: default_redis_write_timeout(),
        }
    }
}

fn default_redis_addr() -> String {
    "localhost:6379".to_string()
}

fn default_redis_max_retries() -> u32 {
    3
}

fn default_redis_pool_size() -> u32 {
    10
}

fn default_redis_dial_timeout() -> Duration {
    Duration::from_secs(5)
}

fn default_redis_read_timeout() -> Duration {
    Duration::from_secs(3)
}

fn default_redis_write_timeout() -> Duration {
    Duration::from_secs(3)
}

/// PostgreSQL connection configuration section.
///
/// `ssl_mode` is passed through to the driver as-is; the accepted values
/// are the driver's concern and are not validated here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostgresConfig {
    /// Database host.
    pub host: String,

    /// Database port.
    pub port: u16,

    /// Connection user.
    pub user: String,

    /// Connection password.
    pub password: String,

    /// Database name.
    pub database: String,

    /// TLS mode selector (e.g., "disable", "require").
    pub ssl_mode: String,

    /// Maximum open connections in the pool.
    pub max_open_conns: u32,

    /// Maximum idle connections in the pool.
    pub max_idle_conns: u32,

    /// Maximum lifetime of a pooled connection.
    pub conn_max_lifetime: Duration,
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            host: default_postgres_host(),
            port: default_postgres_port(),
            user: default_postgres_user(),
            password: default_postgres_password(),
            database: default_postgres_database(),
            ssl_mode: default_postgres_ssl_mode(),
            max_open_conns: default_postgres_max_open_conns(),
            max_idle_conns: default_postgres_max_idle_conns(),
            conn_max_lifetime: default_postgres_conn_max_lifetime(),
        }
    }
}

fn default_postgres_host() -> String {
    "localhost".to_string()
}

fn default_postgres_port() -> u16 {
    5432
}

fn default_postgres_user() -> String {
    "gateway".to_string()
}

fn default_postgres_password() -> String {
    "gateway_password".to_string()
}

fn default_postgres_database() -> String {
    "gateway_db".to_string()
}

fn default_postgres_ssl_mode() -> String {
    "disable".to_string()
}

fn default_postgres_max_open_conns() -> u32 {
    25
}

fn default_postgres_max_idle_conns() -> u32 {
    5
}

fn default_postgres_conn_max_lifetime() -> Duration {
    Duration::from_secs(300)
}

/// Gateway behavior configuration section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewaySettings {
    /// Behavior when the policy cache is unavailable.
    pub failure_policy: FailurePolicy,

    /// Upper bound on proxied-request latency.
    pub upstream_timeout: Duration,

    /// Freshness bound for in-memory policy lookups.
    pub policy_cache_ttl: Duration,
}

impl Default for GatewaySettings {
    fn default() -> Self {
        Self {
            failure_policy: FailurePolicy::FailClosed,
            upstream_timeout: default_gateway_upstream_timeout(),
            policy_cache_ttl: default_gateway_policy_cache_ttl(),
        }
    }
}

fn default_gateway_upstream_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_gateway_policy_cache_ttl() -> Duration {
    Duration::from_secs(300)
}

/// Behavior when a dependency such as the policy cache is unavailable.
///
/// This is the one configuration field with safety implications, so it is a
/// closed enumeration validated when the snapshot is constructed. Consumers
/// never need to re-validate: holding a `FailurePolicy` is the proof that
/// the configured value was one of the two known literals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Permit requests through when the cache is unavailable.
    FailOpen,

    /// Block requests when the cache is unavailable.
    FailClosed,
}

impl FailurePolicy {
    /// The wire literal for this policy.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FailOpen => "fail-open",
            Self::FailClosed => "fail-closed",
        }
    }

    /// Whether the gateway lets requests through on cache failure.
    #[must_use]
    pub fn is_fail_open(self) -> bool {
        matches!(self, Self::FailOpen)
    }
}

impl fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FailurePolicy {
    type Err = ConfigError;

    /// Exact, case-sensitive match against the two known literals.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fail-open" => Ok(Self::FailOpen),
            "fail-closed" => Ok(Self::FailClosed),
            other => Err(ConfigError::invalid_value(
                "gateway.failure_policy",
                format!("must be 'fail-open' or 'fail-closed', got '{other}'"),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.read_timeout, Duration::from_secs(10));
        assert_eq!(config.write_timeout, Duration::from_secs(10));
        assert_eq!(config.idle_timeout, Duration::from_secs(120));
    }

    #[test]
    fn test_redis_defaults() {
        let config = RedisConfig::default();
        assert_eq!(config.addr, "localhost:6379");
        assert_eq!(config.password, "");
        assert_eq!(config.db, 0);
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.pool_size, 10);
        assert_eq!(config.dial_timeout, Duration::from_secs(5));
        assert_eq!(config.read_timeout, Duration::from_secs(3));
        assert_eq!(config.write_timeout, Duration::from_secs(3));
    }

    #[test]
    fn test_postgres_defaults() {
        let config = PostgresConfig::default();
        assert_eq!(config.host, "localhost");
        assert_eq!(config.port, 5432);
        assert_eq!(config.user, "gateway");
        assert_eq!(config.password, "gateway_password");
        assert_eq!(config.database, "gateway_db");
        assert_eq!(config.ssl_mode, "disable");
        assert_eq!(config.max_open_conns, 25);
        assert_eq!(config.max_idle_conns, 5);
        assert_eq!(config.conn_max_lifetime, Duration::from_secs(300));
    }

    #[test]
    fn test_gateway_defaults() {
        let settings = GatewaySettings::default();
        assert_eq!(settings.failure_policy, FailurePolicy::FailClosed);
        assert_eq!(settings.upstream_timeout, Duration::from_secs(30));
        assert_eq!(settings.policy_cache_ttl, Duration::from_secs(300));
    }

    #[test]
    fn test_failure_policy_parse() {
        assert_eq!(
            "fail-open".parse::<FailurePolicy>().unwrap(),
            FailurePolicy::FailOpen
        );
        assert_eq!(
            "fail-closed".parse::<FailurePolicy>().unwrap(),
            FailurePolicy::FailClosed
        );
    }

    #[test]
    fn test_failure_policy_rejects_unknown() {
        assert!("fail-sometimes".parse::<FailurePolicy>().is_err());
        assert!("".parse::<FailurePolicy>().is_err());
        // Case-sensitive: the literals must match exactly.
        assert!("Fail-Open".parse::<FailurePolicy>().is_err());
        assert!("FAIL-CLOSED".parse::<FailurePolicy>().is_err());
    }

    #[test]
    fn test_failure_policy_round_trip() {
        for policy in [FailurePolicy::FailOpen, FailurePolicy::FailClosed] {
            assert_eq!(policy.as_str().parse::<FailurePolicy>().unwrap(), policy);
        }
    }

    #[test]
    fn test_failure_policy_display() {
        assert_eq!(FailurePolicy::FailOpen.to_string(), "fail-open");
        assert_eq!(FailurePolicy::FailClosed.to_string(), "fail-closed");
    }

    #[test]
    fn test_is_fail_open() {
        assert!(FailurePolicy::FailOpen.is_fail_open());
        assert!(!FailurePolicy::FailClosed.is_fail_open());
    }
}
