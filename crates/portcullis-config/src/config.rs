//! Main configuration types.
//!
//! This module provides the top-level [`PortcullisConfig`] snapshot and its
//! builder.

use crate::env::{env_duration_or, env_or, env_parse_or};
use crate::{ConfigError, GatewaySettings, PostgresConfig, RedisConfig, ServerConfig};

/// Complete Portcullis gateway configuration.
///
/// This is the immutable snapshot constructed once at process start and
/// shared by reference with every downstream component. Nothing mutates it
/// afterwards, so it may be read concurrently without synchronization.
///
/// # Example
///
/// ```
/// use portcullis_config::PortcullisConfig;
///
/// let config = PortcullisConfig::default();
/// assert_eq!(config.server_addr(), "0.0.0.0:8080");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PortcullisConfig {
    /// HTTP server settings.
    pub server: ServerConfig,

    /// Redis policy-cache settings.
    pub redis: RedisConfig,

    /// PostgreSQL persistence settings.
    pub postgres: PostgresConfig,

    /// Gateway behavior settings.
    pub gateway: GatewaySettings,
}

impl PortcullisConfig {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```
    /// use portcullis_config::{PortcullisConfig, ServerConfig};
    ///
    /// let config = PortcullisConfig::builder()
    ///     .server(ServerConfig {
    ///         host: "127.0.0.1".to_string(),
    ///         ..Default::default()
    ///     })
    ///     .build();
    ///
    /// assert_eq!(config.server.host, "127.0.0.1");
    /// ```
    #[must_use]
    pub fn builder() -> PortcullisConfigBuilder {
        PortcullisConfigBuilder::new()
    }

    /// Resolve the configuration from the process environment.
    ///
    /// Every setting has a documented default used when the variable is
    /// unset or empty. Malformed integers and durations silently fall back
    /// to their defaults; this leniency is deliberate and load never fails
    /// because of them. The single hard failure is an unknown
    /// `GATEWAY_FAILURE_POLICY` value, because that field governs
    /// safety-critical behavior and must not be guessed.
    ///
    /// Reads the environment only: no file I/O, no network, no logging.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` when `GATEWAY_FAILURE_POLICY` is
    /// set to anything other than exactly `fail-open` or `fail-closed`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = GatewaySettings::default();
        let failure_policy =
            env_or("GATEWAY_FAILURE_POLICY", defaults.failure_policy.as_str()).parse()?;
        Ok(Self::resolve_with_policy(failure_policy))
    }

    // Lenient resolution of everything except the failure policy, which the
    // caller has already settled one way or the other.
    pub(crate) fn resolve_with_policy(failure_policy: crate::FailurePolicy) -> Self {
        let server_defaults = ServerConfig::default();
        let redis_defaults = RedisConfig::default();
        let postgres_defaults = PostgresConfig::default();
        let gateway_defaults = GatewaySettings::default();

        Self {
            server: ServerConfig {
                host: env_or("SERVER_HOST", &server_defaults.host),
                port: env_parse_or("SERVER_PORT", server_defaults.port),
                read_timeout: env_duration_or(
                    "SERVER_READ_TIMEOUT",
                    server_defaults.read_timeout,
                ),
                write_timeout: env_duration_or(
                    "SERVER_WRITE_TIMEOUT",
                    server_defaults.write_timeout,
                ),
                idle_timeout: env_duration_or(
                    "SERVER_IDLE_TIMEOUT",
                    server_defaults.idle_timeout,
                ),
            },
            redis: RedisConfig {
                addr: env_or("REDIS_ADDR", &redis_defaults.addr),
                password: env_or("REDIS_PASSWORD", &redis_defaults.password),
                db: env_parse_or("REDIS_DB", redis_defaults.db),
                max_retries: env_parse_or("REDIS_MAX_RETRIES", redis_defaults.max_retries),
                pool_size: env_parse_or("REDIS_POOL_SIZE", redis_defaults.pool_size),
                dial_timeout: env_duration_or("REDIS_DIAL_TIMEOUT", redis_defaults.dial_timeout),
                read_timeout: env_duration_or("REDIS_READ_TIMEOUT", redis_defaults.read_timeout),
                write_timeout: env_duration_or(
                    "REDIS_WRITE_TIMEOUT",
                    redis_defaults.write_timeout,
                ),
            },
            postgres: PostgresConfig {
                host: env_or("POSTGRES_HOST", &postgres_defaults.host),
                port: env_parse_or("POSTGRES_PORT", postgres_defaults.port),
                user: env_or("POSTGRES_USER", &postgres_defaults.user),
                password: env_or("POSTGRES_PASSWORD", &postgres_defaults.password),
                database: env_or("POSTGRES_DB", &postgres_defaults.database),
                ssl_mode: env_or("POSTGRES_SSLMODE", &postgres_defaults.ssl_mode),
                max_open_conns: env_parse_or(
                    "POSTGRES_MAX_OPEN_CONNS",
                    postgres_defaults.max_open_conns,
                ),
                max_idle_conns: env_parse_or(
                    "POSTGRES_MAX_IDLE_CONNS",
                    postgres_defaults.max_idle_conns,
                ),
                conn_max_lifetime: env_duration_or(
                    "POSTGRES_CONN_MAX_LIFETIME",
                    postgres_defaults.conn_max_lifetime,
                ),
            },
            gateway: GatewaySettings {
                failure_policy,
                upstream_timeout: env_duration_or(
                    "GATEWAY_UPSTREAM_TIMEOUT",
                    gateway_defaults.upstream_timeout,
                ),
                policy_cache_ttl: env_duration_or(
                    "GATEWAY_POLICY_CACHE_TTL",
                    gateway_defaults.policy_cache_ttl,
                ),
            },
        }
    }

    /// The combined server bind address, `host:port`.
    ///
    /// Pure formatting over the snapshot, recomputed per call.
    #[must_use]
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// The PostgreSQL connection string in `key=value` form.
    ///
    /// Keys appear in the order `host, port, user, password, dbname,
    /// sslmode`, space-separated. Pure formatting over the snapshot,
    /// recomputed per call.
    #[must_use]
    pub fn postgres_dsn(&self) -> String {
        format!(
            "host={} port={} user={} password={} dbname={} sslmode={}",
            self.postgres.host,
            self.postgres.port,
            self.postgres.user,
            self.postgres.password,
            self.postgres.database,
            self.postgres.ssl_mode,
        )
    }
}

/// Builder for [`PortcullisConfig`].
///
/// Used by tests and by embedders that assemble a snapshot in code instead
/// of from the environment. Sections left unset use their defaults.
#[derive(Debug, Default)]
pub struct PortcullisConfigBuilder {
    server: Option<ServerConfig>,
    redis: Option<RedisConfig>,
    postgres: Option<PostgresConfig>,
    gateway: Option<GatewaySettings>,
}

impl PortcullisConfigBuilder {
    /// Create a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the server configuration.
    #[must_use]
    pub fn server(mut self, server: ServerConfig) -> Self {
        self.server = Some(server);
        self
    }

    /// Set the Redis configuration.
    #[must_use]
    pub fn redis(mut self, redis: RedisConfig) -> Self {
        self.redis = Some(redis);
        self
    }

    /// Set the PostgreSQL configuration.
    #[must_use]
    pub fn postgres(mut self, postgres: PostgresConfig) -> Self {
        self.postgres = Some(postgres);
        self
    }

    /// Set the gateway behavior settings.
    #[must_use]
    pub fn gateway(mut self, gateway: GatewaySettings) -> Self {
        self.gateway = Some(gateway);
        self
    }

    /// Build the configuration.
    #[must_use]
    pub fn build(self) -> PortcullisConfig {
        PortcullisConfig {
            server: self.server.unwrap_or_default(),
            redis: self.redis.unwrap_or_default(),
            postgres: self.postgres.unwrap_or_default(),
            gateway: self.gateway.unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FailurePolicy;

    #[test]
    fn test_default_config() {
        let config = PortcullisConfig::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.redis.addr, "localhost:6379");
        assert_eq!(config.postgres.database, "gateway_db");
        assert_eq!(config.gateway.failure_policy, FailurePolicy::FailClosed);
    }

    #[test]
    fn test_server_addr() {
        let config = PortcullisConfig::builder()
            .server(ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
                ..Default::default()
            })
            .build();

        assert_eq!(config.server_addr(), "127.0.0.1:8080");
    }

    #[test]
    fn test_postgres_dsn() {
        let config = PortcullisConfig::builder()
            .postgres(PostgresConfig {
                host: "localhost".to_string(),
                user: "testuser".to_string(),
                password: "testpass".to_string(),
                database: "testdb".to_string(),
                ssl_mode: "require".to_string(),
                ..Default::default()
            })
            .build();

        let dsn = config.postgres_dsn();
        assert_eq!(
            dsn,
            "host=localhost port=5432 user=testuser password=testpass dbname=testdb sslmode=require"
        );
        assert!(dsn.contains("host=localhost"));
        assert!(dsn.contains("user=testuser"));
    }

    #[test]
    fn test_dsn_key_order() {
        let dsn = PortcullisConfig::default().postgres_dsn();
        let host = dsn.find("host=").unwrap();
        let port = dsn.find("port=").unwrap();
        let user = dsn.find("user=").unwrap();
        let password = dsn.find("password=").unwrap();
        let dbname = dsn.find("dbname=").unwrap();
        let sslmode = dsn.find("sslmode=").unwrap();
        assert!(host < port && port < user && user < password);
        assert!(password < dbname && dbname < sslmode);
    }

    #[test]
    fn test_builder_all_sections() {
        let config = PortcullisConfig::builder()
            .server(ServerConfig {
                host: "10.0.0.1".to_string(),
                ..Default::default()
            })
            .redis(RedisConfig {
                pool_size: 32,
                ..Default::default()
            })
            .postgres(PostgresConfig {
                max_open_conns: 50,
                ..Default::default()
            })
            .gateway(GatewaySettings {
                failure_policy: FailurePolicy::FailOpen,
                ..Default::default()
            })
            .build();

        assert_eq!(config.server.host, "10.0.0.1");
        assert_eq!(config.redis.pool_size, 32);
        assert_eq!(config.postgres.max_open_conns, 50);
        assert!(config.gateway.failure_policy.is_fail_open());
    }

    #[test]
    fn test_builder_unset_sections_use_defaults() {
        let config = PortcullisConfig::builder()
            .server(ServerConfig {
                port: 9090,
                ..Default::default()
            })
            .build();

        assert_eq!(config.server.port, 9090);
        assert_eq!(config.redis, RedisConfig::default());
        assert_eq!(config.postgres, PostgresConfig::default());
        assert_eq!(config.gateway, GatewaySettings::default());
    }
}
