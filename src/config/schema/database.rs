//! Database settings
//!
//! Resolution order matters here:
//!
//! 1. `type`, which drives the default port
//! 2. the primary `connection`
//! 3. `replication`, whose write endpoint inherits host, user and password
//!    from the primary connection field by field
//!
//! Everything after that is independent.

use crate::config::derived::DATABASE_PORTS;
use crate::config::resolver::Resolver;
use crate::config::secret::{
    secret_string, serialize_redacted, serialize_redacted_opt, SecretString,
};
use crate::config::source::{OverrideSource, Overrides};
use serde::Serialize;

/// Database configuration
#[derive(Debug, Clone, Serialize)]
pub struct DatabaseConfig {
    /// Database type ('mysql', 'postgresql', 'mongodb', ...)
    #[serde(rename = "type")]
    pub kind: String,

    /// Primary connection
    pub connection: ConnectionSettings,

    /// Read/write splitting
    pub replication: ReplicationSettings,

    /// Connection pool
    pub pooling: PoolingSettings,

    /// Query result cache
    pub cache: QueryCacheSettings,

    /// Engine-specific optimizations
    pub optimizations: OptimizationSettings,

    /// Schema migrations
    pub migrations: MigrationSettings,

    /// Seed data
    pub seeds: SeedSettings,
}

/// Primary connection settings
#[derive(Debug, Clone, Serialize)]
pub struct ConnectionSettings {
    pub host: String,

    /// Defaults to the canonical port of the database type
    pub port: u16,

    pub user: String,

    #[serde(serialize_with = "serialize_redacted")]
    pub password: SecretString,

    /// Database name
    pub database: String,

    pub charset: String,

    pub ssl: bool,

    /// Connect timeout in milliseconds
    pub timeout_ms: u64,
}

/// Replication settings
#[derive(Debug, Clone, Serialize)]
pub struct ReplicationSettings {
    pub enabled: bool,

    /// Write endpoint, inheriting from the primary connection
    pub write: WriteEndpoint,

    /// Read replicas, each configured independently
    pub read: Vec<ReadEndpoint>,
}

/// Write endpoint
#[derive(Debug, Clone, Serialize)]
pub struct WriteEndpoint {
    pub host: String,
    pub user: String,
    #[serde(serialize_with = "serialize_redacted")]
    pub password: SecretString,
}

/// Read replica endpoint
///
/// Nothing is inherited from the primary connection.
#[derive(Debug, Clone, Serialize)]
pub struct ReadEndpoint {
    pub host: String,
    pub user: Option<String>,
    #[serde(serialize_with = "serialize_redacted_opt")]
    pub password: Option<SecretString>,
}

/// Pool settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PoolingSettings {
    pub min: u32,
    pub max: u32,
    /// Time to wait for a free connection in milliseconds
    pub acquire_timeout_ms: u64,
    /// Time a connection may sit idle before release in milliseconds
    pub idle_timeout_ms: u64,
}

/// Query result cache settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryCacheSettings {
    pub enabled: bool,
    pub ttl_secs: u64,
    /// Prefix for cache keys
    pub prefix: String,
}

/// Engine-specific optimizations
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptimizationSettings {
    pub sharding: ShardingSettings,
    /// Log every query (debugging aid)
    pub query_logging: bool,
}

/// Sharding settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShardingSettings {
    pub enabled: bool,
    pub shards: u32,
    /// 'range' or 'hash'
    pub strategy: String,
}

/// Migration settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MigrationSettings {
    pub directory: String,
    pub table_name: String,
}

/// Seed settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeedSettings {
    pub directory: String,
}

impl DatabaseConfig {
    /// Assembles the database configuration from `source`
    pub fn assemble(source: &dyn OverrideSource) -> Self {
        let r = Resolver::new(source, "database");

        let kind: String = r.setting("DB_TYPE", default_database_type());
        let connection = ConnectionSettings::resolve(&r, &kind);
        let replication = ReplicationSettings::resolve(&r, &connection);

        Self {
            kind,
            connection,
            replication,
            pooling: PoolingSettings {
                min: r.setting("DB_POOL_MIN", 0),
                max: r.setting("DB_POOL_MAX", 10),
                acquire_timeout_ms: r.setting("DB_POOL_ACQUIRE_TIMEOUT", 30_000),
                idle_timeout_ms: r.setting("DB_POOL_IDLE_TIMEOUT", 10_000),
            },
            cache: QueryCacheSettings {
                enabled: r.setting("DB_CACHE_ENABLED", false),
                ttl_secs: r.setting("DB_CACHE_TTL", 300),
                prefix: r.setting("DB_CACHE_PREFIX", "nexaframe_db:".to_string()),
            },
            optimizations: OptimizationSettings {
                sharding: ShardingSettings {
                    enabled: r.setting("DB_SHARDING_ENABLED", false),
                    shards: r.setting("DB_SHARDS", 2),
                    strategy: r.setting("DB_SHARDING_STRATEGY", "range".to_string()),
                },
                query_logging: r.setting("DB_LOGGING_ENABLED", false),
            },
            migrations: MigrationSettings {
                directory: r.setting("DB_MIGRATIONS_DIR", "./migrations".to_string()),
                table_name: r.setting("DB_MIGRATIONS_TABLE", "nexaframe_migrations".to_string()),
            },
            seeds: SeedSettings {
                directory: r.setting("DB_SEEDS_DIR", "./seeds".to_string()),
            },
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self::assemble(&Overrides::new())
    }
}

impl ConnectionSettings {
    fn resolve(r: &Resolver<'_>, kind: &str) -> Self {
        Self {
            host: r.setting("DB_HOST", "localhost".to_string()),
            port: r.setting_with("DB_PORT", || DATABASE_PORTS.port_for(kind)),
            user: r.setting("DB_USER", "root".to_string()),
            password: r.setting_with("DB_PASSWORD", || secret_string("")),
            database: r.setting("DB_NAME", "nexaframe_db".to_string()),
            charset: r.setting("DB_CHARSET", "utf8".to_string()),
            ssl: r.setting("DB_SSL_ENABLED", false),
            timeout_ms: r.setting("DB_CONNECTION_TIMEOUT", 5000),
        }
    }
}

impl ReplicationSettings {
    fn resolve(r: &Resolver<'_>, primary: &ConnectionSettings) -> Self {
        Self {
            enabled: r.setting("DB_REPLICATION_ENABLED", false),
            write: WriteEndpoint::inheriting(r, primary),
            read: ReadEndpoint::resolve_all(r),
        }
    }
}

impl WriteEndpoint {
    /// Each field falls back to the primary connection's value on its own
    fn inheriting(r: &Resolver<'_>, primary: &ConnectionSettings) -> Self {
        Self {
            host: r.setting_with("DB_WRITE_HOST", || primary.host.clone()),
            user: r.setting_with("DB_WRITE_USER", || primary.user.clone()),
            password: r.setting_with("DB_WRITE_PASSWORD", || primary.password.clone()),
        }
    }
}

impl ReadEndpoint {
    /// Collects `DB_READ_HOST_1`, `DB_READ_HOST_2`, ... until the first gap
    fn resolve_all(r: &Resolver<'_>) -> Vec<Self> {
        let mut endpoints = Vec::new();

        for index in 1.. {
            let host: Option<String> = r.setting(&format!("DB_READ_HOST_{index}"), None);
            let Some(host) = host else {
                break;
            };

            endpoints.push(Self {
                host,
                user: r.setting(&format!("DB_READ_USER_{index}"), None),
                password: r.setting(&format!("DB_READ_PASSWORD_{index}"), None),
            });
        }

        if !endpoints.is_empty() {
            tracing::debug!(count = endpoints.len(), "Resolved read replicas");
        }
        endpoints
    }
}

fn default_database_type() -> String {
    "mysql".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_database_defaults() {
        let config = DatabaseConfig::default();

        assert_eq!(config.kind, "mysql");
        assert_eq!(config.connection.host, "localhost");
        assert_eq!(config.connection.port, 3306);
        assert_eq!(config.connection.user, "root");
        assert!(config.connection.password.expose_secret().is_empty());
        assert_eq!(config.connection.database, "nexaframe_db");
        assert_eq!(config.connection.charset, "utf8");
        assert!(!config.connection.ssl);
        assert_eq!(config.connection.timeout_ms, 5000);

        assert!(!config.replication.enabled);
        assert!(config.replication.read.is_empty());

        assert_eq!(config.pooling.min, 0);
        assert_eq!(config.pooling.max, 10);
        assert_eq!(config.pooling.acquire_timeout_ms, 30_000);
        assert_eq!(config.pooling.idle_timeout_ms, 10_000);

        assert!(!config.cache.enabled);
        assert_eq!(config.cache.ttl_secs, 300);
        assert_eq!(config.cache.prefix, "nexaframe_db:");

        assert!(!config.optimizations.sharding.enabled);
        assert_eq!(config.optimizations.sharding.shards, 2);
        assert_eq!(config.optimizations.sharding.strategy, "range");
        assert!(!config.optimizations.query_logging);

        assert_eq!(config.migrations.directory, "./migrations");
        assert_eq!(config.migrations.table_name, "nexaframe_migrations");
        assert_eq!(config.seeds.directory, "./seeds");
    }

    #[test]
    fn test_port_follows_type() {
        let overrides = Overrides::new().with("DB_TYPE", "mongodb");
        assert_eq!(DatabaseConfig::assemble(&overrides).connection.port, 27017);

        let overrides = Overrides::new().with("DB_TYPE", "postgresql");
        assert_eq!(DatabaseConfig::assemble(&overrides).connection.port, 5432);

        let overrides = Overrides::new().with("DB_TYPE", "oracle");
        assert_eq!(DatabaseConfig::assemble(&overrides).connection.port, 3306);
    }

    #[test]
    fn test_invalid_port_falls_back_to_type_port() {
        let overrides = Overrides::new()
            .with("DB_TYPE", "postgresql")
            .with("DB_PORT", "five-four-three-two");
        assert_eq!(DatabaseConfig::assemble(&overrides).connection.port, 5432);
    }

    #[test]
    fn test_write_endpoint_inherits_primary() {
        let overrides = Overrides::new()
            .with("DB_HOST", "primary.db")
            .with("DB_USER", "app")
            .with("DB_PASSWORD", "primary-pass");

        let write = DatabaseConfig::assemble(&overrides).replication.write;

        assert_eq!(write.host, "primary.db");
        assert_eq!(write.user, "app");
        assert_eq!(write.password.expose_secret(), "primary-pass");
    }

    #[test]
    fn test_write_host_override_keeps_other_fields_inherited() {
        let overrides = Overrides::new()
            .with("DB_HOST", "primary.db")
            .with("DB_USER", "app")
            .with("DB_PASSWORD", "primary-pass")
            .with("DB_WRITE_HOST", "writer.db");

        let config = DatabaseConfig::assemble(&overrides);
        let write = &config.replication.write;

        assert_eq!(write.host, "writer.db");
        assert_eq!(write.user, "app");
        assert_eq!(write.password.expose_secret(), "primary-pass");
        assert_eq!(config.connection.host, "primary.db");
    }

    #[test]
    fn test_write_endpoint_inherits_defaults_when_nothing_set() {
        let write = DatabaseConfig::default().replication.write;

        assert_eq!(write.host, "localhost");
        assert_eq!(write.user, "root");
        assert!(write.password.expose_secret().is_empty());
    }

    #[test]
    fn test_read_endpoints_are_independent() {
        let overrides = Overrides::new()
            .with("DB_HOST", "primary.db")
            .with("DB_USER", "app")
            .with("DB_READ_HOST_1", "replica-1.db")
            .with("DB_READ_HOST_2", "replica-2.db")
            .with("DB_READ_USER_2", "reader")
            .with("DB_READ_PASSWORD_2", "reader-pass");

        let read = DatabaseConfig::assemble(&overrides).replication.read;

        assert_eq!(read.len(), 2);
        assert_eq!(read[0].host, "replica-1.db");
        assert_eq!(read[0].user, None);
        assert!(read[0].password.is_none());
        assert_eq!(read[1].host, "replica-2.db");
        assert_eq!(read[1].user.as_deref(), Some("reader"));
        assert_eq!(
            read[1].password.as_ref().unwrap().expose_secret(),
            "reader-pass"
        );
    }

    #[test]
    fn test_read_endpoint_scan_stops_at_gap() {
        let overrides = Overrides::new()
            .with("DB_READ_HOST_1", "replica-1.db")
            .with("DB_READ_HOST_3", "replica-3.db");

        let read = DatabaseConfig::assemble(&overrides).replication.read;

        assert_eq!(read.len(), 1);
        assert_eq!(read[0].host, "replica-1.db");
    }

    #[test]
    fn test_read_endpoint_without_host_is_absent() {
        let overrides = Overrides::new().with("DB_READ_USER_1", "reader");
        assert!(DatabaseConfig::assemble(&overrides)
            .replication
            .read
            .is_empty());
    }

    #[test]
    fn test_password_redacted_in_serialization() {
        let overrides = Overrides::new().with("DB_PASSWORD", "top-secret");
        let json = serde_json::to_string(&DatabaseConfig::assemble(&overrides)).unwrap();

        assert!(!json.contains("top-secret"));
        assert!(json.contains("\"type\":\"mysql\""));
    }
}
