//! Cache settings

use crate::config::derived::{
    BackoffPolicy, CACHE_PORTS, DEFAULT_BACKOFF_MAX_DELAY_MS, DEFAULT_BACKOFF_STEP_MS,
};
use crate::config::resolver::Resolver;
use crate::config::secret::{serialize_redacted_opt, SecretString};
use crate::config::source::{OverrideSource, Overrides};
use serde::Serialize;

/// Cache configuration
#[derive(Debug, Clone, Serialize)]
pub struct CacheConfig {
    /// Cache system type ('redis', 'memcached', ...)
    #[serde(rename = "type")]
    pub kind: String,

    /// Connection and authentication
    pub connection: CacheConnection,

    /// Invalidation and TTL policies
    pub policies: CachePolicies,

    /// Cluster topology
    pub clustering: ClusteringSettings,

    /// Backup and persistence
    pub backup: BackupSettings,
}

/// Cache connection settings
#[derive(Debug, Clone, Serialize)]
pub struct CacheConnection {
    pub host: String,

    /// Defaults to the canonical port of the cache type
    pub port: u16,

    #[serde(serialize_with = "serialize_redacted_opt")]
    pub password: Option<SecretString>,

    /// Logical database index
    pub db: u32,

    pub use_tls: bool,

    /// Reconnect backoff
    pub retry: BackoffPolicy,
}

/// Invalidation and TTL policies
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CachePolicies {
    pub default_ttl_secs: u64,
    pub auto_prune: bool,
    /// Key prefix
    pub namespace: String,
    pub stale_while_revalidate_secs: u64,
}

/// Cluster settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClusteringSettings {
    pub enabled: bool,
    /// Node addresses
    pub nodes: Vec<String>,
}

/// Backup settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BackupSettings {
    pub enabled: bool,
    pub path: String,
    /// 'hourly', 'daily', 'weekly', ...
    pub frequency: String,
}

impl CacheConfig {
    /// Assembles the cache configuration from `source`
    ///
    /// The type is resolved first because the port default depends on it.
    pub fn assemble(source: &dyn OverrideSource) -> Self {
        let r = Resolver::new(source, "cache");

        let kind: String = r.setting("CACHE_TYPE", default_cache_type());

        let connection = CacheConnection {
            host: r.setting("CACHE_HOST", default_host()),
            port: r.setting_with("CACHE_PORT", || CACHE_PORTS.port_for(&kind)),
            password: r.setting("CACHE_PASSWORD", None),
            db: r.setting("CACHE_DB", 0),
            use_tls: r.setting("CACHE_USE_TLS", false),
            retry: BackoffPolicy {
                step_ms: r.setting("CACHE_RETRY_STEP_MS", DEFAULT_BACKOFF_STEP_MS),
                max_delay_ms: r.setting("CACHE_RETRY_MAX_DELAY_MS", DEFAULT_BACKOFF_MAX_DELAY_MS),
            },
        };

        Self {
            kind,
            connection,
            policies: CachePolicies {
                default_ttl_secs: r.setting("CACHE_DEFAULT_TTL", 3600),
                auto_prune: r.setting("CACHE_AUTO_PRUNE_ENABLED", true),
                namespace: r.setting("CACHE_NAMESPACE", default_namespace()),
                stale_while_revalidate_secs: r.setting("CACHE_SWRV", 60),
            },
            clustering: ClusteringSettings {
                enabled: r.setting("CACHE_CLUSTER_ENABLED", false),
                nodes: r.setting("CACHE_CLUSTER_NODES", Vec::new()),
            },
            backup: BackupSettings {
                enabled: r.setting("CACHE_BACKUP_ENABLED", false),
                path: r.setting("CACHE_BACKUP_PATH", default_backup_path()),
                frequency: r.setting("CACHE_BACKUP_FREQUENCY", default_backup_frequency()),
            },
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self::assemble(&Overrides::new())
    }
}

fn default_cache_type() -> String {
    "redis".to_string()
}

fn default_host() -> String {
    "localhost".to_string()
}

fn default_namespace() -> String {
    "nexaframe:".to_string()
}

fn default_backup_path() -> String {
    "./backups/cache".to_string()
}

fn default_backup_frequency() -> String {
    "daily".to_string()
}
