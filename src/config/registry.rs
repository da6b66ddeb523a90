//! Configuration registry
//!
//! Holds one resolved configuration per domain. The registry is built once at
//! startup and passed to the components that need it; there is no global
//! instance. Each domain sits behind an `Arc`, so handing a domain to a
//! consumer is a reference-count bump and every hand-out is the same instance.

use super::schema::{
    AppConfig, AuthConfig, CacheConfig, DatabaseConfig, EventsConfig, HttpConfig, LoggingConfig,
    QueueConfig, ServicesConfig,
};
use super::source::{OverrideSource, Overrides};
use crate::error::{ConfigError, Result};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Configuration domain names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DomainName {
    App,
    Auth,
    Cache,
    Database,
    Events,
    Http,
    Logging,
    Queue,
    Services,
}

impl DomainName {
    /// Every domain, in registry order
    pub const ALL: [DomainName; 9] = [
        DomainName::App,
        DomainName::Auth,
        DomainName::Cache,
        DomainName::Database,
        DomainName::Events,
        DomainName::Http,
        DomainName::Logging,
        DomainName::Queue,
        DomainName::Services,
    ];

    /// Lowercase domain name
    pub fn as_str(&self) -> &'static str {
        match self {
            DomainName::App => "app",
            DomainName::Auth => "auth",
            DomainName::Cache => "cache",
            DomainName::Database => "database",
            DomainName::Events => "events",
            DomainName::Http => "http",
            DomainName::Logging => "logging",
            DomainName::Queue => "queue",
            DomainName::Services => "services",
        }
    }
}

impl FromStr for DomainName {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        DomainName::ALL
            .into_iter()
            .find(|domain| domain.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ConfigError::UnknownDomain(s.to_string()))
    }
}

impl fmt::Display for DomainName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A shared handle to one domain's configuration
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum DomainConfig {
    App(Arc<AppConfig>),
    Auth(Arc<AuthConfig>),
    Cache(Arc<CacheConfig>),
    Database(Arc<DatabaseConfig>),
    Events(Arc<EventsConfig>),
    Http(Arc<HttpConfig>),
    Logging(Arc<LoggingConfig>),
    Queue(Arc<QueueConfig>),
    Services(Arc<ServicesConfig>),
}

impl DomainConfig {
    /// Which domain this handle belongs to
    pub fn name(&self) -> DomainName {
        match self {
            DomainConfig::App(_) => DomainName::App,
            DomainConfig::Auth(_) => DomainName::Auth,
            DomainConfig::Cache(_) => DomainName::Cache,
            DomainConfig::Database(_) => DomainName::Database,
            DomainConfig::Events(_) => DomainName::Events,
            DomainConfig::Http(_) => DomainName::Http,
            DomainConfig::Logging(_) => DomainName::Logging,
            DomainConfig::Queue(_) => DomainName::Queue,
            DomainConfig::Services(_) => DomainName::Services,
        }
    }

    /// Whether both handles point at the same instance
    pub fn ptr_eq(&self, other: &DomainConfig) -> bool {
        match (self, other) {
            (DomainConfig::App(a), DomainConfig::App(b)) => Arc::ptr_eq(a, b),
            (DomainConfig::Auth(a), DomainConfig::Auth(b)) => Arc::ptr_eq(a, b),
            (DomainConfig::Cache(a), DomainConfig::Cache(b)) => Arc::ptr_eq(a, b),
            (DomainConfig::Database(a), DomainConfig::Database(b)) => Arc::ptr_eq(a, b),
            (DomainConfig::Events(a), DomainConfig::Events(b)) => Arc::ptr_eq(a, b),
            (DomainConfig::Http(a), DomainConfig::Http(b)) => Arc::ptr_eq(a, b),
            (DomainConfig::Logging(a), DomainConfig::Logging(b)) => Arc::ptr_eq(a, b),
            (DomainConfig::Queue(a), DomainConfig::Queue(b)) => Arc::ptr_eq(a, b),
            (DomainConfig::Services(a), DomainConfig::Services(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

/// One resolved configuration per domain
#[derive(Debug, Clone)]
pub struct ConfigRegistry {
    app: Arc<AppConfig>,
    auth: Arc<AuthConfig>,
    cache: Arc<CacheConfig>,
    database: Arc<DatabaseConfig>,
    events: Arc<EventsConfig>,
    http: Arc<HttpConfig>,
    logging: Arc<LoggingConfig>,
    queue: Arc<QueueConfig>,
    services: Arc<ServicesConfig>,
}

impl ConfigRegistry {
    /// Assembles every domain from `source`
    ///
    /// Never fails: rejected overrides are logged and replaced by defaults.
    pub fn assemble(source: &dyn OverrideSource) -> Self {
        let registry = Self {
            app: Arc::new(AppConfig::assemble(source)),
            auth: Arc::new(AuthConfig::assemble(source)),
            cache: Arc::new(CacheConfig::assemble(source)),
            database: Arc::new(DatabaseConfig::assemble(source)),
            events: Arc::new(EventsConfig::assemble(source)),
            http: Arc::new(HttpConfig::assemble(source)),
            logging: Arc::new(LoggingConfig::assemble(source)),
            queue: Arc::new(QueueConfig::assemble(source)),
            services: Arc::new(ServicesConfig::assemble(source)),
        };

        tracing::info!(
            environment = %registry.app.environment,
            database_type = %registry.database.kind,
            cache_type = %registry.cache.kind,
            queue_type = %registry.queue.kind,
            "Configuration assembled"
        );

        registry
    }

    /// Assembles every domain from a snapshot of the process environment
    pub fn from_env() -> Self {
        Self::assemble(&Overrides::from_env())
    }

    /// Handle to the configuration of `domain`
    pub fn get(&self, domain: DomainName) -> DomainConfig {
        match domain {
            DomainName::App => DomainConfig::App(Arc::clone(&self.app)),
            DomainName::Auth => DomainConfig::Auth(Arc::clone(&self.auth)),
            DomainName::Cache => DomainConfig::Cache(Arc::clone(&self.cache)),
            DomainName::Database => DomainConfig::Database(Arc::clone(&self.database)),
            DomainName::Events => DomainConfig::Events(Arc::clone(&self.events)),
            DomainName::Http => DomainConfig::Http(Arc::clone(&self.http)),
            DomainName::Logging => DomainConfig::Logging(Arc::clone(&self.logging)),
            DomainName::Queue => DomainConfig::Queue(Arc::clone(&self.queue)),
            DomainName::Services => DomainConfig::Services(Arc::clone(&self.services)),
        }
    }

    /// Handle to the configuration of the domain called `name`
    pub fn get_by_name(&self, name: &str) -> Result<DomainConfig> {
        Ok(self.get(name.parse()?))
    }

    pub fn app(&self) -> &Arc<AppConfig> {
        &self.app
    }

    /// Mutable access to the App domain
    ///
    /// Only available while the App configuration has not been handed out
    /// (no other `Arc` clone exists), i.e. on the startup path. Returns `None`
    /// once it is shared, so shared readers never observe a mutation.
    pub fn app_mut(&mut self) -> Option<&mut AppConfig> {
        Arc::get_mut(&mut self.app)
    }

    pub fn auth(&self) -> &Arc<AuthConfig> {
        &self.auth
    }

    pub fn cache(&self) -> &Arc<CacheConfig> {
        &self.cache
    }

    pub fn database(&self) -> &Arc<DatabaseConfig> {
        &self.database
    }

    pub fn events(&self) -> &Arc<EventsConfig> {
        &self.events
    }

    pub fn http(&self) -> &Arc<HttpConfig> {
        &self.http
    }

    pub fn logging(&self) -> &Arc<LoggingConfig> {
        &self.logging
    }

    pub fn queue(&self) -> &Arc<QueueConfig> {
        &self.queue
    }

    pub fn services(&self) -> &Arc<ServicesConfig> {
        &self.services
    }

    /// The full resolved tree keyed by domain name, secrets redacted
    pub fn snapshot(&self) -> Result<serde_json::Value> {
        let mut tree = serde_json::Map::new();
        for domain in DomainName::ALL {
            tree.insert(
                domain.as_str().to_string(),
                serde_json::to_value(self.get(domain))?,
            );
        }
        Ok(serde_json::Value::Object(tree))
    }
}

impl Default for ConfigRegistry {
    fn default() -> Self {
        Self::assemble(&Overrides::new())
    }
}
