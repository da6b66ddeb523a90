//! Configuration resolution
//!
//! Settings are resolved per domain from an override source (normally the
//! process environment), falling back to hardcoded defaults.
//!
//! # Quick Start
//!
//! ```rust
//! use nexaframe_config::config::{ConfigRegistry, DomainName, Overrides};
//!
//! let overrides = Overrides::new()
//!     .with("DB_TYPE", "postgresql")
//!     .with("DB_WRITE_HOST", "writer.db.internal");
//!
//! let registry = ConfigRegistry::assemble(&overrides);
//!
//! let database = registry.database();
//! assert_eq!(database.connection.port, 5432);
//! assert_eq!(database.replication.write.host, "writer.db.internal");
//! assert_eq!(database.replication.write.user, database.connection.user);
//!
//! let events = registry.get(DomainName::Events);
//! assert!(events.ptr_eq(&registry.get(DomainName::Events)));
//! ```
//!
//! # Precedence
//!
//! For every field:
//!
//! - a present, non-empty override that coerces to the field type wins
//! - otherwise the default is used; for derived defaults (ports by system
//!   type, replication write endpoint) the default is computed from fields
//!   resolved earlier in the same domain
//!
//! Rejected overrides are logged at `warn` and never abort assembly.
//!
//! # Environment Variables
//!
//! ```bash
//! export DB_TYPE=postgresql
//! export DB_PASSWORD="secret-password"
//! export CACHE_CLUSTER_NODES="10.0.0.1:6379,10.0.0.2:6379"
//! export HTTP_SSL_ENABLED=false
//! ```

pub mod derived;
pub mod registry;
pub mod resolver;
pub mod schema;
pub mod secret;
pub mod source;

// Re-export commonly used types
pub use derived::{BackoffPolicy, PortTable, CACHE_PORTS, DATABASE_PORTS, QUEUE_PORTS};
pub use registry::{ConfigRegistry, DomainConfig, DomainName};
pub use resolver::{resolve, FromOverride, Resolver};
pub use schema::{
    AppConfig, AuthConfig, CacheConfig, DatabaseConfig, EventsConfig, HttpConfig, Integration,
    LoggingConfig, Priority, Propagation, QueueConfig, ServicesConfig,
};
pub use secret::{secret_string, SecretString, SecretValue};
pub use source::{OverrideSource, Overrides};
