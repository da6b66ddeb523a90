// NexaFrame Config - Layered configuration resolution
// Copyright (c) 2025 NexaFrame Contributors
// Licensed under the MIT License

//! # NexaFrame Config
//!
//! Resolves the runtime configuration of a web application platform from
//! named overrides (normally environment variables) layered over hardcoded
//! defaults.
//!
//! ## Overview
//!
//! Configuration is split into nine domains:
//! - **App**: environment, locale, security, sessions, assets, API shape
//! - **Auth**: token and session signing, blacklist, login rate limiting
//! - **Cache**: store connection, retry backoff, eviction, clustering, backup
//! - **Database**: connection, replication, pooling, query cache, migrations
//! - **Events**: event to listener table and delivery policies
//! - **Http**: server, middlewares, compression, TLS, CORS, rate limiting
//! - **Logging**: level, destinations, format, rotation
//! - **Queue**: broker connection and job settings
//! - **Services**: third party integration credentials
//!
//! ## Architecture
//!
//! - [`config`] - Override sources, resolution, derived defaults, domain schemas, registry
//! - [`error`] - Error types
//! - [`logging`] - Subscriber setup driven by the Logging domain
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use nexaframe_config::config::{ConfigRegistry, DomainConfig, DomainName};
//! use nexaframe_config::logging::init_logging;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Resolve every domain from the process environment
//!     let mut registry = ConfigRegistry::from_env();
//!
//!     // Startup-time adjustment before the App domain is shared
//!     if let Some(app) = registry.app_mut() {
//!         app.set_environment("staging");
//!     }
//!
//!     let _guard = init_logging(registry.logging())?;
//!
//!     if let DomainConfig::Database(database) = registry.get(DomainName::Database) {
//!         tracing::info!(host = %database.connection.host, port = database.connection.port, "Database target");
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Overrides
//!
//! Any type implementing [`config::OverrideSource`] can feed the resolver, so
//! tests assemble configuration from an in-memory map instead of the process
//! environment:
//!
//! ```rust
//! use nexaframe_config::config::{ConfigRegistry, Overrides};
//!
//! let overrides = Overrides::new()
//!     .with("CACHE_TYPE", "memcached")
//!     .with("HTTP_SSL_ENABLED", "false");
//!
//! let registry = ConfigRegistry::assemble(&overrides);
//! assert_eq!(registry.cache().connection.port, 11211);
//! assert!(!registry.http().ssl.enabled);
//! ```
//!
//! ## Error Handling
//!
//! Assembly never fails. Overrides that do not coerce are logged and replaced
//! by the default. Fallible operations (logging setup, lookups by domain name,
//! snapshots) return [`error::ConfigError`].

pub mod config;
pub mod error;
pub mod logging;
