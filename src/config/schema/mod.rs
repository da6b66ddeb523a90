//! Per-domain configuration blocks
//!
//! Each domain has one `*Config` type with an `assemble` constructor that
//! resolves every field against an [`OverrideSource`](crate::config::OverrideSource)
//! in declaration order. Domains never read each other's values.

pub mod app;
pub mod auth;
pub mod cache;
pub mod database;
pub mod events;
pub mod http;
pub mod logging;
pub mod policy;
pub mod queue;
pub mod services;

pub use app::AppConfig;
pub use auth::AuthConfig;
pub use cache::CacheConfig;
pub use database::DatabaseConfig;
pub use events::EventsConfig;
pub use http::HttpConfig;
pub use logging::LoggingConfig;
pub use policy::{Priority, Propagation};
pub use queue::QueueConfig;
pub use services::{Integration, ServicesConfig};
