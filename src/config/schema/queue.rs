//! Job queue settings

use super::policy::Priority;
use crate::config::derived::QUEUE_PORTS;
use crate::config::resolver::Resolver;
use crate::config::secret::{secret_string, serialize_redacted, SecretString};
use crate::config::source::{OverrideSource, Overrides};
use serde::Serialize;

/// Job queue configuration
#[derive(Debug, Clone, Serialize)]
pub struct QueueConfig {
    /// Run jobs in the background
    pub background_processing: bool,

    /// Queue system type ('rabbitmq', 'kafka', ...)
    #[serde(rename = "type")]
    pub kind: String,

    /// Broker connection
    pub connection: QueueConnection,

    /// Priorities, attempts and timeouts
    pub settings: JobSettings,
}

/// Broker connection settings
#[derive(Debug, Clone, Serialize)]
pub struct QueueConnection {
    pub host: String,

    /// Defaults to the canonical port of the queue type
    pub port: u16,

    pub username: String,

    #[serde(serialize_with = "serialize_redacted")]
    pub password: SecretString,

    pub vhost: String,
}

/// Job defaults
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobSettings {
    pub default_priority: Priority,
    pub max_attempts: u32,
    /// Job timeout in milliseconds
    pub job_timeout_ms: u64,
}

impl QueueConfig {
    /// Assembles the queue configuration from `source`
    pub fn assemble(source: &dyn OverrideSource) -> Self {
        let r = Resolver::new(source, "queue");

        let background_processing = r.setting("BACKGROUND_PROCESSING_ENABLED", true);
        let kind: String = r.setting("QUEUE_TYPE", "rabbitmq".to_string());

        let connection = QueueConnection {
            host: r.setting("QUEUE_HOST", "localhost".to_string()),
            port: r.setting_with("QUEUE_PORT", || QUEUE_PORTS.port_for(&kind)),
            username: r.setting("QUEUE_USERNAME", "guest".to_string()),
            password: r.setting_with("QUEUE_PASSWORD", || secret_string("guest")),
            vhost: r.setting("QUEUE_VHOST", "/".to_string()),
        };

        Self {
            background_processing,
            kind,
            connection,
            settings: JobSettings {
                default_priority: r.setting("QUEUE_DEFAULT_PRIORITY", Priority::Normal),
                max_attempts: r.setting("QUEUE_MAX_ATTEMPTS", 3),
                job_timeout_ms: r.setting("QUEUE_JOB_TIMEOUT", 60_000),
            },
        }
    }
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self::assemble(&Overrides::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_queue_defaults() {
        let config = QueueConfig::default();

        assert!(config.background_processing);
        assert_eq!(config.kind, "rabbitmq");
        assert_eq!(config.connection.host, "localhost");
        assert_eq!(config.connection.port, 5672);
        assert_eq!(config.connection.username, "guest");
        assert_eq!(config.connection.password.expose_secret(), "guest");
        assert_eq!(config.connection.vhost, "/");
        assert_eq!(config.settings.default_priority, Priority::Normal);
        assert_eq!(config.settings.max_attempts, 3);
        assert_eq!(config.settings.job_timeout_ms, 60_000);
    }

    #[test]
    fn test_port_follows_type() {
        let overrides = Overrides::new().with("QUEUE_TYPE", "kafka");
        assert_eq!(QueueConfig::assemble(&overrides).connection.port, 9092);

        let overrides = Overrides::new().with("QUEUE_TYPE", "sqs");
        assert_eq!(QueueConfig::assemble(&overrides).connection.port, 5672);
    }

    #[test]
    fn test_background_processing_can_be_disabled() {
        let overrides = Overrides::new().with("BACKGROUND_PROCESSING_ENABLED", "false");
        assert!(!QueueConfig::assemble(&overrides).background_processing);
    }

    #[test]
    fn test_job_setting_overrides() {
        let overrides = Overrides::new()
            .with("QUEUE_DEFAULT_PRIORITY", "low")
            .with("QUEUE_MAX_ATTEMPTS", "5")
            .with("QUEUE_JOB_TIMEOUT", "2m");

        let settings = QueueConfig::assemble(&overrides).settings;

        assert_eq!(settings.default_priority, Priority::Low);
        assert_eq!(settings.max_attempts, 5);
        assert_eq!(settings.job_timeout_ms, 60_000);
    }
}
