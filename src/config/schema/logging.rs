//! Logging settings
//!
//! Consumed by [`crate::logging::init_logging`].

use crate::config::resolver::Resolver;
use crate::config::source::{OverrideSource, Overrides};
use serde::Serialize;

/// Console destination name
pub const DESTINATION_CONSOLE: &str = "console";

/// File destination name
pub const DESTINATION_FILE: &str = "file";

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Where logs go ('console', 'file')
    pub destinations: Vec<String>,

    /// Output format ('combined', 'json', ...)
    pub format: String,

    /// Directory for the file destination
    pub directory: String,

    /// File rotation
    pub rotation: RotationSettings,
}

/// File rotation settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RotationSettings {
    pub enabled: bool,

    /// Rotation interval ('1h', '1d', ...)
    pub interval: String,

    /// Number of rotated files to keep
    pub max_files: usize,
}

impl LoggingConfig {
    /// Assembles the logging configuration from `source`
    pub fn assemble(source: &dyn OverrideSource) -> Self {
        let r = Resolver::new(source, "logging");

        Self {
            level: r.setting("LOG_LEVEL", "info".to_string()),
            destinations: r.setting("LOG_DESTINATIONS", default_destinations()),
            format: r.setting("LOG_FORMAT", "combined".to_string()),
            directory: r.setting("LOG_DIRECTORY", "./logs".to_string()),
            rotation: RotationSettings {
                enabled: r.setting("LOG_ROTATION_ENABLED", true),
                interval: r.setting("LOG_ROTATION_INTERVAL", "1d".to_string()),
                max_files: r.setting("LOG_ROTATION_MAX_FILES", 14),
            },
        }
    }

    /// Whether `destination` is enabled, case-insensitively
    pub fn has_destination(&self, destination: &str) -> bool {
        self.destinations
            .iter()
            .any(|d| d.eq_ignore_ascii_case(destination))
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self::assemble(&Overrides::new())
    }
}

fn default_destinations() -> Vec<String> {
    vec![DESTINATION_CONSOLE.to_string(), DESTINATION_FILE.to_string()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logging_defaults() {
        let config = LoggingConfig::default();

        assert_eq!(config.level, "info");
        assert_eq!(config.destinations, vec!["console", "file"]);
        assert_eq!(config.format, "combined");
        assert_eq!(config.directory, "./logs");
        assert!(config.rotation.enabled);
        assert_eq!(config.rotation.interval, "1d");
        assert_eq!(config.rotation.max_files, 14);
    }

    #[test]
    fn test_logging_overrides() {
        let overrides = Overrides::new()
            .with("LOG_LEVEL", "debug")
            .with("LOG_DESTINATIONS", "console")
            .with("LOG_ROTATION_ENABLED", "false")
            .with("LOG_ROTATION_MAX_FILES", "fourteen");

        let config = LoggingConfig::assemble(&overrides);

        assert_eq!(config.level, "debug");
        assert!(config.has_destination("console"));
        assert!(!config.has_destination("file"));
        assert!(!config.rotation.enabled);
        assert_eq!(config.rotation.max_files, 14);
    }

    #[test]
    fn test_has_destination_is_case_insensitive() {
        let overrides = Overrides::new().with("LOG_DESTINATIONS", "Console,FILE");
        let config = LoggingConfig::assemble(&overrides);

        assert!(config.has_destination(DESTINATION_CONSOLE));
        assert!(config.has_destination(DESTINATION_FILE));
    }
}
