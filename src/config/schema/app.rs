//! Application core settings

use crate::config::resolver::Resolver;
use crate::config::source::{OverrideSource, Overrides};
use serde::Serialize;

/// Application core configuration
///
/// Unlike the other domains, a few fields can be changed after assembly
/// through `&mut self` setters. Once the config is shared (for example behind
/// the registry's `Arc`) it is read-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppConfig {
    /// Environment name ('dev', 'prod', 'staging', ...)
    pub environment: String,

    /// Timezone (e.g., 'UTC', 'America/New_York')
    pub timezone: String,

    /// Locale (e.g., 'en', 'es')
    pub locale: String,

    /// Response optimizations
    pub optimization: OptimizationSettings,

    /// CORS and rate limiting
    pub security: SecuritySettings,

    /// Session cookie settings
    pub session: SessionSettings,

    /// Request logging
    pub logging: RequestLoggingSettings,

    /// Static assets
    pub assets: AssetSettings,

    /// API routing
    pub api: ApiSettings,
}

/// Response optimizations
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptimizationSettings {
    pub compression: bool,
    pub minification: bool,
    pub lazy_loading: bool,
}

/// Security settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SecuritySettings {
    pub cors: CorsSettings,
    pub rate_limit: RateLimitSettings,
}

/// Application-level CORS settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CorsSettings {
    pub enabled: bool,
    pub origins: Vec<String>,
}

/// Application-level rate limiting
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RateLimitSettings {
    pub enabled: bool,
    pub max_requests: u32,
    /// Window length in milliseconds
    pub window_ms: u64,
}

/// Session and cookie settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSettings {
    pub cookie_name: String,
    /// Session lifetime in milliseconds
    pub expiration_ms: u64,
    /// Send the cookie over HTTPS only
    pub secure: bool,
}

/// Request logging settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequestLoggingSettings {
    pub level: String,
    pub format: String,
}

/// Static asset settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssetSettings {
    pub path: String,
    pub cache_control: String,
}

/// API routing settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiSettings {
    pub prefix: String,
    pub version: String,
}

impl AppConfig {
    /// Assembles the application configuration from `source`
    pub fn assemble(source: &dyn OverrideSource) -> Self {
        let r = Resolver::new(source, "app");

        Self {
            environment: r.setting("APP_ENV", default_environment()),
            timezone: r.setting("APP_TIMEZONE", default_timezone()),
            locale: r.setting("APP_LOCALE", default_locale()),
            optimization: OptimizationSettings {
                compression: r.setting("APP_COMPRESSION_ENABLED", true),
                minification: r.setting("APP_MINIFICATION_ENABLED", true),
                lazy_loading: r.setting("APP_LAZY_LOADING_ENABLED", true),
            },
            security: SecuritySettings {
                cors: CorsSettings {
                    enabled: r.setting("CORS_ENABLED", true),
                    origins: r.setting("CORS_ORIGINS", default_cors_origins()),
                },
                rate_limit: RateLimitSettings {
                    enabled: r.setting("RATE_LIMIT_ENABLED", true),
                    max_requests: r.setting("RATE_LIMIT_MAX", default_rate_limit_max()),
                    window_ms: r.setting("RATE_LIMIT_WINDOW", default_rate_limit_window_ms()),
                },
            },
            session: SessionSettings {
                cookie_name: r.setting("SESSION_COOKIE_NAME", default_cookie_name()),
                expiration_ms: r.setting("SESSION_EXPIRATION", default_session_expiration_ms()),
                secure: r.setting("SESSION_SECURE", false),
            },
            logging: RequestLoggingSettings {
                level: r.setting("LOGGING_LEVEL", default_log_level()),
                format: r.setting("LOGGING_FORMAT", default_log_format()),
            },
            assets: AssetSettings {
                path: r.setting("ASSETS_PATH", default_assets_path()),
                cache_control: r.setting("ASSETS_CACHE_CONTROL", default_cache_control()),
            },
            api: ApiSettings {
                prefix: r.setting("API_PREFIX", default_api_prefix()),
                version: r.setting("API_VERSION", default_api_version()),
            },
        }
    }

    /// Current environment name
    pub fn environment(&self) -> &str {
        &self.environment
    }

    /// Sets the environment name
    pub fn set_environment(&mut self, environment: impl Into<String>) {
        self.environment = environment.into();
    }

    /// Current timezone
    pub fn timezone(&self) -> &str {
        &self.timezone
    }

    /// Sets the timezone
    pub fn set_timezone(&mut self, timezone: impl Into<String>) {
        self.timezone = timezone.into();
    }

    /// Current locale
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Sets the locale
    pub fn set_locale(&mut self, locale: impl Into<String>) {
        self.locale = locale.into();
    }

    /// Enables or disables response compression
    pub fn toggle_compression(&mut self, enabled: bool) {
        self.optimization.compression = enabled;
    }

    /// Enables or disables asset minification
    pub fn toggle_minification(&mut self, enabled: bool) {
        self.optimization.minification = enabled;
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::assemble(&Overrides::new())
    }
}

// Default value functions
fn default_environment() -> String {
    "dev".to_string()
}

fn default_timezone() -> String {
    "UTC".to_string()
}

fn default_locale() -> String {
    "en".to_string()
}

fn default_cors_origins() -> Vec<String> {
    vec!["*".to_string()]
}

fn default_rate_limit_max() -> u32 {
    1000
}

fn default_rate_limit_window_ms() -> u64 {
    15 * 60 * 1000
}

fn default_cookie_name() -> String {
    "nexaframe_session".to_string()
}

fn default_session_expiration_ms() -> u64 {
    24 * 60 * 60 * 1000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "combined".to_string()
}

fn default_assets_path() -> String {
    "/public".to_string()
}

fn default_cache_control() -> String {
    "public, max-age=31536000".to_string()
}

fn default_api_prefix() -> String {
    "/api".to_string()
}

fn default_api_version() -> String {
    "v1".to_string()
}
