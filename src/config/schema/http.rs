//! HTTP server settings

use crate::config::resolver::Resolver;
use crate::config::source::{OverrideSource, Overrides};
use serde::Serialize;

/// HTTP server configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HttpConfig {
    /// Listener settings
    pub server: ServerSettings,

    /// Default middlewares in execution order
    pub middlewares: Vec<String>,

    /// Transport optimizations
    pub optimizations: HttpOptimizations,

    /// SSL/TLS
    pub ssl: SslSettings,

    /// CORS
    pub cors: CorsSettings,

    /// Request rate limiting
    pub rate_limiting: RateLimitingSettings,
}

/// Listener settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServerSettings {
    pub port: u16,
    pub host: String,
    /// Keep-alive timeout in milliseconds
    pub keep_alive_timeout_ms: u64,
}

/// Transport optimizations
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HttpOptimizations {
    pub keep_alive: bool,
    pub compression: bool,
    /// Body size limit in shorthand form ('1mb', '512kb', ...)
    pub max_payload_size: String,
    pub http2_enabled: bool,
    pub spdy_enabled: bool,
}

/// SSL/TLS settings
///
/// Paths are left unset unless overridden.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SslSettings {
    pub enabled: bool,
    pub key_path: Option<String>,
    pub cert_path: Option<String>,
    pub ca_path: Option<String>,
    pub request_cert: bool,
    pub reject_unauthorized: bool,
}

/// CORS settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CorsSettings {
    pub enabled: bool,
    pub origins: Vec<String>,
    pub methods: Vec<String>,
    pub headers: Vec<String>,
}

/// Rate limiting settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RateLimitingSettings {
    pub enabled: bool,
    /// Window length in milliseconds
    pub window_ms: u64,
    pub max_requests: u32,
}

impl HttpConfig {
    /// Assembles the HTTP configuration from `source`
    pub fn assemble(source: &dyn OverrideSource) -> Self {
        let r = Resolver::new(source, "http");

        Self {
            server: ServerSettings {
                port: r.setting("HTTP_PORT", 3000),
                host: r.setting("HTTP_HOST", "0.0.0.0".to_string()),
                keep_alive_timeout_ms: r.setting("HTTP_KEEP_ALIVE_TIMEOUT", 5000),
            },
            middlewares: r.setting("DEFAULT_MIDDLEWARES", default_middlewares()),
            optimizations: HttpOptimizations {
                keep_alive: r.setting("HTTP_KEEP_ALIVE_ENABLED", true),
                compression: r.setting("HTTP_COMPRESSION_ENABLED", true),
                max_payload_size: r.setting("HTTP_MAX_PAYLOAD_SIZE", "1mb".to_string()),
                http2_enabled: r.setting("HTTP_HTTP2_ENABLED", false),
                spdy_enabled: r.setting("HTTP_SPDY_ENABLED", false),
            },
            ssl: SslSettings {
                enabled: r.setting("HTTP_SSL_ENABLED", false),
                key_path: r.setting("HTTP_SSL_KEY_PATH", None),
                cert_path: r.setting("HTTP_SSL_CERT_PATH", None),
                ca_path: r.setting("HTTP_SSL_CA_PATH", None),
                request_cert: r.setting("HTTP_SSL_REQUEST_CERT", false),
                reject_unauthorized: r.setting("HTTP_SSL_REJECT_UNAUTHORIZED", true),
            },
            cors: CorsSettings {
                enabled: r.setting("HTTP_CORS_ENABLED", true),
                origins: r.setting("HTTP_CORS_ORIGINS", vec!["*".to_string()]),
                methods: r.setting("HTTP_CORS_METHODS", default_cors_methods()),
                headers: r.setting("HTTP_CORS_HEADERS", default_cors_headers()),
            },
            rate_limiting: RateLimitingSettings {
                enabled: r.setting("HTTP_RATE_LIMITING_ENABLED", true),
                window_ms: r.setting("HTTP_RATE_LIMIT_WINDOW", 15 * 60 * 1000),
                max_requests: r.setting("HTTP_RATE_LIMIT_MAX", 100),
            },
        }
    }

    /// `host:port` the server should bind to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self::assemble(&Overrides::new())
    }
}

fn default_middlewares() -> Vec<String> {
    ["cors", "bodyParser", "rateLimiter"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_cors_methods() -> Vec<String> {
    ["GET", "POST", "PUT", "DELETE"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_cors_headers() -> Vec<String> {
    ["Content-Type", "Authorization"]
        .into_iter()
        .map(String::from)
        .collect()
}
