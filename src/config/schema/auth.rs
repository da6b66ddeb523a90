//! Authentication settings

use crate::config::resolver::Resolver;
use crate::config::secret::{secret_string, serialize_redacted, SecretString};
use crate::config::source::{OverrideSource, Overrides};
use serde::Serialize;

/// Authentication configuration
#[derive(Debug, Clone, Serialize)]
pub struct AuthConfig {
    /// Authentication type ('jwt', 'oauth2', ...)
    #[serde(rename = "type")]
    pub kind: String,

    /// Token signing settings
    pub token: SigningSettings,

    /// Session signing settings
    pub session: SigningSettings,

    /// Blacklisted subjects
    pub blacklist: Vec<String>,

    /// Login attempt limiting
    pub rate_limiting: LoginRateLimit,
}

/// Secret plus expiration used for tokens and sessions
#[derive(Debug, Clone, Serialize)]
pub struct SigningSettings {
    #[serde(serialize_with = "serialize_redacted")]
    pub secret: SecretString,

    /// Expiration in shorthand form ('1h', '24h', ...), passed through as-is
    pub expiration: String,
}

/// Login attempt limiting
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginRateLimit {
    /// Window length in milliseconds
    pub window_ms: u64,
    pub max_attempts: u32,
}

impl AuthConfig {
    /// Assembles the authentication configuration from `source`
    pub fn assemble(source: &dyn OverrideSource) -> Self {
        let r = Resolver::new(source, "auth");

        Self {
            kind: r.setting("AUTH_TYPE", default_auth_type()),
            token: SigningSettings {
                secret: r.setting_with("AUTH_TOKEN_SECRET", || {
                    secret_string("nexaframe-secret")
                }),
                expiration: r.setting("AUTH_TOKEN_EXPIRATION", "1h".to_string()),
            },
            session: SigningSettings {
                secret: r.setting_with("AUTH_SESSION_SECRET", || {
                    secret_string("nexaframe-session-secret")
                }),
                expiration: r.setting("AUTH_SESSION_EXPIRATION", "24h".to_string()),
            },
            blacklist: r.setting("AUTH_BLACKLIST", Vec::new()),
            rate_limiting: LoginRateLimit {
                window_ms: r.setting("AUTH_RATE_LIMIT_WINDOW", default_rate_limit_window_ms()),
                max_attempts: r.setting("AUTH_RATE_LIMIT_MAX_ATTEMPTS", 5),
            },
        }
    }

    /// Whether `subject` is blacklisted
    pub fn is_blacklisted(&self, subject: &str) -> bool {
        self.blacklist.iter().any(|entry| entry == subject)
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self::assemble(&Overrides::new())
    }
}

fn default_auth_type() -> String {
    "jwt".to_string()
}

fn default_rate_limit_window_ms() -> u64 {
    15 * 60 * 1000
}
