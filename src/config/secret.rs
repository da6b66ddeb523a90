//! Credential wrapping using the secrecy crate
//!
//! Passwords, API keys and signing secrets resolved from overrides are held as
//! [`SecretString`]. The value is zeroed on drop, `Debug` output is redacted,
//! and the raw string is only reachable through `expose_secret()`.
//!
//! Secrets are deliberately not `SerializableSecret`. Settings structs use
//! [`serialize_redacted`] / [`serialize_redacted_opt`] so that configuration
//! snapshots never contain the raw value.
//!
//! # Example
//!
//! ```rust
//! use nexaframe_config::config::secret_string;
//! use secrecy::ExposeSecret;
//!
//! let password = secret_string("guest");
//! assert_eq!(password.expose_secret(), "guest");
//! assert!(!format!("{password:?}").contains("guest"));
//! ```

use secrecy::{CloneableSecret, DebugSecret, Secret};
use serde::Serializer;
use zeroize::Zeroize;

/// Placeholder written in place of secret values
pub const REDACTED: &str = "[REDACTED]";

/// Newtype wrapper for String that implements the required traits for Secret
#[derive(Clone, Debug, Zeroize)]
#[zeroize(drop)]
pub struct SecretValue(String);

impl CloneableSecret for SecretValue {}
impl DebugSecret for SecretValue {}

impl From<String> for SecretValue {
    fn from(s: String) -> Self {
        SecretValue(s)
    }
}

impl PartialEq<str> for SecretValue {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl AsRef<str> for SecretValue {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl SecretValue {
    /// Check if the secret value is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Type alias for a secret string
pub type SecretString = Secret<SecretValue>;

/// Wraps a string as a [`SecretString`]
#[inline]
pub fn secret_string(value: impl Into<String>) -> SecretString {
    Secret::new(SecretValue::from(value.into()))
}

/// Serializes a secret as [`REDACTED`]
pub fn serialize_redacted<S>(_secret: &SecretString, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(REDACTED)
}

/// Serializes a present secret as [`REDACTED`] and an absent one as `null`
pub fn serialize_redacted_opt<S>(
    secret: &Option<SecretString>,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match secret {
        Some(_) => serializer.serialize_str(REDACTED),
        None => serializer.serialize_none(),
    }
}

/// Whether an override key names a credential
///
/// Used to keep rejected override values out of the logs.
pub(crate) fn is_sensitive_key(key: &str) -> bool {
    ["PASSWORD", "SECRET", "API_KEY", "TOKEN"]
        .iter()
        .any(|marker| key.contains(marker))
}
