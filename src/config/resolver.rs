//! Setting resolution
//!
//! Every setting in every domain is resolved through this module:
//!
//! 1. Look the override key up in the [`OverrideSource`]
//! 2. Absent or empty override: use the default
//! 3. Otherwise coerce the string into the setting's type with [`FromOverride`]
//! 4. Coercion failure: log it and use the default
//!
//! Coercion is explicit per type. In particular a boolean only accepts
//! `true`/`false` (any case), so `"false"` never turns a flag on.

use super::secret::{is_sensitive_key, secret_string, SecretString, REDACTED};
use super::source::OverrideSource;
use crate::error::CoercionError;

/// Conversion from a raw override string into a typed setting
pub trait FromOverride: Sized {
    /// Parses a non-empty override string
    fn from_override(raw: &str) -> Result<Self, CoercionError>;
}

impl FromOverride for String {
    fn from_override(raw: &str) -> Result<Self, CoercionError> {
        Ok(raw.to_string())
    }
}

impl FromOverride for SecretString {
    fn from_override(raw: &str) -> Result<Self, CoercionError> {
        Ok(secret_string(raw))
    }
}

impl FromOverride for bool {
    fn from_override(raw: &str) -> Result<Self, CoercionError> {
        let value = raw.trim();
        if value.eq_ignore_ascii_case("true") {
            Ok(true)
        } else if value.eq_ignore_ascii_case("false") {
            Ok(false)
        } else {
            Err(CoercionError::new(raw, "bool"))
        }
    }
}

macro_rules! impl_from_override_for_int {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl FromOverride for $ty {
                fn from_override(raw: &str) -> Result<Self, CoercionError> {
                    raw.trim()
                        .parse::<$ty>()
                        .map_err(|_| CoercionError::new(raw, stringify!($ty)))
                }
            }
        )+
    };
}

impl_from_override_for_int!(u16, u32, u64, usize);

/// Comma-separated list; elements are trimmed and empty elements dropped
impl FromOverride for Vec<String> {
    fn from_override(raw: &str) -> Result<Self, CoercionError> {
        let items: Vec<String> = raw
            .split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect();

        if items.is_empty() {
            return Err(CoercionError::new(raw, "list"));
        }
        Ok(items)
    }
}

impl<T: FromOverride> FromOverride for Option<T> {
    fn from_override(raw: &str) -> Result<Self, CoercionError> {
        T::from_override(raw).map(Some)
    }
}

/// Coerces a raw override, or returns `None` when there is nothing to coerce
fn coerce<T: FromOverride>(raw: Option<&str>) -> Option<Result<T, CoercionError>> {
    raw.filter(|value| !value.is_empty()).map(T::from_override)
}

/// Returns the coerced override if present and valid, otherwise `default`
///
/// # Examples
///
/// ```
/// use nexaframe_config::config::resolve;
///
/// assert_eq!(resolve(Some("8080"), 3000u16), 8080);
/// assert_eq!(resolve(Some("not-a-port"), 3000u16), 3000);
/// assert_eq!(resolve(None, 3000u16), 3000);
/// assert!(!resolve(Some("FALSE"), true));
/// ```
pub fn resolve<T: FromOverride>(raw: Option<&str>, default: T) -> T {
    match coerce(raw) {
        Some(Ok(value)) => value,
        Some(Err(_)) | None => default,
    }
}

/// Resolves settings for one domain against an override source
///
/// Rejected overrides are logged at `warn` with the domain and key.
pub struct Resolver<'a> {
    source: &'a dyn OverrideSource,
    domain: &'static str,
}

impl<'a> Resolver<'a> {
    /// Creates a resolver for `domain`
    pub fn new(source: &'a dyn OverrideSource, domain: &'static str) -> Self {
        Self { source, domain }
    }

    /// Domain name used in log fields
    pub fn domain(&self) -> &'static str {
        self.domain
    }

    /// Whether a non-empty override exists for `key`
    pub fn is_set(&self, key: &str) -> bool {
        self.source.lookup(key).is_some_and(|value| !value.is_empty())
    }

    /// Resolves `key` with a fixed default
    pub fn setting<T: FromOverride>(&self, key: &str, default: T) -> T {
        self.setting_with(key, || default)
    }

    /// Resolves `key` with a lazily computed default
    ///
    /// The closure only runs when the override is absent or rejected, which
    /// lets derived defaults borrow sibling values that are already resolved.
    pub fn setting_with<T, F>(&self, key: &str, default: F) -> T
    where
        T: FromOverride,
        F: FnOnce() -> T,
    {
        match coerce(self.source.lookup(key)) {
            Some(Ok(value)) => {
                tracing::trace!(domain = self.domain, key, "Override applied");
                value
            }
            Some(Err(err)) => {
                let value = if is_sensitive_key(key) {
                    REDACTED
                } else {
                    err.value.as_str()
                };
                crate::log_override_rejected!(self.domain, key, value, err.target);
                default()
            }
            None => default(),
        }
    }
}

impl std::fmt::Debug for Resolver<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolver")
            .field("domain", &self.domain)
            .finish_non_exhaustive()
    }
}
