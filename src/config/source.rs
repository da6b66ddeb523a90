//! Override sources
//!
//! An override source is a read-only view of string key/value pairs. The
//! process environment is the production source; tests and embedders build an
//! [`Overrides`] map directly.

use std::collections::HashMap;

/// Read access to raw override strings
pub trait OverrideSource {
    /// Returns the raw override for `key`, if one is present
    fn lookup(&self, key: &str) -> Option<&str>;
}

/// In-memory override map
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    values: HashMap<String, String>,
}

impl Overrides {
    /// Creates an empty override map
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshots the process environment
    ///
    /// Variables whose name or value is not valid UTF-8 are skipped.
    pub fn from_env() -> Self {
        let values: HashMap<String, String> = std::env::vars_os()
            .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
            .collect();

        tracing::debug!(count = values.len(), "Captured environment overrides");
        Self { values }
    }

    /// Adds or replaces an override, builder style
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Adds or replaces an override
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// Number of overrides held
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the map holds no overrides
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl OverrideSource for Overrides {
    fn lookup(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

impl OverrideSource for HashMap<String, String> {
    fn lookup(&self, key: &str) -> Option<&str> {
        self.get(key).map(String::as_str)
    }
}

impl<K, V> FromIterator<(K, V)> for Overrides
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_lookup() {
        let overrides = Overrides::new().with("DB_HOST", "db.internal");
        assert_eq!(overrides.lookup("DB_HOST"), Some("db.internal"));
        assert_eq!(overrides.lookup("DB_PORT"), None);
    }

    #[test]
    fn test_overrides_from_iter() {
        let overrides: Overrides = [("A", "1"), ("B", "2")].into_iter().collect();
        assert_eq!(overrides.len(), 2);
        assert_eq!(overrides.lookup("B"), Some("2"));
    }

    #[test]
    fn test_set_replaces_value() {
        let mut overrides = Overrides::new();
        overrides.set("HTTP_PORT", "8080");
        overrides.set("HTTP_PORT", "9090");
        assert_eq!(overrides.lookup("HTTP_PORT"), Some("9090"));
    }

    #[test]
    fn test_hashmap_source() {
        let mut map = HashMap::new();
        map.insert("QUEUE_TYPE".to_string(), "kafka".to_string());
        assert_eq!(map.lookup("QUEUE_TYPE"), Some("kafka"));
    }
}
