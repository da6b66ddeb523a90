//! Derived defaults
//!
//! Defaults that are computed from other values already resolved in the same
//! domain rather than being fixed constants.

use serde::Serialize;

/// Canonical ports keyed by system type
///
/// The first entry is the primary system. Lookups are total: a type that is
/// not in the table resolves to the primary system's port.
///
/// Type names match ignoring ASCII case, so `MongoDB` resolves like `mongodb`
/// instead of falling back to the primary port as an exact match would.
#[derive(Debug, Clone, Copy)]
pub struct PortTable {
    domain: &'static str,
    entries: &'static [(&'static str, u16)],
}

impl PortTable {
    /// Creates a table; `entries` must not be empty
    pub const fn new(domain: &'static str, entries: &'static [(&'static str, u16)]) -> Self {
        assert!(!entries.is_empty(), "port table needs a primary entry");
        Self { domain, entries }
    }

    /// The primary system type and its port
    pub fn primary(&self) -> (&'static str, u16) {
        self.entries[0]
    }

    /// Known system types, primary first
    pub fn kinds(&self) -> impl Iterator<Item = &'static str> {
        self.entries.iter().map(|(kind, _)| *kind)
    }

    /// Port for `kind`, matched ASCII case-insensitively
    pub fn port_for(&self, kind: &str) -> u16 {
        if let Some((_, port)) = self
            .entries
            .iter()
            .find(|(known, _)| known.eq_ignore_ascii_case(kind))
        {
            return *port;
        }

        let (primary, port) = self.primary();
        tracing::debug!(
            domain = self.domain,
            kind,
            fallback = primary,
            port,
            "Unknown system type, using primary port"
        );
        port
    }
}

/// Database ports; mysql is primary
pub const DATABASE_PORTS: PortTable = PortTable::new(
    "database",
    &[("mysql", 3306), ("postgresql", 5432), ("mongodb", 27017)],
);

/// Cache ports; redis is primary
pub const CACHE_PORTS: PortTable = PortTable::new("cache", &[("redis", 6379), ("memcached", 11211)]);

/// Queue ports; rabbitmq is primary
pub const QUEUE_PORTS: PortTable = PortTable::new("queue", &[("rabbitmq", 5672), ("kafka", 9092)]);

/// Default step between reconnect attempts in milliseconds
pub const DEFAULT_BACKOFF_STEP_MS: u64 = 50;

/// Default reconnect delay cap in milliseconds
pub const DEFAULT_BACKOFF_MAX_DELAY_MS: u64 = 2000;

/// Linear, capped reconnect backoff
///
/// `delay_ms(n) = min(n * step_ms, max_delay_ms)`, non-decreasing in `n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BackoffPolicy {
    /// Delay added per attempt in milliseconds
    pub step_ms: u64,

    /// Upper bound on the delay in milliseconds
    pub max_delay_ms: u64,
}

impl BackoffPolicy {
    /// Delay before reconnect attempt `attempt`, in milliseconds
    pub fn delay_ms(&self, attempt: u32) -> u64 {
        u64::from(attempt)
            .saturating_mul(self.step_ms)
            .min(self.max_delay_ms)
    }

    /// Delay before reconnect attempt `attempt`
    pub fn delay(&self, attempt: u32) -> std::time::Duration {
        std::time::Duration::from_millis(self.delay_ms(attempt))
    }
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        Self {
            step_ms: DEFAULT_BACKOFF_STEP_MS,
            max_delay_ms: DEFAULT_BACKOFF_MAX_DELAY_MS,
        }
    }
}
