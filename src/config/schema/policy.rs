//! Closed-set policy values shared by the event and queue domains

use crate::config::resolver::FromOverride;
use crate::error::CoercionError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Event propagation mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Propagation {
    /// Listeners run inline with the dispatcher
    #[default]
    Sync,
    /// Listeners run detached from the dispatcher
    Async,
}

impl Propagation {
    /// Lowercase name as used in overrides
    pub fn as_str(&self) -> &'static str {
        match self {
            Propagation::Sync => "sync",
            Propagation::Async => "async",
        }
    }
}

impl FromStr for Propagation {
    type Err = CoercionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sync" => Ok(Propagation::Sync),
            "async" => Ok(Propagation::Async),
            _ => Err(CoercionError::new(s, "propagation (sync|async)")),
        }
    }
}

impl FromOverride for Propagation {
    fn from_override(raw: &str) -> Result<Self, CoercionError> {
        raw.parse()
    }
}

impl fmt::Display for Propagation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Dispatch or job priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Lowest priority
    Low,
    /// Default priority
    #[default]
    Normal,
    /// Highest priority
    High,
}

impl Priority {
    /// Lowercase name as used in overrides
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Normal => "normal",
            Priority::High => "high",
        }
    }
}

impl FromStr for Priority {
    type Err = CoercionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "normal" => Ok(Priority::Normal),
            "high" => Ok(Priority::High),
            _ => Err(CoercionError::new(s, "priority (high|normal|low)")),
        }
    }
}

impl FromOverride for Priority {
    fn from_override(raw: &str) -> Result<Self, CoercionError> {
        raw.parse()
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
