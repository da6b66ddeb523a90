//! Event dispatch settings
//!
//! The event-to-listener table is fixed at build time. Only the dispatch
//! policies are overridable.

use super::policy::{Priority, Propagation};
use crate::config::resolver::Resolver;
use crate::config::source::{OverrideSource, Overrides};
use serde::Serialize;
use std::collections::BTreeMap;

/// Listener names per event, in invocation order
const LISTENERS: &[(&str, &[&str])] = &[
    ("userRegistered", &["sendWelcomeEmail", "updateStats"]),
    ("orderPlaced", &["processOrder", "sendOrderEmail"]),
];

/// Event dispatch configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventsConfig {
    events: BTreeMap<String, Vec<String>>,

    /// Propagation and priority policies
    pub policies: EventPolicies,
}

/// Propagation and priority policies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EventPolicies {
    pub propagation: Propagation,
    pub default_priority: Priority,
}

impl EventsConfig {
    /// Assembles the event configuration from `source`
    pub fn assemble(source: &dyn OverrideSource) -> Self {
        let r = Resolver::new(source, "events");

        let events = LISTENERS
            .iter()
            .map(|(event, listeners)| {
                (
                    (*event).to_string(),
                    listeners.iter().map(|l| (*l).to_string()).collect(),
                )
            })
            .collect();

        Self {
            events,
            policies: EventPolicies {
                propagation: r.setting("EVENT_PROPAGATION", Propagation::Sync),
                default_priority: r.setting("EVENT_DEFAULT_PRIORITY", Priority::Normal),
            },
        }
    }

    /// Listeners registered for `event`, empty for unknown events
    pub fn listeners_for(&self, event: &str) -> &[String] {
        self.events.get(event).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Names of all events with registered listeners
    pub fn events(&self) -> impl Iterator<Item = &str> {
        self.events.keys().map(String::as_str)
    }
}

impl Default for EventsConfig {
    fn default() -> Self {
        Self::assemble(&Overrides::new())
    }
}
