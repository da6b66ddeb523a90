//! Third-party service integrations

use crate::config::resolver::Resolver;
use crate::config::secret::{serialize_redacted_opt, SecretString};
use crate::config::source::{OverrideSource, Overrides};
use serde::Serialize;
use std::collections::BTreeMap;

/// Known integrations and the override prefix of each
///
/// `<PREFIX>_API_KEY` and `<PREFIX>_ENDPOINT` are read for every entry.
const INTEGRATIONS: &[(&str, &str)] = &[("paymentService", "PAYMENT_SERVICE")];

/// Service integration configuration
#[derive(Debug, Clone, Serialize)]
pub struct ServicesConfig {
    integrations: BTreeMap<String, Integration>,
}

/// Credentials and endpoint for one integration
#[derive(Debug, Clone, Serialize)]
pub struct Integration {
    #[serde(serialize_with = "serialize_redacted_opt")]
    pub api_key: Option<SecretString>,
    pub endpoint: Option<String>,
}

impl Integration {
    /// Whether both the key and the endpoint are set
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some() && self.endpoint.is_some()
    }
}

impl ServicesConfig {
    /// Assembles the integration configuration from `source`
    pub fn assemble(source: &dyn OverrideSource) -> Self {
        let r = Resolver::new(source, "services");

        let integrations = INTEGRATIONS
            .iter()
            .map(|(name, prefix)| {
                let integration = Integration {
                    api_key: r.setting(&format!("{prefix}_API_KEY"), None),
                    endpoint: r.setting(&format!("{prefix}_ENDPOINT"), None),
                };
                ((*name).to_string(), integration)
            })
            .collect();

        Self { integrations }
    }

    /// Settings for `service`, or `None` if the service is not known
    pub fn integration(&self, service: &str) -> Option<&Integration> {
        let integration = self.integrations.get(service);
        if integration.is_none() {
            tracing::debug!(service, "No integration configured");
        }
        integration
    }

    /// Names of all known integrations
    pub fn services(&self) -> impl Iterator<Item = &str> {
        self.integrations.keys().map(String::as_str)
    }
}

impl Default for ServicesConfig {
    fn default() -> Self {
        Self::assemble(&Overrides::new())
    }
}
