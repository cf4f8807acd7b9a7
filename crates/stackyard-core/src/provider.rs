//! Provider definitions.
//!
//! A provider names the artifact store, metadata store and (eventually)
//! orchestrator a pipeline runs against. Providers are small plain values, so
//! the registry keeps them inline instead of behind a component reference.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a provider's components run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProviderType {
    #[default]
    Local,
    Gcp,
}

impl ProviderType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderType::Local => "local",
            ProviderType::Gcp => "gcp",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "local" => Some(ProviderType::Local),
            "gcp" => Some(ProviderType::Gcp),
            _ => None,
        }
    }
}

impl fmt::Display for ProviderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A provider entry: keys of the components it is assembled from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provider {
    pub provider_type: ProviderType,
    pub artifact_store_name: String,
    pub metadata_store_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orchestrator_name: Option<String>,
}

impl Provider {
    pub fn new(
        provider_type: ProviderType,
        artifact_store_name: impl Into<String>,
        metadata_store_name: impl Into<String>,
    ) -> Self {
        Self {
            provider_type,
            artifact_store_name: artifact_store_name.into(),
            metadata_store_name: metadata_store_name.into(),
            orchestrator_name: None,
        }
    }

    pub fn with_orchestrator(mut self, orchestrator_name: impl Into<String>) -> Self {
        self.orchestrator_name = Some(orchestrator_name.into());
        self
    }
}
