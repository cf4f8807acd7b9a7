//! Centralized configuration for the stackyard registry.
//!
//! File names, directory names and environment variables used to locate
//! persisted state, plus the `ComponentKind` enum naming each registry mapping.

use serde::{Deserialize, Serialize};

/// Registry-level configuration.
pub struct RegistryConfig;

impl RegistryConfig {
    pub const APP_CONFIG_DIR_NAME: &'static str = "stackyard";
    /// Environment variable that overrides the platform config directory.
    pub const CONFIG_DIR_ENV: &'static str = "STACKYARD_CONFIG_DIR";
    pub const REGISTRY_FILE_NAME: &'static str = "localservice.json";
    pub const ARTIFACT_STORE_DIR_NAME: &'static str = "artifact_stores";
    pub const METADATA_STORE_DIR_NAME: &'static str = "metadata_stores";
    /// Keep a `.bak` copy of the previous registry file on every write.
    pub const KEEP_BACKUP: bool = true;
}

/// The kinds of component the registry keeps a mapping for.
///
/// `Orchestrator` is reserved: no mapping exists for it yet and it is never
/// populated or cascaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentKind {
    Provider,
    ArtifactStore,
    MetadataStore,
    Orchestrator,
}

impl ComponentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentKind::Provider => "provider",
            ComponentKind::ArtifactStore => "artifact_store",
            ComponentKind::MetadataStore => "metadata_store",
            ComponentKind::Orchestrator => "orchestrator",
        }
    }

    /// Human readable name used in errors and log records.
    pub fn display_name(&self) -> &'static str {
        match self {
            ComponentKind::Provider => "Provider",
            ComponentKind::ArtifactStore => "Artifact store",
            ComponentKind::MetadataStore => "Metadata store",
            ComponentKind::Orchestrator => "Orchestrator",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "provider" => Some(ComponentKind::Provider),
            "artifact_store" => Some(ComponentKind::ArtifactStore),
            "metadata_store" => Some(ComponentKind::MetadataStore),
            "orchestrator" => Some(ComponentKind::Orchestrator),
            _ => None,
        }
    }
}

impl std::fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_kind_roundtrip() {
        for kind in [
            ComponentKind::Provider,
            ComponentKind::ArtifactStore,
            ComponentKind::MetadataStore,
            ComponentKind::Orchestrator,
        ] {
            let parsed = ComponentKind::from_str(kind.as_str()).expect("Should parse");
            assert_eq!(kind, parsed);
        }
        assert_eq!(
            ComponentKind::from_str("Artifact-Store"),
            Some(ComponentKind::ArtifactStore)
        );
        assert_eq!(ComponentKind::from_str("stack"), None);
    }
}
