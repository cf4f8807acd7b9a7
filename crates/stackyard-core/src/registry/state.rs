//! The persisted shape of the registry.

use crate::component::ComponentReference;
use crate::provider::Provider;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The three registry mappings, as written to the registry file.
///
/// Each mapping is its own key namespace. Only `ComponentRegistry` mutates a
/// state it owns; callers get read-only views.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryState {
    #[serde(default)]
    pub(crate) providers: BTreeMap<String, Provider>,
    #[serde(default)]
    pub(crate) artifact_store_map: BTreeMap<String, ComponentReference>,
    #[serde(default)]
    pub(crate) metadata_store_map: BTreeMap<String, ComponentReference>,
}

impl RegistryState {
    pub fn providers(&self) -> &BTreeMap<String, Provider> {
        &self.providers
    }

    pub fn artifact_store_map(&self) -> &BTreeMap<String, ComponentReference> {
        &self.artifact_store_map
    }

    pub fn metadata_store_map(&self) -> &BTreeMap<String, ComponentReference> {
        &self.metadata_store_map
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
            && self.artifact_store_map.is_empty()
            && self.metadata_store_map.is_empty()
    }
}
