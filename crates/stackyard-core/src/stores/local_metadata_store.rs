//! Metadata store backed by a local database file.

use crate::component::{Component, MetadataStore, SourceLocator};
use crate::persistence::{read_component_state, remove_component_state, write_component_state};
use crate::platform::RegistryPaths;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Metadata store addressed by a database URI.
///
/// Only the store's registration record is owned here; the database behind
/// `uri` belongs to whatever pipeline runtime writes to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalMetadataStore {
    uuid: Uuid,
    uri: String,
    #[serde(skip)]
    state_dir: PathBuf,
}

impl LocalMetadataStore {
    pub const SOURCE: &'static str = "stackyard::stores::LocalMetadataStore";

    pub fn new(paths: &RegistryPaths, uri: impl Into<String>) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            uri: uri.into(),
            state_dir: paths.metadata_stores_dir(),
        }
    }

    pub fn load(state_dir: &Path, uuid: Uuid) -> Result<Self> {
        let mut store: Self = read_component_state(state_dir, uuid)?;
        store.state_dir = state_dir.to_path_buf();
        Ok(store)
    }
}

impl Component for LocalMetadataStore {
    fn uuid(&self) -> Uuid {
        self.uuid
    }

    fn source(&self) -> SourceLocator {
        SourceLocator::new(Self::SOURCE)
    }

    fn details(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }

    fn update(&self) -> Result<()> {
        write_component_state(&self.state_dir, self.uuid, self)
    }

    fn delete(&self) -> Result<()> {
        remove_component_state(&self.state_dir, self.uuid)
    }
}

impl MetadataStore for LocalMetadataStore {
    fn uri(&self) -> &str {
        &self.uri
    }
}
