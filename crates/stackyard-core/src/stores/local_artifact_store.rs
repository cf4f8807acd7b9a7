//! Artifact store backed by a local directory.

use crate::component::{ArtifactStore, Component, SourceLocator};
use crate::persistence::{read_component_state, remove_component_state, write_component_state};
use crate::platform::RegistryPaths;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Artifact store that writes artifacts below a local path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalArtifactStore {
    uuid: Uuid,
    path: String,
    #[serde(skip)]
    state_dir: PathBuf,
}

impl LocalArtifactStore {
    pub const SOURCE: &'static str = "stackyard::stores::LocalArtifactStore";

    /// Create a new store with a fresh uuid. Nothing is written until `update()`.
    pub fn new(paths: &RegistryPaths, path: impl Into<String>) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            path: path.into(),
            state_dir: paths.artifact_stores_dir(),
        }
    }

    /// Rebuild a store from its state file in `state_dir`.
    pub fn load(state_dir: &Path, uuid: Uuid) -> Result<Self> {
        let mut store: Self = read_component_state(state_dir, uuid)?;
        store.state_dir = state_dir.to_path_buf();
        Ok(store)
    }

    pub fn state_dir(&self) -> &Path {
        &self.state_dir
    }
}

impl Component for LocalArtifactStore {
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

impl ArtifactStore for LocalArtifactStore {
    fn path(&self) -> &str {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::component_state_path;
    use tempfile::TempDir;

    #[test]
    fn test_update_load_delete() {
        let temp_dir = TempDir::new().unwrap();
        let paths = RegistryPaths::new(temp_dir.path());
        let store = LocalArtifactStore::new(&paths, "/data/artifacts");

        store.update().unwrap();
        let state_file = component_state_path(&paths.artifact_stores_dir(), store.uuid());
        assert!(state_file.exists());

        let loaded = LocalArtifactStore::load(store.state_dir(), store.uuid()).unwrap();
        assert_eq!(loaded, store);

        store.delete().unwrap();
        assert!(!state_file.exists());
        assert!(LocalArtifactStore::load(store.state_dir(), store.uuid()).is_err());
    }

    #[test]
    fn test_details_omit_state_dir() {
        let temp_dir = TempDir::new().unwrap();
        let store = LocalArtifactStore::new(&RegistryPaths::new(temp_dir.path()), "/data");
        let details = store.details().unwrap();
        assert_eq!(details["path"], "/data");
        assert!(details.get("state_dir").is_none());
    }
}
