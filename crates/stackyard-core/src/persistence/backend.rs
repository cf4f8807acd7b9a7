//! Persistence backends for the registry state.

use super::atomic::{atomic_read_json, atomic_write_json, remove_json};
use crate::config::RegistryConfig;
use crate::registry::RegistryState;
use crate::Result;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Storage for the registry's own record.
///
/// The registry loads once when it is opened and saves after every
/// committed mutation. Errors are returned to the registry caller unchanged.
pub trait PersistenceBackend: Send + Sync {
    /// Load the persisted state, or `None` if nothing has been saved yet.
    fn load(&self) -> Result<Option<RegistryState>>;

    /// Replace the persisted state.
    fn save(&self, state: &RegistryState) -> Result<()>;

    /// Remove the persisted record entirely.
    fn destroy(&self) -> Result<()>;
}

/// Stores the registry as a pretty-printed JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileBackend {
    path: PathBuf,
    keep_backup: bool,
}

impl JsonFileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            keep_backup: RegistryConfig::KEEP_BACKUP,
        }
    }

    /// Keep a `.bak` copy of the previous file on each save.
    ///
    /// Default: `true`
    pub fn keep_backup(mut self, enable: bool) -> Self {
        self.keep_backup = enable;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PersistenceBackend for JsonFileBackend {
    fn load(&self) -> Result<Option<RegistryState>> {
        let state = atomic_read_json::<RegistryState>(&self.path)?;
        match &state {
            Some(_) => debug!("Loaded registry from {}", self.path.display()),
            None => debug!("No registry file at {}", self.path.display()),
        }
        Ok(state)
    }

    fn save(&self, state: &RegistryState) -> Result<()> {
        atomic_write_json(&self.path, state, self.keep_backup)
    }

    fn destroy(&self) -> Result<()> {
        if remove_json(&self.path, true)? {
            info!("Removed registry file {}", self.path.display());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::atomic::backup_path_for;
    use crate::provider::{Provider, ProviderType};
    use tempfile::TempDir;

    fn sample_state() -> RegistryState {
        let mut state = RegistryState::default();
        state.providers.insert(
            "local_stack".into(),
            Provider::new(ProviderType::Local, "local_artifacts", "local_metadata"),
        );
        state
    }

    #[test]
    fn test_load_missing_file_is_none() {
        let temp_dir = TempDir::new().unwrap();
        let backend = JsonFileBackend::new(temp_dir.path().join("localservice.json"));
        assert!(backend.load().unwrap().is_none());
    }

    #[test]
    fn test_save_then_load() {
        let temp_dir = TempDir::new().unwrap();
        let backend = JsonFileBackend::new(temp_dir.path().join("localservice.json"));

        backend.save(&sample_state()).unwrap();
        assert_eq!(backend.load().unwrap(), Some(sample_state()));
    }

    #[test]
    fn test_destroy_removes_file_and_backup() {
        let temp_dir = TempDir::new().unwrap();
        let backend = JsonFileBackend::new(temp_dir.path().join("localservice.json"));

        backend.save(&RegistryState::default()).unwrap();
        backend.save(&sample_state()).unwrap();
        assert!(backup_path_for(backend.path()).exists());

        backend.destroy().unwrap();
        assert!(!backend.path().exists());
        assert!(!backup_path_for(backend.path()).exists());
        assert!(backend.load().unwrap().is_none());
    }

    #[test]
    fn test_backup_can_be_disabled() {
        let temp_dir = TempDir::new().unwrap();
        let backend =
            JsonFileBackend::new(temp_dir.path().join("localservice.json")).keep_backup(false);

        backend.save(&RegistryState::default()).unwrap();
        backend.save(&sample_state()).unwrap();
        assert!(!backup_path_for(backend.path()).exists());
    }
}
