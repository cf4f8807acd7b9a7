//! Per-instance component state files.
//!
//! Every referenced component keeps its own state in `<dir>/<uuid>.json`.
//! The registry only records the uuid; these helpers are what a component's
//! `update()` and `delete()` and its factory use to reach that file.

use super::atomic::{atomic_read_json, atomic_write_json, remove_json};
use crate::{Result, StackyardError};
use serde::{de::DeserializeOwned, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;
use uuid::Uuid;

/// Location of a component's state file inside its kind directory.
pub fn component_state_path(dir: &Path, uuid: Uuid) -> PathBuf {
    dir.join(format!("{}.json", uuid))
}

/// Persist a component's state, replacing any previous version.
pub fn write_component_state<T: Serialize>(dir: &Path, uuid: Uuid, state: &T) -> Result<()> {
    atomic_write_json(&component_state_path(dir, uuid), state, false)
}

/// Load a component's state.
///
/// A missing file is an error here: the registry only asks for components it
/// holds a reference to.
pub fn read_component_state<T: DeserializeOwned>(dir: &Path, uuid: Uuid) -> Result<T> {
    let path = component_state_path(dir, uuid);
    atomic_read_json(&path)?.ok_or(StackyardError::ComponentStateMissing { uuid, path })
}

/// Remove a component's state file. Removing an absent file succeeds.
pub fn remove_component_state(dir: &Path, uuid: Uuid) -> Result<()> {
    let path = component_state_path(dir, uuid);
    if !remove_json(&path, false)? {
        debug!("No state file for component {} at {}", uuid, path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct State {
        path: String,
    }

    #[test]
    fn test_state_file_lifecycle() {
        let temp_dir = TempDir::new().unwrap();
        let uuid = Uuid::new_v4();
        let state = State {
            path: "/data/artifacts".into(),
        };

        write_component_state(temp_dir.path(), uuid, &state).unwrap();
        assert!(component_state_path(temp_dir.path(), uuid).exists());

        let loaded: State = read_component_state(temp_dir.path(), uuid).unwrap();
        assert_eq!(loaded, state);

        remove_component_state(temp_dir.path(), uuid).unwrap();
        let missing: Result<State> = read_component_state(temp_dir.path(), uuid);
        assert!(matches!(
            missing,
            Err(StackyardError::ComponentStateMissing { uuid: id, .. }) if id == uuid
        ));

        // second removal is a no-op
        remove_component_state(temp_dir.path(), uuid).unwrap();
    }
}
