//! File persistence for the registry and its components.
//!
//! This module provides:
//! - Atomic JSON file operations
//! - The `PersistenceBackend` seam the registry saves through
//! - Helpers for per-component state files

mod atomic;
mod backend;
mod component_state;

pub use atomic::{atomic_read_json, atomic_write_json, backup_path_for, remove_json};
pub use backend::{JsonFileBackend, PersistenceBackend};
pub use component_state::{
    component_state_path, read_component_state, remove_component_state, write_component_state,
};
