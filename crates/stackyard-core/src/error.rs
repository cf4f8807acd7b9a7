//! Error types for the stackyard registry.
//!
//! Registry invariant violations (`DoesNotExist`, `AlreadyExists`) carry the
//! component kind and key so callers can correct the request. Failures from
//! component resolution or persistence are surfaced as-is.

use crate::config::ComponentKind;
use std::path::PathBuf;
use thiserror::Error;
use uuid::Uuid;

/// Main error type for the stackyard library.
#[derive(Debug, Error)]
pub enum StackyardError {
    // Registry invariants
    #[error("{kind} `{key}` does not exist. Available keys: {available:?}")]
    DoesNotExist {
        kind: ComponentKind,
        key: String,
        /// Keys currently registered in the same mapping.
        available: Vec<String>,
    },

    #[error("{kind} `{key}` already exists!")]
    AlreadyExists { kind: ComponentKind, key: String },

    // Component resolution
    #[error("No component factory registered for source `{locator}`")]
    UnknownSource { locator: String },

    #[error("Persisted state for component {uuid} not found at {path:?}")]
    ComponentStateMissing { uuid: Uuid, path: PathBuf },

    // File system errors
    #[error("IO error at {path:?}: {message}")]
    Io {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<std::io::Error>,
    },

    // Serialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: Option<serde_json::Error>,
    },

    // Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("{0}")]
    Other(String),
}

/// Result type alias for stackyard operations.
pub type Result<T> = std::result::Result<T, StackyardError>;

impl From<std::io::Error> for StackyardError {
    fn from(err: std::io::Error) -> Self {
        StackyardError::Io {
            message: err.to_string(),
            path: None,
            source: Some(err),
        }
    }
}

impl From<serde_json::Error> for StackyardError {
    fn from(err: serde_json::Error) -> Self {
        StackyardError::Json {
            message: err.to_string(),
            source: Some(err),
        }
    }
}

impl StackyardError {
    /// Create an IO error with path context.
    pub fn io_with_path(err: std::io::Error, path: impl Into<PathBuf>) -> Self {
        StackyardError::Io {
            message: err.to_string(),
            path: Some(path.into()),
            source: Some(err),
        }
    }

    /// Build a `DoesNotExist` error from the keys of the mapping that was searched.
    /// The available keys are reported sorted.
    pub(crate) fn does_not_exist<'a>(
        kind: ComponentKind,
        key: &str,
        available: impl IntoIterator<Item = &'a String>,
    ) -> Self {
        let mut available: Vec<String> = available.into_iter().cloned().collect();
        available.sort();
        StackyardError::DoesNotExist {
            kind,
            key: key.to_string(),
            available,
        }
    }

    /// True when the error reports a missing registry key.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StackyardError::DoesNotExist { .. })
    }

    /// True when the error reports a duplicate registry key.
    pub fn is_already_exists(&self) -> bool {
        matches!(self, StackyardError::AlreadyExists { .. })
    }
}
