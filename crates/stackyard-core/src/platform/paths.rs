//! Platform-specific path utilities.
//!
//! Resolves the well-known configuration directory and lays out the files
//! the registry and its components persist below it.

use crate::config::RegistryConfig;
use crate::error::{Result, StackyardError};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Get the stackyard configuration directory.
///
/// `STACKYARD_CONFIG_DIR` takes precedence when set to a non-empty value.
///
/// # Platform Behavior
/// - **Linux**: `~/.config/stackyard` (XDG_CONFIG_HOME)
/// - **Windows**: `%APPDATA%\stackyard`
/// - **macOS**: `~/Library/Application Support/stackyard`
pub fn stackyard_config_dir() -> Result<PathBuf> {
    resolve_config_dir(std::env::var_os(RegistryConfig::CONFIG_DIR_ENV))
}

fn resolve_config_dir(env_override: Option<OsString>) -> Result<PathBuf> {
    if let Some(dir) = env_override.filter(|d| !d.is_empty()) {
        return Ok(PathBuf::from(dir));
    }

    let config_dir = dirs::config_dir().ok_or_else(|| StackyardError::Config {
        message: "Could not determine platform config directory".to_string(),
    })?;
    Ok(config_dir.join(RegistryConfig::APP_CONFIG_DIR_NAME))
}

/// File layout below a stackyard configuration directory.
///
/// ```text
/// <root>/localservice.json
/// <root>/artifact_stores/<uuid>.json
/// <root>/metadata_stores/<uuid>.json
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryPaths {
    root: PathBuf,
}

impl RegistryPaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Layout rooted at [`stackyard_config_dir`].
    pub fn from_platform() -> Result<Self> {
        Ok(Self::new(stackyard_config_dir()?))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the registry file.
    pub fn registry_file(&self) -> PathBuf {
        self.root.join(RegistryConfig::REGISTRY_FILE_NAME)
    }

    pub fn artifact_stores_dir(&self) -> PathBuf {
        self.root.join(RegistryConfig::ARTIFACT_STORE_DIR_NAME)
    }

    pub fn metadata_stores_dir(&self) -> PathBuf {
        self.root.join(RegistryConfig::METADATA_STORE_DIR_NAME)
    }
}
