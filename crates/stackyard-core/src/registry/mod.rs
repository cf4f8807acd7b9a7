//! Local component registry.
//!
//! This module provides the registry that stores:
//! - **Providers**: plain values naming the components a pipeline runs on
//! - **Artifact stores** and **metadata stores**: references resolved into
//!   live components on demand
//!
//! # Location
//!
//! The registry file lives in the stackyard config directory:
//! - **Linux**: `~/.config/stackyard/localservice.json`
//! - **Windows**: `%APPDATA%\stackyard\localservice.json`
//! - **macOS**: `~/Library/Application Support/stackyard/localservice.json`

mod builder;
mod service;
mod state;

pub use builder::RegistryBuilder;
pub use service::{ComponentRegistry, WritePolicy};
pub use state::RegistryState;
