//! Platform abstraction layer.
//!
//! Everything that depends on where the host OS keeps per-user configuration
//! lives here, so the registry itself only deals with `RegistryPaths`.

pub mod paths;

pub use paths::{stackyard_config_dir, RegistryPaths};
