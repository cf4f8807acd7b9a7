//! Stackyard - local registry of pipeline stack components.
//!
//! Tracks the providers, artifact stores and metadata stores known to one
//! installation and keeps them in a single file in the user's config
//! directory, so registrations survive process restarts.
//!
//! # Example
//!
//! ```rust,no_run
//! use stackyard::{
//!     ArtifactStore, ComponentRegistry, LocalArtifactStore, LocalMetadataStore, Provider,
//!     ProviderType, RegistryPaths,
//! };
//!
//! fn main() -> stackyard::Result<()> {
//!     let paths = RegistryPaths::from_platform()?;
//!     let mut registry = ComponentRegistry::open(&paths)?;
//!
//!     let artifacts = LocalArtifactStore::new(&paths, "/data/artifacts");
//!     registry.register_artifact_store("local_artifacts", &artifacts)?;
//!
//!     let metadata = LocalMetadataStore::new(&paths, "sqlite:///data/metadata.db");
//!     registry.register_metadata_store("local_metadata", &metadata)?;
//!
//!     registry.register_provider(
//!         "local_stack",
//!         Provider::new(ProviderType::Local, "local_artifacts", "local_metadata"),
//!     )?;
//!
//!     let store = registry.get_artifact_store("local_artifacts")?;
//!     println!("Artifacts go to {}", store.path());
//!     Ok(())
//! }
//! ```

pub mod component;
pub mod config;
pub mod error;
pub mod persistence;
pub mod platform;
pub mod provider;
pub mod registry;
pub mod stores;

// Re-export commonly used types
pub use component::{
    ArtifactStore, Component, ComponentFactory, ComponentReference, ComponentResolver,
    MetadataStore, SourceLocator,
};
pub use config::{ComponentKind, RegistryConfig};
pub use error::{Result, StackyardError};
pub use persistence::{JsonFileBackend, PersistenceBackend};
pub use platform::RegistryPaths;
pub use provider::{Provider, ProviderType};
pub use registry::{ComponentRegistry, RegistryBuilder, RegistryState, WritePolicy};
pub use stores::{LocalArtifactStore, LocalMetadataStore};
