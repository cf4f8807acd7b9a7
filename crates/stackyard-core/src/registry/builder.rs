//! Builder for configuring how a `ComponentRegistry` is opened.

use super::service::{ComponentRegistry, WritePolicy};
use crate::component::{ArtifactStore, ComponentResolver, MetadataStore};
use crate::persistence::{JsonFileBackend, PersistenceBackend};
use crate::platform::RegistryPaths;
use crate::Result;
use tracing::info;

/// Builder for configuring registry initialization.
///
/// # Example
///
/// ```rust,no_run
/// use stackyard::{ComponentRegistry, RegistryPaths, WritePolicy};
///
/// let registry = ComponentRegistry::builder(RegistryPaths::new("/tmp/stackyard"))
///     .write_policy(WritePolicy::Buffered)
///     .open()?;
/// # Ok::<(), stackyard::StackyardError>(())
/// ```
pub struct RegistryBuilder {
    paths: RegistryPaths,
    backend: Option<Box<dyn PersistenceBackend>>,
    artifact_stores: Option<ComponentResolver<dyn ArtifactStore>>,
    metadata_stores: Option<ComponentResolver<dyn MetadataStore>>,
    write_policy: WritePolicy,
}

impl RegistryBuilder {
    /// Create a builder for the registry stored below `paths`.
    pub fn new(paths: RegistryPaths) -> Self {
        Self {
            paths,
            backend: None,
            artifact_stores: None,
            metadata_stores: None,
            write_policy: WritePolicy::default(),
        }
    }

    /// Persist through a custom backend.
    ///
    /// Default: `JsonFileBackend` at `paths.registry_file()`
    pub fn backend(mut self, backend: impl PersistenceBackend + 'static) -> Self {
        self.backend = Some(Box::new(backend));
        self
    }

    /// Resolve artifact stores with a custom resolver.
    ///
    /// Default: `ComponentResolver::artifact_stores(&paths)`
    pub fn artifact_store_resolver(mut self, resolver: ComponentResolver<dyn ArtifactStore>) -> Self {
        self.artifact_stores = Some(resolver);
        self
    }

    /// Resolve metadata stores with a custom resolver.
    ///
    /// Default: `ComponentResolver::metadata_stores(&paths)`
    pub fn metadata_store_resolver(mut self, resolver: ComponentResolver<dyn MetadataStore>) -> Self {
        self.metadata_stores = Some(resolver);
        self
    }

    /// Default: `WritePolicy::Immediate`
    pub fn write_policy(mut self, policy: WritePolicy) -> Self {
        self.write_policy = policy;
        self
    }

    /// Load the persisted state (or start empty) and build the registry.
    pub fn open(self) -> Result<ComponentRegistry> {
        let backend = self
            .backend
            .unwrap_or_else(|| Box::new(JsonFileBackend::new(self.paths.registry_file())));
        let artifact_stores = self
            .artifact_stores
            .unwrap_or_else(|| ComponentResolver::artifact_stores(&self.paths));
        let metadata_stores = self
            .metadata_stores
            .unwrap_or_else(|| ComponentResolver::metadata_stores(&self.paths));

        let state = backend.load()?.unwrap_or_default();
        info!(
            "Opened registry at {} ({} providers, {} artifact stores, {} metadata stores)",
            self.paths.root().display(),
            state.providers().len(),
            state.artifact_store_map().len(),
            state.metadata_store_map().len()
        );

        Ok(ComponentRegistry::from_parts(
            state,
            backend,
            artifact_stores,
            metadata_stores,
            self.write_policy,
        ))
    }
}
