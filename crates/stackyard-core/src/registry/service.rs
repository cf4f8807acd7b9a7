//! The registry of providers, artifact stores and metadata stores.

use super::builder::RegistryBuilder;
use super::state::RegistryState;
use crate::component::{
    ArtifactStore, Component, ComponentReference, ComponentResolver, MetadataStore,
};
use crate::config::ComponentKind;
use crate::persistence::PersistenceBackend;
use crate::platform::RegistryPaths;
use crate::provider::Provider;
use crate::{Result, StackyardError};
use std::collections::BTreeMap;
use std::fmt;
use tracing::{debug, info, warn};

/// When mutations reach the persistence backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WritePolicy {
    /// Persist before every mutating call returns.
    #[default]
    Immediate,
    /// Keep mutations in memory until [`ComponentRegistry::flush`] is called.
    Buffered,
}

/// Single source of truth for the components known to a local installation.
///
/// Providers are held as values. Artifact and metadata stores are held as
/// references and rebuilt through their resolvers whenever they are read.
/// Every mutating call validates first, then mutates and persists as one
/// step; a failed persist restores the previous in-memory state.
pub struct ComponentRegistry {
    state: RegistryState,
    backend: Box<dyn PersistenceBackend>,
    artifact_stores: ComponentResolver<dyn ArtifactStore>,
    metadata_stores: ComponentResolver<dyn MetadataStore>,
    write_policy: WritePolicy,
    dirty: bool,
}

impl ComponentRegistry {
    /// Open the registry stored below `paths`, or an empty one if none was saved.
    pub fn open(paths: &RegistryPaths) -> Result<Self> {
        Self::builder(paths.clone()).open()
    }

    /// Open the registry in the platform config directory.
    pub fn open_default() -> Result<Self> {
        Self::open(&RegistryPaths::from_platform()?)
    }

    /// Create a builder for substituting the backend, resolvers or write policy.
    pub fn builder(paths: RegistryPaths) -> RegistryBuilder {
        RegistryBuilder::new(paths)
    }

    pub(super) fn from_parts(
        state: RegistryState,
        backend: Box<dyn PersistenceBackend>,
        artifact_stores: ComponentResolver<dyn ArtifactStore>,
        metadata_stores: ComponentResolver<dyn MetadataStore>,
        write_policy: WritePolicy,
    ) -> Self {
        Self {
            state,
            backend,
            artifact_stores,
            metadata_stores,
            write_policy,
            dirty: false,
        }
    }

    /// Read-only view of the registry mappings.
    pub fn state(&self) -> &RegistryState {
        &self.state
    }

    pub fn write_policy(&self) -> WritePolicy {
        self.write_policy
    }

    /// True when buffered mutations have not been flushed yet.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    // ========================================
    // Providers
    // ========================================

    /// Return the provider registered under `key`.
    pub fn get_provider(&self, key: &str) -> Result<&Provider> {
        debug!("Fetching provider with key {}", key);
        lookup(ComponentKind::Provider, &self.state.providers, key)
    }

    /// Register a provider under a new key.
    pub fn register_provider(&mut self, key: impl Into<String>, provider: Provider) -> Result<()> {
        let key = key.into();
        ensure_vacant(ComponentKind::Provider, &self.state.providers, &key)?;
        info!(
            "Registering provider with key {}, details: {}",
            key,
            serde_json::to_value(&provider)?
        );

        self.commit(|state| {
            state.providers.insert(key, provider);
        })
    }

    /// Remove the provider registered under `key`.
    pub fn delete_provider(&mut self, key: &str) -> Result<()> {
        self.get_provider(key)?;
        // Providers own nothing outside the registry file, so dropping the
        // entry is their whole teardown. Stores go through `delete()` instead.
        self.commit(|state| {
            state.providers.remove(key);
        })?;
        info!("Deleted provider with key: {}", key);
        Ok(())
    }

    pub fn provider_keys(&self) -> Vec<&str> {
        self.state.providers.keys().map(String::as_str).collect()
    }

    // ========================================
    // Artifact stores
    // ========================================

    /// Materialize the artifact store registered under `key`.
    pub fn get_artifact_store(&self, key: &str) -> Result<Box<dyn ArtifactStore>> {
        debug!("Fetching artifact store with key {}", key);
        let reference = lookup(
            ComponentKind::ArtifactStore,
            &self.state.artifact_store_map,
            key,
        )?;
        self.artifact_stores.materialize(reference)
    }

    /// Register an artifact store under a new key.
    ///
    /// The store persists its own state before the registry records a
    /// reference to it.
    pub fn register_artifact_store(
        &mut self,
        key: impl Into<String>,
        artifact_store: &dyn ArtifactStore,
    ) -> Result<()> {
        let key = key.into();
        ensure_vacant(
            ComponentKind::ArtifactStore,
            &self.state.artifact_store_map,
            &key,
        )?;
        info!(
            "Registering artifact store with key {}, details: {}",
            key,
            artifact_store.details()?
        );

        artifact_store.update()?;
        let reference = artifact_store.reference();
        self.commit(|state| {
            state.artifact_store_map.insert(key, reference);
        })
    }

    /// Destroy the artifact store registered under `key` and forget it.
    ///
    /// A store whose state is already gone is forgotten without error.
    pub fn delete_artifact_store(&mut self, key: &str) -> Result<()> {
        let reference = self.artifact_store_reference(key)?.clone();
        teardown(&self.artifact_stores, key, &reference)?;
        self.commit(|state| {
            state.artifact_store_map.remove(key);
        })?;
        info!("Deleted artifact store with key: {}", key);
        Ok(())
    }

    /// Materialize every registered artifact store.
    pub fn artifact_stores(&self) -> Result<BTreeMap<String, Box<dyn ArtifactStore>>> {
        self.artifact_stores
            .materialize_all(&self.state.artifact_store_map)
    }

    /// The stored reference for `key`, without materializing it.
    pub fn artifact_store_reference(&self, key: &str) -> Result<&ComponentReference> {
        lookup(
            ComponentKind::ArtifactStore,
            &self.state.artifact_store_map,
            key,
        )
    }

    pub fn artifact_store_keys(&self) -> Vec<&str> {
        self.state
            .artifact_store_map
            .keys()
            .map(String::as_str)
            .collect()
    }

    // ========================================
    // Metadata stores
    // ========================================

    /// Materialize the metadata store registered under `key`.
    pub fn get_metadata_store(&self, key: &str) -> Result<Box<dyn MetadataStore>> {
        debug!("Fetching metadata store with key {}", key);
        let reference = lookup(
            ComponentKind::MetadataStore,
            &self.state.metadata_store_map,
            key,
        )?;
        self.metadata_stores.materialize(reference)
    }

    /// Register a metadata store under a new key.
    pub fn register_metadata_store(
        &mut self,
        key: impl Into<String>,
        metadata_store: &dyn MetadataStore,
    ) -> Result<()> {
        let key = key.into();
        ensure_vacant(
            ComponentKind::MetadataStore,
            &self.state.metadata_store_map,
            &key,
        )?;
        info!(
            "Registering metadata store with key {}, details: {}",
            key,
            metadata_store.details()?
        );

        metadata_store.update()?;
        let reference = metadata_store.reference();
        self.commit(|state| {
            state.metadata_store_map.insert(key, reference);
        })
    }

    /// Destroy the metadata store registered under `key` and forget it.
    ///
    /// A store whose state is already gone is forgotten without error.
    pub fn delete_metadata_store(&mut self, key: &str) -> Result<()> {
        let reference = self.metadata_store_reference(key)?.clone();
        teardown(&self.metadata_stores, key, &reference)?;
        self.commit(|state| {
            state.metadata_store_map.remove(key);
        })?;
        info!("Deleted metadata store with key: {}", key);
        Ok(())
    }

    /// Materialize every registered metadata store.
    pub fn metadata_stores(&self) -> Result<BTreeMap<String, Box<dyn MetadataStore>>> {
        self.metadata_stores
            .materialize_all(&self.state.metadata_store_map)
    }

    pub fn metadata_store_reference(&self, key: &str) -> Result<&ComponentReference> {
        lookup(
            ComponentKind::MetadataStore,
            &self.state.metadata_store_map,
            key,
        )
    }

    pub fn metadata_store_keys(&self) -> Vec<&str> {
        self.state
            .metadata_store_map
            .keys()
            .map(String::as_str)
            .collect()
    }

    // ========================================
    // Orchestrators
    // ========================================

    /// Registered orchestrators. Always empty: orchestrators have no mapping yet.
    pub fn orchestrators(&self) -> BTreeMap<String, ComponentReference> {
        BTreeMap::new()
    }

    // ========================================
    // Persistence
    // ========================================

    /// Persist buffered mutations. A no-op when nothing is pending.
    pub fn flush(&mut self) -> Result<()> {
        if !self.dirty {
            return Ok(());
        }
        self.backend.save(&self.state)?;
        self.dirty = false;
        debug!("Flushed buffered registry changes");
        Ok(())
    }

    /// Destroy every registered store and then the registry's own record.
    ///
    /// Metadata stores go first, then artifact stores. Providers disappear
    /// with the registry file. Stores whose state is already gone are
    /// skipped, so a destroy interrupted halfway can be run again. This
    /// cannot be undone.
    pub fn destroy(mut self) -> Result<()> {
        warn!("Destroying registry and all registered stores");

        for (key, reference) in &self.state.metadata_store_map {
            teardown(&self.metadata_stores, key, reference)?;
        }
        for (key, reference) in &self.state.artifact_store_map {
            teardown(&self.artifact_stores, key, reference)?;
        }
        // TODO: cascade orchestrators once they are stored as references.

        self.backend.destroy()?;
        self.state = RegistryState::default();
        self.dirty = false;
        info!("Registry destroyed");
        Ok(())
    }

    /// Apply `mutate` and persist it as one step.
    ///
    /// Under `WritePolicy::Immediate` a failed save restores the state from
    /// before the mutation and returns the backend error.
    fn commit<F>(&mut self, mutate: F) -> Result<()>
    where
        F: FnOnce(&mut RegistryState),
    {
        match self.write_policy {
            WritePolicy::Immediate => {
                let snapshot = self.state.clone();
                mutate(&mut self.state);
                if let Err(e) = self.backend.save(&self.state) {
                    warn!("Failed to persist registry, reverting change: {}", e);
                    self.state = snapshot;
                    return Err(e);
                }
            }
            WritePolicy::Buffered => {
                mutate(&mut self.state);
                self.dirty = true;
            }
        }
        Ok(())
    }
}

impl Drop for ComponentRegistry {
    fn drop(&mut self) {
        if self.dirty {
            warn!("Registry dropped with unflushed changes");
        }
    }
}

impl fmt::Debug for ComponentRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentRegistry")
            .field("state", &self.state)
            .field("write_policy", &self.write_policy)
            .field("dirty", &self.dirty)
            .finish_non_exhaustive()
    }
}

fn lookup<'a, V>(kind: ComponentKind, map: &'a BTreeMap<String, V>, key: &str) -> Result<&'a V> {
    map.get(key)
        .ok_or_else(|| StackyardError::does_not_exist(kind, key, map.keys()))
}

/// Destroy the component behind `reference`. Missing state counts as already destroyed.
fn teardown<T>(resolver: &ComponentResolver<T>, key: &str, reference: &ComponentReference) -> Result<()>
where
    T: Component + ?Sized,
{
    debug!(
        "Deleting {} {} from {}",
        resolver.kind(),
        key,
        resolver.state_dir().display()
    );
    match resolver.materialize(reference) {
        Ok(component) => component.delete(),
        Err(StackyardError::ComponentStateMissing { uuid, path }) => {
            warn!(
                "{} {} ({}) has no state at {}, treating as already deleted",
                resolver.kind(),
                key,
                uuid,
                path.display()
            );
            Ok(())
        }
        Err(e) => Err(e),
    }
}

fn ensure_vacant<V>(kind: ComponentKind, map: &BTreeMap<String, V>, key: &str) -> Result<()> {
    if map.contains_key(key) {
        return Err(StackyardError::AlreadyExists {
            kind,
            key: key.to_string(),
        });
    }
    Ok(())
}
