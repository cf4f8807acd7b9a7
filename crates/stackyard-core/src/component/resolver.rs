//! Factory lookup that turns component references back into instances.

use super::{ArtifactStore, ComponentReference, MetadataStore, SourceLocator};
use crate::config::ComponentKind;
use crate::platform::RegistryPaths;
use crate::stores::{LocalArtifactStore, LocalMetadataStore};
use crate::{Result, StackyardError};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

/// Rebuilds one component instance from its uuid and the kind's state directory.
pub type ComponentFactory<T> = Arc<dyn Fn(Uuid, &Path) -> Result<Box<T>> + Send + Sync>;

/// Maps source locators to factories for one component kind.
pub struct ComponentResolver<T: ?Sized> {
    kind: ComponentKind,
    state_dir: PathBuf,
    factories: HashMap<SourceLocator, ComponentFactory<T>>,
}

impl<T: ?Sized> ComponentResolver<T> {
    /// Create a resolver with no factories.
    pub fn new(kind: ComponentKind, state_dir: impl Into<PathBuf>) -> Self {
        Self {
            kind,
            state_dir: state_dir.into(),
            factories: HashMap::new(),
        }
    }

    /// Register the factory for a source locator, replacing any previous one.
    pub fn register_factory<F>(&mut self, source: impl Into<SourceLocator>, factory: F)
    where
        F: Fn(Uuid, &Path) -> Result<Box<T>> + Send + Sync + 'static,
    {
        let source = source.into();
        if self.factories.insert(source.clone(), Arc::new(factory)).is_some() {
            debug!("Replaced {} factory for {}", self.kind, source);
        }
    }

    /// Builder-style [`register_factory`](Self::register_factory).
    pub fn with_factory<F>(mut self, source: impl Into<SourceLocator>, factory: F) -> Self
    where
        F: Fn(Uuid, &Path) -> Result<Box<T>> + Send + Sync + 'static,
    {
        self.register_factory(source, factory);
        self
    }

    /// Look up the factory for a source locator.
    pub fn resolve(&self, source: &SourceLocator) -> Result<ComponentFactory<T>> {
        self.factories
            .get(source)
            .cloned()
            .ok_or_else(|| StackyardError::UnknownSource {
                locator: source.to_string(),
            })
    }

    /// Build the instance with the given uuid.
    pub fn instantiate(&self, factory: &ComponentFactory<T>, uuid: Uuid) -> Result<Box<T>> {
        factory(uuid, self.state_dir.as_path())
    }

    /// Resolve and instantiate in one step.
    pub fn materialize(&self, reference: &ComponentReference) -> Result<Box<T>> {
        let factory = self.resolve(&reference.source)?;
        self.instantiate(&factory, reference.uuid)
    }

    /// Materialize every reference of a mapping, keyed by the same logical key.
    pub fn materialize_all(
        &self,
        references: &BTreeMap<String, ComponentReference>,
    ) -> Result<BTreeMap<String, Box<T>>> {
        references
            .iter()
            .map(|(key, reference)| Ok((key.clone(), self.materialize(reference)?)))
            .collect()
    }

    pub fn kind(&self) -> ComponentKind {
        self.kind
    }

    pub fn state_dir(&self) -> &Path {
        &self.state_dir
    }

    /// Source locators this resolver can build.
    pub fn sources(&self) -> Vec<&SourceLocator> {
        let mut sources: Vec<_> = self.factories.keys().collect();
        sources.sort();
        sources
    }
}

impl ComponentResolver<dyn ArtifactStore> {
    /// Resolver for artifact stores with the built-in implementations registered.
    pub fn artifact_stores(paths: &RegistryPaths) -> Self {
        Self::new(ComponentKind::ArtifactStore, paths.artifact_stores_dir()).with_factory(
            LocalArtifactStore::SOURCE,
            |uuid, dir| {
                let store = LocalArtifactStore::load(dir, uuid)?;
                Ok(Box::new(store) as Box<dyn ArtifactStore>)
            },
        )
    }
}

impl ComponentResolver<dyn MetadataStore> {
    /// Resolver for metadata stores with the built-in implementations registered.
    pub fn metadata_stores(paths: &RegistryPaths) -> Self {
        Self::new(ComponentKind::MetadataStore, paths.metadata_stores_dir()).with_factory(
            LocalMetadataStore::SOURCE,
            |uuid, dir| {
                let store = LocalMetadataStore::load(dir, uuid)?;
                Ok(Box::new(store) as Box<dyn MetadataStore>)
            },
        )
    }
}

impl<T: ?Sized> fmt::Debug for ComponentResolver<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentResolver")
            .field("kind", &self.kind)
            .field("state_dir", &self.state_dir)
            .field("sources", &self.sources())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::Component;
    use tempfile::TempDir;

    #[test]
    fn test_unknown_source_is_reported() {
        let temp_dir = TempDir::new().unwrap();
        let resolver = ComponentResolver::artifact_stores(&RegistryPaths::new(temp_dir.path()));

        let reference = ComponentReference::new(Uuid::new_v4(), "acme::S3ArtifactStore".into());
        let err = resolver.materialize(&reference).unwrap_err();
        assert!(matches!(
            err,
            StackyardError::UnknownSource { ref locator } if locator == "acme::S3ArtifactStore"
        ));
    }

    #[test]
    fn test_materialize_builtin_store() {
        let temp_dir = TempDir::new().unwrap();
        let paths = RegistryPaths::new(temp_dir.path());
        let resolver = ComponentResolver::artifact_stores(&paths);

        let store = LocalArtifactStore::new(&paths, "/data/artifacts");
        store.update().unwrap();

        let factory = resolver.resolve(&store.source()).unwrap();
        let built = resolver.instantiate(&factory, store.uuid()).unwrap();
        assert_eq!(built.uuid(), store.uuid());
        assert_eq!(built.path(), "/data/artifacts");
        assert_eq!(resolver.kind(), ComponentKind::ArtifactStore);
        assert_eq!(resolver.state_dir(), paths.artifact_stores_dir());
    }

    #[test]
    fn test_materialize_all_yields_one_instance_per_reference() {
        let temp_dir = TempDir::new().unwrap();
        let paths = RegistryPaths::new(temp_dir.path());
        let resolver = ComponentResolver::metadata_stores(&paths);

        let mut references = BTreeMap::new();
        for key in ["dev", "staging", "prod"] {
            let store = LocalMetadataStore::new(&paths, format!("sqlite:///{key}.db"));
            store.update().unwrap();
            references.insert(key.to_string(), store.reference());
        }

        let built = resolver.materialize_all(&references).unwrap();
        assert_eq!(built.len(), 3);
        for (key, reference) in &references {
            assert_eq!(built[key].uuid(), reference.uuid);
        }
    }

    #[test]
    fn test_custom_factory_replaces_builtin() {
        let temp_dir = TempDir::new().unwrap();
        let paths = RegistryPaths::new(temp_dir.path());
        let mut resolver = ComponentResolver::artifact_stores(&paths);

        resolver.register_factory(LocalArtifactStore::SOURCE, |_, _| {
            Err(StackyardError::Other("factory disabled".into()))
        });

        let reference =
            ComponentReference::new(Uuid::new_v4(), LocalArtifactStore::SOURCE.into());
        let err = resolver.materialize(&reference).unwrap_err();
        assert_eq!(err.to_string(), "factory disabled");
        assert_eq!(resolver.sources().len(), 1);
    }
}
