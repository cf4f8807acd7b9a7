//! Component lifecycle and resolution.
//!
//! Artifact stores and metadata stores are not held live by the registry.
//! The registry records a [`ComponentReference`] and asks a
//! [`ComponentResolver`] to rebuild the instance when a caller needs it.

mod reference;
mod resolver;

pub use reference::{ComponentReference, SourceLocator};
pub use resolver::{ComponentFactory, ComponentResolver};

use crate::Result;
use std::fmt;
use uuid::Uuid;

/// Lifecycle every referenced component implements.
pub trait Component: Send + Sync + fmt::Debug {
    /// Instance id, assigned when the component is created.
    fn uuid(&self) -> Uuid;

    /// Locator of the implementing type, used to pick a factory on reload.
    fn source(&self) -> SourceLocator;

    /// Descriptive content, logged when the component is registered.
    fn details(&self) -> Result<serde_json::Value>;

    /// Persist the component's own state.
    fn update(&self) -> Result<()>;

    /// Destroy the component's own state.
    fn delete(&self) -> Result<()>;

    fn reference(&self) -> ComponentReference {
        ComponentReference::new(self.uuid(), self.source())
    }
}

/// A store for pipeline artifacts.
pub trait ArtifactStore: Component {
    /// Root location artifacts are written under.
    fn path(&self) -> &str;
}

/// A store for pipeline run metadata.
pub trait MetadataStore: Component {
    /// Connection URI of the backing database.
    fn uri(&self) -> &str;
}
