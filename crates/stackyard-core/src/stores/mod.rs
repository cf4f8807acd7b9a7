//! Built-in component implementations.

mod local_artifact_store;
mod local_metadata_store;

pub use local_artifact_store::LocalArtifactStore;
pub use local_metadata_store::LocalMetadataStore;
