//! Stored references to lazily materialized components.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Names the concrete type implementing a component.
///
/// Resolvers map a locator to the factory that rebuilds instances of that
/// type. Locators are written to disk, so implementations keep them stable
/// across releases.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourceLocator(String);

impl SourceLocator {
    pub fn new(locator: impl Into<String>) -> Self {
        Self(locator.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SourceLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SourceLocator {
    fn from(locator: &str) -> Self {
        Self::new(locator)
    }
}

/// An instance id plus the locator of its implementing type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ComponentReference {
    pub uuid: Uuid,
    pub source: SourceLocator,
}

impl ComponentReference {
    pub fn new(uuid: Uuid, source: SourceLocator) -> Self {
        Self { uuid, source }
    }
}
