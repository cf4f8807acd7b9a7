//! Command definitions and dispatch.
//!
//! Every command opens the registry, runs exactly one registry operation and
//! returns its result as JSON for `main` to print.

use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use serde_json::{json, Value};
use stackyard::{
    ArtifactStore, Component, ComponentRegistry, LocalArtifactStore, LocalMetadataStore,
    MetadataStore, Provider, ProviderType, RegistryPaths,
};
use tracing::debug;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List every registered component
    List,

    /// Manage providers
    #[command(subcommand)]
    Provider(ProviderCommand),

    /// Manage artifact stores
    #[command(subcommand)]
    ArtifactStore(ArtifactStoreCommand),

    /// Manage metadata stores
    #[command(subcommand)]
    MetadataStore(MetadataStoreCommand),

    /// Delete every registered store, then the registry file itself
    Destroy {
        /// Confirm the irreversible teardown
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Args, Debug)]
pub struct KeyArg {
    /// Logical key of the component
    pub key: String,
}

#[derive(Subcommand, Debug)]
pub enum ProviderCommand {
    /// Register a provider
    Register {
        key: String,
        /// Key of the artifact store the provider uses
        #[arg(long)]
        artifact_store: String,
        /// Key of the metadata store the provider uses
        #[arg(long)]
        metadata_store: String,
        /// Key of the orchestrator the provider uses
        #[arg(long)]
        orchestrator: Option<String>,
        /// Provider type (local, gcp)
        #[arg(long = "type", default_value = "local", value_parser = parse_provider_type)]
        provider_type: ProviderType,
    },
    /// Show a provider
    Get(KeyArg),
    /// Delete a provider
    Delete(KeyArg),
}

#[derive(Subcommand, Debug)]
pub enum ArtifactStoreCommand {
    /// Register a local artifact store
    Register {
        key: String,
        /// Directory artifacts are written under
        #[arg(long)]
        path: String,
    },
    /// Show an artifact store
    Get(KeyArg),
    /// Delete an artifact store and its persisted state
    Delete(KeyArg),
}

#[derive(Subcommand, Debug)]
pub enum MetadataStoreCommand {
    /// Register a local metadata store
    Register {
        key: String,
        /// Database URI of the metadata store
        #[arg(long)]
        uri: String,
    },
    /// Show a metadata store
    Get(KeyArg),
    /// Delete a metadata store and its persisted state
    Delete(KeyArg),
}

fn parse_provider_type(s: &str) -> std::result::Result<ProviderType, String> {
    ProviderType::from_str(s).ok_or_else(|| format!("unknown provider type `{}`", s))
}

/// Run one command against the registry stored below `paths`.
pub fn execute(command: Command, paths: &RegistryPaths) -> Result<Value> {
    debug!("Using registry at {}", paths.root().display());

    if let Command::Destroy { yes } = command {
        if !yes {
            bail!("Refusing to destroy the registry without --yes");
        }
        ComponentRegistry::open(paths)?.destroy()?;
        return Ok(json!({ "destroyed": paths.root() }));
    }

    let mut registry = ComponentRegistry::open(paths)?;
    let result = match command {
        Command::List => serde_json::to_value(registry.state())?,
        Command::Provider(cmd) => provider(&mut registry, cmd)?,
        Command::ArtifactStore(cmd) => artifact_store(&mut registry, paths, cmd)?,
        Command::MetadataStore(cmd) => metadata_store(&mut registry, paths, cmd)?,
        Command::Destroy { .. } => unreachable!("handled above"),
    };
    Ok(result)
}

fn provider(registry: &mut ComponentRegistry, cmd: ProviderCommand) -> Result<Value> {
    match cmd {
        ProviderCommand::Register {
            key,
            artifact_store,
            metadata_store,
            orchestrator,
            provider_type,
        } => {
            let mut provider = Provider::new(provider_type, artifact_store, metadata_store);
            if let Some(orchestrator) = orchestrator {
                provider = provider.with_orchestrator(orchestrator);
            }
            registry.register_provider(key.clone(), provider)?;
            Ok(json!({ "registered": key }))
        }
        ProviderCommand::Get(KeyArg { key }) => {
            Ok(serde_json::to_value(registry.get_provider(&key)?)?)
        }
        ProviderCommand::Delete(KeyArg { key }) => {
            registry.delete_provider(&key)?;
            Ok(json!({ "deleted": key }))
        }
    }
}

fn artifact_store(
    registry: &mut ComponentRegistry,
    paths: &RegistryPaths,
    cmd: ArtifactStoreCommand,
) -> Result<Value> {
    match cmd {
        ArtifactStoreCommand::Register { key, path } => {
            let store = LocalArtifactStore::new(paths, path);
            registry.register_artifact_store(key.clone(), &store)?;
            Ok(json!({ "registered": key, "uuid": store.uuid() }))
        }
        ArtifactStoreCommand::Get(KeyArg { key }) => {
            let store = registry.get_artifact_store(&key)?;
            Ok(describe(store.as_ref(), store.path())?)
        }
        ArtifactStoreCommand::Delete(KeyArg { key }) => {
            registry.delete_artifact_store(&key)?;
            Ok(json!({ "deleted": key }))
        }
    }
}

fn metadata_store(
    registry: &mut ComponentRegistry,
    paths: &RegistryPaths,
    cmd: MetadataStoreCommand,
) -> Result<Value> {
    match cmd {
        MetadataStoreCommand::Register { key, uri } => {
            let store = LocalMetadataStore::new(paths, uri);
            registry.register_metadata_store(key.clone(), &store)?;
            Ok(json!({ "registered": key, "uuid": store.uuid() }))
        }
        MetadataStoreCommand::Get(KeyArg { key }) => {
            let store = registry.get_metadata_store(&key)?;
            Ok(describe(store.as_ref(), store.uri())?)
        }
        MetadataStoreCommand::Delete(KeyArg { key }) => {
            registry.delete_metadata_store(&key)?;
            Ok(json!({ "deleted": key }))
        }
    }
}

fn describe<C: Component + ?Sized>(component: &C, location: &str) -> Result<Value> {
    Ok(json!({
        "uuid": component.uuid(),
        "source": component.source(),
        "location": location,
        "details": component.details()?,
    }))
}
