//! Stackyard CLI - command-line front end for the local component registry.
//!
//! Each invocation opens the registry, performs one operation and prints the
//! result as JSON on stdout. Logs go to stderr.

mod commands;

use anyhow::Result;
use clap::Parser;
use stackyard::RegistryPaths;
use std::path::PathBuf;
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

use commands::Command;

#[derive(Parser, Debug)]
#[command(name = "stackyard")]
#[command(about = "Manage the local registry of pipeline stack components")]
struct Args {
    /// Config directory holding the registry (defaults to $STACKYARD_CONFIG_DIR,
    /// then the platform config directory)
    #[arg(long, global = true)]
    config_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Set up logging
    let log_level = if args.debug { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_thread_ids(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let paths = match args.config_dir {
        Some(dir) => RegistryPaths::new(dir),
        None => RegistryPaths::from_platform()?,
    };
    debug!("Config directory: {}", paths.root().display());

    let output = commands::execute(args.command, &paths)?;
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}
