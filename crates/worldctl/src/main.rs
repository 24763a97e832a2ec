//! worldctl: inspect the enabled-world registry for a server snapshot.
//!
//! Loads a TOML description of the host (worlds, allow / deny lists and an
//! optional Multiverse-Core install), builds a [`WorldManager`] over it and
//! answers one query.

mod cli;
mod commands;
mod config;
mod logging;

use anyhow::{anyhow, Result};
use clap::Parser;
use std::sync::Arc;
use tracing::{info, warn};
use world_manager::WorldManager;

use cli::{Args, Command};
use config::AppConfig;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = AppConfig::load_from_file(&args.config).await?;
    config.apply_overrides(&args);
    config
        .validate()
        .map_err(|e| anyhow!("Configuration validation failed: {e}"))?;

    logging::setup_logging(&config.logging)?;
    info!("Loaded configuration from {}", args.config.display());

    for name in config.worlds.overlapping() {
        warn!("World {} is both enabled and disabled; it will stay disabled", name);
    }

    let server = Arc::new(config.build_server());
    let manager = WorldManager::new(server.clone(), Arc::new(config.worlds.clone()));

    let command = args.command.clone().unwrap_or(Command::List);
    let output = commands::run(&manager, server.as_ref(), &command, args.json)?;
    println!("{output}");

    Ok(())
}
