//! Command execution against a built world registry.

use anyhow::{anyhow, Result};
use serde::Serialize;
use serde_json::json;
use world_manager::{Location, Server, World, WorldManager};

use crate::cli::Command;

/// One line of `worldctl list`.
#[derive(Debug, Clone, Serialize)]
pub struct WorldReport {
    pub name: String,
    pub display_name: String,
    pub enabled: bool,
    pub spawn: Location,
}

impl WorldReport {
    fn new(manager: &WorldManager, world: &World) -> Self {
        Self {
            name: world.name.clone(),
            display_name: manager.world_name(world),
            enabled: manager.is_world_enabled(world),
            spawn: manager.spawn_location(world),
        }
    }
}

impl std::fmt::Display for WorldReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = if self.enabled { "enabled" } else { "disabled" };
        write!(
            f,
            "{:<20} {:<9} {} @ {}",
            self.name, state, self.display_name, self.spawn
        )
    }
}

/// Runs `command` and renders its result as plain text or JSON.
pub fn run(manager: &WorldManager, server: &dyn Server, command: &Command, json: bool) -> Result<String> {
    match command {
        Command::List => {
            let reports: Vec<WorldReport> = server
                .worlds()
                .iter()
                .map(|world| WorldReport::new(manager, world))
                .collect();

            if json {
                Ok(serde_json::to_string_pretty(&reports)?)
            } else {
                Ok(reports
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join("\n"))
            }
        }
        Command::Check { world } => {
            let enabled = manager.is_enabled_by_name(world);
            if json {
                Ok(json!({ "world": world, "enabled": enabled }).to_string())
            } else {
                let state = if enabled { "enabled" } else { "disabled" };
                Ok(format!("{world}: {state}"))
            }
        }
        Command::Name { world } => {
            let display_name = manager.world_name_by_name(world);
            if json {
                Ok(json!({ "world": world, "display_name": display_name }).to_string())
            } else {
                Ok(display_name)
            }
        }
        Command::Spawn { world } => {
            let loaded = server
                .world_by_name(world)
                .ok_or_else(|| anyhow!("World {world} is not loaded"))?;
            let spawn = manager.spawn_location(&loaded);

            if json {
                Ok(json!({ "world": world, "spawn": spawn }).to_string())
            } else {
                Ok(format!("{world}: {spawn}"))
            }
        }
    }
}
