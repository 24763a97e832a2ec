//! Configuration management for worldctl.
//!
//! A single TOML file describes the world allow / deny lists, logging, and a
//! snapshot of the host: its loaded worlds and, optionally, an installed
//! Multiverse-Core with its aliases and custom spawns.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{info, warn};
use world_manager::memory::{InMemoryPlugin, InMemoryServer, MemoryMultiverse};
use world_manager::multiverse::PLUGIN_NAME;
use world_manager::{ApiGeneration, Location, Server, World, WorldId, WorldSettings};

use crate::cli::Args;

fn default_true() -> bool {
    true
}

/// Application configuration loaded from TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub logging: LoggingSettings,
    /// Allow / deny lists for the enabled-world registry
    #[serde(default)]
    pub worlds: WorldSettings,
    #[serde(default)]
    pub server: ServerSettings,
    /// Installed Multiverse-Core, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multiverse: Option<MultiverseSettings>,
}

/// Logging system configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Log level filter (trace, debug, info, warn, error)
    pub level: String,
    /// Whether to output logs in JSON format
    #[serde(default)]
    pub json_format: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
        }
    }
}

/// Worlds loaded on the host, in host order. The first is the default world.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default)]
    pub worlds: Vec<WorldEntry>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            worlds: ["world", "world_nether", "world_the_end"]
                .into_iter()
                .map(WorldEntry::named)
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldEntry {
    pub name: String,
    /// Fixed id; a random one is assigned when omitted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<WorldId>,
    #[serde(default)]
    pub spawn: [f64; 3],
}

impl WorldEntry {
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            uid: None,
            spawn: [0.0, 64.0, 0.0],
        }
    }

    fn to_world(&self) -> World {
        let world = World::new(&self.name);
        let world = match self.uid {
            Some(uid) => world.with_uid(uid),
            None => world,
        };
        let [x, y, z] = self.spawn;
        world.with_spawn(x, y, z)
    }
}

/// Snapshot of an installed Multiverse-Core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MultiverseSettings {
    /// Declared plugin version; its major component selects the API generation
    pub version: String,
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Whether the 5.x API accessor is initialized
    #[serde(default = "default_true")]
    pub api_ready: bool,
    /// World name -> alias
    #[serde(default)]
    pub aliases: BTreeMap<String, String>,
    /// World name -> custom spawn
    #[serde(default)]
    pub spawns: BTreeMap<String, [f64; 3]>,
}

impl MultiverseSettings {
    /// Registers the plugin with `server`. Aliases and spawns for worlds the
    /// server doesn't have are skipped with a warning.
    fn install(&self, server: &InMemoryServer) {
        let Some(generation) = ApiGeneration::from_version(&self.version) else {
            let plugin = InMemoryPlugin::new(PLUGIN_NAME, &self.version);
            plugin.set_enabled(self.enabled);
            server.plugins().register(plugin);
            return;
        };

        let plugin = MemoryMultiverse::with_generation(&self.version, generation);
        plugin.set_enabled(self.enabled);
        plugin.set_api_ready(self.api_ready);

        for (name, alias) in &self.aliases {
            match server.world_by_name(name) {
                Some(world) => plugin.set_alias(&world, alias),
                None => warn!("Ignoring alias for unknown world {}", name),
            }
        }

        for (name, [x, y, z]) in &self.spawns {
            match server.world_by_name(name) {
                Some(world) => plugin.set_spawn(&world, Location::new(world.uid, *x, *y, *z)),
                None => warn!("Ignoring spawn for unknown world {}", name),
            }
        }

        server.plugins().register(plugin);
    }
}

impl AppConfig {
    /// Loads configuration from a TOML file.
    ///
    /// If the file doesn't exist, writes the default configuration to `path`
    /// and returns it.
    pub async fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            let content = tokio::fs::read_to_string(path).await?;
            let config: AppConfig = toml::from_str(&content)?;
            Ok(config)
        } else {
            let default_config = AppConfig::default();
            let toml_content = toml::to_string_pretty(&default_config)?;
            tokio::fs::write(path, toml_content).await?;
            info!("Created default configuration file: {}", path.display());
            Ok(default_config)
        }
    }

    pub fn apply_overrides(&mut self, args: &Args) {
        if let Some(level) = &args.log_level {
            self.logging.level = level.clone();
        }

        if args.json_logs {
            self.logging.json_format = true;
        }
    }

    /// Validates the configuration for consistency and correctness.
    pub fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(format!(
                "Invalid log level: {}. Must be one of: {valid_levels:?}",
                &self.logging.level
            ));
        }

        self.worlds.validate().map_err(|e| e.to_string())?;

        let mut seen = std::collections::HashSet::new();
        for entry in &self.server.worlds {
            if entry.name.trim().is_empty() {
                return Err("World name cannot be empty".to_string());
            }
            if !seen.insert(entry.name.as_str()) {
                return Err(format!("Duplicate world name: {}", entry.name));
            }
        }

        if let Some(mv) = &self.multiverse {
            if mv.version.trim().is_empty() {
                return Err("Multiverse version cannot be empty".to_string());
            }
        }

        Ok(())
    }

    /// Builds the in-memory host described by this configuration.
    pub fn build_server(&self) -> InMemoryServer {
        let server = InMemoryServer::with_worlds(self.server.worlds.iter().map(WorldEntry::to_world));

        if let Some(mv) = &self.multiverse {
            mv.install(&server);
        }

        server
    }
}
