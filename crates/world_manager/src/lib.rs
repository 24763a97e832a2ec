//! # World Manager
//!
//! Runtime adapter between a game server plugin and the worlds the host has
//! loaded:
//!
//! - an **enabled-world registry** rebuilt on demand from the loaded worlds
//!   and an allow / deny list ([`WorldManager`]);
//! - **world name and spawn resolution** that prefers data from the optional
//!   Multiverse-Core plugin when a supported version is installed and
//!   enabled, and falls back to host-native data otherwise
//!   ([`Collaborator`], [`worldname`], [`spawn`]).
//!
//! The host itself is reached through the traits in [`host`]. [`memory`]
//! provides an in-memory host.
//!
//! ```rust
//! use std::sync::Arc;
//! use world_manager::memory::{InMemoryServer, MemoryMultiverse};
//! use world_manager::{World, WorldManager, WorldSettings};
//!
//! let world = World::new("world");
//! let nether = World::new("nether");
//! let server = Arc::new(InMemoryServer::with_worlds([world.clone(), nether.clone()]));
//!
//! let mv = MemoryMultiverse::current("5.0.2");
//! mv.set_alias(&world, "Overworld");
//! server.plugins().register(mv);
//!
//! let settings = WorldSettings {
//!     disabled_worlds: vec!["nether".to_string()],
//!     ..Default::default()
//! };
//! let manager = WorldManager::new(server, Arc::new(settings));
//!
//! assert!(manager.is_world_enabled(&world));
//! assert!(!manager.is_enabled_by_name("nether"));
//! assert_eq!(manager.world_name(&world), "Overworld");
//! ```

pub mod collaborator;
pub mod config;
pub mod error;
pub mod host;
pub mod memory;
pub mod multiverse;
pub mod registry;
pub mod spawn;
pub mod types;
pub mod worldname;

pub use collaborator::{ApiGeneration, Collaborator};
pub use config::{WorldSettings, DISABLED_WORLDS_KEY, ENABLED_WORLDS_KEY};
pub use error::{ConfigError, Result, WorldManagerError};
pub use host::{CommandSender, ConfigSource, Entity, Plugin, PluginManager, Server};
pub use registry::{WorldManager, CONSOLE_SENDER, UNKNOWN_WORLD};
pub use types::{Location, World, WorldId};
