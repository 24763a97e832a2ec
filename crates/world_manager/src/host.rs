//! Host server boundary.
//!
//! These traits are implemented by whatever embeds this crate (a real server
//! binding, or [`crate::memory`] for tests and tooling). All calls are cheap,
//! synchronous reads of host state.

use crate::multiverse::{current, legacy};
use crate::types::{World, WorldId};
use std::sync::Arc;

/// World source of the host server.
pub trait Server: Send + Sync {
    /// All currently loaded worlds, in host order. The first entry is the
    /// host's default world.
    fn worlds(&self) -> Vec<World>;

    /// Resolves a loaded world by id.
    fn world(&self, uid: WorldId) -> Option<World>;

    /// Resolves a loaded world by its native name.
    fn world_by_name(&self, name: &str) -> Option<World>;

    /// The host's plugin registry.
    fn plugin_manager(&self) -> &dyn PluginManager;
}

/// Plugin registry of the host server.
pub trait PluginManager: Send + Sync {
    /// Looks up a plugin by its declared name.
    fn plugin(&self, name: &str) -> Option<Arc<dyn Plugin>>;
}

/// A plugin as seen through the host's registry.
///
/// The two capability probes replace a runtime type check against the
/// collaborator's main class: a plugin only returns a handle for the API
/// generation it actually implements.
pub trait Plugin: Send + Sync {
    /// Name the plugin registers under, e.g. `"Multiverse-Core"`.
    fn name(&self) -> &str;

    /// Declared version string, e.g. `"4.3.16"` or `"5.0.2"`.
    fn version(&self) -> &str;

    /// Whether the host currently has this plugin enabled.
    fn is_enabled(&self) -> bool;

    /// Root object of the Multiverse-Core 4.x API, if this plugin is one.
    fn legacy_core(&self) -> Option<Arc<dyn legacy::MultiverseCore>> {
        None
    }

    /// Singleton accessor of the Multiverse-Core 5.x API, if this plugin is one.
    fn core_api(&self) -> Option<Arc<dyn current::CoreApiAccessor>> {
        None
    }
}

/// Read access to the owning plugin's configuration.
pub trait ConfigSource: Send + Sync {
    /// Reads a list of strings. Absent keys yield an empty list.
    fn string_list(&self, key: &str) -> Vec<String>;
}

/// Anything that lives in a world (players, mobs, ...).
pub trait Entity {
    /// Id of the world the entity is currently in.
    fn world(&self) -> WorldId;
}

/// Originator of a command.
#[derive(Clone, Copy)]
pub enum CommandSender<'a> {
    /// The server console
    Console,
    /// An in-world entity, usually a player
    Entity(&'a dyn Entity),
    /// Anything else (remote console, command blocks, ...)
    Other,
}
