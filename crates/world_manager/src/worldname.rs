//! Display names for worlds.
//!
//! A [`WorldNameRetriever`] maps a world to an optional display name using one
//! backend. [`resolve`] picks the retriever for the current collaborator state
//! and falls back to the native world name whenever the retriever comes back
//! empty or blank.

use crate::collaborator::Collaborator;
use crate::host::PluginManager;
use crate::multiverse::{current, legacy};
use crate::types::World;
use std::sync::Arc;

/// Strategy for obtaining a display name from one backend.
pub trait WorldNameRetriever {
    fn world_name(&self, world: &World) -> Option<String>;
}

/// Native host name.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultRetriever;

impl WorldNameRetriever for DefaultRetriever {
    fn world_name(&self, world: &World) -> Option<String> {
        Some(world.name.clone())
    }
}

/// Multiverse-Core 4.x alias.
pub struct Multiverse4Retriever {
    core: Arc<dyn legacy::MultiverseCore>,
}

impl Multiverse4Retriever {
    pub fn new(core: Arc<dyn legacy::MultiverseCore>) -> Self {
        Self { core }
    }
}

impl WorldNameRetriever for Multiverse4Retriever {
    fn world_name(&self, world: &World) -> Option<String> {
        legacy::lookup_world(self.core.as_ref(), world)?.alias()
    }
}

/// Multiverse-Core 5.x alias-or-name.
pub struct Multiverse5Retriever {
    api: Arc<dyn current::CoreApiAccessor>,
}

impl Multiverse5Retriever {
    pub fn new(api: Arc<dyn current::CoreApiAccessor>) -> Self {
        Self { api }
    }
}

impl WorldNameRetriever for Multiverse5Retriever {
    fn world_name(&self, world: &World) -> Option<String> {
        current::lookup_world(self.api.as_ref(), world).map(|mv_world| mv_world.alias_or_name())
    }
}

/// Resolves the user-facing name of `world`, preferring a Multiverse alias.
pub fn resolve(plugins: &dyn PluginManager, world: &World) -> String {
    Collaborator::detect(plugins)
        .name_retriever()
        .world_name(world)
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| world.name.clone())
}
