//! Spawn locations for worlds, preferring the spawn Multiverse has on record.

use crate::collaborator::Collaborator;
use crate::host::PluginManager;
use crate::multiverse::{current, legacy};
use crate::types::{Location, World};
use std::sync::Arc;

pub trait SpawnLocationRetriever {
    fn spawn_location(&self, world: &World) -> Option<Location>;
}

/// Native host spawn.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultRetriever;

impl SpawnLocationRetriever for DefaultRetriever {
    fn spawn_location(&self, world: &World) -> Option<Location> {
        Some(world.spawn_location())
    }
}

pub struct Multiverse4Retriever {
    core: Arc<dyn legacy::MultiverseCore>,
}

impl Multiverse4Retriever {
    pub fn new(core: Arc<dyn legacy::MultiverseCore>) -> Self {
        Self { core }
    }
}

impl SpawnLocationRetriever for Multiverse4Retriever {
    fn spawn_location(&self, world: &World) -> Option<Location> {
        legacy::lookup_world(self.core.as_ref(), world)?.spawn_location()
    }
}

pub struct Multiverse5Retriever {
    api: Arc<dyn current::CoreApiAccessor>,
}

impl Multiverse5Retriever {
    pub fn new(api: Arc<dyn current::CoreApiAccessor>) -> Self {
        Self { api }
    }
}

impl SpawnLocationRetriever for Multiverse5Retriever {
    fn spawn_location(&self, world: &World) -> Option<Location> {
        current::lookup_world(self.api.as_ref(), world)?.spawn_location()
    }
}

/// Resolves the spawn location of `world`, falling back to the native spawn.
pub fn resolve(plugins: &dyn PluginManager, world: &World) -> Location {
    Collaborator::detect(plugins)
        .spawn_retriever()
        .spawn_location(world)
        .unwrap_or_else(|| world.spawn_location())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{InMemoryPluginManager, MemoryMultiverse};

    fn world() -> World {
        World::new("world").with_spawn(0.5, 64.0, 0.5)
    }

    #[test]
    fn test_default_spawn() {
        let world = world();
        let plugins = InMemoryPluginManager::new();

        assert_eq!(DefaultRetriever.spawn_location(&world), Some(world.spawn_location()));
        assert_eq!(resolve(&plugins, &world), world.spawn_location());
    }

    #[test]
    fn test_multiverse4_spawn() {
        let world = world();
        let custom = Location::new(world.uid, 100.0, 70.0, -40.0);
        let plugins = InMemoryPluginManager::new();
        let mv = MemoryMultiverse::legacy("4.3.16");
        mv.set_spawn(&world, custom);
        plugins.register(mv);

        assert_eq!(resolve(&plugins, &world), custom);
    }

    #[test]
    fn test_multiverse4_managed_world_without_spawn() {
        let world = world();
        let plugins = InMemoryPluginManager::new();
        let mv = MemoryMultiverse::legacy("4");
        mv.manage(&world);
        plugins.register(mv.clone());

        assert_eq!(
            Multiverse4Retriever::new(mv.legacy_handle()).spawn_location(&world),
            None
        );
        assert_eq!(resolve(&plugins, &world), world.spawn_location());
    }

    #[test]
    fn test_multiverse5_spawn() {
        let world = world();
        let custom = Location::new(world.uid, -12.0, 80.0, 9.0);
        let plugins = InMemoryPluginManager::new();
        let mv = MemoryMultiverse::current("5.0.2");
        mv.set_spawn(&world, custom);
        plugins.register(mv);

        assert_eq!(resolve(&plugins, &world), custom);
    }

    #[test]
    fn test_multiverse5_unmanaged_world() {
        let world = world();
        let other = World::new("other_world");
        let custom = Location::new(other.uid, 3.0, 90.0, 3.0);
        let plugins = InMemoryPluginManager::new();
        let mv = MemoryMultiverse::current("5.0.2");
        mv.set_spawn(&other, custom);
        plugins.register(mv.clone());

        assert_eq!(
            Multiverse5Retriever::new(mv.current_handle()).spawn_location(&world),
            None
        );
        assert_eq!(resolve(&plugins, &world), world.spawn_location());
        assert_eq!(resolve(&plugins, &other), custom);
    }

    #[test]
    fn test_multiverse5_uninitialized_api_falls_back() {
        let world = world();
        let plugins = InMemoryPluginManager::new();
        let mv = MemoryMultiverse::current("5.0.2");
        mv.set_spawn(&world, Location::new(world.uid, 1.0, 2.0, 3.0));
        mv.set_api_ready(false);
        plugins.register(mv);

        assert_eq!(resolve(&plugins, &world), world.spawn_location());
    }

    #[test]
    fn test_disabled_multiverse_spawn_ignored() {
        let world = world();
        let plugins = InMemoryPluginManager::new();
        let mv = MemoryMultiverse::current("5.0.2");
        mv.set_spawn(&world, Location::new(world.uid, 1.0, 2.0, 3.0));
        mv.set_enabled(false);
        plugins.register(mv);

        assert_eq!(resolve(&plugins, &world), world.spawn_location());
    }
}
