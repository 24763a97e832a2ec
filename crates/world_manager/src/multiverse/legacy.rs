//! Multiverse-Core 4.x API: direct object references from the plugin's main
//! class down to per-world wrappers.

use crate::types::{Location, World};
use std::sync::Arc;

/// Main plugin object of Multiverse-Core 4.x.
pub trait MultiverseCore: Send + Sync {
    /// `None` while the plugin has not finished enabling.
    fn world_manager(&self) -> Option<Arc<dyn MvWorldManager>>;
}

pub trait MvWorldManager: Send + Sync {
    /// Per-world wrapper, `None` for worlds Multiverse does not manage.
    fn mv_world(&self, world: &World) -> Option<Arc<dyn MultiverseWorld>>;
}

pub trait MultiverseWorld: Send + Sync {
    fn alias(&self) -> Option<String>;
    fn spawn_location(&self) -> Option<Location>;
}

/// Walks core -> manager -> per-world wrapper, yielding `None` as soon as
/// any link is missing.
pub fn lookup_world(
    core: &dyn MultiverseCore,
    world: &World,
) -> Option<Arc<dyn MultiverseWorld>> {
    core.world_manager()?.mv_world(world)
}
