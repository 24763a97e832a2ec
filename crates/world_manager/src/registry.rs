//! Enabled-world registry.
//!
//! Tracks which loaded worlds the owning plugin operates in and answers
//! display-name / spawn queries for worlds, delegating those to the
//! collaborator-aware resolvers in [`crate::worldname`] and [`crate::spawn`].

use crate::collaborator::Collaborator;
use crate::config::{DISABLED_WORLDS_KEY, ENABLED_WORLDS_KEY};
use crate::error::{Result, WorldManagerError};
use crate::host::{CommandSender, ConfigSource, Entity, Server};
use crate::multiverse::PLUGIN_NAME;
use crate::types::{Location, World, WorldId};
use crate::{spawn, worldname};
use parking_lot::RwLock;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{info, warn};

/// Returned by name queries that cannot be tied to a loaded world.
pub const UNKNOWN_WORLD: &str = "\u{1F310}";
/// World name reported for the server console.
pub const CONSOLE_SENDER: &str = "console";

/// Registry of enabled worlds plus world name / spawn lookups.
///
/// The enabled set is derived entirely from host state and configuration; it
/// is rebuilt by [`WorldManager::reload`] and never persisted.
pub struct WorldManager {
    server: Arc<dyn Server>,
    config: Arc<dyn ConfigSource>,
    /// Enabled world ids. Replaced wholesale on reload.
    enabled: RwLock<HashSet<WorldId>>,
}

impl WorldManager {
    /// Creates the registry and populates it from the current host state.
    pub fn new(server: Arc<dyn Server>, config: Arc<dyn ConfigSource>) -> Self {
        if Collaborator::detect(server.plugin_manager()).is_available() {
            info!("{} detected.", PLUGIN_NAME);
        }

        let manager = Self {
            server,
            config,
            enabled: RwLock::new(HashSet::new()),
        };
        manager.reload();
        manager
    }

    /// Rebuilds the enabled set from loaded worlds and the allow / deny lists.
    ///
    /// The new set is assembled first and then swapped in, so concurrent
    /// readers see either the old or the new registry.
    pub fn reload(&self) {
        let worlds = self.server.worlds();

        if worlds.is_empty() {
            warn!("the server has no worlds.");
            *self.enabled.write() = HashSet::new();
            return;
        }

        let mut enabled = HashSet::new();
        let mut added = 0;
        let mut disabled = 0;

        let allowed = self.config.string_list(ENABLED_WORLDS_KEY);
        if allowed.is_empty() {
            for world in &worlds {
                if enabled.insert(world.uid) {
                    added += 1;
                }
            }
        } else {
            for name in &allowed {
                // names of worlds that aren't loaded are skipped
                if let Some(world) = self.server.world_by_name(name) {
                    if enabled.insert(world.uid) {
                        added += 1;
                    }
                }
            }
        }

        for name in self.config.string_list(DISABLED_WORLDS_KEY) {
            if let Some(world) = self.server.world_by_name(&name) {
                if enabled.remove(&world.uid) {
                    disabled += 1;
                }
            }
        }

        info!(
            "World registry reloaded: {} added, {} disabled, {} of {} worlds enabled",
            added,
            disabled,
            enabled.len(),
            worlds.len()
        );

        *self.enabled.write() = enabled;
    }

    /// Enabled worlds that are still loaded, in host order.
    pub fn enabled_worlds(&self) -> Vec<World> {
        let enabled = self.enabled.read();
        self.server
            .worlds()
            .into_iter()
            .filter(|w| enabled.contains(&w.uid))
            .collect()
    }

    /// Names of enabled worlds that are still loaded.
    pub fn enabled_world_names(&self) -> HashSet<String> {
        let enabled = self.enabled.read();
        enabled
            .iter()
            .filter_map(|uid| self.server.world(*uid))
            .map(|w| w.name)
            .collect()
    }

    /// Checks whether the world with id `uid` is in the registry.
    ///
    /// Reflects the registry as of the last [`WorldManager::reload`]; a world
    /// unloaded since then still reports `true` until the next reload.
    pub fn is_enabled(&self, uid: WorldId) -> bool {
        self.enabled.read().contains(&uid)
    }

    /// Checks whether `world` is in the registry.
    pub fn is_world_enabled(&self, world: &World) -> bool {
        self.is_enabled(world.uid)
    }

    /// Checks whether the loaded world named `name` is in the registry.
    ///
    /// Blank names and names of worlds that are not loaded are never enabled.
    pub fn is_enabled_by_name(&self, name: &str) -> bool {
        if name.trim().is_empty() {
            return false;
        }

        self.server
            .world_by_name(name)
            .is_some_and(|w| self.is_enabled(w.uid))
    }

    /// Number of ids currently in the registry.
    pub fn len(&self) -> usize {
        self.enabled.read().len()
    }

    /// Returns `true` when no world is enabled.
    pub fn is_empty(&self) -> bool {
        self.enabled.read().is_empty()
    }

    // ------------------------------------------------------------------------
    // World names
    // ------------------------------------------------------------------------

    /// Display name of `world`: its Multiverse alias if one is available,
    /// its native name otherwise.
    pub fn world_name(&self, world: &World) -> String {
        worldname::resolve(self.server.plugin_manager(), world)
    }

    /// Display name of the loaded world with id `uid`.
    ///
    /// # Returns
    ///
    /// The alias or native name, or [`UNKNOWN_WORLD`] when no loaded world
    /// has that id.
    pub fn world_name_by_id(&self, uid: WorldId) -> String {
        match self.server.world(uid) {
            Some(world) => self.world_name(&world),
            None => UNKNOWN_WORLD.to_string(),
        }
    }

    /// Display name for a native world name.
    ///
    /// Blank or unknown names yield [`UNKNOWN_WORLD`].
    pub fn world_name_by_name(&self, name: &str) -> String {
        if name.trim().is_empty() {
            return UNKNOWN_WORLD.to_string();
        }

        match self.server.world_by_name(name) {
            Some(world) => self.world_name(&world),
            None => UNKNOWN_WORLD.to_string(),
        }
    }

    /// Display name of the world a command sender is in.
    ///
    /// The console has no world and gets [`CONSOLE_SENDER`]. Senders that are
    /// not entities are placed in the host's default world.
    pub fn world_name_for_sender(&self, sender: &CommandSender<'_>) -> String {
        let worlds = self.server.worlds();

        let Some(default_world) = worlds.first() else {
            warn!("The server has no enabled worlds.");
            return CONSOLE_SENDER.to_string();
        };

        match sender {
            CommandSender::Console => CONSOLE_SENDER.to_string(),
            CommandSender::Entity(entity) => self.world_name_by_id(entity.world()),
            CommandSender::Other => self.world_name(default_world),
        }
    }

    /// Display name of the world a location is in.
    ///
    /// # Arguments
    ///
    /// * `location` - Location to resolve. One without a world reference is
    ///   placed in the host's default world.
    ///
    /// # Returns
    ///
    /// The display name, or [`UNKNOWN_WORLD`] when the referenced world is no
    /// longer loaded or the host has no worlds at all.
    pub fn world_name_at(&self, location: &Location) -> String {
        if let Some(uid) = location.world {
            return self.world_name_by_id(uid);
        }

        match self.server.worlds().first() {
            Some(world) => self.world_name(world),
            None => {
                warn!("The server has no worlds to resolve a location against.");
                UNKNOWN_WORLD.to_string()
            }
        }
    }

    // ------------------------------------------------------------------------
    // Spawn locations
    // ------------------------------------------------------------------------

    /// Spawn location of `world`, preferring the one Multiverse has on record.
    pub fn spawn_location(&self, world: &World) -> Location {
        spawn::resolve(self.server.plugin_manager(), world)
    }

    /// Spawn location of the world an entity is in.
    ///
    /// # Errors
    ///
    /// Returns [`WorldManagerError::WorldNotLoaded`] if the entity's world is
    /// no longer loaded on the host.
    pub fn spawn_location_of(&self, entity: &dyn Entity) -> Result<Location> {
        let uid = entity.world();
        let world = self
            .server
            .world(uid)
            .ok_or(WorldManagerError::WorldNotLoaded(uid))?;

        Ok(self.spawn_location(&world))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{InMemoryConfig, InMemoryServer, MemoryMultiverse};

    struct Player {
        world: WorldId,
    }

    impl Entity for Player {
        fn world(&self) -> WorldId {
            self.world
        }
    }

    fn setup(names: &[&str]) -> (Arc<InMemoryServer>, Arc<InMemoryConfig>, Vec<World>) {
        let worlds: Vec<World> = names.iter().map(|name| World::new(*name)).collect();
        let server = Arc::new(InMemoryServer::with_worlds(worlds.clone()));
        let config = Arc::new(InMemoryConfig::new());
        (server, config, worlds)
    }

    fn names(values: &[&str]) -> HashSet<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_new_populates_registry() {
        let (server, config, worlds) = setup(&["world", "nether", "the_end"]);
        let manager = WorldManager::new(server, config);

        assert_eq!(manager.len(), 3);
        assert!(worlds.iter().all(|w| manager.is_world_enabled(w)));
    }

    #[test]
    fn test_reload_deny_list_only() {
        let (server, config, _) = setup(&["world", "nether", "the_end"]);
        config.set_list(DISABLED_WORLDS_KEY, ["nether"]);
        let manager = WorldManager::new(server, config);

        assert_eq!(manager.enabled_world_names(), names(&["world", "the_end"]));
    }

    #[test]
    fn test_reload_allow_list() {
        let (server, config, worlds) = setup(&["world", "nether"]);
        config.set_list(ENABLED_WORLDS_KEY, ["world", "not_loaded"]);
        let manager = WorldManager::new(server, config);

        assert_eq!(manager.enabled_world_names(), names(&["world"]));
        assert!(!manager.is_enabled_by_name("nether"));
        assert!(!manager.is_enabled_by_name("not_loaded"));
        assert!(!manager.is_enabled(worlds[1].uid));
    }

    #[test]
    fn test_deny_list_beats_allow_list() {
        let (server, config, _) = setup(&["world", "nether"]);
        config.set_list(ENABLED_WORLDS_KEY, ["world", "nether"]);
        config.set_list(DISABLED_WORLDS_KEY, ["nether", "unknown"]);
        let manager = WorldManager::new(server, config);

        assert_eq!(manager.enabled_world_names(), names(&["world"]));
    }

    #[test]
    fn test_reload_without_worlds() {
        let (server, config, _) = setup(&[]);
        config.set_list(ENABLED_WORLDS_KEY, ["world"]);
        let manager = WorldManager::new(server, config);

        assert!(manager.is_empty());
        assert!(manager.enabled_world_names().is_empty());
    }

    #[test]
    fn test_reload_picks_up_changes() {
        let (server, config, worlds) = setup(&["world", "nether"]);
        let manager = WorldManager::new(server.clone(), config.clone());
        assert_eq!(manager.len(), 2);

        config.set_list(DISABLED_WORLDS_KEY, ["world"]);
        assert!(manager.is_enabled(worlds[0].uid), "registry only changes on reload");

        manager.reload();
        assert!(!manager.is_enabled(worlds[0].uid));

        server.remove_world(worlds[1].uid);
        manager.reload();
        assert!(manager.is_empty());
    }

    #[test]
    fn test_unloaded_world_skipped_in_names() {
        let (server, config, worlds) = setup(&["world", "nether"]);
        let manager = WorldManager::new(server.clone(), config);

        server.remove_world(worlds[1].uid);

        // stale id stays until the next reload but is not reported
        assert_eq!(manager.len(), 2);
        assert_eq!(manager.enabled_world_names(), names(&["world"]));
        assert_eq!(manager.enabled_worlds(), vec![worlds[0].clone()]);
    }

    #[test]
    fn test_is_enabled_blank_name() {
        let (server, config, _) = setup(&["world"]);
        let manager = WorldManager::new(server, config);

        assert!(!manager.is_enabled_by_name(""));
        assert!(!manager.is_enabled_by_name("   "));
        assert!(manager.is_enabled_by_name("world"));
        assert!(!manager.is_enabled(WorldId::new()));
    }

    #[test]
    fn test_world_name_lookups() {
        let (server, config, worlds) = setup(&["world", "nether"]);
        let mv = MemoryMultiverse::legacy("4.3.16");
        mv.set_alias(&worlds[1], "The Nether");
        server.plugins().register(mv);
        let manager = WorldManager::new(server, config);

        assert_eq!(manager.world_name(&worlds[0]), "world");
        assert_eq!(manager.world_name(&worlds[1]), "The Nether");
        assert_eq!(manager.world_name_by_id(worlds[1].uid), "The Nether");
        assert_eq!(manager.world_name_by_id(WorldId::new()), UNKNOWN_WORLD);
        assert_eq!(manager.world_name_by_name("nether"), "The Nether");
        assert_eq!(manager.world_name_by_name("missing"), UNKNOWN_WORLD);
        assert_eq!(manager.world_name_by_name(" "), UNKNOWN_WORLD);
    }

    #[test]
    fn test_world_name_for_sender() {
        let (server, config, worlds) = setup(&["world", "nether"]);
        let manager = WorldManager::new(server, config);
        let player = Player { world: worlds[1].uid };
        let lost = Player { world: WorldId::new() };

        assert_eq!(manager.world_name_for_sender(&CommandSender::Console), CONSOLE_SENDER);
        assert_eq!(manager.world_name_for_sender(&CommandSender::Entity(&player)), "nether");
        assert_eq!(manager.world_name_for_sender(&CommandSender::Entity(&lost)), UNKNOWN_WORLD);
        assert_eq!(manager.world_name_for_sender(&CommandSender::Other), "world");
    }

    #[test]
    fn test_world_name_for_sender_without_worlds() {
        let (server, config, _) = setup(&[]);
        let manager = WorldManager::new(server, config);
        let player = Player { world: WorldId::new() };

        assert_eq!(manager.world_name_for_sender(&CommandSender::Entity(&player)), CONSOLE_SENDER);
        assert_eq!(manager.world_name_for_sender(&CommandSender::Other), CONSOLE_SENDER);
    }

    #[test]
    fn test_world_name_at_location() {
        let (server, config, worlds) = setup(&["world", "nether"]);
        let manager = WorldManager::new(server, config);

        let in_nether = Location::new(worlds[1].uid, 1.0, 2.0, 3.0);
        assert_eq!(manager.world_name_at(&in_nether), "nether");

        let detached = Location::detached(1.0, 2.0, 3.0);
        assert_eq!(manager.world_name_at(&detached), "world");

        let stale = Location::new(WorldId::new(), 1.0, 2.0, 3.0);
        assert_eq!(manager.world_name_at(&stale), UNKNOWN_WORLD);

        let (empty_server, empty_config, _) = setup(&[]);
        let empty = WorldManager::new(empty_server, empty_config);
        assert_eq!(empty.world_name_at(&detached), UNKNOWN_WORLD);
    }

    #[test]
    fn test_location_and_sender_in_unloaded_world() {
        let (server, config, worlds) = setup(&["world", "nether"]);
        let manager = WorldManager::new(server.clone(), config);
        let in_nether = Location::new(worlds[1].uid, 0.0, 64.0, 0.0);
        let player = Player { world: worlds[1].uid };

        server.remove_world(worlds[1].uid);

        assert_eq!(manager.world_name_at(&in_nether), UNKNOWN_WORLD);
        assert_eq!(
            manager.world_name_for_sender(&CommandSender::Entity(&player)),
            UNKNOWN_WORLD
        );
        assert_eq!(manager.world_name_at(&Location::detached(0.0, 0.0, 0.0)), "world");
    }

    #[test]
    fn test_reload_counts_duplicates_once() {
        let (server, config, _) = setup(&["world", "nether"]);
        config.set_list(ENABLED_WORLDS_KEY, ["world", "world", "nether"]);
        config.set_list(DISABLED_WORLDS_KEY, ["nether", "nether"]);
        let manager = WorldManager::new(server, config);

        assert_eq!(manager.len(), 1);
        assert_eq!(manager.enabled_world_names(), names(&["world"]));
    }

    #[test]
    fn test_spawn_location_of_entity() {
        let (server, config, worlds) = setup(&["world"]);
        let manager = WorldManager::new(server, config);

        let player = Player { world: worlds[0].uid };
        assert_eq!(
            manager.spawn_location_of(&player).unwrap(),
            worlds[0].spawn_location()
        );

        let lost = Player { world: WorldId::new() };
        assert!(matches!(
            manager.spawn_location_of(&lost),
            Err(WorldManagerError::WorldNotLoaded(uid)) if uid == lost.world
        ));
    }

    #[test]
    fn test_spawn_location_prefers_multiverse() {
        let (server, config, worlds) = setup(&["world"]);
        let custom = Location::new(worlds[0].uid, 8.0, 72.0, 8.0);
        let mv = MemoryMultiverse::current("5.0.2");
        mv.set_spawn(&worlds[0], custom);
        server.plugins().register(mv.clone());
        let manager = WorldManager::new(server, config);

        assert_eq!(manager.spawn_location(&worlds[0]), custom);

        mv.set_api_ready(false);
        assert_eq!(manager.spawn_location(&worlds[0]), worlds[0].spawn_location());
    }
}
