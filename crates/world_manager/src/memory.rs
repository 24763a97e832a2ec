//! In-memory host implementation.
//!
//! Backs the `worldctl` tool and the test suites. Every piece of state sits
//! behind a lock so a single instance can be shared and mutated while a
//! [`crate::WorldManager`] is reading from it.

use crate::collaborator::ApiGeneration;
use crate::error::{Result, WorldManagerError};
use crate::host::{ConfigSource, Plugin, PluginManager, Server};
use crate::multiverse::{current, legacy, PLUGIN_NAME};
use crate::types::{Location, World, WorldId};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

// ============================================================================
// Server
// ============================================================================

/// Host server with a mutable list of loaded worlds.
#[derive(Default)]
pub struct InMemoryServer {
    worlds: RwLock<Vec<World>>,
    plugins: InMemoryPluginManager,
}

impl InMemoryServer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_worlds(worlds: impl IntoIterator<Item = World>) -> Self {
        let server = Self::new();
        for world in worlds {
            server.add_world(world);
        }
        server
    }

    /// Loads a world. A world with the same id or name is replaced in place.
    pub fn add_world(&self, world: World) {
        let mut worlds = self.worlds.write();
        match worlds
            .iter_mut()
            .find(|w| w.uid == world.uid || w.name == world.name)
        {
            Some(existing) => *existing = world,
            None => worlds.push(world),
        }
    }

    /// Unloads a world.
    pub fn remove_world(&self, uid: WorldId) -> Option<World> {
        let mut worlds = self.worlds.write();
        let index = worlds.iter().position(|w| w.uid == uid)?;
        Some(worlds.remove(index))
    }

    pub fn update_world_spawn(&self, uid: WorldId, x: f64, y: f64, z: f64) -> Result<()> {
        let mut worlds = self.worlds.write();
        match worlds.iter_mut().find(|w| w.uid == uid) {
            Some(world) => {
                world.spawn = Location::new(uid, x, y, z);
                Ok(())
            }
            None => Err(WorldManagerError::WorldNotLoaded(uid)),
        }
    }

    pub fn plugins(&self) -> &InMemoryPluginManager {
        &self.plugins
    }
}

impl Server for InMemoryServer {
    fn worlds(&self) -> Vec<World> {
        self.worlds.read().clone()
    }

    fn world(&self, uid: WorldId) -> Option<World> {
        self.worlds.read().iter().find(|w| w.uid == uid).cloned()
    }

    fn world_by_name(&self, name: &str) -> Option<World> {
        self.worlds.read().iter().find(|w| w.name == name).cloned()
    }

    fn plugin_manager(&self) -> &dyn PluginManager {
        &self.plugins
    }
}

// ============================================================================
// Plugins
// ============================================================================

#[derive(Default)]
pub struct InMemoryPluginManager {
    plugins: RwLock<HashMap<String, Arc<dyn Plugin>>>,
}

impl InMemoryPluginManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a plugin under its declared name, replacing any previous one.
    pub fn register<P: Plugin + 'static>(&self, plugin: P) {
        let name = plugin.name().to_string();
        self.plugins.write().insert(name, Arc::new(plugin));
    }

    pub fn unregister(&self, name: &str) -> Option<Arc<dyn Plugin>> {
        self.plugins.write().remove(name)
    }
}

impl PluginManager for InMemoryPluginManager {
    fn plugin(&self, name: &str) -> Option<Arc<dyn Plugin>> {
        self.plugins.read().get(name).cloned()
    }
}

/// A plugin with no API surface, only name / version / enabled state.
#[derive(Clone)]
pub struct InMemoryPlugin {
    name: String,
    version: String,
    enabled: Arc<AtomicBool>,
}

impl InMemoryPlugin {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            enabled: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::SeqCst);
    }
}

impl Plugin for InMemoryPlugin {
    fn name(&self) -> &str {
        &self.name
    }

    fn version(&self) -> &str {
        &self.version
    }

    fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }
}

// ============================================================================
// Configuration
// ============================================================================

/// Mutable string-list configuration.
#[derive(Default)]
pub struct InMemoryConfig {
    lists: RwLock<HashMap<String, Vec<String>>>,
}

impl InMemoryConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_list<I, S>(&self, key: &str, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values = values.into_iter().map(Into::into).collect();
        self.lists.write().insert(key.to_string(), values);
    }

    pub fn remove(&self, key: &str) {
        self.lists.write().remove(key);
    }
}

impl ConfigSource for InMemoryConfig {
    fn string_list(&self, key: &str) -> Vec<String> {
        self.lists.read().get(key).cloned().unwrap_or_default()
    }
}

// ============================================================================
// Multiverse-Core
// ============================================================================

#[derive(Debug, Clone)]
struct MvWorldData {
    name: String,
    alias: Option<String>,
    spawn: Option<Location>,
}

impl legacy::MultiverseWorld for MvWorldData {
    fn alias(&self) -> Option<String> {
        self.alias.clone()
    }

    fn spawn_location(&self) -> Option<Location> {
        self.spawn
    }
}

impl current::MultiverseWorld for MvWorldData {
    fn alias_or_name(&self) -> String {
        match &self.alias {
            Some(alias) if !alias.trim().is_empty() => alias.clone(),
            _ => self.name.clone(),
        }
    }

    fn spawn_location(&self) -> Option<Location> {
        self.spawn
    }
}

struct MultiverseState {
    enabled: AtomicBool,
    api_ready: AtomicBool,
    manager_available: AtomicBool,
    worlds: RwLock<HashMap<WorldId, MvWorldData>>,
}

impl MultiverseState {
    fn lookup(&self, world: &World) -> Option<MvWorldData> {
        self.worlds.read().get(&world.uid).cloned()
    }

    fn manager_available(&self) -> bool {
        self.manager_available.load(Ordering::SeqCst)
    }
}

/// Multiverse-Core stand-in speaking exactly one API generation.
///
/// Clones share state, so a clone kept by the caller can toggle the copy
/// registered with a plugin manager.
#[derive(Clone)]
pub struct MemoryMultiverse {
    version: String,
    generation: ApiGeneration,
    state: Arc<MultiverseState>,
}

impl MemoryMultiverse {
    /// A Multiverse-Core exposing the 4.x API.
    pub fn legacy(version: impl Into<String>) -> Self {
        Self::with_generation(version, ApiGeneration::Legacy)
    }

    /// A Multiverse-Core exposing the 5.x API.
    pub fn current(version: impl Into<String>) -> Self {
        Self::with_generation(version, ApiGeneration::Current)
    }

    pub fn with_generation(version: impl Into<String>, generation: ApiGeneration) -> Self {
        Self {
            version: version.into(),
            generation,
            state: Arc::new(MultiverseState {
                enabled: AtomicBool::new(true),
                api_ready: AtomicBool::new(true),
                manager_available: AtomicBool::new(true),
                worlds: RwLock::new(HashMap::new()),
            }),
        }
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.state.enabled.store(enabled, Ordering::SeqCst);
    }

    /// Controls whether the 5.x singleton accessor succeeds.
    pub fn set_api_ready(&self, ready: bool) {
        self.state.api_ready.store(ready, Ordering::SeqCst);
    }

    /// Controls whether the world manager is handed out.
    pub fn set_manager_available(&self, available: bool) {
        self.state.manager_available.store(available, Ordering::SeqCst);
    }

    /// Starts managing `world` with no alias and no custom spawn.
    pub fn manage(&self, world: &World) {
        self.state
            .worlds
            .write()
            .entry(world.uid)
            .or_insert_with(|| MvWorldData {
                name: world.name.clone(),
                alias: None,
                spawn: None,
            });
    }

    pub fn unmanage(&self, world: &World) {
        self.state.worlds.write().remove(&world.uid);
    }

    pub fn set_alias(&self, world: &World, alias: impl Into<String>) {
        self.manage(world);
        if let Some(data) = self.state.worlds.write().get_mut(&world.uid) {
            data.alias = Some(alias.into());
        }
    }

    pub fn set_spawn(&self, world: &World, spawn: Location) {
        self.manage(world);
        if let Some(data) = self.state.worlds.write().get_mut(&world.uid) {
            data.spawn = Some(spawn);
        }
    }

    /// 4.x root object, regardless of the generation this plugin advertises.
    pub fn legacy_handle(&self) -> Arc<dyn legacy::MultiverseCore> {
        Arc::new(LegacyCore(self.state.clone()))
    }

    /// 5.x accessor, regardless of the generation this plugin advertises.
    pub fn current_handle(&self) -> Arc<dyn current::CoreApiAccessor> {
        Arc::new(CurrentAccessor(self.state.clone()))
    }
}

impl Plugin for MemoryMultiverse {
    fn name(&self) -> &str {
        PLUGIN_NAME
    }

    fn version(&self) -> &str {
        &self.version
    }

    fn is_enabled(&self) -> bool {
        self.state.enabled.load(Ordering::SeqCst)
    }

    fn legacy_core(&self) -> Option<Arc<dyn legacy::MultiverseCore>> {
        (self.generation == ApiGeneration::Legacy).then(|| self.legacy_handle())
    }

    fn core_api(&self) -> Option<Arc<dyn current::CoreApiAccessor>> {
        (self.generation == ApiGeneration::Current).then(|| self.current_handle())
    }
}

struct LegacyCore(Arc<MultiverseState>);

impl legacy::MultiverseCore for LegacyCore {
    fn world_manager(&self) -> Option<Arc<dyn legacy::MvWorldManager>> {
        if !self.0.manager_available() {
            return None;
        }
        Some(Arc::new(LegacyWorldManager(self.0.clone())))
    }
}

struct LegacyWorldManager(Arc<MultiverseState>);

impl legacy::MvWorldManager for LegacyWorldManager {
    fn mv_world(&self, world: &World) -> Option<Arc<dyn legacy::MultiverseWorld>> {
        let data = self.0.lookup(world)?;
        Some(Arc::new(data))
    }
}

struct CurrentAccessor(Arc<MultiverseState>);

impl current::CoreApiAccessor for CurrentAccessor {
    fn get(&self) -> std::result::Result<Arc<dyn current::CoreApi>, current::ApiError> {
        if !self.0.api_ready.load(Ordering::SeqCst) {
            return Err(current::ApiError::NotInitialized);
        }
        Ok(Arc::new(CurrentApi(self.0.clone())))
    }
}

struct CurrentApi(Arc<MultiverseState>);

impl current::CoreApi for CurrentApi {
    fn world_manager(&self) -> Option<Arc<dyn current::MvWorldManager>> {
        if !self.0.manager_available() {
            return None;
        }
        Some(Arc::new(CurrentWorldManager(self.0.clone())))
    }
}

struct CurrentWorldManager(Arc<MultiverseState>);

impl current::MvWorldManager for CurrentWorldManager {
    fn get_world(&self, world: &World) -> current::MvOption<Arc<dyn current::MultiverseWorld>> {
        self.0
            .lookup(world)
            .map(|data| Arc::new(data) as Arc<dyn current::MultiverseWorld>)
            .into()
    }
}
