//! # Core Type Definitions
//!
//! Value objects handed to us by the host server. The host owns their
//! lifecycle; this crate only reads them.
//!
//! - [`WorldId`] - Unique identifier for a loaded world
//! - [`Location`] - A world reference plus three coordinates
//! - [`World`] - Snapshot of a loaded world (id, name, native spawn)

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a world on the host server.
///
/// Stable for the lifetime of the world instance. This is the primary key of
/// the enabled-world registry.
///
/// # Examples
///
/// ```rust
/// use world_manager::WorldId;
///
/// let id = WorldId::new();
/// let parsed: WorldId = id.to_string().parse().unwrap();
/// assert_eq!(id, parsed);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorldId(pub Uuid);

impl WorldId {
    /// Creates a new random world ID using UUID v4.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::str::FromStr for WorldId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

impl Default for WorldId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for WorldId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A position inside a world.
///
/// The world reference is optional: the host may hand out locations whose
/// world has been unloaded or was never set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// World this location belongs to, if any
    pub world: Option<WorldId>,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Location {
    /// Creates a location bound to `world`.
    pub fn new(world: WorldId, x: f64, y: f64, z: f64) -> Self {
        Self {
            world: Some(world),
            x,
            y,
            z,
        }
    }

    /// Creates a location with no world reference.
    pub fn detached(x: f64, y: f64, z: f64) -> Self {
        Self {
            world: None,
            x,
            y,
            z,
        }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.1}, {:.1}, {:.1})", self.x, self.y, self.z)
    }
}

/// Snapshot of a world loaded on the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct World {
    pub uid: WorldId,
    /// Native (host) name, unique among loaded worlds
    pub name: String,
    /// Native spawn point
    pub spawn: Location,
}

impl World {
    /// Creates a world with a fresh id and its spawn at the origin.
    pub fn new(name: impl Into<String>) -> Self {
        let uid = WorldId::new();
        Self {
            uid,
            name: name.into(),
            spawn: Location::new(uid, 0.0, 0.0, 0.0),
        }
    }

    /// Replaces the id, rebinding the spawn point to it.
    pub fn with_uid(mut self, uid: WorldId) -> Self {
        self.uid = uid;
        self.spawn.world = Some(uid);
        self
    }

    pub fn with_spawn(mut self, x: f64, y: f64, z: f64) -> Self {
        self.spawn = Location::new(self.uid, x, y, z);
        self
    }

    /// The host-native spawn location, always bound to this world.
    pub fn spawn_location(&self) -> Location {
        Location {
            world: Some(self.uid),
            ..self.spawn
        }
    }
}
