//! Multiverse-Core 5.x API.
//!
//! Reached through a process-wide accessor that fails while the API has not
//! been initialized (or after it was torn down). Lookups return Multiverse's
//! own [`MvOption`] type, which is converted to `std::option::Option` in
//! [`lookup_world`] and nowhere else.

use crate::types::{Location, World};
use std::sync::Arc;
use thiserror::Error;
use tracing::warn;

/// Failure of the API singleton accessor.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    #[error("Multiverse-Core API has not been initialized")]
    NotInitialized,

    #[error("Multiverse-Core API unavailable: {0}")]
    Unavailable(String),
}

/// Option type exposed by the 5.x API.
#[derive(Debug, Clone)]
pub enum MvOption<T> {
    Some(T),
    None,
}

impl<T> MvOption<T> {
    pub fn into_option(self) -> Option<T> {
        match self {
            MvOption::Some(value) => Some(value),
            MvOption::None => None,
        }
    }
}

impl<T> From<Option<T>> for MvOption<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => MvOption::Some(value),
            None => MvOption::None,
        }
    }
}

/// The singleton accessor (`MultiverseCoreApi.get()` on the Multiverse side).
pub trait CoreApiAccessor: Send + Sync {
    fn get(&self) -> Result<Arc<dyn CoreApi>, ApiError>;
}

pub trait CoreApi: Send + Sync {
    fn world_manager(&self) -> Option<Arc<dyn MvWorldManager>>;
}

pub trait MvWorldManager: Send + Sync {
    fn get_world(&self, world: &World) -> MvOption<Arc<dyn MultiverseWorld>>;
}

pub trait MultiverseWorld: Send + Sync {
    /// The alias if one is set, the native name otherwise.
    fn alias_or_name(&self) -> String;
    fn spawn_location(&self) -> Option<Location>;
}

/// Walks accessor -> API -> manager -> per-world wrapper.
///
/// Accessor failure is logged and reported as `None`, like every other
/// missing link.
pub fn lookup_world(
    accessor: &dyn CoreApiAccessor,
    world: &World,
) -> Option<Arc<dyn MultiverseWorld>> {
    let api = match accessor.get() {
        Ok(api) => api,
        Err(e) => {
            warn!(
                "{} threw an exception while trying to get an instance of its api: {}",
                super::PLUGIN_NAME,
                e
            );
            return None;
        }
    };

    api.world_manager()?.get_world(world).into_option()
}
