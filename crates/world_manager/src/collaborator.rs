//! Detection of the optional Multiverse-Core collaborator.
//!
//! [`Collaborator::detect`] is the only place that looks at the plugin
//! registry or at version strings. Everything downstream matches on the
//! resulting variant. Detection is cheap and is redone for every query so a
//! collaborator that is enabled, disabled or reloaded at runtime is picked up
//! immediately.

use crate::host::PluginManager;
use crate::multiverse::{current, legacy, PLUGIN_NAME};
use crate::spawn::{self, SpawnLocationRetriever};
use crate::worldname::{self, WorldNameRetriever};
use std::sync::Arc;
use tracing::debug;

/// Multiverse API generations this crate knows how to talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiGeneration {
    /// 4.x
    Legacy,
    /// 5.x
    Current,
}

impl ApiGeneration {
    /// Maps a declared version string to an API generation by its major
    /// component. `"4"`, `"4.3.16"` and `"4-SNAPSHOT"` are all legacy;
    /// `"40.1"` is not.
    pub fn from_version(version: &str) -> Option<Self> {
        let major: String = version
            .trim()
            .chars()
            .take_while(|c| c.is_ascii_digit())
            .collect();

        match major.parse::<u32>().ok()? {
            4 => Some(ApiGeneration::Legacy),
            5 => Some(ApiGeneration::Current),
            _ => None,
        }
    }
}

/// Collaborator state observed at query time.
#[derive(Clone)]
pub enum Collaborator {
    /// Not installed, or installed with an API generation we don't support
    Absent,
    /// Installed but not enabled
    Disabled,
    Legacy(Arc<dyn legacy::MultiverseCore>),
    Current(Arc<dyn current::CoreApiAccessor>),
}

impl Collaborator {
    /// Inspects the host's plugin registry for Multiverse-Core.
    ///
    /// # Arguments
    ///
    /// * `plugins` - The host's plugin registry
    ///
    /// # Returns
    ///
    /// `Legacy` or `Current` when the plugin is enabled and exposes the API
    /// matching its declared major version, `Disabled` when it is installed
    /// but not enabled, and `Absent` otherwise.
    pub fn detect(plugins: &dyn PluginManager) -> Self {
        let Some(plugin) = plugins.plugin(PLUGIN_NAME) else {
            return Collaborator::Absent;
        };

        if !plugin.is_enabled() {
            return Collaborator::Disabled;
        }

        let detected = match ApiGeneration::from_version(plugin.version()) {
            Some(ApiGeneration::Legacy) => plugin.legacy_core().map(Collaborator::Legacy),
            Some(ApiGeneration::Current) => plugin.core_api().map(Collaborator::Current),
            None => None,
        };

        detected.unwrap_or_else(|| {
            debug!(
                "{} v{} exposes no supported API, using native world data",
                PLUGIN_NAME,
                plugin.version()
            );
            Collaborator::Absent
        })
    }

    /// Whether a usable collaborator API was found.
    pub fn is_available(&self) -> bool {
        matches!(self, Collaborator::Legacy(_) | Collaborator::Current(_))
    }

    /// World name retriever backed by this collaborator, or by native world
    /// data when none is available.
    pub fn name_retriever(&self) -> Box<dyn WorldNameRetriever> {
        match self {
            Collaborator::Absent | Collaborator::Disabled => Box::new(worldname::DefaultRetriever),
            Collaborator::Legacy(core) => Box::new(worldname::Multiverse4Retriever::new(core.clone())),
            Collaborator::Current(api) => Box::new(worldname::Multiverse5Retriever::new(api.clone())),
        }
    }

    /// Spawn location retriever backed by this collaborator, or by native
    /// world data when none is available.
    pub fn spawn_retriever(&self) -> Box<dyn SpawnLocationRetriever> {
        match self {
            Collaborator::Absent | Collaborator::Disabled => Box::new(spawn::DefaultRetriever),
            Collaborator::Legacy(core) => Box::new(spawn::Multiverse4Retriever::new(core.clone())),
            Collaborator::Current(api) => Box::new(spawn::Multiverse5Retriever::new(api.clone())),
        }
    }
}

impl std::fmt::Debug for Collaborator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Collaborator::Absent => write!(f, "Absent"),
            Collaborator::Disabled => write!(f, "Disabled"),
            Collaborator::Legacy(_) => write!(f, "Legacy"),
            Collaborator::Current(_) => write!(f, "Current"),
        }
    }
}
