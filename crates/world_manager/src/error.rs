//! Error types.
//!
//! Lookups that simply find nothing are not errors here: they come back as
//! `None` or as the [`crate::UNKNOWN_WORLD`] sentinel.

use crate::types::WorldId;
use std::{io::Error as IoError, path::PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WorldManagerError {
    #[error("World {0} is not loaded on this server")]
    WorldNotLoaded(WorldId),
}

/// Errors loading or validating world settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {0}: {1}")]
    Read(PathBuf, IoError),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Validation(String),
}

pub type Result<T> = std::result::Result<T, WorldManagerError>;
