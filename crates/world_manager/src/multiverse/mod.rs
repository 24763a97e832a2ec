//! Contracts of the optional Multiverse-Core collaborator.
//!
//! Multiverse ships two incompatible API generations. Only the surface this
//! crate consumes is modelled here; everything is read-only.

pub mod current;
pub mod legacy;

/// Name Multiverse-Core registers under in the host's plugin registry.
pub const PLUGIN_NAME: &str = "Multiverse-Core";
