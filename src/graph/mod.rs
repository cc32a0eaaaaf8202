//! Entity graph module: entities, their attributes and typed links, and the registry
//! that owns them.
//!
//! Entities reference each other by [`EntityId`] only; the [`EntityRegistry`] is the
//! single owner of every [`Entity`].

mod entity;
mod registry;

pub use entity::{Entity, UNKNOWN_NAME};
pub use registry::EntityRegistry;

use serde::{Deserialize, Serialize};

/// Stable entity handle, assigned by the caller and never reused within a registry.
pub type EntityId = u32;

/// Whether repeated (kind, target) links and (name, value) attributes are stored again.
///
/// With a flag off, appending a pair that is already present is a no-op.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicatePolicy {
    #[serde(default)]
    pub allow_duplicate_links: bool,
    #[serde(default)]
    pub allow_duplicate_attributes: bool,
}

impl DuplicatePolicy {
    /// Policy that appends every link and attribute value, repeated or not.
    pub fn accumulate() -> Self {
        Self {
            allow_duplicate_links: true,
            allow_duplicate_attributes: true,
        }
    }
}
