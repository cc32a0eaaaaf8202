//! Ancestry module: path-walking kinship resolution and path-to-label translation.
//!
//! A path is a string of hop symbols from a root entity, each naming what the reached
//! entity is to the previous one: `p` parent, `c` child, `s` sibling, `S` spouse.

mod resolver;
mod translator;

pub use resolver::AncestryResolver;
pub use translator::PathTranslator;

use std::collections::HashMap;

use serde::Serialize;

use crate::graph::EntityId;

/// One structural hop of an ancestry walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hop {
    Parent,
    Child,
    Sibling,
    Spouse,
}

impl Hop {
    /// Expansion priority at every node; by link kind: `parent`, `child`, `sibling`, `spouse`.
    pub const ORDER: [Hop; 4] = [Hop::Child, Hop::Parent, Hop::Sibling, Hop::Spouse];

    /// Link kind followed to make this hop.
    ///
    /// `X -parent-> Y` means X is Y's parent, so a `parent` link reaches a child.
    pub fn link_kind(self) -> &'static str {
        match self {
            Hop::Parent => "child",
            Hop::Child => "parent",
            Hop::Sibling => "sibling",
            Hop::Spouse => "spouse",
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Hop::Parent => 'p',
            Hop::Child => 'c',
            Hop::Sibling => 's',
            Hop::Spouse => 'S',
        }
    }

    /// Spouse hops are recorded but never expanded.
    pub fn is_terminal(self) -> bool {
        matches!(self, Hop::Spouse)
    }
}

/// A discovered entity and the first path that reached it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathRecord {
    pub id: EntityId,
    pub path: String,
}

/// Result of an ancestry walk: every reachable entity except the root, in discovery order.
#[derive(Debug, Clone, Serialize)]
pub struct Ancestry {
    root: EntityId,
    records: Vec<PathRecord>,
    #[serde(skip)]
    index: HashMap<EntityId, usize>,
}

impl Ancestry {
    pub(crate) fn new(root: EntityId) -> Self {
        Self {
            root,
            records: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Record `id` unless it is the root or already known. Returns whether it was new.
    pub(crate) fn record(&mut self, id: EntityId, path: String) -> bool {
        if id == self.root || self.index.contains_key(&id) {
            return false;
        }
        self.index.insert(id, self.records.len());
        self.records.push(PathRecord { id, path });
        true
    }

    pub fn root(&self) -> EntityId {
        self.root
    }

    /// Path recorded for `id`.
    pub fn get(&self, id: EntityId) -> Option<&str> {
        self.index
            .get(&id)
            .map(|&i| self.records[i].path.as_str())
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = &PathRecord> {
        self.records.iter()
    }
}
