//! A single node of the relation graph.

use std::collections::BTreeMap;

use super::{DuplicatePolicy, EntityId};

/// Display name used when an entity has no `firstname`.
pub const UNKNOWN_NAME: &str = "unknown";

/// A person (or anything relatable) with multi-valued attributes and typed outgoing links.
///
/// A link stored under `kind` pointing at `other` reads "this entity is the `kind` of `other`".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    id: EntityId,
    attributes: BTreeMap<String, Vec<String>>,
    links: BTreeMap<String, Vec<EntityId>>,
    policy: DuplicatePolicy,
}

impl Entity {
    pub(crate) fn new(id: EntityId, policy: DuplicatePolicy) -> Self {
        Self {
            id,
            attributes: BTreeMap::new(),
            links: BTreeMap::new(),
            policy,
        }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    /// Append `value` to the attribute `name`, creating the entry if absent.
    pub fn set_attribute(&mut self, name: &str, value: &str) {
        let values = self.attributes.entry(name.to_string()).or_default();
        if !self.policy.allow_duplicate_attributes && values.iter().any(|v| v == value) {
            return;
        }
        values.push(value.to_string());
    }

    /// Set attributes from a flattened `key, value, key, value, ...` sequence.
    ///
    /// A trailing key without a value is dropped.
    pub fn set_attributes<S: AsRef<str>>(&mut self, pairs: &[S]) {
        let mut chunks = pairs.chunks_exact(2);
        for pair in chunks.by_ref() {
            self.set_attribute(pair[0].as_ref(), pair[1].as_ref());
        }
        if let [key] = chunks.remainder() {
            log::warn!(
                "Entity {}: dropping attribute key '{}' with no value",
                self.id,
                key.as_ref()
            );
        }
    }

    /// All values recorded for `name`, in insertion order.
    pub fn get_attribute(&self, name: &str) -> Option<&[String]> {
        self.attributes.get(name).map(Vec::as_slice)
    }

    /// First value recorded for `name`.
    pub fn first_attribute(&self, name: &str) -> Option<&str> {
        self.get_attribute(name)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// True if `value` is among the values of `name`.
    pub fn has_attribute_value(&self, name: &str, value: &str) -> bool {
        self.get_attribute(name)
            .map_or(false, |values| values.iter().any(|v| v == value))
    }

    /// Link this entity to `other` under `kind`.
    ///
    /// Returns false when the duplicate policy suppressed the link.
    pub fn link(&mut self, kind: &str, other: EntityId) -> bool {
        let targets = self.links.entry(kind.to_string()).or_default();
        if !self.policy.allow_duplicate_links && targets.contains(&other) {
            return false;
        }
        targets.push(other);
        true
    }

    pub fn is_linked(&self, kind: &str, other: EntityId) -> bool {
        self.relation(kind)
            .map_or(false, |targets| targets.contains(&other))
    }

    /// Targets linked under `kind`, in insertion order.
    pub fn relation(&self, kind: &str) -> Option<&[EntityId]> {
        self.links.get(kind).map(Vec::as_slice)
    }

    /// Every relation kind this entity holds, sorted by kind.
    pub fn relations(&self) -> impl Iterator<Item = (&str, &[EntityId])> {
        self.links
            .iter()
            .map(|(kind, targets)| (kind.as_str(), targets.as_slice()))
    }

    /// Number of distinct relation kinds held.
    pub fn relation_count(&self) -> usize {
        self.links.len()
    }

    pub fn display_name(&self) -> &str {
        self.first_attribute("firstname").unwrap_or(UNKNOWN_NAME)
    }
}
