//! Arena owning every entity of a population.

use std::collections::BTreeMap;

use super::{DuplicatePolicy, Entity, EntityId};

/// Owns all entities, keyed by id. Entities are created on first access and never removed.
#[derive(Debug, Default)]
pub struct EntityRegistry {
    entities: BTreeMap<EntityId, Entity>,
    policy: DuplicatePolicy,
}

impl EntityRegistry {
    /// Create an empty registry that deduplicates links and attribute values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty registry whose entities follow `policy`.
    pub fn with_policy(policy: DuplicatePolicy) -> Self {
        Self {
            entities: BTreeMap::new(),
            policy,
        }
    }

    pub fn policy(&self) -> DuplicatePolicy {
        self.policy
    }

    /// Return the entity for `id`, allocating an empty one on first access.
    pub fn get_or_create(&mut self, id: EntityId) -> &mut Entity {
        let policy = self.policy;
        self.entities.entry(id).or_insert_with(|| {
            log::debug!("Registering entity {}", id);
            Entity::new(id, policy)
        })
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.entities.contains_key(&id)
    }

    /// Entities in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values()
    }

    /// Number of distinct entities created.
    pub fn size(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Sum over all entities of the number of distinct relation kinds each holds.
    pub fn total_relations(&self) -> usize {
        self.entities.values().map(Entity::relation_count).sum()
    }
}
