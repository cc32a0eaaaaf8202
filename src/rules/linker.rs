//! Applies declared relations and their reciprocals to a registry.

use serde::Serialize;

use super::ReciprocalRuleSet;
use crate::graph::{Entity, EntityId, EntityRegistry};

/// A link stored by [`RelationLinker::apply`]: `from` is the `kind` of `to`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreatedLink {
    pub from: EntityId,
    pub kind: String,
    pub to: EntityId,
}

impl CreatedLink {
    fn new(from: EntityId, kind: &str, to: EntityId) -> Self {
        Self {
            from,
            kind: kind.to_string(),
            to,
        }
    }
}

/// Declares relations between entities, creating reciprocals from a rule set.
#[derive(Debug, Clone, Copy)]
pub struct RelationLinker<'a> {
    rules: &'a ReciprocalRuleSet,
    second_order: bool,
}

impl<'a> RelationLinker<'a> {
    /// Linker with second-order propagation enabled.
    pub fn new(rules: &'a ReciprocalRuleSet) -> Self {
        Self {
            rules,
            second_order: true,
        }
    }

    /// Toggle second-order propagation: reciprocals of the reciprocals created on `id2`
    /// are linked back from `id1`.
    pub fn second_order(mut self, enabled: bool) -> Self {
        self.second_order = enabled;
        self
    }

    /// Declare `id1 -kind-> id2` ("id1 is the `kind` of id2").
    ///
    /// 1. every rule of `kind` whose condition matches `id2` links `id2 -rule-> id1`;
    /// 2. with second-order on, every rule of each reciprocal just created whose condition
    ///    matches `id1` links `id1 -rule-> id2`;
    /// 3. `id1 -kind-> id2` is linked last, unconditionally.
    ///
    /// Both entities are created if needed. Unknown kinds fire no rules. Returns the links
    /// actually stored, in creation order.
    pub fn apply(&self, registry: &mut EntityRegistry, id1: EntityId, kind: &str, id2: EntityId) -> Vec<CreatedLink> {
        registry.get_or_create(id1);
        registry.get_or_create(id2);

        let mut created = Vec::new();

        let reciprocals: Vec<&str> = {
            let target: &Entity = registry.get_or_create(id2);
            self.rules
                .rules_for(kind)
                .iter()
                .filter(|rule| rule.matches(target))
                .map(|rule| rule.name.as_str())
                .collect()
        };
        for name in &reciprocals {
            if registry.get_or_create(id2).link(name, id1) {
                created.push(CreatedLink::new(id2, name, id1));
            }
        }

        if self.second_order {
            for name in &reciprocals {
                let second: Vec<&str> = {
                    let source: &Entity = registry.get_or_create(id1);
                    self.rules
                        .rules_for(name)
                        .iter()
                        .filter(|rule| rule.matches(source))
                        .map(|rule| rule.name.as_str())
                        .collect()
                };
                for second_name in second {
                    if registry.get_or_create(id1).link(second_name, id2) {
                        created.push(CreatedLink::new(id1, second_name, id2));
                    }
                }
            }
        }

        if registry.get_or_create(id1).link(kind, id2) {
            created.push(CreatedLink::new(id1, kind, id2));
        }

        for link in &created {
            log::debug!("Linked {} -{}-> {}", link.from, link.kind, link.to);
        }
        created
    }
}
