//! Reciprocal rule table.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::graph::Entity;

/// Attribute condition: the candidate entity must carry `value` among `attributes[key]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    pub key: String,
    pub value: String,
}

/// The relation to create on the other endpoint, optionally gated by a condition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReciprocalRule {
    pub name: String,
    pub condition: Option<Condition>,
}

impl ReciprocalRule {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            condition: None,
        }
    }

    /// A rule that only applies when the entity has `value` among `attributes[key]`.
    /// An empty `key` means no condition.
    pub fn conditional(name: &str, key: &str, value: &str) -> Self {
        let condition = (!key.is_empty()).then(|| Condition {
            key: key.to_string(),
            value: value.to_string(),
        });
        Self {
            name: name.to_string(),
            condition,
        }
    }

    /// Evaluate the condition against the entity's current attributes.
    /// A missing attribute never matches.
    pub fn matches(&self, entity: &Entity) -> bool {
        match &self.condition {
            None => true,
            Some(cond) => entity.has_attribute_value(&cond.key, &cond.value),
        }
    }
}

/// Relation kind -> ordered reciprocal rules. Every matching rule fires, in registration order.
#[derive(Debug, Clone, Default)]
pub struct ReciprocalRuleSet {
    ties: BTreeMap<String, Vec<ReciprocalRule>>,
}

impl ReciprocalRuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `rule` under `base`, creating the entry on first use.
    pub fn register_rule(&mut self, base: &str, rule: ReciprocalRule) {
        log::trace!("Reciprocal rule: {} -> {:?}", base, rule);
        self.ties.entry(base.to_string()).or_default().push(rule);
    }

    /// Declaring `base` on A->B always creates `reciprocal` on B->A.
    pub fn register(&mut self, base: &str, reciprocal: &str) {
        self.register_rule(base, ReciprocalRule::new(reciprocal));
    }

    /// Declaring `base` on A->B creates `reciprocal` on B->A when B has `value` in `key`.
    pub fn register_conditional(&mut self, base: &str, reciprocal: &str, key: &str, value: &str) {
        self.register_rule(base, ReciprocalRule::conditional(reciprocal, key, value));
    }

    /// Register a conditioned rule from a `[key, value, ...]` slice.
    ///
    /// Only the first two elements are used; with fewer than two nothing is registered.
    /// Returns whether a rule was added.
    pub fn register_with_meta<S: AsRef<str>>(&mut self, base: &str, reciprocal: &str, meta: &[S]) -> bool {
        match meta {
            [key, value, ..] => {
                self.register_conditional(base, reciprocal, key.as_ref(), value.as_ref());
                true
            }
            _ => false,
        }
    }

    /// Rules registered for `kind`; empty for kinds never registered.
    pub fn rules_for(&self, kind: &str) -> &[ReciprocalRule] {
        self.ties.get(kind).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of base kinds with at least one registration.
    pub fn kind_count(&self) -> usize {
        self.ties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ties.is_empty()
    }

    /// Stock family rule table.
    ///
    /// Besides the gendered kinds it feeds the structural kinds the ancestry walk
    /// follows: `parent`, `child`, `sibling` and `spouse`.
    pub fn kinship() -> Self {
        let mut set = Self::new();
        for &(base, reciprocal, gender) in KINSHIP_RULES {
            match gender {
                Some(gender) => set.register_conditional(base, reciprocal, "gender", gender),
                None => set.register(base, reciprocal),
            }
        }
        set
    }
}

const MALE: Option<&str> = Some("male");
const FEMALE: Option<&str> = Some("female");

/// (base, reciprocal, required gender of the reciprocal's holder)
const KINSHIP_RULES: &[(&str, &str, Option<&str>)] = &[
    ("married", "spouse", None),
    ("married", "wife", FEMALE),
    ("married", "husband", MALE),
    ("husband", "spouse", None),
    ("husband", "wife", FEMALE),
    ("wife", "spouse", None),
    ("wife", "husband", MALE),
    ("spouse", "spouse", None),
    ("son", "parent", None),
    ("son", "father", MALE),
    ("son", "mother", FEMALE),
    ("daughter", "parent", None),
    ("daughter", "father", MALE),
    ("daughter", "mother", FEMALE),
    ("father", "child", None),
    ("father", "son", MALE),
    ("father", "daughter", FEMALE),
    ("mother", "child", None),
    ("mother", "son", MALE),
    ("mother", "daughter", FEMALE),
    ("parent", "child", None),
    ("child", "parent", None),
    ("nephew", "uncle", MALE),
    ("nephew", "aunt", FEMALE),
    ("niece", "uncle", MALE),
    ("niece", "aunt", FEMALE),
    ("uncle", "nephew", MALE),
    ("uncle", "niece", FEMALE),
    ("aunt", "nephew", MALE),
    ("aunt", "niece", FEMALE),
    ("sister", "sibling", None),
    ("sister", "brother", MALE),
    ("sister", "sister", FEMALE),
    ("brother", "sibling", None),
    ("brother", "brother", MALE),
    ("brother", "sister", FEMALE),
    ("sibling", "sibling", None),
];
