//! A population: registry, reciprocal rules and linker options threaded together,
//! plus the TOML population file the CLI loads it from.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ancestry::{Ancestry, AncestryResolver, PathTranslator};
use crate::graph::{DuplicatePolicy, EntityId, EntityRegistry};
use crate::rules::{CreatedLink, ReciprocalRule, ReciprocalRuleSet, RelationLinker};
use crate::{KinshipError, Result};

/// Entity entry of a population file.
#[derive(Debug, Clone, Deserialize)]
pub struct EntitySpec {
    pub id: EntityId,
    /// Flattened `key, value, key, value, ...` list.
    #[serde(default)]
    pub attributes: Vec<String>,
}

/// Reciprocal rule entry of a population file.
#[derive(Debug, Clone, Deserialize)]
pub struct RuleSpec {
    pub base: String,
    pub reciprocal: String,
    #[serde(default)]
    pub condition_key: Option<String>,
    #[serde(default)]
    pub condition_value: Option<String>,
}

impl RuleSpec {
    fn to_rule(&self) -> Result<ReciprocalRule> {
        match (&self.condition_key, &self.condition_value) {
            (None, None) => Ok(ReciprocalRule::new(&self.reciprocal)),
            (Some(key), Some(value)) => Ok(ReciprocalRule::conditional(&self.reciprocal, key, value)),
            _ => Err(KinshipError::InvalidInput(format!(
                "rule {} -> {}: condition_key and condition_value must be given together",
                self.base, self.reciprocal
            ))),
        }
    }
}

/// Relation declaration of a population file: `from` is the `kind` of `to`.
#[derive(Debug, Clone, Deserialize)]
pub struct RelationSpec {
    pub from: EntityId,
    pub kind: String,
    pub to: EntityId,
}

/// Entities, rules and relations, applied in that order.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PopulationFile {
    #[serde(default)]
    pub entities: Vec<EntitySpec>,
    #[serde(default)]
    pub rules: Vec<RuleSpec>,
    #[serde(default)]
    pub relations: Vec<RelationSpec>,
}

impl PopulationFile {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    pub fn parse(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }
}

/// "`from` is-the `kind` (of) `to`", with display names resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelationTriple {
    pub from: String,
    pub kind: String,
    pub to: String,
}

/// An entity reached from a root, its path and its kinship label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KinshipEntry {
    pub id: EntityId,
    pub name: String,
    pub path: String,
    pub label: String,
}

/// Registry plus the rules that govern how relations are declared in it.
#[derive(Debug)]
pub struct Population {
    registry: EntityRegistry,
    rules: ReciprocalRuleSet,
    second_order: bool,
}

impl Population {
    pub fn new(policy: DuplicatePolicy, rules: ReciprocalRuleSet, second_order: bool) -> Self {
        Self {
            registry: EntityRegistry::with_policy(policy),
            rules,
            second_order,
        }
    }

    /// Build a population from a file: entities first, then the file's rules on top of
    /// the stock table (when enabled), then relations in declaration order.
    pub fn from_file(
        file: &PopulationFile,
        policy: DuplicatePolicy,
        use_stock_rules: bool,
        second_order: bool,
    ) -> Result<Self> {
        let mut rules = if use_stock_rules {
            ReciprocalRuleSet::kinship()
        } else {
            ReciprocalRuleSet::new()
        };
        for spec in &file.rules {
            rules.register_rule(&spec.base, spec.to_rule()?);
        }

        let mut population = Self::new(policy, rules, second_order);
        for spec in &file.entities {
            population
                .registry
                .get_or_create(spec.id)
                .set_attributes(spec.attributes.as_slice());
        }
        for relation in &file.relations {
            population.declare(relation.from, &relation.kind, relation.to);
        }

        log::info!(
            "Population loaded: {} entities, {} relation kinds, {} rule kinds",
            population.registry.size(),
            population.registry.total_relations(),
            population.rules.kind_count()
        );
        Ok(population)
    }

    pub fn registry(&self) -> &EntityRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut EntityRegistry {
        &mut self.registry
    }

    pub fn rules(&self) -> &ReciprocalRuleSet {
        &self.rules
    }

    /// Declare `id1` to be the `kind` of `id2`, firing reciprocal rules.
    pub fn declare(&mut self, id1: EntityId, kind: &str, id2: EntityId) -> Vec<CreatedLink> {
        RelationLinker::new(&self.rules)
            .second_order(self.second_order)
            .apply(&mut self.registry, id1, kind, id2)
    }

    /// Every link held by `id`, as named triples sorted by kind.
    pub fn relation_triples(&self, id: EntityId) -> Result<Vec<RelationTriple>> {
        let entity = self
            .registry
            .get(id)
            .ok_or(KinshipError::EntityNotFound(id))?;

        let mut triples = Vec::new();
        for (kind, targets) in entity.relations() {
            for &target in targets {
                triples.push(RelationTriple {
                    from: entity.display_name().to_string(),
                    kind: kind.to_string(),
                    to: self.display_name(target),
                });
            }
        }
        Ok(triples)
    }

    pub fn ancestry(&self, root: EntityId) -> Ancestry {
        AncestryResolver::new(&self.registry).resolve(root)
    }

    /// Labelled kinship of every entity reachable from `root`, in discovery order.
    pub fn kinship(&self, root: EntityId, translator: &PathTranslator) -> Result<Vec<KinshipEntry>> {
        if !self.registry.contains(root) {
            return Err(KinshipError::EntityNotFound(root));
        }

        let entries = self
            .ancestry(root)
            .iter()
            .map(|record| {
                let entity = self.registry.get(record.id);
                let label = match entity {
                    Some(entity) => translator.label_for(entity, &record.path),
                    None => record.path.clone(),
                };
                KinshipEntry {
                    id: record.id,
                    name: self.display_name(record.id),
                    path: record.path.clone(),
                    label,
                }
            })
            .collect();
        Ok(entries)
    }

    fn display_name(&self, id: EntityId) -> String {
        self.registry
            .get(id)
            .map_or(crate::graph::UNKNOWN_NAME, |e| e.display_name())
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const FAMILY: &str = r#"
[[entities]]
id = 1
attributes = ["firstname", "joe", "lastname", "smith", "gender", "male"]

[[entities]]
id = 2
attributes = ["firstname", "fred", "lastname", "smith", "gender", "male"]

[[entities]]
id = 3
attributes = ["firstname", "april", "lastname", "smith", "gender", "female"]

[[entities]]
id = 7
attributes = ["firstname", "john", "lastname", "smith", "gender", "male"]

[[relations]]
from = 1
kind = "son"
to = 2

[[relations]]
from = 2
kind = "married"
to = 3

[[relations]]
from = 7
kind = "son"
to = 2
"#;

    fn family() -> Population {
        let file = PopulationFile::parse(FAMILY).unwrap();
        Population::from_file(&file, DuplicatePolicy::default(), true, true).unwrap()
    }

    fn labels(entries: &[KinshipEntry]) -> Vec<(&str, &str, &str)> {
        entries
            .iter()
            .map(|e| (e.name.as_str(), e.path.as_str(), e.label.as_str()))
            .collect()
    }

    #[test]
    fn test_end_to_end_family() {
        let population = family();
        let entries = population.kinship(1, &PathTranslator::new()).unwrap();

        assert_eq!(
            labels(&entries),
            [
                ("fred", "p", "father"),
                ("john", "pc", "brother"),
                ("april", "pS", "mother"),
            ]
        );
    }

    #[test]
    fn test_end_to_end_spouse_and_son_of_son() {
        let mut population = Population::new(DuplicatePolicy::default(), ReciprocalRuleSet::kinship(), true);
        for (id, name, gender) in [(1, "joe", "male"), (2, "fred", "male"), (3, "april", "female"), (7, "john", "male")] {
            population
                .registry_mut()
                .get_or_create(id)
                .set_attributes(&["firstname", name, "gender", gender]);
        }
        population.declare(1, "son", 2);
        population.declare(2, "spouse", 3);
        // fred is john's son, so john is joe's grandfather
        population.declare(2, "son", 7);

        let april = population.registry().get(3).unwrap();
        assert!(april.is_linked("spouse", 2));
        assert!(population.registry().get(2).unwrap().is_linked("spouse", 3));

        let entries = population.kinship(1, &PathTranslator::new()).unwrap();
        assert_eq!(
            labels(&entries),
            [
                ("fred", "p", "father"),
                ("john", "pp", "grandfather"),
                ("april", "pS", "mother"),
            ]
        );
    }

    #[test]
    fn test_end_to_end_from_spouse() {
        let population = family();
        let entries = population.kinship(3, &PathTranslator::new()).unwrap();

        // april only reaches her husband; his children are behind the spouse hop
        assert_eq!(labels(&entries), [("fred", "S", "husband")]);
    }

    #[test]
    fn test_end_to_end_sibling_declared_directly() {
        let mut population = family();
        population.declare(1, "brother", 7);

        let ancestry = population.ancestry(7);
        assert_eq!(ancestry.get(2), Some("p"));
        assert_eq!(ancestry.get(1), Some("pc"));

        let joe = population.registry().get(1).unwrap();
        assert!(joe.is_linked("sibling", 7));
        assert!(population.registry().get(7).unwrap().is_linked("brother", 1));
    }

    #[test]
    fn test_reciprocals_from_stock_rules() {
        let population = family();
        let fred = population.registry().get(2).unwrap();

        assert!(fred.is_linked("parent", 1));
        assert!(fred.is_linked("father", 7));
        assert!(fred.is_linked("husband", 3));
        assert!(fred.is_linked("spouse", 3));
        assert!(!fred.is_linked("wife", 3));

        let april = population.registry().get(3).unwrap();
        assert!(april.is_linked("wife", 2));
        assert!(april.is_linked("spouse", 2));

        let joe = population.registry().get(1).unwrap();
        assert!(joe.is_linked("child", 2));
        assert!(joe.is_linked("son", 2));
    }

    #[test]
    fn test_built_by_hand() {
        let mut population = Population::new(DuplicatePolicy::default(), ReciprocalRuleSet::kinship(), true);
        population
            .registry_mut()
            .get_or_create(1)
            .set_attributes(&["firstname", "ann", "gender", "female"]);
        population
            .registry_mut()
            .get_or_create(2)
            .set_attributes(&["firstname", "bea", "gender", "female"]);
        population.declare(1, "daughter", 2);

        let entries = population.kinship(2, &PathTranslator::new()).unwrap();
        assert_eq!(labels(&entries), [("ann", "c", "daughter")]);
        assert!(population.registry().get(2).unwrap().is_linked("mother", 1));
    }

    #[test]
    fn test_relation_triples() {
        let population = family();
        let triples = population.relation_triples(3).unwrap();
        let rendered: Vec<_> = triples
            .iter()
            .map(|t| format!("{} {} {}", t.from, t.kind, t.to))
            .collect();

        assert_eq!(rendered, ["april spouse fred", "april wife fred"]);
    }

    #[test]
    fn test_unknown_entity_errors() {
        let population = family();
        assert!(matches!(
            population.relation_triples(99),
            Err(KinshipError::EntityNotFound(99))
        ));
        assert!(matches!(
            population.kinship(99, &PathTranslator::new()),
            Err(KinshipError::EntityNotFound(99))
        ));
    }

    #[test]
    fn test_file_rules_without_stock_table() {
        let file = PopulationFile::parse(
            r#"
[[rules]]
base = "mentor"
reciprocal = "student"

[[rules]]
base = "mentor"
reciprocal = "protege"
condition_key = "level"
condition_value = "junior"

[[entities]]
id = 2
attributes = ["level", "junior"]

[[relations]]
from = 1
kind = "mentor"
to = 2
"#,
        )
        .unwrap();
        let population = Population::from_file(&file, DuplicatePolicy::default(), false, true).unwrap();

        let junior = population.registry().get(2).unwrap();
        assert!(junior.is_linked("student", 1));
        assert!(junior.is_linked("protege", 1));
        assert_eq!(population.rules().kind_count(), 1);
    }

    #[test]
    fn test_half_specified_condition_rejected() {
        let file = PopulationFile::parse(
            r#"
[[rules]]
base = "mentor"
reciprocal = "student"
condition_key = "level"
"#,
        )
        .unwrap();
        let result = Population::from_file(&file, DuplicatePolicy::default(), false, true);
        assert!(matches!(result, Err(KinshipError::InvalidInput(_))));
    }

    #[test]
    fn test_load_population_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("population.toml");
        fs::write(&path, FAMILY).unwrap();

        let file = PopulationFile::load(&path).unwrap();
        assert_eq!(file.entities.len(), 4);
        assert_eq!(file.relations.len(), 3);

        assert!(matches!(
            PopulationFile::load(&temp_dir.path().join("missing.toml")),
            Err(KinshipError::Io(_))
        ));
        assert!(matches!(PopulationFile::parse("[[entities]]\nid = \"x\""), Err(KinshipError::Toml(_))));
    }
}
