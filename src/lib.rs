pub mod config;
pub mod error;
pub mod graph;
pub mod rules;
pub mod ancestry;
pub mod population;

pub use config::Config;
pub use error::{KinshipError, Result};
pub use graph::{DuplicatePolicy, Entity, EntityId, EntityRegistry};
pub use rules::{ReciprocalRule, ReciprocalRuleSet, RelationLinker};
pub use ancestry::{Ancestry, AncestryResolver, PathTranslator};
pub use population::{Population, PopulationFile};
