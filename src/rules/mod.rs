//! Reciprocal relation rules and the linker that applies them.
//!
//! Declaring `A -son-> B` consults the rule set for `son` and creates the reciprocal
//! links (`B -parent-> A`, `B -father-> A` when B is male) before storing the declared link.

mod linker;
mod reciprocal;

pub use linker::{CreatedLink, RelationLinker};
pub use reciprocal::{Condition, ReciprocalRule, ReciprocalRuleSet};
