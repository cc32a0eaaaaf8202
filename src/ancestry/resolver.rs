//! Priority-ordered depth-first ancestry walk.

use super::{Ancestry, Hop};
use crate::graph::{EntityId, EntityRegistry};

/// A node being expanded: which hop kind and which target come next.
struct Frame {
    id: EntityId,
    path: String,
    hop: usize,
    pos: usize,
}

impl Frame {
    fn new(id: EntityId, path: String) -> Self {
        Self { id, path, hop: 0, pos: 0 }
    }
}

/// Walks the structural relations (`parent`, `child`, `sibling`, `spouse`) of a registry.
pub struct AncestryResolver<'a> {
    registry: &'a EntityRegistry,
}

impl<'a> AncestryResolver<'a> {
    pub fn new(registry: &'a EntityRegistry) -> Self {
        Self { registry }
    }

    /// Find every entity reachable from `root` and the first path that reaches it.
    ///
    /// At each node all `parent` links are tried, then `child`, `sibling` and `spouse`,
    /// targets in insertion order; each newly found entity is expanded fully before the
    /// next target is tried. Spouses are recorded but not expanded. An unknown root
    /// yields an empty result.
    pub fn resolve(&self, root: EntityId) -> Ancestry {
        let mut ancestry = Ancestry::new(root);
        if !self.registry.contains(root) {
            log::debug!("Ancestry root {} is not registered", root);
            return ancestry;
        }

        let mut stack = vec![Frame::new(root, String::new())];
        while let Some(frame) = stack.last_mut() {
            let Some((hop, target)) = self.next_target(frame) else {
                stack.pop();
                continue;
            };

            let mut path = frame.path.clone();
            path.push(hop.symbol());
            if !ancestry.record(target, path.clone()) {
                continue;
            }
            log::trace!("Ancestry {} -> {}: {}", root, target, path);

            if !hop.is_terminal() && self.registry.contains(target) {
                stack.push(Frame::new(target, path));
            }
        }

        log::debug!("Ancestry from {}: {} entities", root, ancestry.len());
        ancestry
    }

    /// Advance `frame` to its next link target.
    fn next_target(&self, frame: &mut Frame) -> Option<(Hop, EntityId)> {
        let entity = self.registry.get(frame.id)?;
        while let Some(&hop) = Hop::ORDER.get(frame.hop) {
            let targets = entity.relation(hop.link_kind()).unwrap_or(&[]);
            if let Some(&target) = targets.get(frame.pos) {
                frame.pos += 1;
                return Some((hop, target));
            }
            frame.hop += 1;
            frame.pos = 0;
        }
        None
    }
}
