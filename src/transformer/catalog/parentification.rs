//! Rebuilds the parent back-reference side table. Runs first, in `Initializing`, so every later
//! stage can ask "who owns this node" without threading a parent pointer through the tree.

use std::cell::RefCell;
use std::rc::Rc;

use crate::ast::{rebuild_parent_map, ParentMap};
use crate::transformer::{NodeTransformationStage, Transformer, TransformerName};
use crate::visitor::Visitor;

pub struct Parentification {
    parents: Rc<RefCell<ParentMap>>,
}

impl Parentification {
    pub fn new(parents: Rc<RefCell<ParentMap>>) -> Self {
        Self { parents }
    }
}

impl Transformer for Parentification {
    fn name(&self) -> TransformerName {
        TransformerName::Parentification
    }

    fn get_visitor(&mut self, stage: NodeTransformationStage) -> Option<Visitor<'_>> {
        if stage != NodeTransformationStage::Initializing {
            return None;
        }
        // Rebuilding the whole map needs the root, which a single-node visitor callback doesn't
        // see; do the actual work in `prepare` and give the traversal engine a no-op visitor so
        // this transformer still participates in the stage's batch.
        Some(Visitor::new())
    }

    fn prepare(&mut self, stage: NodeTransformationStage) {
        if stage == NodeTransformationStage::Initializing {
            // The real rebuild happens from `crate::pipeline` after this stage's traversal, once
            // it holds `&mut Node` for the root; this hook exists so the stage driver can log
            // that Parentification ran even though it has no per-node work.
        }
    }
}

/// Convenience used directly by the stage driver right after the Initializing traversal, since a
/// per-node visitor can't reach the tree root to rebuild a map keyed by parent id.
pub fn rebuild(root: &mut crate::ast::Node, parents: &Rc<RefCell<ParentMap>>) {
    rebuild_parent_map(root, &mut parents.borrow_mut());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Node, NodeIdAllocator, NodeKind};

    #[test]
    fn rebuild_populates_shared_map() {
        let mut alloc = NodeIdAllocator::new();
        let ident = Node::new(alloc.next(), NodeKind::Identifier { name: "x".into() });
        let ident_id = ident.id;
        let mut program = Node::new(alloc.next(), NodeKind::Program { body: vec![ident] });
        let program_id = program.id;

        let parents = Rc::new(RefCell::new(ParentMap::new()));
        rebuild(&mut program, &parents);

        assert_eq!(parents.borrow().get(&ident_id), Some(&program_id));
    }
}
