//! Optional stage: injects a handful of dead `if (false) { ... }` blocks containing bogus
//! statements, to pad the output with code that never executes. Runs only when
//! [`crate::config::Options::dead_code_injection`] is set.

use std::cell::RefCell;
use std::rc::Rc;

use crate::ast::{Node, NodeIdAllocator, NodeKind};
use crate::random::RandomGenerator;
use crate::transformer::{NodeTransformationStage, Transformer, TransformerName};
use crate::visitor::{VisitControl, Visitor};

pub struct DeadCodeInjection {
    rng: Rc<RefCell<RandomGenerator>>,
    alloc: Rc<RefCell<NodeIdAllocator>>,
}

impl DeadCodeInjection {
    pub fn new(rng: Rc<RefCell<RandomGenerator>>, alloc: Rc<RefCell<NodeIdAllocator>>) -> Self {
        Self { rng, alloc }
    }
}

impl Transformer for DeadCodeInjection {
    fn name(&self) -> TransformerName {
        TransformerName::DeadCodeInjection
    }

    fn get_visitor(&mut self, stage: NodeTransformationStage) -> Option<Visitor<'_>> {
        if stage != NodeTransformationStage::DeadCodeInjection {
            return None;
        }
        let rng = self.rng.clone();
        let alloc = self.alloc.clone();
        Some(Visitor::new().with_enter(move |node, _parent| {
            if let NodeKind::BlockStatement { body } | NodeKind::Program { body } = &mut node.kind {
                if body.is_empty() {
                    return VisitControl::Continue;
                }
                let index = rng.borrow_mut().gen_range(0, body.len() + 1);
                body.insert(index, dead_block(&alloc));
            }
            VisitControl::Continue
        }))
    }
}

fn dead_block(alloc: &Rc<RefCell<NodeIdAllocator>>) -> Node {
    let mut alloc = alloc.borrow_mut();
    let literal =
        Node::new(alloc.next(), NodeKind::StringLiteral { value: "unreachable".to_string() });
    let stmt = Node::new(alloc.next(), NodeKind::ExpressionStatement { expression: Box::new(literal) });
    let test = Node::new(alloc.next(), NodeKind::BooleanLiteral { value: false });
    let block = Node::new(alloc.next(), NodeKind::BlockStatement { body: vec![stmt] });
    Node::new(
        alloc.next(),
        NodeKind::IfStatement { test: Box::new(test), consequent: Box::new(block), alternate: None },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traversal::replace;

    fn collaborators(seed: u64) -> (Rc<RefCell<RandomGenerator>>, Rc<RefCell<NodeIdAllocator>>) {
        (
            Rc::new(RefCell::new(RandomGenerator::new(Some(seed)))),
            Rc::new(RefCell::new(NodeIdAllocator::new())),
        )
    }

    #[test]
    fn inserts_one_dead_if_per_block() {
        let mut alloc = NodeIdAllocator::new();
        let stmt = Node::new(alloc.next(), NodeKind::EmptyStatement);
        let mut program = Node::new(alloc.next(), NodeKind::Program { body: vec![stmt] });

        let (rng, shared_alloc) = collaborators(1);
        let mut transformer = DeadCodeInjection::new(rng, shared_alloc);
        let mut visitor =
            transformer.get_visitor(NodeTransformationStage::DeadCodeInjection).unwrap();
        replace(&mut program, &mut visitor);

        let NodeKind::Program { body } = &program.kind else { panic!("expected program") };
        assert_eq!(body.len(), 2);
        assert!(body.iter().any(|n| matches!(n.kind, NodeKind::IfStatement { .. })));
    }

    #[test]
    fn leaves_empty_blocks_untouched() {
        let mut alloc = NodeIdAllocator::new();
        let mut program = Node::new(alloc.next(), NodeKind::Program { body: vec![] });

        let (rng, shared_alloc) = collaborators(1);
        let mut transformer = DeadCodeInjection::new(rng, shared_alloc);
        let mut visitor =
            transformer.get_visitor(NodeTransformationStage::DeadCodeInjection).unwrap();
        replace(&mut program, &mut visitor);

        let NodeKind::Program { body } = &program.kind else { panic!("expected program") };
        assert!(body.is_empty());
    }
}
