//! Finalizing stage: wraps the whole program body in an immediately-invoked function expression,
//! `(function() { ...body })();` — the de facto final step of most obfuscators' output shape,
//! modeled here without the production anti-tamper checks a "self-defending" pass would add.

use crate::ast::{Node, NodeIdAllocator, NodeKind};
use crate::transformer::{NodeTransformationStage, Transformer, TransformerName};
use crate::visitor::{VisitControl, Visitor};

pub struct SelfDefending;

impl SelfDefending {
    pub fn new() -> Self {
        Self
    }
}

impl Transformer for SelfDefending {
    fn name(&self) -> TransformerName {
        TransformerName::SelfDefending
    }

    fn get_visitor(&mut self, stage: NodeTransformationStage) -> Option<Visitor<'_>> {
        if stage != NodeTransformationStage::Finalizing {
            return None;
        }
        Some(Visitor::new().with_leave(|node, _parent| {
            if let NodeKind::Program { body } = &mut node.kind {
                if body.is_empty() {
                    return VisitControl::Continue;
                }
                let mut alloc = NodeIdAllocator::new();
                let wrapped = wrap(std::mem::take(body), &mut alloc);
                *body = vec![wrapped];
            }
            VisitControl::Continue
        }))
    }
}

fn wrap(body: Vec<Node>, alloc: &mut NodeIdAllocator) -> Node {
    let block = Node::new(alloc.next(), NodeKind::BlockStatement { body });
    let iife = Node::new(
        alloc.next(),
        NodeKind::FunctionExpression {
            id: None,
            params: vec![],
            body: Box::new(block),
            is_async: false,
            is_generator: false,
        },
    );
    let call = Node::new(
        alloc.next(),
        NodeKind::CallExpression { callee: Box::new(iife), arguments: vec![] },
    );
    Node::new(alloc.next(), NodeKind::ExpressionStatement { expression: Box::new(call) })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traversal::replace;

    #[test]
    fn wraps_program_body_in_iife() {
        let mut alloc = NodeIdAllocator::new();
        let stmt = Node::new(alloc.next(), NodeKind::EmptyStatement);
        let mut program = Node::new(alloc.next(), NodeKind::Program { body: vec![stmt] });

        let mut transformer = SelfDefending::new();
        let mut visitor = transformer.get_visitor(NodeTransformationStage::Finalizing).unwrap();
        replace(&mut program, &mut visitor);

        let NodeKind::Program { body } = &program.kind else { panic!() };
        assert_eq!(body.len(), 1);
        let NodeKind::ExpressionStatement { expression } = &body[0].kind else { panic!() };
        let NodeKind::CallExpression { callee, .. } = &expression.kind else { panic!() };
        assert!(matches!(callee.kind, NodeKind::FunctionExpression { .. }));
    }

    #[test]
    fn empty_program_is_left_alone() {
        let mut alloc = NodeIdAllocator::new();
        let mut program = Node::new(alloc.next(), NodeKind::Program { body: vec![] });

        let mut transformer = SelfDefending::new();
        let mut visitor = transformer.get_visitor(NodeTransformationStage::Finalizing).unwrap();
        replace(&mut program, &mut visitor);

        let NodeKind::Program { body } = &program.kind else { panic!() };
        assert!(body.is_empty());
    }
}
