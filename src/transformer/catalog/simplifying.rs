//! Optional stage: folds binary expressions between two numeric literals into a single literal.
//! Runs only when [`crate::config::Options::simplify`] is set, and folds bottom-up (on `leave`)
//! so a chain like `(1 + 2) + 3` collapses fully in one traversal.

use crate::ast::{Node, NodeIdAllocator, NodeKind};
use crate::transformer::{NodeTransformationStage, Transformer, TransformerName};
use crate::visitor::{VisitControl, Visitor};

pub struct Simplifying;

impl Simplifying {
    pub fn new() -> Self {
        Self
    }
}

impl Transformer for Simplifying {
    fn name(&self) -> TransformerName {
        TransformerName::Simplifying
    }

    fn get_visitor(&mut self, stage: NodeTransformationStage) -> Option<Visitor<'_>> {
        if stage != NodeTransformationStage::Simplifying {
            return None;
        }
        Some(Visitor::new().with_leave(|node, _parent| {
            if let NodeKind::BinaryExpression { operator, left, right } = &node.kind {
                if let (NodeKind::NumericLiteral { value: l, .. }, NodeKind::NumericLiteral { value: r, .. }) =
                    (&left.kind, &right.kind)
                {
                    if let Some(folded) = fold(operator, *l, *r) {
                        let mut alloc = NodeIdAllocator::new();
                        return VisitControl::Replace(Node::new(
                            alloc.next(),
                            NodeKind::NumericLiteral { value: folded, raw: crate::ast::builder::format_number(folded) },
                        ));
                    }
                }
            }
            VisitControl::Continue
        }))
    }
}

fn fold(operator: &str, left: f64, right: f64) -> Option<f64> {
    match operator {
        "+" => Some(left + right),
        "-" => Some(left - right),
        "*" => Some(left * right),
        "/" if right != 0.0 => Some(left / right),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traversal::replace;

    #[test]
    fn folds_simple_addition() {
        let mut alloc = NodeIdAllocator::new();
        let left = Node::new(alloc.next(), NodeKind::NumericLiteral { value: 1.0, raw: "1".into() });
        let right = Node::new(alloc.next(), NodeKind::NumericLiteral { value: 2.0, raw: "2".into() });
        let mut expr = Node::new(
            alloc.next(),
            NodeKind::BinaryExpression { operator: "+".into(), left: Box::new(left), right: Box::new(right) },
        );

        let mut transformer = Simplifying::new();
        let mut visitor = transformer.get_visitor(NodeTransformationStage::Simplifying).unwrap();
        replace(&mut expr, &mut visitor);

        let NodeKind::NumericLiteral { value, .. } = &expr.kind else { panic!("expected literal") };
        assert_eq!(*value, 3.0);
    }

    #[test]
    fn folds_nested_chain_bottom_up() {
        let mut alloc = NodeIdAllocator::new();
        let one = Node::new(alloc.next(), NodeKind::NumericLiteral { value: 1.0, raw: "1".into() });
        let two = Node::new(alloc.next(), NodeKind::NumericLiteral { value: 2.0, raw: "2".into() });
        let inner = Node::new(
            alloc.next(),
            NodeKind::BinaryExpression { operator: "+".into(), left: Box::new(one), right: Box::new(two) },
        );
        let three = Node::new(alloc.next(), NodeKind::NumericLiteral { value: 3.0, raw: "3".into() });
        let mut outer = Node::new(
            alloc.next(),
            NodeKind::BinaryExpression { operator: "+".into(), left: Box::new(inner), right: Box::new(three) },
        );

        let mut transformer = Simplifying::new();
        let mut visitor = transformer.get_visitor(NodeTransformationStage::Simplifying).unwrap();
        replace(&mut outer, &mut visitor);

        let NodeKind::NumericLiteral { value, .. } = &outer.kind else { panic!("expected literal") };
        assert_eq!(*value, 6.0);
    }

    #[test]
    fn division_by_zero_is_not_folded() {
        let mut alloc = NodeIdAllocator::new();
        let left = Node::new(alloc.next(), NodeKind::NumericLiteral { value: 1.0, raw: "1".into() });
        let right = Node::new(alloc.next(), NodeKind::NumericLiteral { value: 0.0, raw: "0".into() });
        let mut expr = Node::new(
            alloc.next(),
            NodeKind::BinaryExpression { operator: "/".into(), left: Box::new(left), right: Box::new(right) },
        );

        let mut transformer = Simplifying::new();
        let mut visitor = transformer.get_visitor(NodeTransformationStage::Simplifying).unwrap();
        replace(&mut expr, &mut visitor);

        assert!(matches!(expr.kind, NodeKind::BinaryExpression { .. }));
    }
}
