//! Converting stage: splits string literals longer than a threshold into a chain of `+`-joined
//! chunks, so the original string no longer appears contiguously in the generated source.

use crate::ast::{Node, NodeIdAllocator, NodeKind};
use crate::transformer::{NodeTransformationStage, Transformer, TransformerName};
use crate::visitor::{VisitControl, Visitor};

const CHUNK_LEN: usize = 4;
const MIN_LEN_TO_SPLIT: usize = 8;

pub struct SplitStrings;

impl SplitStrings {
    pub fn new() -> Self {
        Self
    }
}

impl Transformer for SplitStrings {
    fn name(&self) -> TransformerName {
        TransformerName::SplitStrings
    }

    fn get_visitor(&mut self, stage: NodeTransformationStage) -> Option<Visitor<'_>> {
        if stage != NodeTransformationStage::Converting {
            return None;
        }
        Some(Visitor::new().with_enter(|node, _parent| {
            if let NodeKind::StringLiteral { value } = &node.kind {
                if value.chars().count() >= MIN_LEN_TO_SPLIT {
                    // Fresh allocator per literal: the synthesized chunk nodes are self-contained
                    // and nothing outside this subtree looks them up by id, so ids only need to be
                    // unique within it, not across the whole program.
                    let mut alloc = NodeIdAllocator::new();
                    return VisitControl::Replace(split(value, &mut alloc));
                }
            }
            VisitControl::Continue
        }))
    }
}

fn split(value: &str, alloc: &mut NodeIdAllocator) -> Node {
    let chars: Vec<char> = value.chars().collect();
    let mut chunks: Vec<Node> = chars
        .chunks(CHUNK_LEN)
        .map(|chunk| {
            Node::new(
                alloc.next(),
                NodeKind::StringLiteral { value: chunk.iter().collect() },
            )
        })
        .collect();

    let mut acc = chunks.remove(0);
    for chunk in chunks {
        acc = Node::new(
            alloc.next(),
            NodeKind::BinaryExpression {
                operator: "+".to_string(),
                left: Box::new(acc),
                right: Box::new(chunk),
            },
        );
    }
    acc
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traversal::replace;

    #[test]
    fn short_string_is_left_alone() {
        let mut alloc = NodeIdAllocator::new();
        let mut node = Node::new(alloc.next(), NodeKind::StringLiteral { value: "hi".into() });
        let mut transformer = SplitStrings::new();
        let mut visitor = transformer.get_visitor(NodeTransformationStage::Converting).unwrap();
        replace(&mut node, &mut visitor);
        assert!(matches!(node.kind, NodeKind::StringLiteral { .. }));
    }

    #[test]
    fn long_string_becomes_concatenation_chain() {
        let mut alloc = NodeIdAllocator::new();
        let mut node =
            Node::new(alloc.next(), NodeKind::StringLiteral { value: "abcdefghij".into() });
        let mut transformer = SplitStrings::new();
        let mut visitor = transformer.get_visitor(NodeTransformationStage::Converting).unwrap();
        replace(&mut node, &mut visitor);
        assert!(matches!(node.kind, NodeKind::BinaryExpression { .. }));
    }
}
