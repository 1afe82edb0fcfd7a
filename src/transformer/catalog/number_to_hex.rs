//! Converting stage: rewrites non-negative integer literals' `raw` text into hexadecimal (the
//! parsed `value` is unchanged, so later stages that fold on `value` keep working).

use crate::ast::NodeKind;
use crate::transformer::{NodeTransformationStage, Transformer, TransformerName};
use crate::visitor::{VisitControl, Visitor};

pub struct NumberToHex;

impl NumberToHex {
    pub fn new() -> Self {
        Self
    }
}

impl Transformer for NumberToHex {
    fn name(&self) -> TransformerName {
        TransformerName::NumberToHex
    }

    fn get_visitor(&mut self, stage: NodeTransformationStage) -> Option<Visitor<'_>> {
        if stage != NodeTransformationStage::Converting {
            return None;
        }
        Some(Visitor::new().with_enter(|node, _parent| {
            if let NodeKind::NumericLiteral { value, raw } = &mut node.kind {
                if value.fract() == 0.0 && *value >= 0.0 && *value < u32::MAX as f64 {
                    *raw = format!("0x{:x}", *value as u32);
                }
            }
            VisitControl::Continue
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Node, NodeIdAllocator};
    use crate::traversal::replace;

    #[test]
    fn non_negative_integer_becomes_hex_raw() {
        let mut alloc = NodeIdAllocator::new();
        let mut node =
            Node::new(alloc.next(), NodeKind::NumericLiteral { value: 255.0, raw: "255".into() });
        let mut transformer = NumberToHex::new();
        let mut visitor = transformer.get_visitor(NodeTransformationStage::Converting).unwrap();
        replace(&mut node, &mut visitor);
        let NodeKind::NumericLiteral { raw, value } = &node.kind else { panic!() };
        assert_eq!(raw, "0xff");
        assert_eq!(*value, 255.0);
    }

    #[test]
    fn fractional_value_is_left_alone() {
        let mut alloc = NodeIdAllocator::new();
        let mut node =
            Node::new(alloc.next(), NodeKind::NumericLiteral { value: 1.5, raw: "1.5".into() });
        let mut transformer = NumberToHex::new();
        let mut visitor = transformer.get_visitor(NodeTransformationStage::Converting).unwrap();
        replace(&mut node, &mut visitor);
        let NodeKind::NumericLiteral { raw, .. } = &node.kind else { panic!() };
        assert_eq!(raw, "1.5");
    }
}
