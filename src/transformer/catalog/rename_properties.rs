//! Optional stage: renames object-literal and non-computed member-expression property names to
//! short generated identifiers, keeping one mapping for the whole traversal so every occurrence
//! of the same original name gets the same replacement. Runs only when
//! [`crate::config::Options::rename_properties`] is set.
//!
//! Unsound in general (a property accessed only via `obj[computedName]` or from outside the
//! rewritten program would break), which is why the original spec gates it behind an explicit
//! opt-in flag rather than enabling it by default.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use super::short_name;
use crate::ast::NodeKind;
use crate::transformer::{NodeTransformationStage, Transformer, TransformerName};
use crate::visitor::{VisitControl, Visitor};

pub struct RenameProperties {
    mapping: Rc<RefCell<HashMap<String, String>>>,
}

impl RenameProperties {
    pub fn new(_rng: Rc<RefCell<crate::random::RandomGenerator>>) -> Self {
        Self { mapping: Rc::new(RefCell::new(HashMap::new())) }
    }
}

impl Transformer for RenameProperties {
    fn name(&self) -> TransformerName {
        TransformerName::RenameProperties
    }

    fn get_visitor(&mut self, stage: NodeTransformationStage) -> Option<Visitor<'_>> {
        if stage != NodeTransformationStage::RenameProperties {
            return None;
        }
        let mapping = self.mapping.clone();
        Some(Visitor::new().with_enter(move |node, _parent| {
            match &mut node.kind {
                NodeKind::Property { key, computed: false, shorthand: false, .. } => {
                    rename_in_place(key, &mapping);
                }
                NodeKind::MemberExpression { property, computed: false, .. } => {
                    rename_in_place(property, &mapping);
                }
                _ => {}
            }
            VisitControl::Continue
        }))
    }
}

fn rename_in_place(key: &mut crate::ast::Node, mapping: &Rc<RefCell<HashMap<String, String>>>) {
    if let NodeKind::Identifier { name } = &mut key.kind {
        let mut mapping = mapping.borrow_mut();
        let len = mapping.len();
        let renamed = mapping.entry(name.clone()).or_insert_with(|| short_name(len));
        *name = renamed.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Node, NodeIdAllocator, PropertyKind};
    use crate::random::RandomGenerator;
    use crate::traversal::replace;

    #[test]
    fn same_property_name_maps_consistently_across_occurrences() {
        let mut alloc = NodeIdAllocator::new();
        let obj = Node::new(alloc.next(), NodeKind::Identifier { name: "o".into() });
        let value = Node::new(alloc.next(), NodeKind::NumericLiteral { value: 1.0, raw: "1".into() });
        let key_a = Node::new(alloc.next(), NodeKind::Identifier { name: "secret".into() });
        let property = Node::new(
            alloc.next(),
            NodeKind::Property {
                key: Box::new(key_a),
                value: Box::new(value),
                kind: PropertyKind::Init,
                computed: false,
                shorthand: false,
            },
        );
        let object_expr = Node::new(alloc.next(), NodeKind::ObjectExpression { properties: vec![property] });
        let key_b = Node::new(alloc.next(), NodeKind::Identifier { name: "secret".into() });
        let member = Node::new(
            alloc.next(),
            NodeKind::MemberExpression { object: Box::new(obj), property: Box::new(key_b), computed: false },
        );
        let stmt1 = Node::new(alloc.next(), NodeKind::ExpressionStatement { expression: Box::new(object_expr) });
        let stmt2 = Node::new(alloc.next(), NodeKind::ExpressionStatement { expression: Box::new(member) });
        let mut program = Node::new(alloc.next(), NodeKind::Program { body: vec![stmt1, stmt2] });

        let mut transformer = RenameProperties::new(Rc::new(RefCell::new(RandomGenerator::new(Some(1)))));
        let mut visitor = transformer.get_visitor(NodeTransformationStage::RenameProperties).unwrap();
        replace(&mut program, &mut visitor);

        let NodeKind::Program { body } = &program.kind else { panic!("expected program") };
        let NodeKind::ExpressionStatement { expression } = &body[0].kind else { panic!() };
        let NodeKind::ObjectExpression { properties } = &expression.kind else { panic!() };
        let NodeKind::Property { key, .. } = &properties[0].kind else { panic!() };
        let NodeKind::Identifier { name: renamed_key } = &key.kind else { panic!() };

        let NodeKind::ExpressionStatement { expression } = &body[1].kind else { panic!() };
        let NodeKind::MemberExpression { property, .. } = &expression.kind else { panic!() };
        let NodeKind::Identifier { name: renamed_property } = &property.kind else { panic!() };

        assert_eq!(renamed_key, renamed_property);
        assert_ne!(renamed_key, "secret");
    }

    #[test]
    fn computed_member_access_is_left_untouched() {
        let mut alloc = NodeIdAllocator::new();
        let obj = Node::new(alloc.next(), NodeKind::Identifier { name: "o".into() });
        let key = Node::new(alloc.next(), NodeKind::Identifier { name: "dynamic".into() });
        let mut member = Node::new(
            alloc.next(),
            NodeKind::MemberExpression { object: Box::new(obj), property: Box::new(key), computed: true },
        );

        let mut transformer = RenameProperties::new(Rc::new(RefCell::new(RandomGenerator::new(Some(1)))));
        let mut visitor = transformer.get_visitor(NodeTransformationStage::RenameProperties).unwrap();
        replace(&mut member, &mut visitor);

        let NodeKind::MemberExpression { property, .. } = &member.kind else { panic!() };
        let NodeKind::Identifier { name } = &property.kind else { panic!() };
        assert_eq!(name, "dynamic");
    }
}
