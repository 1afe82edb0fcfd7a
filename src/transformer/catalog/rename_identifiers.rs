//! Renames `Identifier` nodes to short generated names, one mapping per traversal so every
//! occurrence of an original name gets the same replacement. Deliberately not scope-aware (a
//! single global mapping, not scope-aware shadowing) — a genuine simplification over a
//! production obfuscator's scope analysis, acceptable for this catalog's modest transformer
//! bodies.
//!
//! Skips identifiers that aren't variable/function references: non-computed property keys and
//! member-expression property names (handled, if at all, by `RenameProperties`), and statement
//! labels (`break`/`continue`/labeled-statement targets live in a separate namespace). Those
//! positions are marked by their *parent* node, one level above, right before the traversal
//! descends into them — pre-order enter guarantees the parent runs first.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use super::short_name;
use crate::ast::{NodeId, ParentMap};
use crate::transformer::{NodeTransformationStage, Transformer, TransformerName};
use crate::visitor::{VisitControl, Visitor};

pub struct RenameIdentifiers {
    _parents: Rc<RefCell<ParentMap>>,
    mapping: Rc<RefCell<HashMap<String, String>>>,
    skip_ids: Rc<RefCell<HashSet<NodeId>>>,
}

impl RenameIdentifiers {
    pub fn new(parents: Rc<RefCell<ParentMap>>) -> Self {
        Self {
            _parents: parents,
            mapping: Rc::new(RefCell::new(HashMap::new())),
            skip_ids: Rc::new(RefCell::new(HashSet::new())),
        }
    }
}

impl Transformer for RenameIdentifiers {
    fn name(&self) -> TransformerName {
        TransformerName::RenameIdentifiers
    }

    fn get_visitor(&mut self, stage: NodeTransformationStage) -> Option<Visitor<'_>> {
        if stage != NodeTransformationStage::RenameIdentifiers {
            return None;
        }
        let mapping = self.mapping.clone();
        let skip_ids = self.skip_ids.clone();
        Some(Visitor::new().with_enter(move |node, _parent| {
            use crate::ast::NodeKind::*;
            match &node.kind {
                Property { key, computed: false, .. } => {
                    skip_ids.borrow_mut().insert(key.id);
                }
                MemberExpression { property, computed: false, .. } => {
                    skip_ids.borrow_mut().insert(property.id);
                }
                ImportSpecifier { imported, .. } => {
                    skip_ids.borrow_mut().insert(imported.id);
                }
                ExportSpecifier { exported, .. } => {
                    skip_ids.borrow_mut().insert(exported.id);
                }
                LabeledStatement { label, .. } => {
                    skip_ids.borrow_mut().insert(label.id);
                }
                BreakStatement { label: Some(label) } | ContinueStatement { label: Some(label) } => {
                    skip_ids.borrow_mut().insert(label.id);
                }
                _ => {}
            }

            if skip_ids.borrow().contains(&node.id) {
                return VisitControl::Continue;
            }
            if let crate::ast::NodeKind::Identifier { name } = &mut node.kind {
                let mut mapping = mapping.borrow_mut();
                let len = mapping.len();
                let renamed = mapping.entry(name.clone()).or_insert_with(|| short_name(len));
                *name = renamed.clone();
            }
            VisitControl::Continue
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Node, NodeIdAllocator, NodeKind, PropertyKind};
    use crate::traversal::replace;

    fn parents() -> Rc<RefCell<ParentMap>> {
        Rc::new(RefCell::new(ParentMap::new()))
    }

    #[test]
    fn renames_plain_identifiers_consistently() {
        let mut alloc = NodeIdAllocator::new();
        let a1 = Node::new(alloc.next(), NodeKind::Identifier { name: "x".into() });
        let a2 = Node::new(alloc.next(), NodeKind::Identifier { name: "x".into() });
        let stmt1 = Node::new(alloc.next(), NodeKind::ExpressionStatement { expression: Box::new(a1) });
        let stmt2 = Node::new(alloc.next(), NodeKind::ExpressionStatement { expression: Box::new(a2) });
        let mut program = Node::new(alloc.next(), NodeKind::Program { body: vec![stmt1, stmt2] });

        let mut transformer = RenameIdentifiers::new(parents());
        let mut visitor = transformer.get_visitor(NodeTransformationStage::RenameIdentifiers).unwrap();
        replace(&mut program, &mut visitor);

        let NodeKind::Program { body } = &program.kind else { panic!() };
        let NodeKind::ExpressionStatement { expression: e1 } = &body[0].kind else { panic!() };
        let NodeKind::ExpressionStatement { expression: e2 } = &body[1].kind else { panic!() };
        let NodeKind::Identifier { name: n1 } = &e1.kind else { panic!() };
        let NodeKind::Identifier { name: n2 } = &e2.kind else { panic!() };
        assert_eq!(n1, n2);
        assert_ne!(n1, "x");
    }

    #[test]
    fn does_not_rename_non_computed_property_key() {
        let mut alloc = NodeIdAllocator::new();
        let key = Node::new(alloc.next(), NodeKind::Identifier { name: "secret".into() });
        let value = Node::new(alloc.next(), NodeKind::NumericLiteral { value: 1.0, raw: "1".into() });
        let mut property = Node::new(
            alloc.next(),
            NodeKind::Property {
                key: Box::new(key),
                value: Box::new(value),
                kind: PropertyKind::Init,
                computed: false,
                shorthand: false,
            },
        );

        let mut transformer = RenameIdentifiers::new(parents());
        let mut visitor = transformer.get_visitor(NodeTransformationStage::RenameIdentifiers).unwrap();
        replace(&mut property, &mut visitor);

        let NodeKind::Property { key, .. } = &property.kind else { panic!() };
        let NodeKind::Identifier { name } = &key.kind else { panic!() };
        assert_eq!(name, "secret");
    }
}
