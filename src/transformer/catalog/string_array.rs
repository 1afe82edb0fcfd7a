//! Collects every string literal in the program into one array declared at the top of `Program`,
//! replacing each literal's original position with an indexed lookup into it. Runs unconditionally
//! in the `StringArray` stage.
//!
//! String literals are gathered during the pre-order `enter` (so nested literals under later
//! statements are seen before the array declaration is built) and the declaration itself is
//! inserted on `Program`'s post-order `leave`, once every literal beneath it has already been
//! visited and replaced.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::ast::{Node, NodeIdAllocator, NodeKind};
use crate::random::RandomGenerator;
use crate::transformer::{NodeTransformationStage, Transformer, TransformerName};
use crate::visitor::{VisitControl, Visitor};

const ARRAY_NAME: &str = "_stringArray";

pub struct StringArray {
    _rng: Rc<RefCell<RandomGenerator>>,
    strings: Rc<RefCell<Vec<String>>>,
    mapping: Rc<RefCell<HashMap<String, usize>>>,
}

impl StringArray {
    pub fn new(rng: Rc<RefCell<RandomGenerator>>) -> Self {
        Self {
            _rng: rng,
            strings: Rc::new(RefCell::new(Vec::new())),
            mapping: Rc::new(RefCell::new(HashMap::new())),
        }
    }
}

impl Transformer for StringArray {
    fn name(&self) -> TransformerName {
        TransformerName::StringArray
    }

    fn get_visitor(&mut self, stage: NodeTransformationStage) -> Option<Visitor<'_>> {
        if stage != NodeTransformationStage::StringArray {
            return None;
        }
        let strings = self.strings.clone();
        let mapping = self.mapping.clone();
        let strings_for_leave = self.strings.clone();

        Some(
            Visitor::new()
                .with_enter(move |node, _parent| {
                    if let NodeKind::StringLiteral { value } = &node.kind {
                        let mut mapping = mapping.borrow_mut();
                        let index = *mapping.entry(value.clone()).or_insert_with(|| {
                            let mut strings = strings.borrow_mut();
                            strings.push(value.clone());
                            strings.len() - 1
                        });
                        // Fresh allocator per lookup site, same rationale as split_strings: a
                        // two-node subtree nothing else indexes by id.
                        let mut alloc = NodeIdAllocator::new();
                        return VisitControl::Replace(lookup(index, &mut alloc));
                    }
                    VisitControl::Continue
                })
                .with_leave(move |node, _parent| {
                    if let NodeKind::Program { body } = &mut node.kind {
                        let strings = strings_for_leave.borrow();
                        if !strings.is_empty() {
                            let mut alloc = NodeIdAllocator::new();
                            body.insert(0, array_declaration(&strings, &mut alloc));
                        }
                    }
                    VisitControl::Continue
                }),
        )
    }
}

fn lookup(index: usize, alloc: &mut NodeIdAllocator) -> Node {
    let array_ref = Node::new(alloc.next(), NodeKind::Identifier { name: ARRAY_NAME.to_string() });
    let index_literal =
        Node::new(alloc.next(), NodeKind::NumericLiteral { value: index as f64, raw: index.to_string() });
    Node::new(
        alloc.next(),
        NodeKind::MemberExpression { object: Box::new(array_ref), property: Box::new(index_literal), computed: true },
    )
}

fn array_declaration(strings: &[String], alloc: &mut NodeIdAllocator) -> Node {
    let elements: Vec<Option<Node>> = strings
        .iter()
        .map(|s| Some(Node::new(alloc.next(), NodeKind::StringLiteral { value: s.clone() })))
        .collect();
    let array = Node::new(alloc.next(), NodeKind::ArrayExpression { elements });
    let id = Node::new(alloc.next(), NodeKind::Identifier { name: ARRAY_NAME.to_string() });
    let declarator = Node::new(
        alloc.next(),
        NodeKind::VariableDeclarator { id: Box::new(id), init: Some(Box::new(array)) },
    );
    Node::new(
        alloc.next(),
        NodeKind::VariableDeclaration {
            kind: crate::ast::VariableDeclarationKind::Var,
            declarations: vec![declarator],
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traversal::replace;

    #[test]
    fn string_literals_become_array_lookups_and_array_is_prepended() {
        let mut alloc = NodeIdAllocator::new();
        let lit_a = Node::new(alloc.next(), NodeKind::StringLiteral { value: "hello".into() });
        let lit_b = Node::new(alloc.next(), NodeKind::StringLiteral { value: "world".into() });
        let stmt_a = Node::new(alloc.next(), NodeKind::ExpressionStatement { expression: Box::new(lit_a) });
        let stmt_b = Node::new(alloc.next(), NodeKind::ExpressionStatement { expression: Box::new(lit_b) });
        let mut program = Node::new(alloc.next(), NodeKind::Program { body: vec![stmt_a, stmt_b] });

        let rng = Rc::new(RefCell::new(RandomGenerator::new(Some(1))));
        let mut transformer = StringArray::new(rng);
        let mut visitor = transformer.get_visitor(NodeTransformationStage::StringArray).unwrap();
        replace(&mut program, &mut visitor);

        let NodeKind::Program { body } = &program.kind else { panic!() };
        assert_eq!(body.len(), 3);
        assert!(matches!(body[0].kind, NodeKind::VariableDeclaration { .. }));
        let NodeKind::ExpressionStatement { expression } = &body[1].kind else { panic!() };
        assert!(matches!(expression.kind, NodeKind::MemberExpression { .. }));
    }

    #[test]
    fn duplicate_strings_share_one_array_slot() {
        let mut alloc = NodeIdAllocator::new();
        let lit_a = Node::new(alloc.next(), NodeKind::StringLiteral { value: "dup".into() });
        let lit_b = Node::new(alloc.next(), NodeKind::StringLiteral { value: "dup".into() });
        let stmt_a = Node::new(alloc.next(), NodeKind::ExpressionStatement { expression: Box::new(lit_a) });
        let stmt_b = Node::new(alloc.next(), NodeKind::ExpressionStatement { expression: Box::new(lit_b) });
        let mut program = Node::new(alloc.next(), NodeKind::Program { body: vec![stmt_a, stmt_b] });

        let rng = Rc::new(RefCell::new(RandomGenerator::new(Some(1))));
        let mut transformer = StringArray::new(rng);
        let mut visitor = transformer.get_visitor(NodeTransformationStage::StringArray).unwrap();
        replace(&mut program, &mut visitor);

        let NodeKind::Program { body } = &program.kind else { panic!() };
        let NodeKind::VariableDeclaration { declarations, .. } = &body[0].kind else { panic!() };
        let NodeKind::VariableDeclarator { init: Some(init), .. } = &declarations[0].kind else { panic!() };
        let NodeKind::ArrayExpression { elements } = &init.kind else { panic!() };
        assert_eq!(elements.len(), 1);
    }
}
