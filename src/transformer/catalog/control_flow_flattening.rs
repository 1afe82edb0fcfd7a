//! Rewrites a block's flat statement sequence into a `while (true) { switch (state) { ... } }`
//! dispatcher whose `case` labels are declared in a shuffled order while the `state` transitions
//! between them still walk the original sequence — execution order is preserved, the textual
//! layout isn't.
//!
//! Always active (not gated by an [`crate::config::Options`] flag, per the stage driver's fixed
//! order).

use std::cell::RefCell;
use std::rc::Rc;

use crate::ast::{Node, NodeIdAllocator, NodeKind, VariableDeclarationKind};
use crate::random::RandomGenerator;
use crate::transformer::{NodeTransformationStage, Transformer, TransformerName};
use crate::visitor::{VisitControl, Visitor};

pub struct ControlFlowFlattening {
    rng: Rc<RefCell<RandomGenerator>>,
}

impl ControlFlowFlattening {
    pub fn new(rng: Rc<RefCell<RandomGenerator>>) -> Self {
        Self { rng }
    }
}

impl Transformer for ControlFlowFlattening {
    fn name(&self) -> TransformerName {
        TransformerName::ControlFlowFlattening
    }

    fn get_visitor(&mut self, stage: NodeTransformationStage) -> Option<Visitor<'_>> {
        if stage != NodeTransformationStage::ControlFlowFlattening {
            return None;
        }
        let rng = self.rng.clone();
        Some(Visitor::new().with_enter(move |node, _parent| {
            let body = match &mut node.kind {
                NodeKind::BlockStatement { body } => body,
                NodeKind::Program { body } => body,
                _ => return VisitControl::Continue,
            };
            if body.len() < 2 {
                return VisitControl::Continue;
            }
            let mut alloc = NodeIdAllocator::new();
            *body = flatten(std::mem::take(body), &mut alloc, &rng);
            VisitControl::Continue
        }))
    }
}

/// Synthesized ids here use a fresh, block-scoped allocator rather than the shared one: this
/// transformer only ever builds self-contained dispatcher scaffolding around statements it
/// already owns, and nothing outside this subtree looks those scaffolding nodes up by id.
fn flatten(statements: Vec<Node>, alloc: &mut NodeIdAllocator, rng: &Rc<RefCell<RandomGenerator>>) -> Vec<Node> {
    let n = statements.len();
    let state_name = "_cffState";
    let label_name = "_cff";

    let mut case_order: Vec<usize> = (0..n).collect();
    rng.borrow_mut().shuffle(&mut case_order);

    let mut cases = Vec::with_capacity(n);
    for (idx, stmt) in statements.into_iter().enumerate() {
        let next_state = idx + 1;
        let advance = Node::new(
            alloc.next(),
            NodeKind::ExpressionStatement {
                expression: Box::new(Node::new(
                    alloc.next(),
                    NodeKind::AssignmentExpression {
                        operator: "=".to_string(),
                        left: Box::new(ident(alloc, state_name)),
                        right: Box::new(numeric(alloc, next_state as f64)),
                    },
                )),
            },
        );
        let brk = Node::new(alloc.next(), NodeKind::BreakStatement { label: None });
        cases.push((
            idx,
            Node::new(
                alloc.next(),
                NodeKind::SwitchCase {
                    test: Some(Box::new(numeric(alloc, idx as f64))),
                    consequent: vec![stmt, advance, brk],
                },
            ),
        ));
    }

    // Reorder the cases textually per the shuffle, keeping each case's `test` value (its real
    // position in the sequence) intact — the switch dispatch, not the source layout, carries
    // execution order.
    let mut by_index: std::collections::HashMap<usize, Node> = cases.into_iter().collect();
    let mut shuffled_cases: Vec<Node> = case_order.iter().map(|i| by_index.remove(i).unwrap()).collect();

    let default_break =
        Node::new(alloc.next(), NodeKind::BreakStatement { label: Some(Box::new(ident(alloc, label_name))) });
    shuffled_cases.push(Node::new(
        alloc.next(),
        NodeKind::SwitchCase { test: None, consequent: vec![default_break] },
    ));

    let switch_stmt = Node::new(
        alloc.next(),
        NodeKind::SwitchStatement {
            discriminant: Box::new(ident(alloc, state_name)),
            cases: shuffled_cases,
        },
    );
    let while_body = Node::new(alloc.next(), NodeKind::BlockStatement { body: vec![switch_stmt] });
    let while_stmt = Node::new(
        alloc.next(),
        NodeKind::WhileStatement {
            test: Box::new(Node::new(alloc.next(), NodeKind::BooleanLiteral { value: true })),
            body: Box::new(while_body),
        },
    );
    let labeled = Node::new(
        alloc.next(),
        NodeKind::LabeledStatement { label: Box::new(ident(alloc, label_name)), body: Box::new(while_stmt) },
    );

    let state_decl = Node::new(
        alloc.next(),
        NodeKind::VariableDeclaration {
            kind: VariableDeclarationKind::Var,
            declarations: vec![Node::new(
                alloc.next(),
                NodeKind::VariableDeclarator {
                    id: Box::new(ident(alloc, state_name)),
                    init: Some(Box::new(numeric(alloc, 0.0))),
                },
            )],
        },
    );

    vec![state_decl, labeled]
}

fn ident(alloc: &mut NodeIdAllocator, name: &str) -> Node {
    Node::new(alloc.next(), NodeKind::Identifier { name: name.to_string() })
}

fn numeric(alloc: &mut NodeIdAllocator, value: f64) -> Node {
    Node::new(alloc.next(), NodeKind::NumericLiteral { value, raw: crate::ast::builder::format_number(value) })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traversal::replace;

    #[test]
    fn flattens_multi_statement_block_into_dispatcher() {
        let mut alloc = NodeIdAllocator::new();
        let a = Node::new(alloc.next(), NodeKind::EmptyStatement);
        let b = Node::new(alloc.next(), NodeKind::EmptyStatement);
        let mut program = Node::new(alloc.next(), NodeKind::Program { body: vec![a, b] });

        let rng = Rc::new(RefCell::new(RandomGenerator::new(Some(3))));
        let mut transformer = ControlFlowFlattening::new(rng);
        let mut visitor =
            transformer.get_visitor(NodeTransformationStage::ControlFlowFlattening).unwrap();
        replace(&mut program, &mut visitor);

        let NodeKind::Program { body } = &program.kind else { panic!("expected program") };
        assert_eq!(body.len(), 2);
        assert!(matches!(body[0].kind, NodeKind::VariableDeclaration { .. }));
        assert!(matches!(body[1].kind, NodeKind::LabeledStatement { .. }));
    }

    #[test]
    fn leaves_single_statement_block_unflattened() {
        let mut alloc = NodeIdAllocator::new();
        let a = Node::new(alloc.next(), NodeKind::EmptyStatement);
        let mut program = Node::new(alloc.next(), NodeKind::Program { body: vec![a] });

        let rng = Rc::new(RefCell::new(RandomGenerator::new(Some(3))));
        let mut transformer = ControlFlowFlattening::new(rng);
        let mut visitor =
            transformer.get_visitor(NodeTransformationStage::ControlFlowFlattening).unwrap();
        replace(&mut program, &mut visitor);

        let NodeKind::Program { body } = &program.kind else { panic!("expected program") };
        assert_eq!(body.len(), 1);
        assert!(matches!(body[0].kind, NodeKind::EmptyStatement));
    }

    #[test]
    fn case_values_preserve_original_order_regardless_of_shuffle() {
        let mut alloc = NodeIdAllocator::new();
        let mut scratch_alloc = NodeIdAllocator::new();
        let rng = Rc::new(RefCell::new(RandomGenerator::new(Some(99))));
        let statements: Vec<Node> =
            (0..4).map(|_| Node::new(alloc.next(), NodeKind::EmptyStatement)).collect();
        let flattened = flatten(statements, &mut scratch_alloc, &rng);
        let NodeKind::LabeledStatement { body, .. } = &flattened[1].kind else {
            panic!("expected labeled statement");
        };
        let NodeKind::WhileStatement { body: while_body, .. } = &body.kind else {
            panic!("expected while statement");
        };
        let NodeKind::BlockStatement { body: switch_body } = &while_body.kind else {
            panic!("expected block");
        };
        let NodeKind::SwitchStatement { cases, .. } = &switch_body[0].kind else {
            panic!("expected switch");
        };
        let mut seen_case_values = Vec::new();
        for case in cases {
            if let NodeKind::SwitchCase { test: Some(test), .. } = &case.kind {
                if let NodeKind::NumericLiteral { value, .. } = &test.kind {
                    seen_case_values.push(*value as usize);
                }
            }
        }
        let mut sorted = seen_case_values.clone();
        sorted.sort();
        assert_eq!(sorted, vec![0, 1, 2, 3]);
    }
}
