//! Depth-first traversal engine: pre-order `enter`, post-order `leave`, driven by plain Rust
//! recursion over [`NodeKind::children_mut`]. A node flagged `ignored` is skipped whole — neither
//! its own callbacks nor its descendants' run.

use crate::ast::{Node, NodeId};
use crate::visitor::{VisitControl, Visitor};

/// Walks `root`, running `visitor`'s `enter`/`leave` callbacks at every unignored node.
///
/// - `Continue` keeps walking normally.
/// - `Replace(new)` swaps the node in place; traversal continues into the replacement's children.
/// - `SkipSubtree` from `enter` skips straight to `leave` for the same node without visiting
///   children.
/// - `Abort` stops the walk immediately, anywhere in the tree.
pub fn replace(root: &mut Node, visitor: &mut Visitor) {
    walk(root, None, visitor);
}

/// Returns `true` if the walk was aborted (so a caller driving multiple batches can stop early).
fn walk(node: &mut Node, parent: Option<NodeId>, visitor: &mut Visitor) -> bool {
    if node.ignored {
        return false;
    }

    let mut skip_children = false;
    match visitor.run_enter(node, parent) {
        VisitControl::Continue => {}
        VisitControl::Replace(new) => *node = new,
        VisitControl::SkipSubtree => skip_children = true,
        VisitControl::Abort => return true,
    }

    if !skip_children {
        let self_id = node.id;
        for child in node.kind.children_mut() {
            if walk(child, Some(self_id), visitor) {
                return true;
            }
        }
    }

    match visitor.run_leave(node, parent) {
        VisitControl::Continue => {}
        VisitControl::Replace(new) => *node = new,
        VisitControl::SkipSubtree => {}
        VisitControl::Abort => return true,
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{NodeIdAllocator, NodeKind};

    fn ident(alloc: &mut NodeIdAllocator, name: &str) -> Node {
        Node::new(alloc.next(), NodeKind::Identifier { name: name.to_string() })
    }

    #[test]
    fn visits_every_node_pre_and_post_order() {
        let mut alloc = NodeIdAllocator::new();
        let a = ident(&mut alloc, "a");
        let b = ident(&mut alloc, "b");
        let mut program = Node::new(alloc.next(), NodeKind::Program { body: vec![a, b] });

        let entered = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));
        let left = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));
        let e = entered.clone();
        let l = left.clone();
        let mut visitor = Visitor::new()
            .with_enter(move |n, _| {
                e.borrow_mut().push(n.kind.tag());
                VisitControl::Continue
            })
            .with_leave(move |n, _| {
                l.borrow_mut().push(n.kind.tag());
                VisitControl::Continue
            });

        replace(&mut program, &mut visitor);

        assert_eq!(*entered.borrow(), vec!["Program", "Identifier", "Identifier"]);
        assert_eq!(*left.borrow(), vec!["Identifier", "Identifier", "Program"]);
    }

    #[test]
    fn ignored_node_is_skipped_whole() {
        let mut alloc = NodeIdAllocator::new();
        let mut a = ident(&mut alloc, "a");
        a.ignored = true;
        let b = ident(&mut alloc, "b");
        let mut program = Node::new(alloc.next(), NodeKind::Program { body: vec![a, b] });

        let visited = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));
        let v = visited.clone();
        let mut visitor = Visitor::new().with_enter(move |n, _| {
            v.borrow_mut().push(n.kind.tag());
            VisitControl::Continue
        });

        replace(&mut program, &mut visitor);
        assert_eq!(*visited.borrow(), vec!["Program", "Identifier"]);
    }

    #[test]
    fn replace_swaps_node_and_descends_into_replacement() {
        let mut alloc = NodeIdAllocator::new();
        let a = ident(&mut alloc, "a");
        let mut program = Node::new(alloc.next(), NodeKind::Program { body: vec![a] });

        let mut visitor = Visitor::new().with_enter(|n, _| {
            if let NodeKind::Identifier { name } = &n.kind {
                if name == "a" {
                    return VisitControl::Replace(Node::new(
                        n.id,
                        NodeKind::Identifier { name: "renamed".into() },
                    ));
                }
            }
            VisitControl::Continue
        });

        replace(&mut program, &mut visitor);
        if let NodeKind::Program { body } = &program.kind {
            if let NodeKind::Identifier { name } = &body[0].kind {
                assert_eq!(name, "renamed");
            } else {
                panic!("expected identifier");
            }
        } else {
            panic!("expected program");
        }
    }

    #[test]
    fn abort_stops_traversal_immediately() {
        let mut alloc = NodeIdAllocator::new();
        let a = ident(&mut alloc, "a");
        let b = ident(&mut alloc, "b");
        let mut program = Node::new(alloc.next(), NodeKind::Program { body: vec![a, b] });

        let visited = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));
        let v = visited.clone();
        let mut visitor = Visitor::new().with_enter(move |n, _| {
            v.borrow_mut().push(n.kind.tag());
            if n.kind.tag() == "Identifier" {
                VisitControl::Abort
            } else {
                VisitControl::Continue
            }
        });

        replace(&mut program, &mut visitor);
        assert_eq!(*visited.borrow(), vec!["Program", "Identifier"]);
    }
}
