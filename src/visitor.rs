//! Visitor protocol shared by every transformer's node-level hooks.
//!
//! A visitor is a pair of optional callbacks run on the way down (`enter`) and the way back up
//! (`leave`) through the tree. Callbacks receive the node being visited and its parent's id
//! (looked up from the [`crate::ast::ParentMap`] rebuilt by Parentification, not a live pointer),
//! so a callback can mutate `node` freely without fighting the borrow checker over a parent
//! reference that would alias it.

use crate::ast::{Node, NodeId};

/// What the traversal engine should do after a callback runs.
pub enum VisitControl {
    /// Keep walking normally.
    Continue,
    /// Replace the current node with a new one and keep walking from the replacement's children.
    Replace(Node),
    /// Don't descend into this node's children (its `leave` callback still runs).
    SkipSubtree,
    /// Stop the whole traversal immediately.
    Abort,
}

type EnterFn<'a> = Box<dyn FnMut(&mut Node, Option<NodeId>) -> VisitControl + 'a>;
type LeaveFn<'a> = Box<dyn FnMut(&mut Node, Option<NodeId>) -> VisitControl + 'a>;

/// One transformer's contribution to a fused traversal pass. Either hook may be absent; an
/// absent hook behaves as `Continue`.
#[derive(Default)]
pub struct Visitor<'a> {
    enter: Option<EnterFn<'a>>,
    leave: Option<LeaveFn<'a>>,
}

impl<'a> Visitor<'a> {
    pub fn new() -> Self {
        Self { enter: None, leave: None }
    }

    pub fn with_enter(mut self, f: impl FnMut(&mut Node, Option<NodeId>) -> VisitControl + 'a) -> Self {
        self.enter = Some(Box::new(f));
        self
    }

    pub fn with_leave(mut self, f: impl FnMut(&mut Node, Option<NodeId>) -> VisitControl + 'a) -> Self {
        self.leave = Some(Box::new(f));
        self
    }

    pub fn run_enter(&mut self, node: &mut Node, parent: Option<NodeId>) -> VisitControl {
        match &mut self.enter {
            Some(f) => f(node, parent),
            None => VisitControl::Continue,
        }
    }

    pub fn run_leave(&mut self, node: &mut Node, parent: Option<NodeId>) -> VisitControl {
        match &mut self.leave {
            Some(f) => f(node, parent),
            None => VisitControl::Continue,
        }
    }

    pub fn has_enter(&self) -> bool {
        self.enter.is_some()
    }

    pub fn has_leave(&self) -> bool {
        self.leave.is_some()
    }
}

/// Chains several visitors' `enter`/`leave` callbacks into one, left-to-right, threading any
/// replacement through to the next visitor in the chain. Used by the scheduler to fuse every
/// transformer in a batch into a single traversal pass (see
/// [`crate::transformer::scheduler`]).
pub fn fuse<'a>(visitors: Vec<Visitor<'a>>) -> Visitor<'a> {
    let mut visitors = visitors;
    if visitors.len() == 1 {
        return visitors.pop().unwrap();
    }

    let has_enter = visitors.iter().any(|v| v.has_enter());
    let has_leave = visitors.iter().any(|v| v.has_leave());

    let visitors = std::rc::Rc::new(std::cell::RefCell::new(visitors));

    let mut out = Visitor::new();
    if has_enter {
        let visitors = visitors.clone();
        out = out.with_enter(move |node, parent| {
            let mut visitors = visitors.borrow_mut();
            for v in visitors.iter_mut() {
                match v.run_enter(node, parent) {
                    VisitControl::Continue => {}
                    VisitControl::Replace(new_node) => *node = new_node,
                    other @ (VisitControl::SkipSubtree | VisitControl::Abort) => return other,
                }
            }
            VisitControl::Continue
        });
    }
    if has_leave {
        let visitors = visitors.clone();
        out = out.with_leave(move |node, parent| {
            let mut visitors = visitors.borrow_mut();
            for v in visitors.iter_mut() {
                match v.run_leave(node, parent) {
                    VisitControl::Continue => {}
                    VisitControl::Replace(new_node) => *node = new_node,
                    other @ (VisitControl::SkipSubtree | VisitControl::Abort) => return other,
                }
            }
            VisitControl::Continue
        });
    }
    out
}
