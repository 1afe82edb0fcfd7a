//! Small helpers for synthesizing AST nodes, used by transformers that need to introduce new
//! subtrees (identifier renaming targets, dead-code statements, string-array lookups, ...).
//! Mirrors the teacher's preference for free functions over a builder object with mutable state.

use super::{Node, NodeIdAllocator, NodeKind, PropertyKind, VariableDeclarationKind};

pub fn identifier(alloc: &mut NodeIdAllocator, name: impl Into<String>) -> Node {
    Node::new(alloc.next(), NodeKind::Identifier { name: name.into() })
}

pub fn string_literal(alloc: &mut NodeIdAllocator, value: impl Into<String>) -> Node {
    Node::new(alloc.next(), NodeKind::StringLiteral { value: value.into() })
}

pub fn numeric_literal(alloc: &mut NodeIdAllocator, value: f64) -> Node {
    Node::new(
        alloc.next(),
        NodeKind::NumericLiteral { value, raw: format_number(value) },
    )
}

pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

pub fn member_expression(alloc: &mut NodeIdAllocator, object: Node, property: Node, computed: bool) -> Node {
    Node::new(
        alloc.next(),
        NodeKind::MemberExpression {
            object: Box::new(object),
            property: Box::new(property),
            computed,
        },
    )
}

pub fn call_expression(alloc: &mut NodeIdAllocator, callee: Node, arguments: Vec<Node>) -> Node {
    Node::new(
        alloc.next(),
        NodeKind::CallExpression { callee: Box::new(callee), arguments },
    )
}

pub fn array_expression(alloc: &mut NodeIdAllocator, elements: Vec<Node>) -> Node {
    Node::new(
        alloc.next(),
        NodeKind::ArrayExpression { elements: elements.into_iter().map(Some).collect() },
    )
}

pub fn variable_declaration(
    alloc: &mut NodeIdAllocator,
    kind: VariableDeclarationKind,
    name: &str,
    init: Option<Node>,
) -> Node {
    let id = identifier(alloc, name);
    let declarator = Node::new(
        alloc.next(),
        NodeKind::VariableDeclarator { id: Box::new(id), init: init.map(Box::new) },
    );
    Node::new(
        alloc.next(),
        NodeKind::VariableDeclaration { kind, declarations: vec![declarator] },
    )
}

pub fn property(alloc: &mut NodeIdAllocator, key: Node, value: Node, computed: bool) -> Node {
    Node::new(
        alloc.next(),
        NodeKind::Property {
            key: Box::new(key),
            value: Box::new(value),
            kind: PropertyKind::Init,
            computed,
            shorthand: false,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_number_drops_fraction_for_integers() {
        assert_eq!(format_number(3.0), "3");
        assert_eq!(format_number(3.5), "3.5");
    }

    #[test]
    fn builders_allocate_distinct_ids() {
        let mut alloc = NodeIdAllocator::new();
        let a = identifier(&mut alloc, "a");
        let b = identifier(&mut alloc, "b");
        assert_ne!(a.id, b.id);
    }
}
