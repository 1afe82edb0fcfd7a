//! # AST Model
//!
//! A single, closed tree representation of an ECMAScript program. Every syntactic category
//! (statement, expression, pattern, literal, ...) is a case of one [`NodeKind`] sum type rather
//! than a class hierarchy, so the traversal engine (see [`crate::traversal`]) can dispatch on the
//! tag uniformly instead of walking a dozen unrelated node families.
//!
//! Constructs this crate does not deeply model (module import/export forms, optional chaining,
//! decorators, BigInt literals, ...) are preserved losslessly as [`NodeKind::Opaque`] nodes
//! carrying their exact original source text in [`Node::verbatim`]; the generator emits that text
//! unchanged. This keeps semantics-preservation exact for `obfuscate` even though only a subset of
//! the grammar is rewritable by the catalog.

use std::collections::HashMap;
use std::fmt;

pub mod builder;

/// Unique, process-local identifier for a node within one AST.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Monotonic node id source. One allocator is created per parse and threaded through every
/// constructor; transformers that synthesize new nodes take a `&mut NodeIdAllocator` too so ids
/// stay unique for the lifetime of one obfuscation call.
#[derive(Debug, Default)]
pub struct NodeIdAllocator(u32);

impl NodeIdAllocator {
    pub fn new() -> Self {
        Self(0)
    }

    pub fn next(&mut self) -> NodeId {
        let id = NodeId(self.0);
        self.0 += 1;
        id
    }
}

/// Byte offsets into the originating source string. `end` is exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Slices `source` with this span, falling back to an empty string on out-of-range spans
    /// (can happen for synthesized nodes reusing a stale span).
    pub fn slice<'s>(&self, source: &'s str) -> &'s str {
        source
            .get(self.start as usize..self.end as usize)
            .unwrap_or("")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentKind {
    Line,
    Block,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub text: String,
    pub span: Span,
    pub kind: CommentKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableDeclarationKind {
    Var,
    Let,
    Const,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodKind {
    Constructor,
    Method,
    Get,
    Set,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyKind {
    Init,
    Get,
    Set,
}

/// One node in the AST. Uniform envelope (id, span, comments, `ignored` flag, `verbatim`
/// override) around a tagged [`NodeKind`] payload.
#[derive(Debug, Clone)]
pub struct Node {
    pub id: NodeId,
    pub kind: NodeKind,
    /// Byte range in the source that produced this node, if known (absent for synthesized nodes).
    pub span: Option<Span>,
    pub leading_comments: Vec<Comment>,
    pub trailing_comments: Vec<Comment>,
    /// Set by the Parentification transformer (Initializing stage); absent before it runs or
    /// after a batch that restructures the tree without re-running it.
    ///
    /// When present, `ignored` subtrees are skipped whole by [`crate::traversal::replace`].
    pub ignored: bool,
    /// When set, the generator emits this text verbatim instead of printing `kind`. Populated by
    /// the parser for constructs not deeply modeled (see module docs), and can be set by
    /// transformers that want to freeze a subtree's textual form (e.g. after string-array
    /// wrapping a literal).
    pub verbatim: Option<String>,
}

impl Node {
    pub fn new(id: NodeId, kind: NodeKind) -> Self {
        Self {
            id,
            kind,
            span: None,
            leading_comments: Vec::new(),
            trailing_comments: Vec::new(),
            ignored: false,
            verbatim: None,
        }
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    pub fn opaque(id: NodeId, label: &'static str, span: Span, source: &str) -> Self {
        let mut node = Node::new(id, NodeKind::Opaque(label));
        node.verbatim = Some(span.slice(source).to_string());
        node.span = Some(span);
        node
    }
}

/// The closed sum of ECMAScript constructs this crate rewrites. Children are owned (`Box<Node>`
/// for single children, `Vec<Node>` for lists); there is no aliasing within a tree.
#[derive(Debug, Clone)]
pub enum NodeKind {
    Program {
        body: Vec<Node>,
    },

    // --- statements ---
    VariableDeclaration {
        kind: VariableDeclarationKind,
        declarations: Vec<Node>,
    },
    VariableDeclarator {
        id: Box<Node>,
        init: Option<Box<Node>>,
    },
    FunctionDeclaration {
        id: Option<Box<Node>>,
        params: Vec<Node>,
        body: Box<Node>,
        is_async: bool,
        is_generator: bool,
    },
    ClassDeclaration {
        id: Option<Box<Node>>,
        super_class: Option<Box<Node>>,
        body: Vec<Node>,
    },
    PropertyDefinition {
        key: Box<Node>,
        value: Option<Box<Node>>,
        is_static: bool,
        computed: bool,
    },
    MethodDefinition {
        key: Box<Node>,
        value: Box<Node>,
        kind: MethodKind,
        is_static: bool,
        computed: bool,
    },
    BlockStatement {
        body: Vec<Node>,
    },
    ExpressionStatement {
        expression: Box<Node>,
    },
    EmptyStatement,
    ReturnStatement {
        argument: Option<Box<Node>>,
    },
    IfStatement {
        test: Box<Node>,
        consequent: Box<Node>,
        alternate: Option<Box<Node>>,
    },
    WhileStatement {
        test: Box<Node>,
        body: Box<Node>,
    },
    DoWhileStatement {
        test: Box<Node>,
        body: Box<Node>,
    },
    ForStatement {
        init: Option<Box<Node>>,
        test: Option<Box<Node>>,
        update: Option<Box<Node>>,
        body: Box<Node>,
    },
    ForInStatement {
        left: Box<Node>,
        right: Box<Node>,
        body: Box<Node>,
    },
    ForOfStatement {
        left: Box<Node>,
        right: Box<Node>,
        body: Box<Node>,
        is_await: bool,
    },
    BreakStatement {
        label: Option<Box<Node>>,
    },
    ContinueStatement {
        label: Option<Box<Node>>,
    },
    ThrowStatement {
        argument: Box<Node>,
    },
    TryStatement {
        block: Box<Node>,
        handler: Option<Box<Node>>,
        finalizer: Option<Box<Node>>,
    },
    CatchClause {
        param: Option<Box<Node>>,
        body: Box<Node>,
    },
    SwitchStatement {
        discriminant: Box<Node>,
        cases: Vec<Node>,
    },
    SwitchCase {
        test: Option<Box<Node>>,
        consequent: Vec<Node>,
    },
    LabeledStatement {
        label: Box<Node>,
        body: Box<Node>,
    },

    // --- patterns ---
    ArrayPattern {
        elements: Vec<Option<Node>>,
    },
    ObjectPattern {
        properties: Vec<Node>,
    },
    ObjectPatternProperty {
        key: Box<Node>,
        value: Box<Node>,
        computed: bool,
        shorthand: bool,
    },
    AssignmentPattern {
        left: Box<Node>,
        right: Box<Node>,
    },
    RestElement {
        argument: Box<Node>,
    },

    // --- expressions ---
    Identifier {
        name: String,
    },
    PrivateIdentifier {
        name: String,
    },
    ThisExpression,
    StringLiteral {
        value: String,
    },
    NumericLiteral {
        value: f64,
        raw: String,
    },
    BooleanLiteral {
        value: bool,
    },
    NullLiteral,
    RegExpLiteral {
        pattern: String,
        flags: String,
    },
    TemplateLiteral {
        quasis: Vec<Node>,
        expressions: Vec<Node>,
    },
    TemplateElement {
        raw: String,
        tail: bool,
    },
    TaggedTemplateExpression {
        tag: Box<Node>,
        quasi: Box<Node>,
    },
    FunctionExpression {
        id: Option<Box<Node>>,
        params: Vec<Node>,
        body: Box<Node>,
        is_async: bool,
        is_generator: bool,
    },
    ArrowFunctionExpression {
        params: Vec<Node>,
        body: Box<Node>,
        is_async: bool,
        expression: bool,
    },
    BinaryExpression {
        operator: String,
        left: Box<Node>,
        right: Box<Node>,
    },
    LogicalExpression {
        operator: String,
        left: Box<Node>,
        right: Box<Node>,
    },
    UnaryExpression {
        operator: String,
        argument: Box<Node>,
        prefix: bool,
    },
    UpdateExpression {
        operator: String,
        argument: Box<Node>,
        prefix: bool,
    },
    AssignmentExpression {
        operator: String,
        left: Box<Node>,
        right: Box<Node>,
    },
    ConditionalExpression {
        test: Box<Node>,
        consequent: Box<Node>,
        alternate: Box<Node>,
    },
    CallExpression {
        callee: Box<Node>,
        arguments: Vec<Node>,
    },
    NewExpression {
        callee: Box<Node>,
        arguments: Vec<Node>,
    },
    MemberExpression {
        object: Box<Node>,
        property: Box<Node>,
        computed: bool,
    },
    SequenceExpression {
        expressions: Vec<Node>,
    },
    ArrayExpression {
        elements: Vec<Option<Node>>,
    },
    ObjectExpression {
        properties: Vec<Node>,
    },
    Property {
        key: Box<Node>,
        value: Box<Node>,
        kind: PropertyKind,
        computed: bool,
        shorthand: bool,
    },
    SpreadElement {
        argument: Box<Node>,
    },
    YieldExpression {
        argument: Option<Box<Node>>,
        delegate: bool,
    },
    AwaitExpression {
        argument: Box<Node>,
    },

    // --- modules ---
    ImportDeclaration {
        specifiers: Vec<Node>,
        source: Box<Node>,
    },
    ImportDefaultSpecifier {
        local: Box<Node>,
    },
    ImportNamespaceSpecifier {
        local: Box<Node>,
    },
    ImportSpecifier {
        imported: Box<Node>,
        local: Box<Node>,
    },
    ExportNamedDeclaration {
        declaration: Option<Box<Node>>,
        specifiers: Vec<Node>,
        source: Option<Box<Node>>,
    },
    ExportSpecifier {
        local: Box<Node>,
        exported: Box<Node>,
    },
    ExportDefaultDeclaration {
        declaration: Box<Node>,
    },
    ExportAllDeclaration {
        source: Box<Node>,
    },

    /// A construct this crate does not deeply model. `Node::verbatim` carries its exact source
    /// text; the label is purely diagnostic (shown in `Debug` output and transformer logs).
    Opaque(&'static str),
}

impl NodeKind {
    /// Stable, human-readable tag for logging and diagnostics (mirrors ESTree `type` strings
    /// where one exists).
    pub fn tag(&self) -> &'static str {
        use NodeKind::*;
        match self {
            Program { .. } => "Program",
            VariableDeclaration { .. } => "VariableDeclaration",
            VariableDeclarator { .. } => "VariableDeclarator",
            FunctionDeclaration { .. } => "FunctionDeclaration",
            ClassDeclaration { .. } => "ClassDeclaration",
            PropertyDefinition { .. } => "PropertyDefinition",
            MethodDefinition { .. } => "MethodDefinition",
            BlockStatement { .. } => "BlockStatement",
            ExpressionStatement { .. } => "ExpressionStatement",
            EmptyStatement => "EmptyStatement",
            ReturnStatement { .. } => "ReturnStatement",
            IfStatement { .. } => "IfStatement",
            WhileStatement { .. } => "WhileStatement",
            DoWhileStatement { .. } => "DoWhileStatement",
            ForStatement { .. } => "ForStatement",
            ForInStatement { .. } => "ForInStatement",
            ForOfStatement { .. } => "ForOfStatement",
            BreakStatement { .. } => "BreakStatement",
            ContinueStatement { .. } => "ContinueStatement",
            ThrowStatement { .. } => "ThrowStatement",
            TryStatement { .. } => "TryStatement",
            CatchClause { .. } => "CatchClause",
            SwitchStatement { .. } => "SwitchStatement",
            SwitchCase { .. } => "SwitchCase",
            LabeledStatement { .. } => "LabeledStatement",
            ArrayPattern { .. } => "ArrayPattern",
            ObjectPattern { .. } => "ObjectPattern",
            ObjectPatternProperty { .. } => "ObjectPatternProperty",
            AssignmentPattern { .. } => "AssignmentPattern",
            RestElement { .. } => "RestElement",
            Identifier { .. } => "Identifier",
            PrivateIdentifier { .. } => "PrivateIdentifier",
            ThisExpression => "ThisExpression",
            StringLiteral { .. } => "StringLiteral",
            NumericLiteral { .. } => "NumericLiteral",
            BooleanLiteral { .. } => "BooleanLiteral",
            NullLiteral => "NullLiteral",
            RegExpLiteral { .. } => "RegExpLiteral",
            TemplateLiteral { .. } => "TemplateLiteral",
            TemplateElement { .. } => "TemplateElement",
            TaggedTemplateExpression { .. } => "TaggedTemplateExpression",
            FunctionExpression { .. } => "FunctionExpression",
            ArrowFunctionExpression { .. } => "ArrowFunctionExpression",
            BinaryExpression { .. } => "BinaryExpression",
            LogicalExpression { .. } => "LogicalExpression",
            UnaryExpression { .. } => "UnaryExpression",
            UpdateExpression { .. } => "UpdateExpression",
            AssignmentExpression { .. } => "AssignmentExpression",
            ConditionalExpression { .. } => "ConditionalExpression",
            CallExpression { .. } => "CallExpression",
            NewExpression { .. } => "NewExpression",
            MemberExpression { .. } => "MemberExpression",
            SequenceExpression { .. } => "SequenceExpression",
            ArrayExpression { .. } => "ArrayExpression",
            ObjectExpression { .. } => "ObjectExpression",
            Property { .. } => "Property",
            SpreadElement { .. } => "SpreadElement",
            YieldExpression { .. } => "YieldExpression",
            AwaitExpression { .. } => "AwaitExpression",
            ImportDeclaration { .. } => "ImportDeclaration",
            ImportDefaultSpecifier { .. } => "ImportDefaultSpecifier",
            ImportNamespaceSpecifier { .. } => "ImportNamespaceSpecifier",
            ImportSpecifier { .. } => "ImportSpecifier",
            ExportNamedDeclaration { .. } => "ExportNamedDeclaration",
            ExportSpecifier { .. } => "ExportSpecifier",
            ExportDefaultDeclaration { .. } => "ExportDefaultDeclaration",
            ExportAllDeclaration { .. } => "ExportAllDeclaration",
            Opaque(label) => label,
        }
    }

    /// Mutable references to this node's immediate children, in source order. Used by the
    /// traversal engine to recurse without per-call-site boilerplate; does not recurse itself.
    pub fn children_mut(&mut self) -> Vec<&mut Node> {
        use NodeKind::*;
        match self {
            Program { body } => body.iter_mut().collect(),
            VariableDeclaration { declarations, .. } => declarations.iter_mut().collect(),
            VariableDeclarator { id, init } => {
                let mut v = vec![id.as_mut()];
                if let Some(n) = init {
                    v.push(n.as_mut());
                }
                v
            }
            FunctionDeclaration { id, params, body, .. } => {
                let mut v = Vec::new();
                if let Some(n) = id {
                    v.push(n.as_mut());
                }
                v.extend(params.iter_mut());
                v.push(body.as_mut());
                v
            }
            ClassDeclaration { id, super_class, body } => {
                let mut v = Vec::new();
                if let Some(n) = id {
                    v.push(n.as_mut());
                }
                if let Some(n) = super_class {
                    v.push(n.as_mut());
                }
                v.extend(body.iter_mut());
                v
            }
            PropertyDefinition { key, value, .. } => {
                let mut v = vec![key.as_mut()];
                if let Some(n) = value {
                    v.push(n.as_mut());
                }
                v
            }
            MethodDefinition { key, value, .. } => vec![key.as_mut(), value.as_mut()],
            BlockStatement { body } => body.iter_mut().collect(),
            ExpressionStatement { expression } => vec![expression.as_mut()],
            EmptyStatement => vec![],
            ReturnStatement { argument } => argument.iter_mut().map(|b| b.as_mut()).collect(),
            IfStatement { test, consequent, alternate } => {
                let mut v = vec![test.as_mut(), consequent.as_mut()];
                if let Some(n) = alternate {
                    v.push(n.as_mut());
                }
                v
            }
            WhileStatement { test, body } => vec![test.as_mut(), body.as_mut()],
            DoWhileStatement { test, body } => vec![body.as_mut(), test.as_mut()],
            ForStatement { init, test, update, body } => {
                let mut v = Vec::new();
                if let Some(n) = init {
                    v.push(n.as_mut());
                }
                if let Some(n) = test {
                    v.push(n.as_mut());
                }
                if let Some(n) = update {
                    v.push(n.as_mut());
                }
                v.push(body.as_mut());
                v
            }
            ForInStatement { left, right, body } => vec![left.as_mut(), right.as_mut(), body.as_mut()],
            ForOfStatement { left, right, body, .. } => {
                vec![left.as_mut(), right.as_mut(), body.as_mut()]
            }
            BreakStatement { label } => label.iter_mut().map(|b| b.as_mut()).collect(),
            ContinueStatement { label } => label.iter_mut().map(|b| b.as_mut()).collect(),
            ThrowStatement { argument } => vec![argument.as_mut()],
            TryStatement { block, handler, finalizer } => {
                let mut v = vec![block.as_mut()];
                if let Some(n) = handler {
                    v.push(n.as_mut());
                }
                if let Some(n) = finalizer {
                    v.push(n.as_mut());
                }
                v
            }
            CatchClause { param, body } => {
                let mut v = Vec::new();
                if let Some(n) = param {
                    v.push(n.as_mut());
                }
                v.push(body.as_mut());
                v
            }
            SwitchStatement { discriminant, cases } => {
                let mut v = vec![discriminant.as_mut()];
                v.extend(cases.iter_mut());
                v
            }
            SwitchCase { test, consequent } => {
                let mut v = Vec::new();
                if let Some(n) = test {
                    v.push(n.as_mut());
                }
                v.extend(consequent.iter_mut());
                v
            }
            LabeledStatement { label, body } => vec![label.as_mut(), body.as_mut()],
            ArrayPattern { elements } => elements.iter_mut().filter_map(|e| e.as_mut()).collect(),
            ObjectPattern { properties } => properties.iter_mut().collect(),
            ObjectPatternProperty { key, value, .. } => vec![key.as_mut(), value.as_mut()],
            AssignmentPattern { left, right } => vec![left.as_mut(), right.as_mut()],
            RestElement { argument } => vec![argument.as_mut()],
            Identifier { .. } => vec![],
            PrivateIdentifier { .. } => vec![],
            ThisExpression => vec![],
            StringLiteral { .. } => vec![],
            NumericLiteral { .. } => vec![],
            BooleanLiteral { .. } => vec![],
            NullLiteral => vec![],
            RegExpLiteral { .. } => vec![],
            TemplateLiteral { quasis, expressions } => {
                let mut v: Vec<&mut Node> = quasis.iter_mut().collect();
                v.extend(expressions.iter_mut());
                v
            }
            TemplateElement { .. } => vec![],
            TaggedTemplateExpression { tag, quasi } => vec![tag.as_mut(), quasi.as_mut()],
            FunctionExpression { id, params, body, .. } => {
                let mut v = Vec::new();
                if let Some(n) = id {
                    v.push(n.as_mut());
                }
                v.extend(params.iter_mut());
                v.push(body.as_mut());
                v
            }
            ArrowFunctionExpression { params, body, .. } => {
                let mut v: Vec<&mut Node> = params.iter_mut().collect();
                v.push(body.as_mut());
                v
            }
            BinaryExpression { left, right, .. } => vec![left.as_mut(), right.as_mut()],
            LogicalExpression { left, right, .. } => vec![left.as_mut(), right.as_mut()],
            UnaryExpression { argument, .. } => vec![argument.as_mut()],
            UpdateExpression { argument, .. } => vec![argument.as_mut()],
            AssignmentExpression { left, right, .. } => vec![left.as_mut(), right.as_mut()],
            ConditionalExpression { test, consequent, alternate } => {
                vec![test.as_mut(), consequent.as_mut(), alternate.as_mut()]
            }
            CallExpression { callee, arguments } => {
                let mut v = vec![callee.as_mut()];
                v.extend(arguments.iter_mut());
                v
            }
            NewExpression { callee, arguments } => {
                let mut v = vec![callee.as_mut()];
                v.extend(arguments.iter_mut());
                v
            }
            MemberExpression { object, property, .. } => vec![object.as_mut(), property.as_mut()],
            SequenceExpression { expressions } => expressions.iter_mut().collect(),
            ArrayExpression { elements } => elements.iter_mut().filter_map(|e| e.as_mut()).collect(),
            ObjectExpression { properties } => properties.iter_mut().collect(),
            Property { key, value, .. } => vec![key.as_mut(), value.as_mut()],
            SpreadElement { argument } => vec![argument.as_mut()],
            YieldExpression { argument, .. } => argument.iter_mut().map(|b| b.as_mut()).collect(),
            AwaitExpression { argument } => vec![argument.as_mut()],
            ImportDeclaration { specifiers, source } => {
                let mut v: Vec<&mut Node> = specifiers.iter_mut().collect();
                v.push(source.as_mut());
                v
            }
            ImportDefaultSpecifier { local } => vec![local.as_mut()],
            ImportNamespaceSpecifier { local } => vec![local.as_mut()],
            ImportSpecifier { imported, local } => vec![imported.as_mut(), local.as_mut()],
            ExportNamedDeclaration { declaration, specifiers, source } => {
                let mut v = Vec::new();
                if let Some(n) = declaration {
                    v.push(n.as_mut());
                }
                v.extend(specifiers.iter_mut());
                if let Some(n) = source {
                    v.push(n.as_mut());
                }
                v
            }
            ExportSpecifier { local, exported } => vec![local.as_mut(), exported.as_mut()],
            ExportDefaultDeclaration { declaration } => vec![declaration.as_mut()],
            ExportAllDeclaration { source } => vec![source.as_mut()],
            Opaque(_) => vec![],
        }
    }
}

/// Side table mapping a child's id to its parent's id. Rebuilt from scratch by the
/// Parentification transformer (see [`crate::transformer::catalog::parentification`]); never
/// stored inline on `Node` so that replacing a subtree cannot leave stale back-pointers behind.
pub type ParentMap = HashMap<NodeId, NodeId>;

/// Walks `root` and rebuilds `map` so that every descendant maps to its direct parent's id.
/// `root` itself has no entry (it has no parent).
pub fn rebuild_parent_map(root: &mut Node, map: &mut ParentMap) {
    map.clear();
    fn walk(node: &mut Node, map: &mut ParentMap) {
        let id = node.id;
        for child in node.kind.children_mut() {
            map.insert(child.id, id);
            walk(child, map);
        }
    }
    walk(root, map);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ident(alloc: &mut NodeIdAllocator, name: &str) -> Node {
        Node::new(alloc.next(), NodeKind::Identifier { name: name.to_string() })
    }

    #[test]
    fn children_mut_visits_variable_declarator() {
        let mut alloc = NodeIdAllocator::new();
        let id = ident(&mut alloc, "x");
        let init = ident(&mut alloc, "y");
        let mut decl = Node::new(
            alloc.next(),
            NodeKind::VariableDeclarator {
                id: Box::new(id),
                init: Some(Box::new(init)),
            },
        );
        assert_eq!(decl.kind.children_mut().len(), 2);
    }

    #[test]
    fn rebuild_parent_map_covers_nested_nodes() {
        let mut alloc = NodeIdAllocator::new();
        let x = ident(&mut alloc, "x");
        let x_id = x.id;
        let stmt = Node::new(
            alloc.next(),
            NodeKind::ExpressionStatement { expression: Box::new(x) },
        );
        let stmt_id = stmt.id;
        let mut program = Node::new(alloc.next(), NodeKind::Program { body: vec![stmt] });
        let program_id = program.id;

        let mut parents = ParentMap::new();
        rebuild_parent_map(&mut program, &mut parents);

        assert_eq!(parents.get(&stmt_id), Some(&program_id));
        assert_eq!(parents.get(&x_id), Some(&stmt_id));
        assert_eq!(parents.get(&program_id), None);
    }

    #[test]
    fn ignored_node_metadata_defaults_false() {
        let mut alloc = NodeIdAllocator::new();
        let node = ident(&mut alloc, "x");
        assert!(!node.ignored);
        assert!(node.verbatim.is_none());
    }
}
