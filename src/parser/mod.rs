//! # Parser
//!
//! Thin façade over `oxc_parser`/`oxc_ast`: parses a source string into OXC's arena-allocated AST
//! and converts it into this crate's owned [`crate::ast::Node`] tree. Constructs not deeply
//! modeled (destructuring edge cases, decorators, TypeScript syntax, optional chaining, BigInt
//! literals, private class fields) fall back to [`crate::ast::NodeKind::Opaque`] carrying their
//! exact source text, so round-tripping through `obfuscate` never loses or corrupts source the
//! catalog doesn't touch.

use std::cell::RefCell;
use std::rc::Rc;

use oxc_allocator::Allocator;
use oxc_ast::ast as oxc;
use oxc_parser::Parser;
use oxc_span::{GetSpan, SourceType};

use crate::ast::{
    Comment, CommentKind, MethodKind, Node, NodeId, NodeIdAllocator, NodeKind, PropertyKind, Span,
    VariableDeclarationKind,
};
use crate::error::{ObfuscationError, Result};

/// Parses `source` and returns the converted [`Node`] tree rooted at `Program`. `alloc` is shared
/// with the rest of the pipeline so every id minted here stays unique across later transformer
/// stages too.
pub fn parse(source: &str, alloc: &Rc<RefCell<NodeIdAllocator>>) -> Result<Node> {
    let allocator = Allocator::default();
    let source_type = SourceType::default();
    let ret = Parser::new(&allocator, source, source_type).parse();

    if !ret.errors.is_empty() {
        let message = ret
            .errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ");
        return Err(ObfuscationError::ParseError(message));
    }

    let mut converter = Converter { source, alloc };
    Ok(converter.program(&ret.program))
}

struct Converter<'s> {
    source: &'s str,
    alloc: &'s Rc<RefCell<NodeIdAllocator>>,
}

impl<'s> Converter<'s> {
    fn id(&self) -> NodeId {
        self.alloc.borrow_mut().next()
    }

    fn span(&self, span: oxc_span::Span) -> Span {
        Span::new(span.start, span.end)
    }

    fn node(&self, kind: NodeKind, span: oxc_span::Span) -> Node {
        Node::new(self.id(), kind).with_span(self.span(span))
    }

    /// Fallback for any construct not deeply modeled: freezes the exact source text as `verbatim`.
    fn opaque(&self, label: &'static str, span: oxc_span::Span) -> Node {
        Node::opaque(self.id(), label, self.span(span), self.source)
    }

    fn program(&mut self, program: &oxc::Program) -> Node {
        let body = program.body.iter().map(|s| self.statement(s)).collect();
        let mut node = self.node(NodeKind::Program { body }, program.span);
        if let Some(hashbang) = &program.hashbang {
            node.leading_comments.push(Comment {
                text: hashbang.value.to_string(),
                span: self.span(hashbang.span),
                kind: CommentKind::Line,
            });
        }
        node
    }

    // ---------------------------------------------------------------- statements

    fn statement(&mut self, stmt: &oxc::Statement) -> Node {
        use oxc::Statement as S;
        match stmt {
            S::VariableDeclaration(decl) => self.variable_declaration(decl),
            S::FunctionDeclaration(func) => self.function(func, true),
            S::ClassDeclaration(class) => self.class(class),
            S::ExpressionStatement(s) => {
                let expression = Box::new(self.expression(&s.expression));
                self.node(NodeKind::ExpressionStatement { expression }, s.span)
            }
            S::BlockStatement(b) => self.block_statement(b),
            S::EmptyStatement(s) => self.node(NodeKind::EmptyStatement, s.span),
            S::ReturnStatement(s) => {
                let argument = s.argument.as_ref().map(|e| Box::new(self.expression(e)));
                self.node(NodeKind::ReturnStatement { argument }, s.span)
            }
            S::IfStatement(s) => {
                let test = Box::new(self.expression(&s.test));
                let consequent = Box::new(self.statement(&s.consequent));
                let alternate = s.alternate.as_ref().map(|a| Box::new(self.statement(a)));
                self.node(NodeKind::IfStatement { test, consequent, alternate }, s.span)
            }
            S::WhileStatement(s) => {
                let test = Box::new(self.expression(&s.test));
                let body = Box::new(self.statement(&s.body));
                self.node(NodeKind::WhileStatement { test, body }, s.span)
            }
            S::DoWhileStatement(s) => {
                let test = Box::new(self.expression(&s.test));
                let body = Box::new(self.statement(&s.body));
                self.node(NodeKind::DoWhileStatement { test, body }, s.span)
            }
            S::ForStatement(s) => {
                let init = s.init.as_ref().map(|i| Box::new(self.for_statement_init(i)));
                let test = s.test.as_ref().map(|e| Box::new(self.expression(e)));
                let update = s.update.as_ref().map(|e| Box::new(self.expression(e)));
                let body = Box::new(self.statement(&s.body));
                self.node(NodeKind::ForStatement { init, test, update, body }, s.span)
            }
            S::ForInStatement(s) => match self.for_statement_left(&s.left) {
                Some(left) => {
                    let right = Box::new(self.expression(&s.right));
                    let body = Box::new(self.statement(&s.body));
                    self.node(NodeKind::ForInStatement { left: Box::new(left), right, body }, s.span)
                }
                None => self.opaque("ForInStatement", s.span),
            },
            S::ForOfStatement(s) => match self.for_statement_left(&s.left) {
                Some(left) => {
                    let right = Box::new(self.expression(&s.right));
                    let body = Box::new(self.statement(&s.body));
                    self.node(
                        NodeKind::ForOfStatement { left: Box::new(left), right, body, is_await: s.r#await },
                        s.span,
                    )
                }
                None => self.opaque("ForOfStatement", s.span),
            },
            S::BreakStatement(s) => {
                let label = s.label.as_ref().map(|l| Box::new(self.identifier_name(l)));
                self.node(NodeKind::BreakStatement { label }, s.span)
            }
            S::ContinueStatement(s) => {
                let label = s.label.as_ref().map(|l| Box::new(self.identifier_name(l)));
                self.node(NodeKind::ContinueStatement { label }, s.span)
            }
            S::ThrowStatement(s) => {
                let argument = Box::new(self.expression(&s.argument));
                self.node(NodeKind::ThrowStatement { argument }, s.span)
            }
            S::TryStatement(s) => {
                let block = Box::new(self.block_statement(&s.block));
                let handler = s.handler.as_ref().map(|h| {
                    let param = h.param.as_ref().map(|p| Box::new(self.binding_pattern(&p.pattern)));
                    let body = Box::new(self.block_statement(&h.body));
                    Box::new(self.node(NodeKind::CatchClause { param, body }, h.span))
                });
                let finalizer = s.finalizer.as_ref().map(|f| Box::new(self.block_statement(f)));
                self.node(NodeKind::TryStatement { block, handler, finalizer }, s.span)
            }
            S::SwitchStatement(s) => {
                let discriminant = Box::new(self.expression(&s.discriminant));
                let cases = s
                    .cases
                    .iter()
                    .map(|c| {
                        let test = c.test.as_ref().map(|e| Box::new(self.expression(e)));
                        let consequent = c.consequent.iter().map(|s| self.statement(s)).collect();
                        self.node(NodeKind::SwitchCase { test, consequent }, c.span)
                    })
                    .collect();
                self.node(NodeKind::SwitchStatement { discriminant, cases }, s.span)
            }
            S::LabeledStatement(s) => {
                let label = Box::new(self.identifier_name(&s.label));
                let body = Box::new(self.statement(&s.body));
                self.node(NodeKind::LabeledStatement { label, body }, s.span)
            }
            S::ImportDeclaration(s) => self.import_declaration(s),
            S::ExportNamedDeclaration(s) => self.export_named_declaration(s),
            S::ExportDefaultDeclaration(s) => self.export_default_declaration(s),
            S::ExportAllDeclaration(s) => {
                let source = Box::new(self.string_literal(&s.source));
                self.node(NodeKind::ExportAllDeclaration { source }, s.span)
            }
            other => self.opaque("Statement", other.span()),
        }
    }

    fn block_statement(&mut self, block: &oxc::BlockStatement) -> Node {
        let body = block.body.iter().map(|s| self.statement(s)).collect();
        self.node(NodeKind::BlockStatement { body }, block.span)
    }

    fn for_statement_init(&mut self, init: &oxc::ForStatementInit) -> Node {
        use oxc::ForStatementInit as I;
        match init {
            I::VariableDeclaration(decl) => self.variable_declaration(decl),
            other => other
                .as_expression()
                .map(|e| self.expression(e))
                .unwrap_or_else(|| self.opaque("ForStatementInit", other.span())),
        }
    }

    /// `None` for destructuring or other complex left-hand targets this crate doesn't model;
    /// callers fall back to an opaque whole statement in that case.
    fn for_statement_left(&mut self, left: &oxc::ForStatementLeft) -> Option<Node> {
        use oxc::ForStatementLeft as L;
        match left {
            L::VariableDeclaration(decl) => Some(self.variable_declaration(decl)),
            L::AssignmentTargetIdentifier(id) => {
                Some(self.node(NodeKind::Identifier { name: id.name.to_string() }, id.span))
            }
            _ => None,
        }
    }

    fn variable_declaration(&mut self, decl: &oxc::VariableDeclaration) -> Node {
        let kind = match decl.kind {
            oxc::VariableDeclarationKind::Var => VariableDeclarationKind::Var,
            oxc::VariableDeclarationKind::Let => VariableDeclarationKind::Let,
            oxc::VariableDeclarationKind::Const => VariableDeclarationKind::Const,
            _ => VariableDeclarationKind::Var,
        };
        let declarations = decl
            .declarations
            .iter()
            .map(|d| {
                let id = Box::new(self.binding_pattern(&d.id));
                let init = d.init.as_ref().map(|e| Box::new(self.expression(e)));
                self.node(NodeKind::VariableDeclarator { id, init }, d.span)
            })
            .collect();
        self.node(NodeKind::VariableDeclaration { kind, declarations }, decl.span)
    }

    fn function(&mut self, func: &oxc::Function, as_declaration: bool) -> Node {
        let id = func.id.as_ref().map(|id| Box::new(self.binding_identifier(id)));
        let params = func.params.items.iter().map(|p| self.binding_pattern(&p.pattern)).collect();
        let body = match &func.body {
            Some(b) => Box::new(self.node(
                NodeKind::BlockStatement { body: b.statements.iter().map(|s| self.statement(s)).collect() },
                b.span,
            )),
            None => Box::new(self.opaque("FunctionBody", func.span)),
        };
        let kind = if as_declaration {
            NodeKind::FunctionDeclaration { id, params, body, is_async: func.r#async, is_generator: func.generator }
        } else {
            NodeKind::FunctionExpression { id, params, body, is_async: func.r#async, is_generator: func.generator }
        };
        self.node(kind, func.span)
    }

    fn class(&mut self, class: &oxc::Class) -> Node {
        let id = class.id.as_ref().map(|id| Box::new(self.binding_identifier(id)));
        let super_class = class.super_class.as_ref().map(|e| Box::new(self.expression(e)));
        let body = class
            .body
            .body
            .iter()
            .map(|elem| self.class_element(elem))
            .collect();
        self.node(NodeKind::ClassDeclaration { id, super_class, body }, class.span)
    }

    fn class_element(&mut self, elem: &oxc::ClassElement) -> Node {
        use oxc::ClassElement as E;
        match elem {
            E::PropertyDefinition(prop) => {
                let key = Box::new(self.property_key(&prop.key));
                let value = prop.value.as_ref().map(|e| Box::new(self.expression(e)));
                self.node(
                    NodeKind::PropertyDefinition { key, value, is_static: prop.r#static, computed: prop.computed },
                    prop.span,
                )
            }
            E::MethodDefinition(method) => {
                let key = Box::new(self.property_key(&method.key));
                let value = Box::new(self.function(&method.value, false));
                let kind = match method.kind {
                    oxc::MethodDefinitionKind::Constructor => MethodKind::Constructor,
                    oxc::MethodDefinitionKind::Method => MethodKind::Method,
                    oxc::MethodDefinitionKind::Get => MethodKind::Get,
                    oxc::MethodDefinitionKind::Set => MethodKind::Set,
                };
                self.node(
                    NodeKind::MethodDefinition {
                        key,
                        value,
                        kind,
                        is_static: method.r#static,
                        computed: method.computed,
                    },
                    method.span,
                )
            }
            other => self.opaque("ClassElement", other.span()),
        }
    }

    fn property_key(&mut self, key: &oxc::PropertyKey) -> Node {
        use oxc::PropertyKey as K;
        match key {
            K::StaticIdentifier(id) => self.node(NodeKind::Identifier { name: id.name.to_string() }, id.span),
            K::PrivateIdentifier(id) => {
                self.node(NodeKind::PrivateIdentifier { name: id.name.to_string() }, id.span)
            }
            other => {
                if let Some(expr) = other.as_expression() {
                    self.expression(expr)
                } else {
                    self.opaque("PropertyKey", other.span())
                }
            }
        }
    }

    // ------------------------------------------------------------- module forms

    fn import_declaration(&mut self, decl: &oxc::ImportDeclaration) -> Node {
        let specifiers = decl
            .specifiers
            .as_ref()
            .map(|specs| specs.iter().map(|s| self.import_specifier(s)).collect())
            .unwrap_or_default();
        let source = Box::new(self.string_literal(&decl.source));
        self.node(NodeKind::ImportDeclaration { specifiers, source }, decl.span)
    }

    fn import_specifier(&mut self, spec: &oxc::ImportDeclarationSpecifier) -> Node {
        use oxc::ImportDeclarationSpecifier as S;
        match spec {
            S::ImportSpecifier(s) => {
                let imported = Box::new(self.module_export_name(&s.imported));
                let local = Box::new(self.binding_identifier(&s.local));
                self.node(NodeKind::ImportSpecifier { imported, local }, s.span)
            }
            S::ImportDefaultSpecifier(s) => {
                let local = Box::new(self.binding_identifier(&s.local));
                self.node(NodeKind::ImportDefaultSpecifier { local }, s.span)
            }
            S::ImportNamespaceSpecifier(s) => {
                let local = Box::new(self.binding_identifier(&s.local));
                self.node(NodeKind::ImportNamespaceSpecifier { local }, s.span)
            }
        }
    }

    fn export_named_declaration(&mut self, decl: &oxc::ExportNamedDeclaration) -> Node {
        let declaration = decl.declaration.as_ref().map(|d| Box::new(self.declaration(d)));
        let specifiers = decl
            .specifiers
            .iter()
            .map(|s| {
                let local = Box::new(self.module_export_name(&s.local));
                let exported = Box::new(self.module_export_name(&s.exported));
                self.node(NodeKind::ExportSpecifier { local, exported }, s.span)
            })
            .collect();
        let source = decl.source.as_ref().map(|s| Box::new(self.string_literal(s)));
        self.node(NodeKind::ExportNamedDeclaration { declaration, specifiers, source }, decl.span)
    }

    fn export_default_declaration(&mut self, decl: &oxc::ExportDefaultDeclaration) -> Node {
        use oxc::ExportDefaultDeclarationKind as K;
        let declaration = Box::new(match &decl.declaration {
            K::FunctionDeclaration(func) => self.function(func, true),
            K::ClassDeclaration(class) => self.class(class),
            other => other
                .as_expression()
                .map(|e| self.expression(e))
                .unwrap_or_else(|| self.opaque("ExportDefaultDeclarationKind", other.span())),
        });
        self.node(NodeKind::ExportDefaultDeclaration { declaration }, decl.span)
    }

    fn declaration(&mut self, decl: &oxc::Declaration) -> Node {
        use oxc::Declaration as D;
        match decl {
            D::VariableDeclaration(d) => self.variable_declaration(d),
            D::FunctionDeclaration(f) => self.function(f, true),
            D::ClassDeclaration(c) => self.class(c),
            other => self.opaque("Declaration", other.span()),
        }
    }

    fn module_export_name(&mut self, name: &oxc::ModuleExportName) -> Node {
        use oxc::ModuleExportName as M;
        match name {
            M::IdentifierName(id) => self.node(NodeKind::Identifier { name: id.name.to_string() }, id.span),
            M::IdentifierReference(id) => self.node(NodeKind::Identifier { name: id.name.to_string() }, id.span),
            M::StringLiteral(lit) => self.string_literal(lit),
        }
    }

    // ------------------------------------------------------------------ patterns

    fn binding_pattern(&mut self, pattern: &oxc::BindingPattern) -> Node {
        use oxc::BindingPatternKind as K;
        match &pattern.kind {
            K::BindingIdentifier(id) => self.binding_identifier(id),
            K::ArrayPattern(p) => {
                let elements = p
                    .elements
                    .iter()
                    .map(|e| e.as_ref().map(|p| self.binding_pattern(p)))
                    .collect();
                self.node(NodeKind::ArrayPattern { elements }, p.span)
            }
            K::ObjectPattern(p) => {
                let mut properties: Vec<Node> = p
                    .properties
                    .iter()
                    .map(|prop| {
                        let key = Box::new(self.property_key(&prop.key));
                        let value = Box::new(self.binding_pattern(&prop.value));
                        self.node(
                            NodeKind::ObjectPatternProperty {
                                key,
                                value,
                                computed: prop.computed,
                                shorthand: prop.shorthand,
                            },
                            prop.span,
                        )
                    })
                    .collect();
                if let Some(rest) = &p.rest {
                    let argument = Box::new(self.binding_pattern(&rest.argument));
                    properties.push(self.node(NodeKind::RestElement { argument }, rest.span));
                }
                self.node(NodeKind::ObjectPattern { properties }, p.span)
            }
            K::AssignmentPattern(p) => {
                let left = Box::new(self.binding_pattern(&p.left));
                let right = Box::new(self.expression(&p.right));
                self.node(NodeKind::AssignmentPattern { left, right }, p.span)
            }
        }
    }

    fn binding_identifier(&mut self, id: &oxc::BindingIdentifier) -> Node {
        self.node(NodeKind::Identifier { name: id.name.to_string() }, id.span)
    }

    fn identifier_name(&mut self, id: &oxc::LabelIdentifier) -> Node {
        self.node(NodeKind::Identifier { name: id.name.to_string() }, id.span)
    }

    fn string_literal(&mut self, lit: &oxc::StringLiteral) -> Node {
        self.node(NodeKind::StringLiteral { value: lit.value.to_string() }, lit.span)
    }

    // --------------------------------------------------------------- expressions

    fn expression(&mut self, expr: &oxc::Expression) -> Node {
        use oxc::Expression as E;
        match expr {
            E::Identifier(id) => self.node(NodeKind::Identifier { name: id.name.to_string() }, id.span),
            E::NumericLiteral(lit) => {
                self.node(NodeKind::NumericLiteral { value: lit.value, raw: lit.raw.map(|r| r.to_string()).unwrap_or_else(|| lit.value.to_string()) }, lit.span)
            }
            E::StringLiteral(lit) => self.string_literal(lit),
            E::BooleanLiteral(lit) => self.node(NodeKind::BooleanLiteral { value: lit.value }, lit.span),
            E::NullLiteral(lit) => self.node(NodeKind::NullLiteral, lit.span),
            E::ThisExpression(e) => self.node(NodeKind::ThisExpression, e.span),
            E::RegExpLiteral(lit) => self.node(
                NodeKind::RegExpLiteral { pattern: lit.regex.pattern.to_string(), flags: lit.regex.flags.to_string() },
                lit.span,
            ),
            E::TemplateLiteral(tmpl) => {
                let quasis = tmpl
                    .quasis
                    .iter()
                    .map(|q| {
                        self.node(
                            NodeKind::TemplateElement { raw: q.value.raw.to_string(), tail: q.tail },
                            q.span,
                        )
                    })
                    .collect();
                let expressions = tmpl.expressions.iter().map(|e| self.expression(e)).collect();
                self.node(NodeKind::TemplateLiteral { quasis, expressions }, tmpl.span)
            }
            E::TaggedTemplateExpression(e) => {
                // `quasi` is a bare `TemplateLiteral`, not an `Expression`, so it can't go through
                // `self.expression`; convert it directly instead of re-wrapping.
                let tag = Box::new(self.expression(&e.tag));
                let quasis = e
                    .quasi
                    .quasis
                    .iter()
                    .map(|q| {
                        self.node(NodeKind::TemplateElement { raw: q.value.raw.to_string(), tail: q.tail }, q.span)
                    })
                    .collect();
                let expressions = e.quasi.expressions.iter().map(|ex| self.expression(ex)).collect();
                let quasi = Box::new(self.node(NodeKind::TemplateLiteral { quasis, expressions }, e.quasi.span));
                self.node(NodeKind::TaggedTemplateExpression { tag, quasi }, e.span)
            }
            E::FunctionExpression(func) => self.function(func, false),
            E::ArrowFunctionExpression(arrow) => {
                let params = arrow.params.items.iter().map(|p| self.binding_pattern(&p.pattern)).collect();
                let (body, expression) = if arrow.expression {
                    let stmts = &arrow.body.statements;
                    if let Some(oxc::Statement::ExpressionStatement(s)) = stmts.first() {
                        (Box::new(self.expression(&s.expression)), true)
                    } else {
                        (Box::new(self.opaque("ArrowBody", arrow.body.span)), true)
                    }
                } else {
                    let body = arrow.body.statements.iter().map(|s| self.statement(s)).collect();
                    (Box::new(self.node(NodeKind::BlockStatement { body }, arrow.body.span)), false)
                };
                self.node(
                    NodeKind::ArrowFunctionExpression { params, body, is_async: arrow.r#async, expression },
                    arrow.span,
                )
            }
            E::BinaryExpression(e) => {
                let left = Box::new(self.expression(&e.left));
                let right = Box::new(self.expression(&e.right));
                self.node(
                    NodeKind::BinaryExpression { operator: e.operator.as_str().to_string(), left, right },
                    e.span,
                )
            }
            E::LogicalExpression(e) => {
                let left = Box::new(self.expression(&e.left));
                let right = Box::new(self.expression(&e.right));
                self.node(
                    NodeKind::LogicalExpression { operator: e.operator.as_str().to_string(), left, right },
                    e.span,
                )
            }
            E::UnaryExpression(e) => {
                let argument = Box::new(self.expression(&e.argument));
                self.node(
                    NodeKind::UnaryExpression { operator: e.operator.as_str().to_string(), argument, prefix: true },
                    e.span,
                )
            }
            E::UpdateExpression(e) => {
                let argument = Box::new(self.simple_target_expression(&e.argument));
                self.node(
                    NodeKind::UpdateExpression { operator: e.operator.as_str().to_string(), argument, prefix: e.prefix },
                    e.span,
                )
            }
            E::AssignmentExpression(e) => {
                let left = Box::new(self.assignment_target(&e.left));
                let right = Box::new(self.expression(&e.right));
                self.node(
                    NodeKind::AssignmentExpression { operator: e.operator.as_str().to_string(), left, right },
                    e.span,
                )
            }
            E::ConditionalExpression(e) => {
                let test = Box::new(self.expression(&e.test));
                let consequent = Box::new(self.expression(&e.consequent));
                let alternate = Box::new(self.expression(&e.alternate));
                self.node(NodeKind::ConditionalExpression { test, consequent, alternate }, e.span)
            }
            E::CallExpression(e) => {
                let callee = Box::new(self.expression(&e.callee));
                let arguments = e
                    .arguments
                    .iter()
                    .filter_map(|a| a.as_expression())
                    .map(|e| self.expression(e))
                    .collect();
                self.node(NodeKind::CallExpression { callee, arguments }, e.span)
            }
            E::NewExpression(e) => {
                let callee = Box::new(self.expression(&e.callee));
                let arguments = e
                    .arguments
                    .iter()
                    .filter_map(|a| a.as_expression())
                    .map(|e| self.expression(e))
                    .collect();
                self.node(NodeKind::NewExpression { callee, arguments }, e.span)
            }
            E::StaticMemberExpression(e) => {
                let object = Box::new(self.expression(&e.object));
                let property = Box::new(self.node(
                    NodeKind::Identifier { name: e.property.name.to_string() },
                    e.property.span,
                ));
                self.node(NodeKind::MemberExpression { object, property, computed: false }, e.span)
            }
            E::ComputedMemberExpression(e) => {
                let object = Box::new(self.expression(&e.object));
                let property = Box::new(self.expression(&e.expression));
                self.node(NodeKind::MemberExpression { object, property, computed: true }, e.span)
            }
            E::SequenceExpression(e) => {
                let expressions = e.expressions.iter().map(|e| self.expression(e)).collect();
                self.node(NodeKind::SequenceExpression { expressions }, e.span)
            }
            E::ArrayExpression(e) => {
                let elements = e
                    .elements
                    .iter()
                    .map(|el| self.array_expression_element(el))
                    .collect();
                self.node(NodeKind::ArrayExpression { elements }, e.span)
            }
            E::ObjectExpression(e) => {
                let properties = e.properties.iter().map(|p| self.object_property(p)).collect();
                self.node(NodeKind::ObjectExpression { properties }, e.span)
            }
            E::YieldExpression(e) => {
                let argument = e.argument.as_ref().map(|a| Box::new(self.expression(a)));
                self.node(NodeKind::YieldExpression { argument, delegate: e.delegate }, e.span)
            }
            E::AwaitExpression(e) => {
                let argument = Box::new(self.expression(&e.argument));
                self.node(NodeKind::AwaitExpression { argument }, e.span)
            }
            E::ParenthesizedExpression(e) => self.expression(&e.expression),
            other => self.opaque("Expression", other.span()),
        }
    }

    fn array_expression_element(&mut self, el: &oxc::ArrayExpressionElement) -> Option<Node> {
        use oxc::ArrayExpressionElement as A;
        match el {
            A::SpreadElement(s) => {
                let argument = Box::new(self.expression(&s.argument));
                Some(self.node(NodeKind::SpreadElement { argument }, s.span))
            }
            A::Elision(_) => None,
            other => other.as_expression().map(|e| self.expression(e)),
        }
    }

    fn object_property(&mut self, prop: &oxc::ObjectPropertyKind) -> Node {
        use oxc::ObjectPropertyKind as P;
        match prop {
            P::ObjectProperty(p) => {
                let key = Box::new(self.property_key(&p.key));
                let value = Box::new(self.expression(&p.value));
                let kind = match p.kind {
                    oxc::PropertyKind::Init => PropertyKind::Init,
                    oxc::PropertyKind::Get => PropertyKind::Get,
                    oxc::PropertyKind::Set => PropertyKind::Set,
                };
                self.node(
                    NodeKind::Property { key, value, kind, computed: p.computed, shorthand: p.shorthand },
                    p.span,
                )
            }
            P::SpreadProperty(s) => {
                let argument = Box::new(self.expression(&s.argument));
                self.node(NodeKind::SpreadElement { argument }, s.span)
            }
        }
    }

    /// `UpdateExpression`'s argument and `AssignmentExpression`'s left side are typed as
    /// `SimpleAssignmentTarget`/`AssignmentTarget` in OXC rather than plain `Expression`; both
    /// reduce to either an identifier reference or a member expression in the common case.
    fn simple_target_expression(&mut self, target: &oxc::SimpleAssignmentTarget) -> Node {
        use oxc::SimpleAssignmentTarget as T;
        match target {
            T::AssignmentTargetIdentifier(id) => {
                self.node(NodeKind::Identifier { name: id.name.to_string() }, id.span)
            }
            other => other
                .as_expression()
                .map(|e| self.expression(e))
                .unwrap_or_else(|| self.opaque("SimpleAssignmentTarget", other.span())),
        }
    }

    fn assignment_target(&mut self, target: &oxc::AssignmentTarget) -> Node {
        use oxc::AssignmentTarget as T;
        match target {
            T::AssignmentTargetIdentifier(id) => {
                self.node(NodeKind::Identifier { name: id.name.to_string() }, id.span)
            }
            other => other
                .as_expression()
                .map(|e| self.expression(e))
                .unwrap_or_else(|| self.opaque("AssignmentTarget", other.span())),
        }
    }
}
