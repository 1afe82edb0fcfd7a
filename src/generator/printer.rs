//! Recursive-descent printer: walks a [`crate::ast::Node`] tree and emits JavaScript text.
//!
//! Every node that carries [`crate::ast::Node::verbatim`] text is printed verbatim regardless of
//! its `kind` — this is how `Opaque` nodes (constructs the parser doesn't deeply model) and any
//! transformer that freezes a subtree's textual form are handled uniformly, without the printer
//! needing to know about either case specially.

use crate::ast::{MethodKind, Node, NodeKind, PropertyKind, VariableDeclarationKind};
use crate::generator::{GeneratorConfig, GeneratorError, GeneratorResult};

const MAX_OUTPUT_SIZE: usize = 64 * 1024 * 1024;

/// Operator precedence, low to high. Used to decide whether a child expression needs wrapping
/// parentheses given the precedence (and associativity) of the context it's printed in.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
#[repr(u8)]
pub enum Precedence {
    Sequence = 1,
    Yield = 2,
    Assignment = 3,
    Conditional = 4,
    LogicalOr = 5,
    LogicalAnd = 6,
    BitwiseOr = 7,
    BitwiseXor = 8,
    BitwiseAnd = 9,
    Equality = 10,
    Relational = 11,
    Shift = 12,
    Additive = 13,
    Multiplicative = 14,
    Exponentiation = 15,
    Unary = 16,
    Postfix = 17,
    Member = 19,
    Primary = 20,
}

impl Precedence {
    fn bump(self) -> Self {
        use Precedence::*;
        match self {
            Sequence => Yield,
            Yield => Assignment,
            Assignment => Conditional,
            Conditional => LogicalOr,
            LogicalOr => LogicalAnd,
            LogicalAnd => BitwiseOr,
            BitwiseOr => BitwiseXor,
            BitwiseXor => BitwiseAnd,
            BitwiseAnd => Equality,
            Equality => Relational,
            Relational => Shift,
            Shift => Additive,
            Additive => Multiplicative,
            Multiplicative => Exponentiation,
            Exponentiation => Unary,
            Unary => Postfix,
            Postfix => Member,
            Member => Primary,
            Primary => Primary,
        }
    }
}

/// One generated-position-to-source-position correspondence, recorded at statement and
/// declaration boundaries (statement-level granularity, matching the teacher's coarser mapping
/// mode rather than a token-level one).
#[derive(Debug, Clone, Copy)]
pub struct MappingRecord {
    pub generated_offset: u32,
    pub source_offset: u32,
}

pub struct Printer<'c> {
    config: &'c GeneratorConfig,
    output: String,
    indent_level: usize,
    mappings: Vec<MappingRecord>,
}

impl<'c> Printer<'c> {
    pub fn new(config: &'c GeneratorConfig) -> Self {
        Self { config, output: String::with_capacity(1024), indent_level: 0, mappings: Vec::new() }
    }

    pub fn mappings(&self) -> &[MappingRecord] {
        &self.mappings
    }

    pub fn print_program(&mut self, program: &Node) -> GeneratorResult<String> {
        let NodeKind::Program { body } = &program.kind else {
            return Err(GeneratorError::MalformedAst {
                message: "generator entry point must be a Program node".into(),
                node_type: program.kind.tag(),
            });
        };
        self.print_statement_list(body)?;
        Ok(std::mem::take(&mut self.output))
    }

    fn print_statement_list(&mut self, body: &[Node]) -> GeneratorResult<()> {
        for stmt in body {
            self.print_indent()?;
            self.print_statement(stmt)?;
            self.print_newline()?;
        }
        self.check_output_limit()
    }

    // --- statements ---

    fn print_statement(&mut self, node: &Node) -> GeneratorResult<()> {
        if let Some(text) = &node.verbatim {
            self.record_mapping(node);
            self.write(text);
            return Ok(());
        }
        self.record_mapping(node);
        match &node.kind {
            NodeKind::VariableDeclaration { kind, declarations } => {
                self.print_variable_declaration(*kind, declarations)?;
                self.write(";");
            }
            NodeKind::FunctionDeclaration { id, params, body, is_async, is_generator } => {
                self.print_function(id.as_deref(), params, body, *is_async, *is_generator, "function")?;
            }
            NodeKind::ClassDeclaration { id, super_class, body } => {
                self.print_class(id.as_deref(), super_class.as_deref(), body)?;
            }
            NodeKind::BlockStatement { body } => self.print_block(body)?,
            NodeKind::ExpressionStatement { expression } => {
                if needs_statement_paren(expression) {
                    self.write("(");
                    self.print_expression(expression, Precedence::Sequence)?;
                    self.write(")");
                } else {
                    self.print_expression(expression, Precedence::Sequence)?;
                }
                self.write(";");
            }
            NodeKind::EmptyStatement => self.write(";"),
            NodeKind::ReturnStatement { argument } => {
                self.write("return");
                if let Some(arg) = argument {
                    self.write(" ");
                    self.print_expression(arg, Precedence::Sequence)?;
                }
                self.write(";");
            }
            NodeKind::IfStatement { test, consequent, alternate } => {
                self.write("if(");
                self.print_expression(test, Precedence::Sequence)?;
                self.write(")");
                self.print_clause_body(consequent)?;
                if let Some(alt) = alternate {
                    if !self.config.compact && !matches!(consequent.kind, NodeKind::BlockStatement { .. }) {
                        self.print_newline()?;
                        self.print_indent()?;
                    }
                    self.write("else");
                    if matches!(alt.kind, NodeKind::IfStatement { .. }) {
                        self.write(" ");
                        self.print_statement(alt)?;
                    } else {
                        self.print_clause_body(alt)?;
                    }
                }
            }
            NodeKind::WhileStatement { test, body } => {
                self.write("while(");
                self.print_expression(test, Precedence::Sequence)?;
                self.write(")");
                self.print_clause_body(body)?;
            }
            NodeKind::DoWhileStatement { test, body } => {
                self.write("do");
                self.print_clause_body(body)?;
                self.write("while(");
                self.print_expression(test, Precedence::Sequence)?;
                self.write(");");
            }
            NodeKind::ForStatement { init, test, update, body } => {
                self.write("for(");
                if let Some(init) = init {
                    self.print_for_init(init)?;
                }
                self.write(";");
                if let Some(test) = test {
                    self.print_expression(test, Precedence::Sequence)?;
                }
                self.write(";");
                if let Some(update) = update {
                    self.print_expression(update, Precedence::Sequence)?;
                }
                self.write(")");
                self.print_clause_body(body)?;
            }
            NodeKind::ForInStatement { left, right, body } => {
                self.write("for(");
                self.print_for_init(left)?;
                self.write(" in ");
                self.print_expression(right, Precedence::Sequence)?;
                self.write(")");
                self.print_clause_body(body)?;
            }
            NodeKind::ForOfStatement { left, right, body, is_await } => {
                self.write(if *is_await { "for await(" } else { "for(" });
                self.print_for_init(left)?;
                self.write(" of ");
                self.print_expression(right, Precedence::Assignment)?;
                self.write(")");
                self.print_clause_body(body)?;
            }
            NodeKind::BreakStatement { label } => {
                self.write("break");
                if let Some(label) = label {
                    self.write(" ");
                    self.print_expression(label, Precedence::Primary)?;
                }
                self.write(";");
            }
            NodeKind::ContinueStatement { label } => {
                self.write("continue");
                if let Some(label) = label {
                    self.write(" ");
                    self.print_expression(label, Precedence::Primary)?;
                }
                self.write(";");
            }
            NodeKind::ThrowStatement { argument } => {
                self.write("throw ");
                self.print_expression(argument, Precedence::Sequence)?;
                self.write(";");
            }
            NodeKind::TryStatement { block, handler, finalizer } => {
                self.write("try");
                self.print_statement(block)?;
                if let Some(handler) = handler {
                    self.print_statement(handler)?;
                }
                if let Some(finalizer) = finalizer {
                    self.write("finally");
                    self.print_statement(finalizer)?;
                }
            }
            NodeKind::CatchClause { param, body } => {
                self.write("catch");
                if let Some(param) = param {
                    self.write("(");
                    self.print_pattern(param)?;
                    self.write(")");
                }
                self.print_statement(body)?;
            }
            NodeKind::SwitchStatement { discriminant, cases } => {
                self.write("switch(");
                self.print_expression(discriminant, Precedence::Sequence)?;
                self.write("){");
                self.indent_level += 1;
                for case in cases {
                    self.print_newline()?;
                    self.print_indent()?;
                    self.print_switch_case(case)?;
                }
                self.indent_level -= 1;
                self.print_newline()?;
                self.print_indent()?;
                self.write("}");
            }
            NodeKind::LabeledStatement { label, body } => {
                self.print_expression(label, Precedence::Primary)?;
                self.write(":");
                self.print_statement(body)?;
            }
            NodeKind::ImportDeclaration { .. }
            | NodeKind::ExportNamedDeclaration { .. }
            | NodeKind::ExportDefaultDeclaration { .. }
            | NodeKind::ExportAllDeclaration { .. } => self.print_module_statement(node)?,
            other => {
                return Err(GeneratorError::MalformedAst {
                    message: "node is not a statement".into(),
                    node_type: other.tag(),
                });
            }
        }
        Ok(())
    }

    fn print_switch_case(&mut self, node: &Node) -> GeneratorResult<()> {
        let NodeKind::SwitchCase { test, consequent } = &node.kind else {
            return Err(GeneratorError::MalformedAst {
                message: "switch body must contain SwitchCase nodes".into(),
                node_type: node.kind.tag(),
            });
        };
        match test {
            Some(test) => {
                self.write("case ");
                self.print_expression(test, Precedence::Sequence)?;
                self.write(":");
            }
            None => self.write("default:"),
        }
        self.indent_level += 1;
        for stmt in consequent {
            self.print_newline()?;
            self.print_indent()?;
            self.print_statement(stmt)?;
        }
        self.indent_level -= 1;
        Ok(())
    }

    fn print_for_init(&mut self, node: &Node) -> GeneratorResult<()> {
        match &node.kind {
            NodeKind::VariableDeclaration { kind, declarations } => {
                self.print_variable_declaration(*kind, declarations)
            }
            _ => self.print_expression(node, Precedence::Sequence),
        }
    }

    /// Prints a statement in "clause" position (the body of `if`/`while`/`for`/...): a block
    /// prints inline after the header, anything else goes on its own indented line when not
    /// compact.
    fn print_clause_body(&mut self, node: &Node) -> GeneratorResult<()> {
        if matches!(node.kind, NodeKind::BlockStatement { .. }) || node.verbatim.is_some() {
            self.print_statement(node)
        } else if self.config.compact {
            self.print_statement(node)
        } else {
            self.indent_level += 1;
            self.print_newline()?;
            self.print_indent()?;
            self.print_statement(node)?;
            self.indent_level -= 1;
            Ok(())
        }
    }

    fn print_block(&mut self, body: &[Node]) -> GeneratorResult<()> {
        self.write("{");
        if !body.is_empty() {
            self.indent_level += 1;
            for stmt in body {
                self.print_newline()?;
                self.print_indent()?;
                self.print_statement(stmt)?;
            }
            self.indent_level -= 1;
            self.print_newline()?;
            self.print_indent()?;
        }
        self.write("}");
        Ok(())
    }

    fn print_variable_declaration(
        &mut self,
        kind: VariableDeclarationKind,
        declarations: &[Node],
    ) -> GeneratorResult<()> {
        self.write(match kind {
            VariableDeclarationKind::Var => "var ",
            VariableDeclarationKind::Let => "let ",
            VariableDeclarationKind::Const => "const ",
        });
        for (i, declarator) in declarations.iter().enumerate() {
            if i > 0 {
                self.write(",");
            }
            let NodeKind::VariableDeclarator { id, init } = &declarator.kind else {
                return Err(GeneratorError::MalformedAst {
                    message: "declaration list must contain VariableDeclarator nodes".into(),
                    node_type: declarator.kind.tag(),
                });
            };
            self.print_pattern(id)?;
            if let Some(init) = init {
                self.write("=");
                self.print_expression(init, Precedence::Assignment)?;
            }
        }
        Ok(())
    }

    fn print_function(
        &mut self,
        id: Option<&Node>,
        params: &[Node],
        body: &Node,
        is_async: bool,
        is_generator: bool,
        keyword: &str,
    ) -> GeneratorResult<()> {
        if is_async {
            self.write("async ");
        }
        self.write(keyword);
        if is_generator {
            self.write("*");
        }
        if let Some(id) = id {
            self.write(" ");
            self.print_expression(id, Precedence::Primary)?;
        }
        self.write("(");
        self.print_params(params)?;
        self.write(")");
        self.print_statement(body)
    }

    fn print_params(&mut self, params: &[Node]) -> GeneratorResult<()> {
        for (i, param) in params.iter().enumerate() {
            if i > 0 {
                self.write(",");
            }
            self.print_pattern(param)?;
        }
        Ok(())
    }

    fn print_class(&mut self, id: Option<&Node>, super_class: Option<&Node>, body: &[Node]) -> GeneratorResult<()> {
        self.write("class");
        if let Some(id) = id {
            self.write(" ");
            self.print_expression(id, Precedence::Primary)?;
        }
        if let Some(super_class) = super_class {
            self.write(" extends ");
            self.print_expression(super_class, Precedence::Unary)?;
        }
        self.write("{");
        self.indent_level += 1;
        for member in body {
            self.print_newline()?;
            self.print_indent()?;
            self.print_class_member(member)?;
        }
        self.indent_level -= 1;
        if !body.is_empty() {
            self.print_newline()?;
            self.print_indent()?;
        }
        self.write("}");
        Ok(())
    }

    fn print_class_member(&mut self, node: &Node) -> GeneratorResult<()> {
        if let Some(text) = &node.verbatim {
            self.write(text);
            return Ok(());
        }
        match &node.kind {
            NodeKind::PropertyDefinition { key, value, is_static, computed } => {
                if *is_static {
                    self.write("static ");
                }
                self.print_property_key(key, *computed)?;
                if let Some(value) = value {
                    self.write("=");
                    self.print_expression(value, Precedence::Assignment)?;
                }
                self.write(";");
            }
            NodeKind::MethodDefinition { key, value, kind, is_static, computed } => {
                if *is_static {
                    self.write("static ");
                }
                match kind {
                    MethodKind::Get => self.write("get "),
                    MethodKind::Set => self.write("set "),
                    MethodKind::Constructor | MethodKind::Method => {}
                }
                let NodeKind::FunctionExpression { params, body, is_async, is_generator, .. } = &value.kind else {
                    return Err(GeneratorError::MalformedAst {
                        message: "method value must be a function".into(),
                        node_type: value.kind.tag(),
                    });
                };
                if *is_async {
                    self.write("async ");
                }
                if *is_generator {
                    self.write("*");
                }
                self.print_property_key(key, *computed)?;
                self.write("(");
                self.print_params(params)?;
                self.write(")");
                self.print_statement(body)?;
            }
            other => {
                return Err(GeneratorError::MalformedAst {
                    message: "unexpected class member".into(),
                    node_type: other.tag(),
                });
            }
        }
        Ok(())
    }

    fn print_property_key(&mut self, key: &Node, computed: bool) -> GeneratorResult<()> {
        if computed {
            self.write("[");
            self.print_expression(key, Precedence::Assignment)?;
            self.write("]");
            Ok(())
        } else {
            self.print_expression(key, Precedence::Primary)
        }
    }

    fn print_module_statement(&mut self, node: &Node) -> GeneratorResult<()> {
        match &node.kind {
            NodeKind::ImportDeclaration { specifiers, source } => {
                self.write("import ");
                if specifiers.is_empty() {
                    self.print_expression(source, Precedence::Primary)?;
                    self.write(";");
                    return Ok(());
                }
                let (default_and_namespace, named): (Vec<&Node>, Vec<&Node>) = specifiers
                    .iter()
                    .partition(|s| !matches!(s.kind, NodeKind::ImportSpecifier { .. }));
                let mut first = true;
                for spec in &default_and_namespace {
                    if !first {
                        self.write(",");
                    }
                    first = false;
                    self.print_import_specifier(spec)?;
                }
                if !named.is_empty() {
                    if !first {
                        self.write(",");
                    }
                    self.write("{");
                    for (i, spec) in named.iter().enumerate() {
                        if i > 0 {
                            self.write(",");
                        }
                        self.print_import_specifier(spec)?;
                    }
                    self.write("}");
                }
                self.write(" from ");
                self.print_expression(source, Precedence::Primary)?;
                self.write(";");
            }
            NodeKind::ExportNamedDeclaration { declaration, specifiers, source } => {
                self.write("export ");
                if let Some(decl) = declaration {
                    self.print_statement(decl)?;
                    return Ok(());
                }
                self.write("{");
                for (i, spec) in specifiers.iter().enumerate() {
                    if i > 0 {
                        self.write(",");
                    }
                    let NodeKind::ExportSpecifier { local, exported } = &spec.kind else {
                        return Err(GeneratorError::MalformedAst {
                            message: "export list must contain ExportSpecifier nodes".into(),
                            node_type: spec.kind.tag(),
                        });
                    };
                    self.print_expression(local, Precedence::Primary)?;
                    if !node_names_equal(local, exported) {
                        self.write(" as ");
                        self.print_expression(exported, Precedence::Primary)?;
                    }
                }
                self.write("}");
                if let Some(source) = source {
                    self.write(" from ");
                    self.print_expression(source, Precedence::Primary)?;
                }
                self.write(";");
            }
            NodeKind::ExportDefaultDeclaration { declaration } => {
                self.write("export default ");
                match &declaration.kind {
                    NodeKind::FunctionDeclaration { .. } | NodeKind::ClassDeclaration { .. } => {
                        self.print_statement(declaration)?;
                    }
                    _ => {
                        self.print_expression(declaration, Precedence::Assignment)?;
                        self.write(";");
                    }
                }
            }
            NodeKind::ExportAllDeclaration { source } => {
                self.write("export * from ");
                self.print_expression(source, Precedence::Primary)?;
                self.write(";");
            }
            other => {
                return Err(GeneratorError::MalformedAst {
                    message: "not a module statement".into(),
                    node_type: other.tag(),
                });
            }
        }
        Ok(())
    }

    fn print_import_specifier(&mut self, node: &Node) -> GeneratorResult<()> {
        match &node.kind {
            NodeKind::ImportDefaultSpecifier { local } => self.print_expression(local, Precedence::Primary),
            NodeKind::ImportNamespaceSpecifier { local } => {
                self.write("* as ");
                self.print_expression(local, Precedence::Primary)
            }
            NodeKind::ImportSpecifier { imported, local } => {
                self.print_expression(imported, Precedence::Primary)?;
                if !node_names_equal(imported, local) {
                    self.write(" as ");
                    self.print_expression(local, Precedence::Primary)?;
                }
                Ok(())
            }
            other => Err(GeneratorError::MalformedAst {
                message: "unexpected import specifier".into(),
                node_type: other.tag(),
            }),
        }
    }

    // --- patterns ---

    fn print_pattern(&mut self, node: &Node) -> GeneratorResult<()> {
        if let Some(text) = &node.verbatim {
            self.write(text);
            return Ok(());
        }
        match &node.kind {
            NodeKind::Identifier { .. } => self.print_expression(node, Precedence::Primary),
            NodeKind::ArrayPattern { elements } => {
                self.write("[");
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        self.write(",");
                    }
                    if let Some(element) = element {
                        self.print_pattern(element)?;
                    }
                }
                self.write("]");
                Ok(())
            }
            NodeKind::ObjectPattern { properties } => {
                self.write("{");
                for (i, property) in properties.iter().enumerate() {
                    if i > 0 {
                        self.write(",");
                    }
                    match &property.kind {
                        NodeKind::ObjectPatternProperty { key, value, computed, shorthand } => {
                            if *shorthand {
                                self.print_pattern(value)?;
                            } else {
                                self.print_property_key(key, *computed)?;
                                self.write(":");
                                self.print_pattern(value)?;
                            }
                        }
                        NodeKind::RestElement { .. } => self.print_pattern(property)?,
                        other => {
                            return Err(GeneratorError::MalformedAst {
                                message: "unexpected object pattern member".into(),
                                node_type: other.tag(),
                            });
                        }
                    }
                }
                self.write("}");
                Ok(())
            }
            NodeKind::AssignmentPattern { left, right } => {
                self.print_pattern(left)?;
                self.write("=");
                self.print_expression(right, Precedence::Assignment)
            }
            NodeKind::RestElement { argument } => {
                self.write("...");
                self.print_pattern(argument)
            }
            NodeKind::MemberExpression { .. } => self.print_expression(node, Precedence::Assignment),
            other => Err(GeneratorError::MalformedAst {
                message: "node is not a pattern".into(),
                node_type: other.tag(),
            }),
        }
    }

    // --- expressions ---

    fn print_expression(&mut self, node: &Node, min_precedence: Precedence) -> GeneratorResult<()> {
        if let Some(text) = &node.verbatim {
            self.write(text);
            return Ok(());
        }
        let own_precedence = precedence_of(&node.kind);
        let needs_parens = (own_precedence as u8) < (min_precedence as u8);
        if needs_parens {
            self.write("(");
        }
        self.print_expression_inner(node, own_precedence)?;
        if needs_parens {
            self.write(")");
        }
        Ok(())
    }

    fn print_expression_inner(&mut self, node: &Node, own_precedence: Precedence) -> GeneratorResult<()> {
        match &node.kind {
            NodeKind::Identifier { name } => self.write(name),
            NodeKind::PrivateIdentifier { name } => {
                self.write("#");
                self.write(name);
            }
            NodeKind::ThisExpression => self.write("this"),
            NodeKind::StringLiteral { value } => self.print_string_literal(value),
            NodeKind::NumericLiteral { raw, .. } => self.write(raw),
            NodeKind::BooleanLiteral { value } => self.write(if *value { "true" } else { "false" }),
            NodeKind::NullLiteral => self.write("null"),
            NodeKind::RegExpLiteral { pattern, flags } => {
                self.write("/");
                self.write(pattern);
                self.write("/");
                self.write(flags);
            }
            NodeKind::TemplateLiteral { quasis, expressions } => {
                self.write("`");
                for (i, quasi) in quasis.iter().enumerate() {
                    let NodeKind::TemplateElement { raw, .. } = &quasi.kind else {
                        return Err(GeneratorError::MalformedAst {
                            message: "template quasis must be TemplateElement nodes".into(),
                            node_type: quasi.kind.tag(),
                        });
                    };
                    self.write(raw);
                    if i < expressions.len() {
                        self.write("${");
                        self.print_expression(&expressions[i], Precedence::Sequence)?;
                        self.write("}");
                    }
                }
                self.write("`");
            }
            NodeKind::TaggedTemplateExpression { tag, quasi } => {
                self.print_expression(tag, Precedence::Member)?;
                self.print_expression(quasi, Precedence::Primary)?;
            }
            NodeKind::FunctionExpression { id, params, body, is_async, is_generator } => {
                self.print_function(id.as_deref(), params, body, *is_async, *is_generator, "function")?;
            }
            NodeKind::ArrowFunctionExpression { params, body, is_async, expression } => {
                if *is_async {
                    self.write("async ");
                }
                if params.len() == 1 && matches!(params[0].kind, NodeKind::Identifier { .. }) {
                    self.print_pattern(&params[0])?;
                } else {
                    self.write("(");
                    self.print_params(params)?;
                    self.write(")");
                }
                self.write("=>");
                if *expression && matches!(body.kind, NodeKind::ObjectExpression { .. }) {
                    self.write("(");
                    self.print_expression(body, Precedence::Assignment)?;
                    self.write(")");
                } else if *expression {
                    self.print_expression(body, Precedence::Assignment)?;
                } else {
                    self.print_statement(body)?;
                }
            }
            NodeKind::BinaryExpression { operator, left, right } | NodeKind::LogicalExpression { operator, left, right } => {
                self.print_expression(left, own_precedence)?;
                if self.config.compact && is_word_operator(operator) {
                    self.write(" ");
                    self.write(operator);
                    self.write(" ");
                } else if self.config.compact {
                    self.write(operator);
                } else {
                    self.write(" ");
                    self.write(operator);
                    self.write(" ");
                }
                self.print_expression(right, own_precedence.bump())?;
            }
            NodeKind::UnaryExpression { operator, argument, .. } => {
                self.write(operator);
                if matches!(operator.as_str(), "typeof" | "void" | "delete") {
                    self.write(" ");
                }
                self.print_expression(argument, Precedence::Unary)?;
            }
            NodeKind::UpdateExpression { operator, argument, prefix } => {
                if *prefix {
                    self.write(operator);
                    self.print_expression(argument, Precedence::Unary)?;
                } else {
                    self.print_expression(argument, Precedence::Postfix)?;
                    self.write(operator);
                }
            }
            NodeKind::AssignmentExpression { operator, left, right } => {
                self.print_expression(left, Precedence::Conditional)?;
                self.write(operator);
                self.print_expression(right, Precedence::Assignment)?;
            }
            NodeKind::ConditionalExpression { test, consequent, alternate } => {
                self.print_expression(test, Precedence::LogicalOr)?;
                self.write("?");
                self.print_expression(consequent, Precedence::Assignment)?;
                self.write(":");
                self.print_expression(alternate, Precedence::Assignment)?;
            }
            NodeKind::CallExpression { callee, arguments } => {
                self.print_expression(callee, Precedence::Member)?;
                self.write("(");
                self.print_argument_list(arguments)?;
                self.write(")");
            }
            NodeKind::NewExpression { callee, arguments } => {
                self.write("new ");
                self.print_expression(callee, Precedence::Member)?;
                self.write("(");
                self.print_argument_list(arguments)?;
                self.write(")");
            }
            NodeKind::MemberExpression { object, property, computed } => {
                self.print_expression(object, Precedence::Member)?;
                if *computed {
                    self.write("[");
                    self.print_expression(property, Precedence::Sequence)?;
                    self.write("]");
                } else {
                    self.write(".");
                    self.print_expression(property, Precedence::Primary)?;
                }
            }
            NodeKind::SequenceExpression { expressions } => {
                for (i, expr) in expressions.iter().enumerate() {
                    if i > 0 {
                        self.write(",");
                    }
                    self.print_expression(expr, Precedence::Assignment)?;
                }
            }
            NodeKind::ArrayExpression { elements } => {
                self.write("[");
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        self.write(",");
                    }
                    if let Some(element) = element {
                        self.print_expression(element, Precedence::Assignment)?;
                    }
                }
                self.write("]");
            }
            NodeKind::ObjectExpression { properties } => {
                self.write("{");
                for (i, property) in properties.iter().enumerate() {
                    if i > 0 {
                        self.write(",");
                    }
                    self.print_object_member(property)?;
                }
                self.write("}");
            }
            NodeKind::SpreadElement { argument } => {
                self.write("...");
                self.print_expression(argument, Precedence::Assignment)?;
            }
            NodeKind::YieldExpression { argument, delegate } => {
                self.write("yield");
                if *delegate {
                    self.write("*");
                }
                if let Some(argument) = argument {
                    self.write(" ");
                    self.print_expression(argument, Precedence::Assignment)?;
                }
            }
            NodeKind::AwaitExpression { argument } => {
                self.write("await ");
                self.print_expression(argument, Precedence::Unary)?;
            }
            other => {
                return Err(GeneratorError::MalformedAst {
                    message: "node is not an expression".into(),
                    node_type: other.tag(),
                });
            }
        }
        Ok(())
    }

    fn print_object_member(&mut self, node: &Node) -> GeneratorResult<()> {
        if let Some(text) = &node.verbatim {
            self.write(text);
            return Ok(());
        }
        match &node.kind {
            NodeKind::Property { key, value, kind, computed, shorthand } => {
                match kind {
                    PropertyKind::Get => self.write("get "),
                    PropertyKind::Set => self.write("set "),
                    PropertyKind::Init => {}
                }
                if *shorthand {
                    self.print_expression(value, Precedence::Assignment)?;
                    return Ok(());
                }
                let is_method = matches!(value.kind, NodeKind::FunctionExpression { .. }) && !matches!(kind, PropertyKind::Init);
                self.print_property_key(key, *computed)?;
                if matches!(kind, PropertyKind::Get | PropertyKind::Set) || is_method {
                    let NodeKind::FunctionExpression { params, body, is_async, is_generator, .. } = &value.kind else {
                        return Err(GeneratorError::MalformedAst {
                            message: "accessor value must be a function".into(),
                            node_type: value.kind.tag(),
                        });
                    };
                    if *is_async {
                        self.write("async ");
                    }
                    if *is_generator {
                        self.write("*");
                    }
                    self.write("(");
                    self.print_params(params)?;
                    self.write(")");
                    self.print_statement(body)?;
                } else {
                    self.write(":");
                    self.print_expression(value, Precedence::Assignment)?;
                }
                Ok(())
            }
            NodeKind::SpreadElement { argument } => {
                self.write("...");
                self.print_expression(argument, Precedence::Assignment)
            }
            other => Err(GeneratorError::MalformedAst {
                message: "unexpected object member".into(),
                node_type: other.tag(),
            }),
        }
    }

    fn print_argument_list(&mut self, arguments: &[Node]) -> GeneratorResult<()> {
        for (i, argument) in arguments.iter().enumerate() {
            if i > 0 {
                self.write(",");
            }
            self.print_expression(argument, Precedence::Assignment)?;
        }
        Ok(())
    }

    fn print_string_literal(&mut self, value: &str) {
        let quote = if value.contains('\'') && !value.contains('"') { '"' } else { '\'' };
        self.output.push(quote);
        for ch in value.chars() {
            match ch {
                '\\' => self.output.push_str("\\\\"),
                '\n' => self.output.push_str("\\n"),
                '\r' => self.output.push_str("\\r"),
                c if c == quote => {
                    self.output.push('\\');
                    self.output.push(c);
                }
                c => self.output.push(c),
            }
        }
        self.output.push(quote);
    }

    // --- low-level output helpers ---

    fn write(&mut self, s: &str) {
        self.output.push_str(s);
    }

    fn print_indent(&mut self) -> GeneratorResult<()> {
        if !self.config.compact {
            for _ in 0..self.indent_level {
                self.output.push_str("  ");
            }
        }
        Ok(())
    }

    fn print_newline(&mut self) -> GeneratorResult<()> {
        if !self.config.compact {
            self.output.push('\n');
        }
        self.check_output_limit()
    }

    fn record_mapping(&mut self, node: &Node) {
        if let Some(span) = node.span {
            self.mappings.push(MappingRecord {
                generated_offset: self.output.len() as u32,
                source_offset: span.start,
            });
        }
    }

    fn check_output_limit(&self) -> GeneratorResult<()> {
        if self.output.len() > MAX_OUTPUT_SIZE {
            return Err(GeneratorError::OutputSizeLimitExceeded { limit: MAX_OUTPUT_SIZE });
        }
        Ok(())
    }
}

fn precedence_of(kind: &NodeKind) -> Precedence {
    match kind {
        NodeKind::SequenceExpression { .. } => Precedence::Sequence,
        NodeKind::YieldExpression { .. } => Precedence::Yield,
        NodeKind::AssignmentExpression { .. } | NodeKind::ArrowFunctionExpression { .. } => Precedence::Assignment,
        NodeKind::ConditionalExpression { .. } => Precedence::Conditional,
        NodeKind::LogicalExpression { operator, .. } => match operator.as_str() {
            "||" | "??" => Precedence::LogicalOr,
            _ => Precedence::LogicalAnd,
        },
        NodeKind::BinaryExpression { operator, .. } => binary_precedence(operator),
        NodeKind::UnaryExpression { .. } | NodeKind::AwaitExpression { .. } => Precedence::Unary,
        NodeKind::UpdateExpression { prefix, .. } => {
            if *prefix {
                Precedence::Unary
            } else {
                Precedence::Postfix
            }
        }
        NodeKind::NewExpression { .. } | NodeKind::CallExpression { .. } | NodeKind::MemberExpression { .. } => {
            Precedence::Member
        }
        NodeKind::TaggedTemplateExpression { .. } => Precedence::Member,
        _ => Precedence::Primary,
    }
}

fn binary_precedence(operator: &str) -> Precedence {
    match operator {
        "|" => Precedence::BitwiseOr,
        "^" => Precedence::BitwiseXor,
        "&" => Precedence::BitwiseAnd,
        "==" | "!=" | "===" | "!==" => Precedence::Equality,
        "<" | "<=" | ">" | ">=" | "in" | "instanceof" => Precedence::Relational,
        "<<" | ">>" | ">>>" => Precedence::Shift,
        "+" | "-" => Precedence::Additive,
        "*" | "/" | "%" => Precedence::Multiplicative,
        "**" => Precedence::Exponentiation,
        _ => Precedence::Equality,
    }
}

fn is_word_operator(operator: &str) -> bool {
    matches!(operator, "in" | "instanceof")
}

fn node_names_equal(a: &Node, b: &Node) -> bool {
    matches!((&a.kind, &b.kind), (NodeKind::Identifier { name: n1 }, NodeKind::Identifier { name: n2 }) if n1 == n2)
}

/// An expression statement whose leftmost token would otherwise be parsed as the start of a
/// block, function declaration, or (in this crate's model) is an object/function literal needs
/// wrapping parens — `{}` opens a block, `function` opens a declaration.
fn needs_statement_paren(node: &Node) -> bool {
    matches!(leftmost(node).kind, NodeKind::ObjectExpression { .. } | NodeKind::FunctionExpression { .. })
}

fn leftmost(node: &Node) -> &Node {
    match &node.kind {
        NodeKind::BinaryExpression { left, .. }
        | NodeKind::LogicalExpression { left, .. }
        | NodeKind::AssignmentExpression { left, .. } => leftmost(left),
        NodeKind::MemberExpression { object, .. } => leftmost(object),
        NodeKind::CallExpression { callee, .. } => leftmost(callee),
        NodeKind::TaggedTemplateExpression { tag, .. } => leftmost(tag),
        NodeKind::ConditionalExpression { test, .. } => leftmost(test),
        NodeKind::SequenceExpression { expressions } => {
            expressions.first().map(leftmost).unwrap_or(node)
        }
        NodeKind::UpdateExpression { argument, prefix: false, .. } => leftmost(argument),
        _ => node,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Node, NodeIdAllocator};
    use crate::config::Options;

    fn printer(config: &GeneratorConfig) -> Printer<'_> {
        Printer::new(config)
    }

    #[test]
    fn empty_program_prints_empty_string() {
        let mut alloc = NodeIdAllocator::new();
        let program = Node::new(alloc.next(), NodeKind::Program { body: vec![] });
        let config = GeneratorConfig::from(&Options::default());
        let mut p = printer(&config);
        assert_eq!(p.print_program(&program).unwrap(), "");
    }

    #[test]
    fn wraps_leading_object_expression_statement_in_parens() {
        let mut alloc = NodeIdAllocator::new();
        let obj = Node::new(alloc.next(), NodeKind::ObjectExpression { properties: vec![] });
        let stmt = Node::new(alloc.next(), NodeKind::ExpressionStatement { expression: Box::new(obj) });
        let program = Node::new(alloc.next(), NodeKind::Program { body: vec![stmt] });
        let config = GeneratorConfig::from(&Options::default());
        let mut p = printer(&config);
        assert_eq!(p.print_program(&program).unwrap(), "({});");
    }

    #[test]
    fn preserves_grouping_on_right_operand_of_same_precedence_subtraction() {
        let mut alloc = NodeIdAllocator::new();
        let a = Node::new(alloc.next(), NodeKind::Identifier { name: "a".into() });
        let b = Node::new(alloc.next(), NodeKind::Identifier { name: "b".into() });
        let c = Node::new(alloc.next(), NodeKind::Identifier { name: "c".into() });
        let inner = Node::new(
            alloc.next(),
            NodeKind::BinaryExpression { operator: "-".into(), left: Box::new(b), right: Box::new(c) },
        );
        let outer = Node::new(
            alloc.next(),
            NodeKind::BinaryExpression { operator: "-".into(), left: Box::new(a), right: Box::new(inner) },
        );
        let stmt = Node::new(alloc.next(), NodeKind::ExpressionStatement { expression: Box::new(outer) });
        let program = Node::new(alloc.next(), NodeKind::Program { body: vec![stmt] });
        let config = GeneratorConfig::from(&Options::default());
        let mut p = printer(&config);
        assert_eq!(p.print_program(&program).unwrap(), "a-(b-c);");
    }

    #[test]
    fn non_compact_mode_indents_block_bodies() {
        let mut alloc = NodeIdAllocator::new();
        let inner = Node::new(alloc.next(), NodeKind::EmptyStatement);
        let block = Node::new(alloc.next(), NodeKind::BlockStatement { body: vec![inner] });
        let program = Node::new(alloc.next(), NodeKind::Program { body: vec![block] });
        let config = GeneratorConfig { compact: false, ..GeneratorConfig::from(&Options::default()) };
        let mut p = printer(&config);
        let out = p.print_program(&program).unwrap();
        assert_eq!(out, "{\n  ;\n}\n");
    }
}
