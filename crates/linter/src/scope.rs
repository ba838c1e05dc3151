//! Scope and reference tracking across script blocks and the template
//!
//! The tracker is built once per file. A collecting walk records scopes,
//! bindings and references for every script program and every template
//! expression; references are then resolved against the scope chain, so a
//! reference always binds to the nearest enclosing declaration, including
//! hoisted ones declared later in the source.
//!
//! Each reference also records how it is used by its direct parent
//! ([`Usage`]). Uses the tracker cannot classify statically (computed member
//! access, spreads) are reported as [`Usage::Unknown`].

use oxc_ast::ast::{
    Argument, ArrowFunctionExpression, AssignmentExpression, AssignmentTarget,
    AssignmentTargetPropertyIdentifier, BinaryExpression, BindingIdentifier, BindingPattern,
    BlockStatement, CallExpression, CatchClause, Class, ComputedMemberExpression,
    ConditionalExpression, DoWhileStatement, Expression, ForInStatement, ForOfStatement,
    ForStatement, Function, IfStatement, ImportDeclaration, ImportDeclarationSpecifier,
    LogicalExpression, NewExpression, SimpleAssignmentTarget, SpreadElement,
    StaticMemberExpression, SwitchStatement, TSInterfaceDeclaration, TSType,
    TSTypeAliasDeclaration, TSTypeAnnotation, TSTypeParameterDeclaration,
    TSTypeParameterInstantiation, TemplateLiteral, UnaryExpression, UpdateExpression,
    VariableDeclaration, VariableDeclarationKind, VariableDeclarator, WhileStatement,
};
use oxc_ast_visit::{walk, Visit};
use oxc_span::{GetSpan, Span};
use oxc_syntax::operator::{AssignmentOperator, UnaryOperator};
use oxc_syntax::reference::ReferenceFlags;
use oxc_syntax::scope::ScopeFlags;
use rustc_hash::FxHashMap;
use sfc::{DirectiveExpression, NodeId, NodeKind, SfcDescriptor, TemplateAst};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScopeId(u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BindingId(u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ReferenceId(u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    Module,
    Function,
    Block,
    Catch,
    /// Root scope of the template
    Template,
    /// Introduced by an element carrying `v-for`
    VFor,
    /// Introduced by an element carrying `v-slot`
    VSlot,
}

impl ScopeKind {
    pub fn is_template(self) -> bool {
        matches!(self, Self::Template | Self::VFor | Self::VSlot)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Imported {
    Named(String),
    Default,
    Namespace,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindingKind {
    Var,
    Let,
    Const,
    Function,
    Class,
    Param,
    /// `import` declarations and `require()` results
    Import { source: String, imported: Imported },
    CatchParam,
    VForAlias,
    SlotParam,
}

impl BindingKind {
    pub fn is_template_local(&self) -> bool {
        matches!(self, Self::VForAlias | Self::SlotParam)
    }
}

/// How a reference is used by its direct parent
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Usage {
    Read,
    /// Operand of an operator, a condition or a template literal
    Operand,
    /// Callee of a call or `new`
    Call,
    /// Object of a member access with a static property name
    Member(String),
    /// Source of a destructuring declaration or assignment
    Destructured,
    Write,
    /// Not statically analyzable; treat as used and unsafe
    Unknown,
}

#[derive(Debug)]
pub struct Scope {
    pub id: ScopeId,
    pub kind: ScopeKind,
    pub parent: Option<ScopeId>,
    pub span: Span,
    /// Template element that introduced the scope
    pub node: Option<NodeId>,
    /// Whether the scope belongs to `<script setup>`
    pub setup: bool,
    bindings: FxHashMap<String, BindingId>,
}

impl Scope {
    pub fn binding(&self, name: &str) -> Option<BindingId> {
        self.bindings.get(name).copied()
    }
}

#[derive(Debug)]
pub struct Binding {
    pub id: BindingId,
    pub name: String,
    pub span: Span,
    pub kind: BindingKind,
    pub scope: ScopeId,
    /// Template element that declared a template-local binding
    pub node: Option<NodeId>,
}

#[derive(Debug)]
pub struct Reference {
    pub id: ReferenceId,
    pub name: String,
    pub span: Span,
    pub scope: ScopeId,
    pub flags: ReferenceFlags,
    pub usage: Usage,
    pub resolved: Option<BindingId>,
    pub in_template: bool,
}

/// Scopes, bindings and resolved references of one file
#[derive(Debug, Default)]
pub struct ScopeTracker {
    scopes: Vec<Scope>,
    bindings: Vec<Binding>,
    references: Vec<Reference>,
    binding_spans: FxHashMap<Span, BindingId>,
    reference_spans: FxHashMap<Span, ReferenceId>,
    references_by_binding: FxHashMap<BindingId, Vec<ReferenceId>>,
    element_scopes: FxHashMap<NodeId, ScopeId>,
    module_scope: Option<ScopeId>,
    setup_scope: Option<ScopeId>,
    template_scope: Option<ScopeId>,
}

impl ScopeTracker {
    pub fn build(ast: &TemplateAst<'_>, descriptor: &SfcDescriptor<'_>) -> Self {
        let mut collector = Collector::new();

        if let Some(script) = descriptor.script() {
            let scope = collector.push_scope(ScopeKind::Module, script.program.span, None);
            collector.tracker.module_scope = Some(scope);
            collector.visit_program(&script.program);
            collector.pop_scope();
        }
        if let Some(script) = descriptor.script_setup() {
            let parent = collector.tracker.module_scope;
            let scope = collector.push_scope_with_parent(
                ScopeKind::Module,
                script.program.span,
                parent,
                None,
            );
            collector.tracker.scopes[scope.0 as usize].setup = true;
            collector.tracker.setup_scope = Some(scope);
            collector.visit_program(&script.program);
            collector.pop_scope();
        }
        if let Some(template) = descriptor.template {
            let parent = collector.tracker.setup_scope;
            let span = ast.node(template).span;
            let scope =
                collector.push_scope_with_parent(ScopeKind::Template, span, parent, Some(template));
            collector.tracker.template_scope = Some(scope);
            collector.in_template = true;
            collector.visit_template_children(ast, template);
            collector.in_template = false;
            collector.pop_scope();
        }

        let mut tracker = collector.tracker;
        tracker.resolve_all();
        tracing::trace!(
            scopes = tracker.scopes.len(),
            bindings = tracker.bindings.len(),
            references = tracker.references.len(),
            "built scope tracker"
        );
        tracker
    }

    fn resolve_all(&mut self) {
        for index in 0..self.references.len() {
            let (scope, name) = {
                let reference = &self.references[index];
                (reference.scope, reference.name.clone())
            };
            let resolved = self.resolve(scope, &name);
            let reference = &mut self.references[index];
            reference.resolved = resolved;
            if let Some(binding) = resolved {
                self.references_by_binding.entry(binding).or_default().push(reference.id);
            }
        }
        for ids in self.references_by_binding.values_mut() {
            ids.sort_by_key(|id| self.references[id.0 as usize].span.start);
        }
    }

    pub fn scope(&self, id: ScopeId) -> &Scope {
        &self.scopes[id.0 as usize]
    }

    pub fn binding(&self, id: BindingId) -> &Binding {
        &self.bindings[id.0 as usize]
    }

    pub fn reference(&self, id: ReferenceId) -> &Reference {
        &self.references[id.0 as usize]
    }

    pub fn scopes(&self) -> impl Iterator<Item = &Scope> {
        self.scopes.iter()
    }

    pub fn bindings(&self) -> impl Iterator<Item = &Binding> {
        self.bindings.iter()
    }

    pub fn all_references(&self) -> impl Iterator<Item = &Reference> {
        self.references.iter()
    }

    /// Module scope of the plain `<script>` block
    pub fn module_scope(&self) -> Option<ScopeId> {
        self.module_scope
    }

    /// Module scope of `<script setup>`
    pub fn setup_scope(&self) -> Option<ScopeId> {
        self.setup_scope
    }

    pub fn template_scope(&self) -> Option<ScopeId> {
        self.template_scope
    }

    /// Binding declared by the identifier at exactly `span`
    pub fn binding_at(&self, span: Span) -> Option<&Binding> {
        self.binding_spans.get(&span).map(|&id| self.binding(id))
    }

    /// Reference made by the identifier at exactly `span`
    pub fn reference_at(&self, span: Span) -> Option<&Reference> {
        self.reference_spans.get(&span).map(|&id| self.reference(id))
    }

    /// Binding an identifier reference at `span` resolves to
    pub fn resolved_at(&self, span: Span) -> Option<&Binding> {
        self.reference_at(span)
            .and_then(|reference| reference.resolved)
            .map(|id| self.binding(id))
    }

    /// References resolved to `binding`, in source order
    pub fn references(&self, binding: BindingId) -> impl Iterator<Item = &Reference> {
        self.references_by_binding
            .get(&binding)
            .into_iter()
            .flatten()
            .map(|&id| self.reference(id))
    }

    pub fn is_referenced(&self, binding: BindingId) -> bool {
        self.references_by_binding
            .get(&binding)
            .is_some_and(|refs| !refs.is_empty())
    }

    /// Nearest declaration of `name` visible from `scope`
    pub fn resolve(&self, scope: ScopeId, name: &str) -> Option<BindingId> {
        self.ancestors(scope).find_map(|id| self.scope(id).binding(name))
    }

    /// `scope` and its parents, innermost first
    pub fn ancestors(&self, scope: ScopeId) -> impl Iterator<Item = ScopeId> + '_ {
        std::iter::successors(Some(scope), move |&id| self.scope(id).parent)
    }

    /// Scope in effect for a template node: the innermost scope introduced by
    /// the node itself or one of its ancestors.
    pub fn scope_of(&self, ast: &TemplateAst<'_>, node: NodeId) -> Option<ScopeId> {
        std::iter::once(node)
            .chain(ast.ancestors(node))
            .find_map(|id| self.element_scopes.get(&id).copied())
            .or(self.template_scope)
    }

    /// Whether `name`, looked up from `scope`, resolves to something other
    /// than `binding`.
    pub fn is_shadowed(&self, scope: ScopeId, name: &str, binding: BindingId) -> bool {
        self.resolve(scope, name).is_some_and(|found| found != binding)
    }

    /// Innermost template-local binding of `name` visible from `scope`
    pub fn template_local(&self, scope: ScopeId, name: &str) -> Option<&Binding> {
        self.resolve(scope, name)
            .map(|id| self.binding(id))
            .filter(|binding| binding.kind.is_template_local())
    }
}

/// Usage recorded by a parent for its direct identifier child
#[derive(Debug, Clone)]
struct Hint {
    usage: Usage,
    flags: ReferenceFlags,
}

struct Declaring {
    kind: BindingKind,
    scope: ScopeId,
}

struct Collector {
    tracker: ScopeTracker,
    stack: Vec<ScopeId>,
    hints: FxHashMap<u32, Hint>,
    declaring: Option<Declaring>,
    in_template: bool,
    current_node: Option<NodeId>,
}

impl Collector {
    fn new() -> Self {
        Self {
            tracker: ScopeTracker::default(),
            stack: Vec::new(),
            hints: FxHashMap::default(),
            declaring: None,
            in_template: false,
            current_node: None,
        }
    }

    fn current(&self) -> Option<ScopeId> {
        self.stack.last().copied()
    }

    fn push_scope(&mut self, kind: ScopeKind, span: Span, node: Option<NodeId>) -> ScopeId {
        let parent = self.current();
        self.push_scope_with_parent(kind, span, parent, node)
    }

    fn push_scope_with_parent(
        &mut self,
        kind: ScopeKind,
        span: Span,
        parent: Option<ScopeId>,
        node: Option<NodeId>,
    ) -> ScopeId {
        let id = ScopeId(self.tracker.scopes.len() as u32);
        let setup = parent.is_some_and(|p| self.tracker.scope(p).setup && !kind.is_template());
        self.tracker.scopes.push(Scope {
            id,
            kind,
            parent,
            span,
            node,
            setup,
            bindings: FxHashMap::default(),
        });
        self.stack.push(id);
        id
    }

    fn pop_scope(&mut self) {
        self.stack.pop();
    }

    /// Nearest function or module scope, where `var` declarations land
    fn hoist_target(&self) -> Option<ScopeId> {
        self.stack.iter().rev().copied().find(|&id| {
            matches!(
                self.tracker.scope(id).kind,
                ScopeKind::Function | ScopeKind::Module
            )
        })
    }

    fn declare(&mut self, name: &str, span: Span, kind: BindingKind, scope: ScopeId) {
        let id = BindingId(self.tracker.bindings.len() as u32);
        let node = if kind.is_template_local() { self.current_node } else { None };
        self.tracker.bindings.push(Binding {
            id,
            name: name.to_string(),
            span,
            kind,
            scope,
            node,
        });
        self.tracker.scopes[scope.0 as usize]
            .bindings
            .insert(name.to_string(), id);
        self.tracker.binding_spans.insert(span, id);
    }

    fn declare_in_current(&mut self, ident: &BindingIdentifier<'_>, kind: BindingKind) {
        if let Some(scope) = self.current() {
            self.declare(&ident.name, ident.span, kind, scope);
        }
    }

    /// Runs `f` with every visited binding identifier declared as `kind`
    fn declaring(&mut self, kind: BindingKind, scope: Option<ScopeId>, f: impl FnOnce(&mut Self)) {
        let Some(scope) = scope else { return };
        let saved = self.declaring.replace(Declaring { kind, scope });
        f(self);
        self.declaring = saved;
    }

    /// Runs `f` outside of any declaration context
    fn not_declaring(&mut self, f: impl FnOnce(&mut Self)) {
        let saved = self.declaring.take();
        f(self);
        self.declaring = saved;
    }

    fn hint(&mut self, expr: &Expression<'_>, usage: Usage) {
        self.hint_with_flags(expr, usage, ReferenceFlags::Read);
    }

    fn hint_with_flags(&mut self, expr: &Expression<'_>, usage: Usage, flags: ReferenceFlags) {
        if let Expression::Identifier(ident) = expr {
            self.hints.insert(ident.span.start, Hint { usage, flags });
        }
    }

    fn add_reference(&mut self, name: &str, span: Span) {
        let Some(scope) = self.current() else { return };
        let hint = self.hints.remove(&span.start).unwrap_or(Hint {
            usage: Usage::Read,
            flags: ReferenceFlags::Read,
        });
        let id = ReferenceId(self.tracker.references.len() as u32);
        self.tracker.references.push(Reference {
            id,
            name: name.to_string(),
            span,
            scope,
            flags: hint.flags,
            usage: hint.usage,
            resolved: None,
            in_template: self.in_template,
        });
        self.tracker.reference_spans.insert(span, id);
    }

    fn visit_template_children(&mut self, ast: &TemplateAst<'_>, id: NodeId) {
        for &child in ast.children(id) {
            self.visit_template_node(ast, child);
        }
    }

    fn visit_template_node(&mut self, ast: &TemplateAst<'_>, id: NodeId) {
        let node = ast.node(id);
        match &node.kind {
            NodeKind::Interpolation(interpolation) => {
                if let Some(expr) = &interpolation.expression {
                    self.visit_expression(expr);
                }
            }
            NodeKind::Element(element) => {
                let saved_node = self.current_node.replace(id);
                let mut pushed = 0;

                let v_for = element
                    .directive("for", None)
                    .and_then(|attr| attr.expression());
                if let Some(DirectiveExpression::For(for_expr)) = v_for {
                    self.visit_expression(&for_expr.right);
                    let scope = self.push_scope(ScopeKind::VFor, node.span, Some(id));
                    self.tracker.element_scopes.insert(id, scope);
                    pushed += 1;
                    self.declaring(BindingKind::VForAlias, Some(scope), |v| {
                        v.visit_formal_parameters(&for_expr.left.params);
                    });
                }

                let slot = element
                    .directive("slot", None)
                    .and_then(|attr| attr.expression());
                if let Some(DirectiveExpression::SlotScope(params)) = slot {
                    let scope = self.push_scope(ScopeKind::VSlot, node.span, Some(id));
                    self.tracker.element_scopes.insert(id, scope);
                    pushed += 1;
                    self.declaring(BindingKind::SlotParam, Some(scope), |v| {
                        v.visit_formal_parameters(&params.params);
                    });
                }

                for attr in &element.start_tag.attributes {
                    match attr.expression() {
                        Some(DirectiveExpression::Expression(expr)) => self.visit_expression(expr),
                        Some(DirectiveExpression::Handler(statements)) => {
                            for statement in statements {
                                self.visit_statement(statement);
                            }
                        }
                        _ => {}
                    }
                }

                self.visit_template_children(ast, id);
                for _ in 0..pushed {
                    self.pop_scope();
                }
                self.current_node = saved_node;
            }
            _ => {}
        }
    }

    /// `const x = require('m')` and `const { a } = require('m')`
    fn declare_require(&mut self, decl: &VariableDeclarator<'_>, scope: ScopeId) -> bool {
        let Some(Expression::CallExpression(call)) = &decl.init else {
            return false;
        };
        let Some(source) = require_source(call) else {
            return false;
        };
        match &decl.id {
            BindingPattern::BindingIdentifier(ident) => {
                let kind = BindingKind::Import {
                    source,
                    imported: Imported::Namespace,
                };
                self.declare(&ident.name, ident.span, kind, scope);
            }
            BindingPattern::ObjectPattern(pattern) => {
                for property in &pattern.properties {
                    let Some(key) = property.key.static_name() else {
                        self.declaring(BindingKind::Const, Some(scope), |v| {
                            v.visit_binding_pattern(&property.value);
                        });
                        continue;
                    };
                    let local = match &property.value {
                        BindingPattern::BindingIdentifier(ident) => Some(ident),
                        BindingPattern::AssignmentPattern(assign) => match &assign.left {
                            BindingPattern::BindingIdentifier(ident) => Some(ident),
                            _ => None,
                        },
                        _ => None,
                    };
                    match local {
                        Some(ident) => {
                            let kind = BindingKind::Import {
                                source: source.clone(),
                                imported: Imported::Named(key.to_string()),
                            };
                            self.declare(&ident.name, ident.span, kind, scope);
                        }
                        None => self.declaring(BindingKind::Const, Some(scope), |v| {
                            v.visit_binding_pattern(&property.value);
                        }),
                    }
                }
                if let Some(rest) = &pattern.rest {
                    self.declaring(BindingKind::Const, Some(scope), |v| {
                        v.visit_binding_rest_element(rest);
                    });
                }
            }
            _ => return false,
        }
        true
    }
}

fn require_source(call: &CallExpression<'_>) -> Option<String> {
    let Expression::Identifier(callee) = &call.callee else {
        return None;
    };
    if callee.name != "require" || call.arguments.len() != 1 {
        return None;
    }
    match &call.arguments[0] {
        Argument::StringLiteral(lit) => Some(lit.value.to_string()),
        _ => None,
    }
}

impl<'a> Visit<'a> for Collector {
    fn visit_binding_identifier(&mut self, ident: &BindingIdentifier<'a>) {
        if let Some(declaring) = &self.declaring {
            let (kind, scope) = (declaring.kind.clone(), declaring.scope);
            self.declare(&ident.name, ident.span, kind, scope);
        }
    }

    fn visit_identifier_reference(&mut self, ident: &oxc_ast::ast::IdentifierReference<'a>) {
        self.add_reference(&ident.name, ident.span);
    }

    fn visit_import_declaration(&mut self, decl: &ImportDeclaration<'a>) {
        if decl.import_kind.is_type() {
            return;
        }
        let Some(specifiers) = &decl.specifiers else { return };
        let source = decl.source.value.to_string();
        for specifier in specifiers {
            let (local, imported) = match specifier {
                ImportDeclarationSpecifier::ImportSpecifier(spec) => {
                    if spec.import_kind.is_type() {
                        continue;
                    }
                    (&spec.local, Imported::Named(spec.imported.name().to_string()))
                }
                ImportDeclarationSpecifier::ImportDefaultSpecifier(spec) => {
                    (&spec.local, Imported::Default)
                }
                ImportDeclarationSpecifier::ImportNamespaceSpecifier(spec) => {
                    (&spec.local, Imported::Namespace)
                }
            };
            let kind = BindingKind::Import {
                source: source.clone(),
                imported,
            };
            self.declare_in_current(local, kind);
        }
    }

    fn visit_variable_declaration(&mut self, decl: &VariableDeclaration<'a>) {
        let (kind, scope) = match decl.kind {
            VariableDeclarationKind::Var => (BindingKind::Var, self.hoist_target()),
            VariableDeclarationKind::Let => (BindingKind::Let, self.current()),
            _ => (BindingKind::Const, self.current()),
        };
        for declarator in &decl.declarations {
            if let Some(scope) = scope {
                if !self.declare_require(declarator, scope) {
                    self.declaring(kind.clone(), Some(scope), |v| {
                        v.visit_binding_pattern(&declarator.id);
                    });
                }
            }
            if let Some(init) = &declarator.init {
                if !matches!(declarator.id, BindingPattern::BindingIdentifier(_)) {
                    self.hint(init, Usage::Destructured);
                }
                self.not_declaring(|v| v.visit_expression(init));
            }
        }
    }

    fn visit_function(&mut self, func: &Function<'a>, _flags: ScopeFlags) {
        let is_declaration = func.is_declaration();
        if is_declaration {
            if let Some(id) = &func.id {
                self.declare_in_current(id, BindingKind::Function);
            }
        }
        let scope = self.push_scope(ScopeKind::Function, func.span, None);
        if !is_declaration {
            if let Some(id) = &func.id {
                self.declare(&id.name, id.span, BindingKind::Function, scope);
            }
        }
        self.declaring(BindingKind::Param, Some(scope), |v| {
            v.visit_formal_parameters(&func.params);
        });
        if let Some(body) = &func.body {
            self.not_declaring(|v| v.visit_function_body(body));
        }
        self.pop_scope();
    }

    fn visit_arrow_function_expression(&mut self, arrow: &ArrowFunctionExpression<'a>) {
        let scope = self.push_scope(ScopeKind::Function, arrow.span, None);
        self.declaring(BindingKind::Param, Some(scope), |v| {
            v.visit_formal_parameters(&arrow.params);
        });
        self.not_declaring(|v| v.visit_function_body(&arrow.body));
        self.pop_scope();
    }

    fn visit_class(&mut self, class: &Class<'a>) {
        if let Some(id) = &class.id {
            self.declare_in_current(id, BindingKind::Class);
        }
        self.not_declaring(|v| walk::walk_class(v, class));
    }

    fn visit_block_statement(&mut self, block: &BlockStatement<'a>) {
        self.push_scope(ScopeKind::Block, block.span, None);
        walk::walk_block_statement(self, block);
        self.pop_scope();
    }

    fn visit_for_statement(&mut self, stmt: &ForStatement<'a>) {
        if let Some(test) = &stmt.test {
            self.hint(test, Usage::Operand);
        }
        self.push_scope(ScopeKind::Block, stmt.span, None);
        walk::walk_for_statement(self, stmt);
        self.pop_scope();
    }

    fn visit_for_in_statement(&mut self, stmt: &ForInStatement<'a>) {
        self.push_scope(ScopeKind::Block, stmt.span, None);
        walk::walk_for_in_statement(self, stmt);
        self.pop_scope();
    }

    fn visit_for_of_statement(&mut self, stmt: &ForOfStatement<'a>) {
        self.push_scope(ScopeKind::Block, stmt.span, None);
        walk::walk_for_of_statement(self, stmt);
        self.pop_scope();
    }

    fn visit_switch_statement(&mut self, stmt: &SwitchStatement<'a>) {
        self.hint(&stmt.discriminant, Usage::Operand);
        self.visit_expression(&stmt.discriminant);
        self.push_scope(ScopeKind::Block, stmt.span, None);
        for case in &stmt.cases {
            self.visit_switch_case(case);
        }
        self.pop_scope();
    }

    fn visit_catch_clause(&mut self, clause: &CatchClause<'a>) {
        let scope = self.push_scope(ScopeKind::Catch, clause.span, None);
        if let Some(param) = &clause.param {
            self.declaring(BindingKind::CatchParam, Some(scope), |v| {
                v.visit_binding_pattern(&param.pattern);
            });
        }
        self.visit_block_statement(&clause.body);
        self.pop_scope();
    }

    fn visit_if_statement(&mut self, stmt: &IfStatement<'a>) {
        self.hint(&stmt.test, Usage::Operand);
        walk::walk_if_statement(self, stmt);
    }

    fn visit_while_statement(&mut self, stmt: &WhileStatement<'a>) {
        self.hint(&stmt.test, Usage::Operand);
        walk::walk_while_statement(self, stmt);
    }

    fn visit_do_while_statement(&mut self, stmt: &DoWhileStatement<'a>) {
        self.hint(&stmt.test, Usage::Operand);
        walk::walk_do_while_statement(self, stmt);
    }

    fn visit_conditional_expression(&mut self, expr: &ConditionalExpression<'a>) {
        self.hint(&expr.test, Usage::Operand);
        walk::walk_conditional_expression(self, expr);
    }

    fn visit_binary_expression(&mut self, expr: &BinaryExpression<'a>) {
        self.hint(&expr.left, Usage::Operand);
        self.hint(&expr.right, Usage::Operand);
        walk::walk_binary_expression(self, expr);
    }

    fn visit_logical_expression(&mut self, expr: &LogicalExpression<'a>) {
        self.hint(&expr.left, Usage::Operand);
        walk::walk_logical_expression(self, expr);
    }

    fn visit_unary_expression(&mut self, expr: &UnaryExpression<'a>) {
        if matches!(
            expr.operator,
            UnaryOperator::LogicalNot
                | UnaryOperator::UnaryNegation
                | UnaryOperator::UnaryPlus
                | UnaryOperator::BitwiseNot
        ) {
            self.hint(&expr.argument, Usage::Operand);
        }
        walk::walk_unary_expression(self, expr);
    }

    fn visit_update_expression(&mut self, expr: &UpdateExpression<'a>) {
        if let SimpleAssignmentTarget::AssignmentTargetIdentifier(ident) = &expr.argument {
            self.hints.insert(
                ident.span.start,
                Hint {
                    usage: Usage::Operand,
                    flags: ReferenceFlags::Read | ReferenceFlags::Write,
                },
            );
        }
        walk::walk_update_expression(self, expr);
    }

    fn visit_assignment_expression(&mut self, expr: &AssignmentExpression<'a>) {
        let compound = expr.operator != AssignmentOperator::Assign;
        match &expr.left {
            AssignmentTarget::AssignmentTargetIdentifier(ident) if compound => {
                self.hints.insert(
                    ident.span.start,
                    Hint {
                        usage: Usage::Operand,
                        flags: ReferenceFlags::Read | ReferenceFlags::Write,
                    },
                );
            }
            AssignmentTarget::ArrayAssignmentTarget(_)
            | AssignmentTarget::ObjectAssignmentTarget(_) => {
                self.hint(&expr.right, Usage::Destructured);
            }
            _ => {}
        }
        if compound {
            self.hint(&expr.right, Usage::Operand);
        }
        walk::walk_assignment_expression(self, expr);
    }

    fn visit_simple_assignment_target(&mut self, target: &SimpleAssignmentTarget<'a>) {
        if let SimpleAssignmentTarget::AssignmentTargetIdentifier(ident) = target {
            self.hints.entry(ident.span.start).or_insert(Hint {
                usage: Usage::Write,
                flags: ReferenceFlags::Write,
            });
        }
        walk::walk_simple_assignment_target(self, target);
    }

    fn visit_assignment_target_property_identifier(
        &mut self,
        it: &AssignmentTargetPropertyIdentifier<'a>,
    ) {
        self.hints.insert(
            it.binding.span.start,
            Hint {
                usage: Usage::Write,
                flags: ReferenceFlags::Write,
            },
        );
        walk::walk_assignment_target_property_identifier(self, it);
    }

    fn visit_template_literal(&mut self, literal: &TemplateLiteral<'a>) {
        for expr in &literal.expressions {
            self.hint(expr, Usage::Operand);
        }
        walk::walk_template_literal(self, literal);
    }

    fn visit_call_expression(&mut self, call: &CallExpression<'a>) {
        self.hint(&call.callee, Usage::Call);
        walk::walk_call_expression(self, call);
    }

    fn visit_new_expression(&mut self, expr: &NewExpression<'a>) {
        self.hint(&expr.callee, Usage::Call);
        walk::walk_new_expression(self, expr);
    }

    fn visit_static_member_expression(&mut self, expr: &StaticMemberExpression<'a>) {
        self.hint(&expr.object, Usage::Member(expr.property.name.to_string()));
        walk::walk_static_member_expression(self, expr);
    }

    fn visit_computed_member_expression(&mut self, expr: &ComputedMemberExpression<'a>) {
        let usage = match &expr.expression {
            Expression::StringLiteral(lit) => Usage::Member(lit.value.to_string()),
            _ => Usage::Unknown,
        };
        self.hint(&expr.object, usage);
        walk::walk_computed_member_expression(self, expr);
    }

    fn visit_spread_element(&mut self, spread: &SpreadElement<'a>) {
        self.hint(&spread.argument, Usage::Unknown);
        walk::walk_spread_element(self, spread);
    }

    // Types never reference runtime bindings
    fn visit_ts_type(&mut self, _it: &TSType<'a>) {}

    fn visit_ts_type_annotation(&mut self, _it: &TSTypeAnnotation<'a>) {}

    fn visit_ts_type_parameter_instantiation(&mut self, _it: &TSTypeParameterInstantiation<'a>) {}

    fn visit_ts_type_parameter_declaration(&mut self, _it: &TSTypeParameterDeclaration<'a>) {}

    fn visit_ts_interface_declaration(&mut self, _it: &TSInterfaceDeclaration<'a>) {}

    fn visit_ts_type_alias_declaration(&mut self, _it: &TSTypeAliasDeclaration<'a>) {}
}

/// Span of an expression with any wrapping parentheses removed
pub fn unparenthesized_span(expr: &Expression<'_>) -> Span {
    let mut current = expr;
    while let Expression::ParenthesizedExpression(paren) = current {
        current = &paren.expression;
    }
    current.span()
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxc_allocator::Allocator;
    use sfc::parse_sfc;

    fn build(source: &str, f: impl FnOnce(&TemplateAst<'_>, &ScopeTracker)) {
        let allocator = Allocator::default();
        let result = parse_sfc(&allocator, source);
        assert!(result.errors.is_empty(), "{:?}", result.errors);
        let tracker = ScopeTracker::build(&result.ast, &result.descriptor);
        f(&result.ast, &tracker);
    }

    fn find<'t>(tracker: &'t ScopeTracker, name: &str) -> Vec<&'t Reference> {
        tracker.all_references().filter(|r| r.name == name).collect()
    }

    #[test]
    fn test_shadowing_resolves_to_inner_binding() {
        build(
            concat!(
                "<script>\nconst a = 1\n",
                "function f() { const a = 2; return a }\nconsole.log(a)\n</script>",
            ),
            |_, tracker| {
                let refs = find(tracker, "a");
                assert_eq!(refs.len(), 2);
                let inner = tracker.binding(refs[0].resolved.expect("resolved"));
                let outer = tracker.binding(refs[1].resolved.expect("resolved"));
                assert_ne!(inner.id, outer.id);
                assert_eq!(tracker.scope(inner.scope).kind, ScopeKind::Function);
                assert_eq!(tracker.scope(outer.scope).kind, ScopeKind::Module);
                assert!(tracker.is_shadowed(refs[0].scope, "a", outer.id));
                assert!(!tracker.is_shadowed(refs[1].scope, "a", outer.id));
                assert_eq!(tracker.reference_at(refs[1].span).map(|r| r.id), Some(refs[1].id));
            },
        );
    }

    #[test]
    fn test_hoisted_declarations_resolve() {
        build(
            "<script>\nfoo()\nif (x) { var x = 1 }\nfunction foo() {}\n</script>",
            |_, tracker| {
                let foo = find(tracker, "foo");
                assert_eq!(foo[0].usage, Usage::Call);
                assert!(foo[0].resolved.is_some());
                let x = find(tracker, "x");
                assert_eq!(x[0].usage, Usage::Operand);
                let binding = tracker.binding(x[0].resolved.expect("resolved"));
                assert_eq!(binding.kind, BindingKind::Var);
                assert_eq!(tracker.scope(binding.scope).kind, ScopeKind::Module);
            },
        );
    }

    #[test]
    fn test_usage_classification() {
        build(
            concat!(
                "<script>\nlet a, b, c, d, e\na.value\nb[key]\n",
                "const { x } = c\nd = 1\nfn(...e)\n</script>",
            ),
            |_, tracker| {
                assert_eq!(find(tracker, "a")[0].usage, Usage::Member("value".into()));
                assert_eq!(find(tracker, "b")[0].usage, Usage::Unknown);
                assert_eq!(find(tracker, "c")[0].usage, Usage::Destructured);
                let d = find(tracker, "d");
                assert_eq!(d[0].usage, Usage::Write);
                assert!(d[0].flags.is_write());
                assert_eq!(find(tracker, "e")[0].usage, Usage::Unknown);
            },
        );
    }

    #[test]
    fn test_require_and_imports() {
        build(
            concat!(
                "<script>\nimport { ref as r } from 'vue'\nimport * as V from 'vue'\n",
                "const { computed } = require('vue')\n</script>",
            ),
            |_, tracker| {
                let from_vue = |imported| BindingKind::Import {
                    source: "vue".into(),
                    imported,
                };
                let kinds: Vec<_> = tracker
                    .bindings()
                    .map(|b| (b.name.as_str(), b.kind.clone()))
                    .collect();
                assert_eq!(kinds[0], ("r", from_vue(Imported::Named("ref".into()))));
                assert_eq!(kinds[1], ("V", from_vue(Imported::Namespace)));
                assert_eq!(kinds[2], ("computed", from_vue(Imported::Named("computed".into()))));
            },
        );
    }

    #[test]
    fn test_template_scopes() {
        let source = r#"<script setup>
const items = []
const item = 0
</script>
<template>
  <ul>
    <li v-for="item in items" :key="item.id">{{ item }}</li>
  </ul>
  <p>{{ item }}</p>
</template>"#;
        build(source, |_, tracker| {
            let items = find(tracker, "items");
            assert_eq!(items.len(), 1);
            let binding = tracker.binding(items[0].resolved.expect("resolved"));
            assert_eq!(tracker.scope(binding.scope).kind, ScopeKind::Module);

            let item = find(tracker, "item");
            assert_eq!(item.len(), 3);
            let kinds: Vec<_> = item
                .iter()
                .map(|r| tracker.binding(r.resolved.expect("resolved")).kind.clone())
                .collect();
            assert_eq!(kinds, [BindingKind::VForAlias, BindingKind::VForAlias, BindingKind::Const]);
            assert!(item.iter().all(|r| r.in_template));
        });
    }

    #[test]
    fn test_types_are_not_references() {
        build(
            "<script setup lang=\"ts\">\nconst a: Foo = 1 as Bar\ntype T = Baz\n</script>",
            |_, tracker| {
                assert_eq!(tracker.all_references().count(), 0);
            },
        );
    }
}
