//! Incremental construction of [`SourceFile`] arenas.
//!
//! Hosts that already have a typed tree usually deserialize a
//! [`SourceFile`] directly; the builder is for programmatic construction.
//! Children are recorded in the order the role setters are called, which
//! must be source order.

use super::{Fields, Node, NodeFlags, NodeId, NodeKind, Operator, SourceFile, TextRange};
use std::path::PathBuf;

/// A node under construction.
#[derive(Debug)]
pub struct NodeDraft {
    node: Node,
    explicit_range: bool,
}

macro_rules! single_role {
    ($($(#[$doc:meta])* $name:ident;)*) => {
        $(
            $(#[$doc])*
            pub fn $name(&mut self, id: NodeId) -> &mut Self {
                self.node.fields.$name = Some(id);
                self.node.children.push(id);
                self
            }
        )*
    };
}

macro_rules! list_role {
    ($($(#[$doc:meta])* $name:ident;)*) => {
        $(
            $(#[$doc])*
            pub fn $name(&mut self, ids: impl IntoIterator<Item = NodeId>) -> &mut Self {
                for id in ids {
                    self.node.fields.$name.push(id);
                    self.node.children.push(id);
                }
                self
            }
        )*
    };
}

impl NodeDraft {
    fn new(kind: NodeKind) -> Self {
        Self {
            node: Node {
                kind,
                range: TextRange::default(),
                parent: None,
                children: Vec::new(),
                fields: Fields::default(),
                text: None,
                operator: None,
                flags: NodeFlags::NONE,
            },
            explicit_range: false,
        }
    }

    single_role! {
        /// Sets the name role.
        name;
        /// Sets the property-name role.
        property_name;
        /// Sets the type role.
        ty;
        /// Sets the initializer role.
        initializer;
        /// Sets the expression role.
        expression;
        /// Sets the element-access index.
        index;
        /// Sets the left operand.
        left;
        /// Sets the right operand.
        right;
        /// Sets the condition.
        condition;
        /// Sets the `for` incrementor.
        incrementor;
        /// Sets the body.
        body;
        /// Sets the else branch.
        else_branch;
        /// Sets the declaration role.
        declaration;
        /// Sets the import clause.
        import_clause;
        /// Sets import/export bindings.
        bindings;
        /// Sets the module specifier.
        module_specifier;
        /// Sets import attributes.
        attributes;
        /// Sets the catch clause.
        handler;
        /// Sets the finally block.
        finalizer;
    }

    list_role! {
        /// Appends elements.
        elements;
        /// Appends call arguments.
        arguments;
        /// Appends parameters.
        parameters;
        /// Appends type arguments.
        type_arguments;
        /// Appends type parameters.
        type_parameters;
        /// Appends heritage clauses.
        heritage_clauses;
        /// Appends decorators.
        decorators;
    }

    /// Sets an optional role through `f` when `id` is present.
    pub fn opt(&mut self, id: Option<NodeId>, f: fn(&mut Self, NodeId) -> &mut Self) -> &mut Self {
        if let Some(id) = id {
            f(self, id);
        }
        self
    }

    /// Sets identifier or literal text.
    pub fn text(&mut self, text: impl Into<String>) -> &mut Self {
        self.node.text = Some(text.into());
        self
    }

    /// Sets the operator.
    pub fn operator(&mut self, op: Operator) -> &mut Self {
        self.node.operator = Some(op);
        self
    }

    /// Adds flags.
    pub fn flags(&mut self, flags: NodeFlags) -> &mut Self {
        self.node.flags |= flags;
        self
    }

    /// Sets an explicit source range.
    pub fn range(&mut self, range: TextRange) -> &mut Self {
        self.node.range = range;
        self.explicit_range = true;
        self
    }
}

/// Builds a [`SourceFile`] bottom-up.
#[derive(Debug)]
pub struct TreeBuilder {
    path: PathBuf,
    nodes: Vec<Node>,
    explicit_ranges: bool,
}

impl TreeBuilder {
    /// Starts a new file.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            nodes: Vec::new(),
            explicit_ranges: false,
        }
    }

    /// Pushes a node configured by `f` and wires its children's parents.
    pub fn push(&mut self, kind: NodeKind, f: impl FnOnce(&mut NodeDraft)) -> NodeId {
        let mut draft = NodeDraft::new(kind);
        f(&mut draft);
        self.explicit_ranges |= draft.explicit_range;
        let id = NodeId(u32::try_from(self.nodes.len()).unwrap_or(u32::MAX));
        for &child in &draft.node.children {
            if let Some(c) = self.nodes.get_mut(child.0 as usize) {
                c.parent = Some(id);
            }
        }
        self.nodes.push(draft.node);
        id
    }

    /// Adds flags to an existing node.
    pub fn add_flags(&mut self, id: NodeId, flags: NodeFlags) {
        if let Some(node) = self.nodes.get_mut(id.0 as usize) {
            node.flags |= flags;
        }
    }

    /// Finishes the file with the given top-level statements.
    ///
    /// Nodes get synthetic document-order ranges unless explicit ranges
    /// were supplied: a node's start is its pre-order position and its end
    /// lies past its last descendant.
    #[must_use]
    pub fn finish(mut self, statements: impl IntoIterator<Item = NodeId>) -> SourceFile {
        let root = self.push(NodeKind::SourceFile, |n| {
            n.elements(statements);
        });
        if !self.explicit_ranges {
            let mut counter = 0;
            assign_ranges(&mut self.nodes, root, &mut counter);
        }
        SourceFile::new(self.path, self.nodes, root)
    }

    // ── Leaves ──

    /// Identifier.
    pub fn ident(&mut self, text: &str) -> NodeId {
        self.push(NodeKind::Identifier, |n| {
            n.text(text);
        })
    }

    /// `#private` identifier.
    pub fn private_ident(&mut self, text: &str) -> NodeId {
        self.push(NodeKind::PrivateIdentifier, |n| {
            n.text(text);
        })
    }

    /// Numeric literal.
    pub fn number(&mut self, text: &str) -> NodeId {
        self.push(NodeKind::NumericLiteral, |n| {
            n.text(text);
        })
    }

    /// String literal (text without quotes).
    pub fn string(&mut self, text: &str) -> NodeId {
        self.push(NodeKind::StringLiteral, |n| {
            n.text(text);
        })
    }

    /// Keyword or other leaf token of the given kind.
    pub fn token(&mut self, kind: NodeKind) -> NodeId {
        self.push(kind, |_| {})
    }

    // ── Types ──

    /// Type reference `Name<args>`.
    pub fn type_ref(&mut self, name: &str, args: impl IntoIterator<Item = NodeId>) -> NodeId {
        let name = self.ident(name);
        self.push(NodeKind::TypeReference, |n| {
            n.name(name).type_arguments(args);
        })
    }

    /// Array type `elem[]`.
    pub fn array_type(&mut self, elem: NodeId) -> NodeId {
        self.push(NodeKind::ArrayType, |n| {
            n.elements([elem]);
        })
    }

    /// Object type literal.
    pub fn type_literal(&mut self, members: impl IntoIterator<Item = NodeId>) -> NodeId {
        self.push(NodeKind::TypeLiteral, |n| {
            n.elements(members);
        })
    }

    // ── Expressions ──

    /// Parenthesized expression.
    pub fn paren(&mut self, expr: NodeId) -> NodeId {
        self.push(NodeKind::ParenthesizedExpression, |n| {
            n.expression(expr);
        })
    }

    /// Binary expression.
    pub fn binary(&mut self, left: NodeId, op: Operator, right: NodeId) -> NodeId {
        self.push(NodeKind::BinaryExpression, |n| {
            n.left(left).operator(op).right(right);
        })
    }

    /// Prefix unary expression.
    pub fn prefix(&mut self, op: Operator, operand: NodeId) -> NodeId {
        self.push(NodeKind::PrefixUnaryExpression, |n| {
            n.operator(op).expression(operand);
        })
    }

    /// Postfix unary expression.
    pub fn postfix(&mut self, operand: NodeId, op: Operator) -> NodeId {
        self.push(NodeKind::PostfixUnaryExpression, |n| {
            n.expression(operand).operator(op);
        })
    }

    /// Call expression.
    pub fn call(&mut self, callee: NodeId, args: impl IntoIterator<Item = NodeId>) -> NodeId {
        self.push(NodeKind::CallExpression, |n| {
            n.expression(callee).arguments(args);
        })
    }

    /// `new` expression.
    pub fn new_expr(&mut self, callee: NodeId, args: impl IntoIterator<Item = NodeId>) -> NodeId {
        self.push(NodeKind::NewExpression, |n| {
            n.expression(callee).arguments(args);
        })
    }

    /// Property access `object.name`.
    pub fn prop_access(&mut self, object: NodeId, name: &str) -> NodeId {
        let name = self.ident(name);
        self.push(NodeKind::PropertyAccessExpression, |n| {
            n.expression(object).name(name);
        })
    }

    /// Element access `object[index]`.
    pub fn elem_access(&mut self, object: NodeId, index: NodeId) -> NodeId {
        self.push(NodeKind::ElementAccessExpression, |n| {
            n.expression(object).index(index);
        })
    }

    /// Object literal.
    pub fn object_literal(&mut self, props: impl IntoIterator<Item = NodeId>) -> NodeId {
        self.push(NodeKind::ObjectLiteralExpression, |n| {
            n.elements(props);
        })
    }

    /// Property assignment `name: init`.
    pub fn property_assignment(&mut self, name: NodeId, init: NodeId) -> NodeId {
        self.push(NodeKind::PropertyAssignment, |n| {
            n.name(name).initializer(init);
        })
    }

    /// Array literal.
    pub fn array_literal(&mut self, elems: impl IntoIterator<Item = NodeId>) -> NodeId {
        self.push(NodeKind::ArrayLiteralExpression, |n| {
            n.elements(elems);
        })
    }

    /// `expr as ty`.
    pub fn as_expr(&mut self, expr: NodeId, ty: NodeId) -> NodeId {
        self.push(NodeKind::AsExpression, |n| {
            n.expression(expr).ty(ty);
        })
    }

    /// Arrow function.
    pub fn arrow(&mut self, params: impl IntoIterator<Item = NodeId>, body: NodeId) -> NodeId {
        self.push(NodeKind::ArrowFunction, |n| {
            n.parameters(params).body(body);
        })
    }

    /// Function expression.
    pub fn function_expr(
        &mut self,
        name: Option<NodeId>,
        params: impl IntoIterator<Item = NodeId>,
        body: NodeId,
    ) -> NodeId {
        self.push(NodeKind::FunctionExpression, |n| {
            n.opt(name, NodeDraft::name).parameters(params).body(body);
        })
    }

    // ── Statements ──

    /// Expression statement.
    pub fn expr_stmt(&mut self, expr: NodeId) -> NodeId {
        self.push(NodeKind::ExpressionStatement, |n| {
            n.expression(expr);
        })
    }

    /// Block.
    pub fn block(&mut self, stmts: impl IntoIterator<Item = NodeId>) -> NodeId {
        self.push(NodeKind::Block, |n| {
            n.elements(stmts);
        })
    }

    /// `return expr;`
    pub fn ret(&mut self, expr: Option<NodeId>) -> NodeId {
        self.push(NodeKind::ReturnStatement, |n| {
            n.opt(expr, NodeDraft::expression);
        })
    }

    /// `for (init; cond; incr) body`.
    pub fn for_stmt(
        &mut self,
        init: Option<NodeId>,
        cond: Option<NodeId>,
        incr: Option<NodeId>,
        body: NodeId,
    ) -> NodeId {
        self.push(NodeKind::ForStatement, |n| {
            n.opt(init, NodeDraft::initializer)
                .opt(cond, NodeDraft::condition)
                .opt(incr, NodeDraft::incrementor)
                .body(body);
        })
    }

    // ── Declarations ──

    /// Variable declaration `name: ty = init`.
    pub fn var_decl(&mut self, name: NodeId, ty: Option<NodeId>, init: Option<NodeId>) -> NodeId {
        self.push(NodeKind::VariableDeclaration, |n| {
            n.name(name)
                .opt(ty, NodeDraft::ty)
                .opt(init, NodeDraft::initializer);
        })
    }

    /// Declaration list; `flags` is [`NodeFlags::LET`], [`NodeFlags::CONST`] or none for `var`.
    pub fn var_list(&mut self, flags: NodeFlags, decls: impl IntoIterator<Item = NodeId>) -> NodeId {
        self.push(NodeKind::VariableDeclarationList, |n| {
            n.flags(flags).elements(decls);
        })
    }

    /// Variable statement wrapping a declaration list.
    pub fn var_stmt(&mut self, list: NodeId) -> NodeId {
        self.push(NodeKind::VariableStatement, |n| {
            n.declaration(list);
        })
    }

    /// Single-declaration variable statement; returns `(statement, declaration)`.
    pub fn variable(
        &mut self,
        flags: NodeFlags,
        name: &str,
        ty: Option<NodeId>,
        init: Option<NodeId>,
    ) -> (NodeId, NodeId) {
        let name = self.ident(name);
        let decl = self.var_decl(name, ty, init);
        let list = self.var_list(flags, [decl]);
        (self.var_stmt(list), decl)
    }

    /// Parameter.
    pub fn param(&mut self, name: NodeId, ty: Option<NodeId>, init: Option<NodeId>) -> NodeId {
        self.push(NodeKind::Parameter, |n| {
            n.name(name)
                .opt(ty, NodeDraft::ty)
                .opt(init, NodeDraft::initializer);
        })
    }

    /// Function declaration.
    pub fn function_decl(
        &mut self,
        decorators: impl IntoIterator<Item = NodeId>,
        name: Option<NodeId>,
        params: impl IntoIterator<Item = NodeId>,
        ret: Option<NodeId>,
        body: Option<NodeId>,
    ) -> NodeId {
        self.push(NodeKind::FunctionDeclaration, |n| {
            n.decorators(decorators)
                .opt(name, NodeDraft::name)
                .parameters(params)
                .opt(ret, NodeDraft::ty)
                .opt(body, NodeDraft::body);
        })
    }

    /// Decorator `@expr`.
    pub fn decorator(&mut self, expr: NodeId) -> NodeId {
        self.push(NodeKind::Decorator, |n| {
            n.expression(expr);
        })
    }

    /// Decorator with an identifier expression, e.g. `@Sendable`.
    pub fn decorator_named(&mut self, name: &str) -> NodeId {
        let expr = self.ident(name);
        self.decorator(expr)
    }

    /// Class declaration.
    pub fn class_decl(
        &mut self,
        decorators: impl IntoIterator<Item = NodeId>,
        name: Option<NodeId>,
        heritage: impl IntoIterator<Item = NodeId>,
        members: impl IntoIterator<Item = NodeId>,
    ) -> NodeId {
        self.push(NodeKind::ClassDeclaration, |n| {
            n.decorators(decorators)
                .opt(name, NodeDraft::name)
                .heritage_clauses(heritage)
                .elements(members);
        })
    }

    /// Heritage clause; `implements` when `implements` is true, `extends` otherwise.
    pub fn heritage(&mut self, implements: bool, types: impl IntoIterator<Item = NodeId>) -> NodeId {
        self.push(NodeKind::HeritageClause, |n| {
            if implements {
                n.flags(NodeFlags::IMPLEMENTS);
            }
            n.elements(types);
        })
    }

    /// Heritage type `expr<args>`.
    pub fn expr_with_type_args(
        &mut self,
        expr: NodeId,
        args: impl IntoIterator<Item = NodeId>,
    ) -> NodeId {
        self.push(NodeKind::ExpressionWithTypeArguments, |n| {
            n.expression(expr).type_arguments(args);
        })
    }

    /// Class property declaration.
    pub fn property_decl(&mut self, name: NodeId, ty: Option<NodeId>, init: Option<NodeId>) -> NodeId {
        self.push(NodeKind::PropertyDeclaration, |n| {
            n.name(name)
                .opt(ty, NodeDraft::ty)
                .opt(init, NodeDraft::initializer);
        })
    }

    /// Method declaration.
    pub fn method(
        &mut self,
        name: NodeId,
        params: impl IntoIterator<Item = NodeId>,
        ret: Option<NodeId>,
        body: Option<NodeId>,
    ) -> NodeId {
        self.push(NodeKind::MethodDeclaration, |n| {
            n.name(name)
                .parameters(params)
                .opt(ret, NodeDraft::ty)
                .opt(body, NodeDraft::body);
        })
    }

    /// Constructor.
    pub fn constructor(&mut self, params: impl IntoIterator<Item = NodeId>, body: Option<NodeId>) -> NodeId {
        self.push(NodeKind::Constructor, |n| {
            n.parameters(params).opt(body, NodeDraft::body);
        })
    }

    /// Interface declaration.
    pub fn interface_decl(
        &mut self,
        name: NodeId,
        heritage: impl IntoIterator<Item = NodeId>,
        members: impl IntoIterator<Item = NodeId>,
    ) -> NodeId {
        self.push(NodeKind::InterfaceDeclaration, |n| {
            n.name(name).heritage_clauses(heritage).elements(members);
        })
    }

    /// Property signature.
    pub fn property_sig(&mut self, name: NodeId, ty: Option<NodeId>) -> NodeId {
        self.push(NodeKind::PropertySignature, |n| {
            n.name(name).opt(ty, NodeDraft::ty);
        })
    }

    /// Method signature.
    pub fn method_sig(
        &mut self,
        name: NodeId,
        params: impl IntoIterator<Item = NodeId>,
        ret: Option<NodeId>,
    ) -> NodeId {
        self.push(NodeKind::MethodSignature, |n| {
            n.name(name).parameters(params).opt(ret, NodeDraft::ty);
        })
    }

    /// Enum declaration.
    pub fn enum_decl(&mut self, name: NodeId, members: impl IntoIterator<Item = NodeId>) -> NodeId {
        self.push(NodeKind::EnumDeclaration, |n| {
            n.name(name).elements(members);
        })
    }

    /// Enum member.
    pub fn enum_member(&mut self, name: NodeId, init: Option<NodeId>) -> NodeId {
        self.push(NodeKind::EnumMember, |n| {
            n.name(name).opt(init, NodeDraft::initializer);
        })
    }

    /// `namespace name { stmts }`.
    pub fn namespace(&mut self, name: NodeId, stmts: impl IntoIterator<Item = NodeId>) -> NodeId {
        let body = self.push(NodeKind::ModuleBlock, |n| {
            n.elements(stmts);
        });
        self.push(NodeKind::ModuleDeclaration, |n| {
            n.name(name).body(body).flags(NodeFlags::NAMESPACE);
        })
    }

    /// Type alias.
    pub fn type_alias(&mut self, name: NodeId, ty: NodeId) -> NodeId {
        self.push(NodeKind::TypeAliasDeclaration, |n| {
            n.name(name).ty(ty);
        })
    }

    /// Import declaration `import { specs } from 'module'`; returns `(declaration, specifiers)`.
    pub fn import_named(&mut self, names: &[&str], module: &str) -> (NodeId, Vec<NodeId>) {
        let specs: Vec<NodeId> = names
            .iter()
            .map(|name| {
                let ident = self.ident(name);
                self.push(NodeKind::ImportSpecifier, |n| {
                    n.name(ident);
                })
            })
            .collect();
        let named = self.push(NodeKind::NamedImports, |n| {
            n.elements(specs.iter().copied());
        });
        let clause = self.push(NodeKind::ImportClause, |n| {
            n.bindings(named);
        });
        let spec = self.string(module);
        let decl = self.push(NodeKind::ImportDeclaration, |n| {
            n.import_clause(clause).module_specifier(spec);
        });
        (decl, specs)
    }

}

fn assign_ranges(nodes: &mut [Node], id: NodeId, counter: &mut u32) {
    let start = *counter;
    *counter += 1;
    let children = nodes
        .get(id.0 as usize)
        .map(|n| n.children.clone())
        .unwrap_or_default();
    for child in children {
        assign_ranges(nodes, child, counter);
    }
    if let Some(node) = nodes.get_mut(id.0 as usize) {
        node.range = TextRange::new(start, *counter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parents_are_wired() {
        let mut b = TreeBuilder::new("a.ets");
        let one = b.number("1");
        let (stmt, decl) = b.variable(NodeFlags::LET, "x", None, Some(one));
        let file = b.finish([stmt]);
        assert_eq!(file.parent(one), Some(decl));
        assert_eq!(file.kind(file.parent(decl).unwrap()), NodeKind::VariableDeclarationList);
        assert_eq!(file.parent(stmt), Some(file.root));
    }

    #[test]
    fn synthetic_ranges_nest() {
        let mut b = TreeBuilder::new("a.ets");
        let a = b.ident("a");
        let c = b.ident("c");
        let sum = b.binary(a, Operator::Plus, c);
        let stmt = b.expr_stmt(sum);
        let file = b.finish([stmt]);
        let outer = file.range(sum);
        assert!(outer.contains(file.range(a).start));
        assert!(outer.contains(file.range(c).start));
        assert!(file.range(a).end <= file.range(c).start);
    }
}
