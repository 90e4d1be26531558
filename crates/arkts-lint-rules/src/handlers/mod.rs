//! Rule handlers, grouped by the node kinds they serve.
//!
//! Each handler is registered in [`crate::dispatch`] and receives the
//! visited node already known to be of its kind. Checks shared by several
//! families live here.

pub(crate) mod classes;
pub(crate) mod declarations;
pub(crate) mod enums;
pub(crate) mod expressions;
pub(crate) mod functions;
pub(crate) mod identifiers;
pub(crate) mod imports;
pub(crate) mod interfaces;
pub(crate) mod literals;
pub(crate) mod modules;
pub(crate) mod sendable;
pub(crate) mod statements;
pub(crate) mod types;

use crate::linter::Linter;
use crate::semantics::{
    first_declaration, has_sendable_decorator, is_any, is_anonymous, is_es_object_type_node,
    is_reference, is_union, is_unknown, is_unsupported, resolve,
};
use arkts_lint_core::walker::any_descendant;
use arkts_lint_core::{
    FaultId, NodeFlags, NodeId, NodeKind, Operator, SourceFile, SymbolFlags, TypeId,
};

const MAX_DEPTH: usize = 16;

/// `{ a }` or `[a, b]` in a binding position.
pub(crate) fn is_binding_pattern(file: &SourceFile, node: NodeId) -> bool {
    matches!(
        file.kind(node),
        NodeKind::ObjectBindingPattern | NodeKind::ArrayBindingPattern
    )
}

/// A literal written on the left of `=`, directly or nested in another
/// literal, or as the target of a `for .. of`/`for .. in` loop.
pub(crate) fn is_destructuring_assignment_lhs(file: &SourceFile, node: NodeId) -> bool {
    let mut cur = node;
    while let Some(parent) = file.parent(cur) {
        match file.kind(parent) {
            NodeKind::ArrayLiteralExpression
            | NodeKind::ObjectLiteralExpression
            | NodeKind::PropertyAssignment
            | NodeKind::ShorthandPropertyAssignment
            | NodeKind::SpreadElement
            | NodeKind::SpreadAssignment
            | NodeKind::ParenthesizedExpression => cur = parent,
            NodeKind::BinaryExpression => {
                return file.operator(parent) == Some(Operator::Eq)
                    && file.fields(parent).left == Some(cur);
            }
            NodeKind::ForOfStatement | NodeKind::ForInStatement => {
                return file.fields(parent).initializer == Some(cur);
            }
            _ => return false,
        }
    }
    false
}

/// `any`/`unknown` where a declaration's type is inferred.
///
/// `let x;` and `x;` fields without an initializer have no inferable type
/// and count as `any`.
pub(crate) fn check_inferred_type(cx: &mut Linter<'_>, decl: NodeId) {
    let file = cx.file();
    let fields = file.fields(decl);
    if fields.ty.is_some() {
        return;
    }
    if file
        .parent(decl)
        .is_some_and(|p| file.is(p, NodeKind::CatchClause))
    {
        return;
    }
    if fields.name.is_some_and(|n| is_binding_pattern(file, n)) {
        return;
    }
    let declared_without_value = fields.initializer.is_none()
        && match file.kind(decl) {
            NodeKind::PropertyDeclaration => true,
            NodeKind::VariableDeclaration => file
                .parent(decl)
                .and_then(|list| file.parent(list))
                .is_some_and(|stmt| file.is(stmt, NodeKind::VariableStatement)),
            _ => false,
        };
    if declared_without_value {
        cx.report(decl, FaultId::AnyType);
        return;
    }
    if let Some(t) = cx.type_at(decl) {
        validate_inferred(cx, t, decl, 0);
    }
}

fn validate_inferred(cx: &mut Linter<'_>, t: TypeId, decl: NodeId, depth: usize) {
    if depth > MAX_DEPTH {
        return;
    }
    let o = cx.oracle();
    let Some(info) = o.ty(t) else {
        return;
    };
    if info.alias_symbol.is_some() {
        return;
    }
    if is_reference(o, t) {
        let file = cx.file();
        let written = any_descendant(
            file,
            decl,
            |n| matches!(file.kind(n), NodeKind::AnyKeyword | NodeKind::UnknownKeyword),
            |_| false,
        );
        if !written {
            for &arg in &info.type_arguments {
                validate_inferred(cx, arg, decl, depth + 1);
            }
        }
        return;
    }
    if is_union(o, t) {
        for member in o.union_members(t) {
            validate_inferred(cx, member, decl, depth + 1);
        }
    }
    if is_any(o, t) {
        cx.report(decl, FaultId::AnyType);
    } else if is_unknown(o, t) {
        cx.report(decl, FaultId::UnknownType);
    }
}

/// `x!: T` on a variable or field.
pub(crate) fn check_definite_assignment(cx: &mut Linter<'_>, decl: NodeId) {
    let file = cx.file();
    if !file.has_flags(decl, NodeFlags::EXCLAMATION) {
        return;
    }
    if file.is(decl, NodeKind::PropertyDeclaration)
        && file.parent(decl).is_some_and(|class| {
            file.is(class, NodeKind::ClassDeclaration)
                && has_sendable_decorator(file, class)
        })
    {
        cx.report(decl, FaultId::SendableDefiniteAssignment);
        return;
    }
    let rule = if cx.arkts2() {
        FaultId::DefiniteAssignmentError
    } else {
        FaultId::DefiniteAssignment
    };
    cx.report_with_fix(decl, rule, |fixer, site| fixer.fix_definite_assignment(site));
}

/// The `ESObject` rule id for the active tier.
pub(crate) fn es_object_rule(cx: &Linter<'_>) -> FaultId {
    if cx.arkts2() {
        FaultId::EsObjectTypeError
    } else {
        FaultId::EsObjectType
    }
}

/// `expr` names a variable declared as `ESObject`.
pub(crate) fn is_es_object_value(cx: &Linter<'_>, expr: NodeId) -> bool {
    let o = cx.oracle();
    let Some(sym) = cx.true_symbol_at(expr) else {
        return false;
    };
    if !o.symbol_flags(sym).intersects(SymbolFlags::VARIABLE) {
        return false;
    }
    first_declaration(o, sym)
        .and_then(|d| resolve(o, d))
        .filter(|(f, n)| f.is(*n, NodeKind::VariableDeclaration))
        .and_then(|(f, n)| f.fields(n).ty.map(|ty| (f, ty)))
        .is_some_and(|(f, ty)| is_es_object_type_node(f, ty))
}

/// A value `ESObject` may hold: not a literal, and of an unsupported or
/// anonymous type.
pub(crate) fn is_value_assignable_to_es_object(cx: &Linter<'_>, value: NodeId) -> bool {
    let file = cx.file();
    if matches!(
        file.kind(value),
        NodeKind::ArrayLiteralExpression | NodeKind::ObjectLiteralExpression
    ) {
        return false;
    }
    let o = cx.oracle();
    cx.type_at(value)
        .is_some_and(|t| is_unsupported(o, t) || is_anonymous(o, t))
}

/// `ESObject` flowing into or out of a typed location.
pub(crate) fn check_es_object_assignment(
    cx: &mut Linter<'_>,
    node: NodeId,
    declared: Option<NodeId>,
    value: NodeId,
) {
    let file = cx.file();
    let declared_es_object = declared.is_some_and(|ty| is_es_object_type_node(file, ty));
    if declared.is_some() && !declared_es_object && is_es_object_value(cx, value) {
        let rule = es_object_rule(cx);
        cx.report(node, rule);
        return;
    }
    if declared_es_object && !is_value_assignable_to_es_object(cx, value) {
        let rule = es_object_rule(cx);
        cx.report(node, rule);
    }
}

/// Inside any block: a function body, a loop body or a bare block.
pub(crate) fn is_inside_block(file: &SourceFile, node: NodeId) -> bool {
    file.ancestors(node).any(|a| file.is(a, NodeKind::Block))
}
