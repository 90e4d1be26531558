//! Statements: `throw`, loops, `catch` and `return`.

use super::is_binding_pattern;
use crate::analysis::structural::check_assignment_matching;
use crate::linter::Linter;
use crate::semantics::{is_class_or_interface, is_or_derived_from, is_std_error_type};
use arkts_lint_core::{FaultId, NodeId, NodeKind};

/// Only `Error` and its subclasses may be thrown.
pub(crate) fn throw_statement(cx: &mut Linter<'_>, node: NodeId) {
    let Some(t) = cx.file().fields(node).expression.and_then(|e| cx.type_at(e)) else {
        return;
    };
    let o = cx.oracle();
    if !is_class_or_interface(o, t) || !is_or_derived_from(o, t, &|b| is_std_error_type(o, b)) {
        cx.report(node, FaultId::ThrowStatement);
    }
}

pub(crate) fn for_statement(cx: &mut Linter<'_>, node: NodeId) {
    if let Some(init) = cx.file().fields(node).initializer {
        check_loop_destructuring(cx, init);
    }
}

pub(crate) fn for_in_statement(cx: &mut Linter<'_>, node: NodeId) {
    if let Some(init) = cx.file().fields(node).initializer {
        check_loop_destructuring(cx, init);
    }
    cx.report(node, FaultId::ForInStatement);
}

pub(crate) fn for_of_statement(cx: &mut Linter<'_>, node: NodeId) {
    if let Some(init) = cx.file().fields(node).initializer {
        check_loop_destructuring(cx, init);
    }
}

fn check_loop_destructuring(cx: &mut Linter<'_>, init: NodeId) {
    let file = cx.file();
    match file.kind(init) {
        NodeKind::VariableDeclarationList => {
            let [decl] = file.fields(init).elements.as_slice() else {
                return;
            };
            let destructures = file
                .fields(*decl)
                .name
                .is_some_and(|n| is_binding_pattern(file, n));
            if cx.options().use_rt_logic && destructures {
                cx.report(*decl, FaultId::DestructuringDeclaration);
            }
        }
        NodeKind::ArrayLiteralExpression | NodeKind::ObjectLiteralExpression => {
            cx.report(init, FaultId::DestructuringAssignment);
        }
        _ => {}
    }
}

/// The catch variable cannot be annotated.
pub(crate) fn catch_clause(cx: &mut Linter<'_>, node: NodeId) {
    let file = cx.file();
    let annotated = file
        .fields(node)
        .declaration
        .is_some_and(|decl| file.fields(decl).ty.is_some());
    if annotated {
        cx.report(node, FaultId::CatchWithUnsupportedType);
    }
}

/// Returned values match the function's return type nominally.
pub(crate) fn return_statement(cx: &mut Linter<'_>, node: NodeId) {
    let Some(expr) = cx.file().fields(node).expression else {
        return;
    };
    if let Some(lhs) = cx.contextual_type_at(expr) {
        check_assignment_matching(cx, node, lhs, expr, true);
    }
}
