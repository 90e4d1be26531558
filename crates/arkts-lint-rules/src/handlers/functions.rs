//! Function declarations, function expressions and arrow functions, plus
//! the return-type and `this` checks methods share with them.

use super::sendable::is_sendable_decorator_valid;
use crate::analysis::captures::scan_captured_vars;
use crate::analysis::duplicates::count_declarations_with_duplicate_name;
use crate::analysis::sdk::check_duplicate_global;
use crate::linter::Linter;
use crate::semantics::{
    function_overloads_have_sendable, has_sendable_decorator, is_library_type, is_unsupported,
    non_sendable_decorators,
};
use arkts_lint_core::walker::{any_descendant, walk};
use arkts_lint_core::{FaultId, NodeFlags, NodeId, NodeKind, SignatureInfo, SourceFile};

pub(crate) fn function_expression(cx: &mut Linter<'_>, node: NodeId) {
    let unfixable = check_missing_return_type(cx, node);
    cx.report_with_fix(node, FaultId::FunctionExpression, |fixer, site| {
        fixer.fix_function_expression(site)
    });
    let file = cx.file();
    if file.has_flags(node, NodeFlags::ASTERISK) {
        cx.report(node, FaultId::GeneratorFunction);
    }
    if !is_inside_class_or_interface(file, node) {
        if let Some(body) = file.fields(node).body {
            report_this_in_scope(cx, body);
        }
    }
    if unfixable {
        cx.report(node, FaultId::LimitedReturnTypeInference);
    }
}

pub(crate) fn arrow_function(cx: &mut Linter<'_>, node: NodeId) {
    let file = cx.file();
    if !is_inside_class_or_interface(file, node) {
        if let Some(body) = file.fields(node).body {
            report_this_in_scope(cx, body);
        }
    }
    let library_context = cx
        .contextual_type_at(node)
        .is_some_and(|t| is_library_type(cx.oracle(), t));
    if !library_context && file.fields(node).ty.is_none() {
        check_missing_return_type(cx, node);
    }
}

pub(crate) fn function_declaration(cx: &mut Linter<'_>, node: NodeId) {
    let file = cx.file();
    let fields = file.fields(node);
    if fields.ty.is_none() {
        check_missing_return_type(cx, node);
    }
    if let Some(name) = fields.name {
        count_declarations_with_duplicate_name(cx, name, node, None);
        if file.parent(node) == Some(file.root) {
            check_duplicate_global(cx, name);
        }
    }
    if let Some(body) = fields.body {
        report_this_in_scope(cx, body);
    }
    if file
        .parent(node)
        .is_some_and(|p| !matches!(file.kind(p), NodeKind::SourceFile | NodeKind::ModuleBlock))
    {
        cx.report_with_fix(node, FaultId::LocalFunction, |fixer, site| {
            fixer.fix_nested_function(site)
        });
    }
    if file.has_flags(node, NodeFlags::ASTERISK) {
        cx.report(node, FaultId::GeneratorFunction);
    }
    check_sendable_function(cx, node);
}

/// Overloads of a sendable function all carry `@Sendable` and nothing else,
/// and its body captures only what travels with it.
fn check_sendable_function(cx: &mut Linter<'_>, node: NodeId) {
    let file = cx.file();
    let overloads_sendable = file
        .fields(node)
        .name
        .and_then(|n| cx.symbol_at(n))
        .is_some_and(|s| function_overloads_have_sendable(cx.oracle(), s))
        || has_sendable_decorator(file, node);
    if !overloads_sendable || !is_sendable_decorator_valid(cx, node) {
        return;
    }
    for decorator in non_sendable_decorators(file, node) {
        cx.report(decorator, FaultId::SendableFunctionDecorator);
    }
    if !has_sendable_decorator(file, node) {
        cx.report(node, FaultId::SendableFunctionOverloadDecorator);
    }
    scan_captured_vars(cx, node, node, FaultId::SendableFunctionImportedVariables);
}

fn is_inside_class_or_interface(file: &SourceFile, node: NodeId) -> bool {
    file.ancestors(node).any(|a| {
        let kind = file.kind(a);
        kind.is_class_like() || kind == NodeKind::InterfaceDeclaration
    })
}

/// Reports `this` used directly in `scope`; nested classes, functions and
/// namespaces bind their own.
pub(crate) fn report_this_in_scope(cx: &mut Linter<'_>, scope: NodeId) {
    let file = cx.file();
    let mut found = Vec::new();
    walk(
        file,
        scope,
        |n| {
            if file.is(n, NodeKind::ThisKeyword) {
                found.push(n);
            }
        },
        |n| {
            n != scope
                && matches!(
                    file.kind(n),
                    NodeKind::ClassDeclaration
                        | NodeKind::ClassExpression
                        | NodeKind::FunctionDeclaration
                        | NodeKind::FunctionExpression
                        | NodeKind::ModuleDeclaration
                )
        },
    );
    for this in found {
        cx.report(this, FaultId::FunctionContainsThis);
    }
}

/// A function-like declaration written without a return type.
///
/// Returns true when its return type can neither be inferred nor spelled
/// out by a fix. Function expressions are not reported here; their handler
/// reports on that result.
pub(crate) fn check_missing_return_type(cx: &mut Linter<'_>, decl: NodeId) -> bool {
    let file = cx.file();
    let fields = file.fields(decl);
    if cx.options().use_rt_logic && fields.ty.is_some() {
        return false;
    }
    let is_signature = file.is(decl, NodeKind::MethodSignature);
    let Some(body) = fields.body.filter(|_| !is_signature) else {
        if (is_signature || is_ambient(file, decl)) && fields.ty.is_none() {
            cx.report(decl, FaultId::LimitedReturnTypeInference);
        }
        return false;
    };
    let is_function_expression = file.is(decl, NodeKind::FunctionExpression);
    let mut limited = returns_call_with_omitted_return_type(cx, body);
    let mut written = None;
    if let Some(sig) = declared_signature(cx, decl) {
        let o = cx.oracle();
        match sig.return_type {
            Some(ret) if !is_unsupported(o, ret) => {
                if limited {
                    written = Some(o.type_to_string(ret));
                }
            }
            _ => limited = true,
        }
    }
    if limited && !is_function_expression {
        match &written {
            Some(text) => cx.report_with_fix(decl, FaultId::LimitedReturnTypeInference, |fixer, site| {
                fixer.fix_missing_return_type(site, text)
            }),
            None => cx.report(decl, FaultId::LimitedReturnTypeInference),
        }
    }
    limited && written.is_none()
}

/// `declare`d, inside a `declare` block, or in a declaration file.
fn is_ambient(file: &SourceFile, node: NodeId) -> bool {
    file.is_declaration_file
        || file.has_flags(node, NodeFlags::DECLARE)
        || file.ancestors(node).any(|a| file.has_flags(a, NodeFlags::DECLARE))
}

/// Signature the checker derived from a function-like declaration.
fn declared_signature<'o>(cx: &Linter<'o>, decl: NodeId) -> Option<&'o SignatureInfo> {
    let o = cx.oracle();
    let at = cx.at(decl);
    let sigs = &o.ty(cx.type_at(decl)?)?.call_signatures;
    let sig = sigs
        .iter()
        .copied()
        .find(|s| o.signature(*s).is_some_and(|info| info.declaration == Some(at)))
        .or_else(|| sigs.first().copied())?;
    o.signature(sig)
}

/// A `return` of the body, outside nested functions, calls a function
/// whose declaration omits its return type. An expression body is checked
/// directly.
fn returns_call_with_omitted_return_type(cx: &Linter<'_>, body: NodeId) -> bool {
    let file = cx.file();
    if !file.is(body, NodeKind::Block) {
        return is_call_to_function_with_omitted_return_type(cx, file.skip_parens(body));
    }
    any_descendant(
        file,
        body,
        |n| {
            file.is(n, NodeKind::ReturnStatement)
                && file
                    .fields(n)
                    .expression
                    .is_some_and(|e| is_call_to_function_with_omitted_return_type(cx, file.skip_parens(e)))
        },
        |n| {
            n != body
                && matches!(
                    file.kind(n),
                    NodeKind::FunctionDeclaration
                        | NodeKind::FunctionExpression
                        | NodeKind::MethodDeclaration
                        | NodeKind::GetAccessor
                        | NodeKind::SetAccessor
                        | NodeKind::ArrowFunction
                )
        },
    )
}

fn is_call_to_function_with_omitted_return_type(cx: &Linter<'_>, expr: NodeId) -> bool {
    if !cx.file().is(expr, NodeKind::CallExpression) {
        return false;
    }
    let o = cx.oracle();
    let Some(sig) = o.resolved_signature(cx.at(expr)).and_then(|s| o.signature(s)) else {
        return false;
    };
    match sig.declaration.and_then(|d| o.file_of(d).map(|f| (f, d.node))) {
        Some((file, decl)) => file.fields(decl).ty.is_none(),
        None => true,
    }
}
