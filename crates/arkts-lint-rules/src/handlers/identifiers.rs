//! Identifier references: `globalThis`, classes and namespaces used as
//! values, restricted standard-library APIs, SDK globals and UI names.

use crate::analysis::duplicates::symbol_has_duplicate_name;
use crate::analysis::sdk::check_global_use;
use crate::linter::Linter;
use crate::semantics::{first_declaration, is_any, is_library_type, is_std_library_symbol};
use arkts_lint_core::whitelist::builtins::{is_ui_interface, limited_std_api, StdApiRestriction};
use arkts_lint_core::{FaultId, NodeId, NodeKind, Operator, SourceFile, SymbolFlags, SymbolId};

pub(crate) fn identifier(cx: &mut Linter<'_>, node: NodeId) {
    let file = cx.file();
    if is_name_position(file, node) {
        return;
    }
    check_global_use(cx, node);
    queue_ui_interface(cx, node);
    let Some(sym) = cx.true_symbol_at(node) else {
        return;
    };
    let o = cx.oracle();
    if file.text(node) == "globalThis" && o.symbol_flags(sym).intersects(SymbolFlags::MODULE) {
        let rule = if cx.arkts2() {
            FaultId::GlobalThisError
        } else {
            FaultId::GlobalThis
        };
        cx.report(node, rule);
        return;
    }
    if cx.arkts2() {
        check_limited_std_api(cx, node, sym);
    }
    check_restricted_values(cx, node, sym);
}

/// Names of declarations, members and import/export bindings, and the
/// member name of a property access.
fn is_name_position(file: &SourceFile, node: NodeId) -> bool {
    let Some(parent) = file.parent(node) else {
        return false;
    };
    let fields = file.fields(parent);
    if fields.property_name == Some(node) {
        return true;
    }
    fields.name == Some(node)
        && !matches!(
            file.kind(parent),
            NodeKind::ShorthandPropertyAssignment | NodeKind::TypeReference
        )
}

/// A UI name used without being declared in the file; the finishing pass
/// reports those the file never imports.
fn queue_ui_interface(cx: &mut Linter<'_>, node: NodeId) {
    if !cx.enabled(FaultId::UIInterfaceImport) {
        return;
    }
    let file = cx.file();
    let name = file.text(node);
    if !is_ui_interface(name) {
        return;
    }
    let o = cx.oracle();
    let declared_here = cx
        .true_symbol_at(node)
        .and_then(|s| first_declaration(o, s))
        .is_some_and(|d| cx.is_local(d));
    if !declared_here {
        cx.state
            .interfaces_need_to_import
            .push((name.to_string(), node));
    }
}

fn check_limited_std_api(cx: &mut Linter<'_>, node: NodeId, sym: SymbolId) {
    let o = cx.oracle();
    if !is_std_library_symbol(o, sym) {
        return;
    }
    let parent = o
        .symbol(sym)
        .and_then(|info| info.parent)
        .map(|p| o.symbol_name(p));
    match limited_std_api(parent, o.symbol_name(sym)) {
        Some(StdApiRestriction::Limited) => cx.report(node, FaultId::LimitedStdLibApi),
        Some(StdApiRestriction::Symbol) => cx.report(node, FaultId::SymbolType),
        None => {}
    }
}

/// Enums, namespaces and (without advanced class checks) classes may not be
/// used as values.
fn check_restricted_values(cx: &mut Linter<'_>, node: NodeId, sym: SymbolId) {
    let o = cx.oracle();
    let flags = o.symbol_flags(sym);
    let mut illegal = SymbolFlags::ENUM | SymbolFlags::VALUE_MODULE;
    if !cx.options().advanced_class_checks {
        illegal = illegal | SymbolFlags::CLASS;
    }
    if !flags.intersects(illegal) {
        return;
    }
    if flags.contains(SymbolFlags::VALUE_MODULE)
        && symbol_has_duplicate_name(o, sym, NodeKind::ModuleDeclaration)
    {
        return;
    }
    if !is_value_context(cx.file(), node) {
        return;
    }
    if flags.contains(SymbolFlags::CLASS)
        && !cx.options().advanced_class_checks
        && is_allowed_class_value_context(cx, node)
    {
        return;
    }
    let rule = if flags.contains(SymbolFlags::VALUE_MODULE) {
        FaultId::NamespaceAsObject
    } else if cx.arkts2() {
        FaultId::ClassAsObjectError
    } else {
        FaultId::ClassAsObject
    };
    cx.report(node, rule);
}

/// The identifier is used as a value on its own rather than to reach a
/// member, construct, extend, decorate or name a type.
fn is_value_context(file: &SourceFile, node: NodeId) -> bool {
    let Some(parent) = file.parent(node) else {
        return false;
    };
    let fields = file.fields(parent);
    match file.kind(parent) {
        NodeKind::PropertyAccessExpression
        | NodeKind::ElementAccessExpression
        | NodeKind::CallExpression
        | NodeKind::NewExpression
        | NodeKind::ExpressionWithTypeArguments
        | NodeKind::Decorator => fields.expression != Some(node),
        NodeKind::BinaryExpression => {
            !(file.operator(parent) == Some(Operator::Instanceof) && fields.right == Some(node))
        }
        NodeKind::TypeQuery
        | NodeKind::QualifiedName
        | NodeKind::TypeReference
        | NodeKind::ExportSpecifier
        | NodeKind::ExportAssignment => false,
        _ => true,
    }
}

/// Class objects passed to dynamic or library code, directly or inside an
/// object literal or arrow body.
fn is_allowed_class_value_context(cx: &Linter<'_>, node: NodeId) -> bool {
    let file = cx.file();
    let mut ctx = node;
    while let Some(p) = file
        .parent(ctx)
        .filter(|p| matches!(file.kind(*p), NodeKind::PropertyAccessExpression | NodeKind::QualifiedName))
    {
        ctx = p;
    }
    if let Some(lit) = file
        .parent(ctx)
        .filter(|p| file.is(*p, NodeKind::PropertyAssignment))
        .and_then(|p| file.parent(p))
        .filter(|l| file.is(*l, NodeKind::ObjectLiteralExpression))
    {
        ctx = lit;
    }
    if let Some(arrow) = file
        .parent(ctx)
        .filter(|p| file.is(*p, NodeKind::ArrowFunction) && file.fields(*p).body == Some(ctx))
    {
        ctx = arrow;
    }
    let Some(call) = file
        .parent(ctx)
        .filter(|p| matches!(file.kind(*p), NodeKind::CallExpression | NodeKind::NewExpression))
    else {
        return false;
    };
    let Some(callee) = file.fields(call).expression.filter(|c| *c != ctx) else {
        return false;
    };
    let o = cx.oracle();
    cx.type_at(callee)
        .is_some_and(|t| is_any(o, t) || is_library_type(o, t))
}
