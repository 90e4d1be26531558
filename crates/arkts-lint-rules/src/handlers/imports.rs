//! Import declarations and the bindings they introduce.

use super::modules::in_shared_module;
use crate::analysis::duplicates::count_declarations_with_duplicate_name;
use crate::analysis::sdk::record_import;
use crate::linter::Linter;
use crate::semantics::{first_declaration, module_dialect, ModuleDialect};
use arkts_lint_core::{FaultId, NodeId, NodeKind, SourceFile};

pub(crate) fn import_declaration(cx: &mut Linter<'_>, node: NodeId) {
    let file = cx.file();
    if follows_statement(file, node) {
        cx.report(node, FaultId::ImportAfterStatement);
    }
    let fields = file.fields(node);
    let string_specifier = fields
        .module_specifier
        .is_some_and(|s| file.is(s, NodeKind::StringLiteral));
    if string_specifier {
        if let Some(attributes) = fields.attributes {
            cx.report(attributes, FaultId::ImportAssertion);
        }
    }
    if fields.import_clause.is_none() && in_shared_module(cx) {
        cx.report(node, FaultId::SharedNoSideEffectImport);
    }
    check_interop_import(cx, node);
}

/// A statement other than an import or a leading directive comes first.
fn follows_statement(file: &SourceFile, import: NodeId) -> bool {
    let mut in_prologue = true;
    for &stmt in file.statements() {
        if stmt == import {
            return false;
        }
        if file.is(stmt, NodeKind::ImportDeclaration) {
            in_prologue = false;
            continue;
        }
        if in_prologue && is_directive(file, stmt) {
            continue;
        }
        return true;
    }
    false
}

fn is_directive(file: &SourceFile, stmt: NodeId) -> bool {
    file.is(stmt, NodeKind::ExpressionStatement)
        && file
            .fields(stmt)
            .expression
            .is_some_and(|e| file.is(e, NodeKind::StringLiteral))
}

/// Names an import clause binds: the default name, the namespace name and
/// every named specifier.
fn bound_names(file: &SourceFile, clause: NodeId) -> Vec<NodeId> {
    let fields = file.fields(clause);
    let mut names: Vec<NodeId> = fields.name.into_iter().collect();
    if let Some(bindings) = fields.bindings {
        match file.kind(bindings) {
            NodeKind::NamespaceImport => names.extend(file.fields(bindings).name),
            NodeKind::NamedImports => names.extend(
                file.fields(bindings)
                    .elements
                    .iter()
                    .filter_map(|s| file.fields(*s).name),
            ),
            _ => {}
        }
    }
    names
}

/// A `'use static'` file importing from a dynamic-dialect module.
fn check_interop_import(cx: &mut Linter<'_>, node: NodeId) {
    if !cx.state.use_static {
        return;
    }
    let file = cx.file();
    let Some(clause) = file.fields(node).import_clause else {
        return;
    };
    let o = cx.oracle();
    let dialect = bound_names(file, clause).into_iter().find_map(|name| {
        let sym = cx.symbol_at(name)?;
        let decl = first_declaration(o, o.resolve_alias(sym))?;
        let source = o.file_of(decl)?;
        match module_dialect(source) {
            ModuleDialect::Static => None,
            dialect => Some(dialect),
        }
    });
    let rule = match dialect {
        Some(ModuleDialect::Js) => FaultId::InteropImportJs,
        Some(ModuleDialect::Ts) => FaultId::InteropImportTs,
        Some(ModuleDialect::LegacyEts) => FaultId::InteropImportLegacyEts,
        Some(ModuleDialect::Static) | None => return,
    };
    cx.report(node, rule);
}

pub(crate) fn import_clause(cx: &mut Linter<'_>, node: NodeId) {
    let file = cx.file();
    let Some(name) = file.fields(node).name else {
        return;
    };
    count_declarations_with_duplicate_name(cx, name, node, None);
    cx.state
        .interfaces_already_imported
        .insert(file.text(name).to_string());
}

pub(crate) fn import_specifier(cx: &mut Linter<'_>, node: NodeId) {
    import_binding(cx, node);
}

pub(crate) fn namespace_import(cx: &mut Linter<'_>, node: NodeId) {
    import_binding(cx, node);
}

fn import_binding(cx: &mut Linter<'_>, node: NodeId) {
    let file = cx.file();
    let Some(name) = file.fields(node).name else {
        return;
    };
    count_declarations_with_duplicate_name(cx, name, node, None);
    record_import(cx, node);
    cx.state
        .interfaces_already_imported
        .insert(file.text(name).to_string());
}

pub(crate) fn import_type(cx: &mut Linter<'_>, node: NodeId) {
    cx.report(node, FaultId::ImportType);
}
