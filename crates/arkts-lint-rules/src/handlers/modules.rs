//! Namespaces, type aliases and everything a module exports.

use super::sendable::is_sendable_decorator_valid;
use crate::analysis::duplicates::count_declarations_with_duplicate_name;
use crate::linter::Linter;
use crate::semantics::{
    first_declaration, has_sendable_decorator, is_shareable_entity, is_shareable_type,
    is_shared_module, module_dialect, non_sendable_decorators, ModuleDialect,
};
use arkts_lint_core::{FaultId, NodeFlags, NodeId, NodeKind};

/// The file under check starts with `'use shared'`, cached per path for
/// the whole run.
pub(crate) fn in_shared_module(cx: &mut Linter<'_>) -> bool {
    let path = cx.file().normalized_path();
    if let Some(shared) = cx.cache().shared_module(&path) {
        return shared;
    }
    let shared = is_shared_module(cx.file());
    cx.cache().set_shared_module(path, shared);
    shared
}

/// Top-level declarations carrying `export` in a shared module.
pub(crate) fn source_file(cx: &mut Linter<'_>, _root: NodeId) {
    let file = cx.file();
    let exported: Vec<NodeId> = file
        .statements()
        .iter()
        .copied()
        .filter(|s| file.has_flags(*s, NodeFlags::EXPORT))
        .collect();
    if exported.is_empty() || !in_shared_module(cx) {
        return;
    }
    let o = cx.oracle();
    for stmt in exported {
        match file.kind(stmt) {
            NodeKind::EnumDeclaration
            | NodeKind::InterfaceDeclaration
            | NodeKind::FunctionDeclaration
            | NodeKind::ClassDeclaration => {
                if !cx.type_at(stmt).is_some_and(|t| is_shareable_type(o, t)) {
                    let at = file.fields(stmt).name.unwrap_or(stmt);
                    cx.report(at, FaultId::SharedModuleExports);
                }
            }
            NodeKind::VariableStatement => {
                let Some(list) = file.fields(stmt).declaration else {
                    continue;
                };
                for &decl in &file.fields(list).elements {
                    let Some(name) = file.fields(decl).name else {
                        continue;
                    };
                    if !is_shareable_entity(o, cx.at(name)) {
                        cx.report(name, FaultId::SharedModuleExports);
                    }
                }
            }
            NodeKind::TypeAliasDeclaration => {
                if !is_shareable_entity(o, cx.at(stmt)) {
                    cx.report(stmt, FaultId::SharedModuleExportsWarning);
                }
            }
            _ => cx.report(stmt, FaultId::SharedModuleExports),
        }
    }
}

pub(crate) fn module_declaration(cx: &mut Linter<'_>, node: NodeId) {
    let file = cx.file();
    let fields = file.fields(node);
    if let Some(name) = fields.name {
        count_declarations_with_duplicate_name(cx, name, node, None);
    }
    let block = fields
        .body
        .filter(|b| file.is(*b, NodeKind::ModuleBlock));
    if let Some(block) = block {
        for &stmt in &file.fields(block).elements {
            if !is_namespace_member(file.kind(stmt)) {
                cx.report(stmt, FaultId::NonDeclarationInNamespace);
            }
        }
        cx.state.pending_namespaces.push(node);
    }
    if file.has_flags(node, NodeFlags::DECLARE) && !file.has_flags(node, NodeFlags::NAMESPACE) {
        cx.report(node, FaultId::ShorthandAmbientModuleDecl);
    }
    let string_name = fields
        .name
        .filter(|n| file.is(*n, NodeKind::StringLiteral));
    if string_name.is_some_and(|n| file.text(n).contains('*')) {
        cx.report(node, FaultId::WildcardsInModuleName);
    }
}

fn is_namespace_member(kind: NodeKind) -> bool {
    matches!(
        kind,
        NodeKind::VariableStatement
            | NodeKind::FunctionDeclaration
            | NodeKind::ClassDeclaration
            | NodeKind::InterfaceDeclaration
            | NodeKind::TypeAliasDeclaration
            | NodeKind::EnumDeclaration
            | NodeKind::ExportDeclaration
            | NodeKind::ModuleDeclaration
    )
}

pub(crate) fn type_alias_declaration(cx: &mut Linter<'_>, node: NodeId) {
    let file = cx.file();
    if let Some(name) = file.fields(node).name {
        count_declarations_with_duplicate_name(cx, name, node, None);
    }
    if !has_sendable_decorator(file, node) || !is_sendable_decorator_valid(cx, node) {
        return;
    }
    for decorator in non_sendable_decorators(file, node) {
        cx.report(decorator, FaultId::SendableTypeAliasDecorator);
    }
    if let Some(ty) = file
        .fields(node)
        .ty
        .filter(|t| !file.is(*t, NodeKind::FunctionType))
    {
        cx.report(ty, FaultId::SendableTypeAliasDeclaration);
    }
}

/// `export = x` is an export assignment without the `default` flag.
pub(crate) fn export_assignment(cx: &mut Linter<'_>, node: NodeId) {
    let file = cx.file();
    if !file.has_flags(node, NodeFlags::DEFAULT) {
        cx.report(node, FaultId::ExportAssignment);
    }
    let Some(expr) = file.fields(node).expression else {
        return;
    };
    if in_shared_module(cx) && !is_shareable_entity(cx.oracle(), cx.at(expr)) {
        cx.report(expr, FaultId::SharedModuleExports);
    }
}

/// `export { .. }`, `export * as ns` and `export *`. The clause, when
/// present, is the declaration's `bindings`.
pub(crate) fn export_declaration(cx: &mut Linter<'_>, node: NodeId) {
    check_legacy_reexports(cx, node);
    let file = cx.file();
    let nested = file
        .parent(node)
        .is_some_and(|p| file.is(p, NodeKind::ModuleBlock));
    if nested || !in_shared_module(cx) {
        return;
    }
    let Some(clause) = file.fields(node).bindings else {
        cx.report(node, FaultId::SharedModuleNoWildcardExport);
        return;
    };
    let o = cx.oracle();
    if file.is(clause, NodeKind::NamespaceExport) {
        if let Some(name) = file.fields(clause).name {
            if !cx.type_at(name).is_some_and(|t| is_shareable_type(o, t)) {
                cx.report(name, FaultId::SharedModuleExports);
            }
        }
        return;
    }
    for &spec in &file.fields(clause).elements {
        let Some(name) = file.fields(spec).name else {
            continue;
        };
        if !is_shareable_entity(o, cx.at(name)) {
            cx.report(name, FaultId::SharedModuleExports);
        }
    }
}

/// A `'use static'` file re-exporting bindings declared in a dynamic-dialect
/// ArkTS file.
fn check_legacy_reexports(cx: &mut Linter<'_>, node: NodeId) {
    if !cx.state.use_static {
        return;
    }
    let file = cx.file();
    let Some(clause) = file
        .fields(node)
        .bindings
        .filter(|c| file.is(*c, NodeKind::NamedExports))
    else {
        return;
    };
    let o = cx.oracle();
    for &spec in &file.fields(clause).elements {
        let fields = file.fields(spec);
        let Some(local) = fields.property_name.or(fields.name) else {
            continue;
        };
        let legacy = cx
            .true_symbol_at(local)
            .and_then(|s| first_declaration(o, s))
            .and_then(|d| o.file_of(d))
            .is_some_and(|f| module_dialect(f) == ModuleDialect::LegacyEts);
        if legacy {
            cx.report(spec, FaultId::InteropArkTs1ObjectExport);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::{run_arkts2, run_default, run_with};
    use arkts_lint_core::{
        FaultId, LinterOptions, NodeFlags, NodeKind, NodeRef, ProgramBuilder, SymbolFlags,
        TreeBuilder,
    };
    use pretty_assertions::assert_eq;

    #[test]
    fn test_namespace_statements_and_wildcard_modules() {
        let mut b = TreeBuilder::new("a.d.ets");
        let callee = b.ident("init");
        let call = b.call(callee, []);
        let stray = b.expr_stmt(call);
        let ns_name = b.ident("NS");
        let ns = b.namespace(ns_name, [stray]);
        let module_name = b.string("*.css");
        let ambient = b.push(NodeKind::ModuleDeclaration, |n| {
            n.name(module_name);
        });
        b.add_flags(ambient, NodeFlags::DECLARE);
        let file = b.finish([ns, ambient]);
        let stray_range = file.range(stray);
        let mut p = ProgramBuilder::new();
        p.add_file(file);
        let faults = run_default(&p.build());
        let stray_faults: Vec<_> = faults
            .faults
            .iter()
            .filter(|f| f.rule == FaultId::NonDeclarationInNamespace)
            .map(|f| f.range)
            .collect();
        assert_eq!(stray_faults, vec![stray_range]);
        assert_eq!(faults.count(FaultId::ShorthandAmbientModuleDecl), 1);
        assert_eq!(faults.count(FaultId::WildcardsInModuleName), 1);
    }

    #[test]
    fn test_declared_module_keyword_is_ambient_but_namespace_is_not() {
        let mut b = TreeBuilder::new("a.d.ets");
        let module_name = b.ident("Foo");
        let module_body = b.push(NodeKind::ModuleBlock, |_| {});
        let module = b.push(NodeKind::ModuleDeclaration, |n| {
            n.name(module_name).body(module_body);
        });
        b.add_flags(module, NodeFlags::DECLARE);
        let ns_name = b.ident("Bar");
        let ns = b.namespace(ns_name, []);
        b.add_flags(ns, NodeFlags::DECLARE);
        let file = b.finish([module, ns]);
        let module_range = file.range(module);
        let mut p = ProgramBuilder::new();
        p.add_file(file);
        let faults = run_default(&p.build());
        let ambient: Vec<_> = faults
            .faults
            .iter()
            .filter(|f| f.rule == FaultId::ShorthandAmbientModuleDecl)
            .map(|f| f.range)
            .collect();
        assert_eq!(ambient, vec![module_range]);
    }

    #[test]
    fn test_export_equals_and_export_default() {
        let mut b = TreeBuilder::new("a.ets");
        let x = b.ident("x");
        let equals = b.push(NodeKind::ExportAssignment, |n| {
            n.expression(x);
        });
        let y = b.ident("y");
        let default = b.push(NodeKind::ExportAssignment, |n| {
            n.expression(y);
        });
        b.add_flags(default, NodeFlags::DEFAULT);
        let file = b.finish([equals, default]);
        let equals_range = file.range(equals);
        let mut p = ProgramBuilder::new();
        p.add_file(file);
        let faults = run_default(&p.build());
        let ranges: Vec<_> = faults
            .faults
            .iter()
            .filter(|f| f.rule == FaultId::ExportAssignment)
            .map(|f| f.range)
            .collect();
        assert_eq!(ranges, vec![equals_range]);
    }

    #[test]
    fn test_shared_module_exports() {
        let mut b = TreeBuilder::new("shared.ets");
        let pragma = b.string("use shared");
        let pragma_stmt = b.expr_stmt(pragma);
        let plain_name = b.ident("Plain");
        let plain = b.class_decl([], Some(plain_name), [], []);
        b.add_flags(plain, NodeFlags::EXPORT);
        let deco = b.decorator_named("Sendable");
        let sendable_name = b.ident("Shared");
        let sendable = b.class_decl([deco], Some(sendable_name), [], []);
        b.add_flags(sendable, NodeFlags::EXPORT);
        let wildcard_spec = b.string("./other");
        let wildcard = b.push(NodeKind::ExportDeclaration, |n| {
            n.module_specifier(wildcard_spec);
        });
        let file = b.finish([pragma_stmt, plain, sendable, wildcard]);
        let plain_range = file.range(plain_name);
        let mut p = ProgramBuilder::new();
        let f = p.add_file(file);
        let plain_sym = p.symbol("Plain", SymbolFlags::CLASS);
        p.declare(plain_sym, NodeRef::new(f, plain));
        let plain_ty = p.class_type(plain_sym, &[]);
        p.set_type(NodeRef::new(f, plain), plain_ty);
        let shared_sym = p.symbol("Shared", SymbolFlags::CLASS);
        p.declare(shared_sym, NodeRef::new(f, sendable));
        let shared_ty = p.class_type(shared_sym, &[]);
        p.set_type(NodeRef::new(f, sendable), shared_ty);
        let faults = run_default(&p.build());
        let exports: Vec<_> = faults
            .faults
            .iter()
            .filter(|f| f.rule == FaultId::SharedModuleExports)
            .map(|f| f.range)
            .collect();
        assert_eq!(exports, vec![plain_range]);
        assert_eq!(faults.count(FaultId::SharedModuleNoWildcardExport), 1);
    }

    #[test]
    fn test_sendable_type_alias_must_be_a_function_type() {
        let mut b = TreeBuilder::new("a.ets");
        let deco = b.decorator_named("Sendable");
        let name = b.ident("Num");
        let num = b.token(NodeKind::NumberKeyword);
        let alias = b.push(NodeKind::TypeAliasDeclaration, |n| {
            n.decorators([deco]).name(name).ty(num);
        });
        let file = b.finish([alias]);
        let ty_range = file.range(num);
        let mut p = ProgramBuilder::new();
        p.add_file(file);
        let options = LinterOptions {
            compatible_sdk_version: 12,
            compatible_sdk_version_stage: "beta3".to_string(),
            ..LinterOptions::default()
        };
        let faults = run_with(&p.build(), options);
        let ranges: Vec<_> = faults
            .faults
            .iter()
            .filter(|f| f.rule == FaultId::SendableTypeAliasDeclaration)
            .map(|f| f.range)
            .collect();
        assert_eq!(ranges, vec![ty_range]);
    }

    #[test]
    fn test_static_file_reexporting_legacy_binding() {
        let mut legacy = TreeBuilder::new("legacy.ets");
        let name = legacy.ident("Old");
        let old = legacy.class_decl([], Some(name), [], []);
        let legacy_file = legacy.finish([old]);

        let mut b = TreeBuilder::new("main.ets");
        let pragma = b.string("use static");
        let pragma_stmt = b.expr_stmt(pragma);
        let exported = b.ident("Old");
        let spec = b.push(NodeKind::ExportSpecifier, |n| {
            n.name(exported);
        });
        let named = b.push(NodeKind::NamedExports, |n| {
            n.elements([spec]);
        });
        let module = b.string("./legacy");
        let export = b.push(NodeKind::ExportDeclaration, |n| {
            n.bindings(named).module_specifier(module);
        });
        let file = b.finish([pragma_stmt, export]);
        let mut p = ProgramBuilder::new();
        let f = p.add_file(file);
        let l = p.add_file(legacy_file);
        let sym = p.symbol("Old", SymbolFlags::CLASS);
        p.declare(sym, NodeRef::new(l, old));
        p.bind(NodeRef::new(f, exported), sym);
        let faults = run_arkts2(&p.build());
        assert_eq!(faults.count(FaultId::InteropArkTs1ObjectExport), 1);
    }
}
