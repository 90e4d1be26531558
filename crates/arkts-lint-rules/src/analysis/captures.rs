//! Variables captured by sendable classes and functions.
//!
//! A sendable entity is copied between concurrent instances, so its body
//! may only refer to names that travel with it: its own locals, const
//! enums, top-level sendable declarations and names from declaration
//! files. Any other declaration outside the entity's span is reported,
//! whether it lives in this file or in an imported one. Namespace import
//! bindings are always reported.

use crate::linter::Linter;
use crate::semantics::{
    first_declaration, function_overloads_have_sendable, has_sendable_decorator, resolve,
};
use arkts_lint_core::walker::walk;
use arkts_lint_core::{
    FaultId, NodeFlags, NodeId, NodeKind, NodeRef, SourceFile, SymbolFlags, SymbolId, TextRange,
};
use rustc_hash::FxHashSet;

/// Scans `start` for identifiers declared outside `scope` and reports
/// `rule` at each.
///
/// Type references and the decorators of `start` are not descended into.
pub(crate) fn scan_captured_vars(cx: &mut Linter<'_>, start: NodeId, scope: NodeId, rule: FaultId) {
    if !cx.enabled(rule)
        && !cx.enabled(FaultId::SendableCapturedVars)
        && !cx.enabled(FaultId::SendableClosureExport)
    {
        return;
    }
    let file = cx.file();
    let mut identifiers = Vec::new();
    walk(
        file,
        start,
        |n| {
            if file.is(n, NodeKind::Identifier) {
                identifiers.push(n);
            }
        },
        |n| {
            file.is(n, NodeKind::TypeReference)
                || (file.is(n, NodeKind::Decorator) && file.parent(n) == Some(start))
        },
    );
    let scope_range = file.range(scope);
    for ident in identifiers {
        if is_namespace_import_binding(cx, ident) {
            cx.report(ident, FaultId::SendableCapturedVars);
            continue;
        }
        if is_property_name(file, ident) {
            continue;
        }
        if file.is(start, NodeKind::FunctionDeclaration) && file.fields(start).name == Some(ident) {
            continue;
        }
        check_local_decl(cx, ident, scope_range, rule);
    }
}

/// `x` bound by `import * as x`.
fn is_namespace_import_binding(cx: &Linter<'_>, ident: NodeId) -> bool {
    let o = cx.oracle();
    cx.symbol_at(ident)
        .and_then(|s| first_declaration(o, s))
        .and_then(|d| resolve(o, d))
        .is_some_and(|(f, n)| f.is(n, NodeKind::NamespaceImport))
}

/// The `name` of `obj.name`.
fn is_property_name(file: &SourceFile, ident: NodeId) -> bool {
    file.parent(ident).is_some_and(|p| {
        matches!(
            file.kind(p),
            NodeKind::PropertyAccessExpression | NodeKind::QualifiedName
        ) && file.fields(p).name == Some(ident)
    })
}

fn is_const_enum(cx: &Linter<'_>, sym: SymbolId) -> bool {
    let o = cx.oracle();
    let flags = o.symbol_flags(sym);
    if flags.contains(SymbolFlags::CONST_ENUM) {
        return true;
    }
    flags.contains(SymbolFlags::ENUM_MEMBER)
        && o.symbol(sym)
            .and_then(|info| info.parent)
            .is_some_and(|p| o.symbol_flags(p).contains(SymbolFlags::CONST_ENUM))
}

fn check_local_decl(cx: &mut Linter<'_>, ident: NodeId, scope: TextRange, rule: FaultId) {
    let o = cx.oracle();
    let Some(sym) = cx.true_symbol_at(ident) else {
        return;
    };
    if is_const_enum(cx, sym) {
        return;
    }
    let Some(decl) = first_declaration(o, sym) else {
        return;
    };
    let Some((decl_file, decl_node)) = resolve(o, decl) else {
        return;
    };
    if cx.is_local(decl) {
        if scope.contains(decl_file.range(decl_node).start) {
            return;
        }
    } else if decl_file.is_declaration_file || decl_file.is_default_library {
        return;
    }
    if is_file_export_sendable_decl(cx, decl) {
        cx.report(ident, FaultId::SendableClosureExport);
    }
    if is_top_sendable_closure(cx, decl) {
        return;
    }
    if matches!(
        decl_file.kind(decl_node),
        NodeKind::VariableDeclaration
            | NodeKind::FunctionDeclaration
            | NodeKind::ClassDeclaration
            | NodeKind::InterfaceDeclaration
            | NodeKind::EnumDeclaration
            | NodeKind::ModuleDeclaration
            | NodeKind::Parameter
    ) {
        cx.report(ident, rule);
    }
}

/// A top-level class or function declared `@Sendable`.
fn is_top_sendable_closure(cx: &Linter<'_>, decl: NodeRef) -> bool {
    let o = cx.oracle();
    let Some((file, node)) = resolve(o, decl) else {
        return false;
    };
    if file.parent(node) != Some(file.root) {
        return false;
    }
    match file.kind(node) {
        NodeKind::ClassDeclaration => has_sendable_decorator(file, node),
        NodeKind::FunctionDeclaration => o
            .symbol_at(decl)
            .is_some_and(|s| function_overloads_have_sendable(o, s)),
        _ => false,
    }
}

/// A top-level class or function of this file that the file exports.
fn is_file_export_sendable_decl(cx: &mut Linter<'_>, decl: NodeRef) -> bool {
    if !cx.is_local(decl) {
        return false;
    }
    let file = cx.file();
    if file.parent(decl.node) != Some(file.root)
        || !matches!(
            file.kind(decl.node),
            NodeKind::ClassDeclaration | NodeKind::FunctionDeclaration
        )
    {
        return false;
    }
    if cx.state.exported_decls.is_none() {
        let exported = collect_exported_decls(cx);
        cx.state.exported_decls = Some(exported);
    }
    cx.state
        .exported_decls
        .as_ref()
        .is_some_and(|set| set.contains(&decl.node))
}

/// Top-level classes and functions exported by modifier, by a local
/// `export { name }`, or by `export default name`.
fn collect_exported_decls(cx: &Linter<'_>) -> FxHashSet<NodeId> {
    let o = cx.oracle();
    let file = cx.file();
    let local_decls = |ident: NodeId| -> Vec<NodeId> {
        cx.true_symbol_at(ident)
            .map(|s| o.declarations_of(s))
            .unwrap_or_default()
            .iter()
            .filter(|d| cx.is_local(**d))
            .map(|d| d.node)
            .collect()
    };
    let mut exported = FxHashSet::default();
    for &stmt in file.statements() {
        match file.kind(stmt) {
            NodeKind::ClassDeclaration | NodeKind::FunctionDeclaration
                if file.has_flags(stmt, NodeFlags::EXPORT) =>
            {
                if let Some(name) = file.fields(stmt).name {
                    exported.extend(local_decls(name));
                } else {
                    exported.insert(stmt);
                }
            }
            NodeKind::ExportDeclaration if file.fields(stmt).module_specifier.is_none() => {
                let Some(named) = file.fields(stmt).bindings else {
                    continue;
                };
                for &spec in &file.fields(named).elements {
                    if let Some(local) = file.fields(spec).property_name.or(file.fields(spec).name) {
                        exported.extend(local_decls(local));
                    }
                }
            }
            NodeKind::ExportAssignment => {
                if let Some(expr) = file.fields(stmt).expression {
                    let expr = file.skip_parens(expr);
                    if file.is(expr, NodeKind::Identifier) {
                        exported.extend(local_decls(expr));
                    }
                }
            }
            _ => {}
        }
    }
    exported
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{run_default, run_with};
    use arkts_lint_core::{LinterOptions, ProgramBuilder, TreeBuilder};
    use pretty_assertions::assert_eq;

    /// `let outer = 1; @Sendable class S { m(): void { f(outer); f(Other); } }`
    /// plus `class Other` (optionally `@Sendable`).
    fn sendable_class_capturing(other_sendable: bool) -> (arkts_lint_core::Program, NodeId, NodeId) {
        let mut b = TreeBuilder::new("a.ets");
        let one = b.number("1");
        let (outer_stmt, outer_decl) = b.variable(NodeFlags::LET, "outer", None, Some(one));

        let other_decos: Vec<NodeId> = if other_sendable {
            vec![b.decorator_named("Sendable")]
        } else {
            Vec::new()
        };
        let other_name = b.ident("Other");
        let other = b.class_decl(other_decos, Some(other_name), [], []);

        let outer_use = b.ident("outer");
        let f1 = b.ident("f");
        let call1 = b.call(f1, [outer_use]);
        let other_use = b.ident("Other");
        let f2 = b.ident("f");
        let call2 = b.call(f2, [other_use]);
        let s1 = b.expr_stmt(call1);
        let s2 = b.expr_stmt(call2);
        let body = b.block([s1, s2]);
        let m_name = b.ident("m");
        let void = b.token(NodeKind::VoidKeyword);
        let method = b.method(m_name, [], Some(void), Some(body));
        let deco = b.decorator_named("Sendable");
        let s_name = b.ident("S");
        let class = b.class_decl([deco], Some(s_name), [], [method]);

        let mut p = ProgramBuilder::new();
        let f = p.add_file(b.finish([outer_stmt, other, class]));
        let outer = p.symbol("outer", SymbolFlags::BLOCK_SCOPED_VARIABLE);
        p.declare(outer, NodeRef::new(f, outer_decl));
        p.bind(NodeRef::new(f, outer_use), outer);
        let other_sym = p.symbol("Other", SymbolFlags::CLASS);
        p.declare(other_sym, NodeRef::new(f, other));
        p.bind(NodeRef::new(f, other_use), other_sym);
        let s_sym = p.symbol("S", SymbolFlags::CLASS);
        p.declare(s_sym, NodeRef::new(f, class));
        (p.build(), outer_use, other_use)
    }

    fn captured(program: &arkts_lint_core::Program) -> Vec<TextRange> {
        run_default(program)
            .faults
            .iter()
            .filter(|f| f.rule == FaultId::SendableCapturedVars)
            .map(|f| f.range)
            .collect()
    }

    #[test]
    fn test_outer_variable_and_plain_class_are_captured() {
        let (program, outer_use, other_use) = sendable_class_capturing(false);
        let file = program.files.first().expect("file");
        assert_eq!(
            captured(&program),
            vec![file.range(outer_use), file.range(other_use)]
        );
    }

    #[test]
    fn test_top_level_sendable_class_may_be_referenced() {
        let (program, outer_use, _) = sendable_class_capturing(true);
        let file = program.files.first().expect("file");
        assert_eq!(captured(&program), vec![file.range(outer_use)]);
    }

    /// `@Sendable class S { m(): void { f(<arg>); } }`
    fn sendable_class_passing(b: &mut TreeBuilder, arg: NodeId) -> NodeId {
        let f = b.ident("f");
        let call = b.call(f, [arg]);
        let stmt = b.expr_stmt(call);
        let body = b.block([stmt]);
        let m_name = b.ident("m");
        let void = b.token(NodeKind::VoidKeyword);
        let method = b.method(m_name, [], Some(void), Some(body));
        let deco = b.decorator_named("Sendable");
        let s_name = b.ident("S");
        b.class_decl([deco], Some(s_name), [], [method])
    }

    #[test]
    fn test_exported_sendable_class_is_a_closure_export() {
        for export_by_statement in [false, true] {
            let mut b = TreeBuilder::new("a.ets");
            let deco = b.decorator_named("Sendable");
            let other_name = b.ident("Other");
            let other = b.class_decl([deco], Some(other_name), [], []);
            let mut stmts = vec![other];
            let mut export_names = Vec::new();
            if export_by_statement {
                let local = b.ident("Other");
                export_names.push(local);
                let spec = b.push(NodeKind::ExportSpecifier, |n| {
                    n.name(local);
                });
                let named = b.push(NodeKind::NamedExports, |n| {
                    n.elements([spec]);
                });
                stmts.push(b.push(NodeKind::ExportDeclaration, |n| {
                    n.bindings(named);
                }));
            } else {
                b.add_flags(other, NodeFlags::EXPORT);
            }
            let other_use = b.ident("Other");
            stmts.push(sendable_class_passing(&mut b, other_use));
            let mut p = ProgramBuilder::new();
            let f = p.add_file(b.finish(stmts));
            let other_sym = p.symbol("Other", SymbolFlags::CLASS);
            p.declare(other_sym, NodeRef::new(f, other));
            for id in export_names.into_iter().chain([other_use]) {
                p.bind(NodeRef::new(f, id), other_sym);
            }
            let program = p.build();
            let faults = run_default(&program);
            let file = program.files.first().expect("file");
            let exports: Vec<_> = faults
                .faults
                .iter()
                .filter(|f| f.rule == FaultId::SendableClosureExport)
                .map(|f| f.range)
                .collect();
            assert_eq!(exports, vec![file.range(other_use)]);
            assert!(captured(&program).is_empty());
        }
    }

    #[test]
    fn test_const_enum_is_not_captured() {
        for (flags, expected) in [(SymbolFlags::CONST_ENUM, 0), (SymbolFlags::REGULAR_ENUM, 1)] {
            let mut b = TreeBuilder::new("a.ets");
            let x_name = b.ident("X");
            let member = b.enum_member(x_name, None);
            let e_name = b.ident("E");
            let e = b.enum_decl(e_name, [member]);
            let e_use = b.ident("E");
            let access = b.prop_access(e_use, "X");
            let class = sendable_class_passing(&mut b, access);
            let mut p = ProgramBuilder::new();
            let f = p.add_file(b.finish([e, class]));
            let e_sym = p.symbol("E", flags);
            p.declare(e_sym, NodeRef::new(f, e));
            p.bind(NodeRef::new(f, e_use), e_sym);
            assert_eq!(captured(&p.build()).len(), expected, "{flags:?}");
        }
    }

    #[test]
    fn test_namespace_import_binding_is_always_captured() {
        let mut b = TreeBuilder::new("a.ets");
        let ns_name = b.ident("ns");
        let ns_import = b.push(NodeKind::NamespaceImport, |n| {
            n.name(ns_name);
        });
        let clause = b.push(NodeKind::ImportClause, |n| {
            n.bindings(ns_import);
        });
        let module = b.string("./model");
        let import = b.push(NodeKind::ImportDeclaration, |n| {
            n.import_clause(clause).module_specifier(module);
        });
        let ns_use = b.ident("ns");
        let class = sendable_class_passing(&mut b, ns_use);
        let mut p = ProgramBuilder::new();
        let f = p.add_file(b.finish([import, class]));
        let ns_sym = p.symbol("ns", SymbolFlags::ALIAS);
        p.declare(ns_sym, NodeRef::new(f, ns_import));
        p.bind(NodeRef::new(f, ns_use), ns_sym);
        let program = p.build();
        let file = program.files.first().expect("file");
        assert_eq!(captured(&program), vec![file.range(ns_use)]);
    }

    #[test]
    fn test_sendable_function_reports_its_own_rule() {
        let mut b = TreeBuilder::new("a.ets");
        let one = b.number("1");
        let (outer_stmt, outer_decl) = b.variable(NodeFlags::LET, "outer", None, Some(one));
        let outer_use = b.ident("outer");
        let f = b.ident("f");
        let call = b.call(f, [outer_use]);
        let stmt = b.expr_stmt(call);
        let body = b.block([stmt]);
        let deco = b.decorator_named("Sendable");
        let g_name = b.ident("g");
        let void = b.token(NodeKind::VoidKeyword);
        let g = b.function_decl([deco], Some(g_name), [], Some(void), Some(body));
        let mut p = ProgramBuilder::new();
        let file_id = p.add_file(b.finish([outer_stmt, g]));
        let outer = p.symbol("outer", SymbolFlags::BLOCK_SCOPED_VARIABLE);
        p.declare(outer, NodeRef::new(file_id, outer_decl));
        p.bind(NodeRef::new(file_id, outer_use), outer);
        let g_sym = p.symbol("g", SymbolFlags::FUNCTION);
        p.declare(g_sym, NodeRef::new(file_id, g));
        let program = p.build();

        let options = LinterOptions {
            compatible_sdk_version: 12,
            compatible_sdk_version_stage: "beta3".to_string(),
            ..LinterOptions::default()
        };
        let faults = run_with(&program, options);
        let file = program.files.first().expect("file");
        let imported: Vec<_> = faults
            .faults
            .iter()
            .filter(|f| f.rule == FaultId::SendableFunctionImportedVariables)
            .map(|f| f.range)
            .collect();
        assert_eq!(imported, vec![file.range(outer_use)]);
        assert_eq!(faults.count(FaultId::SendableCapturedVars), 0);
    }
}
