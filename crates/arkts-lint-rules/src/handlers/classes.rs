//! Classes and their members.

use super::functions::{check_missing_return_type, report_this_in_scope};
use crate::analysis::captures::scan_captured_vars;
use crate::analysis::duplicates::{check_class_member_names, count_declarations_with_duplicate_name};
use crate::analysis::sdk::{check_duplicate_global, check_heritage_overrides};
use crate::linter::Linter;
use crate::semantics::{
    decorators_in_sendable_class, has_sendable_decorator, is_class, is_sendable_class_or_interface,
    is_sendable_type_node, non_sendable_decorators, reduce_reference,
};
use arkts_lint_core::{FaultId, NodeFlags, NodeId, NodeKind, SymbolFlags};

pub(crate) fn class_declaration(cx: &mut Linter<'_>, node: NodeId) {
    let file = cx.file();
    if let Some(name) = file.fields(node).name {
        count_declarations_with_duplicate_name(cx, name, node, None);
        check_duplicate_global(cx, name);
    }
    check_class_member_names(cx, node);
    let sendable = has_sendable_decorator(file, node);
    if sendable {
        for decorator in non_sendable_decorators(file, node) {
            cx.report(decorator, FaultId::SendableClassDecorator);
        }
        check_type_parameter_defaults(cx, node);
    }
    check_heritage(cx, node, sendable);
    if sendable {
        for &member in &file.fields(node).elements {
            scan_captured_vars(cx, member, node, FaultId::SendableCapturedVars);
        }
    }
    check_static_blocks(cx, node);
    check_heritage_overrides(cx, node);
}

/// Defaults of a sendable class's type parameters must be sendable.
fn check_type_parameter_defaults(cx: &mut Linter<'_>, class: NodeId) {
    let file = cx.file();
    for &param in &file.fields(class).type_parameters {
        let Some(default) = file.fields(param).initializer else {
            continue;
        };
        if !is_sendable_type_node(cx.oracle(), cx.at(default), false) {
            cx.report(default, FaultId::SendableGenericTypes);
        }
    }
}

fn check_heritage(cx: &mut Linter<'_>, class: NodeId, sendable: bool) {
    let file = cx.file();
    let o = cx.oracle();
    for &clause in &file.fields(class).heritage_clauses {
        let implements = file.has_flags(clause, NodeFlags::IMPLEMENTS);
        for &base in &file.fields(clause).elements {
            let Some(t) = cx
                .type_at(base)
                .or_else(|| file.fields(base).expression.and_then(|e| cx.type_at(e)))
            else {
                continue;
            };
            let t = reduce_reference(o, t);
            let base_sendable = is_sendable_class_or_interface(o, t);
            if implements && is_class(o, t) {
                cx.report(base, FaultId::ImplementsClass);
            }
            if !sendable {
                if base_sendable {
                    cx.report(base, FaultId::SendableClassInheritance);
                }
                continue;
            }
            if !implements && (!base_sendable || !extends_a_class(cx, base)) {
                cx.report(base, FaultId::SendableClassInheritance);
            }
        }
    }
}

/// The `extends` expression names a class, directly or through an alias.
fn extends_a_class(cx: &Linter<'_>, base: NodeId) -> bool {
    let o = cx.oracle();
    let Some(sym) = cx
        .file()
        .fields(base)
        .expression
        .and_then(|e| cx.symbol_at(e))
    else {
        return true;
    };
    let flags = o.symbol_flags(sym);
    if flags.contains(SymbolFlags::CLASS) {
        return true;
    }
    flags.contains(SymbolFlags::ALIAS)
        && o.symbol_flags(o.resolve_alias(sym)).contains(SymbolFlags::CLASS)
}

fn check_static_blocks(cx: &mut Linter<'_>, class: NodeId) {
    let file = cx.file();
    let blocks = file
        .fields(class)
        .elements
        .iter()
        .copied()
        .filter(|m| file.is(*m, NodeKind::ClassStaticBlockDeclaration));
    for extra in blocks.skip(1) {
        cx.report(extra, FaultId::MultipleStaticBlocks);
    }
}

pub(crate) fn method_declaration(cx: &mut Linter<'_>, node: NodeId) {
    let file = cx.file();
    for decorator in decorators_in_sendable_class(file, node) {
        cx.report(decorator, FaultId::SendableClassDecorator);
    }
    let fields = file.fields(node);
    if file.has_flags(node, NodeFlags::STATIC) {
        if let Some(body) = fields.body {
            report_this_in_scope(cx, body);
        }
    }
    if fields.ty.is_none() {
        check_missing_return_type(cx, node);
    }
    if file.has_flags(node, NodeFlags::ASTERISK) {
        cx.report(node, FaultId::GeneratorFunction);
    }
    if cx.arkts2() && file.has_flags(node, NodeFlags::QUESTION) {
        cx.report(node, FaultId::OptionalMethod);
    }
}

/// Fields declared through constructor parameters.
pub(crate) fn constructor(cx: &mut Linter<'_>, node: NodeId) {
    let file = cx.file();
    for &param in &file.fields(node).parameters {
        if file.flags(param).has_access_modifier() {
            cx.report_with_fix_at(param, node, FaultId::ParameterProperties, |fixer, site| {
                fixer.fix_ctor_parameter_properties(site)
            });
        }
    }
}

pub(crate) fn static_block(cx: &mut Linter<'_>, node: NodeId) {
    let file = cx.file();
    if file
        .parent(node)
        .is_some_and(|p| file.is(p, NodeKind::ClassDeclaration))
    {
        report_this_in_scope(cx, node);
    }
}

pub(crate) fn accessor(cx: &mut Linter<'_>, node: NodeId) {
    for decorator in decorators_in_sendable_class(cx.file(), node) {
        cx.report(decorator, FaultId::SendableClassDecorator);
    }
}

pub(crate) fn private_identifier(cx: &mut Linter<'_>, node: NodeId) {
    cx.report_with_fix(node, FaultId::PrivateIdentifier, |fixer, site| {
        fixer.fix_private_identifier(site)
    });
}

#[cfg(test)]
mod tests {
    use crate::test_support::run_default;
    use arkts_lint_core::{
        FaultId, NodeFlags, NodeKind, NodeRef, ProgramBuilder, SymbolFlags, TreeBuilder,
    };
    use pretty_assertions::assert_eq;

    #[test]
    fn test_implementing_a_class() {
        let mut b = TreeBuilder::new("a.ets");
        let base_name = b.ident("Base");
        let base = b.class_decl([], Some(base_name), [], []);
        let base_ref = b.ident("Base");
        let implemented = b.expr_with_type_args(base_ref, []);
        let clause = b.heritage(true, [implemented]);
        let name = b.ident("C");
        let class = b.class_decl([], Some(name), [clause], []);
        let file = b.finish([base, class]);
        let implemented_range = file.range(implemented);
        let mut p = ProgramBuilder::new();
        let f = p.add_file(file);
        let sym = p.symbol("Base", SymbolFlags::CLASS);
        p.declare(sym, NodeRef::new(f, base));
        let ty = p.class_type(sym, &[]);
        p.set_type(NodeRef::new(f, implemented), ty);
        let faults = run_default(&p.build());
        let ranges: Vec<_> = faults
            .faults
            .iter()
            .filter(|f| f.rule == FaultId::ImplementsClass)
            .map(|f| f.range)
            .collect();
        assert_eq!(ranges, vec![implemented_range]);
    }

    #[test]
    fn test_sendable_class_extending_plain_class() {
        let mut b = TreeBuilder::new("a.ets");
        let base_name = b.ident("Plain");
        let base = b.class_decl([], Some(base_name), [], []);
        let base_ref = b.ident("Plain");
        let extended = b.expr_with_type_args(base_ref, []);
        let clause = b.heritage(false, [extended]);
        let deco = b.decorator_named("Sendable");
        let name = b.ident("S");
        let class = b.class_decl([deco], Some(name), [clause], []);
        let file = b.finish([base, class]);
        let mut p = ProgramBuilder::new();
        let f = p.add_file(file);
        let sym = p.symbol("Plain", SymbolFlags::CLASS);
        p.declare(sym, NodeRef::new(f, base));
        p.bind(NodeRef::new(f, base_ref), sym);
        let ty = p.class_type(sym, &[]);
        p.set_type(NodeRef::new(f, extended), ty);
        let faults = run_default(&p.build());
        assert_eq!(faults.count(FaultId::SendableClassInheritance), 1);
    }

    #[test]
    fn test_parameter_properties_and_static_blocks() {
        let mut b = TreeBuilder::new("a.ets");
        let x = b.ident("x");
        let num = b.token(NodeKind::NumberKeyword);
        let param = b.param(x, Some(num), None);
        b.add_flags(param, NodeFlags::PRIVATE);
        let body = b.block([]);
        let ctor = b.constructor([param], Some(body));
        let first = b.push(NodeKind::ClassStaticBlockDeclaration, |_| {});
        let second = b.push(NodeKind::ClassStaticBlockDeclaration, |_| {});
        let name = b.ident("C");
        let class = b.class_decl([], Some(name), [], [ctor, first, second]);
        let file = b.finish([class]);
        let (param_range, second_range) = (file.range(param), file.range(second));
        let mut p = ProgramBuilder::new();
        p.add_file(file);
        let faults = run_default(&p.build());
        let properties: Vec<_> = faults
            .faults
            .iter()
            .filter(|f| f.rule == FaultId::ParameterProperties)
            .map(|f| f.range)
            .collect();
        assert_eq!(properties, vec![param_range]);
        let blocks: Vec<_> = faults
            .faults
            .iter()
            .filter(|f| f.rule == FaultId::MultipleStaticBlocks)
            .map(|f| f.range)
            .collect();
        assert_eq!(blocks, vec![second_range]);
    }

    #[test]
    fn test_this_in_static_method() {
        let mut b = TreeBuilder::new("a.ets");
        let this = b.token(NodeKind::ThisKeyword);
        let stmt = b.expr_stmt(this);
        let body = b.block([stmt]);
        let m = b.ident("m");
        let void = b.token(NodeKind::VoidKeyword);
        let method = b.method(m, [], Some(void), Some(body));
        b.add_flags(method, NodeFlags::STATIC);
        let n = b.ident("n");
        let this2 = b.token(NodeKind::ThisKeyword);
        let stmt2 = b.expr_stmt(this2);
        let body2 = b.block([stmt2]);
        let void2 = b.token(NodeKind::VoidKeyword);
        let instance = b.method(n, [], Some(void2), Some(body2));
        let name = b.ident("C");
        let class = b.class_decl([], Some(name), [], [method, instance]);
        let mut p = ProgramBuilder::new();
        p.add_file(b.finish([class]));
        assert_eq!(run_default(&p.build()).count(FaultId::FunctionContainsThis), 1);
    }
}
