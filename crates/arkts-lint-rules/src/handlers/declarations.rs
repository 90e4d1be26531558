//! Parameters, variables, fields and property signatures.

use super::{
    check_definite_assignment, check_es_object_assignment, check_inferred_type, es_object_rule,
    is_binding_pattern, is_es_object_value, is_inside_block,
};
use crate::analysis::duplicates::count_declarations_with_duplicate_name;
use crate::analysis::sdk::check_duplicate_global;
use crate::analysis::structural::check_assignment_matching;
use crate::linter::Linter;
use crate::semantics::{
    decorators_in_sendable_class, has_sendable_decorator, is_array, is_es_object_type_node,
    is_or_derived_from, is_sendable_class_or_interface, is_sendable_type_node, is_tuple,
};
use arkts_lint_core::{FaultId, NodeFlags, NodeId, NodeKind, SourceFile};

pub(crate) fn parameter(cx: &mut Linter<'_>, node: NodeId) {
    for decorator in decorators_in_sendable_class(cx.file(), node) {
        cx.report(decorator, FaultId::SendableClassDecorator);
    }
    check_destructuring(cx, node);
    check_inferred_type(cx, node);
}

pub(crate) fn variable_declaration_list(cx: &mut Linter<'_>, node: NodeId) {
    if cx
        .file()
        .has_flags(node, NodeFlags::LET)
        || cx.file().has_flags(node, NodeFlags::CONST)
    {
        return;
    }
    cx.report_with_fix(node, FaultId::VarDeclaration, |fixer, site| {
        fixer.fix_var_declaration(site)
    });
}

pub(crate) fn variable_declaration(cx: &mut Linter<'_>, node: NodeId) {
    let file = cx.file();
    let in_statement = file
        .parent(node)
        .and_then(|list| file.parent(list))
        .is_some_and(|stmt| file.is(stmt, NodeKind::VariableStatement));
    if !cx.options().use_rt_logic || in_statement {
        check_destructuring(cx, node);
    }
    let fields = file.fields(node);
    if let Some(name) = fields.name {
        check_duplicate_binding_names(cx, name, NodeKind::VariableDeclaration);
        if file.is(name, NodeKind::Identifier) && is_module_level(file, node) {
            check_duplicate_global(cx, name);
        }
    }
    if let (Some(ty), Some(init)) = (fields.ty, fields.initializer) {
        if let Some(lhs) = cx.type_at(ty) {
            check_assignment_matching(cx, node, lhs, init, false);
        }
    }
    check_es_object_declaration(cx, node);
    check_inferred_type(cx, node);
    check_definite_assignment(cx, node);
}

fn is_module_level(file: &SourceFile, decl: NodeId) -> bool {
    file.parent(decl)
        .and_then(|list| file.parent(list))
        .filter(|stmt| file.is(*stmt, NodeKind::VariableStatement))
        .and_then(|stmt| file.parent(stmt))
        == Some(file.root)
}

/// Each name a declaration binds, recursing into binding patterns; the
/// elements of a pattern are checked as binding elements.
fn check_duplicate_binding_names(cx: &mut Linter<'_>, name: NodeId, kind: NodeKind) {
    let file = cx.file();
    if file.is(name, NodeKind::Identifier) {
        count_declarations_with_duplicate_name(cx, name, name, Some(kind));
        return;
    }
    if !is_binding_pattern(file, name) {
        return;
    }
    for &element in &file.fields(name).elements {
        if let Some(inner) = file.fields(element).name {
            check_duplicate_binding_names(cx, inner, NodeKind::BindingElement);
        }
    }
}

/// Destructuring declarations and parameters. Array patterns are accepted
/// under relaxed rules when they destructure an array or tuple without
/// nesting objects or spreading.
fn check_destructuring(cx: &mut Linter<'_>, decl: NodeId) {
    let file = cx.file();
    let Some(name) = file.fields(decl).name else {
        return;
    };
    let rule = if file.is(decl, NodeKind::Parameter) {
        FaultId::DestructuringParameter
    } else {
        FaultId::DestructuringDeclaration
    };
    match file.kind(name) {
        NodeKind::ObjectBindingPattern => cx.report(decl, rule),
        NodeKind::ArrayBindingPattern => {
            let o = cx.oracle();
            let source = file.fields(decl).initializer.unwrap_or(name);
            let array_like = cx.type_at(source).is_some_and(|t| {
                is_or_derived_from(o, t, &|b| is_array(o, b) || is_tuple(o, b))
            });
            if !cx.options().use_relaxed_rules
                || !array_like
                || has_nested_object_pattern(file, name)
                || has_rest_element(file, name)
            {
                cx.report(decl, rule);
            }
        }
        _ => {}
    }
}

fn has_nested_object_pattern(file: &SourceFile, pattern: NodeId) -> bool {
    file.fields(pattern).elements.iter().any(|e| {
        file.fields(*e).name.is_some_and(|n| match file.kind(n) {
            NodeKind::ObjectBindingPattern => true,
            NodeKind::ArrayBindingPattern => has_nested_object_pattern(file, n),
            _ => false,
        })
    })
}

fn has_rest_element(file: &SourceFile, pattern: NodeId) -> bool {
    file.fields(pattern).elements.iter().any(|e| {
        file.has_flags(*e, NodeFlags::DOT_DOT_DOT)
            || file
                .fields(*e)
                .name
                .is_some_and(|n| file.is(n, NodeKind::ArrayBindingPattern) && has_rest_element(file, n))
    })
}

/// `ESObject` variables are only allowed in local scope.
fn check_es_object_declaration(cx: &mut Linter<'_>, decl: NodeId) {
    let file = cx.file();
    let fields = file.fields(decl);
    let declared = fields.ty.is_some_and(|ty| is_es_object_type_node(file, ty));
    let initialized = fields.initializer.is_some_and(|init| is_es_object_value(cx, init));
    if (declared || initialized) && !is_inside_block(file, decl) {
        let rule = es_object_rule(cx);
        cx.report(decl, rule);
        return;
    }
    if let Some(init) = fields.initializer {
        check_es_object_assignment(cx, decl, fields.ty, init);
    }
}

pub(crate) fn property_declaration(cx: &mut Linter<'_>, node: NodeId) {
    let file = cx.file();
    let fields = file.fields(node);
    if let Some(name) = fields.name.filter(|n| file.is(*n, NodeKind::NumericLiteral)) {
        cx.report_with_fix(name, FaultId::LiteralAsPropertyName, |fixer, site| {
            fixer.fix_literal_as_property_name(site)
        });
    }
    if let (Some(ty), Some(init)) = (fields.ty, fields.initializer) {
        if let Some(lhs) = cx.type_at(ty) {
            check_assignment_matching(cx, node, lhs, init, true);
        }
    }
    check_inferred_type(cx, node);
    check_definite_assignment(cx, node);
    check_sendable_class_property(cx, node);
}

fn check_sendable_class_property(cx: &mut Linter<'_>, node: NodeId) {
    let file = cx.file();
    let in_sendable_class = file
        .parent(node)
        .is_some_and(|c| file.is(c, NodeKind::ClassDeclaration) && has_sendable_decorator(file, c));
    if !in_sendable_class {
        return;
    }
    let Some(ty) = file.fields(node).ty else {
        cx.report(node, FaultId::SendableExplicitFieldType);
        return;
    };
    for decorator in decorators_in_sendable_class(file, node) {
        cx.report(decorator, FaultId::SendableClassDecorator);
    }
    if !is_sendable_type_node(cx.oracle(), cx.at(ty), false) {
        cx.report(node, FaultId::SendablePropType);
    }
}

pub(crate) fn property_signature(cx: &mut Linter<'_>, node: NodeId) {
    let file = cx.file();
    let fields = file.fields(node);
    if let Some(name) = fields.name.filter(|n| file.is(*n, NodeKind::NumericLiteral)) {
        cx.report_with_fix(name, FaultId::LiteralAsPropertyName, |fixer, site| {
            fixer.fix_literal_as_property_name(site)
        });
    }
    let Some(ty) = fields.ty else {
        return;
    };
    let Some(iface) = file
        .parent(node)
        .filter(|p| file.is(*p, NodeKind::InterfaceDeclaration))
    else {
        return;
    };
    let o = cx.oracle();
    let sendable = cx
        .type_at(iface)
        .is_some_and(|t| is_sendable_class_or_interface(o, t));
    if sendable && !is_sendable_type_node(o, cx.at(ty), false) {
        cx.report(node, FaultId::SendablePropType);
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::{run_arkts2, run_default};
    use arkts_lint_core::{FaultId, NodeFlags, NodeKind, ProgramBuilder, TreeBuilder};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_var_and_let() {
        let mut b = TreeBuilder::new("a.ets");
        let one = b.number("1");
        let (var, _) = b.variable(NodeFlags::NONE, "x", None, Some(one));
        let two = b.number("2");
        let (let_stmt, _) = b.variable(NodeFlags::LET, "y", None, Some(two));
        let mut p = ProgramBuilder::new();
        p.add_file(b.finish([var, let_stmt]));
        let faults = run_default(&p.build());
        assert_eq!(faults.count(FaultId::VarDeclaration), 1);
    }

    #[test]
    fn test_object_destructuring_declaration() {
        let mut b = TreeBuilder::new("a.ets");
        let a = b.ident("a");
        let element = b.push(NodeKind::BindingElement, |n| {
            n.name(a);
        });
        let pattern = b.push(NodeKind::ObjectBindingPattern, |n| {
            n.elements([element]);
        });
        let source = b.ident("obj");
        let decl = b.var_decl(pattern, None, Some(source));
        let list = b.var_list(NodeFlags::CONST, [decl]);
        let stmt = b.var_stmt(list);
        let file = b.finish([stmt]);
        let decl_range = file.range(decl);
        let mut p = ProgramBuilder::new();
        p.add_file(file);
        let faults = run_default(&p.build());
        let destructuring: Vec<_> = faults
            .faults
            .iter()
            .filter(|f| f.rule == FaultId::DestructuringDeclaration)
            .map(|f| f.range)
            .collect();
        assert_eq!(destructuring, vec![decl_range]);
        assert_eq!(faults.count(FaultId::AnyType), 0);
    }

    #[test]
    fn test_uninitialized_untyped_variable_is_any() {
        let mut b = TreeBuilder::new("a.ets");
        let (stmt, decl) = b.variable(NodeFlags::LET, "x", None, None);
        let file = b.finish([stmt]);
        let decl_range = file.range(decl);
        let mut p = ProgramBuilder::new();
        p.add_file(file);
        let faults = run_default(&p.build());
        let any: Vec<_> = faults
            .faults
            .iter()
            .filter(|f| f.rule == FaultId::AnyType)
            .map(|f| f.range)
            .collect();
        assert_eq!(any, vec![decl_range]);
    }

    #[test]
    fn test_definite_assignment_by_tier() {
        let build = || {
            let mut b = TreeBuilder::new("a.ets");
            let num = b.token(NodeKind::NumberKeyword);
            let (stmt, decl) = b.variable(NodeFlags::LET, "x", Some(num), None);
            b.add_flags(decl, NodeFlags::EXCLAMATION);
            let mut p = ProgramBuilder::new();
            p.add_file(b.finish([stmt]));
            p.build()
        };
        let base = run_default(&build());
        assert_eq!(base.count(FaultId::DefiniteAssignment), 1);
        assert_eq!(base.count(FaultId::DefiniteAssignmentError), 0);
        let strict = run_arkts2(&build());
        assert_eq!(strict.count(FaultId::DefiniteAssignmentError), 1);
    }

    #[test]
    fn test_sendable_field_needs_explicit_type() {
        let mut b = TreeBuilder::new("a.ets");
        let field = b.ident("x");
        let one = b.number("1");
        let prop = b.property_decl(field, None, Some(one));
        let deco = b.decorator_named("Sendable");
        let name = b.ident("S");
        let class = b.class_decl([deco], Some(name), [], [prop]);
        let mut p = ProgramBuilder::new();
        p.add_file(b.finish([class]));
        let faults = run_default(&p.build());
        assert_eq!(faults.count(FaultId::SendableExplicitFieldType), 1);
    }
}
