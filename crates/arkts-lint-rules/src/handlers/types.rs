//! Type references and heritage expressions.

use super::es_object_rule;
use crate::analysis::sdk::check_type_use;
use crate::linter::Linter;
use crate::semantics::{
    is_class_or_interface, is_es_object_symbol, is_es_object_type_node,
    is_sendable_class_or_interface, is_sendable_type_node, reduce_reference,
};
use arkts_lint_core::whitelist::builtins::is_limited_utility_type;
use arkts_lint_core::{FaultId, NodeId, NodeKind, SourceFile};

pub(crate) fn type_reference(cx: &mut Linter<'_>, node: NodeId) {
    let file = cx.file();
    if is_es_object_type_node(file, node) {
        let in_variable = file
            .parent(node)
            .is_some_and(|p| file.is(p, NodeKind::VariableDeclaration));
        if !in_variable {
            let rule = es_object_rule(cx);
            cx.report(node, rule);
        }
        return;
    }
    let Some(name) = file.fields(node).name else {
        return;
    };
    let type_name = entity_name(file, name);
    if is_limited_utility_type(&type_name) {
        cx.report(node, FaultId::UtilityType);
        return;
    }
    if type_name == "Partial" {
        check_partial(cx, node);
    }
    let o = cx.oracle();
    let sendable = cx
        .type_at(name)
        .is_some_and(|t| is_sendable_class_or_interface(o, t));
    if sendable {
        for &arg in &file.fields(node).type_arguments {
            if !is_sendable_type_node(o, cx.at(arg), false) {
                cx.report(arg, FaultId::SendableGenericTypes);
            }
        }
    }
    check_type_use(cx, node);
}

/// Dotted text of an identifier or qualified name.
fn entity_name(file: &SourceFile, name: NodeId) -> String {
    if !file.is(name, NodeKind::QualifiedName) {
        return file.text(name).to_string();
    }
    let fields = file.fields(name);
    match (fields.expression, fields.name) {
        (Some(left), Some(right)) => format!("{}.{}", entity_name(file, left), file.text(right)),
        _ => String::new(),
    }
}

/// `Partial<T>` is only allowed over a class or interface.
fn check_partial(cx: &mut Linter<'_>, node: NodeId) {
    let args = &cx.file().fields(node).type_arguments;
    let [arg] = args.as_slice() else {
        return;
    };
    let o = cx.oracle();
    let Some(t) = cx.type_at(*arg) else {
        return;
    };
    if !is_class_or_interface(o, reduce_reference(o, t)) {
        cx.report(node, FaultId::UtilityType);
    }
}

/// `extends ESObject` and `implements ESObject`.
pub(crate) fn expression_with_type_arguments(cx: &mut Linter<'_>, node: NodeId) {
    let Some(expr) = cx.file().fields(node).expression else {
        return;
    };
    let o = cx.oracle();
    if cx
        .true_symbol_at(expr)
        .is_some_and(|s| is_es_object_symbol(o, s))
    {
        let rule = es_object_rule(cx);
        cx.report(node, rule);
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::{run_arkts2, run_default};
    use arkts_lint_core::{FaultId, NodeFlags, NodeKind, NodeRef, ProgramBuilder, SymbolFlags, TreeBuilder};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_limited_utility_types() {
        let mut b = TreeBuilder::new("a.ets");
        let point = b.type_ref("Point", []);
        let pick = b.type_ref("Pick", [point]);
        let (pick_stmt, _) = b.variable(NodeFlags::LET, "p", Some(pick), None);
        let num = b.token(NodeKind::NumberKeyword);
        let partial_num = b.type_ref("Partial", [num]);
        let (num_stmt, _) = b.variable(NodeFlags::LET, "n", Some(partial_num), None);
        let shape = b.type_ref("Shape", []);
        let partial_shape = b.type_ref("Partial", [shape]);
        let (shape_stmt, _) = b.variable(NodeFlags::LET, "s", Some(partial_shape), None);
        let file = b.finish([pick_stmt, num_stmt, shape_stmt]);
        let (pick_range, partial_range) = (file.range(pick), file.range(partial_num));
        let mut p = ProgramBuilder::new();
        let f = p.add_file(file);
        let number = p.number();
        p.set_type(NodeRef::new(f, num), number);
        let shape_sym = p.symbol("Shape", SymbolFlags::INTERFACE);
        let shape_type = p.interface_type(shape_sym, &[]);
        p.set_type(NodeRef::new(f, shape), shape_type);
        let faults = run_default(&p.build());
        let ranges: Vec<_> = faults
            .faults
            .iter()
            .filter(|f| f.rule == FaultId::UtilityType)
            .map(|f| f.range)
            .collect();
        assert_eq!(ranges, vec![pick_range, partial_range]);
    }

    #[test]
    fn test_es_object_outside_variable_declaration() {
        let build = || {
            let mut b = TreeBuilder::new("a.ets");
            let param_ty = b.type_ref("ESObject", []);
            let param_name = b.ident("value");
            let param = b.param(param_name, Some(param_ty), None);
            let void = b.token(NodeKind::VoidKeyword);
            let body = b.block([]);
            let name = b.ident("consume");
            let func = b.function_decl([], Some(name), [param], Some(void), Some(body));
            let mut p = ProgramBuilder::new();
            p.add_file(b.finish([func]));
            p.build()
        };
        assert_eq!(run_default(&build()).count(FaultId::EsObjectType), 1);
        assert_eq!(run_arkts2(&build()).count(FaultId::EsObjectTypeError), 1);
    }

    #[test]
    fn test_sendable_class_with_non_sendable_type_argument() {
        let mut b = TreeBuilder::new("a.ets");
        let deco = b.decorator_named("Sendable");
        let box_name = b.ident("Box");
        let box_class = b.class_decl([deco], Some(box_name), [], []);
        let plain_name = b.ident("Plain");
        let plain_class = b.class_decl([], Some(plain_name), [], []);
        let arg = b.type_ref("Plain", []);
        let boxed = b.type_ref("Box", [arg]);
        let (stmt, _) = b.variable(NodeFlags::LET, "b", Some(boxed), None);
        let file = b.finish([box_class, plain_class, stmt]);
        let arg_range = file.range(arg);
        let box_ref = file.fields(boxed).name.expect("type name");
        let plain_ref = file.fields(arg).name.expect("type name");
        let mut p = ProgramBuilder::new();
        let f = p.add_file(file);
        let box_sym = p.symbol("Box", SymbolFlags::CLASS);
        p.declare(box_sym, NodeRef::new(f, box_class));
        let box_type = p.class_type(box_sym, &[]);
        let plain_sym = p.symbol("Plain", SymbolFlags::CLASS);
        p.declare(plain_sym, NodeRef::new(f, plain_class));
        let plain_type = p.class_type(plain_sym, &[]);
        p.bind(NodeRef::new(f, box_ref), box_sym);
        p.set_type(NodeRef::new(f, box_ref), box_type);
        p.bind(NodeRef::new(f, plain_ref), plain_sym);
        p.set_type(NodeRef::new(f, arg), plain_type);
        let faults = run_default(&p.build());
        let ranges: Vec<_> = faults
            .faults
            .iter()
            .filter(|f| f.rule == FaultId::SendableGenericTypes)
            .map(|f| f.range)
            .collect();
        assert_eq!(ranges, vec![arg_range]);
    }
}
