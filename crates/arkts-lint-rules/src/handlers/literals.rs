//! Object and array literals, their properties and spreads.

use super::is_destructuring_assignment_lhs;
use crate::analysis::structural::{
    check_assignment_matching, is_dynamic_literal_initializer, is_object_literal_assignable,
    is_symbol_iterator_expression, is_valid_computed_property_name,
};
use crate::linter::Linter;
use crate::semantics::{
    has_sendable_decorator, is_array, is_library_type, is_or_derived_from, is_std_record_type,
    is_sendable_class_or_interface, is_union, type_contains_sendable_class_or_interface,
};
use arkts_lint_core::{FaultId, NodeId, NodeKind, TypeFlags, TypeId};

pub(crate) fn object_literal(cx: &mut Linter<'_>, node: NodeId) {
    let file = cx.file();
    if is_destructuring_assignment_lhs(file, node) {
        return;
    }
    let o = cx.oracle();
    let ctx_type = cx.contextual_type_at(node);
    if ctx_type.is_some_and(|t| type_contains_sendable_class_or_interface(o, t)) {
        cx.report(node, FaultId::SendableObjectInitialization);
    } else if !is_dynamic_literal_initializer(cx, node)
        && !is_object_literal_assignable(cx, ctx_type, node)
    {
        cx.report(node, FaultId::ObjectLiteralNoContextType);
    }
    if cx.arkts2() {
        check_property_names(cx, node, ctx_type);
    }
}

/// Only identifier-named property assignments outside records; only valid
/// keys inside them.
fn check_property_names(cx: &mut Linter<'_>, lit: NodeId, ctx_type: Option<TypeId>) {
    let o = cx.oracle();
    let file = cx.file();
    let record = ctx_type.is_some_and(|t| is_std_record_type(o, t));
    for &prop in &file.fields(lit).elements {
        let name = file.fields(prop).name;
        let valid = if record {
            name.is_some_and(|n| is_valid_record_key(cx, n))
        } else {
            file.is(prop, NodeKind::PropertyAssignment)
                && name.is_some_and(|n| file.is(n, NodeKind::Identifier))
        };
        if !valid {
            let at = match name {
                Some(n) if file.is(prop, NodeKind::PropertyAssignment) => n,
                _ => prop,
            };
            cx.report(at, FaultId::ObjectLiteralProperty);
        }
    }
}

fn is_valid_record_key(cx: &Linter<'_>, name: NodeId) -> bool {
    let file = cx.file();
    match file.kind(name) {
        NodeKind::StringLiteral | NodeKind::NumericLiteral => true,
        NodeKind::ComputedPropertyName => is_valid_computed_property_name(cx, name, true),
        _ => false,
    }
}

pub(crate) fn array_literal(cx: &mut Linter<'_>, node: NodeId) {
    let file = cx.file();
    if is_destructuring_assignment_lhs(file, node) {
        return;
    }
    let o = cx.oracle();
    if cx
        .contextual_type_at(node)
        .is_some_and(|t| type_contains_sendable_class_or_interface(o, t))
    {
        cx.report(node, FaultId::SendableObjectInitialization);
        return;
    }
    let mut untyped_element = false;
    for &element in &file.fields(node).elements {
        let element_ctx = cx.contextual_type_at(element);
        if file.is(element, NodeKind::ObjectLiteralExpression)
            && !is_dynamic_literal_initializer(cx, node)
            && !is_object_literal_assignable(cx, element_ctx, element)
        {
            untyped_element = true;
            break;
        }
        if let Some(t) = element_ctx {
            check_assignment_matching(cx, element, t, element, true);
        }
    }
    if untyped_element {
        cx.report(node, FaultId::ArrayLiteralNoContextType);
    }
}

/// Numeric property names, allowed only when initializing records and
/// library-owned objects.
pub(crate) fn property_assignment(cx: &mut Linter<'_>, node: NodeId) {
    let file = cx.file();
    let Some(name) = file.fields(node).name else {
        return;
    };
    if !file.is(name, NodeKind::NumericLiteral) {
        return;
    }
    let o = cx.oracle();
    let Some(lit) = file.parent(node) else {
        return;
    };
    let ctx_type = cx.contextual_type_at(lit);
    let record = ctx_type.is_some_and(|t| {
        if is_union(o, t) {
            o.union_members(t).iter().any(|m| is_std_record_type(o, *m))
        } else {
            is_std_record_type(o, t)
        }
    });
    let dynamic =
        ctx_type.is_some_and(|t| is_library_type(o, t)) || is_dynamic_literal_initializer(cx, lit);
    if !record && !dynamic {
        cx.report_with_fix(name, FaultId::LiteralAsPropertyName, |fixer, site| {
            fixer.fix_literal_as_property_name(site)
        });
    }
}

pub(crate) fn computed_property_name(cx: &mut Linter<'_>, node: NodeId) {
    if in_sendable_declaration(cx, node) {
        let file = cx.file();
        let iterator_in_collections = file
            .fields(node)
            .expression
            .is_some_and(|e| is_symbol_iterator_expression(cx, e))
            && file.is_declaration_file
            && file.normalized_path().ends_with("@arkts.collections.d.ets");
        if !iterator_in_collections {
            cx.report(node, FaultId::SendableComputedPropName);
        }
    } else if !is_valid_computed_property_name(cx, node, false) {
        cx.report(node, FaultId::ComputedPropertyName);
    }
}

/// The computed name belongs to a member of a sendable class or interface.
fn in_sendable_declaration(cx: &Linter<'_>, name: NodeId) -> bool {
    let file = cx.file();
    let Some(decl) = file.parent(name).and_then(|member| file.parent(member)) else {
        return false;
    };
    match file.kind(decl) {
        NodeKind::ClassDeclaration => has_sendable_decorator(file, decl),
        NodeKind::InterfaceDeclaration => cx
            .type_at(decl)
            .is_some_and(|t| is_sendable_class_or_interface(cx.oracle(), t)),
        _ => false,
    }
}

/// Spreading is allowed for arrays passed as arguments or into array
/// literals; object spread is never allowed.
pub(crate) fn spread(cx: &mut Linter<'_>, node: NodeId) {
    let file = cx.file();
    if file.is(node, NodeKind::SpreadElement) && spreads_array(cx, node) {
        return;
    }
    cx.report(node, FaultId::SpreadOperator);
}

fn spreads_array(cx: &Linter<'_>, node: NodeId) -> bool {
    let o = cx.oracle();
    let file = cx.file();
    let Some(expr) = file.fields(node).expression else {
        return false;
    };
    let Some(mut t) = cx.type_at(expr) else {
        return false;
    };
    if o.type_flags(t).contains(TypeFlags::TYPE_PARAMETER) {
        match o.ty(t).and_then(|i| i.constraint) {
            Some(c) => t = c,
            None => return false,
        }
    }
    let position_allowed = cx.options().use_rt_logic
        || file.parent(node).is_some_and(|p| {
            matches!(
                file.kind(p),
                NodeKind::CallExpression | NodeKind::NewExpression | NodeKind::ArrayLiteralExpression
            )
        });
    position_allowed && is_or_derived_from(o, t, &|b| is_array(o, b))
}

#[cfg(test)]
mod tests {
    use crate::test_support::{run_arkts2, run_default};
    use arkts_lint_core::{
        FaultId, NodeFlags, NodeKind, NodeRef, ProgramBuilder, SymbolFlags, TreeBuilder,
    };
    use pretty_assertions::assert_eq;

    #[test]
    fn test_untyped_object_literal() {
        let mut b = TreeBuilder::new("a.ets");
        let name = b.ident("a");
        let one = b.number("1");
        let prop = b.property_assignment(name, one);
        let lit = b.object_literal([prop]);
        let (stmt, _) = b.variable(NodeFlags::LET, "o", None, Some(lit));
        let mut p = ProgramBuilder::new();
        p.add_file(b.finish([stmt]));
        let faults = run_default(&p.build());
        assert_eq!(faults.count(FaultId::ObjectLiteralNoContextType), 1);
    }

    #[test]
    fn test_object_literal_typed_by_plain_interface() {
        let mut b = TreeBuilder::new("a.ets");
        let field = b.ident("a");
        let num = b.token(NodeKind::NumberKeyword);
        let sig = b.property_sig(field, Some(num));
        let iface_name = b.ident("I");
        let iface = b.interface_decl(iface_name, [], [sig]);
        let name = b.ident("a");
        let one = b.number("1");
        let prop = b.property_assignment(name, one);
        let lit = b.object_literal([prop]);
        let ty = b.type_ref("I", []);
        let (stmt, _) = b.variable(NodeFlags::LET, "o", Some(ty), Some(lit));
        let mut p = ProgramBuilder::new();
        let f = p.add_file(b.finish([iface, stmt]));
        let i_sym = p.symbol("I", SymbolFlags::INTERFACE);
        p.declare(i_sym, NodeRef::new(f, iface));
        let a_sym = p.symbol("a", SymbolFlags::PROPERTY);
        p.declare(a_sym, NodeRef::new(f, sig));
        let number = p.number();
        p.set_symbol_type(a_sym, number);
        let i_ty = p.interface_type(i_sym, &[]);
        p.symbol_mut(i_sym).members.push(a_sym);
        p.type_mut(i_ty).members.push(a_sym);
        p.set_contextual_type(NodeRef::new(f, lit), i_ty);
        let faults = run_default(&p.build());
        assert_eq!(faults.count(FaultId::ObjectLiteralNoContextType), 0);
    }

    #[test]
    fn test_object_spread_is_reported() {
        let mut b = TreeBuilder::new("a.ets");
        let other = b.ident("other");
        let spread = b.push(NodeKind::SpreadAssignment, |n| {
            n.expression(other);
        });
        let lit = b.object_literal([spread]);
        let stmt = b.expr_stmt(lit);
        let file = b.finish([stmt]);
        let spread_range = file.range(spread);
        let mut p = ProgramBuilder::new();
        p.add_file(file);
        let faults = run_arkts2(&p.build());
        let spreads: Vec<_> = faults
            .faults
            .iter()
            .filter(|f| f.rule == FaultId::SpreadOperator)
            .map(|f| f.range)
            .collect();
        assert_eq!(spreads, vec![spread_range]);
        assert_eq!(faults.count(FaultId::ObjectLiteralProperty), 1);
    }

    #[test]
    fn test_array_spread_into_call_is_allowed() {
        let mut b = TreeBuilder::new("a.ets");
        let arr = b.ident("arr");
        let spread = b.push(NodeKind::SpreadElement, |n| {
            n.expression(arr);
        });
        let callee = b.ident("f");
        let call = b.call(callee, [spread]);
        let stmt = b.expr_stmt(call);
        let mut p = ProgramBuilder::new();
        let f = p.add_file(b.finish([stmt]));
        let number = p.number();
        let array = p.array(number);
        p.set_type(NodeRef::new(f, arr), array);
        let faults = run_default(&p.build());
        assert_eq!(faults.count(FaultId::SpreadOperator), 0);
    }
}
