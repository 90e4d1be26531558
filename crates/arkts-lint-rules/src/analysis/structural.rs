//! Nominal assignment checks.
//!
//! The strict dialect types classes and interfaces nominally: a value of
//! class `B` may flow into `A` only when `B` is `A` or inherits from it.
//! [`check_assignment_matching`] is run at every assignment-like site
//! (initializers, returns, arguments, properties) and reports
//! [`FaultId::StructuralIdentity`] where the host checker accepted the
//! assignment only structurally.

use crate::linter::Linter;
use crate::semantics::{
    has_sendable_decorator, is_any, is_anonymous, is_array,
    is_class_or_interface, is_class_value_type, is_functional, is_isendable_interface,
    is_library_symbol, is_library_type, is_object_root, is_reference, is_sendable_class_or_interface,
    is_std_library_symbol, is_std_partial_type, is_std_record_type, is_tuple, is_union,
    is_wrong_sendable_function_assignment, naming_symbol, reduce_reference, resolve,
    type_contains_non_sendable_class_or_interface,
};
use arkts_lint_core::{
    FaultId, NodeId, NodeKind, Oracle, SymbolFlags, SymbolId, TypeFlags, TypeId,
};

const MAX_DEPTH: usize = 16;

/// Checks that `rhs_expr` may be assigned to a location of type `lhs`.
///
/// `new_check` marks sites that only apply the nominal check under strict
/// matching (the static tier, or sendable targets).
pub(crate) fn check_assignment_matching(
    cx: &mut Linter<'_>,
    field: NodeId,
    lhs: TypeId,
    rhs_expr: NodeId,
    new_check: bool,
) {
    let Some(rhs) = cx.type_at(rhs_expr) else {
        return;
    };
    let o = cx.oracle();
    if is_wrong_sendable_function_assignment(o, lhs, rhs) {
        cx.report(field, FaultId::SendableFunctionAssignment);
    }
    if !cx.enabled(FaultId::StructuralIdentity) {
        return;
    }
    let strict = need_strict_match(cx, lhs, rhs);
    if new_check && !strict {
        return;
    }
    if need_to_deduce_structural_identity(cx, lhs, rhs, Some(rhs_expr), strict) {
        cx.report(field, FaultId::StructuralIdentity);
    }
}

/// Strict matching applies in the static tier, and to sendable targets
/// receiving a non-sendable class.
pub(crate) fn need_strict_match(cx: &Linter<'_>, lhs: TypeId, rhs: TypeId) -> bool {
    cx.arkts2() || is_strict_sendable_match(cx.oracle(), lhs, rhs)
}

fn is_strict_sendable_match(o: &dyn Oracle, lhs: TypeId, rhs: TypeId) -> bool {
    let mut found = false;
    for member in o.union_members(lhs) {
        if !is_class_or_interface(o, member) {
            continue;
        }
        if !is_sendable_class_or_interface(o, member) {
            return false;
        }
        found = true;
    }
    found && type_contains_non_sendable_class_or_interface(o, rhs)
}

/// True if assigning `rhs` to `lhs` relies on structural compatibility.
pub(crate) fn need_to_deduce_structural_identity(
    cx: &Linter<'_>,
    lhs: TypeId,
    rhs: TypeId,
    rhs_expr: Option<NodeId>,
    strict: bool,
) -> bool {
    deduce(cx, lhs, rhs, rhs_expr, strict, 0)
}

fn deduce(
    cx: &Linter<'_>,
    lhs: TypeId,
    rhs: TypeId,
    rhs_expr: Option<NodeId>,
    strict: bool,
    depth: usize,
) -> bool {
    if depth > MAX_DEPTH {
        return false;
    }
    let o = cx.oracle();
    let lhs = o.non_nullable(lhs);
    let rhs = o.non_nullable(rhs);
    if is_library_type(o, lhs) {
        return false;
    }
    if rhs_expr.is_some_and(|e| is_dynamic_object_assigned_to_std(cx, lhs, e)) {
        return false;
    }
    if (is_functional(o, lhs) || is_std_function(o, lhs))
        && (is_functional(o, rhs) || is_std_function(o, rhs))
    {
        return false;
    }
    if is_union(o, lhs) || is_union(o, rhs) {
        return deduce_unions(cx, lhs, rhs, rhs_expr, strict, depth);
    }
    if cx.options().advanced_class_checks
        && is_class_value_type(o, rhs)
        && lhs != rhs
        && !is_object_root(o, lhs)
    {
        return true;
    }
    if strict {
        if rhs_expr.is_some_and(|e| cx.file().is(e, NodeKind::ArrayLiteralExpression)) {
            return false;
        }
        if is_reference(o, lhs)
            && is_reference(o, rhs)
            && reduce_reference(o, lhs) == reduce_reference(o, rhs)
        {
            let lhs_args = type_arguments(o, lhs);
            let rhs_args = type_arguments(o, rhs);
            return lhs_args
                .iter()
                .zip(rhs_args.iter())
                .any(|(l, r)| deduce(cx, *l, *r, None, strict, depth + 1));
        }
    }
    let lhs = reduce_reference(o, lhs);
    let rhs = reduce_reference(o, rhs);
    is_class_or_interface(o, lhs)
        && is_class_or_interface(o, rhs)
        && !related_by_inheritance_or_identical(o, rhs, lhs)
}

fn deduce_unions(
    cx: &Linter<'_>,
    lhs: TypeId,
    rhs: TypeId,
    rhs_expr: Option<NodeId>,
    strict: bool,
    depth: usize,
) -> bool {
    let o = cx.oracle();
    if is_union(o, rhs) {
        // Each class of the rhs must flow into the lhs on its own.
        return o
            .union_members(rhs)
            .iter()
            .any(|r| deduce(cx, lhs, *r, rhs_expr, strict, depth + 1));
    }
    let lhs_members = o.union_members(lhs);
    if !(is_reference(o, rhs) || is_class_or_interface(o, rhs)) {
        return false;
    }
    let mut any = false;
    for member in lhs_members {
        if !(is_reference(o, member)
            || is_class_or_interface(o, member)
            || is_isendable_interface(o, member))
        {
            continue;
        }
        if !deduce(cx, member, rhs, rhs_expr, strict, depth + 1) {
            return false;
        }
        any = true;
    }
    any
}

fn type_arguments(o: &dyn Oracle, t: TypeId) -> Vec<TypeId> {
    o.ty(t).map(|i| i.type_arguments.clone()).unwrap_or_default()
}

fn is_std_function(o: &dyn Oracle, t: TypeId) -> bool {
    naming_symbol(o, t)
        .is_some_and(|s| o.symbol_name(s) == "Function" && is_std_library_symbol(o, s))
}

/// Library values assigned to standard-library or primitive targets are
/// outside the nominal check.
fn is_dynamic_object_assigned_to_std(cx: &Linter<'_>, lhs: TypeId, rhs_expr: NodeId) -> bool {
    let o = cx.oracle();
    let std_target = naming_symbol(o, lhs).is_some_and(|s| is_std_library_symbol(o, s))
        || o.type_flags(lhs).intersects(
            TypeFlags::STRING_LIKE | TypeFlags::NUMBER_LIKE | TypeFlags::BOOLEAN_LIKE,
        );
    if !std_target {
        return false;
    }
    let file = cx.file();
    let expr = file.skip_parens(rhs_expr);
    let target = if file.is(expr, NodeKind::CallExpression) {
        file.fields(expr).expression.unwrap_or(expr)
    } else {
        expr
    };
    cx.true_symbol_at(target)
        .is_some_and(|s| is_library_symbol(o, s))
}

/// True if `derived` is `base`, inherits from it, or `base` is the object root.
pub(crate) fn related_by_inheritance_or_identical(o: &dyn Oracle, derived: TypeId, base: TypeId) -> bool {
    related(o, derived, base, 0)
}

fn related(o: &dyn Oracle, derived: TypeId, base: TypeId, depth: usize) -> bool {
    if depth > MAX_DEPTH {
        return false;
    }
    let derived = reduce_reference(o, derived);
    let base_reduced = reduce_reference(o, base);
    if derived == base_reduced || is_object_root(o, base_reduced) {
        return true;
    }
    let Some(info) = o.ty(derived) else {
        return false;
    };
    if let Some(sym) = info.symbol {
        for decl in o.declarations_of(sym) {
            let Some((file, node)) = resolve(o, *decl) else {
                continue;
            };
            match file.kind(node) {
                NodeKind::ClassDeclaration => {
                    if has_sendable_decorator(file, node) && is_isendable_interface(o, base_reduced) {
                        return true;
                    }
                }
                NodeKind::InterfaceDeclaration => {}
                _ => return false,
            }
        }
    }
    info.base_types
        .iter()
        .any(|b| related(o, *b, base_reduced, depth + 1))
}

// ── Object literals ──

/// Member symbol named `name` of `t` or one of its bases.
fn find_member(o: &dyn Oracle, t: TypeId, name: &str, depth: usize) -> Option<SymbolId> {
    if depth > MAX_DEPTH {
        return None;
    }
    let info = o.ty(reduce_reference(o, t))?;
    info.members
        .iter()
        .copied()
        .find(|m| o.symbol_name(*m) == name)
        .or_else(|| {
            info.base_types
                .iter()
                .find_map(|b| find_member(o, *b, name, depth + 1))
        })
}

fn has_methods(o: &dyn Oracle, t: TypeId) -> bool {
    o.ty(reduce_reference(o, t)).is_some_and(|info| {
        info.members
            .iter()
            .any(|m| o.symbol_flags(*m).contains(SymbolFlags::METHOD))
    })
}

/// True if the object literal `lit` may initialize a value of type `lhs`.
pub(crate) fn is_object_literal_assignable(cx: &Linter<'_>, lhs: Option<TypeId>, lit: NodeId) -> bool {
    let Some(lhs) = lhs else {
        return false;
    };
    assignable(cx, lhs, lit, 0)
}

fn assignable(cx: &Linter<'_>, lhs: TypeId, lit: NodeId, depth: usize) -> bool {
    if depth > MAX_DEPTH {
        return false;
    }
    let o = cx.oracle();
    let lhs = o.non_nullable(lhs);
    if is_union(o, lhs) {
        return o
            .union_members(lhs)
            .iter()
            .any(|m| assignable(cx, *m, lit, depth + 1));
    }
    if is_any(o, lhs) || is_library_type(o, lhs) || is_dynamic_literal_initializer(cx, lit) {
        return true;
    }
    let lhs = if is_std_partial_type(o, lhs) {
        match type_arguments(o, lhs).first() {
            Some(arg) => *arg,
            None => return false,
        }
    } else {
        lhs
    };
    if is_std_record_type(o, lhs) {
        return validate_record_keys(cx, lit);
    }
    if !is_class_or_interface(o, lhs) || has_methods(o, lhs) {
        return false;
    }
    validate_fields(cx, lhs, lit, depth)
}

fn validate_record_keys(cx: &Linter<'_>, lit: NodeId) -> bool {
    let file = cx.file();
    file.fields(lit).elements.iter().all(|prop| {
        let Some(name) = file.fields(*prop).name else {
            return false;
        };
        match file.kind(name) {
            NodeKind::StringLiteral | NodeKind::NumericLiteral => true,
            NodeKind::ComputedPropertyName => is_valid_computed_property_name(cx, name, true),
            _ => false,
        }
    })
}

fn validate_fields(cx: &Linter<'_>, lhs: TypeId, lit: NodeId, depth: usize) -> bool {
    let o = cx.oracle();
    let file = cx.file();
    for &prop in &file.fields(lit).elements {
        match file.kind(prop) {
            NodeKind::PropertyAssignment | NodeKind::ShorthandPropertyAssignment => {}
            NodeKind::SpreadAssignment => return false,
            _ => continue,
        }
        let Some(name) = file.name_text(prop) else {
            return false;
        };
        let Some(member) = find_member(o, lhs, name, 0) else {
            return false;
        };
        let Some(init) = file.fields(prop).initializer else {
            continue;
        };
        let Some(member_ty) = o.type_of_symbol(member) else {
            continue;
        };
        let init = file.skip_parens(init);
        if file.is(init, NodeKind::ObjectLiteralExpression) {
            if !assignable(cx, member_ty, init, depth + 1) {
                return false;
            }
            continue;
        }
        let Some(init_ty) = cx.type_at(init) else {
            continue;
        };
        let strict = need_strict_match(cx, member_ty, init_ty);
        if need_to_deduce_structural_identity(cx, member_ty, init_ty, Some(init), strict)
            || is_wrong_sendable_function_assignment(o, member_ty, init_ty)
        {
            return false;
        }
    }
    true
}

/// Whether a literal is consumed by library code, directly or through an
/// enclosing literal.
pub(crate) fn is_dynamic_literal_initializer(cx: &Linter<'_>, lit: NodeId) -> bool {
    let o = cx.oracle();
    let file = cx.file();
    let is_literal = |n: NodeId| {
        matches!(
            file.kind(n),
            NodeKind::ObjectLiteralExpression | NodeKind::ArrayLiteralExpression
        )
    };
    if !is_literal(lit) {
        return false;
    }
    let mut cur = lit;
    while is_literal(cur) {
        if let Some(ctx) = cx.contextual_type_at(cur).filter(|t| !is_anonymous(o, *t)) {
            if let Some(dynamic) = dynamic_type(o, ctx) {
                return dynamic;
            }
        }
        let Some(mut parent) = file.parent(cur) else {
            return false;
        };
        if file.is(parent, NodeKind::PropertyAssignment) {
            match file.parent(parent) {
                Some(p) => parent = p,
                None => return false,
            }
        }
        cur = parent;
    }
    match file.kind(cur) {
        NodeKind::CallExpression | NodeKind::NewExpression => {
            let Some(callee) = file.fields(cur).expression else {
                return false;
            };
            if cx.type_at(callee).is_some_and(|t| {
                is_any(o, t)
                    || o.ty(t)
                        .and_then(|i| i.symbol)
                        .is_some_and(|s| is_library_symbol(o, s))
            }) {
                return true;
            }
            file.is(callee, NodeKind::PropertyAccessExpression)
                && file
                    .fields(callee)
                    .expression
                    .and_then(|base| cx.symbol_at(base))
                    .is_some_and(|s| is_library_symbol(o, s))
        }
        NodeKind::BinaryExpression => file.fields(cur).left.is_some_and(|left| {
            file.is(left, NodeKind::PropertyAccessExpression)
                && file
                    .fields(left)
                    .expression
                    .and_then(|base| cx.type_at(base))
                    .and_then(|t| o.ty(t).and_then(|i| i.symbol))
                    .is_some_and(|s| is_library_symbol(o, s))
        }),
        _ => false,
    }
}

/// `Some(true)` for types owned by library code, `Some(false)` for user
/// types, `None` when the enclosing context decides.
fn dynamic_type(o: &dyn Oracle, t: TypeId) -> Option<bool> {
    if is_any(o, t) {
        return Some(true);
    }
    if is_union(o, t) {
        let members = o.union_members(t);
        if members.iter().any(|m| dynamic_type(o, *m) == Some(true)) {
            return Some(true);
        }
        return None;
    }
    if is_library_type(o, t) && !is_array(o, t) {
        return Some(true);
    }
    if is_class_or_interface(o, t) || is_reference(o, t) || is_tuple(o, t) {
        return Some(false);
    }
    None
}

// ── Computed names ──

/// `Symbol.iterator`, as expression or resolved symbol.
pub(crate) fn is_symbol_iterator_expression(cx: &Linter<'_>, expr: NodeId) -> bool {
    let o = cx.oracle();
    let file = cx.file();
    let expr = file.skip_parens(expr);
    if !file.is(expr, NodeKind::PropertyAccessExpression) || file.name_text(expr) != Some("iterator") {
        return false;
    }
    let by_symbol = cx.true_symbol_at(expr).is_some_and(|s| {
        o.symbol(s)
            .and_then(|info| info.parent)
            .is_some_and(|p| matches!(o.symbol_name(p), "Symbol" | "SymbolConstructor"))
    });
    by_symbol
        || file
            .fields(expr)
            .expression
            .is_some_and(|base| file.is(base, NodeKind::Identifier) && file.text(base) == "Symbol")
}

fn is_enum_string_literal(cx: &Linter<'_>, expr: NodeId) -> bool {
    let o = cx.oracle();
    let is_member = cx
        .true_symbol_at(expr)
        .is_some_and(|s| o.symbol_flags(s).contains(SymbolFlags::ENUM_MEMBER));
    is_member
        && cx
            .type_at(expr)
            .is_some_and(|t| o.type_flags(t).intersects(TypeFlags::STRING_LIKE))
}

/// Computed property names allowed in the dialect: `Symbol.iterator` outside
/// records, and (outside the static tier) string literals and string enum
/// members.
pub(crate) fn is_valid_computed_property_name(cx: &Linter<'_>, name: NodeId, record: bool) -> bool {
    let file = cx.file();
    let Some(expr) = file.fields(name).expression else {
        return false;
    };
    if !record && is_symbol_iterator_expression(cx, expr) {
        return true;
    }
    !cx.arkts2()
        && (file.is(expr, NodeKind::StringLiteral) || is_enum_string_literal(cx, expr))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{run_arkts2, run_default, with_linter};
    use arkts_lint_core::{NodeFlags, NodeRef, ProgramBuilder, TreeBuilder};

    /// `class A {}`, `class B {}` and `let a: A = new B()`.
    fn unrelated_classes(derive: bool) -> arkts_lint_core::Program {
        let mut b = TreeBuilder::new("a.ets");
        let a_name = b.ident("A");
        let a = b.class_decl([], Some(a_name), [], []);
        let b_name = b.ident("B");
        let b_class = b.class_decl([], Some(b_name), [], []);
        let callee = b.ident("B");
        let init = b.new_expr(callee, []);
        let ty = b.type_ref("A", []);
        let (stmt, decl) = b.variable(NodeFlags::LET, "a", Some(ty), Some(init));
        let mut p = ProgramBuilder::new();
        let f = p.add_file(b.finish([a, b_class, stmt]));
        let a_sym = p.symbol("A", SymbolFlags::CLASS);
        p.declare(a_sym, NodeRef::new(f, a));
        let b_sym = p.symbol("B", SymbolFlags::CLASS);
        p.declare(b_sym, NodeRef::new(f, b_class));
        let a_ty = p.class_type(a_sym, &[]);
        let bases = if derive { vec![a_ty] } else { Vec::new() };
        let b_ty = p.class_type(b_sym, &bases);
        let var = p.symbol("a", SymbolFlags::BLOCK_SCOPED_VARIABLE);
        p.declare(var, NodeRef::new(f, decl));
        p.set_type(NodeRef::new(f, ty), a_ty);
        p.set_type(NodeRef::new(f, decl), a_ty);
        p.set_type(NodeRef::new(f, init), b_ty);
        p.build()
    }

    #[test]
    fn test_unrelated_class_assignment_is_structural() {
        let faults = run_default(&unrelated_classes(false));
        assert_eq!(faults.count(FaultId::StructuralIdentity), 1);
    }

    #[test]
    fn test_derived_class_assignment_is_nominal() {
        let faults = run_arkts2(&unrelated_classes(true));
        assert_eq!(faults.count(FaultId::StructuralIdentity), 0);
    }

    #[derive(Clone, Copy)]
    enum Site {
        /// `class Holder { a: A = new B(); }`
        Property,
        /// `function make(): A { return new B(); }`
        Return,
    }

    /// `class A {}` (optionally `@Sendable`), `class B {}` and `site`
    /// assigning `new B()` to an `A`.
    fn nominal_site(site: Site, sendable_target: bool) -> arkts_lint_core::Program {
        let mut b = TreeBuilder::new("a.ets");
        let a_decos = if sendable_target {
            vec![b.decorator_named("Sendable")]
        } else {
            Vec::new()
        };
        let a_name = b.ident("A");
        let a = b.class_decl(a_decos, Some(a_name), [], []);
        let b_name = b.ident("B");
        let b_class = b.class_decl([], Some(b_name), [], []);
        let callee = b.ident("B");
        let init = b.new_expr(callee, []);
        let ty = b.type_ref("A", []);
        let holder = match site {
            Site::Property => {
                let prop_name = b.ident("a");
                let prop = b.property_decl(prop_name, Some(ty), Some(init));
                let holder_name = b.ident("Holder");
                b.class_decl([], Some(holder_name), [], [prop])
            }
            Site::Return => {
                let ret = b.ret(Some(init));
                let body = b.block([ret]);
                let fn_name = b.ident("make");
                b.function_decl([], Some(fn_name), [], Some(ty), Some(body))
            }
        };
        let mut p = ProgramBuilder::new();
        let f = p.add_file(b.finish([a, b_class, holder]));
        let a_sym = p.symbol("A", SymbolFlags::CLASS);
        p.declare(a_sym, NodeRef::new(f, a));
        let b_sym = p.symbol("B", SymbolFlags::CLASS);
        p.declare(b_sym, NodeRef::new(f, b_class));
        let a_ty = p.class_type(a_sym, &[]);
        let b_ty = p.class_type(b_sym, &[]);
        p.set_type(NodeRef::new(f, ty), a_ty);
        p.set_type(NodeRef::new(f, init), b_ty);
        p.set_contextual_type(NodeRef::new(f, init), a_ty);
        p.build()
    }

    #[test]
    fn test_strict_only_sites_stay_silent_without_strict_match() {
        for site in [Site::Property, Site::Return] {
            let faults = run_default(&nominal_site(site, false));
            assert_eq!(faults.count(FaultId::StructuralIdentity), 0);
        }
    }

    #[test]
    fn test_strict_only_sites_report_under_static_tier() {
        for site in [Site::Property, Site::Return] {
            let faults = run_arkts2(&nominal_site(site, false));
            assert_eq!(faults.count(FaultId::StructuralIdentity), 1);
        }
    }

    #[test]
    fn test_sendable_target_forces_strict_match() {
        for site in [Site::Property, Site::Return] {
            let faults = run_default(&nominal_site(site, true));
            assert_eq!(faults.count(FaultId::StructuralIdentity), 1);
        }
        let program = nominal_site(Site::Property, true);
        let (a_ty, b_ty) = (TypeId(0), TypeId(1));
        with_linter(&program, |cx| {
            assert!(need_strict_match(cx, a_ty, b_ty));
            assert!(!need_strict_match(cx, b_ty, a_ty));
        });
    }

    #[test]
    fn test_inheritance_relation() {
        let program = unrelated_classes(true);
        let a_ty = TypeId(0);
        let b_ty = TypeId(1);
        assert!(related_by_inheritance_or_identical(&program, b_ty, a_ty));
        assert!(!related_by_inheritance_or_identical(&program, a_ty, b_ty));
        with_linter(&program, |cx| {
            assert!(!need_to_deduce_structural_identity(cx, a_ty, b_ty, None, false));
            assert!(need_to_deduce_structural_identity(cx, b_ty, a_ty, None, false));
        });
    }
}
