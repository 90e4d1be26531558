//! Operators, member access, calls, `new` and casts.

use super::{check_es_object_assignment, es_object_rule, is_es_object_value};
use crate::analysis::array_bounds::check_element_access;
use crate::analysis::const_eval::eval_number;
use crate::analysis::sdk::check_member_use;
use crate::analysis::structural::check_assignment_matching;
use crate::linter::Linter;
use crate::semantics::{
    declaration_kind, first_declaration, flags, has_sendable_type_alias, is_any, is_array,
    is_class_value_type, is_enum, is_functional, is_library_symbol, is_library_type,
    is_object_root, is_or_derived_from, is_primitive, is_sendable_class_or_interface,
    is_sendable_function, is_sendable_type_node, is_std_library_symbol, is_std_map_type,
    is_std_named, is_std_record_type, is_tuple, is_union, is_unknown,
    is_wrong_sendable_function_assignment, naming_symbol, resolve, symbol_has_es_object_type,
};
use arkts_lint_core::whitelist::builtins::{
    limited_std_api, StdApiRestriction, ALLOWED_STD_SYMBOL_API,
};
use arkts_lint_core::{
    FaultId, NodeFlags, NodeId, NodeKind, Operator, Oracle, SignatureInfo, SourceFile,
    SymbolFlags, SymbolId, TypeFlags, TypeId,
};

const SYMBOL: &str = "Symbol";
const SYMBOL_CONSTRUCTOR: &str = "SymbolConstructor";

fn parent_symbol_name(o: &dyn Oracle, sym: SymbolId) -> Option<&str> {
    o.symbol(sym)
        .and_then(|info| info.parent)
        .map(|p| o.symbol_name(p))
}

// ── Unary and binary operators ──

pub(crate) fn prefix_unary(cx: &mut Linter<'_>, node: NodeId) {
    let file = cx.file();
    let Some(op) = file.operator(node) else {
        return;
    };
    if !matches!(op, Operator::Plus | Operator::Minus | Operator::Tilde) {
        return;
    }
    let Some(operand) = file.fields(node).expression else {
        return;
    };
    let Some(t) = cx.type_at(operand) else {
        return;
    };
    let invalid_tilde = op == Operator::Tilde
        && file.is(operand, NodeKind::NumericLiteral)
        && is_fractional(cx, operand);
    if !is_numeric_operand(cx, t) || invalid_tilde {
        cx.report(node, FaultId::UnaryArithmNotNumber);
    }
}

fn is_fractional(cx: &mut Linter<'_>, literal: NodeId) -> bool {
    let at = cx.at(literal);
    eval_number(cx, at).is_some_and(|v| v.fract() != 0.0)
}

fn is_numeric_operand(cx: &Linter<'_>, t: TypeId) -> bool {
    let o = cx.oracle();
    if flags(o, t).intersects(TypeFlags::NUMBER_LIKE | TypeFlags::BIGINT_LIKE) {
        return true;
    }
    let sym = naming_symbol(o, t);
    is_std_named(o, sym, "Number") || is_std_named(o, sym, "BigInt")
}

pub(crate) fn binary(cx: &mut Linter<'_>, node: NodeId) {
    let file = cx.file();
    let Some(op) = file.operator(node) else {
        return;
    };
    let fields = file.fields(node);
    let (Some(lhs), Some(rhs)) = (fields.left, fields.right) else {
        return;
    };
    if op.is_assignment() {
        check_destructuring_assignment(cx, node, lhs, rhs);
        check_member_assignment(cx, lhs);
    }
    if op.is_bitwise() && !op.is_assignment() {
        check_bitwise_operands(cx, node, lhs, rhs);
    }
    match op {
        Operator::Comma => check_comma(cx, node),
        Operator::Instanceof => check_instanceof(cx, node, lhs),
        Operator::In => cx.report(node, FaultId::InOperator),
        Operator::Eq => {
            if let Some(lhs_type) = cx.type_at(lhs) {
                check_assignment_matching(cx, node, lhs_type, rhs, false);
            }
            let declared = variable_type_node(cx, lhs);
            check_es_object_assignment(cx, node, declared, rhs);
        }
        _ => {}
    }
}

/// Type annotation of the variable `expr` names, when declared in this file.
fn variable_type_node(cx: &Linter<'_>, expr: NodeId) -> Option<NodeId> {
    let o = cx.oracle();
    let decl = cx.true_symbol_at(expr).and_then(|s| first_declaration(o, s))?;
    if !cx.is_local(decl) {
        return None;
    }
    let (file, n) = resolve(o, decl)?;
    if !file.is(n, NodeKind::VariableDeclaration) {
        return None;
    }
    file.fields(n).ty
}

/// Object literals on the left of `=` are never allowed; array literals
/// only under relaxed rules, destructuring an array or tuple without nested
/// objects or spreads.
fn check_destructuring_assignment(cx: &mut Linter<'_>, node: NodeId, lhs: NodeId, rhs: NodeId) {
    let file = cx.file();
    match file.kind(lhs) {
        NodeKind::ObjectLiteralExpression => cx.report(node, FaultId::DestructuringAssignment),
        NodeKind::ArrayLiteralExpression => {
            let o = cx.oracle();
            let array_like = cx.type_at(rhs).is_some_and(|t| {
                is_or_derived_from(o, t, &|b| is_array(o, b) || is_tuple(o, b))
            });
            if !cx.options().use_relaxed_rules
                || !array_like
                || has_nested_object_literal(file, lhs)
                || has_spread(file, lhs)
            {
                cx.report(node, FaultId::DestructuringAssignment);
            }
        }
        _ => {}
    }
}

fn has_nested_object_literal(file: &SourceFile, array: NodeId) -> bool {
    file.fields(array).elements.iter().any(|e| match file.kind(*e) {
        NodeKind::ObjectLiteralExpression => true,
        NodeKind::ArrayLiteralExpression => has_nested_object_literal(file, *e),
        _ => false,
    })
}

fn has_spread(file: &SourceFile, array: NodeId) -> bool {
    file.fields(array).elements.iter().any(|e| match file.kind(*e) {
        NodeKind::SpreadElement => true,
        NodeKind::ArrayLiteralExpression => has_spread(file, *e),
        _ => false,
    })
}

/// `obj.method = ..` and `func.prop = ..`.
fn check_member_assignment(cx: &mut Linter<'_>, lhs: NodeId) {
    let file = cx.file();
    if !file.is(lhs, NodeKind::PropertyAccessExpression) {
        return;
    }
    let o = cx.oracle();
    let member = cx.true_symbol_at(lhs);
    let base = file.fields(lhs).expression.and_then(|b| cx.true_symbol_at(b));
    let member_is_method = member.is_some_and(|s| o.symbol_flags(s).contains(SymbolFlags::METHOD));
    if member_is_method {
        cx.report(lhs, FaultId::MethodReassignment);
    }
    let base_is_function = base.is_some_and(|s| o.symbol_flags(s).contains(SymbolFlags::FUNCTION));
    if base_is_function && (cx.arkts2() || (member_is_method && is_expando(cx, member))) {
        cx.report(lhs, FaultId::PropertyDeclOnFunction);
    }
}

/// A member created by assigning to it rather than by a declaration.
fn is_expando(cx: &Linter<'_>, member: Option<SymbolId>) -> bool {
    let o = cx.oracle();
    member
        .and_then(|s| first_declaration(o, s))
        .and_then(|d| declaration_kind(o, d))
        .is_some_and(|k| {
            matches!(
                k,
                NodeKind::BinaryExpression | NodeKind::PropertyAccessExpression
            )
        })
}

/// Operands of a bitwise operator must be integral numbers.
fn check_bitwise_operands(cx: &mut Linter<'_>, node: NodeId, lhs: NodeId, rhs: NodeId) {
    let file = cx.file();
    let o = cx.oracle();
    for operand in [lhs, rhs] {
        let wrong = if file.is(operand, NodeKind::NumericLiteral) {
            is_fractional(cx, operand)
        } else {
            cx.type_at(operand).is_some_and(|t| {
                !is_any(o, t)
                    && !flags(o, t).intersects(
                        TypeFlags::NUMBER_LIKE | TypeFlags::BIGINT_LIKE | TypeFlags::ENUM_LIKE,
                    )
            })
        };
        if wrong {
            cx.report(node, FaultId::BitOpWithWrongType);
            return;
        }
    }
}

/// The comma operator outside a `for` initializer or incrementor, reported
/// once at the outermost comma expression.
fn check_comma(cx: &mut Linter<'_>, node: NodeId) {
    let file = cx.file();
    let mut outer = node;
    let mut parent = file.parent(outer);
    while let Some(p) = parent.filter(|p| file.is(*p, NodeKind::BinaryExpression)) {
        if file.operator(p) == Some(Operator::Comma) {
            return;
        }
        outer = p;
        parent = file.parent(p);
    }
    if let Some(p) = parent {
        if file.is(p, NodeKind::ForStatement) {
            let f = file.fields(p);
            if f.initializer == Some(outer) || f.incrementor == Some(outer) {
                return;
            }
        }
        if file.is(p, NodeKind::ExpressionStatement) {
            cx.report_with_fix(outer, FaultId::CommaOperator, |fixer, site| {
                fixer.fix_comma_operator(site)
            });
            return;
        }
    }
    cx.report(node, FaultId::CommaOperator);
}

/// `instanceof` needs a reference-typed value on its left.
fn check_instanceof(cx: &mut Linter<'_>, node: NodeId, lhs: NodeId) {
    let file = cx.file();
    if file.is(lhs, NodeKind::ThisKeyword) {
        return;
    }
    let left = file.skip_parens(lhs);
    let o = cx.oracle();
    let primitive = cx.type_at(lhs).is_some_and(|t| is_primitive(o, t));
    let names_type = cx
        .true_symbol_at(left)
        .is_some_and(|s| o.symbol_flags(s).intersects(SymbolFlags::CLASS | SymbolFlags::INTERFACE));
    if primitive || names_type {
        cx.report(node, FaultId::InstanceofUnsupported);
    }
}

// ── Member access ──

pub(crate) fn property_access(cx: &mut Linter<'_>, node: NodeId) {
    let file = cx.file();
    let is_callee = file.parent(node).is_some_and(|p| {
        file.is(p, NodeKind::CallExpression) && file.fields(p).expression == Some(node)
    });
    if is_callee {
        return;
    }
    let Some(base) = file.fields(node).expression else {
        return;
    };
    let o = cx.oracle();
    let member_sym = cx.true_symbol_at(node);
    let base_sym = cx.true_symbol_at(base);
    let base_type = cx.type_at(base);

    if is_prototype_access(cx, node, member_sym, base_sym, base_type) {
        if let Some(name) = file.fields(node).name {
            cx.report(name, FaultId::Prototype);
        }
    }
    if !cx.arkts2() {
        if let Some(sym) = member_sym {
            if is_std_symbol_api(cx, sym) && !ALLOWED_STD_SYMBOL_API.contains(&o.symbol_name(sym)) {
                cx.report(node, FaultId::SymbolType);
            }
        }
    }
    if cx.options().advanced_class_checks && is_class_object_expression(cx, base) {
        cx.report(base, FaultId::ClassAsObject);
    }
    if base_sym.is_some_and(|s| symbol_has_es_object_type(o, s)) {
        let rule = es_object_rule(cx);
        cx.report(node, rule);
    }
    if base_type.is_some_and(|t| is_sendable_function(o, t) || has_sendable_type_alias(o, t)) {
        cx.report(node, FaultId::SendableFunctionProperty);
    }
    check_member_use(cx, node);
}

/// `X.prototype` on a class, function or `any` value that does not come
/// from a library.
fn is_prototype_access(
    cx: &Linter<'_>,
    node: NodeId,
    member_sym: Option<SymbolId>,
    base_sym: Option<SymbolId>,
    base_type: Option<TypeId>,
) -> bool {
    let file = cx.file();
    if file.fields(node).name.map(|n| file.text(n)) != Some("prototype") {
        return false;
    }
    let o = cx.oracle();
    let mut cur = node;
    while file.is(cur, NodeKind::PropertyAccessExpression) {
        let Some(inner) = file.fields(cur).expression else {
            break;
        };
        if cx.true_symbol_at(inner).is_some_and(|s| is_library_symbol(o, s)) {
            return false;
        }
        cur = inner;
    }
    if file.is(cur, NodeKind::Identifier)
        && file.text(cur) != "prototype"
        && cx.type_at(cur).is_some_and(|t| is_any(o, t))
    {
        return false;
    }
    if member_sym.is_some_and(|s| o.symbol_flags(s).contains(SymbolFlags::PROTOTYPE)) {
        return true;
    }
    let base_names_type_or_function = base_sym.is_some_and(|s| {
        o.symbol_flags(s)
            .intersects(SymbolFlags::CLASS | SymbolFlags::INTERFACE | SymbolFlags::FUNCTION)
    });
    if base_names_type_or_function {
        return true;
    }
    base_type.is_some_and(|t| is_functional(o, t) || is_any(o, t))
}

/// Member of the `Symbol` API. Without runtime logic a bare `Symbol`
/// counts too.
fn is_std_symbol_api(cx: &Linter<'_>, sym: SymbolId) -> bool {
    let o = cx.oracle();
    let parent = parent_symbol_name(cx.oracle(), sym);
    let name = if cx.options().use_rt_logic {
        match parent {
            Some(p) => p,
            None => return false,
        }
    } else {
        parent.unwrap_or_else(|| o.symbol_name(sym))
    };
    name == SYMBOL || name == SYMBOL_CONSTRUCTOR
}

/// A class object reached through something other than the class name.
fn is_class_object_expression(cx: &Linter<'_>, expr: NodeId) -> bool {
    let o = cx.oracle();
    if !cx.type_at(expr).is_some_and(|t| is_class_value_type(o, t)) {
        return false;
    }
    !cx
        .true_symbol_at(expr)
        .is_some_and(|s| o.symbol_flags(s).contains(SymbolFlags::CLASS))
}

pub(crate) fn element_access(cx: &mut Linter<'_>, node: NodeId) {
    let file = cx.file();
    let fields = file.fields(node);
    let Some(base) = fields.expression else {
        return;
    };
    let o = cx.oracle();
    let base_sym = cx.true_symbol_at(base);
    let base_type = cx.type_at(base).map(|t| o.non_nullable(t));
    let index_type = fields.index.and_then(|i| cx.type_at(i));
    let allowed = base_sym.is_some_and(|s| is_library_symbol(o, s))
        || file.is(base, NodeKind::ArrayLiteralExpression)
        || base_type.map_or(true, |t| is_element_access_allowed(cx, t, index_type));
    if !allowed {
        cx.report(node, FaultId::PropertyAccessByIndex);
    }
    if is_es_object_value(cx, base) {
        let rule = es_object_rule(cx);
        cx.report(node, rule);
    }
    if let (Some(index), Some(t)) = (fields.index, base_type) {
        let array_like = is_or_derived_from(o, t, &|b| is_array(o, b) || is_tuple(o, b));
        if array_like && cx.enabled(FaultId::IndexNegative) {
            let at = cx.at(index);
            let bad = eval_number(cx, at)
                .is_some_and(|v| v.is_nan() || v < 0.0 || v.fract() != 0.0);
            if bad {
                cx.report(index, FaultId::IndexNegative);
            }
        }
    }
    check_element_access(cx, node);
}

fn is_element_access_allowed(cx: &Linter<'_>, t: TypeId, index: Option<TypeId>) -> bool {
    let o = cx.oracle();
    if is_union(o, t) {
        return o
            .union_members(t)
            .iter()
            .all(|m| is_element_access_allowed(cx, *m, index));
    }
    if is_library_type(o, t) || is_any(o, t) || is_enum(o, t) {
        return true;
    }
    if flags(o, t).intersects(TypeFlags::STRING_LIKE) {
        return true;
    }
    if is_or_derived_from(o, t, &|b| {
        is_array(o, b) || is_tuple(o, b) || is_std_record_type(o, b)
    }) {
        return true;
    }
    if !cx.arkts2() && is_or_derived_from(o, t, &|b| is_std_map_type(o, b)) {
        return true;
    }
    o.ty(t)
        .and_then(|i| i.alias_symbol)
        .is_some_and(|s| o.symbol_name(s) == "ESObject")
}

// ── Calls ──

pub(crate) fn call(cx: &mut Linter<'_>, node: NodeId) {
    let file = cx.file();
    let Some(callee) = file.fields(node).expression else {
        return;
    };
    check_import_call(cx, node, callee);
    check_require_call(cx, node, callee);
    let o = cx.oracle();
    let callee_sym = cx.true_symbol_at(callee);
    if let Some(sym) = callee_sym {
        if !cx.arkts2() {
            check_std_api_call(cx, node, sym);
            check_function_apply_bind(cx, node, sym);
        }
        if symbol_has_es_object_type(o, sym) {
            let rule = es_object_rule(cx);
            cx.report(node, rule);
        }
        if cx.arkts2() && is_std_symbol(cx, sym) {
            cx.report(node, FaultId::SymbolType);
        }
    }
    if !callee_sym.is_some_and(|s| is_library_symbol(o, s)) {
        if let Some(sig) = resolved_signature(cx, node) {
            check_generic_call(cx, node, sig);
            check_arguments(cx, node, sig);
        }
    }
    let base_is_es_object = file.is(callee, NodeKind::PropertyAccessExpression)
        && file
            .fields(callee)
            .expression
            .is_some_and(|b| is_es_object_value(cx, b));
    if base_is_es_object {
        let rule = es_object_rule(cx);
        cx.report(node, rule);
    }
}

fn resolved_signature<'a>(cx: &Linter<'a>, node: NodeId) -> Option<&'a SignatureInfo> {
    let o = cx.oracle();
    o.resolved_signature(cx.at(node)).and_then(|id| o.signature(id))
}

/// `import('m', { assert: .. })`.
fn check_import_call(cx: &mut Linter<'_>, node: NodeId, callee: NodeId) {
    let file = cx.file();
    if !file.is(callee, NodeKind::ImportKeyword) {
        return;
    }
    let Some(&options) = file.fields(node).arguments.get(1) else {
        return;
    };
    if !file.is(options, NodeKind::ObjectLiteralExpression) {
        return;
    }
    let assert = file.fields(options).elements.iter().copied().find(|p| {
        matches!(
            file.kind(*p),
            NodeKind::PropertyAssignment | NodeKind::ShorthandPropertyAssignment
        ) && file.fields(*p).name.map(|n| file.text(n)) == Some("assert")
    });
    if let Some(prop) = assert {
        cx.report(prop, FaultId::ImportAssertion);
    }
}

/// `const x = require('m')` with Node's `require`.
fn check_require_call(cx: &mut Linter<'_>, node: NodeId, callee: NodeId) {
    let file = cx.file();
    if !file.is(callee, NodeKind::Identifier) || file.text(callee) != "require" {
        return;
    }
    let Some(decl) = file
        .parent(node)
        .filter(|p| file.is(*p, NodeKind::VariableDeclaration))
    else {
        return;
    };
    let o = cx.oracle();
    let node_require = cx.type_at(callee).is_some_and(|t| {
        o.ty(t)
            .and_then(|i| i.symbol)
            .is_some_and(|s| {
                o.symbol_flags(s).contains(SymbolFlags::INTERFACE) && o.symbol_name(s) == "NodeRequire"
            })
    });
    if node_require {
        cx.report(decl, FaultId::ImportAssignment);
    }
}

fn check_std_api_call(cx: &mut Linter<'_>, node: NodeId, sym: SymbolId) {
    let o = cx.oracle();
    if !is_std_library_symbol(o, sym) {
        return;
    }
    let parent = parent_symbol_name(cx.oracle(), sym).filter(|p| *p != "global");
    match limited_std_api(parent, o.symbol_name(sym)) {
        Some(StdApiRestriction::Limited) => cx.report(node, FaultId::LimitedStdLibApi),
        Some(StdApiRestriction::Symbol) => cx.report(node, FaultId::SymbolType),
        None => {}
    }
}

/// `f.apply(..)`, `f.call(..)` and `f.bind(..)`.
fn check_function_apply_bind(cx: &mut Linter<'_>, node: NodeId, sym: SymbolId) {
    let Some(parent) = parent_symbol_name(cx.oracle(), sym) else {
        return;
    };
    if parent != "Function" && parent != "CallableFunction" {
        return;
    }
    match cx.oracle().symbol_name(sym) {
        "apply" | "call" => cx.report(node, FaultId::FunctionApplyCall),
        "bind" => {
            let rule = if cx.arkts2() {
                FaultId::FunctionBindError
            } else {
                FaultId::FunctionBind
            };
            cx.report(node, rule);
        }
        _ => {}
    }
}

/// `Symbol` itself rather than one of its members.
fn is_std_symbol(cx: &Linter<'_>, sym: SymbolId) -> bool {
    let name = cx.oracle().symbol_name(sym);
    parent_symbol_name(cx.oracle(), sym).is_none() && (name == SYMBOL || name == SYMBOL_CONSTRUCTOR)
}

/// Type arguments the caller left out that inference resolved to `unknown`.
fn check_generic_call(cx: &mut Linter<'_>, node: NodeId, sig: &SignatureInfo) {
    let o = cx.oracle();
    let explicit = cx.file().fields(node).type_arguments.len();
    let inferred_unknown = sig
        .type_parameters
        .iter()
        .skip(explicit)
        .any(|t| is_unknown(o, *t));
    if inferred_unknown {
        cx.report(node, FaultId::GenericCallNoTypeArgs);
    }
}

/// Each argument matches its parameter nominally; surplus arguments match
/// the last (rest) parameter's element type.
fn check_arguments(cx: &mut Linter<'_>, node: NodeId, sig: &SignatureInfo) {
    let o = cx.oracle();
    let Some(last) = sig.parameters.len().checked_sub(1) else {
        return;
    };
    let file = cx.file();
    for (i, &arg) in file.fields(node).arguments.iter().enumerate() {
        if cx.type_at(arg).is_none() {
            continue;
        }
        let param = sig.parameters[i.min(last)];
        let Some(decl) = o.symbol(param).and_then(|info| info.value_declaration) else {
            continue;
        };
        let Some((param_file, param_node)) = resolve(o, decl) else {
            continue;
        };
        if !param_file.is(param_node, NodeKind::Parameter) {
            continue;
        }
        let Some(mut param_type) = o.type_of_symbol(param) else {
            continue;
        };
        if param_file.has_flags(param_node, NodeFlags::DOT_DOT_DOT) && is_array(o, param_type) {
            if let Some(elem) = o.ty(param_type).and_then(|i| i.type_arguments.first().copied()) {
                param_type = elem;
            }
        }
        check_assignment_matching(cx, arg, param_type, arg, false);
    }
}

pub(crate) fn new_expression(cx: &mut Linter<'_>, node: NodeId) {
    let file = cx.file();
    let Some(callee) = file.fields(node).expression else {
        return;
    };
    let o = cx.oracle();
    let callee_sym = cx.true_symbol_at(callee);
    if cx.options().advanced_class_checks || cx.arkts2() {
        let callee_type = cx.type_at(callee);
        let names_class = callee_sym.is_some_and(|s| o.symbol_flags(s).contains(SymbolFlags::CLASS));
        let resolved = callee_sym.is_some() || callee_type.is_some();
        let dynamic = resolved
            && !names_class
            && !callee_type.is_some_and(|t| is_library_type(o, t))
            && !is_es_object_value(cx, callee);
        if dynamic {
            let rule = if cx.arkts2() {
                FaultId::DynamicCtorCall
            } else {
                FaultId::ClassAsObject
            };
            cx.report(callee, rule);
        }
    }
    if !callee_sym.is_some_and(|s| is_library_symbol(o, s)) {
        if let Some(sig) = resolved_signature(cx, node) {
            check_arguments(cx, node, sig);
            check_generic_call(cx, node, sig);
        }
    }
    check_sendable_type_arguments(cx, node);
}

/// Type arguments of a sendable class instantiation must be sendable.
fn check_sendable_type_arguments(cx: &mut Linter<'_>, node: NodeId) {
    let o = cx.oracle();
    if !cx
        .type_at(node)
        .is_some_and(|t| is_sendable_class_or_interface(o, t))
    {
        return;
    }
    let file = cx.file();
    for &arg in &file.fields(node).type_arguments {
        if !is_sendable_type_node(o, cx.at(arg), false) {
            cx.report(arg, FaultId::SendableGenericTypes);
        }
    }
}

// ── Casts ──

/// `as const` and `<const>`.
fn is_const_type(file: &SourceFile, ty: NodeId) -> bool {
    file.is(ty, NodeKind::TypeReference) && file.name_text(ty) == Some("const")
}

pub(crate) fn as_expression(cx: &mut Linter<'_>, node: NodeId) {
    let file = cx.file();
    let fields = file.fields(node);
    let (Some(expr), Some(ty)) = (fields.expression, fields.ty) else {
        return;
    };
    if is_const_type(file, ty) {
        cx.report(node, FaultId::ConstAssertion);
    }
    let o = cx.oracle();
    let (Some(target), Some(source)) = (cx.type_at(ty), cx.type_at(expr)) else {
        return;
    };
    let (target, source) = (o.non_nullable(target), o.non_nullable(source));
    let target_sym = naming_symbol(o, target);
    let boxes_primitive = flags(o, source).intersects(TypeFlags::NUMBER_LIKE)
        && is_std_named(o, target_sym, "Number")
        || flags(o, source).intersects(TypeFlags::BOOLEAN_LIKE)
            && is_std_named(o, target_sym, "Boolean");
    if boxes_primitive {
        cx.report(node, FaultId::TypeAssertion);
    }
    if !is_sendable_class_or_interface(o, source)
        && !is_object_root(o, source)
        && !is_any(o, source)
        && is_sendable_class_or_interface(o, target)
    {
        cx.report(node, FaultId::SendableAsExpr);
    }
    if is_wrong_sendable_function_assignment(o, target, source) {
        cx.report(node, FaultId::SendableFunctionAsExpr);
    }
}

/// `<T>expr`.
pub(crate) fn type_assertion(cx: &mut Linter<'_>, node: NodeId) {
    let file = cx.file();
    if file.fields(node).ty.is_some_and(|ty| is_const_type(file, ty)) {
        cx.report(node, FaultId::ConstAssertion);
        return;
    }
    cx.report_with_fix(node, FaultId::TypeAssertion, |fixer, site| {
        fixer.fix_type_assertion(site)
    });
}

pub(crate) fn meta_property(cx: &mut Linter<'_>, node: NodeId) {
    let file = cx.file();
    if file.fields(node).name.map(|n| file.text(n)) == Some("target") {
        cx.report(node, FaultId::NewTarget);
    }
}

pub(crate) fn void_expression(cx: &mut Linter<'_>, node: NodeId) {
    cx.report(node, FaultId::VoidOperator);
}
